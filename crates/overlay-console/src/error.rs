//! Error types for the console.

use crate::widget::Anchor;
use thiserror::Error;

/// Errors returned by panel operations.
#[derive(Debug, Error, PartialEq)]
pub enum ConsoleError {
    /// A static row index outside `0..max_rows` under [`OutOfRangePolicy::Reject`](crate::OutOfRangePolicy::Reject).
    #[error("Row index {index} is out of range (panel has {max_rows} rows)")]
    RowOutOfRange { index: usize, max_rows: usize },

    /// A static-mode `log` was called without a row index.
    #[error("Static panels need a row index to log into")]
    MissingRowIndex,

    /// The panel configuration is unusable.
    #[error("Invalid panel configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Reasons a [`PanelConfig`](crate::PanelConfig) is rejected.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("scale must be a positive number, got {0}")]
    InvalidScale(f32),

    #[error("panel must be anchored to a corner, got {0:?}")]
    UnsupportedAnchor(Anchor),

    #[error("height {height} leaves no room for a {row_height} unit row")]
    NoRows { height: f32, row_height: f32 },

    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("panel fits {rows} rows, more than the {max} supported")]
    TooManyRows { rows: usize, max: usize },

    #[error("inner width {inner_width} is narrower than the {required} units one row needs")]
    PanelTooNarrow { inner_width: f32, required: f32 },
}
