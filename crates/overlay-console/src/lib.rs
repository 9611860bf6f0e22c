//! # overlay-console
//!
//! An in-session diagnostic console drawn with a host's retained-mode widget
//! primitives. Each log line is split into small parts, measured against a
//! per-glyph width table and packed into fixed-height rows of text widgets.
//!
//! ## Design Principles
//!
//! The console never draws anything itself. It only creates, moves and
//! deletes widgets through the [`WidgetService`] trait, which the host
//! implements on top of its own UI. This enables:
//!
//! - Testing layout and row lifecycle against the in-memory [`WidgetTree`]
//! - Putting the same console on any retained-mode surface
//! - Keeping every widget the console creates accounted for and released
//!
//! ## Addressing Modes
//!
//! A [`LogPanel`] is either:
//!
//! - **static**: `log(text, Some(row))` writes into a fixed row, replacing
//!   whatever was there; other rows never move
//! - **scrolling**: `log(text, None)` appends at the bottom; older rows move
//!   up and are deleted once they reach the top
//!
//! Overflow is either cut with an ellipsis or wrapped onto more rows,
//! depending on [`PanelConfig::truncate`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use overlay_console::{LogPanel, PanelConfig, WidgetTree};
//!
//! let mut panel = LogPanel::new(WidgetTree::new(), PanelConfig::scrolling())?;
//! panel.show();
//! panel.log("player joined", None)?;
//!
//! for row in panel.rows_top_to_bottom() {
//!     println!("{:>6} {}", row.y, row.text);
//! }
//!
//! panel.destroy();
//! ```

pub mod config;
pub mod error;
pub mod layout;
pub mod panel;
pub mod rows;
pub mod widget;

// Re-export commonly used types
pub use config::{OutOfRangePolicy, PanelConfig, PanelMode};
pub use error::{ConfigError, ConsoleError};
pub use layout::{split, FitOutcome, GlyphWidthTable, LineFitter, Part, PlacedPart};
pub use panel::LogPanel;
pub use rows::{LogOutcome, RowSlotManager, RowSnapshot};
pub use widget::{
    Anchor, Background, BgFill, Color, ContainerSpec, Position, Size, TextSpec, WidgetId,
    WidgetKind, WidgetNode, WidgetService, WidgetTree,
};
