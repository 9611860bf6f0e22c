//! Panel configuration
//!
//! Everything a [`LogPanel`](crate::LogPanel) needs to know at construction.
//! Derived geometry (row height, row count, inner width) is computed from
//! these fields and never stored.

use crate::error::ConfigError;
use crate::layout::{GlyphWidthTable, LineFitter};
use crate::widget::{Anchor, Color};
use serde::{Deserialize, Serialize};

/// Row height in layout units at scale 1.
pub const BASE_ROW_HEIGHT: f32 = 20.0;

/// Text size at scale 1; the glyph width table is measured at this size.
pub const BASE_TEXT_SIZE: f32 = 20.0;

/// Gap between stacked row widgets.
pub const ROW_GAP: f32 = 2.0;

/// Largest number of rows a panel may hold.
pub const MAX_ROWS: usize = 1024;

/// How `log` chooses a row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelMode {
    /// The caller names the row; other rows never move.
    #[default]
    Static,
    /// New text lands on the bottom row and older rows move up.
    Scrolling,
}

/// What a static `log` does with a row index outside the panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutOfRangePolicy {
    /// Drop the text and log a warning.
    #[default]
    Ignore,
    /// Return [`ConsoleError::RowOutOfRange`](crate::ConsoleError::RowOutOfRange).
    Reject,
}

/// Panel configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelConfig {
    #[serde(default)]
    pub mode: PanelMode,

    /// Replace overflow with an ellipsis instead of wrapping it onto more rows
    #[serde(default = "default_truncate")]
    pub truncate: bool,

    #[serde(default = "default_offset")]
    pub x: f32,

    #[serde(default = "default_offset")]
    pub y: f32,

    #[serde(default = "default_width")]
    pub width: f32,

    #[serde(default = "default_height")]
    pub height: f32,

    #[serde(default = "default_padding")]
    pub padding: f32,

    /// Screen corner the panel is positioned from
    #[serde(default = "default_anchor")]
    pub anchor: Anchor,

    #[serde(default = "default_background_color")]
    pub background_color: Color,

    #[serde(default = "default_background_alpha")]
    pub background_alpha: f32,

    #[serde(default = "default_text_color")]
    pub text_color: Color,

    /// Whether the panel starts shown
    #[serde(default)]
    pub visible: bool,

    /// Multiplier for row height, text size and glyph widths
    #[serde(default = "default_scale")]
    pub scale: f32,

    #[serde(default)]
    pub out_of_range: OutOfRangePolicy,
}

fn default_truncate() -> bool {
    true
}

fn default_offset() -> f32 {
    10.0
}

fn default_width() -> f32 {
    400.0
}

fn default_height() -> f32 {
    300.0
}

fn default_padding() -> f32 {
    10.0
}

fn default_anchor() -> Anchor {
    Anchor::TopLeft
}

fn default_background_color() -> Color {
    Color::BLACK
}

fn default_background_alpha() -> f32 {
    0.5
}

fn default_text_color() -> Color {
    Color::GREEN
}

fn default_scale() -> f32 {
    1.0
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            mode: PanelMode::default(),
            truncate: default_truncate(),
            x: default_offset(),
            y: default_offset(),
            width: default_width(),
            height: default_height(),
            padding: default_padding(),
            anchor: default_anchor(),
            background_color: default_background_color(),
            background_alpha: default_background_alpha(),
            text_color: default_text_color(),
            visible: false,
            scale: default_scale(),
            out_of_range: OutOfRangePolicy::default(),
        }
    }
}

impl PanelConfig {
    /// Default configuration in scrolling mode.
    pub fn scrolling() -> Self {
        Self {
            mode: PanelMode::Scrolling,
            ..Self::default()
        }
    }

    pub fn row_height(&self) -> f32 {
        BASE_ROW_HEIGHT * self.scale
    }

    /// Height of the widget backing a row; leaves a gap to the next row.
    pub fn row_widget_height(&self) -> f32 {
        self.row_height() - ROW_GAP * self.scale
    }

    pub fn text_size(&self) -> f32 {
        BASE_TEXT_SIZE * self.scale
    }

    /// Width available to row content.
    pub fn inner_width(&self) -> f32 {
        self.width - 2.0 * self.padding
    }

    /// Number of rows that fit: `floor((height - padding) / row_height)`.
    pub fn max_rows(&self) -> usize {
        let rows = ((self.height - self.padding) / self.row_height()).floor();
        if rows.is_finite() && rows > 0.0 {
            rows as usize
        } else {
            0
        }
    }

    /// Check the configuration describes a usable panel.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ConfigError::InvalidScale(self.scale));
        }

        for (field, value) in [
            ("x", self.x),
            ("y", self.y),
            ("width", self.width),
            ("height", self.height),
            ("padding", self.padding),
            ("background_alpha", self.background_alpha),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }

        if !self.anchor.is_corner() {
            return Err(ConfigError::UnsupportedAnchor(self.anchor));
        }

        let rows = self.max_rows();
        if rows == 0 {
            return Err(ConfigError::NoRows {
                height: self.height,
                row_height: self.row_height(),
            });
        }
        if rows > MAX_ROWS {
            return Err(ConfigError::TooManyRows {
                rows,
                max: MAX_ROWS,
            });
        }

        let required = LineFitter::min_row_width(GlyphWidthTable::global(), self.scale);
        if self.inner_width() < required {
            return Err(ConfigError::PanelTooNarrow {
                inner_width: self.inner_width(),
                required,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_geometry() {
        let config = PanelConfig::default();
        assert_eq!(config.mode, PanelMode::Static);
        assert!(config.truncate);
        assert_eq!(config.row_height(), 20.0);
        assert_eq!(config.row_widget_height(), 18.0);
        assert_eq!(config.inner_width(), 380.0);
        assert_eq!(config.max_rows(), 14);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_scale_changes_rows() {
        let config = PanelConfig {
            scale: 2.0,
            ..PanelConfig::default()
        };
        assert_eq!(config.row_height(), 40.0);
        assert_eq!(config.text_size(), 40.0);
        assert_eq!(config.max_rows(), 7);
    }

    #[test]
    fn test_config_deserialize_partial() {
        let toml = r#"
            mode = "scrolling"
            width = 500
            text_color = "yellow"
            anchor = "bottom-right"
        "#;
        let config: PanelConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.mode, PanelMode::Scrolling);
        assert_eq!(config.width, 500.0);
        assert_eq!(config.text_color, Color::YELLOW);
        assert_eq!(config.anchor, Anchor::BottomRight);
        // Other fields should use defaults
        assert_eq!(config.height, 300.0);
        assert_eq!(config.background_alpha, 0.5);
        assert_eq!(config.out_of_range, OutOfRangePolicy::Ignore);
    }

    #[test]
    fn test_config_deserialize_rgb_color() {
        let toml = r#"
            background_color = [0.1, 0.2, 0.3]
            out_of_range = "reject"
        "#;
        let config: PanelConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.background_color, Color::rgb(0.1, 0.2, 0.3));
        assert_eq!(config.out_of_range, OutOfRangePolicy::Reject);
    }

    #[test]
    fn test_validate_rejects_bad_panels() {
        let centered = PanelConfig {
            anchor: Anchor::Center,
            ..PanelConfig::default()
        };
        assert!(matches!(
            centered.validate(),
            Err(ConfigError::UnsupportedAnchor(Anchor::Center))
        ));

        let flat = PanelConfig {
            height: 25.0,
            ..PanelConfig::default()
        };
        assert!(matches!(flat.validate(), Err(ConfigError::NoRows { .. })));

        let narrow = PanelConfig {
            width: 60.0,
            ..PanelConfig::default()
        };
        assert!(matches!(
            narrow.validate(),
            Err(ConfigError::PanelTooNarrow { .. })
        ));

        let zero_scale = PanelConfig {
            scale: 0.0,
            ..PanelConfig::default()
        };
        assert!(matches!(
            zero_scale.validate(),
            Err(ConfigError::InvalidScale(_))
        ));
    }

    #[test]
    fn test_validate_rejects_oversized_panel() {
        let tall = PanelConfig {
            height: 1e12,
            ..PanelConfig::default()
        };
        assert!(matches!(
            tall.validate(),
            Err(ConfigError::TooManyRows { max: MAX_ROWS, .. })
        ));

        let largest = PanelConfig {
            height: MAX_ROWS as f32 * 20.0 + 10.0,
            ..PanelConfig::default()
        };
        assert_eq!(largest.max_rows(), MAX_ROWS);
        assert!(largest.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_finite_geometry() {
        let nan_width = PanelConfig {
            width: f32::NAN,
            ..PanelConfig::default()
        };
        assert!(matches!(
            nan_width.validate(),
            Err(ConfigError::NonFinite { field: "width", .. })
        ));

        let infinite_height = PanelConfig {
            height: f32::INFINITY,
            ..PanelConfig::default()
        };
        assert!(matches!(
            infinite_height.validate(),
            Err(ConfigError::NonFinite { field: "height", .. })
        ));

        let nan_alpha = PanelConfig {
            background_alpha: f32::NAN,
            ..PanelConfig::default()
        };
        assert!(matches!(
            nan_alpha.validate(),
            Err(ConfigError::NonFinite {
                field: "background_alpha",
                ..
            })
        ));
    }
}
