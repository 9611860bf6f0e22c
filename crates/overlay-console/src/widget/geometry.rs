//! Geometry, anchoring and color primitives shared by widget specs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in layout units, relative to the parent widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A width/height pair in layout units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Where a widget's position is measured from inside its parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    #[default]
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Anchor {
    /// Whether this anchor is one of the four panel corners.
    pub fn is_corner(&self) -> bool {
        matches!(
            self,
            Anchor::TopLeft | Anchor::TopRight | Anchor::BottomLeft | Anchor::BottomRight
        )
    }

    /// Horizontal alignment factor: 0.0 = left, 0.5 = center, 1.0 = right.
    pub fn horizontal(&self) -> f32 {
        match self {
            Anchor::TopLeft | Anchor::CenterLeft | Anchor::BottomLeft => 0.0,
            Anchor::TopCenter | Anchor::Center | Anchor::BottomCenter => 0.5,
            Anchor::TopRight | Anchor::CenterRight | Anchor::BottomRight => 1.0,
        }
    }

    /// Vertical alignment factor: 0.0 = top, 0.5 = center, 1.0 = bottom.
    pub fn vertical(&self) -> f32 {
        match self {
            Anchor::TopLeft | Anchor::TopCenter | Anchor::TopRight => 0.0,
            Anchor::CenterLeft | Anchor::Center | Anchor::CenterRight => 0.5,
            Anchor::BottomLeft | Anchor::BottomCenter | Anchor::BottomRight => 1.0,
        }
    }
}

/// How a widget's background is painted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BgFill {
    None,
    #[default]
    Solid,
}

/// Background paint for containers and text labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Background {
    pub color: Color,
    pub alpha: f32,
    pub fill: BgFill,
}

impl Background {
    /// No background at all.
    pub const NONE: Background = Background {
        color: Color::BLACK,
        alpha: 0.0,
        fill: BgFill::None,
    };

    pub const fn solid(color: Color, alpha: f32) -> Self {
        Self {
            color,
            alpha,
            fill: BgFill::Solid,
        }
    }

    /// Whether anything would be painted for this background.
    pub fn is_visible(&self) -> bool {
        self.fill == BgFill::Solid && self.alpha > 0.0
    }
}

/// An RGB color with components in `0.0..=1.0`.
///
/// In config files a color is either one of the palette names
/// (`"green"`, `"grey-50"`, ...) or an `[r, g, b]` triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ColorDef", into = "ColorDef")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const GREY_25: Color = Color::rgb(0.25, 0.25, 0.25);
    pub const GREY_50: Color = Color::rgb(0.5, 0.5, 0.5);
    pub const GREY_75: Color = Color::rgb(0.75, 0.75, 0.75);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
    pub const PURPLE: Color = Color::rgb(1.0, 0.0, 1.0);
    pub const CYAN: Color = Color::rgb(0.0, 1.0, 1.0);
    pub const MAGENTA: Color = Color::rgb(1.0, 0.0, 1.0);

    const PALETTE: [(&'static str, Color); 12] = [
        ("black", Color::BLACK),
        ("grey-25", Color::GREY_25),
        ("grey-50", Color::GREY_50),
        ("grey-75", Color::GREY_75),
        ("white", Color::WHITE),
        ("red", Color::RED),
        ("green", Color::GREEN),
        ("blue", Color::BLUE),
        ("yellow", Color::YELLOW),
        ("purple", Color::PURPLE),
        ("cyan", Color::CYAN),
        ("magenta", Color::MAGENTA),
    ];

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Look up a palette color by name (case-insensitive, `_` or `-`).
    pub fn named(name: &str) -> Option<Color> {
        let name = name.trim().to_lowercase().replace('_', "-");
        Self::PALETTE
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, color)| *color)
    }

    /// Components scaled to 8-bit channels.
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (channel(self.r), channel(self.g), channel(self.b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.to_rgb8();
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

/// Serialized form of [`Color`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorDef {
    Named(String),
    Rgb([f32; 3]),
}

impl TryFrom<ColorDef> for Color {
    type Error = String;

    fn try_from(def: ColorDef) -> Result<Self, Self::Error> {
        match def {
            ColorDef::Named(name) => {
                Color::named(&name).ok_or_else(|| format!("unknown color name: {}", name))
            }
            ColorDef::Rgb([r, g, b]) => {
                if [r, g, b].iter().all(|c| (0.0..=1.0).contains(c)) {
                    Ok(Color::rgb(r, g, b))
                } else {
                    Err(format!("color components out of range: [{}, {}, {}]", r, g, b))
                }
            }
        }
    }
}

impl From<Color> for ColorDef {
    fn from(color: Color) -> Self {
        Color::PALETTE
            .iter()
            .find(|(_, candidate)| *candidate == color)
            .map(|(name, _)| ColorDef::Named(name.to_string()))
            .unwrap_or(ColorDef::Rgb([color.r, color.g, color.b]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors() {
        assert_eq!(Color::named("green"), Some(Color::GREEN));
        assert_eq!(Color::named("GREY_50"), Some(Color::GREY_50));
        assert_eq!(Color::named("grey-75"), Some(Color::GREY_75));
        assert_eq!(Color::named("chartreuse"), None);
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::GREEN.to_string(), "#00ff00");
        assert_eq!(Color::GREY_50.to_string(), "#808080");
    }

    #[test]
    fn test_color_from_rgb_triple() {
        let color = Color::try_from(ColorDef::Rgb([0.5, 0.25, 1.0])).unwrap();
        assert_eq!(color, Color::rgb(0.5, 0.25, 1.0));

        assert!(Color::try_from(ColorDef::Rgb([1.5, 0.0, 0.0])).is_err());
    }

    #[test]
    fn test_anchor_factors() {
        assert_eq!(Anchor::TopLeft.horizontal(), 0.0);
        assert_eq!(Anchor::CenterLeft.vertical(), 0.5);
        assert_eq!(Anchor::BottomRight.horizontal(), 1.0);
        assert_eq!(Anchor::BottomRight.vertical(), 1.0);
        assert!(Anchor::BottomLeft.is_corner());
        assert!(!Anchor::Center.is_corner());
    }

    #[test]
    fn test_background_visibility() {
        assert!(!Background::NONE.is_visible());
        assert!(Background::solid(Color::BLACK, 0.5).is_visible());
        assert!(!Background::solid(Color::BLACK, 0.0).is_visible());
    }
}
