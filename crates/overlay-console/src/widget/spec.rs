//! Creation parameters for the two widget kinds the console needs.

use super::geometry::{Anchor, Background, Color, Position, Size};

/// Parameters for creating a container widget.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerSpec {
    /// Debug name, unique per console (e.g. `consoleRow_3`).
    pub name: String,
    pub position: Position,
    pub size: Size,
    pub anchor: Anchor,
    pub visible: bool,
    /// Inner padding applied to children.
    pub padding: f32,
    pub background: Background,
}

impl ContainerSpec {
    /// A visible, centered container with a solid black background.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: Position::default(),
            size: Size::default(),
            anchor: Anchor::Center,
            visible: true,
            padding: 0.0,
            background: Background::solid(Color::BLACK, 1.0),
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn sized(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn anchored(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }
}

/// Parameters for creating a text label widget.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpec {
    pub name: String,
    pub position: Position,
    pub size: Size,
    pub anchor: Anchor,
    pub visible: bool,
    pub padding: f32,
    pub background: Background,
    /// The label content.
    pub message: String,
    pub text_size: f32,
    pub text_color: Color,
    pub text_alpha: f32,
    /// Alignment of the text inside the label's box.
    pub text_anchor: Anchor,
}

impl TextSpec {
    /// A visible, centered label: size 36, black, no background.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: Position::default(),
            size: Size::default(),
            anchor: Anchor::Center,
            visible: true,
            padding: 0.0,
            background: Background {
                color: Color::WHITE,
                ..Background::NONE
            },
            message: message.into(),
            text_size: 36.0,
            text_color: Color::BLACK,
            text_alpha: 1.0,
            text_anchor: Anchor::Center,
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn sized(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn anchored(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn text_size(mut self, text_size: f32) -> Self {
        self.text_size = text_size;
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn text_anchor(mut self, anchor: Anchor) -> Self {
        self.text_anchor = anchor;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::geometry::BgFill;

    #[test]
    fn test_container_defaults() {
        let spec = ContainerSpec::new("window");
        assert_eq!(spec.anchor, Anchor::Center);
        assert!(spec.visible);
        assert_eq!(spec.background.fill, BgFill::Solid);
        assert_eq!(spec.background.alpha, 1.0);
    }

    #[test]
    fn test_text_defaults() {
        let spec = TextSpec::new("label", "hi");
        assert_eq!(spec.message, "hi");
        assert_eq!(spec.text_size, 36.0);
        assert_eq!(spec.text_color, Color::BLACK);
        assert!(!spec.background.is_visible());
    }

    #[test]
    fn test_builder_chain() {
        let spec = TextSpec::new("part", "abc")
            .at(Position::new(30.0, 0.0))
            .sized(Size::new(28.5, 18.0))
            .anchored(Anchor::CenterLeft)
            .text_size(20.0)
            .text_color(Color::GREEN);
        assert_eq!(spec.position, Position::new(30.0, 0.0));
        assert_eq!(spec.size.width, 28.5);
        assert_eq!(spec.anchor, Anchor::CenterLeft);
        assert_eq!(spec.text_color, Color::GREEN);
    }
}
