//! Draws a `WidgetTree` into a ratatui buffer.
//!
//! Layout units map onto terminal cells at a fixed ratio. Offsets are measured
//! from the anchor point inwards, so a top-right widget at `x = 10` sits ten
//! units left of its parent's right edge.
//!
//! Terminal cells are monospace while the console measures proportional
//! glyphs, so runs of narrow characters may overlap the next part.

use overlay_console::{Anchor, Background, Color, WidgetId, WidgetKind, WidgetNode, WidgetTree};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color as TermColor;

/// Layout units per terminal column.
pub const UNITS_PER_COLUMN: f32 = 10.0;

/// Layout units per terminal row.
pub const UNITS_PER_ROW: f32 = 20.0;

/// A rectangle in layout units.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Bounds {
    fn of_area(area: Rect) -> Self {
        Self {
            x: area.x as f32 * UNITS_PER_COLUMN,
            y: area.y as f32 * UNITS_PER_ROW,
            width: area.width as f32 * UNITS_PER_COLUMN,
            height: area.height as f32 * UNITS_PER_ROW,
        }
    }

    fn inset(self, padding: f32) -> Self {
        Self {
            x: self.x + padding,
            y: self.y + padding,
            width: (self.width - 2.0 * padding).max(0.0),
            height: (self.height - 2.0 * padding).max(0.0),
        }
    }

    /// Place `node` inside these bounds.
    fn place(self, node: &WidgetNode) -> Self {
        let size = node.size();
        let position = node.position();
        let anchor = node.anchor();

        Self {
            x: self.x
                + anchor.horizontal() * (self.width - size.width)
                + inward(anchor.horizontal()) * position.x,
            y: self.y
                + anchor.vertical() * (self.height - size.height)
                + inward(anchor.vertical()) * position.y,
            width: size.width,
            height: size.height,
        }
    }

    /// Cells covered by these bounds, clipped to `clip`.
    fn to_cells(self, clip: Rect) -> Rect {
        let left = (self.x / UNITS_PER_COLUMN).floor().max(0.0) as u16;
        let top = (self.y / UNITS_PER_ROW).floor().max(0.0) as u16;
        let right = ((self.x + self.width) / UNITS_PER_COLUMN).ceil().max(0.0) as u16;
        let bottom = ((self.y + self.height) / UNITS_PER_ROW).ceil().max(0.0) as u16;

        Rect::new(left, top, right.saturating_sub(left), bottom.saturating_sub(top))
            .intersection(clip)
    }
}

/// Offsets from a far edge point back into the parent.
fn inward(factor: f32) -> f32 {
    if factor >= 1.0 {
        -1.0
    } else {
        1.0
    }
}

/// Terminal color for `color` shown at `alpha` over a black screen.
pub fn term_color(color: Color, alpha: f32) -> TermColor {
    let alpha = alpha.clamp(0.0, 1.0);
    let (r, g, b) = color.to_rgb8();
    let blend = |c: u8| (c as f32 * alpha).round() as u8;
    TermColor::Rgb(blend(r), blend(g), blend(b))
}

/// Draw every visible widget of `tree` into `area`.
pub fn render_tree(tree: &WidgetTree, area: Rect, buf: &mut Buffer) {
    let screen = Bounds::of_area(area);
    for root in tree.roots() {
        render_node(tree, *root, screen, area, buf);
    }
}

fn render_node(tree: &WidgetTree, id: WidgetId, parent: Bounds, clip: Rect, buf: &mut Buffer) {
    let Some(node) = tree.get(id) else {
        return;
    };
    if !node.is_visible() {
        return;
    }

    let bounds = parent.place(node);
    let cells = bounds.to_cells(clip);

    fill_background(node.background(), cells, buf);

    if let WidgetKind::Text(spec) = &node.kind {
        let color = term_color(spec.text_color, spec.text_alpha);
        draw_text(&spec.message, spec.text_anchor, color, bounds, clip, buf);
    }

    let content = bounds.inset(node.padding());
    for child in tree.children(id) {
        render_node(tree, *child, content, cells, buf);
    }
}

fn fill_background(background: Background, cells: Rect, buf: &mut Buffer) {
    if !background.is_visible() {
        return;
    }

    let color = term_color(background.color, background.alpha);
    for y in cells.top()..cells.bottom() {
        for x in cells.left()..cells.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_bg(color);
            }
        }
    }
}

/// Single-line text on the row through the vertical center of `bounds`.
fn draw_text(
    message: &str,
    anchor: Anchor,
    color: TermColor,
    bounds: Bounds,
    clip: Rect,
    buf: &mut Buffer,
) {
    let row = ((bounds.y + bounds.height / 2.0) / UNITS_PER_ROW).floor();
    if row < clip.top() as f32 || row >= clip.bottom() as f32 {
        return;
    }

    let box_columns = bounds.width / UNITS_PER_COLUMN;
    let text_columns = message.chars().count() as f32;
    let slack = (box_columns - text_columns).max(0.0);
    let start = ((bounds.x / UNITS_PER_COLUMN) + anchor.horizontal() * slack).floor();

    for (i, c) in message.chars().enumerate() {
        let column = start + i as f32;
        if column < clip.left() as f32 || column >= clip.right() as f32 {
            continue;
        }
        if let Some(cell) = buf.cell_mut((column as u16, row as u16)) {
            cell.set_char(c).set_fg(color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overlay_console::{ContainerSpec, LogPanel, PanelConfig, Position, Size, WidgetService};
    use pretty_assertions::assert_eq;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.left()..buf.area.right())
            .map(|x| buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
            .collect()
    }

    #[test]
    fn test_panel_text_lands_on_cells() {
        let mut panel = LogPanel::new(
            WidgetTree::new(),
            PanelConfig {
                visible: true,
                ..PanelConfig::default()
            },
        )
        .unwrap();
        panel.log("AAAA", Some(0)).unwrap();
        panel.log("row two", Some(1)).unwrap();

        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        render_tree(panel.service(), area, &mut buf);

        // window at (10, 10) + padding 10: content starts at column 2;
        // row 0 is centered at y = 29, row 1 at y = 49
        assert_eq!(&row_text(&buf, 1)[2..6], "AAAA");
        assert!(row_text(&buf, 2)[2..].starts_with("row"));
    }

    #[test]
    fn test_hidden_panel_draws_nothing() {
        let mut panel = LogPanel::new(WidgetTree::new(), PanelConfig::default()).unwrap();
        panel.log("secret", Some(0)).unwrap();

        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        render_tree(panel.service(), area, &mut buf);

        assert_eq!(buf, Buffer::empty(area));
    }

    #[test]
    fn test_background_is_blended() {
        assert_eq!(term_color(Color::WHITE, 0.5), TermColor::Rgb(128, 128, 128));
        assert_eq!(term_color(Color::GREEN, 1.0), TermColor::Rgb(0, 255, 0));
    }

    #[test]
    fn test_right_anchor_measures_inwards() {
        let mut tree = WidgetTree::new();
        let spec = ContainerSpec::new("box")
            .at(Position::new(10.0, 0.0))
            .sized(Size::new(100.0, 40.0))
            .anchored(Anchor::TopRight);
        tree.create_container(&spec, None);

        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        render_tree(&tree, area, &mut buf);

        // 400 units wide: box spans 290..390 units, columns 29..39
        let black = TermColor::Rgb(0, 0, 0);
        assert_eq!(buf.cell((29, 0)).unwrap().bg, black);
        assert_eq!(buf.cell((38, 1)).unwrap().bg, black);
        assert_ne!(buf.cell((39, 0)).unwrap().bg, black);
        assert_ne!(buf.cell((28, 0)).unwrap().bg, black);
    }

    #[test]
    fn test_offscreen_widgets_are_clipped() {
        let mut tree = WidgetTree::new();
        let spec = ContainerSpec::new("far")
            .at(Position::new(5000.0, 5000.0))
            .sized(Size::new(100.0, 40.0))
            .anchored(Anchor::TopLeft);
        tree.create_container(&spec, None);

        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        render_tree(&tree, area, &mut buf);

        assert_eq!(buf, Buffer::empty(area));
    }
}
