//! Widget primitives the console is drawn with.

mod geometry;
mod service;
mod spec;
mod tree;

pub use geometry::{Anchor, Background, BgFill, Color, Position, Size};
pub use service::WidgetService;
pub use spec::{ContainerSpec, TextSpec};
pub use tree::{WidgetId, WidgetKind, WidgetNode, WidgetTree};
