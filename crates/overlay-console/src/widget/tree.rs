//! In-memory retained widget tree.
//!
//! `WidgetTree` is a complete [`WidgetService`] that keeps every widget in a
//! map keyed by [`WidgetId`]. Hosts without their own retained UI can render
//! it directly; tests use it to observe exactly what a panel created.

use super::geometry::{Anchor, Background, Position, Size};
use super::service::WidgetService;
use super::spec::{ContainerSpec, TextSpec};
use std::collections::HashMap;
use std::fmt;

/// Handle of a widget inside a [`WidgetTree`]. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a node in the tree is.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetKind {
    Container(ContainerSpec),
    Text(TextSpec),
}

/// A live widget.
#[derive(Debug, Clone)]
pub struct WidgetNode {
    pub id: WidgetId,
    pub parent: Option<WidgetId>,
    /// Children in creation order.
    pub children: Vec<WidgetId>,
    pub kind: WidgetKind,
}

impl WidgetNode {
    pub fn name(&self) -> &str {
        match &self.kind {
            WidgetKind::Container(spec) => &spec.name,
            WidgetKind::Text(spec) => &spec.name,
        }
    }

    pub fn position(&self) -> Position {
        match &self.kind {
            WidgetKind::Container(spec) => spec.position,
            WidgetKind::Text(spec) => spec.position,
        }
    }

    pub fn size(&self) -> Size {
        match &self.kind {
            WidgetKind::Container(spec) => spec.size,
            WidgetKind::Text(spec) => spec.size,
        }
    }

    pub fn anchor(&self) -> Anchor {
        match &self.kind {
            WidgetKind::Container(spec) => spec.anchor,
            WidgetKind::Text(spec) => spec.anchor,
        }
    }

    pub fn padding(&self) -> f32 {
        match &self.kind {
            WidgetKind::Container(spec) => spec.padding,
            WidgetKind::Text(spec) => spec.padding,
        }
    }

    pub fn background(&self) -> Background {
        match &self.kind {
            WidgetKind::Container(spec) => spec.background,
            WidgetKind::Text(spec) => spec.background,
        }
    }

    pub fn is_visible(&self) -> bool {
        match &self.kind {
            WidgetKind::Container(spec) => spec.visible,
            WidgetKind::Text(spec) => spec.visible,
        }
    }

    /// The label content for text widgets.
    pub fn message(&self) -> Option<&str> {
        match &self.kind {
            WidgetKind::Text(spec) => Some(&spec.message),
            WidgetKind::Container(_) => None,
        }
    }

    fn set_position(&mut self, position: Position) {
        match &mut self.kind {
            WidgetKind::Container(spec) => spec.position = position,
            WidgetKind::Text(spec) => spec.position = position,
        }
    }

    fn set_size(&mut self, size: Size) {
        match &mut self.kind {
            WidgetKind::Container(spec) => spec.size = size,
            WidgetKind::Text(spec) => spec.size = size,
        }
    }

    fn set_visible(&mut self, visible: bool) {
        match &mut self.kind {
            WidgetKind::Container(spec) => spec.visible = visible,
            WidgetKind::Text(spec) => spec.visible = visible,
        }
    }
}

/// Retained widget tree.
#[derive(Debug, Default)]
pub struct WidgetTree {
    nodes: HashMap<WidgetId, WidgetNode>,
    /// Top-level widgets in creation order.
    roots: Vec<WidgetId>,
    next_id: u64,
    created: usize,
    deleted: usize,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: WidgetId) -> Option<&WidgetNode> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of live widgets.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Widgets created over the tree's lifetime.
    pub fn created_count(&self) -> usize {
        self.created
    }

    /// Widgets deleted over the tree's lifetime, including cascaded children.
    pub fn deleted_count(&self) -> usize {
        self.deleted
    }

    pub fn roots(&self) -> &[WidgetId] {
        &self.roots
    }

    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.nodes
            .get(&id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Messages of the text widgets directly under `id`, in creation order.
    pub fn child_messages(&self, id: WidgetId) -> Vec<&str> {
        self.children(id)
            .iter()
            .filter_map(|child| self.nodes.get(child))
            .filter_map(|node| node.message())
            .collect()
    }

    fn insert(&mut self, kind: WidgetKind, parent: Option<&WidgetId>) -> WidgetId {
        let id = WidgetId(self.next_id);
        self.next_id += 1;
        self.created += 1;

        // A parent that is already gone makes the widget top-level.
        let parent = parent.copied().filter(|p| self.nodes.contains_key(p));
        match parent {
            Some(parent_id) => {
                if let Some(parent_node) = self.nodes.get_mut(&parent_id) {
                    parent_node.children.push(id);
                }
            }
            None => self.roots.push(id),
        }

        self.nodes.insert(
            id,
            WidgetNode {
                id,
                parent,
                children: Vec::new(),
                kind,
            },
        );
        id
    }

    fn remove_subtree(&mut self, id: WidgetId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                self.deleted += 1;
                stack.extend(node.children);
            }
        }
    }
}

impl WidgetService for WidgetTree {
    type Handle = WidgetId;

    fn create_container(&mut self, spec: &ContainerSpec, parent: Option<&WidgetId>) -> WidgetId {
        self.insert(WidgetKind::Container(spec.clone()), parent)
    }

    fn create_text(&mut self, spec: &TextSpec, parent: Option<&WidgetId>) -> WidgetId {
        self.insert(WidgetKind::Text(spec.clone()), parent)
    }

    fn delete_widget(&mut self, handle: &WidgetId) {
        let Some(parent) = self.nodes.get(handle).map(|node| node.parent) else {
            log::trace!("delete of unknown widget {}", handle);
            return;
        };

        match parent {
            Some(parent_id) => {
                if let Some(parent) = self.nodes.get_mut(&parent_id) {
                    parent.children.retain(|child| child != handle);
                }
            }
            None => self.roots.retain(|root| root != handle),
        }

        self.remove_subtree(*handle);
    }

    fn set_visible(&mut self, handle: &WidgetId, visible: bool) {
        if let Some(node) = self.nodes.get_mut(handle) {
            node.set_visible(visible);
        }
    }

    fn is_visible(&self, handle: &WidgetId) -> bool {
        self.nodes
            .get(handle)
            .map(|node| node.is_visible())
            .unwrap_or(false)
    }

    fn set_position(&mut self, handle: &WidgetId, position: Position) {
        if let Some(node) = self.nodes.get_mut(handle) {
            node.set_position(position);
        }
    }

    fn position(&self, handle: &WidgetId) -> Position {
        self.nodes
            .get(handle)
            .map(|node| node.position())
            .unwrap_or_default()
    }

    fn set_size(&mut self, handle: &WidgetId, size: Size) {
        if let Some(node) = self.nodes.get_mut(handle) {
            node.set_size(size);
        }
    }
}
