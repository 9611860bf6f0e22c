//! Trait for the host's retained-mode widget primitives.

use super::geometry::{Position, Size};
use super::spec::{ContainerSpec, TextSpec};
use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

/// The widget primitives a console panel is drawn with.
///
/// Implement this trait to put the console on top of whatever retained-mode
/// UI the host session provides. One service instance represents one
/// receiver's view: everything a panel creates through it is shown to that
/// receiver only.
///
/// Calls are treated as synchronous and infallible. A host whose primitives
/// can fail must turn failures into no-ops here; a diagnostic console must
/// never take the session down. Deleting a container deletes its children.
///
/// # Example
///
/// ```ignore
/// use overlay_console::{ContainerSpec, TextSpec, WidgetService, Position, Size};
///
/// struct GameUi {
///     player: PlayerId,
/// }
///
/// impl WidgetService for GameUi {
///     type Handle = UiWidgetRef;
///
///     fn create_container(&mut self, spec: &ContainerSpec, parent: Option<&UiWidgetRef>) -> UiWidgetRef {
///         engine::add_container(self.player, spec, parent)
///     }
///
///     // ... other methods
/// }
/// ```
pub trait WidgetService {
    /// Handle retained by the console for every widget it creates.
    type Handle: Clone + PartialEq + Debug;

    /// Create a container, optionally nested under `parent`.
    fn create_container(
        &mut self,
        spec: &ContainerSpec,
        parent: Option<&Self::Handle>,
    ) -> Self::Handle;

    /// Create a text label, optionally nested under `parent`.
    fn create_text(&mut self, spec: &TextSpec, parent: Option<&Self::Handle>) -> Self::Handle;

    /// Delete a widget and everything nested under it.
    fn delete_widget(&mut self, handle: &Self::Handle);

    fn set_visible(&mut self, handle: &Self::Handle, visible: bool);

    fn is_visible(&self, handle: &Self::Handle) -> bool;

    fn set_position(&mut self, handle: &Self::Handle, position: Position);

    fn position(&self, handle: &Self::Handle) -> Position;

    fn set_size(&mut self, handle: &Self::Handle, size: Size);
}

/// A shared service, so several panels and a renderer can use one host tree.
impl<T: WidgetService> WidgetService for Rc<RefCell<T>> {
    type Handle = T::Handle;

    fn create_container(
        &mut self,
        spec: &ContainerSpec,
        parent: Option<&Self::Handle>,
    ) -> Self::Handle {
        self.borrow_mut().create_container(spec, parent)
    }

    fn create_text(&mut self, spec: &TextSpec, parent: Option<&Self::Handle>) -> Self::Handle {
        self.borrow_mut().create_text(spec, parent)
    }

    fn delete_widget(&mut self, handle: &Self::Handle) {
        self.borrow_mut().delete_widget(handle)
    }

    fn set_visible(&mut self, handle: &Self::Handle, visible: bool) {
        self.borrow_mut().set_visible(handle, visible)
    }

    fn is_visible(&self, handle: &Self::Handle) -> bool {
        self.borrow().is_visible(handle)
    }

    fn set_position(&mut self, handle: &Self::Handle, position: Position) {
        self.borrow_mut().set_position(handle, position)
    }

    fn position(&self, handle: &Self::Handle) -> Position {
        self.borrow().position(handle)
    }

    fn set_size(&mut self, handle: &Self::Handle, size: Size) {
        self.borrow_mut().set_size(handle, size)
    }
}
