//! The console panel and its public lifecycle.

use crate::config::{PanelConfig, PanelMode};
use crate::error::ConsoleError;
use crate::layout::{split, GlyphWidthTable, LineFitter};
use crate::rows::{LogOutcome, RowSlotManager, RowSnapshot, RowStyle};
use crate::widget::{Background, ContainerSpec, Position, Size, WidgetService};

/// Name of the panel's backing container.
pub const WINDOW_NAME: &str = "consoleWindow";

/// An overlay panel that lays out log text into rows of widgets.
///
/// The panel owns its widget service. Hosts that draw several panels into one
/// tree pass an `Rc<RefCell<_>>` of the tree, which is itself a service.
///
/// Dropping a panel releases its widgets just like [`LogPanel::destroy`].
pub struct LogPanel<S: WidgetService> {
    service: S,
    config: PanelConfig,
    fitter: LineFitter<'static>,
    window: S::Handle,
    rows: RowSlotManager<S::Handle>,
    released: bool,
}

impl<S: WidgetService> LogPanel<S> {
    /// Create a top-level panel.
    pub fn new(service: S, config: PanelConfig) -> Result<Self, ConsoleError> {
        Self::build(service, None, config)
    }

    /// Create a panel nested under an existing container.
    pub fn with_parent(
        service: S,
        parent: S::Handle,
        config: PanelConfig,
    ) -> Result<Self, ConsoleError> {
        Self::build(service, Some(parent), config)
    }

    fn build(
        mut service: S,
        parent: Option<S::Handle>,
        config: PanelConfig,
    ) -> Result<Self, ConsoleError> {
        config.validate()?;

        let spec = ContainerSpec::new(WINDOW_NAME)
            .at(Position::new(config.x, config.y))
            .sized(Size::new(config.width, config.height))
            .anchored(config.anchor)
            .visible(config.visible)
            .padding(config.padding)
            .background(Background::solid(
                config.background_color,
                config.background_alpha,
            ));
        let window = service.create_container(&spec, parent.as_ref());

        let style = RowStyle {
            width: config.inner_width(),
            height: config.row_widget_height(),
            row_height: config.row_height(),
            text_size: config.text_size(),
            text_color: config.text_color,
        };
        let rows = RowSlotManager::new(window.clone(), config.max_rows(), style, config.out_of_range);
        let fitter = LineFitter::new(
            GlyphWidthTable::global(),
            config.inner_width(),
            config.scale,
            config.truncate,
        );

        log::debug!(
            "Created {:?} console panel: {} rows, {} units wide",
            config.mode,
            config.max_rows(),
            config.inner_width()
        );

        Ok(Self {
            service,
            config,
            fitter,
            window,
            rows,
            released: false,
        })
    }

    /// Lay out `text` into the panel.
    ///
    /// Static panels write into `row`, which is required. Scrolling panels
    /// append at the bottom and ignore `row`.
    pub fn log(&mut self, text: &str, row: Option<usize>) -> Result<LogOutcome, ConsoleError> {
        let parts = split(text);

        let outcome = match self.config.mode {
            PanelMode::Static => {
                let index = row.ok_or(ConsoleError::MissingRowIndex)?;
                self.rows
                    .place_static(&mut self.service, &self.fitter, index, &parts)?
            }
            PanelMode::Scrolling => {
                if let Some(index) = row {
                    log::trace!("Scrolling panel ignores row index {}", index);
                }
                self.rows
                    .append_wrapped(&mut self.service, &self.fitter, &parts)
            }
        };

        if outcome.truncated {
            log::trace!("Truncated console text: {:?}", text);
        }

        Ok(outcome)
    }

    /// Delete every row. The panel itself stays.
    pub fn clear(&mut self) {
        let cleared = self.rows.clear_all(&mut self.service);
        if cleared > 0 {
            log::debug!("Cleared {} console rows", cleared);
        }
    }

    pub fn show(&mut self) {
        self.service.set_visible(&self.window, true);
    }

    pub fn hide(&mut self) {
        self.service.set_visible(&self.window, false);
    }

    pub fn toggle(&mut self) {
        let visible = self.is_visible();
        self.service.set_visible(&self.window, !visible);
    }

    pub fn is_visible(&self) -> bool {
        self.service.is_visible(&self.window)
    }

    /// Clear the rows, then delete the panel's own container.
    pub fn destroy(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.clear();
        self.service.delete_widget(&self.window);
        self.released = true;
        log::debug!("Console panel destroyed");
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn max_rows(&self) -> usize {
        self.rows.max_rows()
    }

    pub fn inner_width(&self) -> f32 {
        self.config.inner_width()
    }

    pub fn occupied_rows(&self) -> usize {
        self.rows.occupied_count()
    }

    /// Occupied rows in visual order.
    pub fn rows_top_to_bottom(&self) -> Vec<RowSnapshot> {
        self.rows.snapshots()
    }

    pub fn rows(&self) -> &RowSlotManager<S::Handle> {
        &self.rows
    }

    /// Handle of the panel's backing container.
    pub fn window(&self) -> &S::Handle {
        &self.window
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut S {
        &mut self.service
    }
}

impl<S: WidgetService> Drop for LogPanel<S> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<S: WidgetService> std::fmt::Debug for LogPanel<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogPanel")
            .field("mode", &self.config.mode)
            .field("window", &self.window)
            .field("max_rows", &self.rows.max_rows())
            .field("occupied_rows", &self.rows.occupied_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutOfRangePolicy;
    use crate::error::ConfigError;
    use crate::widget::{Anchor, WidgetTree};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn static_panel() -> LogPanel<WidgetTree> {
        LogPanel::new(WidgetTree::new(), PanelConfig::default()).unwrap()
    }

    fn scrolling_panel() -> LogPanel<WidgetTree> {
        LogPanel::new(WidgetTree::new(), PanelConfig::scrolling()).unwrap()
    }

    #[test]
    fn test_new_creates_window() {
        let panel = static_panel();
        let tree = panel.service();

        assert_eq!(tree.len(), 1);
        let window = tree.get(*panel.window()).unwrap();
        assert_eq!(window.name(), WINDOW_NAME);
        assert_eq!(window.position(), Position::new(10.0, 10.0));
        assert_eq!(window.size(), Size::new(400.0, 300.0));
        assert_eq!(window.anchor(), Anchor::TopLeft);
        assert_eq!(window.padding(), 10.0);
        assert!(!panel.is_visible());
        assert_eq!(panel.max_rows(), 14);
        assert_eq!(panel.inner_width(), 380.0);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = PanelConfig {
            height: 5.0,
            ..PanelConfig::default()
        };
        let result = LogPanel::new(WidgetTree::new(), config);
        assert!(matches!(
            result,
            Err(ConsoleError::InvalidConfig(ConfigError::NoRows { .. }))
        ));
    }

    #[test]
    fn test_static_log_requires_index() {
        let mut panel = static_panel();
        assert_eq!(panel.log("hello", None), Err(ConsoleError::MissingRowIndex));
        assert_eq!(panel.occupied_rows(), 0);
    }

    #[test]
    fn test_static_log_out_of_range_policy() {
        let mut panel = static_panel();
        assert_eq!(panel.log("hello", Some(99)), Ok(LogOutcome::default()));

        let config = PanelConfig {
            out_of_range: OutOfRangePolicy::Reject,
            ..PanelConfig::default()
        };
        let mut strict = LogPanel::new(WidgetTree::new(), config).unwrap();
        assert_eq!(
            strict.log("hello", Some(14)),
            Err(ConsoleError::RowOutOfRange {
                index: 14,
                max_rows: 14
            })
        );
    }

    #[test]
    fn test_scrolling_ignores_index() {
        let mut panel = scrolling_panel();
        let outcome = panel.log("hello", Some(3)).unwrap();

        assert_eq!(outcome.rows_written, 1);
        let rows = panel.rows_top_to_bottom();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].index, 13);
        assert_eq!(rows[0].y, 260.0);
    }

    #[test]
    fn test_visibility_is_independent_of_rows() {
        let mut panel = scrolling_panel();
        panel.log("keep me", None).unwrap();

        panel.show();
        assert!(panel.is_visible());
        panel.hide();
        assert!(!panel.is_visible());
        panel.toggle();
        assert!(panel.is_visible());
        panel.toggle();
        assert!(!panel.is_visible());

        assert_eq!(panel.occupied_rows(), 1);
    }

    #[test]
    fn test_destroy_releases_everything() {
        let tree = Rc::new(RefCell::new(WidgetTree::new()));
        let mut panel = LogPanel::new(Rc::clone(&tree), PanelConfig::scrolling()).unwrap();
        for i in 0..5 {
            panel.log(&format!("line {}", i), None).unwrap();
        }
        assert!(tree.borrow().len() > 1);

        panel.clear();
        panel.clear();
        assert_eq!(panel.occupied_rows(), 0);
        assert_eq!(tree.borrow().len(), 1);

        panel.destroy();
        assert!(tree.borrow().is_empty());
    }

    #[test]
    fn test_drop_releases_widgets() {
        let tree = Rc::new(RefCell::new(WidgetTree::new()));
        {
            let mut panel = LogPanel::new(Rc::clone(&tree), PanelConfig::default()).unwrap();
            panel.log("status", Some(0)).unwrap();
        }
        assert!(tree.borrow().is_empty());
    }

    #[test]
    fn test_panels_share_a_tree() {
        let tree = Rc::new(RefCell::new(WidgetTree::new()));
        let mut console = LogPanel::new(Rc::clone(&tree), PanelConfig::scrolling()).unwrap();
        let mut status = LogPanel::new(Rc::clone(&tree), PanelConfig::default()).unwrap();

        console.log("a", None).unwrap();
        status.log("b", Some(2)).unwrap();

        assert_eq!(tree.borrow().roots().len(), 2);
        console.destroy();
        assert_eq!(tree.borrow().roots(), &[*status.window()]);
    }

    #[test]
    fn test_with_parent_nests_window() {
        let mut tree = WidgetTree::new();
        let hud = tree.create_container(&ContainerSpec::new("hud"), None);
        let panel = LogPanel::with_parent(tree, hud, PanelConfig::default()).unwrap();

        assert_eq!(panel.service().children(hud), &[*panel.window()]);
    }
}
