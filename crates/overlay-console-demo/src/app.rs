//! Demo host state: one widget tree, a scrolling console and a status panel.

use crate::log_reader::FileLogReader;
use anyhow::{Context, Result};
use overlay_console::{LogPanel, PanelConfig, PanelMode, WidgetTree};
use overlay_console_config::AppConfig;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use std::cell::{Ref, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

/// The widget tree both panels draw into and the renderer reads.
pub type SharedTree = Rc<RefCell<WidgetTree>>;

/// Crate name the console library logs under.
const LIBRARY_CRATE: &str = "overlay_console";

/// Target of a `<time> [LEVEL] <target>: <message>` record, if `line` is one.
fn record_target(line: &str) -> Option<&str> {
    let (_, rest) = line.split_once("] ")?;
    let (target, _) = rest.split_once(": ")?;
    if target.is_empty() || target.contains(char::is_whitespace) {
        return None;
    }
    Some(target)
}

/// Records logged by the console library itself. Forwarding them would feed
/// every row write back into the console.
fn is_library_record(line: &str) -> bool {
    record_target(line).is_some_and(|target| {
        target == LIBRARY_CRATE
            || target
                .strip_prefix(LIBRARY_CRATE)
                .is_some_and(|module| module.starts_with("::"))
    })
}

/// Counters shown on the status panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub ticks: u64,
    pub forwarded: u64,
    pub truncated: u64,
}

pub struct App {
    tree: SharedTree,
    console: LogPanel<SharedTree>,
    status: LogPanel<SharedTree>,
    reader: Option<FileLogReader>,
    stats: Stats,
    running: bool,
}

impl App {
    /// Build both panels. With `log_file`, the console tails that file.
    pub fn new(config: &AppConfig, log_file: Option<PathBuf>) -> Result<Self> {
        let tree: SharedTree = Rc::new(RefCell::new(WidgetTree::new()));

        let console = LogPanel::new(Rc::clone(&tree), config.panel.clone())
            .context("Failed to create console panel")?;

        let status_config = PanelConfig {
            mode: PanelMode::Static,
            ..config.status.clone()
        };
        let status = LogPanel::new(Rc::clone(&tree), status_config)
            .context("Failed to create status panel")?;

        let reader = log_file.map(|path| FileLogReader::new(path, console.max_rows()));

        let mut app = Self {
            tree,
            console,
            status,
            reader,
            stats: Stats::default(),
            running: true,
        };
        app.refresh_status();
        Ok(app)
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn tree(&self) -> Ref<'_, WidgetTree> {
        self.tree.borrow()
    }

    pub fn console(&self) -> &LogPanel<SharedTree> {
        &self.console
    }

    pub fn status(&self) -> &LogPanel<SharedTree> {
        &self.status
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('`') => {
                self.console.toggle();
                log::debug!("Console visible: {}", self.console.is_visible());
            }
            KeyCode::Char('c') => {
                self.console.clear();
                log::debug!("Console cleared");
            }
            KeyCode::Char('s') => {
                self.status.toggle();
                log::debug!("Status visible: {}", self.status.is_visible());
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                log::info!("Quit requested");
                self.running = false;
            }
            _ => {}
        }
    }

    /// Forward new log lines and refresh the status panel.
    pub fn tick(&mut self) {
        self.stats.ticks += 1;

        let lines = match self.reader.as_mut().map(FileLogReader::poll_new_lines) {
            Some(Ok(lines)) => lines,
            Some(Err(e)) => {
                // Stop tailing; reporting every tick would flood the file
                log::warn!("Stopped reading log file: {}", e);
                self.reader = None;
                Vec::new()
            }
            None => Vec::new(),
        };

        for line in lines.iter().filter(|line| !is_library_record(line)) {
            self.push_line(line);
        }

        self.refresh_status();
    }

    /// Log one line into the console panel.
    pub fn push_line(&mut self, line: &str) {
        match self.console.log(line, None) {
            Ok(outcome) => {
                self.stats.forwarded += 1;
                if outcome.truncated {
                    self.stats.truncated += 1;
                }
            }
            Err(e) => log::warn!("Console rejected a line: {}", e),
        }
    }

    fn status_lines(&self) -> [String; 5] {
        [
            format!("ticks {}", self.stats.ticks),
            format!("lines {}", self.stats.forwarded),
            format!(
                "rows {}/{}",
                self.console.occupied_rows(),
                self.console.max_rows()
            ),
            format!("truncated {}", self.stats.truncated),
            format!(
                "console {}",
                if self.console.is_visible() {
                    "shown"
                } else {
                    "hidden"
                }
            ),
        ]
    }

    fn refresh_status(&mut self) {
        let lines = self.status_lines();
        for (index, text) in lines.iter().enumerate().take(self.status.max_rows()) {
            if let Err(e) = self.status.log(text, Some(index)) {
                log::warn!("Status row {} not updated: {}", index, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ratatui::crossterm::event::KeyModifiers;
    use std::io::Write;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn status_texts(app: &App) -> Vec<String> {
        app.status()
            .rows_top_to_bottom()
            .into_iter()
            .map(|row| row.text)
            .collect()
    }

    #[test]
    fn test_new_builds_both_panels() {
        let app = App::new(&AppConfig::default(), None).unwrap();

        assert_eq!(app.tree().roots().len(), 2);
        assert!(app.console().is_visible());
        assert_eq!(
            status_texts(&app),
            vec!["ticks 0", "lines 0", "rows 0/14", "truncated 0", "console shown"]
        );
    }

    #[test]
    fn test_status_is_forced_static() {
        let mut config = AppConfig::default();
        config.status.mode = PanelMode::Scrolling;

        let app = App::new(&config, None).unwrap();
        assert_eq!(app.status().config().mode, PanelMode::Static);
    }

    #[test]
    fn test_keys() {
        let mut app = App::new(&AppConfig::default(), None).unwrap();
        app.push_line("hello");

        app.handle_key(key(KeyCode::Char('`')));
        assert!(!app.console().is_visible());
        assert_eq!(app.console().occupied_rows(), 1);

        app.handle_key(key(KeyCode::Char('c')));
        assert_eq!(app.console().occupied_rows(), 0);

        app.handle_key(key(KeyCode::Char('s')));
        assert!(!app.status().is_visible());

        assert!(app.running());
        app.handle_key(key(KeyCode::Esc));
        assert!(!app.running());
    }

    #[test]
    fn test_tick_forwards_new_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debug.log");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[INFO] overlay_console_demo: started").unwrap();
        writeln!(file, "[TRACE] overlay_console::rows: Row 13 written").unwrap();
        writeln!(file, "{}", "W".repeat(100)).unwrap();

        let mut app = App::new(&AppConfig::default(), Some(path)).unwrap();
        app.tick();

        assert_eq!(
            app.stats(),
            Stats {
                ticks: 1,
                forwarded: 2,
                truncated: 1,
            }
        );
        let texts: Vec<String> = app
            .console()
            .rows_top_to_bottom()
            .into_iter()
            .map(|row| row.text)
            .collect();
        assert_eq!(texts[0], "[INFO] overlay_console_demo: started");
        assert!(texts[1].ends_with("..."));
        assert_eq!(status_texts(&app)[1], "lines 2");
    }

    #[test]
    fn test_only_library_targets_are_held_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debug.log");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "09:00:00 [DEBUG] overlay_console: Console panel destroyed").unwrap();
        writeln!(file, "09:00:01 [INFO] my_app: see overlay_console::rows").unwrap();
        writeln!(file, "09:00:02 [INFO] overlay_console_demo: ready").unwrap();

        let mut app = App::new(&AppConfig::default(), Some(path)).unwrap();
        app.tick();

        let texts: Vec<String> = app
            .console()
            .rows_top_to_bottom()
            .into_iter()
            .map(|row| row.text)
            .collect();
        assert_eq!(app.stats().forwarded, 2);
        assert_eq!(texts.len(), 2);
        assert!(texts[0].contains("[INFO] my_app: see"));
        assert!(texts[1].contains("[INFO] overlay_console_demo: ready"));
    }

    #[test]
    fn test_record_target() {
        assert_eq!(
            record_target("2026-10-16T09:00:00+02:00 [TRACE] overlay_console::rows: Row 13 written"),
            Some("overlay_console::rows")
        );
        assert_eq!(record_target("[WARN] my_app: oops: again"), Some("my_app"));
        assert_eq!(record_target("no brackets: here"), None);
        assert_eq!(record_target("[INFO] not a target: text"), None);

        assert!(is_library_record("[TRACE] overlay_console::rows: Row 13 written"));
        assert!(is_library_record("[DEBUG] overlay_console: Console panel destroyed"));
        assert!(!is_library_record("[INFO] overlay_console_demo: started"));
        assert!(!is_library_record("[INFO] my_app: mentions overlay_console::rows"));
    }

    #[test]
    fn test_missing_log_file_stops_tailing() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(&AppConfig::default(), Some(dir.path().join("gone.log"))).unwrap();

        app.tick();
        app.tick();

        assert_eq!(app.stats().ticks, 2);
        assert_eq!(app.stats().forwarded, 0);
    }
}
