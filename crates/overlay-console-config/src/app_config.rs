//! Host configuration
//!
//! Loaded from `.overlay-console.toml`. Every section and field is optional.

use anyhow::{Context, Result};
use log::LevelFilter;
use overlay_console::{Anchor, PanelConfig, PanelMode};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Host configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// The scrolling console panel
    #[serde(default = "default_panel")]
    pub panel: PanelConfig,

    /// The static status panel
    #[serde(default = "default_status")]
    pub status: PanelConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[logging]` section
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Log level used when `RUST_LOG` is not set
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_panel() -> PanelConfig {
    PanelConfig {
        width: 600.0,
        visible: true,
        ..PanelConfig::scrolling()
    }
}

fn default_status() -> PanelConfig {
    PanelConfig {
        mode: PanelMode::Static,
        anchor: Anchor::TopRight,
        width: 300.0,
        height: 110.0,
        text_color: overlay_console::Color::YELLOW,
        visible: true,
        ..PanelConfig::default()
    }
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl LoggingConfig {
    /// The configured level, or `Info` if it does not parse.
    pub fn level_filter(&self) -> LevelFilter {
        self.level.parse().unwrap_or_else(|_| {
            log::warn!("Unknown log level {:?}, using info", self.level);
            LevelFilter::Info
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            panel: default_panel(),
            status: default_status(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load config from the first config file found, or use defaults
    pub fn load() -> Self {
        if let Some((path, content)) = crate::load_config_file() {
            match Self::parse(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from {}", path.display());
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to load config file {}: {:#}", path.display(), e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    /// Load config from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse and validate config file content.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.panel
            .validate()
            .context("Invalid [panel] section")?;
        self.status
            .validate()
            .context("Invalid [status] section")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.panel.mode, PanelMode::Scrolling);
        assert!(config.panel.visible);
        assert_eq!(config.status.mode, PanelMode::Static);
        assert_eq!(config.status.anchor, Anchor::TopRight);
        assert_eq!(config.status.max_rows(), 5);
        assert_eq!(config.logging.level_filter(), LevelFilter::Info);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            [panel]
            truncate = false
            height = 200
            text_color = "cyan"

            [logging]
            level = "trace"
        "#;
        let config = AppConfig::parse(toml).unwrap();
        assert!(!config.panel.truncate);
        assert_eq!(config.panel.height, 200.0);
        assert_eq!(config.panel.text_color, overlay_console::Color::CYAN);
        assert_eq!(config.logging.level_filter(), LevelFilter::Trace);
    }

    #[test]
    fn test_config_deserialize_partial() {
        let toml = r#"
            [status]
            scale = 2.0
            height = 220
        "#;
        let config = AppConfig::parse(toml).unwrap();
        assert_eq!(config.status.scale, 2.0);
        assert_eq!(config.status.max_rows(), 5);
        // Missing fields inside a section fall back to PanelConfig defaults
        assert_eq!(config.status.anchor, Anchor::TopLeft);
        // Missing sections fall back to host defaults
        assert_eq!(config.panel, default_panel());
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_invalid_panel_is_rejected() {
        let toml = r#"
            [panel]
            anchor = "center"
        "#;
        let err = AppConfig::parse(toml).unwrap_err();
        assert!(format!("{:#}", err).contains("[panel]"));
    }

    #[test]
    fn test_malformed_toml_is_rejected() {
        assert!(AppConfig::parse("[panel\nmode = ").is_err());
    }

    #[test]
    fn test_unknown_level_falls_back() {
        let logging = LoggingConfig {
            level: "loud".to_string(),
        };
        assert_eq!(logging.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("console.toml");
        std::fs::write(&path, "[panel]\nwidth = 500\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.panel.width, 500.0);

        assert!(AppConfig::load_from(&dir.path().join("missing.toml")).is_err());
    }
}
