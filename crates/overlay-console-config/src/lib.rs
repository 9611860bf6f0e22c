//! Configuration for overlay-console hosts
//!
//! This crate provides:
//! - Platform config and cache directories
//! - Config file discovery (CWD, home, config dir)
//! - Host configuration (AppConfig) with one section per panel

pub mod app_config;
pub mod config_file;
pub mod paths;

pub use app_config::{AppConfig, LoggingConfig};
pub use config_file::{load_config_file, CONFIG_FILE};
