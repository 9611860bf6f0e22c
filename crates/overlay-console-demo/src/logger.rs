//! File-based logging using simplelog
//!
//! Log file location depends on build type:
//! - Debug builds: current working directory (for development convenience)
//! - Release builds: cache directory (~/.cache/overlay-console/ on Linux)
//!
//! The console panel tails this file, so every record also shows up on screen.

use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, LevelFilter, LevelPadding, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

/// Get the log file path based on build type
fn log_file_path() -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let filename = format!("debug-{}.log", timestamp);

    if cfg!(debug_assertions) {
        PathBuf::from(filename)
    } else {
        overlay_console_config::paths::cache_dir()
            .map(|dir| dir.join(&filename))
            .unwrap_or_else(|_| PathBuf::from(filename))
    }
}

fn env_level() -> Option<LevelFilter> {
    std::env::var("RUST_LOG").ok()?.parse().ok()
}

/// Initialize file-based logging
///
/// Starts at the `RUST_LOG` level, or at `Trace` until [`apply_level`] narrows
/// it. Returns the path to the log file for the console to tail.
pub fn init() -> Result<PathBuf> {
    let log_file = log_file_path();
    let level = env_level().unwrap_or(LevelFilter::Trace);

    // `<time> [LEVEL] <target>: <message>` on every record so the host can
    // tell library output apart
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_time_offset_to_local()
        .unwrap_or_else(|c| c)
        .set_level_padding(LevelPadding::Off)
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Error)
        .set_location_level(LevelFilter::Off)
        .build();

    let file = File::create(&log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;

    WriteLogger::init(level, config, file).context("Failed to initialize logger")?;

    Ok(log_file)
}

/// Use the configured level unless `RUST_LOG` overrides it.
pub fn apply_level(configured: LevelFilter) {
    if env_level().is_none() {
        log::set_max_level(configured);
    }
}
