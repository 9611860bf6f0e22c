use std::path::{Path, PathBuf};
use std::{env, fs};

/// Name of the config dotfile looked up in the CWD and home directory.
pub const CONFIG_FILE: &str = ".overlay-console.toml";

/// Load config file content
///
/// Searches in order:
/// 1. `.overlay-console.toml` in the current working directory
/// 2. `.overlay-console.toml` in the home directory
/// 3. `config.toml` in the platform config directory
///
/// Returns the path and content of the first readable file, None otherwise.
pub fn load_config_file() -> Option<(PathBuf, String)> {
    read_first(&candidate_paths())
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE)];

    if let Some(home) = get_home_config_path() {
        paths.push(home);
    }

    match crate::paths::app_config_path() {
        Ok(path) => paths.push(path),
        Err(e) => log::debug!("No platform config path: {}", e),
    }

    paths
}

/// Read the first of `paths` that exists and is readable.
fn read_first(paths: &[PathBuf]) -> Option<(PathBuf, String)> {
    paths.iter().find_map(|path| read(path))
}

fn read(path: &Path) -> Option<(PathBuf, String)> {
    match fs::read_to_string(path) {
        Ok(content) => {
            log::debug!("Loaded config from {}", path.display());
            Some((path.to_path_buf(), content))
        }
        Err(_) => None,
    }
}

/// Returns ~/.overlay-console.toml if HOME is set.
fn get_home_config_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_FILE))
}
