//! Centralized path management for the toolbelt CLI

use std::path::PathBuf;

/// The name of the application directory used across all platforms
const APP_DIR: &str = "toolbelt";

/// The name of the configuration file
const CONFIG_FILE: &str = "config.toml";

/// Environment variable that points the CLI at a specific configuration file
pub const CONFIG_PATH_ENV: &str = "TOOLBELT_CONFIG_PATH";

/// Returns the path to the configuration directory
///
/// On Unix-like systems `XDG_CONFIG_HOME` wins when set, otherwise the
/// platform config directory is used:
/// - `~/.config/toolbelt` on Linux
/// - `~/Library/Application Support/toolbelt` on macOS
/// - `%APPDATA%/toolbelt` on Windows
///
/// Falls back to `.toolbelt` in the current directory.
pub fn get_config_dir() -> PathBuf {
    #[cfg(not(target_os = "windows"))]
    if let Some(xdg_config) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg_config).join(APP_DIR);
    }

    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".toolbelt"))
}

/// Returns the path to the configuration file
///
/// [`CONFIG_PATH_ENV`] overrides the default location.
pub fn get_config_path() -> PathBuf {
    match std::env::var_os(CONFIG_PATH_ENV).filter(|v| !v.is_empty()) {
        Some(path) => PathBuf::from(path),
        None => get_config_dir().join(CONFIG_FILE),
    }
}
