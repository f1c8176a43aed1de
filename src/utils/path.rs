use std::path::{Path, PathBuf};

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "GOBARBER_CONFIG_DIR";

/// Get the home directory, with fallback to "/"
pub fn get_home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"))
}

/// Config directory: `$GOBARBER_CONFIG_DIR`, else `~/.config/gobarber` regardless of OS
pub fn get_config_dir() -> PathBuf {
    match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => get_home_dir().join(".config").join("gobarber"),
    }
}

pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.toml")
}

/// Log directory (`~/.cache/gobarber`)
pub fn get_log_dir() -> PathBuf {
    get_home_dir().join(".cache").join("gobarber")
}

/// Expand a path string, handling ~
///
/// Relative paths are left relative to the working directory.
pub fn expand_path(path_str: &str) -> PathBuf {
    let path_str = path_str.trim();
    if let Some(rest) = path_str.strip_prefix("~/") {
        get_home_dir().join(rest)
    } else if path_str == "~" {
        get_home_dir()
    } else {
        PathBuf::from(path_str)
    }
}

/// Format a path for display, showing ~ for home
pub fn format_path_for_display(path: &Path) -> String {
    let home_dir = get_home_dir();

    if let Ok(relative) = path.strip_prefix(&home_dir) {
        if relative.as_os_str().is_empty() {
            "~".to_string()
        } else {
            format!("~/{}", relative.to_string_lossy())
        }
    } else {
        path.to_string_lossy().to_string()
    }
}
