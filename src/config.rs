use crate::keymap::Keymap;
use crate::styles::ThemeType;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding `api_url`.
pub const API_URL_ENV: &str = "GOBARBER_API_URL";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the booking API
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// UI theme: dark, light or nocolor
    #[serde(default)]
    pub theme: ThemeType,
    /// Email prefilled on the sign-in screen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_email: Option<String>,
    /// Keybinding preset and overrides
    #[serde(default)]
    pub keymap: Keymap,
}

fn default_api_url() -> String {
    "http://localhost:3333".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
            theme: ThemeType::default(),
            last_email: None,
            keymap: Keymap::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, writing the defaults on first run.
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            let mut config: Config =
                toml::from_str(&content).with_context(|| "Failed to parse config file")?;

            if config.api_url.trim().is_empty() {
                config.api_url = default_api_url();
            }
            if config.request_timeout_secs == 0 {
                config.request_timeout_secs = default_request_timeout_secs();
            }

            Ok(config)
        } else {
            let config = Self::default();
            config.save(config_path)?;
            Ok(config)
        }
    }

    /// Save configuration to file with secure permissions
    pub fn save(&self, config_path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        // 600: owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(config_path)
                .with_context(|| format!("Failed to get file metadata: {:?}", config_path))?
                .permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(config_path, perms)
                .with_context(|| format!("Failed to set file permissions: {:?}", config_path))?;
        }

        Ok(())
    }

    /// API URL after applying `GOBARBER_API_URL`.
    pub fn effective_api_url(&self) -> String {
        self.api_url_with_override(std::env::var(API_URL_ENV).ok().as_deref())
    }

    pub fn api_url_with_override(&self, env_value: Option<&str>) -> String {
        match env_value.map(str::trim) {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => self.api_url.clone(),
        }
    }

    /// Theme after applying `NO_COLOR`.
    pub fn effective_theme(&self) -> ThemeType {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        self.theme_with_no_color(no_color)
    }

    pub fn theme_with_no_color(&self, no_color: bool) -> ThemeType {
        if no_color {
            ThemeType::NoColor
        } else {
            self.theme
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
