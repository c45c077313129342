//! Configuration module for the launcher.
//!
//! # Module Structure
//!
//! - `loader`: Reads and writes settings files, validates paths
//!
//! # Settings Management
//!
//! The `SettingsManager` provides access to `LauncherSettings`:
//! - Persists state to `config/settings.json`
//! - Applies environment overrides after the file is read
//! - Falls back to defaults when the file is missing or unreadable

pub mod loader;

use crate::error::ConfigError;
use std::path::Path;
use std::time::Duration;

/// Relative path of the persisted settings file
pub const SETTINGS_PATH: &str = "config/settings.json";

/// Environment variable overriding `catalog_endpoint`
pub const ENV_CATALOG_ENDPOINT: &str = "LAUNCHER_CATALOG_ENDPOINT";

/// Environment variable overriding `backend_base_url`
pub const ENV_BACKEND_URL: &str = "LAUNCHER_BACKEND_URL";

/// Launcher settings: endpoints, layout breakpoint and timing constants
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LauncherSettings {
    // Endpoints
    pub catalog_endpoint: String,
    pub backend_base_url: String,
    pub background_image_path: String,
    pub assistant_url: String,

    // Layout
    /// Window widths below this are treated as a narrow viewport
    pub mobile_breakpoint: f32,

    // Timing (milliseconds)
    pub scrollbar_hide_delay_ms: u64,
    pub hover_delay_ms: u64,
    pub install_banner_delay_ms: u64,
    pub scroll_to_top_delay_ms: u64,

    // Network
    pub request_timeout_secs: u64,

    // Debug Settings
    pub debug_logging: bool,
}

impl Default for LauncherSettings {
    fn default() -> Self {
        LauncherSettings {
            catalog_endpoint: "http://localhost:1337/api/data".to_string(),
            backend_base_url: "http://localhost:1337".to_string(),
            background_image_path: "/uploads/background.png".to_string(),
            assistant_url: "https://dhr.digikala.com/apps/zigo".to_string(),
            mobile_breakpoint: 768.0,
            scrollbar_hide_delay_ms: 1000,
            hover_delay_ms: 100,
            install_banner_delay_ms: 3000,
            scroll_to_top_delay_ms: 50,
            request_timeout_secs: 15,
            debug_logging: false,
        }
    }
}

impl LauncherSettings {
    pub fn scrollbar_hide_delay(&self) -> Duration {
        Duration::from_millis(self.scrollbar_hide_delay_ms)
    }

    pub fn hover_delay(&self) -> Duration {
        Duration::from_millis(self.hover_delay_ms)
    }

    pub fn install_banner_delay(&self) -> Duration {
        Duration::from_millis(self.install_banner_delay_ms)
    }

    pub fn scroll_to_top_delay(&self) -> Duration {
        Duration::from_millis(self.scroll_to_top_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Full URL of the background image served by the backend
    pub fn background_image_url(&self) -> String {
        crate::catalog::resolve_url(&self.backend_base_url, &self.background_image_path)
    }

    /// Whether a window of the given width counts as a narrow viewport
    pub fn is_narrow(&self, width: f32) -> bool {
        width < self.mobile_breakpoint
    }

    /// Apply overrides from the given lookup (normally `std::env::var`)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENV_CATALOG_ENDPOINT).filter(|v| !v.trim().is_empty()) {
            log::info!("[Config] catalog_endpoint overridden by {}", ENV_CATALOG_ENDPOINT);
            self.catalog_endpoint = endpoint;
        }
        if let Some(base) = lookup(ENV_BACKEND_URL).filter(|v| !v.trim().is_empty()) {
            log::info!("[Config] backend_base_url overridden by {}", ENV_BACKEND_URL);
            self.backend_base_url = base;
        }
        self.normalize();
    }

    /// Canonical form shared by file and environment values
    ///
    /// `backend_base_url` loses any trailing `/` so root-relative paths join
    /// with exactly one separator.
    pub fn normalize(&mut self) {
        self.backend_base_url = self.backend_base_url.trim().trim_end_matches('/').to_string();
        self.catalog_endpoint = self.catalog_endpoint.trim().to_string();
    }

    /// Validate settings that would otherwise fail at runtime
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.catalog_endpoint.trim();
        if endpoint.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "catalog_endpoint cannot be empty".to_string(),
            ));
        }
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ConfigError::ValidationFailed(format!(
                "catalog_endpoint must be an http(s) URL, got '{}'",
                endpoint
            )));
        }
        if self.mobile_breakpoint <= 0.0 {
            return Err(ConfigError::ValidationFailed(
                "mobile_breakpoint must be positive".to_string(),
            ));
        }
        if self.hover_delay_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "hover_delay_ms must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Settings persistence for `LauncherSettings`
pub struct SettingsManager;

impl SettingsManager {
    /// Load settings from config/settings.json, then apply environment overrides
    ///
    /// ERROR HANDLING: If deserialization fails, logs a warning and returns defaults
    /// instead of failing startup.
    pub fn load() -> Result<LauncherSettings, ConfigError> {
        let mut settings = Self::load_from(Path::new(SETTINGS_PATH))?;
        settings.apply_overrides(|key| std::env::var(key).ok());
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from an explicit path without environment overrides
    pub fn load_from(path: &Path) -> Result<LauncherSettings, ConfigError> {
        match loader::load_settings_from_file(path) {
            Ok(mut settings) => {
                settings.normalize();
                Ok(settings)
            }
            Err(ConfigError::FileNotFound(_)) => Ok(LauncherSettings::default()),
            Err(ConfigError::InvalidJson(e)) => {
                log::warn!(
                    "[Config] Failed to parse {}, falling back to defaults: {}",
                    path.display(),
                    e
                );
                Ok(LauncherSettings::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Save settings to config/settings.json
    pub fn save(settings: &LauncherSettings) -> Result<(), ConfigError> {
        loader::save_settings_to_file(settings, Path::new(SETTINGS_PATH))
    }
}
