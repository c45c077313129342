//! Unified error type hierarchy for the App Launcher
//!
//! Provides structured error handling with CatalogLoadError, ClassificationError,
//! ConfigError, and AppError.

use std::io;
use thiserror::Error;

/// Catalog fetch and payload errors.
///
/// Surfaced to the user as a full-page retry prompt; never retried automatically.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogLoadError {
    #[error("Catalog request failed: {0}")]
    Network(String),

    #[error("Catalog endpoint returned HTTP status {0}")]
    Status(u16),

    #[error("Invalid catalog payload: {0}")]
    InvalidPayload(String),
}

impl CatalogLoadError {
    /// HTTP status carried by the failure, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            CatalogLoadError::Status(code) => Some(*code),
            _ => None,
        }
    }
}

/// Background image classification failures.
///
/// These never leave the theme module: every variant resolves to the dark
/// classification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassificationError {
    #[error("No image source")]
    EmptySource,

    #[error("Image fetch failed: {0}")]
    Fetch(String),

    #[error("Image decode failed: {0}")]
    Decode(String),
}

/// Settings file parsing and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid JSON in config: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("IO error during config operations: {0}")]
    IoError(#[from] io::Error),
}

/// Global error type for user-facing failures.
///
/// Cloneable so it can travel through the UI event channel.
#[derive(Error, Debug, Clone)]
pub enum AppError {
    /// Catalog could not be loaded
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogLoadError),

    /// Desktop entry installation failed
    #[error("Install error: {0}")]
    Install(String),

    /// Unexpected failure while rendering a frame
    #[error("Render error: {0}")]
    Render(String),
}

impl AppError {
    /// Get a user-facing error message suitable for UI display
    pub fn user_message(&self) -> String {
        match self {
            AppError::Catalog(CatalogLoadError::Status(code)) => {
                format!("Could not load the app list (server answered {}).", code)
            }
            AppError::Catalog(_) => "Could not load the app list.".to_string(),
            AppError::Install(msg) => format!("Could not add the launcher to your menu: {}", msg),
            AppError::Render(_) => "Something went wrong while running the launcher.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogLoadError::Status(500);
        assert_eq!(err.to_string(), "Catalog endpoint returned HTTP status 500");
    }

    #[test]
    fn test_catalog_error_status() {
        assert_eq!(CatalogLoadError::Status(404).status(), Some(404));
        assert_eq!(CatalogLoadError::Network("refused".into()).status(), None);
        assert_eq!(
            CatalogLoadError::InvalidPayload("missing data".into()).status(),
            None
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::FileNotFound("config/settings.json".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration file not found: config/settings.json"
        );
    }

    #[test]
    fn test_user_message_includes_status() {
        let err = AppError::from(CatalogLoadError::Status(503));
        assert!(err.user_message().contains("503"));
    }
}
