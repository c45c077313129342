//! App Launcher
//!
//! A desktop launcher that loads a remote catalog of applications, lets the
//! user search and filter it, and adapts its colour scheme to the brightness
//! of the background image.
//!
//! The system is organized into functional modules:
//! - **error**: Unified error type hierarchy
//! - **models**: Catalog data structures and wire types
//! - **config**: Settings persistence, overrides and validation
//! - **catalog**: Catalog loading, normalization and the filter/group engine
//! - **theme**: Brightness sampling and adaptive palettes
//! - **ui**: Interaction primitives, controller and egui front end
//! - **log_collector** / **observability**: Logging pipeline and error reports

// Core foundational modules
pub mod error;
pub mod models;

pub mod catalog;
pub mod config;
pub mod theme;

// egui front end and background controller
pub mod ui;

// Decoupled logging system
pub mod log_collector;
pub mod observability;

// Re-export the log crate for macro usage
pub use log;

pub use log_collector::{LogCollector, LogLine};

// ============================================================================
// PUBLIC RE-EXPORTS FOR CONVENIENCE
// ============================================================================

pub use error::{AppError, CatalogLoadError, ClassificationError, ConfigError};

pub use models::{AppEntry, Catalog, Category, Icon, InlineIcon, LoadStatus};

pub use catalog::{visible_groups, CatalogSource, GroupedApps, HttpCatalogSource};

pub use config::{LauncherSettings, SettingsManager};

pub use theme::{AdaptiveTheme, Classification, ThemeTokens};

pub use ui::{LauncherController, LauncherEvent, LauncherUI};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constant() {
        assert_eq!(VERSION, "0.1.0");
    }

    #[test]
    fn test_error_reexport() {
        let err: AppError = CatalogLoadError::Status(404).into();
        assert!(err.user_message().contains("404"));
    }

    #[test]
    fn test_models_reexport() {
        let app = AppEntry::new("Alpha", "Tools");
        assert!(app.icon.is_none());
        assert_eq!(LoadStatus::default(), LoadStatus::Idle);
    }
}
