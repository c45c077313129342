//! UI Module - egui front end and LauncherController
//!
//! Interaction primitives (`debounce`, `hover`, `scroll`, `install`) are
//! plain state machines driven by explicit `Instant`s; `app` wires them into
//! the egui frame loop.

pub mod app;
pub mod boundary;
pub mod controller;
pub mod debounce;
pub mod hover;
pub mod install;
pub mod scroll;
pub mod threading;
pub mod widgets;

use crate::error::AppError;
use std::path::PathBuf;

pub use app::LauncherUI;
pub use boundary::RenderBoundary;
pub use controller::{CatalogSnapshot, LauncherController, LauncherEvent};
pub use debounce::Debounced;
pub use hover::HoverTracker;
pub use install::{InstallBanner, InstallCapability, XdgDesktopEntry};
pub use scroll::{thumb_geometry, ScrollMetrics, ScrollTracker, ThumbGeometry};

/// Trait for adding the launcher to the desktop's application menu
pub trait DesktopIntegration: Send + Sync {
    fn capability(&self) -> InstallCapability;
    fn install(&self) -> Result<PathBuf, AppError>;
}
