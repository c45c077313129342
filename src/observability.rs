//! Error reporting for caught failures.
//!
//! Reports go through the `log` facade on the `observability` target, which
//! the [`crate::LogCollector`] also persists to a dedicated errors file.

use crate::log_collector::REPORT_TARGET;
use chrono::Local;
use std::fmt;

/// Where a reported failure was caught
pub const SOURCE_RENDER_BOUNDARY: &str = "render_boundary";
pub const SOURCE_BACKGROUND_TASK: &str = "background_task";

/// A single reported failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub source: String,
    pub message: String,
    pub detail: Option<String>,
    pub timestamp: String,
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.source, self.message)?;
        if let Some(detail) = &self.detail {
            write!(f, " ({})", detail)?;
        }
        Ok(())
    }
}

/// Report a caught failure, tagged with where it was caught
pub fn report_error(error: &dyn fmt::Display, source: &str, detail: Option<&str>) -> ErrorReport {
    let report = ErrorReport {
        source: source.to_string(),
        message: error.to_string(),
        detail: detail.map(str::to_string),
        timestamp: Local::now().to_rfc3339(),
    };
    log::error!(target: REPORT_TARGET, "{}", report);
    report
}

/// Best-effort text of a panic payload
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
