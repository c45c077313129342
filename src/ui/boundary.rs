//! Render boundary: catches a panicking frame, reports it once and latches.
//!
//! After a crash the guarded frame is never run again until `reset`; the
//! caller shows its fallback page instead.

use crate::error::AppError;
use crate::observability::{panic_message, report_error, ErrorReport, SOURCE_RENDER_BOUNDARY};
use std::panic::{catch_unwind, AssertUnwindSafe};

#[derive(Debug, Default)]
pub struct RenderBoundary {
    crash: Option<ErrorReport>,
    reports: usize,
}

impl RenderBoundary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one frame; false when the boundary is (or just became) crashed
    pub fn run(&mut self, frame: impl FnOnce()) -> bool {
        if self.crash.is_some() {
            return false;
        }

        match catch_unwind(AssertUnwindSafe(frame)) {
            Ok(()) => true,
            Err(payload) => {
                let error = AppError::Render(panic_message(payload.as_ref()));
                self.crash = Some(report_error(&error, SOURCE_RENDER_BOUNDARY, Some("LauncherUI::update")));
                self.reports += 1;
                false
            }
        }
    }

    pub fn crash(&self) -> Option<&ErrorReport> {
        self.crash.as_ref()
    }

    pub fn is_crashed(&self) -> bool {
        self.crash.is_some()
    }

    /// Failures reported since construction
    pub fn report_count(&self) -> usize {
        self.reports
    }

    /// Allow frames to run again after a reload
    pub fn reset(&mut self) {
        self.crash = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_healthy_frame_runs() {
        let mut boundary = RenderBoundary::new();
        let ran = Cell::new(0);
        assert!(boundary.run(|| ran.set(ran.get() + 1)));
        assert!(boundary.run(|| ran.set(ran.get() + 1)));
        assert_eq!(ran.get(), 2);
        assert!(!boundary.is_crashed());
        assert_eq!(boundary.report_count(), 0);
    }

    #[test]
    fn test_panic_reported_once_and_latched() {
        let mut boundary = RenderBoundary::new();
        let calls = Cell::new(0);

        assert!(!boundary.run(|| {
            calls.set(calls.get() + 1);
            panic!("texture atlas exhausted");
        }));
        assert_eq!(calls.get(), 1);
        assert_eq!(boundary.report_count(), 1);
        let first = boundary.crash().cloned().unwrap();
        assert_eq!(first.source, SOURCE_RENDER_BOUNDARY);
        assert!(first.message.contains("texture atlas exhausted"));

        // Later frames keep the fallback and never touch the failing path
        for _ in 0..3 {
            assert!(!boundary.run(|| calls.set(calls.get() + 1)));
        }
        assert_eq!(calls.get(), 1);
        assert_eq!(boundary.report_count(), 1);
        assert_eq!(boundary.crash(), Some(&first));
    }

    #[test]
    fn test_reset_allows_rendering_again() {
        let mut boundary = RenderBoundary::new();
        boundary.run(|| panic!("boom"));
        assert!(boundary.is_crashed());

        boundary.reset();
        assert!(!boundary.is_crashed());
        let ran = Cell::new(false);
        assert!(boundary.run(|| ran.set(true)));
        assert!(ran.get());
        assert_eq!(boundary.report_count(), 1);
    }
}
