//! Debounced value primitive
//!
//! One small timer-backed holder shared by the hover panel, scrollbar
//! visibility, the install banner and the search scroll-to-top. egui has no
//! timers, so deadlines are checked in `poll()` once per frame and the caller
//! asks for a repaint at `deadline()`.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq)]
enum Pending<T> {
    Clear,
    Set(T),
}

/// A value that can be set now, set later, or cleared after an idle window
#[derive(Debug, Clone)]
pub struct Debounced<T> {
    value: Option<T>,
    pending: Option<(Instant, Pending<T>)>,
    window: Duration,
}

impl<T> Debounced<T> {
    pub fn new(window: Duration) -> Self {
        Debounced {
            value: None,
            pending: None,
            window,
        }
    }

    /// Set immediately, cancelling any pending clear or set
    pub fn set(&mut self, value: T) {
        self.pending = None;
        self.value = Some(value);
    }

    /// Set immediately and (re)start the idle timer that clears it
    pub fn set_then_clear(&mut self, value: T, now: Instant) {
        self.value = Some(value);
        self.pending = Some((now + self.window, Pending::Clear));
    }

    /// Keep the current value but clear it once the window elapses
    pub fn clear_after(&mut self, now: Instant) {
        self.pending = Some((now + self.window, Pending::Clear));
    }

    /// Set the value once the window elapses
    pub fn set_after(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.window, Pending::Set(value)));
    }

    /// Drop any pending transition, keeping the current value
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Clear the value and every pending transition (teardown)
    pub fn reset(&mut self) {
        self.pending = None;
        self.value = None;
    }

    /// Fire the pending transition if its deadline has passed.
    ///
    /// Returns true when the observable value changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending.take() {
            Some((deadline, action)) if deadline <= now => {
                match action {
                    Pending::Clear => {
                        let changed = self.value.is_some();
                        self.value = None;
                        changed
                    }
                    Pending::Set(value) => {
                        self.value = Some(value);
                        true
                    }
                }
            }
            other => {
                self.pending = other;
                false
            }
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// Remove and return the current value
    pub fn take(&mut self) -> Option<T> {
        self.value.take()
    }

    /// When the next transition is due, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
