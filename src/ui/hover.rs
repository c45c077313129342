//! Hover target tracking with a debounced clear
//!
//! Entering a tile cancels any pending clear and switches the target at once;
//! leaving starts the clear timer. Moving between adjacent tiles (or from a
//! tile onto the assistant panel) therefore never shows an empty panel.

use super::debounce::Debounced;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct HoverTracker<T> {
    target: Debounced<T>,
}

impl<T: Clone + PartialEq> HoverTracker<T> {
    pub fn new(delay: Duration) -> Self {
        HoverTracker {
            target: Debounced::new(delay),
        }
    }

    /// Pointer entered a tile
    pub fn enter(&mut self, target: T) {
        self.target.set(target);
    }

    /// Pointer left a tile
    pub fn leave(&mut self, now: Instant) {
        if self.target.is_set() {
            self.target.clear_after(now);
        }
    }

    /// Pointer entered the hover-dependent panel: keep the current target
    pub fn hold(&mut self) {
        self.target.cancel();
    }

    pub fn current(&self) -> Option<&T> {
        self.target.get()
    }

    pub fn is_hovering(&self, target: &T) -> bool {
        self.target.get() == Some(target)
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        self.target.poll(now)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.target.deadline()
    }

    pub fn reset(&mut self) {
        self.target.reset();
    }
}
