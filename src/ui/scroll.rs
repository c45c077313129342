//! Scroll tracking for the custom overlay scrollbar
//!
//! The native scrollbar is hidden; this tracker records the scroll area's
//! metrics on every scroll, shows the thumb, and hides it again after an
//! idle window.

use super::debounce::Debounced;
use std::time::{Duration, Instant};

/// Smallest thumb height drawn, in points
pub const MIN_THUMB_HEIGHT: f32 = 20.0;

/// Snapshot of the monitored container
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub is_scrollbar_visible: bool,
    pub scroll_position: f32,
    pub scroll_height: f32,
    pub client_height: f32,
}

/// Thumb size and offset inside the track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbGeometry {
    pub height: f32,
    pub top: f32,
}

/// Compute the thumb for the given scroll state.
///
/// Without overflow (`scroll_height <= client_height`) the thumb sits at the
/// top with the minimum height.
pub fn thumb_geometry(scroll_position: f32, scroll_height: f32, client_height: f32) -> ThumbGeometry {
    let max_scroll = scroll_height - client_height;
    if client_height <= 0.0 || max_scroll <= 0.0 {
        return ThumbGeometry {
            height: MIN_THUMB_HEIGHT,
            top: 0.0,
        };
    }

    let height = (client_height / scroll_height * client_height).max(MIN_THUMB_HEIGHT);
    let track = (client_height - height).max(0.0);
    let ratio = (scroll_position / max_scroll).clamp(0.0, 1.0);

    ThumbGeometry {
        height,
        top: ratio * track,
    }
}

/// Scroll metrics plus debounced visibility
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    metrics: ScrollMetrics,
    visible: Debounced<()>,
}

impl ScrollTracker {
    pub fn new(hide_delay: Duration) -> Self {
        ScrollTracker {
            metrics: ScrollMetrics::default(),
            visible: Debounced::new(hide_delay),
        }
    }

    /// Record sizes without a scroll event (initial layout, resize)
    pub fn observe(&mut self, scroll_height: f32, client_height: f32) {
        self.metrics.scroll_height = scroll_height;
        self.metrics.client_height = client_height;
    }

    /// Record a scroll event: capture metrics, show, restart the hide timer
    pub fn on_scroll(&mut self, scroll_top: f32, scroll_height: f32, client_height: f32, now: Instant) {
        self.metrics.scroll_position = scroll_top;
        self.observe(scroll_height, client_height);
        self.visible.set_then_clear((), now);
    }

    /// Feed the latest offset; only a change counts as a scroll event
    pub fn track(&mut self, scroll_top: f32, scroll_height: f32, client_height: f32, now: Instant) {
        if (scroll_top - self.metrics.scroll_position).abs() > f32::EPSILON {
            self.on_scroll(scroll_top, scroll_height, client_height, now);
        } else {
            self.observe(scroll_height, client_height);
        }
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        self.visible.poll(now)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.visible.deadline()
    }

    pub fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            is_scrollbar_visible: self.visible.is_set(),
            ..self.metrics
        }
    }

    pub fn thumb(&self) -> ThumbGeometry {
        thumb_geometry(
            self.metrics.scroll_position,
            self.metrics.scroll_height,
            self.metrics.client_height,
        )
    }

    pub fn reset(&mut self) {
        self.visible.reset();
        self.metrics = ScrollMetrics::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_overflow_uses_floor_and_zero_offset() {
        for position in [0.0, 10.0, 500.0] {
            let thumb = thumb_geometry(position, 100.0, 100.0);
            assert_eq!(thumb.height, MIN_THUMB_HEIGHT);
            assert_eq!(thumb.top, 0.0);
        }
    }

    #[test]
    fn test_proportional_thumb() {
        // Half the content visible -> half-height thumb.
        let thumb = thumb_geometry(0.0, 800.0, 400.0);
        assert_eq!(thumb.height, 200.0);
        assert_eq!(thumb.top, 0.0);

        let thumb = thumb_geometry(400.0, 800.0, 400.0);
        assert_eq!(thumb.top, 200.0);

        let thumb = thumb_geometry(200.0, 800.0, 400.0);
        assert_eq!(thumb.top, 100.0);
    }

    #[test]
    fn test_tiny_thumb_floored() {
        let thumb = thumb_geometry(0.0, 100_000.0, 400.0);
        assert_eq!(thumb.height, MIN_THUMB_HEIGHT);
    }

    #[test]
    fn test_zero_client_height() {
        let thumb = thumb_geometry(0.0, 0.0, 0.0);
        assert_eq!(thumb.height, MIN_THUMB_HEIGHT);
        assert_eq!(thumb.top, 0.0);
    }

    #[test]
    fn test_visibility_decays_after_idle() {
        let t0 = Instant::now();
        let mut tracker = ScrollTracker::new(Duration::from_millis(1000));
        tracker.observe(800.0, 400.0);
        assert!(!tracker.metrics().is_scrollbar_visible);

        tracker.track(50.0, 800.0, 400.0, t0);
        assert!(tracker.metrics().is_scrollbar_visible);
        assert_eq!(tracker.metrics().scroll_position, 50.0);

        tracker.track(120.0, 800.0, 400.0, t0 + Duration::from_millis(900));
        assert!(!tracker.poll(t0 + Duration::from_millis(1500)));
        assert!(tracker.metrics().is_scrollbar_visible);

        assert!(tracker.poll(t0 + Duration::from_millis(1900)));
        assert!(!tracker.metrics().is_scrollbar_visible);
    }

    #[test]
    fn test_unchanged_offset_is_not_a_scroll() {
        let t0 = Instant::now();
        let mut tracker = ScrollTracker::new(Duration::from_millis(1000));
        tracker.track(0.0, 800.0, 400.0, t0);
        assert!(!tracker.metrics().is_scrollbar_visible);
        assert!(tracker.deadline().is_none());
    }
}
