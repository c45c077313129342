//! Interaction scenarios driven through explicit timestamps
//!
//! Covers hover hand-off between tiles and the assistant panel, scrollbar
//! show/hide and thumb geometry, the delayed install banner, and desktop
//! entry installation.

use app_launcher::ui::scroll::MIN_THUMB_HEIGHT;
use app_launcher::ui::{
    thumb_geometry, DesktopIntegration, HoverTracker, InstallBanner, InstallCapability, ScrollTracker,
    XdgDesktopEntry,
};
use std::time::{Duration, Instant};

const HOVER_DELAY: Duration = Duration::from_millis(100);
const HIDE_DELAY: Duration = Duration::from_millis(1000);
const BANNER_DELAY: Duration = Duration::from_millis(3000);

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

// ============================================================================
// HOVER
// ============================================================================

#[test]
fn test_moving_between_tiles_never_clears() {
    let t0 = Instant::now();
    let mut hover = HoverTracker::new(HOVER_DELAY);

    hover.enter("A");
    hover.leave(t0);
    assert!(!hover.poll(t0 + ms(40)));
    hover.enter("B");

    // Every poll across the old deadline still shows a target
    for step in 0..20 {
        hover.poll(t0 + ms(step * 10));
        assert_eq!(hover.current(), Some(&"B"));
    }
}

#[test]
fn test_leaving_clears_after_delay() {
    let t0 = Instant::now();
    let mut hover = HoverTracker::new(HOVER_DELAY);

    hover.enter("A");
    hover.leave(t0);
    assert!(!hover.poll(t0 + ms(99)));
    assert_eq!(hover.current(), Some(&"A"));
    assert!(hover.poll(t0 + ms(100)));
    assert_eq!(hover.current(), None);
    assert_eq!(hover.deadline(), None);
}

#[test]
fn test_assistant_panel_holds_hover() {
    let t0 = Instant::now();
    let mut hover = HoverTracker::new(HOVER_DELAY);

    hover.enter("A");
    hover.leave(t0);
    hover.hold();
    assert!(!hover.poll(t0 + ms(500)));
    assert!(hover.is_hovering(&"A"));

    // Leaving the panel starts a fresh clear
    hover.leave(t0 + ms(500));
    assert!(hover.poll(t0 + ms(600)));
    assert!(!hover.is_hovering(&"A"));
}

#[test]
fn test_leave_without_target_schedules_nothing() {
    let mut hover: HoverTracker<&str> = HoverTracker::new(HOVER_DELAY);
    hover.leave(Instant::now());
    assert_eq!(hover.deadline(), None);
}

// ============================================================================
// SCROLLBAR
// ============================================================================

#[test]
fn test_thumb_geometry_for_overflowing_content() {
    let top = thumb_geometry(0.0, 2000.0, 500.0);
    assert_eq!(top.height, 125.0);
    assert_eq!(top.top, 0.0);

    let bottom = thumb_geometry(1500.0, 2000.0, 500.0);
    assert_eq!(bottom.top, 375.0);

    let middle = thumb_geometry(750.0, 2000.0, 500.0);
    assert_eq!(middle.top, 187.5);
}

#[test]
fn test_thumb_respects_floor() {
    let thumb = thumb_geometry(0.0, 100_000.0, 400.0);
    assert_eq!(thumb.height, MIN_THUMB_HEIGHT);

    let end = thumb_geometry(99_600.0, 100_000.0, 400.0);
    assert_eq!(end.top, 400.0 - MIN_THUMB_HEIGHT);
}

#[test]
fn test_thumb_without_overflow() {
    let thumb = thumb_geometry(0.0, 300.0, 500.0);
    assert_eq!(thumb.height, MIN_THUMB_HEIGHT);
    assert_eq!(thumb.top, 0.0);
}

#[test]
fn test_scrollbar_hides_after_idle() {
    let t0 = Instant::now();
    let mut scroll = ScrollTracker::new(HIDE_DELAY);

    scroll.on_scroll(100.0, 2000.0, 500.0, t0);
    assert!(scroll.metrics().is_scrollbar_visible);

    // Repeated scrolling keeps it visible
    scroll.on_scroll(200.0, 2000.0, 500.0, t0 + ms(900));
    assert!(!scroll.poll(t0 + ms(1500)));
    assert!(scroll.metrics().is_scrollbar_visible);

    assert!(scroll.poll(t0 + ms(1900)));
    let metrics = scroll.metrics();
    assert!(!metrics.is_scrollbar_visible);
    assert_eq!(metrics.scroll_position, 200.0);
}

#[test]
fn test_unchanged_offset_is_not_a_scroll() {
    let t0 = Instant::now();
    let mut scroll = ScrollTracker::new(HIDE_DELAY);

    scroll.track(0.0, 2000.0, 500.0, t0);
    assert!(!scroll.metrics().is_scrollbar_visible);
    assert_eq!(scroll.metrics().scroll_height, 2000.0);

    scroll.track(50.0, 2000.0, 500.0, t0);
    assert!(scroll.metrics().is_scrollbar_visible);
    assert_eq!(scroll.thumb().height, 125.0);
}

// ============================================================================
// INSTALL BANNER
// ============================================================================

fn installable() -> InstallCapability {
    InstallCapability {
        is_installable: true,
        is_installed: false,
    }
}

#[test]
fn test_banner_appears_after_delay() {
    let t0 = Instant::now();
    let mut banner = InstallBanner::new(BANNER_DELAY);

    banner.update_capability(installable(), t0);
    assert!(!banner.is_visible());
    assert!(!banner.poll(t0 + ms(2999)));
    assert!(banner.poll(t0 + ms(3000)));
    assert!(banner.is_visible());
}

#[test]
fn test_banner_suppressed_when_installed() {
    let t0 = Instant::now();
    let mut banner = InstallBanner::new(BANNER_DELAY);

    banner.update_capability(
        InstallCapability {
            is_installable: true,
            is_installed: true,
        },
        t0,
    );
    assert_eq!(banner.deadline(), None);
    assert!(!banner.poll(t0 + ms(5000)));
    assert!(!banner.is_visible());
}

#[test]
fn test_dismissed_banner_stays_hidden() {
    let t0 = Instant::now();
    let mut banner = InstallBanner::new(BANNER_DELAY);

    banner.update_capability(installable(), t0);
    banner.poll(t0 + ms(3000));
    banner.dismiss();
    assert!(!banner.is_visible());

    // A capability flap does not bring it back
    banner.update_capability(InstallCapability::default(), t0 + ms(4000));
    banner.update_capability(installable(), t0 + ms(4100));
    assert!(!banner.poll(t0 + ms(8000)));
    assert!(!banner.is_visible());
}

#[test]
fn test_mark_installed_hides_banner() {
    let t0 = Instant::now();
    let mut banner = InstallBanner::new(BANNER_DELAY);

    banner.update_capability(installable(), t0);
    banner.poll(t0 + ms(3000));
    banner.mark_installed();
    assert!(!banner.is_visible());
    assert!(banner.capability().is_installed);
}

// ============================================================================
// DESKTOP ENTRY
// ============================================================================

#[test]
fn test_desktop_entry_install() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    let entry = temp.path().join("applications").join("app-launcher.desktop");
    let desktop = XdgDesktopEntry::with_paths(entry.clone(), "/usr/bin/app-launcher".into());

    assert_eq!(desktop.capability(), installable());

    let written = desktop.install()?;
    assert_eq!(written, entry);
    let contents = std::fs::read_to_string(&entry)?;
    assert!(contents.starts_with("[Desktop Entry]"));
    assert!(contents.contains("Exec=\"/usr/bin/app-launcher\""));

    assert!(desktop.capability().is_installed);
    assert!(!desktop.capability().should_prompt());
    Ok(())
}
