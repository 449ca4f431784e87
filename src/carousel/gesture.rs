//! Drag/swipe gesture tracking.
//!
//! A drag spans three kinds of events (start, move, end/cancel). The
//! tracker holds the transient state between them and is always cleared on
//! end or cancel, so a lost `mouseup` can never leave the track stuck in
//! drag mode.
//!
//! A finished drag commits a slide change when either
//!
//! - the displacement exceeds [`SWIPE_FRACTION`] of the track width, or
//! - it is a fast flick: more than [`FLICK_DISTANCE_PX`] within
//!   [`FLICK_WINDOW`].

use std::time::{Duration, Instant};

pub const SWIPE_FRACTION: f64 = 0.2;
pub const FLICK_DISTANCE_PX: f64 = 50.0;
pub const FLICK_WINDOW: Duration = Duration::from_millis(300);

/// Result of a finished drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    /// Dragged right: show the previous slide.
    Previous,
    /// Dragged left: show the next slide.
    Next,
    SnapBack,
}

/// Decide what a drag of `dx` pixels over `elapsed` means on a track
/// `width` pixels wide.
pub fn classify(dx: f64, elapsed: Duration, width: f64) -> Swipe {
    let distance = dx.abs();
    let past_fraction = width > 0.0 && distance > width * SWIPE_FRACTION;
    let flick = distance > FLICK_DISTANCE_PX && elapsed < FLICK_WINDOW;

    if !(past_fraction || flick) {
        Swipe::SnapBack
    } else if dx > 0.0 {
        Swipe::Previous
    } else {
        Swipe::Next
    }
}

/// Horizontal displacement as a percentage of the track width. A track
/// with no measurable width yields no offset.
pub fn offset_percent(dx: f64, width: f64) -> f64 {
    if width > 0.0 { dx / width * 100.0 } else { 0.0 }
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    start_x: f64,
    current_x: f64,
    started_at: Instant,
}

#[derive(Debug, Default)]
pub struct DragTracker {
    drag: Option<Drag>,
}

impl DragTracker {
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn start(&mut self, x: f64, at: Instant) {
        self.drag = Some(Drag {
            start_x: x,
            current_x: x,
            started_at: at,
        });
    }

    /// Record pointer movement. Returns the displacement from the start,
    /// or `None` when no drag is in progress.
    pub fn move_to(&mut self, x: f64) -> Option<f64> {
        let drag = self.drag.as_mut()?;
        drag.current_x = x;
        Some(drag.current_x - drag.start_x)
    }

    /// Finish the drag at `x` and classify it. Clears the tracker.
    pub fn finish(&mut self, x: f64, at: Instant, width: f64) -> Option<Swipe> {
        let drag = self.drag.take()?;
        let dx = x - drag.start_x;
        let elapsed = at.saturating_duration_since(drag.started_at);
        Some(classify(dx, elapsed, width))
    }

    /// Abandon the drag. Returns whether one was in progress.
    pub fn cancel(&mut self) -> bool {
        self.drag.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: f64 = 1000.0;
    const SLOW: Duration = Duration::from_millis(800);
    const FAST: Duration = Duration::from_millis(120);

    #[test]
    fn long_drag_left_is_next() {
        assert_eq!(classify(-250.0, SLOW, WIDTH), Swipe::Next);
    }

    #[test]
    fn long_drag_right_is_previous() {
        assert_eq!(classify(250.0, SLOW, WIDTH), Swipe::Previous);
    }

    #[test]
    fn exactly_twenty_percent_snaps_back() {
        assert_eq!(classify(-200.0, SLOW, WIDTH), Swipe::SnapBack);
    }

    #[test]
    fn short_slow_drag_snaps_back() {
        assert_eq!(classify(-80.0, SLOW, WIDTH), Swipe::SnapBack);
    }

    #[test]
    fn short_fast_flick_commits() {
        assert_eq!(classify(-80.0, FAST, WIDTH), Swipe::Next);
        assert_eq!(classify(60.0, FAST, WIDTH), Swipe::Previous);
    }

    #[test]
    fn tiny_fast_flick_snaps_back() {
        assert_eq!(classify(-30.0, FAST, WIDTH), Swipe::SnapBack);
    }

    #[test]
    fn zero_width_track_only_accepts_flicks() {
        assert_eq!(classify(-500.0, SLOW, 0.0), Swipe::SnapBack);
        assert_eq!(classify(-500.0, FAST, 0.0), Swipe::Next);
        assert_eq!(offset_percent(-500.0, 0.0), 0.0);
    }

    #[test]
    fn tracker_resets_after_finish() {
        let t0 = Instant::now();
        let mut tracker = DragTracker::default();
        tracker.start(500.0, t0);
        assert_eq!(tracker.move_to(400.0), Some(-100.0));
        let swipe = tracker.finish(200.0, t0 + SLOW, WIDTH);
        assert_eq!(swipe, Some(Swipe::Next));
        assert!(!tracker.is_dragging());
        assert_eq!(tracker.move_to(100.0), None);
        assert_eq!(tracker.finish(100.0, t0 + SLOW, WIDTH), None);
    }

    #[test]
    fn tracker_cancel_clears_state() {
        let mut tracker = DragTracker::default();
        assert!(!tracker.cancel());
        tracker.start(0.0, Instant::now());
        assert!(tracker.cancel());
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn release_without_move_uses_release_position() {
        let t0 = Instant::now();
        let mut tracker = DragTracker::default();
        tracker.start(0.0, t0);
        assert_eq!(tracker.finish(0.0, t0 + FAST, WIDTH), Some(Swipe::SnapBack));
    }
}
