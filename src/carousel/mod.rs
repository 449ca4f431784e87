//! Slide carousel state machine.
//!
//! A carousel is built once its slide count is known; there is no "wait
//! for the children to appear" phase. State is just the current index in
//! `[0, N)`. Every transition produces a [`Frame`] describing what the view
//! should show: the track translation, the active indicator, and which
//! controls are disabled.
//!
//! | Transition | Effect |
//! |---|---|
//! | `next` | `i + 1`; at `N - 1` wraps to `0` when looping, else stays |
//! | `previous` | `i - 1`; at `0` wraps to `N - 1` when looping, else stays |
//! | `jump(i)` | sets `i` when `i < N`, otherwise ignored |
//!
//! A carousel with zero slides is inert: it never schedules a timer and
//! every operation returns `None`. The same holds after [`Carousel::destroy`].
//!
//! The module is split into:
//! - **Autoplay**: [`Scheduler`] trait and timer handle bookkeeping
//! - **Gesture**: drag tracking and swipe classification
//! - **Markup**: server-rendered initial state for the generated page

pub mod autoplay;
pub mod gesture;
pub mod markup;

pub use autoplay::{NullScheduler, Scheduler, TimerHandle};
pub use gesture::Swipe;
pub use markup::{CarouselControls, render_carousel};

use autoplay::Autoplay;
use gesture::DragTracker;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq)]
pub struct CarouselOptions {
    pub autoplay: bool,
    pub autoplay_delay: Duration,
    pub looping: bool,
    pub swipe: bool,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            autoplay: true,
            autoplay_delay: Duration::from_millis(5000),
            looping: true,
            swipe: true,
        }
    }
}

/// What the view shows for one carousel state.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub index: usize,
    /// Horizontal track translation in percent of the track width.
    pub offset_percent: f64,
    pub prev_disabled: bool,
    pub next_disabled: bool,
    /// False while a drag is in progress (transition suspended).
    pub animated: bool,
}

impl Frame {
    /// The resting frame for `index` out of `len` slides.
    pub fn at(index: usize, len: usize, looping: bool) -> Self {
        Self {
            index,
            offset_percent: 0.0 - index as f64 * 100.0,
            prev_disabled: !looping && index == 0,
            next_disabled: !looping && index + 1 >= len,
            animated: true,
        }
    }

    /// Whether indicator `i` carries the `active` class.
    pub fn is_active(&self, i: usize) -> bool {
        i == self.index
    }

    /// CSS `transform` value for the track.
    pub fn transform(&self) -> String {
        format!("translateX({}%)", self.offset_percent)
    }
}

/// A user-operated control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Previous,
    Next,
    Indicator(usize),
}

pub struct Carousel<S: Scheduler> {
    len: usize,
    index: usize,
    options: CarouselOptions,
    autoplay: Autoplay<S>,
    drag: DragTracker,
    destroyed: bool,
}

impl<S: Scheduler> Carousel<S> {
    /// Build a carousel over `len` slides and start autoplay if configured.
    pub fn new(len: usize, options: CarouselOptions, scheduler: S) -> Self {
        let mut autoplay = Autoplay::new(scheduler, options.autoplay_delay, options.autoplay);
        if len > 0 {
            autoplay.start();
        }
        Self {
            len,
            index: 0,
            options,
            autoplay,
            drag: DragTracker::default(),
            destroyed: false,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn is_inert(&self) -> bool {
        self.len == 0 || self.destroyed
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn options(&self) -> &CarouselOptions {
        &self.options
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Handle of the running autoplay timer, if any.
    pub fn timer(&self) -> Option<TimerHandle> {
        self.autoplay.handle()
    }

    pub fn scheduler(&self) -> &S {
        self.autoplay.scheduler()
    }

    /// The resting frame for the current index.
    pub fn frame(&self) -> Option<Frame> {
        (!self.is_inert()).then(|| Frame::at(self.index, self.len, self.options.looping))
    }

    pub fn next(&mut self) -> Option<Frame> {
        if self.is_inert() {
            return None;
        }
        if self.index + 1 < self.len {
            self.index += 1;
        } else if self.options.looping {
            self.index = 0;
        }
        self.frame()
    }

    pub fn previous(&mut self) -> Option<Frame> {
        if self.is_inert() {
            return None;
        }
        if self.index > 0 {
            self.index -= 1;
        } else if self.options.looping {
            self.index = self.len - 1;
        }
        self.frame()
    }

    /// Go to slide `index`. Out-of-range requests leave the state untouched
    /// but still return the current frame.
    pub fn jump(&mut self, index: usize) -> Option<Frame> {
        if self.is_inert() {
            return None;
        }
        if index < self.len {
            self.index = index;
        }
        self.frame()
    }

    /// A button or indicator press: navigate, then restart the autoplay
    /// interval so the user's choice is not immediately overridden.
    pub fn press(&mut self, control: Control) -> Option<Frame> {
        let frame = match control {
            Control::Previous => self.previous(),
            Control::Next => self.next(),
            Control::Indicator(i) => self.jump(i),
        }?;
        self.autoplay.reset();
        Some(frame)
    }

    /// An autoplay timer fired. Ticks from cancelled timers are dropped.
    pub fn tick(&mut self, handle: TimerHandle) -> Option<Frame> {
        if self.is_inert() || !self.autoplay.is_live(handle) {
            tracing::trace!(?handle, "ignoring stale autoplay tick");
            return None;
        }
        self.next()
    }

    pub fn drag_start(&mut self, x: f64, at: Instant) -> Option<Frame> {
        if self.is_inert() || !self.options.swipe {
            return None;
        }
        self.drag.start(x, at);
        self.frame().map(|f| Frame {
            animated: false,
            ..f
        })
    }

    /// Live feedback while dragging: the resting offset shifted by the
    /// drag distance. The index does not change.
    pub fn drag_move(&mut self, x: f64, width: f64) -> Option<Frame> {
        if self.is_inert() {
            return None;
        }
        let dx = self.drag.move_to(x)?;
        self.frame().map(|f| Frame {
            offset_percent: f.offset_percent + gesture::offset_percent(dx, width),
            animated: false,
            ..f
        })
    }

    /// Release: commit a swipe or snap back, and restart autoplay.
    pub fn drag_end(&mut self, x: f64, at: Instant, width: f64) -> Option<Frame> {
        if self.is_inert() {
            return None;
        }
        let swipe = self.drag.finish(x, at, width)?;
        let frame = match swipe {
            Swipe::Previous => self.previous(),
            Swipe::Next => self.next(),
            Swipe::SnapBack => self.frame(),
        };
        self.autoplay.reset();
        frame
    }

    /// Pointer lost mid-drag (touchcancel, window blur): snap back.
    pub fn drag_cancel(&mut self) -> Option<Frame> {
        if !self.drag.cancel() || self.is_inert() {
            return None;
        }
        self.autoplay.reset();
        self.frame()
    }

    pub fn stop_autoplay(&mut self) {
        self.autoplay.stop();
    }

    /// Cancel the autoplay timer and detach. Safe to call more than once.
    pub fn destroy(&mut self) {
        self.autoplay.stop();
        self.drag.cancel();
        self.destroyed = true;
    }
}

impl<S: Scheduler> Drop for Carousel<S> {
    fn drop(&mut self) {
        self.autoplay.stop();
    }
}
