//! Autoplay timer management.
//!
//! The carousel never owns a clock. It asks an injected [`Scheduler`] for a
//! repeating timer and is later told, through
//! [`Carousel::tick`](super::Carousel::tick), that a timer fired. Each start
//! yields a fresh [`TimerHandle`]; a tick carrying any handle other than the
//! live one is stale (it was cancelled, or the carousel was destroyed) and
//! is ignored.

use std::time::Duration;

/// Opaque identifier of one repeating timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// Source of repeating timers (the page's `setInterval`, a test double, ...).
pub trait Scheduler {
    fn schedule_every(&mut self, period: Duration) -> TimerHandle;
    /// Cancel a timer. Cancelling an unknown or already-cancelled handle is
    /// a no-op.
    fn cancel(&mut self, handle: TimerHandle);
}

/// A scheduler that never fires. Used where a carousel is only needed for
/// its frames, as when rendering the initial markup.
#[derive(Debug, Default)]
pub struct NullScheduler {
    next: u64,
}

impl Scheduler for NullScheduler {
    fn schedule_every(&mut self, _period: Duration) -> TimerHandle {
        self.next += 1;
        TimerHandle(self.next)
    }

    fn cancel(&mut self, _handle: TimerHandle) {}
}

#[derive(Debug)]
pub(crate) struct Autoplay<S: Scheduler> {
    scheduler: S,
    period: Duration,
    enabled: bool,
    handle: Option<TimerHandle>,
}

impl<S: Scheduler> Autoplay<S> {
    pub(crate) fn new(scheduler: S, period: Duration, enabled: bool) -> Self {
        Self {
            scheduler,
            period,
            enabled,
            handle: None,
        }
    }

    pub(crate) fn start(&mut self) {
        if self.enabled && self.handle.is_none() {
            self.handle = Some(self.scheduler.schedule_every(self.period));
        }
    }

    pub(crate) fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.scheduler.cancel(handle);
        }
    }

    /// Restart the interval so the next automatic advance is a full period
    /// away. No-op when autoplay is disabled.
    pub(crate) fn reset(&mut self) {
        if self.enabled {
            self.stop();
            self.start();
        }
    }

    pub(crate) fn is_live(&self, handle: TimerHandle) -> bool {
        self.handle == Some(handle)
    }

    pub(crate) fn handle(&self) -> Option<TimerHandle> {
        self.handle
    }

    pub(crate) fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Records every schedule/cancel call.
    #[derive(Debug, Default)]
    pub(crate) struct ManualScheduler {
        next: u64,
        pub(crate) active: Vec<TimerHandle>,
        pub(crate) scheduled: Vec<Duration>,
        pub(crate) cancelled: Vec<TimerHandle>,
    }

    impl Scheduler for ManualScheduler {
        fn schedule_every(&mut self, period: Duration) -> TimerHandle {
            self.next += 1;
            let handle = TimerHandle(self.next);
            self.active.push(handle);
            self.scheduled.push(period);
            handle
        }

        fn cancel(&mut self, handle: TimerHandle) {
            self.active.retain(|h| *h != handle);
            self.cancelled.push(handle);
        }
    }

    #[test]
    fn start_is_idempotent() {
        let mut autoplay = Autoplay::new(ManualScheduler::default(), Duration::from_secs(5), true);
        autoplay.start();
        autoplay.start();
        assert_eq!(autoplay.scheduler().scheduled.len(), 1);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut autoplay = Autoplay::new(ManualScheduler::default(), Duration::from_secs(5), true);
        autoplay.start();
        autoplay.stop();
        autoplay.stop();
        assert_eq!(autoplay.scheduler().cancelled.len(), 1);
        assert!(autoplay.scheduler().active.is_empty());
    }

    #[test]
    fn reset_replaces_handle() {
        let mut autoplay = Autoplay::new(ManualScheduler::default(), Duration::from_secs(5), true);
        autoplay.start();
        let first = autoplay.handle().unwrap();
        autoplay.reset();
        let second = autoplay.handle().unwrap();
        assert_ne!(first, second);
        assert!(!autoplay.is_live(first));
        assert!(autoplay.is_live(second));
    }

    #[test]
    fn disabled_never_schedules() {
        let mut autoplay = Autoplay::new(ManualScheduler::default(), Duration::from_secs(5), false);
        autoplay.start();
        autoplay.reset();
        assert!(autoplay.handle().is_none());
        assert!(autoplay.scheduler().scheduled.is_empty());
    }
}
