//! Reveal-on-scroll.
//!
//! Elements marked `scroll-reveal` get a `revealed` class the first time
//! they intersect the viewport and are then unobserved, so each element
//! animates in at most once. The viewport observer is injected through the
//! [`Observer`] trait.

use std::collections::BTreeSet;

/// Intersection observer options, in the browser's terms.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealOptions {
    /// Fraction of the element that must be visible.
    pub threshold: f64,
    /// CSS margin applied to the viewport box.
    pub root_margin: String,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
        }
    }
}

/// Viewport-intersection source. `unobserve` and `disconnect` must be
/// safe to call repeatedly.
pub trait Observer {
    fn observe(&mut self, element: &str);
    fn unobserve(&mut self, element: &str);
    fn disconnect(&mut self);
}

/// One intersection notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection {
    pub element: String,
    pub is_intersecting: bool,
}

pub struct RevealTracker<O: Observer> {
    observer: O,
    observed: BTreeSet<String>,
    revealed: BTreeSet<String>,
    connected: bool,
}

impl<O: Observer> RevealTracker<O> {
    pub fn new(observer: O) -> Self {
        Self {
            observer,
            observed: BTreeSet::new(),
            revealed: BTreeSet::new(),
            connected: true,
        }
    }

    /// Start watching elements. Already-revealed or already-watched
    /// elements are skipped, so this can be re-run after each render.
    pub fn watch<'a>(&mut self, elements: impl IntoIterator<Item = &'a str>) {
        if !self.connected {
            return;
        }
        for element in elements {
            if self.revealed.contains(element) || self.observed.contains(element) {
                continue;
            }
            self.observer.observe(element);
            self.observed.insert(element.to_string());
        }
    }

    /// Handle a batch of notifications. Returns the elements newly revealed.
    pub fn on_intersections(&mut self, entries: &[Intersection]) -> Vec<String> {
        let mut newly = Vec::new();
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            if !self.observed.remove(&entry.element) {
                continue;
            }
            self.observer.unobserve(&entry.element);
            self.revealed.insert(entry.element.clone());
            newly.push(entry.element.clone());
        }
        newly
    }

    pub fn is_revealed(&self, element: &str) -> bool {
        self.revealed.contains(element)
    }

    pub fn pending(&self) -> usize {
        self.observed.len()
    }

    pub fn disconnect(&mut self) {
        if !self.connected {
            return;
        }
        self.observer.disconnect();
        self.observed.clear();
        self.connected = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingObserver {
        calls: Vec<String>,
    }

    impl Observer for RecordingObserver {
        fn observe(&mut self, element: &str) {
            self.calls.push(format!("observe {element}"));
        }
        fn unobserve(&mut self, element: &str) {
            self.calls.push(format!("unobserve {element}"));
        }
        fn disconnect(&mut self) {
            self.calls.push("disconnect".to_string());
        }
    }

    fn hit(element: &str) -> Intersection {
        Intersection {
            element: element.to_string(),
            is_intersecting: true,
        }
    }

    #[test]
    fn reveals_once_and_unobserves() {
        let mut tracker = RevealTracker::new(RecordingObserver::default());
        tracker.watch(["card-1", "card-2"]);
        assert_eq!(tracker.pending(), 2);

        assert_eq!(tracker.on_intersections(&[hit("card-1")]), vec!["card-1"]);
        assert!(tracker.is_revealed("card-1"));
        // A second notification for the same element does nothing.
        assert!(tracker.on_intersections(&[hit("card-1")]).is_empty());
        assert_eq!(tracker.pending(), 1);
    }

    #[test]
    fn non_intersecting_entries_are_ignored() {
        let mut tracker = RevealTracker::new(RecordingObserver::default());
        tracker.watch(["card-1"]);
        let entry = Intersection {
            element: "card-1".into(),
            is_intersecting: false,
        };
        assert!(tracker.on_intersections(&[entry]).is_empty());
        assert!(!tracker.is_revealed("card-1"));
    }

    #[test]
    fn rewatch_skips_revealed_elements() {
        let mut tracker = RevealTracker::new(RecordingObserver::default());
        tracker.watch(["a"]);
        tracker.on_intersections(&[hit("a")]);
        tracker.watch(["a", "b"]);
        tracker.watch(["b"]);
        assert_eq!(
            tracker.observer.calls,
            vec!["observe a", "unobserve a", "observe b"]
        );
    }

    #[test]
    fn disconnect_is_idempotent() {
        let mut tracker = RevealTracker::new(RecordingObserver::default());
        tracker.watch(["a"]);
        tracker.disconnect();
        tracker.disconnect();
        tracker.watch(["b"]);
        assert_eq!(tracker.observer.calls, vec!["observe a", "disconnect"]);
        assert_eq!(tracker.pending(), 0);
    }

    #[test]
    fn default_options() {
        let options = RevealOptions::default();
        assert_eq!(options.threshold, 0.1);
        assert_eq!(options.root_margin, "0px 0px -50px 0px");
    }
}
