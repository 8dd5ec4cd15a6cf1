//! Timer-driven rate limiter for bursty UI events.
//!
//! A [`Debouncer`] does not own a timer. The caller feeds it each event with
//! the instant it happened ([`Debouncer::on_event`]) and, for trailing mode,
//! asks it again once its [`Debouncer::deadline`] has passed
//! ([`Debouncer::poll`]). This keeps the policy testable with synthetic
//! instants and lets the browser client schedule a single timeout.
//!
//! Every event restarts the settling window, whether or not it fired.

use web_time::{Duration, Instant};

/// Settling window used by the scroll handler.
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(20);

/// Which edge of a burst fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Edge {
    /// The first event of a burst fires immediately; the rest of the burst is
    /// suppressed until the window elapses after the last event.
    #[default]
    Leading,
    /// Nothing fires during the burst; the last event fires once the window
    /// elapses with no newer event.
    Trailing,
}

/// Rate limiter carrying the payload of the event that will fire.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    edge: Edge,
    window: Duration,
    deadline: Option<Instant>,
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with an explicit window and edge.
    #[must_use]
    pub const fn new(window: Duration, edge: Edge) -> Self {
        Self {
            edge,
            window,
            deadline: None,
            pending: None,
        }
    }

    /// Leading-edge debouncer.
    #[must_use]
    pub const fn leading(window: Duration) -> Self {
        Self::new(window, Edge::Leading)
    }

    /// Trailing-edge debouncer.
    #[must_use]
    pub const fn trailing(window: Duration) -> Self {
        Self::new(window, Edge::Trailing)
    }

    /// Record an event at `now`.
    ///
    /// Returns the payload when it should be handled right away (leading edge,
    /// no window open). Trailing mode always returns `None` and keeps the
    /// payload for [`Self::poll`].
    pub fn on_event(&mut self, now: Instant, value: T) -> Option<T> {
        let settling = self.is_settling(now);
        self.deadline = Some(now + self.window);

        match self.edge {
            Edge::Leading if settling => None,
            Edge::Leading => Some(value),
            Edge::Trailing => {
                self.pending = Some(value);
                None
            }
        }
    }

    /// Close the window if it has elapsed at `now`.
    ///
    /// Returns the pending payload in trailing mode. Leading mode never yields
    /// anything here.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }

    /// When the current window closes, if one is open.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether a window is open at `now`.
    #[must_use]
    pub fn is_settling(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now < deadline)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::leading(DEFAULT_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    #[test]
    fn test_leading_fires_first_event_of_burst_only() {
        let base = Instant::now();
        let mut debouncer = Debouncer::leading(Duration::from_millis(20));

        let fired: Vec<u64> = [0, 5, 10, 15]
            .into_iter()
            .filter_map(|ms| debouncer.on_event(at(base, ms), ms))
            .collect();

        assert_eq!(fired, vec![0]);
    }

    #[test]
    fn test_leading_fires_again_after_window_from_last_event() {
        let base = Instant::now();
        let mut debouncer = Debouncer::leading(Duration::from_millis(20));

        assert_eq!(debouncer.on_event(at(base, 0), "a"), Some("a"));
        assert_eq!(debouncer.on_event(at(base, 15), "b"), None);
        // Window now ends at 35, not 20.
        assert_eq!(debouncer.on_event(at(base, 30), "c"), None);
        // Window ends at 50.
        assert_eq!(debouncer.on_event(at(base, 50), "d"), Some("d"));
    }

    #[test]
    fn test_leading_poll_yields_nothing() {
        let base = Instant::now();
        let mut debouncer = Debouncer::leading(Duration::from_millis(20));

        debouncer.on_event(at(base, 0), 1);
        debouncer.on_event(at(base, 5), 2);
        assert_eq!(debouncer.poll(at(base, 100)), None);
        assert!(debouncer.deadline().is_none());
    }

    #[test]
    fn test_trailing_fires_last_event_after_quiet_window() {
        let base = Instant::now();
        let mut debouncer = Debouncer::trailing(Duration::from_millis(20));

        assert_eq!(debouncer.on_event(at(base, 0), 1), None);
        assert_eq!(debouncer.on_event(at(base, 10), 2), None);
        assert_eq!(debouncer.poll(at(base, 25)), None);
        assert_eq!(debouncer.poll(at(base, 30)), Some(2));
        assert_eq!(debouncer.poll(at(base, 60)), None);
    }

    #[test]
    fn test_deadline_tracks_last_event() {
        let base = Instant::now();
        let mut debouncer: Debouncer<()> = Debouncer::default();

        debouncer.on_event(at(base, 7), ());
        assert_eq!(debouncer.deadline(), Some(at(base, 27)));
        assert!(debouncer.is_settling(at(base, 26)));
        assert!(!debouncer.is_settling(at(base, 27)));
    }
}
