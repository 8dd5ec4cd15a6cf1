//! Count-up animation schedule for the stats section.
//!
//! A counter climbs from 0 to its target one unit at a time. The total
//! duration is fixed, so the per-step delay is `duration / target` in whole
//! milliseconds. A target of 0 has no steps and shows 0 immediately.

use web_time::Duration;

/// Total time for every counter to reach its target.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(2000);

/// Schedule for one on-screen counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterAnimation {
    target: u64,
    duration: Duration,
}

impl CounterAnimation {
    #[must_use]
    pub const fn new(target: u64, duration: Duration) -> Self {
        Self { target, duration }
    }

    /// Parse a `data-target` attribute. Non-numeric targets yield `None`.
    #[must_use]
    pub fn from_attribute(raw: &str, duration: Duration) -> Option<Self> {
        raw.trim()
            .parse::<u64>()
            .ok()
            .map(|target| Self::new(target, duration))
    }

    /// Delay between increments, `None` for a zero target.
    #[must_use]
    pub fn step_delay(&self) -> Option<Duration> {
        if self.target == 0 {
            return None;
        }
        let millis = u64::try_from(self.duration.as_millis()).unwrap_or(u64::MAX);
        Some(Duration::from_millis(millis / self.target))
    }

    /// Value to show after `steps` increments, clamped to the target.
    #[must_use]
    pub fn value_after(&self, steps: u64) -> u64 {
        steps.min(self.target)
    }

    /// Whether the counter shows its target after `steps` increments.
    #[must_use]
    pub const fn is_finished(&self, steps: u64) -> bool {
        steps >= self.target
    }
}
