//=========================================================================
// Timing
//=========================================================================
//
// - `TickClock`: milliseconds since surface creation, never decreasing.
// - `FrameTimer`: fixed-cadence tick deadlines for the event loop.
//
// Both take `Instant`s explicitly in their `_at` variants so the timing
// contract is testable without sleeping.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::Cell;
use std::time::{Duration, Instant};

//=== TickClock ===========================================================

/// Monotonic millisecond counter.
///
/// Backed by `Instant` and clamped to the last reported value, so a
/// reading can never go backwards even across idle periods.
#[derive(Debug, Clone)]
pub struct TickClock {
    start: Instant,
    last_ms: Cell<u64>,
}

impl TickClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            last_ms: Cell::new(0),
        }
    }

    /// Milliseconds since creation.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms_at(Instant::now())
    }

    /// Milliseconds between creation and `now`, clamped to be at least
    /// the previous reading.
    pub fn elapsed_ms_at(&self, now: Instant) -> u64 {
        let raw = now.saturating_duration_since(self.start).as_millis();
        let raw = u64::try_from(raw).unwrap_or(u64::MAX);
        let value = raw.max(self.last_ms.get());
        self.last_ms.set(value);
        value
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}

//=== FrameTimer ==========================================================

/// Fixed-rate tick scheduler.
///
/// Deadlines advance by exactly one interval per tick. If the loop falls
/// more than one interval behind, the missed ticks are dropped and the
/// schedule restarts from `now` rather than bursting to catch up.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    interval: Duration,
    next: Instant,
}

impl FrameTimer {
    /// # Panics
    ///
    /// If `interval` is zero.
    pub fn new(interval: Duration, now: Instant) -> Self {
        assert!(!interval.is_zero(), "Tick interval must be positive");
        Self {
            interval,
            next: now + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Instant at which the next tick is due.
    pub fn deadline(&self) -> Instant {
        self.next
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next
    }

    /// Consumes the current deadline if it has passed.
    ///
    /// Returns `true` when a tick should run now.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }

        self.next += self.interval;
        if self.next <= now {
            self.next = now + self.interval;
        }
        true
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    //=====================================================================
    // TickClock Tests
    //=====================================================================

    #[test]
    fn clock_counts_milliseconds_since_start() {
        let start = Instant::now();
        let clock = TickClock::starting_at(start);
        assert_eq!(clock.elapsed_ms_at(start), 0);
        assert_eq!(clock.elapsed_ms_at(start + 250 * MS), 250);
    }

    #[test]
    fn clock_never_decreases() {
        let start = Instant::now();
        let clock = TickClock::starting_at(start);

        assert_eq!(clock.elapsed_ms_at(start + 100 * MS), 100);
        // An earlier sample (or a time before start) must not go backwards.
        assert_eq!(clock.elapsed_ms_at(start + 40 * MS), 100);
        assert_eq!(clock.elapsed_ms_at(start), 100);
        assert_eq!(clock.elapsed_ms_at(start + 101 * MS), 101);
    }

    #[test]
    fn clock_samples_are_monotonic() {
        let clock = TickClock::new();
        let mut previous = clock.elapsed_ms();
        for _ in 0..1000 {
            let current = clock.elapsed_ms();
            assert!(current >= previous);
            previous = current;
        }
    }

    //=====================================================================
    // FrameTimer Tests
    //=====================================================================

    #[test]
    fn timer_not_due_before_interval() {
        let start = Instant::now();
        let mut timer = FrameTimer::new(16 * MS, start);

        assert!(!timer.poll(start));
        assert!(!timer.poll(start + 15 * MS));
        assert!(timer.poll(start + 16 * MS));
    }

    #[test]
    fn timer_keeps_fixed_cadence() {
        let start = Instant::now();
        let mut timer = FrameTimer::new(10 * MS, start);

        assert!(timer.poll(start + 12 * MS));
        assert_eq!(timer.deadline(), start + 20 * MS, "lateness must not shift the schedule");
        assert!(!timer.poll(start + 19 * MS));
        assert!(timer.poll(start + 20 * MS));
    }

    #[test]
    fn timer_drops_missed_ticks() {
        let start = Instant::now();
        let mut timer = FrameTimer::new(10 * MS, start);

        assert!(timer.poll(start + 55 * MS));
        assert_eq!(timer.deadline(), start + 65 * MS);
        assert!(!timer.poll(start + 56 * MS), "no burst of catch-up ticks");
    }

    #[test]
    #[should_panic(expected = "Tick interval must be positive")]
    fn timer_rejects_zero_interval() {
        FrameTimer::new(Duration::ZERO, Instant::now());
    }
}
