//! Phase clock: elapsed-time bookkeeping for the active phase.
//!
//! The clock never reads the system time. Every operation takes an explicit
//! `now_ms` from the caller, which makes drift impossible to hide and lets
//! tests drive time directly. Between `start_phase` and the next re-anchor,
//! elapsed time is `(now_ms - last_tick_ms) + phase_elapsed_ms`; pausing
//! folds the live span into `phase_elapsed_ms` so a paused phase holds its
//! value no matter how long the wall clock runs.

/// Per-phase elapsed/paused accumulator.
///
/// Arithmetic is saturating: a caller clock that steps backwards reads as
/// zero elapsed rather than underflowing.
#[derive(Debug, Clone, Default)]
pub struct PhaseClock {
    /// Elapsed milliseconds folded in before the current anchor.
    phase_elapsed_ms: u64,
    /// Anchor for the live span. None while paused or before the first phase.
    last_tick_ms: Option<u64>,
    /// When the current pause began. None while running.
    pause_started_ms: Option<u64>,
    /// Total paused time across the whole run.
    total_paused_ms: u64,
}

impl PhaseClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin timing a new phase at `now_ms`. Resets the per-phase
    /// accumulator; the run-level pause total is untouched.
    pub fn start_phase(&mut self, now_ms: u64) {
        self.phase_elapsed_ms = 0;
        self.last_tick_ms = Some(now_ms);
    }

    /// Elapsed milliseconds within the current phase. Does not mutate.
    pub fn elapsed(&self, now_ms: u64) -> u64 {
        let live = self
            .last_tick_ms
            .map(|last| now_ms.saturating_sub(last))
            .unwrap_or(0);
        self.phase_elapsed_ms.saturating_add(live)
    }

    /// Freeze the clock. Folds the live span into the accumulator so
    /// `elapsed` keeps returning the value at the moment of the pause.
    pub fn pause(&mut self, now_ms: u64) {
        if let Some(last) = self.last_tick_ms.take() {
            self.phase_elapsed_ms = self
                .phase_elapsed_ms
                .saturating_add(now_ms.saturating_sub(last));
        }
        self.pause_started_ms = Some(now_ms);
    }

    /// Unfreeze the clock, re-anchoring the live span at `now_ms` and
    /// adding the paused span to the run total.
    pub fn resume(&mut self, now_ms: u64) {
        if let Some(started) = self.pause_started_ms.take() {
            self.total_paused_ms = self
                .total_paused_ms
                .saturating_add(now_ms.saturating_sub(started));
        }
        self.last_tick_ms = Some(now_ms);
    }

    pub fn total_paused_ms(&self) -> u64 {
        self.total_paused_ms
    }

    /// 0.0 .. 1.0 progress through a phase of `duration_ms`.
    ///
    /// Clamped: a late frame reads 1.0, never more. A zero-length phase is
    /// complete immediately.
    pub fn progress(&self, now_ms: u64, duration_ms: u64) -> f64 {
        if duration_ms == 0 {
            return 1.0;
        }
        (self.elapsed(now_ms) as f64 / duration_ms as f64).min(1.0)
    }

    /// Whole seconds remaining for the countdown display.
    ///
    /// Matches a ceiling countdown: a 4 second phase shows 4 until a full
    /// second has elapsed, and reaches 0 exactly at the phase boundary.
    pub fn countdown_secs(&self, now_ms: u64, duration_secs: f64) -> u32 {
        let left = duration_secs - self.elapsed(now_ms) as f64 / 1000.0;
        left.ceil().max(0.0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn elapsed_accumulates_from_anchor() {
        let mut clock = PhaseClock::new();
        clock.start_phase(1_000);
        assert_eq!(clock.elapsed(1_000), 0);
        assert_eq!(clock.elapsed(1_250), 250);
        assert_eq!(clock.elapsed(3_500), 2_500);
    }

    #[test]
    fn pause_freezes_elapsed() {
        let mut clock = PhaseClock::new();
        clock.start_phase(0);
        clock.pause(1_500);
        // Wall clock keeps moving; elapsed does not.
        assert_eq!(clock.elapsed(9_000), 1_500);
        clock.resume(9_000);
        assert_eq!(clock.elapsed(9_400), 1_900);
        assert_eq!(clock.total_paused_ms(), 7_500);
    }

    #[test]
    fn zero_length_pause_changes_nothing() {
        let mut clock = PhaseClock::new();
        clock.start_phase(0);
        let before = clock.elapsed(2_000);
        clock.pause(2_000);
        clock.resume(2_000);
        assert_eq!(clock.elapsed(2_000), before);
        assert_eq!(clock.total_paused_ms(), 0);
    }

    #[test]
    fn multiple_pauses_sum_into_run_total() {
        let mut clock = PhaseClock::new();
        clock.start_phase(0);
        clock.pause(1_000);
        clock.resume(3_000);
        clock.pause(4_000);
        clock.resume(4_500);
        assert_eq!(clock.total_paused_ms(), 2_500);
        assert_eq!(clock.elapsed(5_000), 2_000);
    }

    #[test]
    fn backwards_clock_saturates_to_zero() {
        let mut clock = PhaseClock::new();
        clock.start_phase(5_000);
        assert_eq!(clock.elapsed(4_000), 0);
    }

    #[test]
    fn countdown_ceils_whole_seconds() {
        let mut clock = PhaseClock::new();
        clock.start_phase(0);
        assert_eq!(clock.countdown_secs(0, 4.0), 4);
        assert_eq!(clock.countdown_secs(100, 4.0), 4);
        assert_eq!(clock.countdown_secs(1_000, 4.0), 3);
        assert_eq!(clock.countdown_secs(3_999, 4.0), 1);
        assert_eq!(clock.countdown_secs(4_000, 4.0), 0);
        assert_eq!(clock.countdown_secs(9_000, 4.0), 0);
    }

    #[test]
    fn countdown_handles_fractional_durations() {
        let mut clock = PhaseClock::new();
        clock.start_phase(0);
        assert_eq!(clock.countdown_secs(0, 5.5), 6);
        assert_eq!(clock.countdown_secs(500, 5.5), 5);
        assert_eq!(clock.countdown_secs(5_400, 5.5), 1);
        assert_eq!(clock.countdown_secs(5_500, 5.5), 0);
    }

    proptest! {
        #[test]
        fn progress_stays_in_unit_interval(
            start in 0u64..10_000_000,
            offset in 0u64..10_000_000,
            duration in 1u64..1_000_000,
        ) {
            let mut clock = PhaseClock::new();
            clock.start_phase(start);
            let p = clock.progress(start + offset, duration);
            prop_assert!((0.0..=1.0).contains(&p));
        }

        #[test]
        fn progress_is_monotonic_in_now(
            start in 0u64..1_000_000,
            a in 0u64..1_000_000,
            b in 0u64..1_000_000,
            duration in 1u64..1_000_000,
        ) {
            let mut clock = PhaseClock::new();
            clock.start_phase(start);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let p_lo = clock.progress(start + lo, duration);
            let p_hi = clock.progress(start + hi, duration);
            prop_assert!(p_lo <= p_hi);
        }

        #[test]
        fn paused_elapsed_is_constant(
            start in 0u64..1_000_000,
            run in 0u64..1_000_000,
            idle in 0u64..1_000_000,
        ) {
            let mut clock = PhaseClock::new();
            clock.start_phase(start);
            clock.pause(start + run);
            prop_assert_eq!(clock.elapsed(start + run + idle), run);
        }
    }
}
