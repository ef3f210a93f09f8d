//! Run identity and the end-of-run report.
//!
//! A session is anchored twice. The wall-clock stamp is taken when the run
//! is accepted and only decorates the report. The caller-clock anchor is
//! taken when the first phase starts, after the pre-roll countdown, and is
//! the origin for all elapsed-time arithmetic: the countdown counts for
//! nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct RunSession {
    run_id: Uuid,
    technique_id: String,
    started_at: DateTime<Utc>,
    /// Caller-clock origin for elapsed time. Set by `begin_practice`.
    practice_started_ms: u64,
}

impl RunSession {
    pub fn new(technique_id: &str) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            technique_id: technique_id.to_string(),
            started_at: Utc::now(),
            practice_started_ms: 0,
        }
    }

    /// Anchor the elapsed-time origin at the end of the countdown.
    pub fn begin_practice(&mut self, now_ms: u64) {
        self.practice_started_ms = now_ms;
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Close the session into a report.
    ///
    /// Elapsed seconds round from active milliseconds: the span since
    /// practice began, minus the run's paused time.
    pub fn report(&self, now_ms: u64, cycles_completed: u32, total_paused_ms: u64) -> RunReport {
        let span = now_ms.saturating_sub(self.practice_started_ms);
        let active_ms = span.saturating_sub(total_paused_ms);
        RunReport {
            run_id: self.run_id,
            technique_id: self.technique_id.clone(),
            cycles_completed,
            elapsed_secs: (active_ms + 500) / 1000,
        }
    }
}

/// What a finished run leaves behind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub technique_id: String,
    pub cycles_completed: u32,
    pub elapsed_secs: u64,
}

impl RunReport {
    /// Elapsed time split for display, e.g. 95 seconds -> (1, 35).
    pub fn minutes_seconds(&self) -> (u64, u64) {
        (self.elapsed_secs / 60, self.elapsed_secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_measures_from_practice_anchor() {
        let mut session = RunSession::new("box");
        session.begin_practice(3_000);
        let report = session.report(23_000, 2, 0);
        assert_eq!(report.technique_id, "box");
        assert_eq!(report.cycles_completed, 2);
        assert_eq!(report.elapsed_secs, 20);
    }

    #[test]
    fn report_excludes_pauses_taken_during_practice() {
        let mut session = RunSession::new("box");
        session.begin_practice(3_000);
        // 25s wall span with 5s paused inside it.
        let report = session.report(28_000, 1, 5_000);
        assert_eq!(report.elapsed_secs, 20);
    }

    #[test]
    fn elapsed_rounds_to_nearest_second() {
        let mut session = RunSession::new("box");
        session.begin_practice(0);
        assert_eq!(session.report(19_499, 1, 0).elapsed_secs, 19);
        assert_eq!(session.report(19_500, 1, 0).elapsed_secs, 20);
        assert_eq!(session.report(20_400, 1, 0).elapsed_secs, 20);
    }

    #[test]
    fn minutes_seconds_splits_for_display() {
        let mut session = RunSession::new("resonance");
        session.begin_practice(0);
        let report = session.report(95_000, 5, 0);
        assert_eq!(report.minutes_seconds(), (1, 35));
    }

    #[test]
    fn run_ids_are_unique() {
        assert_ne!(RunSession::new("box").run_id(), RunSession::new("box").run_id());
    }
}
