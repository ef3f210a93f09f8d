use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::RunReport;
use crate::technique::PhaseType;

/// Every observable moment of a run produces an Event.
/// Presentation layers consume these; nothing feeds back into the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A run was accepted and the pre-roll countdown began.
    ExerciseStarted {
        technique_id: String,
        total_cycles: u32,
        at: DateTime<Utc>,
    },
    /// Pre-roll countdown advanced (3, 2, 1).
    CountdownTick {
        remaining: u32,
        at: DateTime<Utc>,
    },
    PhaseStarted {
        cycle: u32,
        phase_index: usize,
        phase_type: PhaseType,
        duration_secs: f64,
        at: DateTime<Utc>,
    },
    /// The in-phase countdown display changed to a new whole second.
    TimerTick {
        seconds_left: u32,
        at: DateTime<Utc>,
    },
    PhaseCompleted {
        cycle: u32,
        phase_index: usize,
        phase_type: PhaseType,
        at: DateTime<Utc>,
    },
    CycleCompleted {
        cycle: u32,
        at: DateTime<Utc>,
    },
    ExercisePaused {
        at: DateTime<Utc>,
    },
    ExerciseResumed {
        at: DateTime<Utc>,
    },
    /// The run was discarded before finishing. No report is produced.
    ExerciseStopped {
        at: DateTime<Utc>,
    },
    /// All cycles finished naturally.
    ExerciseCompleted {
        report: RunReport,
        at: DateTime<Utc>,
    },
}
