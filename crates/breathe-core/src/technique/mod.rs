mod catalog;

pub use catalog::Catalog;

use serde::{Deserialize, Serialize};

use crate::error::StartError;

/// Sub-breath count used when a power phase does not specify one.
pub const DEFAULT_SUB_BREATHS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseType {
    Inhale,
    Exhale,
    Hold,
    /// Rapid rhythmic breathing subdivided into sub-breaths.
    Power,
    /// Breath hold after the last power exhale.
    Retention,
    /// Deep recovery inhale held to the end of the phase.
    Recovery,
    /// Barely-there breathing rendered as micro-breath flutter.
    Shallow,
}

/// Which visual a technique drives during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationKind {
    Box,
    Arc,
    Belly,
    Wave,
    Power,
    Gauge,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phase {
    pub phase_type: PhaseType,
    /// Duration in seconds. Fractional durations are allowed -- resonance
    /// breathing uses 5.5 second halves.
    pub duration_secs: f64,
    /// Sub-breath count for power phases.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_breaths: Option<u32>,
}

impl Phase {
    pub fn new(phase_type: PhaseType, duration_secs: f64) -> Self {
        Self {
            phase_type,
            duration_secs,
            sub_breaths: None,
        }
    }

    /// Get phase duration in milliseconds, rounded.
    pub fn duration_ms(&self) -> u64 {
        (self.duration_secs * 1000.0).round() as u64
    }

    /// Sub-breath count, falling back to the default for power phases.
    pub fn sub_breath_count(&self) -> u32 {
        self.sub_breaths.unwrap_or(DEFAULT_SUB_BREATHS)
    }
}

/// A breathing technique: an ordered list of timed phases plus the
/// presentation metadata shown on the detail view.
///
/// Techniques are immutable once loaded. The engine clones one per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Technique {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub tagline: String,
    pub phases: Vec<Phase>,
    pub animation: AnimationKind,
    pub max_cycles: u32,
    pub default_cycles: u32,
    pub science: String,
    pub mechanism: String,
    pub steps: Vec<String>,
}

impl Technique {
    /// Seconds per full cycle (sum of phase durations).
    pub fn cycle_secs(&self) -> f64 {
        self.phases.iter().map(|p| p.duration_secs).sum()
    }

    /// Compact duration pattern, e.g. "4-7-8" or "5.5-5.5".
    pub fn pattern(&self) -> String {
        self.phases
            .iter()
            .map(|p| format_secs(p.duration_secs))
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Validate a requested cycle count against this technique's bounds.
    pub fn validate_cycles(&self, cycles: u32) -> Result<(), StartError> {
        if cycles == 0 || cycles > self.max_cycles {
            return Err(StartError::CyclesOutOfRange {
                requested: cycles,
                max: self.max_cycles,
            });
        }
        Ok(())
    }
}

fn format_secs(secs: f64) -> String {
    if secs.fract() == 0.0 {
        format!("{}", secs as u64)
    } else {
        format!("{secs}")
    }
}
