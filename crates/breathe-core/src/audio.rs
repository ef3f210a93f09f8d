//! Audio cue seam.
//!
//! Cues are fire-and-forget: the engine requests them and never learns
//! whether anything was heard. A sink that cannot play stays quiet; there
//! is no error path from sound.

use crate::technique::PhaseType;

pub trait AudioSink: Send {
    /// Cue for the start of a phase. Sinks choose their own mapping; a
    /// phase type may be silent.
    fn play_phase(&self, phase_type: PhaseType);
    /// Once-per-second countdown tick.
    fn play_tick(&self);
    /// End-of-run chime.
    fn play_complete(&self);
}

/// Sink that plays nothing.
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_phase(&self, _phase_type: PhaseType) {}
    fn play_tick(&self) {}
    fn play_complete(&self) {}
}
