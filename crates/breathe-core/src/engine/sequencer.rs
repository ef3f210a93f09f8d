//! Exercise sequencing: countdown, phases, cycles, completion.
//!
//! The sequencer is a caller-ticked state machine. It owns no clock and no
//! threads; a hosting loop calls [`Sequencer::tick`] with milliseconds from
//! any monotonic source and the machine advances exactly as far as that
//! timestamp justifies. Per-frame output flows through the render dispatch
//! and audio sink it owns; discrete moments come back as [`Event`] values.
//!
//! Only a malformed start request is an error. Commands that do not apply
//! to the current state (pausing outside a timed phase, starting twice)
//! are silent no-ops logged at debug level.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::audio::{AudioSink, NullAudio};
use crate::error::StartError;
use crate::events::Event;
use crate::render::RenderDispatch;
use crate::technique::{Phase, Technique};
use crate::wake::{KeepAwake, NoKeepAwake, WakeGuard};

use super::clock::PhaseClock;
use super::session::{RunReport, RunSession};

/// Pre-roll countdown length.
const COUNTDOWN_SECS: f64 = 3.0;
/// Breather between cycles. Cosmetic: part of no phase's accounting.
const CYCLE_REST_MS: u64 = 500;

/// Observable engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    Idle,
    /// Pre-roll countdown before the first phase.
    CountingDown,
    Active,
    Paused,
}

/// Where inside a live run the machine is. Pause is orthogonal: a paused
/// run keeps its stage and resumes into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Countdown,
    Phase,
    CycleRest,
}

struct RunState {
    technique: Technique,
    total_cycles: u32,
    /// 1-based.
    cycle: u32,
    phase_index: usize,
    stage: Stage,
    paused: bool,
    clock: PhaseClock,
    session: RunSession,
    /// Last whole-second value pushed to the timer display.
    displayed_secs: u32,
    /// Held for the whole run; dropping it releases the platform lock.
    _wake: Option<Box<dyn WakeGuard>>,
}

pub struct Sequencer {
    dispatch: RenderDispatch,
    audio: Box<dyn AudioSink>,
    keep_awake: Box<dyn KeepAwake>,
    run: Option<RunState>,
    last_report: Option<RunReport>,
}

impl Sequencer {
    pub fn new(
        dispatch: RenderDispatch,
        audio: Box<dyn AudioSink>,
        keep_awake: Box<dyn KeepAwake>,
    ) -> Self {
        Self {
            dispatch,
            audio,
            keep_awake,
            run: None,
            last_report: None,
        }
    }

    /// Sequencer with no presentation attached. Frames go nowhere; the
    /// event stream still tells the whole story.
    pub fn headless() -> Self {
        Self::new(
            RenderDispatch::new(),
            Box::new(NullAudio),
            Box::new(NoKeepAwake),
        )
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> EngineState {
        match &self.run {
            None => EngineState::Idle,
            Some(run) if run.paused => EngineState::Paused,
            Some(run) if run.stage == Stage::Countdown => EngineState::CountingDown,
            Some(_) => EngineState::Active,
        }
    }

    /// Current cycle, 1-based, while a run is live.
    pub fn current_cycle(&self) -> Option<u32> {
        self.run.as_ref().map(|run| run.cycle)
    }

    pub fn total_cycles(&self) -> Option<u32> {
        self.run.as_ref().map(|run| run.total_cycles)
    }

    /// The phase being timed right now. None during countdown and rest.
    pub fn current_phase(&self) -> Option<&Phase> {
        let run = self.run.as_ref()?;
        if run.stage == Stage::Phase {
            run.technique.phases.get(run.phase_index)
        } else {
            None
        }
    }

    pub fn technique(&self) -> Option<&Technique> {
        self.run.as_ref().map(|run| &run.technique)
    }

    /// Report from the most recent naturally-completed run.
    pub fn last_report(&self) -> Option<&RunReport> {
        self.last_report.as_ref()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a run: validate the cycle count, acquire the wake lock,
    /// activate the technique's render target and push the pre-roll timer.
    ///
    /// Starting while a run is live is ignored and returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`StartError::CyclesOutOfRange`] when `cycles` is zero or
    /// above the technique's maximum. Nothing changes on error.
    pub fn start(
        &mut self,
        technique: &Technique,
        cycles: u32,
        now_ms: u64,
    ) -> Result<Option<Event>, StartError> {
        if self.run.is_some() {
            tracing::debug!("start ignored: a run is already live");
            return Ok(None);
        }
        technique.validate_cycles(cycles)?;

        let mut clock = PhaseClock::new();
        clock.start_phase(now_ms);
        self.dispatch.activate(technique.animation);
        self.dispatch.update_timer(COUNTDOWN_SECS as u32);
        self.run = Some(RunState {
            session: RunSession::new(&technique.id),
            technique: technique.clone(),
            total_cycles: cycles,
            cycle: 1,
            phase_index: 0,
            stage: Stage::Countdown,
            paused: false,
            clock,
            displayed_secs: COUNTDOWN_SECS as u32,
            _wake: self.keep_awake.acquire(),
        });
        tracing::debug!(technique = %technique.id, cycles, "run started");
        Ok(Some(Event::ExerciseStarted {
            technique_id: technique.id.clone(),
            total_cycles: cycles,
            at: Utc::now(),
        }))
    }

    /// Advance to `now_ms`, returning every discrete event the step
    /// produced. Per-frame progress goes straight to the render dispatch
    /// and is not an event. Ticking while idle or paused does nothing.
    pub fn tick(&mut self, now_ms: u64) -> Vec<Event> {
        let mut events = Vec::new();
        let finished = {
            let Some(run) = self.run.as_mut() else {
                return events;
            };
            if run.paused {
                return events;
            }
            match run.stage {
                Stage::Countdown => advance_countdown(
                    run,
                    &mut self.dispatch,
                    self.audio.as_ref(),
                    now_ms,
                    &mut events,
                ),
                Stage::Phase => advance_phase(
                    run,
                    &mut self.dispatch,
                    self.audio.as_ref(),
                    now_ms,
                    &mut events,
                ),
                Stage::CycleRest => advance_rest(
                    run,
                    &mut self.dispatch,
                    self.audio.as_ref(),
                    now_ms,
                    &mut events,
                ),
            }
        };

        if finished {
            if let Some(run) = self.run.take() {
                let report =
                    run.session
                        .report(now_ms, run.total_cycles, run.clock.total_paused_ms());
                self.audio.play_complete();
                self.last_report = Some(report.clone());
                events.push(Event::ExerciseCompleted {
                    report,
                    at: Utc::now(),
                });
            }
        }
        events
    }

    /// Freeze the phase being timed. Valid only while a phase is active
    /// and unpaused; during the countdown or the cycle rest the command is
    /// dropped and the schedule keeps moving.
    pub fn pause(&mut self, now_ms: u64) -> Option<Event> {
        match self.run.as_mut() {
            Some(run) if run.stage == Stage::Phase && !run.paused => {
                run.clock.pause(now_ms);
                run.paused = true;
                Some(Event::ExercisePaused { at: Utc::now() })
            }
            _ => {
                tracing::debug!("pause ignored: no phase is being timed");
                None
            }
        }
    }

    /// Unfreeze a paused run, re-anchoring its clock at `now_ms`.
    pub fn resume(&mut self, now_ms: u64) -> Option<Event> {
        match self.run.as_mut() {
            Some(run) if run.paused => {
                run.clock.resume(now_ms);
                run.paused = false;
                Some(Event::ExerciseResumed { at: Utc::now() })
            }
            _ => {
                tracing::debug!("resume ignored: nothing is paused");
                None
            }
        }
    }

    /// Abandon the run. The render target returns to its idle frame, the
    /// wake lock is released and no report is produced; ticks arriving
    /// after this find an idle engine.
    pub fn stop(&mut self) -> Option<Event> {
        match self.run.take() {
            Some(_) => {
                self.dispatch.reset();
                Some(Event::ExerciseStopped { at: Utc::now() })
            }
            None => {
                tracing::debug!("stop ignored: already idle");
                None
            }
        }
    }
}

// ── Stage stepping ───────────────────────────────────────────────────

fn advance_countdown(
    run: &mut RunState,
    dispatch: &mut RenderDispatch,
    audio: &dyn AudioSink,
    now_ms: u64,
    events: &mut Vec<Event>,
) -> bool {
    let left = run.clock.countdown_secs(now_ms, COUNTDOWN_SECS);
    if left == 0 {
        run.session.begin_practice(now_ms);
        begin_phase(run, dispatch, audio, now_ms, events);
    } else if left != run.displayed_secs {
        run.displayed_secs = left;
        dispatch.update_timer(left);
        events.push(Event::CountdownTick {
            remaining: left,
            at: Utc::now(),
        });
    }
    false
}

/// Returns true when the whole run just finished.
fn advance_phase(
    run: &mut RunState,
    dispatch: &mut RenderDispatch,
    audio: &dyn AudioSink,
    now_ms: u64,
    events: &mut Vec<Event>,
) -> bool {
    let phase = &run.technique.phases[run.phase_index];
    let (duration_secs, duration_ms, phase_type) =
        (phase.duration_secs, phase.duration_ms(), phase.phase_type);

    let left = run.clock.countdown_secs(now_ms, duration_secs);
    if left != run.displayed_secs && left > 0 {
        run.displayed_secs = left;
        dispatch.update_timer(left);
        audio.play_tick();
        events.push(Event::TimerTick {
            seconds_left: left,
            at: Utc::now(),
        });
    }

    let progress = run.clock.progress(now_ms, duration_ms);
    if progress < 1.0 {
        dispatch.update(run.phase_index, progress, &run.technique);
        return false;
    }

    // Land the final frame before anything advances.
    dispatch.update(run.phase_index, 1.0, &run.technique);
    events.push(Event::PhaseCompleted {
        cycle: run.cycle,
        phase_index: run.phase_index,
        phase_type,
        at: Utc::now(),
    });

    if run.phase_index + 1 < run.technique.phases.len() {
        run.phase_index += 1;
        begin_phase(run, dispatch, audio, now_ms, events);
        return false;
    }

    events.push(Event::CycleCompleted {
        cycle: run.cycle,
        at: Utc::now(),
    });
    if run.cycle >= run.total_cycles {
        return true;
    }
    run.cycle += 1;
    run.phase_index = 0;
    run.stage = Stage::CycleRest;
    run.clock.start_phase(now_ms);
    false
}

fn advance_rest(
    run: &mut RunState,
    dispatch: &mut RenderDispatch,
    audio: &dyn AudioSink,
    now_ms: u64,
    events: &mut Vec<Event>,
) -> bool {
    if run.clock.elapsed(now_ms) >= CYCLE_REST_MS {
        dispatch.reset();
        begin_phase(run, dispatch, audio, now_ms, events);
    }
    false
}

fn begin_phase(
    run: &mut RunState,
    dispatch: &mut RenderDispatch,
    audio: &dyn AudioSink,
    now_ms: u64,
    events: &mut Vec<Event>,
) {
    run.stage = Stage::Phase;
    run.clock.start_phase(now_ms);
    let phase = &run.technique.phases[run.phase_index];
    let (duration_secs, phase_type) = (phase.duration_secs, phase.phase_type);
    run.displayed_secs = duration_secs.ceil() as u32;
    dispatch.update_timer(run.displayed_secs);
    audio.play_phase(phase_type);
    events.push(Event::PhaseStarted {
        cycle: run.cycle,
        phase_index: run.phase_index,
        phase_type,
        duration_secs,
        at: Utc::now(),
    });
}
