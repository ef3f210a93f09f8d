//! Async frame loop around the sequencer.
//!
//! [`run_to_completion`] owns the only clock in the system: a paused-aware
//! [`tokio::time::Instant`] epoch sampled once per frame. The sequencer
//! itself never sees real time, which keeps it deterministic under
//! `start_paused` test runtimes.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::error::StartError;
use crate::events::Event;

use super::sequencer::{EngineState, Sequencer};
use super::session::RunReport;

pub const MIN_FPS: u32 = 10;
pub const MAX_FPS: u32 = 120;

/// Control messages a hosting frontend feeds into the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerCommand {
    Pause,
    Resume,
    /// Pause when live, resume when paused.
    Toggle,
    Stop,
}

/// Drive `sequencer` through one full run of `technique`.
///
/// Frames fire at `fps` (clamped to [`MIN_FPS`]..=[`MAX_FPS`]); missed
/// ticks are skipped rather than replayed. `on_frame` is called after
/// every frame and after every command that produced an event, with the
/// events of that step. A closed command channel reads as [`RunnerCommand::Stop`].
///
/// Resolves with the completion report, or `None` when the run was stopped.
///
/// # Errors
///
/// Returns [`StartError`] when the run cannot begin; nothing is ticked.
pub async fn run_to_completion<F>(
    sequencer: &mut Sequencer,
    technique: &crate::technique::Technique,
    cycles: u32,
    fps: u32,
    commands: &mut UnboundedReceiver<RunnerCommand>,
    mut on_frame: F,
) -> Result<Option<RunReport>, StartError>
where
    F: FnMut(&Sequencer, &[Event]),
{
    let fps = fps.clamp(MIN_FPS, MAX_FPS);
    let epoch = Instant::now();
    let mut frames = time::interval(Duration::from_millis(u64::from(1000 / fps)));
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    if let Some(event) = sequencer.start(technique, cycles, 0)? {
        on_frame(sequencer, std::slice::from_ref(&event));
    }

    let mut report = None;
    loop {
        tokio::select! {
            _ = frames.tick() => {
                let now_ms = epoch.elapsed().as_millis() as u64;
                let events = sequencer.tick(now_ms);
                if let Some(done) = events.iter().find_map(|e| match e {
                    Event::ExerciseCompleted { report, .. } => Some(report.clone()),
                    _ => None,
                }) {
                    report = Some(done);
                }
                on_frame(sequencer, &events);
            }
            command = commands.recv() => {
                let now_ms = epoch.elapsed().as_millis() as u64;
                let event = match command {
                    Some(RunnerCommand::Pause) => sequencer.pause(now_ms),
                    Some(RunnerCommand::Resume) => sequencer.resume(now_ms),
                    Some(RunnerCommand::Toggle) => {
                        if sequencer.state() == EngineState::Paused {
                            sequencer.resume(now_ms)
                        } else {
                            sequencer.pause(now_ms)
                        }
                    }
                    Some(RunnerCommand::Stop) | None => sequencer.stop(),
                };
                if let Some(event) = event {
                    on_frame(sequencer, std::slice::from_ref(&event));
                }
            }
        }
        if sequencer.state() == EngineState::Idle {
            break;
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::technique::Catalog;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn runs_a_cycle_to_completion() {
        let technique = Catalog::get("box").unwrap();
        let mut seq = Sequencer::headless();
        let (_tx, mut rx) = mpsc::unbounded_channel();

        let mut events = Vec::new();
        let report = run_to_completion(&mut seq, &technique, 1, 20, &mut rx, |_, step| {
            events.extend_from_slice(step);
        })
        .await
        .unwrap()
        .expect("natural completion yields a report");

        assert_eq!(report.technique_id, "box");
        assert_eq!(report.cycles_completed, 1);
        // Four 4s phases; the 3s countdown does not count.
        assert_eq!(report.elapsed_secs, 16);
        assert!(matches!(events.first(), Some(Event::ExerciseStarted { .. })));
        assert!(matches!(events.last(), Some(Event::ExerciseCompleted { .. })));
        assert_eq!(seq.state(), EngineState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_command_ends_the_run_without_a_report() {
        let technique = Catalog::get("box").unwrap();
        let mut seq = Sequencer::headless();
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(RunnerCommand::Stop).unwrap();

        let mut events = Vec::new();
        let report = run_to_completion(&mut seq, &technique, 2, 30, &mut rx, |_, step| {
            events.extend_from_slice(step);
        })
        .await
        .unwrap();

        assert!(report.is_none());
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::ExerciseStopped { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_pauses_then_resumes_without_losing_time() {
        let technique = Catalog::get("box").unwrap();
        let mut seq = Sequencer::headless();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let sender = tx.clone();
        tokio::spawn(async move {
            time::sleep(Duration::from_secs(5)).await;
            sender.send(RunnerCommand::Toggle).unwrap();
            time::sleep(Duration::from_secs(60)).await;
            sender.send(RunnerCommand::Toggle).unwrap();
        });

        let mut events = Vec::new();
        let report = run_to_completion(&mut seq, &technique, 1, 20, &mut rx, |_, step| {
            events.extend_from_slice(step);
        })
        .await
        .unwrap()
        .expect("run completes after the pause");

        assert!(events
            .iter()
            .any(|e| matches!(e, Event::ExercisePaused { .. })));
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::ExerciseResumed { .. })));
        // The 60s pause never reaches the report.
        assert_eq!(report.elapsed_secs, 16);
        drop(tx);
    }

    #[tokio::test(start_paused = true)]
    async fn bad_cycle_count_fails_before_the_first_frame() {
        let technique = Catalog::get("box").unwrap();
        let mut seq = Sequencer::headless();
        let (_tx, mut rx) = mpsc::unbounded_channel();

        let err = run_to_completion(&mut seq, &technique, 0, 30, &mut rx, |_, _| {})
            .await
            .unwrap_err();
        assert!(matches!(err, StartError::CyclesOutOfRange { .. }));
        assert_eq!(seq.state(), EngineState::Idle);
    }
}
