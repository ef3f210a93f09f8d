mod clock;
pub mod motion;
mod runner;
mod sequencer;
mod session;

pub use clock::PhaseClock;
pub use runner::{run_to_completion, RunnerCommand, MAX_FPS, MIN_FPS};
pub use sequencer::{EngineState, Sequencer};
pub use session::{RunReport, RunSession};
