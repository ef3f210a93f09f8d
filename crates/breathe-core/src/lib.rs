//! # Breathe Core Library
//!
//! This library provides the core logic for Breathe, a guided breathing
//! exercise timer. It implements a CLI-first philosophy where the engine is
//! a plain library any frontend can drive: the bundled terminal UI, a line
//! printer, and tests all sit on the same seams.
//!
//! ## Architecture
//!
//! - **Engine**: A wall-clock-based phase sequencer that requires the caller
//!   to periodically invoke `tick()` for progress updates
//! - **Techniques**: Built-in catalog of breathing patterns with per-phase
//!   durations and animation pairings
//! - **Presentation seams**: Traits for render targets, audio cues, and
//!   system wake locks; events for everything discrete
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`Sequencer`]: Core phase-timing state machine
//! - [`run_to_completion`]: Async frame loop that drives a sequencer
//! - [`Catalog`]: Built-in breathing techniques
//! - [`Config`]: Application configuration management

pub mod audio;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod render;
pub mod technique;
pub mod wake;

pub use audio::{AudioSink, NullAudio};
pub use config::{Config, DisplayConfig, SoundConfig};
pub use engine::{
    run_to_completion, EngineState, PhaseClock, RunReport, RunSession, RunnerCommand, Sequencer,
    MAX_FPS, MIN_FPS,
};
pub use error::{ConfigError, CoreError, Result, StartError};
pub use events::Event;
pub use render::{NullTarget, RenderDispatch, RenderTarget};
pub use technique::{AnimationKind, Catalog, Phase, PhaseType, Technique};
pub use wake::{KeepAwake, NoKeepAwake, WakeGuard};
