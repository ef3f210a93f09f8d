//! Presentation seams: the render target contract and the dispatch table.
//!
//! The engine never draws. It pushes progress and timer values through
//! [`RenderDispatch`], which routes them to whichever target is active.
//! Targets register per animation kind; a kind with no registered target
//! turns every call into a no-op, which is how headless runs work.

use std::collections::HashMap;

use crate::technique::{AnimationKind, Technique};

/// One visual surface an exercise can drive.
///
/// `update` receives canonical 0..1 progress. Any scaling a visual needs
/// (percentages, pixel offsets, eased curves) happens inside the target.
pub trait RenderTarget: Send {
    fn show(&mut self);
    fn hide(&mut self);
    /// Return the visual to its idle frame.
    fn reset(&mut self);
    /// Per-frame progress. `phase_index` selects the segment of the visual
    /// the current phase drives; `technique` carries shape metadata.
    fn update(&mut self, phase_index: usize, progress: f64, technique: &Technique);
    /// Whole-second countdown display.
    fn update_timer(&mut self, seconds: u32);
}

/// Routes engine updates to the active render target.
#[derive(Default)]
pub struct RenderDispatch {
    targets: HashMap<AnimationKind, Box<dyn RenderTarget>>,
    active: Option<AnimationKind>,
}

impl RenderDispatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the target for one animation kind, replacing any previous.
    pub fn register(&mut self, kind: AnimationKind, target: Box<dyn RenderTarget>) {
        self.targets.insert(kind, target);
    }

    /// Hide every target, then show and reset the one for `kind`.
    pub fn activate(&mut self, kind: AnimationKind) {
        for target in self.targets.values_mut() {
            target.hide();
        }
        self.active = Some(kind);
        if let Some(target) = self.targets.get_mut(&kind) {
            target.show();
            target.reset();
        }
    }

    pub fn active_kind(&self) -> Option<AnimationKind> {
        self.active
    }

    pub fn update(&mut self, phase_index: usize, progress: f64, technique: &Technique) {
        if let Some(target) = self.active_target() {
            target.update(phase_index, progress, technique);
        }
    }

    pub fn update_timer(&mut self, seconds: u32) {
        if let Some(target) = self.active_target() {
            target.update_timer(seconds);
        }
    }

    pub fn reset(&mut self) {
        if let Some(target) = self.active_target() {
            target.reset();
        }
    }

    fn active_target(&mut self) -> Option<&mut Box<dyn RenderTarget>> {
        let kind = self.active?;
        self.targets.get_mut(&kind)
    }
}

/// Target that draws nothing. Registering it mutes a kind explicitly.
pub struct NullTarget;

impl RenderTarget for NullTarget {
    fn show(&mut self) {}
    fn hide(&mut self) {}
    fn reset(&mut self) {}
    fn update(&mut self, _phase_index: usize, _progress: f64, _technique: &Technique) {}
    fn update_timer(&mut self, _seconds: u32) {}
}
