//! Terminal-bell audio cues.

use std::io::Write;

use breathe_core::{AudioSink, PhaseType, SoundConfig};

/// Rings the terminal bell for cues. Phase chimes fire on the slow,
/// even-paced phase types; power breathing and its recovery phases stay
/// silent so the bell never races the pattern.
pub struct BellAudio {
    sound: SoundConfig,
}

impl BellAudio {
    pub fn new(sound: SoundConfig) -> Self {
        Self { sound }
    }

    fn ring(&self) {
        let mut out = std::io::stdout();
        let _ = out.write_all(b"\x07");
        let _ = out.flush();
    }
}

impl AudioSink for BellAudio {
    fn play_phase(&self, phase_type: PhaseType) {
        if !self.sound.enabled {
            return;
        }
        if matches!(
            phase_type,
            PhaseType::Inhale | PhaseType::Exhale | PhaseType::Hold
        ) {
            self.ring();
        }
    }

    fn play_tick(&self) {
        if self.sound.enabled && self.sound.tick {
            self.ring();
        }
    }

    fn play_complete(&self) {
        if self.sound.enabled {
            self.ring();
        }
    }
}
