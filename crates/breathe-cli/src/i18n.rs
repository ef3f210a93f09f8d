//! Embedded interface translations.
//!
//! Locales are compiled in; `config.language` picks one and anything
//! unrecognized falls back to English. Technique descriptions live in the
//! catalog and are not translated here.

use breathe_core::PhaseType;

pub struct Locale {
    pub get_ready: &'static str,
    pub cycle: &'static str,
    pub of: &'static str,
    pub paused: &'static str,
    pub resumed: &'static str,
    pub stopped: &'static str,
    pub pause: &'static str,
    pub resume: &'static str,
    pub stop: &'static str,
    pub well_done: &'static str,
    pub completed_message: &'static str,
    pub technique: &'static str,
    pub cycles_completed: &'static str,
    pub total_time: &'static str,
    pub science: &'static str,
    pub mechanism: &'static str,
    pub steps: &'static str,
    inhale: &'static str,
    exhale: &'static str,
    hold: &'static str,
    power: &'static str,
    retention: &'static str,
    recovery: &'static str,
    shallow: &'static str,
}

impl Locale {
    pub fn phase_label(&self, phase_type: PhaseType) -> &'static str {
        match phase_type {
            PhaseType::Inhale => self.inhale,
            PhaseType::Exhale => self.exhale,
            PhaseType::Hold => self.hold,
            PhaseType::Power => self.power,
            PhaseType::Retention => self.retention,
            PhaseType::Recovery => self.recovery,
            PhaseType::Shallow => self.shallow,
        }
    }
}

static EN: Locale = Locale {
    get_ready: "Get Ready...",
    cycle: "Cycle",
    of: "of",
    paused: "Paused",
    resumed: "Resumed",
    stopped: "Stopped",
    pause: "Pause",
    resume: "Resume",
    stop: "Stop",
    well_done: "Well Done!",
    completed_message: "You've completed your breathing exercise. Take a moment to notice how you feel.",
    technique: "Technique",
    cycles_completed: "Cycles Completed",
    total_time: "Total Time",
    science: "Scientific Support",
    mechanism: "How It Works",
    steps: "Steps",
    inhale: "Inhale",
    exhale: "Exhale",
    hold: "Hold",
    power: "Power Breaths",
    retention: "Retention Hold",
    recovery: "Recovery Breath",
    shallow: "Shallow Breathing",
};

static ES: Locale = Locale {
    get_ready: "Prepárate...",
    cycle: "Ciclo",
    of: "de",
    paused: "Pausado",
    resumed: "Reanudado",
    stopped: "Detenido",
    pause: "Pausar",
    resume: "Continuar",
    stop: "Detener",
    well_done: "¡Bien Hecho!",
    completed_message: "Has completado tu ejercicio de respiración. Tómate un momento para notar cómo te sientes.",
    technique: "Técnica",
    cycles_completed: "Ciclos Completados",
    total_time: "Tiempo Total",
    science: "Respaldo Científico",
    mechanism: "Cómo Funciona",
    steps: "Pasos",
    inhale: "Inhala",
    exhale: "Exhala",
    hold: "Mantén",
    power: "Respiraciones Potentes",
    retention: "Retención",
    recovery: "Respiración de Recuperación",
    shallow: "Respiración Superficial",
};

pub fn locale(lang: &str) -> &'static Locale {
    match lang {
        "es" => &ES,
        _ => &EN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_language_falls_back_to_english() {
        assert_eq!(locale("en").get_ready, "Get Ready...");
        assert_eq!(locale("es").get_ready, "Prepárate...");
        assert_eq!(locale("fr").get_ready, "Get Ready...");
    }

    #[test]
    fn every_phase_type_has_a_label() {
        let loc = locale("es");
        assert_eq!(loc.phase_label(PhaseType::Inhale), "Inhala");
        assert_eq!(loc.phase_label(PhaseType::Retention), "Retención");
    }
}
