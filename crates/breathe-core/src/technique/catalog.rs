//! The built-in technique catalog.
//!
//! Six techniques ship with the application. The catalog is constructed on
//! demand and never mutated; lookups go through [`Catalog::get`].

use crate::error::StartError;

use super::{AnimationKind, Phase, PhaseType, Technique};

pub struct Catalog;

impl Catalog {
    /// All built-in techniques in display order.
    pub fn builtin() -> Vec<Technique> {
        vec![
            Technique {
                id: "box".into(),
                name: "Box Breathing".into(),
                icon: "\u{1F532}".into(),
                color: "#64b5f6".into(),
                tagline: "Square Breathing - Used by Navy SEALs".into(),
                phases: vec![
                    Phase::new(PhaseType::Inhale, 4.0),
                    Phase::new(PhaseType::Hold, 4.0),
                    Phase::new(PhaseType::Exhale, 4.0),
                    Phase::new(PhaseType::Hold, 4.0),
                ],
                animation: AnimationKind::Box,
                max_cycles: 10,
                default_cycles: 4,
                science: "Utilized by Navy SEALs for \"arousal control.\" A 2023 study \
                          indicated it effectively balances the Autonomic Nervous System \
                          (ANS) and improves performance under stress."
                    .into(),
                mechanism: "The symmetrical \"box\" shape creates a steady rhythm that \
                            prevents the heart from spiking during high-pressure \
                            transitions. The equal duration phases help synchronize \
                            breath with heart rate variability."
                    .into(),
                steps: vec![
                    "Inhale through the nose for 4 seconds".into(),
                    "Hold the air in for 4 seconds".into(),
                    "Exhale through the mouth for 4 seconds".into(),
                    "Hold with empty lungs for 4 seconds".into(),
                    "Repeat for 4 to 10 cycles".into(),
                ],
            },
            Technique {
                id: "four-seven-eight".into(),
                name: "4-7-8 Technique".into(),
                icon: "\u{1F319}".into(),
                color: "#9c7cf4".into(),
                tagline: "The \"Nervous System Reset\"".into(),
                phases: vec![
                    Phase::new(PhaseType::Inhale, 4.0),
                    Phase::new(PhaseType::Hold, 7.0),
                    Phase::new(PhaseType::Exhale, 8.0),
                ],
                animation: AnimationKind::Arc,
                max_cycles: 8,
                default_cycles: 4,
                science: "A 2022 study in Physiological Reports suggests that the 4-7-8 \
                          ratio specifically increases High-Frequency Power in Heart Rate \
                          Variability (HRV), indicating a sharp rise in parasympathetic \
                          (rest-and-digest) activity."
                    .into(),
                mechanism: "The 7-second hold allows for a temporary increase in CO2 in \
                            the blood, which dilates the blood vessels and lowers blood \
                            pressure. The 8-second exhale stimulates the Vagus nerve to \
                            slow the heart rate."
                    .into(),
                steps: vec![
                    "Place tongue tip against ridge behind upper front teeth".into(),
                    "Inhale quietly through the nose for 4 seconds".into(),
                    "Hold breath for 7 seconds".into(),
                    "Exhale forcefully through mouth (make a \"whoosh\" sound) for 8 seconds"
                        .into(),
                    "Repeat for 4 breaths initially; never exceed 8 cycles per session".into(),
                ],
            },
            Technique {
                id: "diaphragmatic".into(),
                name: "Diaphragmatic Breathing".into(),
                icon: "\u{1FAC1}".into(),
                color: "#4db6ac".into(),
                tagline: "Belly Breathing - Reduce Stress & Cortisol".into(),
                phases: vec![
                    Phase::new(PhaseType::Inhale, 5.0),
                    Phase::new(PhaseType::Exhale, 5.0),
                ],
                animation: AnimationKind::Belly,
                max_cycles: 12,
                default_cycles: 6,
                science: "Research published by The Cleveland Clinic and Johns Hopkins \
                          confirms this technique reduces cortisol levels and improves \
                          core stability. Studies show it activates the parasympathetic \
                          nervous system effectively."
                    .into(),
                mechanism: "By engaging the diaphragm rather than the chest, you optimize \
                            oxygen exchange and reduce the \"work of breathing,\" \
                            signaling to the brain that the body is safe. This triggers \
                            the relaxation response."
                    .into(),
                steps: vec![
                    "Lie on your back or sit with a straight spine".into(),
                    "Place one hand on your chest and the other on your belly".into(),
                    "Inhale through the nose, making your belly rise while chest stays still"
                        .into(),
                    "Exhale through pursed lips as if blowing through a straw".into(),
                    "Feel the belly sink as you exhale completely".into(),
                    "Practice for 5-10 minutes (6-12 cycles)".into(),
                ],
            },
            Technique {
                id: "resonance".into(),
                name: "Resonance Frequency".into(),
                icon: "\u{1F30A}".into(),
                color: "#7986cb".into(),
                tagline: "Coherent Breathing - Maximize HRV".into(),
                phases: vec![
                    Phase::new(PhaseType::Inhale, 5.5),
                    Phase::new(PhaseType::Exhale, 5.5),
                ],
                animation: AnimationKind::Wave,
                max_cycles: 20,
                default_cycles: 10,
                science: "Systematic reviews in Scientific Reports show this is the \
                          optimal rate to maximize Heart Rate Variability (HRV) and \
                          synchronize the heart and lungs for peak autonomic balance."
                    .into(),
                mechanism: "Most adults have a \"resonant frequency\" at approximately 5.5 \
                            to 6 breaths per minute. This timing maximizes the efficiency \
                            of the baroreflex (the body's blood pressure control system), \
                            creating coherence between cardiovascular and respiratory \
                            rhythms."
                    .into(),
                steps: vec![
                    "Sit or lie in a comfortable position".into(),
                    "Inhale smoothly through the nose for 5.5 seconds".into(),
                    "Exhale smoothly through the nose or mouth for 5.5 seconds".into(),
                    "Maintain a continuous flow with no pauses at top or bottom".into(),
                    "Keep the breath gentle and effortless".into(),
                    "Practice for 10-20 minutes for optimal HRV benefits".into(),
                ],
            },
            Technique {
                id: "wim-hof".into(),
                name: "Wim Hof Method".into(),
                icon: "\u{1F525}".into(),
                color: "#ff7043".into(),
                tagline: "Cyclic Hyperventilation - Boost Immunity".into(),
                phases: vec![
                    Phase {
                        phase_type: PhaseType::Power,
                        duration_secs: 45.0,
                        sub_breaths: Some(30),
                    },
                    Phase::new(PhaseType::Retention, 60.0),
                    Phase::new(PhaseType::Recovery, 15.0),
                ],
                animation: AnimationKind::Power,
                max_cycles: 4,
                default_cycles: 3,
                science: "A 2024 systematic review in PLOS ONE confirmed that this method \
                          significantly increases epinephrine (adrenaline) and \
                          Interleukin-10 (an anti-inflammatory cytokine), while reducing \
                          pro-inflammatory markers."
                    .into(),
                mechanism: "Controlled hyperventilation followed by a hold creates a \
                            \"hormetic\" (beneficial) stress response that \"trains\" the \
                            immune system. This activates the sympathetic nervous system \
                            and releases endogenous opioids."
                    .into(),
                steps: vec![
                    "Take 30 deep, rhythmic breaths (fully in, naturally out)".into(),
                    "After the last exhale, hold your breath as long as comfortable".into(),
                    "When you feel the urge to breathe, take a deep inhale".into(),
                    "Hold that recovery breath for 15 seconds".into(),
                    "This completes one round - repeat for 3 rounds".into(),
                    "Never practice in water or while driving!".into(),
                ],
            },
            Technique {
                id: "buteyko".into(),
                name: "Buteyko Control Pause".into(),
                icon: "\u{1F3AF}".into(),
                color: "#26a69a".into(),
                tagline: "CO2 Tolerance - Respiratory Efficiency".into(),
                phases: vec![
                    Phase::new(PhaseType::Inhale, 3.0),
                    Phase::new(PhaseType::Exhale, 3.0),
                    Phase::new(PhaseType::Hold, 20.0),
                    Phase::new(PhaseType::Shallow, 30.0),
                ],
                animation: AnimationKind::Gauge,
                max_cycles: 6,
                default_cycles: 4,
                science: "Extensively studied for asthma and respiratory efficiency. \
                          Clinical trials show it reduces reliance on rescue inhalers and \
                          improves CO2 tolerance, with significant improvements in \
                          quality of life for respiratory conditions."
                    .into(),
                mechanism: "Increases the \"Control Pause\" (CP), the time you can \
                            comfortably hold your breath, which reflects your body's \
                            sensitivity to CO2. By practicing light, nasal breathing, you \
                            retrain your breathing pattern to be more efficient."
                    .into(),
                steps: vec![
                    "Take a small, gentle breath in through your nose".into(),
                    "Release a small, gentle breath out".into(),
                    "Pinch your nose and hold until you feel the first urge to breathe".into(),
                    "This measures your Control Pause (CP) baseline".into(),
                    "Then breathe lightly through the nose with a \"slight air hunger\"".into(),
                    "Maintain shallow breathing for 30 seconds to build CO2 tolerance".into(),
                ],
            },
        ]
    }

    /// Look up a technique by id.
    ///
    /// # Errors
    ///
    /// Returns `StartError::UnknownTechnique` if no built-in matches.
    pub fn get(id: &str) -> Result<Technique, StartError> {
        Self::builtin()
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| StartError::UnknownTechnique(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_6_techniques() {
        assert_eq!(Catalog::builtin().len(), 6);
    }

    #[test]
    fn box_breathing_is_symmetric() {
        let t = Catalog::get("box").unwrap();
        assert_eq!(t.phases.len(), 4);
        assert!(t.phases.iter().all(|p| p.duration_secs == 4.0));
        assert_eq!(t.cycle_secs(), 16.0);
    }

    #[test]
    fn wim_hof_power_phase_has_sub_breaths() {
        let t = Catalog::get("wim-hof").unwrap();
        assert_eq!(t.phases[0].phase_type, PhaseType::Power);
        assert_eq!(t.phases[0].sub_breaths, Some(30));
        assert_eq!(t.cycle_secs(), 45.0 + 60.0 + 15.0);
    }

    #[test]
    fn buteyko_ends_in_shallow_breathing() {
        let t = Catalog::get("buteyko").unwrap();
        assert_eq!(t.phases.last().unwrap().phase_type, PhaseType::Shallow);
        assert_eq!(t.cycle_secs(), 3.0 + 3.0 + 20.0 + 30.0);
    }

    #[test]
    fn default_cycles_within_max() {
        for t in Catalog::builtin() {
            assert!(t.default_cycles >= 1, "{}", t.id);
            assert!(t.default_cycles <= t.max_cycles, "{}", t.id);
            assert!(!t.phases.is_empty(), "{}", t.id);
        }
    }

    #[test]
    fn unknown_id_is_rejected() {
        let err = Catalog::get("alternate-nostril").unwrap_err();
        assert_eq!(
            err,
            StartError::UnknownTechnique("alternate-nostril".into())
        );
    }
}
