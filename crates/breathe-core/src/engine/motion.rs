//! Progress shaping for phase visuals.
//!
//! Phase progress is canonically 0..1. Power and shallow phases subdivide
//! that interval into sub-breaths and re-normalize within each one; the
//! easing curves smooth whole-phase motion for the circle and wave visuals.

/// Micro-breath count for shallow phases.
pub const SHALLOW_MICRO_BREATHS: u32 = 10;

/// Raised-cosine ease, symmetric about the midpoint.
pub fn ease_in_out_sine(t: f64) -> f64 {
    -((std::f64::consts::PI * t).cos() - 1.0) / 2.0
}

/// Fast start, gentle landing.
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// 1-based sub-breath counter for a power phase.
///
/// Clamped to `sub_breaths` so the display never overruns at progress 1.0.
pub fn breath_number(progress: f64, sub_breaths: u32) -> u32 {
    let n = ((progress * sub_breaths as f64).floor() as u32).saturating_add(1);
    n.min(sub_breaths.max(1))
}

/// Pulse intensity 0..1 within the current power sub-breath.
///
/// Each sub-breath rises over its first 60% and falls over the last 40%,
/// giving the quick-in / relaxed-out shape of a power breath.
pub fn power_pulse(progress: f64, sub_breaths: u32) -> f64 {
    let local = (progress * sub_breaths.max(1) as f64).fract();
    if local < 0.6 {
        local / 0.6
    } else {
        (1.0 - local) / 0.4
    }
}

/// Flutter intensity 0..1 for a shallow phase.
///
/// Ten symmetric micro-breaths: triangular rise over the first half of each
/// micro-cycle, fall over the second.
pub fn shallow_flutter(progress: f64) -> f64 {
    let local = (progress * SHALLOW_MICRO_BREATHS as f64).fract();
    if local < 0.5 {
        local * 2.0
    } else {
        (1.0 - local) * 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn sine_ease_hits_endpoints_and_midpoint() {
        assert!(ease_in_out_sine(0.0).abs() < EPS);
        assert!((ease_in_out_sine(0.5) - 0.5).abs() < EPS);
        assert!((ease_in_out_sine(1.0) - 1.0).abs() < EPS);
    }

    #[test]
    fn cubic_ease_hits_endpoints() {
        assert!(ease_out_cubic(0.0).abs() < EPS);
        assert!((ease_out_cubic(1.0) - 1.0).abs() < EPS);
        // Front-loaded: well past half by the midpoint.
        assert!(ease_out_cubic(0.5) > 0.8);
    }

    #[test]
    fn breath_number_counts_half_way_through_30() {
        assert_eq!(breath_number(0.5, 30), 16);
    }

    #[test]
    fn breath_number_clamps_at_the_end() {
        assert_eq!(breath_number(0.0, 30), 1);
        assert_eq!(breath_number(1.0, 30), 30);
        assert_eq!(breath_number(0.999, 30), 30);
    }

    #[test]
    fn power_pulse_peaks_at_60_percent_of_sub_breath() {
        // One sub-breath spans 1/30 of phase progress.
        let sub = 1.0 / 30.0;
        assert!(power_pulse(0.0, 30).abs() < EPS);
        assert!((power_pulse(sub * 0.6, 30) - 1.0).abs() < 1e-6);
        assert!(power_pulse(sub * 0.9999, 30) < 0.01);
    }

    #[test]
    fn shallow_flutter_is_triangular() {
        let micro = 1.0 / SHALLOW_MICRO_BREATHS as f64;
        assert!(shallow_flutter(0.0).abs() < EPS);
        assert!((shallow_flutter(micro * 0.5) - 1.0).abs() < 1e-6);
        assert!((shallow_flutter(micro * 0.25) - 0.5).abs() < 1e-6);
        assert!((shallow_flutter(micro * 0.75) - 0.5).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn pulse_and_flutter_stay_in_unit_interval(p in 0.0f64..1.0) {
            let pulse = power_pulse(p, 30);
            prop_assert!((0.0..=1.0).contains(&pulse));
            let flutter = shallow_flutter(p);
            prop_assert!((0.0..=1.0).contains(&flutter));
        }

        #[test]
        fn breath_number_never_exceeds_count(p in 0.0f64..=1.0, n in 1u32..200) {
            let b = breath_number(p, n);
            prop_assert!(b >= 1);
            prop_assert!(b <= n);
        }
    }
}
