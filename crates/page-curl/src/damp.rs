//! Frame-rate independent damping of joint angles.

use std::f32::consts::{PI, TAU};

/// Shortest signed arc from `current` to `target`, in `(-PI, PI]`.
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let delta = (target - current).rem_euclid(TAU);
    if delta > PI { delta - TAU } else { delta }
}

/// Move `current` toward `target` with exponential smoothing.
///
/// The remaining distance decays by `exp(-2 / smooth_time * dt)` per call,
/// so the result depends only on elapsed time, never on how it was split
/// into frames, and never overshoots. Values within `epsilon` of the target
/// snap onto it. A non-positive or non-finite `dt` returns `current`
/// unchanged.
pub fn damp(current: f32, target: f32, smooth_time: f32, dt: f32, epsilon: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        return current;
    }

    let delta = target - current;
    if delta.abs() <= epsilon {
        return target;
    }

    let omega = 2.0 / smooth_time.max(0.0001);
    let decay = (-omega * dt).exp();
    target - delta * decay
}

/// [`damp`] along the shortest arc between two angles.
///
/// The returned angle is continuous with `current`; it may differ from
/// `target` by a multiple of a full turn.
pub fn damp_angle(current: f32, target: f32, smooth_time: f32, dt: f32, epsilon: f32) -> f32 {
    let goal = if (target - current).abs() <= PI {
        target
    } else {
        current + delta_angle(current, target)
    };
    damp(current, goal, smooth_time, dt, epsilon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_zero_dt_is_noop() {
        assert_eq!(damp(0.3, 1.0, 0.5, 0.0, 0.001), 0.3);
        assert_eq!(damp_angle(0.3, 1.0, 0.5, 0.0, 0.001), 0.3);
        // Even when already within the snap range
        assert_eq!(damp(0.9995, 1.0, 0.5, 0.0, 0.001), 0.9995);
    }

    #[test]
    fn test_negative_and_nan_dt_are_noops() {
        assert_eq!(damp(0.3, 1.0, 0.5, -0.016, 0.001), 0.3);
        assert_eq!(damp(0.3, 1.0, 0.5, f32::NAN, 0.001), 0.3);
    }

    #[test]
    fn test_monotonic_convergence_without_overshoot() {
        let target = FRAC_PI_2;
        let mut angle = -FRAC_PI_2;
        let mut distance = (angle - target).abs();
        for _ in 0..600 {
            angle = damp_angle(angle, target, 0.5, 1.0 / 60.0, 0.001);
            let next = (angle - target).abs();
            assert!(next <= distance);
            assert!(angle <= target);
            distance = next;
        }
        assert_eq!(angle, target);
    }

    #[test]
    fn test_frame_rate_independent() {
        let mut fine = 0.0;
        for _ in 0..8 {
            fine = damp(fine, 1.0, 0.5, 0.01, 0.0);
        }
        let coarse = damp(0.0, 1.0, 0.5, 0.08, 0.0);
        assert!((fine - coarse).abs() < 1e-5);
    }

    #[test]
    fn test_snaps_inside_epsilon() {
        assert_eq!(damp(0.9995, 1.0, 0.5, 0.016, 0.001), 1.0);
    }

    #[test]
    fn test_delta_angle_takes_shortest_arc() {
        assert!((delta_angle(0.0, FRAC_PI_2) - FRAC_PI_2).abs() < 1e-6);
        assert!((delta_angle(3.0, -3.0) - (TAU - 6.0)).abs() < 1e-5);
        assert!((delta_angle(-3.0, 3.0) + (TAU - 6.0)).abs() < 1e-5);
        assert_eq!(delta_angle(1.0, 1.0), 0.0);
    }
}
