// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Scalar helpers shared by the vector, matrix and quaternion types.
//!
//! Angles are radians unless a name says otherwise. Normalized angles live in
//! `[-π, π)`; "positive" normalized angles live in `[0, 2π)`.

use core::f32::consts::{PI, TAU};

/// Degeneracy threshold used across the kernel.
///
/// Lengths, sines and direction components at or below this value are
/// treated as zero by the operations that document a fallback.
pub const EPSILON: f32 = 1e-5;

/// Iteration cap for the polar decompositions behind `extract_rotation`.
pub const POLAR_MAX_ITERATIONS: usize = 10;

/// Clamps `value` to the inclusive `[min, max]` range.
///
/// # Panics
/// Panics in debug builds if `min > max`.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    debug_assert!(min <= max, "invalid clamp range: {min} > {max}");
    value.max(min).min(max)
}

/// Linear interpolation: `a` at `t = 0`, `b` at `t = 1`, unclamped.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Converts degrees to radians.
pub fn deg_to_rad(value: f32) -> f32 {
    value * (TAU / 360.0)
}

/// Converts radians to degrees.
pub fn rad_to_deg(value: f32) -> f32 {
    value * (360.0 / TAU)
}

/// Returns `true` when `a` and `b` differ by at most [`EPSILON`].
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= EPSILON
}

/// Square root that carries the sign of its argument: `-sqrt(-x)` for
/// negative `x`.
pub fn signed_sqrt(value: f32) -> f32 {
    if value < 0.0 {
        -(-value).sqrt()
    } else {
        value.sqrt()
    }
}

/// `acos` with its argument clamped to `[-1, 1]`, so rounding overshoot
/// from a dot product cannot produce NaN.
pub fn acos_clamped(value: f32) -> f32 {
    value.clamp(-1.0, 1.0).acos()
}

/// `asin` with its argument clamped to `[-1, 1]`.
pub fn asin_clamped(value: f32) -> f32 {
    value.clamp(-1.0, 1.0).asin()
}

/// Wraps `angle` into `[-π, π)`.
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid can round up to TAU for inputs just below a multiple of it.
    if wrapped >= PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Wraps `angle` into `[0, 2π)`.
pub fn normalize_angle_positive(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Signed shortest rotation from `from` to `to`, in `[-π, π)`.
pub fn angular_difference(to: f32, from: f32) -> f32 {
    normalize_angle(to - from)
}

/// Absolute shortest distance between two angles, in `[0, π]`.
pub fn angular_distance(a: f32, b: f32) -> f32 {
    angular_difference(a, b).abs()
}

/// Interpolates between two angles along the shortest arc; the result is
/// normalized to `[-π, π)`.
pub fn lerp_angle(from: f32, to: f32, t: f32) -> f32 {
    normalize_angle(from + t * angular_difference(to, from))
}

/// Reflects an angle about the Y axis (`π - angle`), normalized.
pub fn mirror_angle(angle: f32) -> f32 {
    normalize_angle(PI - angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::FRAC_PI_2;

    #[test]
    fn normalize_angle_wraps_into_half_open_range() {
        assert_eq!(normalize_angle(PI), -PI);
        assert!((normalize_angle(-FRAC_PI_2) + FRAC_PI_2).abs() < 1e-6);
        assert!((normalize_angle(TAU + 0.25) - 0.25).abs() < 1e-5);
        for i in -20..20 {
            let a = normalize_angle(i as f32 * 0.77);
            assert!((-PI..PI).contains(&a), "{a} out of range");
        }
    }

    #[test]
    fn positive_normalization_is_non_negative() {
        assert!((normalize_angle_positive(-FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < 1e-5);
        assert_eq!(normalize_angle_positive(0.0), 0.0);
    }

    #[test]
    fn angular_difference_takes_short_way_round() {
        let d = angular_difference(deg_to_rad(10.0), deg_to_rad(350.0));
        assert!((d - deg_to_rad(20.0)).abs() < 1e-5);
        assert!((angular_distance(deg_to_rad(350.0), deg_to_rad(10.0)) - deg_to_rad(20.0)).abs() < 1e-5);
    }

    #[test]
    fn lerp_angle_crosses_the_seam() {
        let mid = lerp_angle(deg_to_rad(170.0), deg_to_rad(-170.0), 0.5);
        assert!((mid.abs() - PI).abs() < 1e-5, "mid = {mid}");
    }

    #[test]
    fn clamped_inverse_trig_never_returns_nan() {
        assert_eq!(acos_clamped(1.000_001), 0.0);
        assert!((asin_clamped(-1.5) + FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn signed_sqrt_keeps_sign() {
        assert_eq!(signed_sqrt(4.0), 2.0);
        assert_eq!(signed_sqrt(-9.0), -3.0);
    }
}
