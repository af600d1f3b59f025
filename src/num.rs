//! Scalar numerics.

use crate::consts::EPSILON;

/// Linearly interpolates between `a` and `b`. `t` is not clamped, so values
/// outside `[0, 1]` extrapolate.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Computes the interpolation parameter that [`lerp`] would need to produce
/// `v` from `a` and `b`. Returns zero when `a` and `b` are within
/// [`EPSILON`] of each other.
#[inline]
pub fn inverse_lerp(a: f32, b: f32, v: f32) -> f32 {
    let d = b - a;
    if d.abs() < EPSILON { 0.0 } else { (v - a) / d }
}

/// Computes `n mod m` with the sign of `m`, so that negative inputs wrap
/// around instead of mirroring.
#[inline]
pub fn euclidean_modulo(n: f32, m: f32) -> f32 {
    ((n % m) + m) % m
}

/// Whether `a` and `b` differ by less than [`EPSILON`].
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn lerping_scalars_extrapolates_outside_unit_interval() {
        assert_abs_diff_eq!(lerp(1.0, 3.0, 0.5), 2.0);
        assert_abs_diff_eq!(lerp(1.0, 3.0, 2.0), 5.0);
        assert_abs_diff_eq!(lerp(1.0, 3.0, -1.0), -1.0);
    }

    #[test]
    fn inverse_lerp_inverts_lerp() {
        let t = inverse_lerp(2.0, 6.0, lerp(2.0, 6.0, 0.25));
        assert_abs_diff_eq!(t, 0.25);
    }

    #[test]
    fn inverse_lerp_with_equal_endpoints_gives_zero() {
        assert_eq!(inverse_lerp(3.0, 3.0, 10.0), 0.0);
    }

    #[test]
    fn euclidean_modulo_wraps_negative_values() {
        assert_abs_diff_eq!(euclidean_modulo(-1.0, 3.0), 2.0);
        assert_abs_diff_eq!(euclidean_modulo(7.0, 3.0), 1.0);
    }

    #[test]
    fn scalar_approx_eq_uses_strict_tolerance() {
        assert!(approx_eq(1.0, 1.0 + 0.5e-6));
        assert!(!approx_eq(1.0, 1.0 + 1e-5));
    }
}
