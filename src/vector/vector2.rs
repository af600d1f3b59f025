//! 2-dimensional vectors.

use super::Vector3;
use crate::matrix::{Matrix3, Matrix4};
use bytemuck::{Pod, Zeroable};
use std::fmt;

/// A 2-dimensional vector.
#[repr(C)]
#[derive(Clone, Copy, Default, PartialEq, Zeroable, Pod)]
pub struct Vector2 {
    elements: [f32; 2],
}

impl Vector2 {
    /// Creates a new vector with the given components.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { elements: [x, y] }
    }

    /// The x-axis unit vector.
    #[inline]
    pub const fn unit_x() -> Self {
        Self::new(1.0, 0.0)
    }

    /// The y-axis unit vector.
    #[inline]
    pub const fn unit_y() -> Self {
        Self::new(0.0, 1.0)
    }

    /// The x-component.
    #[inline]
    pub fn x(&self) -> f32 {
        self.elements[0]
    }

    /// The y-component.
    #[inline]
    pub fn y(&self) -> f32 {
        self.elements[1]
    }

    /// A mutable reference to the x-component.
    #[inline]
    pub fn x_mut(&mut self) -> &mut f32 {
        &mut self.elements[0]
    }

    /// A mutable reference to the y-component.
    #[inline]
    pub fn y_mut(&mut self) -> &mut f32 {
        &mut self.elements[1]
    }

    /// Overwrites all components.
    #[inline]
    pub fn set(&mut self, x: f32, y: f32) {
        self.elements = [x, y];
    }

    /// Converts the vector to 3D by appending the given z-component.
    #[inline]
    pub fn extended(&self, z: f32) -> Vector3 {
        Vector3::new(self.x(), self.y(), z)
    }

    /// Computes the 2D cross product, embedded as the z-component of a 3D
    /// vector.
    #[inline]
    pub fn cross(&self, other: &Self) -> Vector3 {
        Vector3::new(0.0, 0.0, self.x() * other.y() - self.y() * other.x())
    }

    /// Rotates the vector by `angle` radians about the point `pivot`.
    pub fn rotated_about(&self, pivot: &Self, angle: f32) -> Self {
        let p = self - pivot;
        let (s, c) = angle.sin_cos();
        Self::new(
            p.x() * c - p.y() * s + pivot.x(),
            p.x() * s + p.y() * c + pivot.y(),
        )
    }

    /// Transforms the vector as a 2D point by the given matrix, including its
    /// translation row.
    pub fn transformed_by_matrix3(&self, matrix: &Matrix3) -> Self {
        let m = matrix.as_array();
        let (x, y) = (self.x(), self.y());
        Self::new(m[0] * x + m[4] * y + m[8], m[1] * x + m[5] * y + m[9])
    }

    /// Transforms the vector as a point in the z = 0 plane by the given
    /// matrix, ignoring the projective row.
    pub fn transformed_by_matrix4(&self, matrix: &Matrix4) -> Self {
        let m = matrix.as_array();
        let (x, y) = (self.x(), self.y());
        Self::new(x * m[0] + y * m[4] + m[12], x * m[1] + y * m[5] + m[13])
    }

    /// Generates a vector pointing in a uniformly random direction with the
    /// given norm.
    #[cfg(feature = "random")]
    pub fn random<R: rand::Rng + ?Sized>(rng: &mut R, scale: f32) -> Self {
        let angle = rng.random::<f32>() * crate::consts::TWO_PI;
        Self::new(angle.cos() * scale, angle.sin() * scale)
    }
}

impl_vector_common!(Vector2, 2);

impl fmt::Debug for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector2")
            .field("x", &self.x())
            .field("y", &self.y())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::op_ref)]

    use super::*;
    use crate::consts::{FRAC_PI_2, PI};
    use approx::assert_abs_diff_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn computing_vector2_norm_works() {
        let v = Vector2::new(3.0, 4.0);
        assert_abs_diff_eq!(v.norm(), 5.0, epsilon = EPSILON);
        assert_abs_diff_eq!(v.norm_squared(), 25.0, epsilon = EPSILON);
    }

    #[test]
    fn normalizing_vector2_gives_unit_vector() {
        let normalized = Vector2::new(3.0, 4.0).normalized();
        assert_abs_diff_eq!(normalized.norm(), 1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(normalized, Vector2::new(0.6, 0.8), epsilon = EPSILON);
    }

    #[test]
    fn normalizing_tiny_vector2_gives_exact_zero() {
        assert_eq!(Vector2::new(1e-6, -1e-6).normalized(), Vector2::zeros());
        assert_eq!(Vector2::zeros().normalized(), Vector2::zeros());
    }

    #[test]
    fn vector2_arithmetic_operators_work() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(3.0, -4.0);
        assert_eq!(a + b, Vector2::new(4.0, -2.0));
        assert_eq!(&a - &b, Vector2::new(-2.0, 6.0));
        assert_eq!(a * 2.0, Vector2::new(2.0, 4.0));
        assert_eq!(2.0 * a, Vector2::new(2.0, 4.0));
        assert_eq!(b / 2.0, Vector2::new(1.5, -2.0));
        assert_eq!(-a, Vector2::new(-1.0, -2.0));

        let mut c = a;
        c += b;
        c *= 0.5;
        assert_eq!(c, Vector2::new(2.0, -1.0));
    }

    #[test]
    fn vector2_component_operations_work() {
        let v1 = Vector2::new(-1.0, 2.0);
        let v2 = Vector2::new(3.0, -4.0);
        assert_eq!(v1.component_mul(&v2), Vector2::new(-3.0, -8.0));
        assert_eq!(v1.component_div(&v2), Vector2::new(-1.0 / 3.0, -0.5));
        assert_eq!(v2.component_inverse(), Vector2::new(1.0 / 3.0, -0.25));
        assert_eq!(v1.component_min(&v2), Vector2::new(-1.0, -4.0));
        assert_eq!(v1.component_max(&v2), Vector2::new(3.0, 2.0));
        assert_eq!(v1.add_scaled(&v2, 2.0), Vector2::new(5.0, -6.0));
    }

    #[test]
    fn rounding_and_clamping_vector2_works() {
        let v = Vector2::new(-1.5, 2.3);
        assert_eq!(v.ceil(), Vector2::new(-1.0, 3.0));
        assert_eq!(v.floor(), Vector2::new(-2.0, 2.0));
        assert_eq!(v.round(), Vector2::new(-2.0, 2.0));
        assert_eq!(v.saturated(), Vector2::new(0.0, 1.0));
        assert_eq!(v.clamped(-1.0, 2.0), Vector2::new(-1.0, 2.0));
    }

    #[test]
    fn lerping_vector2_extrapolates_outside_unit_interval() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(3.0, 6.0);
        assert_eq!(a.lerp(&b, 0.5), Vector2::new(2.0, 4.0));
        assert_eq!(a.lerp(&b, 2.0), Vector2::new(5.0, 10.0));
        assert_eq!(a.lerp(&b, -1.0), Vector2::new(-1.0, -2.0));
        assert_eq!(a.midpoint(&b), Vector2::new(2.0, 4.0));
        assert_eq!(
            a.lerp_componentwise(&b, &Vector2::new(0.5, 0.25)),
            Vector2::new(2.0, 3.0)
        );
    }

    #[test]
    fn vector2_cross_product_populates_only_z() {
        let a = Vector2::new(2.0, 3.0);
        let b = Vector2::new(4.0, 5.0);
        assert_eq!(a.cross(&b), Vector3::new(0.0, 0.0, -2.0));
    }

    #[test]
    fn vector2_distances_work() {
        let a = Vector2::new(1.0, 1.0);
        let b = Vector2::new(4.0, 5.0);
        assert_abs_diff_eq!(a.distance(&b), 5.0, epsilon = EPSILON);
        assert_abs_diff_eq!(a.distance_squared(&b), 25.0, epsilon = EPSILON);
    }

    #[test]
    fn vector2_angle_is_invariant_under_scaling() {
        let a = Vector2::new(1.0, 0.0);
        let b = Vector2::new(1.0, 1.0);
        assert_abs_diff_eq!(a.angle(&b), PI / 4.0, epsilon = EPSILON);
        assert_abs_diff_eq!((a * 1000.0).angle(&(b * 1000.0)), PI / 4.0, epsilon = EPSILON);
    }

    #[test]
    fn angle_with_zero_vector2_is_nan() {
        assert!(Vector2::zeros().angle(&Vector2::unit_x()).is_nan());
    }

    #[test]
    fn setting_and_truncating_vector2_norm_works() {
        let v = Vector2::new(3.0, 4.0);
        assert_abs_diff_eq!(v.with_norm(10.0), Vector2::new(6.0, 8.0), epsilon = 1e-5);
        assert_abs_diff_eq!(v.truncated(2.5), Vector2::new(1.5, 2.0), epsilon = EPSILON);
        assert_eq!(v.truncated(6.0), v);
    }

    #[test]
    fn rotating_vector2_about_point_works() {
        let v = Vector2::new(2.0, 1.0);
        let pivot = Vector2::new(1.0, 1.0);
        assert_abs_diff_eq!(
            v.rotated_about(&pivot, FRAC_PI_2),
            Vector2::new(1.0, 2.0),
            epsilon = EPSILON
        );
    }

    #[test]
    fn transforming_vector2_by_matrix3_applies_translation() {
        let m = Matrix3::from_translation(&Vector2::new(2.0, 3.0));
        assert_eq!(
            Vector2::new(1.0, 1.0).transformed_by_matrix3(&m),
            Vector2::new(3.0, 4.0)
        );
    }

    #[test]
    fn transforming_vector2_by_matrix4_applies_translation() {
        let m = Matrix4::from_translation(&Vector3::new(2.0, 3.0, 4.0));
        assert_eq!(
            Vector2::new(1.0, 1.0).transformed_by_matrix4(&m),
            Vector2::new(3.0, 4.0)
        );
    }

    #[test]
    fn approx_eq_uses_strict_epsilon() {
        let a = Vector2::new(1.0, 2.0);
        assert!(a.approx_eq(&Vector2::new(1.0 + 0.5e-6, 2.0)));
        assert!(!a.approx_eq(&Vector2::new(1.0 + 1e-5, 2.0)));
    }

    #[test]
    fn indexing_vector2_works() {
        let mut v = Vector2::from([1.0, 2.0]);
        v[1] = 5.0;
        assert_eq!(v[0], 1.0);
        assert_eq!(v.y(), 5.0);
        assert_eq!(<[f32; 2]>::from(v), [1.0, 5.0]);
    }

    #[cfg(feature = "random")]
    #[test]
    fn random_vector2_has_requested_norm() {
        let mut rng = rand::rng();
        for _ in 0..10 {
            let v = Vector2::random(&mut rng, 3.0);
            assert_abs_diff_eq!(v.norm(), 3.0, epsilon = 1e-5);
        }
    }
}
