//! 3-dimensional vectors.

use super::{Vector2, Vector4};
use crate::{
    matrix::{Matrix3, Matrix4},
    quaternion::Quaternion,
};
use bytemuck::{Pod, Zeroable};
use std::fmt;

/// A 3-dimensional vector.
#[repr(C)]
#[derive(Clone, Copy, Default, PartialEq, Zeroable, Pod)]
pub struct Vector3 {
    elements: [f32; 3],
}

impl Vector3 {
    /// Creates a new vector with the given components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            elements: [x, y, z],
        }
    }

    /// The x-axis unit vector.
    #[inline]
    pub const fn unit_x() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// The y-axis unit vector.
    #[inline]
    pub const fn unit_y() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    /// The z-axis unit vector.
    #[inline]
    pub const fn unit_z() -> Self {
        Self::new(0.0, 0.0, 1.0)
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

    /// The z-component.
    #[inline]
    pub fn z(&self) -> f32 {
        self.elements[2]
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

    /// A mutable reference to the z-component.
    #[inline]
    pub fn z_mut(&mut self) -> &mut f32 {
        &mut self.elements[2]
    }

    /// Overwrites all components.
    #[inline]
    pub fn set(&mut self, x: f32, y: f32, z: f32) {
        self.elements = [x, y, z];
    }

    /// The 2D vector containing the x- and y-components of this vector.
    #[inline]
    pub fn xy(&self) -> Vector2 {
        Vector2::new(self.x(), self.y())
    }

    /// Converts the vector to 4D by appending the given w-component.
    #[inline]
    pub fn extended(&self, w: f32) -> Vector4 {
        Vector4::new(self.x(), self.y(), self.z(), w)
    }

    /// Computes the cross product of this vector with another.
    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        let [a0, a1, a2] = self.elements;
        let [b0, b1, b2] = other.elements;
        Self::new(a1 * b2 - a2 * b1, a2 * b0 - a0 * b2, a0 * b1 - a1 * b0)
    }

    /// Rotates the vector by `angle` radians about the x-axis through
    /// `pivot`.
    pub fn rotated_about_x(&self, pivot: &Self, angle: f32) -> Self {
        let p = self - pivot;
        let (s, c) = angle.sin_cos();
        Self::new(p.x(), p.y() * c - p.z() * s, p.y() * s + p.z() * c) + pivot
    }

    /// Rotates the vector by `angle` radians about the y-axis through
    /// `pivot`.
    pub fn rotated_about_y(&self, pivot: &Self, angle: f32) -> Self {
        let p = self - pivot;
        let (s, c) = angle.sin_cos();
        Self::new(p.z() * s + p.x() * c, p.y(), p.z() * c - p.x() * s) + pivot
    }

    /// Rotates the vector by `angle` radians about the z-axis through
    /// `pivot`.
    pub fn rotated_about_z(&self, pivot: &Self, angle: f32) -> Self {
        let p = self - pivot;
        let (s, c) = angle.sin_cos();
        Self::new(p.x() * c - p.y() * s, p.x() * s + p.y() * c, p.z()) + pivot
    }

    /// Transforms the vector by the given matrix.
    pub fn transformed_by_matrix3(&self, matrix: &Matrix3) -> Self {
        let m = matrix.as_array();
        let [x, y, z] = self.elements;
        Self::new(
            x * m[0] + y * m[4] + z * m[8],
            x * m[1] + y * m[5] + z * m[9],
            x * m[2] + y * m[6] + z * m[10],
        )
    }

    /// Transforms the vector as a point by the given matrix, dividing by the
    /// resulting homogeneous coordinate. A homogeneous coordinate of exactly
    /// zero is treated as one.
    pub fn transformed_by_matrix4(&self, matrix: &Matrix4) -> Self {
        let m = matrix.as_array();
        let [x, y, z] = self.elements;

        let mut w = m[3] * x + m[7] * y + m[11] * z + m[15];
        if w == 0.0 {
            w = 1.0;
        }

        Self::new(
            (m[0] * x + m[4] * y + m[8] * z + m[12]) / w,
            (m[1] * x + m[5] * y + m[9] * z + m[13]) / w,
            (m[2] * x + m[6] * y + m[10] * z + m[14]) / w,
        )
    }

    /// Transforms the vector as a direction by the upper-left 3x3 block of
    /// the given matrix.
    pub fn transformed_by_matrix4_upper_3x3(&self, matrix: &Matrix4) -> Self {
        let m = matrix.as_array();
        let [x, y, z] = self.elements;
        Self::new(
            x * m[0] + y * m[4] + z * m[8],
            x * m[1] + y * m[5] + z * m[9],
            x * m[2] + y * m[6] + z * m[10],
        )
    }

    /// Rotates the vector by the given quaternion.
    pub fn rotated_by(&self, rotation: &Quaternion) -> Self {
        let [qx, qy, qz, qw] = *rotation.as_array();
        let [x, y, z] = self.elements;
        let w2 = qw * 2.0;

        let uv_x = qy * z - qz * y;
        let uv_y = qz * x - qx * z;
        let uv_z = qx * y - qy * x;

        Self::new(
            x + uv_x * w2 + (qy * uv_z - qz * uv_y) * 2.0,
            y + uv_y * w2 + (qz * uv_x - qx * uv_z) * 2.0,
            z + uv_z * w2 + (qx * uv_y - qy * uv_x) * 2.0,
        )
    }

    /// Generates a vector pointing in a uniformly random direction with the
    /// given norm.
    #[cfg(feature = "random")]
    pub fn random<R: rand::Rng + ?Sized>(rng: &mut R, scale: f32) -> Self {
        let angle = rng.random::<f32>() * crate::consts::TWO_PI;
        let z = rng.random::<f32>() * 2.0 - 1.0;
        let z_scale = (1.0 - z * z).sqrt() * scale;
        Self::new(angle.cos() * z_scale, angle.sin() * z_scale, z * scale)
    }

    /// Like [`Self::random`], drawing from the thread-local generator.
    #[cfg(feature = "random")]
    pub fn random_with_scale(scale: f32) -> Self {
        Self::random(&mut rand::rng(), scale)
    }
}

impl_vector_common!(Vector3, 3);

impl fmt::Debug for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector3")
            .field("x", &self.x())
            .field("y", &self.y())
            .field("z", &self.z())
            .finish()
    }
}
