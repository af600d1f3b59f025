//! 4-dimensional vectors.

use super::Vector3;
use crate::matrix::Matrix4;
use bytemuck::{Pod, Zeroable};
use std::fmt;

/// A 4-dimensional vector.
#[repr(C)]
#[derive(Clone, Copy, Default, PartialEq, Zeroable, Pod)]
pub struct Vector4 {
    elements: [f32; 4],
}

impl Vector4 {
    /// Creates a new vector with the given components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self {
            elements: [x, y, z, w],
        }
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

    /// The w-component.
    #[inline]
    pub fn w(&self) -> f32 {
        self.elements[3]
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

    /// A mutable reference to the w-component.
    #[inline]
    pub fn w_mut(&mut self) -> &mut f32 {
        &mut self.elements[3]
    }

    /// Overwrites all components.
    #[inline]
    pub fn set(&mut self, x: f32, y: f32, z: f32, w: f32) {
        self.elements = [x, y, z, w];
    }

    /// The 3D vector containing the x-, y- and z-components of this vector.
    #[inline]
    pub fn xyz(&self) -> Vector3 {
        Vector3::new(self.x(), self.y(), self.z())
    }

    /// Transforms the vector by the given matrix.
    pub fn transformed_by_matrix4(&self, matrix: &Matrix4) -> Self {
        let m = matrix.as_array();
        let [x, y, z, w] = self.elements;
        Self {
            elements: std::array::from_fn(|i| {
                m[i] * x + m[4 + i] * y + m[8 + i] * z + m[12 + i] * w
            }),
        }
    }
}

impl_vector_common!(Vector4, 4);

impl fmt::Debug for Vector4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector4")
            .field("x", &self.x())
            .field("y", &self.y())
            .field("z", &self.z())
            .field("w", &self.w())
            .finish()
    }
}
