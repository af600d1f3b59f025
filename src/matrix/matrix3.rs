//! 3x3 matrices.

use super::Matrix4;
use crate::{
    quaternion::Quaternion,
    vector::{Vector2, Vector3},
};
use bytemuck::{Pod, Zeroable};
use std::fmt;

/// A 3x3 matrix stored as three rows of four floats. The fourth float of
/// each row (indices 3, 7 and 11) is padding that is kept at zero and ignored
/// by comparisons and arithmetic.
///
/// As a 2D transform, rows 0 and 1 are the x- and y-axes and row 2 holds the
/// translation.
#[repr(C)]
#[derive(Clone, Copy, Zeroable, Pod)]
pub struct Matrix3 {
    elements: [f32; 12],
}

impl Matrix3 {
    /// Creates a new matrix with the given logical elements, given row by
    /// row.
    #[inline]
    pub const fn new(
        m00: f32,
        m01: f32,
        m02: f32,
        m10: f32,
        m11: f32,
        m12: f32,
        m20: f32,
        m21: f32,
        m22: f32,
    ) -> Self {
        Self {
            elements: [
                m00, m01, m02, 0.0, //
                m10, m11, m12, 0.0, //
                m20, m21, m22, 0.0,
            ],
        }
    }

    /// Creates an identity matrix.
    #[inline]
    pub const fn identity() -> Self {
        Self::from_diagonal(1.0, 1.0, 1.0)
    }

    /// Creates a matrix with all zeros.
    #[inline]
    pub const fn zeros() -> Self {
        Self {
            elements: [0.0; 12],
        }
    }

    #[inline]
    const fn from_diagonal(d0: f32, d1: f32, d2: f32) -> Self {
        Self::new(d0, 0.0, 0.0, 0.0, d1, 0.0, 0.0, 0.0, d2)
    }

    /// Creates a matrix with the given rows.
    #[inline]
    pub const fn from_rows(rows: [[f32; 3]; 3]) -> Self {
        let [[m00, m01, m02], [m10, m11, m12], [m20, m21, m22]] = rows;
        Self::new(m00, m01, m02, m10, m11, m12, m20, m21, m22)
    }

    /// Overwrites all logical elements, given row by row. The padding is
    /// reset to zero.
    pub fn set(
        &mut self,
        m00: f32,
        m01: f32,
        m02: f32,
        m10: f32,
        m11: f32,
        m12: f32,
        m20: f32,
        m21: f32,
        m22: f32,
    ) {
        *self = Self::new(m00, m01, m02, m10, m11, m12, m20, m21, m22);
    }

    /// Creates a matrix from the upper-left 3x3 block of the given 4x4
    /// matrix.
    pub fn from_matrix4(matrix: &Matrix4) -> Self {
        let m = matrix.as_array();
        Self::new(m[0], m[1], m[2], m[4], m[5], m[6], m[8], m[9], m[10])
    }

    /// Creates the rotation matrix corresponding to the given quaternion,
    /// which is assumed to have unit length.
    pub fn from_quaternion(rotation: &Quaternion) -> Self {
        let [r00, r01, r02, r10, r11, r12, r20, r21, r22] = rotation.rotation_elements();
        Self::new(r00, r01, r02, r10, r11, r12, r20, r21, r22)
    }

    /// All twelve stored elements, including padding.
    #[inline]
    pub const fn as_array(&self) -> &[f32; 12] {
        &self.elements
    }

    /// The element at the given row and column.
    ///
    /// # Panics
    /// If `row` or `col` is not below 3.
    #[inline]
    pub fn element(&self, row: usize, col: usize) -> f32 {
        self.elements[Self::slot(row, col)]
    }

    /// A mutable reference to the element at the given row and column.
    ///
    /// # Panics
    /// If `row` or `col` is not below 3.
    #[inline]
    pub fn element_mut(&mut self, row: usize, col: usize) -> &mut f32 {
        &mut self.elements[Self::slot(row, col)]
    }

    #[inline]
    fn slot(row: usize, col: usize) -> usize {
        assert!(row < 3 && col < 3, "Matrix3 index ({row}, {col}) out of range");
        row * 4 + col
    }

    #[inline]
    fn row(&self, i: usize) -> [f32; 3] {
        let o = i * 4;
        [self.elements[o], self.elements[o + 1], self.elements[o + 2]]
    }

    #[inline]
    fn set_row(&mut self, i: usize, row: [f32; 3]) {
        self.elements[i * 4..i * 4 + 3].copy_from_slice(&row);
    }

    fn logical_elements(&self) -> impl Iterator<Item = f32> + '_ {
        self.elements
            .iter()
            .enumerate()
            .filter(|(i, _)| i % 4 != 3)
            .map(|(_, m)| *m)
    }

    fn zip_mapped(&self, other: &Self, f: impl Fn(f32, f32) -> f32) -> Self {
        let mut result = Self::zeros();
        for i in 0..3 {
            let (a, b) = (self.row(i), other.row(i));
            result.set_row(i, [f(a[0], b[0]), f(a[1], b[1]), f(a[2], b[2])]);
        }
        result
    }

    fn mapped(&self, f: impl Fn(f32) -> f32) -> Self {
        self.zip_mapped(self, |a, _| f(a))
    }

    /// Computes the determinant of the matrix.
    pub fn determinant(&self) -> f32 {
        let [m00, m01, m02] = self.row(0);
        let [m10, m11, m12] = self.row(1);
        let [m20, m21, m22] = self.row(2);

        m00 * (m11 * m22 - m21 * m12) - m10 * (m01 * m22 - m21 * m02)
            + m20 * (m01 * m12 - m11 * m02)
    }

    /// Computes the inverse of the matrix. A singular matrix gives
    /// non-finite elements.
    pub fn inverted(&self) -> Self {
        let [m00, m01, m02] = self.row(0);
        let [m10, m11, m12] = self.row(1);
        let [m20, m21, m22] = self.row(2);

        let b01 = m22 * m11 - m12 * m21;
        let b11 = -m22 * m10 + m12 * m20;
        let b21 = m21 * m10 - m11 * m20;

        let inv_det = 1.0 / (m00 * b01 + m01 * b11 + m02 * b21);

        Self::new(
            b01 * inv_det,
            (-m22 * m01 + m02 * m21) * inv_det,
            (m12 * m01 - m02 * m11) * inv_det,
            b11 * inv_det,
            (m22 * m00 - m02 * m20) * inv_det,
            (-m12 * m00 + m02 * m10) * inv_det,
            b21 * inv_det,
            (-m21 * m00 + m01 * m20) * inv_det,
            (m11 * m00 - m01 * m10) * inv_det,
        )
    }

    /// Inverts the matrix in place.
    pub fn invert(&mut self) {
        *self = self.inverted();
    }

    /// Computes the transpose of the matrix.
    pub fn transposed(&self) -> Self {
        let mut m = *self;
        m.transpose();
        m
    }

    /// Transposes the matrix in place by swapping off-diagonal elements.
    pub fn transpose(&mut self) {
        self.elements.swap(1, 4);
        self.elements.swap(2, 8);
        self.elements.swap(6, 9);
    }

    /// The 2D translation stored in row 2.
    pub fn translation(&self) -> Vector2 {
        Vector2::new(self.elements[8], self.elements[9])
    }

    /// Sets the 2D translation in row 2, leaving the other rows unchanged.
    pub fn set_translation(&mut self, translation: &Vector2) {
        self.elements[8] = translation.x();
        self.elements[9] = translation.y();
        self.elements[10] = 1.0;
    }

    /// Returns a copy of the matrix with the given 2D translation.
    pub fn with_translation(&self, translation: &Vector2) -> Self {
        let mut m = *self;
        m.set_translation(translation);
        m
    }

    /// The first two components of row `axis`.
    ///
    /// # Panics
    /// If `axis` is not below 3.
    pub fn axis(&self, axis: usize) -> Vector2 {
        let [x, y, _] = self.row_checked(axis);
        Vector2::new(x, y)
    }

    /// Overwrites the first two components of row `axis`.
    ///
    /// # Panics
    /// If `axis` is not below 3.
    pub fn set_axis(&mut self, vector: &Vector2, axis: usize) {
        let [_, _, z] = self.row_checked(axis);
        self.set_row(axis, [vector.x(), vector.y(), z]);
    }

    /// Returns a copy of the matrix with the first two components of row
    /// `axis` replaced.
    ///
    /// # Panics
    /// If `axis` is not below 3.
    pub fn with_axis(&self, vector: &Vector2, axis: usize) -> Self {
        let mut m = *self;
        m.set_axis(vector, axis);
        m
    }

    /// All three components of row `axis`.
    ///
    /// # Panics
    /// If `axis` is not below 3.
    pub fn axis_3d(&self, axis: usize) -> Vector3 {
        Vector3::from(self.row_checked(axis))
    }

    /// Overwrites all three components of row `axis`.
    ///
    /// # Panics
    /// If `axis` is not below 3.
    pub fn set_axis_3d(&mut self, vector: &Vector3, axis: usize) {
        self.row_checked(axis);
        self.set_row(axis, *vector.as_array());
    }

    fn row_checked(&self, axis: usize) -> [f32; 3] {
        assert!(axis < 3, "Matrix3 axis {axis} out of range");
        self.row(axis)
    }

    /// The 2D scale factors, computed as the norms of the first two
    /// components of rows 0 and 1.
    pub fn scaling(&self) -> Vector2 {
        Vector2::new(self.axis(0).norm(), self.axis(1).norm())
    }

    /// The 3D scale factors, computed as the norms of the three rows.
    pub fn scaling_3d(&self) -> Vector3 {
        Vector3::new(
            self.axis_3d(0).norm(),
            self.axis_3d(1).norm(),
            self.axis_3d(2).norm(),
        )
    }

    /// Creates a 2D translation matrix.
    pub fn from_translation(translation: &Vector2) -> Self {
        Self::identity().with_translation(translation)
    }

    /// Creates a 2D rotation matrix rotating by `angle` radians, i.e. a
    /// rotation about the z-axis.
    pub fn from_rotation(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0)
    }

    /// Creates a matrix rotating by `angle` radians about the x-axis.
    pub fn from_rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(1.0, 0.0, 0.0, 0.0, c, s, 0.0, -s, c)
    }

    /// Creates a matrix rotating by `angle` radians about the y-axis.
    pub fn from_rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(c, 0.0, -s, 0.0, 1.0, 0.0, s, 0.0, c)
    }

    /// Creates a matrix rotating by `angle` radians about the z-axis.
    pub fn from_rotation_z(angle: f32) -> Self {
        Self::from_rotation(angle)
    }

    /// Creates a 2D scaling matrix.
    pub fn from_scaling(scaling: &Vector2) -> Self {
        Self::from_diagonal(scaling.x(), scaling.y(), 1.0)
    }

    /// Creates a 3D scaling matrix.
    pub fn from_scaling_3d(scaling: &Vector3) -> Self {
        Self::from_diagonal(scaling.x(), scaling.y(), scaling.z())
    }

    /// Creates a matrix scaling 2D points uniformly.
    pub fn from_uniform_scaling(scaling: f32) -> Self {
        Self::from_diagonal(scaling, scaling, 1.0)
    }

    /// Creates a matrix scaling 3D vectors uniformly.
    pub fn from_uniform_scaling_3d(scaling: f32) -> Self {
        Self::from_diagonal(scaling, scaling, scaling)
    }

    /// Applies a 2D translation before this transform, i.e. computes
    /// `self * translation` in place. Only row 2 is written.
    pub fn translate(&mut self, translation: &Vector2) {
        let (r0, r1, r2) = (self.row(0), self.row(1), self.row(2));
        let (x, y) = (translation.x(), translation.y());
        self.set_row(2, std::array::from_fn(|j| r0[j] * x + r1[j] * y + r2[j]));
    }

    /// Like [`Self::translate`], returning a new matrix.
    pub fn translated(&self, translation: &Vector2) -> Self {
        let mut m = *self;
        m.translate(translation);
        m
    }

    /// Applies a 2D rotation before this transform. Only rows 0 and 1 are
    /// written.
    pub fn rotate(&mut self, angle: f32) {
        self.rotate_rows(0, 1, angle);
    }

    /// Like [`Self::rotate`], returning a new matrix.
    pub fn rotated(&self, angle: f32) -> Self {
        let mut m = *self;
        m.rotate(angle);
        m
    }

    /// Applies a rotation about the x-axis before this transform. Only rows
    /// 1 and 2 are written.
    pub fn rotate_x(&mut self, angle: f32) {
        self.rotate_rows(1, 2, angle);
    }

    /// Like [`Self::rotate_x`], returning a new matrix.
    pub fn rotated_x(&self, angle: f32) -> Self {
        let mut m = *self;
        m.rotate_x(angle);
        m
    }

    /// Applies a rotation about the y-axis before this transform. Only rows
    /// 0 and 2 are written.
    pub fn rotate_y(&mut self, angle: f32) {
        self.rotate_rows(2, 0, angle);
    }

    /// Like [`Self::rotate_y`], returning a new matrix.
    pub fn rotated_y(&self, angle: f32) -> Self {
        let mut m = *self;
        m.rotate_y(angle);
        m
    }

    /// Applies a rotation about the z-axis before this transform. Same as
    /// [`Self::rotate`].
    pub fn rotate_z(&mut self, angle: f32) {
        self.rotate(angle);
    }

    /// Like [`Self::rotate_z`], returning a new matrix.
    pub fn rotated_z(&self, angle: f32) -> Self {
        self.rotated(angle)
    }

    /// Rotates rows `a` and `b` into each other: `a' = c a + s b` and
    /// `b' = c b - s a`.
    fn rotate_rows(&mut self, a: usize, b: usize, angle: f32) {
        let (s, c) = angle.sin_cos();
        let (ra, rb) = (self.row(a), self.row(b));
        self.set_row(a, std::array::from_fn(|j| c * ra[j] + s * rb[j]));
        self.set_row(b, std::array::from_fn(|j| c * rb[j] - s * ra[j]));
    }

    fn scale_rows(&mut self, factors: &[f32]) {
        for (i, &factor) in factors.iter().enumerate() {
            let r = self.row(i);
            self.set_row(i, r.map(|m| m * factor));
        }
    }

    /// Applies a 2D scaling before this transform. Only rows 0 and 1 are
    /// written.
    pub fn scale(&mut self, scaling: &Vector2) {
        self.scale_rows(scaling.as_array());
    }

    /// Like [`Self::scale`], returning a new matrix.
    pub fn scaled(&self, scaling: &Vector2) -> Self {
        let mut m = *self;
        m.scale(scaling);
        m
    }

    /// Applies a 3D scaling before this transform.
    pub fn scale_3d(&mut self, scaling: &Vector3) {
        self.scale_rows(scaling.as_array());
    }

    /// Like [`Self::scale_3d`], returning a new matrix.
    pub fn scaled_3d(&self, scaling: &Vector3) -> Self {
        let mut m = *self;
        m.scale_3d(scaling);
        m
    }

    /// Applies a uniform 2D scaling before this transform. Only rows 0 and 1
    /// are written.
    pub fn uniform_scale(&mut self, scaling: f32) {
        self.scale_rows(&[scaling; 2]);
    }

    /// Like [`Self::uniform_scale`], returning a new matrix.
    pub fn uniformly_scaled(&self, scaling: f32) -> Self {
        let mut m = *self;
        m.uniform_scale(scaling);
        m
    }

    /// Applies a uniform 3D scaling before this transform.
    pub fn uniform_scale_3d(&mut self, scaling: f32) {
        self.scale_rows(&[scaling; 3]);
    }

    /// Like [`Self::uniform_scale_3d`], returning a new matrix.
    pub fn uniformly_scaled_3d(&self, scaling: f32) -> Self {
        let mut m = *self;
        m.uniform_scale_3d(scaling);
        m
    }

    /// Whether every logical element differs from the corresponding element
    /// of `other` by less than [`EPSILON`](crate::consts::EPSILON).
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.logical_elements()
            .zip(other.logical_elements())
            .all(|(a, b)| crate::num::approx_eq(a, b))
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl PartialEq for Matrix3 {
    fn eq(&self, other: &Self) -> bool {
        self.logical_elements().eq(other.logical_elements())
    }
}

impl From<[[f32; 3]; 3]> for Matrix3 {
    fn from(rows: [[f32; 3]; 3]) -> Self {
        Self::from_rows(rows)
    }
}

impl_binop!(Add, add, Matrix3, Matrix3, Matrix3, |a, b| {
    a.zip_mapped(b, |a, b| a + b)
});

impl_binop!(Sub, sub, Matrix3, Matrix3, Matrix3, |a, b| {
    a.zip_mapped(b, |a, b| a - b)
});

impl_binop!(Mul, mul, Matrix3, Matrix3, Matrix3, |a, b| {
    let mut result = Matrix3::zeros();
    for i in 0..3 {
        let bi = b.row(i);
        result.set_row(
            i,
            std::array::from_fn(|j| {
                a.elements[j] * bi[0] + a.elements[4 + j] * bi[1] + a.elements[8 + j] * bi[2]
            }),
        );
    }
    result
});

impl_binop!(Mul, mul, Matrix3, f32, Matrix3, |a, b| { a.mapped(|a| a * *b) });

impl_binop!(Mul, mul, f32, Matrix3, Matrix3, |a, b| { b.mapped(|b| *a * b) });

impl_binop_assign!(AddAssign, add_assign, Matrix3, Matrix3, |a, b| {
    *a = &*a + b;
});

impl_binop_assign!(SubAssign, sub_assign, Matrix3, Matrix3, |a, b| {
    *a = &*a - b;
});

impl_binop_assign!(MulAssign, mul_assign, Matrix3, Matrix3, |a, b| {
    *a = &*a * b;
});

impl_binop_assign!(MulAssign, mul_assign, Matrix3, f32, |a, b| {
    *a = &*a * b;
});

impl_unary_op!(Neg, neg, Matrix3, Matrix3, |val| { val.mapped(|m| -m) });

impl_approx_for_elements!(Matrix3, logical_elements);

impl fmt::Debug for Matrix3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix3")
            .field("row0", &self.row(0))
            .field("row1", &self.row(1))
            .field("row2", &self.row(2))
            .finish()
    }
}
