//! 4x4 matrices.

use super::Matrix3;
use crate::{quaternion::Quaternion, vector::Vector3};
use bytemuck::{Pod, Zeroable};
use std::{
    fmt,
    ops::{Index, IndexMut},
};

/// A 4x4 matrix stored as four rows of four floats. Rows 0 to 2 hold the
/// basis axes and row 3 holds the translation, with the last column carrying
/// the projective terms.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Zeroable, Pod)]
pub struct Matrix4 {
    elements: [f32; 16],
}

impl Matrix4 {
    /// Creates a new matrix with the given elements, given row by row.
    #[inline]
    pub const fn new(
        m00: f32,
        m01: f32,
        m02: f32,
        m03: f32,
        m10: f32,
        m11: f32,
        m12: f32,
        m13: f32,
        m20: f32,
        m21: f32,
        m22: f32,
        m23: f32,
        m30: f32,
        m31: f32,
        m32: f32,
        m33: f32,
    ) -> Self {
        Self {
            elements: [
                m00, m01, m02, m03, //
                m10, m11, m12, m13, //
                m20, m21, m22, m23, //
                m30, m31, m32, m33,
            ],
        }
    }

    /// Creates an identity matrix.
    #[inline]
    pub const fn identity() -> Self {
        Self::from_diagonal(1.0, 1.0, 1.0, 1.0)
    }

    /// Creates a matrix with all zeros.
    #[inline]
    pub const fn zeros() -> Self {
        Self {
            elements: [0.0; 16],
        }
    }

    #[inline]
    const fn from_diagonal(d0: f32, d1: f32, d2: f32, d3: f32) -> Self {
        let mut elements = [0.0; 16];
        elements[0] = d0;
        elements[5] = d1;
        elements[10] = d2;
        elements[15] = d3;
        Self { elements }
    }

    /// Creates a matrix from its sixteen elements, given row by row.
    #[inline]
    pub const fn from_array(elements: [f32; 16]) -> Self {
        Self { elements }
    }

    /// The sixteen elements, row by row.
    #[inline]
    pub const fn as_array(&self) -> &[f32; 16] {
        &self.elements
    }

    /// Overwrites all elements, given row by row.
    #[inline]
    pub fn set(&mut self, elements: [f32; 16]) {
        self.elements = elements;
    }

    /// Creates a matrix with the given 3x3 matrix as its upper-left block,
    /// zero translation and a one in the bottom-right corner.
    pub fn from_matrix3(matrix: &Matrix3) -> Self {
        let m = matrix.as_array();
        Self::new(
            m[0], m[1], m[2], 0.0, //
            m[4], m[5], m[6], 0.0, //
            m[8], m[9], m[10], 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates the rotation matrix corresponding to the given quaternion,
    /// which is assumed to have unit length.
    pub fn from_quaternion(rotation: &Quaternion) -> Self {
        let [r00, r01, r02, r10, r11, r12, r20, r21, r22] = rotation.rotation_elements();
        Self::new(
            r00, r01, r02, 0.0, //
            r10, r11, r12, 0.0, //
            r20, r21, r22, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// The element at the given row and column.
    ///
    /// # Panics
    /// If `row` or `col` is not below 4.
    #[inline]
    pub fn element(&self, row: usize, col: usize) -> f32 {
        self.elements[Self::slot(row, col)]
    }

    /// A mutable reference to the element at the given row and column.
    ///
    /// # Panics
    /// If `row` or `col` is not below 4.
    #[inline]
    pub fn element_mut(&mut self, row: usize, col: usize) -> &mut f32 {
        &mut self.elements[Self::slot(row, col)]
    }

    /// Returns a copy of the matrix with the element at the given row and
    /// column replaced.
    #[inline]
    pub fn with_element(&self, row: usize, col: usize, value: f32) -> Self {
        let mut m = *self;
        *m.element_mut(row, col) = value;
        m
    }

    #[inline]
    fn slot(row: usize, col: usize) -> usize {
        assert!(row < 4 && col < 4, "Matrix4 index ({row}, {col}) out of range");
        row * 4 + col
    }

    #[inline]
    fn row(&self, i: usize) -> [f32; 4] {
        let o = i * 4;
        [
            self.elements[o],
            self.elements[o + 1],
            self.elements[o + 2],
            self.elements[o + 3],
        ]
    }

    #[inline]
    fn set_row(&mut self, i: usize, row: [f32; 4]) {
        self.elements[i * 4..i * 4 + 4].copy_from_slice(&row);
    }

    fn elements(&self) -> impl Iterator<Item = f32> + '_ {
        self.elements.iter().copied()
    }

    fn mapped(&self, f: impl FnMut(f32) -> f32) -> Self {
        Self {
            elements: self.elements.map(f),
        }
    }

    fn zip_mapped(&self, other: &Self, mut f: impl FnMut(f32, f32) -> f32) -> Self {
        Self {
            elements: std::array::from_fn(|i| f(self.elements[i], other.elements[i])),
        }
    }

    /// The 2x2 cofactor products shared by [`Self::inverted`] and
    /// [`Self::determinant`], and the first column of the adjugate.
    fn cofactor_terms(&self) -> ([f32; 12], [f32; 4]) {
        let [m00, m01, m02, m03] = self.row(0);
        let [m10, m11, m12, m13] = self.row(1);
        let [m20, m21, m22, m23] = self.row(2);
        let [m30, m31, m32, m33] = self.row(3);

        let tmp = [
            m22 * m33,
            m32 * m23,
            m12 * m33,
            m32 * m13,
            m12 * m23,
            m22 * m13,
            m02 * m33,
            m32 * m03,
            m02 * m23,
            m22 * m03,
            m02 * m13,
            m12 * m03,
        ];

        let t0 = tmp[0] * m11 + tmp[3] * m21 + tmp[4] * m31
            - (tmp[1] * m11 + tmp[2] * m21 + tmp[5] * m31);
        let t1 = tmp[1] * m01 + tmp[6] * m21 + tmp[9] * m31
            - (tmp[0] * m01 + tmp[7] * m21 + tmp[8] * m31);
        let t2 = tmp[2] * m01 + tmp[7] * m11 + tmp[10] * m31
            - (tmp[3] * m01 + tmp[6] * m11 + tmp[11] * m31);
        let t3 = tmp[5] * m01 + tmp[8] * m11 + tmp[11] * m21
            - (tmp[4] * m01 + tmp[9] * m11 + tmp[10] * m21);

        (tmp, [t0, t1, t2, t3])
    }

    /// Computes the determinant of the matrix.
    pub fn determinant(&self) -> f32 {
        let (_, [t0, t1, t2, t3]) = self.cofactor_terms();
        let [m00, m10, m20, m30] = [0, 1, 2, 3].map(|i| self.elements[i * 4]);
        m00 * t0 + m10 * t1 + m20 * t2 + m30 * t3
    }

    /// Computes the inverse of the matrix. A singular matrix gives
    /// non-finite elements.
    pub fn inverted(&self) -> Self {
        let [m00, m01, m02, m03] = self.row(0);
        let [m10, m11, m12, m13] = self.row(1);
        let [m20, m21, m22, m23] = self.row(2);
        let [m30, m31, m32, m33] = self.row(3);

        let (tmp, [t0, t1, t2, t3]) = self.cofactor_terms();

        let tmp12 = m20 * m31;
        let tmp13 = m30 * m21;
        let tmp14 = m10 * m31;
        let tmp15 = m30 * m11;
        let tmp16 = m10 * m21;
        let tmp17 = m20 * m11;
        let tmp18 = m00 * m31;
        let tmp19 = m30 * m01;
        let tmp20 = m00 * m21;
        let tmp21 = m20 * m01;
        let tmp22 = m00 * m11;
        let tmp23 = m10 * m01;

        let d = 1.0 / (m00 * t0 + m10 * t1 + m20 * t2 + m30 * t3);

        Self::new(
            d * t0,
            d * t1,
            d * t2,
            d * t3,
            d * (tmp[1] * m10 + tmp[2] * m20 + tmp[5] * m30
                - (tmp[0] * m10 + tmp[3] * m20 + tmp[4] * m30)),
            d * (tmp[0] * m00 + tmp[7] * m20 + tmp[8] * m30
                - (tmp[1] * m00 + tmp[6] * m20 + tmp[9] * m30)),
            d * (tmp[3] * m00 + tmp[6] * m10 + tmp[11] * m30
                - (tmp[2] * m00 + tmp[7] * m10 + tmp[10] * m30)),
            d * (tmp[4] * m00 + tmp[9] * m10 + tmp[10] * m20
                - (tmp[5] * m00 + tmp[8] * m10 + tmp[11] * m20)),
            d * (tmp12 * m13 + tmp15 * m23 + tmp16 * m33
                - (tmp13 * m13 + tmp14 * m23 + tmp17 * m33)),
            d * (tmp13 * m03 + tmp18 * m23 + tmp21 * m33
                - (tmp12 * m03 + tmp19 * m23 + tmp20 * m33)),
            d * (tmp14 * m03 + tmp19 * m13 + tmp22 * m33
                - (tmp15 * m03 + tmp18 * m13 + tmp23 * m33)),
            d * (tmp17 * m03 + tmp20 * m13 + tmp23 * m23
                - (tmp16 * m03 + tmp21 * m13 + tmp22 * m23)),
            d * (tmp14 * m22 + tmp17 * m32 + tmp13 * m12
                - (tmp16 * m32 + tmp12 * m12 + tmp15 * m22)),
            d * (tmp20 * m32 + tmp12 * m02 + tmp19 * m22
                - (tmp18 * m22 + tmp21 * m32 + tmp13 * m02)),
            d * (tmp18 * m12 + tmp23 * m32 + tmp15 * m02
                - (tmp22 * m32 + tmp14 * m02 + tmp19 * m12)),
            d * (tmp22 * m22 + tmp16 * m02 + tmp21 * m12
                - (tmp20 * m12 + tmp23 * m22 + tmp17 * m02)),
        )
    }

    /// Inverts the matrix in place.
    pub fn invert(&mut self) {
        *self = self.inverted();
    }

    /// Computes the transpose of the matrix.
    pub fn transposed(&self) -> Self {
        Self {
            elements: std::array::from_fn(|i| self.elements[(i % 4) * 4 + i / 4]),
        }
    }

    /// Transposes the matrix in place by swapping off-diagonal elements.
    pub fn transpose(&mut self) {
        for (a, b) in [(1, 4), (2, 8), (3, 12), (6, 9), (7, 13), (11, 14)] {
            self.elements.swap(a, b);
        }
    }

    /// The translation stored in row 3.
    pub fn translation(&self) -> Vector3 {
        Vector3::new(self.elements[12], self.elements[13], self.elements[14])
    }

    /// Sets the translation in row 3, leaving the other rows unchanged.
    pub fn set_translation(&mut self, translation: &Vector3) {
        let [x, y, z] = *translation.as_array();
        self.set_row(3, [x, y, z, 1.0]);
    }

    /// Returns a copy of the matrix with the given translation.
    pub fn with_translation(&self, translation: &Vector3) -> Self {
        let mut m = *self;
        m.set_translation(translation);
        m
    }

    /// The first three components of row `axis`.
    ///
    /// # Panics
    /// If `axis` is not below 3.
    pub fn axis(&self, axis: usize) -> Vector3 {
        assert!(axis < 3, "Matrix4 axis {axis} out of range");
        let [x, y, z, _] = self.row(axis);
        Vector3::new(x, y, z)
    }

    /// Overwrites the first three components of row `axis`.
    ///
    /// # Panics
    /// If `axis` is not below 3.
    pub fn set_axis(&mut self, vector: &Vector3, axis: usize) {
        assert!(axis < 3, "Matrix4 axis {axis} out of range");
        let o = axis * 4;
        self.elements[o..o + 3].copy_from_slice(vector.as_array());
    }

    /// Returns a copy of the matrix with the first three components of row
    /// `axis` replaced.
    ///
    /// # Panics
    /// If `axis` is not below 3.
    pub fn with_axis(&self, vector: &Vector3, axis: usize) -> Self {
        let mut m = *self;
        m.set_axis(vector, axis);
        m
    }

    /// The scale factors along each axis, computed as the norms of the axes.
    pub fn scaling(&self) -> Vector3 {
        Vector3::new(
            self.axis(0).norm(),
            self.axis(1).norm(),
            self.axis(2).norm(),
        )
    }

    /// Creates a perspective projection with a vertical field of view of
    /// `fov_y` radians. Depth is mapped from `[-z_near, -z_far]` to
    /// `[0, 1]`. Pass [`f32::INFINITY`] as `z_far` for an infinite far
    /// plane.
    pub fn perspective(fov_y: f32, aspect: f32, z_near: f32, z_far: f32) -> Self {
        let f = (crate::consts::FRAC_PI_2 - 0.5 * fov_y).tan();

        let (m22, m32) = if z_far.is_finite() {
            let range_inv = 1.0 / (z_near - z_far);
            (z_far * range_inv, z_far * z_near * range_inv)
        } else {
            (-1.0, -z_near)
        };

        Self::projection(f / aspect, f, 0.0, 0.0, m22, m32)
    }

    /// Like [`Self::perspective`], but maps `-z_near` to depth 1 and `-z_far`
    /// to depth 0.
    pub fn perspective_reverse_z(fov_y: f32, aspect: f32, z_near: f32, z_far: f32) -> Self {
        let f = 1.0 / (fov_y * 0.5).tan();
        let (m22, m32) = Self::reverse_z_depth_terms(z_near, z_far);
        Self::projection(f / aspect, f, 0.0, 0.0, m22, m32)
    }

    /// Creates a perspective projection for the view frustum with the given
    /// near-plane extents. Depth is mapped to `[0, 1]`.
    pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let dx = right - left;
        let dy = top - bottom;
        let dz = near - far;

        Self::projection(
            2.0 * near / dx,
            2.0 * near / dy,
            (left + right) / dx,
            (top + bottom) / dy,
            far / dz,
            near * far / dz,
        )
    }

    /// Like [`Self::frustum`], but with reversed depth. Pass
    /// [`f32::INFINITY`] as `far` for an infinite far plane.
    pub fn frustum_reverse_z(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let dx = right - left;
        let dy = top - bottom;
        let (m22, m32) = Self::reverse_z_depth_terms(near, far);

        Self::projection(
            2.0 * near / dx,
            2.0 * near / dy,
            (left + right) / dx,
            (top + bottom) / dy,
            m22,
            m32,
        )
    }

    fn reverse_z_depth_terms(near: f32, far: f32) -> (f32, f32) {
        if far == f32::INFINITY {
            (0.0, near)
        } else {
            let range_inv = 1.0 / (far - near);
            (near * range_inv, far * near * range_inv)
        }
    }

    fn projection(m00: f32, m11: f32, m20: f32, m21: f32, m22: f32, m32: f32) -> Self {
        Self::new(
            m00, 0.0, 0.0, 0.0, //
            0.0, m11, 0.0, 0.0, //
            m20, m21, m22, -1.0, //
            0.0, 0.0, m32, 0.0,
        )
    }

    /// Creates an orthographic projection mapping the box spanned by the
    /// given planes to x and y in `[-1, 1]` and depth in `[0, 1]`.
    pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Self::new(
            2.0 / (right - left),
            0.0,
            0.0,
            0.0,
            0.0,
            2.0 / (top - bottom),
            0.0,
            0.0,
            0.0,
            0.0,
            1.0 / (near - far),
            0.0,
            (right + left) / (left - right),
            (top + bottom) / (bottom - top),
            near / (near - far),
            1.0,
        )
    }

    fn basis_at(x: &Vector3, y: &Vector3, z: &Vector3, position: &Vector3) -> Self {
        let mut m = Self::identity();
        m.set_axis(x, 0);
        m.set_axis(y, 1);
        m.set_axis(z, 2);
        m.set_translation(position);
        m
    }

    fn orthonormal_basis(forward: &Vector3, up: &Vector3) -> (Vector3, Vector3, Vector3) {
        let z = forward.normalized();
        let x = up.cross(&z).normalized();
        let y = z.cross(&x).normalized();
        (x, y, z)
    }

    /// Creates a transform that places an object at `position` with its
    /// positive z-axis pointing at `target`.
    ///
    /// This is not the inverse of [`Self::look_at`], which looks down the
    /// negative z-axis.
    pub fn aim(position: &Vector3, target: &Vector3, up: &Vector3) -> Self {
        let (x, y, z) = Self::orthonormal_basis(&(target - position), up);
        Self::basis_at(&x, &y, &z, position)
    }

    /// Creates a transform that places a camera at `eye` with its negative
    /// z-axis pointing at `target`. This is the inverse of
    /// [`Self::look_at`].
    pub fn camera_aim(eye: &Vector3, target: &Vector3, up: &Vector3) -> Self {
        let (x, y, z) = Self::orthonormal_basis(&(eye - target), up);
        Self::basis_at(&x, &y, &z, eye)
    }

    /// Creates a view matrix for a camera at `eye` looking at `target`.
    pub fn look_at(eye: &Vector3, target: &Vector3, up: &Vector3) -> Self {
        let (x, y, z) = Self::orthonormal_basis(&(eye - target), up);
        Self::new(
            x.x(),
            y.x(),
            z.x(),
            0.0,
            x.y(),
            y.y(),
            z.y(),
            0.0,
            x.z(),
            y.z(),
            z.z(),
            0.0,
            -x.dot(eye),
            -y.dot(eye),
            -z.dot(eye),
            1.0,
        )
    }

    /// Creates a translation matrix.
    pub fn from_translation(translation: &Vector3) -> Self {
        Self::identity().with_translation(translation)
    }

    /// Creates a matrix rotating by `angle` radians about the x-axis.
    pub fn from_rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_matrix3(&Matrix3::new(1.0, 0.0, 0.0, 0.0, c, s, 0.0, -s, c))
    }

    /// Creates a matrix rotating by `angle` radians about the y-axis.
    pub fn from_rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_matrix3(&Matrix3::new(c, 0.0, -s, 0.0, 1.0, 0.0, s, 0.0, c))
    }

    /// Creates a matrix rotating by `angle` radians about the z-axis.
    pub fn from_rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_matrix3(&Matrix3::new(c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0))
    }

    /// Creates a matrix rotating by `angle` radians about `axis`, which need
    /// not be normalized.
    pub fn from_axis_rotation(axis: &Vector3, angle: f32) -> Self {
        let [r0, r1, r2] = Self::axis_rotation_rows(axis, angle);
        let mut m = Self::identity();
        m.set_row(0, r0);
        m.set_row(1, r1);
        m.set_row(2, r2);
        m
    }

    fn axis_rotation_rows(axis: &Vector3, angle: f32) -> [[f32; 4]; 3] {
        let n = axis.norm();
        let (x, y, z) = (axis.x() / n, axis.y() / n, axis.z() / n);
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (s, c) = angle.sin_cos();
        let omc = 1.0 - c;

        [
            [xx + (1.0 - xx) * c, x * y * omc + z * s, x * z * omc - y * s, 0.0],
            [x * y * omc - z * s, yy + (1.0 - yy) * c, y * z * omc + x * s, 0.0],
            [x * z * omc + y * s, y * z * omc - x * s, zz + (1.0 - zz) * c, 0.0],
        ]
    }

    /// Applies a translation before this transform, i.e. computes
    /// `self * translation` in place. Only row 3 is written.
    pub fn translate(&mut self, translation: &Vector3) {
        let [x, y, z] = *translation.as_array();
        let (r0, r1, r2, r3) = (self.row(0), self.row(1), self.row(2), self.row(3));
        self.set_row(
            3,
            std::array::from_fn(|j| r0[j] * x + r1[j] * y + r2[j] * z + r3[j]),
        );
    }

    /// Like [`Self::translate`], returning a new matrix.
    pub fn translated(&self, translation: &Vector3) -> Self {
        let mut m = *self;
        m.translate(translation);
        m
    }

    /// Rotates rows `a` and `b` into each other: `a' = c a + s b` and
    /// `b' = c b - s a`.
    fn rotate_rows(&mut self, a: usize, b: usize, angle: f32) {
        let (s, c) = angle.sin_cos();
        let (ra, rb) = (self.row(a), self.row(b));
        self.set_row(a, std::array::from_fn(|j| c * ra[j] + s * rb[j]));
        self.set_row(b, std::array::from_fn(|j| c * rb[j] - s * ra[j]));
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

    /// Applies a rotation about the z-axis before this transform. Only rows
    /// 0 and 1 are written.
    pub fn rotate_z(&mut self, angle: f32) {
        self.rotate_rows(0, 1, angle);
    }

    /// Like [`Self::rotate_z`], returning a new matrix.
    pub fn rotated_z(&self, angle: f32) -> Self {
        let mut m = *self;
        m.rotate_z(angle);
        m
    }

    /// Applies a rotation about `axis` before this transform. Row 3 is left
    /// unchanged.
    pub fn axis_rotate(&mut self, axis: &Vector3, angle: f32) {
        let r = Self::axis_rotation_rows(axis, angle);
        let (r0, r1, r2) = (self.row(0), self.row(1), self.row(2));
        for (i, [ri0, ri1, ri2, _]) in r.into_iter().enumerate() {
            self.set_row(
                i,
                std::array::from_fn(|j| ri0 * r0[j] + ri1 * r1[j] + ri2 * r2[j]),
            );
        }
    }

    /// Like [`Self::axis_rotate`], returning a new matrix.
    pub fn axis_rotated(&self, axis: &Vector3, angle: f32) -> Self {
        let mut m = *self;
        m.axis_rotate(axis, angle);
        m
    }

    /// Creates a scaling matrix.
    pub fn from_scaling(scaling: &Vector3) -> Self {
        Self::from_diagonal(scaling.x(), scaling.y(), scaling.z(), 1.0)
    }

    /// Creates a uniform scaling matrix.
    pub fn from_uniform_scaling(scaling: f32) -> Self {
        Self::from_diagonal(scaling, scaling, scaling, 1.0)
    }

    fn scale_rows(&mut self, factors: [f32; 3]) {
        for (i, factor) in factors.into_iter().enumerate() {
            let r = self.row(i);
            self.set_row(i, r.map(|m| m * factor));
        }
    }

    /// Applies a scaling before this transform. Row 3 is left unchanged.
    pub fn scale(&mut self, scaling: &Vector3) {
        self.scale_rows(*scaling.as_array());
    }

    /// Like [`Self::scale`], returning a new matrix.
    pub fn scaled(&self, scaling: &Vector3) -> Self {
        let mut m = *self;
        m.scale(scaling);
        m
    }

    /// Applies a uniform scaling before this transform. Row 3 is left
    /// unchanged.
    pub fn uniform_scale(&mut self, scaling: f32) {
        self.scale_rows([scaling; 3]);
    }

    /// Like [`Self::uniform_scale`], returning a new matrix.
    pub fn uniformly_scaled(&self, scaling: f32) -> Self {
        let mut m = *self;
        m.uniform_scale(scaling);
        m
    }

    /// Whether every element differs from the corresponding element of
    /// `other` by less than [`EPSILON`](crate::consts::EPSILON).
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.elements()
            .zip(other.elements())
            .all(|(a, b)| crate::num::approx_eq(a, b))
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<[f32; 16]> for Matrix4 {
    fn from(elements: [f32; 16]) -> Self {
        Self::from_array(elements)
    }
}

impl Index<usize> for Matrix4 {
    type Output = f32;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.elements[index]
    }
}

impl IndexMut<usize> for Matrix4 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.elements[index]
    }
}

impl_binop!(Add, add, Matrix4, Matrix4, Matrix4, |a, b| {
    a.zip_mapped(b, |a, b| a + b)
});

impl_binop!(Sub, sub, Matrix4, Matrix4, Matrix4, |a, b| {
    a.zip_mapped(b, |a, b| a - b)
});

impl_binop!(Mul, mul, Matrix4, Matrix4, Matrix4, |a, b| {
    let mut result = Matrix4::zeros();
    for i in 0..4 {
        let bi = b.row(i);
        result.set_row(
            i,
            std::array::from_fn(|j| {
                a.elements[j] * bi[0]
                    + a.elements[4 + j] * bi[1]
                    + a.elements[8 + j] * bi[2]
                    + a.elements[12 + j] * bi[3]
            }),
        );
    }
    result
});

impl_binop!(Mul, mul, Matrix4, f32, Matrix4, |a, b| { a.mapped(|a| a * *b) });

impl_binop!(Mul, mul, f32, Matrix4, Matrix4, |a, b| { b.mapped(|b| *a * b) });

impl_binop_assign!(AddAssign, add_assign, Matrix4, Matrix4, |a, b| {
    *a = &*a + b;
});

impl_binop_assign!(SubAssign, sub_assign, Matrix4, Matrix4, |a, b| {
    *a = &*a - b;
});

impl_binop_assign!(MulAssign, mul_assign, Matrix4, Matrix4, |a, b| {
    *a = &*a * b;
});

impl_binop_assign!(MulAssign, mul_assign, Matrix4, f32, |a, b| {
    *a = &*a * b;
});

impl_unary_op!(Neg, neg, Matrix4, Matrix4, |val| { val.mapped(|m| -m) });

impl_approx_for_elements!(Matrix4, elements);

impl fmt::Debug for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix4")
            .field("row0", &self.row(0))
            .field("row1", &self.row(1))
            .field("row2", &self.row(2))
            .field("row3", &self.row(3))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::op_ref)]

    use super::*;
    use crate::{
        consts::{FRAC_PI_2, FRAC_PI_4},
        vector::Vector4,
    };
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    const EPSILON: f32 = 1e-6;

    fn general_matrix() -> Matrix4 {
        Matrix4::new(
            2.0, 0.5, -1.0, 0.0, //
            1.0, 3.0, 0.0, 0.2, //
            -0.5, 1.0, 4.0, 0.0, //
            3.0, -2.0, 1.0, 1.0,
        )
    }

    fn to_nalgebra(m: &Matrix4) -> nalgebra::Matrix4<f64> {
        nalgebra::Matrix4::from_fn(|i, j| f64::from(m.element(i, j)))
    }

    prop_compose! {
        fn matrix4_strategy(max_abs: f32)(
            e in prop::array::uniform16(-max_abs..max_abs)
        ) -> Matrix4 {
            Matrix4::from_array(e)
        }
    }

    prop_compose! {
        fn unit_vector3_strategy()(
            x in -1.0_f32..1.0,
            y in -1.0_f32..1.0,
            z in -1.0_f32..1.0,
        ) -> Vector3 {
            Vector3::new(x, y, z + 2.0).normalized()
        }
    }

    #[test]
    fn creating_matrix4_identity_gives_identity_matrix() {
        let m = Matrix4::identity();
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(m.element(i, j), if i == j { 1.0 } else { 0.0 });
            }
        }
        assert_eq!(Matrix4::default(), m);
    }

    #[test]
    fn computing_determinant_of_diagonal_matrix4_gives_product_of_diagonal() {
        let m = Matrix4::from_diagonal(2.0, 3.0, 4.0, 5.0);
        assert_abs_diff_eq!(m.determinant(), 120.0, epsilon = EPSILON);
    }

    #[test]
    fn matrix4_determinant_matches_nalgebra() {
        let m = general_matrix();
        assert_abs_diff_eq!(
            m.determinant(),
            to_nalgebra(&m).determinant() as f32,
            epsilon = 1e-4
        );
    }

    #[test]
    fn inverting_translation_matrix4_negates_translation() {
        let m = Matrix4::from_translation(&Vector3::new(2.0, 3.0, 4.0));
        assert_eq!(
            m.inverted(),
            Matrix4::from_translation(&Vector3::new(-2.0, -3.0, -4.0))
        );
    }

    #[test]
    fn matrix4_inverse_matches_nalgebra() {
        let m = general_matrix();
        let expected = to_nalgebra(&m).try_inverse().unwrap();
        let inverse = m.inverted();
        for i in 0..4 {
            for j in 0..4 {
                assert_abs_diff_eq!(
                    inverse.element(i, j),
                    expected[(i, j)] as f32,
                    epsilon = 1e-5
                );
            }
        }
    }

    #[test]
    fn inverting_matrix4_twice_gives_original() {
        let m = general_matrix();
        assert_abs_diff_eq!(m.inverted().inverted(), m, epsilon = 1e-5);
        assert_abs_diff_eq!(m * m.inverted(), Matrix4::identity(), epsilon = 1e-5);
        let mut n = m;
        n.invert();
        assert_eq!(n, m.inverted());
    }

    #[test]
    fn inverting_singular_matrix4_gives_non_finite_elements() {
        let mut m = general_matrix();
        m.set_row(2, [0.0; 4]);
        assert_eq!(m.determinant(), 0.0);
        assert!(m.inverted().as_array().iter().any(|e| !e.is_finite()));
    }

    #[test]
    fn transposing_matrix4_in_place_matches_transposed() {
        let m = general_matrix();
        let mut in_place = m;
        in_place.transpose();
        assert_eq!(in_place, m.transposed());
        assert_eq!(in_place.transposed(), m);
        assert_eq!(in_place.element(3, 0), m.element(0, 3));
    }

    #[test]
    fn multiplying_matrix4_is_not_commutative() {
        let a = Matrix4::from_translation(&Vector3::new(1.0, 0.0, 0.0));
        let b = Matrix4::from_rotation_z(FRAC_PI_2);
        assert!(!(a * b).approx_eq(&(b * a)));
    }

    #[test]
    fn multiplying_matrix4_applies_right_operand_first() {
        let translation = Matrix4::from_translation(&Vector3::new(1.0, 0.0, 0.0));
        let rotation = Matrix4::from_rotation_z(FRAC_PI_2);
        let p = Vector3::zeros();
        assert_abs_diff_eq!(
            p.transformed_by_matrix4(&(translation * rotation)),
            Vector3::new(1.0, 0.0, 0.0),
            epsilon = EPSILON
        );
        assert_abs_diff_eq!(
            p.transformed_by_matrix4(&(rotation * translation)),
            Vector3::new(0.0, 1.0, 0.0),
            epsilon = EPSILON
        );
    }

    #[test]
    fn ortho_maps_near_bottom_left_corner_to_ndc_corner() {
        let m = Matrix4::ortho(-2.0, 4.0, 30.0, 10.0, 15.0, 25.0);
        assert_abs_diff_eq!(
            Vector3::new(-2.0, 30.0, -15.0).transformed_by_matrix4(&m),
            Vector3::new(-1.0, -1.0, 0.0),
            epsilon = 1e-5
        );
        assert_abs_diff_eq!(
            Vector3::new(4.0, 10.0, -25.0).transformed_by_matrix4(&m),
            Vector3::new(1.0, 1.0, 1.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn perspective_maps_near_and_far_planes_to_unit_depth_range() {
        let m = Matrix4::perspective(FRAC_PI_2, 2.0, 1.0, 10.0);
        assert_abs_diff_eq!(
            Vector3::new(0.0, 0.0, -1.0).transformed_by_matrix4(&m).z(),
            0.0,
            epsilon = 1e-5
        );
        assert_abs_diff_eq!(
            Vector3::new(0.0, 0.0, -10.0).transformed_by_matrix4(&m).z(),
            1.0,
            epsilon = 1e-5
        );
        assert_abs_diff_eq!(
            Vector3::new(2.0, 1.0, -1.0).transformed_by_matrix4(&m),
            Vector3::new(1.0, 1.0, 0.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn infinite_perspective_uses_limit_terms() {
        let m = Matrix4::perspective(FRAC_PI_2, 1.0, 0.5, f32::INFINITY);
        assert_eq!(m.element(2, 2), -1.0);
        assert_eq!(m.element(3, 2), -0.5);
        assert_abs_diff_eq!(
            Vector3::new(0.0, 0.0, -0.5).transformed_by_matrix4(&m).z(),
            0.0,
            epsilon = 1e-6
        );
        assert!(Vector3::new(0.0, 0.0, -1e6).transformed_by_matrix4(&m).z() < 1.0);
    }

    #[test]
    fn reverse_z_perspective_maps_near_to_one_and_far_to_zero() {
        let m = Matrix4::perspective_reverse_z(FRAC_PI_2, 1.0, 1.0, 10.0);
        assert_abs_diff_eq!(
            Vector3::new(0.0, 0.0, -1.0).transformed_by_matrix4(&m).z(),
            1.0,
            epsilon = 1e-5
        );
        assert_abs_diff_eq!(
            Vector3::new(0.0, 0.0, -10.0).transformed_by_matrix4(&m).z(),
            0.0,
            epsilon = 1e-5
        );

        let infinite = Matrix4::perspective_reverse_z(FRAC_PI_2, 1.0, 1.0, f32::INFINITY);
        assert_eq!(infinite.element(2, 2), 0.0);
        assert_eq!(infinite.element(3, 2), 1.0);
    }

    #[test]
    fn symmetric_frustum_matches_perspective() {
        let frustum = Matrix4::frustum(-1.0, 1.0, -1.0, 1.0, 1.0, 10.0);
        let perspective = Matrix4::perspective(FRAC_PI_2, 1.0, 1.0, 10.0);
        assert_abs_diff_eq!(frustum, perspective, epsilon = 1e-5);

        let frustum = Matrix4::frustum_reverse_z(-1.0, 1.0, -1.0, 1.0, 1.0, 10.0);
        let perspective = Matrix4::perspective_reverse_z(FRAC_PI_2, 1.0, 1.0, 10.0);
        assert_abs_diff_eq!(frustum, perspective, epsilon = 1e-5);
    }

    #[test]
    fn asymmetric_frustum_maps_near_corners_to_ndc_corners() {
        let m = Matrix4::frustum(-1.0, 3.0, -2.0, 2.0, 2.0, 20.0);
        assert_abs_diff_eq!(
            Vector3::new(3.0, 2.0, -2.0).transformed_by_matrix4(&m),
            Vector3::new(1.0, 1.0, 0.0),
            epsilon = 1e-5
        );
        assert_abs_diff_eq!(
            Vector3::new(-1.0, -2.0, -2.0).transformed_by_matrix4(&m),
            Vector3::new(-1.0, -1.0, 0.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn look_at_maps_eye_to_origin_and_target_to_negative_z() {
        let eye = Vector3::new(1.0, 2.0, 3.0);
        let target = Vector3::new(4.0, 6.0, 3.0);
        let view = Matrix4::look_at(&eye, &target, &Vector3::unit_z());
        assert_abs_diff_eq!(eye.transformed_by_matrix4(&view), Vector3::zeros(), epsilon = 1e-5);
        assert_abs_diff_eq!(
            target.transformed_by_matrix4(&view),
            Vector3::new(0.0, 0.0, -5.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn camera_aim_is_inverse_of_look_at() {
        let eye = Vector3::new(1.0, 2.0, 3.0);
        let target = Vector3::new(-2.0, 0.5, 8.0);
        let up = Vector3::unit_y();
        let view = Matrix4::look_at(&eye, &target, &up);
        let camera = Matrix4::camera_aim(&eye, &target, &up);
        assert_abs_diff_eq!(view * camera, Matrix4::identity(), epsilon = 1e-5);
        assert_abs_diff_eq!(camera.inverted(), view, epsilon = 1e-5);
    }

    #[test]
    fn aim_points_positive_z_at_target() {
        let position = Vector3::new(1.0, 1.0, 1.0);
        let target = Vector3::new(1.0, 1.0, 5.0);
        let m = Matrix4::aim(&position, &target, &Vector3::unit_y());
        assert_eq!(m.translation(), position);
        assert_abs_diff_eq!(m.axis(2), Vector3::unit_z(), epsilon = EPSILON);
        assert_abs_diff_eq!(m.axis(0), Vector3::unit_x(), epsilon = EPSILON);
        assert_abs_diff_eq!(m.axis(1), Vector3::unit_y(), epsilon = EPSILON);
        assert_abs_diff_eq!(
            Vector3::unit_z().transformed_by_matrix4(&m),
            Vector3::new(1.0, 1.0, 2.0),
            epsilon = EPSILON
        );
    }

    #[test]
    fn axis_rotation_normalizes_axis() {
        let m1 = Matrix4::from_axis_rotation(&Vector3::new(0.0, 0.0, 5.0), 0.3);
        let m2 = Matrix4::from_rotation_z(0.3);
        assert_abs_diff_eq!(m1, m2, epsilon = EPSILON);
        let m3 = Matrix4::from_axis_rotation(&Vector3::new(-2.0, 0.0, 0.0), 0.3);
        assert_abs_diff_eq!(m3, Matrix4::from_rotation_x(-0.3), epsilon = EPSILON);
    }

    #[test]
    fn axis_rotation_about_y_matches_rotation_y() {
        assert_abs_diff_eq!(
            Matrix4::from_axis_rotation(&Vector3::unit_y(), 1.1),
            Matrix4::from_rotation_y(1.1),
            epsilon = EPSILON
        );
    }

    #[test]
    fn applying_transforms_to_matrix4_equals_multiplying_by_constructed_transform() {
        let m = general_matrix();
        let v = Vector3::new(2.0, -3.0, 0.5);
        let axis = Vector3::new(1.0, -1.0, 2.0);
        let angle = 0.7;

        assert_abs_diff_eq!(
            m.translated(&v),
            m * Matrix4::from_translation(&v),
            epsilon = 1e-5
        );
        assert_abs_diff_eq!(
            m.rotated_x(angle),
            m * Matrix4::from_rotation_x(angle),
            epsilon = 1e-5
        );
        assert_abs_diff_eq!(
            m.rotated_y(angle),
            m * Matrix4::from_rotation_y(angle),
            epsilon = 1e-5
        );
        assert_abs_diff_eq!(
            m.rotated_z(angle),
            m * Matrix4::from_rotation_z(angle),
            epsilon = 1e-5
        );
        assert_abs_diff_eq!(
            m.axis_rotated(&axis, angle),
            m * Matrix4::from_axis_rotation(&axis, angle),
            epsilon = 1e-5
        );
        assert_abs_diff_eq!(m.scaled(&v), m * Matrix4::from_scaling(&v), epsilon = 1e-5);
        assert_abs_diff_eq!(
            m.uniformly_scaled(1.5),
            m * Matrix4::from_uniform_scaling(1.5),
            epsilon = 1e-5
        );
    }

    #[test]
    fn rotating_matrix4_in_place_copies_untouched_rows() {
        let m = general_matrix();
        let mut n = m;
        n.rotate_x(0.4);
        assert_eq!(n.axis(0), m.axis(0));
        assert_eq!(n.translation(), m.translation());
        assert_eq!(n.element(3, 3), m.element(3, 3));
    }

    #[test]
    fn matrix4_translation_axis_and_scaling_accessors_work() {
        let mut m = Matrix4::from_rotation_y(0.5).scaled(&Vector3::new(2.0, 3.0, 4.0));
        m.set_translation(&Vector3::new(7.0, 8.0, 9.0));
        assert_eq!(m.translation(), Vector3::new(7.0, 8.0, 9.0));
        assert_eq!(m.element(3, 3), 1.0);
        assert_abs_diff_eq!(m.scaling(), Vector3::new(2.0, 3.0, 4.0), epsilon = 1e-5);

        let n = m.with_axis(&Vector3::new(1.0, 1.0, 1.0), 1);
        assert_eq!(n.axis(1), Vector3::same(1.0));
        assert_eq!(n.axis(0), m.axis(0));
    }

    #[test]
    fn matrix4_from_quaternion_rotates_like_quaternion() {
        let axis = Vector3::new(-1.0, 0.5, 2.0).normalized();
        let q = Quaternion::from_axis_angle(&axis, 2.0);
        let m = Matrix4::from_quaternion(&q);
        let v = Vector3::new(0.3, -1.0, 2.0);
        assert_abs_diff_eq!(
            v.transformed_by_matrix4(&m),
            v.rotated_by(&q),
            epsilon = 1e-5
        );
    }

    #[test]
    fn matrix4_arithmetic_operators_work() {
        let m = general_matrix();
        assert_eq!(m + m, 2.0 * m);
        assert_eq!(&m - &m, Matrix4::zeros());
        assert_eq!(-m, m * -1.0);
        let mut n = m;
        n *= Matrix4::identity();
        assert_eq!(n, m);
        n += m;
        n -= m;
        assert_eq!(n, m);
    }

    #[test]
    fn transforming_homogeneous_vector_matches_point_transform() {
        let m = Matrix4::perspective(FRAC_PI_4, 1.5, 0.1, 100.0);
        let p = Vector3::new(0.5, -0.25, -3.0);
        let h = p.extended(1.0).transformed_by_matrix4(&m);
        assert_abs_diff_eq!(
            h.xyz() / h.w(),
            p.transformed_by_matrix4(&m),
            epsilon = 1e-5
        );
        assert_abs_diff_eq!(
            Vector4::new(1.0, 2.0, 3.0, 1.0).transformed_by_matrix4(&Matrix4::identity()),
            Vector4::new(1.0, 2.0, 3.0, 1.0)
        );
    }

    proptest! {
        #[test]
        fn matrix4_multiplication_is_associative(
            a in matrix4_strategy(2.0),
            b in matrix4_strategy(2.0),
            c in matrix4_strategy(2.0),
        ) {
            let lhs = (a * b) * c;
            let rhs = a * (b * c);
            prop_assert!(lhs.elements().zip(rhs.elements()).all(|(l, r)| (l - r).abs() < 1e-3));
        }

        #[test]
        fn matrix4_product_matches_nalgebra(
            a in matrix4_strategy(5.0),
            b in matrix4_strategy(5.0),
        ) {
            let product = a * b;
            let expected = to_nalgebra(&b) * to_nalgebra(&a);
            for i in 0..4 {
                for j in 0..4 {
                    prop_assert!((f64::from(product.element(i, j)) - expected[(i, j)]).abs() < 1e-3);
                }
            }
        }

        #[test]
        fn inverting_rigid_matrix4_round_trips(
            axis in unit_vector3_strategy(),
            angle in -3.0_f32..3.0,
            tx in -10.0_f32..10.0,
            ty in -10.0_f32..10.0,
            tz in -10.0_f32..10.0,
        ) {
            let m = Matrix4::from_axis_rotation(&axis, angle)
                .with_translation(&Vector3::new(tx, ty, tz));
            let identity = m * m.inverted();
            prop_assert!(identity.elements().zip(Matrix4::identity().elements()).all(|(a, b)| (a - b).abs() < 1e-4));
        }

        #[test]
        fn transposing_matrix4_twice_is_identity_operation(m in matrix4_strategy(100.0)) {
            prop_assert_eq!(m.transposed().transposed(), m);
        }
    }
}
