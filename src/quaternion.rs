//! Quaternions.

use crate::{
    consts::{EPSILON, NORMALIZATION_THRESHOLD, PI},
    matrix::{Matrix3, Matrix4},
    vector::Vector3,
};
use anyhow::{Result, anyhow};
use bytemuck::{Pod, Zeroable};
use std::{fmt, str::FromStr};

/// A quaternion `(x, y, z, w)` with `w` as the real part.
///
/// Quaternions representing rotations are expected to have unit length, but
/// this is not enforced. Use [`Self::normalized`] to restore it after
/// accumulating error.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Zeroable, Pod)]
pub struct Quaternion {
    elements: [f32; 4],
}

/// The order in which the elementary rotations of [`Quaternion::from_euler`]
/// are composed. `Xyz` gives `rx * ry * rz`, so the z-rotation is applied to a
/// vector first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EulerOrder {
    Xyz,
    Xzy,
    Yxz,
    Yzx,
    Zxy,
    Zyx,
}

impl Quaternion {
    /// Creates a new quaternion with the given components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self {
            elements: [x, y, z, w],
        }
    }

    /// Creates the identity rotation.
    #[inline]
    pub const fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Creates a new quaternion from `[x, y, z, w]`.
    #[inline]
    pub const fn from_array(elements: [f32; 4]) -> Self {
        Self { elements }
    }

    /// The components as `[x, y, z, w]`.
    #[inline]
    pub const fn as_array(&self) -> &[f32; 4] {
        &self.elements
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.elements[0]
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.elements[1]
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.elements[2]
    }

    #[inline]
    pub fn w(&self) -> f32 {
        self.elements[3]
    }

    /// Overwrites all components.
    #[inline]
    pub fn set(&mut self, x: f32, y: f32, z: f32, w: f32) {
        self.elements = [x, y, z, w];
    }

    /// Creates a rotation of `angle` radians about the given unit axis.
    pub fn from_axis_angle(axis: &Vector3, angle: f32) -> Self {
        let (s, c) = (angle * 0.5).sin_cos();
        Self::new(s * axis.x(), s * axis.y(), s * axis.z(), c)
    }

    /// Decomposes the rotation into an angle in radians and a unit axis.
    ///
    /// When the angle is too close to zero for the axis to be recovered, the
    /// x-axis is returned.
    pub fn to_axis_angle(&self) -> (f32, Vector3) {
        let [x, y, z, w] = self.elements;
        let s = (x * x + y * y + z * z).sqrt();
        let angle = 2.0 * s.atan2(w);

        let axis = if s > EPSILON {
            Vector3::new(x / s, y / s, z / s)
        } else {
            log::trace!("Rotation angle {angle} too small to determine axis, using x-axis");
            Vector3::unit_x()
        };

        (angle, axis)
    }

    /// Creates a rotation from Euler angles in radians, composed in the
    /// given order.
    pub fn from_euler(x_angle: f32, y_angle: f32, z_angle: f32, order: EulerOrder) -> Self {
        let (sx, cx) = (x_angle * 0.5).sin_cos();
        let (sy, cy) = (y_angle * 0.5).sin_cos();
        let (sz, cz) = (z_angle * 0.5).sin_cos();

        let a = sx * cy * cz;
        let b = cx * sy * sz;
        let c = cx * sy * cz;
        let d = sx * cy * sz;
        let e = cx * cy * sz;
        let f = sx * sy * cz;
        let g = cx * cy * cz;
        let h = sx * sy * sz;

        match order {
            EulerOrder::Xyz => Self::new(a + b, c - d, e + f, g - h),
            EulerOrder::Xzy => Self::new(a - b, c - d, e + f, g + h),
            EulerOrder::Yxz => Self::new(a + b, c - d, e - f, g + h),
            EulerOrder::Yzx => Self::new(a + b, c + d, e - f, g - h),
            EulerOrder::Zxy => Self::new(a - b, c + d, e + f, g - h),
            EulerOrder::Zyx => Self::new(a - b, c + d, e - f, g + h),
        }
    }

    /// Like [`Self::from_euler`], but with the order given as a string such
    /// as `"xyz"`.
    ///
    /// # Errors
    /// Returns an error if `order` does not name one of the six orders.
    pub fn from_euler_str(x_angle: f32, y_angle: f32, z_angle: f32, order: &str) -> Result<Self> {
        Ok(Self::from_euler(x_angle, y_angle, z_angle, order.parse()?))
    }

    /// Extracts the rotation from a rotation matrix.
    pub fn from_matrix3(matrix: &Matrix3) -> Self {
        Self::from_rotation_slots(matrix.as_array())
    }

    /// Extracts the rotation from the upper-left 3x3 block of a matrix.
    pub fn from_matrix4(matrix: &Matrix4) -> Self {
        Self::from_rotation_slots(matrix.as_array())
    }

    /// Shoemake's extraction on a row-major block with a row stride of 4.
    fn from_rotation_slots(m: &[f32]) -> Self {
        let trace = m[0] + m[5] + m[10];

        if trace > 0.0 {
            let root = (trace + 1.0).sqrt();
            let inv_root = 0.5 / root;
            Self::new(
                (m[6] - m[9]) * inv_root,
                (m[8] - m[2]) * inv_root,
                (m[1] - m[4]) * inv_root,
                0.5 * root,
            )
        } else {
            let mut i = 0;
            if m[5] > m[0] {
                i = 1;
            }
            if m[10] > m[i * 4 + i] {
                i = 2;
            }
            let j = (i + 1) % 3;
            let k = (i + 2) % 3;

            let root = (m[i * 4 + i] - m[j * 4 + j] - m[k * 4 + k] + 1.0).sqrt();
            let inv_root = 0.5 / root;

            let mut elements = [0.0; 4];
            elements[i] = 0.5 * root;
            elements[j] = (m[j * 4 + i] + m[i * 4 + j]) * inv_root;
            elements[k] = (m[k * 4 + i] + m[i * 4 + k]) * inv_root;
            elements[3] = (m[j * 4 + k] - m[k * 4 + j]) * inv_root;
            Self { elements }
        }
    }

    /// The nine elements of the equivalent rotation matrix, row by row.
    pub(crate) fn rotation_elements(&self) -> [f32; 9] {
        let [x, y, z, w] = self.elements;
        let (x2, y2, z2) = (x + x, y + y, z + z);

        let xx = x * x2;
        let yx = y * x2;
        let yy = y * y2;
        let zx = z * x2;
        let zy = z * y2;
        let zz = z * z2;
        let wx = w * x2;
        let wy = w * y2;
        let wz = w * z2;

        [
            1.0 - yy - zz,
            yx + wz,
            zx - wy,
            yx - wz,
            1.0 - xx - zz,
            zy + wx,
            zx + wy,
            zy - wx,
            1.0 - xx - yy,
        ]
    }

    /// Applies a rotation of `angle` radians about the x-axis before this
    /// rotation, i.e. computes `self * rx` in place.
    pub fn rotate_x(&mut self, angle: f32) {
        let [qx, qy, qz, qw] = self.elements;
        let (bx, bw) = (angle * 0.5).sin_cos();
        self.set(qx * bw + qw * bx, qy * bw + qz * bx, qz * bw - qy * bx, qw * bw - qx * bx);
    }

    /// Like [`Self::rotate_x`], returning a new quaternion.
    pub fn rotated_x(&self, angle: f32) -> Self {
        let mut q = *self;
        q.rotate_x(angle);
        q
    }

    /// Applies a rotation of `angle` radians about the y-axis before this
    /// rotation.
    pub fn rotate_y(&mut self, angle: f32) {
        let [qx, qy, qz, qw] = self.elements;
        let (by, bw) = (angle * 0.5).sin_cos();
        self.set(qx * bw - qz * by, qy * bw + qw * by, qz * bw + qx * by, qw * bw - qy * by);
    }

    /// Like [`Self::rotate_y`], returning a new quaternion.
    pub fn rotated_y(&self, angle: f32) -> Self {
        let mut q = *self;
        q.rotate_y(angle);
        q
    }

    /// Applies a rotation of `angle` radians about the z-axis before this
    /// rotation.
    pub fn rotate_z(&mut self, angle: f32) {
        let [qx, qy, qz, qw] = self.elements;
        let (bz, bw) = (angle * 0.5).sin_cos();
        self.set(qx * bw + qy * bz, qy * bw - qx * bz, qz * bw + qw * bz, qw * bw - qz * bz);
    }

    /// Like [`Self::rotate_z`], returning a new quaternion.
    pub fn rotated_z(&self, angle: f32) -> Self {
        let mut q = *self;
        q.rotate_z(angle);
        q
    }

    /// Spherically interpolates between this and another rotation along the
    /// shortest path. Nearly identical rotations are interpolated linearly,
    /// which keeps both endpoints exact.
    pub fn slerp(&self, other: &Self, t: f32) -> Self {
        let mut b = *other;
        let mut cos_omega = self.dot(&b);

        if cos_omega < 0.0 {
            cos_omega = -cos_omega;
            b = -b;
        }

        if 1.0 - cos_omega > EPSILON {
            let omega = cos_omega.acos();
            let sin_omega = omega.sin();
            let scale0 = ((1.0 - t) * omega).sin() / sin_omega;
            let scale1 = (t * omega).sin() / sin_omega;
            self.zip_mapped(&b, |a, b| scale0 * a + scale1 * b)
        } else {
            self.zip_mapped(&b, |a, b| (1.0 - t) * a + t * b)
        }
    }

    /// Spherical quadrangle interpolation from `self` to `d` with `b` and `c`
    /// as control points.
    pub fn sqlerp(&self, b: &Self, c: &Self, d: &Self, t: f32) -> Self {
        let outer = self.slerp(d, t);
        let inner = b.slerp(c, t);
        outer.slerp(&inner, 2.0 * t * (1.0 - t))
    }

    /// Creates the shortest rotation taking the unit vector `a` to the unit
    /// vector `b`.
    pub fn rotation_to(a: &Vector3, b: &Vector3) -> Self {
        let dot = a.dot(b);

        if dot < -0.999999 {
            let mut axis = Vector3::unit_x().cross(a);
            if axis.norm() < 0.000001 {
                axis = Vector3::unit_y().cross(a);
            }
            log::trace!("Vectors are antiparallel, rotating half a turn about {axis:?}");
            Self::from_axis_angle(&axis.normalized(), PI)
        } else if dot > 0.999999 {
            Self::identity()
        } else {
            let axis = a.cross(b);
            Self::new(axis.x(), axis.y(), axis.z(), 1.0 + dot).normalized()
        }
    }

    /// Computes the multiplicative inverse. The zero quaternion gives zero.
    pub fn inverse(&self) -> Self {
        let norm_squared = self.norm_squared();
        let inv = if norm_squared != 0.0 {
            1.0 / norm_squared
        } else {
            0.0
        };
        self.conjugate() * inv
    }

    /// Negates the imaginary part.
    pub fn conjugate(&self) -> Self {
        let [x, y, z, w] = self.elements;
        Self::new(-x, -y, -z, w)
    }

    /// The angle in radians of the rotation taking this rotation to
    /// `other`. Both must have unit length.
    pub fn angle_between(&self, other: &Self) -> f32 {
        let d = self.dot(other);
        (2.0 * d * d - 1.0).acos()
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.elements()
            .zip(other.elements())
            .map(|(a, b)| a * b)
            .sum()
    }

    /// Linearly interpolates componentwise without renormalizing.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        self.zip_mapped(other, |a, b| a + t * (b - a))
    }

    #[inline]
    pub fn norm_squared(&self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn norm(&self) -> f32 {
        self.norm_squared().sqrt()
    }

    /// Scales the quaternion to unit length. A quaternion with a norm at or
    /// below [`NORMALIZATION_THRESHOLD`] gives the identity.
    pub fn normalized(&self) -> Self {
        let norm = self.norm();
        if norm > NORMALIZATION_THRESHOLD {
            self.mapped(|q| q / norm)
        } else {
            Self::identity()
        }
    }

    /// Normalizes the quaternion in place.
    pub fn normalize(&mut self) {
        *self = self.normalized();
    }

    /// Whether every component differs from the corresponding component of
    /// `other` by less than [`EPSILON`].
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.elements()
            .zip(other.elements())
            .all(|(a, b)| crate::num::approx_eq(a, b))
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
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<[f32; 4]> for Quaternion {
    fn from(elements: [f32; 4]) -> Self {
        Self::from_array(elements)
    }
}

impl From<Quaternion> for [f32; 4] {
    fn from(quaternion: Quaternion) -> Self {
        quaternion.elements
    }
}

impl_binop!(Mul, mul, Quaternion, Quaternion, Quaternion, |a, b| {
    let [ax, ay, az, aw] = a.elements;
    let [bx, by, bz, bw] = b.elements;
    Quaternion::new(
        ax * bw + aw * bx + ay * bz - az * by,
        ay * bw + aw * by + az * bx - ax * bz,
        az * bw + aw * bz + ax * by - ay * bx,
        aw * bw - ax * bx - ay * by - az * bz,
    )
});

impl_binop!(Add, add, Quaternion, Quaternion, Quaternion, |a, b| {
    a.zip_mapped(b, |a, b| a + b)
});

impl_binop!(Sub, sub, Quaternion, Quaternion, Quaternion, |a, b| {
    a.zip_mapped(b, |a, b| a - b)
});

impl_binop!(Mul, mul, Quaternion, f32, Quaternion, |a, b| {
    a.mapped(|a| a * *b)
});

impl_binop!(Mul, mul, f32, Quaternion, Quaternion, |a, b| {
    b.mapped(|b| *a * b)
});

impl_binop!(Div, div, Quaternion, f32, Quaternion, |a, b| {
    a.mapped(|a| a / *b)
});

impl_binop_assign!(MulAssign, mul_assign, Quaternion, Quaternion, |a, b| {
    *a = &*a * b;
});

impl_binop_assign!(AddAssign, add_assign, Quaternion, Quaternion, |a, b| {
    *a = &*a + b;
});

impl_binop_assign!(SubAssign, sub_assign, Quaternion, Quaternion, |a, b| {
    *a = &*a - b;
});

impl_binop_assign!(MulAssign, mul_assign, Quaternion, f32, |a, b| {
    *a = &*a * b;
});

impl_binop_assign!(DivAssign, div_assign, Quaternion, f32, |a, b| {
    *a = &*a / b;
});

impl_unary_op!(Neg, neg, Quaternion, Quaternion, |val| { val.mapped(|q| -q) });

impl_approx_for_elements!(Quaternion, elements);

impl fmt::Debug for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quaternion")
            .field("x", &self.x())
            .field("y", &self.y())
            .field("z", &self.z())
            .field("w", &self.w())
            .finish()
    }
}

impl EulerOrder {
    pub const ALL: [Self; 6] = [
        Self::Xyz,
        Self::Xzy,
        Self::Yxz,
        Self::Yzx,
        Self::Zxy,
        Self::Zyx,
    ];

    /// The lowercase axis sequence, e.g. `"xyz"`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Xyz => "xyz",
            Self::Xzy => "xzy",
            Self::Yxz => "yxz",
            Self::Yzx => "yzx",
            Self::Zxy => "zxy",
            Self::Zyx => "zyx",
        }
    }
}

impl FromStr for EulerOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|order| order.as_str() == s)
            .ok_or_else(|| {
                log::warn!("Rejected unknown Euler rotation order `{s}`");
                anyhow!("Unknown rotation order: {s}")
            })
    }
}

impl fmt::Display for EulerOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
