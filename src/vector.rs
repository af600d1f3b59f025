//! Vectors.

/// Implements the operations shared by every vector type. The type must be
/// a struct with a single `elements: [f32; N]` field.
macro_rules! impl_vector_common {
    ($t:ident, $n:literal) => {
        impl $t {
            /// Creates a new vector with all zeros.
            #[inline]
            pub const fn zeros() -> Self {
                Self {
                    elements: [0.0; $n],
                }
            }

            /// Creates a new vector with the same value for all components.
            #[inline]
            pub const fn same(value: f32) -> Self {
                Self {
                    elements: [value; $n],
                }
            }

            /// Creates a new vector from an array of components.
            #[inline]
            pub const fn from_array(elements: [f32; $n]) -> Self {
                Self { elements }
            }

            /// The components as an array.
            #[inline]
            pub const fn as_array(&self) -> &[f32; $n] {
                &self.elements
            }

            /// The components as a mutable array.
            #[inline]
            pub fn as_array_mut(&mut self) -> &mut [f32; $n] {
                &mut self.elements
            }

            fn elements(&self) -> impl Iterator<Item = f32> + '_ {
                self.elements.iter().copied()
            }

            /// Creates a new vector by applying the given closure to each
            /// component.
            #[inline]
            pub fn mapped(&self, f: impl FnMut(f32) -> f32) -> Self {
                Self {
                    elements: self.elements.map(f),
                }
            }

            #[inline]
            fn zip_mapped(&self, other: &Self, mut f: impl FnMut(f32, f32) -> f32) -> Self {
                Self {
                    elements: ::std::array::from_fn(|i| f(self.elements[i], other.elements[i])),
                }
            }

            /// Computes `self + other * scale`.
            #[inline]
            pub fn add_scaled(&self, other: &Self, scale: f32) -> Self {
                self.zip_mapped(other, |a, b| a + b * scale)
            }

            /// Computes the componentwise product of this and another vector.
            #[inline]
            pub fn component_mul(&self, other: &Self) -> Self {
                self.zip_mapped(other, |a, b| a * b)
            }

            /// Computes the componentwise quotient of this and another vector.
            #[inline]
            pub fn component_div(&self, other: &Self) -> Self {
                self.zip_mapped(other, |a, b| a / b)
            }

            /// Computes the reciprocal of each component.
            #[inline]
            pub fn component_inverse(&self) -> Self {
                self.mapped(|a| 1.0 / a)
            }

            /// Computes the componentwise minimum of this and another vector.
            #[inline]
            pub fn component_min(&self, other: &Self) -> Self {
                self.zip_mapped(other, f32::min)
            }

            /// Computes the componentwise maximum of this and another vector.
            #[inline]
            pub fn component_max(&self, other: &Self) -> Self {
                self.zip_mapped(other, f32::max)
            }

            #[inline]
            pub fn ceil(&self) -> Self {
                self.mapped(f32::ceil)
            }

            #[inline]
            pub fn floor(&self) -> Self {
                self.mapped(f32::floor)
            }

            #[inline]
            pub fn round(&self) -> Self {
                self.mapped(f32::round)
            }

            /// Clamps each component to `[min, max]`.
            #[inline]
            pub fn clamped(&self, min: f32, max: f32) -> Self {
                self.mapped(|a| a.max(min).min(max))
            }

            /// Clamps each component to `[0, 1]`.
            #[inline]
            pub fn saturated(&self) -> Self {
                self.clamped(0.0, 1.0)
            }

            /// Linearly interpolates from this vector towards `other`. `t` is
            /// not clamped.
            #[inline]
            pub fn lerp(&self, other: &Self, t: f32) -> Self {
                self.zip_mapped(other, |a, b| a + t * (b - a))
            }

            /// Linearly interpolates from this vector towards `other` with a
            /// separate interpolation parameter for each component.
            #[inline]
            pub fn lerp_componentwise(&self, other: &Self, t: &Self) -> Self {
                Self {
                    elements: ::std::array::from_fn(|i| {
                        let a = self.elements[i];
                        a + t.elements[i] * (other.elements[i] - a)
                    }),
                }
            }

            /// The point halfway between this and another vector.
            #[inline]
            pub fn midpoint(&self, other: &Self) -> Self {
                self.lerp(other, 0.5)
            }

            /// Computes the dot product of this vector with another.
            #[inline]
            pub fn dot(&self, other: &Self) -> f32 {
                self.elements().zip(other.elements()).map(|(a, b)| a * b).sum()
            }

            /// Computes the square of the norm of the vector.
            #[inline]
            pub fn norm_squared(&self) -> f32 {
                self.dot(self)
            }

            /// Computes the norm (length) of the vector.
            #[inline]
            pub fn norm(&self) -> f32 {
                self.norm_squared().sqrt()
            }

            /// Computes the Euclidean distance between this and another vector.
            #[inline]
            pub fn distance(&self, other: &Self) -> f32 {
                self.distance_squared(other).sqrt()
            }

            #[inline]
            pub fn distance_squared(&self, other: &Self) -> f32 {
                (other - self).norm_squared()
            }

            /// Computes the normalized version of the vector. If the norm is
            /// not above [`NORMALIZATION_THRESHOLD`](crate::consts::NORMALIZATION_THRESHOLD),
            /// the result is the zero vector.
            #[inline]
            pub fn normalized(&self) -> Self {
                let norm = self.norm();
                if norm > $crate::consts::NORMALIZATION_THRESHOLD {
                    self.mapped(|a| a / norm)
                } else {
                    Self::zeros()
                }
            }

            /// Normalizes the vector in place. See [`Self::normalized`].
            #[inline]
            pub fn normalize(&mut self) {
                *self = self.normalized();
            }

            /// Returns the vector in the same direction with the given norm.
            #[inline]
            pub fn with_norm(&self, norm: f32) -> Self {
                self.normalized() * norm
            }

            /// Returns a vector in the same direction whose norm does not
            /// exceed `max_norm`.
            #[inline]
            pub fn truncated(&self, max_norm: f32) -> Self {
                if self.norm() > max_norm {
                    self.with_norm(max_norm)
                } else {
                    *self
                }
            }

            /// Computes the angle in radians between this and another vector.
            /// The result is NaN if either vector is zero.
            ///
            /// Uses the half-angle between the unit vectors, which stays
            /// accurate for nearly parallel and antiparallel vectors.
            #[inline]
            pub fn angle(&self, other: &Self) -> f32 {
                let self_norm = self.norm();
                let other_norm = other.norm();
                let u = self.mapped(|a| a / self_norm);
                let v = other.mapped(|b| b / other_norm);
                2.0 * u.distance(&v).atan2(u.add_scaled(&v, 1.0).norm())
            }

            /// Whether every component differs from the corresponding
            /// component of `other` by less than [`EPSILON`](crate::consts::EPSILON).
            #[inline]
            pub fn approx_eq(&self, other: &Self) -> bool {
                self.elements()
                    .zip(other.elements())
                    .all(|(a, b)| $crate::num::approx_eq(a, b))
            }
        }

        impl From<[f32; $n]> for $t {
            fn from(elements: [f32; $n]) -> Self {
                Self::from_array(elements)
            }
        }

        impl From<$t> for [f32; $n] {
            fn from(vector: $t) -> Self {
                vector.elements
            }
        }

        impl ::std::ops::Index<usize> for $t {
            type Output = f32;

            #[inline]
            fn index(&self, index: usize) -> &Self::Output {
                &self.elements[index]
            }
        }

        impl ::std::ops::IndexMut<usize> for $t {
            #[inline]
            fn index_mut(&mut self, index: usize) -> &mut Self::Output {
                &mut self.elements[index]
            }
        }

        impl_binop!(Add, add, $t, $t, $t, |a, b| { a.zip_mapped(b, |a, b| a + b) });

        impl_binop!(Sub, sub, $t, $t, $t, |a, b| { a.zip_mapped(b, |a, b| a - b) });

        impl_binop!(Mul, mul, $t, f32, $t, |a, b| { a.mapped(|a| a * *b) });

        impl_binop!(Mul, mul, f32, $t, $t, |a, b| { b.mapped(|b| *a * b) });

        impl_binop!(Div, div, $t, f32, $t, |a, b| { a.mapped(|a| a / *b) });

        impl_binop_assign!(AddAssign, add_assign, $t, $t, |a, b| {
            *a = &*a + b;
        });

        impl_binop_assign!(SubAssign, sub_assign, $t, $t, |a, b| {
            *a = &*a - b;
        });

        impl_binop_assign!(MulAssign, mul_assign, $t, f32, |a, b| {
            *a = &*a * b;
        });

        impl_binop_assign!(DivAssign, div_assign, $t, f32, |a, b| {
            *a = &*a / b;
        });

        impl_unary_op!(Neg, neg, $t, $t, |val| { val.mapped(|a| -a) });

        impl_approx_for_elements!($t, elements);
    };
}

mod vector2;
mod vector3;
mod vector4;

pub use vector2::Vector2;
pub use vector3::Vector3;
pub use vector4::Vector4;
