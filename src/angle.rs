//! Angle units.
//!
//! Every rotation and projection routine in the crate takes plain `f32`
//! radians. These wrappers exist for call sites that carry angles around
//! and want the unit in the type.

use crate::consts::{FRAC_1_PI, PI};
use bytemuck::{Pod, Zeroable};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// An angle in degrees.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Zeroable, Pod)]
pub struct Degrees(pub f32);

/// An angle in radians.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Zeroable, Pod)]
pub struct Radians(pub f32);

impl Degrees {
    /// The angle in radians.
    #[inline]
    pub fn radians(self) -> f32 {
        degrees_to_radians(self.0)
    }
}

impl Radians {
    /// The angle in degrees.
    #[inline]
    pub fn degrees(self) -> f32 {
        radians_to_degrees(self.0)
    }
}

impl From<Radians> for Degrees {
    fn from(rad: Radians) -> Self {
        Self(rad.degrees())
    }
}

impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        Self(deg.radians())
    }
}

macro_rules! impl_angle_arithmetic {
    ($t:ident, $other:ident) => {
        impl Add for $t {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl Add<$other> for $t {
            type Output = Self;
            fn add(self, rhs: $other) -> Self {
                self + Self::from(rhs)
            }
        }

        impl Sub for $t {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl Sub<$other> for $t {
            type Output = Self;
            fn sub(self, rhs: $other) -> Self {
                self - Self::from(rhs)
            }
        }

        impl Mul<f32> for $t {
            type Output = Self;
            fn mul(self, rhs: f32) -> Self {
                Self(self.0 * rhs)
            }
        }

        impl Div<f32> for $t {
            type Output = Self;
            fn div(self, rhs: f32) -> Self {
                Self(self.0 / rhs)
            }
        }

        impl Neg for $t {
            type Output = Self;
            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl_abs_diff_eq!($t, |a, b, epsilon| {
            ::approx::AbsDiffEq::abs_diff_eq(&a.0, &b.0, epsilon)
        });

        impl_relative_eq!($t, |a, b, epsilon, max_relative| {
            ::approx::RelativeEq::relative_eq(&a.0, &b.0, epsilon, max_relative)
        });
    };
}

impl_angle_arithmetic!(Degrees, Radians);
impl_angle_arithmetic!(Radians, Degrees);

#[inline]
pub fn radians_to_degrees(radians: f32) -> f32 {
    radians * (180.0 * FRAC_1_PI)
}

#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * (PI / 180.0)
}
