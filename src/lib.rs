//! Vector, matrix and quaternion math for real-time graphics.

#[macro_use]
mod macros;

pub mod angle;
pub mod consts;
pub mod matrix;
pub mod num;
pub mod quaternion;
pub mod vector;

pub use angle::{Degrees, Radians};
pub use matrix::{Matrix3, Matrix4};
pub use quaternion::{EulerOrder, Quaternion};
pub use vector::{Vector2, Vector3, Vector4};
