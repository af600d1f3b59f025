//! Matrices.
//!
//! Both matrix types store their elements as consecutive rows of four
//! floats, which is the layout WGSL expects for `mat3x3<f32>` and
//! `mat4x4<f32>` uniforms. A row holds one basis axis, and the last row of a
//! [`Matrix4`] holds the translation. Points are transformed as
//! `p' = Σ p_i * row_i`, so `a * b` applies `b` first and `a` second.

mod matrix3;
mod matrix4;

pub use matrix3::Matrix3;
pub use matrix4::Matrix4;
