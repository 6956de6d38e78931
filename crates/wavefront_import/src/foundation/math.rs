//! Math utilities and types
//!
//! Vertex attributes are stored as `nalgebra` vectors so downstream
//! consumers can feed them straight into transform code.

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type (texture coordinates)
pub type Vec2 = Vector2<f32>;

/// 3D vector type (positions, normals, material colors)
pub type Vec3 = Vector3<f32>;
