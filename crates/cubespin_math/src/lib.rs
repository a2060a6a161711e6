//! 3D Mathematics Library
//!
//! Minimal vector and rotation types for the cubespin controllers.
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D vector, used for pointer deltas and angular velocity
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Quat`] - Unit quaternion for orientations

mod vec2;
mod vec3;
mod quat;

pub use vec2::Vec2;
pub use vec3::Vec3;
pub use quat::Quat;
