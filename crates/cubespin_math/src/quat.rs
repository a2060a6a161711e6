//! Quaternion for representing 3D orientations
//!
//! Quaternions are stored as (x, y, z, w) with w the scalar part.
//! Composition follows the Hamilton product: `a * b` applies `b` first,
//! then `a`.

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};
use crate::Vec3;

/// Unit quaternion for orientations
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    /// Identity quaternion (no rotation)
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle` radians about `axis`
    ///
    /// The axis is normalized first; a zero axis yields the identity.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let axis = axis.normalized();
        if axis == Vec3::ZERO {
            return Self::IDENTITY;
        }
        let half = angle * 0.5;
        let s = half.sin();
        Self::new(axis.x * s, axis.y * s, axis.z * s, half.cos())
    }

    /// Rotation of `degrees` about `axis`
    #[inline]
    pub fn from_axis_angle_degrees(axis: Vec3, degrees: f32) -> Self {
        Self::from_axis_angle(axis, degrees.to_radians())
    }

    /// Build an orientation from Euler angles in degrees
    ///
    /// The rotation about X is applied first, then Y, then Z, all about
    /// the fixed world axes.
    pub fn from_euler_degrees(euler: Vec3) -> Self {
        let qx = Self::from_axis_angle_degrees(Vec3::X, euler.x);
        let qy = Self::from_axis_angle_degrees(Vec3::Y, euler.y);
        let qz = Self::from_axis_angle_degrees(Vec3::Z, euler.z);
        qz * qy * qx
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Normalize to unit magnitude
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            let inv = 1.0 / mag;
            Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
        } else {
            Self::IDENTITY
        }
    }

    /// Conjugate; the inverse rotation for unit quaternions
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Compose two rotations: `self.compose(other)` applies `other` first
    pub fn compose(&self, other: &Self) -> Self {
        let (a, b) = (self, other);
        Self {
            x: a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            y: a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            z: a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
            w: a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        }
    }

    /// Rotate a vector by this quaternion
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        let q = Vec3::new(self.x, self.y, self.z);
        let t = q.cross(v) * 2.0;
        v + t * self.w + q.cross(t)
    }

    /// Components as [x, y, z, w]
    #[inline]
    pub fn to_array(&self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl std::ops::Mul for Quat {
    type Output = Self;
    #[inline]
    fn mul(self, other: Self) -> Self {
        self.compose(&other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn test_identity_rotation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!(approx_eq(Quat::IDENTITY.rotate(v), v));
    }

    #[test]
    fn test_y_rotation_90() {
        // +90 degrees about Y maps +X to -Z
        let q = Quat::from_axis_angle_degrees(Vec3::Y, 90.0);
        assert!(approx_eq(q.rotate(Vec3::X), -Vec3::Z));
    }

    #[test]
    fn test_x_rotation_90() {
        // +90 degrees about X maps +Y to +Z
        let q = Quat::from_axis_angle_degrees(Vec3::X, 90.0);
        assert!(approx_eq(q.rotate(Vec3::Y), Vec3::Z));
    }

    #[test]
    fn test_compose_order() {
        let a = Quat::from_axis_angle_degrees(Vec3::Z, 90.0);
        let b = Quat::from_axis_angle_degrees(Vec3::X, 90.0);
        // b first: Y -> Z, then a leaves Z unchanged
        assert!(approx_eq((a * b).rotate(Vec3::Y), Vec3::Z));
        // a first: Y -> -X, then b leaves X unchanged
        assert!(approx_eq((b * a).rotate(Vec3::Y), -Vec3::X));
    }

    #[test]
    fn test_compose_inverse() {
        let q = Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 0.7);
        let id = q * q.conjugate();
        assert!((id.w - 1.0).abs() < EPSILON);
        assert!(id.x.abs() < EPSILON && id.y.abs() < EPSILON && id.z.abs() < EPSILON);
    }

    #[test]
    fn test_rotation_preserves_length() {
        let q = Quat::from_axis_angle(Vec3::new(0.3, -1.0, 2.0), 1.234);
        let v = Vec3::new(3.0, -4.0, 5.0);
        assert!((q.rotate(v).length() - v.length()).abs() < 1e-4);
    }

    #[test]
    fn test_zero_axis_is_identity() {
        assert_eq!(Quat::from_axis_angle(Vec3::ZERO, 1.0), Quat::IDENTITY);
    }

    #[test]
    fn test_euler_single_axis() {
        let q = Quat::from_euler_degrees(Vec3::new(0.0, 0.0, -90.0));
        assert!(approx_eq(q.rotate(Vec3::Y), Vec3::X));
    }

    #[test]
    fn test_normalize() {
        let q = Quat::new(0.0, 0.0, 0.0, 2.0).normalize();
        assert_eq!(q, Quat::IDENTITY);
        let zero = Quat::new(0.0, 0.0, 0.0, 0.0).normalize();
        assert_eq!(zero, Quat::IDENTITY);
    }
}
