//! Face picking
//!
//! Maps a pointer position to the cube face under it by casting a ray from
//! the camera and intersecting it with the unit cube in cube space.

use cubespin_input::{PointerPoint, ViewportSize};
use cubespin_math::{Quat, Vec3};

use crate::cube::FaceDirection;

/// Half the edge length of the cube
const HALF_EXTENT: f32 = 0.5;

/// A ray with a unit direction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Ray through `point` from a camera at `camera_pos` looking down -Z
pub fn camera_ray(point: PointerPoint, viewport: ViewportSize, camera_pos: Vec3, fov_y_degrees: f32) -> Ray {
    let aspect = if viewport.height > 0.0 { viewport.width / viewport.height } else { 1.0 };
    let half_height = (fov_y_degrees.to_radians() * 0.5).tan();
    let ndc_x = 2.0 * point.x / viewport.width.max(1.0) - 1.0;
    let ndc_y = 1.0 - 2.0 * point.y / viewport.height.max(1.0);

    Ray {
        origin: camera_pos,
        direction: Vec3::new(ndc_x * half_height * aspect, ndc_y * half_height, -1.0).normalized(),
    }
}

/// Face of a unit cube at the origin with `orientation` hit first by `ray`
pub fn pick_face(orientation: Quat, ray: Ray) -> Option<FaceDirection> {
    let inverse = orientation.conjugate();
    let origin = inverse.rotate(ray.origin).to_array();
    let direction = inverse.rotate(ray.direction).to_array();

    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    let mut entry: Option<(usize, bool)> = None;

    for axis in 0..3 {
        let (o, d) = (origin[axis], direction[axis]);
        if d.abs() < f32::EPSILON {
            if o.abs() > HALF_EXTENT {
                return None;
            }
            continue;
        }
        let t0 = (-HALF_EXTENT - o) / d;
        let t1 = (HALF_EXTENT - o) / d;
        let (t_min, t_max) = if t0 < t1 { (t0, t1) } else { (t1, t0) };
        if t_min > t_near {
            t_near = t_min;
            // Travelling toward +axis enters through the negative face
            entry = Some((axis, d < 0.0));
        }
        t_far = t_far.min(t_max);
    }

    if t_near > t_far || t_far < 0.0 || t_near < 0.0 {
        return None;
    }

    let (axis, positive) = entry?;
    Some(match (axis, positive) {
        (0, true) => FaceDirection::PosX,
        (0, false) => FaceDirection::NegX,
        (1, true) => FaceDirection::PosY,
        (1, false) => FaceDirection::NegY,
        (2, true) => FaceDirection::PosZ,
        _ => FaceDirection::NegZ,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: ViewportSize = ViewportSize::new(800.0, 600.0);

    #[test]
    fn test_center_ray_points_forward() {
        let ray = camera_ray(PointerPoint::new(400.0, 300.0), VIEWPORT, Vec3::new(0.0, 0.0, 2.0), 45.0);
        assert!((ray.direction - (-Vec3::Z)).length() < 1e-6);
    }

    #[test]
    fn test_center_hits_front_face() {
        let ray = camera_ray(PointerPoint::new(400.0, 300.0), VIEWPORT, Vec3::new(0.0, 0.0, 2.0), 45.0);
        assert_eq!(pick_face(Quat::IDENTITY, ray), Some(FaceDirection::PosZ));
    }

    #[test]
    fn test_rotated_cube_shows_other_face() {
        // Turning the cube +90 degrees about Y brings its -X face to the front
        let q = Quat::from_axis_angle_degrees(Vec3::Y, 90.0);
        let ray = Ray { origin: Vec3::new(0.0, 0.0, 2.0), direction: -Vec3::Z };
        assert_eq!(pick_face(q, ray), Some(FaceDirection::NegX));
    }

    #[test]
    fn test_miss() {
        let ray = camera_ray(PointerPoint::new(0.0, 0.0), VIEWPORT, Vec3::new(0.0, 0.0, 2.0), 45.0);
        assert_eq!(pick_face(Quat::IDENTITY, ray), None);
    }

    #[test]
    fn test_cube_behind_camera() {
        let ray = Ray { origin: Vec3::new(0.0, 0.0, 2.0), direction: Vec3::Z };
        assert_eq!(pick_face(Quat::IDENTITY, ray), None);
    }

    #[test]
    fn test_top_face_from_above() {
        let ray = Ray { origin: Vec3::new(0.1, 3.0, 0.0), direction: -Vec3::Y };
        assert_eq!(pick_face(Quat::IDENTITY, ray), Some(FaceDirection::PosY));
    }
}
