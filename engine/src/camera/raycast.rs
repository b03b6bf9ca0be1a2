//! Raycast Module
//!
//! Rays through the viewport, plus the analytic intersections the gameplay
//! code needs on its own (board plane, sphere colliders). Scene-wide
//! raycasts go through the [`Scene`](crate::world::Scene) collaborator.

use glam::Vec3;

use super::Pose;
use crate::world::EntityId;

/// A half-line with a normalized direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Result of a successful scene raycast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// World-space hit point
    pub point: Vec3,
    /// Distance from the ray origin to `point`
    pub distance: f32,
    /// The collider's owning entity
    pub entity: EntityId,
}

impl Ray {
    /// Create a ray; `direction` is normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// The ray through the center of a pose's viewport.
    pub fn through_viewport_center(pose: &Pose) -> Self {
        Self::new(pose.position, pose.forward())
    }

    /// Ray from a pose through normalized viewport coordinates.
    ///
    /// # Arguments
    /// * `pose` - Viewer pose
    /// * `uv` - Normalized viewport coordinates (0-1, 0-1) where (0,0) is bottom-left
    /// * `fov_degrees` - Vertical field of view
    /// * `aspect_ratio` - Viewport width / height
    pub fn through_viewport(pose: &Pose, uv: (f32, f32), fov_degrees: f32, aspect_ratio: f32) -> Self {
        let ndc = (uv.0 * 2.0 - 1.0, uv.1 * 2.0 - 1.0);
        let half_fov = (fov_degrees.to_radians() * 0.5).tan();
        let local = Vec3::new(ndc.0 * aspect_ratio * half_fov, ndc.1 * half_fov, -1.0);
        Self::new(pose.position, pose.rotation * local)
    }

    /// Point at parameter `t` along the ray.
    #[inline]
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Intersect with an infinite plane.
    ///
    /// # Returns
    /// * `Some(t)` - Distance along the ray to the plane
    /// * `None` - If the ray is parallel to the plane or the plane is behind
    pub fn intersect_plane(&self, plane_point: Vec3, plane_normal: Vec3) -> Option<f32> {
        let denom = plane_normal.dot(self.direction);
        if denom.abs() < 0.0001 {
            // Ray is parallel to plane
            return None;
        }
        let t = (plane_point - self.origin).dot(plane_normal) / denom;
        if t < 0.0 {
            // Intersection is behind the origin
            return None;
        }
        Some(t)
    }

    /// Intersect with a sphere.
    ///
    /// Ray: P(t) = origin + t * dir, sphere: |P - center|² = r².
    /// Since dir is normalized the quadratic reduces to
    /// t² + 2t (oc · d) + (oc · oc - r²) = 0.
    ///
    /// # Returns
    /// * `Some(t)` - Closest positive hit (exit point when the origin is inside)
    /// * `None` - If the ray misses or the sphere is behind
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.dot(oc) - radius * radius;

        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_disc = discriminant.sqrt();
        let t1 = -b - sqrt_disc;
        let t2 = -b + sqrt_disc;

        if t1 > 0.001 {
            Some(t1)
        } else if t2 > 0.001 {
            Some(t2)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    #[test]
    fn test_center_ray_follows_forward() {
        let pose = Pose::new(Vec3::new(0.0, 1.6, 0.0), Quat::from_rotation_y(-90f32.to_radians()));
        let ray = Ray::through_viewport_center(&pose);
        assert!((ray.direction - Vec3::X).length() < 1e-5);
        assert_eq!(ray.origin, Vec3::new(0.0, 1.6, 0.0));
    }

    #[test]
    fn test_viewport_ray_normalized() {
        let pose = Pose::IDENTITY;
        for x in [0.0, 0.25, 0.5, 0.75, 1.0] {
            for y in [0.0, 0.5, 1.0] {
                let ray = Ray::through_viewport(&pose, (x, y), 60.0, 16.0 / 9.0);
                assert!(
                    (ray.direction.length() - 1.0).abs() < 0.001,
                    "Ray should be normalized, got length {}",
                    ray.direction.length()
                );
            }
        }
        let center = Ray::through_viewport(&pose, (0.5, 0.5), 60.0, 1.0);
        assert!((center.direction - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_plane_intersection() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let t = ray.intersect_plane(Vec3::ZERO, Vec3::Z).unwrap();
        assert!((t - 5.0).abs() < 1e-5);

        // Parallel
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::X);
        assert!(ray.intersect_plane(Vec3::ZERO, Vec3::Z).is_none());

        // Behind
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(ray.intersect_plane(Vec3::ZERO, Vec3::Z).is_none());
    }

    #[test]
    fn test_sphere_intersection_outside_and_inside() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let t = ray.intersect_sphere(Vec3::new(0.0, 0.0, -10.0), 1.0).unwrap();
        assert!((t - 9.0).abs() < 1e-4);

        let t = ray.intersect_sphere(Vec3::ZERO, 2.0).unwrap();
        assert!((t - 2.0).abs() < 1e-4);

        assert!(ray.intersect_sphere(Vec3::new(0.0, 0.0, 10.0), 1.0).is_none());
        assert!(ray.intersect_sphere(Vec3::new(5.0, 0.0, -10.0), 1.0).is_none());
    }
}
