//! Pose Module
//!
//! Position + orientation of anything that looks at the world: the player
//! camera, the photo camera lens, a terminal view point.
//!
//! # Coordinate System
//! - +X = right
//! - +Y = up
//! - -Z = forward (OpenGL/Vulkan convention)

use glam::{Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// World-space position and rotation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    /// Origin, looking toward -Z.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// A pose at `position` facing `target`.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            rotation: look_rotation(target - position, Vec3::Y),
        }
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    #[inline]
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Local-space point to world space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }

    /// World-space point to local space.
    pub fn inverse_transform_point(&self, world: Vec3) -> Vec3 {
        self.rotation.inverse() * (world - self.position)
    }

    /// Interpolate position linearly and rotation with normalized lerp.
    pub fn lerp(&self, other: &Pose, t: f32) -> Pose {
        Pose {
            position: self.position.lerp(other.position, t),
            rotation: self.rotation.lerp(other.rotation, t).normalize(),
        }
    }

    /// Project a world point into this pose's viewport.
    ///
    /// Returns `(x, y, depth)` where x and y are normalized viewport
    /// coordinates ((0,0) bottom-left, (1,1) top-right) and depth is the
    /// distance along the view axis. Points behind the viewer have depth <= 0
    /// and meaningless x/y.
    ///
    /// # Arguments
    /// * `point` - World-space point
    /// * `fov_degrees` - Vertical field of view
    /// * `aspect_ratio` - Viewport width / height
    pub fn world_to_viewport(&self, point: Vec3, fov_degrees: f32, aspect_ratio: f32) -> Vec3 {
        let local = self.inverse_transform_point(point);
        let depth = -local.z;
        if depth.abs() < f32::EPSILON {
            return Vec3::new(0.5, 0.5, depth);
        }
        let half_height = (fov_degrees.to_radians() * 0.5).tan();
        let half_width = half_height * aspect_ratio;
        let x = 0.5 + 0.5 * local.x / (depth * half_width);
        let y = 0.5 + 0.5 * local.y / (depth * half_height);
        Vec3::new(x, y, depth)
    }

    /// Whether a world point lands inside the viewport in front of the viewer.
    pub fn sees_point(&self, point: Vec3, fov_degrees: f32, aspect_ratio: f32) -> bool {
        let v = self.world_to_viewport(point, fov_degrees, aspect_ratio);
        v.z > 0.0 && (0.0..=1.0).contains(&v.x) && (0.0..=1.0).contains(&v.y)
    }
}

/// Rotation whose forward (-Z) axis points along `forward`.
///
/// Falls back to world X as the right axis when `forward` is parallel to `up`.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let f = forward.normalize_or_zero();
    if f == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let back = -f;
    let right = {
        let r = up.cross(back);
        if r.length_squared() < 1e-6 {
            Vec3::X
        } else {
            r.normalize()
        }
    };
    let true_up = back.cross(right).normalize();
    Quat::from_mat3(&Mat3::from_cols(right, true_up, back)).normalize()
}
