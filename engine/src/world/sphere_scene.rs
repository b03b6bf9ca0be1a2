//! Sphere Scene
//!
//! Minimal [`Scene`] made of sphere colliders. Enough for the headless
//! binaries and for tests that need a real raycast.

use std::collections::HashMap;

use glam::Vec3;

use super::{EntityId, Scene};
use crate::camera::{Ray, RayHit};

/// A sphere collider owned by an entity.
#[derive(Clone, Copy, Debug)]
pub struct SphereCollider {
    pub entity: EntityId,
    pub center: Vec3,
    pub radius: f32,
}

/// Scene of sphere colliders with a record of revealed secrets.
#[derive(Clone, Debug, Default)]
pub struct SphereScene {
    pub colliders: Vec<SphereCollider>,
    revealed: HashMap<EntityId, String>,
}

impl SphereScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a collider and return its entity for chaining.
    pub fn add(&mut self, entity: EntityId, center: Vec3, radius: f32) -> EntityId {
        self.colliders.push(SphereCollider {
            entity,
            center,
            radius,
        });
        entity
    }

    pub fn remove(&mut self, entity: EntityId) {
        self.colliders.retain(|c| c.entity != entity);
    }

    /// Material currently shown on the entity's secret child, if revealed.
    pub fn revealed_secret(&self, entity: EntityId) -> Option<&str> {
        self.revealed.get(&entity).map(String::as_str)
    }
}

impl Scene for SphereScene {
    fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<RayHit> {
        self.colliders
            .iter()
            .filter_map(|c| {
                ray.intersect_sphere(c.center, c.radius)
                    .filter(|&t| t <= max_distance)
                    .map(|t| RayHit {
                        point: ray.point_at(t),
                        distance: t,
                        entity: c.entity,
                    })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn reveal_secret(&mut self, entity: EntityId, material: &str) {
        self.revealed.insert(entity, material.to_string());
    }
}
