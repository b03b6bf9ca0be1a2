//! World Module
//!
//! The scene as gameplay code sees it: opaque entity ids, a raycast query,
//! and the one visual side effect objectives need (swapping a target's
//! "Secret" child material). The engine implements [`Scene`]; the crate ships
//! [`SphereScene`] for headless runs and tests.

pub mod sphere_scene;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::camera::{Ray, RayHit};

pub use sphere_scene::{SphereCollider, SphereScene};

/// Opaque handle to a scene object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

/// Spatial queries and visual hooks supplied by the engine.
pub trait Scene {
    /// Closest hit along `ray` within `max_distance`.
    fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<RayHit>;

    /// Replace the material of the entity's "Secret" child, if it has one.
    fn reveal_secret(&mut self, entity: EntityId, material: &str);
}
