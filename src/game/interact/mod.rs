//! Interaction Module
//!
//! Things the player can use by looking at them and pressing the interact
//! key. The [`InteractionController`] finds the current target with a
//! center-screen raycast; every usable object implements [`Interactable`].
//!
//! # Example
//!
//! ```rust,ignore
//! let mut targets = InteractableMap::new();
//! targets.insert(EntityId(7), Box::new(Door::new(door_pose)));
//!
//! let mut interactor = Interactor::new(player.position(), player.eye_pose(), 60.0, &mut inventory, &mut audio);
//! for event in controller.update(&scene, &input, &mut targets, &mut interactor) {
//!     // highlight / prompt / interacted
//! }
//! ```

pub mod controller;
pub mod door;
pub mod inventory;
pub mod light_switch;

use std::collections::BTreeMap;

use glam::Vec3;

use crate::camera::Pose;
use crate::services::AudioSink;
use crate::world::EntityId;

pub use controller::{InteractionController, InteractionEvent};
pub use door::{Door, LockedDoor};
pub use inventory::{Inventory, Key};
pub use light_switch::{EmissionTarget, LightSwitch};

/// The player, as seen by whatever they interact with.
pub struct Interactor<'a> {
    /// Body position
    pub position: Vec3,
    /// Eye pose
    pub view: Pose,
    pub fov_degrees: f32,
    pub inventory: &'a mut Inventory,
    pub audio: &'a mut dyn AudioSink,
}

impl<'a> Interactor<'a> {
    pub fn new(
        position: Vec3,
        view: Pose,
        fov_degrees: f32,
        inventory: &'a mut Inventory,
        audio: &'a mut dyn AudioSink,
    ) -> Self {
        Self {
            position,
            view,
            fov_degrees,
            inventory,
            audio,
        }
    }
}

/// An object the player can use.
pub trait Interactable {
    /// Text shown while the object is targeted.
    fn prompt(&self) -> &str;

    /// Reach override. `None` uses the configured default.
    fn interaction_distance(&self) -> Option<f32> {
        None
    }

    /// World position used for the reach check.
    fn position(&self) -> Vec3;

    fn interact(&mut self, interactor: &mut Interactor<'_>);
}

/// Resolves raycast hits to interactables. Hosts that own their objects as
/// concrete types implement this over their world struct.
pub trait InteractableLookup {
    fn get(&self, entity: EntityId) -> Option<&dyn Interactable>;
    fn get_mut(&mut self, entity: EntityId) -> Option<&mut dyn Interactable>;
}

/// Boxed interactables keyed by entity.
#[derive(Default)]
pub struct InteractableMap {
    entries: BTreeMap<EntityId, Box<dyn Interactable>>,
}

impl InteractableMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity: EntityId, interactable: Box<dyn Interactable>) {
        self.entries.insert(entity, interactable);
    }

    pub fn remove(&mut self, entity: EntityId) -> Option<Box<dyn Interactable>> {
        self.entries.remove(&entity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl InteractableLookup for InteractableMap {
    fn get(&self, entity: EntityId) -> Option<&dyn Interactable> {
        self.entries.get(&entity).map(|b| b.as_ref())
    }

    fn get_mut(&mut self, entity: EntityId) -> Option<&mut dyn Interactable> {
        match self.entries.get_mut(&entity) {
            Some(b) => Some(b.as_mut()),
            None => None,
        }
    }
}
