//! Light Switch
//!
//! Toggles two groups of emissive objects in opposition: the "on" group
//! glows while the switch is on, the "off" group while it is off. The host
//! applies [`LightSwitch::emissions`] to its materials after each change.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::{Interactable, Interactor};
use crate::world::EntityId;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmissionTarget {
    pub entity: EntityId,
    pub color: [f32; 3],
    pub intensity: f32,
}

impl EmissionTarget {
    pub fn new(entity: EntityId) -> Self {
        Self {
            entity,
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
        }
    }

    fn emission(&self, active: bool) -> [f32; 3] {
        if active {
            self.color.map(|c| c * self.intensity)
        } else {
            [0.0; 3]
        }
    }
}

#[derive(Clone, Debug)]
pub struct LightSwitch {
    position: Vec3,
    on_group: Vec<EmissionTarget>,
    off_group: Vec<EmissionTarget>,
    is_on: bool,
    pub on_prompt: String,
    pub off_prompt: String,
    changed: bool,
}

impl LightSwitch {
    pub fn new(position: Vec3, on_group: Vec<EmissionTarget>, off_group: Vec<EmissionTarget>, is_on: bool) -> Self {
        Self {
            position,
            on_group,
            off_group,
            is_on,
            on_prompt: "Press E to turn OFF".to_string(),
            off_prompt: "Press E to turn ON".to_string(),
            changed: true,
        }
    }

    pub fn is_on(&self) -> bool {
        self.is_on
    }

    /// Emission color for every controlled object.
    pub fn emissions(&self) -> Vec<(EntityId, [f32; 3])> {
        let on = self.on_group.iter().map(|t| (t.entity, t.emission(self.is_on)));
        let off = self.off_group.iter().map(|t| (t.entity, t.emission(!self.is_on)));
        on.chain(off).collect()
    }

    /// True once after construction and after each toggle.
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }
}

impl Interactable for LightSwitch {
    fn prompt(&self) -> &str {
        if self.is_on { self.on_prompt.as_str() } else { self.off_prompt.as_str() }
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn interact(&mut self, _interactor: &mut Interactor<'_>) {
        self.is_on = !self.is_on;
        self.changed = true;
        tracing::debug!(on = self.is_on, "light switch toggled");
    }
}
