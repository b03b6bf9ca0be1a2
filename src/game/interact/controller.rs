//! Interaction Controller
//!
//! Each frame a ray is cast from the center of the player's view. The hit is
//! the current target only when it resolves to a registered interactable
//! and the player's body is within that object's reach. Changes of target
//! and prompt text are reported as edges so the host only touches the
//! highlight and prompt UI when something changed.

use crate::camera::Ray;
use crate::game::config::InteractionConfig;
use crate::input::{InputAction, InputState};
use crate::world::{EntityId, Scene};

use super::{InteractableLookup, Interactor};

#[derive(Clone, Debug, PartialEq)]
pub enum InteractionEvent {
    Highlight { entity: EntityId, intensity: f32 },
    Unhighlight(EntityId),
    ShowPrompt(String),
    HidePrompt,
    Interacted(EntityId),
}

#[derive(Clone, Debug)]
pub struct InteractionController {
    config: InteractionConfig,
    current: Option<EntityId>,
    prompt: Option<String>,
    enabled: bool,
}

impl InteractionController {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            current: None,
            prompt: None,
            enabled: true,
        }
    }

    pub fn current(&self) -> Option<EntityId> {
        self.current
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    /// Disabled controllers drop their target and ignore input.
    pub fn set_enabled(&mut self, enabled: bool) -> Vec<InteractionEvent> {
        self.enabled = enabled;
        let mut events = Vec::new();
        if !enabled {
            self.clear(&mut events);
        }
        events
    }

    pub fn update(
        &mut self,
        scene: &dyn Scene,
        input: &InputState,
        targets: &mut dyn InteractableLookup,
        interactor: &mut Interactor<'_>,
    ) -> Vec<InteractionEvent> {
        let mut events = Vec::new();
        if !self.enabled {
            return events;
        }

        let ray = Ray::through_viewport_center(&interactor.view);
        let target = scene
            .raycast(&ray, self.config.raycast_distance)
            .map(|hit| hit.entity)
            .filter(|&entity| {
                targets.get(entity).is_some_and(|t| {
                    let reach = t
                        .interaction_distance()
                        .unwrap_or(self.config.default_interaction_distance);
                    interactor.position.distance(t.position()) <= reach
                })
            });

        match target {
            Some(entity) => {
                if self.current != Some(entity) {
                    self.clear_highlight(&mut events);
                    self.current = Some(entity);
                    events.push(InteractionEvent::Highlight {
                        entity,
                        intensity: self.config.highlight_intensity,
                    });
                }
                self.refresh_prompt(targets, &mut events);
            }
            None => self.clear(&mut events),
        }

        if let Some(entity) = self.current {
            if input.action_pressed(InputAction::Interact) {
                if let Some(target) = targets.get_mut(entity) {
                    target.interact(interactor);
                    tracing::debug!(%entity, "interacted");
                    events.push(InteractionEvent::Interacted(entity));
                }
                self.refresh_prompt(targets, &mut events);
            }
        }
        events
    }

    fn refresh_prompt(&mut self, targets: &dyn InteractableLookup, events: &mut Vec<InteractionEvent>) {
        let text = self
            .current
            .and_then(|entity| targets.get(entity))
            .map(|t| t.prompt().to_string());
        if text != self.prompt {
            match &text {
                Some(text) => events.push(InteractionEvent::ShowPrompt(text.clone())),
                None => events.push(InteractionEvent::HidePrompt),
            }
            self.prompt = text;
        }
    }

    fn clear_highlight(&mut self, events: &mut Vec<InteractionEvent>) {
        if let Some(entity) = self.current.take() {
            events.push(InteractionEvent::Unhighlight(entity));
        }
    }

    fn clear(&mut self, events: &mut Vec<InteractionEvent>) {
        self.clear_highlight(events);
        if self.prompt.take().is_some() {
            events.push(InteractionEvent::HidePrompt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Pose;
    use crate::game::interact::{Door, InteractableMap, Inventory};
    use crate::input::KeyCode;
    use crate::services::AudioLog;
    use crate::world::SphereScene;
    use glam::{Quat, Vec3};

    const DOOR: EntityId = EntityId(1);

    fn setup(door_z: f32) -> (SphereScene, InteractableMap) {
        let mut scene = SphereScene::new();
        scene.add(DOOR, Vec3::new(0.0, 1.6, door_z), 0.5);
        let mut targets = InteractableMap::new();
        targets.insert(DOOR, Box::new(Door::new(Pose::new(Vec3::new(0.0, 1.6, door_z), Quat::IDENTITY))));
        (scene, targets)
    }

    fn run(
        controller: &mut InteractionController,
        scene: &SphereScene,
        targets: &mut InteractableMap,
        input: &InputState,
    ) -> Vec<InteractionEvent> {
        let mut inventory = Inventory::new();
        let mut audio = AudioLog::new();
        let eye = Pose::new(Vec3::new(0.0, 1.6, 0.0), Quat::IDENTITY);
        let mut interactor = Interactor::new(Vec3::ZERO, eye, 60.0, &mut inventory, &mut audio);
        controller.update(scene, input, targets, &mut interactor)
    }

    #[test]
    fn test_highlight_and_prompt_are_edges() {
        let (scene, mut targets) = setup(-1.5);
        let mut controller = InteractionController::new(InteractionConfig::default());
        let idle = InputState::new();

        let events = run(&mut controller, &scene, &mut targets, &idle);
        assert_eq!(
            events,
            vec![
                InteractionEvent::Highlight {
                    entity: DOOR,
                    intensity: 0.3
                },
                InteractionEvent::ShowPrompt("Open".into()),
            ]
        );
        assert!(run(&mut controller, &scene, &mut targets, &idle).is_empty());
    }

    #[test]
    fn test_interact_key_uses_target_and_updates_prompt() {
        let (scene, mut targets) = setup(-1.5);
        let mut controller = InteractionController::new(InteractionConfig::default());
        run(&mut controller, &scene, &mut targets, &InputState::new());

        let mut input = InputState::new();
        input.keyboard.handle_key(KeyCode::E, true);
        let events = run(&mut controller, &scene, &mut targets, &input);
        assert_eq!(
            events,
            vec![
                InteractionEvent::Interacted(DOOR),
                InteractionEvent::ShowPrompt("Close".into()),
            ]
        );
    }

    #[test]
    fn test_out_of_ray_range_clears() {
        // Sphere surface at 2.5 m, past the 2 m ray.
        let (scene, mut targets) = setup(-3.0);
        let mut controller = InteractionController::new(InteractionConfig::default());
        assert!(run(&mut controller, &scene, &mut targets, &InputState::new()).is_empty());
        assert_eq!(controller.current(), None);
    }

    #[test]
    fn test_unregistered_hit_is_ignored_and_disable_clears() {
        let (mut scene, mut targets) = setup(-1.5);
        scene.add(EntityId(2), Vec3::new(0.0, 1.6, -1.0), 0.2);
        let mut controller = InteractionController::new(InteractionConfig::default());
        assert!(run(&mut controller, &scene, &mut targets, &InputState::new()).is_empty());

        scene.remove(EntityId(2));
        run(&mut controller, &scene, &mut targets, &InputState::new());
        assert_eq!(controller.current(), Some(DOOR));
        let events = controller.set_enabled(false);
        assert_eq!(
            events,
            vec![InteractionEvent::Unhighlight(DOOR), InteractionEvent::HidePrompt]
        );
    }
}
