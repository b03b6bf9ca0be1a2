//! Interaction Tests - Doors, Switches and Tutorial Hints
//!
//! A small room: a locked door and a light switch side by side, a tutorial
//! trigger at the entrance, and the ambience loop.

use glam::{Quat, Vec3};
use shutterbug_engine::camera::Pose;
use shutterbug_engine::game::config::{InteractionConfig, TutorialConfig};
use shutterbug_engine::game::interact::{
    Door, EmissionTarget, InteractableMap, InteractionController, InteractionEvent, Interactor, Inventory, Key,
    LightSwitch, LockedDoor,
};
use shutterbug_engine::game::tutorial::{CameraTutorial, PLAYER_TAG, TutorialManager, TutorialTrigger};
use shutterbug_engine::game::Ambience;
use shutterbug_engine::services::{AudioLog, LoopLog};
use shutterbug_engine::world::{EntityId, SphereScene};
use shutterbug_engine::{InputState, KeyCode};

const DOOR: EntityId = EntityId(10);
const SWITCH: EntityId = EntityId(11);
const LAMP: EntityId = EntityId(12);

struct Room {
    scene: SphereScene,
    targets: InteractableMap,
    controller: InteractionController,
    inventory: Inventory,
    audio: AudioLog,
}

impl Room {
    fn new() -> Self {
        let door_at = Vec3::new(0.0, 1.6, -1.5);
        let switch_at = Vec3::new(1.5, 1.6, 0.0);
        let mut scene = SphereScene::new();
        scene.add(DOOR, door_at, 0.4);
        scene.add(SWITCH, switch_at, 0.2);

        let mut targets = InteractableMap::new();
        targets.insert(
            DOOR,
            Box::new(LockedDoor::new(Door::new(Pose::new(door_at, Quat::IDENTITY)), "cellar")),
        );
        targets.insert(
            SWITCH,
            Box::new(LightSwitch::new(switch_at, vec![EmissionTarget::new(LAMP)], Vec::new(), false)),
        );

        Self {
            scene,
            targets,
            controller: InteractionController::new(InteractionConfig::default()),
            inventory: Inventory::new(),
            audio: AudioLog::new(),
        }
    }

    /// One frame looking from the middle of the room toward `target`.
    fn look(&mut self, target: Vec3, press: bool) -> Vec<InteractionEvent> {
        let mut input = InputState::new();
        if press {
            input.keyboard.handle_key(KeyCode::E, true);
        }
        let eye = Pose::looking_at(Vec3::new(0.0, 1.6, 0.0), target);
        let mut interactor = Interactor::new(Vec3::ZERO, eye, 60.0, &mut self.inventory, &mut self.audio);
        self.controller
            .update(&self.scene, &input, &mut self.targets, &mut interactor)
    }
}

// ============================================================================
// Doors and switches
// ============================================================================

#[test]
fn test_locked_door_needs_key() {
    let mut room = Room::new();
    let door = Vec3::new(0.0, 1.6, -1.5);

    let events = room.look(door, false);
    assert!(events.contains(&InteractionEvent::ShowPrompt("Locked".into())));

    // No key: the press goes through but nothing changes.
    let events = room.look(door, true);
    assert_eq!(events, vec![InteractionEvent::Interacted(DOOR)]);
    assert_eq!(room.controller.prompt(), Some("Locked"));

    room.inventory.add_key(Key::new("cellar", Some(1)));
    let events = room.look(door, true);
    assert_eq!(
        events,
        vec![
            InteractionEvent::Interacted(DOOR),
            InteractionEvent::ShowPrompt("Close".into()),
        ]
    );
    assert!(!room.inventory.has_key("cellar"));

    // Stays unlocked once the key is spent.
    let events = room.look(door, true);
    assert!(events.contains(&InteractionEvent::ShowPrompt("Open".into())));
}

#[test]
fn test_switching_targets_moves_highlight() {
    let mut room = Room::new();
    room.look(Vec3::new(0.0, 1.6, -1.5), false);
    assert_eq!(room.controller.current(), Some(DOOR));

    let events = room.look(Vec3::new(1.5, 1.6, 0.0), true);
    assert_eq!(events[0], InteractionEvent::Unhighlight(DOOR));
    assert!(matches!(events[1], InteractionEvent::Highlight { entity: SWITCH, .. }));
    assert!(events.contains(&InteractionEvent::Interacted(SWITCH)));
    assert_eq!(room.controller.prompt(), Some("Press E to turn OFF"));

    let events = room.look(Vec3::new(0.0, 1.6, 5.0), false);
    assert_eq!(
        events,
        vec![InteractionEvent::Unhighlight(SWITCH), InteractionEvent::HidePrompt]
    );
}

// ============================================================================
// Tutorial and ambience
// ============================================================================

#[test]
fn test_entrance_trigger_fires_once_for_player() {
    let config = TutorialConfig::default();
    let mut manager = TutorialManager::new(&config);
    let mut trigger = TutorialTrigger::new(vec!["WASD to move".into(), "E to interact".into()], true);

    assert!(!trigger.on_enter("Enemy", &mut manager));
    assert!(trigger.on_enter(PLAYER_TAG, &mut manager));
    assert!(!trigger.on_enter(PLAYER_TAG, &mut manager));
    assert_eq!(manager.text(), Some("WASD to move"));
    assert_eq!(manager.pending(), 1);

    let per_message = 2.0 * config.fade_duration + config.display_duration;
    manager.update(per_message + 0.01);
    assert_eq!(manager.text(), Some("E to interact"));
    manager.update(per_message);
    assert!(!manager.is_displaying());
}

#[test]
fn test_camera_hints_after_pickup() {
    let mut manager = TutorialManager::new(&TutorialConfig::default());
    let mut tutorial = CameraTutorial::default();

    assert!(!tutorial.watch(true, &mut manager));
    assert!(tutorial.watch(false, &mut manager));
    assert!(!tutorial.watch(false, &mut manager));
    assert_eq!(manager.text(), Some("Left Click to Take Photo (Left Mouse)"));
}

#[test]
fn test_ambience_fades_in_and_keeps_looping() {
    let config = TutorialConfig::default();
    let mut ambience = Ambience::from_config(&config);
    let mut source = LoopLog::default();

    ambience.enable(&mut source);
    assert_eq!(source.volume, 0.0);
    assert!(source.playing);

    ambience.update(config.ambience_fade_in / 2.0, &mut source);
    assert!((source.volume - config.ambience_volume / 2.0).abs() < 1e-4);

    source.playing = false;
    ambience.update(config.ambience_fade_in, &mut source);
    assert_eq!(source.volume, config.ambience_volume);
    assert!(!ambience.is_fading());
    assert_eq!(source.starts, 2);
}
