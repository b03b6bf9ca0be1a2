//! Tutorial Triggers
//!
//! Sources of tutorial messages: trigger volumes the player walks into, and
//! the camera pickup, which explains the controls each time it is taken.

use serde::{Deserialize, Serialize};

use super::TutorialManager;

pub const PLAYER_TAG: &str = "Player";

#[derive(Clone, Debug)]
pub struct TutorialTrigger {
    messages: Vec<String>,
    trigger_once: bool,
    triggered: bool,
}

impl TutorialTrigger {
    pub fn new(messages: Vec<String>, trigger_once: bool) -> Self {
        Self {
            messages,
            trigger_once,
            triggered: false,
        }
    }

    pub fn has_triggered(&self) -> bool {
        self.triggered
    }

    /// Something tagged `tag` entered the volume. Returns whether messages
    /// were queued.
    pub fn on_enter(&mut self, tag: &str, manager: &mut TutorialManager) -> bool {
        if self.trigger_once && self.triggered {
            return false;
        }
        if tag != PLAYER_TAG {
            return false;
        }
        for message in &self.messages {
            manager.queue_message(message.clone());
        }
        self.triggered = true;
        true
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraInstruction {
    pub message: String,
    pub input_hint: Option<String>,
}

impl CameraInstruction {
    pub fn new(message: &str, input_hint: &str) -> Self {
        Self {
            message: message.to_string(),
            input_hint: Some(input_hint.to_string()),
        }
    }

    pub fn text(&self) -> String {
        match &self.input_hint {
            Some(hint) => format!("{} ({hint})", self.message),
            None => self.message.clone(),
        }
    }
}

pub fn default_camera_instructions() -> Vec<CameraInstruction> {
    vec![
        CameraInstruction::new("Left Click to Take Photo", "Left Mouse"),
        CameraInstruction::new("Right Click to Zoom", "Right Mouse"),
        CameraInstruction::new("Press E to Put Down Camera", "E Key"),
    ]
}

/// Queues the camera instructions whenever the watched object (the camera
/// pickup) goes inactive, once per deactivation.
#[derive(Clone, Debug)]
pub struct CameraTutorial {
    instructions: Vec<CameraInstruction>,
    waiting_for_inactive: bool,
}

impl Default for CameraTutorial {
    fn default() -> Self {
        Self::new(default_camera_instructions())
    }
}

impl CameraTutorial {
    pub fn new(instructions: Vec<CameraInstruction>) -> Self {
        Self {
            instructions,
            waiting_for_inactive: true,
        }
    }

    /// Report the watched object's state this frame.
    pub fn watch(&mut self, active: bool, manager: &mut TutorialManager) -> bool {
        if self.waiting_for_inactive && !active {
            self.show(manager);
            self.waiting_for_inactive = false;
            return true;
        }
        if !self.waiting_for_inactive && active {
            self.waiting_for_inactive = true;
        }
        false
    }

    pub fn show(&self, manager: &mut TutorialManager) {
        for instruction in &self.instructions {
            manager.queue_message(instruction.text());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::TutorialConfig;

    #[test]
    fn test_trigger_once_for_player_only() {
        let mut manager = TutorialManager::new(&TutorialConfig::default());
        let mut trigger = TutorialTrigger::new(vec!["WASD to move".into(), "Shift to run".into()], true);
        assert!(!trigger.on_enter("Crate", &mut manager));
        assert!(!trigger.has_triggered());
        assert!(trigger.on_enter(PLAYER_TAG, &mut manager));
        assert!(trigger.has_triggered());
        assert!(!trigger.on_enter(PLAYER_TAG, &mut manager));
        assert_eq!(manager.text(), Some("WASD to move"));
        assert_eq!(manager.pending(), 1);
    }

    #[test]
    fn test_repeating_trigger() {
        let mut manager = TutorialManager::new(&TutorialConfig::default());
        let mut trigger = TutorialTrigger::new(vec!["hint".into()], false);
        assert!(trigger.on_enter(PLAYER_TAG, &mut manager));
        assert!(trigger.on_enter(PLAYER_TAG, &mut manager));
        assert_eq!(manager.pending(), 1);
    }

    #[test]
    fn test_camera_tutorial_per_pickup() {
        let mut manager = TutorialManager::new(&TutorialConfig::default());
        let mut tutorial = CameraTutorial::default();
        assert!(!tutorial.watch(true, &mut manager));
        assert!(tutorial.watch(false, &mut manager));
        assert_eq!(manager.text(), Some("Left Click to Take Photo (Left Mouse)"));
        assert!(!tutorial.watch(false, &mut manager));
        assert_eq!(manager.pending(), 2);

        assert!(!tutorial.watch(true, &mut manager));
        assert!(tutorial.watch(false, &mut manager));
        assert_eq!(manager.pending(), 5);
    }
}
