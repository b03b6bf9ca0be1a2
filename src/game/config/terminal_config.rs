//! Terminal Configuration
//!
//! Typewriter timing, self-destruct choreography, phone book, location table
//! and the view the player camera moves to while seated at the terminal.

use serde::{Deserialize, Serialize};

/// Typewriter text timing and sound.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    /// Seconds per character
    pub character_delay: f32,
    /// Seconds per character for boot lines containing "..."
    pub fast_character_delay: f32,
    /// Pause between submitting a command and its echo
    pub command_delay: f32,
    /// Hold on the finished boot screen
    pub boot_screen_delay: f32,
    /// Hold on the finished shutdown message
    pub shutdown_delay: f32,
    pub type_sound: Option<String>,
    pub type_sound_volume: f32,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            character_delay: 0.005,
            fast_character_delay: 0.001,
            command_delay: 0.5,
            boot_screen_delay: 1.0,
            shutdown_delay: 1.0,
            type_sound: Some("terminal_key".into()),
            type_sound_volume: 0.5,
        }
    }
}

/// Where the player camera sits while using the terminal.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalViewConfig {
    pub transition_speed: f32,
    /// Distance in front of the screen
    pub view_distance: f32,
    /// Height above the screen center
    pub view_height: f32,
}

impl Default for TerminalViewConfig {
    fn default() -> Self {
        Self {
            transition_speed: 5.0,
            view_distance: 1.0,
            view_height: 1.6,
        }
    }
}

/// Self-destruct choreography.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfDestructConfig {
    pub max_rocket_height: f32,
    pub final_explosion_scale: f32,
    /// Delay between the rocket sound and lift-off
    pub lift_delay: f32,
    /// Initial climb speed (m/s)
    pub lift_speed: f32,
    /// Climb acceleration (m/s²)
    pub acceleration: f32,
    /// Tumble rate (degrees/s)
    pub rotation_speed: f32,
    pub camera_follow_speed: f32,
    pub countdown_beep: Option<String>,
    pub rocket_sound: Option<String>,
    pub explosion_sound: Option<String>,
    pub sound_volume: f32,
}

impl Default for SelfDestructConfig {
    fn default() -> Self {
        Self {
            max_rocket_height: 50.0,
            final_explosion_scale: 3.0,
            lift_delay: 0.5,
            lift_speed: 1.0,
            acceleration: 2.0,
            rotation_speed: 45.0,
            camera_follow_speed: 8.0,
            countdown_beep: Some("countdown_beep".into()),
            rocket_sound: Some("rocket".into()),
            explosion_sound: Some("explosion".into()),
            sound_volume: 0.8,
        }
    }
}

/// A number the phone book answers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PhoneNumber {
    /// Ten digits, no separators
    pub number: String,
    pub description: String,
    pub response: Option<String>,
    /// Length of the response clip (seconds)
    #[serde(default)]
    pub response_duration: f32,
    #[serde(default = "full_volume")]
    pub volume: f32,
}

fn full_volume() -> f32 {
    1.0
}

/// Dial clips and the phone book.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PhoneConfig {
    pub dial_tone: Option<String>,
    pub busy_signal: Option<String>,
    pub dial_sound: Option<String>,
    pub dial_volume: f32,
    pub dial_tone_duration: f32,
    /// Length of the busy signal clip (seconds)
    pub busy_signal_duration: f32,
    pub numbers: Vec<PhoneNumber>,
}

impl Default for PhoneConfig {
    fn default() -> Self {
        Self {
            dial_tone: Some("dial_tone".into()),
            busy_signal: Some("busy_signal".into()),
            dial_sound: Some("dial_click".into()),
            dial_volume: 0.8,
            dial_tone_duration: 2.0,
            busy_signal_duration: 3.0,
            numbers: Vec::new(),
        }
    }
}

/// A destination the terminal can route the player to.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocationEntry {
    pub key: String,
    pub description: String,
}

impl LocationEntry {
    pub fn new(key: &str, description: &str) -> Self {
        Self {
            key: key.to_string(),
            description: description.to_string(),
        }
    }
}

/// HyperTerminal tuning.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    pub typewriter: TypewriterConfig,
    pub cursor_blink_rate: f32,
    /// Hue cycles per second in rainbow mode
    pub rainbow_speed: f32,
    pub view: TerminalViewConfig,
    pub self_destruct: SelfDestructConfig,
    pub phone: PhoneConfig,
    pub locations: Vec<LocationEntry>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            typewriter: TypewriterConfig::default(),
            cursor_blink_rate: 0.5,
            rainbow_speed: 0.5,
            view: TerminalViewConfig::default(),
            self_destruct: SelfDestructConfig::default(),
            phone: PhoneConfig::default(),
            locations: vec![
                LocationEntry::new("diner", "Diner - Route 66 Roadside"),
                LocationEntry::new("gasstation", "A place for all your gas needs"),
                LocationEntry::new("alleyway", "Why would you go here?"),
            ],
        }
    }
}
