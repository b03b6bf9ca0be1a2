//! Terminal Scripts
//!
//! The timed sequences the terminal plays: typewriter text, boot, shutdown,
//! command responses, phone calls and the self-destruct countdown. Each is a
//! [`Sequence`] of [`TerminalAction`]s the session applies as they come due.

use super::commands::{BOOT_SCREEN, CALL_ENDED, SHUTDOWN_MESSAGE, WELCOME_MESSAGE, format_number};
use crate::game::config::{PhoneConfig, PhoneNumber, SelfDestructConfig, TypewriterConfig};
use crate::sequence::Sequence;

const BOOT_LINE_PAUSE: f32 = 0.1;
const DIAL_DIGIT_PAUSE: f32 = 0.2;
const DIAL_DASH_PAUSE: f32 = 0.1;
const COUNTDOWN_FROM: u32 = 3;
const COUNTDOWN_STEP: f32 = 1.0;
const FINAL_EXPLOSION_DELAY: f32 = 3.0;
const TEARDOWN_DELAY: f32 = 1.0;

#[derive(Clone, Debug, PartialEq)]
pub enum TerminalAction {
    /// Append one character to the screen
    Type(char),
    ClearScreen,
    Play { clip: String, volume: f32 },
    /// Run a submitted command line
    RunCommand(String),
    BootComplete,
    ShutdownComplete,
    /// The response finished typing
    ScriptDone,
    Explosion { scale: f32 },
    StartAscent,
    Destroyed,
    Terminate,
}

fn play(seq: &mut Sequence<TerminalAction>, clip: Option<&str>, volume: f32) {
    if let Some(clip) = clip.filter(|c| !c.is_empty()) {
        seq.push_emit(TerminalAction::Play {
            clip: clip.to_string(),
            volume,
        });
    }
}

/// Character-by-character reveal. The type sound is played for every
/// character except spaces and newlines.
pub fn typewriter(text: &str, delay: f32, config: &TypewriterConfig) -> Sequence<TerminalAction> {
    let mut seq = Sequence::new();
    for c in text.chars() {
        seq.push_emit(TerminalAction::Type(c));
        if c != ' ' && c != '\n' {
            play(&mut seq, config.type_sound.as_deref(), config.type_sound_volume);
        }
        seq.push_wait(delay);
    }
    seq
}

/// Boot screen line by line, hold, clear, welcome message.
pub fn boot(config: &TypewriterConfig) -> Sequence<TerminalAction> {
    let mut seq = Sequence::new().emit(TerminalAction::ClearScreen);
    for line in BOOT_SCREEN.split('\n') {
        let delay = if line.contains("...") {
            config.fast_character_delay
        } else {
            config.character_delay
        };
        seq.append(typewriter(line, delay, config));
        seq.push_wait(BOOT_LINE_PAUSE);
        seq.push_emit(TerminalAction::Type('\n'));
    }
    seq.push_wait(config.boot_screen_delay);
    seq.push_emit(TerminalAction::ClearScreen);
    seq.push_wait(BOOT_LINE_PAUSE);
    seq.append(typewriter(WELCOME_MESSAGE, config.character_delay, config));
    seq.push_emit(TerminalAction::BootComplete);
    seq
}

pub fn welcome(config: &TypewriterConfig) -> Sequence<TerminalAction> {
    let mut seq = typewriter(WELCOME_MESSAGE, config.character_delay, config);
    seq.push_emit(TerminalAction::ScriptDone);
    seq
}

/// Pause, then hand the line to the interpreter.
pub fn submit(command: &str, config: &TypewriterConfig) -> Sequence<TerminalAction> {
    Sequence::new()
        .wait(config.command_delay)
        .emit(TerminalAction::RunCommand(command.to_string()))
}

/// Echo of the command followed by its response.
pub fn response(command: &str, response: &str, config: &TypewriterConfig) -> Sequence<TerminalAction> {
    typewriter(&format!("{command}\n{response}\n"), config.character_delay, config)
}

pub fn shutdown(config: &TypewriterConfig) -> Sequence<TerminalAction> {
    let mut seq = Sequence::new().emit(TerminalAction::ClearScreen);
    seq.append(typewriter(SHUTDOWN_MESSAGE, config.character_delay, config));
    seq.push_wait(config.shutdown_delay);
    seq.push_emit(TerminalAction::ClearScreen);
    seq.push_emit(TerminalAction::ShutdownComplete);
    seq
}

/// Dial clicks, dial tone, then the recorded response.
pub fn phone_call(number: &PhoneNumber, phone: &PhoneConfig, typing: &TypewriterConfig) -> Sequence<TerminalAction> {
    let mut seq = Sequence::new();
    if phone.dial_sound.is_some() {
        for c in format_number(&number.number).chars() {
            if c == '-' {
                seq.push_wait(DIAL_DASH_PAUSE);
            } else {
                play(&mut seq, phone.dial_sound.as_deref(), phone.dial_volume);
                seq.push_wait(DIAL_DIGIT_PAUSE);
            }
        }
    }
    if phone.dial_tone.is_some() {
        play(&mut seq, phone.dial_tone.as_deref(), phone.dial_volume);
        seq.push_wait(phone.dial_tone_duration);
    }
    if let Some(response) = number.response.as_deref() {
        play(&mut seq, Some(response), number.volume);
        seq.append(typewriter(&format!("\n{}", number.description), typing.character_delay, typing));
        seq.push_wait(number.response_duration);
        seq.append(typewriter(CALL_ENDED, typing.character_delay, typing));
    }
    seq
}

pub fn busy_signal(phone: &PhoneConfig, typing: &TypewriterConfig) -> Sequence<TerminalAction> {
    let mut seq = Sequence::new();
    if phone.busy_signal.is_some() {
        play(&mut seq, phone.busy_signal.as_deref(), phone.dial_volume);
        seq.push_wait(phone.busy_signal_duration);
        seq.append(typewriter(CALL_ENDED, typing.character_delay, typing));
    }
    seq
}

/// Countdown, launch, final explosion, teardown.
pub fn self_destruct(config: &SelfDestructConfig, typing: &TypewriterConfig) -> Sequence<TerminalAction> {
    let mut seq = Sequence::new();
    for i in (1..=COUNTDOWN_FROM).rev() {
        play(&mut seq, config.countdown_beep.as_deref(), config.sound_volume);
        seq.append(typewriter(
            &format!("\nSelf-destruct in {i}..."),
            typing.character_delay,
            typing,
        ));
        seq.push_wait(COUNTDOWN_STEP);
    }

    seq.push_emit(TerminalAction::Explosion { scale: 1.0 });
    play(&mut seq, config.rocket_sound.as_deref(), config.sound_volume);
    seq.push_wait(config.lift_delay);
    seq.push_emit(TerminalAction::StartAscent);
    seq.push_wait(FINAL_EXPLOSION_DELAY);

    seq.push_emit(TerminalAction::Explosion {
        scale: config.final_explosion_scale,
    });
    play(&mut seq, config.explosion_sound.as_deref(), config.sound_volume);
    seq.push_emit(TerminalAction::Destroyed);
    seq.push_wait(TEARDOWN_DELAY);
    seq.push_emit(TerminalAction::Terminate);
    seq
}
