//! Terminal Commands
//!
//! Screen texts, command parsing, the secret command table, the location
//! table and phone number validation. Nothing here touches session state.

use std::sync::LazyLock;

use regex::Regex;

use crate::game::config::{LocationEntry, PhoneNumber};

pub const BOOT_SCREEN: &str = "HyperTerminal v1.0
Copyright (C) 1983 Hyperion Enterprises
=====================================

BIOS Version 1.0
Memory Test...........OK
Memory Size...........640K

Initializing Hardware:
CPU...........Hyperion 8086/4.77MHz
FPU...........None
Display.......CGA
Drive C:......20MB
Drive A:......360K

Terminal Version 1.0
Loading command interpreter...
Starting HyperOS...
";

pub const SHUTDOWN_MESSAGE: &str = "
System is shutting down...
Stopping services...
Saving system state...
Powering off...

It is now safe to turn off your computer.";

pub const WELCOME_MESSAGE: &str = "Type 'help' for available commands.";

pub const HELP_TEXT: &str = "Available commands:\n\
help           - Show this message\n\
version        - Show system version\n\
shutdown       - Shutdown the system\n\
setlocation    - Set next destination\n\
infolocation   - Get location details\n";

pub const VERSION_TEXT: &str = "HyperTerminal v1.0\nBuild 19831115";

pub const ALREADY_SHUT_DOWN: &str = "System is already shut down.";
pub const NOTHING_TO_CONFIRM: &str = "Nothing to confirm.";
pub const TERMINAL_GONE: &str = "ERROR: Terminal no longer exists.";
pub const AWAITING_CONFIRMATION: &str = "Awaiting confirmation. Type 'confirm' to proceed.";
pub const SELF_DESTRUCT_WARNING: &str =
    "WARNING: This will permanently destroy this terminal.\nType 'confirm' to proceed with self-destruct sequence.";
pub const NO_LOCATION: &str = "Error: No location specified.";
pub const CALL_ENDED: &str = "\nCall ended.";

/// Hidden commands, absent from `help`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SecretCommand {
    /// Toggle hue-cycling text
    Rainbow,
}

const SECRET_COMMANDS: &[(&str, &str, SecretCommand)] = &[(
    "rainbow",
    "Enables rainbow text mode",
    SecretCommand::Rainbow,
)];

pub fn secret_command(name: &str) -> Option<SecretCommand> {
    SECRET_COMMANDS
        .iter()
        .find(|(key, _, _)| *key == name)
        .map(|&(_, _, command)| command)
}

/// `(name, description)` of every secret command.
pub fn secret_commands() -> impl Iterator<Item = (&'static str, &'static str)> {
    SECRET_COMMANDS.iter().map(|&(name, description, _)| (name, description))
}

/// A parsed command line. Arguments borrow from the normalized input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command<'a> {
    Help,
    Version,
    Shutdown,
    SelfDestruct,
    Confirm,
    SetLocation(&'a str),
    InfoLocation(&'a str),
    Dial(&'a str),
    Secret(SecretCommand),
    Unknown(&'a str),
}

/// Trim and lowercase a raw input line.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Parse a normalized line. Secret commands are matched first; argument
/// commands need their trailing space, so a bare `dial` is unknown.
pub fn parse(command: &str) -> Command<'_> {
    if let Some(secret) = secret_command(command) {
        return Command::Secret(secret);
    }
    match command {
        "help" => Command::Help,
        "version" => Command::Version,
        "shutdown" => Command::Shutdown,
        "selfdestruct" => Command::SelfDestruct,
        "confirm" => Command::Confirm,
        _ => {
            if let Some(arg) = command.strip_prefix("setlocation ") {
                Command::SetLocation(arg.trim())
            } else if let Some(arg) = command.strip_prefix("infolocation ") {
                Command::InfoLocation(arg.trim())
            } else if let Some(arg) = command.strip_prefix("dial ") {
                Command::Dial(arg.trim())
            } else {
                Command::Unknown(command)
            }
        }
    }
}

pub fn not_found(command: &str) -> String {
    format!("Command not found: {command}")
}

/// Destinations the terminal can route the player to.
#[derive(Clone, Debug, Default)]
pub struct LocationTable {
    entries: Vec<LocationEntry>,
}

impl LocationTable {
    pub fn new(entries: Vec<LocationEntry>) -> Self {
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&LocationEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn set_message(entry: &LocationEntry) -> String {
        format!("Next destination set to: {}\nDescription: {}", entry.key, entry.description)
    }

    pub fn info_message(entry: &LocationEntry) -> String {
        format!(
            "Location: {}\nDescription: {}\nTravel Status: Destination Available",
            entry.key, entry.description
        )
    }

    pub fn unknown_set_message(location: &str) -> String {
        format!("Error: Unknown location '{location}'.")
    }

    pub fn unknown_info_message(location: &str) -> String {
        format!("Error: No information available for '{location}'.")
    }
}

static PHONE_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}-\d{3}-\d{4}$").expect("phone pattern is valid"));

/// Why a `dial` argument was rejected. Displays as the terminal response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DialError {
    #[error("Error: Please specify a phone number in XXX-XXX-XXXX format.")]
    Missing,
    #[error("Error: Invalid phone number format. Please use XXX-XXX-XXXX format.")]
    InvalidFormat,
}

/// Check `XXX-XXX-XXXX` and return the bare digits.
pub fn validate_number(number: &str) -> Result<String, DialError> {
    if number.trim().is_empty() {
        return Err(DialError::Missing);
    }
    if !PHONE_FORMAT.is_match(number) {
        return Err(DialError::InvalidFormat);
    }
    Ok(number.chars().filter(char::is_ascii_digit).collect())
}

/// Configured number matching `digits`, if any.
pub fn lookup_number<'a>(numbers: &'a [PhoneNumber], digits: &str) -> Option<&'a PhoneNumber> {
    numbers.iter().find(|n| n.number == digits)
}

/// `5551234567` -> `555-123-4567`. Other lengths are returned as-is.
pub fn format_number(digits: &str) -> String {
    if digits.len() == 10 && digits.is_ascii() {
        format!("{}-{}-{}", &digits[..3], &digits[3..6], &digits[6..])
    } else {
        digits.to_string()
    }
}

pub fn dialing_message(number: &str) -> String {
    format!("Dialing {number}...")
}

pub fn out_of_service_message(number: &str) -> String {
    format!("The number you have dialed ({number}) is not in service.")
}
