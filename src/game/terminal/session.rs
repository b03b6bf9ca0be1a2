//! Terminal Session
//!
//! The HyperTerminal state machine. Opening a session moves the camera in
//! front of the screen and boots the machine if it is off. Typed lines are
//! submitted with Enter and answered through a typewriter script; while a
//! script runs the terminal is busy and ignores input.
//!
//! ```text
//! ShutDown -> Booting -> Idle <-> Typing
//!                        Idle -> AwaitingConfirmation -> Typing -> Destroyed
//! ```

use glam::Vec3;

use super::ascent::RocketAscent;
use super::commands::{self, Command, LocationTable, SecretCommand};
use super::display::{CursorBlink, TEXT_COLOR, rainbow_color};
use super::script::{self, TerminalAction};
use crate::camera::{Pose, ViewTransition};
use crate::game::config::TerminalConfig;
use crate::game::interact::{Interactable, Interactor};
use crate::input::{InputAction, InputState};
use crate::sequence::Sequence;
use crate::services::{AudioSink, ProcessControl};

const PROMPT: &str = "Use Terminal";
/// The camera aims this far past the screen center.
const LOOK_PAST_SCREEN: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerminalState {
    ShutDown,
    Booting,
    Idle,
    AwaitingConfirmation,
    /// A script is running
    Typing,
    Destroyed,
}

/// Things the host should show or do.
#[derive(Clone, Debug, PartialEq)]
pub enum TerminalEvent {
    ScreenOn,
    ScreenOff,
    SessionClosed,
    SelfDestructStarted,
    Explosion { position: Vec3, scale: f32 },
    Destroyed,
}

pub struct TerminalContext<'a> {
    pub audio: &'a mut dyn AudioSink,
    pub process: &'a mut dyn ProcessControl,
}

pub struct Terminal {
    config: TerminalConfig,
    /// Screen pose; its forward axis points into the screen
    pub screen: Pose,
    locations: LocationTable,

    state: TerminalState,
    armed: bool,
    session_open: bool,
    script: Sequence<TerminalAction>,

    screen_text: String,
    input: String,
    cursor: CursorBlink,
    rainbow: bool,
    clock: f32,
    next_location: Option<String>,

    camera: Option<Pose>,
    return_pose: Pose,
    transition: Option<ViewTransition>,
    ascent: Option<RocketAscent>,
    terminated: bool,
    events: Vec<TerminalEvent>,
}

impl Terminal {
    pub fn new(config: TerminalConfig, screen: Pose) -> Self {
        Self {
            locations: LocationTable::new(config.locations.clone()),
            cursor: CursorBlink::new(config.cursor_blink_rate),
            config,
            screen,
            state: TerminalState::ShutDown,
            armed: false,
            session_open: false,
            script: Sequence::new(),
            screen_text: String::new(),
            input: String::new(),
            rainbow: false,
            clock: 0.0,
            next_location: None,
            camera: None,
            return_pose: Pose::IDENTITY,
            transition: None,
            ascent: None,
            terminated: false,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> TerminalState {
        self.state
    }

    pub fn is_session_open(&self) -> bool {
        self.session_open
    }

    pub fn is_awaiting_confirmation(&self) -> bool {
        self.armed
    }

    pub fn is_busy(&self) -> bool {
        !self.script.is_finished()
    }

    pub fn screen_text(&self) -> &str {
        &self.screen_text
    }

    /// Input line as displayed, with the blinking cursor.
    pub fn input_line(&self) -> String {
        let accepting = matches!(self.state, TerminalState::Idle | TerminalState::AwaitingConfirmation);
        if self.session_open && accepting && self.cursor.is_visible() {
            format!("{}_", self.input)
        } else {
            self.input.clone()
        }
    }

    pub fn is_rainbow(&self) -> bool {
        self.rainbow
    }

    /// Current output text color.
    pub fn text_color(&self) -> [f32; 3] {
        if self.rainbow {
            rainbow_color(self.clock, self.config.rainbow_speed)
        } else {
            TEXT_COLOR
        }
    }

    /// Destination chosen with `setlocation`, for the travel system.
    pub fn next_location(&self) -> Option<&str> {
        self.next_location.as_deref()
    }

    pub fn clear_next_location(&mut self) {
        self.next_location = None;
    }

    /// Camera pose the host should use, or `None` when the player owns it.
    pub fn camera_override(&self) -> Option<Pose> {
        self.camera
    }

    /// Where the camera sits while at the terminal.
    pub fn view_pose(&self) -> Pose {
        let center = self.screen.position;
        let forward = self.screen.forward();
        let eye = center - forward * self.config.view.view_distance + Vec3::Y * self.config.view.view_height;
        Pose::looking_at(eye, center + forward * LOOK_PAST_SCREEN)
    }

    /// Sit down at the terminal. `viewer` is the camera pose to return to.
    pub fn open_session(&mut self, viewer: &Pose) {
        if self.session_open {
            return;
        }
        self.session_open = true;
        if self.state == TerminalState::Destroyed {
            return;
        }

        self.input.clear();
        self.screen_text.clear();
        self.cursor.reset();
        self.events.push(TerminalEvent::ScreenOn);

        let typing = &self.config.typewriter;
        if self.state == TerminalState::ShutDown {
            self.state = TerminalState::Booting;
            self.script = script::boot(typing);
            tracing::info!("terminal booting");
        } else {
            let welcome = script::welcome(typing);
            if self.is_busy() {
                self.script.append(welcome);
            } else {
                self.state = TerminalState::Typing;
                self.script = welcome;
            }
        }

        self.return_pose = *viewer;
        self.transition = Some(ViewTransition::new(
            *viewer,
            self.view_pose(),
            self.config.view.transition_speed,
        ));
    }

    /// Step away from the terminal. Refused while booting.
    pub fn close_session(&mut self) {
        if self.state == TerminalState::Booting || !self.session_open {
            return;
        }
        self.session_open = false;
        self.events.push(TerminalEvent::ScreenOff);
        self.events.push(TerminalEvent::SessionClosed);
        let from = self.camera.unwrap_or(self.return_pose);
        self.transition = Some(ViewTransition::new(
            from,
            self.return_pose,
            self.config.view.transition_speed,
        ));
    }

    /// Feed typed characters. Ignored unless a session is open and the
    /// terminal is waiting for input.
    pub fn handle_char(&mut self, c: char) {
        if !self.session_open {
            return;
        }
        if !matches!(self.state, TerminalState::Idle | TerminalState::AwaitingConfirmation) {
            return;
        }
        match c {
            '\u{8}' => {
                self.input.pop();
            }
            '\r' | '\n' => self.submit(),
            c if c.is_control() => {}
            c => self.input.push(c),
        }
    }

    fn submit(&mut self) {
        if self.is_busy() {
            return;
        }
        let command = std::mem::take(&mut self.input);
        self.screen_text.clear();
        self.state = TerminalState::Typing;
        self.script = script::submit(&command, &self.config.typewriter);
    }

    /// Run a command line right away and return its response. Follow-up
    /// scripts (shutdown, calls, self-destruct) are queued.
    pub fn execute(&mut self, line: &str) -> String {
        let normalized = commands::normalize(line);
        let (response, follow_up) = self.dispatch(&normalized);
        if let Some(follow_up) = follow_up {
            self.state = TerminalState::Typing;
            self.script.append(follow_up);
            self.script.push_emit(TerminalAction::ScriptDone);
        }
        response
    }

    fn dispatch(&mut self, command: &str) -> (String, Option<Sequence<TerminalAction>>) {
        let typing = &self.config.typewriter;
        match commands::parse(command) {
            Command::Help => (commands::HELP_TEXT.to_string(), None),
            Command::Version => (commands::VERSION_TEXT.to_string(), None),
            Command::Shutdown => {
                if self.state == TerminalState::ShutDown {
                    (commands::ALREADY_SHUT_DOWN.to_string(), None)
                } else {
                    tracing::info!("terminal shutting down");
                    (String::new(), Some(script::shutdown(typing)))
                }
            }
            Command::SelfDestruct => {
                let response = if self.state == TerminalState::Destroyed {
                    commands::TERMINAL_GONE
                } else if self.armed {
                    commands::AWAITING_CONFIRMATION
                } else {
                    self.armed = true;
                    tracing::warn!("self-destruct armed");
                    commands::SELF_DESTRUCT_WARNING
                };
                (response.to_string(), None)
            }
            Command::Confirm => {
                if !self.armed {
                    return (commands::NOTHING_TO_CONFIRM.to_string(), None);
                }
                self.armed = false;
                self.events.push(TerminalEvent::SelfDestructStarted);
                tracing::warn!("self-destruct confirmed");
                (
                    String::new(),
                    Some(script::self_destruct(&self.config.self_destruct, typing)),
                )
            }
            Command::SetLocation("") | Command::InfoLocation("") => (commands::NO_LOCATION.to_string(), None),
            Command::SetLocation(location) => match self.locations.get(location) {
                Some(entry) => {
                    let message = LocationTable::set_message(entry);
                    self.next_location = Some(entry.key.clone());
                    tracing::info!(location, "next destination set");
                    (message, None)
                }
                None => (LocationTable::unknown_set_message(location), None),
            },
            Command::InfoLocation(location) => match self.locations.get(location) {
                Some(entry) => (LocationTable::info_message(entry), None),
                None => (LocationTable::unknown_info_message(location), None),
            },
            Command::Dial(number) => self.dial(number),
            Command::Secret(SecretCommand::Rainbow) => {
                self.rainbow = !self.rainbow;
                let response = if self.rainbow {
                    "Rainbow mode activated!"
                } else {
                    "Rainbow mode deactivated."
                };
                (response.to_string(), None)
            }
            Command::Unknown(command) => (commands::not_found(command), None),
        }
    }

    fn dial(&self, number: &str) -> (String, Option<Sequence<TerminalAction>>) {
        let digits = match commands::validate_number(number) {
            Ok(digits) => digits,
            Err(e) => return (e.to_string(), None),
        };
        let phone = &self.config.phone;
        let typing = &self.config.typewriter;
        match commands::lookup_number(&phone.numbers, &digits) {
            Some(entry) => {
                tracing::info!(number, "dialing");
                (commands::dialing_message(number), Some(script::phone_call(entry, phone, typing)))
            }
            None => (
                commands::out_of_service_message(number),
                Some(script::busy_signal(phone, typing)),
            ),
        }
    }

    /// Per-frame tick. Returns what happened this frame.
    pub fn update(&mut self, dt: f32, input: &InputState, ctx: &mut TerminalContext<'_>) -> Vec<TerminalEvent> {
        self.clock += dt;
        self.update_camera(dt);

        if self.session_open && self.transition.is_none() {
            self.cursor.tick(dt);
            if input.action_pressed(InputAction::Escape) {
                self.close_session();
            } else if self.state != TerminalState::Booting {
                for c in input.keyboard.typed_text().chars() {
                    self.handle_char(c);
                }
            }
        }

        let mut due = self.script.advance(dt);
        while !due.is_empty() {
            for action in due {
                self.apply(action, ctx);
            }
            due = self.script.advance(0.0);
        }

        std::mem::take(&mut self.events)
    }

    fn update_camera(&mut self, dt: f32) {
        if let Some(transition) = self.transition.as_mut() {
            let pose = transition.advance(dt);
            let finished = transition.is_finished();
            self.camera = Some(pose);
            if finished {
                self.transition = None;
                if !self.session_open {
                    self.camera = None;
                }
            }
        }

        if let Some(ascent) = self.ascent.as_mut() {
            if !ascent.step(dt, &mut self.screen, self.camera.as_mut()) {
                self.ascent = None;
            }
        }
    }

    fn apply(&mut self, action: TerminalAction, ctx: &mut TerminalContext<'_>) {
        match action {
            TerminalAction::Type(c) => self.screen_text.push(c),
            TerminalAction::ClearScreen => self.screen_text.clear(),
            TerminalAction::Play { clip, volume } => ctx.audio.play_once(&clip, volume),
            TerminalAction::RunCommand(line) => {
                let normalized = commands::normalize(&line);
                let (response, follow_up) = self.dispatch(&normalized);
                if !response.is_empty() {
                    self.script
                        .append(script::response(&line, &response, &self.config.typewriter));
                }
                if let Some(follow_up) = follow_up {
                    self.script.append(follow_up);
                }
                self.script.push_emit(TerminalAction::ScriptDone);
            }
            TerminalAction::BootComplete => {
                self.state = TerminalState::Idle;
                tracing::info!("terminal ready");
            }
            TerminalAction::ShutdownComplete => {
                self.state = TerminalState::ShutDown;
                self.close_session();
            }
            TerminalAction::ScriptDone => {
                if self.state == TerminalState::Typing {
                    self.state = if self.armed {
                        TerminalState::AwaitingConfirmation
                    } else {
                        TerminalState::Idle
                    };
                }
            }
            TerminalAction::Explosion { scale } => self.events.push(TerminalEvent::Explosion {
                position: self.screen.position,
                scale,
            }),
            TerminalAction::StartAscent => {
                self.ascent = Some(RocketAscent::new(&self.config.self_destruct, self.screen.rotation));
            }
            TerminalAction::Destroyed => {
                self.state = TerminalState::Destroyed;
                self.events.push(TerminalEvent::Destroyed);
                tracing::warn!("terminal destroyed");
            }
            TerminalAction::Terminate => {
                if !self.terminated {
                    self.terminated = true;
                    ctx.process.terminate();
                }
            }
        }
    }
}

impl Interactable for Terminal {
    fn prompt(&self) -> &str {
        PROMPT
    }

    fn position(&self) -> Vec3 {
        self.screen.position
    }

    fn interact(&mut self, interactor: &mut Interactor<'_>) {
        self.open_session(&interactor.view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{AudioLog, TerminationCounter};

    struct Host {
        audio: AudioLog,
        process: TerminationCounter,
    }

    impl Host {
        fn new() -> Self {
            Self {
                audio: AudioLog::new(),
                process: TerminationCounter::default(),
            }
        }

        fn tick(&mut self, terminal: &mut Terminal, dt: f32, input: &InputState) -> Vec<TerminalEvent> {
            let mut ctx = TerminalContext {
                audio: &mut self.audio,
                process: &mut self.process,
            };
            terminal.update(dt, input, &mut ctx)
        }

        /// Tick with no input until the terminal is idle again.
        fn settle(&mut self, terminal: &mut Terminal) -> Vec<TerminalEvent> {
            let input = InputState::new();
            let mut events = Vec::new();
            for _ in 0..10_000 {
                events.extend(self.tick(terminal, 0.05, &input));
                if !terminal.is_busy() && terminal.transition.is_none() {
                    break;
                }
            }
            events
        }

        fn type_line(&mut self, terminal: &mut Terminal, line: &str) {
            let mut input = InputState::new();
            input.keyboard.push_text(line);
            input.keyboard.push_text("\n");
            self.tick(terminal, 0.0, &input);
            self.settle(terminal);
        }
    }

    fn booted() -> (Terminal, Host) {
        let mut terminal = Terminal::new(TerminalConfig::default(), Pose::IDENTITY);
        let mut host = Host::new();
        terminal.open_session(&Pose::new(Vec3::new(0.0, 1.6, 3.0), glam::Quat::IDENTITY));
        host.settle(&mut terminal);
        (terminal, host)
    }

    #[test]
    fn test_boot_then_welcome() {
        let (terminal, host) = booted();
        assert_eq!(terminal.state(), TerminalState::Idle);
        assert_eq!(terminal.screen_text(), commands::WELCOME_MESSAGE);
        assert!(host.audio.contains("terminal_key"));
        assert!((terminal.camera_override().unwrap().position - terminal.view_pose().position).length() < 1e-4);
    }

    #[test]
    fn test_shutdown_when_already_shut_down() {
        let mut terminal = Terminal::new(TerminalConfig::default(), Pose::IDENTITY);
        assert_eq!(terminal.execute("shutdown"), "System is already shut down.");
        assert!(!terminal.is_busy());
        assert_eq!(terminal.state(), TerminalState::ShutDown);
    }

    #[test]
    fn test_confirm_without_arm() {
        let (mut terminal, mut host) = booted();
        host.type_line(&mut terminal, "confirm");
        assert_eq!(terminal.state(), TerminalState::Idle);
        assert_eq!(terminal.screen_text(), "confirm\nNothing to confirm.\n");
    }

    #[test]
    fn test_unknown_command_echoes_normalized() {
        let (mut terminal, mut host) = booted();
        host.type_line(&mut terminal, "  Launch ");
        assert_eq!(terminal.screen_text(), "  Launch \nCommand not found: launch\n");
    }

    #[test]
    fn test_backspace_and_control_chars() {
        let (mut terminal, _host) = booted();
        for c in "helx\u{8}p\u{7}".chars() {
            terminal.handle_char(c);
        }
        assert_eq!(terminal.input_line(), "help_");
    }

    #[test]
    fn test_input_ignored_while_typing() {
        let (mut terminal, mut host) = booted();
        let mut input = InputState::new();
        input.keyboard.push_text("version\n");
        host.tick(&mut terminal, 0.0, &input);
        assert_eq!(terminal.state(), TerminalState::Typing);
        terminal.handle_char('x');
        assert_eq!(terminal.input_line(), "");
    }

    #[test]
    fn test_selfdestruct_idempotent_and_survives_other_commands() {
        let (mut terminal, mut host) = booted();
        host.type_line(&mut terminal, "selfdestruct");
        assert_eq!(terminal.state(), TerminalState::AwaitingConfirmation);
        host.type_line(&mut terminal, "selfdestruct");
        assert!(terminal.screen_text().contains("Awaiting confirmation."));
        host.type_line(&mut terminal, "version");
        assert_eq!(terminal.state(), TerminalState::AwaitingConfirmation);
    }

    #[test]
    fn test_self_destruct_runs_to_termination_once() {
        let (mut terminal, mut host) = booted();
        host.type_line(&mut terminal, "selfdestruct");

        let mut input = InputState::new();
        input.keyboard.push_text("confirm\n");
        let mut events = host.tick(&mut terminal, 0.0, &input);
        events.extend(host.settle(&mut terminal));

        let text = terminal.screen_text();
        let three = text.find("Self-destruct in 3...").unwrap();
        let one = text.find("Self-destruct in 1...").unwrap();
        assert!(three < one);
        assert_eq!(terminal.state(), TerminalState::Destroyed);
        assert_eq!(host.process.calls, 1);
        assert!(events.contains(&TerminalEvent::SelfDestructStarted));
        assert!(events.contains(&TerminalEvent::Destroyed));
        let explosions = events
            .iter()
            .filter(|e| matches!(e, TerminalEvent::Explosion { .. }))
            .count();
        assert_eq!(explosions, 2);
        assert!(terminal.screen.position.y > 0.0);
        assert_eq!(host.audio.count("explosion"), 1);

        host.settle(&mut terminal);
        assert_eq!(host.process.calls, 1);
        assert_eq!(terminal.execute("selfdestruct"), "ERROR: Terminal no longer exists.");
    }

    #[test]
    fn test_countdown_after_idle_stays_timed() {
        let (mut terminal, mut host) = booted();
        let idle = InputState::new();
        for _ in 0..60 * 60 {
            host.tick(&mut terminal, 1.0 / 60.0, &idle);
        }

        terminal.execute("selfdestruct");
        terminal.execute("confirm");
        host.tick(&mut terminal, 1.0 / 60.0, &idle);
        assert_eq!(host.process.calls, 0);
        assert_ne!(terminal.state(), TerminalState::Destroyed);
        assert!(!terminal.screen_text().contains("Self-destruct in 1..."));

        host.settle(&mut terminal);
        assert_eq!(terminal.state(), TerminalState::Destroyed);
        assert_eq!(host.process.calls, 1);
    }

    #[test]
    fn test_shutdown_closes_session() {
        let (mut terminal, mut host) = booted();
        let mut input = InputState::new();
        input.keyboard.push_text("shutdown\n");
        let mut events = host.tick(&mut terminal, 0.0, &input);
        events.extend(host.settle(&mut terminal));
        assert_eq!(terminal.state(), TerminalState::ShutDown);
        assert!(!terminal.is_session_open());
        assert!(events.contains(&TerminalEvent::SessionClosed));
        assert_eq!(terminal.camera_override(), None);
        assert_eq!(terminal.screen_text(), "");
    }

    #[test]
    fn test_dial_bad_format_has_no_audio() {
        let (mut terminal, mut host) = booted();
        host.audio.clear();
        assert_eq!(
            terminal.execute("dial 555-1234"),
            "Error: Invalid phone number format. Please use XXX-XXX-XXXX format."
        );
        assert!(!terminal.is_busy());
        host.settle(&mut terminal);
        assert!(host.audio.played.is_empty());
    }

    #[test]
    fn test_dial_unknown_number_plays_busy_signal() {
        let (mut terminal, mut host) = booted();
        host.type_line(&mut terminal, "dial 555-000-0000");
        assert!(terminal
            .screen_text()
            .starts_with("dial 555-000-0000\nThe number you have dialed (555-000-0000) is not in service.\n"));
        assert!(terminal.screen_text().ends_with("\nCall ended."));
        assert_eq!(host.audio.count("busy_signal"), 1);
        assert_eq!(terminal.state(), TerminalState::Idle);
    }

    #[test]
    fn test_locations_and_rainbow() {
        let (mut terminal, _host) = booted();
        assert_eq!(terminal.execute("setlocation"), "Command not found: setlocation");
        assert_eq!(
            terminal.execute("SetLocation Diner"),
            "Next destination set to: diner\nDescription: Diner - Route 66 Roadside"
        );
        assert_eq!(terminal.next_location(), Some("diner"));
        terminal.clear_next_location();
        assert_eq!(terminal.next_location(), None);
        assert_eq!(terminal.execute("infolocation moon"), "Error: No information available for 'moon'.");

        assert_eq!(terminal.execute("rainbow"), "Rainbow mode activated!");
        assert!(terminal.is_rainbow());
        assert_eq!(terminal.execute("rainbow"), "Rainbow mode deactivated.");
        assert_eq!(terminal.text_color(), TEXT_COLOR);
    }

    #[test]
    fn test_escape_leaves_and_reenter_skips_boot() {
        let (mut terminal, mut host) = booted();
        let mut input = InputState::new();
        input.keyboard.handle_key(crate::input::KeyCode::Escape, true);
        let events = host.tick(&mut terminal, 0.0, &input);
        assert!(events.contains(&TerminalEvent::SessionClosed));
        host.settle(&mut terminal);
        assert_eq!(terminal.camera_override(), None);

        terminal.open_session(&Pose::IDENTITY);
        assert_eq!(terminal.state(), TerminalState::Typing);
        host.settle(&mut terminal);
        assert_eq!(terminal.screen_text(), commands::WELCOME_MESSAGE);
        assert_eq!(terminal.state(), TerminalState::Idle);
    }

    #[test]
    fn test_escape_ignored_while_booting() {
        let mut terminal = Terminal::new(TerminalConfig::default(), Pose::IDENTITY);
        terminal.open_session(&Pose::IDENTITY);
        assert_eq!(terminal.state(), TerminalState::Booting);
        terminal.close_session();
        assert!(terminal.is_session_open());
    }
}
