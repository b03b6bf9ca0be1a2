//! HyperTerminal - headless console session
//!
//! Run with: `cargo run --bin hyperterminal [config.json]`
//!
//! Boots the in-game terminal and drives it from stdin at 60 ticks per
//! second. Typed lines are submitted as commands; the typewriter output is
//! streamed to stdout. `shutdown` ends the session, `selfdestruct` +
//! `confirm` ends the process. Logs go to stderr (`RUST_LOG=debug`).

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use shutterbug_engine::InputState;
use shutterbug_engine::camera::Pose;
use shutterbug_engine::game::config::GameConfig;
use shutterbug_engine::game::terminal::{Terminal, TerminalContext, TerminalEvent, TerminalState};
use shutterbug_engine::services::{AudioLog, ExitProcess};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const TICK: Duration = Duration::from_micros(16_667);

fn spawn_stdin_reader() -> Receiver<Option<String>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(Some(line)).is_err() {
                        return;
                    }
                }
                Err(_) => break,
            }
        }
        let _ = tx.send(None);
    });
    rx
}

/// Streams screen changes to stdout. A cleared screen starts a new block.
struct ScreenEcho {
    shown: String,
}

impl ScreenEcho {
    fn sync(&mut self, screen: &str, out: &mut impl Write) -> io::Result<()> {
        if let Some(new) = screen.strip_prefix(self.shown.as_str()) {
            write!(out, "{new}")?;
        } else {
            write!(out, "\n\n{screen}")?;
        }
        self.shown = screen.to_string();
        out.flush()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shutterbug_engine=info,hyperterminal=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let mut terminal = Terminal::new(config.terminal, Pose::IDENTITY);
    terminal.open_session(&Pose::IDENTITY);

    let lines = spawn_stdin_reader();
    let mut input = InputState::new();
    let mut audio = AudioLog::new();
    let mut process = ExitProcess;
    let mut echo = ScreenEcho { shown: String::new() };
    let mut stdout = io::stdout();
    let mut stdin_open = true;
    let mut last = Instant::now();

    loop {
        let accepting = matches!(
            terminal.state(),
            TerminalState::Idle | TerminalState::AwaitingConfirmation
        );
        if accepting && stdin_open {
            match lines.try_recv() {
                Ok(Some(line)) => {
                    input.keyboard.push_text(&line);
                    input.keyboard.push_text("\n");
                }
                Ok(None) | Err(mpsc::TryRecvError::Disconnected) => stdin_open = false,
                Err(mpsc::TryRecvError::Empty) => {}
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f32();
        last = now;

        let events = {
            let mut ctx = TerminalContext {
                audio: &mut audio,
                process: &mut process,
            };
            terminal.update(dt, &input, &mut ctx)
        };
        input.end_frame();
        audio.clear();

        echo.sync(terminal.screen_text(), &mut stdout)?;

        for event in &events {
            match event {
                TerminalEvent::Explosion { scale, .. } => tracing::warn!(scale, "BOOM"),
                TerminalEvent::SessionClosed => {
                    writeln!(stdout)?;
                    tracing::info!("session closed");
                    return Ok(());
                }
                _ => tracing::debug!(?event, "terminal event"),
            }
        }

        if !stdin_open && accepting && !terminal.is_busy() {
            writeln!(stdout)?;
            return Ok(());
        }

        thread::sleep(TICK);
    }
}
