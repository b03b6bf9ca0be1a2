//! Tutorial Manager
//!
//! Queued hint messages. Each message fades in, holds, and fades out before
//! the next one starts; the host draws [`TutorialManager::text`] at
//! [`TutorialManager::alpha`].

use std::collections::VecDeque;

use crate::game::config::TutorialConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Hidden,
    FadeIn(f32),
    Hold(f32),
    FadeOut(f32),
}

#[derive(Clone, Debug)]
pub struct TutorialManager {
    display_duration: f32,
    fade_duration: f32,
    queue: VecDeque<String>,
    current: Option<String>,
    phase: Phase,
}

impl TutorialManager {
    pub fn new(config: &TutorialConfig) -> Self {
        Self {
            display_duration: config.display_duration,
            fade_duration: config.fade_duration,
            queue: VecDeque::new(),
            current: None,
            phase: Phase::Hidden,
        }
    }

    pub fn queue_message(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(%message, "tutorial message queued");
        self.queue.push_back(message);
        if self.phase == Phase::Hidden {
            self.show_next();
        }
    }

    /// Message on screen, if any.
    pub fn text(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Opacity of the message panel in [0, 1].
    pub fn alpha(&self) -> f32 {
        let fade = self.fade_duration.max(f32::EPSILON);
        match self.phase {
            Phase::Hidden => 0.0,
            Phase::FadeIn(t) => (t / fade).min(1.0),
            Phase::Hold(_) => 1.0,
            Phase::FadeOut(t) => 1.0 - (t / fade).min(1.0),
        }
    }

    pub fn is_displaying(&self) -> bool {
        self.phase != Phase::Hidden
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    fn show_next(&mut self) {
        match self.queue.pop_front() {
            Some(message) => {
                self.current = Some(message);
                self.phase = Phase::FadeIn(0.0);
            }
            None => {
                self.current = None;
                self.phase = Phase::Hidden;
            }
        }
    }

    pub fn update(&mut self, dt: f32) {
        let mut remaining = dt.max(0.0);
        loop {
            let (elapsed, limit) = match self.phase {
                Phase::Hidden => return,
                Phase::FadeIn(t) | Phase::FadeOut(t) => (t, self.fade_duration),
                Phase::Hold(t) => (t, self.display_duration),
            };
            let left = limit - elapsed;
            if remaining < left {
                let t = elapsed + remaining;
                self.phase = match self.phase {
                    Phase::FadeIn(_) => Phase::FadeIn(t),
                    Phase::Hold(_) => Phase::Hold(t),
                    _ => Phase::FadeOut(t),
                };
                return;
            }
            remaining -= left.max(0.0);
            match self.phase {
                Phase::FadeIn(_) => self.phase = Phase::Hold(0.0),
                Phase::Hold(_) => self.phase = Phase::FadeOut(0.0),
                _ => self.show_next(),
            }
        }
    }
}
