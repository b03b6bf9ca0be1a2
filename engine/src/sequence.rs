//! Timed Step Sequences
//!
//! Multi-frame scripted behavior (typewriter text, countdowns, dial tones,
//! fades) expressed as data: an ordered list of waits and actions, advanced
//! by the frame tick. The sequence keeps a clock, the time its next step may
//! run, and how many steps it has consumed, so it resumes exactly where the
//! last tick left it. Overshoot from a long frame carries into later waits.

use std::collections::VecDeque;

/// One step of a [`Sequence`].
#[derive(Clone, Debug, PartialEq)]
pub enum Step<A> {
    /// Hold for this many seconds before the next step.
    Wait(f32),
    /// Release an action to the owner.
    Emit(A),
}

/// A resumable list of timed steps.
#[derive(Clone, Debug)]
pub struct Sequence<A> {
    steps: VecDeque<Step<A>>,
    clock: f32,
    wake_at: f32,
    step_index: usize,
}

impl<A> Default for Sequence<A> {
    fn default() -> Self {
        Self {
            steps: VecDeque::new(),
            clock: 0.0,
            wake_at: 0.0,
            step_index: 0,
        }
    }
}

impl<A> Sequence<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: append a wait.
    pub fn wait(mut self, seconds: f32) -> Self {
        self.push_wait(seconds);
        self
    }

    /// Builder: append an action.
    pub fn emit(mut self, action: A) -> Self {
        self.push_emit(action);
        self
    }

    pub fn push_wait(&mut self, seconds: f32) {
        self.resume_from_idle();
        self.steps.push_back(Step::Wait(seconds.max(0.0)));
    }

    pub fn push_emit(&mut self, action: A) {
        self.resume_from_idle();
        self.steps.push_back(Step::Emit(action));
    }

    /// Append every step of `other` after the current tail.
    pub fn append(&mut self, other: Sequence<A>) {
        self.resume_from_idle();
        self.steps.extend(other.steps);
    }

    /// Idle time spent after the last step must not count against steps
    /// queued later; they start from the current clock.
    fn resume_from_idle(&mut self) {
        if self.steps.is_empty() {
            self.wake_at = self.wake_at.max(self.clock);
        }
    }

    /// Advance the clock by `dt` and return every action that became due,
    /// in order.
    pub fn advance(&mut self, dt: f32) -> Vec<A> {
        self.clock += dt.max(0.0);
        let mut due = Vec::new();
        while self.clock >= self.wake_at {
            let Some(step) = self.steps.pop_front() else {
                break;
            };
            self.step_index += 1;
            match step {
                Step::Wait(seconds) => self.wake_at += seconds,
                Step::Emit(action) => due.push(action),
            }
        }
        due
    }

    /// No steps left and no hold pending.
    pub fn is_finished(&self) -> bool {
        self.steps.is_empty() && self.clock >= self.wake_at
    }

    /// Steps consumed so far.
    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn remaining_steps(&self) -> usize {
        self.steps.len()
    }

    /// Seconds of waiting left in the unconsumed steps, plus the current hold.
    pub fn remaining_time(&self) -> f32 {
        let pending: f32 = self
            .steps
            .iter()
            .map(|s| match s {
                Step::Wait(seconds) => *seconds,
                Step::Emit(_) => 0.0,
            })
            .sum();
        pending + (self.wake_at - self.clock).max(0.0)
    }

    /// Drop all remaining steps.
    pub fn cancel(&mut self) {
        self.steps.clear();
        self.wake_at = self.clock;
    }
}
