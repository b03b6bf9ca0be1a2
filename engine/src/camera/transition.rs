//! View Transition Module
//!
//! Time-normalized blend of the player camera between two poses, used when
//! the player sits down at a terminal or steps up to the photo board and
//! when they leave again.

use super::Pose;

/// Blend from one pose to another at `speed` (1 / seconds).
#[derive(Clone, Debug)]
pub struct ViewTransition {
    from: Pose,
    to: Pose,
    speed: f32,
    t: f32,
}

impl ViewTransition {
    pub fn new(from: Pose, to: Pose, speed: f32) -> Self {
        Self {
            from,
            to,
            speed,
            t: 0.0,
        }
    }

    /// Advance and return the blended pose for this frame.
    pub fn advance(&mut self, dt: f32) -> Pose {
        self.t = (self.t + dt * self.speed).clamp(0.0, 1.0);
        self.current()
    }

    pub fn current(&self) -> Pose {
        self.from.lerp(&self.to, self.t)
    }

    /// Normalized progress in [0, 1].
    pub fn progress(&self) -> f32 {
        self.t
    }

    pub fn is_finished(&self) -> bool {
        self.t >= 1.0
    }

    pub fn target(&self) -> Pose {
        self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_transition_reaches_target() {
        let from = Pose::IDENTITY;
        let to = Pose::looking_at(Vec3::new(0.0, 1.6, 2.0), Vec3::ZERO);
        let mut transition = ViewTransition::new(from, to, 5.0);

        let mid = transition.advance(0.1);
        assert!((transition.progress() - 0.5).abs() < 1e-5);
        assert!((mid.position - Vec3::new(0.0, 0.8, 1.0)).length() < 1e-5);
        assert!(!transition.is_finished());

        let end = transition.advance(1.0);
        assert!(transition.is_finished());
        assert!((end.position - to.position).length() < 1e-5);
    }
}
