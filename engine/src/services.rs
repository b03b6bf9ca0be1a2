//! Collaborator Services
//!
//! The narrow interfaces gameplay code uses to reach the host engine: audio
//! playback and loops, offscreen rendering, wall-clock time and process control.
//! Everything is passed in by reference on each call, so tests swap in the
//! recording doubles defined here.

use chrono::{DateTime, Local};
use image::RgbaImage;

use crate::camera::Pose;

/// Fire-and-forget audio playback.
pub trait AudioSink {
    fn play_once(&mut self, clip: &str, volume: f32);
}

/// Play `clip` if one is configured.
pub fn play_optional(audio: &mut dyn AudioSink, clip: Option<&str>, volume: f32) {
    if let Some(clip) = clip.filter(|c| !c.is_empty()) {
        audio.play_once(clip, volume);
    }
}

/// Discards every clip.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_once(&mut self, _clip: &str, _volume: f32) {}
}

/// Records every clip played, in order. Used by the headless binaries and tests.
#[derive(Clone, Debug, Default)]
pub struct AudioLog {
    pub played: Vec<(String, f32)>,
}

impl AudioLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, clip: &str) -> usize {
        self.played.iter().filter(|(c, _)| c == clip).count()
    }

    pub fn contains(&self, clip: &str) -> bool {
        self.count(clip) > 0
    }

    pub fn clear(&mut self) {
        self.played.clear();
    }
}

impl AudioSink for AudioLog {
    fn play_once(&mut self, clip: &str, volume: f32) {
        tracing::trace!(clip, volume, "play");
        self.played.push((clip.to_string(), volume));
    }
}

/// A looping audio source owned by the host (ambience beds).
pub trait LoopSource {
    fn is_playing(&self) -> bool;
    fn play(&mut self);
    fn set_volume(&mut self, volume: f32);
}

/// Loop source that records its state instead of producing sound.
#[derive(Clone, Debug, Default)]
pub struct LoopLog {
    pub playing: bool,
    pub volume: f32,
    pub starts: u32,
}

impl LoopSource for LoopLog {
    fn is_playing(&self) -> bool {
        self.playing
    }

    fn play(&mut self) {
        self.playing = true;
        self.starts += 1;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }
}

/// Blocking offscreen render of the scene.
pub trait ViewRenderer {
    /// Render the view from `pose` at the given resolution. `None` means there
    /// is no active render target.
    fn render_view(&mut self, pose: &Pose, fov_degrees: f32, resolution: (u32, u32)) -> Option<RgbaImage>;
}

/// Renders a flat color at the requested size.
#[derive(Clone, Copy, Debug)]
pub struct SolidRenderer {
    pub color: [u8; 4],
}

impl Default for SolidRenderer {
    fn default() -> Self {
        Self {
            color: [128, 128, 128, 255],
        }
    }
}

impl ViewRenderer for SolidRenderer {
    fn render_view(&mut self, _pose: &Pose, _fov_degrees: f32, resolution: (u32, u32)) -> Option<RgbaImage> {
        let (w, h) = resolution;
        Some(RgbaImage::from_pixel(w.max(1), h.max(1), image::Rgba(self.color)))
    }
}

/// Wall-clock source for photo timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Returns the same instant every call.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Unconditional process termination.
pub trait ProcessControl {
    fn terminate(&mut self);
}

/// Exits the process with status 0.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExitProcess;

impl ProcessControl for ExitProcess {
    fn terminate(&mut self) {
        tracing::warn!("terminating process");
        std::process::exit(0);
    }
}

/// Counts termination requests instead of exiting.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminationCounter {
    pub calls: u32,
}

impl ProcessControl for TerminationCounter {
    fn terminate(&mut self) {
        self.calls += 1;
    }
}
