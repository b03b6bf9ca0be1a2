//! Manifestable Entities
//!
//! Scene objects that react to being photographed, independent of the
//! objective system. Entities register here when spawned and deregister when
//! despawned; the photo camera queries the registry directly.

use std::collections::BTreeMap;

use glam::Vec3;

use crate::camera::Pose;

/// Handle returned by [`ManifestRegistry::register`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ManifestId(u64);

/// Something that can appear on film.
pub trait Manifestable {
    /// World-space anchor used for the in-frame test.
    fn position(&self) -> Vec3;

    /// The raised viewfinder is looking at the scene.
    fn on_camera_view(&mut self, lens: &Pose);

    /// The viewfinder was lowered.
    fn on_camera_exit(&mut self);

    /// The shutter fired with this entity in frame. Returns whether it
    /// manifested as a result.
    fn try_manifest(&mut self) -> bool;
}

#[derive(Default)]
pub struct ManifestRegistry {
    entries: BTreeMap<ManifestId, Box<dyn Manifestable>>,
    next_id: u64,
}

impl ManifestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, manifest: Box<dyn Manifestable>) -> ManifestId {
        let id = ManifestId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, manifest);
        id
    }

    pub fn deregister(&mut self, id: ManifestId) -> Option<Box<dyn Manifestable>> {
        self.entries.remove(&id)
    }

    pub fn get(&self, id: ManifestId) -> Option<&dyn Manifestable> {
        self.entries.get(&id).map(|m| m.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn notify_view(&mut self, lens: &Pose) {
        for m in self.entries.values_mut() {
            m.on_camera_view(lens);
        }
    }

    pub fn notify_exit(&mut self) {
        for m in self.entries.values_mut() {
            m.on_camera_exit();
        }
    }

    /// Offer every entity inside the lens frustum the chance to manifest.
    /// Returns whether any of them did.
    pub fn manifest_in_view(&mut self, lens: &Pose, fov_degrees: f32, aspect_ratio: f32) -> bool {
        let mut manifested = false;
        for (id, m) in self.entries.iter_mut() {
            if !lens.sees_point(m.position(), fov_degrees, aspect_ratio) {
                continue;
            }
            if m.try_manifest() {
                tracing::info!(?id, "entity manifested on film");
                manifested = true;
            }
        }
        manifested
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ManifestState {
    Hidden,
    /// Seen through the raised viewfinder
    Sighted,
    /// Captured on film; stays manifested
    Manifested,
}

/// Stock manifestable: hidden until photographed, then permanently visible.
#[derive(Clone, Debug)]
pub struct SpectralManifest {
    pub position: Vec3,
    state: ManifestState,
}

impl SpectralManifest {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            state: ManifestState::Hidden,
        }
    }

    pub fn state(&self) -> ManifestState {
        self.state
    }
}

impl Manifestable for SpectralManifest {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn on_camera_view(&mut self, _lens: &Pose) {
        if self.state == ManifestState::Hidden {
            self.state = ManifestState::Sighted;
        }
    }

    fn on_camera_exit(&mut self) {
        if self.state == ManifestState::Sighted {
            self.state = ManifestState::Hidden;
        }
    }

    fn try_manifest(&mut self) -> bool {
        if self.state == ManifestState::Manifested {
            return false;
        }
        self.state = ManifestState::Manifested;
        true
    }
}
