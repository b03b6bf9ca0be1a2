//! Photo Pipeline
//!
//! Exposure settings, the photo camera and its capture flow, lens
//! post-processing, manifestable entities, objective validation, storage,
//! the cross-scene album and the pin board.

pub mod album;
pub mod board;
pub mod camera;
pub mod exposure;
pub mod lens;
pub mod manifest;
pub mod metadata;
pub mod objectives;
pub mod persistence;
pub mod rig;

pub use album::{CapturedPhoto, PhotoAlbum};
pub use board::{BoardPhoto, BoardPhotoId, PhotoBoard};
pub use camera::{CameraContext, CameraError, CaptureOutcome, PhotoCamera};
pub use exposure::{ExposureSettings, exposure_value};
pub use lens::{LensBehavior, LensError, LensStack};
pub use manifest::{ManifestId, ManifestRegistry, ManifestState, Manifestable, SpectralManifest};
pub use metadata::PhotoMetadata;
pub use objectives::{LevelObjectiveSet, ObjectiveError, ObjectiveValidator, PhotoObjective, focus_accuracy};
pub use persistence::{DiskPhotoStore, PersistenceError, PhotoStore, SecretLedger, StoredPhoto};
pub use rig::ViewmodelRig;
