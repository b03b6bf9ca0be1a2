//! Photo Tests - Exposure, Objectives and Capture
//!
//! Exercises the photo pipeline through the public API: stop tables,
//! objective acceptance thresholds, and the capture flow with disk storage.

use chrono::{Local, TimeZone};
use glam::{Quat, Vec3};
use rand::SeedableRng;
use rand::rngs::StdRng;
use shutterbug_engine::camera::Pose;
use shutterbug_engine::game::config::{BoardConfig, CameraConfig, GameConfig, ObjectiveConfig};
use shutterbug_engine::game::photo::{
    CameraContext, DiskPhotoStore, ExposureSettings, LevelObjectiveSet, ManifestRegistry, ObjectiveValidator,
    PhotoAlbum, PhotoBoard, PhotoCamera, PhotoMetadata, PhotoObjective, SecretLedger, exposure_value,
    focus_accuracy,
};
use shutterbug_engine::services::{AudioLog, FixedClock, SolidRenderer};
use shutterbug_engine::world::{EntityId, SphereScene};

const TARGET: EntityId = EntityId(42);

fn noon() -> chrono::DateTime<Local> {
    Local.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

// ============================================================================
// Exposure
// ============================================================================

#[test]
fn test_stop_indices_always_wrap_into_range() {
    let config = CameraConfig::default();
    let mut settings = ExposureSettings::from_config(&config).unwrap();
    for _ in 0..50 {
        settings.cycle_aperture();
        settings.cycle_shutter();
        assert!(settings.aperture_index() < config.aperture_stops.len());
        assert!(settings.shutter_index() < config.shutter_speeds.len());
    }
    // 50 cycles of an 8-stop table lands two stops past the start.
    assert_eq!(settings.aperture_index(), 50 % config.aperture_stops.len());
}

#[test]
fn test_exposure_value_spot_check() {
    let ev = exposure_value(2.8, 125.0);
    assert!((ev - (7.84f32 / 125.0).log2()).abs() < 1e-5);
    assert!((ev + 3.995).abs() < 1e-3);

    let config = CameraConfig::default();
    for &a in &config.aperture_stops {
        for &s in &config.shutter_speeds {
            assert!((exposure_value(a, s) - (a * a / s).log2()).abs() < 1e-5);
        }
    }
}

#[test]
fn test_focus_accuracy_peaks_when_matched() {
    assert_eq!(focus_accuracy(3.0, 3.0), 1.0);
    let mut last = 1.0;
    for step in 1..10 {
        let accuracy = focus_accuracy(3.0 + step as f32 * 0.2, 3.0);
        assert!(accuracy < last);
        last = accuracy;
    }
    assert_eq!(focus_accuracy(1.0, 0.0), 0.0);
}

// ============================================================================
// Objective validation
// ============================================================================

/// Sphere whose near surface is exactly `distance` down -Z from the origin.
fn scene_at(distance: f32) -> SphereScene {
    let mut scene = SphereScene::new();
    scene.add(TARGET, Vec3::new(0.0, 0.0, -(distance + 1.0)), 1.0);
    scene
}

fn validate(objective: PhotoObjective, scene: &mut SphereScene) -> bool {
    let mut validator = ObjectiveValidator::new(
        vec![LevelObjectiveSet::new("Test", vec![objective])],
        &ObjectiveConfig::default(),
    );
    let settings = ExposureSettings::from_config(&CameraConfig::default()).unwrap();
    let metadata = PhotoMetadata::capture(&settings, &Pose::IDENTITY, noon());
    let mut audio = AudioLog::new();
    validator.validate(&Pose::IDENTITY, scene, &metadata, &mut audio)
}

#[test]
fn test_max_distance_boundary() {
    let objective = || {
        PhotoObjective::new("sign", TARGET)
            .with_distance(1.0, 5.0)
            .with_min_focus_accuracy(0.0)
    };
    assert!(!validate(objective(), &mut scene_at(5.0 + 0.01)));
    assert!(validate(objective(), &mut scene_at(5.0 - 0.01)));
}

#[test]
fn test_picture_optional_ignores_thresholds() {
    // Far away and badly out of focus.
    let objective = PhotoObjective::new("sign", TARGET).picture_optional();
    assert!(validate(objective, &mut scene_at(40.0)));
}

#[test]
fn test_out_of_focus_is_rejected() {
    // Default focus is 2 m; the hit is at 4 m (accuracy 0).
    let objective = PhotoObjective::new("sign", TARGET);
    assert!(!validate(objective, &mut scene_at(4.0)));
}

#[test]
fn test_secret_revealed_on_completion() {
    let mut scene = scene_at(2.0);
    let objective = PhotoObjective::new("sign", TARGET).with_secret_material("neon");
    assert!(validate(objective, &mut scene));
    assert_eq!(scene.revealed_secret(TARGET), Some("neon"));
}

// ============================================================================
// Capture to disk
// ============================================================================

struct World {
    scene: SphereScene,
    renderer: SolidRenderer,
    audio: AudioLog,
    clock: FixedClock,
    manifests: ManifestRegistry,
    validator: ObjectiveValidator,
    store: DiskPhotoStore,
    album: PhotoAlbum,
    board: PhotoBoard,
    ledger: SecretLedger,
    rng: StdRng,
}

impl World {
    fn new(root: &std::path::Path) -> Self {
        Self {
            scene: scene_at(2.0),
            renderer: SolidRenderer::default(),
            audio: AudioLog::new(),
            clock: FixedClock(noon()),
            manifests: ManifestRegistry::new(),
            validator: ObjectiveValidator::new(
                vec![LevelObjectiveSet::new(
                    "Diner",
                    vec![PhotoObjective::new("sign", TARGET).with_secret_material("neon")],
                )],
                &ObjectiveConfig::default(),
            ),
            store: DiskPhotoStore::new(root),
            album: PhotoAlbum::new(),
            board: PhotoBoard::new(Pose::new(Vec3::new(0.0, 1.5, 5.0), Quat::IDENTITY), BoardConfig::default()),
            ledger: SecretLedger::new(),
            rng: StdRng::seed_from_u64(3),
        }
    }

    fn ctx(&mut self) -> CameraContext<'_> {
        CameraContext {
            scene: &mut self.scene,
            renderer: &mut self.renderer,
            audio: &mut self.audio,
            clock: &self.clock,
            manifests: &mut self.manifests,
            validator: &mut self.validator,
            store: &mut self.store,
            album: &mut self.album,
            board: Some(&mut self.board),
            ledger: &mut self.ledger,
            rng: &mut self.rng,
        }
    }
}

fn lens_at_eye(film: u32) -> PhotoCamera {
    let config = CameraConfig {
        default_position: Vec3::ZERO,
        zoomed_position: Vec3::ZERO,
        photo_resolution: (16, 9),
        max_film_count: film,
        ..CameraConfig::default()
    };
    PhotoCamera::new(config, Vec3::ZERO).unwrap()
}

#[test]
fn test_objective_photo_written_and_pinned() {
    let dir = tempfile::tempdir().unwrap();
    let mut world = World::new(dir.path());
    let mut camera = lens_at_eye(24);

    let outcome = camera.capture(&Pose::IDENTITY, &mut world.ctx()).unwrap();
    assert!(outcome.meaningful && outcome.objective_completed);
    let stored = outcome.stored.unwrap();
    assert!(stored.image_path.exists());
    assert!(stored.metadata_path.exists());
    assert_eq!(stored.image_path.file_stem(), stored.metadata_path.file_stem());

    let (image, metadata) = world.store.load(&stored.stem).unwrap();
    assert_eq!(image.dimensions(), (16, 9));
    assert_eq!(metadata.timestamp, noon());

    assert_eq!(camera.film_remaining(), 23);
    assert_eq!(world.album.len(), 1);
    assert_eq!(world.board.photos().len(), 1);
    assert_eq!(world.ledger.get(&stored.image_path), Some("neon"));
    assert!(world.audio.contains("camera_shutter"));
}

#[test]
fn test_empty_film_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let mut world = World::new(dir.path());
    let mut camera = lens_at_eye(0);

    assert!(camera.capture(&Pose::IDENTITY, &mut world.ctx()).is_none());
    assert_eq!(camera.film_remaining(), 0);
    assert!(world.store.list().unwrap().is_empty());
    assert!(world.audio.played.is_empty());
    assert!(world.album.is_empty());
}

#[test]
fn test_unmeaningful_photo_is_not_kept() {
    let dir = tempfile::tempdir().unwrap();
    let mut world = World::new(dir.path());
    let mut camera = lens_at_eye(24);
    let away = Pose::looking_at(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0));

    let outcome = camera.capture(&away, &mut world.ctx()).unwrap();
    assert!(!outcome.meaningful);
    assert!(outcome.stored.is_none());
    assert_eq!(camera.film_remaining(), 23);
    assert!(world.store.list().unwrap().is_empty());
    assert!(world.audio.contains("film_advance"));
    assert!(!world.audio.contains("camera_shutter"));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_empty_json_yields_defaults() {
    let config = GameConfig::from_json_str("{}").unwrap();
    assert_eq!(config.camera.max_film_count, CameraConfig::default().max_film_count);
    assert_eq!(config.terminal.locations.len(), 3);
    assert_eq!(config.objectives.max_angle_to_target, 30.0);
}

#[test]
fn test_demo_config_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("config/shutterbug.json");
    let config = GameConfig::load(path).unwrap();
    assert_eq!(config.terminal.phone.numbers.len(), 2);
    assert_eq!(config.terminal.phone.numbers[0].volume, 1.0);
}
