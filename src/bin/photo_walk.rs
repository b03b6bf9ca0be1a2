//! Photo Walk - scripted capture run
//!
//! Run with: `cargo run --bin photo_walk [output_dir] [config.json]`
//!
//! Sets up a small sphere scene with one photo objective and a spectral
//! entity, picks up the camera, raises the viewfinder and takes three shots:
//! the objective, the spectral entity, and an empty wall. Meaningful photos
//! are written to `<output_dir>/GamePhotos` as PNG plus JSON metadata and
//! pinned to the board.

use std::path::PathBuf;

use chrono::Local;
use glam::{Quat, Vec3};
use rand::SeedableRng;
use rand::rngs::StdRng;
use shutterbug_engine::camera::Pose;
use shutterbug_engine::game::config::GameConfig;
use shutterbug_engine::game::photo::{
    CameraContext, DiskPhotoStore, LevelObjectiveSet, ManifestRegistry, ObjectiveValidator, PhotoAlbum, PhotoBoard,
    PhotoCamera, PhotoObjective, SecretLedger, SpectralManifest,
};
use shutterbug_engine::services::{AudioLog, SolidRenderer, SystemClock};
use shutterbug_engine::world::{EntityId, SphereScene};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DINER_SIGN: EntityId = EntityId(1);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shutterbug_engine=info,photo_walk=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let output = PathBuf::from(args.next().unwrap_or_else(|| "photo_walk_out".to_string()));
    let config = match args.next() {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let eye = Pose::new(Vec3::new(0.0, 1.6, 0.0), Quat::IDENTITY);
    let mut camera = PhotoCamera::new(config.camera.clone(), Vec3::new(0.5, 1.0, -0.5))?;
    let mut audio = AudioLog::new();
    camera.equip(60.0, &mut audio);

    // The sign sits straight down the lens axis at the starting focus distance.
    let lens = camera.lens_pose(&eye);
    let focus = camera.settings().focus_distance();
    let mut scene = SphereScene::new();
    scene.add(DINER_SIGN, lens.position + lens.forward() * (focus + 0.3), 0.3);

    let mut manifests = ManifestRegistry::new();
    let ghost_at = eye.position + Vec3::new(4.0, 0.0, 0.0);
    manifests.register(Box::new(SpectralManifest::new(ghost_at)));

    let mut validator = ObjectiveValidator::new(
        vec![LevelObjectiveSet::new(
            "Diner",
            vec![
                PhotoObjective::new("Diner sign", DINER_SIGN)
                    .with_description("Photograph the neon sign")
                    .with_secret_material("neon_secret"),
            ],
        )],
        &config.objectives,
    );

    let mut renderer = SolidRenderer::default();
    let clock = SystemClock;
    let mut store = DiskPhotoStore::new(&output);
    let mut album = PhotoAlbum::new();
    let mut board = PhotoBoard::new(
        Pose::new(Vec3::new(0.0, 1.5, -5.0), Quat::from_rotation_y(std::f32::consts::PI)),
        config.board.clone(),
    );
    let mut ledger = SecretLedger::new();
    let mut rng = StdRng::seed_from_u64(Local::now().timestamp() as u64);

    println!("{}", validator.objectives_display());

    let shots = [
        ("diner sign", eye),
        ("spectral figure", Pose::looking_at(eye.position, ghost_at)),
        ("empty wall", Pose::looking_at(eye.position, eye.position - Vec3::X)),
    ];
    for (label, pose) in shots {
        let mut ctx = CameraContext {
            scene: &mut scene,
            renderer: &mut renderer,
            audio: &mut audio,
            clock: &clock,
            manifests: &mut manifests,
            validator: &mut validator,
            store: &mut store,
            album: &mut album,
            board: Some(&mut board),
            ledger: &mut ledger,
            rng: &mut rng,
        };
        ctx.manifests.notify_view(&camera.lens_pose(&pose));
        match camera.capture(&pose, &mut ctx) {
            Some(outcome) => {
                let saved = outcome
                    .stored
                    .as_ref()
                    .map(|s| s.image_path.display().to_string())
                    .unwrap_or_else(|| "not kept".to_string());
                println!(
                    "{label:>16}: meaningful={} objective={} manifested={} -> {saved}",
                    outcome.meaningful, outcome.objective_completed, outcome.manifested
                );
            }
            None => println!("{label:>16}: no photo"),
        }
    }

    println!();
    println!("{}", validator.objectives_display());
    println!(
        "film left: {}, album: {}, board: {}, secrets: {}",
        camera.film_remaining(),
        album.len(),
        board.photos().len(),
        ledger.len()
    );
    if let Some(material) = scene.revealed_secret(DINER_SIGN) {
        println!("diner sign now shows '{material}'");
    }
    Ok(())
}

