//! Photo Camera
//!
//! The film camera the player picks up. Once equipped it follows the eye
//! through a [`ViewmodelRig`]. Holding the secondary button raises the
//! viewfinder; while raised the player can change stops, focus and shoot.
//!
//! A shot is "meaningful" when it completes an objective or manifests an
//! entity. Only meaningful shots fire the shutter and flash and get stored;
//! every shot advances the film.

use glam::Vec3;
use image::RgbaImage;
use rand::RngCore;

use super::album::{CapturedPhoto, PhotoAlbum};
use super::board::PhotoBoard;
use super::exposure::ExposureSettings;
use super::lens::{LensError, LensStack};
use super::manifest::ManifestRegistry;
use super::metadata::PhotoMetadata;
use super::objectives::ObjectiveValidator;
use super::persistence::{PhotoStore, SecretLedger, StoredPhoto};
use super::rig::ViewmodelRig;
use crate::camera::{Pose, Ray};
use crate::game::config::{CameraConfig, ConfigError};
use crate::game::interact::{Interactable, Interactor};
use crate::input::{InputAction, InputState, MouseButton};
use crate::services::{AudioSink, Clock, ViewRenderer, play_optional};
use crate::world::Scene;

const GRAB_PROMPT: &str = "Grab Camera";
const SETTING_CLICK_VOLUME: f32 = 0.5;

#[derive(Debug, thiserror::Error)]
pub enum CameraError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Lens(#[from] LensError),
}

/// Everything a shot touches outside the camera.
pub struct CameraContext<'a> {
    pub scene: &'a mut dyn Scene,
    pub renderer: &'a mut dyn ViewRenderer,
    pub audio: &'a mut dyn AudioSink,
    pub clock: &'a dyn Clock,
    pub manifests: &'a mut ManifestRegistry,
    pub validator: &'a mut ObjectiveValidator,
    pub store: &'a mut dyn PhotoStore,
    pub album: &'a mut PhotoAlbum,
    /// The photo board in the current scene, if there is one
    pub board: Option<&'a mut PhotoBoard>,
    pub ledger: &'a mut SecretLedger,
    pub rng: &'a mut dyn RngCore,
}

/// What a shutter press achieved.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptureOutcome {
    pub meaningful: bool,
    pub objective_completed: bool,
    pub manifested: bool,
    /// Set when a meaningful photo was written to storage
    pub stored: Option<StoredPhoto>,
}

pub struct PhotoCamera {
    config: CameraConfig,
    settings: ExposureSettings,
    lenses: LensStack,
    rig: ViewmodelRig,
    /// Resting place before the player picks it up
    pub position: Vec3,
    prompt: String,
    equipped: bool,
    zoomed: bool,
    player_fov: f32,
    film_remaining: u32,
    flash_remaining: f32,
    viewfinder: Option<RgbaImage>,
}

impl PhotoCamera {
    /// Fails on invalid stop tables or an unknown lens behavior key.
    pub fn new(config: CameraConfig, position: Vec3) -> Result<Self, CameraError> {
        let settings = ExposureSettings::from_config(&config)?;
        let lenses = LensStack::from_keys(&config.lens_behaviors)?;
        if !lenses.is_empty() {
            tracing::info!(lenses = ?lenses.names(), "attached lens behaviors");
        }
        Ok(Self {
            rig: ViewmodelRig::from_config(&config),
            film_remaining: config.max_film_count,
            settings,
            lenses,
            position,
            prompt: GRAB_PROMPT.to_string(),
            equipped: false,
            zoomed: false,
            player_fov: 0.0,
            flash_remaining: 0.0,
            viewfinder: None,
            config,
        })
    }

    pub fn settings(&self) -> &ExposureSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ExposureSettings {
        &mut self.settings
    }

    pub fn film_remaining(&self) -> u32 {
        self.film_remaining
    }

    pub fn is_equipped(&self) -> bool {
        self.equipped
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoomed
    }

    pub fn rig(&self) -> &ViewmodelRig {
        &self.rig
    }

    /// Flash light intensity for this frame.
    pub fn flash_intensity(&self) -> f32 {
        if self.flash_remaining > 0.0 {
            self.config.flash_intensity
        } else {
            0.0
        }
    }

    /// Last viewfinder frame, while it is showing.
    pub fn viewfinder(&self) -> Option<&RgbaImage> {
        if self.zoomed && !self.rig.is_clipping() {
            self.viewfinder.as_ref()
        } else {
            None
        }
    }

    /// Field of view the player camera should use.
    pub fn player_fov(&self) -> f32 {
        if self.zoomed {
            self.settings.field_of_view()
        } else {
            self.player_fov
        }
    }

    /// Pick the camera up. `player_fov` is restored whenever the viewfinder
    /// is lowered.
    pub fn equip(&mut self, player_fov: f32, audio: &mut dyn AudioSink) {
        if self.equipped {
            return;
        }
        self.equipped = true;
        self.player_fov = player_fov;
        self.prompt.clear();
        play_optional(audio, self.config.clips.equip.as_deref(), 1.0);
        tracing::info!(film = self.film_remaining, "camera equipped");
    }

    /// Pose of the lens for a given eye pose.
    pub fn lens_pose(&self, eye: &Pose) -> Pose {
        let body = self.rig.world_pose(eye);
        Pose::new(body.transform_point(self.config.lens_position), body.rotation)
    }

    /// Per-frame handling. Returns the outcome if the shutter was pressed.
    pub fn update(
        &mut self,
        dt: f32,
        input: &InputState,
        eye: &Pose,
        ctx: &mut CameraContext<'_>,
    ) -> Option<CaptureOutcome> {
        self.flash_remaining = (self.flash_remaining - dt).max(0.0);
        if !self.equipped {
            return None;
        }

        let buttons = &input.mouse.buttons;
        if buttons.just_pressed(MouseButton::Right) {
            self.zoomed = true;
        } else if buttons.just_released(MouseButton::Right) {
            self.zoomed = false;
            self.viewfinder = None;
            ctx.manifests.notify_exit();
        }

        let mut outcome = None;
        if self.zoomed {
            self.refresh_viewfinder(eye, ctx);
            if buttons.just_pressed(MouseButton::Left) {
                outcome = self.capture(eye, ctx);
            }
            self.handle_settings(input, ctx.audio);
        }

        self.rig.update(
            dt,
            self.zoomed,
            input.is_moving(),
            input.keyboard.movement.is_sprinting(),
            eye,
            &*ctx.scene,
        );
        outcome
    }

    fn refresh_viewfinder(&mut self, eye: &Pose, ctx: &mut CameraContext<'_>) {
        let lens = self.lens_pose(eye);
        if ctx
            .scene
            .raycast(&Ray::through_viewport_center(&lens), f32::INFINITY)
            .is_some()
        {
            ctx.manifests.notify_view(&lens);
        }
        self.viewfinder = ctx
            .renderer
            .render_view(&lens, self.settings.field_of_view(), self.config.viewfinder_resolution)
            .map(|mut frame| {
                self.lenses.apply(&mut frame);
                frame
            });
    }

    fn handle_settings(&mut self, input: &InputState, audio: &mut dyn AudioSink) {
        let focus_clip = self.config.clips.focus.as_deref();
        if input.action_pressed(InputAction::CycleAperture) {
            self.settings.cycle_aperture();
            play_optional(audio, focus_clip, SETTING_CLICK_VOLUME);
        }
        if input.action_pressed(InputAction::CycleShutter) {
            self.settings.cycle_shutter();
            play_optional(audio, focus_clip, SETTING_CLICK_VOLUME);
        }
        if input.action_pressed(InputAction::CycleFocalLength) {
            self.settings.cycle_focal_length();
            play_optional(audio, focus_clip, SETTING_CLICK_VOLUME);
        }
        if self.settings.apply_scroll(input.mouse.scroll.y) {
            play_optional(audio, focus_clip, SETTING_CLICK_VOLUME);
        }
    }

    /// Take a photo from the lens at `eye`.
    ///
    /// Returns `None` without touching anything when out of film or when the
    /// renderer has no target.
    pub fn capture(&mut self, eye: &Pose, ctx: &mut CameraContext<'_>) -> Option<CaptureOutcome> {
        if self.film_remaining == 0 {
            tracing::debug!("out of film");
            return None;
        }

        let lens = self.lens_pose(eye);
        let fov = self.settings.field_of_view();
        let Some(mut image) = ctx.renderer.render_view(&lens, fov, self.config.photo_resolution) else {
            tracing::debug!("no render target, shot skipped");
            return None;
        };
        self.lenses.apply(&mut image);

        let metadata = PhotoMetadata::capture(&self.settings, &lens, ctx.clock.now());
        self.film_remaining -= 1;

        let manifested = ctx
            .manifests
            .manifest_in_view(&lens, fov, self.config.photo_aspect());
        let objective_completed = ctx.validator.validate(&lens, ctx.scene, &metadata, ctx.audio);
        let meaningful = manifested || objective_completed;

        if meaningful {
            play_optional(ctx.audio, self.config.clips.shutter.as_deref(), 1.0);
            self.flash_remaining = self.config.flash_duration;
        }
        play_optional(ctx.audio, self.config.clips.film_advance.as_deref(), 1.0);

        tracing::info!(
            meaningful,
            film = self.film_remaining,
            settings = %metadata.summary(),
            "photo taken"
        );

        let stored = if meaningful {
            Self::keep(image, metadata, ctx)
        } else {
            None
        };

        Some(CaptureOutcome {
            meaningful,
            objective_completed,
            manifested,
            stored,
        })
    }

    /// Persist a meaningful photo and hand it to the album and board.
    fn keep(image: RgbaImage, metadata: PhotoMetadata, ctx: &mut CameraContext<'_>) -> Option<StoredPhoto> {
        let stored = match ctx.store.save(&image, &metadata) {
            Ok(stored) => Some(stored),
            Err(e) => {
                tracing::warn!(error = %e, "failed to store photo");
                None
            }
        };

        let photo = CapturedPhoto::new(image, metadata, stored.as_ref().map(|s| s.image_path.clone()));
        ctx.album.add(photo.clone());
        if let Some(board) = ctx.board.as_deref_mut() {
            let id = board.add_photo(photo, &mut *ctx.rng);
            board.secret_material_for(id, ctx.validator, ctx.ledger);
        }
        stored
    }
}

impl Interactable for PhotoCamera {
    fn prompt(&self) -> &str {
        &self.prompt
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn interact(&mut self, interactor: &mut Interactor<'_>) {
        self.equip(interactor.fov_degrees, interactor.audio);
    }
}
