//! Photo Board
//!
//! A cork board the player steps up to and arranges captured photos on.
//! Photos live in board-local 2D coordinates (meters from the board center,
//! +y up) and are pinned `pin_distance` in front of the surface. The board
//! faces its local +Z.
//!
//! While the player is at the board:
//! - Left mouse selects and drags a photo (drags that would overlap another
//!   photo are refused)
//! - Q / E roll the selected photo
//! - Tab arranges every photo into a grid
//! - X lifts the selected photo up for examination; right mouse turns it,
//!   X or Escape puts it back

use glam::{Quat, Vec2, Vec3};
use rand::Rng;

use super::album::CapturedPhoto;
use super::objectives::ObjectiveValidator;
use super::persistence::SecretLedger;
use crate::camera::{Pose, Ray, ViewTransition};
use crate::game::config::BoardConfig;
use crate::game::interact::{Interactable, Interactor};
use crate::input::{InputAction, InputState, MouseButton};
use crate::services::{AudioSink, play_optional};

/// Hit box half-extent relative to photo scale.
const PICK_HALF_EXTENT: f32 = 0.55;
/// Share of the photo scale two photos' centers must keep apart.
const OVERLAP_FACTOR: f32 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoardPhotoId(u64);

#[derive(Clone, Debug)]
pub struct BoardPhoto {
    pub id: BoardPhotoId,
    pub photo: CapturedPhoto,
    /// Position on the board face
    pub local_position: Vec2,
    /// Roll about the board normal (degrees)
    pub roll: f32,
    pub secret_material: Option<String>,
}

#[derive(Clone, Debug)]
struct Examination {
    photo: BoardPhotoId,
    pitch: f32,
    yaw: f32,
    pose: Pose,
}

#[derive(Clone, Debug)]
struct ReturnToPin {
    photo: BoardPhotoId,
    from: Pose,
    elapsed: f32,
}

pub struct PhotoBoard {
    pub pose: Pose,
    config: BoardConfig,
    photos: Vec<BoardPhoto>,
    next_id: u64,
    selected: Option<BoardPhotoId>,
    drag_offset: Vec2,
    interacting: bool,
    examination: Option<Examination>,
    returning: Option<ReturnToPin>,
    transition: Option<ViewTransition>,
    return_pose: Pose,
}

impl PhotoBoard {
    pub fn new(pose: Pose, config: BoardConfig) -> Self {
        Self {
            pose,
            config,
            photos: Vec::new(),
            next_id: 0,
            selected: None,
            drag_offset: Vec2::ZERO,
            interacting: false,
            examination: None,
            returning: None,
            transition: None,
            return_pose: Pose::IDENTITY,
        }
    }

    pub fn photos(&self) -> &[BoardPhoto] {
        &self.photos
    }

    pub fn photo(&self, id: BoardPhotoId) -> Option<&BoardPhoto> {
        self.photos.iter().find(|p| p.id == id)
    }

    fn photo_mut(&mut self, id: BoardPhotoId) -> Option<&mut BoardPhoto> {
        self.photos.iter_mut().find(|p| p.id == id)
    }

    pub fn selected(&self) -> Option<BoardPhotoId> {
        self.selected
    }

    pub fn is_interacting(&self) -> bool {
        self.interacting
    }

    pub fn is_examining(&self) -> bool {
        self.examination.is_some()
    }

    /// Whether the player controller should be running.
    pub fn wants_player_control(&self) -> bool {
        !self.interacting && self.transition.is_none()
    }

    fn half_size(&self) -> Vec2 {
        (self.config.board_size * 0.5).max(Vec2::ZERO)
    }

    /// Board surface normal in world space.
    pub fn normal(&self) -> Vec3 {
        self.pose.rotation * Vec3::Z
    }

    /// Pin a photo at a random spot on the board.
    pub fn add_photo<R: Rng + ?Sized>(&mut self, photo: CapturedPhoto, rng: &mut R) -> BoardPhotoId {
        let half = self.half_size();
        let local_position = Vec2::new(
            rng.gen_range(-half.x..=half.x),
            rng.gen_range(-half.y..=half.y),
        );
        let id = BoardPhotoId(self.next_id);
        self.next_id += 1;
        self.photos.push(BoardPhoto {
            id,
            photo,
            local_position,
            roll: 0.0,
            secret_material: None,
        });
        tracing::debug!(?id, x = local_position.x, y = local_position.y, "photo added to board");
        id
    }

    /// Lay photos out left to right, top to bottom, `max_columns` per row.
    pub fn arrange_grid(&mut self) {
        let half = self.half_size();
        let step = self.config.photo_scale + self.config.photo_spacing;
        let start = Vec2::new(-half.x + self.config.photo_spacing, half.y - self.config.photo_spacing);
        let columns = self.config.max_columns.max(1);
        for (i, photo) in self.photos.iter_mut().enumerate() {
            let (col, row) = (i % columns, i / columns);
            photo.local_position = start + Vec2::new(col as f32 * step, -(row as f32) * step);
            photo.roll = 0.0;
        }
    }

    /// Board-local point where a world ray meets the photo plane.
    pub fn ray_to_local(&self, ray: &Ray) -> Option<Vec2> {
        let plane_point = self.pose.transform_point(Vec3::new(0.0, 0.0, self.config.pin_distance));
        let t = ray.intersect_plane(plane_point, self.normal())?;
        let local = self.pose.inverse_transform_point(ray.point_at(t));
        Some(local.truncate())
    }

    /// Select the topmost photo under `point`.
    pub fn select_at(&mut self, point: Vec2) -> Option<BoardPhotoId> {
        let reach = self.config.photo_scale * PICK_HALF_EXTENT;
        let hit = self
            .photos
            .iter()
            .rev()
            .find(|p| {
                let d = (p.local_position - point).abs();
                d.x <= reach && d.y <= reach
            })
            .map(|p| (p.id, p.local_position))?;
        self.selected = Some(hit.0);
        self.drag_offset = hit.1 - point;
        Some(hit.0)
    }

    pub fn release(&mut self) {
        self.selected = None;
    }

    /// Whether a photo centered at `position` would sit on top of another.
    pub fn would_overlap(&self, position: Vec2, ignore: Option<BoardPhotoId>) -> bool {
        let threshold = self.config.photo_scale * OVERLAP_FACTOR;
        self.photos
            .iter()
            .filter(|p| Some(p.id) != ignore)
            .any(|p| p.local_position.distance(position) < threshold)
    }

    /// Move the selected photo so the grab point follows `point`. Returns
    /// false (and leaves the photo) if nothing is selected or the spot is taken.
    pub fn drag_to(&mut self, point: Vec2) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        let half = self.half_size();
        let proposed = (point + self.drag_offset).clamp(-half, half);
        if self.would_overlap(proposed, Some(id)) {
            return false;
        }
        match self.photo_mut(id) {
            Some(photo) => {
                photo.local_position = proposed;
                true
            }
            None => false,
        }
    }

    /// Roll the selected photo; `direction` +1 is counter-clockwise.
    pub fn rotate_selected(&mut self, direction: f32, dt: f32) {
        let speed = self.config.rotation_speed;
        if let Some(id) = self.selected {
            if let Some(photo) = self.photo_mut(id) {
                photo.roll += direction * speed * dt;
            }
        }
    }

    /// World pose of a photo sitting on its pin.
    pub fn pinned_pose(&self, photo: &BoardPhoto) -> Pose {
        let local = photo.local_position.extend(self.config.pin_distance);
        Pose::new(
            self.pose.transform_point(local),
            self.pose.rotation * Quat::from_rotation_z(photo.roll.to_radians()),
        )
    }

    /// Where the host should draw a photo this frame.
    pub fn photo_pose(&self, id: BoardPhotoId) -> Option<Pose> {
        if let Some(exam) = self.examination.as_ref().filter(|e| e.photo == id) {
            return Some(exam.pose);
        }
        let photo = self.photo(id)?;
        let pinned = self.pinned_pose(photo);
        if let Some(ret) = self.returning.as_ref().filter(|r| r.photo == id) {
            let t = (ret.elapsed / self.config.return_duration.max(f32::EPSILON)).clamp(0.0, 1.0);
            let eased = 1.0 - (t * std::f32::consts::FRAC_PI_2).cos();
            return Some(ret.from.lerp(&pinned, eased));
        }
        Some(pinned)
    }

    /// Lift the selected photo toward the viewer.
    pub fn start_examination(&mut self) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        let Some(pose) = self.photo_pose(id) else {
            return false;
        };
        self.returning = None;
        self.examination = Some(Examination {
            photo: id,
            pitch: 0.0,
            yaw: 0.0,
            pose,
        });
        true
    }

    /// Turn the examined photo. Pitch is clamped to the configured limit.
    pub fn examine_rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        let limit = self.config.examine_pitch_limit;
        if let Some(exam) = self.examination.as_mut() {
            exam.yaw += yaw_delta;
            exam.pitch = (exam.pitch + pitch_delta).clamp(-limit, limit);
        }
    }

    pub fn examine_angles(&self) -> Option<(f32, f32)> {
        self.examination.as_ref().map(|e| (e.yaw, e.pitch))
    }

    /// Put the examined photo back; it glides to its pin and is deselected.
    pub fn end_examination(&mut self) {
        if let Some(exam) = self.examination.take() {
            self.returning = Some(ReturnToPin {
                photo: exam.photo,
                from: exam.pose,
                elapsed: 0.0,
            });
            self.selected = None;
        }
    }

    /// Camera pose used while standing at the board.
    pub fn view_pose(&self) -> Pose {
        let center = self.pose.position;
        let eye = center + self.normal() * self.config.view_distance + Vec3::Y * self.config.view_height;
        Pose::looking_at(eye, center)
    }

    /// Step up to or away from the board. Refused while examining.
    pub fn toggle_interaction(&mut self, viewer: &Pose) -> bool {
        if self.is_examining() {
            tracing::debug!("cannot leave the board while examining a photo");
            return false;
        }
        self.interacting = !self.interacting;
        let speed = self.config.camera_transition_speed;
        if self.interacting {
            self.return_pose = *viewer;
            self.transition = Some(ViewTransition::new(*viewer, self.view_pose(), speed));
            tracing::info!("entered board interaction mode");
        } else {
            self.selected = None;
            self.transition = Some(ViewTransition::new(*viewer, self.return_pose, speed));
            tracing::info!("exited board interaction mode");
        }
        true
    }

    /// Advance camera transitions and board handling. Returns the camera
    /// pose the host should use, or `None` when the player owns the camera.
    ///
    /// `viewer` is the current camera pose; `fov_degrees` and `aspect_ratio`
    /// describe the screen, for mouse picking.
    pub fn update(
        &mut self,
        dt: f32,
        input: &InputState,
        viewer: &Pose,
        fov_degrees: f32,
        aspect_ratio: f32,
        audio: &mut dyn AudioSink,
    ) -> Option<Pose> {
        if let Some(ret) = self.returning.as_mut() {
            ret.elapsed += dt;
            if ret.elapsed >= self.config.return_duration {
                self.returning = None;
            }
        }

        if let Some(transition) = self.transition.as_mut() {
            let pose = transition.advance(dt);
            if transition.is_finished() {
                self.transition = None;
            }
            return Some(pose);
        }

        if !self.interacting {
            return None;
        }

        self.handle_board_input(dt, input, viewer, fov_degrees, aspect_ratio, audio);
        Some(*viewer)
    }

    fn handle_board_input(
        &mut self,
        dt: f32,
        input: &InputState,
        viewer: &Pose,
        fov_degrees: f32,
        aspect_ratio: f32,
        audio: &mut dyn AudioSink,
    ) {
        if input.action_pressed(InputAction::ArrangeBoard) && !self.is_examining() {
            self.arrange_grid();
            play_optional(audio, self.config.drop_clip.as_deref(), 1.0);
            return;
        }

        if self.is_examining() {
            self.handle_examination(dt, input, viewer);
            return;
        }

        if self.selected.is_some() {
            if input.action_held(InputAction::RotatePhotoLeft) {
                self.rotate_selected(1.0, dt);
            }
            if input.action_held(InputAction::RotatePhotoRight) {
                self.rotate_selected(-1.0, dt);
            }
        }

        let buttons = &input.mouse.buttons;
        let pointer = input
            .mouse
            .position
            .map(|p| Ray::through_viewport(viewer, (p.x, p.y), fov_degrees, aspect_ratio))
            .and_then(|ray| self.ray_to_local(&ray));

        if buttons.just_pressed(MouseButton::Left) {
            if let Some(point) = pointer {
                if self.select_at(point).is_some() {
                    play_optional(audio, self.config.pickup_clip.as_deref(), 1.0);
                }
            }
        } else if buttons.just_released(MouseButton::Left) && self.selected.is_some() {
            self.release();
            return;
        }

        if buttons.is_pressed(MouseButton::Left) {
            if let Some(point) = pointer {
                self.drag_to(point);
            }
        }

        if input.action_pressed(InputAction::ExaminePhoto) && self.selected.is_some() {
            self.start_examination();
        }
    }

    fn handle_examination(&mut self, dt: f32, input: &InputState, viewer: &Pose) {
        if input.action_pressed(InputAction::ExaminePhoto) || input.action_pressed(InputAction::Escape) {
            self.end_examination();
            return;
        }

        if input.mouse.buttons.is_pressed(MouseButton::Right) {
            let speed = self.config.examine_rotation_speed * dt;
            // Device motion is +y down; dragging up tilts the photo back.
            self.examine_rotate(input.mouse.motion.x * speed, -input.mouse.motion.y * speed);
        }

        let target_position = viewer.position
            + viewer.forward() * self.config.examine_distance
            + viewer.rotation * self.config.examine_offset;
        let smooth = (dt * self.config.examine_smooth_speed).clamp(0.0, 1.0);
        if let Some(exam) = self.examination.as_mut() {
            let target = Pose::new(
                target_position,
                viewer.rotation
                    * Quat::from_rotation_y(exam.yaw.to_radians())
                    * Quat::from_rotation_x(exam.pitch.to_radians()),
            );
            exam.pose = exam.pose.lerp(&target, smooth);
        }
    }

    /// Secret material to show on a board photo: the ledger entry for its
    /// file if there is one, otherwise the first completed objective's,
    /// which is then recorded in the ledger.
    pub fn secret_material_for(
        &mut self,
        id: BoardPhotoId,
        validator: &ObjectiveValidator,
        ledger: &mut SecretLedger,
    ) -> Option<String> {
        let photo = self.photo_mut(id)?;
        let from_ledger = photo
            .photo
            .path
            .as_deref()
            .and_then(|p| ledger.get(p))
            .map(str::to_string);

        let material = match from_ledger {
            Some(m) => Some(m),
            None => {
                let m = validator.completed_secret_material().map(str::to_string);
                if let (Some(m), Some(path)) = (m.as_deref(), photo.photo.path.as_deref()) {
                    ledger.record(path, m);
                }
                m
            }
        };
        photo.secret_material = material.clone();
        material
    }
}

impl Interactable for PhotoBoard {
    fn prompt(&self) -> &str {
        "Examine"
    }

    fn position(&self) -> Vec3 {
        self.pose.position
    }

    fn interact(&mut self, interactor: &mut Interactor<'_>) {
        self.toggle_interaction(&interactor.view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::photo::metadata::PhotoMetadata;
    use crate::game::photo::objectives::{LevelObjectiveSet, PhotoObjective};
    use crate::game::config::ObjectiveConfig;
    use crate::game::photo::album::PhotoAlbum;
    use crate::services::AudioLog;
    use crate::world::EntityId;
    use chrono::Local;
    use image::RgbaImage;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::path::PathBuf;

    fn photo(path: Option<&str>) -> CapturedPhoto {
        let meta = PhotoMetadata {
            timestamp: Local::now(),
            aperture: 2.8,
            shutter_speed: 125.0,
            focal_length: 50.0,
            focus_distance: 2.0,
            exposure_value: -3.993,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        };
        CapturedPhoto::new(RgbaImage::new(4, 4), meta, path.map(PathBuf::from))
    }

    fn board() -> PhotoBoard {
        PhotoBoard::new(Pose::IDENTITY, BoardConfig::default())
    }

    #[test]
    fn test_add_photo_lands_on_board() {
        let mut b = board();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            b.add_photo(photo(None), &mut rng);
        }
        for p in b.photos() {
            assert!(p.local_position.x.abs() <= 1.0);
            assert!(p.local_position.y.abs() <= 0.75);
        }
    }

    #[test]
    fn test_degenerate_board_pins_at_center() {
        let config = BoardConfig {
            board_size: Vec2::new(-2.0, 0.0),
            ..BoardConfig::default()
        };
        let mut b = PhotoBoard::new(Pose::IDENTITY, config);
        let mut rng = StdRng::seed_from_u64(7);
        b.add_photo(photo(None), &mut rng);
        assert_eq!(b.photos()[0].local_position, Vec2::ZERO);
    }

    #[test]
    fn test_arrange_grid_rows_of_four() {
        let mut b = board();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..5 {
            b.add_photo(photo(None), &mut rng);
        }
        b.photos[0].roll = 30.0;
        b.arrange_grid();
        let pos: Vec<Vec2> = b.photos().iter().map(|p| p.local_position).collect();
        assert!((pos[0] - Vec2::new(-0.9, 0.65)).length() < 1e-5);
        assert!((pos[3] - Vec2::new(-0.9 + 3.0 * 0.3, 0.65)).length() < 1e-5);
        assert!((pos[4] - Vec2::new(-0.9, 0.35)).length() < 1e-5);
        assert_eq!(b.photos()[0].roll, 0.0);
    }

    #[test]
    fn test_drag_refuses_overlap_and_clamps() {
        let mut b = board();
        let mut rng = StdRng::seed_from_u64(3);
        let a = b.add_photo(photo(None), &mut rng);
        let other = b.add_photo(photo(None), &mut rng);
        b.photo_mut(a).unwrap().local_position = Vec2::new(-0.5, 0.0);
        b.photo_mut(other).unwrap().local_position = Vec2::new(0.5, 0.0);

        assert_eq!(b.select_at(Vec2::new(-0.5, 0.0)), Some(a));
        // 0.1 from the other photo is inside 0.8 * 0.2.
        assert!(!b.drag_to(Vec2::new(0.4, 0.0)));
        assert_eq!(b.photo(a).unwrap().local_position, Vec2::new(-0.5, 0.0));

        assert!(b.drag_to(Vec2::new(0.0, 0.0)));
        assert!(b.drag_to(Vec2::new(-5.0, 5.0)));
        assert_eq!(b.photo(a).unwrap().local_position, Vec2::new(-1.0, 0.75));
    }

    #[test]
    fn test_rotate_selected_at_configured_speed() {
        let mut b = board();
        let mut rng = StdRng::seed_from_u64(3);
        let id = b.add_photo(photo(None), &mut rng);
        let at = b.photo(id).unwrap().local_position;
        b.select_at(at);
        b.rotate_selected(1.0, 0.5);
        assert!((b.photo(id).unwrap().roll - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_examination_blocks_leaving_and_returns_photo() {
        let mut b = board();
        let mut rng = StdRng::seed_from_u64(3);
        let id = b.add_photo(photo(None), &mut rng);
        let viewer = Pose::looking_at(Vec3::new(0.0, 0.0, 2.0), Vec3::ZERO);
        assert!(b.toggle_interaction(&viewer));
        assert!(b.is_interacting());

        let at = b.photo(id).unwrap().local_position;
        b.select_at(at);
        assert!(b.start_examination());
        b.examine_rotate(10.0, 500.0);
        assert_eq!(b.examine_angles(), Some((10.0, 80.0)));
        assert!(!b.toggle_interaction(&viewer));

        b.end_examination();
        assert!(!b.is_examining());
        assert_eq!(b.selected(), None);
        assert!(b.toggle_interaction(&viewer));
        assert!(!b.is_interacting());
    }

    #[test]
    fn test_view_transition_hands_camera_back() {
        let mut b = board();
        let start = Pose::looking_at(Vec3::new(0.0, 1.6, 4.0), Vec3::ZERO);
        let input = InputState::new();
        let mut audio = AudioLog::new();

        b.toggle_interaction(&start);
        assert!(!b.wants_player_control());
        let mut pose = start;
        for _ in 0..30 {
            pose = b.update(0.1, &input, &pose, 60.0, 1.5, &mut audio).unwrap();
        }
        assert!((pose.position - b.view_pose().position).length() < 1e-4);

        b.toggle_interaction(&pose);
        for _ in 0..30 {
            if let Some(p) = b.update(0.1, &input, &pose, 60.0, 1.5, &mut audio) {
                pose = p;
            }
        }
        assert!(b.wants_player_control());
        assert!((pose.position - start.position).length() < 1e-3);
    }

    #[test]
    fn test_ray_picks_photo_on_plane() {
        let mut b = board();
        let mut rng = StdRng::seed_from_u64(3);
        let id = b.add_photo(photo(None), &mut rng);
        b.photo_mut(id).unwrap().local_position = Vec2::new(0.2, 0.1);

        let eye = Vec3::new(0.2, 0.1, 2.0);
        let ray = Ray::new(eye, Vec3::NEG_Z);
        let point = b.ray_to_local(&ray).unwrap();
        assert!((point - Vec2::new(0.2, 0.1)).length() < 1e-4);
        assert_eq!(b.select_at(point), Some(id));
    }

    #[test]
    fn test_secret_material_prefers_ledger_then_objective() {
        let mut b = board();
        let mut rng = StdRng::seed_from_u64(3);
        let mut ledger = SecretLedger::new();
        let validator = ObjectiveValidator::new(
            vec![LevelObjectiveSet::new(
                "Diner",
                vec![PhotoObjective::new("sign", EntityId(1)).with_secret_material("ghost")],
            )],
            &ObjectiveConfig::default(),
        );

        let known = b.add_photo(photo(Some("a.png")), &mut rng);
        ledger.record(std::path::Path::new("a.png"), "ledger_glow");
        assert_eq!(b.secret_material_for(known, &validator, &mut ledger).as_deref(), Some("ledger_glow"));

        // Nothing completed yet: no material, nothing recorded.
        let fresh = b.add_photo(photo(Some("b.png")), &mut rng);
        assert_eq!(b.secret_material_for(fresh, &validator, &mut ledger), None);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_album_transfer_empties_album() {
        let mut album = PhotoAlbum::new();
        album.add(photo(None));
        album.add(photo(None));
        let mut b = board();
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(album.transfer_to(&mut b, &mut rng), 2);
        assert!(album.is_empty());
        assert_eq!(b.photos().len(), 2);
    }
}
