//! Photo Album
//!
//! Photos captured in earlier scenes, carried until a photo board is loaded
//! and they can be pinned.

use std::path::PathBuf;
use std::sync::Arc;

use image::RgbaImage;
use rand::Rng;

use super::board::PhotoBoard;
use super::metadata::PhotoMetadata;

/// A captured frame plus what is known about it. Cheap to clone.
#[derive(Clone, Debug)]
pub struct CapturedPhoto {
    pub image: Arc<RgbaImage>,
    pub metadata: PhotoMetadata,
    /// Where the image was stored, if persistence succeeded
    pub path: Option<PathBuf>,
}

impl CapturedPhoto {
    pub fn new(image: RgbaImage, metadata: PhotoMetadata, path: Option<PathBuf>) -> Self {
        Self {
            image: Arc::new(image),
            metadata,
            path,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct PhotoAlbum {
    photos: Vec<CapturedPhoto>,
}

impl PhotoAlbum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, photo: CapturedPhoto) {
        self.photos.push(photo);
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn photos(&self) -> &[CapturedPhoto] {
        &self.photos
    }

    /// Pin every photo onto `board` and empty the album.
    pub fn transfer_to<R: Rng + ?Sized>(&mut self, board: &mut PhotoBoard, rng: &mut R) -> usize {
        let count = self.photos.len();
        for photo in self.photos.drain(..) {
            board.add_photo(photo, rng);
        }
        if count > 0 {
            tracing::info!(count, "transferred album photos to board");
        }
        count
    }
}
