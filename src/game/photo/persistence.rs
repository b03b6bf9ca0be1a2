//! Photo Persistence
//!
//! Writes each meaningful photo as a PNG plus a JSON metadata sidecar under
//! `<root>/GamePhotos/`, both named `Photo_YYYY-MM-DD_HH-MM-SS`. Also keeps
//! the ledger of which secret material a board photo revealed.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::RgbaImage;

use super::metadata::PhotoMetadata;

pub const PHOTO_DIR: &str = "GamePhotos";

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no stored photo named {0}")]
    NotFound(String),
}

/// Where a photo ended up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredPhoto {
    /// File name without extension, shared by image and sidecar
    pub stem: String,
    pub image_path: PathBuf,
    pub metadata_path: PathBuf,
}

/// Durable storage for captured photos.
pub trait PhotoStore {
    fn save(&mut self, image: &RgbaImage, metadata: &PhotoMetadata) -> Result<StoredPhoto, PersistenceError>;
}

/// File name stem for a capture time.
pub fn photo_stem(metadata: &PhotoMetadata) -> String {
    format!("Photo_{}", metadata.timestamp.format("%Y-%m-%d_%H-%M-%S"))
}

/// Filesystem-backed store.
#[derive(Clone, Debug)]
pub struct DiskPhotoStore {
    dir: PathBuf,
}

impl DiskPhotoStore {
    /// Photos go to `<root>/GamePhotos`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            dir: root.as_ref().join(PHOTO_DIR),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn paths_for(&self, stem: &str) -> (PathBuf, PathBuf) {
        (
            self.dir.join(format!("{stem}.png")),
            self.dir.join(format!("{stem}.json")),
        )
    }

    /// First stem at or after `base` whose image and sidecar are both free.
    fn unused_stem(&self, base: &str) -> String {
        let mut stem = base.to_string();
        let mut n = 1;
        loop {
            let (png, json) = self.paths_for(&stem);
            if !png.exists() && !json.exists() {
                return stem;
            }
            stem = format!("{base}_{n}");
            n += 1;
        }
    }

    /// Read a stored photo back.
    pub fn load(&self, stem: &str) -> Result<(RgbaImage, PhotoMetadata), PersistenceError> {
        let (png, json) = self.paths_for(stem);
        if !png.exists() || !json.exists() {
            return Err(PersistenceError::NotFound(stem.to_string()));
        }
        let image = image::open(&png)?.to_rgba8();
        let metadata = serde_json::from_str(&std::fs::read_to_string(&json)?)?;
        Ok((image, metadata))
    }

    /// Stems of every stored photo, sorted.
    pub fn list(&self) -> Result<Vec<String>, PersistenceError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut stems = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == "png") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    stems.push(stem.to_string());
                }
            }
        }
        stems.sort();
        Ok(stems)
    }
}

impl PhotoStore for DiskPhotoStore {
    fn save(&mut self, image: &RgbaImage, metadata: &PhotoMetadata) -> Result<StoredPhoto, PersistenceError> {
        std::fs::create_dir_all(&self.dir)?;

        let stem = self.unused_stem(&photo_stem(metadata));
        let (image_path, metadata_path) = self.paths_for(&stem);

        image.save_with_format(&image_path, image::ImageFormat::Png)?;
        std::fs::write(&metadata_path, serde_json::to_string_pretty(metadata)?)?;

        tracing::info!(path = %image_path.display(), "saved photo");
        Ok(StoredPhoto {
            stem,
            image_path,
            metadata_path,
        })
    }
}

/// Photo path -> secret material revealed for it. Survives scene changes.
#[derive(Clone, Debug, Default)]
pub struct SecretLedger {
    entries: HashMap<PathBuf, String>,
}

impl SecretLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, photo: &Path, material: &str) {
        if photo.as_os_str().is_empty() {
            return;
        }
        self.entries.insert(photo.to_path_buf(), material.to_string());
    }

    pub fn get(&self, photo: &Path) -> Option<&str> {
        self.entries.get(photo).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
