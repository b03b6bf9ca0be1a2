//! Lens Behaviors
//!
//! Post-processing steps applied to a captured frame before it is validated
//! and stored. Behaviors are looked up by key in a fixed registry when the
//! camera is built; an unknown key is a configuration error.

use image::{Rgba, RgbaImage};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LensError {
    #[error("unknown lens behavior: {0}")]
    UnknownLensBehavior(String),
}

/// A post-process applied to the rendered photo.
pub trait LensBehavior: Send + Sync {
    fn name(&self) -> &'static str;
    fn apply(&self, image: &mut RgbaImage);
}

type LensFactory = fn() -> Box<dyn LensBehavior>;

/// Every behavior a camera config may name.
const REGISTRY: &[(&str, LensFactory)] = &[
    ("grayscale", make_grayscale),
    ("sepia", make_sepia),
    ("vignette", make_vignette),
];

fn make_grayscale() -> Box<dyn LensBehavior> {
    Box::new(Grayscale)
}

fn make_sepia() -> Box<dyn LensBehavior> {
    Box::new(Sepia)
}

fn make_vignette() -> Box<dyn LensBehavior> {
    Box::new(Vignette::default())
}

/// Keys accepted by [`resolve_lens`].
pub fn registered_lenses() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|(key, _)| *key)
}

pub fn resolve_lens(key: &str) -> Result<Box<dyn LensBehavior>, LensError> {
    REGISTRY
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, make)| make())
        .ok_or_else(|| LensError::UnknownLensBehavior(key.to_string()))
}

/// Ordered behaviors attached to one camera lens.
#[derive(Default)]
pub struct LensStack {
    behaviors: Vec<Box<dyn LensBehavior>>,
}

impl LensStack {
    /// Resolve every non-empty key, failing on the first unknown one.
    pub fn from_keys<S: AsRef<str>>(keys: &[S]) -> Result<Self, LensError> {
        let mut behaviors = Vec::new();
        for key in keys {
            let key = key.as_ref().trim();
            if key.is_empty() {
                continue;
            }
            let behavior = resolve_lens(key)?;
            tracing::info!(lens = behavior.name(), "attached lens behavior");
            behaviors.push(behavior);
        }
        Ok(Self { behaviors })
    }

    pub fn apply(&self, image: &mut RgbaImage) {
        for behavior in &self.behaviors {
            behavior.apply(image);
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.behaviors.iter().map(|b| b.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }
}

impl std::fmt::Debug for LensStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

fn luma(p: &Rgba<u8>) -> f32 {
    0.299 * p[0] as f32 + 0.587 * p[1] as f32 + 0.114 * p[2] as f32
}

fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

pub struct Grayscale;

impl LensBehavior for Grayscale {
    fn name(&self) -> &'static str {
        "grayscale"
    }

    fn apply(&self, image: &mut RgbaImage) {
        for p in image.pixels_mut() {
            let y = to_u8(luma(p));
            *p = Rgba([y, y, y, p[3]]);
        }
    }
}

pub struct Sepia;

impl LensBehavior for Sepia {
    fn name(&self) -> &'static str {
        "sepia"
    }

    fn apply(&self, image: &mut RgbaImage) {
        for p in image.pixels_mut() {
            let (r, g, b) = (p[0] as f32, p[1] as f32, p[2] as f32);
            *p = Rgba([
                to_u8(0.393 * r + 0.769 * g + 0.189 * b),
                to_u8(0.349 * r + 0.686 * g + 0.168 * b),
                to_u8(0.272 * r + 0.534 * g + 0.131 * b),
                p[3],
            ]);
        }
    }
}

/// Darkens toward the corners.
pub struct Vignette {
    /// Brightness lost at the corners (0-1)
    pub strength: f32,
}

impl Default for Vignette {
    fn default() -> Self {
        Self { strength: 0.6 }
    }
}

impl LensBehavior for Vignette {
    fn name(&self) -> &'static str {
        "vignette"
    }

    fn apply(&self, image: &mut RgbaImage) {
        let (w, h) = image.dimensions();
        let (cx, cy) = (w as f32 * 0.5, h as f32 * 0.5);
        let max_r = (cx * cx + cy * cy).sqrt().max(1.0);
        for (x, y, p) in image.enumerate_pixels_mut() {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            let r = (dx * dx + dy * dy).sqrt() / max_r;
            let k = 1.0 - self.strength * r * r;
            *p = Rgba([
                to_u8(p[0] as f32 * k),
                to_u8(p[1] as f32 * k),
                to_u8(p[2] as f32 * k),
                p[3],
            ]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_key_fails_fast() {
        let err = LensStack::from_keys(&["grayscale", "fisheye"]).unwrap_err();
        assert_eq!(err, LensError::UnknownLensBehavior("fisheye".into()));
    }

    #[test]
    fn test_empty_keys_are_skipped() {
        let stack = LensStack::from_keys(&["", "  ", "sepia"]).unwrap();
        assert_eq!(stack.names(), vec!["sepia"]);
    }

    #[test]
    fn test_grayscale_equalizes_channels() {
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([200, 50, 10, 255]));
        Grayscale.apply(&mut img);
        let p = img.get_pixel(1, 1);
        assert_eq!(p[0], p[1]);
        assert_eq!(p[1], p[2]);
        assert_eq!(p[3], 255);
    }

    #[test]
    fn test_vignette_keeps_center_darkens_corner() {
        let mut img = RgbaImage::from_pixel(9, 9, Rgba([200, 200, 200, 255]));
        Vignette::default().apply(&mut img);
        assert!(img.get_pixel(4, 4)[0] >= 199);
        assert!(img.get_pixel(0, 0)[0] < 150);
    }

    #[test]
    fn test_every_registered_key_resolves() {
        for key in registered_lenses() {
            assert_eq!(resolve_lens(key).unwrap().name(), key);
        }
    }
}
