//! Image loading on top of the core asset cache.
//!
//! Images are decoded to RGBA8 once and keyed by their path relative to the
//! asset root; the same key is used to register the texture with the canvas
//! and to reference it from `Shape::Image`. A missing or undecodable image is
//! replaced by a checkerboard placeholder so a broken asset never stops the
//! game from starting.

use std::path::Path;
use std::sync::Arc;

use dna_core::assets::AssetCache;
use glam::Vec2;

const PLACEHOLDER_SIZE: u32 = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl ImageData {
    /// Magenta/black checkerboard.
    pub fn placeholder() -> Self {
        let mut rgba = Vec::with_capacity((PLACEHOLDER_SIZE * PLACEHOLDER_SIZE * 4) as usize);
        for y in 0..PLACEHOLDER_SIZE {
            for x in 0..PLACEHOLDER_SIZE {
                let pixel = if (x + y) % 2 == 0 {
                    [255, 0, 255, 255]
                } else {
                    [0, 0, 0, 255]
                };
                rgba.extend_from_slice(&pixel);
            }
        }
        Self {
            width: PLACEHOLDER_SIZE,
            height: PLACEHOLDER_SIZE,
            rgba,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

pub fn decode_image(path: &Path) -> Result<ImageData, String> {
    let image = image::open(path)
        .map_err(|e| format!("failed to decode {}: {e}", path.display()))?
        .to_rgba8();
    let (width, height) = image.dimensions();
    Ok(ImageData {
        width,
        height,
        rgba: image.into_raw(),
    })
}

pub struct ImageLibrary {
    cache: AssetCache<ImageData>,
}

impl ImageLibrary {
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        Self {
            cache: AssetCache::new(root),
        }
    }

    /// Decode `relative` (cached). Errors are returned, not replaced.
    pub fn load(&mut self, relative: &str) -> dna_core::Result<Arc<ImageData>> {
        self.cache.get_or_load(relative, decode_image)
    }

    /// Like `load`, but a failure caches and returns the placeholder.
    pub fn load_or_placeholder(&mut self, relative: &str) -> Arc<ImageData> {
        let loaded = self.cache.get_or_load(relative, |path| {
            Ok(decode_image(path).unwrap_or_else(|reason| {
                log::warn!("{reason}; using placeholder for '{relative}'");
                ImageData::placeholder()
            }))
        });
        loaded.unwrap_or_else(|_| Arc::new(ImageData::placeholder()))
    }

    pub fn get(&self, relative: &str) -> Option<Arc<ImageData>> {
        self.cache.get(relative)
    }

    /// Every decoded image with its key, for texture upload.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<ImageData>)> {
        self.cache.iter()
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_root(name_hint: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "dna_assets_test_{}_{}_{}",
            name_hint,
            std::process::id(),
            nanos
        ));
        std::fs::create_dir_all(&dir).expect("failed to create temp asset root");
        dir
    }

    #[test]
    fn decodes_png_to_rgba() {
        let root = temp_root("png");
        let mut pixels = image::RgbaImage::new(3, 2);
        pixels.put_pixel(0, 0, image::Rgba([10, 20, 30, 255]));
        pixels
            .save(root.join("icon.png"))
            .expect("failed to write temp png");

        let mut images = ImageLibrary::new(root.clone());
        let icon = images.load("icon.png").expect("decodes");
        assert_eq!((icon.width, icon.height), (3, 2));
        assert_eq!(icon.rgba.len(), 3 * 2 * 4);
        assert_eq!(&icon.rgba[..4], &[10, 20, 30, 255]);
        assert_eq!(images.len(), 1);

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn missing_image_is_an_error_for_load() {
        let root = temp_root("missing");
        let mut images = ImageLibrary::new(root.clone());
        let err = images.load("game_intro/nope.png").expect_err("missing");
        assert!(matches!(err, dna_core::Error::Asset { .. }));
        assert!(images.is_empty());
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn missing_image_becomes_cached_placeholder() {
        let root = temp_root("placeholder");
        let mut images = ImageLibrary::new(root.clone());
        let image = images.load_or_placeholder("game_intro/nope.png");
        assert_eq!(*image, ImageData::placeholder());
        assert!(images.get("game_intro/nope.png").is_some());
        assert_eq!(images.iter().count(), 1);
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn placeholder_is_square_checkerboard() {
        let placeholder = ImageData::placeholder();
        assert_eq!(placeholder.size(), Vec2::splat(8.0));
        assert_eq!(&placeholder.rgba[..4], &[255, 0, 255, 255]);
        assert_eq!(&placeholder.rgba[4..8], &[0, 0, 0, 255]);
    }
}
