//! Picture loading for showcase tiles

use std::path::Path;

use image::GenericImageView;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PictureError {
    #[error("Failed to decode image: {0}")]
    ImageLoadError(#[from] image::ImageError),
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),
}

/// Decoded RGBA8 pixels, ready for texture upload.
#[derive(Clone)]
pub struct PictureData {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl PictureData {
    /// Load picture data from a file path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PictureError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Decode picture data from encoded bytes (PNG, JPEG, ...).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PictureError> {
        let img = image::load_from_memory(bytes)?;
        let (width, height) = img.dimensions();
        Ok(Self {
            pixels: img.to_rgba8().into_raw(),
            width,
            height,
        })
    }

    /// A vertical gradient from `tint` to a darker shade.
    ///
    /// Stands in for sources that are missing or fail to decode.
    pub fn placeholder(width: u32, height: u32, tint: [u8; 3]) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);

        for y in 0..height {
            let shade = 1.0 - 0.6 * (y as f32 / height as f32);
            for _ in 0..width {
                pixels.extend(tint.iter().map(|c| (*c as f32 * shade).round() as u8));
                pixels.push(255);
            }
        }

        Self { pixels, width, height }
    }

    /// Load from a path, falling back to a placeholder.
    pub fn load_or_placeholder(path: impl AsRef<Path>, tint: [u8; 3]) -> Self {
        let path = path.as_ref();
        match Self::from_path(path) {
            Ok(picture) => {
                log::info!("Loaded picture {} ({}x{})", path.display(), picture.width, picture.height);
                picture
            }
            Err(e) => {
                log::warn!("Using placeholder for {}: {}", path.display(), e);
                Self::placeholder(110, 150, tint)
            }
        }
    }

    /// Get the raw RGBA pixels.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Get the width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get dimensions as (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Convert for egui texture upload.
    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_unmultiplied(
            [self.width as usize, self.height as usize],
            &self.pixels,
        )
    }
}

impl std::fmt::Debug for PictureData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PictureData")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// UV rectangle `[u0, v0, u1, v1]` that crops a picture to fill a box while
/// keeping its aspect ratio, centred (`object-fit: cover`).
pub fn cover_uv(image_width: f32, image_height: f32, box_width: f32, box_height: f32) -> [f32; 4] {
    if image_width <= 0.0 || image_height <= 0.0 || box_width <= 0.0 || box_height <= 0.0 {
        return [0.0, 0.0, 1.0, 1.0];
    }

    let image_aspect = image_width / image_height;
    let box_aspect = box_width / box_height;

    if image_aspect > box_aspect {
        // Wider than the box: crop left and right.
        let visible = box_aspect / image_aspect;
        let margin = (1.0 - visible) / 2.0;
        [margin, 0.0, 1.0 - margin, 1.0]
    } else {
        let visible = image_aspect / box_aspect;
        let margin = (1.0 - visible) / 2.0;
        [0.0, margin, 1.0, 1.0 - margin]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_dimensions_and_shading() {
        let picture = PictureData::placeholder(4, 10, [200, 100, 50]);
        assert_eq!(picture.dimensions(), (4, 10));
        assert_eq!(picture.pixels().len(), 4 * 10 * 4);
        // First row is the tint itself, fully opaque.
        assert_eq!(&picture.pixels()[..4], &[200, 100, 50, 255]);
        // Last row is darker.
        let last = &picture.pixels()[picture.pixels().len() - 4..];
        assert!(last[0] < 200);
    }

    #[test]
    fn test_placeholder_never_empty() {
        assert_eq!(PictureData::placeholder(0, 0, [0, 0, 0]).dimensions(), (1, 1));
    }

    #[test]
    fn test_missing_file_falls_back() {
        assert!(PictureData::from_path("does/not/exist.png").is_err());
        let picture = PictureData::load_or_placeholder("does/not/exist.png", [10, 20, 30]);
        assert_eq!(picture.dimensions(), (110, 150));
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        assert!(matches!(
            PictureData::from_bytes(b"not an image"),
            Err(PictureError::ImageLoadError(_))
        ));
    }

    #[test]
    fn test_cover_uv() {
        // Same aspect: no crop.
        assert_eq!(cover_uv(110.0, 150.0, 220.0, 300.0), [0.0, 0.0, 1.0, 1.0]);
        // Wide landscape image into a portrait box crops the sides.
        let [u0, v0, u1, v1] = cover_uv(200.0, 100.0, 100.0, 100.0);
        assert_eq!((u0, v0, u1, v1), (0.25, 0.0, 0.75, 1.0));
        // Tall image into a square box crops top and bottom.
        let [u0, v0, u1, v1] = cover_uv(100.0, 200.0, 100.0, 100.0);
        assert_eq!((u0, v0, u1, v1), (0.0, 0.25, 1.0, 0.75));
    }
}
