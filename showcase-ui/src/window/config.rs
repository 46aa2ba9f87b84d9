//! Window configuration types

/// Smallest inner size the window may be resized to.
pub(super) const MIN_SIZE: (u32, u32) = (320, 240);

/// Clamp a requested inner size to the minimum, logging when it changes.
pub(super) fn clamp_to_min_size(width: u32, height: u32, min: (u32, u32)) -> (u32, u32) {
    let clamped = (width.max(min.0), height.max(min.1));
    if clamped != (width, height) {
        log::warn!(
            "Window size {}x{} is below the minimum, using {}x{}",
            width,
            height,
            clamped.0,
            clamped.1
        );
    }
    clamped
}

/// Configuration for creating a showcase window.
#[derive(Clone, Debug)]
pub struct WindowConfig {
    /// Window title.
    pub title: String,
    /// Initial inner width in logical pixels.
    pub width: u32,
    /// Initial inner height in logical pixels.
    pub height: u32,
    /// Minimum inner width in logical pixels.
    pub min_width: u32,
    /// Minimum inner height in logical pixels.
    pub min_height: u32,
    /// Color the surface is cleared to before egui paints (linear RGBA).
    pub clear_color: [f64; 4],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Showcase Demo".to_string(),
            width: 960,
            height: 720,
            min_width: MIN_SIZE.0,
            min_height: MIN_SIZE.1,
            clear_color: [0.094, 0.094, 0.125, 1.0],
        }
    }
}

impl WindowConfig {
    /// Inner size after applying the minimum.
    pub fn clamped_size(&self) -> (u32, u32) {
        clamp_to_min_size(self.width, self.height, (self.min_width, self.min_height))
    }
}
