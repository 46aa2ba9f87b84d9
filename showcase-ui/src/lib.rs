//! # showcase-ui
//!
//! Image tiles that tilt toward the pointer, drawn with egui on a tao/wgpu
//! window.
//!
//! ## Features
//! - Perspective tilt following the pointer, with a hover zoom
//! - Pointer-driven drop shadow
//! - Linear or radial reflection overlay
//! - Debug readout of the pointer position and reflection angle
//! - Resize observation delivered on the next frame
//!
//! ## Example
//!
//! ```no_run
//! use showcase_ui::{run_with_app, EventLoop, ShowcaseApp, ShowcaseWindow, WindowConfig};
//!
//! struct Page;
//!
//! impl ShowcaseApp for Page {
//!     fn ui(&mut self, ctx: &egui::Context) {
//!         egui::CentralPanel::default().show(ctx, |ui| {
//!             ui.heading("Showcase Demo");
//!         });
//!     }
//! }
//!
//! fn main() {
//!     let event_loop = EventLoop::new();
//!     let window = ShowcaseWindow::new(&event_loop, WindowConfig::default())
//!         .expect("Failed to create window");
//!     run_with_app(window, event_loop, Page);
//! }
//! ```

pub mod effects;
pub mod elements;
pub mod observer;
pub mod painter;
mod picture;
mod window;

// Effect calculator
pub use effects::{
    angle, box_shadow, image_size, js_number, linear_reflection, radial_reflection, to_precision,
    transform, BoxShadow, Effects, ElementSize, LinearReflection, NormalizedPosition,
    RadialReflection, Reflection, Tilt,
};

// Elements system
pub use elements::{
    dispatch, Bounds, DebugText, PointerEvent, PointerTracker, Showcase, ShowcaseId,
    ShowcaseOptions, ShowcaseStyle, Widget,
};

// Resize observation
pub use observer::{Observation, ResizeObserver, TargetId};

// Painting
pub use painter::{paint_showcase, TileTexture};

// Pictures
pub use picture::{cover_uv, PictureData, PictureError};

// Window
pub use window::{run_with_app, ShowcaseApp, ShowcaseWindow, WindowConfig, WindowError};

// Re-export commonly used types
pub use tao::event_loop::EventLoop;
