//! Image tile that tilts toward the pointer

use serde::Deserialize;

use super::{Bounds, Widget};
use crate::effects::{self, to_precision, Effects, ElementSize, NormalizedPosition, TRANSITION};
use crate::observer::{Observation, ResizeObserver, TargetId};

/// Unique identifier for a showcase tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShowcaseId(pub u32);

impl ShowcaseId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Caller configuration for a tile.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShowcaseOptions {
    /// Image size in percent of 110x150 px
    pub size: f64,
    /// Show position and angle under the image
    pub debug: bool,
    pub shadow: bool,
    pub reflection: bool,
    /// Use the radial glow instead of the linear sheen
    pub radial_reflection: bool,
}

impl Default for ShowcaseOptions {
    fn default() -> Self {
        Self {
            size: 100.0,
            debug: false,
            shadow: false,
            reflection: false,
            radial_reflection: false,
        }
    }
}

/// Style of the outer container.
#[derive(Debug, Clone, PartialEq)]
pub struct OuterStyle {
    pub transition: String,
    /// `scale(1.2)` while hovered, `none` otherwise
    pub transform: String,
    /// `relative` while hovered
    pub position: Option<&'static str>,
}

/// Style of the inner (tilted) container.
#[derive(Debug, Clone, PartialEq)]
pub struct InnerStyle {
    pub transform: String,
    pub box_shadow: Option<String>,
}

/// Debug lines shown under the image.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugText {
    pub position: String,
    pub angle: String,
}

/// Everything needed to render a tile in its current state.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowcaseStyle {
    pub outer: OuterStyle,
    pub inner: InnerStyle,
    /// Image `[width, height]` in pixels
    pub image: [f64; 2],
    pub debug: Option<DebugText>,
    /// Reflection overlay background, present when reflection is enabled
    pub overlay: Option<String>,
    /// Transition of the overlay background, present with the overlay
    pub overlay_transition: Option<String>,
}

/// A pointer-reactive image tile.
///
/// Holds the transient state (measured size, pointer position) and derives
/// its visuals from it on demand.
#[derive(Debug)]
pub struct Showcase {
    id: ShowcaseId,
    /// Image source as given by the caller
    src: String,
    options: ShowcaseOptions,
    size: Option<ElementSize>,
    position: Option<NormalizedPosition>,
    /// Resize subscription while mounted
    observation: Option<Observation>,
}

impl Showcase {
    pub fn new(id: ShowcaseId, src: impl Into<String>) -> Self {
        Self {
            id,
            src: src.into(),
            options: ShowcaseOptions::default(),
            size: None,
            position: None,
            observation: None,
        }
    }

    pub fn with_options(mut self, options: ShowcaseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn id(&self) -> ShowcaseId {
        self.id
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn options(&self) -> &ShowcaseOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: ShowcaseOptions) {
        self.options = options;
    }

    /// Last measured size of the outer container
    pub fn size(&self) -> Option<ElementSize> {
        self.size
    }

    /// Current pointer position, `None` while the pointer is outside
    pub fn position(&self) -> Option<NormalizedPosition> {
        self.position
    }

    /// Start observing the outer container's size.
    pub fn mount(&mut self, observer: &ResizeObserver) -> TargetId {
        let observation = observer.observe();
        let target = observation.target();
        log::debug!("Showcase {:?} mounted as resize target {}", self.id, target.raw());
        // Replacing an older observation drops it, which unobserves.
        self.observation = Some(observation);
        target
    }

    /// Stop observing. Also happens when the tile is dropped.
    pub fn unmount(&mut self) {
        if self.observation.take().is_some() {
            log::debug!("Showcase {:?} unmounted", self.id);
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.observation.is_some()
    }

    /// Resize target while mounted
    pub fn target(&self) -> Option<TargetId> {
        self.observation.as_ref().map(Observation::target)
    }

    pub fn on_resize(&mut self, size: ElementSize) {
        self.size = Some(size);
    }

    pub fn on_pointer_enter(&mut self, pointer: [f64; 2], bounds: Bounds) {
        self.track(pointer, bounds);
    }

    pub fn on_pointer_move(&mut self, pointer: [f64; 2], bounds: Bounds) {
        self.track(pointer, bounds);
    }

    pub fn on_pointer_leave(&mut self) {
        self.position = None;
    }

    fn track(&mut self, pointer: [f64; 2], bounds: Bounds) {
        match bounds.normalize(pointer) {
            Some(position) => self.position = Some(position),
            None => log::trace!("Showcase {:?}: ignoring pointer over an empty box", self.id),
        }
    }

    /// Derived visuals for the current state
    pub fn effects(&self) -> Effects {
        Effects::compute(self.position, self.size)
    }

    /// Image `[width, height]` in pixels
    pub fn image_size(&self) -> [f64; 2] {
        effects::image_size(self.options.size)
    }

    pub fn is_hovered(&self) -> bool {
        self.position.is_some()
    }

    pub fn style(&self) -> ShowcaseStyle {
        let effects = self.effects();
        let hovered = self.is_hovered();

        let debug = self.options.debug.then(|| DebugText {
            position: self
                .position
                .map(|p| format!("{} x {}", to_precision(p.x, 2), to_precision(p.y, 2)))
                .unwrap_or_else(|| "none".to_string()),
            angle: effects
                .angle
                .filter(|angle| *angle != 0.0)
                .map(|angle| to_precision(angle, 4))
                .unwrap_or_else(|| "none".to_string()),
        });

        let overlay = effects.background(&self.options);
        let overlay_transition = overlay.as_ref().map(|_| format!("background {}", TRANSITION));

        ShowcaseStyle {
            outer: OuterStyle {
                transition: format!("transform {}", TRANSITION),
                transform: if hovered { "scale(1.2)" } else { "none" }.to_string(),
                position: hovered.then_some("relative"),
            },
            inner: InnerStyle {
                transform: effects.transform(),
                box_shadow: effects.applied_shadow(&self.options),
            },
            image: self.image_size(),
            debug,
            overlay,
            overlay_transition,
        }
    }
}

impl Widget for Showcase {
    fn pointer_enter(&mut self, pointer: [f64; 2], bounds: Bounds) {
        self.on_pointer_enter(pointer, bounds);
    }

    fn pointer_move(&mut self, pointer: [f64; 2], bounds: Bounds) {
        self.on_pointer_move(pointer, bounds);
    }

    fn pointer_leave(&mut self) {
        self.on_pointer_leave();
    }

    fn resized(&mut self, size: ElementSize) {
        self.on_resize(size);
    }
}
