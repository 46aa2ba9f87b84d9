//! Elements system for showcase-ui
//!
//! Widgets receive pointer enter/move/leave and resize notifications. The
//! host only reports where the pointer is each frame; [`PointerTracker`]
//! turns that into discrete events.

pub mod showcase;

pub use showcase::{DebugText, InnerStyle, OuterStyle, Showcase, ShowcaseId, ShowcaseOptions, ShowcaseStyle};

use crate::effects::{ElementSize, NormalizedPosition};

/// Bounding box of an element in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Check if a client point is inside the box (edges included)
    pub fn contains(&self, point: [f64; 2]) -> bool {
        point[0] >= self.left
            && point[0] <= self.left + self.width
            && point[1] >= self.top
            && point[1] <= self.top + self.height
    }

    /// Pointer position relative to this box, `None` for an empty box.
    pub fn normalize(&self, point: [f64; 2]) -> Option<NormalizedPosition> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        Some(NormalizedPosition::new(
            (point[0] - self.left) / self.width,
            (point[1] - self.top) / self.height,
        ))
    }
}

/// Pointer notification for a single widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Enter { pointer: [f64; 2], bounds: Bounds },
    Move { pointer: [f64; 2], bounds: Bounds },
    Leave,
}

/// Trait for widgets driven by pointer and resize notifications
pub trait Widget {
    /// Pointer entered the widget's outer box
    fn pointer_enter(&mut self, pointer: [f64; 2], bounds: Bounds);

    /// Pointer moved while over the widget
    fn pointer_move(&mut self, pointer: [f64; 2], bounds: Bounds);

    /// Pointer left the widget
    fn pointer_leave(&mut self);

    /// The outer box was measured at a new size
    fn resized(&mut self, size: ElementSize);
}

/// Route a pointer event to a widget.
pub fn dispatch<W: Widget + ?Sized>(widget: &mut W, event: PointerEvent) {
    match event {
        PointerEvent::Enter { pointer, bounds } => widget.pointer_enter(pointer, bounds),
        PointerEvent::Move { pointer, bounds } => widget.pointer_move(pointer, bounds),
        PointerEvent::Leave => widget.pointer_leave(),
    }
}

/// Derives enter/move/leave from per-frame pointer samples.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    last: Option<[f64; 2]>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the pointer was inside at the last update
    pub fn is_inside(&self) -> bool {
        self.last.is_some()
    }

    /// Feed the current pointer (if any) and the target's bounds.
    pub fn update(&mut self, pointer: Option<[f64; 2]>, bounds: Bounds) -> Option<PointerEvent> {
        let inside = pointer.filter(|point| bounds.contains(*point));

        let event = match (self.last, inside) {
            (None, Some(pointer)) => Some(PointerEvent::Enter { pointer, bounds }),
            (Some(last), Some(pointer)) if last != pointer => {
                Some(PointerEvent::Move { pointer, bounds })
            }
            (Some(_), None) => Some(PointerEvent::Leave),
            _ => None,
        };

        self.last = inside;
        event
    }
}
