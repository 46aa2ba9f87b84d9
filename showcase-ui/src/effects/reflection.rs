//! Light reflection overlays
//!
//! Two flavours: a linear sheen whose direction follows the pointer angle and
//! a radial glow centred on the pointer. Both display as CSS gradients and can
//! be sampled directly by a renderer.

use std::fmt;

use super::number::js_number;
use super::{slope, NormalizedPosition};

/// Peak opacity of the linear sheen (`#fff2`).
pub const LINEAR_HIGHLIGHT: f32 = 0x22 as f32 / 255.0;

/// Outer opacity of the radial glow (`#fff3`).
pub const RADIAL_HIGHLIGHT: f32 = 0x33 as f32 / 255.0;

/// Gradient angle in degrees for a pointer position.
///
/// `atan2` of the offset from the centre, turned so that 0 points up. Negative
/// results wrap once by 360.
pub fn angle(position: Option<NormalizedPosition>) -> Option<f64> {
    let NormalizedPosition { x, y } = position?;
    let angle = ((y - 0.5).atan2(x - 0.5) * 180.0) / std::f64::consts::PI + 90.0;
    if angle < 0.0 {
        Some(angle + 360.0)
    } else {
        Some(angle)
    }
}

/// `linear-gradient(<angle>deg, transparent, #fff2 <offset>%, transparent <offset>%, transparent)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearReflection {
    pub angle: f64,
    /// Position of the hard highlight edge, 25..=30 percent.
    pub offset: f64,
}

impl LinearReflection {
    /// `None` when the angle is missing or exactly zero.
    pub fn new(angle: Option<f64>, position: NormalizedPosition) -> Option<Self> {
        let angle = angle.filter(|angle| *angle != 0.0)?;
        Some(Self {
            angle,
            offset: 25.0 + (slope(position) / 0.5) * 5.0,
        })
    }

    /// Overlay opacity at normalized box coordinates `(u, v)`.
    pub fn intensity_at(&self, u: f32, v: f32, width: f32, height: f32) -> f32 {
        let (sin, cos) = (self.angle as f32).to_radians().sin_cos();
        let length = (width * sin).abs() + (height * cos).abs();
        if length <= f32::EPSILON {
            return 0.0;
        }

        // Gradient line runs through the centre, pointing along (sin, -cos).
        let dx = (u - 0.5) * width;
        let dy = (v - 0.5) * height;
        let t = (dx * sin - dy * cos) / length + 0.5;

        let edge = self.offset as f32 / 100.0;
        if t <= 0.0 || t > edge {
            0.0
        } else {
            LINEAR_HIGHLIGHT * (t / edge)
        }
    }
}

impl fmt::Display for LinearReflection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "linear-gradient({}deg, transparent, #fff2 {}%, transparent {}%, transparent)",
            js_number(self.angle),
            js_number(self.offset),
            js_number(self.offset)
        )
    }
}

/// `radial-gradient(circle farthest-corner at <x>% <y>%, transparent, #fff3 <amplitude>%)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialReflection {
    pub center: NormalizedPosition,
    /// Where the glow reaches full strength, 60..=100 percent of the radius.
    pub amplitude: f64,
}

impl RadialReflection {
    pub fn new(position: NormalizedPosition) -> Self {
        let amplitude = (1.0 - slope(position) / 0.5).max(0.6);
        Self {
            center: position,
            amplitude: amplitude * 100.0,
        }
    }

    /// Overlay opacity at normalized box coordinates `(u, v)`.
    pub fn intensity_at(&self, u: f32, v: f32, width: f32, height: f32) -> f32 {
        let cx = self.center.x as f32 * width;
        let cy = self.center.y as f32 * height;

        let radius = [(0.0, 0.0), (width, 0.0), (0.0, height), (width, height)]
            .iter()
            .map(|(x, y)| ((x - cx).powi(2) + (y - cy).powi(2)).sqrt())
            .fold(0.0f32, f32::max);
        if radius <= f32::EPSILON {
            return RADIAL_HIGHLIGHT;
        }

        let distance = ((u * width - cx).powi(2) + (v * height - cy).powi(2)).sqrt();
        let t = distance / radius;
        let edge = self.amplitude as f32 / 100.0;

        if t >= edge {
            RADIAL_HIGHLIGHT
        } else {
            RADIAL_HIGHLIGHT * (t / edge)
        }
    }
}

impl fmt::Display for RadialReflection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "radial-gradient(circle farthest-corner at {}% {}%, transparent, #fff3 {}%)",
            js_number(self.center.x * 100.0),
            js_number(self.center.y * 100.0),
            js_number(self.amplitude)
        )
    }
}

/// The overlay selected for a tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reflection {
    Linear(LinearReflection),
    Radial(RadialReflection),
}

impl Reflection {
    pub fn intensity_at(&self, u: f32, v: f32, width: f32, height: f32) -> f32 {
        match self {
            Self::Linear(linear) => linear.intensity_at(u, v, width, height),
            Self::Radial(radial) => radial.intensity_at(u, v, width, height),
        }
    }
}

impl fmt::Display for Reflection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear(linear) => linear.fmt(f),
            Self::Radial(radial) => radial.fmt(f),
        }
    }
}

/// The linear sheen as a gradient string, empty when unavailable.
pub fn linear_reflection(angle: Option<f64>, position: Option<NormalizedPosition>) -> String {
    position
        .and_then(|position| LinearReflection::new(angle, position))
        .map(|linear| linear.to_string())
        .unwrap_or_default()
}

/// The radial glow as a gradient string, empty without a position.
pub fn radial_reflection(position: Option<NormalizedPosition>) -> String {
    position
        .map(|position| RadialReflection::new(position).to_string())
        .unwrap_or_default()
}
