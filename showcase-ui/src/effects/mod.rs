//! Tilt, shadow and reflection calculator
//!
//! Everything here is a pure function of the pointer position and the
//! measured element size, so the same inputs always produce the same strings.

pub mod number;
pub mod reflection;
pub mod shadow;
pub mod tilt;

pub use number::{js_number, to_precision};
pub use reflection::{
    angle, linear_reflection, radial_reflection, LinearReflection, RadialReflection, Reflection,
};
pub use shadow::{box_shadow, BoxShadow, SHADOW_AMPLITUDE};
pub use tilt::{transform, Tilt, BUMP, PERSPECTIVE};

use crate::elements::ShowcaseOptions;

/// Image aspect ratio as `[height, width]` at size 100.
pub const RATIO: [f64; 2] = [150.0, 110.0];

/// Scale of the outer container while the pointer is over it.
pub const HOVER_SCALE: f64 = 1.2;

/// Timing shared by the outer scale and the overlay.
pub const TRANSITION: &str = "0.2s ease-out";

/// Transition duration in seconds (matches [`TRANSITION`]).
pub const TRANSITION_SECS: f32 = 0.2;

/// Pointer position relative to an element box, (0, 0) being the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedPosition {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Last measured pixel size of an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementSize {
    pub width: f64,
    pub height: f64,
}

impl ElementSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Chebyshev distance from the centre, 0 in the middle and 0.5 on the edges.
pub fn slope(position: NormalizedPosition) -> f64 {
    [position.x, position.y]
        .iter()
        .map(|it| (it - 0.5).abs())
        .fold(0.0, f64::max)
}

/// Image `[width, height]` in pixels for a size option.
///
/// Zero or non-numeric sizes fall back to 100.
pub fn image_size(size: f64) -> [f64; 2] {
    let size = if size.is_finite() && size != 0.0 { size } else { 100.0 };
    [(size / 100.0) * RATIO[1], (size / 100.0) * RATIO[0]]
}

/// All derived values for one pointer position and element size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Effects {
    pub tilt: Option<Tilt>,
    pub shadow: Option<BoxShadow>,
    pub angle: Option<f64>,
    pub linear: Option<LinearReflection>,
    pub radial: Option<RadialReflection>,
}

impl Effects {
    pub fn compute(position: Option<NormalizedPosition>, size: Option<ElementSize>) -> Self {
        let angle = angle(position);
        Self {
            tilt: position.map(Tilt::from_position),
            shadow: position
                .zip(size)
                .map(|(position, size)| BoxShadow::new(position, size)),
            angle,
            linear: position.and_then(|position| LinearReflection::new(angle, position)),
            radial: position.map(RadialReflection::new),
        }
    }

    pub fn transform(&self) -> String {
        self.tilt
            .map(|tilt| tilt.to_string())
            .unwrap_or_else(|| "none".to_string())
    }

    pub fn box_shadow(&self) -> String {
        self.shadow.map(|shadow| shadow.to_string()).unwrap_or_default()
    }

    pub fn linear_reflection(&self) -> String {
        self.linear.map(|linear| linear.to_string()).unwrap_or_default()
    }

    pub fn radial_reflection(&self) -> String {
        self.radial.map(|radial| radial.to_string()).unwrap_or_default()
    }

    /// The overlay picked by the options, `None` when reflection is off or
    /// the chosen gradient is unavailable.
    pub fn reflection(&self, options: &ShowcaseOptions) -> Option<Reflection> {
        if !options.reflection {
            return None;
        }
        if options.radial_reflection {
            self.radial.map(Reflection::Radial)
        } else {
            self.linear.map(Reflection::Linear)
        }
    }

    /// The overlay background string, `None` when reflection is off.
    pub fn background(&self, options: &ShowcaseOptions) -> Option<String> {
        if !options.reflection {
            return None;
        }
        Some(if options.radial_reflection {
            self.radial_reflection()
        } else {
            self.linear_reflection()
        })
    }

    /// The shadow to apply, `None` when shadows are off.
    pub fn applied_shadow(&self, options: &ShowcaseOptions) -> Option<String> {
        options.shadow.then(|| self.box_shadow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(shadow: bool, reflection: bool, radial_reflection: bool) -> ShowcaseOptions {
        ShowcaseOptions {
            shadow,
            reflection,
            radial_reflection,
            ..Default::default()
        }
    }

    #[test]
    fn test_no_position_gives_neutral_values() {
        let effects = Effects::compute(None, Some(ElementSize::new(220.0, 300.0)));
        assert_eq!(effects.transform(), "none");
        assert_eq!(effects.box_shadow(), "");
        assert_eq!(effects.linear_reflection(), "");
        assert_eq!(effects.radial_reflection(), "");
        assert_eq!(effects.angle, None);
    }

    #[test]
    fn test_free_functions_agree_with_effects() {
        let position = Some(NormalizedPosition::new(0.8, 0.3));
        let size = Some(ElementSize::new(220.0, 300.0));
        let effects = Effects::compute(position, size);

        assert_eq!(effects.transform(), transform(position));
        assert_eq!(effects.box_shadow(), box_shadow(position, size));
        assert_eq!(effects.angle, angle(position));
        assert_eq!(effects.linear_reflection(), linear_reflection(angle(position), position));
        assert_eq!(effects.radial_reflection(), radial_reflection(position));
    }

    #[test]
    fn test_recomputation_is_identical() {
        let position = Some(NormalizedPosition::new(0.13, 0.77));
        let size = Some(ElementSize::new(264.0, 360.0));
        let first = Effects::compute(position, size);
        let second = Effects::compute(position, size);

        assert_eq!(first, second);
        assert_eq!(first.transform(), second.transform());
        assert_eq!(first.box_shadow(), second.box_shadow());
        assert_eq!(first.linear_reflection(), second.linear_reflection());
        assert_eq!(first.radial_reflection(), second.radial_reflection());
    }

    #[test]
    fn test_slope_is_chebyshev_distance() {
        assert_eq!(slope(NormalizedPosition::new(0.5, 0.5)), 0.0);
        assert_eq!(slope(NormalizedPosition::new(0.0, 0.6)), 0.5);
        assert_eq!(slope(NormalizedPosition::new(0.75, 0.5)), 0.25);
    }

    #[test]
    fn test_selection_policy() {
        let effects = Effects::compute(Some(NormalizedPosition::new(0.9, 0.2)), None);

        assert_eq!(effects.reflection(&options(false, false, true)), None);
        assert_eq!(effects.background(&options(false, false, true)), None);
        assert!(matches!(
            effects.reflection(&options(false, true, true)),
            Some(Reflection::Radial(_))
        ));
        assert!(matches!(
            effects.reflection(&options(false, true, false)),
            Some(Reflection::Linear(_))
        ));
        assert_eq!(
            effects.background(&options(false, true, false)),
            Some(effects.linear_reflection())
        );
    }

    #[test]
    fn test_shadow_is_gated_but_tilt_is_not() {
        let effects = Effects::compute(
            Some(NormalizedPosition::new(0.9, 0.2)),
            Some(ElementSize::new(100.0, 100.0)),
        );
        assert_eq!(effects.applied_shadow(&options(false, false, false)), None);
        assert_eq!(
            effects.applied_shadow(&options(true, false, false)),
            Some(effects.box_shadow())
        );
        assert_ne!(effects.transform(), "none");
    }

    #[test]
    fn test_image_size_follows_ratio() {
        assert_eq!(image_size(100.0), [110.0, 150.0]);
        assert_eq!(image_size(200.0), [220.0, 300.0]);
        assert_eq!(image_size(0.0), [110.0, 150.0]);
        assert_eq!(image_size(f64::NAN), [110.0, 150.0]);
    }
}
