//! Drop shadow cast away from the pointer

use std::fmt;

use super::number::{js_number, to_precision};
use super::{slope, ElementSize, NormalizedPosition};

/// Fraction of the element size the shadow travels at the edges.
pub const SHADOW_AMPLITUDE: f64 = 0.15;

/// A `box-shadow` value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShadow {
    pub x_offset: f64,
    pub y_offset: f64,
    pub blur: f64,
    pub spread: f64,
    /// Opacity of the black shadow colour
    pub alpha: f64,
}

impl BoxShadow {
    pub fn new(position: NormalizedPosition, size: ElementSize) -> Self {
        let NormalizedPosition { x, y } = position;
        let slope = slope(position);

        Self {
            x_offset: (x - 0.5) * size.width * -1.0 * SHADOW_AMPLITUDE,
            y_offset: (y - 0.5) * size.height * -1.0 * SHADOW_AMPLITUDE,
            blur: slope.max(0.4) * 50.0,
            spread: slope.max(0.1) * 20.0,
            alpha: ((1.0 - slope) - 0.3).max(0.0),
        }
    }
}

impl fmt::Display for BoxShadow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for length in [self.x_offset, self.y_offset, self.blur, self.spread] {
            write!(f, "{}px ", to_precision(length, 2))?;
        }
        write!(f, "rgba(0, 0, 0, {})", js_number(self.alpha))
    }
}

/// The shadow for a pointer position over an element of known size.
///
/// Empty until both the position and the size are known.
pub fn box_shadow(position: Option<NormalizedPosition>, size: Option<ElementSize>) -> String {
    match (position, size) {
        (Some(position), Some(size)) => BoxShadow::new(position, size).to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: ElementSize = ElementSize { width: 200.0, height: 100.0 };

    #[test]
    fn test_requires_position_and_size() {
        assert_eq!(box_shadow(None, Some(SIZE)), "");
        assert_eq!(box_shadow(Some(NormalizedPosition::new(0.2, 0.2)), None), "");
        assert_eq!(box_shadow(None, None), "");
    }

    #[test]
    fn test_centre_shadow() {
        let shadow = BoxShadow::new(NormalizedPosition::new(0.5, 0.5), SIZE);
        assert_eq!(shadow.alpha, 0.7);
        assert_eq!(shadow.blur, 20.0);
        assert_eq!(shadow.spread, 2.0);
        assert_eq!(
            box_shadow(Some(NormalizedPosition::new(0.5, 0.5)), Some(SIZE)),
            "0.0px 0.0px 20px 2.0px rgba(0, 0, 0, 0.7)"
        );
    }

    #[test]
    fn test_edge_shadow_moves_away_from_pointer() {
        assert_eq!(
            box_shadow(Some(NormalizedPosition::new(1.0, 0.5)), Some(SIZE)),
            "-15px 0.0px 25px 10px rgba(0, 0, 0, 0.2)"
        );
    }

    #[test]
    fn test_half_pixel_offset_rounds_up() {
        // 150 * 0.15 lands exactly on 22.5
        let size = ElementSize::new(220.0, 300.0);
        assert_eq!(
            box_shadow(Some(NormalizedPosition::new(0.5, 1.0)), Some(size)),
            "0.0px -23px 25px 10px rgba(0, 0, 0, 0.2)"
        );
    }

    #[test]
    fn test_slope_uses_the_larger_axis() {
        let near = BoxShadow::new(NormalizedPosition::new(0.6, 0.9), SIZE);
        let far = BoxShadow::new(NormalizedPosition::new(0.9, 0.6), SIZE);
        assert_eq!(near.blur, far.blur);
        assert_eq!(near.spread, far.spread);
        assert_eq!(near.alpha, far.alpha);
    }

    #[test]
    fn test_alpha_never_negative() {
        // Outside the box the slope exceeds 0.7.
        let shadow = BoxShadow::new(NormalizedPosition::new(1.3, 0.5), SIZE);
        assert_eq!(shadow.alpha, 0.0);
    }
}
