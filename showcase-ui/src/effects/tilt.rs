//! Perspective tilt

use std::fmt;

use super::number::js_number;
use super::NormalizedPosition;

/// Rotation in degrees per unit of pointer offset from the centre.
pub const BUMP: f64 = 5.0;

/// Perspective distance in pixels.
pub const PERSPECTIVE: f64 = 150.0;

/// 3D tilt toward the pointer.
///
/// Displays as `perspective(150px) rotateY(..deg) rotateX(..deg) translate3d(0, 0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    /// Rotation around the vertical axis, in degrees.
    pub rotate_y: f64,
    /// Rotation around the horizontal axis, in degrees.
    pub rotate_x: f64,
}

impl Tilt {
    pub fn from_position(position: NormalizedPosition) -> Self {
        Self {
            rotate_y: (position.x - 0.5) * BUMP,
            rotate_x: (position.y - 0.5) * BUMP * -1.0,
        }
    }

    /// Project a point of the element plane onto the screen plane.
    ///
    /// `x` and `y` are relative to the element centre (the transform origin),
    /// with y growing downward. The rightmost transform applies first:
    /// rotateX, then rotateY, then the perspective divide.
    pub fn project(&self, x: f64, y: f64) -> [f64; 2] {
        let (sin_x, cos_x) = self.rotate_x.to_radians().sin_cos();
        let (sin_y, cos_y) = self.rotate_y.to_radians().sin_cos();

        // rotateX on (x, y, 0)
        let y1 = y * cos_x;
        let z1 = y * sin_x;

        // rotateY
        let x2 = x * cos_y + z1 * sin_y;
        let z2 = -x * sin_y + z1 * cos_y;

        let w = 1.0 - z2 / PERSPECTIVE;
        if w.abs() < f64::EPSILON {
            [x2, y1]
        } else {
            [x2 / w, y1 / w]
        }
    }
}

impl fmt::Display for Tilt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "perspective({}px) rotateY({}deg) rotateX({}deg) translate3d(0, 0, 0)",
            PERSPECTIVE,
            js_number(self.rotate_y),
            js_number(self.rotate_x)
        )
    }
}

/// The tilt transform for a pointer position, or `"none"` without one.
pub fn transform(position: Option<NormalizedPosition>) -> String {
    match position {
        Some(position) => Tilt::from_position(position).to_string(),
        None => "none".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64, y: f64) -> Option<NormalizedPosition> {
        Some(NormalizedPosition::new(x, y))
    }

    #[test]
    fn test_no_position_is_none() {
        assert_eq!(transform(None), "none");
    }

    #[test]
    fn test_centre_has_no_rotation() {
        let tilt = Tilt::from_position(NormalizedPosition::new(0.5, 0.5));
        assert_eq!(tilt.rotate_y, 0.0);
        assert_eq!(tilt.rotate_x, 0.0);
        assert_eq!(
            transform(at(0.5, 0.5)),
            "perspective(150px) rotateY(0deg) rotateX(-0deg) translate3d(0, 0, 0)"
        );
    }

    #[test]
    fn test_right_edge_rotates_around_y() {
        assert_eq!(
            transform(at(1.0, 0.5)),
            "perspective(150px) rotateY(2.5deg) rotateX(-0deg) translate3d(0, 0, 0)"
        );
    }

    #[test]
    fn test_top_edge_rotates_around_x() {
        assert_eq!(
            transform(at(0.5, 0.0)),
            "perspective(150px) rotateY(0deg) rotateX(2.5deg) translate3d(0, 0, 0)"
        );
    }

    #[test]
    fn test_tiny_rotation_uses_exponent() {
        let tilt = Tilt { rotate_y: 4.999999997368221e-7, rotate_x: -0.0 };
        assert_eq!(
            tilt.to_string(),
            "perspective(150px) rotateY(4.999999997368221e-7deg) rotateX(-0deg) translate3d(0, 0, 0)"
        );
    }

    #[test]
    fn test_identity_projection_at_centre() {
        let tilt = Tilt::from_position(NormalizedPosition::new(0.5, 0.5));
        let [px, py] = tilt.project(40.0, -30.0);
        assert!((px - 40.0).abs() < 1e-9);
        assert!((py + 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_projection_pushes_the_pointer_side_away() {
        // Pointer on the right: the right edge recedes, the left edge grows.
        let tilt = Tilt::from_position(NormalizedPosition::new(1.0, 0.5));
        let [right, _] = tilt.project(50.0, 0.0);
        let [left, _] = tilt.project(-50.0, 0.0);
        assert!(right.abs() < left.abs());
    }
}
