use glam::Vec2;
use serde::{Deserialize, Serialize};
use crate::error::{PlayError, PlayResult};

/// A point relative to a court's drawable area, `(0, 0)` top-left and `(1, 1)` bottom-right.
///
/// This is the renderer-independent form of everything drawn on a play.
/// Values may stray slightly outside `[0, 1]` when a stroke runs off the edge,
/// but they are always finite.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f32,
    pub y: f32,
}

impl NormalizedPoint {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    pub const CENTER: Self = Self { x: 0.5, y: 0.5 };

    pub fn new(x: f32, y: f32) -> Self {
        debug_assert!(x.is_finite() && y.is_finite(), "non-finite normalized point ({x}, {y})");
        Self { x, y }
    }

    /// Checked constructor for points coming from outside the core.
    pub fn try_new(x: f32, y: f32) -> PlayResult<Self> {
        if x.is_finite() && y.is_finite() {
            Ok(Self { x, y })
        } else {
            Err(PlayError::InvalidPoint { x, y })
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Whether the point lies on the court (inclusive of the edges).
    pub fn is_inside(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }

    /// Pull the point back onto the court.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(0.0, 1.0),
            y: self.y.clamp(0.0, 1.0),
        }
    }

    pub fn distance(self, other: Self) -> f32 {
        self.to_vec2().distance(other.to_vec2())
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl From<Vec2> for NormalizedPoint {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_rejects_nan_and_infinity() {
        assert!(NormalizedPoint::try_new(0.2, 0.4).is_ok());
        assert!(NormalizedPoint::try_new(f32::NAN, 0.4).is_err());
        assert!(NormalizedPoint::try_new(0.2, f32::INFINITY).is_err());
    }

    #[test]
    fn slightly_outside_is_still_valid() {
        let p = NormalizedPoint::try_new(-0.02, 1.01).unwrap();
        assert!(!p.is_inside());
        assert_eq!(p.clamped(), NormalizedPoint::new(0.0, 1.0));
    }

    #[test]
    fn distance_is_euclidean() {
        let a = NormalizedPoint::new(0.0, 0.0);
        let b = NormalizedPoint::new(0.3, 0.4);
        assert!((a.distance(b) - 0.5).abs() < 1e-6);
    }
}
