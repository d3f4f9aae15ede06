use serde::{Deserialize, Serialize};
use crate::error::{PlayError, PlayResult};

/// Relaxed walking pace, in court units (meters) per second.
pub const WALKING_SPEED: f32 = 1.4;
/// Game-speed run, in court units (meters) per second.
pub const RUNNING_SPEED: f32 = 4.5;
/// Fraction of a path's points that an animation walks; the leading remainder is skipped.
pub const DEFAULT_TRAILING_FRACTION: f32 = 0.8;
/// Floor for animation duration, in seconds.
pub const MIN_ANIMATION_DURATION: f32 = 0.1;
/// Height of tokens above an anchored court plane, in world units.
pub const DEFAULT_WORLD_HEIGHT_OFFSET: f32 = 0.05;
/// Strict path-selection tolerance, in render units.
pub const DEFAULT_PATH_TOLERANCE: f32 = 20.0;
/// Entity proximity radius, in render units.
pub const DEFAULT_ENTITY_RADIUS: f32 = 44.0;
/// Minimum spacing between captured stroke points, in normalized units.
pub const DEFAULT_MIN_STROKE_SPACING: f32 = 0.002;

/// Tunables for a choreographer, provided by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChoreographyConfig {
    /// Animation speed in court units per second (default: [`RUNNING_SPEED`]).
    pub speed: f32,
    /// Fraction of path points walked, in `(0, 1]` (default: 0.8).
    pub trailing_fraction: f32,
    /// Minimum animation duration in seconds (default: 0.1).
    pub min_duration: f32,
    /// Token height above a world-space court plane (default: 0.05).
    pub world_height_offset: f32,
    /// Default strict tolerance for path selection, in render units.
    pub path_tolerance: f32,
    /// Default radius for entity proximity selection, in render units.
    pub entity_radius: f32,
    /// Minimum normalized spacing between captured stroke points.
    pub min_stroke_spacing: f32,
}

impl Default for ChoreographyConfig {
    fn default() -> Self {
        Self {
            speed: RUNNING_SPEED,
            trailing_fraction: DEFAULT_TRAILING_FRACTION,
            min_duration: MIN_ANIMATION_DURATION,
            world_height_offset: DEFAULT_WORLD_HEIGHT_OFFSET,
            path_tolerance: DEFAULT_PATH_TOLERANCE,
            entity_radius: DEFAULT_ENTITY_RADIUS,
            min_stroke_spacing: DEFAULT_MIN_STROKE_SPACING,
        }
    }
}

impl ChoreographyConfig {
    /// Parse a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> PlayResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| PlayError::parse("config", e))?;
        Ok(config.validated())
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_trailing_fraction(mut self, fraction: f32) -> Self {
        self.trailing_fraction = fraction;
        self
    }

    /// Copy with every field pulled into its usable range.
    /// Non-finite or non-positive values fall back to the defaults.
    pub fn validated(self) -> Self {
        let defaults = Self::default();
        let positive = |value: f32, fallback: f32| {
            if value.is_finite() && value > 0.0 { value } else { fallback }
        };
        let non_negative = |value: f32, fallback: f32| {
            if value.is_finite() && value >= 0.0 { value } else { fallback }
        };
        Self {
            speed: positive(self.speed, defaults.speed),
            trailing_fraction: positive(self.trailing_fraction, defaults.trailing_fraction).min(1.0),
            min_duration: positive(self.min_duration, defaults.min_duration),
            world_height_offset: if self.world_height_offset.is_finite() {
                self.world_height_offset
            } else {
                defaults.world_height_offset
            },
            path_tolerance: non_negative(self.path_tolerance, defaults.path_tolerance),
            entity_radius: non_negative(self.entity_radius, defaults.entity_radius),
            min_stroke_spacing: non_negative(self.min_stroke_spacing, defaults.min_stroke_spacing),
        }
    }
}
