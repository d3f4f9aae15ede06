//! Logical drawing surfaces, independent of any renderer.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use crate::components::point::NormalizedPoint;
use crate::error::{PlayError, PlayResult};

/// Court and field variants with built-in art dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourtKind {
    FullCourt,
    HalfCourt,
    SoccerPitch,
    FootballField,
}

/// Insets (in court units) from the edges of the court art to the drawable area.
/// Used to letterbox art that carries run-off margins or decoration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DrawingBoundary {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl DrawingBoundary {
    pub const NONE: Self = Self { left: 0.0, top: 0.0, right: 0.0, bottom: 0.0 };

    pub fn uniform(inset: f32) -> Self {
        Self { left: inset, top: inset, right: inset, bottom: inset }
    }

    pub fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self { left: horizontal, top: vertical, right: horizontal, bottom: vertical }
    }
}

/// How the court's normalized axes sit on the anchored world plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorldOrientation {
    /// Normalized x runs along world X, normalized y along world Z.
    #[default]
    Aligned,
    /// Art authored rotated a quarter turn: normalized y runs along world X.
    Rotated90,
}

impl WorldOrientation {
    /// Normalized court coordinates to plane coordinates `(u, v)`.
    pub(crate) fn to_plane(self, p: NormalizedPoint) -> Vec2 {
        match self {
            WorldOrientation::Aligned => Vec2::new(p.x, p.y),
            WorldOrientation::Rotated90 => Vec2::new(p.y, 1.0 - p.x),
        }
    }

    pub(crate) fn from_plane(self, uv: Vec2) -> NormalizedPoint {
        match self {
            WorldOrientation::Aligned => NormalizedPoint::new(uv.x, uv.y),
            WorldOrientation::Rotated90 => NormalizedPoint::new(1.0 - uv.y, uv.x),
        }
    }
}

/// A logical drawing surface: court art size plus the drawable area inside it.
///
/// Normalized points address the drawable area. Court units are meters for the presets,
/// and animation speed is expressed in court units per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourtSpace {
    width: f32,
    height: f32,
    boundary: DrawingBoundary,
    orientation: WorldOrientation,
}

impl CourtSpace {
    pub fn new(width: f32, height: f32) -> PlayResult<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(PlayError::InvalidCourt { width, height });
        }
        Ok(Self {
            width,
            height,
            boundary: DrawingBoundary::NONE,
            orientation: WorldOrientation::Aligned,
        })
    }

    /// Built-in court variants.
    pub fn preset(kind: CourtKind) -> Self {
        let (width, height, boundary, orientation) = match kind {
            // 28 x 15 playing surface with a meter of run-off on every side.
            CourtKind::FullCourt => (30.0, 17.0, DrawingBoundary::uniform(1.0), WorldOrientation::Aligned),
            CourtKind::HalfCourt => (
                16.0,
                16.0,
                DrawingBoundary { left: 1.0, top: 0.0, right: 1.0, bottom: 1.0 },
                WorldOrientation::Aligned,
            ),
            CourtKind::SoccerPitch => (111.0, 74.0, DrawingBoundary::uniform(3.0), WorldOrientation::Aligned),
            CourtKind::FootballField => (
                120.0,
                56.0,
                DrawingBoundary::symmetric(5.15, 3.6),
                WorldOrientation::Rotated90,
            ),
        };
        Self { width, height, boundary, orientation }
    }

    /// Restrict drawing to an inset area of the art.
    pub fn with_boundary(mut self, boundary: DrawingBoundary) -> PlayResult<Self> {
        let insets = [boundary.left, boundary.top, boundary.right, boundary.bottom];
        if insets.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(PlayError::InvalidBoundary(format!("{boundary:?}")));
        }
        if boundary.left + boundary.right >= self.width || boundary.top + boundary.bottom >= self.height {
            return Err(PlayError::InvalidBoundary(format!(
                "{boundary:?} on a {} x {} court",
                self.width, self.height
            )));
        }
        self.boundary = boundary;
        Ok(self)
    }

    pub fn with_world_orientation(mut self, orientation: WorldOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Full art size in court units.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    pub fn boundary(&self) -> DrawingBoundary {
        self.boundary
    }

    pub fn world_orientation(&self) -> WorldOrientation {
        self.orientation
    }

    pub fn drawable_origin(&self) -> Vec2 {
        Vec2::new(self.boundary.left, self.boundary.top)
    }

    pub fn drawable_size(&self) -> Vec2 {
        Vec2::new(
            self.width - self.boundary.left - self.boundary.right,
            self.height - self.boundary.top - self.boundary.bottom,
        )
    }

    /// Normalized point to court units measured from the art's top-left corner.
    pub fn to_court_units(&self, p: NormalizedPoint) -> Vec2 {
        self.drawable_origin() + p.to_vec2() * self.drawable_size()
    }

    pub fn from_court_units(&self, v: Vec2) -> NormalizedPoint {
        NormalizedPoint::from((v - self.drawable_origin()) / self.drawable_size())
    }
}
