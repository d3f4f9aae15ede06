use std::borrow::Cow;
use serde::{Deserialize, Serialize};
use crate::api::types::PathId;
use crate::components::point::NormalizedPoint;
use crate::error::{PlayError, PlayResult};

/// How a drawn path is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathKind {
    /// Freehand stroke; every captured point is part of the route.
    Pen,
    /// Straight arrow; only the first and last captured points matter.
    Arrow,
}

/// A finished stroke on the court, in normalized coordinates.
///
/// Paths are immutable once built. They are captured incrementally by
/// [`StrokeRecorder`](crate::input::stroke::StrokeRecorder) or loaded with a play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    id: PathId,
    kind: PathKind,
    points: Vec<NormalizedPoint>,
}

impl Path {
    pub fn new(id: PathId, kind: PathKind, points: Vec<NormalizedPoint>) -> Self {
        debug_assert!(points.iter().all(NormalizedPoint::is_finite));
        Self { id, kind, points }
    }

    /// Build a path from untrusted points, rejecting non-finite coordinates.
    pub fn try_new(id: PathId, kind: PathKind, points: Vec<NormalizedPoint>) -> PlayResult<Self> {
        if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
            return Err(PlayError::InvalidPoint { x: bad.x, y: bad.y });
        }
        Ok(Self { id, kind, points })
    }

    /// Straight arrow from `start` to `end`.
    pub fn arrow(id: PathId, start: NormalizedPoint, end: NormalizedPoint) -> Self {
        Self::new(id, PathKind::Arrow, vec![start, end])
    }

    pub fn id(&self) -> PathId {
        self.id
    }

    pub fn kind(&self) -> PathKind {
        self.kind
    }

    /// All captured points, including arrow intermediates.
    pub fn points(&self) -> &[NormalizedPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<NormalizedPoint> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<NormalizedPoint> {
        self.points.last().copied()
    }

    /// The points that geometry and animation operate on.
    ///
    /// Arrows collapse to their endpoints; intermediate capture points are dropped.
    pub fn geometry_points(&self) -> Cow<'_, [NormalizedPoint]> {
        match self.kind {
            PathKind::Pen => Cow::Borrowed(&self.points),
            PathKind::Arrow => match (self.points.first(), self.points.last()) {
                (Some(&first), Some(&last)) if self.points.len() > 2 => {
                    Cow::Owned(vec![first, last])
                }
                _ => Cow::Borrowed(&self.points),
            },
        }
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.points.iter().all(NormalizedPoint::is_finite)
    }
}
