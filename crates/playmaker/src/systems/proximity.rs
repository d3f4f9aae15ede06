//! Tap-to-select for paths and entities.

use glam::Vec3;
use crate::api::types::{EntityId, PathId};
use crate::components::path::Path;
use crate::renderer::mapper::CoordinateMapper;
use super::geometry::polyline_distance;

/// A path and how far the query point was from it, in render units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathMatch {
    pub path: PathId,
    pub distance: f32,
}

/// Result of a path selection query.
///
/// `strict` is set only when the closest path lies within tolerance. `fallback` is the
/// closest path regardless of tolerance, so a near-miss tap still resolves to something.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PathSelection {
    pub strict: Option<PathMatch>,
    pub fallback: Option<PathMatch>,
}

impl PathSelection {
    /// The strict match if any, otherwise the fallback.
    pub fn best(&self) -> Option<PathId> {
        self.strict.or(self.fallback).map(|m| m.path)
    }

    pub fn is_empty(&self) -> bool {
        self.fallback.is_none()
    }
}

/// An entity picked by proximity, with its position in the candidate list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityMatch {
    pub index: usize,
    pub entity: EntityId,
    pub distance: f32,
}

/// Nearest-path and nearest-entity hit testing in one render target's space.
pub struct ProximitySelector<'a> {
    mapper: &'a CoordinateMapper,
}

impl<'a> ProximitySelector<'a> {
    pub fn new(mapper: &'a CoordinateMapper) -> Self {
        Self { mapper }
    }

    /// Find the path closest to `query` (render space).
    ///
    /// Pen paths are measured against every segment, arrows against their single
    /// start-to-end segment. Ties keep the first path encountered.
    pub fn select_path<'p>(
        &self,
        query: Vec3,
        paths: impl IntoIterator<Item = &'p Path>,
        tolerance: f32,
    ) -> PathSelection {
        let mut closest: Option<PathMatch> = None;

        for path in paths {
            let geometry = path.geometry_points();
            let points = self.mapper.map_points(&geometry);
            let Some(distance) = polyline_distance(query, &points) else { continue };
            if closest.map_or(true, |c| distance < c.distance) {
                closest = Some(PathMatch { path: path.id(), distance });
            }
        }

        PathSelection {
            strict: closest.filter(|c| c.distance <= tolerance),
            fallback: closest,
        }
    }

    /// Find the candidate closest to `query` within `radius`, using the target's
    /// planar distance. Ties keep the first candidate encountered.
    pub fn select_entity(
        &self,
        query: Vec3,
        candidates: impl IntoIterator<Item = (EntityId, Vec3)>,
        radius: f32,
    ) -> Option<EntityMatch> {
        let target = self.mapper.target();
        let mut best: Option<EntityMatch> = None;

        for (index, (entity, position)) in candidates.into_iter().enumerate() {
            let distance = target.planar_distance(query, position);
            if distance > radius {
                continue;
            }
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(EntityMatch { index, entity, distance });
            }
        }

        best
    }
}
