//! Turns a pointer gesture into a [`Path`].
//!
//! Points are stored normalized, so a stroke drawn on a phone plays back the same on a
//! tablet or in AR. Pen strokes keep every sufficiently spaced sample; arrows keep only
//! where the gesture started and where it was released.

use crate::api::types::PathId;
use crate::components::path::{Path, PathKind};
use crate::components::point::NormalizedPoint;
use crate::input::queue::InputEvent;
use crate::renderer::mapper::CoordinateMapper;

#[derive(Debug, Clone)]
struct ActiveStroke {
    id: PathId,
    kind: PathKind,
    points: Vec<NormalizedPoint>,
}

/// Records one stroke at a time.
#[derive(Debug, Clone)]
pub struct StrokeRecorder {
    armed: Option<(PathId, PathKind)>,
    active: Option<ActiveStroke>,
    min_spacing: f32,
}

impl StrokeRecorder {
    /// `min_spacing` is the normalized distance below which a new sample is dropped.
    pub fn new(min_spacing: f32) -> Self {
        Self {
            armed: None,
            active: None,
            min_spacing: min_spacing.max(0.0),
        }
    }

    /// Prepare the next pointer-down to start a stroke with this id and kind.
    pub fn arm(&mut self, id: PathId, kind: PathKind) {
        self.armed = Some((id, kind));
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Start a stroke at `start`. Any stroke already in progress is discarded.
    pub fn begin(&mut self, id: PathId, kind: PathKind, start: NormalizedPoint) -> bool {
        if !start.is_finite() {
            log::warn!("stroke: rejected non-finite start for {id:?}");
            return false;
        }
        if let Some(previous) = self.active.take() {
            log::debug!("stroke: {:?} abandoned by new stroke", previous.id);
        }
        self.active = Some(ActiveStroke { id, kind, points: vec![start] });
        true
    }

    /// Add a sample. Returns whether it was kept.
    pub fn extend(&mut self, point: NormalizedPoint) -> bool {
        let min_spacing = self.min_spacing;
        let Some(stroke) = self.active.as_mut() else { return false };
        if !point.is_finite() {
            return false;
        }
        match stroke.kind {
            // Arrows only care about the endpoints; the release decides the head.
            PathKind::Arrow => false,
            PathKind::Pen => {
                let far_enough = stroke
                    .points
                    .last()
                    .map_or(true, |last| last.distance(point) >= min_spacing);
                if far_enough {
                    stroke.points.push(point);
                }
                far_enough
            }
        }
    }

    /// Finish the stroke at `end` and return the path.
    ///
    /// The release point is always kept: if it falls within the spacing of the last
    /// sample it replaces that sample instead of being appended.
    pub fn finish(&mut self, end: NormalizedPoint) -> Option<Path> {
        let mut stroke = self.active.take()?;
        if end.is_finite() {
            match stroke.kind {
                PathKind::Arrow => {
                    stroke.points.truncate(1);
                    stroke.points.push(end);
                }
                PathKind::Pen => {
                    let replace = stroke.points.len() > 1
                        && stroke.points.last().is_some_and(|last| last.distance(end) < self.min_spacing);
                    if replace {
                        stroke.points.pop();
                    }
                    stroke.points.push(end);
                }
            }
        }
        log::debug!("stroke: {:?} finished with {} points", stroke.id, stroke.points.len());
        Some(Path::new(stroke.id, stroke.kind, stroke.points))
    }

    /// Drop the stroke in progress, if any.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Feed one pointer event in render space. Returns a path when a stroke completes.
    ///
    /// A pointer-down starts a stroke only when the recorder is armed.
    pub fn handle(&mut self, event: &InputEvent, mapper: &CoordinateMapper) -> Option<Path> {
        let point = mapper.to_normalized(event.position());
        match *event {
            InputEvent::PointerDown { .. } => {
                if let Some((id, kind)) = self.armed.take() {
                    self.begin(id, kind, point);
                }
                None
            }
            InputEvent::PointerMove { .. } => {
                self.extend(point);
                None
            }
            InputEvent::PointerUp { .. } => self.finish(point),
        }
    }
}

impl Default for StrokeRecorder {
    fn default() -> Self {
        Self::new(crate::api::config::DEFAULT_MIN_STROKE_SPACING)
    }
}
