//! Per-entity path animation state.

use glam::Vec3;
use crate::api::types::EntityId;
use crate::components::point::NormalizedPoint;
use crate::core::time::Timestamp;
use crate::systems::geometry::point_at_progress;

/// Lifecycle of one entity's run along its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationStatus {
    #[default]
    Idle,
    Running,
    Finished,
}

/// One entity's run along its (truncated) route.
///
/// Duration comes from the route's arc length in court units, so a play takes the
/// same time on every render target. Positions are sampled from the route mapped
/// into the current target.
#[derive(Debug, Clone)]
pub struct AnimationState {
    entity_id: EntityId,
    /// Route in normalized space, kept so the state can be remapped.
    route: Vec<NormalizedPoint>,
    /// Route mapped into the active render target.
    points: Vec<Vec3>,
    /// Route length in court units.
    total_arc_length: f32,
    /// Seconds from start to finish.
    duration: f32,
    start_time: Option<Timestamp>,
    progress: f32,
    status: AnimationStatus,
}

impl AnimationState {
    pub fn new(
        entity_id: EntityId,
        route: Vec<NormalizedPoint>,
        points: Vec<Vec3>,
        total_arc_length: f32,
        speed: f32,
        min_duration: f32,
    ) -> Self {
        debug_assert_eq!(route.len(), points.len());
        Self {
            entity_id,
            route,
            points,
            total_arc_length,
            duration: Self::duration_for(total_arc_length, speed, min_duration),
            start_time: None,
            progress: 0.0,
            status: AnimationStatus::Idle,
        }
    }

    /// `arc_length / speed`, floored at `min_duration`.
    pub fn duration_for(arc_length: f32, speed: f32, min_duration: f32) -> f32 {
        let raw = if speed > 0.0 && speed.is_finite() { arc_length / speed } else { 0.0 };
        if raw.is_finite() { raw.max(min_duration) } else { min_duration }
    }

    /// Begin (or restart) the run at `now`.
    pub fn start(&mut self, now: Timestamp) {
        self.start_time = Some(now);
        self.progress = 0.0;
        self.status = AnimationStatus::Running;
    }

    /// Advance to `now` and return the sampled position.
    /// Returns `None` unless the state is running; finishing states report their final position.
    pub fn advance(&mut self, now: Timestamp) -> Option<Vec3> {
        if self.status != AnimationStatus::Running {
            return None;
        }
        let start = self.start_time?;
        let elapsed = now.seconds_since(start);
        self.progress = (elapsed / self.duration).clamp(0.0, 1.0);
        let position = point_at_progress(&self.points, self.progress)?;
        if self.progress >= 1.0 {
            self.status = AnimationStatus::Finished;
        }
        Some(position)
    }

    /// Replace the mapped route after a render-target change. Timing is untouched.
    pub fn remap(&mut self, points: Vec<Vec3>) {
        debug_assert_eq!(points.len(), self.route.len());
        self.points = points;
    }

    /// Position at the current progress without advancing time.
    pub fn position(&self) -> Option<Vec3> {
        point_at_progress(&self.points, self.progress)
    }

    pub fn entity_id(&self) -> EntityId {
        self.entity_id
    }

    pub fn route(&self) -> &[NormalizedPoint] {
        &self.route
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn total_arc_length(&self) -> f32 {
        self.total_arc_length
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn start_time(&self) -> Option<Timestamp> {
        self.start_time
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn status(&self) -> AnimationStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status == AnimationStatus::Finished
    }
}
