//! Top-level play orchestration.
//!
//! A [`PlayChoreographer`] borrows a [`Play`] to start a run, remembers where every
//! animated token rested, advances the run from the host's frame loop, and puts the
//! tokens back when the run is stopped.

use std::collections::BTreeMap;
use glam::Vec3;
use crate::api::config::ChoreographyConfig;
use crate::api::types::{EntityId, PathId};
use crate::components::animation::AnimationStatus;
use crate::components::entity::EntityKind;
use crate::components::point::NormalizedPoint;
use crate::core::court::CourtSpace;
use crate::core::play::Play;
use crate::core::time::Timestamp;
use crate::error::PlayResult;
use crate::renderer::mapper::CoordinateMapper;
use crate::renderer::target::RenderTarget;
use crate::renderer::traits::{PositionSink, PositionUpdate};
use crate::systems::proximity::{EntityMatch, PathSelection, ProximitySelector};
use crate::systems::scheduler::{AnimationScheduler, TickReport};

/// Where an animated entity rested when its run began.
#[derive(Debug, Clone, Copy, PartialEq)]
struct RestingPlace {
    kind: EntityKind,
    position: NormalizedPoint,
}

/// Drives one play's animation against one render target.
///
/// Single-threaded and frame-driven: every call comes from the host's update loop
/// (or is marshalled onto it). Nothing here blocks or schedules its own work.
pub struct PlayChoreographer {
    config: ChoreographyConfig,
    mapper: CoordinateMapper,
    scheduler: AnimationScheduler,
    /// Snapshot of resting positions taken at start, replayed at stop.
    resting: BTreeMap<EntityId, RestingPlace>,
    /// Last position handed to the host, per entity.
    placed: BTreeMap<EntityId, Vec3>,
    started: bool,
}

impl PlayChoreographer {
    pub fn new(court: CourtSpace, target: RenderTarget, config: ChoreographyConfig) -> Self {
        let config = config.validated();
        Self {
            mapper: CoordinateMapper::new(court, target).with_height_offset(config.world_height_offset),
            config,
            scheduler: AnimationScheduler::new(),
            resting: BTreeMap::new(),
            placed: BTreeMap::new(),
            started: false,
        }
    }

    pub fn config(&self) -> &ChoreographyConfig {
        &self.config
    }

    pub fn court(&self) -> &CourtSpace {
        self.mapper.court()
    }

    pub fn render_target(&self) -> &RenderTarget {
        self.mapper.target()
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// Switch to a new render target (view resized, AR anchor moved).
    ///
    /// Running routes are remapped immediately so no stale points survive the change;
    /// remembered host positions are dropped until the next placement.
    /// Returns `false` if the target is unchanged.
    pub fn set_render_target(&mut self, target: RenderTarget) -> bool {
        if *self.mapper.target() == target {
            return false;
        }
        log::debug!("choreographer: render target changed, remapping {} runs", self.scheduler.len());
        self.rebuild_mapper(*self.mapper.court(), target);
        true
    }

    /// Switch court variant. Same remapping rules as [`set_render_target`](Self::set_render_target).
    pub fn set_court(&mut self, court: CourtSpace) -> bool {
        if *self.mapper.court() == court {
            return false;
        }
        log::debug!("choreographer: court changed, remapping {} runs", self.scheduler.len());
        self.rebuild_mapper(court, *self.mapper.target());
        true
    }

    fn rebuild_mapper(&mut self, court: CourtSpace, target: RenderTarget) {
        self.mapper = CoordinateMapper::new(court, target).with_height_offset(self.config.world_height_offset);
        self.scheduler.remap(&self.mapper);
        self.placed.clear();
    }

    /// Assign a path to an entity in `play`, clearing it from any previous holder.
    /// A change of holder takes effect at the next [`start`](Self::start).
    pub fn assign_path(&mut self, play: &mut Play, entity: EntityId, path: PathId) -> PlayResult<Option<EntityId>> {
        let previous = play.assign_path(entity, path)?;
        if let Some(previous) = previous {
            log::debug!("choreographer: {path:?} moved from {previous:?} to {entity:?}");
        }
        Ok(previous)
    }

    /// Start (or restart) the play at `now`.
    ///
    /// A run in progress is stopped first, so every entity it moved is written back to
    /// `sink` at its resting place before the new run begins. The resting snapshot is
    /// taken from the play's static positions, so a replay never starts from an animated
    /// position. Entities with a dangling path are skipped. Returns the number of
    /// entities animating.
    pub fn start(&mut self, play: &Play, now: Timestamp, sink: &mut impl PositionSink) -> usize {
        if !self.scheduler.is_empty() {
            log::debug!("choreographer: replay requested, resetting current run");
        }
        self.restore(sink);

        let runs = play.resolve_assignments();
        for (id, _) in &runs {
            if let Some(entity) = play.entity(*id) {
                self.resting.insert(
                    *id,
                    RestingPlace { kind: entity.kind, position: entity.static_position },
                );
            }
        }

        let started = self.scheduler.start(runs, &self.mapper, &self.config, now);
        self.resting.retain(|id, _| self.scheduler.contains(*id));
        self.started = true;
        log::debug!("choreographer: started {started} animations");
        started
    }

    /// Advance the run to `now` and hand every moving entity's position to `sink`.
    ///
    /// Ticking a choreographer that was never started is a programmer error: it asserts in
    /// debug builds and does nothing in release builds.
    pub fn tick(&mut self, now: Timestamp, sink: &mut impl PositionSink) -> TickReport {
        if !self.started {
            debug_assert!(self.started, "tick called before start");
            log::warn!("choreographer: tick before start ignored");
            return TickReport { all_finished: true, ..TickReport::default() };
        }

        let resting = &self.resting;
        let placed = &mut self.placed;
        self.scheduler.tick(now, |entity, position, progress| {
            let Some(place) = resting.get(&entity) else { return };
            placed.insert(entity, position);
            sink.place(PositionUpdate { entity, kind: place.kind, position, progress: Some(progress) });
        })
    }

    /// Stop the run and put every animated entity back where it rested at start.
    /// Safe to call repeatedly or without a prior start. Returns the number restored.
    pub fn stop(&mut self, sink: &mut impl PositionSink) -> usize {
        let restored = self.restore(sink);
        if restored > 0 {
            log::debug!("choreographer: stopped, restored {restored} entities");
        }
        restored
    }

    /// Write every snapshotted entity back at its resting place and drop the run.
    fn restore(&mut self, sink: &mut impl PositionSink) -> usize {
        let restored = self.resting.len();
        for (&entity, place) in &self.resting {
            let position = self.mapper.to_render_space(place.position);
            self.placed.insert(entity, position);
            sink.place(PositionUpdate { entity, kind: place.kind, position, progress: None });
        }
        self.resting.clear();
        self.scheduler.reset();
        restored
    }

    /// Write the current position of every entity that the next tick will not move.
    ///
    /// Resting entities go to their static position. Entities whose run has finished stay
    /// at the end of their route, re-sampled in the current mapping. Call after loading a
    /// play, after the user drags a token, or after a court or target change so nothing
    /// keeps a point from the old mapping. Returns the number placed.
    pub fn place_static(&mut self, play: &Play, sink: &mut impl PositionSink) -> usize {
        let mut count = 0;
        for entity in play.entities() {
            let (position, progress) = match self.scheduler.get(entity.id) {
                Some(state) if state.status() == AnimationStatus::Running => continue,
                Some(state) => match state.position() {
                    Some(position) => (position, Some(state.progress())),
                    None => continue,
                },
                None => (self.mapper.to_render_space(entity.static_position), None),
            };
            self.placed.insert(entity.id, position);
            sink.place(PositionUpdate { entity: entity.id, kind: entity.kind, position, progress });
            count += 1;
        }
        count
    }

    /// Where `entity` currently shows in the active render target: its animated position
    /// while running, otherwise its resting position from `play`.
    pub fn position_of(&self, play: &Play, entity: EntityId) -> Option<Vec3> {
        if let Some(state) = self.scheduler.get(entity) {
            return state.position();
        }
        self.placed
            .get(&entity)
            .copied()
            .or_else(|| play.entity(entity).map(|e| self.mapper.to_render_space(e.static_position)))
    }

    /// Path nearest a render-space query point. `tolerance` defaults to the config's.
    pub fn select_path(&self, play: &Play, query: Vec3, tolerance: Option<f32>) -> PathSelection {
        let tolerance = tolerance.unwrap_or(self.config.path_tolerance);
        ProximitySelector::new(&self.mapper).select_path(query, play.paths(), tolerance)
    }

    /// Entity nearest a render-space query point, using each entity's current position.
    /// `radius` defaults to the config's entity radius.
    pub fn select_entity(&self, play: &Play, query: Vec3, radius: Option<f32>) -> Option<EntityMatch> {
        let radius = radius.unwrap_or(self.config.entity_radius);
        let candidates = play
            .entities()
            .filter_map(|e| self.position_of(play, e.id).map(|pos| (e.id, pos)));
        ProximitySelector::new(&self.mapper).select_entity(query, candidates, radius)
    }

    pub fn status(&self, entity: EntityId) -> Option<AnimationStatus> {
        self.scheduler.get(entity).map(|s| s.status())
    }

    pub fn progress(&self, entity: EntityId) -> Option<f32> {
        self.scheduler.get(entity).map(|s| s.progress())
    }

    /// Whether any entity is still moving.
    pub fn is_running(&self) -> bool {
        self.scheduler.iter().any(|s| s.status() == AnimationStatus::Running)
    }

    /// Every animation of the current run has finished; hosts may stop ticking.
    pub fn all_finished(&self) -> bool {
        self.scheduler.all_finished()
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }
}
