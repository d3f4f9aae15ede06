// systems/scheduler.rs
//
// Animation scheduler: one AnimationState per entity, advanced together each frame.
// Driven by the host: it never reads a clock or schedules work on its own.
//
// Usage:
//   let mut scheduler = AnimationScheduler::new();
//   scheduler.start(runs, &mapper, &config, now);
//   scheduler.tick(later, |entity, position, progress| { ... });

use std::collections::BTreeMap;
use glam::Vec3;
use crate::api::config::ChoreographyConfig;
use crate::api::types::EntityId;
use crate::components::animation::{AnimationState, AnimationStatus};
use crate::components::path::Path;
use crate::components::point::NormalizedPoint;
use crate::core::time::Timestamp;
use crate::renderer::mapper::CoordinateMapper;
use super::geometry::{arc_length, trailing_points};

/// Outcome of one scheduler tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Running instances that produced a position this tick.
    pub advanced: usize,
    /// Instances that reached the end of their route this tick.
    pub finished: usize,
    /// Every tracked instance is finished (vacuously true when nothing is tracked).
    pub all_finished: bool,
}

/// The normalized route an entity walks along `path`.
///
/// Arrows collapse to their endpoints, then only the trailing `trailing_fraction`
/// of the points is kept (never fewer than two).
pub fn animation_route(path: &Path, trailing_fraction: f32) -> Vec<NormalizedPoint> {
    let geometry = path.geometry_points();
    trailing_points(&geometry[..], trailing_fraction)
}

/// Owns the animation instances of one run.
#[derive(Debug, Default)]
pub struct AnimationScheduler {
    states: BTreeMap<EntityId, AnimationState>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard any previous run and start one instance per `(entity, path)` pair.
    /// Empty paths are skipped. Returns the number of instances started.
    pub fn start<'a>(
        &mut self,
        runs: impl IntoIterator<Item = (EntityId, &'a Path)>,
        mapper: &CoordinateMapper,
        config: &ChoreographyConfig,
        now: Timestamp,
    ) -> usize {
        if !self.states.is_empty() {
            log::debug!("scheduler: replacing {} running animations", self.states.len());
        }
        self.states.clear();

        for (entity, path) in runs {
            if path.is_empty() {
                log::debug!("scheduler: {entity:?} has empty path {:?}, skipped", path.id());
                continue;
            }
            let route = animation_route(path, config.trailing_fraction);
            let court_units: Vec<_> = route.iter().map(|p| mapper.court().to_court_units(*p)).collect();
            let length = arc_length(&court_units);
            let points = mapper.map_points(&route);

            let mut state =
                AnimationState::new(entity, route, points, length, config.speed, config.min_duration);
            state.start(now);
            self.states.insert(entity, state);
        }

        self.states.len()
    }

    /// Advance every running instance to `now`, handing each sampled position to `apply`
    /// along with its progress. Finished instances are skipped.
    pub fn tick(&mut self, now: Timestamp, mut apply: impl FnMut(EntityId, Vec3, f32)) -> TickReport {
        let mut report = TickReport::default();

        for (&entity, state) in self.states.iter_mut() {
            let was_running = state.status() == AnimationStatus::Running;
            if let Some(position) = state.advance(now) {
                apply(entity, position, state.progress());
                report.advanced += 1;
            }
            if was_running && state.is_finished() {
                report.finished += 1;
            }
        }

        report.all_finished = self.all_finished();
        report
    }

    /// Remap every instance's route through `mapper` (after a render-target change).
    pub fn remap(&mut self, mapper: &CoordinateMapper) {
        for state in self.states.values_mut() {
            let points = mapper.map_points(state.route());
            state.remap(points);
        }
    }

    pub fn all_finished(&self) -> bool {
        self.states.values().all(AnimationState::is_finished)
    }

    /// Drop every instance.
    pub fn reset(&mut self) {
        self.states.clear();
    }

    pub fn get(&self, entity: EntityId) -> Option<&AnimationState> {
        self.states.get(&entity)
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.states.contains_key(&entity)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnimationState> {
        self.states.values()
    }

    /// Number of tracked instances.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::PathId;
    use crate::components::path::PathKind;
    use crate::core::court::CourtSpace;
    use crate::renderer::target::RenderTarget;

    fn p(x: f32, y: f32) -> NormalizedPoint {
        NormalizedPoint::new(x, y)
    }

    fn mapper() -> CoordinateMapper {
        CoordinateMapper::new(CourtSpace::new(10.0, 10.0).unwrap(), RenderTarget::screen(100.0, 100.0))
    }

    fn config() -> ChoreographyConfig {
        ChoreographyConfig::default().with_speed(1.0).with_trailing_fraction(1.0)
    }

    #[test]
    fn start_builds_running_instances() {
        let a = Path::new(PathId(1), PathKind::Pen, vec![p(0.0, 0.0), p(1.0, 0.0)]);
        let b = Path::new(PathId(2), PathKind::Pen, vec![p(0.0, 0.0), p(0.0, 0.5)]);
        let mut scheduler = AnimationScheduler::new();
        let started = scheduler.start([(EntityId(1), &a), (EntityId(2), &b)], &mapper(), &config(), Timestamp::ZERO);
        assert_eq!(started, 2);

        let first = scheduler.get(EntityId(1)).unwrap();
        assert_eq!(first.status(), AnimationStatus::Running);
        assert!((first.total_arc_length() - 10.0).abs() < 1e-5);
        assert!((first.duration() - 10.0).abs() < 1e-5);
        assert!((scheduler.get(EntityId(2)).unwrap().duration() - 5.0).abs() < 1e-5);
    }

    #[test]
    fn empty_paths_are_skipped() {
        let empty = Path::new(PathId(1), PathKind::Pen, Vec::new());
        let mut scheduler = AnimationScheduler::new();
        assert_eq!(scheduler.start([(EntityId(1), &empty)], &mapper(), &config(), Timestamp::ZERO), 0);
        assert!(scheduler.is_empty());
        assert!(scheduler.all_finished());
    }

    #[test]
    fn single_point_path_gets_minimal_animation() {
        let dot = Path::new(PathId(1), PathKind::Pen, vec![p(0.5, 0.5)]);
        let mut scheduler = AnimationScheduler::new();
        scheduler.start([(EntityId(1), &dot)], &mapper(), &config(), Timestamp::ZERO);
        let state = scheduler.get(EntityId(1)).unwrap();
        assert_eq!(state.points().len(), 2);
        assert_eq!(state.duration(), config().min_duration);

        let report = scheduler.tick(Timestamp::from_secs(0.2), |_, pos, _| {
            assert_eq!(pos, Vec3::new(50.0, 50.0, 0.0));
        });
        assert_eq!(report.finished, 1);
        assert!(report.all_finished);
    }

    #[test]
    fn tick_reports_positions_and_completion() {
        let a = Path::new(PathId(1), PathKind::Pen, vec![p(0.0, 0.0), p(1.0, 0.0)]);
        let b = Path::new(PathId(2), PathKind::Pen, vec![p(0.0, 0.0), p(0.0, 0.5)]);
        let mut scheduler = AnimationScheduler::new();
        scheduler.start([(EntityId(1), &a), (EntityId(2), &b)], &mapper(), &config(), Timestamp::ZERO);

        let mut seen = Vec::new();
        let report = scheduler.tick(Timestamp::from_secs(5.0), |e, pos, progress| seen.push((e, pos, progress)));
        assert_eq!(report, TickReport { advanced: 2, finished: 1, all_finished: false });
        assert_eq!(seen[0], (EntityId(1), Vec3::new(50.0, 0.0, 0.0), 0.5));
        assert_eq!(seen[1], (EntityId(2), Vec3::new(0.0, 50.0, 0.0), 1.0));

        let report = scheduler.tick(Timestamp::from_secs(10.0), |_, _, _| {});
        assert_eq!(report, TickReport { advanced: 1, finished: 1, all_finished: true });

        let report = scheduler.tick(Timestamp::from_secs(11.0), |_, _, _| panic!("finished runs do not move"));
        assert_eq!(report, TickReport { advanced: 0, finished: 0, all_finished: true });
    }

    #[test]
    fn restart_replaces_previous_run() {
        let a = Path::new(PathId(1), PathKind::Pen, vec![p(0.0, 0.0), p(1.0, 0.0)]);
        let mut scheduler = AnimationScheduler::new();
        scheduler.start([(EntityId(1), &a)], &mapper(), &config(), Timestamp::ZERO);
        scheduler.tick(Timestamp::from_secs(9.0), |_, _, _| {});
        scheduler.start([(EntityId(1), &a)], &mapper(), &config(), Timestamp::from_secs(9.0));
        assert_eq!(scheduler.len(), 1);
        let state = scheduler.get(EntityId(1)).unwrap();
        assert_eq!(state.progress(), 0.0);
        assert_eq!(state.start_time(), Some(Timestamp::from_secs(9.0)));
    }

    #[test]
    fn arrow_routes_ignore_intermediate_points() {
        let zigzag = vec![p(0.0, 0.0), p(0.9, 0.9), p(0.1, 0.8), p(0.7, 0.2), p(0.3, 0.6), p(1.0, 0.0)];
        let arrow = Path::new(PathId(1), PathKind::Arrow, zigzag.clone());
        let pen = Path::new(PathId(2), PathKind::Pen, zigzag);

        let mut scheduler = AnimationScheduler::new();
        scheduler.start([(EntityId(1), &arrow), (EntityId(2), &pen)], &mapper(), &config(), Timestamp::ZERO);
        let arrow_state = scheduler.get(EntityId(1)).unwrap();
        assert_eq!(arrow_state.route(), &[p(0.0, 0.0), p(1.0, 0.0)]);
        assert!((arrow_state.total_arc_length() - 10.0).abs() < 1e-5);
        assert!(scheduler.get(EntityId(2)).unwrap().total_arc_length() > 30.0);

        scheduler.tick(Timestamp::from_secs(5.0), |e, pos, _| {
            if e == EntityId(1) {
                assert!((pos - Vec3::new(50.0, 0.0, 0.0)).length() < 1e-4);
            }
        });
    }

    #[test]
    fn trailing_fraction_trims_long_routes() {
        let points: Vec<_> = (0..10).map(|i| p(i as f32 / 9.0, 0.0)).collect();
        let path = Path::new(PathId(1), PathKind::Pen, points);
        let route = animation_route(&path, 0.8);
        assert_eq!(route.len(), 8);
        assert_eq!(route[0], path.points()[2]);
        assert_eq!(route.last(), path.points().last());
    }

    #[test]
    fn remap_follows_new_target() {
        let a = Path::new(PathId(1), PathKind::Pen, vec![p(0.0, 0.0), p(1.0, 0.0)]);
        let mut scheduler = AnimationScheduler::new();
        scheduler.start([(EntityId(1), &a)], &mapper(), &config(), Timestamp::ZERO);
        let wide = CoordinateMapper::new(CourtSpace::new(10.0, 10.0).unwrap(), RenderTarget::screen(400.0, 200.0));
        scheduler.remap(&wide);
        let state = scheduler.get(EntityId(1)).unwrap();
        assert_eq!(state.points()[0], Vec3::new(100.0, 0.0, 0.0));
        assert_eq!(state.points()[1], Vec3::new(300.0, 0.0, 0.0));
        // Duration is measured in court units and survives remapping.
        assert!((state.duration() - 10.0).abs() < 1e-5);
    }
}
