use std::collections::{HashMap, HashSet};
use serde::{Deserialize, Serialize};
use crate::api::types::{EntityId, PathId};
use crate::components::entity::AnimatableEntity;
use crate::components::path::Path;
use crate::components::point::NormalizedPoint;
use crate::error::{PlayError, PlayResult};

/// A play document: drawn paths plus the tokens that may follow them.
///
/// Flat `Vec` storage, insertion ordered; plays hold tens of items, not thousands.
/// Each path is held by at most one entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Play {
    #[serde(default)]
    paths: Vec<Path>,
    #[serde(default)]
    entities: Vec<AnimatableEntity>,
}

impl Play {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a play handed over by the host.
    ///
    /// Duplicate ids and non-finite coordinates are rejected. Conflicting path holders
    /// are left in place and resolved at animation time by [`resolve_assignments`](Self::resolve_assignments).
    pub fn from_json(json: &str) -> PlayResult<Self> {
        let raw: Self = serde_json::from_str(json).map_err(|e| PlayError::parse("play", e))?;
        let mut play = Self::new();
        for path in raw.paths {
            play.add_path(path)?;
        }
        for entity in raw.entities {
            play.add_entity(entity)?;
        }
        Ok(play)
    }

    pub fn add_path(&mut self, path: Path) -> PlayResult<()> {
        if self.path(path.id()).is_some() {
            return Err(PlayError::DuplicateId(format!("{:?}", path.id())));
        }
        if !path.is_finite() {
            let bad = path.points().iter().find(|p| !p.is_finite()).copied().unwrap_or_default();
            return Err(PlayError::InvalidPoint { x: bad.x, y: bad.y });
        }
        self.paths.push(path);
        Ok(())
    }

    /// Add an entity. A path assignment carried by the entity is recorded as-is.
    pub fn add_entity(&mut self, entity: AnimatableEntity) -> PlayResult<()> {
        if self.entity(entity.id).is_some() {
            return Err(PlayError::DuplicateId(format!("{:?}", entity.id)));
        }
        let pos = entity.static_position;
        if !pos.is_finite() {
            return Err(PlayError::InvalidPoint { x: pos.x, y: pos.y });
        }
        self.entities.push(entity);
        Ok(())
    }

    /// Remove a path, clearing it from whichever entity held it.
    pub fn remove_path(&mut self, id: PathId) -> Option<Path> {
        let idx = self.paths.iter().position(|p| p.id() == id)?;
        for entity in self.entities.iter_mut().filter(|e| e.assigned_path == Some(id)) {
            entity.assigned_path = None;
        }
        Some(self.paths.remove(idx))
    }

    pub fn remove_entity(&mut self, id: EntityId) -> Option<AnimatableEntity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(idx))
    }

    pub fn path(&self, id: PathId) -> Option<&Path> {
        self.paths.iter().find(|p| p.id() == id)
    }

    pub fn entity(&self, id: EntityId) -> Option<&AnimatableEntity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Iterate over all paths in insertion order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter()
    }

    /// Iterate over all entities in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = &AnimatableEntity> {
        self.entities.iter()
    }

    /// Move an entity's resting position (e.g. after the user drags it).
    pub fn move_entity(&mut self, id: EntityId, position: NormalizedPoint) -> PlayResult<()> {
        if !position.is_finite() {
            return Err(PlayError::InvalidPoint { x: position.x, y: position.y });
        }
        let entity = self
            .entities
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(PlayError::UnknownEntity(id))?;
        entity.static_position = position;
        Ok(())
    }

    /// Assign `path` to `entity`, taking it away from any other holder.
    /// Returns the entity that previously held the path, if it was a different one.
    pub fn assign_path(&mut self, entity: EntityId, path: PathId) -> PlayResult<Option<EntityId>> {
        if self.path(path).is_none() {
            return Err(PlayError::UnknownPath(path));
        }
        if self.entity(entity).is_none() {
            return Err(PlayError::UnknownEntity(entity));
        }

        let mut previous = None;
        for other in self.entities.iter_mut() {
            if other.id == entity {
                other.assigned_path = Some(path);
            } else if other.assigned_path == Some(path) {
                other.assigned_path = None;
                previous = Some(other.id);
            }
        }
        Ok(previous)
    }

    /// Clear an entity's path. Returns the path it held.
    pub fn unassign(&mut self, entity: EntityId) -> PlayResult<Option<PathId>> {
        let e = self
            .entities
            .iter_mut()
            .find(|e| e.id == entity)
            .ok_or(PlayError::UnknownEntity(entity))?;
        Ok(e.assigned_path.take())
    }

    /// The entity currently holding `path`.
    pub fn holder_of(&self, path: PathId) -> Option<EntityId> {
        self.entities
            .iter()
            .rev()
            .find(|e| e.assigned_path == Some(path))
            .map(|e| e.id)
    }

    /// Entity/path pairs to animate, in entity order.
    ///
    /// Dangling path ids are skipped. If several entities claim the same path the last
    /// one wins, matching [`assign_path`](Self::assign_path)'s last-writer-wins rule.
    /// Both conditions are logged for diagnostics only.
    pub fn resolve_assignments(&self) -> Vec<(EntityId, &Path)> {
        let mut resolved: Vec<Option<(EntityId, &Path)>> = Vec::new();
        let mut claimed: HashMap<PathId, usize> = HashMap::new();

        for entity in &self.entities {
            let Some(path_id) = entity.assigned_path else { continue };
            let Some(path) = self.path(path_id) else {
                log::warn!("play: {:?} refers to missing path {path_id:?}, not animated", entity.id);
                continue;
            };
            if let Some(&earlier) = claimed.get(&path_id) {
                if let Some((loser, _)) = resolved[earlier].take() {
                    log::warn!(
                        "play: {path_id:?} claimed by both {loser:?} and {:?}, keeping the latter",
                        entity.id
                    );
                }
            }
            claimed.insert(path_id, resolved.len());
            resolved.push(Some((entity.id, path)));
        }

        resolved.into_iter().flatten().collect()
    }

    /// Entities that have no effective path (static for the next run).
    pub fn static_entities(&self) -> impl Iterator<Item = &AnimatableEntity> {
        let animated: HashSet<EntityId> = self.resolve_assignments().into_iter().map(|(e, _)| e).collect();
        self.entities.iter().filter(move |e| !animated.contains(&e.id))
    }

    /// Number of entities in the play.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the play has no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Clear all paths and entities.
    pub fn clear(&mut self) {
        self.paths.clear();
        self.entities.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::EntityKind;
    use crate::components::path::PathKind;

    fn p(x: f32, y: f32) -> NormalizedPoint {
        NormalizedPoint::new(x, y)
    }

    fn sample() -> Play {
        let mut play = Play::new();
        play.add_path(Path::new(PathId(1), PathKind::Pen, vec![p(0.1, 0.1), p(0.5, 0.5)])).unwrap();
        play.add_path(Path::arrow(PathId(2), p(0.9, 0.1), p(0.5, 0.9))).unwrap();
        play.add_entity(AnimatableEntity::new(EntityId(10), EntityKind::Player).with_position(p(0.1, 0.1))).unwrap();
        play.add_entity(AnimatableEntity::new(EntityId(11), EntityKind::Player).with_position(p(0.9, 0.1))).unwrap();
        play.add_entity(AnimatableEntity::new(EntityId(12), EntityKind::Ball)).unwrap();
        play
    }

    #[test]
    fn assignment_is_exclusive() {
        let mut play = sample();
        assert_eq!(play.assign_path(EntityId(11), PathId(1)).unwrap(), None);
        assert_eq!(play.assign_path(EntityId(10), PathId(1)).unwrap(), Some(EntityId(11)));
        assert_eq!(play.entity(EntityId(11)).unwrap().assigned_path, None);
        assert_eq!(play.entity(EntityId(10)).unwrap().assigned_path, Some(PathId(1)));
        assert_eq!(play.holder_of(PathId(1)), Some(EntityId(10)));
    }

    #[test]
    fn reassigning_to_the_same_holder_reports_nothing() {
        let mut play = sample();
        play.assign_path(EntityId(10), PathId(1)).unwrap();
        assert_eq!(play.assign_path(EntityId(10), PathId(1)).unwrap(), None);
    }

    #[test]
    fn assignment_rejects_unknown_ids() {
        let mut play = sample();
        assert!(matches!(play.assign_path(EntityId(10), PathId(99)), Err(PlayError::UnknownPath(_))));
        assert!(matches!(play.assign_path(EntityId(99), PathId(1)), Err(PlayError::UnknownEntity(_))));
    }

    #[test]
    fn duplicates_are_rejected() {
        let mut play = sample();
        assert!(play.add_path(Path::new(PathId(1), PathKind::Pen, Vec::new())).is_err());
        assert!(play.add_entity(AnimatableEntity::new(EntityId(10), EntityKind::Ball)).is_err());
    }

    #[test]
    fn removing_a_path_clears_its_holder() {
        let mut play = sample();
        play.assign_path(EntityId(12), PathId(2)).unwrap();
        assert!(play.remove_path(PathId(2)).is_some());
        assert!(play.entity(EntityId(12)).unwrap().is_static());
        assert!(play.remove_path(PathId(2)).is_none());
    }

    #[test]
    fn move_entity_updates_static_position() {
        let mut play = sample();
        play.move_entity(EntityId(12), p(0.3, 0.7)).unwrap();
        assert_eq!(play.entity(EntityId(12)).unwrap().static_position, p(0.3, 0.7));
        assert!(play.move_entity(EntityId(12), NormalizedPoint { x: f32::NAN, y: 0.0 }).is_err());
        assert!(play.move_entity(EntityId(77), p(0.0, 0.0)).is_err());
    }

    #[test]
    fn resolve_skips_dangling_and_keeps_last_claim() {
        let mut play = Play::new();
        play.add_path(Path::new(PathId(1), PathKind::Pen, vec![p(0.0, 0.0), p(1.0, 1.0)])).unwrap();
        play.add_entity(AnimatableEntity::new(EntityId(1), EntityKind::Player).with_path(PathId(1))).unwrap();
        play.add_entity(AnimatableEntity::new(EntityId(2), EntityKind::Player).with_path(PathId(42))).unwrap();
        play.add_entity(AnimatableEntity::new(EntityId(3), EntityKind::Opponent).with_path(PathId(1))).unwrap();

        let runs = play.resolve_assignments();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].0, EntityId(3));
        assert_eq!(runs[0].1.id(), PathId(1));

        let statics: Vec<_> = play.static_entities().map(|e| e.id).collect();
        assert_eq!(statics, vec![EntityId(1), EntityId(2)]);
    }

    #[test]
    fn from_json_validates() {
        let json = r#"{
            "paths": [
                { "id": 1, "kind": "pen", "points": [ { "x": 0.0, "y": 0.0 }, { "x": 0.5, "y": 0.5 } ] }
            ],
            "entities": [
                { "id": 7, "kind": "player", "static_position": { "x": 0.2, "y": 0.8 }, "assigned_path": 1 },
                { "id": 8, "kind": "ball", "static_position": { "x": 0.5, "y": 0.5 } }
            ]
        }"#;
        let play = Play::from_json(json).unwrap();
        assert_eq!(play.len(), 2);
        assert_eq!(play.holder_of(PathId(1)), Some(EntityId(7)));

        let dup = r#"{ "entities": [
            { "id": 1, "kind": "player", "static_position": { "x": 0.2, "y": 0.8 } },
            { "id": 1, "kind": "ball", "static_position": { "x": 0.5, "y": 0.5 } }
        ] }"#;
        assert!(matches!(Play::from_json(dup), Err(PlayError::DuplicateId(_))));
        assert!(matches!(Play::from_json(r#"{ "paths": 3 }"#), Err(PlayError::Parse { .. })));
    }

    #[test]
    fn json_round_trip_preserves_document() {
        let mut play = sample();
        play.assign_path(EntityId(11), PathId(2)).unwrap();
        let back = Play::from_json(&serde_json::to_string(&play).unwrap()).unwrap();
        assert_eq!(back.holder_of(PathId(2)), Some(EntityId(11)));
        assert_eq!(back.paths().count(), 2);
    }
}
