use serde::{Deserialize, Serialize};
use crate::api::types::{EntityId, PathId};
use crate::components::point::NormalizedPoint;

/// What an animatable token represents on the court.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Player,
    Ball,
    Opponent,
}

impl EntityKind {
    /// Stable numeric code used in the flat frame buffer.
    pub fn code(self) -> u8 {
        match self {
            EntityKind::Player => 0,
            EntityKind::Ball => 1,
            EntityKind::Opponent => 2,
        }
    }
}

/// A player, ball or opponent token.
///
/// Entities without an assigned path are static and never animate.
/// The path assignment is managed through [`Play::assign_path`](crate::core::play::Play::assign_path)
/// so that a path is never held by two entities at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimatableEntity {
    /// Unique identifier.
    pub id: EntityId,
    pub kind: EntityKind,
    /// Resting position on the court; animation never writes here.
    pub static_position: NormalizedPoint,
    /// Path this entity follows when the play runs.
    #[serde(default)]
    pub assigned_path: Option<PathId>,
    /// Free-form label shown by the host (jersey number, role).
    #[serde(default)]
    pub label: String,
}

impl AnimatableEntity {
    /// Create an unassigned entity at the court center.
    pub fn new(id: EntityId, kind: EntityKind) -> Self {
        Self {
            id,
            kind,
            static_position: NormalizedPoint::CENTER,
            assigned_path: None,
            label: String::new(),
        }
    }

    // -- Builder pattern --

    pub fn with_position(mut self, position: NormalizedPoint) -> Self {
        self.static_position = position;
        self
    }

    pub fn with_path(mut self, path: PathId) -> Self {
        self.assigned_path = Some(path);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn is_static(&self) -> bool {
        self.assigned_path.is_none()
    }
}
