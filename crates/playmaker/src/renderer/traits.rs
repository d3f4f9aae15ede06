//! Host-facing output seam.
//!
//! The core never touches sprites or scene nodes. Each frame it hands positions to a
//! [`PositionSink`] that the host implements over whatever it renders with
//! (a sprite layer, an AR scene graph, a flat buffer read from JS).

use std::collections::HashMap;
use glam::Vec3;
use crate::api::types::EntityId;
use crate::components::entity::EntityKind;

/// One entity's render-space position for this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionUpdate {
    pub entity: EntityId,
    pub kind: EntityKind,
    /// Position in the active render target.
    pub position: Vec3,
    /// Animation progress in `[0, 1]`, or `None` for a resting entity.
    pub progress: Option<f32>,
}

/// Receives entity positions from the choreographer.
pub trait PositionSink {
    fn place(&mut self, update: PositionUpdate);
}

impl PositionSink for HashMap<EntityId, Vec3> {
    fn place(&mut self, update: PositionUpdate) {
        self.insert(update.entity, update.position);
    }
}

impl PositionSink for Vec<PositionUpdate> {
    fn place(&mut self, update: PositionUpdate) {
        self.push(update);
    }
}
