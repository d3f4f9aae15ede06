use std::collections::HashMap;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use crate::api::types::EntityId;
use super::traits::{PositionSink, PositionUpdate};

/// Per-entity frame record for hosts that read positions from linear memory.
/// 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct EntityFrame {
    /// Entity id (exact up to 2^24).
    pub id: f32,
    /// [`EntityKind::code`](crate::components::entity::EntityKind::code).
    pub kind: f32,
    /// Position in the active render target.
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// 1.0 while following a path, 0.0 at rest.
    pub animating: f32,
    /// Animation progress in [0, 1]; 0.0 at rest.
    pub progress: f32,
    pub _pad: f32,
}

impl EntityFrame {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

impl From<PositionUpdate> for EntityFrame {
    fn from(update: PositionUpdate) -> Self {
        Self {
            id: update.entity.0 as f32,
            kind: f32::from(update.kind.code()),
            x: update.position.x,
            y: update.position.y,
            z: update.position.z,
            animating: if update.progress.is_some() { 1.0 } else { 0.0 },
            progress: update.progress.unwrap_or(0.0),
            _pad: 0.0,
        }
    }
}

/// Latest frame record for every entity the choreographer has placed.
/// One slot per entity, in first-placed order.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    frames: Vec<EntityFrame>,
    slots: HashMap<EntityId, usize>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frames: Vec::with_capacity(capacity),
            slots: HashMap::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.frames.clear();
        self.slots.clear();
    }

    pub fn get(&self, entity: EntityId) -> Option<&EntityFrame> {
        self.slots.get(&entity).map(|&i| &self.frames[i])
    }

    pub fn frames(&self) -> &[EntityFrame] {
        &self.frames
    }

    pub fn frame_count(&self) -> u32 {
        self.frames.len() as u32
    }

    /// Raw pointer to frame data for reads from JS linear memory.
    pub fn frames_ptr(&self) -> *const f32 {
        self.frames.as_ptr() as *const f32
    }

    /// Frame data as a flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.frames)
    }
}

impl PositionSink for FrameBuffer {
    fn place(&mut self, update: PositionUpdate) {
        let frame = EntityFrame::from(update);
        match self.slots.get(&update.entity).copied() {
            Some(i) => self.frames[i] = frame,
            None => {
                self.slots.insert(update.entity, self.frames.len());
                self.frames.push(frame);
            }
        }
    }
}
