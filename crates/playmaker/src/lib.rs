pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::choreographer::PlayChoreographer;
pub use api::config::{ChoreographyConfig, RUNNING_SPEED, WALKING_SPEED, DEFAULT_TRAILING_FRACTION};
pub use api::types::{EntityId, PathId};
pub use components::point::NormalizedPoint;
pub use components::path::{Path, PathKind};
pub use components::entity::{AnimatableEntity, EntityKind};
pub use components::animation::{AnimationState, AnimationStatus};
pub use core::court::{CourtKind, CourtSpace, DrawingBoundary, WorldOrientation};
pub use core::play::Play;
pub use core::time::{FrameClock, Timestamp};
pub use renderer::target::{RenderTarget, ScreenSpace, WorldSpace};
pub use renderer::mapper::CoordinateMapper;
pub use renderer::traits::{PositionSink, PositionUpdate};
pub use renderer::frame::{EntityFrame, FrameBuffer};
pub use input::queue::{InputEvent, InputQueue};
pub use input::stroke::StrokeRecorder;
pub use systems::geometry::{arc_length, point_at_progress, polyline_distance, trailing_points, PathPoint};
pub use systems::proximity::{EntityMatch, PathMatch, PathSelection, ProximitySelector};
pub use systems::scheduler::{AnimationScheduler, TickReport};
pub use error::{PlayError, PlayResult};
