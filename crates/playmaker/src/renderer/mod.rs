pub mod target;
pub mod mapper;
pub mod traits;
pub mod frame;

// Re-export key types for convenient access
pub use target::{RenderTarget, ScreenSpace, WorldSpace};
pub use mapper::CoordinateMapper;
pub use traits::{PositionSink, PositionUpdate};
