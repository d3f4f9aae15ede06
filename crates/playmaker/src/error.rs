use crate::api::types::{EntityId, PathId};

pub type PlayResult<T> = Result<T, PlayError>;

/// Failures surfaced to callers that build or edit play data.
///
/// Degenerate geometry (empty paths, zero-sized views) is never reported here;
/// it is handled by the geometry and mapping policies directly.
#[derive(thiserror::Error, Debug)]
pub enum PlayError {
    #[error("invalid court dimensions: {width} x {height}")]
    InvalidCourt { width: f32, height: f32 },

    #[error("drawing boundary leaves no drawable area: {0}")]
    InvalidBoundary(String),

    #[error("point has non-finite coordinates: ({x}, {y})")]
    InvalidPoint { x: f32, y: f32 },

    #[error("unknown entity {0:?}")]
    UnknownEntity(EntityId),

    #[error("unknown path {0:?}")]
    UnknownPath(PathId),

    #[error("duplicate id: {0}")]
    DuplicateId(String),

    #[error("failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl PlayError {
    pub fn parse(what: &'static str, source: serde_json::Error) -> Self {
        Self::Parse { what, source }
    }
}
