//! Spatial-subsystem error type.

use thiserror::Error;

use pw_core::Coord;

/// Errors produced by `pw-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// The goal is not reachable from the start in the directed graph.
    /// Expected and recoverable: callers record it and carry on.
    #[error("no route from {from} to {to}")]
    NoRoute { from: Coord, to: Coord },

    #[error("grid data does not match declared size {width}x{height}: {detail}")]
    MalformedGrid { width: u32, height: u32, detail: String },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
