//! Core error type.
//!
//! Downstream crates wrap `CoreError` as one variant of their own enums via
//! `#[from]`, or translate it into their structured failure type.

use thiserror::Error;

use crate::layout::CellType;
use crate::Coord;

/// Errors produced by `pw-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("layout has no {0} cell")]
    MissingCell(CellType),

    #[error("layout has {count} {kind} cells, expected exactly one")]
    DuplicateCell { kind: CellType, count: usize },

    #[error("coordinate {coord} is outside the {width}x{height} grid")]
    OutOfBounds { coord: Coord, width: u32, height: u32 },

    #[error("grid error: {0}")]
    Grid(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Shorthand result type for `pw-core`.
pub type CoreResult<T> = Result<T, CoreError>;
