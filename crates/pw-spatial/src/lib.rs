//! `pw-spatial` — traversal graph, routing, and layout validation.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`graph`]    | `LayoutGraph` (CSR adjacency over grid cells)             |
//! | [`router`]   | `Router` trait, `Path`, `AStarRouter`, `BfsRouter`, `find_path` |
//! | [`validate`] | `validate_layout`, `LayoutValidation`, `LayoutIssue`      |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                        |

pub mod error;
pub mod graph;
pub mod router;
pub mod validate;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use graph::LayoutGraph;
pub use router::{find_path, AStarRouter, BfsRouter, Path, Router};
pub use validate::{validate_layout, IssueLevel, LayoutIssue, LayoutValidation};
