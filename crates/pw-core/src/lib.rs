//! `pw-core` — foundational types for the `pickwalk` routing engine.
//!
//! This crate is a dependency of every other `pw-*` crate.  It has no `pw-*`
//! dependencies and holds only plain data: the warehouse grid, the SKU
//! master, and raw pallet lines.  Routing, simulation and playback live in
//! the downstream crates.
//!
//! # What lives here
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`ids`]      | `LayoutId`, `SkuMasterId`, `RunId`, `PalletId`, `LocationId`, `Sku` |
//! | [`grid`]     | `Coord`, `Direction`                                       |
//! | [`layout`]   | `CellType`, `MovementRules`, `PickMeta`, `Cell`, `Layout`  |
//! | [`sku`]      | `SkuMasterRow`, `SkuLocation`, `SkuMaster`                 |
//! | [`pallet`]   | `PalletLine`                                               |
//! | [`hash`]     | `layout_hash`, `sku_master_hash`                           |
//! | [`error`]    | `CoreError`, `CoreResult`                                  |

pub mod error;
pub mod grid;
pub mod hash;
pub mod ids;
pub mod layout;
pub mod pallet;
pub mod sku;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use grid::{Coord, Direction};
pub use hash::{layout_hash, sku_master_hash};
pub use ids::{LayoutId, LocationId, PalletId, RunId, Sku, SkuMasterId};
pub use layout::{Cell, CellType, Layout, MovementRules, PickMeta};
pub use pallet::PalletLine;
pub use sku::{SkuLocation, SkuMaster, SkuMasterRow};
