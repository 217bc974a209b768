//! `pw-compare` — comparing two runs.
//!
//! Two comparison modes exist, each with its own precondition:
//!
//! | Mode                          | Requires                           |
//! |-------------------------------|------------------------------------|
//! | [`CompareMode::HeatmapOverlay`] | same `layout_id`                 |
//! | [`CompareMode::DualPlayback`]   | identical `pallet_order`         |
//!
//! [`comparable`] returns the unmet preconditions as user-facing reasons;
//! an empty list means the runs can be compared.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`mode`]    | `CompareMode`, `comparable`, `has_same_pallet_list`        |
//! | [`heatmap`] | `max_heat_value`, `normalize_heatmap`, `shared_heatmaps`   |
//! | [`delta`]   | `SummaryDelta`, `PalletCompareRow`, `pallet_compare_rows`  |

pub mod delta;
pub mod heatmap;
pub mod mode;


pub use delta::{pallet_compare_rows, PalletCompareRow, PalletSide, SummaryDelta};
pub use heatmap::{max_heat_value, normalize_heatmap, shared_heatmaps, SharedHeatmaps};
pub use mode::{comparable, has_same_pallet_list, CompareMode};
