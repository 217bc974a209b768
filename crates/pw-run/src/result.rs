//! Run output types.
//!
//! A [`RunResult`] is produced once, atomically, by the builder and never
//! mutated afterwards; the external run store replaces or removes it as a
//! whole.  Field names serialize in camelCase for that store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pw_core::{Coord, LayoutId, LocationId, PalletId, RunId, SkuMasterId};

/// A resolved pick stop, in visiting order.
#[derive(Clone, Debug, PartialEq)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunPalletStop {
    pub location_id: LocationId,
    pub sequence:    f64,
}

/// Outcome for one pallet.
///
/// Invariants: `missing_sku_count <= sku_count`; `has_path` is false exactly
/// when `issues` holds at least one `Sin ruta …` entry.
#[derive(Clone, Debug, PartialEq)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunPalletResult {
    pub pallet_id: PalletId,
    /// Unique SKUs on the pallet.
    pub sku_count: usize,
    /// Unique SKUs without any SKU-master entry.
    pub missing_sku_count: usize,
    /// Length of the visited cell sequence.
    pub steps: usize,
    pub has_path: bool,
    pub issues: Vec<String>,
    pub stops: Vec<RunPalletStop>,
    /// Visited cells, START to END.  Only stored when the run was built with
    /// `RunOptions::record_visited`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visited: Option<Vec<Coord>>,
}

impl RunPalletResult {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    /// A pallet can be replayed when it routed completely and has at least
    /// one pick.
    pub fn is_playable(&self) -> bool {
        self.has_path && !self.stops.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub total_pallets: usize,
    /// Pallets with no issues.
    pub ok_pallets:    usize,
    /// Pallets with at least one issue.
    pub error_pallets: usize,
    pub total_steps:   usize,
    /// `total_steps / total_pallets`, or 0 without pallets.
    pub avg_steps:     f64,
}

impl RunSummary {
    pub fn from_pallets(pallets: &[RunPalletResult]) -> Self {
        let total_pallets = pallets.len();
        let ok_pallets = pallets.iter().filter(|p| p.is_ok()).count();
        let total_steps: usize = pallets.iter().map(|p| p.steps).sum();
        let avg_steps = if total_pallets == 0 { 0.0 } else { total_steps as f64 / total_pallets as f64 };
        Self {
            total_pallets,
            ok_pallets,
            error_pallets: total_pallets - ok_pallets,
            total_steps,
            avg_steps,
        }
    }
}

/// One simulation output.
#[derive(Clone, Debug, PartialEq)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResult {
    pub run_id:          RunId,
    pub name:            String,
    pub created_at:      DateTime<Utc>,
    pub layout_id:       LayoutId,
    pub sku_master_id:   SkuMasterId,
    pub layout_hash:     String,
    pub sku_master_hash: String,
    pub summary:         RunSummary,
    /// Pallet ids in processing (first-seen) order.
    pub pallet_order:    Vec<PalletId>,
    pub pallet_results:  Vec<RunPalletResult>,
    /// `height × width` visitation counts, row-major.
    pub heatmap_steps:   Vec<Vec<u32>>,
}

impl RunResult {
    pub fn pallet(&self, pallet_id: &PalletId) -> Option<&RunPalletResult> {
        self.pallet_results.iter().find(|p| &p.pallet_id == pallet_id)
    }

    /// Result for the pallet at position `index` of `pallet_order`.
    pub fn pallet_at(&self, index: usize) -> Option<&RunPalletResult> {
        self.pallet_order.get(index).and_then(|id| self.pallet(id))
    }

    /// Largest heatmap cell, 0 for an empty heatmap.
    pub fn max_heat(&self) -> u32 {
        self.heatmap_steps.iter().flatten().copied().max().unwrap_or(0)
    }

    /// `true` if both runs carry the same content, ignoring `run_id`,
    /// `name` and `created_at`.
    pub fn same_content(&self, other: &RunResult) -> bool {
        self.layout_id == other.layout_id
            && self.sku_master_id == other.sku_master_id
            && self.layout_hash == other.layout_hash
            && self.sku_master_hash == other.sku_master_hash
            && self.summary == other.summary
            && self.pallet_order == other.pallet_order
            && self.pallet_results == other.pallet_results
            && self.heatmap_steps == other.heatmap_steps
    }
}

/// Build-level counters a caller can surface without scanning every pallet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunWarnings {
    pub pallets_with_issues:  usize,
    pub pallets_without_path: usize,
    pub missing_sku_mappings: usize,
}

impl RunWarnings {
    pub fn from_pallets(pallets: &[RunPalletResult]) -> Self {
        Self {
            pallets_with_issues:  pallets.iter().filter(|p| !p.is_ok()).count(),
            pallets_without_path: pallets.iter().filter(|p| !p.has_path).count(),
            missing_sku_mappings: pallets.iter().map(|p| p.missing_sku_count).sum(),
        }
    }

    pub fn is_clean(&self) -> bool {
        *self == RunWarnings::default()
    }
}

/// What `RunBuilder::build` returns.
#[derive(Clone, Debug)]
pub struct RunBuild {
    pub run:      RunResult,
    pub warnings: RunWarnings,
}
