//! Step differences between two runs, overall and per pallet.
//!
//! Deltas are always `B − A`: negative means run B walks less.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use pw_core::PalletId;
use pw_run::{RunPalletResult, RunResult};

#[derive(Clone, Copy, Debug, PartialEq)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDelta {
    pub total_steps_delta: i64,
    /// `total_steps_delta` as a percentage of A's total; 0 when A walked
    /// nothing.
    pub total_steps_pct:   f64,
    pub avg_steps_delta:   f64,
    pub error_pallets_a:   usize,
    pub error_pallets_b:   usize,
}

impl SummaryDelta {
    pub fn between(a: &RunResult, b: &RunResult) -> Self {
        let total_a = a.summary.total_steps as i64;
        let total_steps_delta = b.summary.total_steps as i64 - total_a;
        let total_steps_pct = if total_a == 0 { 0.0 } else { total_steps_delta as f64 / total_a as f64 * 100.0 };
        Self {
            total_steps_delta,
            total_steps_pct,
            avg_steps_delta: b.summary.avg_steps - a.summary.avg_steps,
            error_pallets_a: a.summary.error_pallets,
            error_pallets_b: b.summary.error_pallets,
        }
    }
}

/// One side of a [`PalletCompareRow`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PalletSide {
    pub steps:             usize,
    pub missing_sku_count: usize,
    pub has_path:          bool,
}

impl From<&RunPalletResult> for PalletSide {
    fn from(p: &RunPalletResult) -> Self {
        Self { steps: p.steps, missing_sku_count: p.missing_sku_count, has_path: p.has_path }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PalletCompareRow {
    pub pallet_id: PalletId,
    /// Position in the merged pallet order.
    pub index:     usize,
    /// From A when present, else from B.
    pub sku_count: usize,
    pub a:         Option<PalletSide>,
    pub b:         Option<PalletSide>,
    /// `B − A` steps; `None` unless both runs have the pallet.
    pub delta:     Option<i64>,
}

/// Per-pallet comparison over the union of both runs' pallets.
///
/// The merged order is A's `pallet_order` followed by B-only pallets in
/// B's order.  Rows are sorted by ascending delta (biggest B savings
/// first), rows without a delta last, ties by merged position.
pub fn pallet_compare_rows(a: &RunResult, b: &RunResult) -> Vec<PalletCompareRow> {
    let by_a: FxHashMap<&PalletId, &RunPalletResult> = a.pallet_results.iter().map(|p| (&p.pallet_id, p)).collect();
    let by_b: FxHashMap<&PalletId, &RunPalletResult> = b.pallet_results.iter().map(|p| (&p.pallet_id, p)).collect();

    let mut order: Vec<&PalletId> = a.pallet_order.iter().collect();
    for p in &b.pallet_results {
        if !order.contains(&&p.pallet_id) {
            order.push(&p.pallet_id);
        }
    }

    let mut rows: Vec<PalletCompareRow> = order
        .into_iter()
        .enumerate()
        .map(|(index, id)| {
            let ra = by_a.get(id).copied();
            let rb = by_b.get(id).copied();
            PalletCompareRow {
                pallet_id: id.clone(),
                index,
                sku_count: ra.or(rb).map_or(0, |p| p.sku_count),
                a: ra.map(PalletSide::from),
                b: rb.map(PalletSide::from),
                delta: match (ra, rb) {
                    (Some(ra), Some(rb)) => Some(rb.steps as i64 - ra.steps as i64),
                    _ => None,
                },
            }
        })
        .collect();

    rows.sort_by(|l, r| match (l.delta, r.delta) {
        (Some(dl), Some(dr)) => dl.cmp(&dr).then(l.index.cmp(&r.index)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => l.index.cmp(&r.index),
    });
    rows
}
