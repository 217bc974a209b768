//! Comparability checks.

use serde::{Deserialize, Serialize};

use pw_run::RunResult;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompareMode {
    /// Side-by-side heatmaps on one grid.
    HeatmapOverlay,
    /// Both runs replayed pallet by pallet with one cursor.  Layouts and
    /// SKU masters may differ.
    DualPlayback,
}

/// Reasons `a` and `b` cannot be compared in `mode`; empty when they can.
pub fn comparable(a: &RunResult, b: &RunResult, mode: CompareMode) -> Vec<String> {
    let mut reasons = Vec::new();
    match mode {
        CompareMode::HeatmapOverlay => {
            if a.layout_id != b.layout_id {
                reasons.push("Layout diferente".to_string());
            }
        }
        CompareMode::DualPlayback => {
            if !has_same_pallet_list(a, b) {
                reasons.push("Lista de pallets diferente".to_string());
            }
        }
    }
    if !reasons.is_empty() {
        tracing::debug!(a = %a.run_id, b = %b.run_id, ?mode, ?reasons, "runs not comparable");
    }
    reasons
}

/// Same pallets in the same order.
pub fn has_same_pallet_list(a: &RunResult, b: &RunResult) -> bool {
    a.pallet_order == b.pallet_order
}
