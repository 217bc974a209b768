//! Plain data row types written by report backends.

use pw_run::RunPalletResult;

/// One pallet outcome, flattened for tabular output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PalletRow {
    pub pallet_id:         String,
    pub sku_count:         usize,
    pub missing_sku_count: usize,
    pub steps:             usize,
    pub has_path:          bool,
    pub issue_count:       usize,
    /// Issues joined with `" | "`.
    pub issues:            String,
}

impl From<&RunPalletResult> for PalletRow {
    fn from(p: &RunPalletResult) -> Self {
        Self {
            pallet_id:         p.pallet_id.to_string(),
            sku_count:         p.sku_count,
            missing_sku_count: p.missing_sku_count,
            steps:             p.steps,
            has_path:          p.has_path,
            issue_count:       p.issues.len(),
            issues:            p.issues.join(" | "),
        }
    }
}

/// One non-zero heatmap cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatmapRow {
    pub x:      u32,
    pub y:      u32,
    pub visits: u32,
}

/// Non-zero cells of a row-major heatmap, row by row.
pub fn heatmap_rows(heatmap: &[Vec<u32>]) -> Vec<HeatmapRow> {
    heatmap
        .iter()
        .enumerate()
        .flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &visits)| visits > 0)
                .map(move |(x, &visits)| HeatmapRow { x: x as u32, y: y as u32, visits })
        })
        .collect()
}
