//! Putting two heatmaps on one color scale.

use serde::{Deserialize, Serialize};

use pw_run::RunResult;

/// Largest cell of `matrix`, 0 when empty.
pub fn max_heat_value(matrix: &[Vec<u32>]) -> u32 {
    matrix.iter().flatten().copied().max().unwrap_or(0)
}

/// Rescale every cell by `target_max / source_max`.
///
/// Values pass through unchanged when `source_max` is 0 or already equals
/// `target_max`.
pub fn normalize_heatmap(matrix: &[Vec<u32>], source_max: u32, target_max: u32) -> Vec<Vec<f64>> {
    if source_max == 0 || source_max == target_max {
        return matrix.iter().map(|row| row.iter().map(|&v| f64::from(v)).collect()).collect();
    }
    let scale = f64::from(target_max) / f64::from(source_max);
    matrix
        .iter()
        .map(|row| row.iter().map(|&v| f64::from(v) * scale).collect())
        .collect()
}

/// Both heatmaps scaled to the larger of their maxima.
#[derive(Clone, Debug, PartialEq)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedHeatmaps {
    pub a:          Vec<Vec<f64>>,
    pub b:          Vec<Vec<f64>>,
    pub target_max: u32,
}

pub fn shared_heatmaps(a: &RunResult, b: &RunResult) -> SharedHeatmaps {
    let (max_a, max_b) = (max_heat_value(&a.heatmap_steps), max_heat_value(&b.heatmap_steps));
    let target_max = max_a.max(max_b);
    SharedHeatmaps {
        a: normalize_heatmap(&a.heatmap_steps, max_a, target_max),
        b: normalize_heatmap(&b.heatmap_steps, max_b, target_max),
        target_max,
    }
}
