//! Trail rendering support.

use rustc_hash::FxHashMap;

use pw_core::Coord;

/// How often each cell of `path[..=step_index]` was visited.
///
/// `step_index` is clamped to the path; an empty path gives an empty map.
pub fn visit_counts(path: &[Coord], step_index: usize) -> FxHashMap<Coord, u32> {
    let mut counts = FxHashMap::default();
    let Some(last) = path.len().checked_sub(1) else {
        return counts;
    };
    for &c in &path[..=step_index.min(last)] {
        *counts.entry(c).or_insert(0) += 1;
    }
    counts
}
