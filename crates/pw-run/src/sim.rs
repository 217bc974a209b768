//! Per-pallet routing: grouping, stop resolution, leg stitching and the
//! heatmap.
//!
//! [`Simulation`] holds everything that is shared between pallets of one
//! build.  [`RunBuilder`][crate::RunBuilder] creates it after the fatal
//! checks pass and feeds it one [`PalletGroup`] at a time.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use pw_core::{Coord, LocationId, PalletId, PalletLine, Sku, SkuMaster};
use pw_spatial::{LayoutGraph, Router};

use crate::{CacheStats, RunPalletResult, RunPalletStop, SegmentCache};

// ── Grouping ──────────────────────────────────────────────────────────────────

/// One pallet's unique SKUs, in first-seen order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PalletGroup {
    pub pallet_id: PalletId,
    pub skus:      Vec<Sku>,
}

/// Group lines by trimmed pallet id, preserving first-seen order of both
/// pallets and SKUs.  Duplicate SKUs on a pallet collapse to one.
///
/// Callers reject blank lines first; a blank line here is grouped as-is.
pub fn group_pallets(lines: &[PalletLine]) -> Vec<PalletGroup> {
    let mut groups: Vec<PalletGroup> = Vec::new();
    let mut slot_of: FxHashMap<&str, usize> = FxHashMap::default();
    let mut seen: FxHashSet<(usize, &str)> = FxHashSet::default();

    for line in lines {
        let pallet_id = line.pallet_id.as_str().trim();
        let sku = line.sku.as_str().trim();
        let slot = *slot_of.entry(pallet_id).or_insert_with(|| {
            groups.push(PalletGroup { pallet_id: PalletId::new(pallet_id), skus: Vec::new() });
            groups.len() - 1
        });
        if seen.insert((slot, sku)) {
            groups[slot].skus.push(Sku::new(sku));
        }
    }
    groups
}

// ── Resolved stop ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct ResolvedStop {
    location_id: LocationId,
    sequence:    f64,
    access_cell: Coord,
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// Shared state for routing the pallets of one run.
pub struct Simulation<'a, R: Router> {
    router:         &'a R,
    graph:          &'a LayoutGraph,
    sku_master:     &'a SkuMaster,
    access:         FxHashMap<LocationId, Coord>,
    start:          Coord,
    end:            Coord,
    layout_hash:    Arc<str>,
    cache:          SegmentCache,
    heatmap:        Vec<Vec<u32>>,
    record_visited: bool,
}

impl<'a, R: Router> Simulation<'a, R> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        router:         &'a R,
        graph:          &'a LayoutGraph,
        sku_master:     &'a SkuMaster,
        access:         FxHashMap<LocationId, Coord>,
        start:          Coord,
        end:            Coord,
        layout_hash:    &str,
        record_visited: bool,
    ) -> Self {
        let heatmap = vec![vec![0u32; graph.width() as usize]; graph.height() as usize];
        Self {
            router,
            graph,
            sku_master,
            access,
            start,
            end,
            layout_hash: Arc::from(layout_hash),
            cache: SegmentCache::new(),
            heatmap,
            record_visited,
        }
    }

    /// Route one pallet and add its visited cells to the heatmap.
    pub fn run_pallet(&mut self, group: &PalletGroup) -> RunPalletResult {
        let mut issues = Vec::new();
        let mut missing_sku_count = 0;
        let mut stops: Vec<ResolvedStop> = Vec::with_capacity(group.skus.len());

        // ── Resolve ───────────────────────────────────────────────────────
        for sku in &group.skus {
            let Some(selected) = self.sku_master.primary(sku.as_str()) else {
                issues.push(format!("SKU {sku} sin mapping en SKU Master"));
                missing_sku_count += 1;
                continue;
            };
            let Some(&access_cell) = self.access.get(&selected.location_id) else {
                issues.push(format!(
                    "Ubicación {} (SKU {sku}) no existe o no es accesible en layout",
                    selected.location_id
                ));
                continue;
            };
            stops.push(ResolvedStop {
                location_id: selected.location_id.clone(),
                sequence:    selected.sort_key(),
                access_cell,
            });
        }

        // Stable: equal sequences keep first-seen SKU order.
        stops.sort_by(|a, b| a.sequence.total_cmp(&b.sequence));

        // ── Route and stitch ──────────────────────────────────────────────
        let chain: Vec<Coord> = std::iter::once(self.start)
            .chain(stops.iter().map(|s| s.access_cell))
            .chain(std::iter::once(self.end))
            .collect();

        let mut has_path = true;
        let mut visited: Vec<Coord> = Vec::new();
        for (leg, pair) in chain.windows(2).enumerate() {
            let (from, to) = (pair[0], pair[1]);
            let Some(cells) = self.cache.leg(self.router, self.graph, &self.layout_hash, from, to) else {
                has_path = false;
                issues.push(format!("Sin ruta entre {from} y {to}"));
                continue;
            };
            let skip = if leg > 0 { 1 } else { 0 };
            visited.extend_from_slice(cells.get(skip..).unwrap_or(&[]));
        }

        for c in &visited {
            self.heatmap[c.y as usize][c.x as usize] += 1;
        }

        RunPalletResult {
            pallet_id: group.pallet_id.clone(),
            sku_count: group.skus.len(),
            missing_sku_count,
            steps: visited.len(),
            has_path,
            issues,
            stops: stops
                .into_iter()
                .map(|s| RunPalletStop { location_id: s.location_id, sequence: s.sequence })
                .collect(),
            visited: self.record_visited.then_some(visited),
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Consume the simulation, returning the accumulated heatmap.
    pub fn into_heatmap(self) -> Vec<Vec<u32>> {
        self.heatmap
    }
}
