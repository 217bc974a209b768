//! Visited-cell sequences for playback.
//!
//! A stored run only needs its pallet results to be replayed.  Paths come
//! from `RunPalletResult::visited` when the run recorded them, otherwise
//! they are rebuilt against the layout with a cache scoped to this call.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use pw_core::{layout_hash, Coord, Layout, LocationId, PalletId};
use pw_spatial::{AStarRouter, LayoutGraph, Router};

use crate::{ReplayError, RunPalletResult, RunResult, SegmentCache};

/// One visited sequence per entry of `RunResult::pallet_order`.
#[derive(Clone, Debug, Default)]
pub struct PalletPaths {
    pub pallet_ids:     Vec<PalletId>,
    pub paths:          Vec<Vec<Coord>>,
    pub playable:       Vec<bool>,
    /// The layout no longer hashes to the run's `layout_hash`; rebuilt
    /// paths may differ from what the run measured.
    pub layout_changed: bool,
}

impl PalletPaths {
    pub fn from_run(layout: &Layout, run: &RunResult) -> Result<Self, ReplayError> {
        Self::from_run_with(&AStarRouter, layout, run)
    }

    pub fn from_run_with<R: Router>(router: &R, layout: &Layout, run: &RunResult) -> Result<Self, ReplayError> {
        let current_hash = layout_hash(layout)?;
        let layout_changed = current_hash != run.layout_hash;
        if layout_changed {
            tracing::warn!(
                run = %run.run_id,
                stored = %run.layout_hash,
                current = %current_hash,
                "layout changed since the run was built; replay may not match"
            );
        }

        let mut rebuild: Option<Rebuild<'_, R>> = None;
        let mut out = PalletPaths { layout_changed, ..Default::default() };

        for pallet_id in &run.pallet_order {
            let result = run.pallet(pallet_id);
            let playable = result.is_some_and(RunPalletResult::is_playable);
            let path = match result {
                Some(r) if playable => match &r.visited {
                    Some(cells) => cells.clone(),
                    None => {
                        if rebuild.is_none() {
                            rebuild = Some(Rebuild::new(router, layout, &current_hash)?);
                        }
                        rebuild.as_mut().map(|rb| rb.path_for(r)).unwrap_or_default()
                    }
                },
                _ => Vec::new(),
            };
            out.pallet_ids.push(pallet_id.clone());
            out.paths.push(path);
            out.playable.push(playable);
        }
        Ok(out)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Visited cells of pallet `index`; empty when out of range or
    /// unplayable.
    pub fn path(&self, index: usize) -> &[Coord] {
        self.paths.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_playable(&self, index: usize) -> bool {
        self.playable.get(index).copied().unwrap_or(false)
    }

    /// Last valid step index for pallet `index`; 0 for an empty path.
    pub fn max_step(&self, index: usize) -> usize {
        self.path(index).len().saturating_sub(1)
    }
}

// ── Rebuild ───────────────────────────────────────────────────────────────────

struct Rebuild<'a, R: Router> {
    router:      &'a R,
    graph:       LayoutGraph,
    access:      FxHashMap<LocationId, Coord>,
    start:       Coord,
    end:         Coord,
    layout_hash: Arc<str>,
    cache:       SegmentCache,
}

impl<'a, R: Router> Rebuild<'a, R> {
    fn new(router: &'a R, layout: &Layout, layout_hash: &str) -> Result<Self, ReplayError> {
        let (start, end) = layout.start_end()?;
        Ok(Self {
            router,
            graph: LayoutGraph::build(layout)?,
            access: layout.access_by_location(),
            start,
            end,
            layout_hash: Arc::from(layout_hash),
            cache: SegmentCache::new(),
        })
    }

    /// Stitch START → stored stops → END.  Stops whose location is gone and
    /// legs with no route are skipped, so a changed layout yields a best
    /// effort path rather than an error.
    fn path_for(&mut self, pallet: &RunPalletResult) -> Vec<Coord> {
        let chain: Vec<Coord> = std::iter::once(self.start)
            .chain(pallet.stops.iter().filter_map(|s| self.access.get(&s.location_id).copied()))
            .chain(std::iter::once(self.end))
            .collect();

        let mut visited = Vec::with_capacity(pallet.steps);
        for (leg, pair) in chain.windows(2).enumerate() {
            let Some(cells) = self.cache.leg(self.router, &self.graph, &self.layout_hash, pair[0], pair[1]) else {
                continue;
            };
            let skip = if leg > 0 { 1 } else { 0 };
            visited.extend_from_slice(cells.get(skip..).unwrap_or(&[]));
        }
        visited
    }
}
