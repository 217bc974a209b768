//! Leg memoization.
//!
//! Many pallets share legs (START to a popular location, the last pick to
//! END), so each `(from, to)` pair is searched once per cache.  Keys include
//! the layout hash: one cache never answers for a different layout, even if
//! a caller reuses it across builds.  Failed searches are cached too, so an
//! unreachable leg costs one search no matter how many pallets hit it.
//!
//! A cache is owned by one build or one replay and dropped with it.

use std::collections::hash_map::Entry;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use pw_core::Coord;
use pw_spatial::{LayoutGraph, Router};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct SegmentKey {
    layout_hash: Arc<str>,
    from:        Coord,
    to:          Coord,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits:   u64,
    pub misses: u64,
}

#[derive(Debug, Default)]
pub struct SegmentCache {
    segments: FxHashMap<SegmentKey, Option<Vec<Coord>>>,
    stats:    CacheStats,
}

impl SegmentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The leg `from → to` on the layout identified by `layout_hash`,
    /// searching with `router` on a miss.  `None` when no route exists.
    pub fn leg<R: Router>(
        &mut self,
        router:      &R,
        graph:       &LayoutGraph,
        layout_hash: &Arc<str>,
        from:        Coord,
        to:          Coord,
    ) -> Option<&[Coord]> {
        let key = SegmentKey { layout_hash: Arc::clone(layout_hash), from, to };
        match self.segments.entry(key) {
            Entry::Occupied(slot) => {
                self.stats.hits += 1;
                slot.into_mut().as_deref()
            }
            Entry::Vacant(slot) => {
                self.stats.misses += 1;
                let cells = match router.route(graph, from, to) {
                    Ok(path) => Some(path.cells),
                    Err(err) => {
                        tracing::debug!(%from, %to, %err, "leg has no route");
                        None
                    }
                };
                slot.insert(cells).as_deref()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
