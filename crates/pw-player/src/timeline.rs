//! What the engine plays: per-pallet step ranges and playability.

use pw_core::Coord;
use pw_run::PalletPaths;

/// Pallet-indexed view of one or more replay paths.
pub trait Timeline {
    fn pallet_count(&self) -> usize;

    /// Last valid step index of `pallet`; 0 for unplayable or out-of-range
    /// pallets.
    fn max_step(&self, pallet: usize) -> usize;

    fn is_playable(&self, pallet: usize) -> bool;

    /// First playable pallet strictly after `pallet`.
    fn next_playable(&self, pallet: usize) -> Option<usize> {
        (pallet + 1..self.pallet_count()).find(|&i| self.is_playable(i))
    }
}

// ── Single run ────────────────────────────────────────────────────────────────

/// Replay of one run.
#[derive(Clone, Debug, Default)]
pub struct SingleTimeline {
    paths: PalletPaths,
}

impl SingleTimeline {
    pub fn new(paths: PalletPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &PalletPaths {
        &self.paths
    }

    /// Picker position at `(pallet, step)`, clamped to the path's end.
    pub fn position(&self, pallet: usize, step: usize) -> Option<Coord> {
        position(self.paths.path(pallet), step)
    }
}

impl Timeline for SingleTimeline {
    fn pallet_count(&self) -> usize {
        self.paths.len()
    }

    fn max_step(&self, pallet: usize) -> usize {
        self.paths.max_step(pallet)
    }

    fn is_playable(&self, pallet: usize) -> bool {
        self.paths.is_playable(pallet)
    }
}

// ── Two runs in lockstep ──────────────────────────────────────────────────────

/// Two runs sharing one cursor.
///
/// A pallet is playable when either side is.  Its step range is the longer
/// playable side; the shorter side holds its last cell once it is done.
#[derive(Clone, Debug, Default)]
pub struct DualTimeline {
    a: PalletPaths,
    b: PalletPaths,
}

impl DualTimeline {
    pub fn new(a: PalletPaths, b: PalletPaths) -> Self {
        Self { a, b }
    }

    pub fn side_a(&self) -> &PalletPaths {
        &self.a
    }

    pub fn side_b(&self) -> &PalletPaths {
        &self.b
    }

    /// Positions of both pickers at `(pallet, step)`.
    pub fn positions(&self, pallet: usize, step: usize) -> (Option<Coord>, Option<Coord>) {
        (position(self.a.path(pallet), step), position(self.b.path(pallet), step))
    }
}

impl Timeline for DualTimeline {
    fn pallet_count(&self) -> usize {
        self.a.len().max(self.b.len())
    }

    fn max_step(&self, pallet: usize) -> usize {
        let side = |p: &PalletPaths| if p.is_playable(pallet) { p.max_step(pallet) } else { 0 };
        side(&self.a).max(side(&self.b))
    }

    fn is_playable(&self, pallet: usize) -> bool {
        self.a.is_playable(pallet) || self.b.is_playable(pallet)
    }
}

fn position(path: &[Coord], step: usize) -> Option<Coord> {
    path.get(step.min(path.len().saturating_sub(1))).copied()
}
