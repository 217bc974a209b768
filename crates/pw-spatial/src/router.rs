//! Routing trait and the default A* implementation.
//!
//! # Pluggability
//!
//! `pw-run` calls routing through the [`Router`] trait so a different search
//! can be swapped in without touching the simulator.  [`AStarRouter`] is the
//! default; [`BfsRouter`] returns paths of the same length and doubles as a
//! reference oracle in tests.
//!
//! # Cost model
//!
//! Every edge costs one step.  A path's cost is its cell count minus one.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use pw_core::Coord;

use crate::graph::LayoutGraph;
use crate::{SpatialError, SpatialResult};

const NO_PREV: u32 = u32::MAX;

// ── Path ──────────────────────────────────────────────────────────────────────

/// An ordered walk through the grid, both endpoints included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    pub cells: Vec<Coord>,
}

impl Path {
    /// Number of cells, endpoints included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves: `len() - 1`.
    pub fn cost(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// `true` if start and goal are the same cell.
    pub fn is_trivial(&self) -> bool {
        self.cells.len() == 1
    }

    pub fn first(&self) -> Option<Coord> {
        self.cells.first().copied()
    }

    pub fn last(&self) -> Option<Coord> {
        self.cells.last().copied()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-path search over a [`LayoutGraph`].
///
/// Implementations must be deterministic: the same graph and endpoints must
/// always give the same path, because the simulator memoizes legs and its
/// heatmap is an audited metric.
pub trait Router: Send + Sync {
    /// Shortest path from `from` to `to`.
    ///
    /// Returns [`SpatialError::NoRoute`] when `to` is unreachable or either
    /// endpoint is not a traversal node.
    fn route(&self, graph: &LayoutGraph, from: Coord, to: Coord) -> SpatialResult<Path>;
}

/// A* with the Manhattan heuristic.
///
/// The heuristic is admissible and consistent on a unit-cost 4-connected
/// grid, so the first time the goal is popped its path is optimal and a
/// closed set is sufficient.
#[derive(Clone, Copy, Debug, Default)]
pub struct AStarRouter;

impl Router for AStarRouter {
    fn route(&self, graph: &LayoutGraph, from: Coord, to: Coord) -> SpatialResult<Path> {
        astar(graph, from, to)
    }
}

/// Breadth-first search.  Optimal for unit edge costs, with no heuristic.
#[derive(Clone, Copy, Debug, Default)]
pub struct BfsRouter;

impl Router for BfsRouter {
    fn route(&self, graph: &LayoutGraph, from: Coord, to: Coord) -> SpatialResult<Path> {
        bfs(graph, from, to)
    }
}

/// Convenience wrapper around [`AStarRouter`]: `None` when no route exists.
pub fn find_path(graph: &LayoutGraph, start: Coord, goal: Coord) -> Option<Path> {
    astar(graph, start, goal).ok()
}

// ── Search internals ──────────────────────────────────────────────────────────

fn endpoints(graph: &LayoutGraph, from: Coord, to: Coord) -> SpatialResult<(usize, usize)> {
    match (graph.node_index(from), graph.node_index(to)) {
        (Some(s), Some(g)) => Ok((s, g)),
        _ => Err(SpatialError::NoRoute { from, to }),
    }
}

fn astar(graph: &LayoutGraph, from: Coord, to: Coord) -> SpatialResult<Path> {
    let (start, goal) = endpoints(graph, from, to)?;
    if start == goal {
        return Ok(Path { cells: vec![from] });
    }

    let n = graph.cell_count();
    // g[v] = best known step count from start to v.
    let mut g      = vec![u32::MAX; n];
    let mut prev   = vec![NO_PREV; n];
    let mut closed = vec![false; n];

    // Min-heap on (f, h, seq, node).  Preferring the lower h among equal f
    // pulls toward the goal; the insertion counter makes remaining ties
    // first-seen, so the result depends only on graph and endpoints.
    let mut heap: BinaryHeap<Reverse<(u32, u32, u64, u32)>> = BinaryHeap::new();
    let mut seq: u64 = 0;

    g[start] = 0;
    let h0 = from.manhattan(to);
    heap.push(Reverse((h0, h0, seq, start as u32)));

    while let Some(Reverse((_, _, _, node))) = heap.pop() {
        let node = node as usize;
        if node == goal {
            return Ok(reconstruct(graph, &prev, goal));
        }
        // Skip stale heap entries.
        if closed[node] {
            continue;
        }
        closed[node] = true;

        let tentative = g[node] + 1;
        for &next in graph.out_indices(node) {
            let next = next as usize;
            if closed[next] || tentative >= g[next] {
                continue;
            }
            g[next] = tentative;
            prev[next] = node as u32;
            let h = graph.coord(next).manhattan(to);
            seq += 1;
            heap.push(Reverse((tentative + h, h, seq, next as u32)));
        }
    }

    Err(SpatialError::NoRoute { from, to })
}

fn bfs(graph: &LayoutGraph, from: Coord, to: Coord) -> SpatialResult<Path> {
    let (start, goal) = endpoints(graph, from, to)?;
    if start == goal {
        return Ok(Path { cells: vec![from] });
    }

    let mut prev    = vec![NO_PREV; graph.cell_count()];
    let mut visited = vec![false; graph.cell_count()];
    let mut queue   = VecDeque::from([start]);
    visited[start] = true;

    while let Some(node) = queue.pop_front() {
        if node == goal {
            return Ok(reconstruct(graph, &prev, goal));
        }
        for &next in graph.out_indices(node) {
            let next = next as usize;
            if !visited[next] {
                visited[next] = true;
                prev[next] = node as u32;
                queue.push_back(next);
            }
        }
    }

    Err(SpatialError::NoRoute { from, to })
}

fn reconstruct(graph: &LayoutGraph, prev: &[u32], goal: usize) -> Path {
    let mut cells = vec![graph.coord(goal)];
    let mut cur = goal;
    while prev[cur] != NO_PREV {
        cur = prev[cur] as usize;
        cells.push(graph.coord(cur));
    }
    cells.reverse();
    Path { cells }
}
