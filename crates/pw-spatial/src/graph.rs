//! Directed traversal graph derived from a warehouse layout.
//!
//! # Data layout
//!
//! Every grid cell gets a dense index `y * width + x`, whether or not it is
//! walkable.  Outgoing edges use **Compressed Sparse Row** format: the
//! neighbours of cell `i` are
//!
//! ```text
//! edge_to[ node_out_start[i] .. node_out_start[i+1] ]
//! ```
//!
//! Non-walkable cells simply have an empty range.  Within a range, edges
//! follow [`Direction::ALL`] order (up, down, left, right), which fixes the
//! order the router expands neighbours in.
//!
//! # Edge rule
//!
//! A walkable cell (AISLE, START, END) has an edge toward an in-bounds
//! walkable neighbour when the *source* cell permits that exit.  START and
//! END permit every exit; AISLE cells follow their own movement rules.  Edges
//! are therefore not symmetric in general.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use pw_core::{Coord, Direction, Layout};

use crate::{SpatialError, SpatialResult};

/// Adjacency over grid cells.  Build with [`LayoutGraph::build`]; rebuild
/// whenever the layout changes.
#[derive(Clone, Debug)]
pub struct LayoutGraph {
    width:  u32,
    height: u32,

    /// `true` for walkable cells.  Indexed by cell index.
    is_node: Vec<bool>,

    /// CSR row pointer.  Length = `width * height + 1`.
    pub node_out_start: Vec<u32>,

    /// Destination cell index of each edge.
    pub edge_to: Vec<u32>,
}

impl LayoutGraph {
    /// Derive the graph from `layout` in O(width · height).
    ///
    /// Fails only when `grid_data` does not have the declared shape.
    pub fn build(layout: &Layout) -> SpatialResult<Self> {
        check_shape(layout)?;

        let (width, height) = (layout.width, layout.height);
        let cell_count = width as usize * height as usize;

        let mut is_node        = vec![false; cell_count];
        let mut node_out_start = Vec::with_capacity(cell_count + 1);
        let mut edge_to        = Vec::with_capacity(cell_count * 2);
        node_out_start.push(0u32);

        for (from, cell) in layout.cells() {
            if cell.is_walkable() {
                is_node[index_of(width, from)] = true;
                for dir in Direction::ALL {
                    if !cell.allows_exit(dir) {
                        continue;
                    }
                    let to = from.neighbor(dir);
                    if layout.cell(to).is_some_and(|c| c.is_walkable()) {
                        edge_to.push(index_of(width, to) as u32);
                    }
                }
            }
            node_out_start.push(edge_to.len() as u32);
        }
        debug_assert_eq!(node_out_start.len(), cell_count + 1);

        tracing::trace!(width, height, edges = edge_to.len(), "layout graph built");

        Ok(Self { width, height, is_node, node_out_start, edge_to })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of cells (walkable or not).
    pub fn cell_count(&self) -> usize {
        self.is_node.len()
    }

    /// Number of walkable cells.
    pub fn node_count(&self) -> usize {
        self.is_node.iter().filter(|&&n| n).count()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    // ── Index mapping ─────────────────────────────────────────────────────

    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        c.x >= 0 && c.y >= 0 && (c.x as u32) < self.width && (c.y as u32) < self.height
    }

    /// Dense index of `c`, or `None` outside the grid.
    #[inline]
    pub fn index(&self, c: Coord) -> Option<usize> {
        self.contains(c).then(|| index_of(self.width, c))
    }

    /// Dense index of `c` if it is a traversal node.
    #[inline]
    pub fn node_index(&self, c: Coord) -> Option<usize> {
        self.index(c).filter(|&i| self.is_node[i])
    }

    #[inline]
    pub fn coord(&self, index: usize) -> Coord {
        let w = self.width as usize;
        Coord::new((index % w) as i32, (index / w) as i32)
    }

    #[inline]
    pub fn is_node(&self, c: Coord) -> bool {
        self.node_index(c).is_some()
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Outgoing cell indices of cell `index`.  Contiguous slice, no allocation.
    #[inline]
    pub fn out_indices(&self, index: usize) -> &[u32] {
        let start = self.node_out_start[index] as usize;
        let end   = self.node_out_start[index + 1] as usize;
        &self.edge_to[start..end]
    }

    /// Reachable neighbours of `c`.  Empty for non-nodes and out-of-grid cells.
    pub fn neighbors(&self, c: Coord) -> impl Iterator<Item = Coord> + '_ {
        let slice = self.index(c).map_or(&[][..], |i| self.out_indices(i));
        slice.iter().map(|&i| self.coord(i as usize))
    }

    pub fn out_degree(&self, c: Coord) -> usize {
        self.index(c).map_or(0, |i| self.out_indices(i).len())
    }

    /// Every node reachable from `origin` along directed edges, `origin`
    /// included.  Empty if `origin` is not a node.
    pub fn reachable_from(&self, origin: Coord) -> FxHashSet<Coord> {
        let mut seen = FxHashSet::default();
        let Some(start) = self.node_index(origin) else {
            return seen;
        };

        let mut visited = vec![false; self.cell_count()];
        let mut queue = VecDeque::from([start]);
        visited[start] = true;
        while let Some(i) = queue.pop_front() {
            seen.insert(self.coord(i));
            for &next in self.out_indices(i) {
                let next = next as usize;
                if !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }
        seen
    }
}

#[inline]
fn index_of(width: u32, c: Coord) -> usize {
    c.y as usize * width as usize + c.x as usize
}

fn check_shape(layout: &Layout) -> SpatialResult<()> {
    let malformed = |detail: String| SpatialError::MalformedGrid {
        width:  layout.width,
        height: layout.height,
        detail,
    };
    if layout.grid_data.len() != layout.height as usize {
        return Err(malformed(format!("{} rows", layout.grid_data.len())));
    }
    if let Some((y, row)) = layout
        .grid_data
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != layout.width as usize)
    {
        return Err(malformed(format!("row {y} has {} cells", row.len())));
    }
    Ok(())
}
