//! Grid coordinates and the four cardinal directions.
//!
//! Coordinates are signed so that access cells pointing outside the grid
//! (imported from an external editor) can be represented and reported by
//! validation instead of wrapping silently.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A grid cell address.  `x` grows to the right, `y` grows downward.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[derive(Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance; the A* heuristic on a 4-connected grid.
    #[inline]
    pub fn manhattan(self, other: Coord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// `true` if `other` is one of the four cardinal neighbours.
    #[inline]
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }

    /// The cell one step away in direction `dir`.  May lie outside the grid.
    #[inline]
    pub fn neighbor(self, dir: Direction) -> Coord {
        let (dx, dy) = dir.delta();
        Coord::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Coord::new(x, y)
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

/// One of the four exits of a grid cell.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Neighbour enumeration order used by the graph builder.  Changing it
    /// changes which of several equal-cost paths the router returns.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// `(dx, dy)` offset of one step in this direction.
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up    => (0, -1),
            Direction::Down  => (0, 1),
            Direction::Left  => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up    => Direction::Down,
            Direction::Down  => Direction::Up,
            Direction::Left  => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up    => "up",
            Direction::Down  => "down",
            Direction::Left  => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
