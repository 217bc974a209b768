//! Warehouse grid layout.
//!
//! # Grid storage
//!
//! `grid_data` is a row-major `height × width` matrix: `grid_data[y][x]`.
//! The layout is immutable input to the engine; it is owned and edited by an
//! external collaborator and only read here.
//!
//! # Movement rules
//!
//! Directionality is a property of the **source** cell: an AISLE cell's
//! [`MovementRules`] say which of its four exits may be taken.  A neighbour
//! may permit leaving toward a cell that does not permit the way back, which
//! is how one-way aisles are drawn.  An AISLE without rules permits all four
//! exits; START and END are never restricted.
//!
//! The layout-level `movement_rules` field is carried for the editor (it is
//! the default applied to freshly painted aisles) but routing never reads
//! it.  Validation reports a warning when it is set.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{Coord, CoreError, CoreResult, Direction, LayoutId, LocationId};

// ── CellType ──────────────────────────────────────────────────────────────────

/// What occupies a grid cell.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CellType {
    #[default]
    Wall,
    Aisle,
    Pick,
    Start,
    End,
}

impl CellType {
    /// Walkable cells are traversal nodes.  PICK cells are reached only
    /// through their access cell.
    #[inline]
    pub fn is_walkable(self) -> bool {
        matches!(self, CellType::Aisle | CellType::Start | CellType::End)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CellType::Wall  => "WALL",
            CellType::Aisle => "AISLE",
            CellType::Pick  => "PICK",
            CellType::Start => "START",
            CellType::End   => "END",
        }
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── MovementRules ─────────────────────────────────────────────────────────────

/// Which exits of an AISLE cell may be taken.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementRules {
    pub allow_up:    bool,
    pub allow_down:  bool,
    pub allow_left:  bool,
    pub allow_right: bool,
}

impl MovementRules {
    pub const ALL: MovementRules = MovementRules {
        allow_up:    true,
        allow_down:  true,
        allow_left:  true,
        allow_right: true,
    };

    pub const NONE: MovementRules = MovementRules {
        allow_up:    false,
        allow_down:  false,
        allow_left:  false,
        allow_right: false,
    };

    /// Rules permitting exactly one exit.
    pub fn only(dir: Direction) -> Self {
        let mut rules = Self::NONE;
        rules.set(dir, true);
        rules
    }

    #[inline]
    pub fn allows(&self, dir: Direction) -> bool {
        match dir {
            Direction::Up    => self.allow_up,
            Direction::Down  => self.allow_down,
            Direction::Left  => self.allow_left,
            Direction::Right => self.allow_right,
        }
    }

    pub fn set(&mut self, dir: Direction, allowed: bool) {
        match dir {
            Direction::Up    => self.allow_up = allowed,
            Direction::Down  => self.allow_down = allowed,
            Direction::Left  => self.allow_left = allowed,
            Direction::Right => self.allow_right = allowed,
        }
    }

    /// `true` if at least one exit is permitted.
    pub fn any(&self) -> bool {
        self.allow_up || self.allow_down || self.allow_left || self.allow_right
    }
}

impl Default for MovementRules {
    fn default() -> Self {
        Self::ALL
    }
}

// ── Cells ─────────────────────────────────────────────────────────────────────

/// Pick location exposed by a PICK cell.
///
/// `access_cell` is the walkable 4-neighbour the picker stands on.
#[derive(Clone, PartialEq, Eq, Debug)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickMeta {
    pub location_id: LocationId,
    pub access_cell: Coord,
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    #[serde(rename = "type")]
    pub cell_type: CellType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movement: Option<MovementRules>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pick: Option<PickMeta>,
}

impl Cell {
    pub fn wall() -> Self {
        Self::default()
    }

    /// Two-way aisle.
    pub fn aisle() -> Self {
        Self { cell_type: CellType::Aisle, movement: Some(MovementRules::ALL), pick: None }
    }

    pub fn aisle_with(rules: MovementRules) -> Self {
        Self { cell_type: CellType::Aisle, movement: Some(rules), pick: None }
    }

    pub fn start() -> Self {
        Self { cell_type: CellType::Start, ..Self::default() }
    }

    pub fn end() -> Self {
        Self { cell_type: CellType::End, ..Self::default() }
    }

    pub fn pick(location_id: impl Into<LocationId>, access_cell: Coord) -> Self {
        Self {
            cell_type: CellType::Pick,
            movement:  None,
            pick:      Some(PickMeta { location_id: location_id.into(), access_cell }),
        }
    }

    #[inline]
    pub fn is_walkable(&self) -> bool {
        self.cell_type.is_walkable()
    }

    /// Whether this cell lets a picker leave toward `dir`.
    ///
    /// Only AISLE cells with explicit rules are restricted.
    #[inline]
    pub fn allows_exit(&self, dir: Direction) -> bool {
        match (self.cell_type, &self.movement) {
            (CellType::Aisle, Some(rules)) => rules.allows(dir),
            _ => true,
        }
    }
}

// ── Layout ────────────────────────────────────────────────────────────────────

/// A warehouse grid plus the metadata the layout store keeps with it.
#[derive(Clone, PartialEq, Debug)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub layout_id: LayoutId,
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Row-major: `grid_data[y][x]`.
    pub grid_data: Vec<Vec<Cell>>,
    /// Editor default for new aisles.  Not consulted by routing.
    #[serde(default = "MovementRules::default")]
    pub movement_rules: MovementRules,
}

impl Layout {
    /// An all-WALL grid.
    pub fn new(layout_id: impl Into<LayoutId>, name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            layout_id: layout_id.into(),
            name: name.into(),
            width,
            height,
            grid_data: vec![vec![Cell::wall(); width as usize]; height as usize],
            movement_rules: MovementRules::ALL,
        }
    }

    /// Parse an ASCII map, one string per row.
    ///
    /// | Char          | Cell                                        |
    /// |---------------|---------------------------------------------|
    /// | `#`           | WALL                                        |
    /// | `.`           | two-way AISLE                               |
    /// | `>` `<` `^` `v` | one-way AISLE permitting only that exit   |
    /// | `S` / `E`     | START / END                                 |
    /// | `P`           | PICK without metadata (add with `set_pick`) |
    ///
    /// All rows must have the same length.
    pub fn from_rows(layout_id: impl Into<LayoutId>, name: impl Into<String>, rows: &[&str]) -> CoreResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());

        let mut grid_data = Vec::with_capacity(height);
        for (y, row) in rows.iter().enumerate() {
            let cells: Vec<Cell> = row
                .chars()
                .enumerate()
                .map(|(x, ch)| match ch {
                    '#' => Ok(Cell::wall()),
                    '.' => Ok(Cell::aisle()),
                    '>' => Ok(Cell::aisle_with(MovementRules::only(Direction::Right))),
                    '<' => Ok(Cell::aisle_with(MovementRules::only(Direction::Left))),
                    '^' => Ok(Cell::aisle_with(MovementRules::only(Direction::Up))),
                    'v' => Ok(Cell::aisle_with(MovementRules::only(Direction::Down))),
                    'S' => Ok(Cell::start()),
                    'E' => Ok(Cell::end()),
                    'P' => Ok(Cell { cell_type: CellType::Pick, ..Cell::default() }),
                    other => Err(CoreError::Grid(format!("unknown cell char {other:?} at {x},{y}"))),
                })
                .collect::<CoreResult<_>>()?;
            if cells.len() != width {
                return Err(CoreError::Grid(format!(
                    "row {y} has {} cells, expected {width}",
                    cells.len()
                )));
            }
            grid_data.push(cells);
        }

        Ok(Self {
            layout_id: layout_id.into(),
            name: name.into(),
            width: width as u32,
            height: height as u32,
            grid_data,
            movement_rules: MovementRules::ALL,
        })
    }

    // ── Cell access ───────────────────────────────────────────────────────

    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        c.x >= 0 && c.y >= 0 && (c.x as u32) < self.width && (c.y as u32) < self.height
    }

    /// The cell at `c`, or `None` if `c` is outside the grid (or the stored
    /// matrix is shorter than `width × height`).
    #[inline]
    pub fn cell(&self, c: Coord) -> Option<&Cell> {
        if !self.contains(c) {
            return None;
        }
        self.grid_data.get(c.y as usize)?.get(c.x as usize)
    }

    pub fn cell_mut(&mut self, c: Coord) -> Option<&mut Cell> {
        if !self.contains(c) {
            return None;
        }
        self.grid_data.get_mut(c.y as usize)?.get_mut(c.x as usize)
    }

    pub fn set_cell(&mut self, c: Coord, cell: Cell) -> CoreResult<()> {
        let (width, height) = (self.width, self.height);
        let slot = self
            .cell_mut(c)
            .ok_or(CoreError::OutOfBounds { coord: c, width, height })?;
        *slot = cell;
        Ok(())
    }

    /// Turn `c` into an AISLE.  `None` permits all four exits.
    pub fn set_aisle(&mut self, c: Coord, rules: Option<MovementRules>) -> CoreResult<()> {
        self.set_cell(c, rules.map_or_else(Cell::aisle, Cell::aisle_with))
    }

    /// Turn `c` into a PICK cell exposing `location_id` through `access_cell`.
    pub fn set_pick(&mut self, c: Coord, location_id: impl Into<LocationId>, access_cell: Coord) -> CoreResult<()> {
        self.set_cell(c, Cell::pick(location_id, access_cell))
    }

    /// Iterate `(coord, cell)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, &Cell)> + '_ {
        self.grid_data.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, cell)| (Coord::new(x as i32, y as i32), cell))
        })
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// All coordinates holding `kind`, row-major.
    pub fn find_all(&self, kind: CellType) -> Vec<Coord> {
        self.cells()
            .filter(|(_, cell)| cell.cell_type == kind)
            .map(|(c, _)| c)
            .collect()
    }

    /// First coordinate holding `kind` in row-major order.
    pub fn find_single(&self, kind: CellType) -> Option<Coord> {
        self.cells().find(|(_, cell)| cell.cell_type == kind).map(|(c, _)| c)
    }

    /// The START and END coordinates.
    ///
    /// Errors unless exactly one of each exists.
    pub fn start_end(&self) -> CoreResult<(Coord, Coord)> {
        Ok((self.exactly_one(CellType::Start)?, self.exactly_one(CellType::End)?))
    }

    fn exactly_one(&self, kind: CellType) -> CoreResult<Coord> {
        match self.find_all(kind).as_slice() {
            [] => Err(CoreError::MissingCell(kind)),
            [only] => Ok(*only),
            many => Err(CoreError::DuplicateCell { kind, count: many.len() }),
        }
    }

    /// `location_id → access_cell` for every PICK cell with a non-blank
    /// location id.
    ///
    /// A duplicated location id (a validation error) resolves to the last
    /// occurrence in row-major order.
    pub fn access_by_location(&self) -> FxHashMap<LocationId, Coord> {
        let mut map = FxHashMap::default();
        for (_, cell) in self.cells() {
            if cell.cell_type != CellType::Pick {
                continue;
            }
            if let Some(pick) = &cell.pick {
                if !pick.location_id.is_blank() {
                    map.insert(pick.location_id.clone(), pick.access_cell);
                }
            }
        }
        map
    }
}
