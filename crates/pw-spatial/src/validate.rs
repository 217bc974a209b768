//! Structural checks a caller runs on a layout before simulating.
//!
//! Errors describe layouts the engine cannot route correctly (wrong number
//! of START/END cells, broken pick metadata).  Warnings describe layouts
//! that route but probably not as the author intended: unreachable pick
//! locations and the unused layout-level movement defaults.
//!
//! Messages are user-facing and kept in the same language as the run
//! diagnostics.

use rustc_hash::FxHashMap;

use pw_core::{CellType, Coord, Layout, LocationId};

use crate::graph::LayoutGraph;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IssueLevel {
    Error,
    Warning,
}

/// One validation finding.  `id` is stable for a given cause and cell so a
/// UI can key on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutIssue {
    pub id:      String,
    pub level:   IssueLevel,
    pub message: String,
    pub cell:    Option<Coord>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayoutValidation {
    pub errors:   Vec<LayoutIssue>,
    pub warnings: Vec<LayoutIssue>,
}

impl LayoutValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, id: String, message: String, cell: Option<Coord>) {
        self.errors.push(LayoutIssue { id, level: IssueLevel::Error, message, cell });
    }

    fn warning(&mut self, id: String, message: String, cell: Option<Coord>) {
        self.warnings.push(LayoutIssue { id, level: IssueLevel::Warning, message, cell });
    }
}

struct PickSite {
    coord:       Coord,
    label:       String,
    access_cell: Option<Coord>,
}

/// Check `layout` and collect every error and warning.
pub fn validate_layout(layout: &Layout) -> LayoutValidation {
    let mut out = LayoutValidation::default();

    let mut starts = Vec::new();
    let mut ends = Vec::new();
    let mut seen_ids: FxHashMap<LocationId, Coord> = FxHashMap::default();
    let mut picks = Vec::new();

    for (c, cell) in layout.cells() {
        match cell.cell_type {
            CellType::Start => {
                starts.push(c);
                continue;
            }
            CellType::End => {
                ends.push(c);
                continue;
            }
            CellType::Pick => {}
            _ => continue,
        }

        let (x, y) = (c.x, c.y);
        let location = cell.pick.as_ref().map(|p| p.location_id.clone()).filter(|id| !id.is_blank());
        match &location {
            None => out.error(
                format!("pick-location-required-{x}-{y}"),
                format!("PICK en ({x},{y}) sin locationId."),
                Some(c),
            ),
            Some(id) if seen_ids.contains_key(id) => out.error(
                format!("pick-location-duplicated-{id}-{x}-{y}"),
                format!("locationId duplicado: {id}."),
                Some(c),
            ),
            Some(id) => {
                seen_ids.insert(id.clone(), c);
            }
        }

        picks.push(PickSite {
            coord:       c,
            label:       location.map_or_else(|| format!("({x},{y})"), |id| id.to_string()),
            access_cell: cell.pick.as_ref().map(|p| p.access_cell),
        });
    }

    if starts.len() != 1 {
        out.error(
            "start-count".into(),
            format!("Debe existir exactamente 1 START (actual: {}).", starts.len()),
            starts.first().copied(),
        );
    }
    if ends.len() != 1 {
        out.error(
            "end-count".into(),
            format!("Debe existir exactamente 1 END (actual: {}).", ends.len()),
            ends.first().copied(),
        );
    }

    if layout.movement_rules.any() {
        out.warning(
            "movement-rules-outside-grid".into(),
            "movementRules globales están activas, pero no se usan en el pathfinding.".into(),
            None,
        );
    }

    for pick in &picks {
        let (x, y) = (pick.coord.x, pick.coord.y);
        let Some(access) = pick.access_cell else {
            out.error(
                format!("pick-access-missing-{x}-{y}"),
                format!("PICK {} sin accessCell.", pick.label),
                Some(pick.coord),
            );
            continue;
        };

        let Some(access_cell) = layout.cell(access) else {
            out.error(
                format!("pick-access-outside-{x}-{y}"),
                format!("accessCell de PICK {} está fuera del grid.", pick.label),
                Some(pick.coord),
            );
            continue;
        };

        if !access_cell.is_walkable() {
            out.error(
                format!("pick-access-not-walkable-{x}-{y}"),
                format!("accessCell de PICK {} debe ser transitable (AISLE, START o END).", pick.label),
                Some(access),
            );
        }
        if !pick.coord.is_adjacent(access) {
            out.error(
                format!("pick-access-not-adjacent-{x}-{y}"),
                format!("accessCell de PICK {} debe ser adyacente (4 vecinos).", pick.label),
                Some(pick.coord),
            );
        }
    }

    // Reachability is only meaningful with a single START and a well-formed grid.
    if let ([start], false) = (starts.as_slice(), picks.is_empty()) {
        if let Ok(graph) = LayoutGraph::build(layout) {
            let reachable = graph.reachable_from(*start);
            for pick in &picks {
                let Some(access) = pick.access_cell else { continue };
                if !reachable.contains(&access) {
                    out.warning(
                        format!("pick-unreachable-{}-{}", pick.coord.x, pick.coord.y),
                        format!("PICK {} no es alcanzable desde START según el grafo dirigido.", pick.label),
                        Some(pick.coord),
                    );
                }
            }
        }
    }

    out
}
