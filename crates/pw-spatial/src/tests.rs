//! Unit tests for pw-spatial.
//!
//! All tests use hand-drawn ASCII layouts (see `Layout::from_rows`).

#[cfg(test)]
mod helpers {
    use pw_core::Layout;

    use crate::LayoutGraph;

    pub fn layout(rows: &[&str]) -> Layout {
        Layout::from_rows("L-test", "test", rows).unwrap()
    }

    pub fn graph(rows: &[&str]) -> LayoutGraph {
        LayoutGraph::build(&layout(rows)).unwrap()
    }

    /// Every consecutive pair of `cells` must be a directed edge.
    pub fn assert_walkable(g: &LayoutGraph, cells: &[pw_core::Coord]) {
        for pair in cells.windows(2) {
            assert!(
                g.neighbors(pair[0]).any(|n| n == pair[1]),
                "{} -> {} is not an edge",
                pair[0],
                pair[1]
            );
        }
    }
}

// ── Graph construction ────────────────────────────────────────────────────────

#[cfg(test)]
mod graph {
    use pw_core::{Cell, Coord, Layout};

    use super::helpers::graph;
    use crate::{LayoutGraph, SpatialError};

    #[test]
    fn walls_and_picks_are_not_nodes() {
        let g = graph(&["S#P", "..E"]);
        assert!(g.is_node(Coord::new(0, 0)));
        assert!(!g.is_node(Coord::new(1, 0)));
        assert!(!g.is_node(Coord::new(2, 0)));
        assert!(g.is_node(Coord::new(2, 1)));
        assert_eq!(g.node_count(), 4);
    }

    #[test]
    fn open_aisle_links_both_ways() {
        let g = graph(&["..."]);
        assert_eq!(g.out_degree(Coord::new(1, 0)), 2);
        assert_eq!(g.out_degree(Coord::new(0, 0)), 1);
        assert_eq!(g.edge_count(), 4);
    }

    #[test]
    fn one_way_edges_are_asymmetric() {
        // (0,0) may only move right; (1,0) is two-way.
        let g = graph(&[">."]);
        let from_first: Vec<_> = g.neighbors(Coord::new(0, 0)).collect();
        let from_second: Vec<_> = g.neighbors(Coord::new(1, 0)).collect();
        assert_eq!(from_first, [Coord::new(1, 0)]);
        assert_eq!(from_second, [Coord::new(0, 0)]);
    }

    #[test]
    fn rules_belong_to_the_source_cell() {
        // (1,0) blocks every exit, but (0,0) may still enter it.
        let mut layout = super::helpers::layout(&["..", ".."]);
        layout.set_cell(Coord::new(1, 0), Cell::aisle_with(pw_core::MovementRules::NONE)).unwrap();
        let g = LayoutGraph::build(&layout).unwrap();
        assert_eq!(g.out_degree(Coord::new(1, 0)), 0);
        assert!(g.neighbors(Coord::new(0, 0)).any(|n| n == Coord::new(1, 0)));
    }

    #[test]
    fn start_and_end_ignore_rules() {
        let g = graph(&[".S.", ".E."]);
        assert_eq!(g.out_degree(Coord::new(1, 0)), 3);
        assert_eq!(g.out_degree(Coord::new(1, 1)), 3);
    }

    #[test]
    fn neighbor_order_is_up_down_left_right() {
        let g = graph(&["...", "...", "..."]);
        let around: Vec<_> = g.neighbors(Coord::new(1, 1)).collect();
        assert_eq!(
            around,
            [Coord::new(1, 0), Coord::new(1, 2), Coord::new(0, 1), Coord::new(2, 1)]
        );
    }

    #[test]
    fn malformed_grid_is_rejected() {
        let mut layout = Layout::new("L", "bad", 3, 2);
        layout.grid_data[1].pop();
        assert!(matches!(
            LayoutGraph::build(&layout),
            Err(SpatialError::MalformedGrid { .. })
        ));
    }

    #[test]
    fn reachability_follows_directed_edges() {
        let g = graph(&["S>.<E"]);
        let reach = g.reachable_from(Coord::new(0, 0));
        assert!(reach.contains(&Coord::new(2, 0)));
        assert!(!reach.contains(&Coord::new(4, 0)));
        assert!(g.reachable_from(Coord::new(-1, 0)).is_empty());
    }
}

// ── Routing ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use pw_core::Coord;

    use super::helpers::{assert_walkable, graph};
    use crate::{find_path, AStarRouter, BfsRouter, Router, SpatialError};

    #[test]
    fn straight_aisle() {
        let g = graph(&["..."]);
        let path = find_path(&g, Coord::new(0, 0), Coord::new(2, 0)).unwrap();
        assert_eq!(path.cells, [Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)]);
        assert_eq!(path.len(), 3);
        assert_eq!(path.cost(), 2);
    }

    #[test]
    fn one_way_blocks_the_return_leg() {
        // (0,0) may only exit right, (1,0) may not exit at all.
        let mut layout = super::helpers::layout(&[">."]);
        layout
            .set_cell(Coord::new(1, 0), pw_core::Cell::aisle_with(pw_core::MovementRules::NONE))
            .unwrap();
        let g = crate::LayoutGraph::build(&layout).unwrap();

        assert!(find_path(&g, Coord::new(0, 0), Coord::new(1, 0)).is_some());
        assert!(find_path(&g, Coord::new(1, 0), Coord::new(0, 0)).is_none());
    }

    #[test]
    fn same_cell_is_a_one_cell_path() {
        let g = graph(&["S.E"]);
        let path = find_path(&g, Coord::new(1, 0), Coord::new(1, 0)).unwrap();
        assert!(path.is_trivial());
        assert_eq!(path.cost(), 0);
    }

    #[test]
    fn non_node_endpoints_have_no_route() {
        let g = graph(&["S#E"]);
        let err = AStarRouter.route(&g, Coord::new(0, 0), Coord::new(1, 0)).unwrap_err();
        assert!(matches!(err, SpatialError::NoRoute { .. }));
        assert!(find_path(&g, Coord::new(0, 0), Coord::new(9, 9)).is_none());
    }

    #[test]
    fn detours_around_walls() {
        let g = graph(&[
            "S.#..",
            "..#..",
            ".....",
            "....E",
        ]);
        let path = find_path(&g, Coord::new(0, 0), Coord::new(4, 0)).unwrap();
        assert_walkable(&g, &path.cells);
        // Down two, across four, up two.
        assert_eq!(path.cost(), 8);
    }

    #[test]
    fn one_way_loop_forces_long_way_round() {
        // Top row flows right, bottom row flows left: a clockwise loop.
        let g = graph(&[
            ">>>v",
            "^<<<",
        ]);
        let path = find_path(&g, Coord::new(3, 1), Coord::new(2, 1)).unwrap();
        assert_eq!(path.cost(), 1);
        let back = find_path(&g, Coord::new(2, 1), Coord::new(3, 1)).unwrap();
        // (2,1) ← … ← must go left, up, right across the top, and down.
        assert_eq!(back.cost(), 7);
        assert_walkable(&g, &back.cells);
    }

    #[test]
    fn astar_is_deterministic() {
        let g = graph(&[".....", ".....", "....."]);
        let a = find_path(&g, Coord::new(0, 0), Coord::new(4, 2)).unwrap();
        let b = find_path(&g, Coord::new(0, 0), Coord::new(4, 2)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn bfs_agrees_on_length() {
        let g = graph(&["S...", ".##.", "...E"]);
        let a = AStarRouter.route(&g, Coord::new(0, 0), Coord::new(3, 2)).unwrap();
        let b = BfsRouter.route(&g, Coord::new(0, 0), Coord::new(3, 2)).unwrap();
        assert_eq!(a.len(), b.len());
    }
}

// ── A* optimality property ────────────────────────────────────────────────────

#[cfg(test)]
mod optimality {
    use proptest::prelude::*;

    use pw_core::{Cell, Coord, Layout, MovementRules};

    use super::helpers::assert_walkable;
    use crate::{AStarRouter, BfsRouter, LayoutGraph, Router};

    /// Random layout: each cell is a wall (~25 %) or an aisle with random
    /// exit rules biased toward open.
    fn layout_strategy() -> impl Strategy<Value = Layout> {
        (1u32..7, 1u32..7).prop_flat_map(|(w, h)| {
            prop::collection::vec((0u8..4, any::<[bool; 4]>(), prop::bool::weighted(0.6)), (w * h) as usize)
                .prop_map(move |cells| {
                    let mut layout = Layout::new("L-prop", "prop", w, h);
                    for (i, (kind, rules, open)) in cells.into_iter().enumerate() {
                        let c = Coord::new((i as u32 % w) as i32, (i as u32 / w) as i32);
                        let cell = if kind == 0 {
                            Cell::wall()
                        } else if open {
                            Cell::aisle()
                        } else {
                            Cell::aisle_with(MovementRules {
                                allow_up:    rules[0],
                                allow_down:  rules[1],
                                allow_left:  rules[2],
                                allow_right: rules[3],
                            })
                        };
                        layout.set_cell(c, cell).unwrap();
                    }
                    layout
                })
        })
    }

    proptest! {
        #[test]
        fn astar_matches_bfs_hop_count(
            layout in layout_strategy(),
            sx in 0i32..7, sy in 0i32..7, gx in 0i32..7, gy in 0i32..7,
        ) {
            let graph = LayoutGraph::build(&layout).unwrap();
            let (from, to) = (Coord::new(sx, sy), Coord::new(gx, gy));

            let astar = AStarRouter.route(&graph, from, to).ok();
            let bfs = BfsRouter.route(&graph, from, to).ok();

            prop_assert_eq!(astar.is_some(), bfs.is_some());
            if let (Some(a), Some(b)) = (astar, bfs) {
                prop_assert_eq!(a.len(), b.len());
                prop_assert_eq!(a.first(), Some(from));
                prop_assert_eq!(a.last(), Some(to));
                assert_walkable(&graph, &a.cells);
            }
        }
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod validation {
    use pw_core::{Coord, MovementRules};

    use super::helpers::layout;
    use crate::{validate_layout, IssueLevel};

    fn ids(issues: &[crate::LayoutIssue]) -> Vec<&str> {
        issues.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn clean_layout_has_no_errors() {
        let mut l = layout(&["S..E", "#P##"]);
        l.set_pick(Coord::new(1, 1), "A-01", Coord::new(1, 0)).unwrap();
        l.movement_rules = MovementRules::NONE;
        let v = validate_layout(&l);
        assert!(v.is_valid(), "{:?}", v.errors);
        assert!(v.warnings.is_empty());
    }

    #[test]
    fn start_and_end_counts() {
        let v = validate_layout(&layout(&["SS.."]));
        assert_eq!(ids(&v.errors), ["start-count", "end-count"]);
        assert!(v.errors.iter().all(|e| e.level == IssueLevel::Error));
    }

    #[test]
    fn global_rules_warning() {
        let v = validate_layout(&layout(&["S.E"]));
        assert_eq!(ids(&v.warnings), ["movement-rules-outside-grid"]);
    }

    #[test]
    fn pick_metadata_errors() {
        let mut l = layout(&["S...E", "PPPP#"]);
        l.movement_rules = MovementRules::NONE;
        // (0,1) has no metadata at all.
        l.set_pick(Coord::new(1, 1), "A", Coord::new(1, 0)).unwrap();
        l.set_pick(Coord::new(2, 1), "A", Coord::new(2, 0)).unwrap();
        l.set_pick(Coord::new(3, 1), "B", Coord::new(4, 1)).unwrap();
        let v = validate_layout(&l);
        assert_eq!(
            ids(&v.errors),
            [
                "pick-location-required-0-1",
                "pick-location-duplicated-A-2-1",
                "pick-access-missing-0-1",
                "pick-access-not-walkable-3-1",
            ]
        );
    }

    #[test]
    fn access_cell_outside_and_not_adjacent() {
        let mut l = layout(&["S..E", "PP##"]);
        l.movement_rules = MovementRules::NONE;
        l.set_pick(Coord::new(0, 1), "A", Coord::new(0, 5)).unwrap();
        l.set_pick(Coord::new(1, 1), "B", Coord::new(3, 0)).unwrap();
        let v = validate_layout(&l);
        assert_eq!(
            ids(&v.errors),
            ["pick-access-outside-0-1", "pick-access-not-adjacent-1-1"]
        );
    }

    #[test]
    fn unreachable_pick_warning() {
        // The one-way cell next to START only leads back to it.
        let mut l = layout(&["S<.E", "##P#"]);
        l.movement_rules = MovementRules::NONE;
        l.set_pick(Coord::new(2, 1), "FAR", Coord::new(2, 0)).unwrap();
        let v = validate_layout(&l);
        assert!(v.is_valid());
        assert_eq!(ids(&v.warnings), ["pick-unreachable-2-1"]);
    }
}
