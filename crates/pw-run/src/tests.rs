//! Unit tests for pw-run.

#[cfg(test)]
mod helpers {
    use chrono::{DateTime, TimeZone, Utc};

    use pw_core::{Coord, Layout, PalletLine, SkuMaster, SkuMasterRow};

    /// ```text
    /// y0  # A # B #
    /// y1  S . . . E
    /// ```
    /// A = LOC-A (access 1,1), B = LOC-B (access 3,1).
    pub fn corridor() -> Layout {
        let mut layout = Layout::from_rows("L-1", "Bodega Norte", &["#P#P#", "S...E"]).unwrap();
        layout.set_pick(Coord::new(1, 0), "LOC-A", Coord::new(1, 1)).unwrap();
        layout.set_pick(Coord::new(3, 0), "LOC-B", Coord::new(3, 1)).unwrap();
        layout
    }

    /// `a` → LOC-A at sequence 2, `b` → LOC-B at sequence 1, `c` → a
    /// location the layout does not have.
    pub fn master() -> SkuMaster {
        SkuMaster::with_created_at(
            "SM-1",
            "Maestro 2024",
            vec![
                SkuMasterRow::new("a", "LOC-A", 2.0),
                SkuMasterRow::new("b", "LOC-B", 1.0),
                SkuMasterRow::new("c", "LOC-GONE", 3.0),
            ],
            fixed_time(),
        )
    }

    pub fn lines(pairs: &[(&str, &str)]) -> Vec<PalletLine> {
        pairs.iter().map(|&(p, s)| PalletLine::new(p, s)).collect()
    }

    pub fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 9, 7, 0).unwrap()
    }

    pub fn c(x: i32, y: i32) -> Coord {
        Coord::new(x, y)
    }
}

// ── Grouping ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod grouping {
    use super::helpers::lines;
    use crate::sim::group_pallets;

    #[test]
    fn first_seen_order_and_dedupe() {
        let groups = group_pallets(&lines(&[("P2", "x"), ("P1", "a"), ("P2", "y"), ("P2", "x"), ("P1", "a")]));
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].pallet_id.as_str(), "P2");
        let skus: Vec<_> = groups[0].skus.iter().map(|s| s.as_str()).collect();
        assert_eq!(skus, ["x", "y"]);
        assert_eq!(groups[1].skus.len(), 1);
    }

    #[test]
    fn ids_are_trimmed() {
        let groups = group_pallets(&lines(&[(" P1", "a "), ("P1 ", " a")]));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].pallet_id.as_str(), "P1");
        assert_eq!(groups[0].skus.len(), 1);
        assert_eq!(groups[0].skus[0].as_str(), "a");
    }
}

// ── Per-pallet routing ────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use super::helpers::{c, corridor, lines, master};
    use crate::{RunBuilder, RunOptions};

    #[test]
    fn stops_follow_sequence_not_input_order() {
        let layout = corridor();
        let master = master();
        let input = lines(&[("P1", "a"), ("P1", "b")]);
        let build = RunBuilder::new(&layout, &master, &input)
            .options(RunOptions { record_visited: true, ..Default::default() })
            .build()
            .unwrap();

        let pallet = &build.run.pallet_results[0];
        let order: Vec<_> = pallet.stops.iter().map(|s| s.location_id.as_str()).collect();
        assert_eq!(order, ["LOC-B", "LOC-A"]);
        assert!(pallet.is_ok());
        assert!(pallet.has_path);
        // S→B 4 cells, B→A 2 more, A→E 3 more.
        assert_eq!(pallet.steps, 9);
        assert_eq!(
            pallet.visited.as_deref().unwrap(),
            [c(0, 1), c(1, 1), c(2, 1), c(3, 1), c(2, 1), c(1, 1), c(2, 1), c(3, 1), c(4, 1)]
        );

        let row = &build.run.heatmap_steps[1];
        assert_eq!(row, &[1, 2, 3, 2, 1]);
        assert!(build.run.heatmap_steps[0].iter().all(|&v| v == 0));
        assert_eq!(build.run.max_heat(), 3);
    }

    #[test]
    fn missing_mapping_is_an_issue_not_an_error() {
        let layout = corridor();
        let master = master();
        let input = lines(&[("P1", "zzz"), ("P1", "a")]);
        let build = RunBuilder::new(&layout, &master, &input).build().unwrap();

        let pallet = &build.run.pallet_results[0];
        assert_eq!(pallet.sku_count, 2);
        assert_eq!(pallet.missing_sku_count, 1);
        assert_eq!(pallet.issues, ["SKU zzz sin mapping en SKU Master"]);
        assert!(pallet.has_path);
        assert_eq!(pallet.stops.len(), 1);
        assert_eq!(pallet.steps, 5);
        assert_eq!(build.warnings.missing_sku_mappings, 1);
        assert_eq!(build.warnings.pallets_with_issues, 1);
        assert_eq!(build.warnings.pallets_without_path, 0);
    }

    #[test]
    fn unknown_location_is_skipped() {
        let layout = corridor();
        let master = master();
        let input = lines(&[("P1", "c")]);
        let build = RunBuilder::new(&layout, &master, &input).build().unwrap();

        let pallet = &build.run.pallet_results[0];
        assert_eq!(pallet.missing_sku_count, 0);
        assert_eq!(
            pallet.issues,
            ["Ubicación LOC-GONE (SKU c) no existe o no es accesible en layout"]
        );
        assert!(pallet.stops.is_empty());
        // Still walks START → END.
        assert_eq!(pallet.steps, 5);
        assert!(!pallet.is_playable());
    }

    #[test]
    fn unroutable_leg_clears_has_path() {
        let mut layout = corridor();
        // LOC-A now opens onto a wall.
        layout.set_pick(c(1, 0), "LOC-A", c(0, 0)).unwrap();
        let master = master();
        let input = lines(&[("P1", "a")]);
        let build = RunBuilder::new(&layout, &master, &input).build().unwrap();

        let pallet = &build.run.pallet_results[0];
        assert!(!pallet.has_path);
        assert_eq!(pallet.issues, ["Sin ruta entre 0,1 y 0,0", "Sin ruta entre 0,0 y 4,1"]);
        assert_eq!(pallet.steps, 0);
        assert_eq!(build.run.max_heat(), 0);
        assert_eq!(build.warnings.pallets_without_path, 1);
    }

    #[test]
    fn steps_match_visited_and_heatmap_total() {
        let layout = corridor();
        let master = master();
        let input = lines(&[("P1", "a"), ("P1", "b"), ("P2", "b"), ("P3", "zzz"), ("P4", "c")]);
        let build = RunBuilder::new(&layout, &master, &input)
            .options(RunOptions { record_visited: true, ..Default::default() })
            .build()
            .unwrap();

        let heat: u32 = build.run.heatmap_steps.iter().flatten().sum();
        assert_eq!(heat as usize, build.run.summary.total_steps);
        for p in &build.run.pallet_results {
            assert_eq!(p.visited.as_ref().map(Vec::len), Some(p.steps));
            assert!(p.missing_sku_count <= p.sku_count);
        }
    }

    #[test]
    fn visited_is_omitted_by_default() {
        let layout = corridor();
        let master = master();
        let input = lines(&[("P1", "a")]);
        let build = RunBuilder::new(&layout, &master, &input).build().unwrap();
        assert!(build.run.pallet_results[0].visited.is_none());
    }
}

// ── Summary and determinism ───────────────────────────────────────────────────

#[cfg(test)]
mod summary {
    use super::helpers::{corridor, fixed_time, lines, master};
    use crate::{RunBuilder, RunSummary};

    #[test]
    fn summary_counts() {
        let layout = corridor();
        let master = master();
        let input = lines(&[("P1", "a"), ("P2", "zzz"), ("P3", "b")]);
        let run = RunBuilder::new(&layout, &master, &input).build().unwrap().run;

        assert_eq!(run.summary.total_pallets, 3);
        assert_eq!(run.summary.ok_pallets, 2);
        assert_eq!(run.summary.error_pallets, 1);
        assert_eq!(run.summary.total_steps, 15);
        assert!((run.summary.avg_steps - 5.0).abs() < 1e-9);
        let order: Vec<_> = run.pallet_order.iter().map(|p| p.as_str()).collect();
        assert_eq!(order, ["P1", "P2", "P3"]);
    }

    #[test]
    fn empty_summary_has_zero_average() {
        assert_eq!(RunSummary::from_pallets(&[]).avg_steps, 0.0);
    }

    #[test]
    fn repeated_builds_share_content() {
        let layout = corridor();
        let master = master();
        let input = lines(&[("P1", "a"), ("P1", "b"), ("P2", "zzz"), ("P2", "b")]);
        let first = RunBuilder::new(&layout, &master, &input).now(fixed_time()).build().unwrap().run;
        let second = RunBuilder::new(&layout, &master, &input).now(fixed_time()).build().unwrap().run;

        assert!(first.same_content(&second));
        assert_eq!(first.name, second.name);
        assert_ne!(first.run_id, second.run_id);
    }

    #[test]
    fn hashes_are_recorded() {
        let layout = corridor();
        let master = master();
        let input = lines(&[("P1", "a")]);
        let run = RunBuilder::new(&layout, &master, &input).build().unwrap().run;
        assert_eq!(run.layout_hash, pw_core::layout_hash(&layout).unwrap());
        assert_eq!(run.sku_master_hash, pw_core::sku_master_hash(&master).unwrap());
    }

    #[test]
    fn run_serializes_in_camel_case() {
        let layout = corridor();
        let master = master();
        let input = lines(&[("P1", "a")]);
        let run = RunBuilder::new(&layout, &master, &input).build().unwrap().run;
        let json = serde_json::to_value(&run).unwrap();
        assert!(json.get("heatmapSteps").is_some());
        assert!(json["summary"].get("avgSteps").is_some());
        assert!(json["palletResults"][0].get("visited").is_none());
    }
}

// ── Fatal errors ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod fatal {
    use pw_core::{Cell, Layout};

    use super::helpers::{c, corridor, lines, master};
    use crate::{RunBuildError, RunBuildErrorKind, RunBuilder};

    #[test]
    fn empty_lines() {
        let layout = corridor();
        let master = master();
        let err = RunBuilder::new(&layout, &master, &[]).build().unwrap_err();
        assert_eq!(err.kind, RunBuildErrorKind::Validation);
    }

    #[test]
    fn missing_end() {
        let mut layout = corridor();
        layout.set_cell(c(4, 1), Cell::aisle()).unwrap();
        let master = master();
        let input = lines(&[("P1", "a")]);
        let err = RunBuilder::new(&layout, &master, &input).build().unwrap_err();
        assert_eq!(err.kind, RunBuildErrorKind::Validation);
        assert_eq!(err.message, "Layout inválido: se requiere 1 START y 1 END.");
    }

    #[test]
    fn duplicate_start() {
        let layout = Layout::from_rows("L-2", "dup", &["S.S.E"]).unwrap();
        let master = master();
        let input = lines(&[("P1", "a")]);
        let err = RunBuilder::new(&layout, &master, &input).build().unwrap_err();
        assert_eq!(err.kind, RunBuildErrorKind::Validation);
    }

    #[test]
    fn blank_rows_list_every_offender() {
        let layout = corridor();
        let master = master();
        let input = lines(&[("P1", "a"), ("  ", "b"), ("P2", "")]);
        let err = RunBuilder::new(&layout, &master, &input).build().unwrap_err();
        assert_eq!(err.kind, RunBuildErrorKind::Data);
        assert_eq!(err.details, ["Fila 2: pallet_id o sku vacío.", "Fila 3: pallet_id o sku vacío."]);
    }

    #[test]
    fn malformed_grid_is_a_routing_error() {
        let mut layout = corridor();
        layout.width += 1;
        let master = master();
        let input = lines(&[("P1", "a")]);
        let err = RunBuilder::new(&layout, &master, &input).build().unwrap_err();
        assert_eq!(err.kind, RunBuildErrorKind::Routing);
        assert_eq!(err.details.len(), 1);
    }

    #[test]
    fn report_sections() {
        let err = RunBuildError::data("El archivo contiene filas inválidas.")
            .with_details(["Fila 2: pallet_id o sku vacío.".to_string()])
            .with_context("lineCount", 3);
        let report = err.report();
        assert!(report.starts_with("kind: data\n\nmessage: El archivo contiene filas inválidas."));
        assert!(report.contains("details:\n- Fila 2: pallet_id o sku vacío."));
        assert!(report.contains("\"lineCount\": \"3\""));
    }

    #[test]
    fn report_omits_empty_sections() {
        let report = RunBuildError::validation("x").report();
        assert_eq!(report, "kind: validation\n\nmessage: x");
    }
}

// ── Segment cache ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod cache {
    use std::sync::Arc;

    use pw_spatial::{AStarRouter, LayoutGraph};

    use super::helpers::{c, corridor};
    use crate::{CacheStats, SegmentCache};

    #[test]
    fn second_lookup_hits() {
        let graph = LayoutGraph::build(&corridor()).unwrap();
        let hash: Arc<str> = Arc::from("layout-x");
        let mut cache = SegmentCache::new();

        let first = cache.leg(&AStarRouter, &graph, &hash, c(0, 1), c(4, 1)).map(<[_]>::to_vec);
        let second = cache.leg(&AStarRouter, &graph, &hash, c(0, 1), c(4, 1)).map(<[_]>::to_vec);
        assert_eq!(first, second);
        assert_eq!(first.map(|p| p.len()), Some(5));
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
    }

    #[test]
    fn failures_are_cached() {
        let graph = LayoutGraph::build(&corridor()).unwrap();
        let hash: Arc<str> = Arc::from("layout-x");
        let mut cache = SegmentCache::new();

        assert!(cache.leg(&AStarRouter, &graph, &hash, c(0, 1), c(0, 0)).is_none());
        assert!(cache.leg(&AStarRouter, &graph, &hash, c(0, 1), c(0, 0)).is_none());
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn keys_include_layout_hash() {
        let graph = LayoutGraph::build(&corridor()).unwrap();
        let mut cache = SegmentCache::new();
        cache.leg(&AStarRouter, &graph, &Arc::from("layout-a"), c(0, 1), c(4, 1));
        cache.leg(&AStarRouter, &graph, &Arc::from("layout-b"), c(0, 1), c(4, 1));
        assert_eq!(cache.stats().misses, 2);
        assert_eq!(cache.len(), 2);
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer {
    use super::helpers::{corridor, lines, master};
    use crate::{RunBuilder, RunContext, RunObserver, RunPalletResult, RunResult};

    #[derive(Default)]
    struct Recorder {
        started:  Option<usize>,
        pallets:  Vec<(usize, String)>,
        finished: bool,
    }

    impl RunObserver for Recorder {
        fn on_run_start(&mut self, ctx: &RunContext) {
            self.started = Some(ctx.pallet_count);
        }

        fn on_pallet_end(&mut self, index: usize, pallet: &RunPalletResult) {
            self.pallets.push((index, pallet.pallet_id.to_string()));
        }

        fn on_run_end(&mut self, _run: &RunResult) {
            self.finished = true;
        }
    }

    #[test]
    fn hooks_fire_in_order() {
        let layout = corridor();
        let master = master();
        let input = lines(&[("P1", "a"), ("P2", "b")]);
        let mut rec = Recorder::default();
        RunBuilder::new(&layout, &master, &input).build_with(&mut rec).unwrap();

        assert_eq!(rec.started, Some(2));
        assert_eq!(rec.pallets, [(0, "P1".to_string()), (1, "P2".to_string())]);
        assert!(rec.finished);
    }

    #[test]
    fn failed_builds_are_silent() {
        let layout = corridor();
        let master = master();
        let input = lines(&[("", "a")]);
        let mut rec = Recorder::default();
        assert!(RunBuilder::new(&layout, &master, &input).build_with(&mut rec).is_err());
        assert!(rec.started.is_none());
        assert!(!rec.finished);
    }
}

// ── Naming ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod naming {
    use super::helpers::{corridor, fixed_time, lines, master};
    use crate::{normalize_slug, run_name, RunBuilder, RunOptions};

    #[test]
    fn slug_strips_everything_but_alphanumerics() {
        assert_eq!(normalize_slug("Bodega Norte #2"), "bodeganorte2");
        assert_eq!(normalize_slug("  "), "");
    }

    #[test]
    fn name_format() {
        let name = run_name(fixed_time(), "Bodega Norte", "Maestro 2024", Some("Pedidos Marzo.xlsx"));
        assert_eq!(name, "202403050907_bodeganorte_maestro2024_pedidosmarzo");
        assert_eq!(run_name(fixed_time(), "A", "B", None), "202403050907_a_b");
    }

    #[test]
    fn builder_uses_generated_name_unless_overridden() {
        let layout = corridor();
        let master = master();
        let input = lines(&[("P1", "a")]);

        let run = RunBuilder::new(&layout, &master, &input).now(fixed_time()).build().unwrap().run;
        assert_eq!(run.name, "202403050907_bodeganorte_maestro2024");
        assert_eq!(run.created_at, fixed_time());

        let run = RunBuilder::new(&layout, &master, &input)
            .options(RunOptions { name: Some("manual".into()), ..Default::default() })
            .build()
            .unwrap()
            .run;
        assert_eq!(run.name, "manual");
    }
}

// ── Replay ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod replay {
    use pw_core::Cell;

    use super::helpers::{c, corridor, lines, master};
    use crate::{PalletPaths, RunBuilder, RunOptions};

    #[test]
    fn rebuilt_paths_match_recorded_ones() {
        let layout = corridor();
        let master = master();
        let input = lines(&[("P1", "a"), ("P1", "b"), ("P2", "zzz"), ("P3", "b")]);

        let recorded = RunBuilder::new(&layout, &master, &input)
            .options(RunOptions { record_visited: true, ..Default::default() })
            .build()
            .unwrap()
            .run;
        let bare = RunBuilder::new(&layout, &master, &input).build().unwrap().run;

        let a = PalletPaths::from_run(&layout, &recorded).unwrap();
        let b = PalletPaths::from_run(&layout, &bare).unwrap();
        assert_eq!(a.paths, b.paths);
        assert!(!a.layout_changed);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn unplayable_pallets_get_empty_paths() {
        let layout = corridor();
        let master = master();
        let input = lines(&[("P1", "zzz"), ("P2", "a")]);
        let run = RunBuilder::new(&layout, &master, &input).build().unwrap().run;
        let paths = PalletPaths::from_run(&layout, &run).unwrap();

        assert!(!paths.is_playable(0));
        assert!(paths.path(0).is_empty());
        assert_eq!(paths.max_step(0), 0);
        assert!(paths.is_playable(1));
        assert_eq!(paths.path(1).len(), run.pallet_results[1].steps);
        assert_eq!(paths.max_step(1), 4);
        assert!(!paths.is_playable(9));
    }

    #[test]
    fn changed_layout_is_flagged() {
        let layout = corridor();
        let master = master();
        let input = lines(&[("P1", "a")]);
        let run = RunBuilder::new(&layout, &master, &input).build().unwrap().run;

        let mut edited = layout.clone();
        edited.set_cell(c(2, 0), Cell::aisle()).unwrap();
        let paths = PalletPaths::from_run(&edited, &run).unwrap();
        assert!(paths.layout_changed);
        assert_eq!(paths.path(0).first(), Some(&c(0, 1)));
    }
}
