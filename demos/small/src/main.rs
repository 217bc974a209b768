//! small — end-to-end example for the pickwalk routing engine.
//!
//! Builds a two-aisle warehouse, simulates the same pallet file against two
//! slotting plans, compares them, replays both side by side on a fake
//! clock, and writes a CSV report for the first run.
//!
//! Set `RUST_LOG=debug` to see per-pallet routing.

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Result};
use tracing_subscriber::EnvFilter;

use pw_compare::{comparable, pallet_compare_rows, shared_heatmaps, CompareMode, SummaryDelta};
use pw_core::{CellType, Coord, Layout, LocationId, PalletLine, SkuMaster, SkuMasterRow};
use pw_output::{CsvReportWriter, RunReportObserver};
use pw_player::{visit_counts, DualTimeline, ManualClock, PlaybackEngine, PlayerConfig, PlayerStatus};
use pw_run::{PalletPaths, RunBuilder, RunOptions, RunResult};
use pw_spatial::validate_layout;

// ── Constants ─────────────────────────────────────────────────────────────────

const OUTPUT_DIR: &str = "output/small";
const FRAME_MS:   u64  = 16; // ~60 fps host callback
const SPEED_MS:   u64  = 40;

/// ```text
/// y0  # P P P P P P P P P #
/// y1  S . . . . . . . . . E
/// y2  # P P P P . P P P P #
/// y3  # P P P P . P P P P #
/// y4  # . . . . . . . . . #
/// y5  # P P P P P P P P P #
/// ```
const WAREHOUSE: [&str; 6] = [
    "#PPPPPPPPP#",
    "S.........E",
    "#PPPP.PPPP#",
    "#PPPP.PPPP#",
    "#.........#",
    "#PPPPPPPPP#",
];

const PALLETS_CSV: &str = "\
pallet_id,sku\n\
PAL-001,SKU-03\n\
PAL-001,SKU-17\n\
PAL-001,SKU-30\n\
PAL-002,SKU-01\n\
PAL-002,SKU-02\n\
PAL-003,SKU-25\n\
PAL-003,SKU-12\n\
PAL-003,SKU-25\n\
PAL-004,SKU-99\n\
PAL-005,SKU-08\n\
PAL-005,SKU-33\n\
PAL-005,SKU-20\n\
PAL-005,SKU-05\n\
";

// ── Inputs ────────────────────────────────────────────────────────────────────

/// Fill in pick metadata: racks open onto the aisle next to them.
fn build_layout() -> Result<Layout> {
    let mut layout = Layout::from_rows("WH-1", "Bodega Demo", &WAREHOUSE)?;
    let picks: Vec<Coord> = layout.find_all(CellType::Pick);
    for c in picks {
        let aisle_y = match c.y {
            0 | 2 => 1,
            3 | 5 => 4,
            _ => bail!("unexpected rack row {}", c.y),
        };
        layout.set_pick(c, format!("R{}-{:02}", c.y, c.x), Coord::new(c.x, aisle_y))?;
    }
    Ok(layout)
}

/// Locations in row-major order.
fn locations(layout: &Layout) -> Vec<LocationId> {
    layout
        .cells()
        .filter_map(|(_, cell)| cell.pick.as_ref().map(|p| p.location_id.clone()))
        .collect()
}

/// SKU `i` goes to `slots[i]`; its sequence is its slot position.
fn sku_master(id: &str, name: &str, slots: &[LocationId]) -> SkuMaster {
    let rows = slots
        .iter()
        .enumerate()
        .map(|(i, loc)| SkuMasterRow::new(format!("SKU-{:02}", i + 1), loc.clone(), i as f64))
        .collect();
    SkuMaster::new(id, name, rows)
}

fn load_lines() -> Result<Vec<PalletLine>> {
    let mut rdr = csv::Reader::from_reader(Cursor::new(PALLETS_CSV));
    let lines = rdr.deserialize().collect::<Result<Vec<PalletLine>, _>>()?;
    Ok(lines)
}

fn print_summary(label: &str, run: &RunResult) {
    let s = &run.summary;
    println!(
        "{label}: {}  pallets={} ok={} errors={} steps={} avg={:.2}",
        run.name, s.total_pallets, s.ok_pallets, s.error_pallets, s.total_steps, s.avg_steps
    );
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== small — pickwalk ===");

    // 1. Layout.
    let layout = build_layout()?;
    let validation = validate_layout(&layout);
    println!(
        "Layout {}x{}: {} errors, {} warnings",
        layout.width,
        layout.height,
        validation.errors.len(),
        validation.warnings.len()
    );
    if !validation.is_valid() {
        for issue in &validation.errors {
            eprintln!("  {}: {}", issue.id, issue.message);
        }
        bail!("layout is not valid");
    }

    // 2. Two slotting plans: row-major, and the same SKUs reversed.
    let slots = locations(&layout);
    let master_a = sku_master("SM-A", "Slotting actual", &slots);
    let reversed: Vec<LocationId> = slots.iter().rev().cloned().collect();
    let master_b = sku_master("SM-B", "Slotting invertido", &reversed);
    let lines = load_lines()?;
    println!("{} locations, {} pallet lines", slots.len(), lines.len());
    println!();

    // 3. Simulate.  Run A streams its report to CSV.
    let options = RunOptions {
        source_file_name: Some("pallets_demo.csv".into()),
        record_visited:   true,
        ..Default::default()
    };
    let mut obs = RunReportObserver::new(CsvReportWriter::new(Path::new(OUTPUT_DIR))?);
    let t0 = Instant::now();
    let build_a = RunBuilder::new(&layout, &master_a, &lines)
        .options(options.clone())
        .build_with(&mut obs)
        .map_err(|e| anyhow::anyhow!(e.report()))?;
    let build_b = RunBuilder::new(&layout, &master_b, &lines)
        .options(options)
        .build()
        .map_err(|e| anyhow::anyhow!(e.report()))?;
    println!("Simulated both runs in {:.3} ms", t0.elapsed().as_secs_f64() * 1e3);
    if let Some(e) = obs.take_error() {
        eprintln!("report error: {e}");
    }

    let (run_a, run_b) = (&build_a.run, &build_b.run);
    print_summary("A", run_a);
    print_summary("B", run_b);
    println!(
        "Warnings A: {} pallets with issues, {} missing SKU mappings",
        build_a.warnings.pallets_with_issues, build_a.warnings.missing_sku_mappings
    );
    println!();

    // 4. Compare.
    for mode in [CompareMode::HeatmapOverlay, CompareMode::DualPlayback] {
        let reasons = comparable(run_a, run_b, mode);
        if reasons.is_empty() {
            println!("{mode:?}: comparable");
        } else {
            println!("{mode:?}: no comparable ({})", reasons.join(" | "));
        }
    }
    let delta = SummaryDelta::between(run_a, run_b);
    println!(
        "Δ total steps (B-A): {}  ({:+.2}%)  Δ avg: {:+.2}",
        delta.total_steps_delta, delta.total_steps_pct, delta.avg_steps_delta
    );
    println!("Shared heat scale max: {}", shared_heatmaps(run_a, run_b).target_max);
    println!();
    println!("{:<10} {:>8} {:>8} {:>8}", "Pallet", "A", "B", "Δ");
    println!("{}", "-".repeat(37));
    for row in pallet_compare_rows(run_a, run_b) {
        let steps = |side: Option<pw_compare::PalletSide>| side.map_or("—".to_string(), |s| s.steps.to_string());
        println!(
            "{:<10} {:>8} {:>8} {:>8}",
            row.pallet_id,
            steps(row.a),
            steps(row.b),
            row.delta.map_or("—".to_string(), |d| d.to_string())
        );
    }
    println!();

    // 5. Replay both runs in lockstep on a fake clock.
    let timeline = DualTimeline::new(PalletPaths::from_run(&layout, run_a)?, PalletPaths::from_run(&layout, run_b)?);
    let clock = ManualClock::new(0);
    let config = PlayerConfig { speed_ms: SPEED_MS, auto_continue: true, initial_pallet_index: 0 };
    let mut engine = PlaybackEngine::new(timeline, clock.clone(), config);
    engine.play();

    let mut frames = 0u64;
    while engine.status() == PlayerStatus::Playing && frames < 100_000 {
        engine.tick();
        clock.advance(FRAME_MS);
        frames += 1;
    }
    let state = engine.state();
    let (pos_a, pos_b) = engine.timeline().positions(state.pallet_index, state.step_index);
    println!(
        "Replay {:?} after {frames} frames ({} ms simulated): pallet {} step {}  A at {}  B at {}",
        state.status,
        frames * FRAME_MS,
        state.pallet_index,
        state.step_index,
        pos_a.map_or("—".to_string(), |c| c.to_string()),
        pos_b.map_or("—".to_string(), |c| c.to_string()),
    );

    // 6. Trail of the first pallet in run A, as the player would shade it.
    let path_a = engine.timeline().side_a().path(0);
    let visits = visit_counts(path_a, path_a.len());
    let busiest = visits.iter().max_by_key(|&(c, n)| (*n, std::cmp::Reverse(*c)));
    if let Some((cell, n)) = busiest {
        println!("Pallet 0 (A): {} distinct cells, busiest {cell} x{n}", visits.len());
    }

    println!();
    println!("Report written to {OUTPUT_DIR}/");
    Ok(())
}
