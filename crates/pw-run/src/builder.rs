//! Fluent builder that validates inputs and produces a [`RunBuild`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pw_core::{layout_hash, sku_master_hash, Layout, PalletLine, RunId, SkuMaster};
use pw_spatial::{AStarRouter, LayoutGraph, Router};

use crate::sim::{group_pallets, Simulation};
use crate::{
    run_name, NoopObserver, RunBuild, RunBuildError, RunBuildResult, RunContext, RunObserver,
    RunResult, RunSummary, RunWarnings,
};

/// Per-build knobs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunOptions {
    /// Overrides the generated [`run_name`].
    pub name: Option<String>,
    /// Pallet-line file name, appended to the generated name.
    pub source_file_name: Option<String>,
    /// Store each pallet's visited cells on its result so replay does not
    /// have to route again.
    pub record_visited: bool,
}

/// Fluent builder for a run.
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                  |
/// |--------------------|--------------------------|
/// | `.options(o)`      | `RunOptions::default()`  |
/// | `.now(t)`          | `Utc::now()` at build    |
/// | `.with_router(r)`  | `AStarRouter`            |
///
/// # Example
///
/// ```rust,ignore
/// let build = RunBuilder::new(&layout, &sku_master, &lines)
///     .options(RunOptions { record_visited: true, ..Default::default() })
///     .build()?;
/// ```
pub struct RunBuilder<'a, R: Router = AStarRouter> {
    layout:     &'a Layout,
    sku_master: &'a SkuMaster,
    lines:      &'a [PalletLine],
    options:    RunOptions,
    now:        Option<DateTime<Utc>>,
    router:     R,
}

impl<'a> RunBuilder<'a, AStarRouter> {
    pub fn new(layout: &'a Layout, sku_master: &'a SkuMaster, lines: &'a [PalletLine]) -> Self {
        Self {
            layout,
            sku_master,
            lines,
            options: RunOptions::default(),
            now:     None,
            router:  AStarRouter,
        }
    }
}

impl<'a, R: Router> RunBuilder<'a, R> {
    /// Swap the routing algorithm.  Any deterministic optimal router gives
    /// the same steps; only tie-breaking between equal-length paths differs.
    pub fn with_router<R2: Router>(self, router: R2) -> RunBuilder<'a, R2> {
        RunBuilder {
            layout:     self.layout,
            sku_master: self.sku_master,
            lines:      self.lines,
            options:    self.options,
            now:        self.now,
            router,
        }
    }

    pub fn options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    /// Pin `created_at` (and the generated name) to `now`.
    pub fn now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn build(self) -> RunBuildResult<RunBuild> {
        self.build_with(&mut NoopObserver)
    }

    /// Validate, route every pallet, and assemble the run.
    ///
    /// Returns the first fatal problem found; per-pallet problems become
    /// issues on the pallet results instead.
    pub fn build_with<O: RunObserver>(self, observer: &mut O) -> RunBuildResult<RunBuild> {
        let layout = self.layout;
        let sku_master = self.sku_master;

        // ── Fatal checks ──────────────────────────────────────────────────
        if self.lines.is_empty() {
            return Err(RunBuildError::validation("Debe cargar un archivo con líneas válidas."));
        }

        let (start, end) = layout.start_end().map_err(|err| {
            RunBuildError::validation("Layout inválido: se requiere 1 START y 1 END.")
                .with_details([err.to_string()])
                .with_context("layoutId", &layout.layout_id)
        })?;

        let blank_rows: Vec<String> = self
            .lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.is_blank())
            .map(|(i, _)| format!("Fila {}: pallet_id o sku vacío.", i + 1))
            .collect();
        if !blank_rows.is_empty() {
            return Err(RunBuildError::data("El archivo contiene filas inválidas.")
                .with_details(blank_rows)
                .with_context("lineCount", self.lines.len()));
        }

        let graph = LayoutGraph::build(layout).map_err(|err| {
            RunBuildError::routing("No se pudo inicializar el cálculo de rutas.")
                .with_details([err.to_string()])
                .with_context("layoutId", &layout.layout_id)
        })?;

        let layout_hash = layout_hash(layout)
            .map_err(|err| RunBuildError::unexpected("No se pudo calcular el hash del layout.").with_details([err.to_string()]))?;
        let sku_master_hash = sku_master_hash(sku_master)
            .map_err(|err| RunBuildError::unexpected("No se pudo calcular el hash del SKU Master.").with_details([err.to_string()]))?;

        // ── Route ─────────────────────────────────────────────────────────
        let groups = group_pallets(self.lines);
        tracing::info!(
            layout = %layout.layout_id,
            sku_master = %sku_master.sku_master_id,
            lines = self.lines.len(),
            pallets = groups.len(),
            "run build started"
        );
        observer.on_run_start(&RunContext {
            layout_id:     layout.layout_id.clone(),
            sku_master_id: sku_master.sku_master_id.clone(),
            layout_hash:   layout_hash.clone(),
            pallet_count:  groups.len(),
            width:         layout.width,
            height:        layout.height,
        });

        let mut sim = Simulation::new(
            &self.router,
            &graph,
            sku_master,
            layout.access_by_location(),
            start,
            end,
            &layout_hash,
            self.options.record_visited,
        );

        let mut pallet_results = Vec::with_capacity(groups.len());
        for (index, group) in groups.iter().enumerate() {
            let result = sim.run_pallet(group);
            if result.is_ok() {
                tracing::debug!(pallet = %result.pallet_id, steps = result.steps, "pallet routed");
            } else {
                tracing::warn!(
                    pallet = %result.pallet_id,
                    issues = result.issues.len(),
                    has_path = result.has_path,
                    "pallet routed with issues"
                );
            }
            observer.on_pallet_end(index, &result);
            pallet_results.push(result);
        }

        let stats = sim.cache_stats();
        tracing::debug!(hits = stats.hits, misses = stats.misses, "segment cache");

        // ── Assemble ──────────────────────────────────────────────────────
        let created_at = self.now.unwrap_or_else(Utc::now);
        let name = match self.options.name {
            Some(name) => name,
            None => run_name(
                created_at,
                &layout.name,
                &sku_master.name,
                self.options.source_file_name.as_deref(),
            ),
        };

        let run = RunResult {
            run_id: RunId::random(),
            name,
            created_at,
            layout_id: layout.layout_id.clone(),
            sku_master_id: sku_master.sku_master_id.clone(),
            layout_hash,
            sku_master_hash,
            summary: RunSummary::from_pallets(&pallet_results),
            pallet_order: pallet_results.iter().map(|p| p.pallet_id.clone()).collect(),
            heatmap_steps: sim.into_heatmap(),
            pallet_results,
        };
        let warnings = RunWarnings::from_pallets(&run.pallet_results);

        tracing::info!(
            run = %run.run_id,
            name = %run.name,
            pallets = run.summary.total_pallets,
            errors = run.summary.error_pallets,
            total_steps = run.summary.total_steps,
            "run build finished"
        );
        observer.on_run_end(&run);

        Ok(RunBuild { run, warnings })
    }
}
