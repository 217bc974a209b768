//! `pw-run` — the run simulator.
//!
//! A *run* turns a layout, a SKU master and raw pallet lines into ordered
//! pick routes, per-pallet diagnostics and a visitation heatmap.
//!
//! # Per-pallet pipeline
//!
//! ```text
//! for pallet in first-seen order:
//!   ① Dedupe    — unique SKUs, first-seen order.
//!   ② Resolve   — lowest-sequence SKU-master candidate → access cell.
//!                 Missing mapping / missing location → issue, pick skipped.
//!   ③ Order     — stable sort of resolved picks by sequence.
//!   ④ Route     — START → pick₁ → … → pickₙ → END, one search per leg,
//!                 memoized per (layout hash, from, to).  An unroutable leg
//!                 is an issue; the remaining legs still run.
//!   ⑤ Stitch    — concatenate legs, dropping junction cells; every visited
//!                 cell bumps the heatmap.
//! ```
//!
//! Fatal problems (no START/END, empty or blank input lines, a malformed
//! grid) abort the whole build with a structured [`RunBuildError`].
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use pw_run::RunBuilder;
//!
//! let build = RunBuilder::new(&layout, &sku_master, &lines).build()?;
//! println!("{} pallets, {} steps", build.run.summary.total_pallets, build.run.summary.total_steps);
//! ```

pub mod builder;
pub mod cache;
pub mod error;
pub mod name;
pub mod observer;
pub mod replay;
pub mod result;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::{RunBuilder, RunOptions};
pub use cache::{CacheStats, SegmentCache};
pub use error::{ReplayError, RunBuildError, RunBuildErrorKind, RunBuildResult};
pub use name::{normalize_slug, run_name};
pub use observer::{NoopObserver, RunContext, RunObserver};
pub use replay::PalletPaths;
pub use result::{RunBuild, RunPalletResult, RunPalletStop, RunResult, RunSummary, RunWarnings};
