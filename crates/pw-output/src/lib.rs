//! `pw-output` — run report writers for the pickwalk engine.
//!
//! | Backend | Files created                          |
//! |---------|----------------------------------------|
//! | CSV     | `pallet_results.csv`, `heatmap.csv`    |
//!
//! Backends implement [`ReportWriter`] and are driven either live by
//! [`RunReportObserver`], which implements `pw_run::RunObserver`, or after
//! the fact by [`write_run`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use pw_output::{CsvReportWriter, RunReportObserver};
//!
//! let writer = CsvReportWriter::new(Path::new("./report"))?;
//! let mut obs = RunReportObserver::new(writer);
//! let build = RunBuilder::new(&layout, &master, &lines).build_with(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("report error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvReportWriter;
pub use error::{OutputError, OutputResult};
pub use observer::{write_run, RunReportObserver};
pub use row::{heatmap_rows, HeatmapRow, PalletRow};
pub use writer::ReportWriter;
