//! CSV report backend.
//!
//! Creates two files in the configured output directory:
//! - `pallet_results.csv`
//! - `heatmap.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::ReportWriter;
use crate::{HeatmapRow, OutputResult, PalletRow};

pub const PALLET_RESULTS_FILE: &str = "pallet_results.csv";
pub const HEATMAP_FILE: &str = "heatmap.csv";

/// Writes a run report to two CSV files.
pub struct CsvReportWriter {
    pallets:  Writer<File>,
    heatmap:  Writer<File>,
    finished: bool,
}

impl CsvReportWriter {
    /// Create the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut pallets = Writer::from_path(dir.join(PALLET_RESULTS_FILE))?;
        pallets.write_record([
            "pallet_id",
            "sku_count",
            "missing_sku_count",
            "steps",
            "has_path",
            "issue_count",
            "issues",
        ])?;

        let mut heatmap = Writer::from_path(dir.join(HEATMAP_FILE))?;
        heatmap.write_record(["x", "y", "visits"])?;

        Ok(Self { pallets, heatmap, finished: false })
    }
}

impl ReportWriter for CsvReportWriter {
    fn write_pallet(&mut self, row: &PalletRow) -> OutputResult<()> {
        self.pallets.write_record(&[
            row.pallet_id.clone(),
            row.sku_count.to_string(),
            row.missing_sku_count.to_string(),
            row.steps.to_string(),
            (row.has_path as u8).to_string(),
            row.issue_count.to_string(),
            row.issues.clone(),
        ])?;
        Ok(())
    }

    fn write_heatmap(&mut self, rows: &[HeatmapRow]) -> OutputResult<()> {
        for row in rows {
            self.heatmap.write_record(&[row.x.to_string(), row.y.to_string(), row.visits.to_string()])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.pallets.flush()?;
        self.heatmap.flush()?;
        Ok(())
    }
}
