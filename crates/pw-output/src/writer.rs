//! The `ReportWriter` trait implemented by report backends.

use crate::{HeatmapRow, OutputResult, PalletRow};

/// Sink for one run's report.
///
/// Errors surface through [`RunReportObserver::take_error`][crate::RunReportObserver::take_error]
/// when the writer is driven by a run build.
pub trait ReportWriter {
    fn write_pallet(&mut self, row: &PalletRow) -> OutputResult<()>;

    fn write_heatmap(&mut self, rows: &[HeatmapRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Must be idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
