//! `RunReportObserver<W>` — bridges `RunObserver` to a `ReportWriter`.

use pw_run::{RunObserver, RunPalletResult, RunResult};

use crate::row::{heatmap_rows, PalletRow};
use crate::writer::ReportWriter;
use crate::{OutputError, OutputResult};

/// A [`RunObserver`] that streams pallet rows as they are routed and writes
/// the heatmap once the run is assembled.
///
/// Errors from the writer are stored internally because `RunObserver`
/// methods have no return value.  After the build returns, check for errors
/// with [`take_error`][Self::take_error].
pub struct RunReportObserver<W: ReportWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: ReportWriter> RunReportObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after the build returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the build).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            tracing::warn!(error = %e, "report write failed");
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: ReportWriter> RunObserver for RunReportObserver<W> {
    fn on_pallet_end(&mut self, _index: usize, pallet: &RunPalletResult) {
        let result = self.writer.write_pallet(&PalletRow::from(pallet));
        self.store_err(result);
    }

    fn on_run_end(&mut self, run: &RunResult) {
        let rows = heatmap_rows(&run.heatmap_steps);
        if !rows.is_empty() {
            let result = self.writer.write_heatmap(&rows);
            self.store_err(result);
        }
        let result = self.writer.finish();
        self.store_err(result);
    }
}

/// Write a finished run through `writer` in one go.
///
/// For runs loaded from storage, where there is no build to observe.
pub fn write_run<W: ReportWriter>(writer: &mut W, run: &RunResult) -> OutputResult<()> {
    for pallet in &run.pallet_results {
        writer.write_pallet(&PalletRow::from(pallet))?;
    }
    writer.write_heatmap(&heatmap_rows(&run.heatmap_steps))?;
    writer.finish()
}
