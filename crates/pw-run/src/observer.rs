//! Run observer trait for progress reporting and streaming output.

use pw_core::{LayoutId, SkuMasterId};

use crate::{RunPalletResult, RunResult};

/// What an observer learns before the first pallet is routed.
#[derive(Clone, Debug)]
pub struct RunContext {
    pub layout_id:     LayoutId,
    pub sku_master_id: SkuMasterId,
    pub layout_hash:   String,
    pub pallet_count:  usize,
    pub width:         u32,
    pub height:        u32,
}

/// Callbacks invoked by [`RunBuilder::build_with`][crate::RunBuilder::build_with].
///
/// All methods have default no-op implementations so implementors only
/// override what they care about.  Observers are not called for builds that
/// fail validation.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct Progress;
///
/// impl RunObserver for Progress {
///     fn on_pallet_end(&mut self, index: usize, pallet: &RunPalletResult) {
///         println!("#{index} {}: {} steps", pallet.pallet_id, pallet.steps);
///     }
/// }
/// ```
pub trait RunObserver {
    fn on_run_start(&mut self, _ctx: &RunContext) {}

    /// Called after each pallet, in processing order.
    fn on_pallet_end(&mut self, _index: usize, _pallet: &RunPalletResult) {}

    /// Called once with the finished result, including the heatmap.
    fn on_run_end(&mut self, _run: &RunResult) {}
}

/// A [`RunObserver`] that does nothing.
pub struct NoopObserver;

impl RunObserver for NoopObserver {}
