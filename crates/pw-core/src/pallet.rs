//! Raw pallet lines as delivered by the file-import collaborator.

use serde::{Deserialize, Serialize};

use crate::{PalletId, Sku};

/// One `(pallet, sku)` line.  A pallet has many lines; duplicates are
/// allowed and collapsed by the simulator.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[derive(Serialize, Deserialize)]
pub struct PalletLine {
    pub pallet_id: PalletId,
    pub sku: Sku,
}

impl PalletLine {
    pub fn new(pallet_id: impl Into<PalletId>, sku: impl Into<Sku>) -> Self {
        Self { pallet_id: pallet_id.into(), sku: sku.into() }
    }

    /// `true` if either field is empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.pallet_id.is_blank() || self.sku.is_blank()
    }
}
