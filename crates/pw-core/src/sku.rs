//! SKU master: the `sku → candidate locations` mapping.
//!
//! A SKU may be stocked at several locations.  The index keeps each SKU's
//! candidates sorted ascending by `sequence`; the first entry is the one the
//! simulator routes to.  The sort is stable, so equal sequences keep their
//! row order.  Non-finite sequences sort after every finite one.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{LocationId, Sku, SkuMasterId};

/// One row of the SKU master as imported.
#[derive(Clone, PartialEq, Debug)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuMasterRow {
    pub sku: Sku,
    pub location_id: LocationId,
    /// Picking order key.  Lower is visited earlier.
    pub sequence: f64,
}

impl SkuMasterRow {
    pub fn new(sku: impl Into<Sku>, location_id: impl Into<LocationId>, sequence: f64) -> Self {
        Self { sku: sku.into(), location_id: location_id.into(), sequence }
    }
}

/// A candidate location for a SKU.
#[derive(Clone, PartialEq, Debug)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuLocation {
    pub location_id: LocationId,
    pub sequence: f64,
}

impl SkuLocation {
    /// Sequence used for ordering: non-finite values sort last.
    #[inline]
    pub fn sort_key(&self) -> f64 {
        if self.sequence.is_finite() { self.sequence } else { f64::MAX }
    }
}

/// A named SKU master with its derived index.
#[derive(Clone, PartialEq, Debug)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuMaster {
    pub sku_master_id: SkuMasterId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub rows: Vec<SkuMasterRow>,
    /// Derived from `rows`; rebuild with [`SkuMaster::rebuild_index`] after
    /// editing rows.
    pub index: BTreeMap<Sku, Vec<SkuLocation>>,
}

impl SkuMaster {
    /// Build a master stamped with the current time.
    pub fn new(sku_master_id: impl Into<SkuMasterId>, name: impl Into<String>, rows: Vec<SkuMasterRow>) -> Self {
        Self::with_created_at(sku_master_id, name, rows, Utc::now())
    }

    pub fn with_created_at(
        sku_master_id: impl Into<SkuMasterId>,
        name:          impl Into<String>,
        rows:          Vec<SkuMasterRow>,
        created_at:    DateTime<Utc>,
    ) -> Self {
        let index = build_index(&rows);
        Self {
            sku_master_id: sku_master_id.into(),
            name: name.into(),
            created_at,
            rows,
            index,
        }
    }

    pub fn rebuild_index(&mut self) {
        self.index = build_index(&self.rows);
    }

    /// All candidates for `sku`, lowest sequence first.
    pub fn lookup(&self, sku: &str) -> Option<&[SkuLocation]> {
        self.index.get(sku).map(Vec::as_slice).filter(|c| !c.is_empty())
    }

    /// The authoritative candidate for routing: lowest sequence.
    pub fn primary(&self, sku: &str) -> Option<&SkuLocation> {
        self.lookup(sku).and_then(|c| c.first())
    }

    pub fn sku_count(&self) -> usize {
        self.index.len()
    }
}

/// Group rows by SKU, then stable-sort each group by sequence.
pub fn build_index(rows: &[SkuMasterRow]) -> BTreeMap<Sku, Vec<SkuLocation>> {
    let mut index: BTreeMap<Sku, Vec<SkuLocation>> = BTreeMap::new();
    for row in rows {
        index.entry(row.sku.clone()).or_default().push(SkuLocation {
            location_id: row.location_id.clone(),
            sequence:    row.sequence,
        });
    }
    for candidates in index.values_mut() {
        candidates.sort_by(|a, b| a.sort_key().total_cmp(&b.sort_key()));
    }
    index
}
