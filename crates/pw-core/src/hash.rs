//! Content hashes for layouts and SKU masters.
//!
//! A `RunResult` records the hashes of the inputs it was built from so a
//! replay can detect that the layout has been edited since.  Hashes are
//! SHA-256 over the `serde_json` serialization, truncated to 16 hex digits
//! and prefixed with the input kind.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::{CoreResult, Layout, SkuMaster};

const HASH_HEX_LEN: usize = 16;

/// Hash of the full layout (grid, metadata and default rules).
pub fn layout_hash(layout: &Layout) -> CoreResult<String> {
    Ok(format!("layout-{}", digest_json(layout)?))
}

/// Hash of the SKU master's rows.  The derived index and the display name
/// do not contribute.
pub fn sku_master_hash(master: &SkuMaster) -> CoreResult<String> {
    Ok(format!("sku-{}", digest_json(&master.rows)?))
}

fn digest_json<T: Serialize + ?Sized>(value: &T) -> CoreResult<String> {
    let bytes = serde_json::to_vec(value)?;
    let digest = Sha256::digest(&bytes);
    let mut out = hex::encode(digest);
    out.truncate(HASH_HEX_LEN);
    Ok(out)
}
