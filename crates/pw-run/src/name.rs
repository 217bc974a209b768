//! Default run names.
//!
//! `YYYYMMDDHHMM_<layout>_<skumaster>[_<source>]`, each token slugged to
//! lowercase ASCII alphanumerics.  The source token is the pallet-line
//! file name without its extension.

use chrono::{DateTime, Utc};

/// Lowercase and keep only `[a-z0-9]`.
pub fn normalize_slug(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) if dot > 0 => &name[..dot],
        _ => name,
    }
}

pub fn run_name(
    now:              DateTime<Utc>,
    layout_name:      &str,
    sku_master_name:  &str,
    source_file_name: Option<&str>,
) -> String {
    let mut name = format!(
        "{}_{}_{}",
        now.format("%Y%m%d%H%M"),
        normalize_slug(layout_name),
        normalize_slug(sku_master_name),
    );
    if let Some(source) = source_file_name {
        name.push('_');
        name.push_str(&normalize_slug(strip_extension(source)));
    }
    name
}
