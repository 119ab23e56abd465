//! Extraction results: band/index values reduced over a region, plus the
//! static band-info table echoed for display layers.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::bands::{self, BandInfoEntry};

/// A best-effort snapshot of spectral bands and derived indices for one
/// region and date window.
///
/// `area_values` holds one entry per requested band/index; a `None` value
/// means the remote reduction produced no data for that key. An empty map
/// means no imagery matched any filter tier.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    pub area_values: BTreeMap<String, Option<f64>>,
    pub band_info: BTreeMap<&'static str, BandInfoEntry>,
}

impl ExtractionResult {
    pub fn new(area_values: BTreeMap<String, Option<f64>>) -> Self {
        Self {
            area_values,
            band_info: bands::band_info(),
        }
    }

    /// The no-imagery result: empty values, band table still present.
    pub fn empty() -> Self {
        Self::new(BTreeMap::new())
    }

    /// Whether the remote reduction produced at least one concrete value.
    pub fn has_data(&self) -> bool {
        self.area_values.values().any(|v| v.is_some())
    }

    pub fn value(&self, key: &str) -> Option<f64> {
        self.area_values.get(key).copied().flatten()
    }
}
