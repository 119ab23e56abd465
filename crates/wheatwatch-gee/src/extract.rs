//! Single-window band/index extraction with the cloud-filter fallback ladder.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, info};

use wheatwatch_core::bands::{INDEX_NAMES, SPECTRAL_BANDS};
use wheatwatch_core::{ExtractionResult, Region};

use crate::client::ImageryService;
use crate::error::GeeError;
use crate::graph::{CompositeRequest, SceneQuery};

/// Cloud-filter ladder, strictly increasing permissiveness (contract v1):
/// cloudy-pixel-percentage < 20, then < 60, then unfiltered.
pub const CLOUD_FILTER_TIERS: [Option<f64>; 3] = [Some(20.0), Some(60.0), None];

/// Best-effort extraction of spectral bands and vegetation indices for one
/// region and date window.
pub struct Extractor<S> {
    service: S,
}

impl<S: ImageryService> Extractor<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// Extract band and index values for `[start_date, end_date)`.
    ///
    /// Walks the fallback ladder, probing each tier's scene count and
    /// compositing at the first non-empty tier. Returns
    /// [`GeeError::EmptyCollection`] when every tier, including unfiltered,
    /// matches nothing; transport failures propagate as-is.
    pub async fn extract(
        &self,
        region: &Region,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<ExtractionResult, GeeError> {
        for max_cloud_pct in CLOUD_FILTER_TIERS {
            let query = SceneQuery::sentinel2(region.clone(), start_date, end_date, max_cloud_pct);
            let count = self.service.scene_count(&query).await?;
            if count == 0 {
                debug!(?max_cloud_pct, %start_date, "no scenes at this cloud tier, relaxing");
                continue;
            }

            info!(count, ?max_cloud_pct, %start_date, %end_date, "compositing scenes");
            let request = CompositeRequest::new(query);
            let raw = self.service.reduce_composite(&request).await?;
            return Ok(ExtractionResult::new(normalize_values(raw)));
        }

        Err(GeeError::EmptyCollection)
    }
}

/// One entry per requested band/index, in contract naming. Keys the remote
/// reduction dropped (or returned null) become explicit nulls, so one failed
/// index never poisons the rest of the reading.
fn normalize_values(raw: BTreeMap<String, Option<f64>>) -> BTreeMap<String, Option<f64>> {
    let mut values = BTreeMap::new();
    for key in SPECTRAL_BANDS.iter().chain(INDEX_NAMES.iter()) {
        let value = raw.get(*key).copied().flatten();
        if value.is_none() {
            debug!(key, "reduction returned no value");
        }
        values.insert((*key).to_string(), value);
    }
    values
}
