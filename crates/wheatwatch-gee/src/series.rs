//! Time-windowed index series: one extraction per schedule window,
//! fail-soft, with trailing summary metadata.

use chrono::NaiveDate;
use serde_json::json;
use tracing::{info, warn};

use wheatwatch_core::{IndexReading, Region, SeriesMeta, window_schedule};

use crate::client::ImageryService;
use crate::error::GeeError;
use crate::extract::Extractor;

/// An ordered sequence of per-window readings plus aggregate metadata.
#[derive(Debug, Clone)]
pub struct IndexSeries {
    pub readings: Vec<IndexReading>,
    pub meta: SeriesMeta,
}

impl IndexSeries {
    /// Wire shape: one record per reading followed by a trailing
    /// `{"_meta": ...}` record.
    pub fn to_records(&self) -> serde_json::Result<Vec<serde_json::Value>> {
        let mut records = Vec::with_capacity(self.readings.len() + 1);
        for reading in &self.readings {
            records.push(serde_json::to_value(reading)?);
        }
        records.push(json!({ "_meta": self.meta }));
        Ok(records)
    }
}

/// Builds an [`IndexSeries`] by walking the fixed window schedule and
/// invoking the extractor once per window, sequentially.
pub struct SeriesBuilder<S> {
    extractor: Extractor<S>,
}

impl<S: ImageryService> SeriesBuilder<S> {
    pub fn new(service: S) -> Self {
        Self {
            extractor: Extractor::new(service),
        }
    }

    /// Build the series for a region and campaign start date.
    ///
    /// Every window produces a reading: extraction failures are caught here
    /// and recorded as `data_available = false`. Windows with no matching
    /// imagery carry no error; transport failures keep their diagnostic.
    pub async fn build(&self, region: &Region, campaign_start: NaiveDate) -> IndexSeries {
        let windows = window_schedule(campaign_start);
        let mut readings = Vec::with_capacity(windows.len());

        for window in &windows {
            let reading = match self
                .extractor
                .extract(region, window.start, window.end())
                .await
            {
                Ok(extraction) => IndexReading::from_extraction(window.start, &extraction),
                Err(GeeError::EmptyCollection) => IndexReading::unavailable(window.start, None),
                Err(err) => {
                    warn!(date = %window.start, error = %err, "window extraction failed");
                    IndexReading::unavailable(window.start, Some(err.to_string()))
                }
            };
            readings.push(reading);
        }

        let meta = SeriesMeta::from_readings(&windows, &readings);
        info!(
            total = meta.total_points,
            successful = meta.successful_points,
            success_rate = %meta.success_rate,
            "index series complete"
        );
        IndexSeries { readings, meta }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use wheatwatch_core::bands::{INDEX_NAMES, SPECTRAL_BANDS};

    use crate::graph::{CompositeRequest, SceneQuery};

    /// Imagery double driven by a per-call policy function over the probe
    /// sequence number.
    struct PolicyService<F> {
        policy: F,
        calls: Mutex<usize>,
    }

    impl<F> PolicyService<F> {
        fn new(policy: F) -> Self {
            Self {
                policy,
                calls: Mutex::new(0),
            }
        }
    }

    impl<F> ImageryService for PolicyService<F>
    where
        F: Fn(usize, &SceneQuery) -> Result<u64, GeeError> + Send + Sync,
    {
        async fn scene_count(&self, query: &SceneQuery) -> Result<u64, GeeError> {
            let mut calls = self.calls.lock().unwrap();
            let n = *calls;
            *calls += 1;
            (self.policy)(n, query)
        }

        async fn reduce_composite(
            &self,
            _request: &CompositeRequest,
        ) -> Result<BTreeMap<String, Option<f64>>, GeeError> {
            Ok(SPECTRAL_BANDS
                .iter()
                .chain(INDEX_NAMES.iter())
                .map(|k| (k.to_string(), Some(0.5)))
                .collect())
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn region() -> Region {
        Region::point(34.07, -4.75).unwrap()
    }

    #[tokio::test]
    async fn every_window_gets_a_reading() {
        let service = PolicyService::new(|_: usize, _: &SceneQuery| Ok(1));
        let series = SeriesBuilder::new(&service)
            .build(&region(), date("2024-01-01"))
            .await;

        assert_eq!(series.readings.len(), 13);
        assert!(series.readings.iter().all(|r| r.data_available));
        assert_eq!(series.meta.success_rate, "100.0%");
        assert_eq!(series.meta.first_date, Some(date("2024-01-01")));
    }

    #[tokio::test]
    async fn meta_counts_always_sum_to_total() {
        // First window finds imagery immediately; every later probe is empty,
        // so each remaining window burns all three ladder tiers.
        let service = PolicyService::new(|n: usize, _: &SceneQuery| Ok(u64::from(n == 0)));
        let series = SeriesBuilder::new(&service)
            .build(&region(), date("2024-01-01"))
            .await;

        assert_eq!(series.meta.total_points, 13);
        assert_eq!(series.meta.successful_points, 1);
        assert_eq!(series.meta.missing_points, 12);
        assert_eq!(
            series.meta.successful_points + series.meta.missing_points,
            series.meta.total_points
        );
        assert_eq!(series.meta.success_rate, "7.7%");
    }

    #[tokio::test]
    async fn empty_windows_have_all_null_indices_and_no_error() {
        let service = PolicyService::new(|_: usize, _: &SceneQuery| Ok(0));
        let series = SeriesBuilder::new(&service)
            .build(&region(), date("2024-01-01"))
            .await;

        for reading in &series.readings {
            assert!(!reading.data_available);
            assert!(reading.ndvi.is_none());
            assert!(reading.gndvi.is_none());
            assert!(reading.dwsi.is_none());
            assert!(reading.rvsi.is_none());
            assert!(reading.error.is_none());
        }
        assert_eq!(series.meta.success_rate, "0.0%");
    }

    #[tokio::test]
    async fn transport_failures_keep_their_diagnostic() {
        let service = PolicyService::new(|_: usize, _: &SceneQuery| {
            Err(GeeError::Server {
                status: 429,
                body: "quota exhausted".into(),
            })
        });
        let series = SeriesBuilder::new(&service)
            .build(&region(), date("2024-01-01"))
            .await;

        assert_eq!(series.readings.len(), 13);
        for reading in &series.readings {
            assert!(!reading.data_available);
            let error = reading.error.as_deref().unwrap();
            assert!(error.contains("429"), "diagnostic preserved: {error}");
        }
    }

    #[tokio::test]
    async fn records_end_with_meta() {
        let service = PolicyService::new(|_: usize, _: &SceneQuery| Ok(1));
        let series = SeriesBuilder::new(&service)
            .build(&region(), date("2024-01-01"))
            .await;

        let records = series.to_records().unwrap();
        assert_eq!(records.len(), 14);
        let meta = &records[13]["_meta"];
        assert_eq!(meta["total_points"], 13);
        assert_eq!(meta["success_rate"], "100.0%");
        assert!(records[0].get("ndvi").is_some());
    }
}
