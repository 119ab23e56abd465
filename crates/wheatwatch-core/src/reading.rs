//! Per-window index readings and series summary metadata.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::extraction::ExtractionResult;
use crate::windows::DateWindow;

/// One vegetation-index reading for a single observation window.
///
/// Index fields are nullable; `data_available == false` implies every index
/// field is `None`. `error` carries the diagnostic for windows that failed
/// at the transport layer (as opposed to windows with no matching imagery).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexReading {
    pub date: NaiveDate,
    pub ndvi: Option<f64>,
    pub gndvi: Option<f64>,
    pub npci: Option<f64>,
    pub dwsi: Option<f64>,
    pub rvsi: Option<f64>,
    pub data_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IndexReading {
    /// A reading for a window where no data could be obtained.
    pub fn unavailable(date: NaiveDate, error: Option<String>) -> Self {
        Self {
            date,
            ndvi: None,
            gndvi: None,
            npci: None,
            dwsi: None,
            rvsi: None,
            data_available: false,
            error,
        }
    }

    /// Build a reading from a window's extraction result.
    ///
    /// An extraction with no concrete values collapses to `unavailable` with
    /// no error (empty collection is not a failure, just an absence).
    pub fn from_extraction(date: NaiveDate, extraction: &ExtractionResult) -> Self {
        if !extraction.has_data() {
            return Self::unavailable(date, None);
        }
        Self {
            date,
            ndvi: extraction.value("NDVI"),
            gndvi: extraction.value("GNDVI"),
            npci: extraction.value("NPCI"),
            dwsi: extraction.value("DWSI"),
            rvsi: extraction.value("RVSI"),
            data_available: true,
            error: None,
        }
    }
}

/// Trailing summary record attached to every index series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesMeta {
    pub total_points: usize,
    pub successful_points: usize,
    pub missing_points: usize,
    /// Percentage string with one decimal, e.g. `"84.6%"`.
    pub success_rate: String,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl SeriesMeta {
    pub fn from_readings(windows: &[DateWindow], readings: &[IndexReading]) -> Self {
        let total = readings.len();
        let successful = readings.iter().filter(|r| r.data_available).count();
        Self {
            total_points: total,
            successful_points: successful,
            missing_points: total - successful,
            success_rate: format!("{:.1}%", success_rate(successful, total)),
            first_date: windows.first().map(|w| w.start),
            last_date: windows.last().map(|w| w.start),
        }
    }
}

/// Successful windows as a percentage of the total, rounded to one decimal.
/// Zero total windows yields 0.0, never NaN.
pub fn success_rate(successful: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let rate = successful as f64 / total as f64 * 100.0;
    (rate * 10.0).round() / 10.0
}
