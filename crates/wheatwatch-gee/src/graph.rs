//! Declarative query-graph documents sent to the remote imagery service.
//!
//! The service executes the whole pipeline server-side: filter the scene
//! collection, median-composite the survivors, scale to reflectance,
//! evaluate the index expressions per pixel, and reduce over the region.
//! This module only describes that pipeline; no raster math happens here.

use chrono::NaiveDate;
use serde::Serialize;
use wheatwatch_core::Region;
use wheatwatch_core::bands::{
    COLLECTION, INDEX_FORMULAS, REDUCE_SCALE_M, REFLECTANCE_SCALE, SPECTRAL_BANDS,
};

/// Scene-collection filter: bounds, date range, optional per-scene cloud cap.
#[derive(Debug, Clone, Serialize)]
pub struct SceneQuery {
    pub collection: String,
    pub region: Region,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Upper bound on the scene's cloudy-pixel-percentage metadata field;
    /// `None` disables cloud filtering entirely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_cloud_pct: Option<f64>,
    pub bands: Vec<String>,
}

impl SceneQuery {
    /// Query the Sentinel-2 surface-reflectance collection for the ten
    /// spectral bands over `[start_date, end_date)`.
    pub fn sentinel2(
        region: Region,
        start_date: NaiveDate,
        end_date: NaiveDate,
        max_cloud_pct: Option<f64>,
    ) -> Self {
        Self {
            collection: COLLECTION.to_string(),
            region,
            start_date,
            end_date,
            max_cloud_pct,
            bands: SPECTRAL_BANDS.iter().map(|b| b.to_string()).collect(),
        }
    }
}

/// Per-pixel compositing of the filtered scenes.
#[derive(Debug, Clone, Serialize)]
pub struct CompositeSpec {
    /// Median suppresses transient cloud and noise artifacts without
    /// per-scene masks.
    pub reducer: String,
    /// Divisor applied to the composite before index evaluation, mapping
    /// integer DNs to reflectance in [0, 1].
    pub scale_divisor: f64,
}

/// A derived band evaluated on the scaled composite.
#[derive(Debug, Clone, Serialize)]
pub struct IndexExpr {
    pub name: String,
    pub expression: String,
}

/// Spatial reduction of the composite plus derived bands over the region.
#[derive(Debug, Clone, Serialize)]
pub struct RegionReduce {
    pub reducer: String,
    /// Reduce at the region's centroid instead of over the full geometry
    /// (the representative-pixel policy for area requests).
    pub use_centroid: bool,
    pub scale_m: f64,
    /// Tolerate regions that only partially overlap valid pixels.
    pub best_effort: bool,
}

/// The full filter → composite → index → reduce pipeline for one window.
#[derive(Debug, Clone, Serialize)]
pub struct CompositeRequest {
    pub query: SceneQuery,
    pub composite: CompositeSpec,
    pub indices: Vec<IndexExpr>,
    pub reduce: RegionReduce,
}

impl CompositeRequest {
    /// Build the standard pipeline for a scene query: median composite,
    /// reflectance scaling, the five index expressions, and a region
    /// reduction (spatial mean at a point, representative pixel at the
    /// centroid for polygons).
    pub fn new(query: SceneQuery) -> Self {
        let is_point = query.region.is_point();
        Self {
            query,
            composite: CompositeSpec {
                reducer: "median".to_string(),
                scale_divisor: REFLECTANCE_SCALE,
            },
            indices: INDEX_FORMULAS
                .iter()
                .map(|f| IndexExpr {
                    name: f.name.to_string(),
                    expression: f.expression.to_string(),
                })
                .collect(),
            reduce: RegionReduce {
                reducer: if is_point { "mean" } else { "first" }.to_string(),
                use_centroid: !is_point,
                scale_m: REDUCE_SCALE_M,
                best_effort: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn point_query(max_cloud_pct: Option<f64>) -> SceneQuery {
        SceneQuery::sentinel2(
            Region::point(34.07, -4.75).unwrap(),
            date("2024-01-01"),
            date("2024-01-15"),
            max_cloud_pct,
        )
    }

    #[test]
    fn scene_query_serializes_filter_graph() {
        let json = serde_json::to_value(point_query(Some(20.0))).unwrap();
        assert_eq!(json["collection"], "COPERNICUS/S2_SR");
        assert_eq!(json["start_date"], "2024-01-01");
        assert_eq!(json["end_date"], "2024-01-15");
        assert_eq!(json["max_cloud_pct"], 20.0);
        assert_eq!(json["region"]["type"], "Point");
        assert_eq!(json["bands"].as_array().unwrap().len(), 10);
    }

    #[test]
    fn unfiltered_query_omits_cloud_cap() {
        let json = serde_json::to_value(point_query(None)).unwrap();
        assert!(json.get("max_cloud_pct").is_none());
    }

    #[test]
    fn point_request_reduces_with_spatial_mean() {
        let request = CompositeRequest::new(point_query(Some(20.0)));
        assert_eq!(request.reduce.reducer, "mean");
        assert!(!request.reduce.use_centroid);
        assert!(request.reduce.best_effort);
    }

    #[test]
    fn polygon_request_reduces_at_centroid() {
        let region = Region::Polygon(vec![vec![
            [-4.8, 34.0],
            [-4.7, 34.0],
            [-4.7, 34.1],
            [-4.8, 34.0],
        ]]);
        let query = SceneQuery::sentinel2(region, date("2024-01-01"), date("2024-01-15"), None);
        let request = CompositeRequest::new(query);
        assert_eq!(request.reduce.reducer, "first");
        assert!(request.reduce.use_centroid);
    }

    #[test]
    fn request_carries_median_composite_and_scale() {
        let request = CompositeRequest::new(point_query(Some(20.0)));
        assert_eq!(request.composite.reducer, "median");
        assert_eq!(request.composite.scale_divisor, 10_000.0);
        assert_eq!(request.reduce.scale_m, 10.0);
    }

    #[test]
    fn request_carries_all_five_index_expressions() {
        let request = CompositeRequest::new(point_query(Some(20.0)));
        let names: Vec<&str> = request.indices.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["NDVI", "GNDVI", "NPCI", "DWSI", "RVSI"]);
        let ndvi = &request.indices[0];
        assert_eq!(ndvi.expression, "(B8 - B4) / (B8 + B4)");
    }
}
