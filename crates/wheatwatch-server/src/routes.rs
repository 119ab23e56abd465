//! API route handlers.
//!
//! Error policy: malformed input is the only hard failure (HTTP 400).
//! Remote-service and model errors degrade to explainable JSON bodies with
//! a 200 status, mirroring the fail-soft extraction policy.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::warn;

use wheatwatch_core::{ExtractionResult, Region};
use wheatwatch_gee::GeeError;

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub geometry: Region,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct IndicesParams {
    pub lat: f64,
    pub lon: f64,
    pub start_date: NaiveDate,
}

type ApiError = (StatusCode, Json<Value>);

fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"status": "error", "message": message.into()})),
    )
}

fn parse_predict_request(body: Value) -> Result<PredictRequest, ApiError> {
    let request: PredictRequest =
        serde_json::from_value(body).map_err(|err| bad_request(err.to_string()))?;
    request
        .geometry
        .validate()
        .map_err(|err| bad_request(err.to_string()))?;
    if request.end_date <= request.start_date {
        return Err(bad_request("end_date must be after start_date"));
    }
    Ok(request)
}

/// `POST /predict`: extract bands/indices for a geometry and date range,
/// then classify.
pub async fn predict(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body.map_err(|err| bad_request(err.to_string()))?;
    let request = parse_predict_request(body)?;

    let extraction = match state
        .extractor
        .extract(&request.geometry, request.start_date, request.end_date)
        .await
    {
        Ok(extraction) => extraction,
        // No imagery is not a request failure: predict on the empty
        // mapping, as the band_data echo makes the absence visible.
        Err(GeeError::EmptyCollection) => ExtractionResult::empty(),
        Err(err) => {
            warn!(error = %err, "extraction failed");
            return Ok(Json(
                json!({"status": "error", "message": err.to_string()}),
            ));
        }
    };

    let prediction = match state.predictor.predict(&extraction) {
        Ok(result) => serde_json::to_value(result)
            .unwrap_or_else(|err| json!({"error": err.to_string()})),
        Err(err) => json!({"error": err.to_string()}),
    };

    Ok(Json(json!({
        "band_data": extraction,
        "prediction": prediction,
        "status": "success",
    })))
}

/// `GET /api/indices?lat&lon&start_date`: per-window readings plus a
/// trailing `_meta` summary record.
pub async fn indices(
    State(state): State<AppState>,
    params: Result<Query<IndicesParams>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(params) = params.map_err(|err| bad_request(err.to_string()))?;
    let region =
        Region::point(params.lat, params.lon).map_err(|err| bad_request(err.to_string()))?;

    let series = state.series.build(&region, params.start_date).await;
    let records = series.to_records().map_err(|err| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"status": "error", "message": err.to_string()})),
        )
    })?;
    Ok(Json(Value::Array(records)))
}
