//! Classifier adapter: explicit construction, fail-soft loading, pure
//! inference.

use std::path::Path;

use thiserror::Error;
use tracing::warn;

use wheatwatch_core::{ExtractionResult, PredictionResult};
#[cfg(feature = "onnx")]
use wheatwatch_core::{ClassProbabilities, feature_vector};

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Model not loaded")]
    ModelNotLoaded,
    #[error("inference failed: {0}")]
    Inference(String),
}

/// Wheat-health predictor holding an immutable loaded-model reference.
///
/// Constructed once at process start. A missing or corrupt artifact (or a
/// build without the `onnx` feature) still yields a usable value whose
/// `predict` reports [`PredictError::ModelNotLoaded`] instead of panicking.
pub struct Predictor {
    #[cfg(feature = "onnx")]
    model: Option<crate::forest::ForestModel>,
}

impl Predictor {
    /// Load the classifier artifact from `path`. Never fails; a load error
    /// is logged and deferred to `predict`.
    pub fn load(path: &Path) -> Self {
        #[cfg(feature = "onnx")]
        {
            match crate::forest::ForestModel::load(path) {
                Ok(model) => Self { model: Some(model) },
                Err(err) => {
                    warn!(
                        error = %err,
                        model = %path.display(),
                        "failed to load classifier; predictions disabled"
                    );
                    Self { model: None }
                }
            }
        }
        #[cfg(not(feature = "onnx"))]
        {
            warn!(
                model = %path.display(),
                "built without the onnx feature; predictions disabled"
            );
            Self {}
        }
    }

    pub fn is_loaded(&self) -> bool {
        #[cfg(feature = "onnx")]
        {
            self.model.is_some()
        }
        #[cfg(not(feature = "onnx"))]
        {
            false
        }
    }

    /// Classify an extraction: vectorize `area_values` in contract order,
    /// run the model, and report the outcome with per-class probabilities
    /// and the input values echoed back.
    pub fn predict(&self, extraction: &ExtractionResult) -> Result<PredictionResult, PredictError> {
        #[cfg(feature = "onnx")]
        {
            let model = self.model.as_ref().ok_or(PredictError::ModelNotLoaded)?;
            let features = feature_vector(&extraction.area_values);
            let (label, probabilities) = model
                .predict(&features.values)
                .map_err(|err| PredictError::Inference(err.to_string()))?;

            let unhealthy = f64::from(probabilities[0]);
            let healthy = f64::from(probabilities[1]);
            Ok(PredictionResult {
                prediction: label,
                confidence: if label == 1 { healthy } else { unhealthy },
                probabilities: ClassProbabilities { healthy, unhealthy },
                band_values: extraction.area_values.clone(),
            })
        }
        #[cfg(not(feature = "onnx"))]
        {
            let _ = extraction;
            Err(PredictError::ModelNotLoaded)
        }
    }
}
