//! Inference layer: classifier adapter over the pre-trained wheat-health
//! model, loaded once per process and immutable thereafter.

#[cfg(feature = "onnx")]
mod forest;
mod predictor;

pub use predictor::{PredictError, Predictor};
