//! ONNX Runtime session for the pre-trained wheat-health random forest.
//!
//! The artifact is a scikit-learn forest exported to ONNX with ZipMap
//! disabled, so the graph has a single `float_input` of shape [N, 15] and
//! two outputs: predicted labels (int64, [N]) and class probabilities
//! (float32, [N, 2], column 0 = unhealthy, column 1 = healthy).

use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use ort::value::Tensor;
use tracing::info;

pub struct ForestModel {
    session: Mutex<Session>,
}

impl ForestModel {
    /// Load the classifier artifact from disk.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        anyhow::ensure!(
            path.exists(),
            "model artifact not found at {}",
            path.display()
        );
        let session = Session::builder()?.commit_from_file(path)?;
        info!(model = %path.display(), "loaded wheat-health classifier");
        Ok(Self {
            session: Mutex::new(session),
        })
    }

    /// Run inference on one feature vector.
    ///
    /// Returns `(label, [p_unhealthy, p_healthy])`.
    pub fn predict(&self, features: &[f32; 15]) -> anyhow::Result<(i64, [f32; 2])> {
        let input = Tensor::from_array(([1i64, 15], features.to_vec().into_boxed_slice()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow::anyhow!("model session lock poisoned"))?;
        let outputs = session.run(ort::inputs!["float_input" => input])?;

        let (_, labels) = outputs[0].try_extract_tensor::<i64>()?;
        anyhow::ensure!(labels.len() == 1, "expected one label, got {}", labels.len());
        let label = labels[0];

        let (prob_shape, probs) = outputs[1].try_extract_tensor::<f32>()?;
        let dims: &[i64] = prob_shape;
        anyhow::ensure!(
            probs.len() == 2,
            "expected binary class probabilities, got shape {dims:?}"
        );

        Ok((label, [probs[0], probs[1]]))
    }
}
