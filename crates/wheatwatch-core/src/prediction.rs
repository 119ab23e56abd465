//! Prediction wire types for the wheat-health classifier.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub healthy: f64,
    pub unhealthy: f64,
}

/// Binary classification outcome: class 1 = healthy, class 0 = unhealthy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: i64,
    /// Probability of the predicted class, in [0, 1].
    pub confidence: f64,
    pub probabilities: ClassProbabilities,
    /// Echo of the input band/index values the prediction was made from.
    pub band_values: BTreeMap<String, Option<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_contract_field_names() {
        let result = PredictionResult {
            prediction: 1,
            confidence: 0.83,
            probabilities: ClassProbabilities {
                healthy: 0.83,
                unhealthy: 0.17,
            },
            band_values: BTreeMap::from([("NDVI".to_string(), Some(0.61))]),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["prediction"], 1);
        assert_eq!(json["probabilities"]["healthy"], 0.83);
        assert_eq!(json["probabilities"]["unhealthy"], 0.17);
        assert_eq!(json["band_values"]["NDVI"], 0.61);
    }

    #[test]
    fn roundtrips() {
        let result = PredictionResult {
            prediction: 0,
            confidence: 0.71,
            probabilities: ClassProbabilities {
                healthy: 0.29,
                unhealthy: 0.71,
            },
            band_values: BTreeMap::new(),
        };
        let json = serde_json::to_string(&result).unwrap();
        let parsed: PredictionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }
}
