//! Feature vectorization: extraction values → fixed-order model input.

use std::collections::BTreeMap;

use tracing::warn;

/// Training-time column order. The classifier was fitted against exactly
/// this ordering; reordering silently corrupts predictions.
pub const FEATURE_ORDER: [&str; 15] = [
    "B2", "B3", "B4", "B5", "B6", "B7", "B8", "B8A", "B11", "B12", "NDVI", "GNDVI", "NPCI",
    "DWSI", "RVSI",
];

/// A model input vector plus the keys that had to be defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub values: [f32; 15],
    /// Keys absent or null in the source mapping, defaulted to 0.0.
    pub missing: Vec<String>,
}

/// Convert an extraction's `area_values` into the model's input vector.
///
/// Missing or null keys default to 0.0 so the vector is always 15 elements;
/// the defaulted keys are returned and logged as a data-quality warning
/// since zeros are indistinguishable from real dark-pixel reflectance
/// downstream.
pub fn feature_vector(area_values: &BTreeMap<String, Option<f64>>) -> FeatureVector {
    let mut values = [0.0f32; 15];
    let mut missing = Vec::new();

    for (slot, key) in values.iter_mut().zip(FEATURE_ORDER) {
        match area_values.get(key).copied().flatten() {
            Some(v) => *slot = v as f32,
            None => missing.push(key.to_string()),
        }
    }

    if !missing.is_empty() {
        warn!(
            missing = ?missing,
            "feature vector has defaulted values; prediction quality degraded"
        );
    }

    FeatureVector { values, missing }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values_of(pairs: &[(&str, f64)]) -> BTreeMap<String, Option<f64>> {
        pairs
            .iter()
            .map(|&(k, v)| (k.to_string(), Some(v)))
            .collect()
    }

    #[test]
    fn always_emits_fifteen_elements() {
        let fv = feature_vector(&BTreeMap::new());
        assert_eq!(fv.values.len(), 15);
        assert_eq!(fv.missing.len(), 15);
        assert!(fv.values.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn partial_mapping_defaults_the_rest() {
        let fv = feature_vector(&values_of(&[("B2", 0.1), ("B4", 0.2)]));
        let expected = [
            0.1, 0.0, 0.2, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        ];
        assert_eq!(fv.values, expected);
        assert_eq!(fv.missing.len(), 13);
        assert!(!fv.missing.contains(&"B2".to_string()));
        assert!(!fv.missing.contains(&"B4".to_string()));
    }

    #[test]
    fn null_values_count_as_missing() {
        let mut values = values_of(&[("B2", 0.1)]);
        values.insert("NDVI".to_string(), None);
        let fv = feature_vector(&values);
        assert!(fv.missing.contains(&"NDVI".to_string()));
        assert_eq!(fv.values[10], 0.0);
    }

    #[test]
    fn full_mapping_preserves_contract_order() {
        let pairs: Vec<(&str, f64)> = FEATURE_ORDER
            .iter()
            .enumerate()
            .map(|(i, &k)| (k, i as f64 / 10.0))
            .collect();
        let fv = feature_vector(&values_of(&pairs));
        assert!(fv.missing.is_empty());
        for (i, &v) in fv.values.iter().enumerate() {
            assert!((v - i as f32 / 10.0).abs() < 1e-6);
        }
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let fv = feature_vector(&values_of(&[("B99", 9.9), ("B2", 0.3)]));
        assert!((fv.values[0] - 0.3).abs() < 1e-6);
        assert_eq!(fv.missing.len(), 14);
    }
}
