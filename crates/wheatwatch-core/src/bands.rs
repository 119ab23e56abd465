//! Sentinel-2 band catalogue and vegetation index formulas.
//!
//! The band table and formula expressions are a versioned contract: the
//! classifier was trained against values produced by exactly these bands,
//! this scale divisor, and these index definitions (contract v1). RVSI is
//! the normalized-difference form (B3 − B2)/(B3 + B2), not the Red/Blue
//! ratio found in an earlier revision.

use std::collections::BTreeMap;

use serde::Serialize;

/// Surface-reflectance collection queried on the remote imagery service.
pub const COLLECTION: &str = "COPERNICUS/S2_SR";

/// Divisor mapping surface-reflectance integer DNs to reflectance in [0, 1].
pub const REFLECTANCE_SCALE: f64 = 10_000.0;

/// Spatial scale, in meters, for region reduction.
pub const REDUCE_SCALE_M: f64 = 10.0;

/// The ten spectral bands requested from every scene.
pub const SPECTRAL_BANDS: [&str; 10] = [
    "B2", "B3", "B4", "B5", "B6", "B7", "B8", "B8A", "B11", "B12",
];

/// The five derived vegetation indices.
pub const INDEX_NAMES: [&str; 5] = ["NDVI", "GNDVI", "NPCI", "DWSI", "RVSI"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BandKind {
    Spectral,
    Index,
}

/// Static per-band metadata echoed in extraction responses.
#[derive(Debug, Clone, Serialize)]
pub struct BandInfoEntry {
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wavelength: Option<f64>,
    #[serde(rename = "type")]
    pub kind: BandKind,
}

/// A per-pixel index formula evaluated remotely on the composite image.
#[derive(Debug, Clone, Copy)]
pub struct IndexFormula {
    pub name: &'static str,
    /// Band arithmetic over scaled reflectance, in the remote service's
    /// expression syntax.
    pub expression: &'static str,
    pub inputs: &'static [&'static str],
}

pub const INDEX_FORMULAS: [IndexFormula; 5] = [
    IndexFormula {
        name: "NDVI",
        expression: "(B8 - B4) / (B8 + B4)",
        inputs: &["B8", "B4"],
    },
    IndexFormula {
        name: "GNDVI",
        expression: "(B8 - B3) / (B8 + B3)",
        inputs: &["B8", "B3"],
    },
    IndexFormula {
        name: "NPCI",
        expression: "(B4 - B2) / (B4 + B2)",
        inputs: &["B4", "B2"],
    },
    IndexFormula {
        name: "DWSI",
        expression: "(B8A - B11) / (B8A + B11)",
        inputs: &["B8A", "B11"],
    },
    IndexFormula {
        name: "RVSI",
        expression: "(B3 - B2) / (B3 + B2)",
        inputs: &["B3", "B2"],
    },
];

/// The static band-info table: display name, center wavelength (nm) for
/// spectral bands, and category. Never mutated.
pub fn band_info() -> BTreeMap<&'static str, BandInfoEntry> {
    const SPECTRAL: [(&str, &str, f64); 10] = [
        ("B2", "Blue", 496.6),
        ("B3", "Green", 560.0),
        ("B4", "Red", 664.5),
        ("B5", "Red Edge 1", 703.9),
        ("B6", "Red Edge 2", 740.2),
        ("B7", "Red Edge 3", 782.5),
        ("B8", "NIR", 835.1),
        ("B8A", "Red Edge 4", 864.8),
        ("B11", "SWIR 1", 1613.7),
        ("B12", "SWIR 2", 2202.4),
    ];
    const INDICES: [(&str, &str); 5] = [
        ("NDVI", "NDVI"),
        ("GNDVI", "Green NDVI"),
        ("NPCI", "NPCI"),
        ("DWSI", "DWSI"),
        ("RVSI", "RVSI"),
    ];

    let mut table = BTreeMap::new();
    for (code, name, wavelength) in SPECTRAL {
        table.insert(
            code,
            BandInfoEntry {
                name,
                wavelength: Some(wavelength),
                kind: BandKind::Spectral,
            },
        );
    }
    for (code, name) in INDICES {
        table.insert(
            code,
            BandInfoEntry {
                name,
                wavelength: None,
                kind: BandKind::Index,
            },
        );
    }
    table
}
