//! Geographic regions: a point or a polygon boundary, GeoJSON-shaped on the wire.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegionError {
    #[error("latitude {0} out of range [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} out of range [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("polygon must have an exterior ring with at least 3 vertices")]
    DegeneratePolygon,
}

/// An immutable region of interest.
///
/// Serializes as a GeoJSON geometry: `{"type": "Point", "coordinates": [lon, lat]}`
/// or `{"type": "Polygon", "coordinates": [[[lon, lat], ...]]}`. Coordinates use
/// GeoJSON axis order (longitude first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Region {
    Point([f64; 2]),
    Polygon(Vec<Vec<[f64; 2]>>),
}

impl Region {
    /// Build a validated point region from latitude/longitude.
    pub fn point(lat: f64, lon: f64) -> Result<Self, RegionError> {
        check_coordinate(lon, lat)?;
        Ok(Region::Point([lon, lat]))
    }

    /// Validate coordinate ranges and polygon shape.
    ///
    /// Runs on deserialized client input before any remote call is issued.
    pub fn validate(&self) -> Result<(), RegionError> {
        match self {
            Region::Point([lon, lat]) => check_coordinate(*lon, *lat),
            Region::Polygon(rings) => {
                let exterior = rings.first().ok_or(RegionError::DegeneratePolygon)?;
                if exterior.len() < 3 {
                    return Err(RegionError::DegeneratePolygon);
                }
                for &[lon, lat] in rings.iter().flatten() {
                    check_coordinate(lon, lat)?;
                }
                Ok(())
            }
        }
    }

    pub fn is_point(&self) -> bool {
        matches!(self, Region::Point(_))
    }
}

fn check_coordinate(lon: f64, lat: f64) -> Result<(), RegionError> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(RegionError::LatitudeOutOfRange(lat));
    }
    if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
        return Err(RegionError::LongitudeOutOfRange(lon));
    }
    Ok(())
}
