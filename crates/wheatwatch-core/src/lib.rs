pub mod bands;
pub mod extraction;
pub mod features;
pub mod prediction;
pub mod reading;
pub mod region;
pub mod windows;

pub use bands::{BandInfoEntry, IndexFormula, band_info};
pub use extraction::ExtractionResult;
pub use features::{FEATURE_ORDER, FeatureVector, feature_vector};
pub use prediction::{ClassProbabilities, PredictionResult};
pub use reading::{IndexReading, SeriesMeta};
pub use region::{Region, RegionError};
pub use windows::{DateWindow, window_schedule};
