//! Remote-imagery layer: declarative query graphs, the REST client, the
//! band/index extractor with its cloud-filter fallback ladder, and the
//! time-windowed series builder.

mod client;
mod error;
mod extract;
mod graph;
mod series;

pub use client::{DEFAULT_BASE_URL, GeeClient, ImageryService};
pub use error::GeeError;
pub use extract::{CLOUD_FILTER_TIERS, Extractor};
pub use graph::{CompositeRequest, CompositeSpec, IndexExpr, RegionReduce, SceneQuery};
pub use series::{IndexSeries, SeriesBuilder};
