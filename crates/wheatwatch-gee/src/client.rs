//! REST client for the remote imagery computation service.

use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::GeeError;
use crate::graph::{CompositeRequest, SceneQuery};

pub const DEFAULT_BASE_URL: &str = "https://earthengine.googleapis.com/v1";

/// Outbound request timeout. A hung remote call surfaces as a per-window
/// failure under the fail-soft policy rather than stalling the series.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The remote service seam: a scene-count probe and a composite/reduce
/// evaluation. Production uses [`GeeClient`]; tests inject doubles.
pub trait ImageryService: Send + Sync {
    /// Number of scenes matching the filter query.
    fn scene_count(&self, query: &SceneQuery)
    -> impl Future<Output = Result<u64, GeeError>> + Send;

    /// Execute the full pipeline and return the reduced value per band/index
    /// name. Keys may be absent or null when the reduction found no data.
    fn reduce_composite(
        &self,
        request: &CompositeRequest,
    ) -> impl Future<Output = Result<BTreeMap<String, Option<f64>>, GeeError>> + Send;
}

impl<S: ImageryService + ?Sized> ImageryService for &S {
    fn scene_count(&self, query: &SceneQuery)
    -> impl Future<Output = Result<u64, GeeError>> + Send {
        (**self).scene_count(query)
    }

    fn reduce_composite(
        &self,
        request: &CompositeRequest,
    ) -> impl Future<Output = Result<BTreeMap<String, Option<f64>>, GeeError>> + Send {
        (**self).reduce_composite(request)
    }
}

/// HTTP client posting query graphs to an Earth Engine-style REST endpoint.
#[derive(Debug, Clone)]
pub struct GeeClient {
    http: reqwest::Client,
    base_url: String,
    project: String,
    token: Option<String>,
}

#[derive(Deserialize)]
struct SceneCountResponse {
    count: u64,
}

#[derive(Deserialize)]
struct ReduceResponse {
    values: BTreeMap<String, Option<f64>>,
}

impl GeeClient {
    /// Create a client for the given service base URL and cloud project.
    ///
    /// `base_url` should be like `https://earthengine.googleapis.com/v1`
    /// (no trailing slash).
    pub fn new(base_url: impl Into<String>, project: impl Into<String>) -> Result<Self, GeeError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            project: project.into(),
            token: None,
        })
    }

    /// Attach a bearer token for authenticated requests.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, verb: &str) -> String {
        format!("{}/projects/{}/{verb}", self.base_url, self.project)
    }

    async fn post<B, R>(&self, verb: &str, body: &B) -> Result<R, GeeError>
    where
        B: serde::Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.url(verb);
        debug!(url = %url, "posting query graph");

        let mut request = self.http.post(&url).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::BAD_REQUEST {
            // The only client-side inputs the service rejects are geometry
            // and filter parameters.
            let body = response.text().await.unwrap_or_default();
            return Err(GeeError::MalformedGeometry(body));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeeError::Server {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

impl ImageryService for GeeClient {
    async fn scene_count(&self, query: &SceneQuery) -> Result<u64, GeeError> {
        let response: SceneCountResponse = self.post("scenes:count", query).await?;
        Ok(response.count)
    }

    async fn reduce_composite(
        &self,
        request: &CompositeRequest,
    ) -> Result<BTreeMap<String, Option<f64>>, GeeError> {
        let response: ReduceResponse = self.post("composite:reduce", request).await?;
        Ok(response.values)
    }
}
