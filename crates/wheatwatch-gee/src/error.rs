use thiserror::Error;

/// Failure taxonomy for the remote imagery service.
///
/// `EmptyCollection` is the "nothing matched, even unfiltered" outcome and is
/// handled differently from transport failures: the series layer records it
/// as plain data absence, while `Http`/`Server` failures keep their
/// diagnostics on the reading.
#[derive(Debug, Error)]
pub enum GeeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("imagery service returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("imagery service rejected geometry: {0}")]
    MalformedGeometry(String),

    #[error("no imagery matched the query at any filter tier")]
    EmptyCollection,
}
