use thiserror::Error;

pub type Result<T> = std::result::Result<T, MetaError>;

#[derive(Error, Debug)]
pub enum MetaError {
    #[error("graph api returned {status}: {body}")]
    RemoteApi { status: u16, body: String },

    #[error("malformed response: {body}")]
    MalformedResponse { body: String },

    #[error("media processing failed for container: {container_id}")]
    ProcessingFailed { container_id: String },

    #[error("media processing timeout after {elapsed_ms}ms for container: {container_id}")]
    ProcessingTimeout {
        container_id: String,
        elapsed_ms: u64,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("cancelled")]
    Cancelled,

    #[error("http request failed: {0}")]
    Transport(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl MetaError {
    /// Returns `true` if re-running the whole task could succeed.
    ///
    /// Only connection problems and provider-side 5xx qualify. The core itself
    /// never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            MetaError::Transport(_) => true,
            MetaError::RemoteApi { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// The request URL is stripped: it may carry `access_token`.
impl From<reqwest::Error> for MetaError {
    fn from(e: reqwest::Error) -> Self {
        MetaError::Transport(e.without_url().to_string())
    }
}

impl From<serde_json::Error> for MetaError {
    fn from(e: serde_json::Error) -> Self {
        MetaError::Serialization(e.to_string())
    }
}
