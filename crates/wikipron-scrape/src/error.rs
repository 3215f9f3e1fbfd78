use wikipron_client::ClientError;
use wikipron_config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("malformed response to {request}: {source}")]
    MalformedResponse {
        request: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("scrape cancelled")]
    Cancelled,

    #[error("scrape task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ScrapeError {
    /// The backend could not be reached or kept failing
    pub fn is_connectivity(&self) -> bool {
        matches!(self, ScrapeError::Client(ClientError::Connectivity { .. }))
    }

    /// The backend answered with something other than the expected shape
    pub fn is_malformed(&self) -> bool {
        matches!(self, ScrapeError::MalformedResponse { .. })
    }
}
