#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("could not reach {url} after {attempts} attempt(s): {source}")]
    Connectivity {
        url: String,
        attempts: u32,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered HTTP {status} after {attempts} attempt(s)")]
    Status { url: String, status: u16, attempts: u32 },
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Status { status: 404, .. })
    }

    /// Attempts made before giving up, if any request was sent
    pub fn attempts(&self) -> Option<u32> {
        match self {
            ClientError::Connectivity { attempts, .. } | ClientError::Status { attempts, .. } => {
                Some(*attempts)
            }
            _ => None,
        }
    }
}
