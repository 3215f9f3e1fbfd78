//! HTTP client factory.
//!
//! Every client is built fresh from a [`NetworkConfig`]: there is no global
//! session. Both request shapes share the retry policy and the identifying
//! user agent; they differ only in what they ask the server for.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, RETRY_AFTER};
use reqwest::{StatusCode, Url};
use wikipron_config::network::NetworkConfig;

use crate::error::ClientError;
use crate::retry::RetryPolicy;

const PROJECT_URL: &str = "https://github.com/kylebgorman/wikipron";
const TRANSPORT: &str = "reqwest/0.12";

/// `WikiPron/{version} ({project url}) {transport}/{version}`
pub fn user_agent() -> String {
    format!(
        "WikiPron/{} ({}) {}",
        env!("CARGO_PKG_VERSION"),
        PROJECT_URL,
        TRANSPORT
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientKind {
    /// MediaWiki API calls returning JSON
    Api,
    /// Rendered word pages
    Page,
}

impl ClientKind {
    fn accept(self) -> &'static str {
        match self {
            ClientKind::Api => "application/json",
            ClientKind::Page => "text/html,application/xhtml+xml",
        }
    }
}

/// A configured client; cheap to clone, dropped with its connection pool.
#[derive(Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    kind: ClientKind,
    policy: RetryPolicy,
}

pub fn build_client(kind: ClientKind, network: &NetworkConfig) -> Result<HttpClient, ClientError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(kind.accept()));

    let inner = reqwest::Client::builder()
        .user_agent(user_agent())
        .default_headers(headers)
        .timeout(network.timeout())
        .build()
        .map_err(ClientError::Build)?;

    Ok(HttpClient {
        inner,
        kind,
        policy: RetryPolicy::from_config(network),
    })
}

struct Failure {
    error: ClientError,
    retryable: bool,
    retry_after: Option<Duration>,
}

impl HttpClient {
    pub fn kind(&self) -> ClientKind {
        self.kind
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// GET `url` and return the body, retrying transport errors and
    /// throttling/server statuses within the retry budget.
    pub async fn get_text(&self, url: Url) -> Result<String, ClientError> {
        let mut retries = 0;

        loop {
            let failure = match self.attempt(&url, retries + 1).await {
                Ok(body) => return Ok(body),
                Err(failure) => failure,
            };

            if !failure.retryable || retries >= self.policy.max_retries {
                return Err(failure.error);
            }

            retries += 1;
            let delay = self.policy.delay(retries, failure.retry_after);
            tracing::warn!(
                "{} (retry {}/{} in {:?})",
                failure.error,
                retries,
                self.policy.max_retries,
                delay
            );
            tokio::time::sleep(delay).await;
        }
    }

    async fn attempt(&self, url: &Url, attempts: u32) -> Result<String, Failure> {
        let connectivity = |source: reqwest::Error| Failure {
            retryable: !(source.is_builder() || source.is_redirect()),
            error: ClientError::Connectivity {
                url: url.to_string(),
                attempts,
                source,
            },
            retry_after: None,
        };

        let response = self
            .inner
            .get(url.clone())
            .send()
            .await
            .map_err(connectivity)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Failure {
                error: ClientError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                    attempts,
                },
                retryable: is_retryable_status(status),
                retry_after: retry_after(response.headers()),
            });
        }

        response.text().await.map_err(connectivity)
    }
}

pub fn is_retryable_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    )
}

/// `Retry-After` in delta-seconds form; HTTP dates are ignored
fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
