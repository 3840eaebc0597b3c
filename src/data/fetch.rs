use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::constants::{endpoints, http::CONNECT_FAILURE_HINT};
use crate::error::{DashboardError, DashboardResult, FetchError, FetchResult};

/// The only capability the orchestrator needs from the transport layer.
///
/// Implementations resolve with the parsed JSON body on success. A body that
/// carries `{"error": ...}` may still resolve `Ok`; callers check for it.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn fetch_json(&self, url: &str) -> FetchResult<Value>;
}

/// reqwest-backed fetcher used by the binary
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> DashboardResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| DashboardError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl JsonFetcher for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> FetchResult<Value> {
        debug!("🌐 [FETCH] GET {}", url);

        let resp = match self.client.get(url).send().await {
            Ok(resp) => resp,
            Err(e) if e.is_connect() => {
                warn!("⚠️ [FETCH] {} unreachable: {}", url, e);
                return Err(FetchError::Unreachable {
                    url: url.to_string(),
                    reason: CONNECT_FAILURE_HINT.to_string(),
                });
            }
            Err(e) => return Err(FetchError::Network(e)),
        };

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// URL templates for the three upstream documents
#[derive(Clone, Debug)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(base: Url) -> DashboardResult<Self> {
        if base.cannot_be_a_base() {
            return Err(DashboardError::InvalidEndpoint(base.to_string()));
        }
        Ok(Self { base })
    }

    pub fn parse(base: &str) -> DashboardResult<Self> {
        let url = Url::parse(base)
            .map_err(|e| DashboardError::InvalidEndpoint(format!("{}: {}", base, e)))?;
        Self::new(url)
    }

    /// `GET /stocks/{symbol}`
    pub fn technical(&self, symbol: &str) -> DashboardResult<Url> {
        self.join(endpoints::TECHNICAL, symbol)
    }

    /// `GET /company/{symbol}`
    pub fn fundamental(&self, symbol: &str) -> DashboardResult<Url> {
        self.join(endpoints::FUNDAMENTAL, symbol)
    }

    /// `GET /predict/{symbol}`
    pub fn prediction(&self, symbol: &str) -> DashboardResult<Url> {
        self.join(endpoints::PREDICTION, symbol)
    }

    fn join(&self, resource: &str, symbol: &str) -> DashboardResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| DashboardError::InvalidEndpoint(self.base.to_string()))?
            .pop_if_empty()
            .push(resource)
            .push(symbol);
        Ok(url)
    }
}
