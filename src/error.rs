//! Custom error types for the dashboard
//!
//! Transport failures, upstream-reported errors and input validation are kept
//! apart so the orchestrator can decide which ones are fatal for a request.

use thiserror::Error;

/// Errors raised by the transport collaborator
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Cannot connect to API server at {url}: {reason}")]
    Unreachable { url: String, reason: String },

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),
}

/// Input and derivation errors that never reach the network
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a stock symbol")]
    EmptySymbol,

    #[error("Please analyze a stock first")]
    NoActiveAnalysis,

    #[error("Analysis for {symbol} is not ready yet")]
    AnalysisNotReady { symbol: String },

    #[error("A prediction for {symbol} is already in flight")]
    PredictionInFlight { symbol: String },

    #[error("Current price is zero; expected change is undefined")]
    ZeroCurrentPrice,
}

/// Top-level dashboard errors
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Transport error: {0}")]
    Transport(#[from] FetchError),

    #[error("Upstream error from {endpoint}: {message}")]
    Upstream { endpoint: String, message: String },

    #[error("Upstream payload from {endpoint} is missing `{section}`")]
    MissingSection { endpoint: String, section: String },

    #[error("Malformed payload from {endpoint}: {source}")]
    Payload {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    #[error("Analysis for {symbol} was superseded by a newer request")]
    Superseded { symbol: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DashboardError {
    /// Network unreachable or non-2xx response
    pub fn is_transport(&self) -> bool {
        matches!(self, DashboardError::Transport(_))
    }

    /// The payload arrived but carried an explicit error, or was unusable
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            DashboardError::Upstream { .. }
                | DashboardError::MissingSection { .. }
                | DashboardError::Payload { .. }
        )
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, DashboardError::Validation(_))
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, DashboardError::Superseded { .. })
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;
pub type FetchResult<T> = Result<T, FetchError>;

/// Extract the upstream `error` field, if the payload carries one.
///
/// Both `{"error": "..."}` and a non-string error value are accepted; `null`
/// counts as no error.
pub fn upstream_error_message(payload: &serde_json::Value) -> Option<String> {
    match payload.get("error")? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
