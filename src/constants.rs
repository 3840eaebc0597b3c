//! Application-wide constants and magic numbers
//!
//! Thresholds used by the derivation engine live here so the rules can be
//! read in one place.

use std::time::Duration;

/// Technical thresholds for recommendation and RSI zones
pub mod thresholds {
    /// RSI above this is overbought
    pub const RSI_OVERBOUGHT: f64 = 70.0;

    /// RSI below this is oversold
    pub const RSI_OVERSOLD: f64 = 30.0;

    /// Trend/momentum score at or above this counts as strong
    pub const STRONG_SCORE: f64 = 2.0;

    /// Trend/momentum score at or below this counts as weak
    pub const WEAK_SCORE: f64 = 1.0;

    /// Trend and momentum scores are reported out of this
    pub const MAX_SCORE: u32 = 3;

    /// Piotroski F-score upper bound
    pub const PIOTROSKI_MAX: u32 = 9;
}

/// Prediction display constants
pub mod prediction {
    /// Confidence above this is Low risk
    pub const LOW_RISK_CONFIDENCE: f64 = 0.7;

    /// Confidence above this (and not Low) is Medium risk
    pub const MEDIUM_RISK_CONFIDENCE: f64 = 0.5;

    /// Used when the ensemble reports no (or zero) confidence
    pub const DEFAULT_CONFIDENCE: f64 = 0.5;

    /// Maximum number of per-model detail cards
    pub const MAX_MODEL_DETAILS: usize = 6;
}

/// Magnitude buckets for market cap and volume
pub mod magnitude {
    pub const TRILLION: f64 = 1_000_000_000_000.0;
    pub const BILLION: f64 = 1_000_000_000.0;
    pub const MILLION: f64 = 1_000_000.0;
    pub const THOUSAND: f64 = 1_000.0;
}

/// Display strings shared by the normalizer and the renderer
pub mod display {
    pub const NOT_AVAILABLE: &str = "N/A";
    pub const NO_SIGNALS: &str = "No significant trading signals detected";
    pub const FUNDAMENTALS_UNAVAILABLE: &str = "Fundamental data not available";
}

/// Chart series constants
pub mod charts {
    /// Number of points in the price and indicator charts
    pub const WINDOW_POINTS: usize = 21;
}

/// Upstream API paths
pub mod endpoints {
    pub const TECHNICAL: &str = "stocks";
    pub const FUNDAMENTAL: &str = "company";
    pub const PREDICTION: &str = "predict";
}

/// HTTP transport defaults
pub mod http {
    use super::*;

    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
    pub const DEFAULT_DEV_BASE_URL: &str = "http://localhost:8000";
    pub const DEFAULT_PROD_BASE_URL: &str =
        "https://stock-prediction-prototype-production.up.railway.app";
    pub const CONNECT_FAILURE_HINT: &str =
        "Cannot connect to API server. Please check if the server is running.";
}

/// Logging event names for structured logging
pub mod events {
    pub const ANALYSIS_STARTED: &str = "analysis_started";
    pub const ANALYSIS_READY: &str = "analysis_ready";
    pub const ANALYSIS_FAILED: &str = "analysis_failed";
    pub const FUNDAMENTALS_DEGRADED: &str = "fundamentals_degraded";
    pub const PREDICTION_READY: &str = "prediction_ready";
    pub const PREDICTION_FAILED: &str = "prediction_failed";
    pub const STALE_RESPONSE_DISCARDED: &str = "stale_response_discarded";
}
