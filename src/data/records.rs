//! Typed schemas for the three upstream documents.
//!
//! Every upstream field is optional. Numeric fields are read leniently: a
//! `null`, a string or any other non-number becomes `None` instead of failing
//! the whole document.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{upstream_error_message, DashboardError, DashboardResult};

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()).filter(|v| v.is_finite()))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_signals<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Some sub-records arrive as `{"error": "..."}` or as a bare value; anything
/// that is not an object is treated as missing.
fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(v @ Value::Object(_)) => serde_json::from_value(v).ok(),
        _ => None,
    })
}

/// Reject payloads carrying an explicit `error` field, then decode.
fn decode<T: serde::de::DeserializeOwned>(endpoint: &str, payload: Value) -> DashboardResult<T> {
    if let Some(message) = upstream_error_message(&payload) {
        return Err(DashboardError::Upstream {
            endpoint: endpoint.to_string(),
            message,
        });
    }
    serde_json::from_value(payload).map_err(|source| DashboardError::Payload {
        endpoint: endpoint.to_string(),
        source,
    })
}

// ============= Technical =============

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct TechnicalSummary {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub current_price: Option<f64>,
    /// 0..=3
    #[serde(default, deserialize_with = "lenient_f64")]
    pub trend_score: Option<f64>,
    /// 0..=3
    #[serde(default, deserialize_with = "lenient_f64")]
    pub momentum_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rsi: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub macd: Option<f64>,
    #[serde(default, deserialize_with = "lenient_signals")]
    pub signals: Vec<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sma_20: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sma_50: Option<f64>,
}

/// Latest row of the raw indicator frame
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct IndicatorValues {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub close: Option<f64>,
    #[serde(rename = "SMA_20", default, deserialize_with = "lenient_f64")]
    pub sma_20: Option<f64>,
    #[serde(rename = "SMA_50", default, deserialize_with = "lenient_f64")]
    pub sma_50: Option<f64>,
    #[serde(rename = "EMA_12", default, deserialize_with = "lenient_f64")]
    pub ema_12: Option<f64>,
    #[serde(rename = "RSI", default, deserialize_with = "lenient_f64")]
    pub rsi: Option<f64>,
    #[serde(rename = "MACD", default, deserialize_with = "lenient_f64")]
    pub macd: Option<f64>,
    #[serde(rename = "BB_Upper", default, deserialize_with = "lenient_f64")]
    pub bb_upper: Option<f64>,
    #[serde(rename = "BB_Lower", default, deserialize_with = "lenient_f64")]
    pub bb_lower: Option<f64>,
    #[serde(rename = "ATR", default, deserialize_with = "lenient_f64")]
    pub atr: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub volume: Option<f64>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct TechnicalRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub technical_summary: Option<TechnicalSummary>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub indicators: Option<IndicatorValues>,
}

impl TechnicalRecord {
    /// Decode a `/stocks/{symbol}` payload. The summary section is mandatory.
    pub fn from_payload(endpoint: &str, payload: Value) -> DashboardResult<Self> {
        let record: TechnicalRecord = decode(endpoint, payload)?;
        if record.technical_summary.is_none() {
            return Err(DashboardError::MissingSection {
                endpoint: endpoint.to_string(),
                section: "technical_summary".to_string(),
            });
        }
        Ok(record)
    }

    pub fn summary(&self) -> TechnicalSummary {
        self.technical_summary.clone().unwrap_or_default()
    }

    pub fn indicators(&self) -> IndicatorValues {
        self.indicators.clone().unwrap_or_default()
    }
}

// ============= Fundamental =============

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct BasicInfo {
    #[serde(default, deserialize_with = "lenient_string")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sector: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub industry: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub market_cap: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub current_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub dividend_yield: Option<f64>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ValuationRatios {
    #[serde(rename = "PE_ratio", default, deserialize_with = "lenient_f64")]
    pub pe_ratio: Option<f64>,
    #[serde(rename = "PB_ratio", default, deserialize_with = "lenient_f64")]
    pub pb_ratio: Option<f64>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfitabilityRatios {
    #[serde(rename = "ROE", default, deserialize_with = "lenient_f64")]
    pub roe: Option<f64>,
    #[serde(rename = "ROA", default, deserialize_with = "lenient_f64")]
    pub roa: Option<f64>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct FinancialHealth {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub altman_z_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub piotroski_score: Option<f64>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct FundamentalRecord {
    #[serde(default, deserialize_with = "lenient_object")]
    pub basic_info: Option<BasicInfo>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub valuation_ratios: Option<ValuationRatios>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub profitability_ratios: Option<ProfitabilityRatios>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub financial_health: Option<FinancialHealth>,
}

impl FundamentalRecord {
    pub fn from_payload(endpoint: &str, payload: Value) -> DashboardResult<Self> {
        decode(endpoint, payload)
    }
}

// ============= Prediction =============

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct EnsemblePrediction {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ensemble_prediction: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub confidence: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub prediction_std: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub num_models: Option<f64>,
}

/// Fit quality for one model, or the reason it failed to train
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum ModelOutcome {
    Trained { r2: Option<f64>, rmse: Option<f64> },
    Failed { error: String },
}

impl ModelOutcome {
    fn from_value(value: &Value) -> Self {
        if let Some(error) = upstream_error_message(value) {
            return ModelOutcome::Failed { error };
        }
        let metric = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_f64)
                .filter(|v| v.is_finite())
        };
        ModelOutcome::Trained {
            r2: metric("r2"),
            rmse: metric("rmse"),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PredictionRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub current_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub ensemble_prediction: Option<EnsemblePrediction>,
    /// Model-stated recommendation, independent of the heuristic one
    #[serde(default, deserialize_with = "lenient_string")]
    pub recommendation: Option<String>,
    /// Model name to metrics, in upstream order
    #[serde(default, deserialize_with = "lenient_object")]
    pub training_results: Option<Map<String, Value>>,
}

impl PredictionRecord {
    pub fn from_payload(endpoint: &str, payload: Value) -> DashboardResult<Self> {
        decode(endpoint, payload)
    }

    pub fn ensemble(&self) -> EnsemblePrediction {
        self.ensemble_prediction.clone().unwrap_or_default()
    }

    /// Per-model outcomes, preserving upstream order.
    pub fn model_outcomes(&self) -> Vec<(String, ModelOutcome)> {
        self.training_results
            .iter()
            .flatten()
            .map(|(name, value)| (name.clone(), ModelOutcome::from_value(value)))
            .collect()
    }
}
