use serde::{Deserialize, Serialize};

use crate::constants::prediction::{LOW_RISK_CONFIDENCE, MEDIUM_RISK_CONFIDENCE};
use crate::constants::thresholds::{RSI_OVERBOUGHT, RSI_OVERSOLD, STRONG_SCORE, WEAK_SCORE};
use crate::error::ValidationError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Buy => "BUY",
            Action::Sell => "SELL",
            Action::Hold => "HOLD",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Heuristic recommendation derived from the technical summary
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: Action,
    pub reasoning: String,
}

const BUY_REASON: &str = "Strong upward trend with good momentum. ";
const SELL_REASON: &str = "Weak trend with declining momentum. ";
const HOLD_REASON: &str = "Mixed signals detected. ";
const OVERBOUGHT_CAVEAT: &str = "Stock may be overbought. ";
const OVERSOLD_CAVEAT: &str = "Stock may be oversold. ";

/// BUY is checked strictly before SELL; anything else is HOLD. The RSI
/// caveat is appended independently of the chosen action.
pub fn recommend(trend_score: f64, momentum_score: f64, rsi: f64) -> Recommendation {
    let (action, base) = if trend_score >= STRONG_SCORE
        && momentum_score >= STRONG_SCORE
        && rsi < RSI_OVERBOUGHT
    {
        (Action::Buy, BUY_REASON)
    } else if trend_score <= WEAK_SCORE && momentum_score <= WEAK_SCORE && rsi > RSI_OVERSOLD {
        (Action::Sell, SELL_REASON)
    } else {
        (Action::Hold, HOLD_REASON)
    };

    let mut reasoning = base.to_string();
    if rsi > RSI_OVERBOUGHT {
        reasoning.push_str(OVERBOUGHT_CAVEAT);
    } else if rsi < RSI_OVERSOLD {
        reasoning.push_str(OVERSOLD_CAVEAT);
    }

    Recommendation { action, reasoning }
}

/// `(target - current) / current * 100`; a zero current price has no defined change.
pub fn expected_change_pct(current: f64, target: f64) -> Result<f64, ValidationError> {
    if current == 0.0 || !current.is_finite() || !target.is_finite() {
        return Err(ValidationError::ZeroCurrentPrice);
    }
    Ok((target - current) / current * 100.0)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

pub fn risk_level(confidence: f64) -> RiskLevel {
    if confidence > LOW_RISK_CONFIDENCE {
        RiskLevel::Low
    } else if confidence > MEDIUM_RISK_CONFIDENCE {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}
