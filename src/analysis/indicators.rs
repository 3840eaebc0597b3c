use serde::{Deserialize, Serialize};

use crate::constants::thresholds::{RSI_OVERBOUGHT, RSI_OVERSOLD};

/// Styling polarity of an indicator cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
}

/// Positive iff `a > b`, negative iff `a < b`, neutral otherwise (including NaN).
pub fn compare(a: f64, b: f64) -> Polarity {
    if a > b {
        Polarity::Positive
    } else if a < b {
        Polarity::Negative
    } else {
        Polarity::Neutral
    }
}

/// Polarity for optional operands; a missing side is neutral.
pub fn compare_opt(a: Option<f64>, b: Option<f64>) -> Polarity {
    match (a, b) {
        (Some(a), Some(b)) => compare(a, b),
        _ => Polarity::Neutral,
    }
}

/// Contrarian RSI zone: oversold reads as positive (a buy setup), overbought
/// as negative. 30 and 70 themselves are neutral.
pub fn rsi_zone(rsi: f64) -> Polarity {
    if rsi > RSI_OVERBOUGHT {
        Polarity::Negative
    } else if rsi < RSI_OVERSOLD {
        Polarity::Positive
    } else {
        Polarity::Neutral
    }
}

/// "Overbought" / "Oversold" / "Neutral"
pub fn rsi_label(rsi: f64) -> &'static str {
    if rsi > RSI_OVERBOUGHT {
        "Overbought"
    } else if rsi < RSI_OVERSOLD {
        "Oversold"
    } else {
        "Neutral"
    }
}

/// MACD sign bias; zero counts as bearish.
pub fn macd_bias(macd: f64) -> &'static str {
    if macd > 0.0 {
        "Bullish"
    } else {
        "Bearish"
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    Bullish,
    Bearish,
    Neutral,
}

impl SignalKind {
    pub fn icon(&self) -> &'static str {
        match self {
            SignalKind::Bullish => "arrow-up",
            SignalKind::Bearish => "arrow-down",
            SignalKind::Neutral => "minus",
        }
    }
}

/// Ordered keyword rules, first match wins.
pub const SIGNAL_RULES: &[(&str, SignalKind)] = &[
    ("Oversold", SignalKind::Bullish),
    ("Below", SignalKind::Bullish),
    ("Overbought", SignalKind::Bearish),
    ("Above", SignalKind::Bearish),
];

/// Classify a signal string by case-sensitive substring match.
pub fn classify_signal(text: &str) -> SignalKind {
    SIGNAL_RULES
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map(|(_, kind)| *kind)
        .unwrap_or(SignalKind::Neutral)
}
