//! Plain-text rendering of a presentation model for terminal sinks.

use std::fmt::Write;

use crate::analysis::{Polarity, SignalKind};
use crate::constants::display::{FUNDAMENTALS_UNAVAILABLE, NO_SIGNALS};

use super::model::{FundamentalSection, PredictionView, PresentationModel};

fn polarity_marker(polarity: Polarity) -> &'static str {
    match polarity {
        Polarity::Positive => "▲",
        Polarity::Negative => "▼",
        Polarity::Neutral => "•",
    }
}

fn signal_marker(kind: SignalKind) -> &'static str {
    match kind {
        SignalKind::Bullish => "▲",
        SignalKind::Bearish => "▼",
        SignalKind::Neutral => "•",
    }
}

pub fn render_text(model: &PresentationModel) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_dashboard(&mut out, model);
    out
}

fn write_dashboard(out: &mut String, model: &PresentationModel) -> std::fmt::Result {
    let h = &model.headline;
    writeln!(out, "=== {} ===", model.title)?;
    writeln!(
        out,
        "Price {} | Trend {} | Momentum {} | RSI {} | MACD {}",
        h.current_price, h.trend_score, h.momentum_score, h.rsi, h.macd
    )?;
    writeln!(
        out,
        "Recommendation: {} - {}",
        model.recommendation.action,
        model.recommendation.reasoning.trim_end()
    )?;

    writeln!(out, "\n-- Technical Indicators --")?;
    for row in &model.technical_indicators {
        writeln!(
            out,
            "{:<16} {:>14} {}",
            row.label,
            row.value,
            polarity_marker(row.polarity)
        )?;
    }

    writeln!(out, "\n-- Fundamental Analysis --")?;
    match &model.fundamentals {
        FundamentalSection::Available { rows } => {
            for row in rows {
                writeln!(out, "{:<16} {:>14}", row.label, row.value)?;
            }
        }
        FundamentalSection::Unavailable { .. } => writeln!(out, "{}", FUNDAMENTALS_UNAVAILABLE)?,
    }

    writeln!(out, "\n-- Trading Signals --")?;
    if model.signals.is_empty() {
        writeln!(out, "{} {}", signal_marker(SignalKind::Neutral), NO_SIGNALS)?;
    }
    for signal in &model.signals {
        writeln!(out, "{} {}", signal_marker(signal.kind), signal.text)?;
    }

    if let Some(prediction) = &model.prediction {
        write_prediction(out, prediction)?;
    }
    Ok(())
}

fn write_prediction(out: &mut String, p: &PredictionView) -> std::fmt::Result {
    writeln!(out, "\n-- AI Prediction --")?;
    writeln!(out, "Price Target: {} (confidence {})", p.target_price, p.confidence)?;
    writeln!(out, "AI Recommendation: {} (current {})", p.model_recommendation, p.current_price)?;
    writeln!(
        out,
        "Expected Change: {} | Risk Level: {}",
        p.expected_change,
        p.risk_level.as_str()
    )?;
    for m in &p.models {
        writeln!(out, "  {:<20} R² {:>7}  RMSE {:>8}", m.name, m.r2, m.rmse)?;
    }
    let i = &p.insights;
    writeln!(
        out,
        "Trend {} | Momentum {} | RSI {} ({}) | MACD {}",
        i.trend_score, i.momentum_score, i.rsi, i.rsi_label, i.macd_signal
    )
}

pub fn render_prediction_error(symbol: &str, reason: &str) -> String {
    format!("⚠️ Error getting prediction for {}: {}", symbol, reason)
}
