use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::analysis::indicators::{compare_opt, macd_bias, rsi_label};
use crate::analysis::{classify_signal, expected_change_pct, recommend, risk_level, rsi_zone};
use crate::analysis::{Polarity, Recommendation, RiskLevel, SignalKind};
use crate::constants::display::NOT_AVAILABLE;
use crate::constants::prediction::{DEFAULT_CONFIDENCE, MAX_MODEL_DETAILS};
use crate::constants::thresholds::{MAX_SCORE, PIOTROSKI_MAX};
use crate::data::normalize::{
    currency_or_na, fixed_or_na, format_market_cap, format_volume, model_display_name, non_zero,
    or_zero, plain_number, ratio_percent_or_na, text_or_na, to_fixed,
};
use crate::data::records::{
    FundamentalRecord, IndicatorValues, ModelOutcome, PredictionRecord, TechnicalRecord,
    TechnicalSummary,
};

use super::charts::{indicators_chart, model_performance_chart, price_chart, DashboardCharts};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Headline {
    pub current_price: String,
    pub trend_score: String,
    pub momentum_score: String,
    pub rsi: String,
    pub macd: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IndicatorRow {
    pub label: String,
    pub value: String,
    pub polarity: Polarity,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FundamentalRow {
    pub label: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FundamentalSection {
    Available { rows: Vec<FundamentalRow> },
    Unavailable { reason: String },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SignalItem {
    pub text: String,
    pub kind: SignalKind,
    pub icon: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModelPerformance {
    pub name: String,
    pub r2: String,
    pub rmse: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TechnicalInsights {
    pub trend_score: String,
    pub momentum_score: String,
    pub rsi: String,
    pub rsi_label: String,
    pub macd_signal: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PredictionView {
    pub target_price: String,
    pub confidence: String,
    /// Stated by the prediction service; not reconciled with the heuristic one
    pub model_recommendation: String,
    pub current_price: String,
    pub expected_change: String,
    pub expected_change_pct: Option<f64>,
    pub price_rising: bool,
    pub risk_level: RiskLevel,
    pub models: Vec<ModelPerformance>,
    pub insights: TechnicalInsights,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PresentationModel {
    pub session_id: Uuid,
    pub symbol: String,
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub headline: Headline,
    pub technical_indicators: Vec<IndicatorRow>,
    pub fundamentals: FundamentalSection,
    pub signals: Vec<SignalItem>,
    pub recommendation: Recommendation,
    pub charts: DashboardCharts,
    pub prediction: Option<PredictionView>,
}

fn score_out_of(score: Option<f64>, max: u32) -> String {
    match score {
        Some(s) => format!("{}/{}", plain_number(s), max),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn row(label: &str, value: String, polarity: Polarity) -> IndicatorRow {
    IndicatorRow {
        label: label.to_string(),
        value,
        polarity,
    }
}

fn indicator_rows(ind: &IndicatorValues) -> Vec<IndicatorRow> {
    vec![
        row("Current Price", currency_or_na(ind.close), Polarity::Neutral),
        row("SMA (20)", currency_or_na(ind.sma_20), compare_opt(ind.close, ind.sma_20)),
        row("SMA (50)", currency_or_na(ind.sma_50), compare_opt(ind.close, ind.sma_50)),
        row("EMA (12)", currency_or_na(ind.ema_12), compare_opt(ind.close, ind.ema_12)),
        row(
            "RSI",
            fixed_or_na(ind.rsi, 1),
            ind.rsi.map(rsi_zone).unwrap_or(Polarity::Neutral),
        ),
        row("MACD", fixed_or_na(ind.macd, 2), compare_opt(ind.macd, Some(0.0))),
        row("Bollinger Upper", currency_or_na(ind.bb_upper), Polarity::Neutral),
        row("Bollinger Lower", currency_or_na(ind.bb_lower), Polarity::Neutral),
        row("ATR", fixed_or_na(ind.atr, 2), Polarity::Neutral),
        row(
            "Volume",
            ind.volume
                .map(format_volume)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            Polarity::Neutral,
        ),
    ]
}

impl FundamentalSection {
    pub fn from_record(record: &FundamentalRecord) -> Self {
        let basic = record.basic_info.clone().unwrap_or_default();
        let valuation = record.valuation_ratios.clone().unwrap_or_default();
        let profitability = record.profitability_ratios.clone().unwrap_or_default();
        let health = record.financial_health.clone().unwrap_or_default();

        let cell = |label: &str, value: String| FundamentalRow {
            label: label.to_string(),
            value,
        };

        let rows = vec![
            cell("Company Name", text_or_na(basic.company_name.as_deref())),
            cell("Sector", text_or_na(basic.sector.as_deref())),
            cell("Market Cap", format_market_cap(basic.market_cap)),
            cell("P/E Ratio", fixed_or_na(non_zero(valuation.pe_ratio), 2)),
            cell("P/B Ratio", fixed_or_na(non_zero(valuation.pb_ratio), 2)),
            cell("ROE", ratio_percent_or_na(profitability.roe, 1)),
            cell("ROA", ratio_percent_or_na(profitability.roa, 1)),
            cell("Altman Z-Score", fixed_or_na(non_zero(health.altman_z_score), 2)),
            cell(
                "Piotroski Score",
                non_zero(health.piotroski_score)
                    .map(|s| format!("{}/{}", plain_number(s), PIOTROSKI_MAX))
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            ),
            cell("Dividend Yield", ratio_percent_or_na(basic.dividend_yield, 2)),
        ];

        FundamentalSection::Available { rows }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        FundamentalSection::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, FundamentalSection::Available { .. })
    }

    pub fn rows(&self) -> &[FundamentalRow] {
        match self {
            FundamentalSection::Available { rows } => rows,
            FundamentalSection::Unavailable { .. } => &[],
        }
    }
}

impl TechnicalInsights {
    pub fn from_summary(summary: &TechnicalSummary) -> Self {
        let rsi = or_zero(summary.rsi);
        Self {
            trend_score: score_out_of(summary.trend_score, MAX_SCORE),
            momentum_score: score_out_of(summary.momentum_score, MAX_SCORE),
            rsi: to_fixed(rsi, 1),
            rsi_label: rsi_label(rsi).to_string(),
            macd_signal: macd_bias(or_zero(summary.macd)).to_string(),
        }
    }
}

impl PredictionView {
    pub fn build(record: &PredictionRecord, summary: &TechnicalSummary) -> Self {
        let current = or_zero(record.current_price);
        let ensemble = record.ensemble();
        let target = non_zero(ensemble.ensemble_prediction).unwrap_or(current);
        let confidence = non_zero(ensemble.confidence).unwrap_or(DEFAULT_CONFIDENCE);

        let change = expected_change_pct(current, target).ok();

        let models = record
            .model_outcomes()
            .into_iter()
            .filter_map(|(name, outcome)| match outcome {
                ModelOutcome::Trained { r2, rmse } => Some(ModelPerformance {
                    name: model_display_name(&name),
                    r2: to_fixed(r2.unwrap_or(0.0), 3),
                    rmse: to_fixed(rmse.unwrap_or(0.0), 2),
                }),
                ModelOutcome::Failed { .. } => None,
            })
            .take(MAX_MODEL_DETAILS)
            .collect();

        Self {
            target_price: currency_or_na(Some(target)),
            confidence: format!("{}%", to_fixed(confidence * 100.0, 1)),
            model_recommendation: text_or_na(record.recommendation.as_deref()),
            current_price: currency_or_na(record.current_price),
            expected_change: change
                .map(|pct| format!("{}%", to_fixed(pct, 2)))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            expected_change_pct: change,
            price_rising: target > current,
            risk_level: risk_level(confidence),
            models,
            insights: TechnicalInsights::from_summary(summary),
        }
    }
}

impl PresentationModel {
    /// Assemble the dashboard from a technical record (mandatory) and whatever
    /// fundamental section could be obtained.
    pub fn build(
        session_id: Uuid,
        symbol: &str,
        technical: &TechnicalRecord,
        fundamentals: FundamentalSection,
    ) -> Self {
        let summary = technical.summary();
        let indicators = technical.indicators();

        let signals = summary
            .signals
            .iter()
            .map(|text| {
                let kind = classify_signal(text);
                SignalItem {
                    text: text.clone(),
                    kind,
                    icon: kind.icon().to_string(),
                }
            })
            .collect();

        Self {
            session_id,
            symbol: symbol.to_string(),
            title: format!("{} Analysis", symbol),
            generated_at: Utc::now(),
            headline: Headline {
                current_price: currency_or_na(summary.current_price),
                trend_score: score_out_of(summary.trend_score, MAX_SCORE),
                momentum_score: score_out_of(summary.momentum_score, MAX_SCORE),
                rsi: fixed_or_na(summary.rsi, 1),
                macd: fixed_or_na(summary.macd, 2),
            },
            technical_indicators: indicator_rows(&indicators),
            fundamentals,
            signals,
            recommendation: recommend(
                or_zero(summary.trend_score),
                or_zero(summary.momentum_score),
                or_zero(summary.rsi),
            ),
            charts: DashboardCharts {
                price: price_chart(symbol, &summary, &indicators),
                indicators: indicators_chart(symbol, &summary),
                model_performance: None,
            },
            prediction: None,
        }
    }

    /// Merge a prediction into this model, replacing any earlier one.
    pub fn apply_prediction(&mut self, record: &PredictionRecord, summary: &TechnicalSummary) {
        self.prediction = Some(PredictionView::build(record, summary));
        self.charts.model_performance = record
            .training_results
            .as_ref()
            .map(|_| model_performance_chart(&record.model_outcomes()));
    }

    pub fn indicator(&self, label: &str) -> Option<&IndicatorRow> {
        self.technical_indicators.iter().find(|r| r.label == label)
    }
}
