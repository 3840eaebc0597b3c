//! Chart series handed to the rendering layer.
//!
//! Only the data is produced here. Any visual decoration (jitter, colours,
//! dash patterns) is the renderer's business.

use serde::Serialize;

use crate::constants::charts::WINDOW_POINTS;
use crate::data::normalize::model_display_name;
use crate::data::records::{IndicatorValues, ModelOutcome, TechnicalSummary};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisPosition {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Axis {
    pub id: String,
    pub title: String,
    pub position: AxisPosition,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Axis {
    fn new(id: &str, title: &str, position: AxisPosition) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            position,
            min: None,
            max: None,
        }
    }

    fn bounded(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub axis: String,
    pub data: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub axes: Vec<Axis>,
}

impl ChartSpec {
    pub fn dataset(&self, label: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.label == label)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardCharts {
    pub price: ChartSpec,
    pub indicators: ChartSpec,
    /// Present once a prediction has been merged in
    pub model_performance: Option<ChartSpec>,
}

fn window_labels() -> Vec<String> {
    (1..=WINDOW_POINTS).map(|day| format!("Day {}", day)).collect()
}

/// A flat series over the window; skipped when the value is unknown.
fn flat(label: &str, axis: &str, value: Option<f64>) -> Option<Dataset> {
    value.map(|v| Dataset {
        label: label.to_string(),
        axis: axis.to_string(),
        data: vec![v; WINDOW_POINTS],
    })
}

pub fn price_chart(symbol: &str, summary: &TechnicalSummary, indicators: &IndicatorValues) -> ChartSpec {
    let datasets = [
        flat("Price", "y", summary.current_price.or(indicators.close)),
        flat("SMA 20", "y", indicators.sma_20.or(summary.sma_20)),
        flat("SMA 50", "y", indicators.sma_50.or(summary.sma_50)),
    ];

    ChartSpec {
        title: format!("{} - Price & Moving Averages", symbol),
        kind: ChartKind::Line,
        labels: window_labels(),
        datasets: datasets.into_iter().flatten().collect(),
        axes: vec![Axis::new("y", "Price ($)", AxisPosition::Left)],
    }
}

pub fn indicators_chart(symbol: &str, summary: &TechnicalSummary) -> ChartSpec {
    let datasets = [
        flat("RSI", "y", summary.rsi),
        flat("MACD", "y1", summary.macd),
    ];

    ChartSpec {
        title: format!("{} - Technical Indicators", symbol),
        kind: ChartKind::Line,
        labels: window_labels(),
        datasets: datasets.into_iter().flatten().collect(),
        axes: vec![
            Axis::new("y", "RSI", AxisPosition::Left).bounded(0.0, 100.0),
            Axis::new("y1", "MACD", AxisPosition::Right),
        ],
    }
}

/// R² and RMSE for every model that trained, in upstream order.
pub fn model_performance_chart(outcomes: &[(String, ModelOutcome)]) -> ChartSpec {
    let mut labels = Vec::new();
    let mut r2_scores = Vec::new();
    let mut rmse_values = Vec::new();

    for (name, outcome) in outcomes {
        if let ModelOutcome::Trained { r2, rmse } = outcome {
            labels.push(model_display_name(name));
            r2_scores.push(r2.unwrap_or(0.0));
            rmse_values.push(rmse.unwrap_or(0.0));
        }
    }

    ChartSpec {
        title: "Model Performance Metrics".to_string(),
        kind: ChartKind::Bar,
        labels,
        datasets: vec![
            Dataset {
                label: "R² Score".to_string(),
                axis: "y".to_string(),
                data: r2_scores,
            },
            Dataset {
                label: "RMSE".to_string(),
                axis: "y1".to_string(),
                data: rmse_values,
            },
        ],
        axes: vec![
            Axis::new("y", "R² Score", AxisPosition::Left).bounded(0.0, 1.0),
            Axis::new("y1", "RMSE", AxisPosition::Right),
        ],
    }
}
