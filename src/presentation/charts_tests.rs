//! Unit tests for chart series.

#[cfg(test)]
mod charts_tests {
    use crate::data::records::{IndicatorValues, ModelOutcome, TechnicalSummary};
    use crate::presentation::charts::*;

    fn summary() -> TechnicalSummary {
        TechnicalSummary {
            current_price: Some(245.5),
            rsi: Some(45.0),
            macd: Some(1.2),
            ..Default::default()
        }
    }

    fn indicators() -> IndicatorValues {
        IndicatorValues {
            close: Some(245.5),
            sma_20: Some(240.0),
            sma_50: Some(250.0),
            ..Default::default()
        }
    }

    // ============= Price Chart Tests =============

    #[test]
    fn test_price_chart_window() {
        let chart = price_chart("TSLA", &summary(), &indicators());
        assert_eq!(chart.title, "TSLA - Price & Moving Averages");
        assert_eq!(chart.kind, ChartKind::Line);
        assert_eq!(chart.labels.len(), 21);
        assert_eq!(chart.labels[0], "Day 1");
        assert_eq!(chart.labels[20], "Day 21");
    }

    #[test]
    fn test_price_chart_datasets() {
        let chart = price_chart("TSLA", &summary(), &indicators());
        let labels: Vec<&str> = chart.datasets.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["Price", "SMA 20", "SMA 50"]);

        let sma = chart.dataset("SMA 50").unwrap();
        assert_eq!(sma.data.len(), 21);
        assert!(sma.data.iter().all(|v| *v == 250.0));
    }

    #[test]
    fn test_price_chart_skips_unknown_series() {
        let indicators = IndicatorValues {
            sma_20: Some(240.0),
            ..Default::default()
        };
        let chart = price_chart("TSLA", &summary(), &indicators);
        assert!(chart.dataset("SMA 50").is_none());
        assert!(chart.dataset("Price").is_some());
    }

    #[test]
    fn test_price_chart_falls_back_to_summary_averages() {
        let summary = TechnicalSummary {
            sma_50: Some(251.0),
            ..summary()
        };
        let chart = price_chart("TSLA", &summary, &IndicatorValues::default());
        assert_eq!(chart.dataset("SMA 50").unwrap().data[0], 251.0);
    }

    // ============= Indicators Chart Tests =============

    #[test]
    fn test_indicators_chart_axes() {
        let chart = indicators_chart("TSLA", &summary());
        assert_eq!(chart.title, "TSLA - Technical Indicators");
        assert_eq!(chart.dataset("RSI").unwrap().axis, "y");
        assert_eq!(chart.dataset("MACD").unwrap().axis, "y1");

        let rsi_axis = &chart.axes[0];
        assert_eq!(rsi_axis.min, Some(0.0));
        assert_eq!(rsi_axis.max, Some(100.0));
        assert_eq!(chart.axes[1].position, AxisPosition::Right);
    }

    // ============= Model Performance Tests =============

    #[test]
    fn test_model_performance_chart_skips_failed_models() {
        let outcomes = vec![
            (
                "random_forest".to_string(),
                ModelOutcome::Trained {
                    r2: Some(0.9),
                    rmse: Some(3.0),
                },
            ),
            (
                "lstm".to_string(),
                ModelOutcome::Failed {
                    error: "not enough data".to_string(),
                },
            ),
            (
                "svr".to_string(),
                ModelOutcome::Trained {
                    r2: None,
                    rmse: Some(7.5),
                },
            ),
        ];
        let chart = model_performance_chart(&outcomes);

        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(chart.labels, vec!["RANDOM FOREST", "SVR"]);
        assert_eq!(chart.dataset("R² Score").unwrap().data, vec![0.9, 0.0]);
        assert_eq!(chart.dataset("RMSE").unwrap().data, vec![3.0, 7.5]);
    }
}
