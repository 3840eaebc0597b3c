//! Unit tests for indicator polarity and signal classification.

#[cfg(test)]
mod indicators_tests {
    use crate::analysis::indicators::*;

    // ============= Comparison Tests =============

    #[test]
    fn test_compare() {
        assert_eq!(compare(245.5, 240.0), Polarity::Positive);
        assert_eq!(compare(245.5, 250.0), Polarity::Negative);
        assert_eq!(compare(245.5, 245.5), Polarity::Neutral);
        assert_eq!(compare(f64::NAN, 1.0), Polarity::Neutral);
    }

    #[test]
    fn test_compare_opt_missing_side_is_neutral() {
        assert_eq!(compare_opt(Some(2.0), Some(1.0)), Polarity::Positive);
        assert_eq!(compare_opt(None, Some(1.0)), Polarity::Neutral);
        assert_eq!(compare_opt(Some(1.0), None), Polarity::Neutral);
    }

    // ============= RSI Tests =============

    #[test]
    fn test_rsi_zone_boundaries() {
        assert_eq!(rsi_zone(70.1), Polarity::Negative);
        assert_eq!(rsi_zone(70.0), Polarity::Neutral);
        assert_eq!(rsi_zone(45.0), Polarity::Neutral);
        assert_eq!(rsi_zone(30.0), Polarity::Neutral);
        assert_eq!(rsi_zone(29.9), Polarity::Positive);
    }

    #[test]
    fn test_rsi_label() {
        assert_eq!(rsi_label(75.0), "Overbought");
        assert_eq!(rsi_label(25.0), "Oversold");
        assert_eq!(rsi_label(70.0), "Neutral");
    }

    #[test]
    fn test_macd_bias_zero_is_bearish() {
        assert_eq!(macd_bias(1.2), "Bullish");
        assert_eq!(macd_bias(0.0), "Bearish");
        assert_eq!(macd_bias(-0.3), "Bearish");
    }

    // ============= Signal Tests =============

    #[test]
    fn test_classify_signal_keywords() {
        assert_eq!(classify_signal("RSI Oversold"), SignalKind::Bullish);
        assert_eq!(classify_signal("Above Bollinger Upper Band"), SignalKind::Bearish);
        assert_eq!(classify_signal("Volume spike"), SignalKind::Neutral);
        assert_eq!(classify_signal("Price Below SMA 50"), SignalKind::Bullish);
        assert_eq!(classify_signal("RSI Overbought"), SignalKind::Bearish);
    }

    #[test]
    fn test_classify_signal_first_rule_wins() {
        // Both "Oversold" and "Above" match; "Oversold" is checked first
        assert_eq!(
            classify_signal("Price Above upper band but RSI Oversold"),
            SignalKind::Bullish
        );
        // "Below" precedes "Overbought"
        assert_eq!(
            classify_signal("Overbought yet Below SMA 20"),
            SignalKind::Bullish
        );
    }

    #[test]
    fn test_classify_signal_is_case_sensitive() {
        assert_eq!(classify_signal("price below sma"), SignalKind::Neutral);
        assert_eq!(classify_signal(""), SignalKind::Neutral);
    }

    #[test]
    fn test_classify_signal_is_deterministic() {
        let text = "MACD Bullish Crossover";
        assert_eq!(classify_signal(text), classify_signal(text));
    }

    #[test]
    fn test_signal_kind_icons() {
        assert_eq!(SignalKind::Bullish.icon(), "arrow-up");
        assert_eq!(SignalKind::Bearish.icon(), "arrow-down");
        assert_eq!(SignalKind::Neutral.icon(), "minus");
        assert_eq!(serde_json::to_string(&SignalKind::Bearish).unwrap(), "\"bearish\"");
        assert_eq!(serde_json::to_string(&Polarity::Positive).unwrap(), "\"positive\"");
    }
}
