//! Unit tests for the recommendation heuristic and prediction-derived figures.

#[cfg(test)]
mod recommendation_tests {
    use crate::analysis::recommendation::*;
    use crate::error::ValidationError;

    // ============= Recommendation Tests =============

    #[test]
    fn test_recommend_buy() {
        let rec = recommend(3.0, 3.0, 45.0);
        assert_eq!(rec.action, Action::Buy);
        assert_eq!(rec.reasoning, "Strong upward trend with good momentum. ");
    }

    #[test]
    fn test_recommend_buy_with_oversold_caveat() {
        let rec = recommend(2.0, 2.0, 20.0);
        assert_eq!(rec.action, Action::Buy);
        assert_eq!(
            rec.reasoning,
            "Strong upward trend with good momentum. Stock may be oversold. "
        );
    }

    #[test]
    fn test_recommend_sell() {
        let rec = recommend(1.0, 1.0, 50.0);
        assert_eq!(rec.action, Action::Sell);
        assert_eq!(rec.reasoning, "Weak trend with declining momentum. ");
    }

    #[test]
    fn test_recommend_sell_with_overbought_caveat() {
        let rec = recommend(0.0, 1.0, 80.0);
        assert_eq!(rec.action, Action::Sell);
        assert_eq!(
            rec.reasoning,
            "Weak trend with declining momentum. Stock may be overbought. "
        );
    }

    #[test]
    fn test_recommend_hold_when_strong_but_overbought() {
        let rec = recommend(3.0, 3.0, 75.0);
        assert_eq!(rec.action, Action::Hold);
        assert_eq!(
            rec.reasoning,
            "Mixed signals detected. Stock may be overbought. "
        );
    }

    #[test]
    fn test_recommend_thresholds_are_strict() {
        // rsi == 70 blocks BUY but adds no caveat
        let rec = recommend(2.0, 2.0, 70.0);
        assert_eq!(rec.action, Action::Hold);
        assert_eq!(rec.reasoning, "Mixed signals detected. ");

        // rsi == 30 blocks SELL but adds no caveat
        let rec = recommend(0.0, 0.0, 30.0);
        assert_eq!(rec.action, Action::Hold);
        assert_eq!(rec.reasoning, "Mixed signals detected. ");
    }

    #[test]
    fn test_recommend_weak_and_oversold_is_hold() {
        let rec = recommend(0.0, 0.0, 25.0);
        assert_eq!(rec.action, Action::Hold);
        assert_eq!(rec.reasoning, "Mixed signals detected. Stock may be oversold. ");
    }

    #[test]
    fn test_recommend_mixed_scores() {
        assert_eq!(recommend(3.0, 1.0, 50.0).action, Action::Hold);
        assert_eq!(recommend(1.0, 3.0, 50.0).action, Action::Hold);
    }

    #[test]
    fn test_recommend_is_total_and_deterministic() {
        let rsis = [0.0, 29.9, 30.0, 50.0, 70.0, 70.1, 100.0];
        for trend in 0..=3 {
            for momentum in 0..=3 {
                for rsi in rsis {
                    let a = recommend(trend as f64, momentum as f64, rsi);
                    let b = recommend(trend as f64, momentum as f64, rsi);
                    assert_eq!(a, b);
                    assert!(!a.reasoning.is_empty());
                    assert!(a.reasoning.ends_with(' '));
                }
            }
        }
    }

    #[test]
    fn test_action_display() {
        assert_eq!(Action::Buy.to_string(), "BUY");
        assert_eq!(Action::Hold.as_str(), "HOLD");
        assert_eq!(serde_json::to_string(&Action::Sell).unwrap(), "\"SELL\"");
    }

    // ============= Expected Change Tests =============

    #[test]
    fn test_expected_change_pct() {
        let change = expected_change_pct(200.0, 230.0).unwrap();
        assert!((change - 15.0).abs() < 1e-9);

        let change = expected_change_pct(100.0, 90.0).unwrap();
        assert!((change + 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_expected_change_zero_price_is_undefined() {
        assert_eq!(
            expected_change_pct(0.0, 10.0),
            Err(ValidationError::ZeroCurrentPrice)
        );
        assert!(expected_change_pct(f64::NAN, 10.0).is_err());
    }

    // ============= Risk Tests =============

    #[test]
    fn test_risk_level_thresholds() {
        assert_eq!(risk_level(0.82), RiskLevel::Low);
        assert_eq!(risk_level(0.71), RiskLevel::Low);
        assert_eq!(risk_level(0.7), RiskLevel::Medium);
        assert_eq!(risk_level(0.51), RiskLevel::Medium);
        assert_eq!(risk_level(0.5), RiskLevel::High);
        assert_eq!(risk_level(0.1), RiskLevel::High);
    }
}
