//! Unit tests for the field normalizer - defaults and display formatting.

#[cfg(test)]
mod normalize_tests {
    use crate::data::normalize::*;
    use crate::error::ValidationError;

    // ============= Symbol Tests =============

    #[test]
    fn test_normalize_symbol_trims_and_uppercases() {
        assert_eq!(normalize_symbol("  tsla ").unwrap(), "TSLA");
        assert_eq!(normalize_symbol("Aapl").unwrap(), "AAPL");
    }

    #[test]
    fn test_normalize_symbol_rejects_blank_input() {
        assert_eq!(normalize_symbol(""), Err(ValidationError::EmptySymbol));
        assert_eq!(normalize_symbol("   \t"), Err(ValidationError::EmptySymbol));
    }

    // ============= Fixed-Point Tests =============

    #[test]
    fn test_to_fixed_rounds_ties_away_from_zero() {
        assert_eq!(to_fixed(1.25, 1), "1.3");
        assert_eq!(to_fixed(-1.25, 1), "-1.3");
        assert_eq!(to_fixed(2.5, 0), "3");
    }

    #[test]
    fn test_to_fixed_pads_decimals() {
        assert_eq!(to_fixed(45.0, 1), "45.0");
        assert_eq!(to_fixed(2.0, 2), "2.00");
        assert_eq!(to_fixed(123.456, 2), "123.46");
    }

    #[test]
    fn test_to_fixed_never_prints_nan() {
        assert_eq!(to_fixed(f64::NAN, 2), "N/A");
        assert_eq!(to_fixed(f64::INFINITY, 2), "N/A");
    }

    #[test]
    fn test_plain_number() {
        assert_eq!(plain_number(3.0), "3");
        assert_eq!(plain_number(2.5), "2.5");
        assert_eq!(plain_number(0.0), "0");
    }

    // ============= Defaults Tests =============

    #[test]
    fn test_or_zero_and_non_zero() {
        assert_eq!(or_zero(None), 0.0);
        assert_eq!(or_zero(Some(4.2)), 4.2);
        assert_eq!(non_zero(Some(0.0)), None);
        assert_eq!(non_zero(Some(-1.0)), Some(-1.0));
        assert_eq!(non_zero(None), None);
    }

    #[test]
    fn test_text_or_na() {
        assert_eq!(text_or_na(Some("Tesla, Inc.")), "Tesla, Inc.");
        assert_eq!(text_or_na(Some("")), "N/A");
        assert_eq!(text_or_na(Some("   ")), "N/A");
        assert_eq!(text_or_na(None), "N/A");
    }

    // ============= Currency & Percent Tests =============

    #[test]
    fn test_currency() {
        assert_eq!(currency(245.678), "$245.68");
        assert_eq!(currency(0.0), "$0.00");
        assert_eq!(currency_or_na(None), "N/A");
        assert_eq!(currency_or_na(Some(10.0)), "$10.00");
    }

    #[test]
    fn test_percent_scales_fraction() {
        assert_eq!(percent(0.153, 1), "15.3%");
        assert_eq!(percent(0.0045, 2), "0.45%");
    }

    #[test]
    fn test_ratio_percent_zero_is_not_available() {
        assert_eq!(ratio_percent_or_na(Some(0.0), 1), "N/A");
        assert_eq!(ratio_percent_or_na(None, 2), "N/A");
        assert_eq!(ratio_percent_or_na(Some(0.0825), 1), "8.3%");
    }

    #[test]
    fn test_fixed_or_na() {
        assert_eq!(fixed_or_na(Some(65.432), 2), "65.43");
        assert_eq!(fixed_or_na(None, 2), "N/A");
    }

    // ============= Market Cap Tests =============

    #[test]
    fn test_market_cap_trillions() {
        assert_eq!(format_market_cap(Some(2_500_000_000_000.0)), "$2.5T");
        assert_eq!(format_market_cap(Some(1_000_000_000_000.0)), "$1.0T");
    }

    #[test]
    fn test_market_cap_billions_and_millions() {
        assert_eq!(format_market_cap(Some(3_200_000_000.0)), "$3.2B");
        assert_eq!(format_market_cap(Some(4_560_000.0)), "$4.6M");
    }

    #[test]
    fn test_market_cap_small_value_is_raw() {
        assert_eq!(format_market_cap(Some(999_999.0)), "$999999");
    }

    #[test]
    fn test_market_cap_zero_or_missing() {
        assert_eq!(format_market_cap(Some(0.0)), "N/A");
        assert_eq!(format_market_cap(None), "N/A");
    }

    // ============= Volume Tests =============

    #[test]
    fn test_volume_millions() {
        assert_eq!(format_volume(1_250_000.0), "1.3M");
        assert_eq!(format_volume(1_000_000.0), "1.0M");
    }

    #[test]
    fn test_volume_thousands() {
        assert_eq!(format_volume(12_345.0), "12.3K");
        assert_eq!(format_volume(1_000.0), "1.0K");
    }

    #[test]
    fn test_volume_small_is_raw_integer() {
        assert_eq!(format_volume(500.0), "500");
        assert_eq!(format_volume(999.0), "999");
        assert_eq!(format_volume(0.0), "0");
    }

    // ============= Model Name Tests =============

    #[test]
    fn test_model_display_name_replaces_first_underscore_only() {
        assert_eq!(model_display_name("random_forest"), "RANDOM FOREST");
        assert_eq!(
            model_display_name("gradient_boosting_regressor"),
            "GRADIENT BOOSTING_REGRESSOR"
        );
        assert_eq!(model_display_name("lstm"), "LSTM");
    }
}
