//! Field normalizer: defaults and display formatting for loosely-shaped
//! upstream values.
//!
//! Display helpers return `N/A` for missing values; math helpers return `0`.
//! Nothing here produces `NaN` or `Infinity` text.

use crate::constants::display::NOT_AVAILABLE;
use crate::constants::magnitude::{BILLION, MILLION, THOUSAND, TRILLION};
use crate::error::ValidationError;

/// Trim and upper-case a user-entered symbol; whitespace-only input is rejected.
pub fn normalize_symbol(raw: &str) -> Result<String, ValidationError> {
    let symbol = raw.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(ValidationError::EmptySymbol);
    }
    Ok(symbol)
}

/// Numeric default for values that feed further math.
pub fn or_zero(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0)
}

/// `Some` only for present, non-zero values. Ratios reported as `0` upstream
/// mean "unknown" and are displayed as `N/A`.
pub fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

/// Fixed-point formatting with ties rounded away from zero.
///
/// `format!("{:.1}", 1.25)` rounds half to even and yields `1.2`; dashboard
/// figures round `1.25` to `1.3`.
pub fn to_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    if value < 0.0 {
        return format!("-{}", to_fixed(-value, decimals));
    }
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    format!("{:.*}", decimals, rounded)
}

/// Shortest plain rendering: `3` for whole numbers, `2.5` otherwise.
pub fn plain_number(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

pub fn text_or_na(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// `$` prefix, two decimals.
pub fn currency(value: f64) -> String {
    format!("${}", to_fixed(value, 2))
}

pub fn currency_or_na(value: Option<f64>) -> String {
    value.map(currency).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn fixed_or_na(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|v| to_fixed(v, decimals))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Fraction to percent: `0.153` -> `15.3%` at one decimal.
pub fn percent(fraction: f64, decimals: usize) -> String {
    format!("{}%", to_fixed(fraction * 100.0, decimals))
}

/// Percent display for ratios where zero means unknown.
pub fn ratio_percent_or_na(fraction: Option<f64>, decimals: usize) -> String {
    non_zero(fraction)
        .map(|v| percent(v, decimals))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Market capitalisation with T/B/M buckets; `N/A` when zero or absent.
pub fn format_market_cap(market_cap: Option<f64>) -> String {
    let Some(cap) = non_zero(market_cap) else {
        return NOT_AVAILABLE.to_string();
    };

    if cap >= TRILLION {
        format!("${}T", to_fixed(cap / TRILLION, 1))
    } else if cap >= BILLION {
        format!("${}B", to_fixed(cap / BILLION, 1))
    } else if cap >= MILLION {
        format!("${}M", to_fixed(cap / MILLION, 1))
    } else {
        format!("${}", to_fixed(cap, 0))
    }
}

/// Volume with M/K buckets; small volumes print as-is.
pub fn format_volume(volume: f64) -> String {
    if volume >= MILLION {
        format!("{}M", to_fixed(volume / MILLION, 1))
    } else if volume >= THOUSAND {
        format!("{}K", to_fixed(volume / THOUSAND, 1))
    } else {
        plain_number(volume)
    }
}

/// `random_forest` -> `RANDOM FOREST`. Only the first underscore is replaced.
pub fn model_display_name(model: &str) -> String {
    model.replacen('_', " ", 1).to_uppercase()
}
