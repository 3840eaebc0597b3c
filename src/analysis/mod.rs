//! Derivation engine: pure functions from normalized numbers to signals.

pub mod indicators;
pub mod recommendation;

pub use indicators::{classify_signal, compare, rsi_zone, Polarity, SignalKind};
pub use recommendation::{expected_change_pct, recommend, risk_level, Action, Recommendation, RiskLevel};

#[cfg(test)]
mod indicators_tests;
#[cfg(test)]
mod recommendation_tests;
