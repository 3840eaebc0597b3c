//! Stock Dashboard - aggregation and derivation engine for a stock analysis view
//!
//! This library fetches technical, fundamental and prediction documents for a
//! symbol, derives recommendation and signal polarity from them, and hands a
//! single normalized presentation model to a rendering sink.

pub mod analysis;
pub mod bus;
pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod events;
pub mod presentation;
pub mod services;

// Re-export commonly used types
pub use bus::EventBus;
pub use config::AppConfig;
pub use error::{DashboardError, FetchError, ValidationError};
pub use events::DashboardEvent;
pub use presentation::{PresentationModel, PresentationSink};
pub use services::orchestrator::{AnalysisOrchestrator, AnalysisPhase};
