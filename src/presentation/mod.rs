pub mod charts;
pub mod model;
pub mod render;
pub mod sink;

pub use charts::{ChartSpec, DashboardCharts};
pub use model::{FundamentalSection, PredictionView, PresentationModel};
pub use sink::PresentationSink;

#[cfg(test)]
mod charts_tests;
