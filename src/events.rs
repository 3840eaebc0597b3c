use crate::presentation::PresentationModel;

#[derive(Clone, Debug)]
pub enum DashboardEvent {
    /// Boxed: the model is much larger than the failure variants
    ModelReady(Box<PresentationModel>),
    AnalysisFailed { symbol: String, reason: String },
    PredictionFailed { symbol: String, reason: String },
}

impl DashboardEvent {
    pub fn symbol(&self) -> &str {
        match self {
            DashboardEvent::ModelReady(model) => &model.symbol,
            DashboardEvent::AnalysisFailed { symbol, .. } => symbol,
            DashboardEvent::PredictionFailed { symbol, .. } => symbol,
        }
    }
}
