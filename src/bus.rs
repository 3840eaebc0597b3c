use crate::events::DashboardEvent;
use crate::presentation::{PresentationModel, PresentationSink};
use tokio::sync::broadcast;
use tracing::debug;

#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DashboardEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.tx.subscribe()
    }

    pub fn publish(
        &self,
        event: DashboardEvent,
    ) -> Result<usize, broadcast::error::SendError<DashboardEvent>> {
        self.tx.send(event)
    }

    fn publish_or_drop(&self, event: DashboardEvent) {
        if let Err(e) = self.publish(event) {
            debug!("📭 [BUS] No subscribers for {} event", e.0.symbol());
        }
    }
}

impl PresentationSink for EventBus {
    fn on_model_ready(&self, model: &PresentationModel) {
        self.publish_or_drop(DashboardEvent::ModelReady(Box::new(model.clone())));
    }

    fn on_analysis_failed(&self, symbol: &str, reason: &str) {
        self.publish_or_drop(DashboardEvent::AnalysisFailed {
            symbol: symbol.to_string(),
            reason: reason.to_string(),
        });
    }

    fn on_prediction_failed(&self, symbol: &str, reason: &str) {
        self.publish_or_drop(DashboardEvent::PredictionFailed {
            symbol: symbol.to_string(),
            reason: reason.to_string(),
        });
    }
}
