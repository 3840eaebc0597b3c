use super::model::PresentationModel;

/// Receives everything the rendering layer needs to show.
///
/// Callbacks run after the session lock is released, so a sink may read
/// `current_model()` or `phase()`. They are serialized in commit order, so a
/// stale notification never follows a newer one.
pub trait PresentationSink: Send + Sync {
    /// Once per completed analysis, and again per merged prediction.
    fn on_model_ready(&self, model: &PresentationModel);

    /// The mandatory technical fetch failed; no dashboard should be shown.
    fn on_analysis_failed(&self, symbol: &str, reason: &str);

    /// Scoped to the prediction region only.
    fn on_prediction_failed(&self, symbol: &str, reason: &str);
}
