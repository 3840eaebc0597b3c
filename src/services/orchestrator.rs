//! Analysis orchestrator: sequences the technical, fundamental and prediction
//! fetches for one symbol and owns the single current presentation model.
//!
//! Every analysis gets a fresh [`RequestToken`]. Each write back into the
//! session compares the captured token with the current one, so a response
//! that resolves after a newer request started is dropped instead of
//! overwriting the newer model.

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::constants::events;
use crate::data::fetch::{Endpoints, JsonFetcher};
use crate::data::normalize::normalize_symbol;
use crate::data::records::{FundamentalRecord, PredictionRecord, TechnicalRecord};
use crate::error::{DashboardError, DashboardResult, ValidationError};
use crate::presentation::{FundamentalSection, PresentationModel, PresentationSink};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AnalysisPhase {
    Idle,
    FetchingTechnical,
    FetchingFundamental,
    Ready,
    Failed,
}

/// Everything known about the current analysis request
#[derive(Clone, Debug)]
pub struct AnalysisSession {
    pub token: RequestToken,
    pub session_id: Uuid,
    pub symbol: String,
    pub phase: AnalysisPhase,
    pub technical: Option<TechnicalRecord>,
    pub model: Option<PresentationModel>,
    pub prediction_pending: bool,
}

impl AnalysisSession {
    fn new(token: RequestToken, symbol: &str) -> Self {
        Self {
            token,
            session_id: Uuid::new_v4(),
            symbol: symbol.to_string(),
            phase: AnalysisPhase::FetchingTechnical,
            technical: None,
            model: None,
            prediction_pending: false,
        }
    }
}

#[derive(Default)]
struct SessionState {
    issued: u64,
    current: Option<AnalysisSession>,
}

fn lock_state(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Marks a prediction as in flight for one session.
///
/// Dropping it unsettled (the request future was cancelled mid-fetch) clears
/// `prediction_pending`, provided the session it was issued for is still
/// current.
struct PendingPrediction {
    state: Arc<Mutex<SessionState>>,
    token: RequestToken,
    armed: bool,
}

impl PendingPrediction {
    /// Called with the session lock held by the commit path.
    fn settle(mut self, state: &mut SessionState) {
        self.armed = false;
        if let Some(session) = state.current.as_mut() {
            if session.token == self.token {
                session.prediction_pending = false;
            }
        }
    }
}

impl Drop for PendingPrediction {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = lock_state(&self.state);
        if let Some(session) = state.current.as_mut() {
            if session.token == self.token && session.prediction_pending {
                session.prediction_pending = false;
                warn!(
                    "⚠️ [PREDICTION] Request for {} was cancelled before it resolved",
                    session.symbol
                );
            }
        }
    }
}

#[derive(Clone)]
pub struct AnalysisOrchestrator {
    fetcher: Arc<dyn JsonFetcher>,
    endpoints: Endpoints,
    sink: Arc<dyn PresentationSink>,
    state: Arc<Mutex<SessionState>>,
    /// Held from the token check through the sink call, so notifications keep
    /// commit order while the session lock stays free for the sink to read.
    notify: Arc<Mutex<()>>,
}

impl AnalysisOrchestrator {
    pub fn new(
        fetcher: Arc<dyn JsonFetcher>,
        endpoints: Endpoints,
        sink: Arc<dyn PresentationSink>,
    ) -> Self {
        Self {
            fetcher,
            endpoints,
            sink,
            state: Arc::new(Mutex::new(SessionState::default())),
            notify: Arc::new(Mutex::new(())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        lock_state(&self.state)
    }

    fn notify_lock(&self) -> MutexGuard<'_, ()> {
        self.notify.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn phase(&self) -> AnalysisPhase {
        self.lock()
            .current
            .as_ref()
            .map(|s| s.phase)
            .unwrap_or(AnalysisPhase::Idle)
    }

    /// Snapshot of the current session, if any.
    pub fn session(&self) -> Option<AnalysisSession> {
        self.lock().current.clone()
    }

    pub fn current_symbol(&self) -> Option<String> {
        self.lock().current.as_ref().map(|s| s.symbol.clone())
    }

    pub fn current_model(&self) -> Option<PresentationModel> {
        self.lock().current.as_ref().and_then(|s| s.model.clone())
    }

    /// Run a full analysis: technical (mandatory) then fundamental (best-effort).
    ///
    /// The sink is notified exactly once, after both fetches resolve. A failed
    /// technical fetch aborts the request before the fundamental fetch.
    pub async fn analyze(&self, raw_symbol: &str) -> DashboardResult<PresentationModel> {
        let symbol = normalize_symbol(raw_symbol)?;
        let token = self.begin(&symbol);
        info!(
            event = events::ANALYSIS_STARTED,
            token = token.value(),
            "📊 [ANALYSIS] Starting analysis for {}",
            symbol
        );

        let technical = match self.fetch_technical(&symbol).await {
            Ok(record) => record,
            Err(err) => return Err(self.fail_analysis(token, &symbol, err)),
        };

        if !self.advance(token, AnalysisPhase::FetchingFundamental) {
            return Err(self.discard(&symbol, "technical"));
        }

        let fundamentals = match self.fetch_fundamental(&symbol).await {
            Ok(record) => FundamentalSection::from_record(&record),
            Err(err) => {
                warn!(
                    event = events::FUNDAMENTALS_DEGRADED,
                    "⚠️ [ANALYSIS] Fundamental data unavailable for {}: {}",
                    symbol,
                    err
                );
                FundamentalSection::unavailable(err.to_string())
            }
        };

        self.commit_analysis(token, &symbol, technical, fundamentals)
    }

    /// Fetch the prediction for the current (ready) analysis and merge it in.
    ///
    /// Failures are reported through `on_prediction_failed` and leave the rest
    /// of the model untouched. Dropping the returned future releases the
    /// in-flight slot.
    pub async fn request_prediction(&self) -> DashboardResult<PresentationModel> {
        let (pending, symbol) = {
            let mut state = self.lock();
            let session = state
                .current
                .as_mut()
                .ok_or(ValidationError::NoActiveAnalysis)?;
            if session.phase != AnalysisPhase::Ready {
                return Err(ValidationError::AnalysisNotReady {
                    symbol: session.symbol.clone(),
                }
                .into());
            }
            if session.prediction_pending {
                return Err(ValidationError::PredictionInFlight {
                    symbol: session.symbol.clone(),
                }
                .into());
            }
            session.prediction_pending = true;
            let pending = PendingPrediction {
                state: Arc::clone(&self.state),
                token: session.token,
                armed: true,
            };
            (pending, session.symbol.clone())
        };

        info!("🔮 [PREDICTION] Requesting prediction for {}", symbol);
        let outcome = self.fetch_prediction(&symbol).await;
        self.commit_prediction(pending, &symbol, outcome)
    }

    fn begin(&self, symbol: &str) -> RequestToken {
        let mut state = self.lock();
        state.issued += 1;
        let token = RequestToken(state.issued);

        if let Some(previous) = &state.current {
            if matches!(
                previous.phase,
                AnalysisPhase::FetchingTechnical | AnalysisPhase::FetchingFundamental
            ) || previous.prediction_pending
            {
                info!(
                    "🔁 [ANALYSIS] {} supersedes in-flight request for {}",
                    symbol, previous.symbol
                );
            }
        }

        state.current = Some(AnalysisSession::new(token, symbol));
        token
    }

    /// Move the session forward if `token` is still current.
    fn advance(&self, token: RequestToken, phase: AnalysisPhase) -> bool {
        let mut state = self.lock();
        match state.current.as_mut() {
            Some(session) if session.token == token => {
                session.phase = phase;
                true
            }
            _ => false,
        }
    }

    fn discard(&self, symbol: &str, stage: &str) -> DashboardError {
        warn!(
            event = events::STALE_RESPONSE_DISCARDED,
            "🗑️ [ANALYSIS] Discarding stale {} response for {}",
            stage,
            symbol
        );
        DashboardError::Superseded {
            symbol: symbol.to_string(),
        }
    }

    fn fail_analysis(&self, token: RequestToken, symbol: &str, err: DashboardError) -> DashboardError {
        let _notify = self.notify_lock();
        {
            let mut state = self.lock();
            match state.current.as_mut() {
                Some(session) if session.token == token => session.phase = AnalysisPhase::Failed,
                _ => return self.discard(symbol, "technical"),
            }
        }

        error!(
            event = events::ANALYSIS_FAILED,
            "❌ [ANALYSIS] Technical analysis for {} failed: {}",
            symbol,
            err
        );
        self.sink.on_analysis_failed(symbol, &err.to_string());
        err
    }

    fn commit_analysis(
        &self,
        token: RequestToken,
        symbol: &str,
        technical: TechnicalRecord,
        fundamentals: FundamentalSection,
    ) -> DashboardResult<PresentationModel> {
        let _notify = self.notify_lock();
        let model = {
            let mut state = self.lock();
            let session = match state.current.as_mut() {
                Some(session) if session.token == token => session,
                _ => return Err(self.discard(symbol, "fundamental")),
            };

            let model =
                PresentationModel::build(session.session_id, symbol, &technical, fundamentals);
            session.technical = Some(technical);
            session.model = Some(model.clone());
            session.phase = AnalysisPhase::Ready;
            model
        };

        info!(
            event = events::ANALYSIS_READY,
            "✅ [ANALYSIS] {} ready: {} ({})",
            symbol,
            model.recommendation.action,
            if model.fundamentals.is_available() {
                "with fundamentals"
            } else {
                "fundamentals unavailable"
            }
        );
        self.sink.on_model_ready(&model);
        Ok(model)
    }

    fn commit_prediction(
        &self,
        pending: PendingPrediction,
        symbol: &str,
        outcome: DashboardResult<PredictionRecord>,
    ) -> DashboardResult<PresentationModel> {
        let _notify = self.notify_lock();
        let merged = {
            let mut state = self.lock();
            let token = pending.token;
            pending.settle(&mut state);

            let session = match state.current.as_mut() {
                Some(session) if session.token == token && session.symbol == symbol => session,
                _ => return Err(self.discard(symbol, "prediction")),
            };

            match outcome {
                Ok(record) => {
                    let summary = session
                        .technical
                        .as_ref()
                        .map(TechnicalRecord::summary)
                        .unwrap_or_default();
                    match session.model.as_mut() {
                        Some(model) => {
                            model.apply_prediction(&record, &summary);
                            Ok(model.clone())
                        }
                        None => Err(ValidationError::AnalysisNotReady {
                            symbol: symbol.to_string(),
                        }
                        .into()),
                    }
                }
                Err(err) => Err(err),
            }
        };

        match merged {
            Ok(model) => {
                info!(
                    event = events::PREDICTION_READY,
                    "🔮 [PREDICTION] {} prediction merged",
                    symbol
                );
                self.sink.on_model_ready(&model);
                Ok(model)
            }
            Err(err) => {
                warn!(
                    event = events::PREDICTION_FAILED,
                    "⚠️ [PREDICTION] Prediction for {} failed: {}",
                    symbol,
                    err
                );
                self.sink.on_prediction_failed(symbol, &err.to_string());
                Err(err)
            }
        }
    }

    async fn fetch_technical(&self, symbol: &str) -> DashboardResult<TechnicalRecord> {
        let url = self.endpoints.technical(symbol)?;
        info!("🌐 [FETCH] Technical analysis for {} from {}", symbol, url);
        let payload = self.fetcher.fetch_json(url.as_str()).await?;
        TechnicalRecord::from_payload(url.as_str(), payload)
    }

    async fn fetch_fundamental(&self, symbol: &str) -> DashboardResult<FundamentalRecord> {
        let url = self.endpoints.fundamental(symbol)?;
        info!("🌐 [FETCH] Fundamental analysis for {} from {}", symbol, url);
        let payload = self.fetcher.fetch_json(url.as_str()).await?;
        FundamentalRecord::from_payload(url.as_str(), payload)
    }

    async fn fetch_prediction(&self, symbol: &str) -> DashboardResult<PredictionRecord> {
        let url = self.endpoints.prediction(symbol)?;
        info!("🌐 [FETCH] Prediction for {} from {}", symbol, url);
        let payload = self.fetcher.fetch_json(url.as_str()).await?;
        PredictionRecord::from_payload(url.as_str(), payload)
    }
}
