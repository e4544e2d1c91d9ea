use std::sync::Arc;

use crate::config::Config;
use crate::interview::orchestrator::InterviewOrchestrator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub interviewer: Arc<InterviewOrchestrator>,
    pub config: Config,
}
