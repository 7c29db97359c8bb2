use std::sync::Arc;

use crate::config::Config;
use crate::screening::ranking_client::RankingClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable ranking backend. Default: GeminiRankingClient.
    pub ranking_client: Arc<dyn RankingClient>,
    pub config: Config,
}
