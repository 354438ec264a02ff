use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ChatClient;
use crate::review::pacing::Pacer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion client behind the `ChatClient` seam — handlers and the
    /// review loop never construct their own API client.
    pub llm: Arc<dyn ChatClient>,
    /// Pacing policy between completion calls. Default: `TokioPacer`.
    pub pacer: Arc<dyn Pacer>,
    /// Loaded once at startup; handlers read the client and pacer built from
    /// it rather than the raw values.
    #[allow(dead_code)]
    pub config: Config,
}
