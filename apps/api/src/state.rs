use std::sync::Arc;

use crate::quotes::board::SharedBoard;
use crate::quotes::fetcher::QuoteSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single quote board, serialized through one mutex.
    pub board: SharedBoard,
    /// Pluggable quote source. Production: `GeminiClient`; tests swap fakes in.
    pub source: Arc<dyn QuoteSource>,
}
