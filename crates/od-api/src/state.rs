//! Application state for the API server.

use od_indexer::Indexer;
use od_ingestion::OpenDotaSource;

/// Shared application state.
pub struct AppState<S = OpenDotaSource> {
    /// The indexer for building aggregates.
    pub indexer: Indexer<S>,
}

impl<S> AppState<S> {
    /// Create a new application state with the given indexer.
    pub fn new(indexer: Indexer<S>) -> Self {
        Self { indexer }
    }
}
