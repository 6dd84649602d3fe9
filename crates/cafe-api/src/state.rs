//! Shared application state for the query API.

use std::sync::Arc;

use cafe_core::Catalog;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor. The
/// catalog is read-only for the lifetime of the server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The venue catalog served by `/cafe`.
    pub catalog: Arc<Catalog>,
}

impl AppState {
    /// Create application state serving `catalog`.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Catalog::builtin())
    }
}
