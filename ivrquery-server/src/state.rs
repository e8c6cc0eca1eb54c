//! Shared application state for the adapter server.

use std::sync::Arc;

use ivrquery::{Adapter, AdapterConfig};

/// Shared state accessible from all request handlers.
///
/// Read-only after startup; requests never mutate it.
#[derive(Clone)]
pub struct AppState {
    pub adapter: Arc<Adapter>,
}

impl AppState {
    pub fn new(config: AdapterConfig) -> Self {
        Self {
            adapter: Arc::new(Adapter::new(config)),
        }
    }

    /// Media type for response documents.
    pub fn content_type(&self) -> &str {
        &self.adapter.config().content_type
    }
}
