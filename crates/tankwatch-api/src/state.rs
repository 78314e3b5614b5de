//! Shared handler state.

use std::sync::Arc;
use tankwatch_storage::RecordStore;

/// State cloned into every request handler.
#[derive(Clone)]
pub struct AppState {
    /// The record store all handlers read from and write to.
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    /// Wraps a store.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("backend", &self.store.backend())
            .finish()
    }
}
