//! Application state for the commission API.

use std::sync::Arc;

use crate::calculation::CommissionEngine;

/// Shared application state.
///
/// Holds the engine every handler calculates with.
#[derive(Clone, Debug)]
pub struct AppState {
    engine: Arc<CommissionEngine>,
}

impl AppState {
    /// Creates a new application state around an engine.
    pub fn new(engine: CommissionEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Returns the engine.
    pub fn engine(&self) -> &CommissionEngine {
        &self.engine
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(CommissionEngine::default())
    }
}
