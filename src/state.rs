//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! gateway is held as a trait object so tests swap in scripted fakes; the
//! config is immutable after startup.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::gateway::AuthGateway;

/// Shared application state. Clone is required by Axum — all inner fields
/// are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub gateway: Arc<dyn AuthGateway>,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig, gateway: Arc<dyn AuthGateway>) -> Self {
        Self { config: Arc::new(config), gateway }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
