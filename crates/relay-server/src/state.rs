//! Server state management

use relay_core::{RelayConfig, RelayService};

/// Shared application state
///
/// Everything inside is immutable after startup, so handlers clone freely.
#[derive(Clone)]
pub struct AppState {
    pub service: RelayService,
}

impl AppState {
    pub fn new(service: RelayService) -> Self {
        Self { service }
    }

    pub fn config(&self) -> &RelayConfig {
        self.service.config()
    }
}
