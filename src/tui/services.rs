//! Backend service handles shared with the views.

use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::core::credentials::CredentialStore;

use super::events::AppEvent;

/// Centralized handle to everything outside the UI.
///
/// Created once at startup, then passed by reference into views. The
/// credential store is internally shared; cloning `Services` is cheap.
#[derive(Clone)]
pub struct Services {
    pub credentials: CredentialStore,
    pub config: AppConfig,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
    /// Endpoint override for the generation client. `None` in
    /// production; tests point this at a local mock server.
    pub client_base_url: Option<String>,
}

impl Services {
    /// Production wiring: keychain-backed credential store.
    pub fn init(config: AppConfig, event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        let credentials = CredentialStore::keyring();
        log::info!(
            "Services initialized (credential configured: {})",
            credentials.is_configured()
        );
        Self {
            credentials,
            config,
            event_tx,
            client_base_url: None,
        }
    }

    /// Wiring over an explicit store, used by tests with an in-memory
    /// backend.
    pub fn with_store(
        credentials: CredentialStore,
        config: AppConfig,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            credentials,
            config,
            event_tx,
            client_base_url: None,
        }
    }
}
