//! Test Fixtures
//!
//! Shared helpers for building in-memory credential stores, valid
//! access requests, mock Gemini responses, and fully wired app states.

use std::sync::Arc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::core::credentials::{CredentialStore, MemoryBackend};
use crate::core::request::{AccessRequest, OutputShell, PrincipalKind, TargetPlatform};
use crate::tui::app::AppState;
use crate::tui::services::Services;

// =============================================================================
// Credential Fixtures
// =============================================================================

/// Credential store over an in-memory backend (no keychain access).
pub fn memory_store() -> CredentialStore {
    CredentialStore::with_backend(Arc::new(MemoryBackend::new()))
}

/// In-memory store that already holds a key.
pub fn configured_store() -> CredentialStore {
    let store = memory_store();
    store.set(Some("AIzaTestApiKey"));
    store
}

// =============================================================================
// Request Fixtures
// =============================================================================

/// A complete, valid Kubernetes request.
pub fn kubernetes_request() -> AccessRequest {
    AccessRequest {
        platform: TargetPlatform::KubernetesRbac,
        principal_kind: PrincipalKind::ServiceAccount,
        principal_name: "temp-sa-01".to_string(),
        permissions: "pods/get, pods/list".to_string(),
        duration_hours: 4,
        shell: OutputShell::Bash,
        environment: "staging-cluster".to_string(),
    }
}

// =============================================================================
// Gemini Response Fixtures
// =============================================================================

/// Well-formed `generateContent` response body carrying `text`.
pub fn gemini_success_body(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": text }]
            },
            "finishReason": "STOP"
        }]
    })
}

// =============================================================================
// App Fixtures
// =============================================================================

/// App wired to the given store, with the generation client pointed at
/// `base_url` (a wiremock server in practice).
pub fn test_app(store: CredentialStore, base_url: Option<String>) -> AppState {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut services = Services::with_store(store, AppConfig::default(), tx);
    services.client_base_url = base_url;
    AppState::new(services, rx)
}

/// Fill the form's free-text fields so `build_request` succeeds with
/// the defaults for everything else.
pub fn fill_form(app: &mut AppState) {
    app.form.principal_name.insert_str("temp-sa-01");
    app.form.permissions.insert_str("pods/get, pods/list");
    app.form.environment.insert_str("staging-cluster");
}

/// Ctrl+<c> key press event.
pub fn ctrl(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}
