//! API Key Storage
//!
//! Holds the single Gemini API key in the OS keychain (Keyring) with an
//! in-memory cache in front of it. The store never fails callers: if the
//! keychain is unavailable (locked session, headless CI, denied access)
//! it logs and degrades to in-memory-only behavior for the life of the
//! process.
//!
//! Other processes may write the same keychain entry; [`CredentialStore::refresh`]
//! re-reads the backend and adopts external changes (last write wins),
//! notifying subscribers through a watch channel.

use std::sync::{Arc, Mutex};

use keyring::Entry;
use thiserror::Error;
use tokio::sync::watch;

const SERVICE_NAME: &str = "grantgen";
const KEY_NAME: &str = "gemini-api-key";

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("Backend unavailable")]
    Unavailable,
}

pub type Result<T> = std::result::Result<T, CredentialError>;

// ============================================================================
// Secret Backend
// ============================================================================

/// Durable storage for one secret string.
///
/// A trait seam so the store can run against the OS keychain in the app
/// and a plain in-memory fake in tests.
pub trait SecretBackend: Send + Sync {
    fn load(&self) -> Result<Option<String>>;
    fn store(&self, value: &str) -> Result<()>;
    fn delete(&self) -> Result<()>;
}

/// OS keychain backend.
pub struct KeyringBackend {
    service: String,
    key: String,
}

impl KeyringBackend {
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
            key: KEY_NAME.to_string(),
        }
    }

    fn entry(&self) -> Result<Entry> {
        Ok(Entry::new(&self.service, &self.key)?)
    }
}

impl Default for KeyringBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretBackend for KeyringBackend {
    fn load(&self) -> Result<Option<String>> {
        match self.entry()?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(CredentialError::Keyring(e)),
        }
    }

    fn store(&self, value: &str) -> Result<()> {
        self.entry()?.set_password(value)?;
        Ok(())
    }

    fn delete(&self) -> Result<()> {
        match self.entry()?.delete_password() {
            Ok(()) => Ok(()),
            // Already absent
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(CredentialError::Keyring(e)),
        }
    }
}

/// In-memory backend for tests and keychain-less environments.
#[derive(Default)]
pub struct MemoryBackend {
    value: Mutex<Option<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecretBackend for MemoryBackend {
    fn load(&self) -> Result<Option<String>> {
        Ok(self
            .value
            .lock()
            .map_err(|_| CredentialError::Unavailable)?
            .clone())
    }

    fn store(&self, value: &str) -> Result<()> {
        *self.value.lock().map_err(|_| CredentialError::Unavailable)? =
            Some(value.to_string());
        Ok(())
    }

    fn delete(&self) -> Result<()> {
        *self.value.lock().map_err(|_| CredentialError::Unavailable)? = None;
        Ok(())
    }
}

// ============================================================================
// Credential Store
// ============================================================================

/// Process-wide handle to the stored API key.
///
/// Cheap to clone; all clones share the same cache and backend.
#[derive(Clone)]
pub struct CredentialStore {
    backend: Arc<dyn SecretBackend>,
    cached: Arc<Mutex<Option<String>>>,
    tx: Arc<watch::Sender<Option<String>>>,
}

impl CredentialStore {
    /// Store backed by the OS keychain. The initial value is whatever
    /// the keychain currently holds; a keychain failure here degrades
    /// to an empty in-memory store.
    pub fn keyring() -> Self {
        Self::with_backend(Arc::new(KeyringBackend::new()))
    }

    /// Store over an explicit backend (tests use [`MemoryBackend`]).
    pub fn with_backend(backend: Arc<dyn SecretBackend>) -> Self {
        let initial = match backend.load() {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Credential backend unavailable, running in-memory only: {e}");
                None
            }
        };
        let (tx, _rx) = watch::channel(initial.clone());
        Self {
            backend,
            cached: Arc::new(Mutex::new(initial)),
            tx: Arc::new(tx),
        }
    }

    /// Current key, if one is configured.
    pub fn get(&self) -> Option<String> {
        self.cached.lock().ok().and_then(|guard| guard.clone())
    }

    pub fn is_configured(&self) -> bool {
        self.get().is_some()
    }

    /// Replace or clear the stored key. The in-memory value always
    /// updates; a backend failure only costs durability.
    pub fn set(&self, value: Option<&str>) {
        let result = match value {
            Some(v) => self.backend.store(v),
            None => self.backend.delete(),
        };
        if let Err(e) = result {
            log::warn!("Failed to persist credential change, keeping in-memory value: {e}");
        } else {
            log::info!(
                "Credential {}",
                if value.is_some() { "stored" } else { "cleared" }
            );
        }
        self.adopt(value.map(|v| v.to_string()));
    }

    /// Re-read the backend and pick up changes made by other processes.
    /// No-ops (and keeps the cache) if the backend is unavailable.
    pub fn refresh(&self) {
        match self.backend.load() {
            Ok(value) => {
                if value != self.get() {
                    log::info!("Credential changed externally, adopting new value");
                    self.adopt(value);
                }
            }
            Err(e) => log::debug!("Credential refresh skipped: {e}"),
        }
    }

    /// Watch for value changes (set, clear, or external refresh).
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.tx.subscribe()
    }

    fn adopt(&self, value: Option<String>) {
        if let Ok(mut guard) = self.cached.lock() {
            *guard = value.clone();
        }
        let _ = self.tx.send(value);
    }
}
