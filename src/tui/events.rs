//! Events flowing through the Elm-architecture event loop.

use crate::core::llm::GenerationError;

/// Events consumed by the main loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick for spinner frames, notification TTLs, and the
    /// credential refresh poll.
    Tick,
    /// Raw terminal input (keyboard/paste).
    Input(crossterm::event::Event),
    /// The in-flight generation finished, one way or the other.
    GenerationComplete(GenerationOutcome),
    /// Notification to display to the user.
    Notification(Notification),
    /// Request to quit the application.
    Quit,
}

/// Result of a generation task, in a form that can cross the event
/// channel (`GenerationError` holds a non-`Clone` `reqwest::Error`).
#[derive(Debug, Clone)]
pub enum GenerationOutcome {
    Script(String),
    Failed {
        message: String,
        credential_rejected: bool,
    },
}

impl From<Result<String, GenerationError>> for GenerationOutcome {
    fn from(result: Result<String, GenerationError>) -> Self {
        match result {
            Ok(script) => GenerationOutcome::Script(script),
            Err(e) => GenerationOutcome::Failed {
                credential_rejected: e.is_credential_failure(),
                message: e.to_string(),
            },
        }
    }
}

/// Which screen the app is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Full-screen API key prompt, shown whenever no key is configured.
    KeyEntry,
    /// The form + output workspace.
    Main,
}

/// Which pane of the main screen has input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form,
    Output,
}

impl Focus {
    pub fn toggled(self) -> Focus {
        match self {
            Focus::Form => Focus::Output,
            Focus::Output => Focus::Form,
        }
    }
}

/// Notification level for the overlay system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A timed notification shown in the overlay.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}
