//! Generation Error Types

/// Errors that can occur while generating a script.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("No API key is configured")]
    MissingCredential,

    #[error("API key was rejected: {0}")]
    CredentialRejected(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl GenerationError {
    /// Whether this failure means the stored key should be thrown away
    /// and the user sent back to key entry.
    pub fn is_credential_failure(&self) -> bool {
        matches!(
            self,
            GenerationError::MissingCredential | GenerationError::CredentialRejected(_)
        )
    }
}

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, GenerationError>;
