//! Generation Client
//!
//! Thin client for Google's Generative Language API. One operation:
//! send a prompt, get back script text, normalized for display. The two
//! failure categories the application distinguishes — credential
//! rejection vs. everything else — are classified here.

mod error;
mod gemini;

pub use error::{GenerationError, Result};
pub use gemini::{GeminiClient, DEFAULT_MODEL};

#[cfg(test)]
pub(crate) use gemini::strip_code_fences;
