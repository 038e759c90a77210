//! grantgen — terminal UI for generating temporary access scripts.
//!
//! A form describes the access grant (platform, principal, permissions,
//! duration), Gemini turns it into an executable script with the
//! shortest-possible TTL, and the result can be copied or saved. The
//! API key lives in the OS keychain.

pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
