//! Test Suite
//!
//! Unit tests live next to the code they cover in `#[cfg(test)]`
//! modules; this tree holds the cross-module tests:
//! - `unit/` — network-level client tests and controller flows (wiremock)
//! - `property/` — proptest invariants for prompt building and fence stripping
//! - `common/` — shared fixtures

pub mod common;
mod property;
