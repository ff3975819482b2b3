//! Integration test suite for the updater
//!
//! End-to-end tests that run the `updater` binary and the public workflow API
//! against a local HTTP server (wiremock) and a throwaway installation.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cli**: The `updater` binary, its flags, output, and exit codes
//! - **workflow**: Full update runs through the library API

mod common;

mod cli;
mod workflow;
