//! # Ember-Chain Test Suite
//!
//! Unified test crate for cross-subsystem flows.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs            # Submit → mine → query round trips
//!     ├── fork_resolution.rs  # Fork creation and longest-valid merges
//!     ├── contracts.rs        # Sandbox lifecycle across the runtime
//!     └── selection.rs        # Validator selection distribution
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ec-tests
//! cargo test -p ec-tests integration::
//! ```

#![allow(dead_code)]

pub mod integration;
