//! # Shared Types Crate
//!
//! This crate contains the domain entities shared across subsystems and the
//! deterministic content-hash utility used for block and record digests.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Deterministic hashing**: `hashing::hash_record` produces identical
//!   digests for identical records, on every node.

pub mod entities;
pub mod hashing;

pub use entities::*;
pub use hashing::{difficulty_target, hash_record, hash_to_hex, meets_difficulty};
