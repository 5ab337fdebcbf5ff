//! # Chain Manager Subsystem
//!
//! Owns the canonical chain: validates and appends blocks, creates forks,
//! resolves them by the longest-valid-chain rule, and serves consistent
//! snapshot reads (balances, history, network stats).
//!
//! Balances are a derived view over confirmed transactions; there is no
//! separate account store. Every append re-checks the candidate against
//! that view, so a double spend can never be confirmed.

pub mod domain;
mod manager;

pub use domain::block::{compute_block_hash, Block, GENESIS_TIMESTAMP, GENESIS_VALIDATOR};
pub use domain::chain::CandidateChain;
pub use domain::errors::ChainError;
pub use domain::stats::NetworkStats;
pub use manager::{ChainConfig, ChainManager, RecordedTransaction};
