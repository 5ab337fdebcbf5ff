//! Chain error types.

use shared_types::Hash;

/// Chain manager error type.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ChainError {
    /// Candidate block does not link to the current head.
    #[error(
        "invalid linkage at index {index}: expected previous hash {}, got {}",
        shared_types::hash_to_hex(.expected),
        shared_types::hash_to_hex(.actual)
    )]
    InvalidLinkage {
        index: u64,
        expected: Hash,
        actual: Hash,
    },

    /// Candidate block or chain violates sequence invariants: broken
    /// hash round-trip, unmet difficulty, malformed transaction, or a
    /// double spend against confirmed balances.
    #[error("invalid sequence at index {index}: {reason}")]
    InvalidSequence { index: u64, reason: String },

    /// Candidate chain lost fork resolution.
    #[error("merge rejected: {reason}")]
    MergeRejected { reason: String },

    /// Fork point does not exist on the canonical chain.
    #[error("fork index {index} beyond head {head}")]
    ForkIndexOutOfRange { index: u64, head: u64 },
}
