//! Error types for the consensus engine.

use super::proof::ProofError;
use ec_01_mempool::MempoolError;
use ec_05_chain::ChainError;

/// Consensus error types.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConsensusError {
    /// No nodes registered to validate.
    #[error("no validators registered")]
    NoValidators,

    /// Proof search ran out of budget or was cancelled.
    #[error(transparent)]
    Proof(#[from] ProofError),

    /// Candidate block failed validation or append.
    #[error("block rejected: {0}")]
    BlockRejected(#[from] ChainError),

    /// Mempool bookkeeping failed (batch lifecycle violation).
    #[error("mempool error: {0}")]
    Mempool(#[from] MempoolError),

    /// Runtime-level failure outside the consensus rules themselves.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for consensus operations.
pub type ConsensusResult<T> = Result<T, ConsensusError>;
