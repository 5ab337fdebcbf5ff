//! Mempool error types.

use super::entities::{BatchId, TxId};

/// Mempool error type.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MempoolError {
    /// Transaction failed admission checks.
    #[error("invalid transaction: {reason}")]
    InvalidTransaction { reason: &'static str },

    /// Transaction already exists in the pool.
    #[error("duplicate transaction: {0}")]
    DuplicateTransaction(TxId),

    /// Pool has reached maximum capacity.
    #[error("pool full: capacity {capacity}")]
    PoolFull { capacity: usize },

    /// Commit or requeue referenced a batch the pool does not track.
    #[error("unknown inclusion batch: {0}")]
    UnknownBatch(BatchId),
}
