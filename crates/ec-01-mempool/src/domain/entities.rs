//! Core domain entities for the Mempool subsystem.
//!
//! Defines the transaction state machine for two-phase block inclusion.

// Re-export from shared-types for convenience
pub use shared_types::{Timestamp, Transaction, TxId};

/// Identifier for a pending-inclusion batch handed to block assembly.
pub type BatchId = u64;

/// Transaction state in the two-phase inclusion protocol.
///
/// ```text
/// [PENDING] ──drain──→ [PENDING_INCLUSION] ──commit──→ (removed)
///                             │
///                             └── requeue ──→ [PENDING]
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TransactionState {
    /// Available for block inclusion.
    #[default]
    Pending,
    /// Handed to block assembly, awaiting append or rollback.
    PendingInclusion {
        /// Batch this transaction was drained into.
        batch: BatchId,
    },
}

/// A transaction in the mempool with pool metadata.
#[derive(Clone, Debug)]
pub struct PooledTransaction {
    /// The submitted transaction.
    pub transaction: Transaction,
    /// Current inclusion state.
    pub state: TransactionState,
    /// When the transaction entered the pool (ms).
    pub added_at: Timestamp,
}

impl PooledTransaction {
    /// Wraps a freshly submitted transaction.
    pub fn new(transaction: Transaction, added_at: Timestamp) -> Self {
        Self {
            transaction,
            state: TransactionState::Pending,
            added_at,
        }
    }

    /// Returns true if the transaction is available for block inclusion.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, TransactionState::Pending)
    }
}

/// A batch of transactions drained for one candidate block.
///
/// The batch owns clones of the drained transactions; the pool keeps the
/// originals tracked under `PendingInclusion` until commit or requeue.
#[derive(Clone, Debug)]
pub struct InclusionBatch {
    /// Batch identifier, used for commit/requeue.
    pub id: BatchId,
    /// Drained transactions in pool order.
    pub transactions: Vec<Transaction>,
}

impl InclusionBatch {
    /// Returns true if the batch carried no transactions.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Pool configuration.
#[derive(Clone, Debug)]
pub struct MempoolConfig {
    /// Maximum number of transactions held at once.
    pub max_transactions: usize,
}

impl Default for MempoolConfig {
    fn default() -> Self {
        Self {
            max_transactions: 10_000,
        }
    }
}
