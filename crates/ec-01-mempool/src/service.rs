//! Mempool service.
//!
//! Thread-safe facade over the transaction pool. Many producers may submit
//! concurrently; `drain` is exclusive by construction (every pool operation
//! is short and atomic under one lock, and drained transactions leave the
//! queue before the lock is released).

use crate::domain::entities::{InclusionBatch, MempoolConfig, Timestamp, Transaction, TxId};
use crate::domain::errors::MempoolError;
use crate::domain::pool::TransactionPool;
use parking_lot::Mutex;

/// Shared mempool handle.
pub struct Mempool {
    pool: Mutex<TransactionPool>,
}

impl Mempool {
    /// Creates a mempool with the given configuration.
    pub fn new(config: MempoolConfig) -> Self {
        Self {
            pool: Mutex::new(TransactionPool::new(config)),
        }
    }

    /// Creates a mempool with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(MempoolConfig::default())
    }

    /// Admits a transaction into the pool.
    #[tracing::instrument(skip(self, tx), fields(tx_id = %tx.id, from = %tx.from, to = %tx.to))]
    pub fn submit(&self, tx: Transaction, now: Timestamp) -> Result<TxId, MempoolError> {
        let id = tx.id;
        self.pool.lock().submit(tx, now)?;
        tracing::debug!("transaction admitted");
        Ok(id)
    }

    /// Drains up to `max_count` transactions for a candidate block.
    pub fn drain(&self, max_count: usize) -> InclusionBatch {
        let batch = self.pool.lock().drain(max_count);
        tracing::debug!(
            batch = batch.id,
            count = batch.transactions.len(),
            "drained inclusion batch"
        );
        batch
    }

    /// Rolls a rejected batch back into the pool.
    pub fn requeue(&self, batch: &InclusionBatch) -> Result<usize, MempoolError> {
        let restored = self.pool.lock().requeue(batch.id)?;
        tracing::debug!(batch = batch.id, restored, "requeued inclusion batch");
        Ok(restored)
    }

    /// Drops a batch whose block was appended.
    pub fn commit(&self, batch: &InclusionBatch) -> Result<usize, MempoolError> {
        self.pool.lock().commit(batch.id)
    }

    /// Number of transactions available for draining.
    pub fn pending_count(&self) -> usize {
        self.pool.lock().pending_count()
    }

    /// Number of tracked transactions (pending and in-flight).
    pub fn len(&self) -> usize {
        self.pool.lock().len()
    }

    /// Returns true if the pool tracks no transactions.
    pub fn is_empty(&self) -> bool {
        self.pool.lock().is_empty()
    }
}
