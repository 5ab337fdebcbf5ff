//! # Transaction Pool: FIFO queue with two-phase inclusion
//!
//! ## Data Structures
//!
//! - `by_id`: O(1) lookup by transaction id
//! - `queue`: submission-ordered pending transactions
//! - `batches`: outstanding pending-inclusion batches
//!
//! ## Invariants Enforced
//!
//! - No duplicate transaction ids (checked in `submit()`)
//! - A transaction in a pending-inclusion batch is never drained again
//! - A rolled-back batch rejoins the front of the queue in its original
//!   relative order

use super::entities::{
    BatchId, InclusionBatch, MempoolConfig, PooledTransaction, Timestamp, Transaction,
    TransactionState, TxId,
};
use super::errors::MempoolError;
use std::collections::{HashMap, VecDeque};

/// Submission-ordered transaction pool.
///
/// Ordering policy: FIFO by submission. There is no fee-priority rule;
/// fees reward the validator but do not reorder the queue.
#[derive(Debug)]
pub struct TransactionPool {
    /// Configuration.
    config: MempoolConfig,

    /// All tracked transactions indexed by id.
    by_id: HashMap<TxId, PooledTransaction>,

    /// Pending transactions in submission order.
    queue: VecDeque<TxId>,

    /// Outstanding pending-inclusion batches.
    batches: HashMap<BatchId, Vec<TxId>>,

    /// Next batch id.
    next_batch: BatchId,
}

impl TransactionPool {
    /// Creates a new empty transaction pool.
    pub fn new(config: MempoolConfig) -> Self {
        Self {
            config,
            by_id: HashMap::new(),
            queue: VecDeque::new(),
            batches: HashMap::new(),
            next_batch: 0,
        }
    }

    /// Creates a pool with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(MempoolConfig::default())
    }

    /// Returns the number of tracked transactions (pending and in-flight).
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns true if the pool tracks no transactions.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Returns the number of transactions available for draining.
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Checks if a transaction is tracked by the pool.
    pub fn contains(&self, id: &TxId) -> bool {
        self.by_id.contains_key(id)
    }

    /// Admits a transaction into the pool.
    ///
    /// # Errors
    /// - `InvalidTransaction` if amount is not positive, fee is negative,
    ///   or sender equals recipient
    /// - `DuplicateTransaction` if the id is already tracked
    /// - `PoolFull` at capacity
    pub fn submit(&mut self, tx: Transaction, now: Timestamp) -> Result<(), MempoolError> {
        if let Some(reason) = tx.validity_error() {
            return Err(MempoolError::InvalidTransaction { reason });
        }
        if self.by_id.contains_key(&tx.id) {
            return Err(MempoolError::DuplicateTransaction(tx.id));
        }
        if self.by_id.len() >= self.config.max_transactions {
            return Err(MempoolError::PoolFull {
                capacity: self.config.max_transactions,
            });
        }

        let id = tx.id;
        self.by_id.insert(id, PooledTransaction::new(tx, now));
        self.queue.push_back(id);
        Ok(())
    }

    /// Atomically drains up to `max_count` pending transactions into a new
    /// pending-inclusion batch.
    ///
    /// Drained transactions stay tracked but leave the queue, so a
    /// concurrent drain can never return them again while the batch is
    /// outstanding. Returns an empty batch when nothing is pending.
    pub fn drain(&mut self, max_count: usize) -> InclusionBatch {
        let take = max_count.min(self.queue.len());
        let mut ids = Vec::with_capacity(take);
        let mut transactions = Vec::with_capacity(take);

        let batch_id = self.next_batch;
        self.next_batch += 1;

        for _ in 0..take {
            let id = match self.queue.pop_front() {
                Some(id) => id,
                None => break,
            };
            let entry = self
                .by_id
                .get_mut(&id)
                .expect("queued transaction must be tracked");
            entry.state = TransactionState::PendingInclusion { batch: batch_id };
            ids.push(id);
            transactions.push(entry.transaction.clone());
        }

        self.batches.insert(batch_id, ids);
        InclusionBatch {
            id: batch_id,
            transactions,
        }
    }

    /// Rolls a rejected batch back into the pool.
    ///
    /// The batch rejoins the front of the queue in its original relative
    /// order, ahead of transactions submitted since the drain.
    pub fn requeue(&mut self, batch: BatchId) -> Result<usize, MempoolError> {
        let ids = self
            .batches
            .remove(&batch)
            .ok_or(MempoolError::UnknownBatch(batch))?;

        for id in ids.iter().rev() {
            if let Some(entry) = self.by_id.get_mut(id) {
                entry.state = TransactionState::Pending;
                self.queue.push_front(*id);
            }
        }
        Ok(ids.len())
    }

    /// Drops a batch whose candidate block was appended.
    pub fn commit(&mut self, batch: BatchId) -> Result<usize, MempoolError> {
        let ids = self
            .batches
            .remove(&batch)
            .ok_or(MempoolError::UnknownBatch(batch))?;

        for id in &ids {
            self.by_id.remove(id);
        }
        Ok(ids.len())
    }
}
