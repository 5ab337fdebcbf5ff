//! Chain manager service.
//!
//! Single-writer discipline: `append`, `fork`, and `merge` all take the
//! same write lock, so they are mutually exclusive and readers always see
//! a consistent snapshot. A proposal computed against a stale head fails
//! linkage here instead of clobbering the chain.

use crate::domain::balances::BalanceBook;
use crate::domain::block::Block;
use crate::domain::chain::{check_block_content, check_link, validate_sequence, CandidateChain};
use crate::domain::errors::ChainError;
use crate::domain::stats::{compute_stats, NetworkStats};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use shared_types::{difficulty_target, Address, Hash, Timestamp, Transaction, TxId, U256};
use std::collections::HashSet;

/// Chain rules configuration.
#[derive(Clone, Debug)]
pub struct ChainConfig {
    /// Difficulty: required leading zero bits of a block hash.
    pub difficulty_bits: u32,
    /// Starting balance granted to every address (faucet abstraction
    /// inherited from the source model's fictitious balance lookup).
    pub initial_balance: f64,
    /// Reward minted to the validator of each appended block.
    pub block_reward: f64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            difficulty_bits: 8,
            initial_balance: 1_000.0,
            block_reward: 50.0,
        }
    }
}

/// A confirmed transaction annotated with its block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordedTransaction {
    /// The confirmed transaction.
    pub transaction: Transaction,
    /// Index of the containing block.
    pub block_index: u64,
    /// Hash of the containing block.
    pub block_hash: Hash,
    /// Timestamp of the containing block (ms).
    pub block_timestamp: Timestamp,
}

struct ChainStore {
    blocks: Vec<Block>,
    balances: BalanceBook,
    confirmed_ids: HashSet<TxId>,
}

/// Shared chain manager handle. Owns the canonical chain exclusively.
pub struct ChainManager {
    config: ChainConfig,
    target: U256,
    store: RwLock<ChainStore>,
}

impl ChainManager {
    /// Creates a manager holding only the genesis block.
    pub fn new(config: ChainConfig) -> Self {
        let genesis = Block::genesis();
        let balances = BalanceBook::from_blocks(
            config.initial_balance,
            config.block_reward,
            std::iter::once(&genesis),
        );
        let target = difficulty_target(config.difficulty_bits);
        Self {
            config,
            target,
            store: RwLock::new(ChainStore {
                blocks: vec![genesis],
                balances,
                confirmed_ids: HashSet::new(),
            }),
        }
    }

    /// Creates a manager with default rules.
    pub fn with_defaults() -> Self {
        Self::new(ChainConfig::default())
    }

    /// The chain rules in force.
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// The difficulty target blocks must satisfy.
    pub fn target(&self) -> U256 {
        self.target
    }

    /// Validates and appends a block to the canonical chain.
    ///
    /// All-or-nothing: on any failure the chain and the balance view are
    /// untouched and the block's transactions remain unconfirmed.
    ///
    /// # Errors
    /// - `InvalidLinkage` if the block does not extend the current head
    /// - `InvalidSequence` on hash mismatch, unmet difficulty, malformed
    ///   or replayed transactions, or a double spend
    #[tracing::instrument(skip(self, block), fields(index = block.index, validator = %block.validator))]
    pub fn append(&self, block: Block) -> Result<u64, ChainError> {
        let mut store = self.store.write();
        let head = store.blocks.last().expect("chain always has genesis");

        check_link(head, &block)?;
        check_block_content(&block, self.target)?;
        let mut in_block: HashSet<TxId> = HashSet::new();
        for tx in &block.transactions {
            if store.confirmed_ids.contains(&tx.id) || !in_block.insert(tx.id) {
                return Err(ChainError::InvalidSequence {
                    index: block.index,
                    reason: format!("transaction {} already confirmed", tx.id),
                });
            }
        }

        store
            .balances
            .apply_block(&block)
            .map_err(|(_, reason)| ChainError::InvalidSequence {
                index: block.index,
                reason,
            })?;

        for tx in &block.transactions {
            store.confirmed_ids.insert(tx.id);
        }
        let index = block.index;
        tracing::info!(
            hash = %shared_types::hash_to_hex(&block.hash),
            transactions = block.transactions.len(),
            "block appended"
        );
        store.blocks.push(block);
        Ok(index)
    }

    /// Returns the canonical prefix through `at_index` as an independent
    /// branch for parallel extension.
    ///
    /// # Panics
    /// Panics if a stored block fails its hash round-trip; that is
    /// corrupted state, not a rejection path.
    pub fn fork(&self, at_index: u64) -> Result<CandidateChain, ChainError> {
        let store = self.store.read();
        let head = store.blocks.len() as u64 - 1;
        if at_index > head {
            return Err(ChainError::ForkIndexOutOfRange {
                index: at_index,
                head,
            });
        }
        audit_integrity(&store.blocks);
        let prefix = store.blocks[..=at_index as usize].to_vec();
        tracing::debug!(at_index, "forked canonical prefix");
        Ok(CandidateChain::from_blocks(prefix))
    }

    /// Resolves a fork: replaces the canonical chain with `candidate` if
    /// and only if the candidate validates in full and is strictly longer
    /// (longest-valid-chain rule).
    ///
    /// On failure the canonical chain is untouched.
    #[tracing::instrument(skip(self, candidate), fields(candidate_len = candidate.len()))]
    pub fn merge(&self, candidate: &CandidateChain) -> Result<(), ChainError> {
        let mut store = self.store.write();

        if candidate.len() <= store.blocks.len() {
            return Err(ChainError::MergeRejected {
                reason: format!(
                    "candidate length {} does not exceed canonical length {}",
                    candidate.len(),
                    store.blocks.len()
                ),
            });
        }

        let balances = validate_sequence(
            candidate.blocks(),
            self.target,
            self.config.initial_balance,
            self.config.block_reward,
        )
        .map_err(|source| ChainError::MergeRejected {
            reason: source.to_string(),
        })?;

        let confirmed_ids: HashSet<TxId> = candidate
            .blocks()
            .iter()
            .flat_map(|b| b.transactions.iter().map(|tx| tx.id))
            .collect();
        store.blocks = candidate.blocks().to_vec();
        store.balances = balances;
        store.confirmed_ids = confirmed_ids;
        tracing::info!(new_len = store.blocks.len(), "fork resolved, canonical chain replaced");
        Ok(())
    }

    /// Current head block.
    pub fn head(&self) -> Block {
        self.store
            .read()
            .blocks
            .last()
            .expect("chain always has genesis")
            .clone()
    }

    /// Current head index.
    pub fn height(&self) -> u64 {
        self.store.read().blocks.len() as u64 - 1
    }

    /// Number of blocks including genesis.
    pub fn len(&self) -> usize {
        self.store.read().blocks.len()
    }

    /// Always false: the chain at least holds genesis.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Snapshot of the canonical blocks.
    pub fn blocks(&self) -> Vec<Block> {
        self.store.read().blocks.clone()
    }

    /// Confirmed balance of an address.
    pub fn balance(&self, address: &Address) -> f64 {
        self.store.read().balances.balance(address)
    }

    /// Confirmed transactions touching an address, in chain order.
    pub fn transaction_history(&self, address: &Address) -> Vec<RecordedTransaction> {
        let store = self.store.read();
        let mut history = Vec::new();
        for block in &store.blocks {
            for tx in &block.transactions {
                if &tx.from == address || &tx.to == address {
                    history.push(RecordedTransaction {
                        transaction: tx.clone(),
                        block_index: block.index,
                        block_hash: block.hash,
                        block_timestamp: block.timestamp,
                    });
                }
            }
        }
        history
    }

    /// Aggregate read-only network view. Pure projection: identical state
    /// yields identical stats.
    pub fn network_stats(&self, node_count: usize) -> NetworkStats {
        let store = self.store.read();
        compute_stats(
            &store.blocks,
            node_count,
            self.config.difficulty_bits,
            self.config.block_reward,
        )
    }
}

/// Aborts on corrupted stored state: every stored hash must reproduce
/// from its block's fields.
fn audit_integrity(blocks: &[Block]) {
    for block in blocks {
        assert!(
            block.hash_is_consistent(),
            "corrupted chain state: stored hash of block {} does not match its contents",
            block.index
        );
    }
}
