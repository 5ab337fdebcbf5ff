//! Derived balance view.
//!
//! Balances are never stored on chain; they are a projection over
//! confirmed transactions. Every address starts from a configurable
//! grant (the engine's faucet abstraction), senders are debited amount
//! plus fee, recipients are credited, and the block validator collects
//! the block reward plus all fees after the block's transactions apply.

use super::block::Block;
use shared_types::{Address, Transaction};
use std::collections::HashMap;

/// Balance projection over a sequence of confirmed blocks.
#[derive(Clone, Debug)]
pub struct BalanceBook {
    /// Net movement per address seen so far.
    movements: HashMap<Address, f64>,
    /// Starting balance granted to every address.
    initial_grant: f64,
    /// Reward minted to the validator of each non-genesis block.
    block_reward: f64,
}

impl BalanceBook {
    /// Creates an empty book with the given starting grant and reward.
    pub fn new(initial_grant: f64, block_reward: f64) -> Self {
        Self {
            movements: HashMap::new(),
            initial_grant,
            block_reward,
        }
    }

    /// Rebuilds the projection from a confirmed sequence.
    ///
    /// The caller is responsible for only feeding validated sequences;
    /// transactions that would overdraw are a sequence violation and
    /// must have been rejected before confirmation.
    pub fn from_blocks<'a>(
        initial_grant: f64,
        block_reward: f64,
        blocks: impl IntoIterator<Item = &'a Block>,
    ) -> Self {
        let mut book = Self::new(initial_grant, block_reward);
        for block in blocks {
            book.apply_block_unchecked(block);
        }
        book
    }

    /// Current balance of an address.
    pub fn balance(&self, address: &Address) -> f64 {
        self.initial_grant + self.movements.get(address).copied().unwrap_or(0.0)
    }

    /// Checks that each transaction in order stays within the sender's
    /// available balance, then applies the whole block.
    ///
    /// Returns the zero-based offset of the first overdrawing transaction
    /// on failure, leaving the book untouched (all-or-nothing).
    pub fn apply_block(&mut self, block: &Block) -> Result<(), (usize, String)> {
        let mut scratch = self.clone();
        for (offset, tx) in block.transactions.iter().enumerate() {
            let available = scratch.balance(&tx.from);
            let required = tx.total_cost();
            if required > available {
                return Err((
                    offset,
                    format!(
                        "double spend by {}: requires {required:.4}, confirmed balance {available:.4}",
                        tx.from
                    ),
                ));
            }
            scratch.apply_transaction(tx);
        }
        scratch.credit_validator(block);
        *self = scratch;
        Ok(())
    }

    /// Applies a block without overdraw checks (rebuild path).
    fn apply_block_unchecked(&mut self, block: &Block) {
        for tx in &block.transactions {
            self.apply_transaction(tx);
        }
        self.credit_validator(block);
    }

    fn apply_transaction(&mut self, tx: &Transaction) {
        *self.movements.entry(tx.from.clone()).or_insert(0.0) -= tx.total_cost();
        *self.movements.entry(tx.to.clone()).or_insert(0.0) += tx.amount;
    }

    /// Credits the validator with the block reward and the block's fees.
    /// The genesis block mints nothing.
    fn credit_validator(&mut self, block: &Block) {
        if block.is_genesis() {
            return;
        }
        *self
            .movements
            .entry(block.validator.clone())
            .or_insert(0.0) += self.block_reward + block.total_fees();
    }
}
