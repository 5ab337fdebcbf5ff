//! Chain sequence validation and candidate branches.

use super::balances::BalanceBook;
use super::block::Block;
use super::errors::ChainError;
use shared_types::{meets_difficulty, TxId, U256};
use std::collections::HashSet;

/// An alternate chain branching from some earlier block, held apart from
/// the canonical chain until resolved or discarded.
///
/// A candidate starts as a canonical prefix (`ChainManager::fork`) and is
/// extended independently; `push` keeps it link-valid as it grows. Full
/// validation (difficulty, balances, replay) happens at merge time.
#[derive(Clone, Debug)]
pub struct CandidateChain {
    blocks: Vec<Block>,
}

impl CandidateChain {
    /// Wraps an existing block sequence.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// The branch head.
    pub fn head(&self) -> Option<&Block> {
        self.blocks.last()
    }

    /// Number of blocks on the branch.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns true if the branch holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The branch blocks in order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Extends the branch, enforcing linkage against the branch head.
    pub fn push(&mut self, block: Block) -> Result<(), ChainError> {
        if let Some(head) = self.blocks.last() {
            check_link(head, &block)?;
        }
        if !block.hash_is_consistent() {
            return Err(ChainError::InvalidSequence {
                index: block.index,
                reason: "stored hash does not match recomputed hash".into(),
            });
        }
        self.blocks.push(block);
        Ok(())
    }
}

/// Checks linkage between a block and its predecessor.
pub fn check_link(prev: &Block, block: &Block) -> Result<(), ChainError> {
    if block.previous_hash != prev.hash {
        return Err(ChainError::InvalidLinkage {
            index: block.index,
            expected: prev.hash,
            actual: block.previous_hash,
        });
    }
    if block.index != prev.index + 1 {
        return Err(ChainError::InvalidSequence {
            index: block.index,
            reason: format!("index must be {}, predecessor is {}", prev.index + 1, prev.index),
        });
    }
    Ok(())
}

/// Checks a block's self-contained content: hash round-trip, difficulty,
/// and transaction well-formedness. Genesis is exempt from difficulty.
pub fn check_block_content(block: &Block, target: U256) -> Result<(), ChainError> {
    if !block.hash_is_consistent() {
        return Err(ChainError::InvalidSequence {
            index: block.index,
            reason: "stored hash does not match recomputed hash".into(),
        });
    }
    if !block.is_genesis() && !meets_difficulty(&block.hash, target) {
        return Err(ChainError::InvalidSequence {
            index: block.index,
            reason: "block hash does not satisfy difficulty".into(),
        });
    }
    for tx in &block.transactions {
        if let Some(reason) = tx.validity_error() {
            return Err(ChainError::InvalidSequence {
                index: block.index,
                reason: format!("malformed transaction {}: {reason}", tx.id),
            });
        }
    }
    Ok(())
}

/// Validates a full candidate sequence from genesis.
///
/// Checks genesis shape, linkage, hashes, difficulty, transaction
/// well-formedness, transaction-id uniqueness, and the derived balance
/// invariant. Returns the resulting balance book so a successful merge
/// can adopt it without replaying.
pub fn validate_sequence(
    blocks: &[Block],
    target: U256,
    initial_grant: f64,
    block_reward: f64,
) -> Result<BalanceBook, ChainError> {
    let Some(genesis) = blocks.first() else {
        return Err(ChainError::InvalidSequence {
            index: 0,
            reason: "empty chain".into(),
        });
    };
    if !genesis.is_genesis() {
        return Err(ChainError::InvalidSequence {
            index: genesis.index,
            reason: "chain must start at a genesis block".into(),
        });
    }

    let mut balances = BalanceBook::new(initial_grant, block_reward);
    let mut seen: HashSet<TxId> = HashSet::new();

    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            check_link(&blocks[i - 1], block)?;
        }
        check_block_content(block, target)?;
        for tx in &block.transactions {
            if !seen.insert(tx.id) {
                return Err(ChainError::InvalidSequence {
                    index: block.index,
                    reason: format!("transaction {} confirmed twice", tx.id),
                });
            }
        }
        balances
            .apply_block(block)
            .map_err(|(_, reason)| ChainError::InvalidSequence {
                index: block.index,
                reason,
            })?;
    }

    Ok(balances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{difficulty_target, Transaction};

    fn unconstrained() -> U256 {
        difficulty_target(0)
    }

    fn extend(prev: &Block, transactions: Vec<Transaction>) -> Block {
        Block::seal(
            prev.index + 1,
            prev.hash,
            transactions,
            prev.timestamp + 1_000,
            0,
            "n1".into(),
        )
    }

    #[test]
    fn test_valid_sequence_passes() {
        let genesis = Block::genesis();
        let b1 = extend(&genesis, vec![]);
        let b2 = extend(&b1, vec![]);
        let chain = vec![genesis, b1, b2];
        assert!(validate_sequence(&chain, unconstrained(), 1_000.0, 50.0).is_ok());
    }

    #[test]
    fn test_broken_linkage_detected() {
        let genesis = Block::genesis();
        let b1 = extend(&genesis, vec![]);
        let mut b2 = extend(&b1, vec![]);
        b2.previous_hash = [0xAB; 32];
        b2.hash = b2.recompute_hash();
        let chain = vec![genesis, b1, b2];
        assert!(matches!(
            validate_sequence(&chain, unconstrained(), 1_000.0, 50.0),
            Err(ChainError::InvalidLinkage { index: 2, .. })
        ));
    }

    #[test]
    fn test_tampered_block_detected() {
        let genesis = Block::genesis();
        let mut b1 = extend(
            &genesis,
            vec![Transaction::new("alice".into(), "bob".into(), 5.0, 0.0, 1)],
        );
        b1.transactions[0].amount = 500.0;
        let chain = vec![genesis, b1];
        assert!(matches!(
            validate_sequence(&chain, unconstrained(), 1_000.0, 50.0),
            Err(ChainError::InvalidSequence { index: 1, .. })
        ));
    }

    #[test]
    fn test_replayed_transaction_detected() {
        let genesis = Block::genesis();
        let tx = Transaction::new("alice".into(), "bob".into(), 5.0, 0.0, 1);
        let b1 = extend(&genesis, vec![tx.clone()]);
        let b2 = extend(&b1, vec![tx]);
        let chain = vec![genesis, b1, b2];
        let err = validate_sequence(&chain, unconstrained(), 1_000.0, 50.0).unwrap_err();
        assert!(matches!(err, ChainError::InvalidSequence { index: 2, .. }));
    }

    #[test]
    fn test_candidate_push_enforces_linkage() {
        let genesis = Block::genesis();
        let b1 = extend(&genesis, vec![]);
        let mut candidate = CandidateChain::from_blocks(vec![genesis.clone()]);
        candidate.push(b1.clone()).unwrap();

        // Skipping a block breaks linkage
        let b3 = Block::seal(3, [0x11; 32], vec![], 9_000, 0, "n1".into());
        assert!(candidate.push(b3).is_err());
        assert_eq!(candidate.len(), 2);
    }
}
