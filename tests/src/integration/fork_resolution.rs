//! # Fork Resolution Flows
//!
//! Fork creation, parallel extension, and the longest-valid-chain merge
//! rule exercised through the chain manager.

#[cfg(test)]
mod tests {
    use ec_04_consensus::search_proof;
    use ec_05_chain::{Block, CandidateChain, ChainConfig, ChainError, ChainManager};
    use shared_types::Transaction;
    use std::sync::atomic::AtomicBool;

    fn make_manager(difficulty_bits: u32) -> ChainManager {
        ChainManager::new(ChainConfig {
            difficulty_bits,
            ..ChainConfig::default()
        })
    }

    /// Mines a linking successor for `head` at the manager's difficulty.
    fn mine_next(
        manager: &ChainManager,
        head: &Block,
        transactions: Vec<Transaction>,
        validator: &str,
    ) -> Block {
        let timestamp = head.timestamp + 1_000;
        let cancel = AtomicBool::new(false);
        let proof = search_proof(
            head.index + 1,
            &head.hash,
            &transactions,
            timestamp,
            manager.target(),
            10_000_000,
            &cancel,
        )
        .expect("test difficulty is minable");
        Block::seal(
            head.index + 1,
            head.hash,
            transactions,
            timestamp,
            proof,
            validator.into(),
        )
    }

    #[test]
    fn test_fork_extends_independently_of_canonical() {
        let manager = make_manager(0);
        for _ in 0..3 {
            let next = mine_next(&manager, &manager.head(), vec![], "n1");
            manager.append(next).unwrap();
        }

        let mut branch = manager.fork(1).unwrap();
        assert_eq!(branch.len(), 2);

        // Extending the branch leaves the canonical chain alone
        let next = mine_next(&manager, branch.head().unwrap(), vec![], "n2");
        branch.push(next).unwrap();
        assert_eq!(branch.len(), 3);
        assert_eq!(manager.height(), 3);
        assert_eq!(manager.head().validator, "n1");
    }

    #[test]
    fn test_longer_valid_fork_wins() {
        let manager = make_manager(4);
        manager
            .append(mine_next(&manager, &manager.head(), vec![], "n1"))
            .unwrap();

        // Competing branch from genesis grows past the canonical chain
        let mut branch = manager.fork(0).unwrap();
        for _ in 0..3 {
            let head = branch.head().unwrap().clone();
            branch.push(mine_next(&manager, &head, vec![], "n2")).unwrap();
        }

        manager.merge(&branch).unwrap();
        assert_eq!(manager.height(), 3);
        assert_eq!(manager.head().validator, "n2");
    }

    #[test]
    fn test_shorter_valid_fork_rejected() {
        let manager = make_manager(0);
        for _ in 0..3 {
            manager
                .append(mine_next(&manager, &manager.head(), vec![], "n1"))
                .unwrap();
        }

        let mut branch = manager.fork(0).unwrap();
        let head = branch.head().unwrap().clone();
        branch.push(mine_next(&manager, &head, vec![], "n2")).unwrap();

        // Two blocks versus three: rejected, canonical untouched
        assert!(matches!(
            manager.merge(&branch),
            Err(ChainError::MergeRejected { .. })
        ));
        assert_eq!(manager.height(), 3);
        assert_eq!(manager.head().validator, "n1");
    }

    #[test]
    fn test_longer_invalid_fork_rejected() {
        let manager = make_manager(0);
        manager
            .append(mine_next(&manager, &manager.head(), vec![], "n1"))
            .unwrap();

        // Build a longer branch, then corrupt a middle block
        let mut blocks = manager.fork(0).unwrap().blocks().to_vec();
        for _ in 0..3 {
            let head = blocks.last().unwrap();
            blocks.push(mine_next(&manager, head, vec![], "n2"));
        }
        blocks[2].previous_hash = [0xAA; 32];
        blocks[2].hash = blocks[2].recompute_hash();
        let corrupted = CandidateChain::from_blocks(blocks);

        assert!(matches!(
            manager.merge(&corrupted),
            Err(ChainError::MergeRejected { .. })
        ));
        assert_eq!(manager.height(), 1);
    }

    #[test]
    fn test_unmined_fork_rejected_at_difficulty() {
        let manager = make_manager(64);

        // Sealed but never mined: proofs are arbitrary
        let genesis = Block::genesis();
        let fake = Block::seal(1, genesis.hash, vec![], genesis.timestamp + 1_000, 1, "n2".into());
        let branch = CandidateChain::from_blocks(vec![genesis, fake]);

        assert!(matches!(
            manager.merge(&branch),
            Err(ChainError::MergeRejected { .. })
        ));
    }

    #[test]
    fn test_merge_replays_balances_from_winning_branch() {
        let manager = make_manager(0);
        let payment = Transaction::new("alice".into(), "bob".into(), 200.0, 0.0, 1);
        manager
            .append(mine_next(&manager, &manager.head(), vec![payment], "n1"))
            .unwrap();
        assert_eq!(manager.balance(&"bob".to_string()), 1_200.0);

        // The winning branch never saw alice's payment
        let mut branch = manager.fork(0).unwrap();
        for _ in 0..2 {
            let head = branch.head().unwrap().clone();
            branch.push(mine_next(&manager, &head, vec![], "n2")).unwrap();
        }
        manager.merge(&branch).unwrap();

        // The orphaned transfer is gone from balances and history
        assert_eq!(manager.balance(&"bob".to_string()), 1_000.0);
        assert!(manager.transaction_history(&"bob".to_string()).is_empty());
    }
}
