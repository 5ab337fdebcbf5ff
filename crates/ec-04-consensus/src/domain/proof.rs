//! Bounded proof-of-work search.
//!
//! Finds a nonce making the block hash satisfy the difficulty target.
//! The search never spins forever: it stops at the attempt budget and it
//! polls a shared cancel flag so a competing appended block can abort an
//! in-flight proposal.

use ec_05_chain::compute_block_hash;
use shared_types::{meets_difficulty, Hash, Timestamp, Transaction, U256};
use std::sync::atomic::{AtomicBool, Ordering};

/// How many nonces are tried between cancel-flag polls.
const CANCEL_POLL_INTERVAL: u64 = 1_024;

/// Proof-search failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProofError {
    /// The attempt budget ran out before a valid nonce was found.
    #[error("proof search exhausted after {attempts} attempts")]
    Exhausted { attempts: u64 },

    /// The search was cancelled (a competing block was appended).
    #[error("proof search cancelled")]
    Cancelled,
}

/// Searches for a proof nonce for the given block fields.
///
/// Deterministic given the fields: nonces are tried in ascending order,
/// so the same candidate always yields the same proof.
pub fn search_proof(
    index: u64,
    previous_hash: &Hash,
    transactions: &[Transaction],
    timestamp: Timestamp,
    target: U256,
    max_attempts: u64,
    cancel: &AtomicBool,
) -> Result<u64, ProofError> {
    for proof in 0..max_attempts {
        if proof % CANCEL_POLL_INTERVAL == 0 && cancel.load(Ordering::Relaxed) {
            return Err(ProofError::Cancelled);
        }
        let hash = compute_block_hash(index, previous_hash, transactions, timestamp, proof);
        if meets_difficulty(&hash, target) {
            return Ok(proof);
        }
    }
    Err(ProofError::Exhausted {
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::difficulty_target;

    fn idle_flag() -> AtomicBool {
        AtomicBool::new(false)
    }

    #[test]
    fn test_search_finds_valid_proof() {
        let target = difficulty_target(4);
        let cancel = idle_flag();
        let proof =
            search_proof(1, &[0x11; 32], &[], 5_000, target, 1_000_000, &cancel).unwrap();
        let hash = compute_block_hash(1, &[0x11; 32], &[], 5_000, proof);
        assert!(meets_difficulty(&hash, target));
    }

    #[test]
    fn test_search_is_deterministic() {
        let target = difficulty_target(4);
        let cancel = idle_flag();
        let a = search_proof(1, &[0x11; 32], &[], 5_000, target, 1_000_000, &cancel).unwrap();
        let b = search_proof(1, &[0x11; 32], &[], 5_000, target, 1_000_000, &cancel).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_search_respects_budget() {
        // 200 leading zero bits will not be found in 64 attempts
        let target = difficulty_target(200);
        let cancel = idle_flag();
        let err = search_proof(1, &[0x11; 32], &[], 5_000, target, 64, &cancel).unwrap_err();
        assert_eq!(err, ProofError::Exhausted { attempts: 64 });
    }

    #[test]
    fn test_search_honors_cancel_flag() {
        let target = difficulty_target(200);
        let cancel = AtomicBool::new(true);
        let err =
            search_proof(1, &[0x11; 32], &[], 5_000, target, u64::MAX, &cancel).unwrap_err();
        assert_eq!(err, ProofError::Cancelled);
    }
}
