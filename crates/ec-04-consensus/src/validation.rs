//! Candidate block validation.

use crate::domain::errors::ConsensusResult;
use ec_05_chain::{domain::chain, Block, ChainManager};

/// Validates a candidate against the manager's current head.
///
/// Checks linkage (a proposal computed against a stale head fails here),
/// index continuity, hash round-trip, difficulty, and transaction
/// well-formedness. Balance effects are re-checked by the append itself.
pub fn validate_block(manager: &ChainManager, candidate: &Block) -> ConsensusResult<()> {
    let head = manager.head();
    chain::check_link(&head, candidate)?;
    chain::check_block_content(candidate, manager.target())?;
    Ok(())
}
