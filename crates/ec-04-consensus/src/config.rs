//! Configuration types for the consensus engine.

/// Runtime configuration for block proposal.
#[derive(Clone, Debug)]
pub struct ConsensusConfig {
    /// Maximum transactions drained into one candidate block.
    pub max_block_transactions: usize,

    /// Proof-search budget: attempts before giving up on a candidate.
    pub proof_max_attempts: u64,

    /// Stake credited to a validator per accepted block.
    pub stake_reward: u64,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            max_block_transactions: 100,
            proof_max_attempts: 1_000_000,
            stake_reward: 1,
        }
    }
}
