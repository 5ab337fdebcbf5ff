//! Runtime configuration.

use ec_01_mempool::MempoolConfig;
use ec_04_consensus::ConsensusConfig;
use ec_05_chain::ChainConfig;

/// Full node configuration, assembled from per-subsystem configs.
#[derive(Clone, Debug)]
pub struct NodeConfig {
    /// Chain rules (difficulty, grants, reward).
    pub chain: ChainConfig,
    /// Consensus pipeline settings.
    pub consensus: ConsensusConfig,
    /// Mempool capacity settings.
    pub mempool: MempoolConfig,
    /// Spacing of the block production loop (ms).
    pub block_interval_ms: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            chain: ChainConfig::default(),
            consensus: ConsensusConfig::default(),
            mempool: MempoolConfig::default(),
            block_interval_ms: 5_000,
        }
    }
}

impl NodeConfig {
    /// Loads configuration with `EC_*` environment overrides.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(bits) = env_parse("EC_DIFFICULTY_BITS") {
            config.chain.difficulty_bits = bits;
        }
        if let Some(balance) = env_parse("EC_INITIAL_BALANCE") {
            config.chain.initial_balance = balance;
        }
        if let Some(reward) = env_parse("EC_BLOCK_REWARD") {
            config.chain.block_reward = reward;
        }
        if let Some(max) = env_parse("EC_MAX_BLOCK_TXS") {
            config.consensus.max_block_transactions = max;
        }
        if let Some(attempts) = env_parse("EC_PROOF_MAX_ATTEMPTS") {
            config.consensus.proof_max_attempts = attempts;
        }
        if let Some(capacity) = env_parse("EC_MEMPOOL_CAPACITY") {
            config.mempool.max_transactions = capacity;
        }
        if let Some(interval) = env_parse("EC_BLOCK_INTERVAL_MS") {
            config.block_interval_ms = interval;
        }

        config
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, raw, "ignoring unparseable environment override");
            None
        }
    }
}
