//! Cross-subsystem integration tests.

pub mod contracts;
pub mod flows;
pub mod fork_resolution;
pub mod selection;

#[cfg(test)]
pub(crate) mod support {
    use ec_05_chain::ChainConfig;
    use node_runtime::{EngineContext, NodeConfig, NoopTransport};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    /// A context with unconstrained difficulty and a seeded random
    /// source, so tests are fast and deterministic.
    pub fn seeded_context(seed: u64) -> EngineContext {
        let config = NodeConfig {
            chain: ChainConfig {
                difficulty_bits: 0,
                ..ChainConfig::default()
            },
            ..NodeConfig::default()
        };
        EngineContext::with_parts(config, Arc::new(NoopTransport), StdRng::seed_from_u64(seed))
    }

    /// A context that actually searches for proofs (small difficulty).
    pub fn mining_context(seed: u64) -> EngineContext {
        let config = NodeConfig {
            chain: ChainConfig {
                difficulty_bits: 4,
                ..ChainConfig::default()
            },
            ..NodeConfig::default()
        };
        EngineContext::with_parts(config, Arc::new(NoopTransport), StdRng::seed_from_u64(seed))
    }
}
