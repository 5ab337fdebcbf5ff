//! Network statistics projection.
//!
//! A pure read-only view over the canonical chain. Identical chain state
//! always produces identical stats; nothing here reads clocks or random
//! sources.

use super::block::Block;
use serde::{Deserialize, Serialize};

/// Aggregate network view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkStats {
    /// Blocks on the canonical chain, genesis included.
    pub block_count: usize,
    /// Confirmed transactions across all blocks.
    pub transaction_count: usize,
    /// Registered nodes.
    pub node_count: usize,
    /// Average spacing between consecutive blocks (ms).
    pub avg_block_interval_ms: f64,
    /// Current difficulty (leading zero bits).
    pub difficulty_bits: u32,
    /// Estimated hashes per second implied by difficulty and spacing.
    pub estimated_hash_rate: f64,
    /// Coins minted by block rewards.
    pub circulating_supply: f64,
    /// Toy valuation of the circulating supply.
    pub market_value: f64,
}

/// Computes the stats projection for a chain snapshot.
///
/// The hash-rate estimate assumes one expected solution per `2^bits`
/// attempts. Market value prices the supply with a toy model that grows
/// with difficulty and observed transaction volume.
pub fn compute_stats(
    blocks: &[Block],
    node_count: usize,
    difficulty_bits: u32,
    block_reward: f64,
) -> NetworkStats {
    let block_count = blocks.len();
    let transaction_count = blocks.iter().map(|b| b.transactions.len()).sum();

    let avg_block_interval_ms = if block_count > 1 {
        let first = blocks[0].timestamp;
        let last = blocks[block_count - 1].timestamp;
        last.saturating_sub(first) as f64 / (block_count - 1) as f64
    } else {
        0.0
    };

    let expected_attempts = 2f64.powi(difficulty_bits as i32);
    let estimated_hash_rate = if avg_block_interval_ms > 0.0 {
        expected_attempts / (avg_block_interval_ms / 1_000.0)
    } else {
        0.0
    };

    let mined_blocks = block_count.saturating_sub(1);
    let circulating_supply = mined_blocks as f64 * block_reward;

    let avg_txs_per_block = if mined_blocks > 0 {
        transaction_count as f64 / mined_blocks as f64
    } else {
        0.0
    };
    let unit_price = 1.0 + 0.1 * difficulty_bits as f64 + 0.01 * avg_txs_per_block;
    let market_value = circulating_supply * unit_price;

    NetworkStats {
        block_count,
        transaction_count,
        node_count,
        avg_block_interval_ms,
        difficulty_bits,
        estimated_hash_rate,
        circulating_supply,
        market_value,
    }
}
