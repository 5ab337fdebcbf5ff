//! Stake-weighted validator selection.
//!
//! Roulette-wheel draw: a uniform value in `[0, total_stake)` is walked
//! across the nodes' stake intervals in join order. When total stake is
//! zero the draw degrades to uniform selection over all nodes, an
//! explicit fallback rather than a failure.

use super::node::NodeInfo;
use rand::Rng;

/// Selects a validator from `nodes` using the injected random source.
///
/// Returns `None` only when `nodes` is empty. Deterministic for a fixed
/// generator state and node order.
pub fn select_weighted<'a, R: Rng + ?Sized>(
    nodes: &'a [NodeInfo],
    rng: &mut R,
) -> Option<&'a NodeInfo> {
    if nodes.is_empty() {
        return None;
    }

    let total_stake: u64 = nodes.iter().map(|n| n.stake).sum();
    if total_stake == 0 {
        return nodes.get(rng.gen_range(0..nodes.len()));
    }

    let draw = rng.gen_range(0..total_stake);
    let mut accumulated = 0u64;
    for node in nodes {
        accumulated += node.stake;
        if draw < accumulated {
            return Some(node);
        }
    }

    // Unreachable for draw < total_stake; kept as a safe terminal.
    nodes.last()
}
