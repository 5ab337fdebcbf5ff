//! Node entities.

use serde::{Deserialize, Serialize};
use shared_types::{NodeId, Timestamp};

/// Default reputation assigned at join.
pub const DEFAULT_REPUTATION: i64 = 100;

/// Join-time profile supplied by the node.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NodeProfile {
    /// Initial stake bonded by the node (defaults to 0).
    #[serde(default)]
    pub stake: u64,
    /// Free-form operator metadata.
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// A participating node.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeInfo {
    /// Node identifier.
    pub id: NodeId,
    /// Bonded stake; drives validator selection weight.
    pub stake: u64,
    /// Reputation score, floored at zero.
    pub reputation: i64,
    /// Blocks this node validated.
    pub validated_blocks: u64,
    /// Blocks this node proposed.
    pub proposed_blocks: u64,
    /// Join time (ms).
    pub joined_at: Timestamp,
    /// Last activity time (ms).
    pub last_seen: Timestamp,
    /// Operator metadata from the join profile.
    pub metadata: Option<serde_json::Value>,
}

impl NodeInfo {
    /// Creates a node record from its join profile.
    pub fn new(id: NodeId, profile: NodeProfile, now: Timestamp) -> Self {
        Self {
            id,
            stake: profile.stake,
            reputation: DEFAULT_REPUTATION,
            validated_blocks: 0,
            proposed_blocks: 0,
            joined_at: now,
            last_seen: now,
            metadata: profile.metadata,
        }
    }
}
