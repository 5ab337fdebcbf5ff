//! Node registry service.
//!
//! Join-ordered node set with O(1) id lookup, after the validator-set
//! layout used by consensus: a vector preserving join order (selection
//! must walk a stable order) plus an index map.

use crate::domain::errors::RegistryError;
use crate::domain::node::{NodeInfo, NodeProfile};
use crate::domain::selection::select_weighted;
use parking_lot::RwLock;
use rand::Rng;
use shared_types::{NodeId, Timestamp};
use std::collections::HashMap;

#[derive(Default)]
struct NodeSet {
    /// Nodes in join order.
    nodes: Vec<NodeInfo>,
    /// Quick lookup by node id.
    lookup: HashMap<NodeId, usize>,
}

impl NodeSet {
    fn rebuild_lookup(&mut self) {
        self.lookup = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();
    }
}

/// Shared node registry handle.
#[derive(Default)]
pub struct NodeRegistry {
    set: RwLock<NodeSet>,
}

impl NodeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a node with default reputation and the profile's stake.
    ///
    /// # Errors
    /// `DuplicateNode` if the id is already present.
    #[tracing::instrument(skip(self, profile), fields(node = %id, stake = profile.stake))]
    pub fn add(
        &self,
        id: NodeId,
        profile: NodeProfile,
        now: Timestamp,
    ) -> Result<(), RegistryError> {
        let mut set = self.set.write();
        if set.lookup.contains_key(&id) {
            return Err(RegistryError::DuplicateNode(id));
        }
        let index = set.nodes.len();
        set.nodes.push(NodeInfo::new(id.clone(), profile, now));
        set.lookup.insert(id, index);
        tracing::info!("node joined");
        Ok(())
    }

    /// Removes a node. Idempotent: removing an absent id is a no-op.
    #[tracing::instrument(skip(self), fields(node = %id))]
    pub fn remove(&self, id: &NodeId) {
        let mut set = self.set.write();
        if let Some(index) = set.lookup.remove(id) {
            set.nodes.remove(index);
            set.rebuild_lookup();
            tracing::info!("node left");
        }
    }

    /// Selects a validator by stake-weighted draw from the injected
    /// random source. `None` when the registry is empty.
    pub fn select_validator<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<NodeInfo> {
        let set = self.set.read();
        select_weighted(&set.nodes, rng).cloned()
    }

    /// Credits a validator whose proposed block was appended: bumps the
    /// proposal and validation counters, reputation, and stake reward.
    pub fn record_accepted_block(&self, id: &NodeId, stake_reward: u64, now: Timestamp) {
        let mut set = self.set.write();
        let Some(&index) = set.lookup.get(id) else {
            tracing::warn!(node = %id, "accepted block from unregistered validator");
            return;
        };
        let node = &mut set.nodes[index];
        node.proposed_blocks += 1;
        node.validated_blocks += 1;
        node.reputation += 1;
        node.stake += stake_reward;
        node.last_seen = now;
    }

    /// Penalizes a validator whose proposal was rejected. Reputation is
    /// floored at zero.
    pub fn record_rejected_proposal(&self, id: &NodeId, now: Timestamp) {
        let mut set = self.set.write();
        let Some(&index) = set.lookup.get(id) else {
            return;
        };
        let node = &mut set.nodes[index];
        node.proposed_blocks += 1;
        node.reputation = (node.reputation - 1).max(0);
        node.last_seen = now;
    }

    /// Marks node activity.
    pub fn touch(&self, id: &NodeId, now: Timestamp) {
        let mut set = self.set.write();
        if let Some(&index) = set.lookup.get(id) {
            set.nodes[index].last_seen = now;
        }
    }

    /// Returns a snapshot of a node.
    pub fn get(&self, id: &NodeId) -> Option<NodeInfo> {
        let set = self.set.read();
        set.lookup.get(id).map(|&i| set.nodes[i].clone())
    }

    /// Total bonded stake across all nodes.
    pub fn total_stake(&self) -> u64 {
        self.set.read().nodes.iter().map(|n| n.stake).sum()
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.set.read().nodes.len()
    }

    /// Returns true if no nodes are registered.
    pub fn is_empty(&self) -> bool {
        self.set.read().nodes.is_empty()
    }
}
