//! Network collaborator boundary.
//!
//! Peer discovery, gossip, and wire serialization live outside this core.
//! The engine only pushes outbound objects through this trait and accepts
//! inbound blocks via `EngineContext::receive_block`.

use async_trait::async_trait;
use ec_05_chain::Block;
use shared_types::Transaction;

/// Outbound transport the engine broadcasts through.
#[async_trait]
pub trait NetworkTransport: Send + Sync {
    /// Announces a newly accepted transaction to peers.
    async fn broadcast_transaction(&self, tx: &Transaction) -> anyhow::Result<()>;

    /// Announces a newly appended block to peers.
    async fn broadcast_block(&self, block: &Block) -> anyhow::Result<()>;
}

/// Transport that drops everything. The default for single-node runs and
/// tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopTransport;

#[async_trait]
impl NetworkTransport for NoopTransport {
    async fn broadcast_transaction(&self, tx: &Transaction) -> anyhow::Result<()> {
        tracing::trace!(tx = %tx.id, "broadcast_transaction (noop)");
        Ok(())
    }

    async fn broadcast_block(&self, block: &Block) -> anyhow::Result<()> {
        tracing::trace!(index = block.index, "broadcast_block (noop)");
        Ok(())
    }
}
