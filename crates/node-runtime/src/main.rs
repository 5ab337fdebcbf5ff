//! Ember-Chain node entry point.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging
//! 2. Load configuration (defaults + `EC_*` environment overrides)
//! 3. Build the engine context (mempool, contracts, registry, chain,
//!    consensus engine)
//! 4. Join the local node into the registry
//! 5. Run the block production loop until Ctrl-C

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use ec_04_consensus::ConsensusError;
use node_runtime::api::JoinNodeRequest;
use node_runtime::{EngineContext, NodeConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = NodeConfig::from_env();
    let node_id = std::env::var("EC_NODE_ID").unwrap_or_else(|_| "local-node".to_string());
    let stake = std::env::var("EC_NODE_STAKE")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(0);
    let block_interval = Duration::from_millis(config.block_interval_ms);

    info!("===========================================");
    info!("  Ember-Chain Node Runtime v0.1.0");
    info!("===========================================");
    info!(
        difficulty_bits = config.chain.difficulty_bits,
        block_interval_ms = config.block_interval_ms,
        "configuration loaded"
    );

    let context = EngineContext::new(config);
    context
        .join_node(JoinNodeRequest {
            node_id: node_id.clone(),
            stake_amount: stake,
            metadata: None,
        })
        .context("failed to join local node")?;
    info!(node = %node_id, stake, "local node joined");

    // Shutdown channel
    let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(true);
        }
    });

    info!("Node is running. Press Ctrl+C to stop.");
    let mut interval = tokio::time::interval(block_interval);
    loop {
        tokio::select! {
            _ = interval.tick() => {
                match context.produce_block().await {
                    Ok(block) => info!(
                        index = block.index,
                        transactions = block.transactions.len(),
                        validator = %block.validator,
                        "block produced"
                    ),
                    Err(ConsensusError::Proof(reason)) => {
                        warn!(%reason, "proposal abandoned");
                    }
                    Err(error) => warn!(%error, "proposal failed"),
                }
            }
            _ = shutdown_rx.changed() => {
                break;
            }
        }
    }

    info!("Shutting down");
    Ok(())
}
