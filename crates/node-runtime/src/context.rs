//! The engine context.
//!
//! One explicit object owning every subsystem: mempool, contract
//! registry, node registry, chain manager, and the consensus engine that
//! references them. Constructed at startup, torn down by drop: the
//! replacement for hidden process-wide engine state.

use crate::api::{
    ExecuteContractRequest, JoinNodeRequest, SubmitTransactionRequest, SubmitTransactionResponse,
};
use crate::config::NodeConfig;
use crate::network::{NetworkTransport, NoopTransport};
use ec_01_mempool::Mempool;
use ec_02_contracts::{ContractError, ContractId, ContractRegistry, ExecutionResult};
use ec_03_registry::{NodeProfile, NodeRegistry, RegistryError};
use ec_04_consensus::{ConsensusEngine, ConsensusError, ConsensusResult};
use ec_05_chain::{Block, ChainManager, NetworkStats, RecordedTransaction};
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared_types::{Address, NodeId, Timestamp, Transaction};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Fully wired engine.
pub struct EngineContext {
    mempool: Arc<Mempool>,
    contracts: Arc<ContractRegistry>,
    registry: Arc<NodeRegistry>,
    chain: Arc<ChainManager>,
    engine: Arc<ConsensusEngine<StdRng>>,
    transport: Arc<dyn NetworkTransport>,
}

impl EngineContext {
    /// Builds a context with an entropy-seeded random source and a noop
    /// transport.
    pub fn new(config: NodeConfig) -> Self {
        Self::with_parts(config, Arc::new(NoopTransport), StdRng::from_entropy())
    }

    /// Builds a context with an explicit transport and random source
    /// (tests inject a seeded generator here).
    pub fn with_parts(
        config: NodeConfig,
        transport: Arc<dyn NetworkTransport>,
        rng: StdRng,
    ) -> Self {
        let mempool = Arc::new(Mempool::new(config.mempool.clone()));
        let contracts = Arc::new(ContractRegistry::new());
        let registry = Arc::new(NodeRegistry::new());
        let chain = Arc::new(ChainManager::new(config.chain.clone()));
        let engine = Arc::new(ConsensusEngine::new(
            config.consensus.clone(),
            Arc::clone(&mempool),
            Arc::clone(&contracts),
            Arc::clone(&registry),
            Arc::clone(&chain),
            rng,
        ));
        Self {
            mempool,
            contracts,
            registry,
            chain,
            engine,
            transport,
        }
    }

    /// Wall-clock time in ms.
    pub fn now_ms() -> Timestamp {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as Timestamp)
            .unwrap_or(0)
    }

    // -------------------------------------------------------------------------
    // Transaction submission API
    // -------------------------------------------------------------------------

    /// Accepts or rejects a submitted transfer; accepted transactions are
    /// broadcast to peers.
    pub async fn submit_transaction(
        &self,
        request: SubmitTransactionRequest,
    ) -> SubmitTransactionResponse {
        let tx = Transaction::new(
            request.from,
            request.to,
            request.amount,
            request.fee,
            Self::now_ms(),
        );
        match self.mempool.submit(tx.clone(), tx.timestamp) {
            Ok(id) => {
                if let Err(error) = self.transport.broadcast_transaction(&tx).await {
                    tracing::warn!(%error, "transaction broadcast failed");
                }
                SubmitTransactionResponse::accepted(id)
            }
            Err(error) => SubmitTransactionResponse::rejected(error.to_string()),
        }
    }

    // -------------------------------------------------------------------------
    // Node membership API
    // -------------------------------------------------------------------------

    /// Registers a node with its join profile.
    pub fn join_node(&self, request: JoinNodeRequest) -> Result<(), RegistryError> {
        self.registry.add(
            request.node_id,
            NodeProfile {
                stake: request.stake_amount,
                metadata: request.metadata,
            },
            Self::now_ms(),
        )
    }

    /// Removes a node; unknown ids are a no-op.
    pub fn leave_node(&self, node_id: &NodeId) {
        self.registry.remove(node_id);
    }

    // -------------------------------------------------------------------------
    // Contract API
    // -------------------------------------------------------------------------

    /// Registers raw contract source, returning its id.
    pub fn register_contract(&self, source: String, creator: Address) -> ContractId {
        self.contracts
            .parse_and_register(source, creator, Self::now_ms())
    }

    /// Deploys a registered contract at the current chain head.
    pub fn deploy_contract(
        &self,
        id: ContractId,
        deployer: Address,
    ) -> Result<Address, ContractError> {
        self.contracts
            .deploy(id, deployer, self.chain.height(), Self::now_ms())
    }

    /// Executes a function against a deployed contract.
    pub fn execute_contract(&self, request: ExecuteContractRequest) -> ExecutionResult {
        self.contracts.execute(
            &request.address,
            &request.function_name,
            &request.args,
            &request.sender,
        )
    }

    // -------------------------------------------------------------------------
    // Query API
    // -------------------------------------------------------------------------

    /// Confirmed balance of an address.
    pub fn balance(&self, address: &Address) -> f64 {
        self.chain.balance(address)
    }

    /// Confirmed transactions touching an address, in chain order.
    pub fn transaction_history(&self, address: &Address) -> Vec<RecordedTransaction> {
        self.chain.transaction_history(address)
    }

    /// Aggregate network snapshot.
    pub fn network_stats(&self) -> NetworkStats {
        self.chain.network_stats(self.registry.len())
    }

    // -------------------------------------------------------------------------
    // Consensus pipeline
    // -------------------------------------------------------------------------

    /// Runs one proposal round off the async runtime (proof search is
    /// CPU-bound) and broadcasts the appended block.
    pub async fn produce_block(&self) -> ConsensusResult<Block> {
        let engine = Arc::clone(&self.engine);
        let now = Self::now_ms();
        let block = tokio::task::spawn_blocking(move || engine.propose_block(now))
            .await
            .map_err(|join_error| {
                ConsensusError::Internal(format!("block production task failed: {join_error}"))
            })??;

        if let Err(error) = self.transport.broadcast_block(&block).await {
            tracing::warn!(%error, "block broadcast failed");
        }
        Ok(block)
    }

    /// Accepts a candidate block from the transport: cancels in-flight
    /// local mining, validates, appends.
    pub fn receive_block(&self, candidate: Block) -> ConsensusResult<u64> {
        self.engine.receive_block(candidate, Self::now_ms())
    }

    // -------------------------------------------------------------------------
    // Subsystem access
    // -------------------------------------------------------------------------

    /// The shared mempool.
    pub fn mempool(&self) -> &Arc<Mempool> {
        &self.mempool
    }

    /// The shared contract registry.
    pub fn contracts(&self) -> &Arc<ContractRegistry> {
        &self.contracts
    }

    /// The shared node registry.
    pub fn registry(&self) -> &Arc<NodeRegistry> {
        &self.registry
    }

    /// The shared chain manager.
    pub fn chain(&self) -> &Arc<ChainManager> {
        &self.chain
    }

    /// The consensus engine.
    pub fn engine(&self) -> &Arc<ConsensusEngine<StdRng>> {
        &self.engine
    }
}
