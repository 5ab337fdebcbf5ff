//! The consensus engine.

use crate::config::ConsensusConfig;
use crate::domain::errors::{ConsensusError, ConsensusResult};
use crate::domain::proof::search_proof;
use crate::state::EngineState;
use crate::validation::validate_block;
use ec_01_mempool::{InclusionBatch, Mempool};
use ec_02_contracts::ContractRegistry;
use ec_03_registry::NodeRegistry;
use ec_05_chain::{Block, ChainManager};
use parking_lot::{Mutex, RwLock};
use rand::Rng;
use serde_json::json;
use shared_types::{NodeId, Timestamp};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Drives block proposal and validation against shared subsystems.
///
/// The engine references the mempool, contract registry, node registry,
/// and chain manager; it owns none of them. The random source is
/// injected so validator selection is deterministic under test.
pub struct ConsensusEngine<R: Rng> {
    config: ConsensusConfig,
    mempool: Arc<Mempool>,
    contracts: Arc<ContractRegistry>,
    registry: Arc<NodeRegistry>,
    chain: Arc<ChainManager>,
    rng: Mutex<R>,
    state: RwLock<EngineState>,
    cancel: AtomicBool,
}

impl<R: Rng> ConsensusEngine<R> {
    /// Wires an engine to its collaborating subsystems.
    pub fn new(
        config: ConsensusConfig,
        mempool: Arc<Mempool>,
        contracts: Arc<ContractRegistry>,
        registry: Arc<NodeRegistry>,
        chain: Arc<ChainManager>,
        rng: R,
    ) -> Self {
        Self {
            config,
            mempool,
            contracts,
            registry,
            chain,
            rng: Mutex::new(rng),
            state: RwLock::new(EngineState::Idle),
            cancel: AtomicBool::new(false),
        }
    }

    /// Current pipeline state.
    pub fn state(&self) -> EngineState {
        *self.state.read()
    }

    /// Aborts an in-flight proof search. Called when a competing block
    /// lands first; the stale proposal is discarded, never appended.
    pub fn cancel_proposal(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Runs one full proposal: select validator, drain the mempool,
    /// simulate contract calls, search for proof, validate, and append.
    ///
    /// All-or-nothing: on any failure the drained transactions are
    /// requeued, the validator's reputation is debited, and the ledger is
    /// untouched.
    #[tracing::instrument(skip(self), fields(now))]
    pub fn propose_block(&self, now: Timestamp) -> ConsensusResult<Block> {
        self.cancel.store(false, Ordering::Relaxed);
        self.set_state(EngineState::ProposingBlock);

        let result = self.propose_inner(now);
        match &result {
            Ok(block) => {
                tracing::info!(index = block.index, "proposal appended");
                self.set_state(EngineState::Appended);
            }
            Err(error) => {
                tracing::warn!(%error, "proposal rejected");
                self.set_state(EngineState::Rejected);
            }
        }
        self.set_state(EngineState::Idle);
        result
    }

    fn propose_inner(&self, now: Timestamp) -> ConsensusResult<Block> {
        let validator = {
            let mut rng = self.rng.lock();
            self.registry
                .select_validator(&mut *rng)
                .ok_or(ConsensusError::NoValidators)?
        };
        tracing::debug!(validator = %validator.id, stake = validator.stake, "validator selected");

        let batch = self.mempool.drain(self.config.max_block_transactions);
        self.execute_contract_calls(&batch);

        match self.seal_and_append(&batch, &validator.id, now) {
            Ok(block) => {
                if let Err(error) = self.mempool.commit(&batch) {
                    tracing::warn!(%error, "failed to commit appended batch");
                }
                self.registry
                    .record_accepted_block(&validator.id, self.config.stake_reward, now);
                Ok(block)
            }
            Err(error) => {
                if let Err(requeue_error) = self.mempool.requeue(&batch) {
                    tracing::warn!(%requeue_error, "failed to requeue rejected batch");
                }
                self.registry.record_rejected_proposal(&validator.id, now);
                Err(error)
            }
        }
    }

    /// Proof search, validation, and append for one candidate.
    fn seal_and_append(
        &self,
        batch: &InclusionBatch,
        validator: &NodeId,
        now: Timestamp,
    ) -> ConsensusResult<Block> {
        let head = self.chain.head();
        let proof = search_proof(
            head.index + 1,
            &head.hash,
            &batch.transactions,
            now,
            self.chain.target(),
            self.config.proof_max_attempts,
            &self.cancel,
        )?;

        let block = Block::seal(
            head.index + 1,
            head.hash,
            batch.transactions.clone(),
            now,
            proof,
            validator.clone(),
        );

        self.set_state(EngineState::ValidatingBlock);
        validate_block(&self.chain, &block)?;
        self.chain.append(block.clone())?;
        Ok(block)
    }

    /// Runs every contract-addressed transaction through the sandbox as a
    /// value transfer. Results are logged; a failed simulation never
    /// blocks inclusion (the sandbox is best-effort by contract).
    fn execute_contract_calls(&self, batch: &InclusionBatch) {
        for tx in &batch.transactions {
            if !self.contracts.is_contract_address(&tx.to) {
                continue;
            }
            let result = self.contracts.execute(
                &tx.to,
                "transfer",
                &[json!(tx.from), json!(tx.amount)],
                &tx.from,
            );
            tracing::debug!(
                contract = %tx.to,
                tx = %tx.id,
                success = result.success,
                gas_used = result.gas_used,
                events = result.events.len(),
                "contract-addressed transaction simulated"
            );
        }
    }

    /// Validates a candidate block against the current head without
    /// appending it.
    pub fn validate_block(&self, candidate: &Block) -> ConsensusResult<()> {
        validate_block(&self.chain, candidate)
    }

    /// Accepts a block arriving from the network transport: cancels any
    /// in-flight local proposal, validates, and appends.
    #[tracing::instrument(skip(self, candidate), fields(index = candidate.index))]
    pub fn receive_block(&self, candidate: Block, now: Timestamp) -> ConsensusResult<u64> {
        self.cancel_proposal();
        self.set_state(EngineState::ValidatingBlock);
        let result = validate_block(&self.chain, &candidate)
            .and_then(|()| self.chain.append(candidate.clone()).map_err(Into::into));
        match &result {
            Ok(_) => {
                self.registry
                    .record_accepted_block(&candidate.validator, self.config.stake_reward, now);
                self.set_state(EngineState::Appended);
            }
            Err(error) => {
                tracing::warn!(%error, "received block rejected");
                self.set_state(EngineState::Rejected);
            }
        }
        self.set_state(EngineState::Idle);
        result
    }

    fn set_state(&self, state: EngineState) {
        *self.state.write() = state;
    }
}
