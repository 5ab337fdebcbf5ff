//! Contract registry service.
//!
//! Tracks registered contracts by id and deployed contracts by address.
//! Parsing never fails (best-effort AST); deployment transitions a
//! contract exactly once and derives its address from the deployer, the
//! contract id, and the deployment time.

use crate::domain::entities::{ContractId, DeploymentState, SmartContract};
use crate::domain::errors::ContractError;
use crate::domain::parser::parse_source;
use crate::executor::{self, ExecutionResult};
use parking_lot::RwLock;
use serde_json::Value;
use shared_types::{hash_record, Address, Timestamp};
use std::collections::HashMap;

#[derive(Default)]
struct ContractStore {
    by_id: HashMap<ContractId, SmartContract>,
    by_address: HashMap<Address, ContractId>,
}

/// Shared contract registry handle.
#[derive(Default)]
pub struct ContractRegistry {
    store: RwLock<ContractStore>,
}

impl ContractRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses source text and registers the resulting contract.
    ///
    /// Malformed source still registers a contract with an empty function
    /// list; the caller can inspect the AST before deploying.
    #[tracing::instrument(skip(self, source, creator), fields(creator = %creator, bytes = source.len()))]
    pub fn parse_and_register(
        &self,
        source: String,
        creator: Address,
        now: Timestamp,
    ) -> ContractId {
        let ast = parse_source(&source);
        let contract = SmartContract::new(source, ast, creator, now);
        let id = contract.id;
        tracing::debug!(
            contract = %id,
            functions = contract.ast.functions.len(),
            "contract registered"
        );
        self.store.write().by_id.insert(id, contract);
        id
    }

    /// Deploys a registered contract, assigning its address.
    ///
    /// # Errors
    /// - `ContractNotFound` if the id is unknown
    /// - `AlreadyDeployed` if called twice
    #[tracing::instrument(skip(self, deployer), fields(contract = %id, deployer = %deployer))]
    pub fn deploy(
        &self,
        id: ContractId,
        deployer: Address,
        head_index: u64,
        now: Timestamp,
    ) -> Result<Address, ContractError> {
        let mut store = self.store.write();
        let contract = store
            .by_id
            .get_mut(&id)
            .ok_or(ContractError::ContractNotFound(id))?;

        if let DeploymentState::Deployed { address, .. } = &contract.deployment {
            return Err(ContractError::AlreadyDeployed {
                id,
                address: address.clone(),
            });
        }

        let address = derive_address(&deployer, &id, now);
        contract.deployment = DeploymentState::Deployed {
            address: address.clone(),
            block_index: head_index,
            at: now,
        };
        store.by_address.insert(address.clone(), id);
        tracing::info!(address = %address, block_index = head_index, "contract deployed");
        Ok(address)
    }

    /// Executes a function on the contract deployed at `address`.
    ///
    /// A call against an address with no deployed contract fails in the
    /// result (`success = false`, error set), never with a panic.
    #[tracing::instrument(skip(self, args, sender), fields(address = %address, function))]
    pub fn execute(
        &self,
        address: &Address,
        function: &str,
        args: &[Value],
        sender: &Address,
    ) -> ExecutionResult {
        let store = self.store.read();
        let contract = store
            .by_address
            .get(address)
            .and_then(|id| store.by_id.get(id));

        let Some(contract) = contract else {
            return ExecutionResult::failure(format!("no deployed contract at {address}"));
        };

        let result = executor::dispatch(contract, address, function, args, sender);
        tracing::debug!(
            success = result.success,
            gas_used = result.gas_used,
            "contract call dispatched"
        );
        result
    }

    /// Returns a snapshot of a registered contract.
    pub fn get(&self, id: &ContractId) -> Option<SmartContract> {
        self.store.read().by_id.get(id).cloned()
    }

    /// Whether a deployed contract lives at this address.
    pub fn is_contract_address(&self, address: &Address) -> bool {
        self.store.read().by_address.contains_key(address)
    }

    /// Number of registered contracts.
    pub fn len(&self) -> usize {
        self.store.read().by_id.len()
    }

    /// Returns true if no contracts are registered.
    pub fn is_empty(&self) -> bool {
        self.store.read().by_id.is_empty()
    }
}

/// Derives a contract address from deployer, id, and deployment time.
fn derive_address(deployer: &Address, id: &ContractId, now: Timestamp) -> Address {
    let digest = hash_record(&(deployer, id.as_bytes(), now));
    format!("0x{}", hex::encode(&digest[..20]))
}
