//! Contract entities.

use super::ast::ContractAst;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Timestamp};
use uuid::Uuid;

/// Unique identifier for a registered contract.
pub type ContractId = Uuid;

/// Deployment lifecycle of a contract.
///
/// A contract is created `Undeployed` and transitions to `Deployed`
/// exactly once; execution is only permitted once deployed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeploymentState {
    /// Registered but not yet deployed; no address assigned.
    Undeployed,
    /// Deployed and callable at the derived address.
    Deployed {
        /// Derived contract address.
        address: Address,
        /// Chain head index at deployment time.
        block_index: u64,
        /// Deployment time (ms).
        at: Timestamp,
    },
}

/// A registered smart contract.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SmartContract {
    /// Unique contract identifier.
    pub id: ContractId,
    /// Submitted source text, kept verbatim.
    pub source: String,
    /// Parsed function declarations (possibly empty for malformed source).
    pub ast: ContractAst,
    /// Deployment state.
    pub deployment: DeploymentState,
    /// Address that submitted the source.
    pub creator: Address,
    /// Registration time (ms).
    pub created_at: Timestamp,
}

impl SmartContract {
    /// Creates a new undeployed contract with a fresh id.
    pub fn new(source: String, ast: ContractAst, creator: Address, now: Timestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            ast,
            deployment: DeploymentState::Undeployed,
            creator,
            created_at: now,
        }
    }

    /// Returns true once the contract has been deployed.
    pub fn is_deployed(&self) -> bool {
        matches!(self.deployment, DeploymentState::Deployed { .. })
    }

    /// The assigned address, once deployed.
    pub fn address(&self) -> Option<&Address> {
        match &self.deployment {
            DeploymentState::Deployed { address, .. } => Some(address),
            DeploymentState::Undeployed => None,
        }
    }

    /// Whether the contract declares a function with this name.
    pub fn declares(&self, function: &str) -> bool {
        self.ast.function(function).is_some()
    }
}
