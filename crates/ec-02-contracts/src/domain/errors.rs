//! Contract error types.

use super::entities::ContractId;
use shared_types::Address;

/// Contract registry error type.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContractError {
    /// No contract registered under this id.
    #[error("contract not found: {0}")]
    ContractNotFound(ContractId),

    /// Deploy was called twice on the same contract.
    #[error("contract {id} already deployed at {address}")]
    AlreadyDeployed { id: ContractId, address: Address },
}
