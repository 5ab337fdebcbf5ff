//! External interface types.
//!
//! Request/response shapes for the submission, membership, contract, and
//! query APIs. These are the wire-facing structs a gateway would
//! serialize; the engine context implements the behavior.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::{Address, NodeId, TxId};

/// Transaction submission request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmitTransactionRequest {
    pub from: Address,
    pub to: Address,
    pub amount: f64,
    pub fee: f64,
}

/// Submission outcome: accepted with an id, or rejected with a reason.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmitTransactionResponse {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_id: Option<TxId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl SubmitTransactionResponse {
    pub(crate) fn accepted(tx_id: TxId) -> Self {
        Self {
            accepted: true,
            tx_id: Some(tx_id),
            reason: None,
        }
    }

    pub(crate) fn rejected(reason: impl Into<String>) -> Self {
        Self {
            accepted: false,
            tx_id: None,
            reason: Some(reason.into()),
        }
    }
}

/// Node join request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JoinNodeRequest {
    pub node_id: NodeId,
    #[serde(default)]
    pub stake_amount: u64,
    #[serde(default)]
    pub metadata: Option<Value>,
}

/// Contract execution request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExecuteContractRequest {
    pub address: Address,
    pub function_name: String,
    #[serde(default)]
    pub args: Vec<Value>,
    pub sender: Address,
}
