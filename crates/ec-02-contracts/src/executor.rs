//! Simulated contract execution.
//!
//! Dispatches calls against a fixed table of built-in semantics and
//! returns synthetic but structurally valid results. Gas is a bounded
//! pseudo-cost derived from the call's content hash, so repeated calls
//! meter identically (demonstration accounting, not VM accounting).

use crate::domain::entities::SmartContract;
use serde_json::{json, Value};
use shared_types::{hash_record, Address};

/// Base cost charged to every dispatched call.
const BASE_GAS: u64 = 21_000;

/// Upper bound on the pseudo-random gas component.
const GAS_JITTER: u64 = 40_000;

/// Outcome of one simulated call.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ExecutionResult {
    /// Whether the call completed.
    pub success: bool,
    /// Synthetic return value.
    pub return_value: Value,
    /// Metered pseudo-cost.
    pub gas_used: u64,
    /// Events emitted by the call.
    pub events: Vec<ExecutionEvent>,
    /// Failure description when `success` is false.
    pub error: Option<String>,
}

impl ExecutionResult {
    fn ok(return_value: Value, gas_used: u64, events: Vec<ExecutionEvent>) -> Self {
        Self {
            success: true,
            return_value,
            gas_used,
            events,
            error: None,
        }
    }

    pub(crate) fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            return_value: Value::Null,
            gas_used: 0,
            events: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// An event emitted during simulated execution.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ExecutionEvent {
    /// Event name, e.g. `Transfer`.
    pub name: String,
    /// Event payload.
    pub data: Value,
}

/// Dispatches one call against a deployed contract.
///
/// Built-in table: `transfer`, `balanceOf`, `approve`, `totalSupply`.
/// A function the contract declares but the table does not know returns a
/// generic successful result; an unknown, undeclared function fails.
pub(crate) fn dispatch(
    contract: &SmartContract,
    address: &Address,
    function: &str,
    args: &[Value],
    sender: &Address,
) -> ExecutionResult {
    let gas = gas_cost(address, function, args);

    match function {
        "transfer" => {
            let to = arg_string(args, 0);
            let amount = arg_number(args, 1);
            let event = ExecutionEvent {
                name: "Transfer".into(),
                data: json!({ "from": sender, "to": to, "amount": amount }),
            };
            ExecutionResult::ok(json!(true), gas, vec![event])
        }
        "balanceOf" => {
            let owner = arg_string(args, 0).unwrap_or_else(|| sender.clone());
            ExecutionResult::ok(json!(synthetic_balance(address, &owner)), gas, Vec::new())
        }
        "approve" => {
            let spender = arg_string(args, 0);
            let amount = arg_number(args, 1);
            let event = ExecutionEvent {
                name: "Approval".into(),
                data: json!({ "owner": sender, "spender": spender, "amount": amount }),
            };
            ExecutionResult::ok(json!(true), gas, vec![event])
        }
        "totalSupply" => {
            ExecutionResult::ok(json!(synthetic_supply(address)), gas, Vec::new())
        }
        other if contract.declares(other) => {
            // Declared but unsimulated: succeed with an empty result so
            // callers can exercise arbitrary parsed contracts.
            ExecutionResult::ok(Value::Null, gas, Vec::new())
        }
        other => ExecutionResult::failure(format!(
            "function not found: {other} is neither built in nor declared"
        )),
    }
}

/// Bounded deterministic pseudo-cost for one call.
fn gas_cost(address: &Address, function: &str, args: &[Value]) -> u64 {
    let digest = hash_record(&(address, function, &serde_json::to_string(args).ok()));
    BASE_GAS + digest_prefix(&digest) % GAS_JITTER
}

/// Deterministic synthetic balance for an owner under a contract.
fn synthetic_balance(address: &Address, owner: &str) -> f64 {
    let raw = digest_prefix(&hash_record(&(address, owner)));
    (raw % 1_000_000) as f64 / 100.0
}

/// Deterministic synthetic total supply for a contract.
fn synthetic_supply(address: &Address) -> f64 {
    let raw = digest_prefix(&hash_record(address));
    1_000_000.0 + (raw % 9_000_000) as f64
}

/// First eight digest bytes as a big-endian integer.
fn digest_prefix(digest: &shared_types::Hash) -> u64 {
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix)
}

fn arg_string(args: &[Value], index: usize) -> Option<String> {
    args.get(index).and_then(|v| v.as_str()).map(str::to_string)
}

fn arg_number(args: &[Value], index: usize) -> f64 {
    args.get(index).and_then(Value::as_f64).unwrap_or(0.0)
}
