//! # Core Domain Entities
//!
//! Defines the entities shared across subsystems.
//!
//! ## Clusters
//!
//! - **Ledger**: `Transaction`, `TxId`
//! - **Identity**: `Address`, `NodeId`
//! - **Primitives**: `Hash`, `Timestamp`

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export U256 from primitive-types for use across all subsystems
pub use primitive_types::U256;

/// A 32-byte Keccak-256 digest.
pub type Hash = [u8; 32];

/// An account or contract address.
///
/// Client accounts are human-readable names; contract addresses are
/// `0x`-prefixed hex strings derived at deployment.
pub type Address = String;

/// Unique identifier for a node in the network.
pub type NodeId = String;

/// Unique identifier for a transaction.
pub type TxId = Uuid;

/// Timestamp in milliseconds since UNIX epoch.
pub type Timestamp = u64;

/// A transfer of value between two addresses.
///
/// Immutable once created; identity is `id`. Lifecycle: created by a
/// client, held in the mempool, copied into exactly one block, never
/// mutated again.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction identifier.
    pub id: TxId,
    /// Sender address.
    pub from: Address,
    /// Recipient address.
    pub to: Address,
    /// Transferred amount (must be strictly positive).
    pub amount: f64,
    /// Fee paid to the block validator (must be non-negative).
    pub fee: f64,
    /// Creation time (ms).
    pub timestamp: Timestamp,
}

impl Transaction {
    /// Creates a new transaction with a fresh id.
    pub fn new(from: Address, to: Address, amount: f64, fee: f64, now: Timestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            from,
            to,
            amount,
            fee,
            timestamp: now,
        }
    }

    /// Returns the reason this transaction is malformed, if any.
    ///
    /// Shared by mempool admission and block validation so both paths
    /// enforce the same rules.
    pub fn validity_error(&self) -> Option<&'static str> {
        if !(self.amount > 0.0) {
            return Some("amount must be strictly positive");
        }
        if !(self.fee >= 0.0) {
            return Some("fee must be non-negative");
        }
        if self.from == self.to {
            return Some("sender and recipient must differ");
        }
        None
    }

    /// Total balance required from the sender: amount plus fee.
    pub fn total_cost(&self) -> f64 {
        self.amount + self.fee
    }
}
