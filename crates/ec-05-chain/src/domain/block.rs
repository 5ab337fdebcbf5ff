//! Block entity and hashing.

use serde::{Deserialize, Serialize};
use shared_types::{hash_record, Hash, NodeId, Timestamp, Transaction};

/// Fixed genesis timestamp (ms) so every node derives an identical
/// genesis block. Fork resolution between independently constructed
/// chains depends on this.
pub const GENESIS_TIMESTAMP: Timestamp = 1_700_000_000_000;

/// Validator name recorded on the genesis block.
pub const GENESIS_VALIDATOR: &str = "genesis";

/// An ordered container of transactions with chain linkage and proof.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Zero-based height in the chain.
    pub index: u64,
    /// Hash of the predecessor block (all zeroes for genesis).
    pub previous_hash: Hash,
    /// Content hash over `(index, previous_hash, transactions,
    /// timestamp, proof)`.
    pub hash: Hash,
    /// Confirmed transactions, in inclusion order.
    pub transactions: Vec<Transaction>,
    /// Creation time (ms).
    pub timestamp: Timestamp,
    /// Nonce found by proof search.
    pub proof: u64,
    /// Node that proposed the block.
    pub validator: NodeId,
}

/// The hashed portion of a block. The validator is identity metadata and
/// stays outside the digest.
#[derive(Serialize)]
struct BlockPayload<'a> {
    index: u64,
    previous_hash: &'a Hash,
    transactions: &'a [Transaction],
    timestamp: Timestamp,
    proof: u64,
}

/// Computes a block hash from its constituent fields.
pub fn compute_block_hash(
    index: u64,
    previous_hash: &Hash,
    transactions: &[Transaction],
    timestamp: Timestamp,
    proof: u64,
) -> Hash {
    hash_record(&BlockPayload {
        index,
        previous_hash,
        transactions,
        timestamp,
        proof,
    })
}

impl Block {
    /// Seals a block: computes and stores its hash.
    pub fn seal(
        index: u64,
        previous_hash: Hash,
        transactions: Vec<Transaction>,
        timestamp: Timestamp,
        proof: u64,
        validator: NodeId,
    ) -> Self {
        let hash = compute_block_hash(index, &previous_hash, &transactions, timestamp, proof);
        Self {
            index,
            previous_hash,
            hash,
            transactions,
            timestamp,
            proof,
            validator,
        }
    }

    /// The deterministic genesis block.
    pub fn genesis() -> Self {
        Self::seal(
            0,
            [0u8; 32],
            Vec::new(),
            GENESIS_TIMESTAMP,
            0,
            GENESIS_VALIDATOR.to_string(),
        )
    }

    /// Recomputes the hash from the stored fields.
    pub fn recompute_hash(&self) -> Hash {
        compute_block_hash(
            self.index,
            &self.previous_hash,
            &self.transactions,
            self.timestamp,
            self.proof,
        )
    }

    /// Whether the stored hash matches the recomputed one.
    pub fn hash_is_consistent(&self) -> bool {
        self.hash == self.recompute_hash()
    }

    /// Whether this is the genesis block.
    pub fn is_genesis(&self) -> bool {
        self.index == 0 && self.previous_hash == [0u8; 32]
    }

    /// Sum of fees carried by the block's transactions.
    pub fn total_fees(&self) -> f64 {
        self.transactions.iter().map(|tx| tx.fee).sum()
    }
}
