//! Content hashing utilities
//!
//! Provides the deterministic digest used for block linkage and record
//! identity, and the difficulty predicate used by proof search.
//!
//! The digest is Keccak-256 over the bincode encoding of a record:
//! identical records always produce identical digests, and any field
//! change produces (with overwhelming probability) a different digest.

use crate::entities::Hash;
use primitive_types::U256;
use serde::Serialize;
use sha3::{Digest, Keccak256};

/// Compute the content hash of any serializable record.
///
/// Pure and deterministic; malformed input is simply hashed as given.
pub fn hash_record<T: Serialize>(record: &T) -> Hash {
    let bytes = bincode::serialize(record)
        .expect("bincode serialization of in-memory records is infallible");
    let mut hasher = Keccak256::new();
    hasher.update(&bytes);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// Render a digest as lowercase hex.
#[inline]
pub fn hash_to_hex(hash: &Hash) -> String {
    hex::encode(hash)
}

/// Compute the difficulty target for a leading-zero-bit count.
///
/// Higher target number = easier (more valid hashes below it).
#[inline]
pub fn difficulty_target(zero_bits: u32) -> U256 {
    if zero_bits == 0 {
        U256::MAX
    } else if zero_bits >= 256 {
        U256::zero()
    } else {
        U256::MAX >> zero_bits
    }
}

/// Check if a hash meets a difficulty target.
///
/// Returns true if hash <= target (more leading zeros = harder).
#[inline]
pub fn meets_difficulty(hash: &Hash, target: U256) -> bool {
    U256::from_big_endian(hash) <= target
}
