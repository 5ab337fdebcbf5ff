//! # Mempool Subsystem
//!
//! Holds submitted transactions until block inclusion.
//!
//! The pool runs a two-phase inclusion protocol: `drain` moves transactions
//! into a pending-inclusion batch for block assembly, and the batch is later
//! either committed (block appended) or rolled back into the pool (block
//! rejected). A transaction in a pending batch is never handed out twice.

pub mod domain;
mod service;

pub use domain::entities::{InclusionBatch, MempoolConfig};
pub use domain::errors::MempoolError;
pub use domain::pool::TransactionPool;
pub use service::Mempool;
