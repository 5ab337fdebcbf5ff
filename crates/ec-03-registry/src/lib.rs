//! # Node Registry Subsystem
//!
//! Tracks participating nodes, their stake, and their reputation, and
//! selects block validators by roulette-wheel stake weighting.
//!
//! Selection takes an injected random source so tests can drive it with a
//! seeded generator; when total stake is zero the wheel degrades to an
//! explicit uniform draw rather than failing.

pub mod domain;
mod service;

pub use domain::errors::RegistryError;
pub use domain::node::{NodeInfo, NodeProfile};
pub use service::NodeRegistry;
