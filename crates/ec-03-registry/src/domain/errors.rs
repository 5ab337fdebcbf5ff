//! Registry error types.

use shared_types::NodeId;

/// Registry error type.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A node with this id is already registered.
    #[error("duplicate node: {0}")]
    DuplicateNode(NodeId),
}
