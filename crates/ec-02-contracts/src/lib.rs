//! # Smart-Contract Sandbox
//!
//! Parses callable function signatures out of submitted source text,
//! tracks deployment state, and simulates execution against a fixed
//! dispatch table of built-in semantics.
//!
//! This is not a virtual machine. Parsing is a structural scan that
//! produces an explicit AST of function declarations; execution returns
//! synthetic but structurally valid results with a bounded pseudo-cost for
//! gas metering demonstration.

pub mod domain;
mod executor;
mod registry;

pub use domain::ast::{ContractAst, FunctionDecl, Param, Visibility};
pub use domain::entities::{ContractId, DeploymentState, SmartContract};
pub use domain::errors::ContractError;
pub use executor::{ExecutionEvent, ExecutionResult};
pub use registry::ContractRegistry;
