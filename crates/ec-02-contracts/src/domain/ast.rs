//! Contract AST.
//!
//! The parser reduces submitted source text to this explicit, tagged
//! representation of callable declarations. Bodies are not modeled.

use serde::{Deserialize, Serialize};

/// Parsed view of one contract source.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractAst {
    /// Declared functions in source order.
    pub functions: Vec<FunctionDecl>,
}

impl ContractAst {
    /// Looks up a declared function by name.
    pub fn function(&self, name: &str) -> Option<&FunctionDecl> {
        self.functions.iter().find(|f| f.name == name)
    }
}

/// One `function name(params) modifiers` declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDecl {
    /// Function name.
    pub name: String,
    /// Declared parameters.
    pub params: Vec<Param>,
    /// Declared visibility (defaults to public).
    pub visibility: Visibility,
    /// Whether the function accepts value transfers.
    pub payable: bool,
}

impl FunctionDecl {
    /// Renders the canonical signature, e.g. `transfer(address,uint256)`.
    pub fn signature(&self) -> String {
        let types: Vec<&str> = self.params.iter().map(|p| p.type_name.as_str()).collect();
        format!("{}({})", self.name, types.join(","))
    }
}

/// A declared parameter. The name is empty for unnamed parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    /// Declared type token(s).
    pub type_name: String,
    /// Parameter name, if given.
    pub name: String,
}

/// Function visibility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    /// Callable from anywhere (default).
    #[default]
    Public,
    /// Callable only from within the contract.
    Private,
    /// Callable from the contract and derived contracts.
    Internal,
    /// Callable only from outside the contract.
    External,
}
