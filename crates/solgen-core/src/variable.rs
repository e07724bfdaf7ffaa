use crate::contract::ContractId;
use crate::function::FunctionId;
use crate::types::Type;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VariableId(pub u32);

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableDeclaration {
    pub id: VariableId,
    pub name: String,
    pub var_type: Type,
    /// Set for state variables only.
    pub contract: Option<ContractId>,
    /// Set for parameters, return parameters and locals.
    pub function: Option<FunctionId>,
}

impl VariableDeclaration {
    pub fn is_state_variable(&self) -> bool {
        self.contract.is_some()
    }
}
