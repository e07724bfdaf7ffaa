use crate::function::FunctionId;
use crate::variable::VariableId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContractId(pub u32);

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractKind {
    #[default]
    Contract,
    Interface,
    Library,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractDefinition {
    pub id: ContractId,
    pub name: String,
    pub kind: ContractKind,
    /// Base contracts in C3 order, most derived first. Always starts with
    /// the contract itself.
    pub linearized_base_contracts: Vec<ContractId>,
    pub defined_functions: Vec<FunctionId>,
    pub state_variables: Vec<VariableId>,
}

impl ContractDefinition {
    pub fn new(id: ContractId, name: String, kind: ContractKind) -> Self {
        Self {
            id,
            name,
            kind,
            linearized_base_contracts: vec![id],
            defined_functions: Vec::new(),
            state_variables: Vec::new(),
        }
    }

    pub fn is_interface(&self) -> bool {
        self.kind == ContractKind::Interface
    }

    /// The contract that follows `self` in `most_derived`'s linearization,
    /// which is where `super` lookups from `self` start.
    pub fn super_contract(&self, most_derived: &ContractDefinition) -> Option<ContractId> {
        let bases = &most_derived.linearized_base_contracts;
        let position = bases.iter().position(|&base| base == self.id)?;
        bases.get(position + 1).copied()
    }
}
