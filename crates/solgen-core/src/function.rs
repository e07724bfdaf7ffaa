use crate::contract::ContractId;
use crate::variable::VariableId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FunctionId(pub u32);

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionDefinitionKind {
    #[default]
    Function,
    Constructor,
    Fallback,
    Receive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    External,
    Internal,
    Private,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub id: FunctionId,
    pub name: String,
    pub contract: ContractId,
    pub kind: FunctionDefinitionKind,
    pub visibility: Visibility,
    pub parameters: Vec<VariableId>,
    pub return_parameters: Vec<VariableId>,
    pub is_virtual: bool,
    pub overrides: bool,
    pub implemented: bool,
}

impl FunctionDefinition {
    pub fn new(id: FunctionId, name: String, contract: ContractId) -> Self {
        Self {
            id,
            name,
            contract,
            kind: FunctionDefinitionKind::Function,
            visibility: Visibility::Public,
            parameters: Vec::new(),
            return_parameters: Vec::new(),
            is_virtual: false,
            overrides: false,
            implemented: true,
        }
    }

    pub fn is_constructor(&self) -> bool {
        self.kind == FunctionDefinitionKind::Constructor
    }
}
