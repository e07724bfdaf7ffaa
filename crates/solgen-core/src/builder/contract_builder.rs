use super::FunctionBuilder;
use crate::{
    contract::{ContractId, ContractKind},
    program::Program,
    types::Type,
    variable::VariableId,
    IrError, Result,
};

pub struct ContractBuilder<'a> {
    id: ContractId,
    program: &'a mut Program,
    bases: Option<Vec<ContractId>>,
}

impl<'a> ContractBuilder<'a> {
    pub fn new(id: ContractId, program: &'a mut Program) -> Self {
        Self {
            id,
            program,
            bases: None,
        }
    }

    pub fn id(&self) -> ContractId {
        self.id
    }

    pub fn kind(&mut self, kind: ContractKind) -> &mut Self {
        if let Some(contract) = self.program.contract_definition_mut(self.id) {
            contract.kind = kind;
        }
        self
    }

    /// Base contracts in linearized order, most derived first, not including
    /// the contract being built.
    pub fn inherits(&mut self, bases: &[ContractId]) -> &mut Self {
        let mut linearized = vec![self.id];
        linearized.extend_from_slice(bases);
        self.bases = Some(linearized);
        self
    }

    pub fn state_variable(&mut self, name: &str, ty: Type) -> Result<VariableId> {
        self.program.add_state_variable(self.id, name, ty)
    }

    pub fn function(&mut self, name: &str) -> Result<FunctionBuilder<'_>> {
        let id = self.program.add_function(self.id, name)?;
        Ok(FunctionBuilder::new(id, self.program))
    }

    pub fn build(self) -> Result<ContractId> {
        if let Some(bases) = self.bases {
            self.program.set_linearized_base_contracts(self.id, bases)?;
        }
        self.program
            .contract_definition(self.id)
            .map(|c| c.id)
            .ok_or_else(|| IrError::UnknownContract(self.id.to_string()))
    }
}
