/*! Arena of resolved declarations handed over by semantic analysis.
 *
 * Code generation refers to contracts, functions, variables and expressions by identity. Every
 * declaration gets a node id from one shared counter when it is added here, and the typed handles
 * wrapping those ids are what the rest of the compiler stores in its maps and queues.
 */

use crate::{
    builder::ContractBuilder,
    contract::{ContractDefinition, ContractId, ContractKind},
    expression::{Expression, ExpressionId},
    function::{FunctionDefinition, FunctionId},
    types::Type,
    variable::{VariableDeclaration, VariableId},
    IrError, Result,
};
use indexmap::IndexMap;

#[derive(Debug, Clone)]
pub struct Program {
    contracts: IndexMap<ContractId, ContractDefinition>,
    functions: IndexMap<FunctionId, FunctionDefinition>,
    variables: IndexMap<VariableId, VariableDeclaration>,
    expressions: IndexMap<ExpressionId, Expression>,
    next_node_id: u32,
}

impl Program {
    pub fn new() -> Self {
        Self {
            contracts: IndexMap::new(),
            functions: IndexMap::new(),
            variables: IndexMap::new(),
            expressions: IndexMap::new(),
            // 0 stands for an uninitialized internal function pointer.
            next_node_id: 1,
        }
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_node_id;
        self.next_node_id += 1;
        id
    }

    /// Starts a new contract definition.
    pub fn contract(&mut self, name: &str) -> ContractBuilder<'_> {
        let id = self.add_contract(name, ContractKind::Contract);
        ContractBuilder::new(id, self)
    }

    /// Reopens an existing contract, e.g. to add functions after its bases are known.
    pub fn contract_builder(&mut self, id: ContractId) -> Result<ContractBuilder<'_>> {
        if !self.contracts.contains_key(&id) {
            return Err(IrError::UnknownContract(id.to_string()));
        }
        Ok(ContractBuilder::new(id, self))
    }

    pub fn add_contract(&mut self, name: &str, kind: ContractKind) -> ContractId {
        let id = ContractId(self.next_id());
        self.contracts
            .insert(id, ContractDefinition::new(id, name.to_string(), kind));
        id
    }

    pub fn add_function(&mut self, contract: ContractId, name: &str) -> Result<FunctionId> {
        if !self.contracts.contains_key(&contract) {
            return Err(IrError::UnknownContract(contract.to_string()));
        }
        let id = FunctionId(self.next_id());
        self.functions
            .insert(id, FunctionDefinition::new(id, name.to_string(), contract));
        if let Some(definition) = self.contracts.get_mut(&contract) {
            definition.defined_functions.push(id);
        }
        Ok(id)
    }

    pub fn add_state_variable(
        &mut self,
        contract: ContractId,
        name: &str,
        var_type: Type,
    ) -> Result<VariableId> {
        if !self.contracts.contains_key(&contract) {
            return Err(IrError::UnknownContract(contract.to_string()));
        }
        let id = self.add_variable(name, var_type, Some(contract), None);
        if let Some(definition) = self.contracts.get_mut(&contract) {
            definition.state_variables.push(id);
        }
        Ok(id)
    }

    /// Adds a variable owned by a function: a parameter, return parameter or local.
    pub fn add_local_variable(
        &mut self,
        function: FunctionId,
        name: &str,
        var_type: Type,
    ) -> Result<VariableId> {
        if !self.functions.contains_key(&function) {
            return Err(IrError::UnknownFunction(function.to_string()));
        }
        Ok(self.add_variable(name, var_type, None, Some(function)))
    }

    fn add_variable(
        &mut self,
        name: &str,
        var_type: Type,
        contract: Option<ContractId>,
        function: Option<FunctionId>,
    ) -> VariableId {
        let id = VariableId(self.next_id());
        self.variables.insert(
            id,
            VariableDeclaration {
                id,
                name: name.to_string(),
                var_type,
                contract,
                function,
            },
        );
        id
    }

    pub fn add_expression(&mut self, is_try_call: bool) -> ExpressionId {
        let id = ExpressionId(self.next_id());
        self.expressions
            .insert(id, Expression { id, is_try_call });
        id
    }

    /// Records the C3 linearization computed during semantic analysis.
    /// `bases` is most derived first and must start with `contract` itself.
    pub fn set_linearized_base_contracts(
        &mut self,
        contract: ContractId,
        bases: Vec<ContractId>,
    ) -> Result<()> {
        if bases.first() != Some(&contract) {
            return Err(IrError::InvalidLinearization(format!(
                "linearization of {} must start with the contract itself",
                contract
            )));
        }
        for (index, base) in bases.iter().enumerate() {
            if !self.contracts.contains_key(base) {
                return Err(IrError::UnknownContract(base.to_string()));
            }
            if bases[..index].contains(base) {
                return Err(IrError::InvalidLinearization(format!(
                    "{} appears twice in the linearization of {}",
                    base, contract
                )));
            }
        }

        let definition = self
            .contracts
            .get_mut(&contract)
            .ok_or_else(|| IrError::UnknownContract(contract.to_string()))?;
        definition.linearized_base_contracts = bases;
        Ok(())
    }

    pub fn contract_definition(&self, id: ContractId) -> Option<&ContractDefinition> {
        self.contracts.get(&id)
    }

    pub fn contract_definition_mut(&mut self, id: ContractId) -> Option<&mut ContractDefinition> {
        self.contracts.get_mut(&id)
    }

    pub fn contract_by_name(&self, name: &str) -> Option<&ContractDefinition> {
        self.contracts.values().find(|c| c.name == name)
    }

    pub fn contracts(&self) -> impl Iterator<Item = &ContractDefinition> {
        self.contracts.values()
    }

    pub fn function(&self, id: FunctionId) -> Option<&FunctionDefinition> {
        self.functions.get(&id)
    }

    pub fn function_mut(&mut self, id: FunctionId) -> Option<&mut FunctionDefinition> {
        self.functions.get_mut(&id)
    }

    pub fn variable(&self, id: VariableId) -> Option<&VariableDeclaration> {
        self.variables.get(&id)
    }

    pub fn expression(&self, id: ExpressionId) -> Option<&Expression> {
        self.expressions.get(&id)
    }

    pub fn parameter_types(&self, function: &FunctionDefinition) -> Vec<Type> {
        function
            .parameters
            .iter()
            .filter_map(|param| self.variables.get(param))
            .map(|decl| decl.var_type.clone())
            .collect()
    }

    /// Whether calls to `function` go through virtual lookup: it is marked
    /// virtual, overrides a base function, or is declared in an interface.
    pub fn has_virtual_semantics(&self, function: &FunctionDefinition) -> bool {
        function.is_virtual
            || function.overrides
            || self
                .contracts
                .get(&function.contract)
                .is_some_and(|c| c.is_interface())
    }

    /// Compares parameter lists the way override checking does: data
    /// locations do not matter.
    pub fn has_equal_parameter_types(
        &self,
        lhs: &FunctionDefinition,
        rhs: &FunctionDefinition,
    ) -> bool {
        let lhs = self.parameter_types(lhs);
        let rhs = self.parameter_types(rhs);
        lhs.len() == rhs.len()
            && lhs
                .iter()
                .zip(&rhs)
                .all(|(a, b)| a.with_location_erased() == b.with_location_erased())
    }

    pub fn stats(&self) -> ProgramStats {
        ProgramStats {
            contracts: self.contracts.len(),
            functions: self.functions.len(),
            variables: self.variables.len(),
            expressions: self.expressions.len(),
        }
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramStats {
    pub contracts: usize,
    pub functions: usize,
    pub variables: usize,
    pub expressions: usize,
}
