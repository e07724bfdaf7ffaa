use super::{
    collector::FunctionCollector,
    errors::{GenerationError, Result},
    names,
    queue::FunctionGenerationQueue,
    utils::UtilFunctions,
    variable::IRVariable,
};
use num_bigint::BigUint;
use solgen_core::{
    ContractDefinition, ContractId, EvmVersion, ExpressionId, FunctionDefinition, FunctionId,
    IrError, OptimiserSettings, Program, RevertStrings, Settings, StorageLocation,
    VariableDeclaration, VariableId,
};
use std::collections::HashMap;
use tracing::{debug, trace};

/// State shared by everything that lowers one compilation unit to Yul.
///
/// Holds the functions waiting to be generated, the contract whose code is
/// being produced (virtual calls resolve against it), where each variable
/// lives in generated code, and the pool of shared helper functions.
pub struct IRGenerationContext<'a> {
    program: &'a Program,
    settings: Settings,
    most_derived_contract: Option<ContractId>,
    local_variables: HashMap<VariableId, IRVariable>,
    state_variables: HashMap<VariableId, StorageLocation>,
    functions: FunctionCollector,
    function_generation_queue: FunctionGenerationQueue,
    var_counter: usize,
}

impl<'a> IRGenerationContext<'a> {
    pub fn new(program: &'a Program, settings: Settings) -> Self {
        Self {
            program,
            settings,
            most_derived_contract: None,
            local_variables: HashMap::new(),
            state_variables: HashMap::new(),
            functions: FunctionCollector::new(),
            function_generation_queue: FunctionGenerationQueue::new(),
            var_counter: 0,
        }
    }

    pub fn program(&self) -> &'a Program {
        self.program
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn evm_version(&self) -> EvmVersion {
        self.settings.evm_version
    }

    pub fn revert_strings(&self) -> RevertStrings {
        self.settings.revert_strings
    }

    pub fn optimiser_settings(&self) -> &OptimiserSettings {
        &self.settings.optimiser
    }

    pub fn function_collector(&self) -> &FunctionCollector {
        &self.functions
    }

    pub fn function_collector_mut(&mut self) -> &mut FunctionCollector {
        &mut self.functions
    }

    /// Functions whose calls were discovered during lowering. The queue is
    /// filled lazily: new entries arrive while earlier ones are popped and lowered.
    pub fn function_generation_queue(&self) -> &FunctionGenerationQueue {
        &self.function_generation_queue
    }

    pub fn function_generation_queue_mut(&mut self) -> &mut FunctionGenerationQueue {
        &mut self.function_generation_queue
    }

    /// Sets the contract currently being compiled. Functions generated for a
    /// previous contract may be generated again for this one.
    pub fn set_most_derived_contract(&mut self, contract: ContractId) -> Result<()> {
        let definition = self.contract_definition(contract)?;
        debug!(contract = %definition.name, "setting most derived contract");
        self.most_derived_contract = Some(contract);
        self.function_generation_queue.start_round();
        Ok(())
    }

    pub fn most_derived_contract(&self) -> Result<ContractId> {
        self.most_derived_contract
            .ok_or(GenerationError::MostDerivedContractUnset)
    }

    fn most_derived_definition(&self) -> Result<&'a ContractDefinition> {
        let contract = self.most_derived_contract()?;
        self.contract_definition(contract)
    }

    /// Queues `function` for generation and returns its name.
    pub fn enqueue_function_for_code_generation(&mut self, function: FunctionId) -> Result<String> {
        let definition = self.function_definition(function)?;
        let name = names::function(definition);
        if self.function_generation_queue.push(function) {
            debug!(function = %name, "queued function for code generation");
        }
        Ok(name)
    }

    /// Resolves a virtual call against the most derived contract, queues the
    /// implementation that is actually called and returns its name.
    pub fn enqueue_virtual_function_for_code_generation(
        &mut self,
        function: FunctionId,
    ) -> Result<String> {
        let resolved = self.resolve_virtual(function, None)?;
        self.enqueue_function_for_code_generation(resolved)
    }

    /// Same as [`enqueue_virtual_function_for_code_generation`] for
    /// `super.f()` written in `calling_contract`: the lookup starts at the
    /// base following `calling_contract` in the most derived linearization.
    ///
    /// [`enqueue_virtual_function_for_code_generation`]: Self::enqueue_virtual_function_for_code_generation
    pub fn enqueue_super_function_for_code_generation(
        &mut self,
        function: FunctionId,
        calling_contract: ContractId,
    ) -> Result<String> {
        let most_derived = self.most_derived_definition()?;
        let caller = self.contract_definition(calling_contract)?;
        let search_start = match caller.super_contract(most_derived) {
            Some(contract) => contract,
            None => {
                let definition = self.function_definition(function)?;
                return Err(GenerationError::VirtualFunctionNotFound {
                    function,
                    name: definition.name.clone(),
                    contract: most_derived.name.clone(),
                });
            }
        };
        let resolved = self.resolve_virtual(function, Some(search_start))?;
        self.enqueue_function_for_code_generation(resolved)
    }

    /// Finds the definition a call to `function` reaches in the most derived
    /// contract. Without `search_start`, non-virtual functions resolve to
    /// themselves. With it, bases before `search_start` are skipped and only
    /// implemented functions match.
    pub fn resolve_virtual(
        &self,
        function: FunctionId,
        search_start: Option<ContractId>,
    ) -> Result<FunctionId> {
        let program = self.program;
        let most_derived = self.most_derived_definition()?;
        let definition = self.function_definition(function)?;

        if search_start.is_none() && !program.has_virtual_semantics(definition) {
            return Ok(function);
        }

        let mut skip_until = search_start;
        for &base in &most_derived.linearized_base_contracts {
            if let Some(start) = skip_until {
                if base != start {
                    continue;
                }
                skip_until = None;
            }

            let Some(contract) = program.contract_definition(base) else {
                continue;
            };
            for &candidate_id in &contract.defined_functions {
                let Some(candidate) = program.function(candidate_id) else {
                    continue;
                };
                if candidate.name == definition.name
                    && !candidate.is_constructor()
                    && (search_start.is_none() || candidate.implemented)
                    && program.has_equal_parameter_types(candidate, definition)
                {
                    debug!(
                        function = %definition.name,
                        from = %function,
                        to = %candidate_id,
                        contract = %contract.name,
                        "resolved virtual function"
                    );
                    return Ok(candidate_id);
                }
            }
        }

        Err(GenerationError::VirtualFunctionNotFound {
            function,
            name: definition.name.clone(),
            contract: most_derived.name.clone(),
        })
    }

    pub fn add_local_variable(&mut self, variable: VariableId) -> Result<&IRVariable> {
        let declaration = self.variable_declaration(variable)?;
        Ok(self
            .local_variables
            .entry(variable)
            .or_insert_with(|| IRVariable::from_declaration(declaration)))
    }

    pub fn is_local_variable(&self, variable: VariableId) -> bool {
        self.local_variables.contains_key(&variable)
    }

    pub fn local_variable(&self, variable: VariableId) -> Result<&IRVariable> {
        self.local_variables
            .get(&variable)
            .ok_or_else(|| GenerationError::UnknownLocalVariable {
                variable,
                name: self.variable_name(variable),
            })
    }

    /// Records the storage location computed by the layout pass. Offsets of
    /// a full word or more are rejected.
    pub fn add_state_variable(
        &mut self,
        variable: VariableId,
        slot: BigUint,
        byte_offset: u8,
    ) -> Result<()> {
        let declaration = self.variable_declaration(variable)?;
        let location = StorageLocation::new(slot, byte_offset).map_err(|err| match err {
            IrError::InvalidStorageOffset { byte_offset, .. } => {
                GenerationError::ByteOffsetOutOfRange {
                    variable,
                    name: declaration.name.clone(),
                    byte_offset,
                }
            }
            other => GenerationError::Ir(other),
        })?;
        trace!(variable = %declaration.name, %location, "registered state variable");
        self.state_variables.insert(variable, location);
        Ok(())
    }

    pub fn is_state_variable(&self, variable: VariableId) -> bool {
        self.state_variables.contains_key(&variable)
    }

    pub fn storage_location_of_variable(&self, variable: VariableId) -> Result<&StorageLocation> {
        self.state_variables
            .get(&variable)
            .ok_or_else(|| GenerationError::UnknownStateVariable {
                variable,
                name: self.variable_name(variable),
            })
    }

    pub fn function_name(&self, function: FunctionId) -> Result<String> {
        Ok(names::function(self.function_definition(function)?))
    }

    /// Name of the accessor generated for a public state variable.
    pub fn getter_function_name(&self, variable: VariableId) -> Result<String> {
        Ok(names::getter(self.variable_declaration(variable)?))
    }

    pub fn new_yul_variable(&mut self) -> String {
        self.var_counter += 1;
        let name = names::temporary(self.var_counter);
        trace!(variable = %name, "new yul variable");
        name
    }

    /// Name of the thunk that dispatches internal function pointers taking
    /// `inputs` arguments and returning `outputs` values. The thunk is shared
    /// per arity. Building it queues every function it can dispatch to.
    pub fn internal_dispatch(&mut self, inputs: usize, outputs: usize) -> Result<String> {
        let name = names::internal_dispatch(inputs, outputs);
        if self.functions.contains(&name) {
            return Ok(name);
        }

        let most_derived = self.most_derived_definition()?;
        let mut cases = Vec::new();
        for &base in &most_derived.linearized_base_contracts {
            let contract = self.contract_definition(base)?;
            for &function in &contract.defined_functions {
                let definition = self.function_definition(function)?;
                if !definition.is_constructor()
                    && definition.parameters.len() == inputs
                    && definition.return_parameters.len() == outputs
                {
                    cases.push(function);
                }
            }
        }

        let mut rendered_cases = Vec::with_capacity(cases.len());
        for function in cases {
            let function_name = self.enqueue_function_for_code_generation(function)?;
            rendered_cases.push((function, function_name));
        }

        Ok(self.functions.create_function(&name, || {
            render_internal_dispatch(&name, inputs, outputs, &rendered_cases)
        }))
    }

    /// A fresh helper generator bound to this context's function pool.
    pub fn utils(&mut self) -> UtilFunctions<'_> {
        UtilFunctions::new(
            self.settings.evm_version,
            self.settings.revert_strings,
            &mut self.functions,
        )
    }

    /// Code storing `message` as the revert reason when revert strings are
    /// in a debug mode, empty otherwise.
    pub fn revert_reason_if_debug(&self, message: &str) -> String {
        UtilFunctions::revert_reason_if_debug(self.settings.revert_strings, message)
    }

    /// Name of the flag holding whether the external call of a `try`
    /// statement succeeded.
    pub fn try_success_condition_variable(&self, expression: ExpressionId) -> Result<String> {
        let definition = self.program.expression(expression).ok_or_else(|| {
            GenerationError::UnknownDeclaration(format!("expression {}", expression))
        })?;
        if !definition.is_try_call {
            return Err(GenerationError::NotATryCall(expression));
        }
        Ok(names::try_success_condition(expression))
    }

    fn contract_definition(&self, contract: ContractId) -> Result<&'a ContractDefinition> {
        self.program
            .contract_definition(contract)
            .ok_or_else(|| GenerationError::UnknownDeclaration(format!("contract {}", contract)))
    }

    fn function_definition(&self, function: FunctionId) -> Result<&'a FunctionDefinition> {
        self.program
            .function(function)
            .ok_or_else(|| GenerationError::UnknownDeclaration(format!("function {}", function)))
    }

    fn variable_declaration(&self, variable: VariableId) -> Result<&'a VariableDeclaration> {
        self.program
            .variable(variable)
            .ok_or_else(|| GenerationError::UnknownDeclaration(format!("variable {}", variable)))
    }

    fn variable_name(&self, variable: VariableId) -> String {
        self.program
            .variable(variable)
            .map(|declaration| declaration.name.clone())
            .unwrap_or_else(|| "<unknown>".to_string())
    }
}

fn render_internal_dispatch(
    name: &str,
    inputs: usize,
    outputs: usize,
    cases: &[(FunctionId, String)],
) -> String {
    let in_list = names::suffixed_variable_name_list("in_", 0, inputs);
    let out_list = names::suffixed_variable_name_list("out_", 0, outputs);

    let params = if inputs == 0 {
        "fun".to_string()
    } else {
        format!("fun, {}", in_list)
    };
    let (returns, assignment) = if outputs == 0 {
        (String::new(), String::new())
    } else {
        (format!(" -> {}", out_list), format!("{} := ", out_list))
    };

    let mut code = format!("function {}({}){} {{\n", name, params, returns);
    code.push_str("    switch fun\n");
    for (function, function_name) in cases {
        code.push_str(&format!("    case {}\n", function.0));
        code.push_str("    {\n");
        code.push_str(&format!(
            "        {}{}({})\n",
            assignment, function_name, in_list
        ));
        code.push_str("    }\n");
    }
    code.push_str("    default { invalid() }\n");
    code.push_str("}\n");
    code
}
