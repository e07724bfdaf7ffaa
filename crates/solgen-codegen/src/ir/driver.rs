use super::context::IRGenerationContext;
use anyhow::{Context, Result};
use solgen_core::{ContractId, FunctionId};
use tracing::{debug, info};

/// Turns one function definition into Yul code. Implementations call back
/// into the context to name callees, which may queue more functions.
pub trait FunctionLowering {
    fn lower_function(
        &mut self,
        context: &mut IRGenerationContext<'_>,
        function: FunctionId,
    ) -> Result<String>;
}

impl<F> FunctionLowering for F
where
    F: FnMut(&mut IRGenerationContext<'_>, FunctionId) -> Result<String>,
{
    fn lower_function(
        &mut self,
        context: &mut IRGenerationContext<'_>,
        function: FunctionId,
    ) -> Result<String> {
        self(context, function)
    }
}

/// Pops and lowers queued functions until the queue is empty, including
/// functions queued while lowering earlier ones.
pub fn generate_queued_functions(
    context: &mut IRGenerationContext<'_>,
    lowering: &mut dyn FunctionLowering,
) -> Result<String> {
    let mut code = String::new();
    while !context.function_generation_queue().is_empty() {
        let function = context.function_generation_queue_mut().pop()?;
        let name = context.function_name(function)?;
        debug!(function = %name, "generating function");
        let body = lowering
            .lower_function(context, function)
            .with_context(|| format!("Failed to generate {}", name))?;
        code.push_str(&body);
    }
    Ok(code)
}

/// Generates the code of `contract` reachable from `roots`: the roots are
/// resolved virtually against `contract`, everything they call is generated,
/// and the helper functions requested along the way are appended.
pub fn generate_contract(
    context: &mut IRGenerationContext<'_>,
    contract: ContractId,
    roots: &[FunctionId],
    lowering: &mut dyn FunctionLowering,
) -> Result<String> {
    context.set_most_derived_contract(contract)?;
    for &root in roots {
        context.enqueue_virtual_function_for_code_generation(root)?;
    }

    let mut code = generate_queued_functions(context, lowering)?;
    code.push_str(&context.function_collector_mut().requested_functions());
    info!(
        contract = %contract,
        bytes = code.len(),
        "generated contract code"
    );
    Ok(code)
}
