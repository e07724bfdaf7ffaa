//! Symbol names used in the generated Yul code.
//!
//! Every name derived from a declaration carries a kind prefix and the
//! declaration's node id, so overloads and shadowed names never collide.
//! Fresh temporaries live in the `_<n>` namespace, which no prefixed name
//! can enter.

use solgen_core::{ExpressionId, FunctionDefinition, VariableDeclaration};

pub fn function(definition: &FunctionDefinition) -> String {
    format!("fun_{}_{}", definition.name, definition.id.0)
}

/// Accessor function generated for a public state variable.
pub fn getter(declaration: &VariableDeclaration) -> String {
    format!("getter_fun_{}_{}", declaration.name, declaration.id.0)
}

pub fn local_variable(declaration: &VariableDeclaration) -> String {
    format!("var_{}_{}", declaration.name, declaration.id.0)
}

pub fn temporary(counter: usize) -> String {
    format!("_{}", counter)
}

pub fn internal_dispatch(inputs: usize, outputs: usize) -> String {
    format!("dispatch_internal_in_{}_out_{}", inputs, outputs)
}

pub fn try_success_condition(expression: ExpressionId) -> String {
    format!("trySuccessCondition_{}", expression.0)
}

/// `prefix0, prefix1, ...` for indices in `start..end`.
pub fn suffixed_variable_name_list(prefix: &str, start: usize, end: usize) -> String {
    (start..end)
        .map(|i| format!("{}{}", prefix, i))
        .collect::<Vec<_>>()
        .join(", ")
}
