use num_bigint::BigUint;
use pretty_assertions::assert_eq;
use solgen_codegen::{GenerationError, IRGenerationContext};
use solgen_core::{
    ContractId, ContractKind, FunctionId, Program, RevertStrings, Settings, Type, VariableId,
};
use std::collections::HashSet;

/// `Base` declares virtual `m()`, `C` inherits and overrides it.
struct Hierarchy {
    program: Program,
    base: ContractId,
    derived: ContractId,
    base_m: FunctionId,
    derived_m: FunctionId,
}

fn override_hierarchy() -> Hierarchy {
    let mut program = Program::new();

    let mut base = program.contract("Base");
    let mut m = base.function("m").unwrap();
    m.virtual_();
    let base_m = m.build().unwrap();
    let base = base.build().unwrap();

    let mut derived = program.contract("C");
    derived.inherits(&[base]);
    let mut m = derived.function("m").unwrap();
    m.overrides();
    let derived_m = m.build().unwrap();
    let derived = derived.build().unwrap();

    Hierarchy {
        program,
        base,
        derived,
        base_m,
        derived_m,
    }
}

#[test]
fn test_duplicate_pushes_are_counted_once() {
    let mut program = Program::new();
    let mut contract = program.contract("C");
    let a = contract.function("a").unwrap().build().unwrap();
    let b = contract.function("b").unwrap().build().unwrap();
    contract.build().unwrap();

    let mut context = IRGenerationContext::new(&program, Settings::default());
    context.enqueue_function_for_code_generation(a).unwrap();
    context.enqueue_function_for_code_generation(b).unwrap();
    context.enqueue_function_for_code_generation(a).unwrap();

    let queue = context.function_generation_queue_mut();
    assert_eq!(queue.len(), 2);
    let popped: HashSet<FunctionId> = [queue.pop().unwrap(), queue.pop().unwrap()]
        .into_iter()
        .collect();
    assert_eq!(popped, HashSet::from([a, b]));
    assert!(queue.is_empty());
}

#[test]
fn test_function_popped_once_despite_interleaved_pushes() {
    let mut program = Program::new();
    let mut contract = program.contract("C");
    let functions: Vec<FunctionId> = ["f", "g", "h"]
        .iter()
        .map(|name| contract.function(name).unwrap().build().unwrap())
        .collect();
    contract.build().unwrap();

    let mut context = IRGenerationContext::new(&program, Settings::default());
    let queue = context.function_generation_queue_mut();
    let mut popped = Vec::new();
    for round in 0..3 {
        for &function in &functions {
            queue.push(function);
        }
        if round < 2 {
            popped.push(queue.pop().unwrap());
        }
    }
    while !queue.is_empty() {
        popped.push(queue.pop().unwrap());
    }

    popped.sort();
    assert_eq!(popped, functions);
}

#[test]
fn test_virtual_call_resolves_to_override() {
    let hierarchy = override_hierarchy();
    let mut context = IRGenerationContext::new(&hierarchy.program, Settings::default());
    context.set_most_derived_contract(hierarchy.derived).unwrap();

    let name = context
        .enqueue_virtual_function_for_code_generation(hierarchy.base_m)
        .unwrap();

    assert_eq!(name, context.function_name(hierarchy.derived_m).unwrap());
    assert!(context.function_generation_queue().contains(hierarchy.derived_m));
    assert!(!context.function_generation_queue().contains(hierarchy.base_m));
}

#[test]
fn test_virtual_call_in_base_contract_resolves_to_base() {
    let hierarchy = override_hierarchy();
    let mut context = IRGenerationContext::new(&hierarchy.program, Settings::default());
    context.set_most_derived_contract(hierarchy.base).unwrap();

    assert_eq!(
        context.resolve_virtual(hierarchy.base_m, None).unwrap(),
        hierarchy.base_m
    );
}

#[test]
fn test_super_call_skips_calling_contract() {
    let hierarchy = override_hierarchy();
    let mut context = IRGenerationContext::new(&hierarchy.program, Settings::default());
    context.set_most_derived_contract(hierarchy.derived).unwrap();

    let name = context
        .enqueue_super_function_for_code_generation(hierarchy.derived_m, hierarchy.derived)
        .unwrap();
    assert_eq!(name, context.function_name(hierarchy.base_m).unwrap());

    assert!(matches!(
        context.enqueue_super_function_for_code_generation(hierarchy.base_m, hierarchy.base),
        Err(GenerationError::VirtualFunctionNotFound { .. })
    ));
}

#[test]
fn test_super_call_skips_unimplemented_functions() {
    let mut program = Program::new();
    let mut root = program.contract("Root");
    let mut m = root.function("m").unwrap();
    m.virtual_();
    let root_m = m.build().unwrap();
    let root = root.build().unwrap();

    let mut middle = program.contract("Middle");
    middle.inherits(&[root]);
    let mut m = middle.function("m").unwrap();
    m.virtual_().overrides().unimplemented();
    m.build().unwrap();
    let middle = middle.build().unwrap();

    let mut leaf = program.contract("Leaf");
    leaf.inherits(&[middle, root]);
    let mut m = leaf.function("m").unwrap();
    m.overrides();
    let leaf_m = m.build().unwrap();
    let leaf = leaf.build().unwrap();

    let mut context = IRGenerationContext::new(&program, Settings::default());
    context.set_most_derived_contract(leaf).unwrap();
    assert_eq!(context.resolve_virtual(root_m, None).unwrap(), leaf_m);
    assert_eq!(
        context.resolve_virtual(leaf_m, Some(middle)).unwrap(),
        root_m
    );
}

#[test]
fn test_interface_functions_resolve_virtually() {
    let mut program = Program::new();
    let mut token = program.contract("IToken");
    token.kind(ContractKind::Interface);
    let mut total = token.function("totalSupply").unwrap();
    total.unimplemented();
    let interface_total = total.build().unwrap();
    let token = token.build().unwrap();

    let mut implementation = program.contract("Token");
    implementation.inherits(&[token]);
    let total = implementation.function("totalSupply").unwrap().build().unwrap();
    let implementation = implementation.build().unwrap();

    let mut context = IRGenerationContext::new(&program, Settings::default());
    context.set_most_derived_contract(implementation).unwrap();
    assert_eq!(context.resolve_virtual(interface_total, None).unwrap(), total);
}

#[test]
fn test_unknown_most_derived_contract_is_rejected() {
    let program = Program::new();
    let mut context = IRGenerationContext::new(&program, Settings::default());
    assert!(matches!(
        context.set_most_derived_contract(ContractId(42)),
        Err(GenerationError::UnknownDeclaration(_))
    ));
}

#[test]
fn test_function_names_are_stable_and_distinguish_overloads() {
    let mut program = Program::new();
    let mut contract = program.contract("C");
    let mut first = contract.function("transfer").unwrap();
    first.param("to", Type::Address);
    let first = first.build().unwrap();
    let mut second = contract.function("transfer").unwrap();
    second.param("to", Type::Address).param("amount", Type::Uint(256));
    let second = second.build().unwrap();
    contract.build().unwrap();

    let context = IRGenerationContext::new(&program, Settings::default());
    let name = context.function_name(first).unwrap();
    assert_eq!(name, context.function_name(first).unwrap());
    assert_eq!(name, format!("fun_transfer_{}", first.0));
    assert_ne!(name, context.function_name(second).unwrap());
}

#[test]
fn test_fresh_variables_never_collide_with_declarations() {
    let mut program = Program::new();
    let mut contract = program.contract("C");
    let mut f = contract.function("f").unwrap();
    let local = f.local("_1", Type::Uint(256)).unwrap();
    f.build().unwrap();
    contract.build().unwrap();

    let mut context = IRGenerationContext::new(&program, Settings::default());
    let declared = context.add_local_variable(local).unwrap().name().to_string();
    let fresh = context.new_yul_variable();
    assert_eq!(fresh, "_1");
    assert_ne!(declared, fresh);
}

#[test]
fn test_local_variable_registration_is_memoized() {
    let mut program = Program::new();
    let mut contract = program.contract("C");
    let mut f = contract.function("f").unwrap();
    let x = f.local("x", Type::Uint(256)).unwrap();
    f.build().unwrap();
    contract.build().unwrap();

    let mut context = IRGenerationContext::new(&program, Settings::default());
    let first = context.add_local_variable(x).unwrap().clone();
    let second = context.add_local_variable(x).unwrap().clone();
    assert_eq!(first, second);
}

#[test]
fn test_unregistered_local_variable_fails() {
    let mut program = Program::new();
    let mut contract = program.contract("C");
    let mut f = contract.function("f").unwrap();
    let x = f.local("x", Type::Uint(256)).unwrap();
    f.build().unwrap();
    contract.build().unwrap();

    let context = IRGenerationContext::new(&program, Settings::default());
    let err = context.local_variable(x).unwrap_err();
    assert!(matches!(err, GenerationError::UnknownLocalVariable { variable, .. } if variable == x));
    assert!(err.to_string().contains("x"));
}

#[test]
fn test_unknown_declaration_cannot_be_registered() {
    let program = Program::new();
    let mut context = IRGenerationContext::new(&program, Settings::default());
    assert!(matches!(
        context.add_local_variable(VariableId(9)),
        Err(GenerationError::UnknownDeclaration(_))
    ));
}

#[test]
fn test_packed_state_variables_keep_their_offsets() {
    let mut program = Program::new();
    let mut contract = program.contract("Packed");
    let x = contract.state_variable("x", Type::Uint(32)).unwrap();
    let y = contract.state_variable("y", Type::Uint(64)).unwrap();
    contract.build().unwrap();

    let mut context = IRGenerationContext::new(&program, Settings::default());
    context.add_state_variable(x, BigUint::from(3u32), 4).unwrap();
    context.add_state_variable(y, BigUint::from(3u32), 8).unwrap();

    let x_location = context.storage_location_of_variable(x).unwrap();
    assert_eq!(x_location.slot, BigUint::from(3u32));
    assert_eq!(x_location.byte_offset, 4);
    let y_location = context.storage_location_of_variable(y).unwrap();
    assert_eq!(y_location.slot, BigUint::from(3u32));
    assert_eq!(y_location.byte_offset, 8);
}

#[test]
fn test_unregistered_state_variable_fails() {
    let mut program = Program::new();
    let mut contract = program.contract("C");
    let owner = contract.state_variable("owner", Type::Address).unwrap();
    contract.build().unwrap();

    let context = IRGenerationContext::new(&program, Settings::default());
    assert!(!context.is_state_variable(owner));
    assert!(matches!(
        context.storage_location_of_variable(owner),
        Err(GenerationError::UnknownStateVariable { .. })
    ));
}

#[test]
fn test_internal_dispatch_lists_matching_functions() {
    let mut program = Program::new();
    let mut contract = program.contract("C");
    let mut double = contract.function("double").unwrap();
    double.param("x", Type::Uint(256)).returns("", Type::Uint(256));
    let double = double.build().unwrap();
    let mut reset = contract.function("reset").unwrap();
    reset.param("x", Type::Uint(256));
    let reset = reset.build().unwrap();
    let contract = contract.build().unwrap();

    let mut context = IRGenerationContext::new(&program, Settings::default());
    context.set_most_derived_contract(contract).unwrap();
    let name = context.internal_dispatch(1, 1).unwrap();
    assert_eq!(name, "dispatch_internal_in_1_out_1");
    assert_eq!(context.internal_dispatch(1, 1).unwrap(), name);
    assert_eq!(context.function_collector().len(), 1);

    assert!(context.function_generation_queue().contains(double));
    assert!(!context.function_generation_queue().contains(reset));

    let expected = format!(
        "function dispatch_internal_in_1_out_1(fun, in_0) -> out_0 {{
    switch fun
    case {id}
    {{
        out_0 := fun_double_{id}(in_0)
    }}
    default {{ invalid() }}
}}
",
        id = double.0
    );
    assert_eq!(
        context.function_collector_mut().requested_functions(),
        expected
    );
}

#[test]
fn test_internal_dispatch_requires_most_derived_contract() {
    let program = Program::new();
    let mut context = IRGenerationContext::new(&program, Settings::default());
    assert!(matches!(
        context.internal_dispatch(0, 0),
        Err(GenerationError::MostDerivedContractUnset)
    ));
}

#[test]
fn test_revert_reason_depends_on_settings() {
    let program = Program::new();
    let quiet = IRGenerationContext::new(&program, Settings::default());
    assert_eq!(quiet.revert_reason_if_debug("Not owner"), "");

    let debug = IRGenerationContext::new(
        &program,
        Settings {
            revert_strings: RevertStrings::Debug,
            ..Settings::default()
        },
    );
    let code = debug.revert_reason_if_debug("Not owner");
    assert!(code.contains("\"Not owner\""));
    assert!(code.ends_with("revert(0, add(reasonPos, 32))\n}\n"));
}

#[test]
fn test_try_success_condition_variable() {
    let mut program = Program::new();
    let try_call = program.add_expression(true);
    let plain_call = program.add_expression(false);

    let context = IRGenerationContext::new(&program, Settings::default());
    assert_eq!(
        context.try_success_condition_variable(try_call).unwrap(),
        format!("trySuccessCondition_{}", try_call.0)
    );
    assert!(matches!(
        context.try_success_condition_variable(plain_call),
        Err(GenerationError::NotATryCall(id)) if id == plain_call
    ));
}

#[test]
fn test_utils_share_one_pool() {
    let program = Program::new();
    let mut context = IRGenerationContext::new(&program, Settings::default());

    let first = context.utils().cleanup_function(&Type::Uint(8)).unwrap();
    let second = context.utils().cleanup_function(&Type::Uint(8)).unwrap();
    context.utils().cleanup_function(&Type::Address).unwrap();

    assert_eq!(first, second);
    assert_eq!(context.function_collector().len(), 2);
}

#[test]
fn test_virtual_call_outside_linearization_fails() {
    let hierarchy = override_hierarchy();
    let mut program = hierarchy.program;
    let unrelated = program.contract("Unrelated").build().unwrap();

    let mut context = IRGenerationContext::new(&program, Settings::default());
    context.set_most_derived_contract(unrelated).unwrap();

    let err = context
        .enqueue_virtual_function_for_code_generation(hierarchy.base_m)
        .unwrap_err();
    assert!(matches!(
        &err,
        GenerationError::VirtualFunctionNotFound { function, name, contract }
            if *function == hierarchy.base_m && name == "m" && contract == "Unrelated"
    ));
    assert!(context.function_generation_queue().is_empty());
}
