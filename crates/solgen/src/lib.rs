/*! Lazy, demand-driven IR generation context for Solidity contracts.
 *
 * One import for the declaration arena, the compiler settings and the generation context. Front
 * ends describe resolved contracts with [`Program`], pick [`Settings`] and drive code generation
 * through [`IRGenerationContext`] and a [`FunctionLowering`] of their own.
 */

pub use solgen_codegen as codegen;
pub use solgen_core as core;

pub use solgen_core::{
    contract::{ContractDefinition, ContractId, ContractKind},
    function::{FunctionDefinition, FunctionId, Visibility},
    program::Program,
    settings::{EvmVersion, OptimiserSettings, RevertStrings, Settings},
    storage::StorageLocation,
    types::Type,
    IrError,
};

pub use solgen_codegen::{
    generate_contract, FunctionLowering, GenerationError, IRGenerationContext, IRVariable,
};
