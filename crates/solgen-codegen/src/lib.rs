/*! Yul IR generation context for Solidity contracts.
 *
 * Semantic analysis leaves behind resolved declarations and inheritance linearizations. Turning
 * them into Yul means generating each reachable function exactly once, resolving virtual and super
 * calls against the contract being compiled, naming every declaration consistently and sharing
 * helper functions between call sites. This crate holds that state; the lowering of individual
 * statements plugs in through [`ir::FunctionLowering`].
 */

pub mod ir;

pub use ir::{
    generate_contract, generate_queued_functions, FunctionCollector, FunctionGenerationQueue,
    FunctionLowering, GenerationError, IRGenerationContext, IRVariable, UtilFunctions,
};
