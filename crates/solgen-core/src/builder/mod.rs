/*! Fluent API for declaring contracts and functions in a [`Program`](crate::program::Program).
 *
 * Tests and front ends describe the resolved program through these builders instead of wiring
 * handles by hand: parameters become variable declarations, functions are attached to their
 * contract and linearizations are validated when the contract is finished.
 */

pub mod contract_builder;
pub mod function_builder;

pub use contract_builder::ContractBuilder;
pub use function_builder::FunctionBuilder;
