/*! Declarations, types and settings shared by the IR generation passes.
 *
 * Code generation never looks at source text. It works on resolved declarations addressed by
 * stable handles, on a small type model that knows how values sit on the stack and in storage,
 * and on compiler settings fixed up front. This crate provides those building blocks.
 */

pub mod builder;
pub mod contract;
pub mod expression;
pub mod function;
pub mod program;
pub mod settings;
pub mod storage;
pub mod types;
pub mod variable;

pub use builder::{ContractBuilder, FunctionBuilder};
pub use contract::{ContractDefinition, ContractId, ContractKind};
pub use expression::{Expression, ExpressionId};
pub use function::{FunctionDefinition, FunctionDefinitionKind, FunctionId, Visibility};
pub use program::{Program, ProgramStats};
pub use settings::{EvmVersion, OptimiserSettings, RevertStrings, Settings};
pub use storage::{StorageLocation, WORD_SIZE};
pub use types::{DataLocation, FunctionKind, FunctionType, Type};
pub use variable::{VariableDeclaration, VariableId};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IrError {
    #[error("Contract not found: {0}")]
    UnknownContract(String),
    #[error("Function not found: {0}")]
    UnknownFunction(String),
    #[error("Invalid linearization: {0}")]
    InvalidLinearization(String),
    #[error("Byte offset {byte_offset} in slot {slot} does not fit in a 32-byte word")]
    InvalidStorageOffset { slot: String, byte_offset: u8 },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Multiple errors occurred: {0:?}")]
    Multiple(Vec<IrError>),
}

pub type Result<T> = std::result::Result<T, IrError>;

#[cfg(test)]
mod tests;
