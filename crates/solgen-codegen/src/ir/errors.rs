use solgen_core::{ExpressionId, FunctionId, IrError, VariableId};
use thiserror::Error;

/// Misuse of the generation context by the lowering code. None of these are
/// caused by user input; they abort the current compilation unit.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Function generation queue is empty")]
    EmptyQueue,

    #[error("Most derived contract requested but not set")]
    MostDerivedContractUnset,

    #[error("Virtual function {name} ({function}) not found in the linearization of {contract}")]
    VirtualFunctionNotFound {
        function: FunctionId,
        name: String,
        contract: String,
    },

    #[error("Unknown local variable {name} ({variable})")]
    UnknownLocalVariable { variable: VariableId, name: String },

    #[error("Unknown state variable {name} ({variable})")]
    UnknownStateVariable { variable: VariableId, name: String },

    #[error("Byte offset {byte_offset} of state variable {name} ({variable}) must be below 32")]
    ByteOffsetOutOfRange {
        variable: VariableId,
        name: String,
        byte_offset: u8,
    },

    #[error("Unknown declaration: {0}")]
    UnknownDeclaration(String),

    #[error("Expression {0} is not a function call inside a try statement")]
    NotATryCall(ExpressionId),

    #[error("No {function} utility function for type {ty}")]
    UnsupportedUtilityType { function: &'static str, ty: String },

    #[error("IR error: {0}")]
    Ir(IrError),
}

impl From<IrError> for GenerationError {
    fn from(err: IrError) -> Self {
        GenerationError::Ir(err)
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;
