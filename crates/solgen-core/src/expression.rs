use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExpressionId(pub u32);

impl fmt::Display for ExpressionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Only the expressions the IR generation context needs to know about are
/// recorded: external calls, some of which sit in a `try` statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expression {
    pub id: ExpressionId,
    pub is_try_call: bool,
}
