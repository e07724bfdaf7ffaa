use super::names;
use solgen_core::{Type, VariableDeclaration};
use std::fmt;

/// A local variable as it appears in generated code: a base name and the
/// stack slots its type needs. Types that occupy several slots get one Yul
/// variable per part, named `<base>_<part>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IRVariable {
    name: String,
    ty: Type,
}

impl IRVariable {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    pub fn from_declaration(declaration: &VariableDeclaration) -> Self {
        Self::new(
            names::local_variable(declaration),
            declaration.var_type.clone(),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn stack_slots(&self) -> Vec<String> {
        self.ty
            .stack_items()
            .into_iter()
            .map(|part| self.suffixed_name(part))
            .collect()
    }

    pub fn comma_separated_list(&self) -> String {
        self.stack_slots().join(", ")
    }

    /// The Yul variable holding `part`, if the type has such a stack item.
    pub fn part(&self, part: &str) -> Option<String> {
        self.ty
            .stack_items()
            .into_iter()
            .find(|item| *item == part)
            .map(|item| self.suffixed_name(item))
    }

    fn suffixed_name(&self, part: &str) -> String {
        if part.is_empty() {
            self.name.clone()
        } else {
            format!("{}_{}", self.name, part)
        }
    }
}

impl fmt::Display for IRVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.comma_separated_list())
    }
}
