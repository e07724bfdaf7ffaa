use crate::{
    function::{FunctionDefinitionKind, FunctionId, Visibility},
    program::Program,
    types::Type,
    variable::VariableId,
    IrError, Result,
};

pub struct FunctionBuilder<'a> {
    id: FunctionId,
    program: &'a mut Program,
    errors: Vec<IrError>,
}

impl<'a> FunctionBuilder<'a> {
    pub fn new(id: FunctionId, program: &'a mut Program) -> Self {
        Self {
            id,
            program,
            errors: Vec::new(),
        }
    }

    pub fn id(&self) -> FunctionId {
        self.id
    }

    pub fn param(&mut self, name: &str, ty: Type) -> &mut Self {
        match self.program.add_local_variable(self.id, name, ty) {
            Ok(var) => {
                if let Some(function) = self.program.function_mut(self.id) {
                    function.parameters.push(var);
                }
            }
            Err(e) => self.errors.push(e),
        }
        self
    }

    pub fn returns(&mut self, name: &str, ty: Type) -> &mut Self {
        match self.program.add_local_variable(self.id, name, ty) {
            Ok(var) => {
                if let Some(function) = self.program.function_mut(self.id) {
                    function.return_parameters.push(var);
                }
            }
            Err(e) => self.errors.push(e),
        }
        self
    }

    /// Declares a local variable in the function body.
    pub fn local(&mut self, name: &str, ty: Type) -> Result<VariableId> {
        self.program.add_local_variable(self.id, name, ty)
    }

    pub fn kind(&mut self, kind: FunctionDefinitionKind) -> &mut Self {
        if let Some(function) = self.program.function_mut(self.id) {
            function.kind = kind;
        }
        self
    }

    pub fn visibility(&mut self, visibility: Visibility) -> &mut Self {
        if let Some(function) = self.program.function_mut(self.id) {
            function.visibility = visibility;
        }
        self
    }

    pub fn virtual_(&mut self) -> &mut Self {
        if let Some(function) = self.program.function_mut(self.id) {
            function.is_virtual = true;
        }
        self
    }

    pub fn overrides(&mut self) -> &mut Self {
        if let Some(function) = self.program.function_mut(self.id) {
            function.overrides = true;
        }
        self
    }

    pub fn unimplemented(&mut self) -> &mut Self {
        if let Some(function) = self.program.function_mut(self.id) {
            function.implemented = false;
        }
        self
    }

    pub fn build(mut self) -> Result<FunctionId> {
        match self.errors.len() {
            0 => Ok(self.id),
            1 => Err(self.errors.remove(0)),
            _ => Err(IrError::Multiple(self.errors)),
        }
    }
}
