use crate::contract::ContractId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataLocation {
    Storage,
    Memory,
    Calldata,
}

impl fmt::Display for DataLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataLocation::Storage => write!(f, "storage"),
            DataLocation::Memory => write!(f, "memory"),
            DataLocation::Calldata => write!(f, "calldata"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Bool,
    Uint(u16),
    Int(u16),
    Address,
    FixedBytes(u8),
    Bytes(DataLocation),
    String(DataLocation),
    Array(Box<Type>, Option<usize>, DataLocation),
    Mapping(Box<Type>, Box<Type>),
    Contract(ContractId),
    Function(Box<FunctionType>),
}

impl Type {
    /// Names of the stack slots a value of this type occupies. A single
    /// unnamed part means the value fits in one slot.
    pub fn stack_items(&self) -> Vec<&'static str> {
        match self {
            Type::Bytes(DataLocation::Calldata)
            | Type::String(DataLocation::Calldata)
            | Type::Array(_, None, DataLocation::Calldata) => vec!["offset", "length"],
            Type::Function(ft) if ft.kind == FunctionKind::External => {
                vec!["address", "functionSelector"]
            }
            _ => vec![""],
        }
    }

    pub fn size_on_stack(&self) -> usize {
        self.stack_items().len()
    }

    /// Size in bytes when stored in a storage slot, for types that can be packed.
    pub fn storage_bytes(&self) -> usize {
        match self {
            Type::Bool => 1,
            Type::Uint(bits) | Type::Int(bits) => (*bits as usize).div_ceil(8),
            Type::Address | Type::Contract(_) => 20,
            Type::FixedBytes(n) => *n as usize,
            Type::Function(ft) if ft.kind == FunctionKind::Internal => 8,
            Type::Function(_) => 24,
            _ => 32,
        }
    }

    /// The same type with every data location replaced by calldata, which is
    /// how parameter lists are compared when looking for overrides.
    pub fn with_location_erased(&self) -> Type {
        match self {
            Type::Bytes(_) => Type::Bytes(DataLocation::Calldata),
            Type::String(_) => Type::String(DataLocation::Calldata),
            Type::Array(elem, len, _) => Type::Array(
                Box::new(elem.with_location_erased()),
                *len,
                DataLocation::Calldata,
            ),
            other => other.clone(),
        }
    }

    /// Identifier fragment used in generated helper names, e.g. `t_uint256`.
    pub fn identifier(&self) -> String {
        match self {
            Type::Bool => "t_bool".to_string(),
            Type::Uint(bits) => format!("t_uint{}", bits),
            Type::Int(bits) => format!("t_int{}", bits),
            Type::Address => "t_address".to_string(),
            Type::FixedBytes(n) => format!("t_bytes{}", n),
            Type::Bytes(loc) => format!("t_bytes_{}", loc),
            Type::String(loc) => format!("t_string_{}", loc),
            Type::Array(elem, Some(len), loc) => {
                format!("t_array${}_${}_{}", elem.identifier(), len, loc)
            }
            Type::Array(elem, None, loc) => format!("t_array${}_dyn_{}", elem.identifier(), loc),
            Type::Mapping(key, value) => {
                format!("t_mapping${}_${}", key.identifier(), value.identifier())
            }
            Type::Contract(id) => format!("t_contract_{}", id.0),
            Type::Function(ft) => match ft.kind {
                FunctionKind::Internal => "t_function_internal".to_string(),
                FunctionKind::External => "t_function_external".to_string(),
            },
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Bool => write!(f, "bool"),
            Type::Uint(bits) => write!(f, "uint{}", bits),
            Type::Int(bits) => write!(f, "int{}", bits),
            Type::Address => write!(f, "address"),
            Type::FixedBytes(n) => write!(f, "bytes{}", n),
            Type::Bytes(loc) => write!(f, "bytes {}", loc),
            Type::String(loc) => write!(f, "string {}", loc),
            Type::Array(elem, Some(size), loc) => write!(f, "{}[{}] {}", elem, size, loc),
            Type::Array(elem, None, loc) => write!(f, "{}[] {}", elem, loc),
            Type::Mapping(key, value) => write!(f, "mapping({} => {})", key, value),
            Type::Contract(id) => write!(f, "contract_{}", id.0),
            Type::Function(ft) => write!(f, "function{}", ft),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionKind {
    Internal,
    External,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionType {
    pub kind: FunctionKind,
    pub params: Vec<Type>,
    pub returns: Vec<Type>,
}

impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self
            .params
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let kind = match self.kind {
            FunctionKind::Internal => "internal",
            FunctionKind::External => "external",
        };
        let returns = if self.returns.is_empty() {
            String::new()
        } else {
            format!(
                " returns ({})",
                self.returns
                    .iter()
                    .map(|t| t.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        };
        write!(f, "({}) {}{}", params, kind, returns)
    }
}
