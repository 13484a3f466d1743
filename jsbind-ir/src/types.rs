//! Parameter type descriptors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Parameter;

/// The type of a method parameter.
///
/// A closed set of primitive kinds plus a nested struct shape. The struct
/// shape only carries type information for the declaration target; it is
/// never instantiated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ParamType {
    String,
    Bool,
    /// Signed integer of the given bit width.
    Int { bits: u8 },
    /// Unsigned integer of the given bit width.
    Uint { bits: u8 },
    /// Floating point number of the given bit width.
    Float { bits: u8 },
    /// Ordered sequence of another type.
    Slice { of: Box<ParamType> },
    /// Nested struct-shaped value.
    Struct(StructShape),
}

impl ParamType {
    pub fn slice(of: ParamType) -> Self {
        ParamType::Slice { of: Box::new(of) }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::String => write!(f, "string"),
            ParamType::Bool => write!(f, "bool"),
            ParamType::Int { bits } => write!(f, "int{}", bits),
            ParamType::Uint { bits } => write!(f, "uint{}", bits),
            ParamType::Float { bits } => write!(f, "float{}", bits),
            ParamType::Slice { of } => write!(f, "[]{}", of),
            ParamType::Struct(shape) => write!(f, "{}", shape.name),
        }
    }
}

/// Shape of a struct used as a parameter type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructShape {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Parameter>,
}

impl StructShape {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, ty: ParamType) -> Self {
        self.fields.push(Parameter::new(name, ty));
        self
    }
}
