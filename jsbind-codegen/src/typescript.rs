//! Parameter type mapping for TypeScript declarations.

use jsbind_ir::{ParamType, Parameter};

/// Maps descriptor parameter types to target-language type expressions.
pub trait TypeMapper {
    /// The type expression for a single parameter type.
    fn map_type(&self, ty: &ParamType) -> String;

    /// The return type of a method with the given outputs.
    fn map_returns(&self, outputs: &[Parameter]) -> String;
}

/// Maps parameter types to TypeScript.
///
/// All numeric kinds become `number`. Struct shapes are emitted inline as
/// object types, since the nested struct is never generated on its own.
/// Every backend call is asynchronous, so return types are promises.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptTypeMapper;

impl TypeMapper for TypeScriptTypeMapper {
    fn map_type(&self, ty: &ParamType) -> String {
        match ty {
            ParamType::String => "string".to_string(),
            ParamType::Bool => "boolean".to_string(),
            ParamType::Int { .. } | ParamType::Uint { .. } | ParamType::Float { .. } => {
                "number".to_string()
            }
            ParamType::Slice { of } => format!("Array<{}>", self.map_type(of)),
            ParamType::Struct(shape) => {
                if shape.fields.is_empty() {
                    return "{}".to_string();
                }
                let fields = shape
                    .fields
                    .iter()
                    .map(|f| format!("{}: {}", f.name, self.map_type(&f.ty)))
                    .collect::<Vec<_>>()
                    .join("; ");
                format!("{{ {} }}", fields)
            }
        }
    }

    fn map_returns(&self, outputs: &[Parameter]) -> String {
        match outputs {
            [] => "Promise<void>".to_string(),
            [single] => format!("Promise<{}>", self.map_type(&single.ty)),
            many => {
                let types = many
                    .iter()
                    .map(|p| self.map_type(&p.ty))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("Promise<[{}]>", types)
            }
        }
    }
}
