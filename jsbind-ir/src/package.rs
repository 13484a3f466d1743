//! Packages, structs, methods and parameters.

use serde::{Deserialize, Serialize};

use crate::ParamType;

/// A logical package of bound structs.
///
/// The package name becomes a directory under the output root, so it must be
/// a single path segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    /// Package name (unique across the tree).
    pub name: String,
    /// Doc comment lines attached to the package.
    #[serde(default)]
    pub comments: Vec<String>,
    /// Bound structs, in declaration order.
    #[serde(default)]
    pub structs: Vec<Struct>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comments: Vec::new(),
            structs: Vec::new(),
        }
    }

    pub fn comment(mut self, line: impl Into<String>) -> Self {
        self.comments.push(line.into());
        self
    }

    pub fn with_struct(mut self, strct: Struct) -> Self {
        self.structs.push(strct);
        self
    }

    /// Total number of methods across all structs in this package.
    pub fn method_count(&self) -> usize {
        self.structs.iter().map(|s| s.methods.len()).sum()
    }
}

/// A bound struct. Each struct yields one implementation file and one
/// declaration file named after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Struct {
    /// Struct name (unique within its package).
    pub name: String,
    #[serde(default)]
    pub comments: Vec<String>,
    /// Exported methods, in declaration order.
    #[serde(default)]
    pub methods: Vec<Method>,
}

impl Struct {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comments: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn comment(mut self, line: impl Into<String>) -> Self {
        self.comments.push(line.into());
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }
}

/// An exported method with its input and output parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    pub name: String,
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(default)]
    pub inputs: Vec<Parameter>,
    #[serde(default)]
    pub outputs: Vec<Parameter>,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comments: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn comment(mut self, line: impl Into<String>) -> Self {
        self.comments.push(line.into());
        self
    }

    pub fn input(mut self, name: impl Into<String>, ty: ParamType) -> Self {
        self.inputs.push(Parameter::new(name, ty));
        self
    }

    pub fn output(mut self, name: impl Into<String>, ty: ParamType) -> Self {
        self.outputs.push(Parameter::new(name, ty));
        self
    }

    /// Human-readable signature, e.g. `SayHello(name string) (greeting string)`.
    pub fn signature(&self) -> String {
        let join = |params: &[Parameter]| {
            params
                .iter()
                .map(|p| format!("{} {}", p.name, p.ty))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let inputs = join(&self.inputs);
        match self.outputs.len() {
            0 => format!("{}({})", self.name, inputs),
            _ => format!("{}({}) ({})", self.name, inputs, join(&self.outputs)),
        }
    }
}

/// A named, typed method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ParamType,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}
