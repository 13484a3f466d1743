//! Per-struct rendering.

use jsbind_core::File;
use jsbind_ir::{Package, Struct};
use serde::Serialize;

use crate::{
    Error,
    layout::OutputLayout,
    template::{TemplateTarget, Templates},
};

/// The context a per-struct template sees: the package name and the one
/// struct being rendered. Sibling structs are not part of it.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderUnit<'a> {
    pub package_name: &'a str,
    #[serde(rename = "struct")]
    pub strct: &'a Struct,
}

impl<'a> RenderUnit<'a> {
    pub fn new(package: &'a Package, strct: &'a Struct) -> Self {
        Self {
            package_name: &package.name,
            strct,
        }
    }

    /// `package.Struct`
    pub fn id(&self) -> String {
        format!("{}.{}", self.package_name, self.strct.name)
    }

    /// The JSON context handed to the templates.
    pub fn context(&self) -> serde_json::Value {
        serde_json::json!({
            "packageName": self.package_name,
            "struct": self.strct,
        })
    }
}

/// Both rendered files of one struct, ready to be written together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedUnit {
    pub implementation: File,
    pub declaration: File,
}

impl RenderedUnit {
    pub fn files(&self) -> [&File; 2] {
        [&self.implementation, &self.declaration]
    }

    pub fn into_files(self) -> [File; 2] {
        [self.implementation, self.declaration]
    }
}

/// Render the implementation and then the declaration for one struct.
///
/// Either failure yields [`Error::Render`] for the unit and no files; a
/// rendered implementation is discarded when the declaration fails.
pub fn render_unit(
    templates: &Templates,
    layout: &OutputLayout,
    unit: &RenderUnit<'_>,
) -> Result<RenderedUnit, Error> {
    let context = unit.context();
    let render = |target: TemplateTarget| {
        templates
            .render(target, &context)
            .map_err(|source| Error::Render {
                target,
                unit: unit.id(),
                source,
            })
    };

    let implementation = render(TemplateTarget::Implementation)?;
    let declaration = render(TemplateTarget::Declaration)?;
    tracing::debug!(unit = %unit.id(), "rendered");

    Ok(RenderedUnit {
        implementation: File::new(
            layout.implementation_path(unit.package_name, &unit.strct.name),
            implementation,
        ),
        declaration: File::new(
            layout.declaration_path(unit.package_name, &unit.strct.name),
            declaration,
        ),
    })
}
