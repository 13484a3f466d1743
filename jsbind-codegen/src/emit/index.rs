//! Aggregate index emission.

use std::path::{Path, PathBuf};

use jsbind_core::File;
use jsbind_ir::Package;
use serde::Serialize;

use crate::{
    Error,
    layout::OutputLayout,
    template::{TemplateTarget, Templates},
};

/// The context the index template sees.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct IndexContext<'a> {
    pub packages: &'a [Package],
}

impl<'a> IndexContext<'a> {
    pub fn new(packages: &'a [Package]) -> Self {
        Self { packages }
    }

    pub fn context(&self) -> serde_json::Value {
        serde_json::json!({ "packages": self.packages })
    }
}

/// Render the index file in memory.
pub fn render_index(
    templates: &Templates,
    layout: &OutputLayout,
    packages: &[Package],
) -> Result<File, Error> {
    let content = templates
        .render(TemplateTarget::Index, &IndexContext::new(packages).context())
        .map_err(|source| Error::Render {
            target: TemplateTarget::Index,
            unit: "index".to_string(),
            source,
        })?;
    Ok(File::new(layout.index_path(), content))
}

/// Render the index file and write it below `root`.
///
/// Returns the written path, relative to `root`.
pub fn emit_index(
    templates: &Templates,
    layout: &OutputLayout,
    packages: &[Package],
    root: &Path,
) -> Result<PathBuf, Error> {
    let file = render_index(templates, layout, packages)?;
    file.write(root)?;
    tracing::debug!(path = %file.path().display(), "index written");
    Ok(file.path().to_path_buf())
}

#[cfg(test)]
mod tests {
    use jsbind_ir::Struct;
    use tempfile::TempDir;

    use super::*;
    use crate::template::{TemplateSource, TemplateSources, TeraEngine};

    fn templates(index: &str) -> Templates {
        let sources =
            TemplateSources::builtin().with(TemplateTarget::Index, TemplateSource::inline(index));
        Templates::load(&TeraEngine, &sources).unwrap()
    }

    fn packages() -> Vec<Package> {
        vec![
            Package::new("mypackage").with_struct(Struct::new("Greeter")),
            Package::new("other"),
        ]
    }

    #[test]
    fn test_render_lists_packages_in_order() {
        let templates = templates(
            "{% for p in packages %}{{ p.name }}:{{ p.structs | length }}{% if not loop.last %} {% endif %}{% endfor %}",
        );

        let file = render_index(&templates, &OutputLayout::default(), &packages()).unwrap();

        assert_eq!(file.path(), Path::new("index.js"));
        insta::assert_snapshot!(file.content_lossy(), @"mypackage:1 other:0");
    }

    #[test]
    fn test_emit_writes_file() {
        let temp = TempDir::new().unwrap();
        let templates = templates("{{ packages | length }}");

        let path = emit_index(&templates, &OutputLayout::default(), &packages(), temp.path())
            .unwrap();

        assert_eq!(path, Path::new("index.js"));
        assert_eq!(
            std::fs::read_to_string(temp.path().join("index.js")).unwrap(),
            "2"
        );
    }

    #[test]
    fn test_render_failure_names_index() {
        let templates = templates("{{ nope }}");

        let err = render_index(&templates, &OutputLayout::default(), &packages()).unwrap_err();

        assert_eq!(err.unit(), Some("index"));
        assert_eq!(err.to_string(), "failed to render index for index");
    }

    #[test]
    fn test_builtin_index() {
        let templates = Templates::load(&TeraEngine, &TemplateSources::builtin()).unwrap();

        let file = render_index(&templates, &OutputLayout::default(), &packages()).unwrap();
        let content = file.content_lossy();

        assert!(content.contains(
            "import { Greeter as MypackageGreeter_1 } from './mypackage/Greeter';"
        ));
        assert!(content.contains("\"mypackage\": {"));
        assert!(content.contains("Greeter: MypackageGreeter_1,"));
        assert!(content.contains("\"other\": {"));
    }

    #[test]
    fn test_builtin_aliases_are_unique() {
        let templates = Templates::load(&TeraEngine, &TemplateSources::builtin()).unwrap();
        // Both names map to the same PascalCase prefix.
        let packages = vec![
            Package::new("my_pkg").with_struct(Struct::new("Greeter")),
            Package::new("myPkg").with_struct(Struct::new("Greeter")),
        ];

        let file = render_index(&templates, &OutputLayout::default(), &packages).unwrap();
        let content = file.content_lossy();

        let aliases: Vec<&str> = content
            .lines()
            .filter_map(|line| line.strip_prefix("import { Greeter as "))
            .filter_map(|rest| rest.split_once(' ').map(|(alias, _)| alias))
            .collect();
        assert_eq!(aliases.len(), 2);
        assert_ne!(aliases[0], aliases[1]);
        for (package, alias) in ["my_pkg", "myPkg"].iter().zip(&aliases) {
            assert!(content.contains(&format!("{alias} }} from './{package}/Greeter';")));
        }
        assert!(content.contains(&format!(
            "\"myPkg\": {{\n    Greeter: {},",
            aliases[1]
        )));
    }
}
