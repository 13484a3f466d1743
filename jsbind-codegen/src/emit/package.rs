//! Per-package emission.
//!
//! Each package gets a directory below the output root and each struct a
//! pair of files in it. A pair is rendered completely before either file is
//! written, so a render failure never leaves half a pair behind.
//!
//! With `jobs > 1` the units are rendered and written on a dedicated rayon
//! pool. Package directories are all created up front and no two units
//! share a path, so workers never contend for a file. The first failure
//! stops the remaining units from being scheduled.

use std::path::{Path, PathBuf};

use jsbind_core::create_dir;
use jsbind_ir::Package;
use rayon::prelude::*;

use crate::{
    Error,
    layout::OutputLayout,
    template::Templates,
    unit::{RenderUnit, RenderedUnit, render_unit},
};

/// Render every struct of every package in memory, in tree order.
pub fn render_packages(
    templates: &Templates,
    layout: &OutputLayout,
    packages: &[Package],
) -> Result<Vec<RenderedUnit>, Error> {
    units(packages)
        .map(|unit| render_unit(templates, layout, &unit))
        .collect()
}

/// Render and write every package below `root`.
///
/// Returns the written paths relative to `root`, in tree order (each
/// struct's implementation before its declaration).
pub fn emit_packages(
    templates: &Templates,
    layout: &OutputLayout,
    packages: &[Package],
    root: &Path,
    jobs: usize,
) -> Result<Vec<PathBuf>, Error> {
    if jobs <= 1 {
        return emit_sequential(templates, layout, packages, root);
    }

    match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
        Ok(pool) => emit_parallel(&pool, templates, layout, packages, root),
        Err(e) => {
            tracing::warn!(error = %e, jobs, "failed to start worker pool, rendering sequentially");
            emit_sequential(templates, layout, packages, root)
        }
    }
}

fn emit_sequential(
    templates: &Templates,
    layout: &OutputLayout,
    packages: &[Package],
    root: &Path,
) -> Result<Vec<PathBuf>, Error> {
    let mut written = Vec::new();
    for package in packages {
        create_dir(&root.join(layout.package_dir(&package.name)))?;
        for strct in &package.structs {
            let unit = RenderUnit::new(package, strct);
            written.extend(write_unit(templates, layout, &unit, root)?);
        }
        tracing::debug!(package = %package.name, structs = package.structs.len(), "package written");
    }
    Ok(written)
}

fn emit_parallel(
    pool: &rayon::ThreadPool,
    templates: &Templates,
    layout: &OutputLayout,
    packages: &[Package],
    root: &Path,
) -> Result<Vec<PathBuf>, Error> {
    for package in packages {
        create_dir(&root.join(layout.package_dir(&package.name)))?;
    }

    let units: Vec<RenderUnit<'_>> = units(packages).collect();
    tracing::debug!(units = units.len(), threads = pool.current_num_threads(), "rendering in parallel");

    let written = pool.install(|| {
        units
            .par_iter()
            .map(|unit| write_unit(templates, layout, unit, root))
            .collect::<Result<Vec<_>, Error>>()
    })?;

    Ok(written.into_iter().flatten().collect())
}

fn write_unit(
    templates: &Templates,
    layout: &OutputLayout,
    unit: &RenderUnit<'_>,
    root: &Path,
) -> Result<[PathBuf; 2], Error> {
    let rendered = render_unit(templates, layout, unit)?;
    for file in rendered.files() {
        file.write(root)?;
    }
    let [implementation, declaration] = rendered.into_files();
    Ok([
        implementation.path().to_path_buf(),
        declaration.path().to_path_buf(),
    ])
}

fn units(packages: &[Package]) -> impl Iterator<Item = RenderUnit<'_>> {
    packages.iter().flat_map(|package| {
        package
            .structs
            .iter()
            .map(move |strct| RenderUnit::new(package, strct))
    })
}

#[cfg(test)]
mod tests {
    use jsbind_ir::Struct;
    use tempfile::TempDir;

    use super::*;
    use crate::template::{TemplateSource, TemplateSources, TemplateTarget, TeraEngine};

    fn templates(implementation: &str, declaration: &str) -> Templates {
        let sources = TemplateSources::builtin()
            .with(
                TemplateTarget::Implementation,
                TemplateSource::inline(implementation),
            )
            .with(
                TemplateTarget::Declaration,
                TemplateSource::inline(declaration),
            );
        Templates::load(&TeraEngine, &sources).unwrap()
    }

    fn tree() -> Vec<Package> {
        vec![
            Package::new("alpha")
                .with_struct(Struct::new("One"))
                .with_struct(Struct::new("Two")),
            Package::new("beta").with_struct(Struct::new("Three")),
            Package::new("empty"),
        ]
    }

    #[test]
    fn test_sequential_writes_pairs_in_order() {
        let temp = TempDir::new().unwrap();
        let templates = templates("{{ struct.name }}", "{{ packageName }}");

        let written =
            emit_packages(&templates, &OutputLayout::default(), &tree(), temp.path(), 1).unwrap();

        let written: Vec<_> = written.iter().map(|p| p.display().to_string()).collect();
        assert_eq!(
            written,
            [
                "alpha/One.js",
                "alpha/One.d.ts",
                "alpha/Two.js",
                "alpha/Two.d.ts",
                "beta/Three.js",
                "beta/Three.d.ts",
            ]
        );
        assert_eq!(
            std::fs::read_to_string(temp.path().join("beta/Three.d.ts")).unwrap(),
            "beta"
        );
        assert!(temp.path().join("empty").is_dir());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sequential = TempDir::new().unwrap();
        let parallel = TempDir::new().unwrap();
        let templates = templates("{{ struct.name }}", "{{ packageName }}");
        let layout = OutputLayout::default();

        let a = emit_packages(&templates, &layout, &tree(), sequential.path(), 1).unwrap();
        let b = emit_packages(&templates, &layout, &tree(), parallel.path(), 4).unwrap();

        assert_eq!(a, b);
        for path in &a {
            assert_eq!(
                std::fs::read(sequential.path().join(path)).unwrap(),
                std::fs::read(parallel.path().join(path)).unwrap()
            );
        }
    }

    #[test]
    fn test_failure_writes_neither_file_of_unit() {
        let temp = TempDir::new().unwrap();
        let templates = templates("ok", "{% if struct.name == 'Two' %}{{ missing }}{% endif %}");

        let err = emit_packages(&templates, &OutputLayout::default(), &tree(), temp.path(), 1)
            .unwrap_err();

        assert_eq!(err.unit(), Some("alpha.Two"));
        assert!(temp.path().join("alpha/One.js").exists());
        assert!(!temp.path().join("alpha/Two.js").exists());
        assert!(!temp.path().join("alpha/Two.d.ts").exists());
        assert!(!temp.path().join("beta").exists());
    }

    #[test]
    fn test_package_dir_blocked_by_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("alpha"), "not a directory").unwrap();
        let templates = templates("ok", "ok");

        let err = emit_packages(&templates, &OutputLayout::default(), &tree(), temp.path(), 1)
            .unwrap_err();

        assert_eq!(err.path(), Some(temp.path().join("alpha").as_path()));
    }

    #[test]
    fn test_render_packages_in_memory() {
        let templates = templates("{{ struct.name }}", "{{ struct.name }}");

        let units = render_packages(&templates, &OutputLayout::default(), &tree()).unwrap();

        assert_eq!(units.len(), 3);
        assert_eq!(units[2].implementation.content(), b"Three");
    }
}
