//! Test utilities for binding generation.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::{collections::BTreeMap, path::Path};

use jsbind_ir::{Method, Package, ParamType, Struct, StructShape};
use tempfile::TempDir;

use crate::{GeneratorOptions, Pipeline};

/// One package `mypackage` with one struct `Greeter` exposing
/// `SayHello(name string) (greeting string)`.
pub fn greeter_tree() -> Vec<Package> {
    vec![
        Package::new("mypackage")
            .comment("mypackage is awesome")
            .with_struct(
                Struct::new("Greeter").method(
                    Method::new("SayHello")
                        .comment("SayHello greets someone by name")
                        .input("name", ParamType::String)
                        .output("greeting", ParamType::String),
                ),
            ),
    ]
}

/// A tree with several packages, structs and parameter kinds.
pub fn sample_tree() -> Vec<Package> {
    let person = StructShape::new("Person")
        .field("Name", ParamType::String)
        .field("Age", ParamType::Uint { bits: 8 });

    vec![
        Package::new("mypackage").with_struct(
            Struct::new("Greeter")
                .comment("Greeter says hello")
                .method(Method::new("Naked").comment("Naked is a method that does nothing"))
                .method(
                    Method::new("SayHello")
                        .input("name", ParamType::String)
                        .output("greeting", ParamType::String),
                ),
        ),
        Package::new("otherpackage")
            .comment("otherpackage is awesome")
            .with_struct(
                Struct::new("People")
                    .method(
                        Method::new("TwoInputsAndOutput")
                            .input("name", ParamType::String)
                            .input("age", ParamType::Uint { bits: 8 })
                            .output("result", ParamType::Bool),
                    )
                    .method(
                        Method::new("StructInput")
                            .comment("StructInput takes a person")
                            .input("person", ParamType::Struct(person)),
                    )
                    .method(
                        Method::new("Scores")
                            .output("scores", ParamType::slice(ParamType::Float { bits: 64 }))
                            .output("total", ParamType::Int { bits: 32 }),
                    ),
            )
            .with_struct(Struct::new("Empty")),
        Package::new("nothing").comment("a package without structs"),
    ]
}

/// Read every file below `dir` into a map of `/`-separated relative path
/// to content.
pub fn read_tree(dir: &Path) -> BTreeMap<String, String> {
    let mut files = BTreeMap::new();
    collect(dir, dir, &mut files);
    files
}

fn collect(base: &Path, dir: &Path, files: &mut BTreeMap<String, String>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(base, &path, files);
        } else if let Ok(relative) = path.strip_prefix(base) {
            let key = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            let content = std::fs::read(&path).unwrap_or_default();
            files.insert(key, String::from_utf8_lossy(&content).into_owned());
        }
    }
}

/// Relative paths of every directory below `dir`, `/`-separated.
pub fn read_dirs(dir: &Path) -> Vec<String> {
    let mut dirs = Vec::new();
    collect_dirs(dir, dir, &mut dirs);
    dirs.sort();
    dirs
}

fn collect_dirs(base: &Path, dir: &Path, dirs: &mut Vec<String>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if let Ok(relative) = path.strip_prefix(base) {
                dirs.push(relative.to_string_lossy().replace('\\', "/"));
            }
            collect_dirs(base, &path, dirs);
        }
    }
}

/// A scratch project root that is removed on drop.
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Options rooted at this project with builtin templates.
    pub fn options(&self) -> GeneratorOptions {
        GeneratorOptions::new(self.root())
    }

    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new(self.options())
    }

    /// The generated output tree (`frontend/backend`).
    pub fn output(&self) -> BTreeMap<String, String> {
        read_tree(&self.options().output_root())
    }

    /// Write a file below the project root, creating parents.
    pub fn write(&self, path: &str, content: &str) {
        let path = self.root().join(path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        std::fs::write(path, content).expect("failed to write file");
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}
