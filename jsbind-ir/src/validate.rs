//! Structural checks for a descriptor tree.
//!
//! Package names become directories and struct names become file names, so
//! both must be usable as a single path segment and unique in their scope.

use std::{collections::HashSet, fmt};

use crate::Package;

/// Characters that are not allowed in a package or struct name.
const RESERVED_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// A problem found in a descriptor tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Where the problem is, e.g. `mypackage` or `mypackage.Greeter`.
    pub location: String,
    pub message: String,
}

impl Issue {
    fn new(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

/// Check every package and struct name in the tree.
///
/// Returns all issues found, in tree order. An empty result means the tree
/// can be laid out on disk without collisions.
pub fn validate(packages: &[Package]) -> Vec<Issue> {
    let mut issues = Vec::new();
    let mut package_names = HashSet::new();

    for package in packages {
        if let Some(problem) = segment_problem(&package.name) {
            issues.push(Issue::new(
                format!("package '{}'", package.name),
                problem,
            ));
        }
        if !package_names.insert(package.name.as_str()) {
            issues.push(Issue::new(
                format!("package '{}'", package.name),
                "duplicate package name",
            ));
        }

        let mut struct_names = HashSet::new();
        for strct in &package.structs {
            let location = format!("{}.{}", package.name, strct.name);
            if let Some(problem) = segment_problem(&strct.name) {
                issues.push(Issue::new(&location, problem));
            }
            if !struct_names.insert(strct.name.as_str()) {
                issues.push(Issue::new(&location, "duplicate struct name in package"));
            }
        }
    }

    issues
}

fn segment_problem(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        return Some("name is empty");
    }
    if name == "." || name == ".." {
        return Some("name is a relative path component");
    }
    if name
        .chars()
        .any(|c| c.is_control() || RESERVED_CHARS.contains(&c))
    {
        return Some("name contains a path separator or reserved character");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Struct;

    #[test]
    fn test_valid_tree_has_no_issues() {
        let packages = vec![
            Package::new("mypackage").with_struct(Struct::new("Greeter")),
            Package::new("otherpackage").with_struct(Struct::new("Greeter")),
        ];
        assert!(validate(&packages).is_empty());
    }

    #[test]
    fn test_reserved_characters() {
        let packages = vec![
            Package::new("my/package"),
            Package::new("ok").with_struct(Struct::new("Bad:Name")),
        ];
        let issues = validate(&packages);

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].location, "package 'my/package'");
        assert_eq!(issues[1].location, "ok.Bad:Name");
    }

    #[test]
    fn test_relative_and_empty_names() {
        let packages = vec![Package::new(".."), Package::new("")];
        let messages: Vec<_> = validate(&packages)
            .into_iter()
            .map(|i| i.message)
            .collect();

        assert_eq!(
            messages,
            vec!["name is a relative path component", "name is empty"]
        );
    }

    #[test]
    fn test_duplicates() {
        let packages = vec![
            Package::new("mypackage")
                .with_struct(Struct::new("Greeter"))
                .with_struct(Struct::new("Greeter")),
            Package::new("mypackage"),
        ];
        let issues = validate(&packages);

        assert_eq!(issues.len(), 2);
        assert_eq!(
            issues[0].to_string(),
            "mypackage.Greeter: duplicate struct name in package"
        );
        assert_eq!(
            issues[1].to_string(),
            "package 'mypackage': duplicate package name"
        );
    }
}
