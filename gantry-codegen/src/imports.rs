//! Import collection for emitted Go files.

use indexmap::IndexMap;

/// A single import requirement: a package path and an optional alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    /// Package import path.
    pub path: String,
    /// Package alias, when the default package name is shadowed or renamed.
    pub alias: Option<String>,
}

impl ImportSpec {
    /// An import with no alias.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            alias: None,
        }
    }

    /// An aliased import.
    pub fn aliased(path: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            alias: Some(alias.into()),
        }
    }
}

/// Tracks import requirements and deduplicates them.
///
/// Maintains insertion order for deterministic output. The first alias
/// registered for a path wins.
///
/// # Example
///
/// ```
/// use gantry_codegen::{ImportCollector, ImportSpec};
///
/// let mut imports = ImportCollector::new();
/// imports.add(ImportSpec::new("net/http"));
/// imports.add(ImportSpec::aliased("goa.design/goa", "goa"));
/// imports.add(ImportSpec::new("net/http"));
///
/// assert_eq!(imports.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportCollector {
    imports: IndexMap<String, Option<String>>,
}

impl ImportCollector {
    /// Create a new empty import collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an import requirement.
    pub fn add(&mut self, spec: ImportSpec) {
        let entry = self.imports.entry(spec.path).or_insert(None);
        if entry.is_none() {
            *entry = spec.alias;
        }
    }

    /// Add several import requirements.
    pub fn add_all(&mut self, specs: impl IntoIterator<Item = ImportSpec>) {
        for spec in specs {
            self.add(spec);
        }
    }

    /// Merge another collector into this one.
    pub fn merge(&mut self, other: &ImportCollector) {
        for (path, alias) in &other.imports {
            self.add(ImportSpec {
                path: path.clone(),
                alias: alias.clone(),
            });
        }
    }

    /// Check if a path is already imported.
    pub fn has(&self, path: &str) -> bool {
        self.imports.contains_key(path)
    }

    /// Iterate over imports in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.imports
            .iter()
            .map(|(path, alias)| (path.as_str(), alias.as_deref()))
    }

    /// Check if the collector is empty.
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Get the number of imports.
    pub fn len(&self) -> usize {
        self.imports.len()
    }

    /// Render as a Go import block.
    pub fn render(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let mut lines = vec!["import (".to_string()];
        for (path, alias) in self.iter() {
            match alias {
                Some(alias) => lines.push(format!("\t{} \"{}\"", alias, path)),
                None => lines.push(format!("\t\"{}\"", path)),
            }
        }
        lines.push(")".to_string());
        lines.join("\n")
    }
}
