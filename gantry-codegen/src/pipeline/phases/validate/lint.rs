//! Lint trait for design tree validation.

use gantry_design::DesignRoot;

use crate::pipeline::Diagnostic;

/// A lint that checks the design tree for issues.
pub trait Lint: Send + Sync {
    /// The name of this lint.
    fn name(&self) -> &'static str;

    /// What the lint checks.
    fn description(&self) -> &'static str;

    /// Check the design tree and add any diagnostics.
    fn check(&self, root: &DesignRoot, diagnostics: &mut Vec<Diagnostic>);
}
