//! Compilation context passed through pipeline phases.

use gantry_design::DesignRoot;

use super::diagnostic::{Diagnostic, Severity};
use crate::analysis::ServiceRegistry;

/// Context passed through all pipeline phases.
///
/// Carries the frozen design tree, the derived registry once analysis has
/// run, and the diagnostics collected along the way.
#[derive(Debug)]
pub struct CompilationContext {
    /// The frozen design tree being compiled.
    pub root: DesignRoot,
    /// The derived per-service registry (populated by AnalyzePhase).
    pub registry: Option<ServiceRegistry>,
    /// Diagnostics collected during compilation.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    /// Create a new compilation context from a design tree.
    pub fn new(root: DesignRoot) -> Self {
        Self {
            root,
            registry: None,
            diagnostics: Vec::new(),
        }
    }

    /// Check if any error diagnostics have been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Check if any error diagnostics are scoped to the given service.
    pub fn service_has_errors(&self, service: &str) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity.is_error() && d.service.as_deref() == Some(service))
    }

    /// Check if any warning diagnostics have been recorded.
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    /// Count the number of error diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
            .count()
    }

    /// Add a diagnostic.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Get all error diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    /// Get all warning diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    /// Take the registry out of the context, consuming it.
    ///
    /// # Panics
    ///
    /// Panics if the registry has not been set (i.e., AnalyzePhase hasn't
    /// run).
    pub fn take_registry(&mut self) -> ServiceRegistry {
        self.registry
            .take()
            .expect("registry not set - did AnalyzePhase run?")
    }
}

#[cfg(test)]
mod tests {
    use gantry_design::{Api, DesignRoot};

    use super::*;

    fn make_root() -> DesignRoot {
        DesignRoot {
            api: Api::default(),
            user_types: Vec::new(),
            services: Vec::new(),
            http_services: Vec::new(),
        }
    }

    #[test]
    fn test_context_creation() {
        let ctx = CompilationContext::new(make_root());
        assert!(ctx.registry.is_none());
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_service_scoped_errors() {
        let mut ctx = CompilationContext::new(make_root());
        ctx.add_diagnostic(Diagnostic::error("validate", "bad route").for_service("A"));
        ctx.add_diagnostic(Diagnostic::warning("analyze", "unsupported").for_service("B"));

        assert!(ctx.has_errors());
        assert!(ctx.service_has_errors("A"));
        assert!(!ctx.service_has_errors("B"));
        assert_eq!(ctx.error_count(), 1);
        assert!(ctx.has_warnings());
    }
}
