//! Validate phase - runs lints on the design tree.

mod lint;
pub mod lints;

use eyre::Result;
pub use lint::Lint;
pub use lints::{
    BindingConflictLint, EndpointBindingsLint, PathVariablesLint, RequiredDefaultLint,
    ResponseRulesLint, ServerVariablesLint,
};

use crate::pipeline::{CompilationContext, Phase};

/// Phase that validates the design tree using configurable lints.
///
/// Errors do not abort the pipeline: they are recorded scoped to their
/// service, and analysis skips the services that failed.
pub struct ValidatePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ValidatePhase {
    /// Create a new validate phase with default lints.
    pub fn new() -> Self {
        Self {
            lints: vec![
                Box::new(EndpointBindingsLint),
                Box::new(PathVariablesLint),
                Box::new(BindingConflictLint),
                Box::new(ResponseRulesLint),
                Box::new(ServerVariablesLint),
                Box::new(RequiredDefaultLint),
            ],
        }
    }

    /// Create a validate phase with no lints.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    /// Add a custom lint to the validation phase.
    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    /// Get the names of all lints that will be run.
    pub fn lint_names(&self) -> Vec<&'static str> {
        self.lints.iter().map(|l| l.name()).collect()
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn description(&self) -> &'static str {
        "Check design tree invariants and collect diagnostics"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        for lint in &self.lints {
            lint.check(&ctx.root, &mut ctx.diagnostics);
        }
        Ok(())
    }
}
