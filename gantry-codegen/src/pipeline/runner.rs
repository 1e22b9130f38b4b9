//! Pipeline orchestrator.

use eyre::Result;
use gantry_design::DesignRoot;

use super::{
    phases::{AnalyzePhase, ValidatePhase},
    CompilationContext, Phase,
};

/// The generation pipeline orchestrator.
///
/// Runs the built-in phases (validate, analyze) followed by any user phases.
/// A service that fails validation is skipped by analysis; its diagnostics
/// stay in the context so callers can report every problem in one run.
///
/// # Example
///
/// ```ignore
/// let ctx = Pipeline::new().run(root)?;
/// let registry = ctx.registry.as_ref().unwrap();
/// ```
pub struct Pipeline {
    phases: Vec<Box<dyn Phase>>,
}

impl Pipeline {
    /// Create a new pipeline with the default built-in phases.
    pub fn new() -> Self {
        Self { phases: Vec::new() }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Run the pipeline on a design tree.
    ///
    /// # Errors
    ///
    /// Returns an error only when a phase fails for the whole run. Design
    /// problems in individual services are reported as diagnostics in the
    /// returned context.
    pub fn run(&self, root: DesignRoot) -> Result<CompilationContext> {
        let mut ctx = CompilationContext::new(root);

        let builtin_phases: Vec<Box<dyn Phase>> =
            vec![Box::new(ValidatePhase::new()), Box::new(AnalyzePhase)];

        for phase in builtin_phases.iter().chain(self.phases.iter()) {
            phase.run(&mut ctx)?;
        }

        Ok(ctx)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
