//! Pipeline phase trait.

use eyre::Result;

use super::CompilationContext;

/// A phase in the generation pipeline.
///
/// Phases are executed in order by the pipeline. Each phase can read and
/// modify the compilation context, adding to the derived registry or the
/// diagnostics.
///
/// Built-in phases:
/// - `ValidatePhase` - checks design invariants and collects diagnostics
/// - `AnalyzePhase` - builds the per-service endpoint registry
pub trait Phase: Send + Sync {
    /// The name of this phase (used in diagnostics).
    fn name(&self) -> &'static str;

    /// A human-readable description of what this phase does.
    fn description(&self) -> &'static str;

    /// Run this phase on the compilation context.
    ///
    /// # Errors
    ///
    /// Returns an error only for failures that invalidate the whole run.
    /// Per-service problems are recorded as diagnostics instead; generation
    /// continues for the remaining services.
    fn run(&self, ctx: &mut CompilationContext) -> Result<()>;
}
