//! Analyze phase - builds the derived per-service registry.

use eyre::Result;

use crate::{
    analysis::ServiceRegistry,
    pipeline::{CompilationContext, Phase},
};

/// Phase that derives the endpoint registry from the design tree.
///
/// Must run after `ValidatePhase`: services with recorded errors are
/// skipped, all others are analyzed.
pub struct AnalyzePhase;

impl Phase for AnalyzePhase {
    fn name(&self) -> &'static str {
        "analyze"
    }

    fn description(&self) -> &'static str {
        "Derive endpoint data from the design tree"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let mut diagnostics = std::mem::take(&mut ctx.diagnostics);
        let registry = ServiceRegistry::build(&ctx.root, &mut diagnostics);
        ctx.diagnostics = diagnostics;
        ctx.registry = Some(registry);
        Ok(())
    }
}
