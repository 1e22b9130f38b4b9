//! Top-level Go server generator.

use gantry_codegen::analysis::endpoint::ServerData;
use gantry_codegen::analysis::ServiceRegistry;
use gantry_codegen::pipeline::CompilationContext;
use gantry_codegen::RenderedFile;

use crate::files::{EncodeDecodeGo, ServerGo, TypesGo};

/// Go code generator producing the HTTP server transport files.
pub struct Generator {
    registry: ServiceRegistry,
    genpkg: String,
}

impl Generator {
    /// Create a generator from a pipeline context.
    ///
    /// Use `Pipeline::run()` to create the context, then pass it here.
    /// `genpkg` is the Go import path of the generated packages.
    ///
    /// # Panics
    ///
    /// Panics if the context doesn't have a registry (i.e., if the pipeline
    /// didn't run successfully).
    pub fn from_context(mut ctx: CompilationContext, genpkg: impl Into<String>) -> Self {
        Self {
            registry: ctx.take_registry(),
            genpkg: genpkg.into(),
        }
    }

    /// The analyzed registry.
    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// Server and host configuration for downstream tooling.
    pub fn servers(&self) -> &[ServerData] {
        &self.registry.servers
    }

    /// Render every output file: per service `server.go`, then
    /// `encode_decode.go`, then `types.go`, in declaration order.
    ///
    /// Rendering is purely functional: identical design trees produce
    /// byte-identical files.
    pub fn generate(&self) -> Vec<RenderedFile> {
        let mut files = Vec::new();
        for svc in self.registry.services() {
            files.push(ServerGo::new(svc, &self.genpkg).file().rendered());
        }
        for svc in self.registry.services() {
            files.push(EncodeDecodeGo::new(svc, &self.genpkg).file().rendered());
        }
        for svc in self.registry.services() {
            files.push(TypesGo::new(svc, &self.genpkg).file().rendered());
        }
        files
    }
}
