//! Lint for server host URI variables.

use gantry_design::{DesignRoot, Primitive};

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that errors when a host URI references an undeclared variable or a
/// variable is declared with a type that has no wire conversion.
pub struct ServerVariablesLint;

impl Lint for ServerVariablesLint {
    fn name(&self) -> &'static str {
        "server-variables"
    }

    fn description(&self) -> &'static str {
        "Host URI variables must be declared with convertible primitive types"
    }

    fn check(&self, root: &DesignRoot, diagnostics: &mut Vec<Diagnostic>) {
        for server in &root.api.servers {
            for host in &server.hosts {
                let location = format!("{}.{}", server.name, host.name);
                for uri in &host.uris {
                    for var in uri.variables() {
                        if !host.variables.iter().any(|v| v.name == var) {
                            diagnostics.push(
                                Diagnostic::error(
                                    "validate",
                                    format!(
                                        "URI \"{}\" references undeclared variable {{{}}}",
                                        uri.0, var
                                    ),
                                )
                                .at(&location),
                            );
                        }
                    }
                }
                for var in &host.variables {
                    if matches!(var.ty, Primitive::Bytes | Primitive::Any) {
                        diagnostics.push(
                            Diagnostic::error(
                                "validate",
                                format!(
                                    "variable \"{}\" has unsupported type {}",
                                    var.name,
                                    var.ty.as_str()
                                ),
                            )
                            .at(&location),
                        );
                    }
                }
            }
        }
    }
}
