//! Lint for route placeholder / path parameter agreement.

use std::collections::BTreeSet;

use gantry_design::DesignRoot;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that errors when the path parameters declared on an endpoint do not
/// match the `{name}` placeholders of its routes, or when a route repeats a
/// placeholder.
pub struct PathVariablesLint;

impl Lint for PathVariablesLint {
    fn name(&self) -> &'static str {
        "path-variables"
    }

    fn description(&self) -> &'static str {
        "Route placeholders and bound path parameters must agree"
    }

    fn check(&self, root: &DesignRoot, diagnostics: &mut Vec<Diagnostic>) {
        for http_svc in &root.http_services {
            for ep in &http_svc.endpoints {
                let location = format!("{}.{}", http_svc.service_name, ep.method_name);
                let declared: BTreeSet<&str> =
                    ep.path_params.iter().map(|p| p.as_str()).collect();
                let mut in_routes: BTreeSet<String> = BTreeSet::new();

                for route in &ep.routes {
                    let vars = route.path_params();
                    let mut seen: BTreeSet<&str> = BTreeSet::new();
                    for var in &vars {
                        if !seen.insert(var) {
                            diagnostics.push(
                                Diagnostic::error(
                                    "validate",
                                    format!(
                                        "duplicate path variable {{{}}} in route \"{}\"",
                                        var, route.path
                                    ),
                                )
                                .for_service(&http_svc.service_name)
                                .at(&location),
                            );
                        }
                    }
                    in_routes.extend(vars);
                }

                for var in &in_routes {
                    if !declared.contains(var.as_str()) {
                        diagnostics.push(
                            Diagnostic::error(
                                "validate",
                                format!(
                                    "route variable {{{}}} has no bound path parameter",
                                    var
                                ),
                            )
                            .for_service(&http_svc.service_name)
                            .at(&location),
                        );
                    }
                }
                for param in &declared {
                    if !in_routes.contains(*param) {
                        diagnostics.push(
                            Diagnostic::error(
                                "validate",
                                format!(
                                    "path parameter \"{}\" does not appear in any route",
                                    param
                                ),
                            )
                            .for_service(&http_svc.service_name)
                            .at(&location),
                        );
                    }
                }
            }
        }
    }
}
