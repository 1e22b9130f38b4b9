//! Lint for endpoint binding integrity.

use gantry_design::{DataType, DesignRoot, HttpEndpoint, Method};

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that errors when an endpoint references a missing method, binds a
/// missing payload attribute, or binds an optional attribute to a path
/// segment.
pub struct EndpointBindingsLint;

impl Lint for EndpointBindingsLint {
    fn name(&self) -> &'static str {
        "endpoint-bindings"
    }

    fn description(&self) -> &'static str {
        "Bindings must reference existing, compatible payload attributes"
    }

    fn check(&self, root: &DesignRoot, diagnostics: &mut Vec<Diagnostic>) {
        for http_svc in &root.http_services {
            let Some(service) = root.service(&http_svc.service_name) else {
                diagnostics.push(
                    Diagnostic::error(
                        "validate",
                        format!("unknown service \"{}\"", http_svc.service_name),
                    )
                    .for_service(&http_svc.service_name),
                );
                continue;
            };
            for ep in &http_svc.endpoints {
                let location = format!("{}.{}", http_svc.service_name, ep.method_name);
                let Some(method) = service.method(&ep.method_name) else {
                    diagnostics.push(
                        Diagnostic::error(
                            "validate",
                            format!(
                                "endpoint references unknown method \"{}\"",
                                ep.method_name
                            ),
                        )
                        .for_service(&http_svc.service_name)
                        .at(&location),
                    );
                    continue;
                };
                check_bindings(http_svc.service_name.as_str(), &location, method, ep, diagnostics);
            }
        }
    }
}

fn check_bindings(
    service: &str,
    location: &str,
    method: &Method,
    ep: &HttpEndpoint,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let bound = ep
        .path_params
        .iter()
        .chain(&ep.query_params)
        .chain(ep.headers.iter().map(|(attr, _)| attr));

    for name in bound {
        match payload_attribute(method, name) {
            None => {
                diagnostics.push(
                    Diagnostic::error(
                        "validate",
                        format!("binding references missing attribute \"{}\"", name),
                    )
                    .for_service(service)
                    .at(location),
                );
            }
            Some((required, has_default)) => {
                if ep.path_params.contains(name) && !required && !has_default {
                    diagnostics.push(
                        Diagnostic::error(
                            "validate",
                            format!(
                                "path parameter \"{}\" must be required; path segments always bind",
                                name
                            ),
                        )
                        .for_service(service)
                        .at(location),
                    );
                }
            }
        }
    }
}

/// Look up a bound attribute in the method payload; returns
/// (required, has_default).
fn payload_attribute(method: &Method, name: &str) -> Option<(bool, bool)> {
    let payload = method.payload.as_ref()?;
    match &payload.ty {
        DataType::Object(attrs) => attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| (a.required, a.default.is_some())),
        _ if payload.name == name => Some((payload.required, payload.default.is_some())),
        _ => None,
    }
}
