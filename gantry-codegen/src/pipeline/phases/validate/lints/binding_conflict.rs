//! Lint for attributes bound to more than one wire location.

use gantry_design::DesignRoot;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that errors when one payload attribute is bound to several of
/// path, query, and header.
pub struct BindingConflictLint;

impl Lint for BindingConflictLint {
    fn name(&self) -> &'static str {
        "binding-conflict"
    }

    fn description(&self) -> &'static str {
        "Each payload attribute may bind to at most one wire location"
    }

    fn check(&self, root: &DesignRoot, diagnostics: &mut Vec<Diagnostic>) {
        for http_svc in &root.http_services {
            for ep in &http_svc.endpoints {
                let location = format!("{}.{}", http_svc.service_name, ep.method_name);
                let header_attrs: Vec<&str> =
                    ep.headers.iter().map(|(attr, _)| attr.as_str()).collect();

                let mut conflict = |attr: &str, a: &str, b: &str| {
                    diagnostics.push(
                        Diagnostic::error(
                            "validate",
                            format!(
                                "attribute \"{}\" bound to both {} and {}",
                                attr, a, b
                            ),
                        )
                        .for_service(&http_svc.service_name)
                        .at(&location),
                    );
                };

                for attr in &ep.query_params {
                    if header_attrs.contains(&attr.as_str()) {
                        conflict(attr, "query", "header");
                    }
                    if ep.path_params.contains(attr) {
                        conflict(attr, "path", "query");
                    }
                }
                for attr in header_attrs {
                    if ep.path_params.iter().any(|p| p == attr) {
                        conflict(attr, "path", "header");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use gantry_design::{Api, HttpEndpoint, HttpService};

    use super::*;

    fn root_with_endpoint(ep: HttpEndpoint) -> DesignRoot {
        DesignRoot {
            api: Api::default(),
            user_types: Vec::new(),
            services: Vec::new(),
            http_services: vec![HttpService {
                service_name: "Service".into(),
                endpoints: vec![ep],
                file_servers: Vec::new(),
            }],
        }
    }

    #[test]
    fn test_no_conflict() {
        let mut ep = HttpEndpoint::new("Show", "GET", "/");
        ep.query_params.push("view".into());
        ep.headers.push(("auth".into(), "Authorization".into()));

        let mut diagnostics = Vec::new();
        BindingConflictLint.check(&root_with_endpoint(ep), &mut diagnostics);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_query_header_conflict() {
        let mut ep = HttpEndpoint::new("Show", "GET", "/");
        ep.query_params.push("view".into());
        ep.headers.push(("view".into(), "X-View".into()));

        let mut diagnostics = Vec::new();
        BindingConflictLint.check(&root_with_endpoint(ep), &mut diagnostics);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("query and header"));
    }
}
