//! Lint for response status and tag rules.

use std::collections::BTreeSet;

use gantry_design::DesignRoot;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that enforces the response invariants: unique status codes per
/// endpoint, and tag selectors on every response but a final catch-all when
/// more than one response is declared.
pub struct ResponseRulesLint;

impl Lint for ResponseRulesLint {
    fn name(&self) -> &'static str {
        "response-rules"
    }

    fn description(&self) -> &'static str {
        "Response status codes must be unique; multi-response endpoints dispatch on tags"
    }

    fn check(&self, root: &DesignRoot, diagnostics: &mut Vec<Diagnostic>) {
        for http_svc in &root.http_services {
            for ep in &http_svc.endpoints {
                let location = format!("{}.{}", http_svc.service_name, ep.method_name);
                let mut seen = BTreeSet::new();
                for resp in &ep.responses {
                    if !seen.insert(resp.status_code) {
                        diagnostics.push(
                            Diagnostic::error(
                                "validate",
                                format!("duplicate response status {}", resp.status_code),
                            )
                            .for_service(&http_svc.service_name)
                            .at(&location),
                        );
                    }
                }

                if ep.responses.len() > 1 {
                    let last = ep.responses.len() - 1;
                    for (i, resp) in ep.responses.iter().enumerate() {
                        if i < last && resp.tag.is_none() {
                            diagnostics.push(
                                Diagnostic::error(
                                    "validate",
                                    format!(
                                        "response {} needs a tag selector; only the final response may be untagged",
                                        resp.status_code
                                    ),
                                )
                                .for_service(&http_svc.service_name)
                                .at(&location),
                            );
                        }
                    }
                    if ep.responses[last].tag.is_some() {
                        diagnostics.push(
                            Diagnostic::error(
                                "validate",
                                "no catch-all response; the final response must be untagged",
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
