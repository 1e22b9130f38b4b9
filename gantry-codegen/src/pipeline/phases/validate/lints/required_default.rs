//! Lint rejecting attributes that are both required and defaulted.

use gantry_design::{Attribute, DataType, DesignRoot};

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that errors when an attribute carries both a required flag and a
/// default value. The combination is contradictory: decoders materialise
/// defaults for absent values, so the required check could never fire.
pub struct RequiredDefaultLint;

impl Lint for RequiredDefaultLint {
    fn name(&self) -> &'static str {
        "required-default"
    }

    fn description(&self) -> &'static str {
        "An attribute cannot be both required and defaulted"
    }

    fn check(&self, root: &DesignRoot, diagnostics: &mut Vec<Diagnostic>) {
        for service in &root.services {
            for method in &service.methods {
                let location = format!("{}.{}", service.name, method.name);
                for attr in method.payload.iter().chain(method.result.iter()) {
                    walk(attr, &service.name, &location, diagnostics);
                }
            }
        }
    }
}

fn walk(attr: &Attribute, service: &str, location: &str, diagnostics: &mut Vec<Diagnostic>) {
    if attr.required && attr.default.is_some() {
        diagnostics.push(
            Diagnostic::error(
                "validate",
                format!(
                    "attribute \"{}\" is both required and defaulted",
                    attr.name
                ),
            )
            .for_service(service)
            .at(location),
        );
    }
    if let DataType::Object(attrs) = &attr.ty {
        for child in attrs {
            walk(child, service, location, diagnostics);
        }
    }
}

#[cfg(test)]
mod tests {
    use gantry_design::{Api, DefaultValue, Method, Primitive, Service};

    use super::*;

    #[test]
    fn test_contradiction_rejected() {
        let mut attr = gantry_design::Attribute::new(
            "count",
            DataType::Primitive(Primitive::Int),
        );
        attr.default = Some(DefaultValue::Int(1));
        // required stays true: the contradictory shape under test.

        let root = DesignRoot {
            api: Api::default(),
            user_types: Vec::new(),
            services: vec![Service {
                name: "Service".into(),
                description: None,
                methods: vec![Method {
                    name: "Show".into(),
                    description: None,
                    payload: Some(gantry_design::Attribute::new(
                        "payload",
                        DataType::Object(vec![attr]),
                    )),
                    result: None,
                }],
            }],
            http_services: Vec::new(),
        };

        let mut diagnostics = Vec::new();
        RequiredDefaultLint.check(&root, &mut diagnostics);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("required and defaulted"));
    }
}
