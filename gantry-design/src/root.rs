//! Design tree root: API, servers, hosts.

use crate::http::HttpService;
use crate::service::Service;
use crate::types::{Attribute, DefaultValue, Primitive, Validation};

/// Root of the frozen design tree.
#[derive(Debug, Clone, Default)]
pub struct DesignRoot {
    /// API-level declarations.
    pub api: Api,
    /// User-declared named object types, resolvable from attributes.
    pub user_types: Vec<UserType>,
    /// Services in declaration order.
    pub services: Vec<Service>,
    /// HTTP overlays in declaration order.
    pub http_services: Vec<HttpService>,
}

impl DesignRoot {
    /// Look up a service by name.
    pub fn service(&self, name: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.name == name)
    }

    /// Look up a user-declared type by name.
    pub fn user_type(&self, name: &str) -> Option<&UserType> {
        self.user_types.iter().find(|t| t.name == name)
    }

    /// Look up the HTTP overlay for a service.
    pub fn http_service(&self, name: &str) -> Option<&HttpService> {
        self.http_services.iter().find(|s| s.service_name == name)
    }

    /// The declared servers, or a single inferred server hosting every
    /// service when the API declares none.
    pub fn servers(&self) -> Vec<ServerDecl> {
        if !self.api.servers.is_empty() {
            return self.api.servers.clone();
        }
        let name = if self.api.name.is_empty() {
            "default".to_string()
        } else {
            self.api.name.clone()
        };
        vec![ServerDecl {
            name,
            services: self.services.iter().map(|s| s.name.clone()).collect(),
            hosts: Vec::new(),
        }]
    }
}

/// A user-declared named object type.
#[derive(Debug, Clone)]
pub struct UserType {
    /// Declared type name.
    pub name: String,
    /// Description used for generated comments.
    pub description: Option<String>,
    /// Object attributes in declaration order.
    pub attributes: Vec<Attribute>,
}

/// API-level metadata and server declarations.
#[derive(Debug, Clone, Default)]
pub struct Api {
    /// API name.
    pub name: String,
    /// Description used for generated comments.
    pub description: Option<String>,
    /// Declared servers.
    pub servers: Vec<ServerDecl>,
}

/// A server declaration: the set of hosted services and their hosts.
#[derive(Debug, Clone)]
pub struct ServerDecl {
    /// Server name.
    pub name: String,
    /// Names of hosted services. Empty means all services.
    pub services: Vec<String>,
    /// Hosts in declaration order.
    pub hosts: Vec<Host>,
}

impl ServerDecl {
    /// Returns true if this server hosts the given service.
    pub fn hosts_service(&self, name: &str) -> bool {
        self.services.is_empty() || self.services.iter().any(|s| s == name)
    }
}

/// A host: a set of URIs sharing one set of variables.
#[derive(Debug, Clone)]
pub struct Host {
    /// Host name (e.g. "dev", "stage").
    pub name: String,
    /// URIs in declaration order.
    pub uris: Vec<Uri>,
    /// URI variables in declaration order.
    pub variables: Vec<UriVariable>,
}

/// A URI template with optional `{name}` variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uri(pub String);

impl Uri {
    /// The URI scheme, when present.
    pub fn scheme(&self) -> Option<&str> {
        self.0.split_once("://").map(|(scheme, _)| scheme)
    }

    /// Everything after the scheme separator: authority plus path.
    pub fn authority(&self) -> &str {
        self.0
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.0)
    }

    /// The `{name}` variables referenced by this URI, in order of appearance.
    pub fn variables(&self) -> Vec<String> {
        let mut vars = Vec::new();
        let mut rest = self.0.as_str();
        while let Some(start) = rest.find('{') {
            let Some(end) = rest[start..].find('}') else {
                break;
            };
            vars.push(rest[start + 1..start + end].to_string());
            rest = &rest[start + end + 1..];
        }
        vars
    }
}

/// A typed URI variable with optional default and validations.
#[derive(Debug, Clone)]
pub struct UriVariable {
    /// Variable name as it appears in `{name}` segments.
    pub name: String,
    /// Declared primitive type.
    pub ty: Primitive,
    /// Description used for generated comments.
    pub description: Option<String>,
    /// Default value substituted when the variable is unset.
    pub default: Option<DefaultValue>,
    /// Declared validations (e.g. an enum of allowed values).
    pub validation: Option<Validation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_parts() {
        let uri = Uri("http://example-{int}:8090".into());
        assert_eq!(uri.scheme(), Some("http"));
        assert_eq!(uri.authority(), "example-{int}:8090");
        assert_eq!(uri.variables(), vec!["int"]);
    }

    #[test]
    fn test_uri_multiple_variables() {
        let uri = Uri("https://example-{domain}:{port}/{bool}".into());
        assert_eq!(uri.variables(), vec!["domain", "port", "bool"]);
    }

    #[test]
    fn test_inferred_default_server() {
        let root = DesignRoot {
            services: vec![Service {
                name: "Service".into(),
                description: None,
                methods: Vec::new(),
            }],
            ..DesignRoot::default()
        };
        let servers = root.servers();
        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].name, "default");
        assert!(servers[0].hosts_service("Service"));
    }

    #[test]
    fn test_server_subset() {
        let server = ServerDecl {
            name: "SingleHost".into(),
            services: vec!["Service".into()],
            hosts: Vec::new(),
        };
        assert!(server.hosts_service("Service"));
        assert!(!server.hosts_service("IgnoredService"));
    }
}
