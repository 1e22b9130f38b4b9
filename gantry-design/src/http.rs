//! HTTP overlay: endpoints, routes, bindings, responses, file servers.

/// HTTP overlay for one service.
#[derive(Debug, Clone)]
pub struct HttpService {
    /// Name of the service this overlay binds.
    pub service_name: String,
    /// Endpoints in declaration order.
    pub endpoints: Vec<HttpEndpoint>,
    /// File servers in declaration order.
    pub file_servers: Vec<FileServer>,
}

/// HTTP binding for one service method.
#[derive(Debug, Clone)]
pub struct HttpEndpoint {
    /// Name of the bound method.
    pub method_name: String,
    /// Routes in declaration order.
    pub routes: Vec<Route>,
    /// Names of payload attributes bound to path segments.
    pub path_params: Vec<String>,
    /// Names of payload attributes bound to the query string.
    pub query_params: Vec<String>,
    /// Name of a map attribute capturing the entire query multi-map, if any.
    pub map_query_params: Option<String>,
    /// Names of payload attributes bound to request headers, with their wire
    /// header names.
    pub headers: Vec<(String, String)>,
    /// How the request body maps onto the payload.
    pub body: BodyBinding,
    /// Responses in declaration order.
    pub responses: Vec<ResponseDecl>,
    /// Errors in declaration order.
    pub errors: Vec<ErrorDecl>,
    /// Whether the request body is decoded as multipart content.
    pub multipart: bool,
}

impl HttpEndpoint {
    /// Create an endpoint with a single route and a default 200 response.
    pub fn new(method_name: impl Into<String>, verb: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method_name: method_name.into(),
            routes: vec![Route {
                verb: verb.into(),
                path: path.into(),
            }],
            path_params: Vec::new(),
            query_params: Vec::new(),
            map_query_params: None,
            headers: Vec::new(),
            body: BodyBinding::Auto,
            responses: vec![ResponseDecl::status(200)],
            errors: Vec::new(),
            multipart: false,
        }
    }

    /// The wire header name bound to the given attribute, if any.
    pub fn header_name(&self, attr: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(a, _)| a == attr)
            .map(|(_, h)| h.as_str())
    }
}

/// How the request body maps onto payload attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BodyBinding {
    /// Attributes not bound to path, query, or header form the body.
    #[default]
    Auto,
    /// The body is exactly this payload attribute; the decoded value is
    /// wrapped back into the payload by the constructor.
    Attribute(String),
}

/// One verb + path pattern registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// HTTP verb, upper case.
    pub verb: String,
    /// Path pattern with `{name}` placeholders.
    pub path: String,
}

impl Route {
    /// The `{name}` placeholders in order of appearance.
    pub fn path_params(&self) -> Vec<String> {
        let mut params = Vec::new();
        let mut rest = self.path.as_str();
        while let Some(start) = rest.find('{') {
            let Some(end) = rest[start..].find('}') else {
                break;
            };
            params.push(rest[start + 1..start + end].to_string());
            rest = &rest[start + end + 1..];
        }
        params
    }
}

/// A declared response shape.
#[derive(Debug, Clone)]
pub struct ResponseDecl {
    /// HTTP status code.
    pub status_code: u16,
    /// Names of result attributes written to response headers, with their
    /// wire header names.
    pub headers: Vec<(String, String)>,
    /// How the response body maps onto the result.
    pub body: BodyBinding,
    /// Result field and value selecting this response, if tagged.
    pub tag: Option<(String, String)>,
}

impl ResponseDecl {
    /// A bare response with the given status and an automatic body.
    pub fn status(status_code: u16) -> Self {
        Self {
            status_code,
            headers: Vec::new(),
            body: BodyBinding::Auto,
            tag: None,
        }
    }

    /// Tag this response with a result field selector.
    pub fn with_tag(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.tag = Some((field.into(), value.into()));
        self
    }
}

/// A declared error and the response shape it maps to.
#[derive(Debug, Clone)]
pub struct ErrorDecl {
    /// Error name as declared on the method.
    pub name: String,
    /// Name of the user type carrying the error data.
    pub type_name: String,
    /// Response rendered when the error is returned.
    pub response: ResponseDecl,
}

/// A static file mount.
#[derive(Debug, Clone)]
pub struct FileServer {
    /// Path of the served file or directory, relative to the server working
    /// directory.
    pub file_path: String,
    /// Request paths the file is served under. All use GET.
    pub request_paths: Vec<String>,
    /// Whether `file_path` names a directory.
    pub is_dir: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_path_params() {
        let route = Route {
            verb: "GET".into(),
            path: "/accounts/{account_id}/pets/{id}".into(),
        };
        assert_eq!(route.path_params(), vec!["account_id", "id"]);
    }

    #[test]
    fn test_route_no_params() {
        let route = Route {
            verb: "GET".into(),
            path: "/".into(),
        };
        assert!(route.path_params().is_empty());
    }

    #[test]
    fn test_endpoint_header_name() {
        let mut ep = HttpEndpoint::new("Show", "GET", "/");
        ep.headers.push(("view".into(), "X-View".into()));
        assert_eq!(ep.header_name("view"), Some("X-View"));
        assert_eq!(ep.header_name("other"), None);
    }

    #[test]
    fn test_unterminated_placeholder_ignored() {
        let route = Route {
            verb: "GET".into(),
            path: "/a/{id".into(),
        };
        assert!(route.path_params().is_empty());
    }
}
