//! Per-service registry of derived endpoint data.

use std::collections::HashSet;

use gantry_design::{
    Attribute, BodyBinding, DataType, DesignRoot, HttpEndpoint, HttpService, Method, Service,
};
use indexmap::IndexMap;

use crate::naming::{canonical_header_key, to_camel_case, to_snake_case, GO_NAMING};
use crate::pipeline::Diagnostic;

use super::binding::{ParamClass, ParamMode};
use super::conversion::can_fail;
use super::endpoint::{
    BodyField, BodyKind, BodyUse, EndpointData, ErrorData, FileServerData, HeaderData,
    HostData, MultipartData, ParamData, ParamLocation, PayloadData, PayloadKind, RequestData,
    ResponseData, ResultData, ResultKind, RouteData, ServerBody, ServerData, ServiceData,
    TypeData, UriData, VariableData,
};
use super::transform::{
    FieldMapping, HelperDirection, InitArg, InitData, InitSource, MappingKind, TagTest,
    TransformHelperData,
};

/// Derived data for every service that survived validation, plus the
/// server/host configuration surfaced to downstream tooling.
///
/// Populated exactly once per service during analysis and read-only after;
/// insertion order follows the design declaration order.
#[derive(Debug, Default)]
pub struct ServiceRegistry {
    services: IndexMap<String, ServiceData>,
    /// Declared (or inferred) servers with their host configuration.
    pub servers: Vec<ServerData>,
}

impl ServiceRegistry {
    /// Analyze every HTTP service of the design. Services with recorded
    /// errors are skipped; new problems are appended to `diagnostics`.
    pub fn build(root: &DesignRoot, diagnostics: &mut Vec<Diagnostic>) -> Self {
        let servers = build_servers(root);
        let mut services = IndexMap::new();

        for http_svc in &root.http_services {
            let name = http_svc.service_name.clone();
            let failed = diagnostics
                .iter()
                .any(|d| d.severity.is_error() && d.service.as_deref() == Some(name.as_str()));
            if failed {
                continue;
            }
            let Some(service) = root.service(&name) else {
                continue;
            };
            let analysis = ServiceAnalysis::new(root, service, http_svc);
            match analysis.run() {
                Ok((data, warnings)) => {
                    diagnostics.extend(warnings);
                    services.insert(name, data);
                }
                Err(diag) => diagnostics.push(diag),
            }
        }

        Self { services, servers }
    }

    /// Look up a service by name.
    pub fn service(&self, name: &str) -> Option<&ServiceData> {
        self.services.get(name)
    }

    /// Iterate services in declaration order.
    pub fn services(&self) -> impl Iterator<Item = &ServiceData> {
        self.services.values()
    }

    /// Number of analyzed services.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Whether no service survived analysis.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

fn build_servers(root: &DesignRoot) -> Vec<ServerData> {
    root.servers()
        .iter()
        .map(|server| ServerData {
            name: server.name.clone(),
            services: root
                .services
                .iter()
                .filter(|s| server.hosts_service(&s.name))
                .map(|s| s.name.clone())
                .collect(),
            hosts: server
                .hosts
                .iter()
                .map(|host| HostData {
                    name: host.name.clone(),
                    uris: host
                        .uris
                        .iter()
                        .map(|uri| UriData {
                            scheme: uri.scheme().unwrap_or("http").to_string(),
                            authority: uri.authority().to_string(),
                        })
                        .collect(),
                    variables: host
                        .variables
                        .iter()
                        .map(|var| VariableData {
                            name: var.name.clone(),
                            ty: var.ty,
                            default: var.default.clone(),
                            enum_values: var
                                .validation
                                .as_ref()
                                .map(|v| v.enum_values.clone())
                                .unwrap_or_default(),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect()
}

struct ServiceAnalysis<'a> {
    root: &'a DesignRoot,
    service: &'a Service,
    http_svc: &'a HttpService,
    svc_pascal: String,
    body_types: IndexMap<String, TypeData>,
    helpers: IndexMap<String, TransformHelperData>,
    seen_idents: HashSet<String>,
    warnings: Vec<Diagnostic>,
}

impl<'a> ServiceAnalysis<'a> {
    fn new(root: &'a DesignRoot, service: &'a Service, http_svc: &'a HttpService) -> Self {
        Self {
            root,
            service,
            http_svc,
            svc_pascal: GO_NAMING.type_name(&service.name),
            body_types: IndexMap::new(),
            helpers: IndexMap::new(),
            seen_idents: HashSet::new(),
            warnings: Vec::new(),
        }
    }

    fn run(mut self) -> Result<(ServiceData, Vec<Diagnostic>), Diagnostic> {
        let mut endpoints = Vec::new();
        for ep in &self.http_svc.endpoints {
            endpoints.push(self.analyze_endpoint(ep)?);
        }

        let file_servers = self
            .http_svc
            .file_servers
            .iter()
            .map(|fs| FileServerData {
                file_path: fs.file_path.clone(),
                request_paths: fs.request_paths.clone(),
                is_dir: fs.is_dir,
                mount_handler: format!("Mount{}", GO_NAMING.type_name(&fs.file_path)),
            })
            .collect();

        let data = ServiceData {
            name: self.service.name.clone(),
            snake: to_snake_case(&self.service.name),
            pkg_name: to_snake_case(&self.service.name),
            description: self.service.description.clone().unwrap_or_default(),
            server_struct: "Server".to_string(),
            mount_point_struct: "MountPoint".to_string(),
            server_init: "New".to_string(),
            server_service: "Service".to_string(),
            mount_server: "Mount".to_string(),
            endpoints,
            file_servers,
            body_types: self.body_types.into_iter().map(|(_, t)| t).collect(),
            transform_helpers: self.helpers.into_iter().map(|(_, h)| h).collect(),
        };
        Ok((data, self.warnings))
    }

    fn design_error(&self, location: &str, message: impl Into<String>) -> Diagnostic {
        Diagnostic::error("analyze", message)
            .for_service(&self.service.name)
            .at(location)
    }

    fn warn(&mut self, location: &str, message: impl Into<String>) {
        self.warnings.push(
            Diagnostic::warning("analyze", message)
                .for_service(&self.service.name)
                .at(location.to_string()),
        );
    }

    fn analyze_endpoint(&mut self, ep: &HttpEndpoint) -> Result<EndpointData, Diagnostic> {
        let location = format!("{}.{}", self.service.name, ep.method_name);
        let method = self
            .service
            .method(&ep.method_name)
            .ok_or_else(|| self.design_error(&location, "endpoint references unknown method"))?;

        let m_pascal = GO_NAMING.type_name(&method.name);
        if !self.seen_idents.insert(m_pascal.clone()) {
            return Err(self.design_error(
                &location,
                format!("endpoint identifier {} collides with another endpoint", m_pascal),
            ));
        }

        let multipart = ep.multipart.then(|| MultipartData {
            func_name: format!("{}{}DecoderFunc", self.svc_pascal, m_pascal),
            init_name: format!("New{}{}Decoder", self.svc_pascal, m_pascal),
            var_name: format!("{}{}DecoderFn", to_camel_case(&self.service.name), m_pascal),
        });

        let payload = self.analyze_payload(method, ep, &m_pascal, &location)?;
        let result = self.analyze_result(method, ep, &m_pascal, &location)?;
        let errors = self.analyze_errors(method, ep, &m_pascal, &location)?;

        Ok(EndpointData {
            service_name: self.service.name.clone(),
            service_pkg: to_snake_case(&self.service.name),
            method_name: method.name.clone(),
            method_var_name: m_pascal.clone(),
            description: method.description.clone().unwrap_or_default(),
            routes: ep
                .routes
                .iter()
                .map(|r| RouteData {
                    verb: r.verb.clone(),
                    path: r.path.clone(),
                })
                .collect(),
            mount_handler: format!("Mount{}Handler", m_pascal),
            handler_init: format!("New{}Handler", m_pascal),
            request_decoder: format!("Decode{}Request", m_pascal),
            response_encoder: format!("Encode{}Response", m_pascal),
            error_encoder: (!ep.errors.is_empty()).then(|| format!("Encode{}Error", m_pascal)),
            payload,
            result,
            errors,
            multipart,
        })
    }

    // ------------------------------------------------------------------
    // Payload side
    // ------------------------------------------------------------------

    fn analyze_payload(
        &mut self,
        method: &Method,
        ep: &HttpEndpoint,
        m_pascal: &str,
        location: &str,
    ) -> Result<PayloadData, Diagnostic> {
        let Some(payload) = &method.payload else {
            return Ok(PayloadData {
                kind: PayloadKind::None,
                request: RequestData::default(),
                decoder_return_value: None,
            });
        };

        match &payload.ty {
            DataType::Object(attrs) => {
                self.analyze_struct_payload(attrs, ep, m_pascal, location)
            }
            _ => Ok(self.analyze_value_payload(payload, ep, location)),
        }
    }

    /// A payload that is a bare value: it decodes from its single binding,
    /// or from the request body when unbound.
    fn analyze_value_payload(
        &mut self,
        payload: &Attribute,
        ep: &HttpEndpoint,
        location: &str,
    ) -> PayloadData {
        let mut request = RequestData::default();
        let mut decoder_return_value = None;

        let bound_location = if ep.path_params.contains(&payload.name) {
            Some(ParamLocation::Path)
        } else if ep.query_params.contains(&payload.name)
            || ep.map_query_params.as_deref() == Some(payload.name.as_str())
        {
            Some(ParamLocation::Query)
        } else if ep.header_name(&payload.name).is_some() {
            Some(ParamLocation::Header)
        } else {
            None
        };

        match bound_location {
            Some(loc) => {
                let wire_name = match loc {
                    ParamLocation::Header => ep.header_name(&payload.name).unwrap().to_string(),
                    _ => payload.name.clone(),
                };
                let param = self.make_param(payload, loc, &wire_name, ep, location);
                decoder_return_value = Some(param.var_name.clone());
                match loc {
                    ParamLocation::Path => request.path_params.push(param),
                    ParamLocation::Query => request.query_params.push(param),
                    ParamLocation::Header => request.headers.push(param),
                }
            }
            None => {
                request.server_body = Some(ServerBody::Value {
                    ty: payload.ty.clone(),
                });
            }
        }

        request.must_validate = must_validate(&request);
        PayloadData {
            kind: PayloadKind::Value {
                ty: payload.ty.clone(),
            },
            request,
            decoder_return_value,
        }
    }

    fn analyze_struct_payload(
        &mut self,
        attrs: &[Attribute],
        ep: &HttpEndpoint,
        m_pascal: &str,
        location: &str,
    ) -> Result<PayloadData, Diagnostic> {
        let payload_name = format!("{}Payload", m_pascal);
        let mut request = RequestData::default();
        let mut body_attrs: Vec<&Attribute> = Vec::new();

        for attr in attrs {
            if ep.path_params.contains(&attr.name) {
                let param =
                    self.make_param(attr, ParamLocation::Path, &attr.name.clone(), ep, location);
                request.path_params.push(param);
            } else if ep.query_params.contains(&attr.name)
                || ep.map_query_params.as_deref() == Some(attr.name.as_str())
            {
                let param =
                    self.make_param(attr, ParamLocation::Query, &attr.name.clone(), ep, location);
                request.query_params.push(param);
            } else if let Some(header) = ep.header_name(&attr.name) {
                let wire = header.to_string();
                let param = self.make_param(attr, ParamLocation::Header, &wire, ep, location);
                request.headers.push(param);
            } else {
                body_attrs.push(attr);
            }
        }

        let param_args: Vec<InitArg> = request
            .path_params
            .iter()
            .chain(&request.query_params)
            .chain(&request.headers)
            .map(|p| {
                let field_ptr = field_is_pointer(p.required, p.default.is_some(), &p.ty);
                InitArg {
                    name: p.var_name.clone(),
                    ty: p.ty.clone(),
                    pointer: p.is_pointer(),
                    take_ref: field_ptr && !p.is_pointer(),
                    service_scoped: false,
                    field_name: Some(p.field_name.clone()),
                }
            })
            .collect();

        let mut init_args = Vec::new();
        let mut source = InitSource::Body {
            mappings: Vec::new(),
        };
        let mut return_type_attribute = None;

        if ep.multipart {
            // The user-supplied multipart decoder fills the payload directly.
        } else if let BodyBinding::Attribute(name) = &ep.body {
            let attr = body_attrs
                .iter()
                .find(|a| a.name == *name)
                .copied()
                .ok_or_else(|| {
                    self.design_error(
                        location,
                        format!("explicit body references missing attribute \"{}\"", name),
                    )
                })?;
            request.server_body = Some(ServerBody::Value {
                ty: attr.ty.clone(),
            });
            return_type_attribute = Some(GO_NAMING.type_name(&attr.name));
            source = InitSource::WrappedBody;
            init_args.push(InitArg {
                name: "body".to_string(),
                ty: attr.ty.clone(),
                pointer: false,
                take_ref: field_is_pointer(attr.required, attr.default.is_some(), &attr.ty),
                service_scoped: false,
                field_name: None,
            });
        } else if !body_attrs.is_empty() {
            let body_name = format!("{}RequestBody", m_pascal);
            let mut fields = Vec::new();
            let mut mappings = Vec::new();
            for attr in &body_attrs {
                fields.push(self.body_field(attr, HelperDirection::Unmarshal, location));
                if let Some(mapping) =
                    self.field_mapping(attr, HelperDirection::Unmarshal, location)
                {
                    mappings.push(mapping);
                }
            }
            let type_data = TypeData {
                var_name: body_name.clone(),
                description: format!(
                    "{} is the type of the \"{}\" service \"{}\" endpoint HTTP request body.",
                    body_name, self.service.name, ep.method_name
                ),
                fields,
                init: None,
                kind: BodyKind::Request,
            };
            request.body_has_validate = type_data.must_validate();
            self.body_types.entry(body_name.clone()).or_insert(type_data);
            request.server_body = Some(ServerBody::Type {
                name: body_name.clone(),
            });
            source = InitSource::Body { mappings };
            init_args.push(InitArg {
                name: "body".to_string(),
                ty: DataType::Named(body_name),
                pointer: true,
                take_ref: false,
                service_scoped: false,
                field_name: None,
            });
        }

        init_args.extend(param_args);

        let init = (!ep.multipart).then(|| InitData {
            name: format!("New{}", payload_name),
            description: format!(
                "New{} builds a {} service {} endpoint payload.",
                payload_name, self.service.name, ep.method_name
            ),
            args: init_args,
            return_type_name: payload_name.clone(),
            return_in_service_pkg: true,
            return_is_struct: true,
            return_type_attribute,
            source,
        });
        request.payload_init = init;
        request.must_validate = must_validate(&request);

        Ok(PayloadData {
            kind: PayloadKind::Struct { name: payload_name },
            request,
            decoder_return_value: None,
        })
    }

    fn make_param(
        &mut self,
        attr: &Attribute,
        loc: ParamLocation,
        wire_name: &str,
        ep: &HttpEndpoint,
        location: &str,
    ) -> ParamData {
        let capture_all = ep.map_query_params.as_deref() == Some(attr.name.as_str());
        let mode = match loc {
            ParamLocation::Path => ParamMode::for_path_param(),
            _ => ParamMode::for_param(attr.required, attr.default.is_some(), &attr.ty),
        };
        let class = ParamClass::classify(&attr.ty, capture_all);

        if param_unsupported(&attr.ty) {
            self.warn(
                location,
                format!(
                    "unsupported type for {} param \"{}\"; emitting placeholder comment",
                    loc.as_str(),
                    attr.name
                ),
            );
        }

        ParamData {
            name: wire_name.to_string(),
            var_name: GO_NAMING.var_name(&attr.name),
            canonical_name: matches!(loc, ParamLocation::Header)
                .then(|| canonical_header_key(wire_name)),
            ty: attr.ty.clone(),
            required: match loc {
                ParamLocation::Path => true,
                _ => attr.required,
            },
            mode,
            class,
            default: attr.default.clone(),
            validation: attr.validation().cloned(),
            field_name: GO_NAMING.type_name(&attr.name),
            location: loc,
        }
    }

    // ------------------------------------------------------------------
    // Result side
    // ------------------------------------------------------------------

    fn analyze_result(
        &mut self,
        method: &Method,
        ep: &HttpEndpoint,
        m_pascal: &str,
        location: &str,
    ) -> Result<ResultData, Diagnostic> {
        let Some(result) = &method.result else {
            return Ok(ResultData {
                kind: ResultKind::None,
                responses: ep
                    .responses
                    .iter()
                    .map(|decl| ResponseData {
                        status_code: decl.status_code,
                        server_body: None,
                        headers: Vec::new(),
                        tag: None,
                    })
                    .collect(),
            });
        };

        let DataType::Object(attrs) = &result.ty else {
            // Bare value results pass through to the encoder unchanged.
            return Ok(ResultData {
                kind: ResultKind::Value {
                    ty: result.ty.clone(),
                },
                responses: ep
                    .responses
                    .iter()
                    .map(|decl| ResponseData {
                        status_code: decl.status_code,
                        server_body: Some(BodyUse {
                            type_name: None,
                            init: None,
                        }),
                        headers: Vec::new(),
                        tag: None,
                    })
                    .collect(),
            });
        };

        let result_name = format!("{}Result", m_pascal);
        let mut responses = Vec::new();
        for decl in &ep.responses {
            let headers = self.response_headers(&decl.headers, attrs, location)?;
            let header_names: Vec<&str> = decl.headers.iter().map(|(a, _)| a.as_str()).collect();
            let body_attrs: Vec<&Attribute> = attrs
                .iter()
                .filter(|a| !header_names.contains(&a.name.as_str()))
                .collect();

            let tag = match &decl.tag {
                None => None,
                Some((field, value)) => {
                    let attr = attrs.iter().find(|a| a.name == *field).ok_or_else(|| {
                        self.design_error(
                            location,
                            format!("response tag references missing result field \"{}\"", field),
                        )
                    })?;
                    Some(TagTest {
                        field_name: GO_NAMING.type_name(field),
                        value: value.clone(),
                        required: attr.required,
                    })
                }
            };

            let server_body = if body_attrs.is_empty() {
                None
            } else {
                let suffix = decl
                    .tag
                    .as_ref()
                    .map(|(_, value)| GO_NAMING.type_name(value))
                    .unwrap_or_default();
                let body_name = format!("{}{}ResponseBody", m_pascal, suffix);
                let init_name = format!("New{}", body_name);
                self.register_marshal_body(
                    &body_name,
                    &init_name,
                    &result_name,
                    true,
                    &body_attrs,
                    BodyKind::Response,
                    format!(
                        "{} is the type of the \"{}\" service \"{}\" endpoint HTTP response body.",
                        body_name, self.service.name, ep.method_name
                    ),
                    location,
                );
                Some(BodyUse {
                    type_name: Some(body_name),
                    init: Some(init_name),
                })
            };

            responses.push(ResponseData {
                status_code: decl.status_code,
                server_body,
                headers,
                tag,
            });
        }

        Ok(ResultData {
            kind: ResultKind::Struct { name: result_name },
            responses,
        })
    }

    fn response_headers(
        &mut self,
        declared: &[(String, String)],
        attrs: &[Attribute],
        location: &str,
    ) -> Result<Vec<HeaderData>, Diagnostic> {
        let mut headers = Vec::new();
        for (attr_name, wire) in declared {
            let attr = attrs.iter().find(|a| a.name == *attr_name).ok_or_else(|| {
                self.design_error(
                    location,
                    format!("response header references missing field \"{}\"", attr_name),
                )
            })?;
            headers.push(HeaderData {
                name: wire.clone(),
                field_name: GO_NAMING.type_name(attr_name),
                var_name: GO_NAMING.var_name(attr_name),
                ty: attr.ty.clone(),
                required: attr.required,
                default: attr.default.clone(),
            });
        }
        Ok(headers)
    }

    // ------------------------------------------------------------------
    // Errors
    // ------------------------------------------------------------------

    fn analyze_errors(
        &mut self,
        _method: &Method,
        ep: &HttpEndpoint,
        m_pascal: &str,
        location: &str,
    ) -> Result<Vec<ErrorData>, Diagnostic> {
        let mut errors = Vec::new();
        for decl in &ep.errors {
            let user_type = self.root.user_type(&decl.type_name).ok_or_else(|| {
                self.design_error(
                    location,
                    format!("error \"{}\" references unknown type \"{}\"", decl.name, decl.type_name),
                )
            })?;
            let attrs = user_type.attributes.clone();

            let headers = self.response_headers(&decl.response.headers, &attrs, location)?;
            let header_names: Vec<&str> = decl
                .response
                .headers
                .iter()
                .map(|(a, _)| a.as_str())
                .collect();
            let body_attrs: Vec<&Attribute> = attrs
                .iter()
                .filter(|a| !header_names.contains(&a.name.as_str()))
                .collect();

            let tag = match &decl.response.tag {
                None => None,
                Some((field, value)) => {
                    let attr = attrs.iter().find(|a| a.name == *field).ok_or_else(|| {
                        self.design_error(
                            location,
                            format!("error tag references missing field \"{}\"", field),
                        )
                    })?;
                    Some(TagTest {
                        field_name: GO_NAMING.type_name(field),
                        value: value.clone(),
                        required: attr.required,
                    })
                }
            };

            let server_body = if body_attrs.is_empty() {
                None
            } else {
                let body_name =
                    format!("{}{}ResponseBody", m_pascal, GO_NAMING.type_name(&decl.name));
                let init_name = format!("New{}", body_name);
                self.register_marshal_body(
                    &body_name,
                    &init_name,
                    &user_type.name,
                    true,
                    &body_attrs,
                    BodyKind::Error,
                    format!(
                        "{} is the type of the \"{}\" service \"{}\" endpoint HTTP response body for the \"{}\" error.",
                        body_name, self.service.name, ep.method_name, decl.name
                    ),
                    location,
                );
                Some(BodyUse {
                    type_name: Some(body_name),
                    init: Some(init_name),
                })
            };

            errors.push(ErrorData {
                name: decl.name.clone(),
                type_name: GO_NAMING.type_name(&decl.type_name),
                response: ResponseData {
                    status_code: decl.response.status_code,
                    server_body,
                    headers,
                    tag,
                },
            });
        }
        Ok(errors)
    }

    // ------------------------------------------------------------------
    // Body types and transform helpers
    // ------------------------------------------------------------------

    /// Declare a response/error body type built from a service value.
    #[allow(clippy::too_many_arguments)]
    fn register_marshal_body(
        &mut self,
        body_name: &str,
        init_name: &str,
        source_type: &str,
        source_in_service_pkg: bool,
        body_attrs: &[&Attribute],
        kind: BodyKind,
        description: String,
        location: &str,
    ) {
        if self.body_types.contains_key(body_name) {
            return;
        }
        let mut fields = Vec::new();
        let mut mappings = Vec::new();
        for attr in body_attrs {
            fields.push(self.body_field(attr, HelperDirection::Marshal, location));
            if let Some(mapping) = self.field_mapping(attr, HelperDirection::Marshal, location) {
                mappings.push(mapping);
            }
        }
        let init = InitData {
            name: init_name.to_string(),
            description: format!(
                "{} builds the HTTP response body from the result of the endpoint.",
                init_name
            ),
            args: vec![InitArg {
                name: "res".to_string(),
                ty: DataType::Named(source_type.to_string()),
                pointer: true,
                take_ref: false,
                service_scoped: source_in_service_pkg,
                field_name: None,
            }],
            return_type_name: body_name.to_string(),
            return_in_service_pkg: false,
            return_is_struct: true,
            return_type_attribute: None,
            source: InitSource::Result { mappings },
        };
        self.body_types.insert(
            body_name.to_string(),
            TypeData {
                var_name: body_name.to_string(),
                description,
                fields,
                init: Some(init),
                kind,
            },
        );
    }

    /// A wire body field for an attribute, applying the pointer rules:
    /// request body primitives are always pointers, response body primitives
    /// are pointers only when optional without a default.
    fn body_field(
        &mut self,
        attr: &Attribute,
        direction: HelperDirection,
        location: &str,
    ) -> BodyField {
        let pointer = match direction {
            HelperDirection::Unmarshal => attr.ty.as_primitive().is_some(),
            HelperDirection::Marshal => field_is_pointer(attr.required, attr.default.is_some(), &attr.ty),
        };
        if let DataType::Named(name) = &attr.ty {
            self.ensure_attribute_type(name, direction, location);
        }
        if let DataType::Array(elem) = &attr.ty {
            if let DataType::Named(name) = elem.as_ref() {
                self.ensure_attribute_type(name, direction, location);
            }
        }
        BodyField {
            name: attr.name.clone(),
            field_name: GO_NAMING.type_name(&attr.name),
            ty: attr.ty.clone(),
            pointer,
            required: attr.required,
            default: attr.default.clone(),
            validation: attr.validation().cloned(),
            description: attr.description.clone(),
        }
    }

    /// The copy strategy moving one attribute between wire body and service
    /// value. `None` skips the field and records a warning.
    fn field_mapping(
        &mut self,
        attr: &Attribute,
        direction: HelperDirection,
        location: &str,
    ) -> Option<FieldMapping> {
        let field = GO_NAMING.type_name(&attr.name);
        let kind = match &attr.ty {
            DataType::Primitive(_) => match direction {
                HelperDirection::Unmarshal => {
                    if attr.required {
                        MappingKind::Deref
                    } else if let Some(default) = &attr.default {
                        MappingKind::DerefOrDefault(default.clone())
                    } else {
                        MappingKind::Direct
                    }
                }
                HelperDirection::Marshal => {
                    if let Some(default) = &attr.default {
                        MappingKind::DerefOrDefault(default.clone())
                    } else {
                        MappingKind::Direct
                    }
                }
            },
            DataType::Array(elem) => match elem.as_ref() {
                DataType::Primitive(_) => MappingKind::LoopCopy,
                DataType::Named(name) => {
                    let helper = self.ensure_helper(name, direction, location)?;
                    MappingKind::LoopHelper(helper)
                }
                _ => {
                    self.warn(
                        location,
                        format!("unsupported element type in body field \"{}\"", attr.name),
                    );
                    return None;
                }
            },
            DataType::Map { key, elem } => {
                let simple = key.as_primitive().is_some() && elem.as_primitive().is_some();
                if simple {
                    MappingKind::LoopCopy
                } else {
                    self.warn(
                        location,
                        format!("unsupported map shape in body field \"{}\"", attr.name),
                    );
                    return None;
                }
            }
            DataType::Named(name) => {
                let helper = self.ensure_helper(name, direction, location)?;
                MappingKind::Helper(helper)
            }
            DataType::Object(_) => {
                self.warn(
                    location,
                    format!(
                        "unsupported anonymous object in body field \"{}\"",
                        attr.name
                    ),
                );
                return None;
            }
        };
        Some(FieldMapping {
            field: field.clone(),
            source_field: field,
            ty: attr.ty.clone(),
            required: attr.required,
            kind,
        })
    }

    /// Declare the wire body type for a user-declared named type.
    fn ensure_attribute_type(
        &mut self,
        type_name: &str,
        direction: HelperDirection,
        location: &str,
    ) {
        let body_name = attribute_body_name(type_name, direction);
        if self.body_types.contains_key(&body_name) {
            return;
        }
        let Some(user_type) = self.root.user_type(type_name) else {
            self.warn(
                location,
                format!("body field references unknown type \"{}\"", type_name),
            );
            return;
        };
        // Reserve the slot before recursing so self-referential types
        // terminate.
        self.body_types.insert(
            body_name.clone(),
            TypeData {
                var_name: body_name.clone(),
                description: format!(
                    "{} is used to define fields on request and response body types.",
                    body_name
                ),
                fields: Vec::new(),
                init: None,
                kind: BodyKind::Attribute,
            },
        );
        let attrs = user_type.attributes.clone();
        let fields: Vec<BodyField> = attrs
            .iter()
            .map(|a| self.body_field(a, direction, location))
            .collect();
        if let Some(data) = self.body_types.get_mut(&body_name) {
            data.fields = fields;
        }
    }

    /// Declare the transform helper converting a named type between its wire
    /// and service forms; returns the helper name.
    fn ensure_helper(
        &mut self,
        type_name: &str,
        direction: HelperDirection,
        location: &str,
    ) -> Option<String> {
        let type_pascal = GO_NAMING.type_name(type_name);
        let body_name = attribute_body_name(type_name, direction);
        let helper_name = match direction {
            HelperDirection::Unmarshal => format!(
                "unmarshal{}To{}{}",
                body_name, self.svc_pascal, type_pascal
            ),
            HelperDirection::Marshal => format!(
                "marshal{}{}To{}",
                self.svc_pascal, type_pascal, body_name
            ),
        };
        if self.helpers.contains_key(&helper_name) {
            return Some(helper_name);
        }
        let Some(user_type) = self.root.user_type(type_name) else {
            self.warn(
                location,
                format!("body field references unknown type \"{}\"", type_name),
            );
            return None;
        };
        let user_type = user_type.clone();
        self.ensure_attribute_type(type_name, direction, location);

        // Reserve before recursing into nested named types.
        self.helpers.insert(
            helper_name.clone(),
            TransformHelperData {
                name: helper_name.clone(),
                direction,
                body_type_name: body_name.clone(),
                service_type_name: type_pascal.clone(),
                mappings: Vec::new(),
            },
        );
        let mappings: Vec<FieldMapping> = user_type
            .attributes
            .iter()
            .filter_map(|a| self.field_mapping(a, direction, location))
            .collect();
        if let Some(helper) = self.helpers.get_mut(&helper_name) {
            helper.mappings = mappings;
        }
        Some(helper_name)
    }
}

/// Whether a payload/result struct field is pointer-typed: primitives that
/// are optional and have no default.
fn field_is_pointer(required: bool, has_default: bool, ty: &DataType) -> bool {
    ty.as_primitive().is_some() && !required && !has_default
}

fn attribute_body_name(type_name: &str, direction: HelperDirection) -> String {
    match direction {
        HelperDirection::Unmarshal => format!("{}RequestBody", GO_NAMING.type_name(type_name)),
        HelperDirection::Marshal => format!("{}ResponseBody", GO_NAMING.type_name(type_name)),
    }
}

/// Whether a param type has no supported wire conversion and decodes to a
/// placeholder comment.
fn param_unsupported(ty: &DataType) -> bool {
    match ty {
        DataType::Primitive(_) => false,
        DataType::Array(elem) => elem.as_primitive().is_none(),
        DataType::Map { key, elem } => {
            key.as_primitive().is_none()
                || match elem.as_ref() {
                    DataType::Primitive(_) => false,
                    DataType::Array(inner) => inner.as_primitive().is_none(),
                    _ => true,
                }
        }
        DataType::Object(_) | DataType::Named(_) => true,
    }
}

/// A decoder needs the local error accumulator when any input is required,
/// any conversion can fail, any validation is declared, or the body type
/// validates.
fn must_validate(request: &RequestData) -> bool {
    let params = request
        .path_params
        .iter()
        .chain(&request.query_params)
        .chain(&request.headers);
    let mut any = false;
    for p in params {
        if p.required && !matches!(p.location, ParamLocation::Path) {
            any = true;
        }
        if p.validation.is_some() {
            any = true;
        }
        if param_can_fail(p) {
            any = true;
        }
    }
    any || request.body_has_validate
}

fn param_can_fail(p: &ParamData) -> bool {
    match p.class {
        ParamClass::Primitive => p.ty.as_primitive().map(can_fail).unwrap_or(false),
        ParamClass::StringSlice | ParamClass::MapStringSlice => false,
        ParamClass::Slice => p
            .ty
            .elem()
            .and_then(|e| e.as_primitive())
            .map(can_fail)
            .unwrap_or(false),
        ParamClass::Map | ParamClass::MapQueryParams => match &p.ty {
            DataType::Map { key, elem } => {
                key.as_primitive().map(can_fail).unwrap_or(false)
                    || elem.as_primitive().map(can_fail).unwrap_or(false)
            }
            _ => false,
        },
    }
}
