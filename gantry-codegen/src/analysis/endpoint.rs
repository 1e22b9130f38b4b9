//! Derived, template-facing data for services and endpoints.

use gantry_design::{DataType, DefaultValue, Primitive, Validation};

use super::binding::{ParamClass, ParamMode};
use super::transform::{InitData, TagTest, TransformHelperData};

/// Wire location a param is sourced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    Path,
    Query,
    Header,
}

impl ParamLocation {
    /// The location string used in missing-field diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamLocation::Path => "path",
            ParamLocation::Query => "query string",
            ParamLocation::Header => "header",
        }
    }
}

/// A decoded path, query, or header param.
#[derive(Debug, Clone)]
pub struct ParamData {
    /// Wire name.
    pub name: String,
    /// Generated variable name.
    pub var_name: String,
    /// Canonical MIME header key, for headers read from the multi-map.
    pub canonical_name: Option<String>,
    /// Param type.
    pub ty: DataType,
    /// Whether the param must be present on the wire.
    pub required: bool,
    /// Value-holding mode.
    pub mode: ParamMode,
    /// Decode strategy.
    pub class: ParamClass,
    /// Default materialised when the wire value is absent.
    pub default: Option<DefaultValue>,
    /// Declared validations.
    pub validation: Option<Validation>,
    /// Payload field assigned from this param.
    pub field_name: String,
    /// Where the param is sourced from.
    pub location: ParamLocation,
}

impl ParamData {
    /// Whether the generated variable is pointer-typed.
    pub fn is_pointer(&self) -> bool {
        self.mode.is_pointer()
    }
}

/// The wire-level body used by a request.
#[derive(Debug, Clone)]
pub enum ServerBody {
    /// A declared struct type; the name keys into the service body types.
    Type { name: String },
    /// The body decodes directly into a value of this type.
    Value { ty: DataType },
}

/// Everything the request decoder needs for one endpoint.
#[derive(Debug, Clone, Default)]
pub struct RequestData {
    pub path_params: Vec<ParamData>,
    pub query_params: Vec<ParamData>,
    pub headers: Vec<ParamData>,
    /// Body shape, when the request carries one.
    pub server_body: Option<ServerBody>,
    /// Whether the body type declares a Validate method.
    pub body_has_validate: bool,
    /// Payload constructor, when wrapping is required.
    pub payload_init: Option<InitData>,
    /// True when the decoder can produce field errors and needs the local
    /// error accumulator.
    pub must_validate: bool,
}

/// How the decoder hands the payload to the endpoint.
#[derive(Debug, Clone)]
pub enum PayloadKind {
    /// No payload; the handler passes nil.
    None,
    /// A named struct in the service package.
    Struct { name: String },
    /// A bare value of this type.
    Value { ty: DataType },
}

/// Payload-side data for one endpoint.
#[derive(Debug, Clone)]
pub struct PayloadData {
    pub kind: PayloadKind,
    pub request: RequestData,
    /// Variable returned directly by the decoder when no constructor is
    /// needed.
    pub decoder_return_value: Option<String>,
}

impl PayloadData {
    /// Whether the endpoint takes a payload at all.
    pub fn is_present(&self) -> bool {
        !matches!(self.kind, PayloadKind::None)
    }
}

/// A response header written from a result field.
#[derive(Debug, Clone)]
pub struct HeaderData {
    /// Wire header name.
    pub name: String,
    /// Result field the value comes from.
    pub field_name: String,
    /// Base name for generated conversion locals.
    pub var_name: String,
    /// Field type.
    pub ty: DataType,
    /// Whether the result field is required (value, not pointer).
    pub required: bool,
    /// Default written when the field is nil.
    pub default: Option<DefaultValue>,
}

/// A use of a wire body by a response.
#[derive(Debug, Clone)]
pub struct BodyUse {
    /// Declared body type name; absent when the result value passes
    /// through unchanged.
    pub type_name: Option<String>,
    /// Constructor name, when the body is built from the result; absent
    /// when the result passes through.
    pub init: Option<String>,
}

/// One declared response shape.
#[derive(Debug, Clone)]
pub struct ResponseData {
    pub status_code: u16,
    pub server_body: Option<BodyUse>,
    pub headers: Vec<HeaderData>,
    pub tag: Option<TagTest>,
}

/// Shape of a method result.
#[derive(Debug, Clone)]
pub enum ResultKind {
    /// No result; the encoder only writes the status.
    None,
    /// A named struct in the service package.
    Struct { name: String },
    /// A bare value of this type, encoded as the body.
    Value { ty: DataType },
}

/// Result-side data for one endpoint.
#[derive(Debug, Clone)]
pub struct ResultData {
    pub kind: ResultKind,
    pub responses: Vec<ResponseData>,
}

impl ResultData {
    /// Whether the method returns data the encoder must marshal.
    pub fn is_present(&self) -> bool {
        !matches!(self.kind, ResultKind::None)
    }
}

/// One declared error and its response shape.
#[derive(Debug, Clone)]
pub struct ErrorData {
    /// Error name as declared.
    pub name: String,
    /// Service package type carrying the error.
    pub type_name: String,
    pub response: ResponseData,
}

/// Multipart decoder data for one endpoint.
#[derive(Debug, Clone)]
pub struct MultipartData {
    /// Decoder function type name.
    pub func_name: String,
    /// Constructor turning the user function into a decoder.
    pub init_name: String,
    /// Parameter name of the user function.
    pub var_name: String,
}

/// One verb + pattern pair of an endpoint.
#[derive(Debug, Clone)]
pub struct RouteData {
    pub verb: String,
    pub path: String,
}

/// A static file mount of a service.
#[derive(Debug, Clone)]
pub struct FileServerData {
    pub file_path: String,
    pub request_paths: Vec<String>,
    pub is_dir: bool,
    pub mount_handler: String,
}

/// A field of a generated wire body struct.
#[derive(Debug, Clone)]
pub struct BodyField {
    /// Wire name (JSON member).
    pub name: String,
    /// Go field name.
    pub field_name: String,
    pub ty: DataType,
    /// Whether the generated field is pointer-typed.
    pub pointer: bool,
    /// Whether the design requires the attribute.
    pub required: bool,
    pub default: Option<DefaultValue>,
    pub validation: Option<Validation>,
    pub description: Option<String>,
}

/// Which section a body type declaration belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Request,
    Response,
    Error,
    /// A named type referenced from other bodies.
    Attribute,
}

/// A generated wire type: declaration, constructor, validations.
#[derive(Debug, Clone)]
pub struct TypeData {
    /// Declared Go type name.
    pub var_name: String,
    pub description: String,
    pub fields: Vec<BodyField>,
    pub init: Option<InitData>,
    pub kind: BodyKind,
}

impl TypeData {
    /// Whether the type needs a Validate method.
    pub fn must_validate(&self) -> bool {
        self.fields
            .iter()
            .any(|f| (f.required && f.pointer) || f.validation.is_some())
    }
}

/// Template-facing data for one HTTP endpoint.
#[derive(Debug, Clone)]
pub struct EndpointData {
    pub service_name: String,
    /// Service package alias in emitted imports.
    pub service_pkg: String,
    pub method_name: String,
    /// Exported method identifier.
    pub method_var_name: String,
    pub description: String,
    pub routes: Vec<RouteData>,
    pub mount_handler: String,
    pub handler_init: String,
    pub request_decoder: String,
    pub response_encoder: String,
    /// Present only when the endpoint declares errors.
    pub error_encoder: Option<String>,
    pub payload: PayloadData,
    pub result: ResultData,
    pub errors: Vec<ErrorData>,
    pub multipart: Option<MultipartData>,
}

/// Template-facing data for one service.
#[derive(Debug, Clone)]
pub struct ServiceData {
    pub name: String,
    /// snake_case form used in paths.
    pub snake: String,
    /// Go package alias for the generated service package.
    pub pkg_name: String,
    pub description: String,
    pub server_struct: String,
    pub mount_point_struct: String,
    pub server_init: String,
    pub server_service: String,
    pub mount_server: String,
    pub endpoints: Vec<EndpointData>,
    pub file_servers: Vec<FileServerData>,
    /// Wire body types in emission order, deduplicated by name.
    pub body_types: Vec<TypeData>,
    /// Shared transform helpers in emission order, deduplicated by name.
    pub transform_helpers: Vec<TransformHelperData>,
}

impl ServiceData {
    /// Look up a body type by declared name.
    pub fn body_type(&self, name: &str) -> Option<&TypeData> {
        self.body_types.iter().find(|t| t.var_name == name)
    }
}

/// Host configuration data surfaced to downstream tooling.
#[derive(Debug, Clone)]
pub struct UriData {
    /// URI scheme.
    pub scheme: String,
    /// Authority and path with `{var}` segments intact.
    pub authority: String,
}

/// A typed host variable with preserved constraints.
#[derive(Debug, Clone)]
pub struct VariableData {
    pub name: String,
    pub ty: Primitive,
    pub default: Option<DefaultValue>,
    /// Allowed values, preserved from the declared enum validation.
    pub enum_values: Vec<DefaultValue>,
}

/// One host of a server.
#[derive(Debug, Clone)]
pub struct HostData {
    pub name: String,
    pub uris: Vec<UriData>,
    pub variables: Vec<VariableData>,
}

/// A server and the services it exposes.
#[derive(Debug, Clone)]
pub struct ServerData {
    pub name: String,
    /// Names of hosted services.
    pub services: Vec<String>,
    pub hosts: Vec<HostData>,
}
