//! Go type references for design types.

use gantry_design::{DataType, Primitive};

/// Renders design types as Go type references.
///
/// Named types resolve either into the generated service package or into
/// the local server package (wire body types), depending on context.
#[derive(Debug, Clone)]
pub struct GoTypeMapper {
    /// Alias of the generated service package.
    pkg: String,
}

impl GoTypeMapper {
    pub fn new(pkg: impl Into<String>) -> Self {
        Self { pkg: pkg.into() }
    }

    /// The service package alias.
    pub fn pkg(&self) -> &str {
        &self.pkg
    }

    /// The Go name of a primitive.
    pub fn primitive(&self, p: Primitive) -> &'static str {
        match p {
            Primitive::Int => "int",
            Primitive::Int32 => "int32",
            Primitive::Int64 => "int64",
            Primitive::UInt => "uint",
            Primitive::UInt32 => "uint32",
            Primitive::UInt64 => "uint64",
            Primitive::Float32 => "float32",
            Primitive::Float64 => "float64",
            Primitive::Bool => "bool",
            Primitive::String => "string",
            Primitive::Bytes => "[]byte",
            Primitive::Any => "interface{}",
        }
    }

    /// Type reference with named types resolved into the service package.
    pub fn type_ref(&self, ty: &DataType) -> String {
        match ty {
            DataType::Primitive(p) => self.primitive(*p).to_string(),
            DataType::Array(elem) => format!("[]{}", self.type_ref(elem)),
            DataType::Map { key, elem } => {
                format!("map[{}]{}", self.type_ref(key), self.type_ref(elem))
            }
            DataType::Named(name) => format!("*{}.{}", self.pkg, name),
            DataType::Object(_) => "interface{}".to_string(),
        }
    }

    /// Type reference with named types resolved into local wire body types
    /// carrying the given suffix ("RequestBody" or "ResponseBody").
    pub fn body_type_ref(&self, ty: &DataType, suffix: &str) -> String {
        match ty {
            DataType::Primitive(p) => self.primitive(*p).to_string(),
            DataType::Array(elem) => format!("[]{}", self.body_type_ref(elem, suffix)),
            DataType::Map { key, elem } => format!(
                "map[{}]{}",
                self.body_type_ref(key, suffix),
                self.body_type_ref(elem, suffix)
            ),
            DataType::Named(name) => format!("*{}{}", name, suffix),
            DataType::Object(_) => "interface{}".to_string(),
        }
    }

    /// Reference of a named service type (e.g. `*storage.Record`).
    pub fn service_ref(&self, name: &str) -> String {
        format!("*{}.{}", self.pkg, name)
    }

    /// Wrap a reference in a pointer when `pointer` is set.
    pub fn maybe_ptr(&self, inner: &str, pointer: bool) -> String {
        if pointer {
            format!("*{}", inner)
        } else {
            inner.to_string()
        }
    }
}

/// The Go expression for an HTTP status code, preferring the named
/// constants of net/http.
pub fn status_expr(code: u16) -> String {
    let name = match code {
        200 => Some("StatusOK"),
        201 => Some("StatusCreated"),
        202 => Some("StatusAccepted"),
        204 => Some("StatusNoContent"),
        301 => Some("StatusMovedPermanently"),
        302 => Some("StatusFound"),
        304 => Some("StatusNotModified"),
        400 => Some("StatusBadRequest"),
        401 => Some("StatusUnauthorized"),
        403 => Some("StatusForbidden"),
        404 => Some("StatusNotFound"),
        409 => Some("StatusConflict"),
        410 => Some("StatusGone"),
        412 => Some("StatusPreconditionFailed"),
        413 => Some("StatusRequestEntityTooLarge"),
        415 => Some("StatusUnsupportedMediaType"),
        422 => Some("StatusUnprocessableEntity"),
        500 => Some("StatusInternalServerError"),
        501 => Some("StatusNotImplemented"),
        502 => Some("StatusBadGateway"),
        503 => Some("StatusServiceUnavailable"),
        504 => Some("StatusGatewayTimeout"),
        _ => None,
    };
    match name {
        Some(name) => format!("http.{}", name),
        None => code.to_string(),
    }
}
