//! Typed generator errors.

use thiserror::Error;

/// Errors raised by analysis and assembly.
///
/// Unsupported primitives are not an error variant; they surface as warning
/// diagnostics and an `// unsupported type` comment in the emitted code.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// An invariant violation in the design tree. Fatal for the service.
    #[error("design error in service {service}: {message}")]
    Design { service: String, message: String },

    /// An attribute bound to more than one wire location. Fatal for the
    /// endpoint.
    #[error("binding conflict in endpoint {endpoint}: attribute {attribute} bound to both query and header")]
    BindingConflict { endpoint: String, attribute: String },

    /// A rendering helper precondition was violated. Generator bug.
    #[error("template error: {0}")]
    Template(String),
}
