//! Design tree for the gantry HTTP transport generator.
//!
//! The tree is produced by an external DSL front-end and handed to the
//! generator as a frozen value. The generator only ever reads it.
//!
//! # Architecture
//!
//! ```text
//! DSL front-end → DesignRoot (frozen) → Pipeline (analysis) → Generator (codegen)
//! ```

mod http;
mod root;
mod service;
mod types;

pub use http::{
    BodyBinding, ErrorDecl, FileServer, HttpEndpoint, HttpService, ResponseDecl, Route,
};
pub use root::{Api, DesignRoot, Host, ServerDecl, Uri, UriVariable, UserType};
pub use service::{Method, Service};
pub use types::{Attribute, DataType, DefaultValue, Primitive, Validation};
