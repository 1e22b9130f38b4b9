//! Derivation of template-facing data from the design tree.
//!
//! Binding analysis partitions endpoint attributes into wire locations;
//! conversion planning picks a wire-conversion strategy per primitive;
//! transform synthesis describes the constructors mapping wire structs to
//! method payloads and results; the registry aggregates everything per
//! service.

pub mod binding;
pub mod conversion;
pub mod endpoint;
pub mod transform;

mod registry;

pub use binding::{ParamClass, ParamMode};
pub use registry::ServiceRegistry;
