//! Go backend for the gantry HTTP transport generator.
//!
//! Renders the derived registry produced by `gantry-codegen` into Go source
//! files: one `server.go`, `encode_decode.go`, and `types.go` per service.

mod generator;
mod type_mapper;

pub mod convert;
pub mod files;
pub mod transforms;

pub use gantry_codegen::{pipeline::Pipeline, RenderedFile};
pub use generator::Generator;
pub use type_mapper::{status_expr, GoTypeMapper};
