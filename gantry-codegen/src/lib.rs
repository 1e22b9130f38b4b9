//! Core of the gantry HTTP transport generator.
//!
//! This crate turns a frozen design tree into the derived, template-facing
//! model consumed by language backends: it validates the tree, partitions
//! endpoint attributes into wire locations, plans wire conversions, and
//! synthesises the constructor descriptors that map between wire structs and
//! method payloads and results. Rendering to a concrete language lives in a
//! backend crate (e.g. `gantry-codegen-go`).

pub mod analysis;
pub mod builder;
pub mod pipeline;

mod error;
mod file;
mod imports;
mod naming;

pub use builder::{CodeBuilder, Indent};
pub use error::CodegenError;
pub use file::{LogicalFile, RenderedFile, Section, SectionKind};
pub use imports::{ImportCollector, ImportSpec};
pub use naming::{
    canonical_header_key, comment_text, to_camel_case, to_go_type_name, to_pascal_case,
    to_snake_case, NamingConvention, GO_NAMING,
};
