//! Logical files assembled from ordered sections.

use crate::imports::ImportCollector;

/// The closed set of section roles a backend can emit.
///
/// Dispatch on section kind is an ordinary match; there is no reflective
/// template lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    ServerStruct,
    ServerMountPoint,
    ServerInit,
    ServerService,
    ServerMount,
    ServerHandler,
    ServerHandlerInit,
    ServerFiles,
    RequestDecoder,
    ResponseEncoder,
    ErrorEncoder,
    MultipartRequestDecoderType,
    MultipartRequestDecoder,
    ServerTransformHelper,
    RequestBodyTypeDecl,
    ResponseServerBody,
    ErrorBodyTypeDecl,
    ServerBodyAttributes,
    ServerBodyInit,
    ServerPayloadInit,
    ServerValidate,
}

/// A rendered section of a logical file.
#[derive(Debug, Clone)]
pub struct Section {
    /// The section role.
    pub kind: SectionKind,
    /// Rendered content, without trailing blank lines.
    pub content: String,
}

impl Section {
    /// Create a section, trimming trailing whitespace.
    pub fn new(kind: SectionKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into().trim_end().to_string(),
        }
    }
}

/// A logical output file: header, import block, ordered sections.
#[derive(Debug, Clone)]
pub struct LogicalFile {
    /// Relative output path, deterministic.
    pub path: String,
    /// Title rendered into the generated-code header comment.
    pub title: String,
    /// Go package name.
    pub package: String,
    /// Collapsed import requirements of all sections.
    pub imports: ImportCollector,
    /// Sections in emission order.
    pub sections: Vec<Section>,
}

impl LogicalFile {
    /// Create an empty logical file.
    pub fn new(
        path: impl Into<String>,
        title: impl Into<String>,
        package: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            package: package.into(),
            imports: ImportCollector::new(),
            sections: Vec::new(),
        }
    }

    /// Append a section, skipping empty content.
    pub fn push(&mut self, section: Section) {
        if !section.content.is_empty() {
            self.sections.push(section);
        }
    }

    /// Render the file: header, package clause, imports, then sections
    /// separated by blank lines.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("// Code generated by gantry, DO NOT EDIT.\n");
        out.push_str("//\n");
        out.push_str(&format!("// {}\n", self.title));
        out.push('\n');
        out.push_str(&format!("package {}\n", self.package));
        if !self.imports.is_empty() {
            out.push('\n');
            out.push_str(&self.imports.render());
            out.push('\n');
        }
        for section in &self.sections {
            out.push('\n');
            out.push_str(&section.content);
            out.push('\n');
        }
        out
    }

    /// Render into a path/content pair.
    pub fn rendered(&self) -> RenderedFile {
        RenderedFile {
            path: self.path.clone(),
            content: self.render(),
        }
    }
}

/// A rendered output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Relative output path.
    pub path: String,
    /// File content.
    pub content: String,
}
