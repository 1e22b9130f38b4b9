//! The per-service types.go file: wire body declarations, constructors,
//! and validations.

use gantry_codegen::analysis::endpoint::{BodyField, BodyKind, ServiceData, TypeData};
use gantry_codegen::{CodeBuilder, ImportCollector, ImportSpec, LogicalFile, Section, SectionKind};
use gantry_design::DataType;

use crate::convert::validation_code;
use crate::files::ordered_imports;
use crate::transforms::render_init;
use crate::type_mapper::GoTypeMapper;

/// Renders `gen/http/<service>/server/types.go`.
pub struct TypesGo<'a> {
    data: &'a ServiceData,
    genpkg: &'a str,
}

impl<'a> TypesGo<'a> {
    pub fn new(data: &'a ServiceData, genpkg: &'a str) -> Self {
        Self { data, genpkg }
    }

    pub fn file(&self) -> LogicalFile {
        let svc = self.data;
        let svc_path = format!("{}/{}", self.genpkg, svc.snake);
        let mapper = GoTypeMapper::new(svc.pkg_name.clone());
        let mut needs = ImportCollector::new();

        let mut file = LogicalFile::new(
            format!("gen/http/{}/server/types.go", svc.snake),
            format!("{} HTTP server types", svc.name),
            "server",
        );

        let section_for = |kind: BodyKind| match kind {
            BodyKind::Request => SectionKind::RequestBodyTypeDecl,
            BodyKind::Response => SectionKind::ResponseServerBody,
            BodyKind::Error => SectionKind::ErrorBodyTypeDecl,
            BodyKind::Attribute => SectionKind::ServerBodyAttributes,
        };

        // Declarations, grouped by role in a fixed order.
        for kind in [
            BodyKind::Request,
            BodyKind::Response,
            BodyKind::Error,
            BodyKind::Attribute,
        ] {
            for ty in svc.body_types.iter().filter(|t| t.kind == kind) {
                file.push(Section::new(section_for(kind), type_decl(&mapper, ty)));
            }
        }

        // Body constructors.
        for ty in &svc.body_types {
            if let Some(init) = &ty.init {
                needs.add(ImportSpec::aliased(svc_path.clone(), svc.pkg_name.clone()));
                file.push(Section::new(
                    SectionKind::ServerBodyInit,
                    render_init(&mut needs, &mapper, init),
                ));
            }
        }

        // Payload constructors.
        for ep in &svc.endpoints {
            if let Some(init) = &ep.payload.request.payload_init {
                needs.add(ImportSpec::aliased(svc_path.clone(), svc.pkg_name.clone()));
                file.push(Section::new(
                    SectionKind::ServerPayloadInit,
                    render_init(&mut needs, &mapper, init),
                ));
            }
        }

        // Validate methods.
        for ty in &svc.body_types {
            if ty.must_validate() {
                file.push(Section::new(
                    SectionKind::ServerValidate,
                    validate_method(&mut needs, ty),
                ));
            }
        }

        file.imports = ordered_imports(&needs, &svc_path);
        file
    }
}

fn field_suffix(ty: &TypeData) -> &'static str {
    if ty.var_name.ends_with("RequestBody") {
        "RequestBody"
    } else {
        "ResponseBody"
    }
}

fn type_decl(mapper: &GoTypeMapper, ty: &TypeData) -> String {
    let suffix = field_suffix(ty);
    let mut b = CodeBuilder::go()
        .comment(&ty.description)
        .line(&format!("type {} struct {{", ty.var_name))
        .indent();
    for field in &ty.fields {
        if let Some(description) = &field.description {
            b = b.comment(description);
        }
        let base = mapper.body_type_ref(&field.ty, suffix);
        let field_ty = mapper.maybe_ptr(&base, field.pointer);
        b = b.line(&format!(
            "{} {} `{}`",
            field.field_name,
            field_ty,
            field_tag(field)
        ));
    }
    b.dedent().line("}").build()
}

fn field_tag(field: &BodyField) -> String {
    let name = &field.name;
    if field.required {
        format!(
            "form:\"{0}\" json:\"{0}\" xml:\"{0}\"",
            name
        )
    } else {
        format!(
            "form:\"{0},omitempty\" json:\"{0},omitempty\" xml:\"{0},omitempty\"",
            name
        )
    }
}

fn validate_method(needs: &mut ImportCollector, ty: &TypeData) -> String {
    let mut b = CodeBuilder::go()
        .comment(&format!(
            "Validate runs the validations defined on {}",
            ty.var_name
        ))
        .line(&format!(
            "func (body *{}) Validate() (err error) {{",
            ty.var_name
        ))
        .indent();

    for field in &ty.fields {
        if field.required && field.pointer {
            needs.add(ImportSpec::aliased("goa.design/goa", "goa"));
            b = b
                .line(&format!("if body.{} == nil {{", field.field_name))
                .indent()
                .line(&format!(
                    "err = goa.MergeErrors(err, goa.MissingFieldError(\"{}\", \"body\"))",
                    field.name
                ))
                .dedent()
                .line("}");
        }
        if let Some(validation) = &field.validation {
            let target = format!("body.{}", field.field_name);
            let name = format!("body.{}", field.name);
            let code = validation_code(needs, &name, &target, &field.ty, validation, field.pointer);
            let nilable = field.pointer
                || matches!(field.ty, DataType::Array(_) | DataType::Map { .. });
            if nilable && (field.pointer || !field.required) {
                b = b
                    .line(&format!("if body.{} != nil {{", field.field_name))
                    .indent()
                    .lines(code.trim_end())
                    .dedent()
                    .line("}");
            } else {
                b = b.lines(code.trim_end());
            }
        }
    }

    b.line("return").dedent().line("}").build()
}
