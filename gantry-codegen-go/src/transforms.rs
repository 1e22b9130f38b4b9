//! Rendering of constructor descriptors and transform helpers.

use gantry_codegen::analysis::transform::{
    FieldMapping, HelperDirection, InitData, InitSource, MappingKind, TransformHelperData,
};
use gantry_codegen::{CodeBuilder, ImportCollector};
use gantry_design::DataType;

use crate::convert::default_literal;
use crate::type_mapper::GoTypeMapper;

/// The Go type reference of a constructor argument.
fn arg_ref(mapper: &GoTypeMapper, ty: &DataType, pointer: bool, service_scoped: bool) -> String {
    let base = match ty {
        DataType::Named(name) if service_scoped => {
            return mapper.maybe_ptr(&format!("{}.{}", mapper.pkg(), name), true);
        }
        DataType::Named(name) => name.clone(),
        other => mapper.type_ref(other),
    };
    mapper.maybe_ptr(&base, pointer)
}

/// The element type reference used when preallocating a helper target slice.
fn helper_elem_ref(mapper: &GoTypeMapper, elem: &DataType, direction: HelperDirection) -> String {
    match direction {
        HelperDirection::Unmarshal => mapper.type_ref(elem),
        HelperDirection::Marshal => mapper.body_type_ref(elem, "ResponseBody"),
    }
}

/// Split mappings into struct-literal lines and post-literal statements.
fn render_mappings(
    mappings: &[FieldMapping],
    src: &str,
    dst: &str,
    mapper: &GoTypeMapper,
    direction: HelperDirection,
) -> (Vec<String>, String) {
    let mut literal = Vec::new();
    let mut post = CodeBuilder::go();

    for m in mappings {
        let source = format!("{}.{}", src, m.source_field);
        let target = format!("{}.{}", dst, m.field);
        match &m.kind {
            MappingKind::Direct => literal.push(format!("{}: {},", m.field, source)),
            MappingKind::Deref => literal.push(format!("{}: *{},", m.field, source)),
            MappingKind::DerefOrDefault(default) => {
                post = post
                    .line(&format!("if {} != nil {{", source))
                    .indent()
                    .line(&format!("{} = *{}", target, source))
                    .dedent()
                    .line("} else {")
                    .indent()
                    .line(&format!(
                        "{} = {}",
                        target,
                        default_literal(&m.ty, default, mapper)
                    ))
                    .dedent()
                    .line("}");
            }
            MappingKind::LoopCopy => {
                let guarded = !m.required;
                if guarded {
                    post = post.line(&format!("if {} != nil {{", source)).indent();
                }
                post = match &m.ty {
                    DataType::Map { .. } => post
                        .line(&format!(
                            "{} = make({}, len({}))",
                            target,
                            mapper.type_ref(&m.ty),
                            source
                        ))
                        .line(&format!("for k, val := range {} {{", source))
                        .indent()
                        .line(&format!("{}[k] = val", target))
                        .dedent()
                        .line("}"),
                    _ => post
                        .line(&format!(
                            "{} = make({}, len({}))",
                            target,
                            mapper.type_ref(&m.ty),
                            source
                        ))
                        .line(&format!("for i, val := range {} {{", source))
                        .indent()
                        .line(&format!("{}[i] = val", target))
                        .dedent()
                        .line("}"),
                };
                if guarded {
                    post = post.dedent().line("}");
                }
            }
            MappingKind::Helper(name) => {
                if m.required {
                    post = post.line(&format!("{} = {}({})", target, name, source));
                } else {
                    post = post
                        .line(&format!("if {} != nil {{", source))
                        .indent()
                        .line(&format!("{} = {}({})", target, name, source))
                        .dedent()
                        .line("}");
                }
            }
            MappingKind::LoopHelper(name) => {
                let elem = m.ty.elem().cloned().unwrap_or(m.ty.clone());
                let elem_ref = helper_elem_ref(mapper, &elem, direction);
                let guarded = !m.required;
                if guarded {
                    post = post.line(&format!("if {} != nil {{", source)).indent();
                }
                post = post
                    .line(&format!(
                        "{} = make([]{}, len({}))",
                        target, elem_ref, source
                    ))
                    .line(&format!("for i, val := range {} {{", source))
                    .indent()
                    .line(&format!("{}[i] = {}(val)", target, name))
                    .dedent()
                    .line("}");
                if guarded {
                    post = post.dedent().line("}");
                }
            }
        }
    }

    (literal, post.build())
}

/// Render a constructor function from its descriptor.
pub fn render_init(_imports: &mut ImportCollector, mapper: &GoTypeMapper, init: &InitData) -> String {
    let args: Vec<String> = init
        .args
        .iter()
        .map(|a| {
            format!(
                "{} {}",
                a.name,
                arg_ref(mapper, &a.ty, a.pointer, a.service_scoped)
            )
        })
        .collect();
    let ret = if init.return_in_service_pkg {
        mapper.service_ref(&init.return_type_name)
    } else {
        format!("*{}", init.return_type_name)
    };
    let ret_literal = ret.trim_start_matches('*');

    let mut b = CodeBuilder::go().comment(&init.description).line(&format!(
        "func {}({}) {} {{",
        init.name,
        args.join(", "),
        ret
    ));
    b = b.indent();

    let (target, direction, mappings) = match &init.source {
        InitSource::Body { mappings } => ("v", HelperDirection::Unmarshal, mappings.as_slice()),
        InitSource::Result { mappings } => ("body", HelperDirection::Marshal, mappings.as_slice()),
        InitSource::WrappedBody => {
            let attr = init
                .return_type_attribute
                .as_deref()
                .expect("wrapped body init without attribute");
            let body_ref = init
                .args
                .first()
                .map(|a| {
                    if a.take_ref {
                        format!("&{}", a.name)
                    } else {
                        a.name.clone()
                    }
                })
                .unwrap_or_else(|| "body".to_string());
            b = b
                .line(&format!("res := &{}{{", ret_literal))
                .indent()
                .line(&format!("{}: {},", attr, body_ref))
                .dedent()
                .line("}");
            for arg in init.args.iter().filter(|a| a.field_name.is_some()) {
                let field = arg.field_name.as_deref().unwrap();
                let amp = if arg.take_ref { "&" } else { "" };
                b = b.line(&format!("res.{} = {}{}", field, amp, arg.name));
            }
            return b.line("return res").dedent().line("}").build();
        }
    };

    let src = init
        .args
        .first()
        .filter(|a| a.field_name.is_none())
        .map(|a| a.name.as_str())
        .unwrap_or("res");
    let (literal, post) = render_mappings(mappings, src, target, mapper, direction);

    b = b.line(&format!("{} := &{}{{", target, ret_literal)).indent();
    for line in literal {
        b = b.line(&line);
    }
    b = b.dedent().line("}");
    if !post.is_empty() {
        b = b.lines(post.trim_end());
    }
    for arg in init.args.iter().filter(|a| a.field_name.is_some()) {
        let field = arg.field_name.as_deref().unwrap();
        let amp = if arg.take_ref { "&" } else { "" };
        b = b.line(&format!("{}.{} = {}{}", target, field, amp, arg.name));
    }
    b.line(&format!("return {}", target))
        .dedent()
        .line("}")
        .build()
}

/// Render a shared transform helper.
pub fn render_helper(mapper: &GoTypeMapper, helper: &TransformHelperData) -> String {
    let (param_ref, result_ref) = match helper.direction {
        HelperDirection::Unmarshal => (
            format!("*{}", helper.body_type_name),
            mapper.service_ref(&helper.service_type_name),
        ),
        HelperDirection::Marshal => (
            mapper.service_ref(&helper.service_type_name),
            format!("*{}", helper.body_type_name),
        ),
    };
    let result_literal = result_ref.trim_start_matches('*').to_string();
    let (literal, post) =
        render_mappings(&helper.mappings, "v", "res", mapper, helper.direction);

    let mut b = CodeBuilder::go()
        .comment(&format!(
            "{} builds a value of type {} from a value of type {}.",
            helper.name, result_ref, param_ref
        ))
        .line(&format!(
            "func {}(v {}) {} {{",
            helper.name, param_ref, result_ref
        ))
        .indent()
        .line(&format!("res := &{}{{", result_literal))
        .indent();
    for line in literal {
        b = b.line(&line);
    }
    b = b.dedent().line("}");
    if !post.is_empty() {
        b = b.lines(post.trim_end());
    }
    b.line("return res").dedent().line("}").build()
}

#[cfg(test)]
mod tests {
    use gantry_codegen::analysis::transform::InitArg;
    use gantry_design::{DefaultValue, Primitive};

    use super::*;

    fn mapper() -> GoTypeMapper {
        GoTypeMapper::new("service")
    }

    fn prim(p: Primitive) -> DataType {
        DataType::Primitive(p)
    }

    #[test]
    fn test_payload_init_from_body_and_params() {
        let init = InitData {
            name: "NewShowPayload".into(),
            description: "NewShowPayload builds a Service service Show endpoint payload.".into(),
            args: vec![
                InitArg {
                    name: "body".into(),
                    ty: DataType::Named("ShowRequestBody".into()),
                    pointer: true,
                    take_ref: false,
                    service_scoped: false,
                    field_name: None,
                },
                InitArg {
                    name: "id".into(),
                    ty: prim(Primitive::Int),
                    pointer: false,
                    take_ref: false,
                    service_scoped: false,
                    field_name: Some("ID".into()),
                },
                InitArg {
                    name: "view".into(),
                    ty: prim(Primitive::String),
                    pointer: true,
                    take_ref: false,
                    service_scoped: false,
                    field_name: Some("View".into()),
                },
            ],
            return_type_name: "ShowPayload".into(),
            return_in_service_pkg: true,
            return_is_struct: true,
            return_type_attribute: None,
            source: InitSource::Body {
                mappings: vec![FieldMapping {
                    field: "Name".into(),
                    source_field: "Name".into(),
                    ty: prim(Primitive::String),
                    required: true,
                    kind: MappingKind::Deref,
                }],
            },
        };

        let mut imports = ImportCollector::new();
        let code = render_init(&mut imports, &mapper(), &init);
        assert!(code.contains(
            "func NewShowPayload(body *ShowRequestBody, id int, view *string) *service.ShowPayload {"
        ));
        assert!(code.contains("v := &service.ShowPayload{"));
        assert!(code.contains("Name: *body.Name,"));
        assert!(code.contains("v.ID = id"));
        assert!(code.contains("v.View = view"));
        assert!(code.contains("return v"));
    }

    #[test]
    fn test_init_with_default_branch() {
        let init = InitData {
            name: "NewListPayload".into(),
            description: "NewListPayload builds a payload.".into(),
            args: vec![InitArg {
                name: "body".into(),
                ty: DataType::Named("ListRequestBody".into()),
                pointer: true,
                take_ref: false,
                service_scoped: false,
                field_name: None,
            }],
            return_type_name: "ListPayload".into(),
            return_in_service_pkg: true,
            return_is_struct: true,
            return_type_attribute: None,
            source: InitSource::Body {
                mappings: vec![FieldMapping {
                    field: "Page".into(),
                    source_field: "Page".into(),
                    ty: prim(Primitive::Int),
                    required: false,
                    kind: MappingKind::DerefOrDefault(DefaultValue::Int(1)),
                }],
            },
        };

        let mut imports = ImportCollector::new();
        let code = render_init(&mut imports, &mapper(), &init);
        assert!(code.contains("if body.Page != nil {"));
        assert!(code.contains("v.Page = *body.Page"));
        assert!(code.contains("v.Page = 1"));
    }

    #[test]
    fn test_wrapped_body_init() {
        let init = InitData {
            name: "NewRatePayload".into(),
            description: "NewRatePayload builds a payload.".into(),
            args: vec![
                InitArg {
                    name: "body".into(),
                    ty: DataType::array(prim(Primitive::String)),
                    pointer: false,
                    take_ref: false,
                    service_scoped: false,
                    field_name: None,
                },
                InitArg {
                    name: "id".into(),
                    ty: prim(Primitive::Int),
                    pointer: false,
                    take_ref: false,
                    service_scoped: false,
                    field_name: Some("ID".into()),
                },
            ],
            return_type_name: "RatePayload".into(),
            return_in_service_pkg: true,
            return_is_struct: true,
            return_type_attribute: Some("Items".into()),
            source: InitSource::WrappedBody,
        };

        let mut imports = ImportCollector::new();
        let code = render_init(&mut imports, &mapper(), &init);
        assert!(code.contains("res := &service.RatePayload{"));
        assert!(code.contains("Items: body,"));
        assert!(code.contains("res.ID = id"));
        assert!(code.contains("return res"));
    }

    #[test]
    fn test_response_body_init_with_loop_copy() {
        let init = InitData {
            name: "NewShowResponseBody".into(),
            description: "NewShowResponseBody builds the HTTP response body.".into(),
            args: vec![InitArg {
                name: "res".into(),
                ty: DataType::Named("ShowResult".into()),
                pointer: true,
                take_ref: false,
                service_scoped: true,
                field_name: None,
            }],
            return_type_name: "ShowResponseBody".into(),
            return_in_service_pkg: false,
            return_is_struct: true,
            return_type_attribute: None,
            source: InitSource::Result {
                mappings: vec![
                    FieldMapping {
                        field: "ID".into(),
                        source_field: "ID".into(),
                        ty: prim(Primitive::Int),
                        required: true,
                        kind: MappingKind::Direct,
                    },
                    FieldMapping {
                        field: "Tags".into(),
                        source_field: "Tags".into(),
                        ty: DataType::array(prim(Primitive::String)),
                        required: false,
                        kind: MappingKind::LoopCopy,
                    },
                ],
            },
        };

        let mut imports = ImportCollector::new();
        let code = render_init(&mut imports, &mapper(), &init);
        assert!(code.contains("func NewShowResponseBody(res *service.ShowResult) *ShowResponseBody {"));
        assert!(code.contains("body := &ShowResponseBody{"));
        assert!(code.contains("ID: res.ID,"));
        assert!(code.contains("if res.Tags != nil {"));
        assert!(code.contains("body.Tags = make([]string, len(res.Tags))"));
        assert!(code.contains("return body"));
    }

    #[test]
    fn test_helper_rendering() {
        let helper = TransformHelperData {
            name: "unmarshalRecordRequestBodyToServiceRecord".into(),
            direction: HelperDirection::Unmarshal,
            body_type_name: "RecordRequestBody".into(),
            service_type_name: "Record".into(),
            mappings: vec![FieldMapping {
                field: "Value".into(),
                source_field: "Value".into(),
                ty: prim(Primitive::String),
                required: true,
                kind: MappingKind::Deref,
            }],
        };

        let code = render_helper(&mapper(), &helper);
        assert!(code.contains(
            "func unmarshalRecordRequestBodyToServiceRecord(v *RecordRequestBody) *service.Record {"
        ));
        assert!(code.contains("res := &service.Record{"));
        assert!(code.contains("Value: *v.Value,"));
        assert!(code.contains("return res"));
    }
}
