//! The per-service encode_decode.go file: request decoders, response and
//! error encoders, transform helpers.

use gantry_codegen::analysis::binding::{ParamClass, ParamMode};
use gantry_codegen::analysis::endpoint::{
    EndpointData, ErrorData, HeaderData, ParamData, ParamLocation, ResponseData, ResultKind,
    ServerBody, ServiceData,
};
use gantry_codegen::{CodeBuilder, ImportCollector, ImportSpec, LogicalFile, Section, SectionKind};
use gantry_design::{DataType, Primitive};
use indexmap::IndexMap;

use crate::convert::{
    default_literal, go_quote, header_conversion, map_conversion, path_slice_conversion,
    print_value, slice_conversion, type_conversion, validation_code,
};
use crate::files::{ordered_imports, payload_ref};
use crate::transforms::render_helper;
use crate::type_mapper::{status_expr, GoTypeMapper};

/// Renders `gen/http/<service>/server/encode_decode.go`.
pub struct EncodeDecodeGo<'a> {
    data: &'a ServiceData,
    genpkg: &'a str,
}

impl<'a> EncodeDecodeGo<'a> {
    pub fn new(data: &'a ServiceData, genpkg: &'a str) -> Self {
        Self { data, genpkg }
    }

    pub fn file(&self) -> LogicalFile {
        let svc = self.data;
        let svc_path = format!("{}/{}", self.genpkg, svc.snake);
        let mapper = GoTypeMapper::new(svc.pkg_name.clone());
        let mut needs = ImportCollector::new();
        needs.add(ImportSpec::new("context"));
        needs.add(ImportSpec::new("net/http"));
        needs.add(ImportSpec::aliased("goa.design/goa/http", "goahttp"));

        let mut file = LogicalFile::new(
            format!("gen/http/{}/server/encode_decode.go", svc.snake),
            format!("{} HTTP server encoders and decoders", svc.name),
            "server",
        );

        for ep in &svc.endpoints {
            file.push(Section::new(
                SectionKind::ResponseEncoder,
                response_encoder(&mut needs, &mapper, ep, &svc_path, &svc.pkg_name),
            ));
            if ep.payload.is_present() {
                file.push(Section::new(
                    SectionKind::RequestDecoder,
                    request_decoder(&mut needs, &mapper, ep, &svc_path, &svc.pkg_name),
                ));
            }
            if let Some(multipart) = &ep.multipart {
                needs.add(ImportSpec::aliased(svc_path.clone(), svc.pkg_name.clone()));
                file.push(Section::new(
                    SectionKind::MultipartRequestDecoder,
                    multipart_decoder(ep, multipart),
                ));
            }
            if ep.error_encoder.is_some() {
                file.push(Section::new(
                    SectionKind::ErrorEncoder,
                    error_encoder(&mut needs, &mapper, ep, &svc_path, &svc.pkg_name),
                ));
            }
        }
        for helper in &svc.transform_helpers {
            needs.add(ImportSpec::aliased(svc_path.clone(), svc.pkg_name.clone()));
            file.push(Section::new(
                SectionKind::ServerTransformHelper,
                render_helper(&mapper, helper),
            ));
        }

        file.imports = ordered_imports(&needs, &svc_path);
        file
    }
}

// ----------------------------------------------------------------------
// Response encoding
// ----------------------------------------------------------------------

fn response_encoder(
    needs: &mut ImportCollector,
    mapper: &GoTypeMapper,
    ep: &EndpointData,
    svc_path: &str,
    pkg: &str,
) -> String {
    let mut b = CodeBuilder::go()
        .comment(&format!(
            "{} returns an encoder for responses returned by the {} {} endpoint.",
            ep.response_encoder, ep.service_name, ep.method_name
        ))
        .line(&format!(
            "func {}(encoder func(context.Context, http.ResponseWriter) goahttp.Encoder) func(context.Context, http.ResponseWriter, interface{{}}) error {{",
            ep.response_encoder
        ))
        .indent()
        .line("return func(ctx context.Context, w http.ResponseWriter, v interface{}) error {")
        .indent();

    match &ep.result.kind {
        ResultKind::None => {
            let status = ep
                .result
                .responses
                .first()
                .map(|r| r.status_code)
                .unwrap_or(200);
            b = b
                .line(&format!("w.WriteHeader({})", status_expr(status)))
                .line("return nil");
        }
        ResultKind::Value { ty } => {
            let ref_ = mapper.type_ref(ty);
            if matches!(ty, DataType::Named(_)) {
                needs.add(ImportSpec::aliased(svc_path.to_string(), pkg.to_string()));
            }
            let status = ep
                .result
                .responses
                .first()
                .map(|r| r.status_code)
                .unwrap_or(200);
            b = b
                .line(&format!("res := v.({})", ref_))
                .line("enc := encoder(ctx, w)")
                .line(&format!("w.WriteHeader({})", status_expr(status)))
                .line("return enc.Encode(res)");
        }
        ResultKind::Struct { name } => {
            needs.add(ImportSpec::aliased(svc_path.to_string(), pkg.to_string()));
            b = b.line(&format!("res := v.({})", mapper.service_ref(name)));
            for resp in &ep.result.responses {
                let tagged = resp.tag.is_some();
                if let Some(tag) = &resp.tag {
                    let test = if tag.required {
                        format!("res.{} == {}", tag.field_name, go_quote(&tag.value))
                    } else {
                        format!(
                            "res.{} != nil && *res.{} == {}",
                            tag.field_name,
                            tag.field_name,
                            go_quote(&tag.value)
                        )
                    };
                    b = b.line(&format!("if {} {{", test)).indent();
                }
                b = render_response(needs, b, resp, tagged);
                b = match &resp.server_body {
                    Some(_) => b.line("return enc.Encode(body)"),
                    None => b.line("return nil"),
                };
                if tagged {
                    b = b.dedent().line("}");
                }
            }
            // A fully tagged response list cannot fall through validation,
            // but the compiler still needs a terminal return.
            if ep
                .result
                .responses
                .last()
                .map(|r| r.tag.is_some())
                .unwrap_or(true)
            {
                b = b.line("return nil");
            }
        }
    }

    b.dedent().line("}").dedent().line("}").build()
}

/// Emit encoder, body construction, headers, and status for one response.
fn render_response(
    needs: &mut ImportCollector,
    mut b: CodeBuilder,
    resp: &ResponseData,
    tagged: bool,
) -> CodeBuilder {
    if let Some(body) = &resp.server_body {
        b = b.line("enc := encoder(ctx, w)");
        b = match &body.init {
            Some(init) => b.line(&format!("body := {}(res)", init)),
            None => b.line("body := res"),
        };
    }
    for header in &resp.headers {
        b = render_response_header(needs, b, header, tagged);
    }
    b.line(&format!("w.WriteHeader({})", status_expr(resp.status_code)))
}

fn render_response_header(
    needs: &mut ImportCollector,
    mut b: CodeBuilder,
    header: &HeaderData,
    tagged: bool,
) -> CodeBuilder {
    let has_default = header.default.is_some();
    let check_nil = !tagged && (!header.required || has_default) && is_nilable(header);
    let is_string = header.ty.as_primitive() == Some(Primitive::String);

    if check_nil {
        b = b
            .line(&format!("if res.{} != nil {{", header.field_name))
            .indent();
    }
    if is_string {
        let deref = if header.required { "" } else { "*" };
        b = b.line(&format!(
            "w.Header().Set(\"{}\", {}res.{})",
            header.name, deref, header.field_name
        ));
    } else {
        let var = format!("{}s", header.var_name);
        let conv = header_conversion(needs, &var, "val", header.required, &header.ty);
        b = b
            .line(&format!("val := res.{}", header.field_name))
            .lines(conv.trim_end())
            .line(&format!("w.Header().Set(\"{}\", {})", header.name, var));
    }
    if check_nil {
        match &header.default {
            Some(default) => {
                b = b
                    .dedent()
                    .line("} else {")
                    .indent()
                    .line(&format!(
                        "w.Header().Set(\"{}\", \"{}\")",
                        header.name,
                        print_value(&header.ty, default)
                    ))
                    .dedent()
                    .line("}");
            }
            None => {
                b = b.dedent().line("}");
            }
        }
    }
    b
}

/// Whether the result field backing a header is represented as a nilable
/// Go value. Result struct fields hold pointers when not required (defaults
/// included, so generated code can detect unset values); slices and maps
/// are nilable implicitly.
fn is_nilable(header: &HeaderData) -> bool {
    match &header.ty {
        DataType::Primitive(_) => !header.required,
        _ => true,
    }
}

// ----------------------------------------------------------------------
// Request decoding
// ----------------------------------------------------------------------

fn request_decoder(
    needs: &mut ImportCollector,
    mapper: &GoTypeMapper,
    ep: &EndpointData,
    svc_path: &str,
    pkg: &str,
) -> String {
    let request = &ep.payload.request;
    let mut b = CodeBuilder::go()
        .comment(&format!(
            "{} returns a decoder for requests sent to the {} {} endpoint.",
            ep.request_decoder, ep.service_name, ep.method_name
        ))
        .line(&format!(
            "func {}(mux goahttp.Muxer, decoder func(*http.Request) goahttp.Decoder) func(*http.Request) (interface{{}}, error) {{",
            ep.request_decoder
        ))
        .indent()
        .line("return func(r *http.Request) (interface{}, error) {")
        .indent();

    // Body decode.
    if ep.multipart.is_some() {
        needs.add(ImportSpec::aliased("goa.design/goa", "goa"));
        needs.add(ImportSpec::aliased(svc_path.to_string(), pkg.to_string()));
        let ref_ = payload_ref(ep);
        b = b
            .line("var (")
            .indent()
            .line(&format!("body {}", ref_.trim_start_matches('*')))
            .line("err  error")
            .dedent()
            .line(")")
            .line("err = decoder(r).Decode(&body)")
            .line("if err != nil {")
            .indent()
            .line("return nil, goa.DecodePayloadError(err.Error())")
            .dedent()
            .line("}");
    } else if let Some(server_body) = &request.server_body {
        needs.add(ImportSpec::new("io"));
        needs.add(ImportSpec::aliased("goa.design/goa", "goa"));
        let body_type = match server_body {
            ServerBody::Type { name } => name.clone(),
            ServerBody::Value { ty } => mapper.type_ref(ty),
        };
        b = b
            .line("var (")
            .indent()
            .line(&format!("body {}", body_type))
            .line("err  error")
            .dedent()
            .line(")")
            .line("err = decoder(r).Decode(&body)")
            .line("if err != nil {")
            .indent()
            .line("if err == io.EOF {")
            .indent()
            .line("return nil, goa.MissingPayloadError()")
            .dedent()
            .line("}")
            .line("return nil, goa.DecodePayloadError(err.Error())")
            .dedent()
            .line("}");
        if request.body_has_validate {
            b = b
                .line("err = body.Validate()")
                .line("if err != nil {")
                .indent()
                .line("return nil, err")
                .dedent()
                .line("}");
        }
    }

    // Param variable declarations and decoding.
    let params: Vec<&ParamData> = request
        .path_params
        .iter()
        .chain(&request.query_params)
        .chain(&request.headers)
        .collect();
    if !params.is_empty() {
        b = b.line("var (").indent();
        for p in &params {
            b = b.line(&format!("{} {}", p.var_name, param_type_ref(mapper, p)));
        }
        if request.server_body.is_none() && ep.multipart.is_none() && request.must_validate {
            needs.add(ImportSpec::aliased("goa.design/goa", "goa"));
            b = b.line("err error");
        }
        if !request.path_params.is_empty() {
            b = b.line("params = mux.Vars(r)");
        }
        b = b.dedent().line(")");

        for p in &request.path_params {
            b = b.lines(decode_path_param(needs, mapper, p).trim_end());
            b = b.lines(param_validation(needs, p).trim_end());
        }
        for p in &request.query_params {
            b = b.lines(decode_query_param(needs, mapper, p).trim_end());
            b = b.lines(param_validation(needs, p).trim_end());
        }
        for p in &request.headers {
            b = b.lines(decode_header_param(needs, mapper, p).trim_end());
            b = b.lines(param_validation(needs, p).trim_end());
        }
    }

    if request.must_validate {
        b = b
            .line("if err != nil {")
            .indent()
            .line("return nil, err")
            .dedent()
            .line("}");
    }

    // Return value.
    if ep.multipart.is_some() {
        b = b.line("return &body, nil");
    } else if let Some(init) = &request.payload_init {
        needs.add(ImportSpec::aliased(svc_path.to_string(), pkg.to_string()));
        let args: Vec<String> = init
            .args
            .iter()
            .map(|arg| {
                if arg.field_name.is_none() && arg.pointer {
                    format!("&{}", arg.name)
                } else {
                    arg.name.clone()
                }
            })
            .collect();
        b = b.line(&format!("return {}({}), nil", init.name, args.join(", ")));
    } else if let Some(var) = &ep.payload.decoder_return_value {
        b = b.line(&format!("return {}, nil", var));
    } else {
        b = b.line("return body, nil");
    }

    b.dedent().line("}").dedent().line("}").build()
}

/// The declared Go type of a param variable.
fn param_type_ref(mapper: &GoTypeMapper, p: &ParamData) -> String {
    let base = mapper.type_ref(&p.ty);
    mapper.maybe_ptr(&base, p.is_pointer())
}

fn missing_field(needs: &mut ImportCollector, p: &ParamData) -> String {
    needs.add(ImportSpec::aliased("goa.design/goa", "goa"));
    format!(
        "err = goa.MergeErrors(err, goa.MissingFieldError(\"{}\", \"{}\"))",
        p.name,
        p.location.as_str()
    )
}

fn decode_path_param(needs: &mut ImportCollector, mapper: &GoTypeMapper, p: &ParamData) -> String {
    if p.ty.is_verbatim() {
        return CodeBuilder::go()
            .line(&format!("{} = params[\"{}\"]", p.var_name, p.name))
            .build();
    }
    let conversion = match p.class {
        ParamClass::StringSlice => CodeBuilder::go()
            .line(&format!(
                "{}RawSlice := strings.Split({}Raw, \",\")",
                p.var_name, p.var_name
            ))
            .line(&format!("{} = {}RawSlice", p.var_name, p.var_name))
            .build(),
        ParamClass::Slice => path_slice_conversion(needs, &p.var_name, &p.name, &p.ty, mapper),
        _ => match p.ty.as_primitive() {
            Some(prim) => type_conversion(needs, &p.var_name, &p.name, prim, false),
            None => format!("// unsupported type for var {}\n", p.var_name),
        },
    };
    if matches!(p.class, ParamClass::StringSlice) {
        needs.add(ImportSpec::new("strings"));
    }
    CodeBuilder::go()
        .line("{")
        .indent()
        .line(&format!("{}Raw := params[\"{}\"]", p.var_name, p.name))
        .lines(conversion.trim_end())
        .dedent()
        .line("}")
        .build()
}

fn decode_query_param(needs: &mut ImportCollector, mapper: &GoTypeMapper, p: &ParamData) -> String {
    decode_multi_source_param(needs, mapper, p, &QuerySource)
}

fn decode_header_param(
    needs: &mut ImportCollector,
    mapper: &GoTypeMapper,
    p: &ParamData,
) -> String {
    decode_multi_source_param(needs, mapper, p, &HeaderSource)
}

/// How a wire location is read in the generated decoder.
trait ParamSource {
    /// Expression for a single raw value.
    fn get(&self, p: &ParamData) -> String;
    /// Expression for the raw multi-value list.
    fn get_all(&self, p: &ParamData) -> String;
    /// Expression for the full multi-map, when supported.
    fn multi_map(&self) -> Option<&'static str>;
}

struct QuerySource;
impl ParamSource for QuerySource {
    fn get(&self, p: &ParamData) -> String {
        format!("r.URL.Query().Get(\"{}\")", p.name)
    }
    fn get_all(&self, p: &ParamData) -> String {
        format!("r.URL.Query()[\"{}\"]", p.name)
    }
    fn multi_map(&self) -> Option<&'static str> {
        Some("r.URL.Query()")
    }
}

struct HeaderSource;
impl ParamSource for HeaderSource {
    fn get(&self, p: &ParamData) -> String {
        format!("r.Header.Get(\"{}\")", p.name)
    }
    fn get_all(&self, p: &ParamData) -> String {
        let key = p.canonical_name.clone().unwrap_or_else(|| p.name.clone());
        format!("r.Header[\"{}\"]", key)
    }
    fn multi_map(&self) -> Option<&'static str> {
        None
    }
}

fn decode_multi_source_param(
    needs: &mut ImportCollector,
    mapper: &GoTypeMapper,
    p: &ParamData,
    source: &dyn ParamSource,
) -> String {
    match p.class {
        ParamClass::Primitive if p.ty.is_verbatim() => {
            decode_verbatim_param(needs, mapper, p, source)
        }
        ParamClass::Primitive => decode_converted_param(needs, mapper, p, source),
        ParamClass::StringSlice => {
            let mut b = CodeBuilder::go().line(&format!(
                "{} = {}",
                p.var_name,
                source.get_all(p)
            ));
            if p.required {
                b = b
                    .line(&format!("if {} == nil {{", p.var_name))
                    .indent()
                    .line(&missing_field(needs, p))
                    .dedent()
                    .line("}");
            } else if let Some(default) = &p.default {
                b = b
                    .line(&format!("if {} == nil {{", p.var_name))
                    .indent()
                    .line(&format!(
                        "{} = {}",
                        p.var_name,
                        default_literal(&p.ty, default, mapper)
                    ))
                    .dedent()
                    .line("}");
            }
            b.build()
        }
        ParamClass::Slice => {
            let conv = slice_conversion(needs, &p.var_name, &p.name, &p.ty, mapper);
            let mut b = CodeBuilder::go()
                .line("{")
                .indent()
                .line(&format!("{}Raw := {}", p.var_name, source.get_all(p)));
            if p.required {
                b = b
                    .line(&format!("if {}Raw == nil {{", p.var_name))
                    .indent()
                    .line(&missing_field(needs, p))
                    .dedent()
                    .line("}")
                    .lines(conv.trim_end());
            } else if let Some(default) = &p.default {
                b = b
                    .line(&format!("if {}Raw == nil {{", p.var_name))
                    .indent()
                    .line(&format!(
                        "{} = {}",
                        p.var_name,
                        default_literal(&p.ty, default, mapper)
                    ))
                    .dedent()
                    .line("} else {")
                    .indent()
                    .lines(conv.trim_end())
                    .dedent()
                    .line("}");
            } else {
                b = b
                    .line(&format!("if {}Raw != nil {{", p.var_name))
                    .indent()
                    .lines(conv.trim_end())
                    .dedent()
                    .line("}");
            }
            b.dedent().line("}").build()
        }
        ParamClass::MapStringSlice => {
            let Some(map_expr) = source.multi_map() else {
                return format!("// unsupported type for var {}\n", p.var_name);
            };
            let mut b = CodeBuilder::go().line(&format!("{} = {}", p.var_name, map_expr));
            if p.required {
                b = b
                    .line(&format!("if len({}) == 0 {{", p.var_name))
                    .indent()
                    .line(&missing_field(needs, p))
                    .dedent()
                    .line("}");
            }
            b.build()
        }
        ParamClass::Map | ParamClass::MapQueryParams => {
            let Some(map_expr) = source.multi_map() else {
                return format!("// unsupported type for var {}\n", p.var_name);
            };
            let conv = map_conversion(needs, &p.var_name, &p.name, &p.ty, mapper);
            let mut b = CodeBuilder::go()
                .line("{")
                .indent()
                .line(&format!("{}Raw := {}", p.var_name, map_expr));
            if p.required {
                b = b
                    .line(&format!("if len({}Raw) == 0 {{", p.var_name))
                    .indent()
                    .line(&missing_field(needs, p))
                    .dedent()
                    .line("}")
                    .lines(conv.trim_end());
            } else {
                b = b
                    .line(&format!("if len({}Raw) != 0 {{", p.var_name))
                    .indent()
                    .lines(conv.trim_end())
                    .dedent()
                    .line("}");
            }
            b.dedent().line("}").build()
        }
    }
}

/// Strings and any: the raw value is used directly.
fn decode_verbatim_param(
    needs: &mut ImportCollector,
    mapper: &GoTypeMapper,
    p: &ParamData,
    source: &dyn ParamSource,
) -> String {
    match p.mode {
        ParamMode::OwnedValue if p.required => CodeBuilder::go()
            .line(&format!("{} = {}", p.var_name, source.get(p)))
            .line(&format!("if {} == \"\" {{", p.var_name))
            .indent()
            .line(&missing_field(needs, p))
            .dedent()
            .line("}")
            .build(),
        ParamMode::DefaultedValue => {
            let default = p.default.as_ref().expect("defaulted param without default");
            CodeBuilder::go()
                .line(&format!("{}Raw := {}", p.var_name, source.get(p)))
                .line(&format!("if {}Raw != \"\" {{", p.var_name))
                .indent()
                .line(&format!("{} = {}Raw", p.var_name, p.var_name))
                .dedent()
                .line("} else {")
                .indent()
                .line(&format!(
                    "{} = {}",
                    p.var_name,
                    default_literal(&p.ty, default, mapper)
                ))
                .dedent()
                .line("}")
                .build()
        }
        _ => {
            let amp = if p.is_pointer()
                && p.ty.as_primitive() == Some(Primitive::String)
            {
                "&"
            } else {
                ""
            };
            CodeBuilder::go()
                .line(&format!("{}Raw := {}", p.var_name, source.get(p)))
                .line(&format!("if {}Raw != \"\" {{", p.var_name))
                .indent()
                .line(&format!("{} = {}{}Raw", p.var_name, amp, p.var_name))
                .dedent()
                .line("}")
                .build()
        }
    }
}

/// Primitives with a parse step.
fn decode_converted_param(
    needs: &mut ImportCollector,
    mapper: &GoTypeMapper,
    p: &ParamData,
    source: &dyn ParamSource,
) -> String {
    let Some(prim) = p.ty.as_primitive() else {
        return format!("// unsupported type for var {}\n", p.var_name);
    };
    let conv = type_conversion(needs, &p.var_name, &p.name, prim, p.is_pointer());
    let mut b = CodeBuilder::go()
        .line("{")
        .indent()
        .line(&format!("{}Raw := {}", p.var_name, source.get(p)));
    match p.mode {
        ParamMode::OwnedValue if p.required => {
            b = b
                .line(&format!("if {}Raw == \"\" {{", p.var_name))
                .indent()
                .line(&missing_field(needs, p))
                .dedent()
                .line("}")
                .lines(conv.trim_end());
        }
        ParamMode::DefaultedValue => {
            let default = p.default.as_ref().expect("defaulted param without default");
            b = b
                .line(&format!("if {}Raw == \"\" {{", p.var_name))
                .indent()
                .line(&format!(
                    "{} = {}",
                    p.var_name,
                    default_literal(&p.ty, default, mapper)
                ))
                .dedent()
                .line("} else {")
                .indent()
                .lines(conv.trim_end())
                .dedent()
                .line("}");
        }
        _ => {
            b = b
                .line(&format!("if {}Raw != \"\" {{", p.var_name))
                .indent()
                .lines(conv.trim_end())
                .dedent()
                .line("}");
        }
    }
    b.dedent().line("}").build()
}

/// The declared validation checks for a param, with a nil guard around
/// optional pointer values.
fn param_validation(needs: &mut ImportCollector, p: &ParamData) -> String {
    let Some(validation) = &p.validation else {
        return String::new();
    };
    let deref = p.is_pointer();
    let code = validation_code(needs, &p.name, &p.var_name, &p.ty, validation, deref);
    if deref {
        CodeBuilder::go()
            .line(&format!("if {} != nil {{", p.var_name))
            .indent()
            .lines(code.trim_end())
            .dedent()
            .line("}")
            .build()
    } else {
        code
    }
}

// ----------------------------------------------------------------------
// Multipart and errors
// ----------------------------------------------------------------------

fn multipart_decoder(
    ep: &EndpointData,
    multipart: &gantry_codegen::analysis::endpoint::MultipartData,
) -> String {
    let ref_ = payload_ref(ep);
    CodeBuilder::go()
        .comment(&format!(
            "{} returns a decoder to decode the multipart request for the \"{}\" service \"{}\" endpoint.",
            multipart.init_name, ep.service_name, ep.method_name
        ))
        .line(&format!(
            "func {}({} {}) func(r *http.Request) goahttp.Decoder {{",
            multipart.init_name, multipart.var_name, multipart.func_name
        ))
        .indent()
        .line("return func(r *http.Request) goahttp.Decoder {")
        .indent()
        .line("return goahttp.EncodingFunc(func(v interface{}) error {")
        .indent()
        .line("mr, err := r.MultipartReader()")
        .line("if err != nil {")
        .indent()
        .line("return err")
        .dedent()
        .line("}")
        .line(&format!("p := v.({})", ref_))
        .line(&format!("return {}(mr, p)", multipart.var_name))
        .dedent()
        .line("})")
        .dedent()
        .line("}")
        .dedent()
        .line("}")
        .build()
}

fn error_encoder(
    needs: &mut ImportCollector,
    mapper: &GoTypeMapper,
    ep: &EndpointData,
    svc_path: &str,
    pkg: &str,
) -> String {
    needs.add(ImportSpec::aliased(svc_path.to_string(), pkg.to_string()));
    let name = ep.error_encoder.as_deref().unwrap_or_default();
    let mut b = CodeBuilder::go()
        .comment(&format!(
            "{} returns an encoder for errors returned by the {} {} endpoint.",
            name, ep.method_name, ep.service_name
        ))
        .line(&format!(
            "func {}(encoder func(context.Context, http.ResponseWriter) goahttp.Encoder) func(context.Context, http.ResponseWriter, error) {{",
            name
        ))
        .indent()
        .line("encodeError := goahttp.ErrorEncoder(encoder)")
        .line("return func(ctx context.Context, w http.ResponseWriter, v error) {")
        .indent()
        .line("switch res := v.(type) {");

    // Errors sharing a Go type dispatch within one case arm.
    let mut by_type: IndexMap<&str, Vec<&ErrorData>> = IndexMap::new();
    for error in &ep.errors {
        by_type.entry(&error.type_name).or_default().push(error);
    }
    for (type_name, errors) in &by_type {
        b = b.line(&format!("case {}:", mapper.service_ref(type_name)));
        b = b.indent();
        for error in errors {
            let tagged = error.response.tag.is_some();
            if let Some(tag) = &error.response.tag {
                let test = if tag.required {
                    format!("res.{} == {}", tag.field_name, go_quote(&tag.value))
                } else {
                    format!(
                        "res.{} != nil && *res.{} == {}",
                        tag.field_name,
                        tag.field_name,
                        go_quote(&tag.value)
                    )
                };
                b = b.line(&format!("if {} {{", test)).indent();
            }
            b = render_response(needs, b, &error.response, tagged);
            if error.response.server_body.is_some() {
                b = b
                    .line("if err := enc.Encode(body); err != nil {")
                    .indent()
                    .line("encodeError(ctx, w, err)")
                    .dedent()
                    .line("}");
            }
            if tagged {
                b = b.dedent().line("}");
            }
        }
        b = b.dedent();
    }

    b.line("default:")
        .indent()
        .line("encodeError(ctx, w, v)")
        .dedent()
        .line("}")
        .dedent()
        .line("}")
        .dedent()
        .line("}")
        .build()
}
