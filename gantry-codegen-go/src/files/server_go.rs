//! The per-service server.go file: struct, mounts, handlers, file servers.

use gantry_codegen::analysis::endpoint::{EndpointData, FileServerData, ServiceData};
use gantry_codegen::{
    CodeBuilder, ImportSpec, LogicalFile, Section, SectionKind,
};

/// Renders `gen/http/<service>/server/server.go`.
pub struct ServerGo<'a> {
    data: &'a ServiceData,
    genpkg: &'a str,
}

impl<'a> ServerGo<'a> {
    pub fn new(data: &'a ServiceData, genpkg: &'a str) -> Self {
        Self { data, genpkg }
    }

    pub fn file(&self) -> LogicalFile {
        let svc = self.data;
        let mut file = LogicalFile::new(
            format!("gen/http/{}/server/server.go", svc.snake),
            format!("{} HTTP server", svc.name),
            "server",
        );

        file.imports.add(ImportSpec::new("context"));
        file.imports.add(ImportSpec::new("net/http"));
        if svc.endpoints.iter().any(|e| e.multipart.is_some()) {
            file.imports.add(ImportSpec::new("mime/multipart"));
        }
        if !svc.endpoints.is_empty() {
            file.imports.add(ImportSpec::aliased("goa.design/goa", "goa"));
        }
        file.imports
            .add(ImportSpec::aliased("goa.design/goa/http", "goahttp"));
        file.imports.add(ImportSpec::aliased(
            format!("{}/{}", self.genpkg, svc.snake),
            svc.pkg_name.clone(),
        ));

        file.push(Section::new(SectionKind::ServerStruct, self.server_struct()));
        file.push(Section::new(
            SectionKind::ServerMountPoint,
            self.mount_point_struct(),
        ));
        for ep in &svc.endpoints {
            if let Some(multipart) = &ep.multipart {
                file.push(Section::new(
                    SectionKind::MultipartRequestDecoderType,
                    multipart_type_decl(ep, multipart),
                ));
            }
        }
        file.push(Section::new(SectionKind::ServerInit, self.server_init()));
        file.push(Section::new(
            SectionKind::ServerService,
            self.server_service(),
        ));
        file.push(Section::new(SectionKind::ServerMount, self.server_mount()));
        for ep in &svc.endpoints {
            file.push(Section::new(SectionKind::ServerHandler, mount_handler(ep)));
            file.push(Section::new(
                SectionKind::ServerHandlerInit,
                handler_init(ep, svc),
            ));
        }
        for fs in &svc.file_servers {
            file.push(Section::new(SectionKind::ServerFiles, file_server(fs)));
        }

        file
    }

    fn server_struct(&self) -> String {
        let svc = self.data;
        CodeBuilder::go()
            .comment(&format!(
                "{} lists the {} service endpoint HTTP handlers.",
                svc.server_struct, svc.name
            ))
            .line(&format!("type {} struct {{", svc.server_struct))
            .indent()
            .line(&format!("Mounts []*{}", svc.mount_point_struct))
            .each(&svc.endpoints, |b, ep| {
                b.line(&format!("{} http.Handler", ep.method_var_name))
            })
            .dedent()
            .line("}")
            .build()
    }

    fn mount_point_struct(&self) -> String {
        let svc = self.data;
        CodeBuilder::go()
            .comment(&format!(
                "{} holds information about the mounted endpoints.",
                svc.mount_point_struct
            ))
            .line(&format!("type {} struct {{", svc.mount_point_struct))
            .indent()
            .comment("Method is the name of the service method served by the mounted HTTP handler.")
            .line("Method string")
            .comment("Verb is the HTTP method used to match requests to the mounted handler.")
            .line("Verb string")
            .comment("Pattern is the HTTP request path pattern used to match requests to the mounted handler.")
            .line("Pattern string")
            .dedent()
            .line("}")
            .build()
    }

    fn server_init(&self) -> String {
        let svc = self.data;
        let mut b = CodeBuilder::go()
            .comment(&format!(
                "{} instantiates HTTP handlers for all the {} service endpoints.",
                svc.server_init, svc.name
            ))
            .line(&format!("func {}(", svc.server_init))
            .indent()
            .line(&format!("e *{}.Endpoints,", svc.pkg_name))
            .line("mux goahttp.Muxer,")
            .line("dec func(*http.Request) goahttp.Decoder,")
            .line("enc func(context.Context, http.ResponseWriter) goahttp.Encoder,");
        for ep in &svc.endpoints {
            if let Some(multipart) = &ep.multipart {
                b = b.line(&format!("{} {},", multipart.var_name, multipart.func_name));
            }
        }
        b = b
            .dedent()
            .line(&format!(") *{} {{", svc.server_struct))
            .indent()
            .line(&format!("return &{}{{", svc.server_struct))
            .indent()
            .line(&format!("Mounts: []*{}{{", svc.mount_point_struct))
            .indent();
        for ep in &svc.endpoints {
            for route in &ep.routes {
                b = b.line(&format!(
                    "{{\"{}\", \"{}\", \"{}\"}},",
                    ep.method_var_name, route.verb, route.path
                ));
            }
        }
        for fs in &svc.file_servers {
            for path in &fs.request_paths {
                b = b.line(&format!("{{\"{}\", \"GET\", \"{}\"}},", fs.file_path, path));
            }
        }
        b = b.dedent().line("},");
        for ep in &svc.endpoints {
            let dec_arg = match &ep.multipart {
                Some(multipart) => {
                    format!("{}({})", multipart.init_name, multipart.var_name)
                }
                None => "dec".to_string(),
            };
            b = b.line(&format!(
                "{}: {}(e.{}, mux, {}, enc),",
                ep.method_var_name, ep.handler_init, ep.method_var_name, dec_arg
            ));
        }
        b.dedent().line("}").dedent().line("}").build()
    }

    fn server_service(&self) -> String {
        let svc = self.data;
        CodeBuilder::go()
            .comment(&format!(
                "{} returns the name of the service served.",
                svc.server_service
            ))
            .line(&format!(
                "func (s *{}) {}() string {{ return \"{}\" }}",
                svc.server_struct, svc.server_service, svc.name
            ))
            .build()
    }

    fn server_mount(&self) -> String {
        let svc = self.data;
        let h_param = if svc.endpoints.is_empty() {
            String::new()
        } else {
            format!(", h *{}", svc.server_struct)
        };
        let mut b = CodeBuilder::go()
            .comment(&format!(
                "{} configures the mux to serve the {} endpoints.",
                svc.mount_server, svc.name
            ))
            .line(&format!(
                "func {}(mux goahttp.Muxer{}) {{",
                svc.mount_server, h_param
            ))
            .indent();
        for ep in &svc.endpoints {
            b = b.line(&format!(
                "{}(mux, h.{})",
                ep.mount_handler, ep.method_var_name
            ));
        }
        for fs in &svc.file_servers {
            if fs.is_dir {
                b = b.line(&format!(
                    "{}(mux, http.FileServer(http.Dir(\"{}\")))",
                    fs.mount_handler, fs.file_path
                ));
            } else {
                b = b
                    .line(&format!(
                        "{}(mux, http.HandlerFunc(func(w http.ResponseWriter, r *http.Request) {{",
                        fs.mount_handler
                    ))
                    .indent()
                    .line(&format!("http.ServeFile(w, r, \"{}\")", fs.file_path))
                    .dedent()
                    .line("}))");
            }
        }
        b.dedent().line("}").build()
    }
}

fn mount_handler(ep: &EndpointData) -> String {
    CodeBuilder::go()
        .comment(&format!(
            "{} configures the mux to serve the \"{}\" service \"{}\" endpoint.",
            ep.mount_handler, ep.service_name, ep.method_name
        ))
        .line(&format!(
            "func {}(mux goahttp.Muxer, h http.Handler) {{",
            ep.mount_handler
        ))
        .indent()
        .line("f, ok := h.(http.HandlerFunc)")
        .line("if !ok {")
        .indent()
        .line("f = func(w http.ResponseWriter, r *http.Request) {")
        .indent()
        .line("h.ServeHTTP(w, r)")
        .dedent()
        .line("}")
        .dedent()
        .line("}")
        .each(&ep.routes, |b, route| {
            b.line(&format!(
                "mux.Handle(\"{}\", \"{}\", f)",
                route.verb, route.path
            ))
        })
        .dedent()
        .line("}")
        .build()
}

fn handler_init(ep: &EndpointData, svc: &ServiceData) -> String {
    let has_payload = ep.payload.is_present();
    let mut b = CodeBuilder::go()
        .comment(&format!(
            "{} creates a HTTP handler which loads the HTTP request and calls the \"{}\" service \"{}\" endpoint.",
            ep.handler_init, ep.service_name, ep.method_name
        ))
        .line(&format!("func {}(", ep.handler_init))
        .indent()
        .line("endpoint goa.Endpoint,")
        .line("mux goahttp.Muxer,")
        .line("dec func(*http.Request) goahttp.Decoder,")
        .line("enc func(context.Context, http.ResponseWriter) goahttp.Encoder,")
        .dedent()
        .line(") http.Handler {")
        .indent()
        .line("var (")
        .indent();
    if has_payload {
        b = b.line(&format!(
            "decodeRequest  = {}(mux, dec)",
            ep.request_decoder
        ));
    }
    b = b.line(&format!("encodeResponse = {}(enc)", ep.response_encoder));
    let error_encoder = match &ep.error_encoder {
        Some(name) => name.clone(),
        None => "goahttp.ErrorEncoder".to_string(),
    };
    b = b
        .line(&format!("encodeError    = {}(enc)", error_encoder))
        .dedent()
        .line(")")
        .line("return http.HandlerFunc(func(w http.ResponseWriter, r *http.Request) {")
        .indent()
        .line("accept := r.Header.Get(\"Accept\")")
        .line("ctx := context.WithValue(r.Context(), goahttp.AcceptTypeKey, accept)")
        .line(&format!(
            "ctx = context.WithValue(ctx, goa.MethodKey, \"{}\")",
            ep.method_name
        ))
        .line(&format!(
            "ctx = context.WithValue(ctx, goa.ServiceKey, \"{}\")",
            svc.name
        ))
        .blank();
    if has_payload {
        b = b
            .line("payload, err := decodeRequest(r)")
            .line("if err != nil {")
            .indent()
            .line("encodeError(ctx, w, err)")
            .line("return")
            .dedent()
            .line("}")
            .blank()
            .line("res, err := endpoint(ctx, payload)")
            .blank();
    } else {
        b = b.line("res, err := endpoint(ctx, nil)").blank();
    }
    b.line("if err != nil {")
        .indent()
        .line("encodeError(ctx, w, err)")
        .line("return")
        .dedent()
        .line("}")
        .line("if err := encodeResponse(ctx, w, res); err != nil {")
        .indent()
        .line("encodeError(ctx, w, err)")
        .dedent()
        .line("}")
        .dedent()
        .line("})")
        .dedent()
        .line("}")
        .build()
}

fn multipart_type_decl(
    ep: &EndpointData,
    multipart: &gantry_codegen::analysis::endpoint::MultipartData,
) -> String {
    let payload_ref = crate::files::payload_ref(ep);
    CodeBuilder::go()
        .comment(&format!(
            "{} is the type to decode multipart request for the \"{}\" service \"{}\" endpoint.",
            multipart.func_name, ep.service_name, ep.method_name
        ))
        .line(&format!(
            "type {} func(*multipart.Reader, {}) error",
            multipart.func_name, payload_ref
        ))
        .build()
}

fn file_server(fs: &FileServerData) -> String {
    CodeBuilder::go()
        .comment(&format!(
            "{} configures the mux to serve GET request made to \"{}\".",
            fs.mount_handler,
            fs.request_paths.join(", ")
        ))
        .line(&format!(
            "func {}(mux goahttp.Muxer, h http.Handler) {{",
            fs.mount_handler
        ))
        .indent()
        .each(&fs.request_paths, |b, path| {
            b.line(&format!("mux.Handle(\"GET\", \"{}\", h.ServeHTTP)", path))
        })
        .dedent()
        .line("}")
        .build()
}
