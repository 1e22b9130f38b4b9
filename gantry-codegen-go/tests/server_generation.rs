//! End-to-end generation tests over small design fixtures.
//!
//! Each fixture mirrors a server layout the generator must support: no
//! declared server, single and multiple hosts, host URI variables, file
//! servers, and service subsets.

use gantry_codegen::pipeline::Pipeline;
use gantry_codegen_go::{Generator, RenderedFile};
use gantry_design::{
    Api, Attribute, DataType, DefaultValue, DesignRoot, ErrorDecl, FileServer, Host,
    HttpEndpoint, HttpService, Method, Primitive, ResponseDecl, ServerDecl, Service, Uri,
    UriVariable, UserType, Validation,
};

fn generate(root: DesignRoot) -> Vec<RenderedFile> {
    let ctx = Pipeline::new().run(root).expect("pipeline should succeed");
    assert!(
        !ctx.has_errors(),
        "unexpected errors: {:?}",
        ctx.errors().collect::<Vec<_>>()
    );
    Generator::from_context(ctx, "gen").generate()
}

fn get_file<'a>(files: &'a [RenderedFile], path: &str) -> &'a str {
    files
        .iter()
        .find(|f| f.path == path)
        .map(|f| f.content.as_str())
        .unwrap_or_else(|| panic!("{} not generated", path))
}

fn simple_method(name: &str) -> Method {
    Method {
        name: name.into(),
        description: None,
        payload: None,
        result: None,
    }
}

fn no_server_design() -> DesignRoot {
    DesignRoot {
        services: vec![Service {
            name: "Service".into(),
            description: None,
            methods: vec![simple_method("Method")],
        }],
        http_services: vec![HttpService {
            service_name: "Service".into(),
            endpoints: vec![HttpEndpoint::new("Method", "GET", "/")],
            file_servers: Vec::new(),
        }],
        ..DesignRoot::default()
    }
}

#[test]
fn test_no_server_infers_default() {
    let ctx = Pipeline::new()
        .run(no_server_design())
        .expect("pipeline should succeed");
    let generator = Generator::from_context(ctx, "gen");

    let servers = generator.servers();
    assert_eq!(servers.len(), 1);
    assert_eq!(servers[0].services, vec!["Service"]);
}

#[test]
fn test_no_server_mount_and_encoders() {
    let files = generate(no_server_design());
    let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "gen/http/service/server/server.go",
            "gen/http/service/server/encode_decode.go",
            "gen/http/service/server/types.go",
        ]
    );

    let server = get_file(&files, "gen/http/service/server/server.go");
    assert!(server.contains("{\"Method\", \"GET\", \"/\"},"));
    assert!(server.contains("Method: NewMethodHandler(e.Method, mux, dec, enc),"));
    assert!(server.contains("mux.Handle(\"GET\", \"/\", f)"));
    // No payload: the handler passes nil and no decoder is generated.
    assert!(server.contains("res, err := endpoint(ctx, nil)"));

    let encode = get_file(&files, "gen/http/service/server/encode_decode.go");
    assert!(encode.contains("func EncodeMethodResponse("));
    assert!(encode.contains("w.WriteHeader(http.StatusOK)"));
    assert!(!encode.contains("func DecodeMethodRequest("));
}

#[test]
fn test_generation_is_deterministic() {
    let first = generate(no_server_design());
    let second = generate(no_server_design());
    assert_eq!(first, second);
}

#[test]
fn test_single_server_single_host() {
    let mut root = no_server_design();
    root.api.name = "SingleServerSingleHost".into();
    root.api.servers.push(ServerDecl {
        name: "SingleHost".into(),
        services: vec!["Service".into()],
        hosts: vec![Host {
            name: "dev".into(),
            uris: vec![
                Uri("http://example:8090".into()),
                Uri("https://example:80".into()),
            ],
            variables: Vec::new(),
        }],
    });

    let ctx = Pipeline::new().run(root).expect("pipeline should succeed");
    let generator = Generator::from_context(ctx, "gen");

    let hosts = &generator.servers()[0].hosts;
    assert_eq!(hosts.len(), 1);
    let uris = &hosts[0].uris;
    assert_eq!(uris[0].scheme, "http");
    assert_eq!(uris[0].authority, "example:8090");
    assert_eq!(uris[1].scheme, "https");
    assert_eq!(uris[1].authority, "example:80");
}

#[test]
fn test_host_variables_record_types_and_defaults() {
    let variable = |name: &str, ty, default| UriVariable {
        name: name.into(),
        ty,
        description: None,
        default: Some(default),
        validation: None,
    };
    let mut root = no_server_design();
    root.api.name = "SingleServerSingleHostWithVariables".into();
    root.api.servers.push(ServerDecl {
        name: "SingleHost".into(),
        services: vec!["Service".into()],
        hosts: vec![Host {
            name: "dev".into(),
            uris: vec![
                Uri("http://example-{int}-{uint}-{float32}:8090".into()),
                Uri("https://example-{int64}:80/{bool}".into()),
            ],
            variables: vec![
                variable("int", Primitive::Int, DefaultValue::Int(1)),
                variable("uint", Primitive::UInt, DefaultValue::UInt(1)),
                variable("float32", Primitive::Float32, DefaultValue::Float(1.1)),
                variable("int64", Primitive::Int64, DefaultValue::Int(1)),
                variable("bool", Primitive::Bool, DefaultValue::Bool(true)),
            ],
        }],
    });

    let ctx = Pipeline::new().run(root).expect("pipeline should succeed");
    let generator = Generator::from_context(ctx, "gen");

    let vars = &generator.servers()[0].hosts[0].variables;
    assert_eq!(vars.len(), 5);
    assert_eq!(vars[0].ty, Primitive::Int);
    assert_eq!(vars[0].default, Some(DefaultValue::Int(1)));
    assert_eq!(vars[2].ty, Primitive::Float32);
    assert_eq!(vars[4].ty, Primitive::Bool);
    assert_eq!(vars[4].default, Some(DefaultValue::Bool(true)));
}

#[test]
fn test_unsupported_host_variable_rejected() {
    let mut root = no_server_design();
    root.api.servers.push(ServerDecl {
        name: "SingleHost".into(),
        services: vec!["Service".into()],
        hosts: vec![Host {
            name: "dev".into(),
            uris: vec![Uri("http://example-{blob}:8090".into())],
            variables: vec![UriVariable {
                name: "blob".into(),
                ty: Primitive::Bytes,
                description: None,
                default: None,
                validation: None,
            }],
        }],
    });

    let ctx = Pipeline::new().run(root).expect("pipeline should succeed");
    assert!(ctx.has_errors());
}

#[test]
fn test_multiple_hosts_preserve_enum_constraint() {
    let mut root = no_server_design();
    root.api.name = "SingleServerMultipleHostsWithVariables".into();
    root.api.servers.push(ServerDecl {
        name: "MultipleHostsWithVariables".into(),
        services: vec!["Service".into()],
        hosts: vec![
            Host {
                name: "dev".into(),
                uris: vec![Uri("http://example-{version}:8090".into())],
                variables: vec![UriVariable {
                    name: "version".into(),
                    ty: Primitive::String,
                    description: Some("Version".into()),
                    default: None,
                    validation: Some(Validation {
                        enum_values: vec![
                            DefaultValue::String("v1".into()),
                            DefaultValue::String("v2".into()),
                        ],
                        ..Validation::default()
                    }),
                }],
            },
            Host {
                name: "stage".into(),
                uris: vec![Uri("https://example-{domain}:{port}".into())],
                variables: vec![
                    UriVariable {
                        name: "domain".into(),
                        ty: Primitive::String,
                        description: Some("Domain".into()),
                        default: Some(DefaultValue::String("test".into())),
                        validation: None,
                    },
                    UriVariable {
                        name: "port".into(),
                        ty: Primitive::String,
                        description: Some("Port".into()),
                        default: Some(DefaultValue::String("8080".into())),
                        validation: None,
                    },
                ],
            },
        ],
    });

    let ctx = Pipeline::new().run(root).expect("pipeline should succeed");
    let generator = Generator::from_context(ctx, "gen");

    let hosts = &generator.servers()[0].hosts;
    assert_eq!(hosts.len(), 2);
    assert_eq!(
        hosts[0].variables[0].enum_values,
        vec![
            DefaultValue::String("v1".into()),
            DefaultValue::String("v2".into())
        ]
    );
    assert_eq!(
        hosts[1].variables[0].default,
        Some(DefaultValue::String("test".into()))
    );
}

#[test]
fn test_file_server_mounts() {
    let root = DesignRoot {
        api: Api {
            name: "ServerHostingServiceWithFileServer".into(),
            description: None,
            servers: vec![ServerDecl {
                name: "SingleHost".into(),
                services: vec!["Service".into()],
                hosts: Vec::new(),
            }],
        },
        services: vec![Service {
            name: "Service".into(),
            description: None,
            methods: Vec::new(),
        }],
        http_services: vec![HttpService {
            service_name: "Service".into(),
            endpoints: Vec::new(),
            file_servers: vec![FileServer {
                file_path: "path.json".into(),
                request_paths: vec!["/file.json".into()],
                is_dir: false,
            }],
        }],
        ..DesignRoot::default()
    };

    let files = generate(root);
    let server = get_file(&files, "gen/http/service/server/server.go");
    assert!(server.contains("{\"path.json\", \"GET\", \"/file.json\"},"));
    assert!(server.contains("http.ServeFile(w, r, \"path.json\")"));
    assert!(server.contains("mux.Handle(\"GET\", \"/file.json\", h.ServeHTTP)"));
}

#[test]
fn test_directory_file_server_uses_file_server_handler() {
    let root = DesignRoot {
        services: vec![Service {
            name: "Service".into(),
            description: None,
            methods: Vec::new(),
        }],
        http_services: vec![HttpService {
            service_name: "Service".into(),
            endpoints: Vec::new(),
            file_servers: vec![FileServer {
                file_path: "public".into(),
                request_paths: vec!["/static".into()],
                is_dir: true,
            }],
        }],
        ..DesignRoot::default()
    };

    let files = generate(root);
    let server = get_file(&files, "gen/http/service/server/server.go");
    assert!(server.contains("http.FileServer(http.Dir(\"public\"))"));
}

#[test]
fn test_server_hosting_service_subset() {
    let service = |name: &str| Service {
        name: name.into(),
        description: None,
        methods: vec![simple_method("Method")],
    };
    let overlay = |name: &str| HttpService {
        service_name: name.into(),
        endpoints: vec![HttpEndpoint::new("Method", "GET", "/")],
        file_servers: Vec::new(),
    };
    let root = DesignRoot {
        api: Api {
            name: "ServerHostingServiceSubset".into(),
            description: None,
            servers: vec![ServerDecl {
                name: "SingleHost".into(),
                services: vec!["Service".into()],
                hosts: vec![Host {
                    name: "dev".into(),
                    uris: vec![Uri("http://example:8090".into())],
                    variables: Vec::new(),
                }],
            }],
        },
        services: vec![service("Service"), service("IgnoredService")],
        http_services: vec![overlay("Service"), overlay("IgnoredService")],
        ..DesignRoot::default()
    };

    let ctx = Pipeline::new().run(root).expect("pipeline should succeed");
    let generator = Generator::from_context(ctx, "gen");

    // The server only exposes the listed service.
    assert_eq!(generator.servers()[0].services, vec!["Service"]);

    // Both services still generate their own transport files.
    let files = generator.generate();
    assert!(files
        .iter()
        .any(|f| f.path == "gen/http/service/server/server.go"));
    assert!(files
        .iter()
        .any(|f| f.path == "gen/http/ignored_service/server/server.go"));
}

#[test]
fn test_mount_sections_snapshot() {
    let root = DesignRoot {
        services: vec![Service {
            name: "Service".into(),
            description: None,
            methods: Vec::new(),
        }],
        http_services: vec![HttpService {
            service_name: "Service".into(),
            endpoints: Vec::new(),
            file_servers: vec![FileServer {
                file_path: "path.json".into(),
                request_paths: vec!["/file.json".into()],
                is_dir: false,
            }],
        }],
        ..DesignRoot::default()
    };

    let files = generate(root);
    let server = get_file(&files, "gen/http/service/server/server.go");
    let mount = server
        .split("\n\n")
        .find(|s| s.starts_with("// Mount configures"))
        .expect("mount section missing");
    insta::assert_snapshot!(mount, @r###"
// Mount configures the mux to serve the Service endpoints.
func Mount(mux goahttp.Muxer) {
	MountPathJSON(mux, http.HandlerFunc(func(w http.ResponseWriter, r *http.Request) {
		http.ServeFile(w, r, "path.json")
	}))
}
"###);
}

// ----------------------------------------------------------------------
// Decode / encode scenarios
// ----------------------------------------------------------------------

fn storage_design() -> DesignRoot {
    let payload = Attribute::new(
        "payload",
        DataType::Object(vec![
            Attribute::new("id", DataType::Primitive(Primitive::Int)),
            Attribute::new("view", DataType::Primitive(Primitive::String)).optional(),
            Attribute::new("auth", DataType::Primitive(Primitive::String)),
            Attribute::new("name", DataType::Primitive(Primitive::String)),
            Attribute::new("tags", DataType::array(DataType::Primitive(Primitive::String)))
                .optional(),
        ]),
    );
    let result = Attribute::new(
        "result",
        DataType::Object(vec![
            Attribute::new("id", DataType::Primitive(Primitive::Int)),
            Attribute::new("name", DataType::Primitive(Primitive::String)).optional(),
            Attribute::new("location", DataType::Primitive(Primitive::String)),
        ]),
    );

    let mut ep = HttpEndpoint::new("Show", "POST", "/records/{id}");
    ep.path_params.push("id".into());
    ep.query_params.push("view".into());
    ep.headers.push(("auth".into(), "Authorization".into()));
    ep.responses = vec![ResponseDecl {
        status_code: 200,
        headers: vec![("location".into(), "Location".into())],
        body: gantry_design::BodyBinding::Auto,
        tag: None,
    }];
    ep.errors.push(ErrorDecl {
        name: "not_found".into(),
        type_name: "NotFound".into(),
        response: ResponseDecl::status(404),
    });

    DesignRoot {
        user_types: vec![UserType {
            name: "NotFound".into(),
            description: None,
            attributes: vec![Attribute::new(
                "message",
                DataType::Primitive(Primitive::String),
            )],
        }],
        services: vec![Service {
            name: "Storage".into(),
            description: None,
            methods: vec![Method {
                name: "Show".into(),
                description: None,
                payload: Some(payload),
                result: Some(result),
            }],
        }],
        http_services: vec![HttpService {
            service_name: "Storage".into(),
            endpoints: vec![ep],
            file_servers: Vec::new(),
        }],
        ..DesignRoot::default()
    }
}

#[test]
fn test_request_decoder_full_shape() {
    let files = generate(storage_design());
    let encode = get_file(&files, "gen/http/storage/server/encode_decode.go");

    // Body decode with missing-payload handling.
    assert!(encode.contains("var ("));
    assert!(encode.contains("body ShowRequestBody"));
    assert!(encode.contains("if err == io.EOF {"));
    assert!(encode.contains("return nil, goa.MissingPayloadError()"));
    assert!(encode.contains("return nil, goa.DecodePayloadError(err.Error())"));
    assert!(encode.contains("err = body.Validate()"));

    // Params: path conversion, optional query pointer, required header.
    assert!(encode.contains("params = mux.Vars(r)"));
    assert!(encode.contains("idRaw := params[\"id\"]"));
    assert!(encode.contains("v, err2 := strconv.ParseInt(idRaw, 10, strconv.IntSize)"));
    assert!(encode.contains("viewRaw := r.URL.Query().Get(\"view\")"));
    assert!(encode.contains("view = &viewRaw"));
    assert!(encode.contains("auth = r.Header.Get(\"Authorization\")"));
    assert!(encode.contains(
        "err = goa.MergeErrors(err, goa.MissingFieldError(\"Authorization\", \"header\"))"
    ));

    // All field errors report in one response, then the constructor runs.
    assert!(encode.contains("if err != nil {"));
    assert!(encode.contains("return NewShowPayload(&body, id, view, auth), nil"));
}

#[test]
fn test_types_file_full_shape() {
    let files = generate(storage_design());
    let types = get_file(&files, "gen/http/storage/server/types.go");

    // Request body fields are pointers for explicit validation.
    assert!(types.contains("type ShowRequestBody struct {"));
    assert!(types.contains("Name *string `form:\"name\" json:\"name\" xml:\"name\"`"));
    assert!(types.contains(
        "Tags []string `form:\"tags,omitempty\" json:\"tags,omitempty\" xml:\"tags,omitempty\"`"
    ));

    // Response body drops header-bound fields.
    assert!(types.contains("type ShowResponseBody struct {"));
    assert!(!types.contains("Location *string `form:\"location"));

    // Constructors.
    assert!(types.contains(
        "func NewShowPayload(body *ShowRequestBody, id int, view *string, auth string) *storage.ShowPayload {"
    ));
    assert!(types.contains("Name: *body.Name,"));
    assert!(types.contains("v.ID = id"));
    assert!(types.contains("func NewShowResponseBody(res *storage.ShowResult) *ShowResponseBody {"));
    assert!(types.contains("func NewShowNotFoundResponseBody(res *storage.NotFound) *ShowNotFoundResponseBody {"));

    // Validation: required body field missing check.
    assert!(types.contains("func (body *ShowRequestBody) Validate() (err error) {"));
    assert!(types.contains("goa.MissingFieldError(\"name\", \"body\")"));
}

#[test]
fn test_response_encoder_headers_and_error_encoder() {
    let files = generate(storage_design());
    let encode = get_file(&files, "gen/http/storage/server/encode_decode.go");

    assert!(encode.contains("res := v.(*storage.ShowResult)"));
    assert!(encode.contains("body := NewShowResponseBody(res)"));
    assert!(encode.contains("w.Header().Set(\"Location\", res.Location)"));
    assert!(encode.contains("w.WriteHeader(http.StatusOK)"));
    assert!(encode.contains("return enc.Encode(body)"));

    assert!(encode.contains("func EncodeShowError("));
    assert!(encode.contains("encodeError := goahttp.ErrorEncoder(encoder)"));
    assert!(encode.contains("case *storage.NotFound:"));
    assert!(encode.contains("body := NewShowNotFoundResponseBody(res)"));
    assert!(encode.contains("w.WriteHeader(http.StatusNotFound)"));
    assert!(encode.contains("if err := enc.Encode(body); err != nil {"));
}

#[test]
fn test_tagged_response_dispatch() {
    let result = Attribute::new(
        "result",
        DataType::Object(vec![
            Attribute::new("outcome", DataType::Primitive(Primitive::String)).optional(),
            Attribute::new("value", DataType::Primitive(Primitive::String)),
        ]),
    );
    let mut ep = HttpEndpoint::new("Create", "POST", "/");
    ep.responses = vec![
        ResponseDecl::status(201).with_tag("outcome", "created"),
        ResponseDecl::status(200),
    ];
    let root = DesignRoot {
        services: vec![Service {
            name: "Service".into(),
            description: None,
            methods: vec![Method {
                name: "Create".into(),
                description: None,
                payload: None,
                result: Some(result),
            }],
        }],
        http_services: vec![HttpService {
            service_name: "Service".into(),
            endpoints: vec![ep],
            file_servers: Vec::new(),
        }],
        ..DesignRoot::default()
    };

    let files = generate(root);
    let encode = get_file(&files, "gen/http/service/server/encode_decode.go");

    // Declaration order: the tagged response is tested first, the untagged
    // final response is the fallthrough.
    let tagged = encode
        .find("if res.Outcome != nil && *res.Outcome == \"created\" {")
        .expect("tag test missing");
    let created = encode
        .find("w.WriteHeader(http.StatusCreated)")
        .expect("created status missing");
    let fallthrough = encode
        .find("body := NewCreateResponseBody(res)")
        .expect("fallthrough body missing");
    assert!(tagged < created);
    assert!(created < fallthrough);
}

#[test]
fn test_shared_body_type_deduplicated() {
    let result = Attribute::new(
        "result",
        DataType::Object(vec![Attribute::new(
            "record",
            DataType::Named("Record".into()),
        )]),
    );
    let method = |name: &str| Method {
        name: name.into(),
        description: None,
        payload: None,
        result: Some(result.clone()),
    };
    let root = DesignRoot {
        user_types: vec![UserType {
            name: "Record".into(),
            description: None,
            attributes: vec![Attribute::new(
                "value",
                DataType::Primitive(Primitive::String),
            )],
        }],
        services: vec![Service {
            name: "Storage".into(),
            description: None,
            methods: vec![method("Show"), method("List")],
        }],
        http_services: vec![HttpService {
            service_name: "Storage".into(),
            endpoints: vec![
                HttpEndpoint::new("Show", "GET", "/one"),
                HttpEndpoint::new("List", "GET", "/all"),
            ],
            file_servers: Vec::new(),
        }],
        ..DesignRoot::default()
    };

    let files = generate(root);
    let types = get_file(&files, "gen/http/storage/server/types.go");
    let decls = types.matches("type RecordResponseBody struct {").count();
    assert_eq!(decls, 1);

    let encode = get_file(&files, "gen/http/storage/server/encode_decode.go");
    let helpers = encode
        .matches("func marshalStorageRecordToRecordResponseBody(")
        .count();
    assert_eq!(helpers, 1);
}

#[test]
fn test_multipart_endpoint() {
    let payload = Attribute::new(
        "payload",
        DataType::Object(vec![Attribute::new(
            "content",
            DataType::Primitive(Primitive::Bytes),
        )]),
    );
    let mut ep = HttpEndpoint::new("Upload", "POST", "/upload");
    ep.multipart = true;
    let root = DesignRoot {
        services: vec![Service {
            name: "Storage".into(),
            description: None,
            methods: vec![Method {
                name: "Upload".into(),
                description: None,
                payload: Some(payload),
                result: None,
            }],
        }],
        http_services: vec![HttpService {
            service_name: "Storage".into(),
            endpoints: vec![ep],
            file_servers: Vec::new(),
        }],
        ..DesignRoot::default()
    };

    let files = generate(root);
    let server = get_file(&files, "gen/http/storage/server/server.go");
    assert!(server.contains(
        "type StorageUploadDecoderFunc func(*multipart.Reader, *storage.UploadPayload) error"
    ));
    assert!(server.contains("storageUploadDecoderFn StorageUploadDecoderFunc,"));
    assert!(server.contains(
        "Upload: NewUploadHandler(e.Upload, mux, NewStorageUploadDecoder(storageUploadDecoderFn), enc),"
    ));

    let encode = get_file(&files, "gen/http/storage/server/encode_decode.go");
    assert!(encode.contains("func NewStorageUploadDecoder("));
    assert!(encode.contains("mr, err := r.MultipartReader()"));
    assert!(encode.contains("p := v.(*storage.UploadPayload)"));
    assert!(encode.contains("return storageUploadDecoderFn(mr, p)"));
    assert!(encode.contains("return &body, nil"));
}

#[test]
fn test_unsupported_param_type_warns_and_comments() {
    let payload = Attribute::new(
        "payload",
        DataType::Object(vec![Attribute::new(
            "meta",
            DataType::map(
                DataType::Primitive(Primitive::String),
                DataType::Object(Vec::new()),
            ),
        )
        .optional()]),
    );
    let mut ep = HttpEndpoint::new("List", "GET", "/");
    ep.query_params.push("meta".into());
    let root = DesignRoot {
        services: vec![Service {
            name: "Service".into(),
            description: None,
            methods: vec![Method {
                name: "List".into(),
                description: None,
                payload: Some(payload),
                result: None,
            }],
        }],
        http_services: vec![HttpService {
            service_name: "Service".into(),
            endpoints: vec![ep],
            file_servers: Vec::new(),
        }],
        ..DesignRoot::default()
    };

    let ctx = Pipeline::new().run(root).expect("pipeline should succeed");
    assert!(!ctx.has_errors());
    assert!(ctx.has_warnings());

    let files = Generator::from_context(ctx, "gen").generate();
    let encode = get_file(&files, "gen/http/service/server/encode_decode.go");
    assert!(encode.contains("// unsupported map element type for var meta"));
}

#[test]
fn test_route_placeholders_match_generated_path_params() {
    let payload = Attribute::new(
        "payload",
        DataType::Object(vec![
            Attribute::new("account_id", DataType::Primitive(Primitive::String)),
            Attribute::new("id", DataType::Primitive(Primitive::Int)),
        ]),
    );
    let mut ep = HttpEndpoint::new("Show", "GET", "/accounts/{account_id}/records/{id}");
    ep.path_params.push("account_id".into());
    ep.path_params.push("id".into());
    let routes = ep.routes.clone();
    let root = DesignRoot {
        services: vec![Service {
            name: "Service".into(),
            description: None,
            methods: vec![Method {
                name: "Show".into(),
                description: None,
                payload: Some(payload),
                result: None,
            }],
        }],
        http_services: vec![HttpService {
            service_name: "Service".into(),
            endpoints: vec![ep],
            file_servers: Vec::new(),
        }],
        ..DesignRoot::default()
    };

    let ctx = Pipeline::new().run(root).expect("pipeline should succeed");
    let registry = ctx.registry.as_ref().unwrap();
    let svc = registry.service("Service").unwrap();
    let generated: Vec<&str> = svc.endpoints[0]
        .payload
        .request
        .path_params
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    let declared: Vec<String> = routes
        .iter()
        .flat_map(|r| r.path_params())
        .collect();
    assert_eq!(generated, declared);
}
