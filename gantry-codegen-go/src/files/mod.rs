//! Per-service output file renderers.

mod encode_decode_go;
mod server_go;
mod types_go;

pub use encode_decode_go::EncodeDecodeGo;
pub use server_go::ServerGo;
pub use types_go::TypesGo;

use gantry_codegen::analysis::endpoint::{EndpointData, PayloadKind};
use gantry_codegen::{ImportCollector, ImportSpec};

use crate::type_mapper::GoTypeMapper;

/// The Go reference of an endpoint's payload type.
pub(crate) fn payload_ref(ep: &EndpointData) -> String {
    match &ep.payload.kind {
        PayloadKind::Struct { name } => format!("*{}.{}", ep.service_pkg, name),
        PayloadKind::Value { ty } => GoTypeMapper::new(ep.service_pkg.clone()).type_ref(ty),
        PayloadKind::None => "interface{}".to_string(),
    }
}

/// Rebuild an import collector in the canonical order: standard library
/// paths first, then the runtime packages, then the service package.
pub(crate) fn ordered_imports(needs: &ImportCollector, svc_path: &str) -> ImportCollector {
    const CANONICAL: &[&str] = &[
        "context",
        "fmt",
        "io",
        "mime/multipart",
        "net/http",
        "regexp",
        "strconv",
        "strings",
        "unicode/utf8",
        "goa.design/goa",
        "goa.design/goa/http",
    ];
    let mut ordered = ImportCollector::new();
    for &path in CANONICAL {
        if needs.has(path) {
            let alias = needs
                .iter()
                .find(|&(p, _)| p == path)
                .and_then(|(_, a)| a.map(str::to_string));
            match alias {
                Some(alias) => ordered.add(ImportSpec::aliased(path, alias)),
                None => ordered.add(ImportSpec::new(path)),
            }
        }
    }
    for (path, alias) in needs.iter() {
        if !CANONICAL.contains(&path) || path == svc_path {
            match alias {
                Some(alias) => ordered.add(ImportSpec::aliased(path, alias)),
                None => ordered.add(ImportSpec::new(path)),
            }
        }
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_imports() {
        let mut needs = ImportCollector::new();
        needs.add(ImportSpec::aliased("goa.design/goa", "goa"));
        needs.add(ImportSpec::new("strconv"));
        needs.add(ImportSpec::aliased("gen/storage", "storage"));
        needs.add(ImportSpec::new("context"));

        let ordered = ordered_imports(&needs, "gen/storage");
        let paths: Vec<&str> = ordered.iter().map(|(p, _)| p).collect();
        assert_eq!(
            paths,
            vec!["context", "strconv", "goa.design/goa", "gen/storage"]
        );
    }
}
