//! Rendering of conversion plans, defaults, and validations as Go snippets.

use gantry_codegen::analysis::conversion::{
    array_kind_label, conversion, format, BitSize, Conversion, Format, ParseFunc,
};
use gantry_codegen::{CodeBuilder, CodegenError, ImportCollector, ImportSpec};
use gantry_design::{DataType, DefaultValue, Primitive, Validation};

use crate::type_mapper::GoTypeMapper;

/// Quote a string as a Go string literal.
pub fn go_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Render a numeric bound without a spurious fraction.
fn fmt_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// The Go literal for a default value in an assignment position.
pub fn default_literal(ty: &DataType, value: &DefaultValue, mapper: &GoTypeMapper) -> String {
    match value {
        DefaultValue::String(s) => go_quote(s),
        DefaultValue::Int(i) => i.to_string(),
        DefaultValue::UInt(u) => u.to_string(),
        DefaultValue::Float(f) => fmt_number(*f),
        DefaultValue::Bool(b) => b.to_string(),
        DefaultValue::List(items) => {
            let elem = ty.elem().cloned().unwrap_or(DataType::Primitive(Primitive::String));
            let rendered: Vec<String> = items
                .iter()
                .map(|item| default_literal(&elem, item, mapper))
                .collect();
            format!("{}{{{}}}", mapper.type_ref(ty), rendered.join(", "))
        }
    }
}

/// The literal string form of a default, for header values.
///
/// Supports primitives and arrays of primitives; anything else is a
/// generator bug.
pub fn print_value(ty: &DataType, value: &DefaultValue) -> String {
    match ty {
        DataType::Primitive(_) => value.to_wire_string(),
        DataType::Array(elem) => match value {
            DefaultValue::List(items) => items
                .iter()
                .map(|item| print_value(elem, item))
                .collect::<Vec<_>>()
                .join(", "),
            other => other.to_wire_string(),
        },
        other => panic!(
            "{}",
            CodegenError::Template(format!("print_value: unsupported type {:?}", other))
        ),
    }
}

fn bits_expr(bits: BitSize) -> &'static str {
    match bits {
        BitSize::Platform => "strconv.IntSize",
        BitSize::B32 => "32",
        BitSize::B64 => "64",
    }
}

/// Convert `{var}Raw` into `{var}` for a primitive type.
///
/// Parse failures merge an invalid-field-type error into the local `err`
/// accumulator; the pointer flag controls whether the variable receives the
/// value or its address.
pub fn type_conversion(
    imports: &mut ImportCollector,
    var: &str,
    wire_name: &str,
    prim: Primitive,
    pointer: bool,
) -> String {
    let raw = format!("{}Raw", var);
    match conversion(prim) {
        Some(Conversion::Verbatim) => {
            let b = CodeBuilder::go();
            if pointer {
                b.line(&format!("{} = &{}", var, raw)).build()
            } else {
                b.line(&format!("{} = {}", var, raw)).build()
            }
        }
        Some(Conversion::Bytes) => CodeBuilder::go()
            .line(&format!("{} = []byte({})", var, raw))
            .build(),
        Some(Conversion::Parse(spec)) => {
            imports.add(ImportSpec::new("strconv"));
            imports.add(ImportSpec::aliased("goa.design/goa", "goa"));
            let parse_call = match spec.func {
                ParseFunc::Int => format!("strconv.ParseInt({}, 10, {})", raw, bits_expr(spec.bits)),
                ParseFunc::Uint => {
                    format!("strconv.ParseUint({}, 10, {})", raw, bits_expr(spec.bits))
                }
                ParseFunc::Float => format!("strconv.ParseFloat({}, {})", raw, bits_expr(spec.bits)),
                ParseFunc::Bool => format!("strconv.ParseBool({})", raw),
            };
            let b = CodeBuilder::go()
                .line(&format!("v, err2 := {}", parse_call))
                .block("if err2 != nil {", "}", |b| {
                    b.line(&format!(
                        "err = goa.MergeErrors(err, goa.InvalidFieldTypeError({}, {}, {}))",
                        go_quote(wire_name),
                        raw,
                        go_quote(spec.kind_label)
                    ))
                });
            let value = match spec.cast {
                Some(cast) => format!("{}(v)", cast),
                None => "v".to_string(),
            };
            if pointer {
                if spec.cast.is_some() {
                    b.line(&format!("pv := {}", value))
                        .line(&format!("{} = &pv", var))
                        .build()
                } else {
                    b.line(&format!("{} = &v", var)).build()
                }
            } else {
                b.line(&format!("{} = {}", var, value)).build()
            }
        }
        None => CodeBuilder::go()
            .line(&format!("// unsupported type {} for var {}", prim.as_str(), var))
            .build(),
    }
}

/// The statements assigning `{target}[i]` from the loop element `rv`.
pub fn slice_item_conversion(
    imports: &mut ImportCollector,
    target: &str,
    wire_name: &str,
    elem: Primitive,
) -> String {
    match conversion(elem) {
        Some(Conversion::Verbatim) => CodeBuilder::go()
            .line(&format!("{}[i] = rv", target))
            .build(),
        Some(Conversion::Bytes) => CodeBuilder::go()
            .line(&format!("{}[i] = []byte(rv)", target))
            .build(),
        Some(Conversion::Parse(spec)) => {
            imports.add(ImportSpec::new("strconv"));
            imports.add(ImportSpec::aliased("goa.design/goa", "goa"));
            let parse_call = match spec.func {
                ParseFunc::Int => format!("strconv.ParseInt(rv, 10, {})", bits_expr(spec.bits)),
                ParseFunc::Uint => format!("strconv.ParseUint(rv, 10, {})", bits_expr(spec.bits)),
                ParseFunc::Float => format!("strconv.ParseFloat(rv, {})", bits_expr(spec.bits)),
                ParseFunc::Bool => "strconv.ParseBool(rv)".to_string(),
            };
            let value = match spec.cast {
                Some(cast) => format!("{}(v)", cast),
                None => "v".to_string(),
            };
            CodeBuilder::go()
                .line(&format!("v, err2 := {}", parse_call))
                .block("if err2 != nil {", "}", |b| {
                    b.line(&format!(
                        "err = goa.MergeErrors(err, goa.InvalidFieldTypeError({}, rv, {}))",
                        go_quote(wire_name),
                        go_quote(array_kind_label(elem))
                    ))
                })
                .line(&format!("{}[i] = {}", target, value))
                .build()
        }
        None => CodeBuilder::go()
            .line(&format!(
                "// unsupported slice type {} for var {}",
                elem.as_str(),
                target
            ))
            .build(),
    }
}

/// Convert the raw multi-value `{var}Raw` into the slice `{var}`.
pub fn slice_conversion(
    imports: &mut ImportCollector,
    var: &str,
    wire_name: &str,
    ty: &DataType,
    mapper: &GoTypeMapper,
) -> String {
    let elem = ty.elem().and_then(|e| e.as_primitive());
    let Some(elem) = elem else {
        return format!("// unsupported slice element type for var {}\n", var);
    };
    let items = slice_item_conversion(imports, var, wire_name, elem);
    CodeBuilder::go()
        .line(&format!(
            "{} = make({}, len({}Raw))",
            var,
            mapper.type_ref(ty),
            var
        ))
        .line(&format!("for i, rv := range {}Raw {{", var))
        .indent()
        .lines(items.trim_end())
        .dedent()
        .line("}")
        .build()
}

/// Split a comma-separated path segment and convert each element.
pub fn path_slice_conversion(
    imports: &mut ImportCollector,
    var: &str,
    wire_name: &str,
    ty: &DataType,
    mapper: &GoTypeMapper,
) -> String {
    let elem = ty.elem().and_then(|e| e.as_primitive());
    let Some(elem) = elem else {
        return format!("// unsupported slice element type for var {}\n", var);
    };
    imports.add(ImportSpec::new("strings"));
    let items = slice_item_conversion(imports, var, wire_name, elem);
    CodeBuilder::go()
        .line(&format!(
            "{}RawSlice := strings.Split({}Raw, \",\")",
            var, var
        ))
        .line(&format!(
            "{} = make({}, len({}RawSlice))",
            var,
            mapper.type_ref(ty),
            var
        ))
        .line(&format!("for i, rv := range {}RawSlice {{", var))
        .indent()
        .lines(items.trim_end())
        .dedent()
        .line("}")
        .build()
}

/// Convert the query multi-map into a map param, handling key conversion
/// and single- or slice-valued elements.
pub fn map_conversion(
    imports: &mut ImportCollector,
    var: &str,
    wire_name: &str,
    ty: &DataType,
    mapper: &GoTypeMapper,
) -> String {
    let DataType::Map { key, elem } = ty else {
        return format!("// unsupported type for var {}\n", var);
    };
    let key_prim = key.as_primitive();
    let string_key = key_prim == Some(Primitive::String);

    let make_line = format!("{} = make({}, len({}Raw))", var, mapper.type_ref(ty), var);

    // Slice-valued elements convert each element into a fresh sub-slice.
    if let DataType::Array(inner) = elem.as_ref() {
        let Some(inner_prim) = inner.as_primitive() else {
            return format!("// unsupported map element type for var {}\n", var);
        };
        let key_loop = if string_key { "key" } else { "keyRaw" };
        let mut b = CodeBuilder::go().line(&make_line).line(&format!(
            "for {}, valRaw := range {}Raw {{",
            key_loop, var
        ));
        b = b.indent();
        if !string_key {
            let conv = type_conversion(
                imports,
                "key",
                wire_name,
                key_prim.unwrap_or(Primitive::String),
                false,
            );
            b = b
                .line(&format!("var key {}", mapper.type_ref(key)))
                .line("{")
                .indent()
                .lines(conv.trim_end())
                .dedent()
                .line("}");
        }
        let items = slice_item_conversion(imports, "val", wire_name, inner_prim);
        b = b
            .line(&format!("var val []{}", mapper.type_ref(inner)))
            .line("{")
            .indent()
            .line(&format!("val = make([]{}, len(valRaw))", mapper.type_ref(inner)))
            .line("for i, rv := range valRaw {")
            .indent()
            .lines(items.trim_end())
            .dedent()
            .line("}")
            .dedent()
            .line("}")
            .line(&format!("{}[key] = val", var));
        return b.dedent().line("}").build();
    }

    let Some(elem_prim) = elem.as_primitive() else {
        return format!("// unsupported map element type for var {}\n", var);
    };

    let key_loop = if string_key { "key" } else { "keyRaw" };
    let mut b = CodeBuilder::go()
        .line(&make_line)
        .line(&format!("for {}, va := range {}Raw {{", key_loop, var));
    b = b.indent();
    if !string_key {
        let conv = type_conversion(
            imports,
            "key",
            wire_name,
            key_prim.unwrap_or(Primitive::String),
            false,
        );
        b = b
            .line(&format!("var key {}", mapper.type_ref(key)))
            .line("{")
            .indent()
            .lines(conv.trim_end())
            .dedent()
            .line("}");
    }
    b = b.line(&format!("var val {}", mapper.type_ref(elem)));
    if elem_prim == Primitive::String {
        b = b.line("{").indent().line("val = va[0]").dedent().line("}");
    } else {
        let conv = type_conversion(imports, "val", wire_name, elem_prim, false);
        b = b
            .line("{")
            .indent()
            .line("valRaw := va[0]")
            .lines(conv.trim_end())
            .dedent()
            .line("}");
    }
    b.line(&format!("{}[key] = val", var))
        .dedent()
        .line("}")
        .build()
}

/// Render a typed value back to its canonical wire string for a response
/// header. Mirrors the decode table in reverse; arrays join with ", ".
pub fn header_conversion(
    imports: &mut ImportCollector,
    var_name: &str,
    target: &str,
    required: bool,
    ty: &DataType,
) -> String {
    let deref = if required { "" } else { "*" };
    let target_expr = format!("{}{}", deref, target);

    if let DataType::Array(elem) = ty {
        imports.add(ImportSpec::new("strings"));
        if elem.as_primitive() == Some(Primitive::String) {
            return CodeBuilder::go()
                .line(&format!(
                    "{} := strings.Join({}, \", \")",
                    var_name, target
                ))
                .build();
        }
        let Some(_) = elem.as_primitive() else {
            return format!("// unsupported header slice type for {}\n", var_name);
        };
        let inner = header_conversion(imports, "es", "e", true, elem);
        return CodeBuilder::go()
            .line(&format!("{}Slice := make([]string, len({}))", var_name, target))
            .line(&format!("for i, e := range {} {{", target))
            .indent()
            .lines(inner.trim_end())
            .line(&format!("{}Slice[i] = es", var_name))
            .dedent()
            .line("}")
            .line(&format!(
                "{} := strings.Join({}Slice, \", \")",
                var_name, var_name
            ))
            .build();
    }

    let Some(prim) = ty.as_primitive() else {
        return format!("// unsupported header type for {}\n", var_name);
    };
    let line = match format(prim) {
        Some(Format::Bool) => {
            imports.add(ImportSpec::new("strconv"));
            format!("{} := strconv.FormatBool({})", var_name, target_expr)
        }
        Some(Format::Itoa) => {
            imports.add(ImportSpec::new("strconv"));
            format!("{} := strconv.Itoa({})", var_name, target_expr)
        }
        Some(Format::Int { cast }) => {
            imports.add(ImportSpec::new("strconv"));
            if cast {
                format!("{} := strconv.FormatInt(int64({}), 10)", var_name, target_expr)
            } else {
                format!("{} := strconv.FormatInt({}, 10)", var_name, target_expr)
            }
        }
        Some(Format::Uint { cast }) => {
            imports.add(ImportSpec::new("strconv"));
            if cast {
                format!(
                    "{} := strconv.FormatUint(uint64({}), 10)",
                    var_name, target_expr
                )
            } else {
                format!("{} := strconv.FormatUint({}, 10)", var_name, target_expr)
            }
        }
        Some(Format::Float { bits }) => {
            imports.add(ImportSpec::new("strconv"));
            let width = match bits {
                BitSize::B32 => "32",
                _ => "64",
            };
            if bits == BitSize::B32 {
                format!(
                    "{} := strconv.FormatFloat(float64({}), 'f', -1, {})",
                    var_name, target_expr, width
                )
            } else {
                format!(
                    "{} := strconv.FormatFloat({}, 'f', -1, {})",
                    var_name, target_expr, width
                )
            }
        }
        Some(Format::Verbatim) => format!("{} := {}", var_name, target_expr),
        Some(Format::Bytes) => format!("{} := string({})", var_name, target),
        Some(Format::Sprintf) => {
            imports.add(ImportSpec::new("fmt"));
            format!("{} := fmt.Sprintf(\"%v\", {})", var_name, target)
        }
        None => format!("// unsupported header type for {}", var_name),
    };
    CodeBuilder::go().line(&line).build()
}

/// Render the checks for declared validations against a target expression.
///
/// `deref` prepends `*` to the target for pointer-typed sources; the caller
/// wraps the result in a nil guard for optional values.
pub fn validation_code(
    imports: &mut ImportCollector,
    name: &str,
    target: &str,
    ty: &DataType,
    validation: &Validation,
    deref: bool,
) -> String {
    let t = if deref {
        format!("*{}", target)
    } else {
        target.to_string()
    };
    let mut b = CodeBuilder::go();

    if !validation.enum_values.is_empty() {
        imports.add(ImportSpec::aliased("goa.design/goa", "goa"));
        let tests: Vec<String> = validation
            .enum_values
            .iter()
            .map(|v| format!("{} == {}", t, enum_literal(v)))
            .collect();
        let values: Vec<String> = validation
            .enum_values
            .iter()
            .map(|v| enum_literal(v))
            .collect();
        b = b
            .line(&format!("if !({}) {{", tests.join(" || ")))
            .indent()
            .line(&format!(
                "err = goa.MergeErrors(err, goa.InvalidEnumValueError({}, {}, []interface{{}}{{{}}}))",
                go_quote(name),
                t,
                values.join(", ")
            ))
            .dedent()
            .line("}");
    }

    if let Some(pattern) = &validation.pattern {
        imports.add(ImportSpec::new("regexp"));
        imports.add(ImportSpec::aliased("goa.design/goa", "goa"));
        b = b
            .line(&format!(
                "if ok, _ := regexp.MatchString({}, {}); !ok {{",
                go_quote(pattern),
                t
            ))
            .indent()
            .line(&format!(
                "err = goa.MergeErrors(err, goa.InvalidPatternError({}, {}, {}))",
                go_quote(name),
                t,
                go_quote(pattern)
            ))
            .dedent()
            .line("}");
    }

    let is_string = ty.as_primitive() == Some(Primitive::String);
    if validation.min_length.is_some() || validation.max_length.is_some() {
        if is_string {
            imports.add(ImportSpec::new("unicode/utf8"));
        }
    }
    let len_expr = if is_string {
        format!("utf8.RuneCountInString({})", t)
    } else {
        format!("len({})", t)
    };
    if let Some(min) = validation.min_length {
        imports.add(ImportSpec::aliased("goa.design/goa", "goa"));
        b = b
            .line(&format!("if {} < {} {{", len_expr, min))
            .indent()
            .line(&format!(
                "err = goa.MergeErrors(err, goa.InvalidLengthError({}, {}, {}, {}, true))",
                go_quote(name),
                t,
                len_expr,
                min
            ))
            .dedent()
            .line("}");
    }
    if let Some(max) = validation.max_length {
        imports.add(ImportSpec::aliased("goa.design/goa", "goa"));
        b = b
            .line(&format!("if {} > {} {{", len_expr, max))
            .indent()
            .line(&format!(
                "err = goa.MergeErrors(err, goa.InvalidLengthError({}, {}, {}, {}, false))",
                go_quote(name),
                t,
                len_expr,
                max
            ))
            .dedent()
            .line("}");
    }

    if let Some(min) = validation.minimum {
        imports.add(ImportSpec::aliased("goa.design/goa", "goa"));
        b = b
            .line(&format!("if {} < {} {{", t, fmt_number(min)))
            .indent()
            .line(&format!(
                "err = goa.MergeErrors(err, goa.InvalidRangeError({}, {}, {}, true))",
                go_quote(name),
                t,
                fmt_number(min)
            ))
            .dedent()
            .line("}");
    }
    if let Some(max) = validation.maximum {
        imports.add(ImportSpec::aliased("goa.design/goa", "goa"));
        b = b
            .line(&format!("if {} > {} {{", t, fmt_number(max)))
            .indent()
            .line(&format!(
                "err = goa.MergeErrors(err, goa.InvalidRangeError({}, {}, {}, false))",
                go_quote(name),
                t,
                fmt_number(max)
            ))
            .dedent()
            .line("}");
    }

    b.build()
}

fn enum_literal(v: &DefaultValue) -> String {
    match v {
        DefaultValue::String(s) => go_quote(s),
        other => other.to_wire_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> GoTypeMapper {
        GoTypeMapper::new("service")
    }

    #[test]
    fn test_int_conversion() {
        let mut imports = ImportCollector::new();
        let code = type_conversion(&mut imports, "id", "id", Primitive::Int, false);
        assert!(code.contains("v, err2 := strconv.ParseInt(idRaw, 10, strconv.IntSize)"));
        assert!(code.contains("goa.InvalidFieldTypeError(\"id\", idRaw, \"integer\")"));
        assert!(code.contains("id = int(v)"));
        assert!(imports.has("strconv"));
    }

    #[test]
    fn test_pointer_conversion_with_cast() {
        let mut imports = ImportCollector::new();
        let code = type_conversion(&mut imports, "count", "count", Primitive::Int32, true);
        assert!(code.contains("pv := int32(v)"));
        assert!(code.contains("count = &pv"));
    }

    #[test]
    fn test_pointer_conversion_without_cast() {
        let mut imports = ImportCollector::new();
        let code = type_conversion(&mut imports, "size", "size", Primitive::Int64, true);
        assert!(code.contains("size = &v"));
        assert!(!code.contains("pv :="));
    }

    #[test]
    fn test_bool_conversion() {
        let mut imports = ImportCollector::new();
        let code = type_conversion(&mut imports, "debug", "debug", Primitive::Bool, false);
        assert!(code.contains("strconv.ParseBool(debugRaw)"));
        assert!(code.contains("\"boolean\""));
        assert!(code.contains("debug = v"));
    }

    #[test]
    fn test_bytes_conversion() {
        let mut imports = ImportCollector::new();
        let code = type_conversion(&mut imports, "data", "data", Primitive::Bytes, false);
        assert_eq!(code, "data = []byte(dataRaw)\n");
        assert!(imports.is_empty());
    }

    #[test]
    fn test_slice_conversion() {
        let mut imports = ImportCollector::new();
        let ty = DataType::array(DataType::Primitive(Primitive::UInt32));
        let code = slice_conversion(&mut imports, "ids", "ids", &ty, &mapper());
        assert!(code.contains("ids = make([]uint32, len(idsRaw))"));
        assert!(code.contains("for i, rv := range idsRaw {"));
        assert!(code.contains("strconv.ParseUint(rv, 10, 32)"));
        assert!(code.contains("\"array of unsigned integers\""));
        assert!(code.contains("ids[i] = uint32(v)"));
    }

    #[test]
    fn test_path_slice_splits_on_comma() {
        let mut imports = ImportCollector::new();
        let ty = DataType::array(DataType::Primitive(Primitive::Int));
        let code = path_slice_conversion(&mut imports, "ids", "ids", &ty, &mapper());
        assert!(code.contains("idsRawSlice := strings.Split(idsRaw, \",\")"));
        assert!(imports.has("strings"));
    }

    #[test]
    fn test_map_conversion_non_string_key() {
        let mut imports = ImportCollector::new();
        let ty = DataType::map(
            DataType::Primitive(Primitive::Int),
            DataType::Primitive(Primitive::String),
        );
        let code = map_conversion(&mut imports, "filters", "filters", &ty, &mapper());
        assert!(code.contains("filters = make(map[int]string, len(filtersRaw))"));
        assert!(code.contains("for keyRaw, va := range filtersRaw {"));
        assert!(code.contains("var key int"));
        assert!(code.contains("val = va[0]"));
    }

    #[test]
    fn test_header_conversion_joins_arrays() {
        let mut imports = ImportCollector::new();
        let ty = DataType::array(DataType::Primitive(Primitive::String));
        let code = header_conversion(&mut imports, "vals", "val", true, &ty);
        assert_eq!(code, "vals := strings.Join(val, \", \")\n");
    }

    #[test]
    fn test_header_conversion_numeric_array() {
        let mut imports = ImportCollector::new();
        let ty = DataType::array(DataType::Primitive(Primitive::Int));
        let code = header_conversion(&mut imports, "counts", "val", true, &ty);
        assert!(code.contains("countsSlice := make([]string, len(val))"));
        assert!(code.contains("es := strconv.Itoa(e)"));
        assert!(code.contains("counts := strings.Join(countsSlice, \", \")"));
    }

    #[test]
    fn test_header_conversion_optional_derefs() {
        let mut imports = ImportCollector::new();
        let ty = DataType::Primitive(Primitive::Float32);
        let code = header_conversion(&mut imports, "ratios", "val", false, &ty);
        assert!(code.contains("strconv.FormatFloat(float64(*val), 'f', -1, 32)"));
    }

    #[test]
    fn test_validation_enum() {
        let mut imports = ImportCollector::new();
        let validation = Validation {
            enum_values: vec![
                DefaultValue::String("v1".into()),
                DefaultValue::String("v2".into()),
            ],
            ..Validation::default()
        };
        let code = validation_code(
            &mut imports,
            "view",
            "view",
            &DataType::Primitive(Primitive::String),
            &validation,
            false,
        );
        assert!(code.contains("if !(view == \"v1\" || view == \"v2\") {"));
        assert!(code.contains("goa.InvalidEnumValueError(\"view\", view, []interface{}{\"v1\", \"v2\"})"));
    }

    #[test]
    fn test_validation_length() {
        let mut imports = ImportCollector::new();
        let validation = Validation {
            min_length: Some(2),
            ..Validation::default()
        };
        let code = validation_code(
            &mut imports,
            "body.name",
            "body.Name",
            &DataType::Primitive(Primitive::String),
            &validation,
            true,
        );
        assert!(code.contains("utf8.RuneCountInString(*body.Name) < 2"));
        assert!(code.contains("goa.InvalidLengthError(\"body.name\", *body.Name, utf8.RuneCountInString(*body.Name), 2, true)"));
        assert!(imports.has("unicode/utf8"));
    }

    #[test]
    fn test_validation_bounds() {
        let mut imports = ImportCollector::new();
        let validation = Validation {
            minimum: Some(1.0),
            maximum: Some(100.0),
            ..Validation::default()
        };
        let code = validation_code(
            &mut imports,
            "count",
            "count",
            &DataType::Primitive(Primitive::Int),
            &validation,
            false,
        );
        assert!(code.contains("if count < 1 {"));
        assert!(code.contains("goa.InvalidRangeError(\"count\", count, 1, true)"));
        assert!(code.contains("if count > 100 {"));
        assert!(code.contains("goa.InvalidRangeError(\"count\", count, 100, false)"));
    }

    #[test]
    fn test_print_value() {
        assert_eq!(
            print_value(
                &DataType::Primitive(Primitive::Int),
                &DefaultValue::Int(42)
            ),
            "42"
        );
        assert_eq!(
            print_value(
                &DataType::array(DataType::Primitive(Primitive::String)),
                &DefaultValue::List(vec![
                    DefaultValue::String("a".into()),
                    DefaultValue::String("b".into())
                ])
            ),
            "a, b"
        );
    }

    #[test]
    #[should_panic(expected = "unsupported type")]
    fn test_print_value_rejects_objects() {
        print_value(
            &DataType::Object(Vec::new()),
            &DefaultValue::String("x".into()),
        );
    }

    #[test]
    fn test_default_literal() {
        let m = mapper();
        assert_eq!(
            default_literal(
                &DataType::Primitive(Primitive::String),
                &DefaultValue::String("test".into()),
                &m
            ),
            "\"test\""
        );
        assert_eq!(
            default_literal(
                &DataType::array(DataType::Primitive(Primitive::Int)),
                &DefaultValue::List(vec![DefaultValue::Int(1), DefaultValue::Int(2)]),
                &m
            ),
            "[]int{1, 2}"
        );
    }
}
