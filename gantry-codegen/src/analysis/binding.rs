//! Binding modes and wire-shape classification for params.

use gantry_design::{DataType, Primitive};

/// How a decoded param variable holds its value.
///
/// The three-valued mode makes the interaction of `required` and
/// default values explicit; the contradictory "required and defaulted"
/// shape is rejected at validation time and cannot be constructed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamMode {
    /// The variable holds the value directly. Required params, path params,
    /// and all non-primitive shapes.
    OwnedValue,
    /// The variable is a pointer, nil when the wire value is absent.
    /// Optional primitives without a default.
    OptionalPointer,
    /// The variable holds the value directly; the default is materialised
    /// on decode when the wire value is absent.
    DefaultedValue,
}

impl ParamMode {
    /// Compute the mode for a param outside the path.
    pub fn for_param(required: bool, has_default: bool, ty: &DataType) -> Self {
        if has_default {
            ParamMode::DefaultedValue
        } else if !required && ty.as_primitive().is_some() {
            ParamMode::OptionalPointer
        } else {
            ParamMode::OwnedValue
        }
    }

    /// Path params always bind; their mode is owned regardless of flags.
    pub fn for_path_param() -> Self {
        ParamMode::OwnedValue
    }

    /// Whether the generated variable is pointer-typed.
    pub fn is_pointer(&self) -> bool {
        matches!(self, ParamMode::OptionalPointer)
    }
}

/// Wire shape of a param, selecting the decode strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamClass {
    /// A single raw value converted by the primitive rule.
    Primitive,
    /// `[]string`, read from the multi-map verbatim.
    StringSlice,
    /// An array of non-string primitives, converted element-wise.
    Slice,
    /// `map[string][]string`, the query multi-map verbatim.
    MapStringSlice,
    /// Any other map shape bound to the query string.
    Map,
    /// A map capturing the entire query multi-map.
    MapQueryParams,
}

impl ParamClass {
    /// Classify a param type. `capture_all` marks the attribute that binds
    /// the whole query multi-map.
    pub fn classify(ty: &DataType, capture_all: bool) -> Self {
        match ty {
            DataType::Array(elem) => match elem.as_primitive() {
                Some(Primitive::String) => ParamClass::StringSlice,
                _ => ParamClass::Slice,
            },
            DataType::Map { key, elem } => {
                if capture_all {
                    return ParamClass::MapQueryParams;
                }
                let string_key = key.as_primitive() == Some(Primitive::String);
                let string_slice_elem = matches!(
                    elem.as_ref(),
                    DataType::Array(inner) if inner.as_primitive() == Some(Primitive::String)
                );
                if string_key && string_slice_elem {
                    ParamClass::MapStringSlice
                } else {
                    ParamClass::Map
                }
            }
            _ => ParamClass::Primitive,
        }
    }
}
