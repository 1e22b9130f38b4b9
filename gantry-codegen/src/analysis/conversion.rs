//! Data-driven wire conversion table.
//!
//! Each supported primitive maps to a small conversion description; the
//! backend renders the description instead of chaining string templates,
//! which makes the matrix directly testable.

use gantry_design::Primitive;

/// Bit width passed to the numeric parse call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitSize {
    /// The platform word size (`strconv.IntSize`).
    Platform,
    B32,
    B64,
}

/// The parse function family used for a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFunc {
    /// `strconv.ParseInt`, base 10.
    Int,
    /// `strconv.ParseUint`, base 10.
    Uint,
    /// `strconv.ParseFloat`.
    Float,
    /// `strconv.ParseBool`; accepts the canonical wire forms
    /// true/false/1/0/t/f/TRUE/FALSE/True/False.
    Bool,
}

/// A fallible string→value conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseSpec {
    pub func: ParseFunc,
    pub bits: BitSize,
    /// Narrowing cast applied to the parsed value, when the parse function
    /// returns a wider type.
    pub cast: Option<&'static str>,
    /// Kind label used in invalid-type diagnostics.
    pub kind_label: &'static str,
}

/// How a raw wire string becomes a typed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// The raw string is the value (string, any).
    Verbatim,
    /// The raw string is copied into a byte slice.
    Bytes,
    /// A parse call that can fail.
    Parse(ParseSpec),
}

/// The conversion for a primitive, or `None` when unsupported. Callers emit
/// an `// unsupported type` comment and a warning diagnostic for `None`.
pub fn conversion(p: Primitive) -> Option<Conversion> {
    use BitSize::*;
    use ParseFunc::*;
    let parse = |func, bits, cast, kind_label| {
        Some(Conversion::Parse(ParseSpec {
            func,
            bits,
            cast,
            kind_label,
        }))
    };
    match p {
        Primitive::String | Primitive::Any => Some(Conversion::Verbatim),
        Primitive::Bytes => Some(Conversion::Bytes),
        Primitive::Int => parse(Int, Platform, Some("int"), "integer"),
        Primitive::Int32 => parse(Int, B32, Some("int32"), "integer"),
        Primitive::Int64 => parse(Int, B64, None, "integer"),
        Primitive::UInt => parse(Uint, Platform, Some("uint"), "unsigned integer"),
        Primitive::UInt32 => parse(Uint, B32, Some("uint32"), "unsigned integer"),
        Primitive::UInt64 => parse(Uint, B64, None, "unsigned integer"),
        Primitive::Float32 => parse(Float, B32, Some("float32"), "float"),
        Primitive::Float64 => parse(Float, B64, None, "float"),
        Primitive::Bool => parse(Bool, Platform, None, "boolean"),
    }
}

/// The diagnostic kind label for arrays of a primitive.
pub fn array_kind_label(p: Primitive) -> &'static str {
    match p {
        Primitive::Int | Primitive::Int32 | Primitive::Int64 => "array of integers",
        Primitive::UInt | Primitive::UInt32 | Primitive::UInt64 => {
            "array of unsigned integers"
        }
        Primitive::Float32 | Primitive::Float64 => "array of floats",
        Primitive::Bool => "array of booleans",
        _ => "array",
    }
}

/// Whether decoding a value of this primitive can fail.
pub fn can_fail(p: Primitive) -> bool {
    matches!(conversion(p), Some(Conversion::Parse(_)))
}

/// How a typed value renders back to its canonical wire string, for
/// response header emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `strconv.FormatBool`.
    Bool,
    /// `strconv.Itoa`.
    Itoa,
    /// `strconv.FormatInt` base 10; cast widens to int64 first when set.
    Int { cast: bool },
    /// `strconv.FormatUint` base 10; cast widens to uint64 first when set.
    Uint { cast: bool },
    /// `strconv.FormatFloat` with 'f', -1 precision at the given width.
    Float { bits: BitSize },
    /// The value is already a string.
    Verbatim,
    /// `string(...)` over a byte slice.
    Bytes,
    /// `fmt.Sprintf("%v", ...)` for any.
    Sprintf,
}

/// The reverse conversion for a primitive, or `None` when unsupported.
pub fn format(p: Primitive) -> Option<Format> {
    match p {
        Primitive::Bool => Some(Format::Bool),
        Primitive::Int => Some(Format::Itoa),
        Primitive::Int32 => Some(Format::Int { cast: true }),
        Primitive::Int64 => Some(Format::Int { cast: false }),
        Primitive::UInt | Primitive::UInt32 => Some(Format::Uint { cast: true }),
        Primitive::UInt64 => Some(Format::Uint { cast: false }),
        Primitive::Float32 => Some(Format::Float { bits: BitSize::B32 }),
        Primitive::Float64 => Some(Format::Float { bits: BitSize::B64 }),
        Primitive::String => Some(Format::Verbatim),
        Primitive::Bytes => Some(Format::Bytes),
        Primitive::Any => Some(Format::Sprintf),
    }
}
