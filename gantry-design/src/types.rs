//! Attribute types and validations.

/// Wire-level primitive types supported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Int,
    Int32,
    Int64,
    UInt,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Bool,
    String,
    Bytes,
    Any,
}

impl Primitive {
    /// Get the wire name of this primitive.
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::Int => "int",
            Primitive::Int32 => "int32",
            Primitive::Int64 => "int64",
            Primitive::UInt => "uint",
            Primitive::UInt32 => "uint32",
            Primitive::UInt64 => "uint64",
            Primitive::Float32 => "float32",
            Primitive::Float64 => "float64",
            Primitive::Bool => "boolean",
            Primitive::String => "string",
            Primitive::Bytes => "bytes",
            Primitive::Any => "any",
        }
    }

    /// Returns true if raw wire values of this primitive are used verbatim,
    /// without a parse step that can fail.
    pub fn is_verbatim(&self) -> bool {
        matches!(self, Primitive::String | Primitive::Any | Primitive::Bytes)
    }
}

/// The type carried by an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum DataType {
    Primitive(Primitive),
    Array(Box<DataType>),
    Map {
        key: Box<DataType>,
        elem: Box<DataType>,
    },
    Object(Vec<Attribute>),
    /// A reference to a user-declared type, resolved by name.
    Named(String),
}

impl DataType {
    /// Create an array type.
    pub fn array(elem: DataType) -> Self {
        DataType::Array(Box::new(elem))
    }

    /// Create a map type.
    pub fn map(key: DataType, elem: DataType) -> Self {
        DataType::Map {
            key: Box::new(key),
            elem: Box::new(elem),
        }
    }

    /// Get the primitive kind, if this is a primitive type.
    pub fn as_primitive(&self) -> Option<Primitive> {
        match self {
            DataType::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    /// Returns true for string and any, whose raw form needs no conversion.
    pub fn is_verbatim(&self) -> bool {
        matches!(
            self,
            DataType::Primitive(Primitive::String) | DataType::Primitive(Primitive::Any)
        )
    }

    /// Element type of an array.
    pub fn elem(&self) -> Option<&DataType> {
        match self {
            DataType::Array(elem) => Some(elem),
            _ => None,
        }
    }
}

/// A literal default value attached to an attribute or URI variable.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    String(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    List(Vec<DefaultValue>),
}

impl DefaultValue {
    /// Render the default in its canonical wire form.
    ///
    /// Lists render as comma-and-space separated elements, matching the
    /// representation used for header defaults.
    pub fn to_wire_string(&self) -> String {
        match self {
            DefaultValue::String(s) => s.clone(),
            DefaultValue::Int(i) => i.to_string(),
            DefaultValue::UInt(u) => u.to_string(),
            DefaultValue::Float(f) => f.to_string(),
            DefaultValue::Bool(b) => b.to_string(),
            DefaultValue::List(items) => items
                .iter()
                .map(DefaultValue::to_wire_string)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Declared validations on an attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Validation {
    /// Allowed values.
    pub enum_values: Vec<DefaultValue>,
    /// Regular expression the value must match.
    pub pattern: Option<String>,
    /// Minimum length (strings: rune count, collections: element count).
    pub min_length: Option<usize>,
    /// Maximum length.
    pub max_length: Option<usize>,
    /// Inclusive numeric lower bound.
    pub minimum: Option<f64>,
    /// Inclusive numeric upper bound.
    pub maximum: Option<f64>,
}

impl Validation {
    /// Returns true if no validation rule is set.
    pub fn is_empty(&self) -> bool {
        self.enum_values.is_empty()
            && self.pattern.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.minimum.is_none()
            && self.maximum.is_none()
    }
}

/// A named, typed attribute of a payload, result, or body.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Attribute name as declared in the design.
    pub name: String,
    /// Attribute type.
    pub ty: DataType,
    /// Whether the attribute must be present.
    pub required: bool,
    /// Default value, materialised on decode when the wire value is absent.
    pub default: Option<DefaultValue>,
    /// Declared validations.
    pub validation: Option<Validation>,
    /// Description used for generated comments.
    pub description: Option<String>,
}

impl Attribute {
    /// Create a required attribute with no default and no validations.
    pub fn new(name: impl Into<String>, ty: DataType) -> Self {
        Self {
            name: name.into(),
            ty,
            required: true,
            default: None,
            validation: None,
            description: None,
        }
    }

    /// Mark the attribute optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Attach a default value. Defaulted attributes are never required.
    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self.required = false;
        self
    }

    /// Attach validations.
    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validation = Some(validation);
        self
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The validation rules, if any are declared.
    pub fn validation(&self) -> Option<&Validation> {
        self.validation.as_ref().filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_as_str() {
        assert_eq!(Primitive::Int.as_str(), "int");
        assert_eq!(Primitive::Bool.as_str(), "boolean");
        assert_eq!(Primitive::Bytes.as_str(), "bytes");
    }

    #[test]
    fn test_default_value_wire_string() {
        assert_eq!(DefaultValue::Int(42).to_wire_string(), "42");
        assert_eq!(DefaultValue::Bool(true).to_wire_string(), "true");
        assert_eq!(
            DefaultValue::List(vec![
                DefaultValue::String("a".into()),
                DefaultValue::String("b".into()),
            ])
            .to_wire_string(),
            "a, b"
        );
    }

    #[test]
    fn test_attribute_default_clears_required() {
        let attr = Attribute::new("count", DataType::Primitive(Primitive::Int))
            .with_default(DefaultValue::Int(1));
        assert!(!attr.required);
        assert!(attr.default.is_some());
    }

    #[test]
    fn test_validation_is_empty() {
        assert!(Validation::default().is_empty());
        let v = Validation {
            pattern: Some("^a".into()),
            ..Validation::default()
        };
        assert!(!v.is_empty());
    }
}
