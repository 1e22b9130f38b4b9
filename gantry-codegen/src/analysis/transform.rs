//! Constructor descriptors mapping wire structs to method types and back.

use gantry_design::DataType;

/// An argument of a generated constructor.
#[derive(Debug, Clone)]
pub struct InitArg {
    /// Go argument name.
    pub name: String,
    /// Argument type.
    pub ty: DataType,
    /// Whether the argument is pointer-typed.
    pub pointer: bool,
    /// Whether the assignment into the target field takes the argument's
    /// address (value argument, pointer field).
    pub take_ref: bool,
    /// Whether a named argument type lives in the service package rather
    /// than the generated server package.
    pub service_scoped: bool,
    /// Target field assigned from this argument; `None` for the body
    /// argument consumed through field mappings.
    pub field_name: Option<String>,
}

/// How one source field copies into one target field.
#[derive(Debug, Clone, PartialEq)]
pub enum MappingKind {
    /// Same representation; plain assignment.
    Direct,
    /// Dereference the pointer source (required field decoded from a
    /// pointer body field).
    Deref,
    /// Dereference when set; materialise the default when nil.
    DerefOrDefault(gantry_design::DefaultValue),
    /// Preallocate and copy element-wise (slices and maps of primitives).
    LoopCopy,
    /// Convert through a transform helper.
    Helper(String),
    /// Preallocate and convert each element through a transform helper.
    LoopHelper(String),
}

/// A single field mapping inside a constructor body.
#[derive(Debug, Clone)]
pub struct FieldMapping {
    /// Target Go field.
    pub field: String,
    /// Source Go field on the constructor input.
    pub source_field: String,
    /// Source field type.
    pub ty: DataType,
    /// Whether the source attribute is required; optional sources get a nil
    /// guard around loop and helper copies.
    pub required: bool,
    /// Copy strategy.
    pub kind: MappingKind,
}

/// What the constructor builds from.
#[derive(Debug, Clone)]
pub enum InitSource {
    /// Build the target struct from a decoded body struct, then assign the
    /// remaining arguments.
    Body { mappings: Vec<FieldMapping> },
    /// The decoded body value is the target's single wrapped attribute.
    WrappedBody,
    /// Build a wire body struct from the method result or error value.
    Result { mappings: Vec<FieldMapping> },
}

/// A generated constructor.
#[derive(Debug, Clone)]
pub struct InitData {
    /// Constructor name (e.g. `NewShowPayload`).
    pub name: String,
    /// Comment text.
    pub description: String,
    /// Arguments in signature order.
    pub args: Vec<InitArg>,
    /// Bare name of the constructed type.
    pub return_type_name: String,
    /// Whether the constructed type lives in the service package.
    pub return_in_service_pkg: bool,
    /// Whether the constructed type is a struct (built via literal).
    pub return_is_struct: bool,
    /// Field wrapping the body value, for single-attribute bodies.
    pub return_type_attribute: Option<String>,
    /// Constructor body description.
    pub source: InitSource,
}

/// Direction of a transform helper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelperDirection {
    /// Request body type → service type.
    Unmarshal,
    /// Service type → response body type.
    Marshal,
}

/// A shared helper converting between a wire body type and a service type.
#[derive(Debug, Clone)]
pub struct TransformHelperData {
    /// Helper function name.
    pub name: String,
    /// Conversion direction.
    pub direction: HelperDirection,
    /// Wire body type name.
    pub body_type_name: String,
    /// Service type name.
    pub service_type_name: String,
    /// Field mappings applied by the helper.
    pub mappings: Vec<FieldMapping>,
}

/// The response selector evaluated against a result field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTest {
    /// Go field holding the tag on the result.
    pub field_name: String,
    /// Value selecting the response.
    pub value: String,
    /// Whether the field is required (value comparison) or optional
    /// (nil check plus dereferenced comparison).
    pub required: bool,
}
