//! Field wire-kind classification.
//!
//! This module maps a field's protobuf wire kind onto the small set of
//! scalar categories the runtime table engine understands, together with a
//! worst-case serialized size estimate and a shared-storage flag.
//!
//! The mapping is deliberately a single chain: a wire kind resolves to one
//! [`ScalarCategory`], and size and sharedness are derived from the category
//! alone. Keeping size/shared as category lookups (rather than independent
//! branches over the kind) guarantees the three properties cannot drift out
//! of sync.
//!
//! | Category | Wire kinds                          | Size | Shared |
//! |----------|-------------------------------------|------|--------|
//! | bool     | bool                                | 2    | no     |
//! | int32    | int32, sint32, sfixed32, enum       | 5    | no     |
//! | int64    | int64, sint64, sfixed64             | 9    | no     |
//! | uint32   | uint32, fixed32                     | 5    | no     |
//! | uint64   | uint64, fixed64                     | 9    | no     |
//! | float    | float                               | 5    | no     |
//! | double   | double                              | 9    | no     |
//! | string   | string, bytes                       | 9    | yes    |
//! | message  | message (named type reference)      | 9    | yes    |
//!
//! The size estimates model a worst-case payload plus one tag/length byte;
//! string and message categories always get the reference estimate of 9
//! because they are never stored inline.

use crate::error::{Error, Result};
use prost_reflect::{FieldDescriptor, Kind};
use prost_types::field_descriptor_proto::Type;

/// Wire-level kind of a field, as declared in the definition file.
///
/// This is the supported subset of protobuf field types. Constructing a
/// `FieldKind` from a descriptor is the single point where unsupported
/// kinds (currently only the legacy `group` encoding) are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// `bool`
    Bool,
    /// `int32`
    Int32,
    /// `sint32` (zig-zag)
    Sint32,
    /// `sfixed32`
    Sfixed32,
    /// `int64`
    Int64,
    /// `sint64` (zig-zag)
    Sint64,
    /// `sfixed64`
    Sfixed64,
    /// `uint32`
    Uint32,
    /// `fixed32`
    Fixed32,
    /// `uint64`
    Uint64,
    /// `fixed64`
    Fixed64,
    /// `float`
    Float,
    /// `double`
    Double,
    /// `string`
    String,
    /// `bytes`
    Bytes,
    /// enumeration (carried on the wire as int32)
    Enum,
    /// nested message, holding the referenced message's short name
    Message(String),
}

impl FieldKind {
    /// Resolves the wire kind of a field descriptor.
    ///
    /// Fails with [`Error::UnsupportedKind`] if the field uses a protobuf
    /// feature outside the supported set.
    pub fn from_field(field: &FieldDescriptor) -> Result<Self> {
        match field.field_descriptor_proto().r#type() {
            Type::Bool => Ok(FieldKind::Bool),
            Type::Int32 => Ok(FieldKind::Int32),
            Type::Sint32 => Ok(FieldKind::Sint32),
            Type::Sfixed32 => Ok(FieldKind::Sfixed32),
            Type::Int64 => Ok(FieldKind::Int64),
            Type::Sint64 => Ok(FieldKind::Sint64),
            Type::Sfixed64 => Ok(FieldKind::Sfixed64),
            Type::Uint32 => Ok(FieldKind::Uint32),
            Type::Fixed32 => Ok(FieldKind::Fixed32),
            Type::Uint64 => Ok(FieldKind::Uint64),
            Type::Fixed64 => Ok(FieldKind::Fixed64),
            Type::Float => Ok(FieldKind::Float),
            Type::Double => Ok(FieldKind::Double),
            Type::String => Ok(FieldKind::String),
            Type::Bytes => Ok(FieldKind::Bytes),
            Type::Enum => Ok(FieldKind::Enum),
            Type::Message => match field.kind() {
                Kind::Message(message) => Ok(FieldKind::Message(message.name().to_string())),
                kind => Err(Error::descriptor_build(format!(
                    "field '{}' has message type but resolved kind {:?}",
                    field.full_name(),
                    kind
                ))),
            },
            Type::Group => Err(Error::unsupported_kind(field.full_name(), "group")),
        }
    }

    /// Maps this wire kind to its target scalar category.
    ///
    /// Total over the enumeration: every supported kind has exactly one
    /// category. Bytes merges into the string category and enumerations
    /// are carried as int32.
    pub fn category(&self) -> ScalarCategory {
        match self {
            FieldKind::Bool => ScalarCategory::Bool,
            FieldKind::Int32 | FieldKind::Sint32 | FieldKind::Sfixed32 | FieldKind::Enum => {
                ScalarCategory::Int32
            }
            FieldKind::Int64 | FieldKind::Sint64 | FieldKind::Sfixed64 => ScalarCategory::Int64,
            FieldKind::Uint32 | FieldKind::Fixed32 => ScalarCategory::Uint32,
            FieldKind::Uint64 | FieldKind::Fixed64 => ScalarCategory::Uint64,
            FieldKind::Float => ScalarCategory::Float,
            FieldKind::Double => ScalarCategory::Double,
            FieldKind::String | FieldKind::Bytes => ScalarCategory::String,
            FieldKind::Message(name) => ScalarCategory::Message(name.clone()),
        }
    }
}

/// Target scalar category a wire kind maps onto.
///
/// The closed set of value shapes the table engine lays out. `Message`
/// carries the referenced message's short name, used as a type reference
/// rather than a primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarCategory {
    /// Boolean value
    Bool,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 32-bit unsigned integer
    Uint32,
    /// 64-bit unsigned integer
    Uint64,
    /// 32-bit float
    Float,
    /// 64-bit float
    Double,
    /// Text or binary string
    String,
    /// Reference to another generated message schema
    Message(String),
}

impl ScalarCategory {
    /// Returns the category name as it appears in the generated table.
    pub fn name(&self) -> &str {
        match self {
            ScalarCategory::Bool => "bool",
            ScalarCategory::Int32 => "int32",
            ScalarCategory::Int64 => "int64",
            ScalarCategory::Uint32 => "uint32",
            ScalarCategory::Uint64 => "uint64",
            ScalarCategory::Float => "float",
            ScalarCategory::Double => "double",
            ScalarCategory::String => "string",
            ScalarCategory::Message(name) => name,
        }
    }

    /// Maximum bytes a value of this category may occupy in the engine's
    /// binary format.
    ///
    /// An upper bound for pre-sizing fixed buffers, not an exact encoded
    /// length: worst-case payload plus one tag/length byte. String and
    /// message values always get the reference estimate since they are
    /// never stored inline.
    pub fn size(&self) -> u32 {
        match self {
            ScalarCategory::Bool => 2,
            ScalarCategory::Int32 | ScalarCategory::Uint32 | ScalarCategory::Float => 5,
            ScalarCategory::Int64
            | ScalarCategory::Uint64
            | ScalarCategory::Double
            | ScalarCategory::String
            | ScalarCategory::Message(_) => 9,
        }
    }

    /// Whether values of this category are stored as a reference to
    /// heap-allocated memory rather than an inline fixed-size value.
    pub fn shared(&self) -> bool {
        matches!(self, ScalarCategory::String | ScalarCategory::Message(_))
    }
}
