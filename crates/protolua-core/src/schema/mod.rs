//! Schema assembly module.
//!
//! This module walks the resolved descriptor tree and produces one layout
//! entry per declared field, combining the field's protobuf tag number with
//! the classifier's category, size estimate, and shared flag.
//!
//! ## Entry shapes
//!
//! - *normal*: a singular field, classified from its own wire kind.
//! - *array*: a repeated non-map field. The container itself is always a
//!   shared reference; the element's size and shared flag are recorded
//!   alongside so the engine knows how to lay out each slot.
//! - *map*: a map field, with key and value classified independently. Maps
//!   are always reference containers with the fixed overhead estimate.
//!
//! Entries are assembled strictly in declaration order, messages in file
//! order, files in registration order. No sorting, no deduplication:
//! declaration order is part of the output contract.

mod classify;
mod writer;

use crate::error::{Error, Result};
use crate::resolver::ResolvedDescriptors;
use prost_reflect::{Cardinality, FieldDescriptor, Kind, MessageDescriptor};
use std::fmt::Write as FmtWrite;
use tracing::{debug, trace};

pub use classify::{FieldKind, ScalarCategory};

/// Fixed byte overhead recorded for reference containers (arrays and maps),
/// independent of element kinds. Numerically aligned with the reference
/// estimate used for heap-stored scalar values.
pub const CONTAINER_SIZE: u32 = 9;

/// One generated layout entry for a declared field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSchemaEntry {
    /// Singular field stored directly in the message slot
    Normal {
        /// Declared field name
        name: String,
        /// Target scalar category
        category: ScalarCategory,
        /// Protobuf field number, carried through unchanged
        tag: u32,
        /// Worst-case serialized size in bytes
        size: u32,
        /// Whether the value is a reference to heap storage
        shared: bool,
    },
    /// Repeated non-map field; the container is always a shared reference
    Array {
        /// Declared field name
        name: String,
        /// Category of each element
        element: ScalarCategory,
        /// Protobuf field number, carried through unchanged
        tag: u32,
        /// Worst-case serialized size of one element
        element_size: u32,
        /// Whether each element is a reference to heap storage
        element_shared: bool,
    },
    /// Map field; key and value classified independently
    Map {
        /// Declared field name
        name: String,
        /// Category of the map key
        key: ScalarCategory,
        /// Category of the map value
        value: ScalarCategory,
        /// Protobuf field number, carried through unchanged
        tag: u32,
    },
}

impl FieldSchemaEntry {
    /// Builds the entry for one declared field.
    fn from_field(field: &FieldDescriptor) -> Result<Self> {
        match field.cardinality() {
            Cardinality::Repeated if field.is_map() => Self::map_entry(field),
            Cardinality::Repeated => Self::array_entry(field),
            _ => Self::normal_entry(field),
        }
    }

    fn normal_entry(field: &FieldDescriptor) -> Result<Self> {
        let category = FieldKind::from_field(field)?.category();
        let size = category.size();
        let shared = category.shared();
        Ok(FieldSchemaEntry::Normal {
            name: field.name().to_string(),
            tag: field.number(),
            size,
            shared,
            category,
        })
    }

    fn array_entry(field: &FieldDescriptor) -> Result<Self> {
        let element = FieldKind::from_field(field)?.category();
        let element_size = element.size();
        let element_shared = element.shared();
        Ok(FieldSchemaEntry::Array {
            name: field.name().to_string(),
            tag: field.number(),
            element_size,
            element_shared,
            element,
        })
    }

    fn map_entry(field: &FieldDescriptor) -> Result<Self> {
        let Kind::Message(entry) = field.kind() else {
            return Err(Error::malformed_map_entry(field.full_name()));
        };
        if !entry.is_map_entry() {
            return Err(Error::malformed_map_entry(field.full_name()));
        }
        let key = FieldKind::from_field(&entry.map_entry_key_field())?.category();
        let value = FieldKind::from_field(&entry.map_entry_value_field())?.category();
        Ok(FieldSchemaEntry::Map {
            name: field.name().to_string(),
            tag: field.number(),
            key,
            value,
        })
    }

    /// Declared field name
    pub fn name(&self) -> &str {
        match self {
            FieldSchemaEntry::Normal { name, .. }
            | FieldSchemaEntry::Array { name, .. }
            | FieldSchemaEntry::Map { name, .. } => name,
        }
    }

    /// Protobuf field number
    pub fn tag(&self) -> u32 {
        match self {
            FieldSchemaEntry::Normal { tag, .. }
            | FieldSchemaEntry::Array { tag, .. }
            | FieldSchemaEntry::Map { tag, .. } => *tag,
        }
    }

    /// Byte-size estimate recorded for the entry.
    ///
    /// Containers always use the fixed [`CONTAINER_SIZE`] overhead.
    pub fn size(&self) -> u32 {
        match self {
            FieldSchemaEntry::Normal { size, .. } => *size,
            FieldSchemaEntry::Array { .. } | FieldSchemaEntry::Map { .. } => CONTAINER_SIZE,
        }
    }

    /// Whether the entry's storage is a shared reference.
    ///
    /// Containers are always shared, independent of their element kinds.
    pub fn shared(&self) -> bool {
        match self {
            FieldSchemaEntry::Normal { shared, .. } => *shared,
            FieldSchemaEntry::Array { .. } | FieldSchemaEntry::Map { .. } => true,
        }
    }
}

/// Complete schema for one message: entries in field-declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSchema {
    /// Message short name, unique within the schema namespace
    pub name: String,
    /// One entry per declared field, in declaration order
    pub entries: Vec<FieldSchemaEntry>,
}

impl MessageSchema {
    fn from_message(message: &MessageDescriptor) -> Result<Self> {
        // Walk the raw descriptor's field list: it preserves declaration
        // order, which is part of the output contract.
        let raw_fields = &message.descriptor_proto().field;
        let mut entries = Vec::with_capacity(raw_fields.len());
        for raw in raw_fields {
            let number = raw.number() as u32;
            let field = message
                .get_field(number)
                .ok_or_else(|| Error::unknown_field(message.full_name(), number))?;
            trace!("classifying field '{}'", field.full_name());
            entries.push(FieldSchemaEntry::from_field(&field)?);
        }
        Ok(Self {
            name: message.name().to_string(),
            entries,
        })
    }
}

/// Generated schema table for one namespace: message schemas in
/// declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaTable {
    /// The schema namespace (protobuf package) this table was built from
    pub namespace: String,
    /// One schema per top-level message, in declaration order
    pub messages: Vec<MessageSchema>,
}

impl SchemaTable {
    /// Assembles the schema table for every top-level message declared in
    /// the namespace's definition files.
    pub fn build(resolved: &ResolvedDescriptors, namespace: &str) -> Result<Self> {
        let mut messages = Vec::new();
        for file in resolved.files_in_package(namespace) {
            debug!("assembling schemas from '{}'", file.name());
            for message in file.messages() {
                messages.push(MessageSchema::from_message(&message)?);
            }
        }

        debug!(
            "assembled {} message schema(s) in namespace '{}'",
            messages.len(),
            namespace
        );

        Ok(Self {
            namespace: namespace.to_string(),
            messages,
        })
    }

    /// Renders the generated Lua artifact as a string.
    pub fn render(&self) -> String {
        let mut output = String::new();
        self.write_to(&mut output).expect("String write cannot fail");
        output
    }

    /// Writes the generated Lua artifact to a writer.
    pub fn write_to(&self, w: &mut impl FmtWrite) -> std::fmt::Result {
        writer::LuaTableWriter::new(w).write_table(self)
    }
}
