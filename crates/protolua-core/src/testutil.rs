//! Hand-built descriptor fixtures shared across unit tests.
//!
//! Tests construct `FileDescriptorProto` values directly instead of shelling
//! out to protoc, so the suite runs without the external compiler installed.

use prost_reflect::DescriptorPool;
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, FieldDescriptorProto,
    FileDescriptorProto, FileDescriptorSet, MessageOptions,
};

/// A proto3 definition file with the given package and top-level messages.
pub(crate) fn proto3_file(
    name: &str,
    package: &str,
    messages: Vec<DescriptorProto>,
) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(name.to_string()),
        package: Some(package.to_string()),
        syntax: Some("proto3".to_string()),
        message_type: messages,
        ..Default::default()
    }
}

/// A proto2 definition file, needed for legacy constructs such as groups.
pub(crate) fn proto2_file(
    name: &str,
    package: &str,
    messages: Vec<DescriptorProto>,
) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(name.to_string()),
        package: Some(package.to_string()),
        syntax: Some("proto2".to_string()),
        message_type: messages,
        ..Default::default()
    }
}

/// A proto3 file that imports the named dependencies.
pub(crate) fn proto3_file_with_deps(
    name: &str,
    package: &str,
    deps: &[&str],
    messages: Vec<DescriptorProto>,
) -> FileDescriptorProto {
    let mut file = proto3_file(name, package, messages);
    file.dependency = deps.iter().map(|d| d.to_string()).collect();
    file
}

/// A message with the given declared fields.
pub(crate) fn message(name: &str, fields: Vec<FieldDescriptorProto>) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_string()),
        field: fields,
        ..Default::default()
    }
}

/// A singular scalar field.
pub(crate) fn scalar_field(name: &str, number: i32, ty: Type) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        label: Some(Label::Optional as i32),
        r#type: Some(ty as i32),
        ..Default::default()
    }
}

/// A repeated scalar field.
pub(crate) fn repeated_field(name: &str, number: i32, ty: Type) -> FieldDescriptorProto {
    let mut field = scalar_field(name, number, ty);
    field.label = Some(Label::Repeated as i32);
    field
}

/// A singular field referencing a message type by fully-qualified name.
pub(crate) fn message_field(name: &str, number: i32, type_name: &str) -> FieldDescriptorProto {
    let mut field = scalar_field(name, number, Type::Message);
    field.type_name = Some(type_name.to_string());
    field
}

/// The synthetic nested entry message a `map<K, V>` field desugars to.
pub(crate) fn map_entry(name: &str, key_ty: Type, value_ty: Type) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_string()),
        field: vec![
            scalar_field("key", 1, key_ty),
            scalar_field("value", 2, value_ty),
        ],
        options: Some(MessageOptions {
            map_entry: Some(true),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// A map field referencing its synthetic entry message.
pub(crate) fn map_field(name: &str, number: i32, entry_type_name: &str) -> FieldDescriptorProto {
    let mut field = message_field(name, number, entry_type_name);
    field.label = Some(Label::Repeated as i32);
    field
}

/// An enumeration with a single zero value, the minimum proto3 allows.
pub(crate) fn enum_type(name: &str) -> EnumDescriptorProto {
    EnumDescriptorProto {
        name: Some(name.to_string()),
        value: vec![EnumValueDescriptorProto {
            name: Some(format!("{}_UNSPECIFIED", name.to_uppercase())),
            number: Some(0),
            ..Default::default()
        }],
        ..Default::default()
    }
}

/// A singular field referencing an enumeration by fully-qualified name.
pub(crate) fn enum_field(name: &str, number: i32, type_name: &str) -> FieldDescriptorProto {
    let mut field = scalar_field(name, number, Type::Enum);
    field.type_name = Some(type_name.to_string());
    field
}

/// Resolves the given files into a descriptor pool, panicking on invalid
/// fixtures.
pub(crate) fn pool_of(files: Vec<FileDescriptorProto>) -> DescriptorPool {
    DescriptorPool::from_file_descriptor_set(FileDescriptorSet { file: files })
        .expect("test fixture descriptors must resolve")
}
