//! # protolua-core
//!
//! A library for compiling Protocol Buffer definitions into Lua schema
//! tables consumed by a C-side binary table engine.
//!
//! This crate provides the core functionality for:
//! - Compiling a `.proto` definition file to a binary descriptor set via
//!   the external `protoc` compiler
//! - Resolving definition files against an explicit, append-only
//!   descriptor registry (including cross-file type references)
//! - Classifying each field's wire kind into the engine's scalar
//!   categories, with worst-case size estimates and shared-storage flags
//! - Assembling and rendering the generated per-message schema tables
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`resolver`]: protoc invocation and descriptor registry/resolution
//! - [`schema`]: field classification, schema assembly, and Lua rendering
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```no_run
//! use protolua_core::{compile_proto_file, DescriptorRegistry, SchemaTable, DEFAULT_SCHEMA_PACKAGE};
//! use std::path::Path;
//!
//! let set = compile_proto_file(Path::new("./defs"), "input.proto")?;
//!
//! let mut registry = DescriptorRegistry::new();
//! registry.register_set(set)?;
//!
//! let resolved = registry.resolve()?;
//! let table = SchemaTable::build(&resolved, DEFAULT_SCHEMA_PACKAGE)?;
//! println!("{}", table.render());
//! # Ok::<(), protolua_core::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod error;
pub mod resolver;
pub mod schema;

#[cfg(test)]
mod testutil;

// Re-export primary types for convenience
pub use error::{Error, Result};
pub use resolver::{
    compile_proto_file, DescriptorRegistry, ResolvedDescriptors, DEFAULT_SCHEMA_PACKAGE,
};
pub use schema::{
    FieldKind, FieldSchemaEntry, MessageSchema, ScalarCategory, SchemaTable, CONTAINER_SIZE,
};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
