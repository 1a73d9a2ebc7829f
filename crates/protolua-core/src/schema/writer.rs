//! Lua rendering of generated schema tables.
//!
//! The artifact format mirrors what the runtime table engine loads: one
//! global Lua table per namespace, one named sub-table per message, one
//! line per field entry. Shared flags render as 0/1.

use super::{FieldSchemaEntry, MessageSchema, SchemaTable, CONTAINER_SIZE};
use std::fmt::Write as FmtWrite;

/// Marker at the head of every generated artifact
const GENERATED_HEADER: &str = "-- Generated by protolua. DO NOT EDIT!";

/// Writes a [`SchemaTable`] as a Lua source file.
pub(super) struct LuaTableWriter<'a, W: FmtWrite> {
    writer: &'a mut W,
}

impl<'a, W: FmtWrite> LuaTableWriter<'a, W> {
    pub(super) fn new(writer: &'a mut W) -> Self {
        Self { writer }
    }

    pub(super) fn write_table(&mut self, table: &SchemaTable) -> std::fmt::Result {
        let global = global_table_name(&table.namespace);
        writeln!(self.writer, "{}", GENERATED_HEADER)?;
        writeln!(self.writer, "_G.{global} = _G.{global} or {{}}")?;
        for message in &table.messages {
            self.write_message(&global, message)?;
        }
        Ok(())
    }

    fn write_message(&mut self, global: &str, message: &MessageSchema) -> std::fmt::Result {
        writeln!(self.writer, "_G.{global}.{} = {{", message.name)?;
        for entry in &message.entries {
            self.write_entry(entry)?;
        }
        writeln!(self.writer, "}}")
    }

    fn write_entry(&mut self, entry: &FieldSchemaEntry) -> std::fmt::Result {
        match entry {
            FieldSchemaEntry::Normal {
                name,
                category,
                tag,
                size,
                shared,
            } => writeln!(
                self.writer,
                "    {} = {{ type = \"normal\", key = \"{}\", tag = {}, size = {}, shared = {} }},",
                name,
                category.name(),
                tag,
                size,
                lua_flag(*shared)
            ),
            FieldSchemaEntry::Array {
                name,
                element,
                tag,
                element_size,
                element_shared,
            } => writeln!(
                self.writer,
                "    {} = {{ type = \"array\", key = \"{}\", tag = {}, size = {}, shared = 1, key_size = {}, key_shared = {} }},",
                name,
                element.name(),
                tag,
                CONTAINER_SIZE,
                element_size,
                lua_flag(*element_shared)
            ),
            FieldSchemaEntry::Map {
                name,
                key,
                value,
                tag,
            } => writeln!(
                self.writer,
                "    {} = {{ type = \"map\", key = \"{}\", value = \"{}\", tag = {}, size = {}, shared = 1 }},",
                name,
                key.name(),
                value.name(),
                tag,
                CONTAINER_SIZE
            ),
        }
    }
}

/// Derives the Lua global holding the generated tables,
/// e.g. `cpp_table` -> `CPP_TABLE_PROTO`.
fn global_table_name(namespace: &str) -> String {
    format!("{}_PROTO", namespace.to_uppercase())
}

fn lua_flag(shared: bool) -> u8 {
    shared as u8
}
