//! Descriptor resolution module.
//!
//! This module turns compiled definition files into a navigable descriptor
//! tree. Definition files are registered into an explicit, append-only
//! [`DescriptorRegistry`] (no process-wide global state), then resolved in
//! one pass into a [`prost_reflect::DescriptorPool`].
//!
//! Registration order is free: a file may be registered before or after the
//! files it imports, as long as every import is registered by the time
//! [`DescriptorRegistry::resolve`] runs. Registering the same file name
//! twice is a fatal conflict, and resolving with a missing import is a
//! fatal unresolved-dependency error.

mod protoc;

use crate::error::{Error, Result};
use prost_reflect::{DescriptorPool, FileDescriptor};
use prost_types::{FileDescriptorProto, FileDescriptorSet};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

pub use protoc::compile_proto_file;

/// Package name of the definition files eligible for schema generation.
///
/// Only messages declared in files with this package end up in the
/// generated table; imported support files in other packages contribute
/// type definitions but no output of their own.
pub const DEFAULT_SCHEMA_PACKAGE: &str = "cpp_table";

/// Append-only registry of definition files.
///
/// Each file is registered exactly once, keyed by its declared file name.
/// The registry remembers registration order, which becomes the file
/// traversal order of the generated output.
#[derive(Debug, Default)]
pub struct DescriptorRegistry {
    files: Vec<FileDescriptorProto>,
    names: HashSet<String>,
}

impl DescriptorRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a single definition file.
    ///
    /// Fails with [`Error::DuplicateFile`] if a file with the same name
    /// was registered before.
    pub fn register(&mut self, file: FileDescriptorProto) -> Result<()> {
        let name = file.name().to_string();
        if !self.names.insert(name.clone()) {
            return Err(Error::duplicate_file(name));
        }
        trace!("registered '{}'", name);
        self.files.push(file);
        Ok(())
    }

    /// Registers every file of a compiled descriptor set, in set order.
    pub fn register_set(&mut self, set: FileDescriptorSet) -> Result<()> {
        for file in set.file {
            self.register(file)?;
        }
        Ok(())
    }

    /// Number of registered files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if no files have been registered
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Resolves all registered files into a descriptor tree.
    ///
    /// Imports are resolved by file name against the registry itself, so
    /// every transitively referenced file must have been registered.
    pub fn resolve(&self) -> Result<ResolvedDescriptors> {
        let ordered = self.topological_order()?;
        let pool = DescriptorPool::from_file_descriptor_set(FileDescriptorSet { file: ordered })
            .map_err(|e| Error::descriptor_build(e.to_string()))?;

        debug!("resolved {} file(s)", self.files.len());

        Ok(ResolvedDescriptors {
            pool,
            order: self.files.iter().map(|f| f.name().to_string()).collect(),
        })
    }

    /// Orders registered files so every file follows its imports.
    fn topological_order(&self) -> Result<Vec<FileDescriptorProto>> {
        fn visit<'a>(
            file: &'a FileDescriptorProto,
            by_name: &HashMap<&'a str, &'a FileDescriptorProto>,
            done: &mut HashSet<&'a str>,
            in_progress: &mut HashSet<&'a str>,
            ordered: &mut Vec<FileDescriptorProto>,
        ) -> Result<()> {
            if done.contains(file.name()) {
                return Ok(());
            }
            if !in_progress.insert(file.name()) {
                return Err(Error::descriptor_build(format!(
                    "import cycle through '{}'",
                    file.name()
                )));
            }
            for dep in &file.dependency {
                let dep_file = by_name
                    .get(dep.as_str())
                    .ok_or_else(|| Error::unresolved_dependency(file.name(), dep.clone()))?;
                visit(dep_file, by_name, done, in_progress, ordered)?;
            }
            in_progress.remove(file.name());
            done.insert(file.name());
            ordered.push(file.clone());
            Ok(())
        }

        let by_name: HashMap<&str, &FileDescriptorProto> =
            self.files.iter().map(|f| (f.name(), f)).collect();
        let mut ordered = Vec::with_capacity(self.files.len());
        let mut done = HashSet::new();
        let mut in_progress = HashSet::new();

        for file in &self.files {
            visit(file, &by_name, &mut done, &mut in_progress, &mut ordered)?;
        }

        Ok(ordered)
    }
}

/// Resolved descriptor tree plus the registration order of its files.
#[derive(Debug)]
pub struct ResolvedDescriptors {
    pool: DescriptorPool,
    order: Vec<String>,
}

impl ResolvedDescriptors {
    /// Returns the underlying descriptor pool
    pub fn pool(&self) -> &DescriptorPool {
        &self.pool
    }

    /// Files declaring the given schema namespace, in registration order.
    ///
    /// Traversal follows the registry's own order rather than any pool
    /// iteration order, so output is stable for a stable input.
    pub fn files_in_package(&self, package: &str) -> Vec<FileDescriptor> {
        self.order
            .iter()
            .filter_map(|name| self.pool.get_file_by_name(name))
            .filter(|f| f.package_name() == package)
            .collect()
    }
}
