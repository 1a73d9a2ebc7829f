//! Error types for the protolua-core library.
//!
//! This module provides comprehensive error handling using the `thiserror` crate,
//! with detailed error variants for different failure modes. Every variant is
//! fatal to the run: the compiler is a one-shot batch tool and never retries.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Result type alias for protolua operations
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error type for all protolua operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The external protoc compiler could not be launched
    #[error("failed to launch protoc: {source}")]
    ProtocLaunch {
        /// Underlying I/O error from spawning the subprocess
        #[source]
        source: std::io::Error,
    },

    /// The external protoc compiler exited with a failure status
    #[error("protoc exited with {status}: {stderr}")]
    ProtocExit {
        /// Exit status reported by the subprocess
        status: ExitStatus,
        /// Captured standard error output
        stderr: String,
    },

    /// Failed to create the temporary descriptor blob
    #[error("failed to create descriptor blob: {source}")]
    BlobCreate {
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to read the temporary descriptor blob
    #[error("failed to read descriptor blob '{path}': {source}")]
    DescriptorRead {
        /// Path to the blob that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The descriptor blob is not a valid FileDescriptorSet
    #[error("failed to parse descriptor set: {0}")]
    DescriptorParse(#[from] prost::DecodeError),

    /// A definition file was registered more than once
    #[error("file '{name}' is already registered")]
    DuplicateFile {
        /// The conflicting file name
        name: String,
    },

    /// A definition file imports a file that was never registered
    #[error("file '{file}' imports unregistered file '{dependency}'")]
    UnresolvedDependency {
        /// The importing file
        file: String,
        /// The missing import
        dependency: String,
    },

    /// The registered descriptors could not be resolved into a pool
    #[error("failed to resolve descriptors: {0}")]
    DescriptorBuild(String),

    /// A field uses a wire kind outside the supported set
    #[error("field '{field}' has unsupported wire kind '{kind}'")]
    UnsupportedKind {
        /// Fully-qualified name of the offending field
        field: String,
        /// Name of the unsupported kind
        kind: String,
    },

    /// A map field's synthetic entry message is missing its key or value field
    #[error("map field '{field}' has a malformed entry message")]
    MalformedMapEntry {
        /// Fully-qualified name of the offending field
        field: String,
    },

    /// A field listed in the raw descriptor is missing from the resolved message
    #[error("message '{message}' has no resolved field with number {number}")]
    UnknownField {
        /// Fully-qualified message name
        message: String,
        /// The missing field number
        number: u32,
    },
}

impl Error {
    /// Creates a new protoc launch error
    pub fn protoc_launch(source: std::io::Error) -> Self {
        Self::ProtocLaunch { source }
    }

    /// Creates a new protoc exit-status error
    pub fn protoc_exit(status: ExitStatus, stderr: impl Into<String>) -> Self {
        Self::ProtocExit {
            status,
            stderr: stderr.into(),
        }
    }

    /// Creates a new descriptor blob creation error
    pub fn blob_create(source: std::io::Error) -> Self {
        Self::BlobCreate { source }
    }

    /// Creates a new descriptor blob read error
    pub fn descriptor_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DescriptorRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new duplicate registration error
    pub fn duplicate_file(name: impl Into<String>) -> Self {
        Self::DuplicateFile { name: name.into() }
    }

    /// Creates a new unresolved import error
    pub fn unresolved_dependency(file: impl Into<String>, dependency: impl Into<String>) -> Self {
        Self::UnresolvedDependency {
            file: file.into(),
            dependency: dependency.into(),
        }
    }

    /// Creates a new descriptor resolution error
    pub fn descriptor_build(msg: impl Into<String>) -> Self {
        Self::DescriptorBuild(msg.into())
    }

    /// Creates a new unsupported wire kind error
    pub fn unsupported_kind(field: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::UnsupportedKind {
            field: field.into(),
            kind: kind.into(),
        }
    }

    /// Creates a new malformed map entry error
    pub fn malformed_map_entry(field: impl Into<String>) -> Self {
        Self::MalformedMapEntry {
            field: field.into(),
        }
    }

    /// Creates a new unknown field error
    pub fn unknown_field(message: impl Into<String>, number: u32) -> Self {
        Self::UnknownField {
            message: message.into(),
            number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::duplicate_file("game.proto");
        assert!(err.to_string().contains("already registered"));
        assert!(err.to_string().contains("game.proto"));
    }

    #[test]
    fn test_unresolved_dependency_display() {
        let err = Error::unresolved_dependency("game.proto", "common.proto");
        assert!(err.to_string().contains("game.proto"));
        assert!(err.to_string().contains("common.proto"));
    }

    #[test]
    fn test_unsupported_kind_display() {
        let err = Error::unsupported_kind("cpp_table.Player.stats", "group");
        assert!(err.to_string().contains("unsupported wire kind"));
        assert!(err.to_string().contains("group"));
    }

    #[test]
    fn test_helper_constructors_cover_struct_variants() {
        let err = Error::blob_create(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        assert!(err.to_string().contains("descriptor blob"));

        let err = Error::protoc_launch(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(err.to_string().contains("failed to launch protoc"));

        let err = Error::malformed_map_entry("cpp_table.Scores.by_name");
        assert!(err.to_string().contains("malformed entry message"));
        assert!(err.to_string().contains("cpp_table.Scores.by_name"));

        let err = Error::unknown_field("cpp_table.Player", 7);
        assert!(err.to_string().contains("cpp_table.Player"));
        assert!(err.to_string().contains('7'));
    }
}
