//! External protoc invocation.
//!
//! The definition file is compiled to a binary descriptor set by spawning
//! the system `protoc`. The descriptor blob is written to a temporary path
//! whose lifetime is scoped to the call: the [`tempfile::NamedTempFile`]
//! guard deletes it on every exit path, success or failure.

use crate::error::{Error, Result};
use prost::Message;
use prost_types::FileDescriptorSet;
use std::path::Path;
use std::process::Command;
use tracing::{debug, warn};

/// Name of the external protobuf compiler binary
const PROTOC: &str = "protoc";

/// Compiles one definition file into a descriptor set.
///
/// `src_dir` is the import search path, so the file may import other
/// definition files in the same directory; the compiled set includes the
/// transitive imports and source-location metadata.
pub fn compile_proto_file(src_dir: &Path, filename: &str) -> Result<FileDescriptorSet> {
    compile_with(PROTOC, src_dir, filename)
}

fn compile_with(compiler: &str, src_dir: &Path, filename: &str) -> Result<FileDescriptorSet> {
    let blob = tempfile::Builder::new()
        .prefix("protolua-")
        .suffix(".pb")
        .tempfile()
        .map_err(Error::blob_create)?;

    debug!(
        "compiling '{}' from '{}' into '{}'",
        filename,
        src_dir.display(),
        blob.path().display()
    );

    let output = Command::new(compiler)
        .arg("--include_source_info")
        .arg("--include_imports")
        .arg(format!("--descriptor_set_out={}", blob.path().display()))
        .arg(format!("--proto_path={}", src_dir.display()))
        .arg(src_dir.join(filename))
        .output()
        .map_err(Error::protoc_launch)?;

    if !output.status.success() {
        return Err(Error::protoc_exit(
            output.status,
            String::from_utf8_lossy(&output.stderr).into_owned(),
        ));
    }

    if !output.stderr.is_empty() {
        warn!("protoc: {}", String::from_utf8_lossy(&output.stderr).trim_end());
    }

    let bytes =
        std::fs::read(blob.path()).map_err(|e| Error::descriptor_read(blob.path(), e))?;
    let set = FileDescriptorSet::decode(bytes.as_slice())?;

    debug!("descriptor set contains {} file(s)", set.file.len());

    // blob drops here, removing the temporary descriptor file
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_compiler_is_a_launch_failure() {
        let err = compile_with(
            "protolua-test-no-such-compiler",
            Path::new("."),
            "input.proto",
        )
        .unwrap_err();
        assert!(matches!(err, Error::ProtocLaunch { .. }));
    }
}
