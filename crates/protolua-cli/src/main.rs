//! protolua - Compile Protocol Buffer definitions into Lua schema tables
//!
//! This tool compiles one protobuf definition file (via the external
//! `protoc` compiler), resolves its descriptor tree, and emits a generated
//! Lua table describing how each message field should be laid out by the
//! runtime table engine.

use anyhow::{Context, Result};
use clap::Parser;
use protolua_core::{compile_proto_file, DescriptorRegistry, SchemaTable, DEFAULT_SCHEMA_PACKAGE};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

/// Compile Protocol Buffer definitions into Lua schema tables
#[derive(Parser, Debug)]
#[command(name = "protolua")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing the definition file and its imports
    #[arg(short = 'd', long, default_value = ".")]
    dir: PathBuf,

    /// Definition file to compile, relative to the source directory
    #[arg(short = 'i', long, default_value = "input.proto")]
    input: String,

    /// Output file for the generated Lua table
    #[arg(short = 'o', long, default_value = "output.lua")]
    output: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .init();

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let set = compile_proto_file(&cli.dir, &cli.input)
        .with_context(|| format!("failed to compile '{}'", cli.input))?;

    let mut registry = DescriptorRegistry::new();
    registry
        .register_set(set)
        .context("failed to register descriptors")?;
    debug!("registered {} definition file(s)", registry.len());

    let resolved = registry.resolve().context("failed to resolve descriptors")?;
    let table = SchemaTable::build(&resolved, DEFAULT_SCHEMA_PACKAGE)
        .context("failed to assemble schema table")?;
    info!(
        "assembled {} message schema(s) from namespace '{}'",
        table.messages.len(),
        table.namespace
    );

    emit(&cli.output, &table.render())
}

/// Echoes the complete artifact to standard output, then commits it to disk,
/// so a write failure still leaves the generated output visible.
fn emit(output: &Path, text: &str) -> Result<()> {
    println!("{text}");

    fs::write(output, text)
        .with_context(|| format!("failed to write '{}'", output.display()))?;
    info!("wrote {}", output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["protolua"]);
        assert_eq!(cli.dir, PathBuf::from("."));
        assert_eq!(cli.input, "input.proto");
        assert_eq!(cli.output, PathBuf::from("output.lua"));
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "protolua", "-d", "./defs", "-i", "game.proto", "-o", "game.lua", "-vv",
        ]);
        assert_eq!(cli.dir, PathBuf::from("./defs"));
        assert_eq!(cli.input, "game.proto");
        assert_eq!(cli.output, PathBuf::from("game.lua"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_emit_writes_the_echoed_artifact() {
        let table = SchemaTable {
            namespace: DEFAULT_SCHEMA_PACKAGE.to_string(),
            messages: vec![],
        };
        let text = table.render();

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("output.lua");
        emit(&output, &text).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), text);
    }

    #[test]
    fn test_emit_reports_unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("missing").join("output.lua");

        let err = emit(&output, "-- Generated by protolua. DO NOT EDIT!\n").unwrap_err();
        assert!(err.to_string().contains("failed to write"));
        assert!(err.to_string().contains("output.lua"));
    }
}
