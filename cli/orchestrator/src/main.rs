//! Odbind CLI
//!
//! Reads extracted schema metadata, generates the client bindings and writes
//! every compilation unit to the output directory.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

use std::path::PathBuf;

use clap::Parser;
use codegen::{write_generated, BindingGenerator, CodeGenerator, WriteReport};
use config::Config;
use metadata::SchemaMetadata;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("logging error: {0}")]
    Logging(#[from] logging::LoggingError),
    #[error("failed to load metadata: {0}")]
    Metadata(#[from] metadata::MetadataError),
    #[error("generation failed: {0}")]
    Codegen(#[from] codegen::CodegenError),
}

/// Command-line interface configuration for odbind.
#[derive(Parser, Debug)]
#[command(name = "odbind", about = "Generates ODP.NET client bindings for database packages", version)]
struct Cli {
    /// Schema metadata (JSON) produced by the extraction step
    #[arg(long)]
    metadata: PathBuf,
    /// Configuration file; defaults to the user configuration if present
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output directory, overriding `codegen.output_dir`
    #[arg(long)]
    output: Option<PathBuf>,
    /// Log level or filter directive, overriding `logging.level`
    #[arg(long)]
    log_level: Option<String>,
}

fn run(cli: &Cli) -> Result<WriteReport, CliError> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(output) = &cli.output {
        config.codegen.output_dir = output.clone();
    }
    let level = cli.log_level.clone().unwrap_or_else(|| config.logging.level.clone());
    logging::init(&level, config.logging.file.as_deref())?;

    let schema = SchemaMetadata::from_file(&cli.metadata)?;
    info!(metadata = %cli.metadata.display(), schema = %schema.name, "loaded schema metadata");

    let generator = BindingGenerator::new(config)?;
    generator.validate(&schema)?;
    let files = generator.generate(&schema)?;
    Ok(write_generated(&generator.config().codegen.output_dir, &files))
}

fn main() {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(report) if report.is_success() => {
            println!("Wrote {} compilation units", report.written.len());
        }
        Ok(report) => {
            for failure in &report.failures {
                error!(unit = %failure.name, error = %failure.error, "unit not written");
                eprintln!("Error: failed to write {}: {}", failure.name, failure.error);
            }
            eprintln!(
                "{} of {} compilation units failed to write",
                report.failures.len(),
                report.failures.len() + report.written.len()
            );
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() { Cli::command().debug_assert(); }

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::try_parse_from(["odbind", "--metadata", "hr.json", "--output", "out"])
            .expect("arguments parse");
        assert_eq!(cli.metadata, PathBuf::from("hr.json"));
        assert_eq!(cli.output, Some(PathBuf::from("out")));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_metadata_is_required() { assert!(Cli::try_parse_from(["odbind"]).is_err()); }
}
