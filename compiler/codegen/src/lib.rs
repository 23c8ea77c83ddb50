#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Client binding generation for database schemas.
//!
//! This crate turns [`metadata::SchemaMetadata`] into C# compilation units for the
//! ODP.NET provider: one class per procedure package holding typed call wrappers,
//! entity classes for package records, object types, tables and views, plus the
//! abstract base classes they derive from.
//!
//! Generation is synchronous and deterministic. Constructs with no supported
//! mapping never abort a run; the smallest enclosing unit (method, record or
//! column) is emitted as a commented-out declaration instead. Writing units to
//! disk is a separate step ([`write_generated`]) in which each unit succeeds or
//! fails on its own.

use std::fs;
use std::path::{Path, PathBuf};

use metadata::SchemaMetadata;
use thiserror::Error;

pub mod binding_generator;
pub mod context;
pub mod generators;
pub mod source;

pub use binding_generator::BindingGenerator;
pub use context::{GenerationContext, GenerationContextBuilder};
pub use generators::entity::{EntitySynthesizer, EntityUnits};
pub use generators::package::{PackageAssembler, RecordCatalog};
pub use generators::procedure::{MappingMode, ProcedureSynthesizer};

/// Error type for code generation operations in this crate.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Underlying I/O error while reading or writing files.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Metadata could not be loaded.
    #[error(transparent)]
    Metadata(#[from] metadata::MetadataError),
    /// Configuration is invalid.
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    /// Translation options are invalid.
    #[error(transparent)]
    Translation(#[from] types::TranslationError),
    /// Generic message-based error.
    #[error("{0}")]
    Message(String),
}

impl From<String> for CodegenError {
    fn from(msg: String) -> Self { CodegenError::Message(msg) }
}

/// Convenient result type for codegen functions in this crate.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// What a piece of generated text represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// A record interface
    Interface,
    /// An entity class
    Class,
    /// A row materializer method
    Materializer,
    /// An executable procedure wrapper
    Method,
    /// A commented-out procedure that could not be bound
    IgnoredMethod,
    /// A commented-out entity that could not be generated
    IgnoredEntity,
    /// A complete source file
    CompilationUnit,
}

/// Synthesized output text for one cohesive unit.
///
/// Text is indented relative to its own outermost declaration; enclosing units
/// re-indent it when composing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// Unit name (method, class or file name)
    pub name: String,
    /// What the text represents
    pub kind: UnitKind,
    /// Source text
    pub text: String,
}

impl GeneratedUnit {
    /// Creates a unit.
    pub fn new(name: impl Into<String>, kind: UnitKind, text: impl Into<String>) -> Self {
        Self { name: name.into(), kind, text: text.into() }
    }

    /// True for commented-out units.
    pub fn is_ignored(&self) -> bool { matches!(self.kind, UnitKind::IgnoredMethod | UnitKind::IgnoredEntity) }
}

/// Defines the core interface for generating source files from schema metadata.
/// Implementors produce a set of `(filename, source)` pairs and may optionally
/// perform post-generation validation.
pub trait CodeGenerator {
    /// Generate source files for the schema.
    fn generate(&self, schema: &SchemaMetadata) -> Result<Vec<(String, String)>>;

    /// Optional validation step after generation (default is no-op).
    fn validate(&self, _schema: &SchemaMetadata) -> Result<()> { Ok(()) }
}

/// Trim trailing whitespace from each line and drop trailing blank lines.
/// Always ensures the returned string ends with a single newline when not empty.
pub fn clean_generated_source(src: &str) -> String {
    let mut lines: Vec<&str> = src.lines().map(str::trim_end).collect();

    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }

    if lines.is_empty() {
        String::new()
    } else {
        format!("{}\n", lines.join("\n"))
    }
}

/// A unit that could not be written.
#[derive(Debug)]
pub struct WriteFailure {
    /// File name of the unit
    pub name: String,
    /// Why writing failed
    pub error: std::io::Error,
}

/// Outcome of [`write_generated`].
#[derive(Debug, Default)]
pub struct WriteReport {
    /// Paths written successfully
    pub written: Vec<PathBuf>,
    /// Units that failed
    pub failures: Vec<WriteFailure>,
}

impl WriteReport {
    /// True when every unit was written.
    pub fn is_success(&self) -> bool { self.failures.is_empty() }
}

/// Persist generated compilation units under `out_dir`, creating any necessary
/// subdirectories and appending `.cs` if missing.
///
/// Each unit is written independently: a failure is recorded in the report and
/// logged, and the remaining units are still written.
pub fn write_generated<P: AsRef<Path>>(out_dir: P, files: &[(String, String)]) -> WriteReport {
    let mut report = WriteReport::default();
    for (name, src) in files {
        let path = if name.ends_with(".cs") {
            out_dir.as_ref().join(name)
        } else {
            out_dir.as_ref().join(format!("{name}.cs"))
        };
        match write_unit(&path, src) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "wrote compilation unit");
                report.written.push(path);
            }
            Err(error) => {
                tracing::error!(unit = %name, %error, "failed to write compilation unit");
                report.failures.push(WriteFailure { name: name.clone(), error });
            }
        }
    }
    report
}

fn write_unit(path: &Path, src: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, clean_generated_source(src).as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_generated_source() {
        assert_eq!(clean_generated_source("a  \n\nb\t\n\n\n"), "a\n\nb\n");
        assert_eq!(clean_generated_source("\n \n"), "");
    }

    #[test]
    fn test_write_generated_isolates_failures() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temporary directory");
        // A regular file where a directory is needed makes that unit unwritable
        fs::write(temp_dir.path().join("blocked"), "x").expect("Failed to create blocking file");

        let files = vec![
            ("First.cs".to_string(), "class First {}  \n".to_string()),
            ("blocked/Second.cs".to_string(), "class Second {}\n".to_string()),
            ("Third".to_string(), "class Third {}\n".to_string()),
        ];
        let report = write_generated(temp_dir.path(), &files);

        assert!(!report.is_success());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].name, "blocked/Second.cs");
        assert_eq!(report.written.len(), 2);

        let first = fs::read_to_string(temp_dir.path().join("First.cs")).expect("First.cs written");
        assert_eq!(first, "class First {}\n");
        assert!(temp_dir.path().join("Third.cs").exists());
    }
}
