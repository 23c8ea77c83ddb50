#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Logging setup for the generator.
//!
//! Library crates only emit `tracing` events; binaries call [`init`] once to
//! install a formatting subscriber. `RUST_LOG` takes precedence over the
//! configured level.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The configured level is not a valid filter directive.
    #[error("invalid log level '{level}': {source}")]
    InvalidLevel {
        /// Rejected level
        level: String,
        /// Parser error
        source: tracing_subscriber::filter::ParseError,
    },
    /// The log file could not be created.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// A global subscriber is already installed.
    #[error("failed to install subscriber: {0}")]
    Init(String),
}

/// Parses a level or filter directive such as `info` or `odbind_codegen=debug`.
pub fn parse_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(level)
        .map_err(|source| LoggingError::InvalidLevel { level: level.to_string(), source })
}

/// Installs the global subscriber, writing to `file` when given and to stderr otherwise.
pub fn init(level: &str, file: Option<&Path>) -> Result<(), LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => parse_filter(level)?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let result = match file {
        Some(path) => {
            let file = File::create(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    result.map_err(|e| LoggingError::Init(e.to_string()))
}
