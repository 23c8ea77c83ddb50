#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Domain-to-target type translation.
//!
//! Maps database type descriptors onto the types used by the generated client
//! bindings and onto the provider's native wire types. The mapping is a fixed rule
//! table keyed by type family; per-family overrides and the cursor representation
//! come from [`TranslationOptions`] and are frozen when the [`TypeTranslator`] is built.

pub mod family;
pub mod options;
pub mod target;
pub mod translator;

pub use family::TypeFamily;
pub use options::{CursorMode, TranslationOptions, TypeOverrides};
pub use target::{Nullability, RowShape, ScalarKind, TargetType};
pub use translator::{
    Translation, TypeTranslator, DEFAULT_STRING_SIZE, MAX_DECIMAL_PRECISION, MAX_INT32_PRECISION,
    MAX_INTEGER_PRECISION,
};

use thiserror::Error;

/// Reasons a domain type cannot be translated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    /// No mapping exists for the domain type.
    #[error("unsupported type {0}")]
    UnsupportedType(String),
    /// The metadata describing the type is incomplete or contradictory.
    #[error("inconsistent metadata: {0}")]
    MetadataInconsistency(String),
    /// A configured override names a target type its family cannot hold.
    #[error("invalid {family} override '{value}', expected one of: {allowed}")]
    InvalidOverride {
        /// Family being overridden
        family: &'static str,
        /// Rejected value
        value: String,
        /// Accepted values, comma separated
        allowed: String,
    },
    /// The identifier heuristic pattern is not a valid regular expression.
    #[error("invalid identifier pattern: {0}")]
    InvalidPattern(String),
}
