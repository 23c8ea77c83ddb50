// SPDX-License-Identifier: CC0-1.0

//! Odbind generates typed C# bindings for database packages.
//!
//! Feed it a [`SchemaMetadata`] extracted from the data dictionary and a
//! [`Config`], and [`BindingGenerator`] returns one compilation unit per
//! package plus the entity and base class units, ready for [`write_generated`].
//!
//! ```no_run
//! use odbind::{write_generated, BindingGenerator, CodeGenerator, Config, SchemaMetadata};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = SchemaMetadata::from_file(std::path::Path::new("hr.json"))?;
//! let generator = BindingGenerator::new(Config::default())?;
//! let units = generator.generate(&schema)?;
//! let report = write_generated("generated", &units);
//! assert!(report.is_success());
//! # Ok(())
//! # }
//! ```
//!
//! The member crates stay usable on their own: [`metadata`] holds the schema
//! model, [`naming`] the identifier conversions, [`types`] the type rule table,
//! [`config`] the TOML configuration and [`codegen`] the synthesizers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

pub use codegen::{write_generated, BindingGenerator, CodeGenerator, CodegenError, WriteReport};
pub use config::Config;
pub use metadata::SchemaMetadata;
pub use codegen;
pub use config;
pub use metadata;
pub use naming;
pub use types;

/// Version of the odbind workspace, as reported by Cargo.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
