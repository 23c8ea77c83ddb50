#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Odbind schema metadata
//!
//! This crate defines the read-only model of a database schema that the binding
//! generator consumes: packages and their procedures, procedure arguments, record
//! types declared in packages, object types, tables and views.
//!
//! The model is populated by an external extraction step and handed over as JSON.
//! Nothing in the generator mutates it; synthesizers only derive text from it.

pub mod descriptor;
pub mod entity;
pub mod procedure;
pub mod schema;

pub use descriptor::{DomainKind, TypeDescriptor};
pub use entity::{Entity, EntityKind, Field, ObjectType, RecordType, Table, View};
pub use procedure::{Argument, ArgumentMode, Package, Procedure};
pub use schema::{MetadataError, SchemaMetadata};
