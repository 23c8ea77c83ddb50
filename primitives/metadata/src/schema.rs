//! The schema-wide metadata container and its JSON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entity::{ObjectType, RecordType, Table, View};
use crate::procedure::Package;

/// Errors raised while loading or saving metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Underlying I/O error while reading or writing files.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// JSON serialization/deserialization error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Everything the generator knows about one schema.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SchemaMetadata {
    /// Schema name (e.g. `HR`)
    pub name: String,
    /// Packages in scope, in generation order
    #[serde(default)]
    pub packages: Vec<Package>,
    /// Record types declared in packages (in scope or referenced from them)
    #[serde(default)]
    pub records: Vec<RecordType>,
    /// Object types
    #[serde(default)]
    pub object_types: Vec<ObjectType>,
    /// Tables
    #[serde(default)]
    pub tables: Vec<Table>,
    /// Views
    #[serde(default)]
    pub views: Vec<View>,
}

impl SchemaMetadata {
    /// Parses metadata from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, MetadataError> { Ok(serde_json::from_str(json)?) }

    /// Loads metadata from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, MetadataError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Saves metadata to a JSON file with pretty formatting.
    pub fn to_file(&self, path: &Path) -> Result<(), MetadataError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Looks up an in-scope package by name.
    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// True if a package of that name is part of this generation run.
    pub fn is_package_in_scope(&self, name: &str) -> bool { self.package(name).is_some() }

    /// Looks up a record type by declaring package and name.
    pub fn record(&self, package_name: &str, name: &str) -> Option<&RecordType> {
        self.records.iter().find(|r| {
            r.package_name.eq_ignore_ascii_case(package_name) && r.name.eq_ignore_ascii_case(name)
        })
    }

    /// Looks up an object type by owner and name.
    pub fn object_type(&self, owner: &str, name: &str) -> Option<&ObjectType> {
        self.object_types
            .iter()
            .find(|o| o.owner.eq_ignore_ascii_case(owner) && o.name.eq_ignore_ascii_case(name))
    }
}
