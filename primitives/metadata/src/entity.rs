//! Record-like shapes: package records, object types, tables and views.

use serde::{Deserialize, Serialize};

use crate::descriptor::TypeDescriptor;

/// A field of a record, an attribute of an object type or a column of a table/view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name
    pub name: String,
    /// Declared type
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
    /// 1-based position in the row
    pub position: u32,
    /// Whether the column accepts nulls
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    /// Explicit target type overriding the translated one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapped_type: Option<String>,
    /// Generated container class that declares the field's type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
}

fn default_nullable() -> bool { true }

fn default_instantiable() -> bool { true }

impl Field {
    /// A nullable field with no overrides.
    pub fn new(name: impl Into<String>, ty: TypeDescriptor, position: u32) -> Self {
        Self { name: name.into(), ty, position, nullable: true, mapped_type: None, container: None }
    }
}

/// Which kind of shape an entity comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A record type declared in a package
    PackageRecord,
    /// A schema-level object type
    ObjectType,
    /// A table
    Table,
    /// A view
    View,
}

/// Common read-only view of every record-like shape.
pub trait Entity {
    /// Declared name
    fn entity_name(&self) -> &str;
    /// Owning schema
    fn owner(&self) -> &str;
    /// Fields in position order
    fn attributes(&self) -> &[Field];
    /// Source of the shape
    fn kind(&self) -> EntityKind;
    /// False for abstract object types
    fn instantiable(&self) -> bool { true }
    /// Ancestor declared in the database (object type supertype)
    fn db_ancestor(&self) -> Option<&str> { None }
    /// Explicit target class name overriding the derived one
    fn mapped_type(&self) -> Option<&str> { None }
}

/// A PL/SQL record type declared in a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordType {
    /// Record name
    pub name: String,
    /// Owning schema
    pub owner: String,
    /// Package that declares the record
    pub package_name: String,
    /// Fields in position order
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Explicit target class name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapped_type: Option<String>,
}

impl Entity for RecordType {
    fn entity_name(&self) -> &str { &self.name }
    fn owner(&self) -> &str { &self.owner }
    fn attributes(&self) -> &[Field] { &self.fields }
    fn kind(&self) -> EntityKind { EntityKind::PackageRecord }
    fn mapped_type(&self) -> Option<&str> { self.mapped_type.as_deref() }
}

/// A schema-level object type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectType {
    /// Type name
    pub name: String,
    /// Owning schema
    pub owner: String,
    /// Attributes in position order
    #[serde(default)]
    pub attributes: Vec<Field>,
    /// False for `NOT INSTANTIABLE` types
    #[serde(default = "default_instantiable")]
    pub instantiable: bool,
    /// Supertype name, if the type is a subtype
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supertype: Option<String>,
}

impl Entity for ObjectType {
    fn entity_name(&self) -> &str { &self.name }
    fn owner(&self) -> &str { &self.owner }
    fn attributes(&self) -> &[Field] { &self.attributes }
    fn kind(&self) -> EntityKind { EntityKind::ObjectType }
    fn instantiable(&self) -> bool { self.instantiable }
    fn db_ancestor(&self) -> Option<&str> { self.supertype.as_deref() }
}

/// A table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Table name
    pub name: String,
    /// Owning schema
    pub owner: String,
    /// Columns in position order
    #[serde(default)]
    pub columns: Vec<Field>,
}

impl Entity for Table {
    fn entity_name(&self) -> &str { &self.name }
    fn owner(&self) -> &str { &self.owner }
    fn attributes(&self) -> &[Field] { &self.columns }
    fn kind(&self) -> EntityKind { EntityKind::Table }
}

/// A view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    /// View name
    pub name: String,
    /// Owning schema
    pub owner: String,
    /// Columns in position order
    #[serde(default)]
    pub columns: Vec<Field>,
}

impl Entity for View {
    fn entity_name(&self) -> &str { &self.name }
    fn owner(&self) -> &str { &self.owner }
    fn attributes(&self) -> &[Field] { &self.columns }
    fn kind(&self) -> EntityKind { EntityKind::View }
}
