//! Domain type descriptors as reported by the database dictionary.

use serde::{Deserialize, Serialize};

/// The structural kind of a domain type.
///
/// Every descriptor has exactly one kind; it is derived from the dictionary
/// data type name rather than stored, so the two can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainKind {
    /// A single value (number, string, date, LOB, ...)
    Scalar,
    /// An indexed collection (associative array, nested table, varray)
    Collection,
    /// A server-side result set handle
    Cursor,
    /// A composite of named fields (PL/SQL record or object type)
    Record,
}

/// A database-declared type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Dictionary data type name (e.g. `NUMBER`, `VARCHAR2`, `REF CURSOR`, `PL/SQL TABLE`)
    pub data_type: String,
    /// Name of a user-defined type (record, object or collection type)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Schema owning a user-defined type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_owner: Option<String>,
    /// Package declaring a user-defined type, if it is package-scoped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_package: Option<String>,
    /// Declared character length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    /// Declared numeric precision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    /// Declared numeric scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<i32>,
    /// Element type of a collection, or the row record of a strongly typed cursor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<Box<TypeDescriptor>>,
}

impl TypeDescriptor {
    /// A scalar type with no size information.
    pub fn scalar(data_type: impl Into<String>) -> Self {
        Self { data_type: data_type.into(), ..Default::default() }
    }

    /// A cursor; `row` is the row record for a strongly typed cursor, `None` for a weak one.
    pub fn cursor(row: Option<TypeDescriptor>) -> Self {
        Self { data_type: "REF CURSOR".to_string(), element: row.map(Box::new), ..Default::default() }
    }

    /// An associative array (index-by table) of `element`.
    pub fn associative_array(element: TypeDescriptor) -> Self {
        Self {
            data_type: "PL/SQL TABLE".to_string(),
            element: Some(Box::new(element)),
            ..Default::default()
        }
    }

    /// A PL/SQL record declared in `package`.
    pub fn record(name: impl Into<String>, owner: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            data_type: "PL/SQL RECORD".to_string(),
            type_name: Some(name.into()),
            type_owner: Some(owner.into()),
            type_package: Some(package.into()),
            ..Default::default()
        }
    }

    /// A schema-level object type.
    pub fn object(name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            data_type: "OBJECT".to_string(),
            type_name: Some(name.into()),
            type_owner: Some(owner.into()),
            ..Default::default()
        }
    }

    /// Sets the declared character length.
    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Sets the declared precision and scale.
    pub fn with_precision(mut self, precision: u32, scale: i32) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    /// Normalised dictionary name: trimmed and upper-cased.
    pub fn normalized_name(&self) -> String { self.data_type.trim().to_uppercase() }

    /// The structural kind of this type.
    pub fn kind(&self) -> DomainKind {
        match self.normalized_name().as_str() {
            "REF CURSOR" | "SYS_REFCURSOR" => DomainKind::Cursor,
            "PL/SQL TABLE" | "TABLE" | "VARRAY" => DomainKind::Collection,
            "PL/SQL RECORD" | "RECORD" | "OBJECT" => DomainKind::Record,
            _ => DomainKind::Scalar,
        }
    }

    /// True for a cursor whose row shape is not a known record.
    pub fn is_weak_cursor(&self) -> bool { self.kind() == DomainKind::Cursor && self.element.is_none() }

    /// True for a cursor whose row shape is a named record.
    pub fn is_strong_cursor(&self) -> bool {
        self.kind() == DomainKind::Cursor && self.element.is_some()
    }
}
