//! Target-side type descriptors and their rendering.

/// Whether a rendered type must be able to hold null.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nullability {
    /// Member and parameter declarations: value types become `T?`
    Nullable,
    /// Casts and generic arguments that need the bare type
    NonNullable,
}

/// How a scalar target type holds null.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// A value type wrapped in `?` when nullable
    Value,
    /// A reference type, nullable as is
    Reference,
    /// A provider struct carrying its own `Null` value
    Provider,
}

/// Row shape of a cursor result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowShape {
    /// Rows are instances of a named package record
    Strong {
        /// Record name
        record: String,
        /// Package declaring the record
        package: Option<String>,
        /// Schema owning the record
        owner: Option<String>,
    },
    /// Rows of unknown shape; `hint` is the name the row type is derived from
    Weak {
        /// Argument name, or `return` for a function result
        hint: String,
    },
}

impl RowShape {
    /// Name of the generic type parameter standing for this row shape.
    pub fn type_parameter(&self) -> String {
        let base = match self {
            RowShape::Strong { record, .. } => record,
            RowShape::Weak { hint } => hint,
        };
        format!("T_{}", naming::to_pascal(base, false))
    }

    /// True for anonymous row shapes.
    pub fn is_weak(&self) -> bool { matches!(self, RowShape::Weak { .. }) }
}

/// A type in the generated bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetType {
    /// A single value
    Scalar {
        /// Type name (e.g. `Int32`, `String`, `OracleDecimal`)
        name: String,
        /// Null representation
        kind: ScalarKind,
    },
    /// An ordered list of scalars (associative arrays)
    List(Box<TargetType>),
    /// Cursor rows read into a list of a generic row type
    RowList(RowShape),
    /// Cursor rows read into an untyped table
    Table,
    /// A generated entity class (records and object types)
    Entity {
        /// Class name
        name: String,
        /// Schema owning the type
        owner: Option<String>,
    },
}

impl TargetType {
    /// A value-type scalar.
    pub fn value(name: &str) -> Self { TargetType::Scalar { name: name.to_string(), kind: ScalarKind::Value } }

    /// A reference-type scalar.
    pub fn reference(name: &str) -> Self {
        TargetType::Scalar { name: name.to_string(), kind: ScalarKind::Reference }
    }

    /// A provider scalar.
    pub fn provider(name: &str) -> Self {
        TargetType::Scalar { name: name.to_string(), kind: ScalarKind::Provider }
    }

    /// Scalar kind, if this is a scalar.
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            TargetType::Scalar { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Scalar type name, if this is a scalar.
    pub fn scalar_name(&self) -> Option<&str> {
        match self {
            TargetType::Scalar { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Renders the type as used in declarations and casts.
    pub fn render(&self, nullability: Nullability) -> String {
        match self {
            TargetType::Scalar { name, kind: ScalarKind::Value } => match nullability {
                Nullability::Nullable => format!("{}?", name),
                Nullability::NonNullable => name.clone(),
            },
            TargetType::Scalar { name, .. } => name.clone(),
            TargetType::List(element) => format!("IList<{}>", element.render(Nullability::Nullable)),
            TargetType::RowList(shape) => format!("IList<{}>", shape.type_parameter()),
            TargetType::Table => "DataTable".to_string(),
            TargetType::Entity { name, .. } => name.clone(),
        }
    }

    /// Renders the concrete type used to instantiate an empty value.
    pub fn render_instance(&self) -> String {
        match self {
            TargetType::List(element) => format!("List<{}>", element.render(Nullability::Nullable)),
            TargetType::RowList(shape) => format!("List<{}>", shape.type_parameter()),
            other => other.render(Nullability::Nullable),
        }
    }

    /// Literal for an absent value of this type.
    pub fn null_literal(&self) -> String {
        match self {
            TargetType::Scalar { name, kind: ScalarKind::Provider } => format!("{}.Null", name),
            TargetType::Scalar { .. } => format!("({})null", self.render(Nullability::Nullable)),
            _ => "null".to_string(),
        }
    }
}
