//! Packages, procedures and their arguments.

use serde::{Deserialize, Serialize};

use crate::descriptor::{DomainKind, TypeDescriptor};

/// Parameter passing mode of an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ArgumentMode {
    /// Caller to server
    #[default]
    #[serde(rename = "IN")]
    In,
    /// Server to caller
    #[serde(rename = "OUT")]
    Out,
    /// Both directions
    #[serde(rename = "IN/OUT", alias = "INOUT", alias = "IN OUT")]
    InOut,
}

impl ArgumentMode {
    /// True when the caller supplies a value.
    pub fn is_input(self) -> bool { matches!(self, ArgumentMode::In | ArgumentMode::InOut) }

    /// True when the server returns a value.
    pub fn is_output(self) -> bool { matches!(self, ArgumentMode::Out | ArgumentMode::InOut) }
}

/// One entry of a procedure's argument list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    /// Declared name; `None` for the pseudo argument carrying a function's return value
    #[serde(default)]
    pub name: Option<String>,
    /// Declared type
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
    /// Passing mode
    #[serde(default)]
    pub mode: ArgumentMode,
    /// Nesting depth; 0 is the call signature, deeper levels describe fields of a composite argument
    #[serde(default)]
    pub data_level: u32,
    /// Whether the argument has a declared default value
    #[serde(default)]
    pub defaulted: bool,
    /// Ordinal position in the signature (0 for the return value)
    pub position: u32,
}

impl Argument {
    /// A named top-level argument.
    pub fn new(name: impl Into<String>, ty: TypeDescriptor, mode: ArgumentMode, position: u32) -> Self {
        Self { name: Some(name.into()), ty, mode, data_level: 0, defaulted: false, position }
    }

    /// The pseudo argument describing a function's return value.
    pub fn returning(ty: TypeDescriptor) -> Self {
        Self { name: None, ty, mode: ArgumentMode::Out, data_level: 0, defaulted: false, position: 0 }
    }

    /// Marks the argument as having a declared default.
    pub fn defaulted(mut self) -> Self {
        self.defaulted = true;
        self
    }

    /// True for the function return pseudo argument.
    pub fn is_return(&self) -> bool { self.name.is_none() }

    /// True when the argument is part of the call signature.
    pub fn is_top_level(&self) -> bool { self.data_level == 0 }

    /// True when the argument's value flows back to the caller (OUT, IN/OUT or return).
    pub fn is_output(&self) -> bool { self.is_return() || self.mode.is_output() }

    /// Name used when binding the argument on the wire.
    pub fn bind_name(&self) -> &str { self.name.as_deref().unwrap_or("!RETURN") }
}

/// A stored procedure or function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Procedure {
    /// Procedure name
    pub name: String,
    /// Enclosing package, if any
    #[serde(default)]
    pub package_name: Option<String>,
    /// Arguments ordered by position (return value first for functions)
    #[serde(default)]
    pub arguments: Vec<Argument>,
}

impl Procedure {
    /// Creates a procedure, sorting its arguments by position.
    pub fn new(name: impl Into<String>, package_name: Option<String>, mut arguments: Vec<Argument>) -> Self {
        arguments.sort_by_key(|a| a.position);
        Self { name: name.into(), package_name, arguments }
    }

    /// The return pseudo argument, if this is a function.
    pub fn return_argument(&self) -> Option<&Argument> { self.arguments.iter().find(|a| a.is_return()) }

    /// True if the procedure returns a value.
    pub fn is_function(&self) -> bool { self.return_argument().is_some() }

    /// Top-level arguments, including the return value, in declaration order.
    pub fn top_level_arguments(&self) -> impl Iterator<Item = &Argument> {
        self.arguments.iter().filter(|a| a.is_top_level())
    }

    /// Top-level named arguments, i.e. the call signature.
    pub fn signature_arguments(&self) -> impl Iterator<Item = &Argument> {
        self.top_level_arguments().filter(|a| !a.is_return())
    }

    /// Top-level cursors flowing back to the caller.
    pub fn output_cursors(&self) -> impl Iterator<Item = &Argument> {
        self.top_level_arguments().filter(|a| a.is_output() && a.ty.kind() == DomainKind::Cursor)
    }

    /// True if any cursor is read back from the server.
    pub fn has_output_cursor(&self) -> bool { self.output_cursors().next().is_some() }

    /// True if a cursor is passed in by the caller.
    pub fn has_input_cursor(&self) -> bool {
        self.signature_arguments().any(|a| a.mode.is_input() && a.ty.kind() == DomainKind::Cursor)
    }

    /// True if any output cursor has an anonymous row shape.
    pub fn uses_weak_cursor(&self) -> bool { self.output_cursors().any(|a| a.ty.is_weak_cursor()) }
}

/// A stored procedure package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Package name
    pub name: String,
    /// Owning schema
    pub owner: String,
    /// Procedures in declaration order
    #[serde(default)]
    pub procedures: Vec<Procedure>,
}
