//! Synthesizers for the units of the generated bindings.
//!
//! Each synthesizer is a pure function of the [`crate::GenerationContext`] and a piece
//! of schema metadata; none of them touch the filesystem.

/// Abstract adapter and entity base classes
pub mod base_classes;

/// Entity classes, record interfaces and row materializers
pub mod entity;

/// Compilation units for object types, tables and views
pub mod entity_file;

/// Package classes and record ownership
pub mod package;

/// Procedure call wrappers
pub mod procedure;

/// Flag mapping cursor columns onto properties by position instead of by name.
pub const BY_POSITION_PARAM: &str = "mapColumnToObjectPropertyByPosition";

/// Flag tolerating cursor columns with no matching property.
pub const ALLOW_UNMAPPED_PARAM: &str = "allowUnmappedColumnsToBeExcluded";

/// Flag title-casing column captions of table results.
pub const TITLE_CASE_PARAM: &str = "convertColumnNameToTitleCaseInCaption";

/// Upper bound on the rows read from any cursor.
pub const MAX_ROWS_PARAM: &str = "optionalMaxNumberRowsToReadFromAnyCursor";

/// Open connection supplied by the caller.
pub const CONNECTION_PARAM: &str = "optionalPreexistingOpenConnection";
