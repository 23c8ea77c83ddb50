//! Classification of dictionary type names into families.

/// Flavour of a character type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterKind {
    /// `VARCHAR2`, `VARCHAR`, `STRING`
    Varchar2,
    /// `NVARCHAR2`
    NVarchar2,
    /// `CHAR`
    Char,
    /// `NCHAR`
    NChar,
}

/// Flavour of a timestamp type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimestampKind {
    /// `TIMESTAMP`
    Plain,
    /// `TIMESTAMP WITH TIME ZONE`
    TimeZone,
    /// `TIMESTAMP WITH LOCAL TIME ZONE`
    LocalTimeZone,
}

/// Flavour of a large object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LobKind {
    /// Binary LOB
    Blob,
    /// Character LOB
    Clob,
    /// National character LOB
    NClob,
}

/// Flavour of an IEEE floating point type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatKind {
    /// `BINARY_FLOAT`
    Single,
    /// `BINARY_DOUBLE`
    Double,
}

/// The rule-table key for a domain type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeFamily {
    /// PL/SQL 32-bit integers and `INTEGER`
    Integer,
    /// `NUMBER` and its ANSI aliases, sized by precision and scale
    Number,
    /// IEEE floating point
    Float(FloatKind),
    /// Character strings
    Character(CharacterKind),
    /// `DATE`
    Date,
    /// `TIMESTAMP` variants
    Timestamp(TimestampKind),
    /// `INTERVAL DAY TO SECOND`
    Interval,
    /// BLOB/CLOB/NCLOB
    LargeObject(LobKind),
    /// `RAW`
    Binary,
    /// PL/SQL `BOOLEAN`
    Boolean,
    /// `REF CURSOR`
    Cursor,
    /// `PL/SQL TABLE` (index-by table)
    AssociativeArray,
    /// `PL/SQL RECORD`
    Record,
    /// Object type instance
    Object,
}

impl TypeFamily {
    /// Classifies a dictionary data type name; `None` when the type has no mapping.
    pub fn classify(data_type: &str) -> Option<TypeFamily> {
        let name = data_type.trim().to_uppercase();
        let family = match name.as_str() {
            "PLS_INTEGER" | "BINARY_INTEGER" | "NATURAL" | "NATURALN" | "POSITIVE"
            | "POSITIVEN" | "SIGNTYPE" | "SIMPLE_INTEGER" | "INTEGER" | "INT" | "SMALLINT" => {
                TypeFamily::Integer
            }
            "NUMBER" | "DECIMAL" | "NUMERIC" | "DEC" | "FLOAT" | "REAL" | "DOUBLE PRECISION" => {
                TypeFamily::Number
            }
            "BINARY_FLOAT" => TypeFamily::Float(FloatKind::Single),
            "BINARY_DOUBLE" => TypeFamily::Float(FloatKind::Double),
            "VARCHAR2" | "VARCHAR" | "STRING" => TypeFamily::Character(CharacterKind::Varchar2),
            "NVARCHAR2" => TypeFamily::Character(CharacterKind::NVarchar2),
            "CHAR" | "CHARACTER" => TypeFamily::Character(CharacterKind::Char),
            "NCHAR" => TypeFamily::Character(CharacterKind::NChar),
            "DATE" => TypeFamily::Date,
            "BLOB" => TypeFamily::LargeObject(LobKind::Blob),
            "CLOB" => TypeFamily::LargeObject(LobKind::Clob),
            "NCLOB" => TypeFamily::LargeObject(LobKind::NClob),
            "RAW" => TypeFamily::Binary,
            "PL/SQL BOOLEAN" | "BOOLEAN" => TypeFamily::Boolean,
            "REF CURSOR" | "SYS_REFCURSOR" => TypeFamily::Cursor,
            "PL/SQL TABLE" => TypeFamily::AssociativeArray,
            "PL/SQL RECORD" | "RECORD" => TypeFamily::Record,
            "OBJECT" => TypeFamily::Object,
            other if other.starts_with("TIMESTAMP") => {
                if other.ends_with("WITH LOCAL TIME ZONE") {
                    TypeFamily::Timestamp(TimestampKind::LocalTimeZone)
                } else if other.ends_with("WITH TIME ZONE") {
                    TypeFamily::Timestamp(TimestampKind::TimeZone)
                } else {
                    TypeFamily::Timestamp(TimestampKind::Plain)
                }
            }
            other if other.starts_with("INTERVAL DAY") => TypeFamily::Interval,
            _ => return None,
        };
        Some(family)
    }

    /// True for families that may be elements of an associative array.
    pub fn is_array_element(self) -> bool {
        matches!(
            self,
            TypeFamily::Integer
                | TypeFamily::Number
                | TypeFamily::Float(_)
                | TypeFamily::Character(_)
                | TypeFamily::Date
                | TypeFamily::Timestamp(_)
                | TypeFamily::Interval
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_scalars() {
        assert_eq!(TypeFamily::classify("NUMBER"), Some(TypeFamily::Number));
        assert_eq!(TypeFamily::classify("pls_integer"), Some(TypeFamily::Integer));
        assert_eq!(
            TypeFamily::classify("VARCHAR2"),
            Some(TypeFamily::Character(CharacterKind::Varchar2))
        );
        assert_eq!(TypeFamily::classify("NCLOB"), Some(TypeFamily::LargeObject(LobKind::NClob)));
        assert_eq!(TypeFamily::classify("INTERVAL DAY(2) TO SECOND(6)"), Some(TypeFamily::Interval));
    }

    #[test]
    fn test_classify_timestamps() {
        assert_eq!(
            TypeFamily::classify("TIMESTAMP(6)"),
            Some(TypeFamily::Timestamp(TimestampKind::Plain))
        );
        assert_eq!(
            TypeFamily::classify("TIMESTAMP(6) WITH TIME ZONE"),
            Some(TypeFamily::Timestamp(TimestampKind::TimeZone))
        );
        assert_eq!(
            TypeFamily::classify("TIMESTAMP WITH LOCAL TIME ZONE"),
            Some(TypeFamily::Timestamp(TimestampKind::LocalTimeZone))
        );
    }

    #[test]
    fn test_unsupported_types_have_no_family() {
        for name in
            ["BFILE", "LONG", "LONG RAW", "ROWID", "UROWID", "XMLTYPE", "TABLE", "VARRAY", "INTERVAL YEAR TO MONTH", "MYSTERY"]
        {
            assert_eq!(TypeFamily::classify(name), None, "{} should be unsupported", name);
        }
    }

    #[test]
    fn test_array_elements() {
        assert!(TypeFamily::Number.is_array_element());
        assert!(TypeFamily::Character(CharacterKind::Char).is_array_element());
        assert!(!TypeFamily::LargeObject(LobKind::Blob).is_array_element());
        assert!(!TypeFamily::Boolean.is_array_element());
        assert!(!TypeFamily::Cursor.is_array_element());
    }
}
