//! Translation options fixed for a whole generation run.

use serde::{Deserialize, Serialize};

use crate::TranslationError;

/// How cursor results are represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorMode {
    /// Generic typed lists, with weak cursors mapped dynamically
    #[default]
    GenericList,
    /// Untyped tables for every cursor
    WeakTable,
}

/// Per-family target type overrides.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeOverrides {
    /// Integer target (`Int32`, `Int64`, `Decimal`, `OracleDecimal`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integer: Option<String>,
    /// Decimal target (`Decimal`, `Double`, `OracleDecimal`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimal: Option<String>,
    /// DATE target (`DateTime`, `OracleDate`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// TIMESTAMP target (`DateTime`, `OracleTimeStamp`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// INTERVAL DAY TO SECOND target (`TimeSpan`, `OracleIntervalDS`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    /// BLOB target (`Byte[]`, `OracleBlob`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blob: Option<String>,
    /// CLOB/NCLOB target (`String`, `OracleClob`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clob: Option<String>,
}

pub(crate) const INTEGER_TARGETS: &[&str] = &["Int32", "Int64", "Decimal", "OracleDecimal"];
pub(crate) const DECIMAL_TARGETS: &[&str] = &["Decimal", "Double", "OracleDecimal"];
pub(crate) const DATE_TARGETS: &[&str] = &["DateTime", "OracleDate"];
pub(crate) const TIMESTAMP_TARGETS: &[&str] = &["DateTime", "OracleTimeStamp"];
pub(crate) const INTERVAL_TARGETS: &[&str] = &["TimeSpan", "OracleIntervalDS"];
pub(crate) const BLOB_TARGETS: &[&str] = &["Byte[]", "OracleBlob"];
pub(crate) const CLOB_TARGETS: &[&str] = &["String", "OracleClob"];

impl TypeOverrides {
    /// Checks every configured override against the targets its family can hold.
    pub fn validate(&self) -> Result<(), TranslationError> {
        let checks: [(&'static str, &Option<String>, &[&str]); 7] = [
            ("integer", &self.integer, INTEGER_TARGETS),
            ("decimal", &self.decimal, DECIMAL_TARGETS),
            ("date", &self.date, DATE_TARGETS),
            ("timestamp", &self.timestamp, TIMESTAMP_TARGETS),
            ("interval", &self.interval, INTERVAL_TARGETS),
            ("blob", &self.blob, BLOB_TARGETS),
            ("clob", &self.clob, CLOB_TARGETS),
        ];

        for (family, value, allowed) in checks {
            if let Some(value) = value {
                if !allowed.contains(&value.as_str()) {
                    return Err(TranslationError::InvalidOverride {
                        family,
                        value: value.clone(),
                        allowed: allowed.join(", "),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Identifier pattern used by the integer heuristic: `ID` or any name ending in `_ID`.
pub const DEFAULT_ID_PATTERN: &str = r"(?i)^(.+_)?id$";

/// Everything that steers translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationOptions {
    /// Cursor representation
    pub cursor_mode: CursorMode,
    /// Map integral `NUMBER` columns to integers only when the name looks like an identifier
    pub integer_id_heuristic: bool,
    /// Pattern an attribute name must match for the heuristic
    pub id_pattern: String,
    /// Per-family overrides
    pub overrides: TypeOverrides,
}

impl Default for TranslationOptions {
    fn default() -> Self {
        Self {
            cursor_mode: CursorMode::GenericList,
            integer_id_heuristic: true,
            id_pattern: DEFAULT_ID_PATTERN.to_string(),
            overrides: TypeOverrides::default(),
        }
    }
}
