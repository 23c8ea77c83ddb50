//! The rule table mapping domain types to target and wire types.

use metadata::{Argument, ArgumentMode, DomainKind, Field, TypeDescriptor};
use regex::Regex;

use crate::family::{CharacterKind, FloatKind, LobKind, TimestampKind, TypeFamily};
use crate::options::{CursorMode, TranslationOptions, DECIMAL_TARGETS, INTEGER_TARGETS, TIMESTAMP_TARGETS};
use crate::target::{RowShape, ScalarKind, TargetType};
use crate::TranslationError;

/// Most significant digits a target `Decimal` holds; digits beyond are rounded away.
pub const MAX_DECIMAL_PRECISION: u32 = 29;

/// Largest integral precision that still fits a 64-bit integer.
pub const MAX_INTEGER_PRECISION: u32 = 18;

/// Largest integral precision that fits a 32-bit integer.
pub const MAX_INT32_PRECISION: u32 = 9;

/// Bind size used for character values with no declared length.
pub const DEFAULT_STRING_SIZE: u32 = 32767;

/// The result of translating one domain type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Rule-table family
    pub family: TypeFamily,
    /// Type used in the generated bindings
    pub target: TargetType,
    /// Native wire type (member of `OracleDbType`)
    pub wire: &'static str,
    /// Provider type a raw value arrives as
    pub provider: &'static str,
    /// Bind size for variable-length values
    pub bind_size: Option<u32>,
    /// Normalised decimal precision
    pub precision: Option<u32>,
    /// Element translation of an associative array
    pub element: Option<Box<Translation>>,
}

impl Translation {
    fn scalar(family: TypeFamily, target: TargetType, wire: &'static str, provider: &'static str) -> Self {
        Self { family, target, wire, provider, bind_size: None, precision: None, element: None }
    }

    /// True for BLOB/CLOB/NCLOB.
    pub fn is_large_object(&self) -> bool { matches!(self.family, TypeFamily::LargeObject(_)) }

    /// True when the target is a decimal that needs precision normalisation.
    pub fn is_decimal(&self) -> bool {
        matches!(&self.target, TargetType::Scalar { name, kind: ScalarKind::Value } if name == "Decimal")
    }

    /// True for variable-length values that need a bind size.
    pub fn is_variable_length(&self) -> bool {
        matches!(self.family, TypeFamily::Character(_) | TypeFamily::Binary)
    }
}

/// Translates domain types under a fixed set of options.
#[derive(Debug, Clone)]
pub struct TypeTranslator {
    options: TranslationOptions,
    id_pattern: Regex,
}

impl TypeTranslator {
    /// Builds a translator, rejecting invalid overrides or an invalid identifier pattern.
    pub fn new(options: TranslationOptions) -> Result<Self, TranslationError> {
        options.overrides.validate()?;
        let id_pattern = Regex::new(&options.id_pattern)
            .map_err(|e: regex::Error| TranslationError::InvalidPattern(e.to_string()))?;
        Ok(Self { options, id_pattern })
    }

    /// The options this translator was built with.
    pub fn options(&self) -> &TranslationOptions { &self.options }

    /// The cursor representation in effect.
    pub fn cursor_mode(&self) -> CursorMode { self.options.cursor_mode }

    /// Caps a declared precision at [`MAX_DECIMAL_PRECISION`]; undeclared precision gets the cap.
    pub fn normalize_precision(precision: Option<u32>) -> u32 {
        precision.map_or(MAX_DECIMAL_PRECISION, |p| p.min(MAX_DECIMAL_PRECISION))
    }

    /// Translates a procedure argument.
    ///
    /// Cursors passed in by the caller are handed through as provider cursor handles;
    /// cursors flowing back are read into rows. A function's return value uses
    /// `return` as its name for row type naming.
    pub fn translate_argument(&self, arg: &Argument) -> Result<Translation, TranslationError> {
        if arg.ty.kind() == DomainKind::Cursor && !arg.is_return() {
            match arg.mode {
                ArgumentMode::In => {
                    return Ok(Translation::scalar(
                        TypeFamily::Cursor,
                        TargetType::provider("OracleRefCursor"),
                        "RefCursor",
                        "OracleRefCursor",
                    ));
                }
                ArgumentMode::InOut => {
                    return Err(TranslationError::UnsupportedType("IN/OUT REF CURSOR".to_string()));
                }
                ArgumentMode::Out => {}
            }
        }
        self.translate(&arg.ty, Some(arg.name.as_deref().unwrap_or("return")))
    }

    /// Translates a record field, table column or object attribute.
    ///
    /// An explicit mapped type replaces the name of a scalar target.
    pub fn translate_field(&self, field: &Field) -> Result<Translation, TranslationError> {
        let mut translation = self.translate(&field.ty, Some(&field.name))?;
        if let (Some(mapped), TargetType::Scalar { name, .. }) = (&field.mapped_type, &mut translation.target) {
            *name = mapped.clone();
        }
        Ok(translation)
    }

    /// Translates a domain type; `name` is the attribute or argument name it belongs to.
    pub fn translate(&self, ty: &TypeDescriptor, name: Option<&str>) -> Result<Translation, TranslationError> {
        let family = TypeFamily::classify(&ty.data_type)
            .ok_or_else(|| TranslationError::UnsupportedType(ty.data_type.trim().to_string()))?;
        let overrides = &self.options.overrides;

        let translation = match family {
            TypeFamily::Integer => self.integer(overrides.integer.as_deref().unwrap_or("Int32"))?,
            TypeFamily::Number => self.number(ty, name)?,
            TypeFamily::Float(FloatKind::Single) => {
                Translation::scalar(family, TargetType::value("Single"), "BinaryFloat", "OracleDecimal")
            }
            TypeFamily::Float(FloatKind::Double) => {
                Translation::scalar(family, TargetType::value("Double"), "BinaryDouble", "OracleDecimal")
            }
            TypeFamily::Character(kind) => {
                let wire = match kind {
                    CharacterKind::Varchar2 => "Varchar2",
                    CharacterKind::NVarchar2 => "NVarchar2",
                    CharacterKind::Char => "Char",
                    CharacterKind::NChar => "NChar",
                };
                Translation {
                    bind_size: Some(ty.length.unwrap_or(DEFAULT_STRING_SIZE)),
                    ..Translation::scalar(family, TargetType::reference("String"), wire, "OracleString")
                }
            }
            TypeFamily::Date => {
                let target = overridable(overrides.date.as_deref(), "DateTime", ScalarKind::Value);
                Translation::scalar(family, target, "Date", "OracleDate")
            }
            TypeFamily::Timestamp(kind) => {
                let (wire, provider) = match kind {
                    TimestampKind::Plain => ("TimeStamp", "OracleTimeStamp"),
                    TimestampKind::TimeZone => ("TimeStampTZ", "OracleTimeStampTZ"),
                    TimestampKind::LocalTimeZone => ("TimeStampLTZ", "OracleTimeStampLTZ"),
                };
                let target = match overrides.timestamp.as_deref() {
                    None | Some("DateTime") => TargetType::value("DateTime"),
                    Some("OracleTimeStamp") => TargetType::provider(provider),
                    Some(other) => return Err(invalid_override("timestamp", other, TIMESTAMP_TARGETS)),
                };
                Translation::scalar(family, target, wire, provider)
            }
            TypeFamily::Interval => {
                let target = overridable(overrides.interval.as_deref(), "TimeSpan", ScalarKind::Value);
                Translation::scalar(family, target, "IntervalDS", "OracleIntervalDS")
            }
            TypeFamily::LargeObject(LobKind::Blob) => {
                let target = overridable(overrides.blob.as_deref(), "Byte[]", ScalarKind::Reference);
                Translation::scalar(family, target, "Blob", "OracleBlob")
            }
            TypeFamily::LargeObject(kind) => {
                let target = overridable(overrides.clob.as_deref(), "String", ScalarKind::Reference);
                let wire = if kind == LobKind::NClob { "NClob" } else { "Clob" };
                Translation::scalar(family, target, wire, "OracleClob")
            }
            TypeFamily::Binary => Translation {
                bind_size: Some(ty.length.unwrap_or(DEFAULT_STRING_SIZE)),
                ..Translation::scalar(family, TargetType::reference("Byte[]"), "Raw", "OracleBinary")
            },
            TypeFamily::Boolean => {
                Translation::scalar(family, TargetType::value("Boolean"), "Boolean", "OracleBoolean")
            }
            TypeFamily::Cursor => {
                let target = match self.options.cursor_mode {
                    CursorMode::WeakTable => TargetType::Table,
                    CursorMode::GenericList => TargetType::RowList(row_shape(ty, name)?),
                };
                Translation::scalar(family, target, "RefCursor", "OracleRefCursor")
            }
            TypeFamily::AssociativeArray => self.associative_array(ty)?,
            TypeFamily::Record | TypeFamily::Object => {
                let type_name = ty.type_name.as_deref().ok_or_else(|| {
                    TranslationError::MetadataInconsistency(format!("{} without a type name", ty.data_type))
                })?;
                let target = TargetType::Entity {
                    name: naming::to_pascal(type_name, false),
                    owner: ty.type_owner.clone(),
                };
                Translation::scalar(family, target, "Object", "Object")
            }
        };
        Ok(translation)
    }

    fn integer(&self, target: &str) -> Result<Translation, TranslationError> {
        let (target, wire) = match target {
            "Int32" => (TargetType::value("Int32"), "Int32"),
            "Int64" => (TargetType::value("Int64"), "Int64"),
            "Decimal" => (TargetType::value("Decimal"), "Decimal"),
            "OracleDecimal" => (TargetType::provider("OracleDecimal"), "Decimal"),
            other => return Err(invalid_override("integer", other, INTEGER_TARGETS)),
        };
        Ok(Translation::scalar(TypeFamily::Integer, target, wire, "OracleDecimal"))
    }

    fn number(&self, ty: &TypeDescriptor, name: Option<&str>) -> Result<Translation, TranslationError> {
        let integral_precision = match (ty.precision, ty.scale) {
            (Some(p), Some(0)) if p <= MAX_INTEGER_PRECISION => Some(p),
            _ => None,
        };
        let looks_like_id = name.is_some_and(|n| self.id_pattern.is_match(n));

        if let Some(precision) = integral_precision {
            if self.options.integer_id_heuristic && looks_like_id {
                let integer = if precision <= MAX_INT32_PRECISION {
                    self.integer(self.options.overrides.integer.as_deref().unwrap_or("Int32"))?
                } else {
                    self.integer("Int64")?
                };
                return Ok(Translation { family: TypeFamily::Number, ..integer });
            }
        }

        let (target, wire) = match self.options.overrides.decimal.as_deref() {
            None | Some("Decimal") => (TargetType::value("Decimal"), "Decimal"),
            Some("Double") => (TargetType::value("Double"), "Double"),
            Some("OracleDecimal") => (TargetType::provider("OracleDecimal"), "Decimal"),
            Some(other) => return Err(invalid_override("decimal", other, DECIMAL_TARGETS)),
        };
        Ok(Translation {
            precision: Some(Self::normalize_precision(ty.precision)),
            ..Translation::scalar(TypeFamily::Number, target, wire, "OracleDecimal")
        })
    }

    fn associative_array(&self, ty: &TypeDescriptor) -> Result<Translation, TranslationError> {
        let element_ty = ty.element.as_deref().ok_or_else(|| {
            TranslationError::MetadataInconsistency(format!(
                "{} {} has no element type",
                ty.data_type,
                ty.type_name.as_deref().unwrap_or_default()
            ))
        })?;
        let element = self.translate(element_ty, None)?;
        if !element.family.is_array_element() {
            return Err(TranslationError::UnsupportedType(format!(
                "{} of {}",
                ty.data_type.trim(),
                element_ty.data_type.trim()
            )));
        }

        Ok(Translation {
            family: TypeFamily::AssociativeArray,
            target: TargetType::List(Box::new(element.target.clone())),
            wire: element.wire,
            provider: element.provider,
            bind_size: element.bind_size,
            precision: element.precision,
            element: Some(Box::new(element)),
        })
    }
}

fn invalid_override(family: &'static str, value: &str, allowed: &[&str]) -> TranslationError {
    TranslationError::InvalidOverride { family, value: value.to_string(), allowed: allowed.join(", ") }
}

fn overridable(configured: Option<&str>, default: &str, default_kind: ScalarKind) -> TargetType {
    match configured {
        Some(name) if name.starts_with("Oracle") => TargetType::provider(name),
        Some(name) => TargetType::Scalar { name: name.to_string(), kind: default_kind },
        None => TargetType::Scalar { name: default.to_string(), kind: default_kind },
    }
}

fn row_shape(ty: &TypeDescriptor, name: Option<&str>) -> Result<RowShape, TranslationError> {
    match ty.element.as_deref() {
        Some(row) => {
            let record = row.type_name.clone().ok_or_else(|| {
                TranslationError::MetadataInconsistency("cursor row record without a name".to_string())
            })?;
            Ok(RowShape::Strong { record, package: row.type_package.clone(), owner: row.type_owner.clone() })
        }
        None => Ok(RowShape::Weak { hint: name.unwrap_or("return").to_string() }),
    }
}
