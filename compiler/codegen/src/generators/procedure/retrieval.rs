//! Reading output values back after the call.

use types::{ScalarKind, TargetType, Translation, TypeFamily, MAX_DECIMAL_PRECISION};

use super::{BoundArgument, MappingMode};
use crate::context::GenerationContext;
use crate::generators::{ALLOW_UNMAPPED_PARAM, BY_POSITION_PARAM, MAX_ROWS_PARAM, TITLE_CASE_PARAM};
use crate::source::SourceWriter;

const NUMERIC_TARGETS: &[&str] = &["Byte", "Int16", "Int32", "Int64", "Single", "Double", "Decimal"];

/// Converts a raw provider value into the target type.
///
/// `typed` tells whether `raw` is already of the provider type or still an `object`.
fn coerce(t: &Translation, raw: &str, typed: bool) -> String {
    let as_provider = |provider: &str| if typed { raw.to_string() } else { format!("(({}){})", provider, raw) };
    match &t.target {
        TargetType::Scalar { name, kind: ScalarKind::Provider } => {
            if typed {
                raw.to_string()
            } else {
                format!("({}){}", name, raw)
            }
        }
        _ if t.is_decimal() => format!(
            "(Decimal?)OracleDecimal.SetPrecision({}, {})",
            as_provider("OracleDecimal"),
            t.precision.unwrap_or(MAX_DECIMAL_PRECISION)
        ),
        TargetType::Scalar { name, .. } if NUMERIC_TARGETS.contains(&name.as_str()) => {
            format!("Convert.To{}({}.ToString())", name, raw)
        }
        _ if matches!(t.family, TypeFamily::Character(_)) => format!("{}.ToString()", raw),
        _ => format!("{}.Value", as_provider(t.provider)),
    }
}

/// Writes the statements assigning one output argument from its bound parameter.
pub(super) fn write_retrieval(w: &mut SourceWriter, ctx: &GenerationContext, bound: &BoundArgument, mode: MappingMode) {
    let t = &bound.translation;
    let param = format!("{}.Parameters[\"{}\"]", ctx.local("cmd"), bound.arg.bind_name());
    let target = bound.target(mode);

    match t.family {
        TypeFamily::Cursor => write_cursor(w, ctx, bound, &param, mode),
        TypeFamily::AssociativeArray => {
            let Some(element) = t.element.as_deref() else {
                return;
            };
            let value = ctx.local("v");
            w.line(format!("{} = new {}();", bound.ident, target.render_instance()));
            w.open(format!(
                "foreach ({prov} {v} in ({p}.Value as {prov}[]) ?? new {prov}[0])",
                prov = element.provider,
                v = value,
                p = param
            ));
            w.line(format!(
                "{}.Add({}.IsNull ? {} : {});",
                bound.ident,
                value,
                element.target.null_literal(),
                coerce(element, &value, true)
            ));
            w.close();
        }
        _ => w.line(format!(
            "{} = {}.Status == OracleParameterStatus.NullFetched ? {} : {};",
            bound.ident,
            param,
            target.null_literal(),
            coerce(t, &format!("{}.Value", param), false)
        )),
    }
}

/// Hands an output cursor to the row reader of the overload.
fn write_cursor(w: &mut SourceWriter, ctx: &GenerationContext, bound: &BoundArgument, param: &str, mode: MappingMode) {
    let rdr = ctx.local("rdr");
    let cursor = format!("((OracleRefCursor){}.Value)", param);
    let read = match bound.target(mode) {
        TargetType::Table => format!("Hydrator.ReadResult({}, {}, {})", rdr, TITLE_CASE_PARAM, MAX_ROWS_PARAM),
        TargetType::RowList(shape) => match (&bound.row_source, mode) {
            (Some(source), MappingMode::StronglyTyped) => {
                format!("{}<{}>({}, {})", source.materializer, shape.type_parameter(), rdr, MAX_ROWS_PARAM)
            }
            _ => format!(
                "Hydrator.ReadResult<{}>({}, {}, {}, {})",
                shape.type_parameter(),
                rdr,
                BY_POSITION_PARAM,
                ALLOW_UNMAPPED_PARAM,
                MAX_ROWS_PARAM
            ),
        },
        _ => return,
    };

    w.open(format!("if (!{}.IsNull)", cursor));
    w.open(format!("using (OracleDataReader {} = {}.GetDataReader())", rdr, cursor));
    w.line(format!("{} = {};", bound.ident, read));
    w.close_labeled("using OracleDataReader");
    w.close();
}

#[cfg(test)]
mod tests {
    use metadata::TypeDescriptor;
    use types::{TranslationOptions, TypeTranslator};

    use super::*;

    fn translate(ty: TypeDescriptor, name: &str) -> Translation {
        let translator = TypeTranslator::new(TranslationOptions::default()).expect("default options are valid");
        translator.translate(&ty, Some(name)).expect("type is supported")
    }

    #[test]
    fn test_coerce_integer_identifier() {
        let t = translate(TypeDescriptor::scalar("NUMBER").with_precision(6, 0), "dept_id");
        assert_eq!(coerce(&t, "p.Value", false), "Convert.ToInt32(p.Value.ToString())");
    }

    #[test]
    fn test_coerce_decimal_normalizes_precision() {
        let t = translate(TypeDescriptor::scalar("NUMBER").with_precision(38, 2), "salary");
        assert_eq!(coerce(&t, "p.Value", false), "(Decimal?)OracleDecimal.SetPrecision(((OracleDecimal)p.Value), 29)");
        assert_eq!(coerce(&t, "__v", true), "(Decimal?)OracleDecimal.SetPrecision(__v, 29)");
    }

    #[test]
    fn test_coerce_large_object_is_eager() {
        let t = translate(TypeDescriptor::scalar("CLOB"), "notes");
        assert_eq!(coerce(&t, "p.Value", false), "((OracleClob)p.Value).Value");
    }

    #[test]
    fn test_coerce_text() {
        let t = translate(TypeDescriptor::scalar("VARCHAR2").with_length(30), "name");
        assert_eq!(coerce(&t, "p.Value", false), "p.Value.ToString()");
    }
}
