//! Method signatures: parameters, type parameters and their constraints.

use metadata::{Argument, ArgumentMode, Procedure};
use types::{Nullability, RowShape, ScalarKind, TargetType};

use super::{BoundArgument, MappingMode};
use crate::generators::{ALLOW_UNMAPPED_PARAM, BY_POSITION_PARAM, CONNECTION_PARAM, MAX_ROWS_PARAM, TITLE_CASE_PARAM};
use crate::source::SourceWriter;

/// Provider types that are classes and so can default to `null`.
const NULLABLE_PROVIDER_TYPES: &[&str] = &["OracleBlob", "OracleClob", "OracleRefCursor"];

/// Arguments that may become optional parameters: the maximal trailing run of
/// defaulted top-level arguments, return value excluded.
pub fn optional_eligible(procedure: &Procedure) -> Vec<&Argument> {
    let mut eligible: Vec<&Argument> =
        procedure.signature_arguments().collect::<Vec<_>>().into_iter().rev().take_while(|a| a.defaulted).collect();
    eligible.reverse();
    eligible
}

/// True if a parameter of this type can default to `null`.
pub(super) fn accepts_null(target: &TargetType) -> bool {
    match target {
        TargetType::Scalar { name, kind: ScalarKind::Provider } => NULLABLE_PROVIDER_TYPES.contains(&name.as_str()),
        _ => true,
    }
}

/// Distinct row type parameters of an overload with their constraints, in argument order.
fn type_parameters(args: &[BoundArgument], mode: MappingMode) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = Vec::new();
    for bound in args.iter().filter(|b| b.is_cursor_output()) {
        let TargetType::RowList(shape) = bound.target(mode) else {
            continue;
        };
        let name = shape.type_parameter();
        if params.iter().any(|(existing, _)| *existing == name) {
            continue;
        }
        let constraint = match (&shape, mode, &bound.row_source) {
            (RowShape::Strong { .. }, MappingMode::StronglyTyped, Some(source)) => {
                format!("class, {}, new()", source.interface)
            }
            _ => "class, new()".to_string(),
        };
        params.push((name, constraint));
    }
    params
}

fn parameter(bound: &BoundArgument, mode: MappingMode) -> String {
    let ty = bound.target(mode).render(Nullability::Nullable);
    match bound.arg.mode {
        ArgumentMode::Out => format!("out {} {}", ty, bound.ident),
        ArgumentMode::InOut => format!("ref {} {}", ty, bound.ident),
        ArgumentMode::In if bound.optional => format!("{} {} = null", ty, bound.ident),
        ArgumentMode::In => format!("{} {}", ty, bound.ident),
    }
}

/// Parameters of an overload: the call signature followed by the synthetic
/// parameters that apply to it.
pub(super) fn parameters(args: &[BoundArgument], mode: MappingMode) -> Vec<String> {
    let mut params: Vec<String> = args.iter().filter(|b| !b.arg.is_return()).map(|b| parameter(b, mode)).collect();

    if mode == MappingMode::DynamicMapping {
        params.push(format!("bool {} = false", BY_POSITION_PARAM));
        params.push(format!("bool {} = false", ALLOW_UNMAPPED_PARAM));
    }
    if mode == MappingMode::WeakTable {
        params.push(format!("bool {} = false", TITLE_CASE_PARAM));
    }
    if args.iter().any(BoundArgument::is_cursor_output) {
        params.push(format!("UInt32? {} = null", MAX_ROWS_PARAM));
    }
    params.push(format!("OracleConnection {} = null", CONNECTION_PARAM));
    params
}

/// Writes the method declaration and opens its body.
pub(super) fn write_header(w: &mut SourceWriter, name: &str, args: &[BoundArgument], mode: MappingMode) {
    let return_type = args
        .iter()
        .find(|b| b.arg.is_return())
        .map_or_else(|| "void".to_string(), |b| b.target(mode).render(Nullability::Nullable));
    let type_params = type_parameters(args, mode);
    let generics = if type_params.is_empty() {
        String::new()
    } else {
        let names: Vec<&str> = type_params.iter().map(|(n, _)| n.as_str()).collect();
        format!("<{}>", names.join(", "))
    };
    let declaration =
        format!("public {} {}{}({})", return_type, name, generics, parameters(args, mode).join(", "));

    if type_params.is_empty() {
        w.open(declaration);
        return;
    }

    w.line(declaration);
    w.indent();
    w.indent();
    let last = type_params.len() - 1;
    for (i, (param, constraint)) in type_params.iter().enumerate() {
        let clause = format!("where {} : {}", param, constraint);
        if i == last {
            w.open(clause);
        } else {
            w.line(clause);
        }
    }
    // body is one level inside the declaration
    w.dedent();
    w.dedent();
}

#[cfg(test)]
mod tests {
    use metadata::TypeDescriptor;

    use super::*;

    fn arg(name: &str, position: u32, defaulted: bool) -> Argument {
        let arg = Argument::new(name, TypeDescriptor::scalar("NUMBER"), ArgumentMode::In, position);
        if defaulted {
            arg.defaulted()
        } else {
            arg
        }
    }

    fn names(procedure: &Procedure) -> Vec<String> {
        optional_eligible(procedure).iter().map(|a| a.bind_name().to_string()).collect()
    }

    #[test]
    fn test_trailing_defaults_are_eligible() {
        let procedure = Procedure::new("P", None, vec![arg("A", 1, false), arg("B", 2, true), arg("C", 3, true)]);
        assert_eq!(names(&procedure), vec!["B", "C"]);
    }

    #[test]
    fn test_scan_stops_at_required_argument() {
        let procedure = Procedure::new("P", None, vec![arg("A", 1, true), arg("B", 2, false), arg("C", 3, true)]);
        assert_eq!(names(&procedure), vec!["C"]);
    }

    #[test]
    fn test_return_value_is_never_eligible() {
        let procedure = Procedure::new(
            "F",
            None,
            vec![Argument::returning(TypeDescriptor::scalar("NUMBER")).defaulted(), arg("A", 1, true)],
        );
        assert_eq!(names(&procedure), vec!["A"]);
    }

    #[test]
    fn test_provider_structs_do_not_accept_null() {
        assert!(!accepts_null(&TargetType::provider("OracleDecimal")));
        assert!(accepts_null(&TargetType::provider("OracleRefCursor")));
        assert!(accepts_null(&TargetType::value("Int32")));
    }
}
