//! Parameter binding statements.

use metadata::ArgumentMode;
use naming::to_pascal;
use types::{Nullability, TypeFamily};

use super::{BoundArgument, MappingMode};
use crate::context::GenerationContext;
use crate::source::SourceWriter;

/// `ParameterDirection` member for an argument.
pub(super) fn direction(bound: &BoundArgument) -> &'static str {
    if bound.arg.is_return() {
        return "ParameterDirection.ReturnValue";
    }
    match bound.arg.mode {
        ArgumentMode::In => "ParameterDirection.Input",
        ArgumentMode::Out => "ParameterDirection.Output",
        ArgumentMode::InOut => "ParameterDirection.InputOutput",
    }
}

/// Writes the statements binding one top-level argument by name.
pub(super) fn write_bind(w: &mut SourceWriter, ctx: &GenerationContext, bound: &BoundArgument, mode: MappingMode) {
    let t = &bound.translation;
    let cmd = ctx.local("cmd");
    let name = bound.arg.bind_name();
    let dir = direction(bound);
    let value = if bound.arg.mode.is_input() && !bound.arg.is_return() { bound.ident.as_str() } else { "null" };

    if bound.optional {
        w.open(format!("if ({} != null)", bound.ident));
    }

    match t.family {
        TypeFamily::AssociativeArray => write_array_bind(w, ctx, bound, mode),
        TypeFamily::Cursor if bound.arg.mode == ArgumentMode::In => w.line(format!(
            "{}.Parameters.Add(new OracleParameter(\"{}\", OracleDbType.RefCursor, {}, {}));",
            cmd, name, value, dir
        )),
        TypeFamily::Cursor => w.line(format!(
            "{}.Parameters.Add(new OracleParameter(\"{}\", OracleDbType.RefCursor, {}));",
            cmd, name, dir
        )),
        _ => match t.bind_size.filter(|_| t.is_variable_length()) {
            Some(size) => w.line(format!(
                "{}.Parameters.Add(new OracleParameter(\"{}\", OracleDbType.{}, {}, {}, {}));",
                cmd, name, t.wire, size, value, dir
            )),
            None => w.line(format!(
                "{}.Parameters.Add(new OracleParameter(\"{}\", OracleDbType.{}, {}, {}));",
                cmd, name, t.wire, value, dir
            )),
        },
    }

    if bound.optional {
        w.close();
    }
}

/// Binds an associative array. Outputs are sized to the configured capacity,
/// inputs to their element count.
fn write_array_bind(w: &mut SourceWriter, ctx: &GenerationContext, bound: &BoundArgument, mode: MappingMode) {
    let t = &bound.translation;
    let cmd = ctx.local("cmd");
    let param = ctx.local(&format!("p{}", to_pascal(bound.arg.bind_name(), false)));
    let ident = &bound.ident;
    let element = match &bound.target(mode) {
        types::TargetType::List(element) => element.render(Nullability::Nullable),
        other => other.render(Nullability::Nullable),
    };

    let size = if bound.arg.mode.is_output() {
        ctx.codegen().max_associative_array_size.to_string()
    } else {
        format!("({} == null ? 0 : {}.Count)", ident, ident)
    };

    w.line(format!(
        "OracleParameter {} = {}.Parameters.Add(new OracleParameter(\"{}\", OracleDbType.{}, {}));",
        param,
        cmd,
        bound.arg.bind_name(),
        t.wire,
        direction(bound)
    ));
    w.line(format!("{}.CollectionType = OracleCollectionType.PLSQLAssociativeArray;", param));
    w.line(format!("{}.Size = {};", param, size));
    if bound.arg.mode.is_input() {
        w.line(format!(
            "{p}.Value = ({id} == null || {id}.Count == 0 ? new {el}[]{{}} : new List<{el}>({id}).ToArray());",
            p = param,
            id = ident,
            el = element
        ));
    }

    let element_size = t.element.as_ref().filter(|e| e.is_variable_length()).and_then(|e| e.bind_size);
    if let Some(element_size) = element_size {
        let index = ctx.local("i");
        w.line(format!("{}.ArrayBindSize = new int[{}];", param, size));
        w.line(format!(
            "for (int {i} = 0; {i} < {p}.ArrayBindSize.Length; {i}++) {p}.ArrayBindSize[{i}] = {len};",
            i = index,
            p = param,
            len = element_size
        ));
    }
}
