//! Abstract base classes shared by the generated packages and entities.

use metadata::EntityKind;

use crate::context::GenerationContext;
use crate::source::{write_preamble, SourceWriter};
use crate::{GeneratedUnit, UnitKind};

/// Escapes text for a C# regular string literal.
fn string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// The abstract adapter every package class derives from. It owns connection
/// creation and the command tracing hooks.
pub fn base_adapter(ctx: &GenerationContext) -> GeneratedUnit {
    let db = ctx.database();
    let adapter = ctx.adapter_class();
    let conn = ctx.local("conn");
    let connection_string =
        format!("data source={};user id={};password={};enlist=false", db.instance, db.login, db.password);

    let mut w = SourceWriter::new();
    write_preamble(&mut w, &[]);
    w.open(format!("namespace {}", ctx.namespace()));
    w.open(format!("public abstract class {}", adapter));
    w.open("protected static string GetConnectionString()");
    w.line(format!("return {};", string_literal(&connection_string)));
    w.close();
    w.blank();
    w.open("protected virtual OracleConnection GetConnection()");
    w.line(format!("OracleConnection {} = new OracleConnection(GetConnectionString());", conn));
    w.line(format!("{}.Open();", conn));
    w.line(format!("return {};", conn));
    w.close();
    w.blank();
    w.open("protected virtual bool IsTracing(OracleCommand cmd)");
    w.line("return false;");
    w.close();
    w.blank();
    w.open("protected virtual void TraceCompletion(OracleCommandTrace cmdTrace)");
    w.close();
    w.blank();
    w.open("protected virtual void TraceCompletion(OracleCommandTrace cmdTrace, int rowCount)");
    w.line("TraceCompletion(cmdTrace);");
    w.close();
    w.close_labeled(&adapter);
    w.close_labeled(ctx.namespace());

    GeneratedUnit::new(ctx.file_name("BaseAdapter"), UnitKind::CompilationUnit, w.finish())
}

/// The root entity class and one abstract base per entity kind.
pub fn base_entities(ctx: &GenerationContext) -> GeneratedUnit {
    let root = ctx.base_entity_class();

    let mut w = SourceWriter::new();
    write_preamble(&mut w, &[]);
    w.open(format!("namespace {}", ctx.namespace()));
    w.line("[Serializable()]");
    w.open(format!("public abstract class {}", root));
    w.close_labeled(&root);
    for kind in [EntityKind::PackageRecord, EntityKind::ObjectType, EntityKind::Table, EntityKind::View] {
        let class = ctx.entity_base_class(kind);
        w.blank();
        w.line("[Serializable()]");
        w.open(format!("public abstract class {} : {}", class, root));
        w.close_labeled(&class);
    }
    w.close_labeled(ctx.namespace());

    GeneratedUnit::new(ctx.file_name("BaseEntity"), UnitKind::CompilationUnit, w.finish())
}
