//! Procedure call wrappers.
//!
//! Every procedure of a package becomes one method, or a small overload set when
//! it returns cursors, on the package class. A wrapper binds each top-level
//! argument by name, executes the call, reads outputs back in argument order and
//! releases the connection it opened. Procedures with an argument that cannot be
//! mapped are emitted as a commented-out declaration instead.

mod binding;
mod retrieval;
mod signature;

pub use signature::optional_eligible;

use metadata::{Argument, ArgumentMode, Package, Procedure};
use naming::{escape_keyword, to_camel, to_pascal};
use tracing::{debug, warn};
use types::{CursorMode, Nullability, RowShape, TargetType, Translation, TranslationError, TypeFamily};

use crate::context::GenerationContext;
use crate::generators::package::RecordCatalog;
use crate::generators::CONNECTION_PARAM;
use crate::source::SourceWriter;
use crate::{GeneratedUnit, UnitKind};

/// How the rows of output cursors are read in one overload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingMode {
    /// No cursor is read
    Plain,
    /// Rows are read by the materializer of a known record
    StronglyTyped,
    /// Rows are mapped onto any class by column name or position
    DynamicMapping,
    /// Rows are read into an untyped table
    WeakTable,
}

/// The overloads generated for a procedure, in emission order.
///
/// A procedure reading no cursor gets a single plain method. A strongly typed
/// cursor gets one generic overload, preceded by a dynamic mapping one when
/// `dynamic_for_typed` is set. A weak cursor gets a dynamic mapping overload and,
/// unless a cursor is also passed in, a table overload.
pub fn plan_overloads(procedure: &Procedure, cursor_mode: CursorMode, dynamic_for_typed: bool) -> Vec<MappingMode> {
    if !procedure.has_output_cursor() {
        return vec![MappingMode::Plain];
    }
    if cursor_mode == CursorMode::WeakTable {
        return vec![MappingMode::WeakTable];
    }

    let accepts_table = !procedure.has_input_cursor();
    let mut modes = Vec::new();
    if procedure.uses_weak_cursor() {
        modes.push(MappingMode::DynamicMapping);
        if accepts_table {
            modes.push(MappingMode::WeakTable);
        }
    } else {
        if dynamic_for_typed && accepts_table {
            modes.push(MappingMode::DynamicMapping);
        }
        modes.push(MappingMode::StronglyTyped);
    }
    modes
}

/// Materializer of a strongly typed cursor's row record.
#[derive(Debug, Clone)]
struct RowSource {
    /// Interface constraining the row type parameter
    interface: String,
    /// Qualified materializer method
    materializer: String,
}

/// A top-level argument with its translation and C# identifier.
#[derive(Debug, Clone)]
struct BoundArgument<'p> {
    arg: &'p Argument,
    translation: Translation,
    ident: String,
    optional: bool,
    row_source: Option<RowSource>,
}

impl BoundArgument<'_> {
    /// Target type of the argument in an overload.
    fn target(&self, mode: MappingMode) -> TargetType {
        match (&self.translation.target, mode) {
            (TargetType::RowList(_), MappingMode::WeakTable) => TargetType::Table,
            (target, _) => target.clone(),
        }
    }

    fn is_cursor_output(&self) -> bool {
        self.translation.family == TypeFamily::Cursor && self.arg.is_output()
    }
}

/// Synthesizes the methods of one package's procedures.
pub struct ProcedureSynthesizer<'a> {
    ctx: &'a GenerationContext,
    package: &'a Package,
    class_name: &'a str,
    catalog: &'a RecordCatalog,
}

impl<'a> ProcedureSynthesizer<'a> {
    /// Create a synthesizer for procedures of `package`, rendered into class `class_name`.
    pub fn new(
        ctx: &'a GenerationContext,
        package: &'a Package,
        class_name: &'a str,
        catalog: &'a RecordCatalog,
    ) -> Self {
        Self { ctx, package, class_name, catalog }
    }

    /// Method name of a procedure, kept distinct from the enclosing class name.
    pub fn method_name(&self, procedure: &Procedure) -> String {
        let mut name = to_pascal(&procedure.name, false);
        if name == self.class_name {
            name.push('_');
        }
        name
    }

    /// Synthesizes the overloads of a procedure, or a single ignored unit if one
    /// of its arguments cannot be mapped.
    pub fn synthesize(&self, procedure: &Procedure) -> Vec<GeneratedUnit> {
        let args = match self.bind_arguments(procedure) {
            Ok(args) => args,
            Err(error) => {
                warn!(package = %self.package.name, procedure = %procedure.name, reason = %error, "procedure ignored");
                return vec![self.ignored(procedure, &error)];
            }
        };

        let modes = plan_overloads(
            procedure,
            self.ctx.translator().cursor_mode(),
            self.ctx.codegen().dynamic_mapping_for_typed_cursor,
        );
        debug!(procedure = %procedure.name, overloads = ?modes, "synthesizing procedure");
        modes
            .into_iter()
            .map(|mode| GeneratedUnit::new(self.method_name(procedure), UnitKind::Method, self.method(procedure, &args, mode)))
            .collect()
    }

    fn bind_arguments<'p>(&self, procedure: &'p Procedure) -> Result<Vec<BoundArgument<'p>>, TranslationError> {
        let translator = self.ctx.translator();
        let eligible = optional_eligible(procedure);

        let mut args = Vec::new();
        for arg in procedure.top_level_arguments() {
            let translation = translator.translate_argument(arg)?;
            if matches!(translation.family, TypeFamily::Record | TypeFamily::Object) {
                return Err(TranslationError::UnsupportedType(format!(
                    "{} argument {}",
                    arg.ty.data_type.trim(),
                    arg.bind_name()
                )));
            }
            let row_source = match &translation.target {
                TargetType::RowList(shape @ RowShape::Strong { .. }) if !procedure.uses_weak_cursor() => {
                    Some(self.row_source(shape)?)
                }
                _ => None,
            };
            let ident = match &arg.name {
                Some(name) => escape_keyword(&to_camel(name, false)),
                None => self.ctx.local("ret"),
            };
            args.push(BoundArgument { arg, translation, ident, optional: false, row_source });
        }

        // Optional parameters must trail the required ones.
        for bound in args.iter_mut().rev().filter(|b| !b.arg.is_return()) {
            let accepted = eligible.iter().any(|e| std::ptr::eq(*e, bound.arg))
                && bound.arg.mode == ArgumentMode::In
                && signature::accepts_null(&bound.translation.target);
            if !accepted {
                break;
            }
            bound.optional = true;
        }
        Ok(args)
    }

    fn row_source(&self, shape: &RowShape) -> Result<RowSource, TranslationError> {
        let RowShape::Strong { record, package, .. } = shape else {
            return Err(TranslationError::MetadataInconsistency("weak row shape has no record".to_string()));
        };
        let entry = self.catalog.lookup(&self.package.name, package.as_deref(), record).ok_or_else(|| {
            TranslationError::MetadataInconsistency(format!("cursor row record {} is not generated", record))
        })?;
        Ok(RowSource {
            interface: entry.qualified_interface(&self.package.name),
            materializer: entry.qualified_materializer(&self.package.name),
        })
    }

    fn command_text(&self, procedure: &Procedure) -> String {
        let owner = if self.package.owner.is_empty() { self.ctx.schema() } else { &self.package.owner };
        format!("{}.{}.{}", owner, self.package.name, procedure.name)
    }

    fn method(&self, procedure: &Procedure, args: &[BoundArgument], mode: MappingMode) -> String {
        let ctx = self.ctx;
        let conn = ctx.local("conn");
        let cmd = ctx.local("cmd");
        let trace = ctx.local("cmdTrace");

        let mut w = SourceWriter::new();
        signature::write_header(&mut w, &self.method_name(procedure), args, mode);

        for bound in args.iter().filter(|b| b.arg.mode == ArgumentMode::Out && !b.arg.is_return()) {
            w.line(format!("{} = {};", bound.ident, initial_value(&bound.target(mode))));
        }
        let ret = args.iter().find(|b| b.arg.is_return());
        if let Some(ret) = ret {
            let target = ret.target(mode);
            w.line(format!("{} {} = {};", target.render(Nullability::Nullable), ret.ident, initial_value(&target)));
        }

        w.line(format!("OracleConnection {} = {} ?? GetConnection();", conn, CONNECTION_PARAM));
        w.open("try");
        w.open(format!(
            "using (OracleCommand {} = new OracleCommand(\"{}\", {}))",
            cmd,
            self.command_text(procedure),
            conn
        ));
        w.line(format!("{}.CommandType = CommandType.StoredProcedure;", cmd));
        w.line(format!("{}.BindByName = true;", cmd));
        for bound in args {
            binding::write_bind(&mut w, ctx, bound, mode);
        }
        w.line(format!(
            "OracleCommandTrace {} = IsTracing({}) ? new OracleCommandTrace({}) : null;",
            trace, cmd, cmd
        ));
        w.line(format!("{}.ExecuteNonQuery();", cmd));
        for bound in args.iter().filter(|b| b.arg.is_output()) {
            retrieval::write_retrieval(&mut w, ctx, bound, mode);
        }
        match rows_read(args, mode) {
            Some(count) => w.line(format!("if ({} != null) TraceCompletion({}, {});", trace, trace, count)),
            None => w.line(format!("if ({} != null) TraceCompletion({});", trace, trace)),
        }
        w.close_labeled("using OracleCommand");
        w.dedent();
        w.open("} finally");
        w.open(format!("if ({} == null)", CONNECTION_PARAM));
        w.line(format!("{}.Close();", conn));
        w.line(format!("{}.Dispose();", conn));
        w.close();
        w.close();
        if let Some(ret) = ret {
            w.line(format!("return {};", ret.ident));
        }
        w.close_labeled(self.method_name(procedure));
        w.finish()
    }

    /// Commented-out declaration of a procedure that cannot be bound.
    fn ignored(&self, procedure: &Procedure, error: &TranslationError) -> GeneratedUnit {
        let translator = self.ctx.translator();
        let describe = |arg: &Argument| {
            translator
                .translate_argument(arg)
                .map(|t| t.target.render(Nullability::Nullable))
                .unwrap_or_else(|_| arg.ty.normalized_name())
        };

        let return_type = procedure.return_argument().map_or_else(|| "void".to_string(), describe);
        let params: Vec<String> = procedure
            .signature_arguments()
            .map(|arg| {
                let ident = escape_keyword(&to_camel(arg.bind_name(), false));
                let prefix = match arg.mode {
                    ArgumentMode::In => "",
                    ArgumentMode::Out => "out ",
                    ArgumentMode::InOut => "ref ",
                };
                format!("{}{} {}", prefix, describe(arg), ident)
            })
            .collect();

        let text = format!(
            "// **PROC IGNORED** - {}\n// public {} {}({});\n",
            error,
            return_type,
            self.method_name(procedure),
            params.join(", ")
        );
        GeneratedUnit::new(self.method_name(procedure), UnitKind::IgnoredMethod, text)
    }
}

/// Expression counting the rows read from every output cursor of an overload.
fn rows_read(args: &[BoundArgument], mode: MappingMode) -> Option<String> {
    let counts: Vec<String> = args
        .iter()
        .filter(|b| b.is_cursor_output())
        .map(|b| match b.target(mode) {
            TargetType::Table => format!("({id} == null ? 0 : {id}.Rows.Count)", id = b.ident),
            _ => format!("{}.Count", b.ident),
        })
        .collect();
    if counts.is_empty() {
        None
    } else {
        Some(counts.join(" + "))
    }
}

/// Value an output is initialised with before the call.
fn initial_value(target: &TargetType) -> String {
    match target {
        TargetType::RowList(_) => format!("new {}()", target.render_instance()),
        other => other.null_literal(),
    }
}
