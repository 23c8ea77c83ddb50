//! Package classes and record ownership.
//!
//! Each in-scope package becomes one compilation unit holding a sealed class with
//! a single shared instance. Record types are generated exactly once, nested in
//! the class of the package that declares them; every other package refers to
//! that class through the [`RecordCatalog`].

use metadata::{EntityKind, Package, RecordType, SchemaMetadata};
use naming::to_pascal;
use tracing::{debug, info};

use crate::context::GenerationContext;
use crate::generators::entity::EntitySynthesizer;
use crate::generators::procedure::ProcedureSynthesizer;
use crate::source::{write_preamble, SourceWriter};
use crate::{GeneratedUnit, UnitKind};

/// Where a generated record lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordEntry {
    /// Package declaring the record
    pub origin_package: String,
    /// Record name
    pub record: String,
    /// Package whose class nests the generated record
    pub generating_package: String,
    /// Class of the generating package
    pub owner_class: String,
    /// Record class name
    pub class_name: String,
    /// Record interface name
    pub interface_name: String,
}

impl RecordEntry {
    fn is_local_to(&self, package: &str) -> bool { self.generating_package.eq_ignore_ascii_case(package) }

    /// Interface name as seen from the class of `package`.
    pub fn qualified_interface(&self, package: &str) -> String {
        if self.is_local_to(package) {
            self.interface_name.clone()
        } else {
            format!("{}.{}", self.owner_class, self.interface_name)
        }
    }

    /// Materializer method as called from the class of `package`.
    pub fn qualified_materializer(&self, package: &str) -> String {
        let method = EntitySynthesizer::materializer_name(&self.class_name);
        if self.is_local_to(package) {
            method
        } else {
            format!("{}.Instance.{}", self.owner_class, method)
        }
    }
}

/// Every record generated in a run, keyed by the package generating it.
#[derive(Debug, Clone, Default)]
pub struct RecordCatalog {
    entries: Vec<RecordEntry>,
}

impl RecordCatalog {
    /// Catalogs the records each in-scope package generates. Records skipped for
    /// an unsupported field are left out.
    pub fn build(ctx: &GenerationContext, schema: &SchemaMetadata) -> Self {
        let synthesizer = EntitySynthesizer::new(ctx);
        let mut entries = Vec::new();
        for package in &schema.packages {
            let owner_class = PackageAssembler::class_name(package);
            for record in owned_records(ctx, schema, package, &schema.records) {
                if synthesizer.unsupported_attribute(record).is_some() {
                    continue;
                }
                let class_name = EntitySynthesizer::class_name(record);
                entries.push(RecordEntry {
                    origin_package: record.package_name.clone(),
                    record: record.name.clone(),
                    generating_package: package.name.clone(),
                    owner_class: owner_class.clone(),
                    interface_name: EntitySynthesizer::interface_name(&class_name),
                    class_name,
                });
            }
        }
        Self { entries }
    }

    /// All entries in package order.
    pub fn entries(&self) -> &[RecordEntry] { &self.entries }

    /// Finds a record, preferring the copy generated by `requesting_package`.
    pub fn lookup(&self, requesting_package: &str, origin_package: Option<&str>, record: &str) -> Option<&RecordEntry> {
        let mut matches = self.entries.iter().filter(|e| {
            e.record.eq_ignore_ascii_case(record)
                && origin_package.map_or(true, |origin| e.origin_package.eq_ignore_ascii_case(origin))
        });
        let first = matches.next()?;
        if first.is_local_to(requesting_package) {
            return Some(first);
        }
        Some(matches.find(|e| e.is_local_to(requesting_package)).unwrap_or(first))
    }
}

/// Records generated inside a package's class.
///
/// Candidates are the records the package declares followed by the row records
/// of its typed cursors, deduplicated by name and class name. A record declared
/// by another in-scope package belongs to that package. A record of another
/// schema, or of a package outside the run, is only duplicated here when the
/// configuration allows it.
pub fn owned_records<'r>(
    ctx: &GenerationContext,
    schema: &SchemaMetadata,
    package: &Package,
    records_in_scope: &'r [RecordType],
) -> Vec<&'r RecordType> {
    let declared = records_in_scope.iter().filter(|r| r.package_name.eq_ignore_ascii_case(&package.name));
    let referenced = package
        .procedures
        .iter()
        .flat_map(|p| p.top_level_arguments())
        .filter(|a| a.ty.is_strong_cursor())
        .filter_map(|a| a.ty.element.as_deref())
        .filter_map(|row| {
            let name = row.type_name.as_deref()?;
            records_in_scope.iter().find(|r| {
                r.name.eq_ignore_ascii_case(name)
                    && row.type_package.as_deref().map_or(true, |p| r.package_name.eq_ignore_ascii_case(p))
            })
        });

    let allow_duplicates = ctx.codegen().duplicate_records_outside_scope;
    let mut seen: Vec<(String, String)> = Vec::new();
    let mut owned = Vec::new();
    for record in declared.chain(referenced) {
        let key = (record.name.to_uppercase(), EntitySynthesizer::class_name(record));
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);

        let foreign_origin = !record.package_name.eq_ignore_ascii_case(&package.name);
        if foreign_origin && schema.is_package_in_scope(&record.package_name) {
            debug!(record = %record.name, origin = %record.package_name, package = %package.name, "record owned by its origin package");
            continue;
        }
        let foreign_owner = !package.owner.is_empty() && !record.owner.eq_ignore_ascii_case(&package.owner);
        if (foreign_origin || foreign_owner) && !allow_duplicates {
            debug!(record = %record.name, package = %package.name, "record outside scope not duplicated");
            continue;
        }
        owned.push(record);
    }
    owned
}

/// Assembles the compilation unit of a package.
pub struct PackageAssembler<'a> {
    ctx: &'a GenerationContext,
    schema: &'a SchemaMetadata,
    catalog: RecordCatalog,
}

impl<'a> PackageAssembler<'a> {
    /// Create an assembler for the packages of `schema`, cataloging their records.
    pub fn new(ctx: &'a GenerationContext, schema: &'a SchemaMetadata) -> Self {
        Self { ctx, schema, catalog: RecordCatalog::build(ctx, schema) }
    }

    /// Class name of a package.
    pub fn class_name(package: &Package) -> String { to_pascal(&package.name, false) }

    /// Records generated by each package.
    pub fn catalog(&self) -> &RecordCatalog { &self.catalog }

    /// Renders the compilation unit of `package`: its nested records followed by
    /// the methods of its procedures in declaration order.
    pub fn assemble(&self, package: &Package, records_in_scope: &[RecordType]) -> GeneratedUnit {
        let ctx = self.ctx;
        let class_name = Self::class_name(package);
        let namespace = ctx.package_namespace();
        info!(package = %package.name, class = %class_name, "assembling package");

        let entities = EntitySynthesizer::new(ctx);
        let mut blocks: Vec<String> = Vec::new();
        for record in owned_records(ctx, self.schema, package, records_in_scope) {
            blocks.extend(entities.synthesize(record).units().map(|u| u.text.clone()));
        }
        let procedures = ProcedureSynthesizer::new(ctx, package, &class_name, &self.catalog);
        for procedure in &package.procedures {
            blocks.extend(procedures.synthesize(procedure).into_iter().map(|u| u.text));
        }

        let mut w = SourceWriter::new();
        let extra = if ctx.codegen().generate.object_types && !self.schema.object_types.is_empty() {
            vec![ctx.object_type_namespace()]
        } else {
            Vec::new()
        };
        write_preamble(&mut w, &extra);
        w.open(format!("namespace {}", namespace));
        // package classes share the partial switch of their records
        let partial = if ctx.style(EntityKind::PackageRecord).partial { "partial " } else { "" };
        w.open(format!(
            "public sealed {}class {} : {}.{}",
            partial,
            class_name,
            ctx.namespace(),
            ctx.adapter_class()
        ));
        w.line(format!("private {}() {{ }}", class_name));
        w.line(format!("private static readonly {} _instance = new {}();", class_name, class_name));
        w.line(format!("public static {} Instance {{ get {{ return _instance; }} }}", class_name));
        if !blocks.is_empty() {
            w.blank();
            w.blocks(blocks.iter().map(String::as_str));
        }
        w.close_labeled(&class_name);
        w.close_labeled(&namespace);

        GeneratedUnit::new(
            ctx.file_name(&format!("Package.{}", class_name)),
            UnitKind::CompilationUnit,
            w.finish(),
        )
    }
}
