//! Compilation units grouping the classes of object types, tables and views.

use metadata::{Entity, SchemaMetadata};
use tracing::info;

use crate::context::GenerationContext;
use crate::generators::entity::EntitySynthesizer;
use crate::source::{write_preamble, SourceWriter};
use crate::{GeneratedUnit, UnitKind};

fn entity_unit(
    ctx: &GenerationContext,
    suffix: &str,
    namespace: &str,
    entities: &[&dyn Entity],
    extra_usings: &[String],
) -> Option<GeneratedUnit> {
    if entities.is_empty() {
        return None;
    }
    info!(unit = suffix, count = entities.len(), "assembling entities");

    let synthesizer = EntitySynthesizer::new(ctx);
    let mut blocks: Vec<String> = Vec::new();
    for entity in entities {
        blocks.extend(synthesizer.synthesize(*entity).units().map(|u| u.text.clone()));
    }

    let mut w = SourceWriter::new();
    write_preamble(&mut w, extra_usings);
    w.open(format!("namespace {}", namespace));
    w.blocks(blocks.iter().map(String::as_str));
    w.close_labeled(namespace);
    Some(GeneratedUnit::new(ctx.file_name(suffix), UnitKind::CompilationUnit, w.finish()))
}

/// Usings that let table and view columns refer to object types unqualified.
fn object_type_usings(ctx: &GenerationContext, schema: &SchemaMetadata) -> Vec<String> {
    if ctx.codegen().generate.object_types && !schema.object_types.is_empty() {
        vec![ctx.object_type_namespace()]
    } else {
        Vec::new()
    }
}

/// Classes of the schema's object types, or `None` if there are none.
pub fn object_types_unit(ctx: &GenerationContext, schema: &SchemaMetadata) -> Option<GeneratedUnit> {
    let entities: Vec<&dyn Entity> = schema.object_types.iter().map(|o| o as &dyn Entity).collect();
    entity_unit(ctx, "ObjectType", &ctx.object_type_namespace(), &entities, &[])
}

/// Classes of the schema's tables, or `None` if there are none.
pub fn tables_unit(ctx: &GenerationContext, schema: &SchemaMetadata) -> Option<GeneratedUnit> {
    let entities: Vec<&dyn Entity> = schema.tables.iter().map(|t| t as &dyn Entity).collect();
    entity_unit(ctx, "Table", &ctx.table_namespace(), &entities, &object_type_usings(ctx, schema))
}

/// Classes of the schema's views, or `None` if there are none.
pub fn views_unit(ctx: &GenerationContext, schema: &SchemaMetadata) -> Option<GeneratedUnit> {
    let entities: Vec<&dyn Entity> = schema.views.iter().map(|v| v as &dyn Entity).collect();
    entity_unit(ctx, "View", &ctx.view_namespace(), &entities, &object_type_usings(ctx, schema))
}
