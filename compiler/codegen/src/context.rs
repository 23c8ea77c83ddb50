//! Generation context shared by every synthesizer in a run.
//!
//! The context is built once from the configuration and the schema name and is
//! never mutated afterwards, so every unit of a run sees the same switches.

use config::{CodegenConfig, Config, DatabaseConfig, EntityStyle, SchemaConfig};
use metadata::EntityKind;
use naming::to_pascal;
use types::TypeTranslator;

use crate::{CodegenError, Result};

/// Schemas whose types are referenced without qualification.
const SYSTEM_SCHEMAS: &[&str] = &["SYS", "PUBLIC"];

/// Context containing everything needed to synthesize one schema's bindings
#[derive(Debug, Clone)]
pub struct GenerationContext {
    schema: String,
    class_prefix: String,
    namespace: String,
    schema_config: SchemaConfig,
    database: DatabaseConfig,
    codegen: CodegenConfig,
    translator: TypeTranslator,
}

impl GenerationContext {
    /// Create a new builder for GenerationContext
    pub fn builder() -> GenerationContextBuilder { GenerationContextBuilder::default() }

    /// Schema name as recorded in the dictionary (e.g. `HR`)
    pub fn schema(&self) -> &str { &self.schema }

    /// The type translator fixed for this run
    pub fn translator(&self) -> &TypeTranslator { &self.translator }

    /// Code generation settings
    pub fn codegen(&self) -> &CodegenConfig { &self.codegen }

    /// Connection settings for the base adapter
    pub fn database(&self) -> &DatabaseConfig { &self.database }

    /// Prefix of generated base class names (`Hr`, or `HrEmp` with a filter in naming)
    pub fn class_prefix(&self) -> &str { &self.class_prefix }

    /// Root namespace of the schema (`Schema.Hr`)
    pub fn namespace(&self) -> &str { &self.namespace }

    /// Namespace of package classes
    pub fn package_namespace(&self) -> String { format!("{}.Package", self.namespace) }

    /// Namespace of object type classes
    pub fn object_type_namespace(&self) -> String { format!("{}.Type.Object", self.namespace) }

    /// Namespace of table classes
    pub fn table_namespace(&self) -> String { format!("{}.Table", self.namespace) }

    /// Namespace of view classes
    pub fn view_namespace(&self) -> String { format!("{}.View", self.namespace) }

    /// Namespace holding the object types of another schema, carrying the filter
    /// segment when the filter is part of generated names
    pub fn foreign_object_type_namespace(&self, owner: &str) -> String {
        let mut namespace = format!("{}.{}", self.schema_config.base_namespace, to_pascal(owner, false));
        if let Some(filter) = self.naming_filter() {
            namespace.push('.');
            namespace.push_str(&filter);
        }
        namespace.push_str(".Type.Object");
        namespace
    }

    fn naming_filter(&self) -> Option<String> {
        if !self.schema_config.include_filter_in_naming {
            return None;
        }
        self.schema_config.filter.as_deref().filter(|f| !f.trim().is_empty()).map(|f| to_pascal(f, false))
    }

    /// True if types of `owner` need no qualification from entities of `entity_owner`
    pub fn is_local_owner(&self, owner: &str, entity_owner: &str) -> bool {
        owner.eq_ignore_ascii_case(entity_owner)
            || SYSTEM_SCHEMAS.iter().any(|s| s.eq_ignore_ascii_case(owner))
    }

    /// Name of the abstract adapter every package class derives from
    pub fn adapter_class(&self) -> String { format!("{}Adapter", self.class_prefix) }

    /// Root abstract entity class
    pub fn base_entity_class(&self) -> String { format!("{}Entity", self.class_prefix) }

    /// Abstract base class generated for an entity kind
    pub fn entity_base_class(&self, kind: EntityKind) -> String {
        let suffix = match kind {
            EntityKind::PackageRecord => "PackageRecord",
            EntityKind::ObjectType => "ObjectType",
            EntityKind::Table => "Table",
            EntityKind::View => "View",
        };
        format!("{}{}", self.class_prefix, suffix)
    }

    /// Style settings for an entity kind
    pub fn style(&self, kind: EntityKind) -> &EntityStyle {
        let styles = &self.codegen.style;
        match kind {
            EntityKind::PackageRecord => &styles.package_records,
            EntityKind::ObjectType => &styles.object_types,
            EntityKind::Table => &styles.tables,
            EntityKind::View => &styles.views,
        }
    }

    /// Ancestor configured for an entity kind: an explicit style ancestor, else the
    /// generated base class when base entities are generated.
    pub fn configured_ancestor(&self, kind: EntityKind) -> Option<String> {
        if let Some(ancestor) = &self.style(kind).ancestor {
            return Some(ancestor.clone());
        }
        self.codegen
            .generate
            .base_entities
            .then(|| format!("{}.{}", self.namespace, self.entity_base_class(kind)))
    }

    /// Local variable name, prefixed so it cannot clash with a parameter
    pub fn local(&self, name: &str) -> String { format!("{}{}", self.codegen.local_variable_prefix, name) }

    /// File name of a compilation unit (`HrPackage.EmpPkg.cs`)
    pub fn file_name(&self, suffix: &str) -> String { format!("{}{}.cs", self.class_prefix, suffix) }
}

#[derive(Default)]
/// Builder for GenerationContext
pub struct GenerationContextBuilder {
    /// Schema name, overriding the configured one
    schema: Option<String>,
    /// Source configuration
    config: Option<Config>,
    /// Pre-built translator
    translator: Option<TypeTranslator>,
}

impl GenerationContextBuilder {
    /// Set the schema name
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Set the configuration
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a translator built earlier from the same configuration
    pub fn translator(mut self, translator: TypeTranslator) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Build the GenerationContext
    pub fn build(self) -> Result<GenerationContext> {
        let config = self.config.unwrap_or_default();
        let schema = self
            .schema
            .or_else(|| config.schema.name.clone())
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| CodegenError::Message("schema name is required".to_string()))?;
        let translator = match self.translator {
            Some(translator) => translator,
            None => config.translator()?,
        };

        let mut class_prefix = to_pascal(&schema, false);
        let mut namespace = format!("{}.{}", config.schema.base_namespace, class_prefix);
        if let Some(filter) = config.schema.filter.as_deref().filter(|f| !f.trim().is_empty()) {
            let filter = to_pascal(filter, false);
            if config.schema.include_filter_in_naming {
                class_prefix.push_str(&filter);
            }
            namespace = format!("{}.{}", namespace, filter);
        }

        Ok(GenerationContext {
            schema,
            class_prefix,
            namespace,
            schema_config: config.schema,
            database: config.database,
            codegen: config.codegen,
            translator,
        })
    }
}
