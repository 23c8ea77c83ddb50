//! Entity classes, record interfaces and row materializers.

use metadata::{Entity, EntityKind, Field};
use naming::to_pascal;
use tracing::{debug, warn};
use types::family::LobKind;
use types::{Nullability, ScalarKind, TargetType, Translation, TranslationError, TypeFamily, MAX_DECIMAL_PRECISION};

use crate::context::GenerationContext;
use crate::generators::MAX_ROWS_PARAM;
use crate::source::SourceWriter;
use crate::{GeneratedUnit, UnitKind};

/// Target types with a `Convert.ToX` conversion.
const CONVERTIBLE: &[&str] = &[
    "Boolean", "Byte", "Char", "DateTime", "Decimal", "Double", "Int16", "Int32", "Int64", "Single", "String",
];

/// Output of synthesizing one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityUnits {
    /// Get/set contract, only for package records
    pub interface: Option<GeneratedUnit>,
    /// The class, or an ignored-entity comment
    pub class: GeneratedUnit,
    /// Row materializer, only for package records
    pub materializer: Option<GeneratedUnit>,
}

impl EntityUnits {
    /// Units in emission order: interface, class, materializer.
    pub fn units(&self) -> impl Iterator<Item = &GeneratedUnit> {
        self.interface.iter().chain(std::iter::once(&self.class)).chain(self.materializer.iter())
    }

    /// True if the entity was skipped.
    pub fn is_ignored(&self) -> bool { self.class.is_ignored() }
}

/// One generated property.
struct Member<'e> {
    field: &'e Field,
    property: String,
    ty: String,
    translation: Translation,
}

/// A field that could not be translated.
struct Skipped<'e> {
    field: &'e Field,
    error: TranslationError,
}

enum Slot<'e> {
    Member(Member<'e>),
    Skipped(Skipped<'e>),
}

/// Synthesizes classes for records, object types, tables and views.
pub struct EntitySynthesizer<'a> {
    ctx: &'a GenerationContext,
}

impl<'a> EntitySynthesizer<'a> {
    /// Create a synthesizer bound to a generation context.
    pub fn new(ctx: &'a GenerationContext) -> Self { Self { ctx } }

    /// Class name of an entity: its mapped type, or its PascalCase name.
    pub fn class_name(entity: &dyn Entity) -> String {
        entity.mapped_type().map(str::to_string).unwrap_or_else(|| to_pascal(entity.entity_name(), false))
    }

    /// Interface implemented by a record class.
    pub fn interface_name(class_name: &str) -> String { format!("I{}", class_name) }

    /// Materializer reading rows into instances constrained by a record interface.
    pub fn materializer_name(class_name: &str) -> String { format!("ReadResultI{}", class_name) }

    /// The first attribute with no supported mapping, if any.
    pub fn unsupported_attribute(&self, entity: &dyn Entity) -> Option<(String, TranslationError)> {
        entity.attributes().iter().find_map(|field| {
            self.translate(field).err().map(|error| (field.name.clone(), error))
        })
    }

    /// Synthesizes the interface, class and materializer of an entity.
    ///
    /// Package records with an untranslatable field are skipped whole and become
    /// a single ignored-entity comment; other entities only skip that column.
    pub fn synthesize(&self, entity: &dyn Entity) -> EntityUnits {
        let class_name = Self::class_name(entity);
        let slots = self.slots(entity, &class_name);
        let is_record = entity.kind() == EntityKind::PackageRecord;

        if is_record {
            if let Some(skipped) = slots.iter().find_map(|s| match s {
                Slot::Skipped(skipped) => Some(skipped),
                Slot::Member(_) => None,
            }) {
                warn!(
                    record = entity.entity_name(),
                    field = %skipped.field.name,
                    reason = %skipped.error,
                    "record ignored"
                );
                let text = format!(
                    "// **RECORD IGNORED** - {}.{}: {}\n",
                    entity.entity_name(),
                    skipped.field.name,
                    skipped.error
                );
                return EntityUnits {
                    interface: None,
                    class: GeneratedUnit::new(class_name, UnitKind::IgnoredEntity, text),
                    materializer: None,
                };
            }
        }

        debug!(entity = entity.entity_name(), class = %class_name, "synthesizing entity");
        let members: Vec<&Member> = slots
            .iter()
            .filter_map(|s| match s {
                Slot::Member(member) => Some(member),
                Slot::Skipped(_) => None,
            })
            .collect();

        let interface_name = Self::interface_name(&class_name);
        let interface = is_record.then(|| {
            GeneratedUnit::new(&interface_name, UnitKind::Interface, self.render_interface(&interface_name, &members))
        });
        let class = GeneratedUnit::new(
            &class_name,
            UnitKind::Class,
            self.render_class(entity, &class_name, &slots, is_record.then_some(interface_name.as_str())),
        );
        let materializer = is_record.then(|| {
            GeneratedUnit::new(
                Self::materializer_name(&class_name),
                UnitKind::Materializer,
                self.render_materializer(&class_name, &members),
            )
        });

        EntityUnits { interface, class, materializer }
    }

    fn translate(&self, field: &Field) -> Result<Translation, TranslationError> {
        let translation = self.ctx.translator().translate_field(field)?;
        match translation.family {
            TypeFamily::Cursor | TypeFamily::AssociativeArray => {
                Err(TranslationError::UnsupportedType(format!("{} field", field.ty.data_type.trim())))
            }
            _ => Ok(translation),
        }
    }

    fn slots<'e>(&self, entity: &'e dyn Entity, class_name: &str) -> Vec<Slot<'e>> {
        let mut fields: Vec<&Field> = entity.attributes().iter().collect();
        fields.sort_by_key(|f| f.position);

        fields
            .into_iter()
            .map(|field| match self.translate(field) {
                Ok(translation) => {
                    let mut property = to_pascal(&field.name, false);
                    if property == class_name {
                        property.push('_');
                    }
                    let ty = self.member_type(entity, field, &translation);
                    Slot::Member(Member { field, property, ty, translation })
                }
                Err(error) => Slot::Skipped(Skipped { field, error }),
            })
            .collect()
    }

    /// Renders a member's type, qualifying types declared in a container class or another schema.
    fn member_type(&self, entity: &dyn Entity, field: &Field, translation: &Translation) -> String {
        let rendered = translation.target.render(Nullability::Nullable);
        match (&field.container, &translation.target) {
            (Some(container), _) => format!("{}.{}", to_pascal(container, false), rendered),
            (None, TargetType::Entity { owner: Some(owner), .. })
                if !self.ctx.is_local_owner(owner, entity.owner()) =>
            {
                format!("{}.{}", self.ctx.foreign_object_type_namespace(owner), rendered)
            }
            _ => rendered,
        }
    }

    /// The single ancestor: a database-declared supertype wins over the configured one.
    fn ancestor(&self, entity: &dyn Entity) -> Option<String> {
        match entity.db_ancestor() {
            Some(supertype) => Some(to_pascal(supertype, false)),
            None => self.ctx.configured_ancestor(entity.kind()),
        }
    }

    fn render_interface(&self, interface_name: &str, members: &[&Member]) -> String {
        let mut w = SourceWriter::new();
        w.open(format!("public interface {}", interface_name));
        for member in members {
            w.line(format!("{} {} {{ get; set; }}", member.ty, member.property));
        }
        w.close_labeled(interface_name);
        w.finish()
    }

    fn render_class(&self, entity: &dyn Entity, class_name: &str, slots: &[Slot], interface: Option<&str>) -> String {
        let style = self.ctx.style(entity.kind());
        let mut w = SourceWriter::new();

        if style.data_contract {
            match &self.ctx.codegen().data_contract_namespace {
                Some(namespace) => w.line(format!("[DataContract(Namespace=\"{}\")]", namespace)),
                None => w.line("[DataContract]"),
            }
        }
        if style.serializable {
            w.line("[Serializable()]");
        }

        let ancestors: Vec<String> =
            self.ancestor(entity).into_iter().chain(interface.map(str::to_string)).collect();
        let mut header = format!(
            "public {}{}class {}",
            if entity.instantiable() { "" } else { "abstract " },
            if style.partial { "partial " } else { "" },
            class_name
        );
        if !ancestors.is_empty() {
            header.push_str(" : ");
            header.push_str(&ancestors.join(", "));
        }

        let ignored_label = match entity.kind() {
            EntityKind::ObjectType => "ATTRIBUTE",
            _ => "COLUMN",
        };

        w.open(header);
        for slot in slots {
            match slot {
                Slot::Skipped(skipped) => {
                    warn!(
                        entity = entity.entity_name(),
                        field = %skipped.field.name,
                        reason = %skipped.error,
                        "field ignored"
                    );
                    w.line(format!(
                        "// **{} IGNORED** - {}: {}",
                        ignored_label, skipped.field.name, skipped.error
                    ));
                }
                Slot::Member(member) => {
                    if style.data_contract {
                        w.line(format!(
                            "[DataMember(Order={}, IsRequired={})]",
                            member.field.position, !member.field.nullable
                        ));
                    }
                    if style.xml_element {
                        w.line(format!("[XmlElement(Order={}, IsNullable=true)]", member.field.position));
                    }
                    if self.ctx.codegen().auto_properties {
                        w.line(format!("public virtual {} {} {{ get; set; }}", member.ty, member.property));
                    } else {
                        let backing = naming::escape_keyword(&naming::lower_first(&member.property));
                        w.line(format!("private {} {};", member.ty, backing));
                        w.line(format!(
                            "public virtual {} {} {{ get {{ return this.{}; }} set {{ this.{} = value; }} }}",
                            member.ty, member.property, backing, backing
                        ));
                    }
                }
            }
        }
        w.close_labeled(class_name);
        w.finish()
    }

    fn render_materializer(&self, class_name: &str, members: &[&Member]) -> String {
        let type_param = format!("T_{}", class_name);
        let ret = self.ctx.local("ret");
        let obj = self.ctx.local("obj");
        let name = Self::materializer_name(class_name);

        let mut w = SourceWriter::new();
        w.line(format!(
            "public IList<{tp}> {name}<{tp}>(OracleDataReader rdr, UInt32? {max} = null)",
            tp = type_param,
            name = name,
            max = MAX_ROWS_PARAM
        ));
        w.indent();
        w.indent();
        w.open(format!("where {} : class, {}, new()", type_param, Self::interface_name(class_name)));
        w.dedent();
        w.dedent();
        w.line(format!("IList<{tp}> {ret} = new List<{tp}>();", tp = type_param, ret = ret));
        w.open("if (rdr != null && rdr.HasRows)");
        w.open("while (rdr.Read())");
        w.line(format!("{tp} {obj} = new {tp}();", tp = type_param, obj = obj));
        for member in members {
            let pos = member.field.position.saturating_sub(1);
            w.line(format!(
                "if (!rdr.IsDBNull({pos})) {obj}.{prop} = {expr};",
                pos = pos,
                obj = obj,
                prop = member.property,
                expr = read_column(member, pos)
            ));
        }
        w.line(format!("{}.Add({});", ret, obj));
        w.line(format!("if ({max} != null && {ret}.Count >= {max}) break;", max = MAX_ROWS_PARAM, ret = ret));
        w.close();
        w.close();
        w.line(format!("return {};", ret));
        w.close_labeled(&name);
        w.finish()
    }
}

/// Expression reading column `pos` from `rdr` into a member.
fn read_column(member: &Member, pos: u32) -> String {
    let t = &member.translation;
    match &t.target {
        TargetType::Scalar { name, kind: ScalarKind::Provider } => format!("({})rdr.GetOracleValue({})", name, pos),
        _ if t.is_decimal() => format!(
            "(Decimal?)OracleDecimal.SetPrecision(rdr.GetOracleDecimal({}), {})",
            pos,
            t.precision.unwrap_or(MAX_DECIMAL_PRECISION)
        ),
        _ if t.family == TypeFamily::LargeObject(LobKind::Blob) => format!("rdr.GetOracleBlob({}).Value", pos),
        _ if t.is_large_object() => format!("rdr.GetOracleClob({}).Value", pos),
        TargetType::Scalar { name, .. } if CONVERTIBLE.contains(&name.as_str()) => {
            format!("Convert.To{}(rdr.GetValue({}))", name, pos)
        }
        _ => format!("({})rdr.GetValue({})", member.ty, pos),
    }
}
