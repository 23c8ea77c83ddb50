//! Package assembly and record ownership

use config::Config;
use metadata::{
    Argument, ArgumentMode, Field, ObjectType, Package, Procedure, RecordType, SchemaMetadata, TypeDescriptor,
};
use odbind_codegen::generators::package::owned_records;
use odbind_codegen::{GenerationContext, PackageAssembler, UnitKind};

fn create_context(config: Config) -> GenerationContext {
    GenerationContext::builder().schema("HR").config(config).build().expect("context builds")
}

fn create_record(name: &str, package: &str) -> RecordType {
    RecordType {
        name: name.to_string(),
        owner: "HR".to_string(),
        package_name: package.to_string(),
        fields: vec![
            Field::new("EMPLOYEE_ID", TypeDescriptor::scalar("NUMBER").with_precision(6, 0), 1),
            Field::new("LAST_NAME", TypeDescriptor::scalar("VARCHAR2").with_length(25), 2),
        ],
        mapped_type: None,
    }
}

fn cursor_procedure(name: &str, package: &str, record: &str, record_package: &str) -> Procedure {
    Procedure::new(
        name,
        Some(package.to_string()),
        vec![Argument::new(
            "CUR",
            TypeDescriptor::cursor(Some(TypeDescriptor::record(record, "HR", record_package))),
            ArgumentMode::Out,
            1,
        )],
    )
}

fn create_schema() -> SchemaMetadata {
    SchemaMetadata {
        name: "HR".to_string(),
        packages: vec![
            Package {
                name: "EMP_PKG".to_string(),
                owner: "HR".to_string(),
                procedures: vec![cursor_procedure("GET_EMPLOYEES", "EMP_PKG", "EMP_REC", "EMP_PKG")],
            },
            Package {
                name: "REPORT_PKG".to_string(),
                owner: "HR".to_string(),
                procedures: vec![
                    cursor_procedure("LIST_EMPLOYEES", "REPORT_PKG", "EMP_REC", "EMP_PKG"),
                    cursor_procedure("LIST_LEGACY", "REPORT_PKG", "OLD_REC", "LEGACY_PKG"),
                ],
            },
        ],
        records: vec![create_record("EMP_REC", "EMP_PKG"), create_record("OLD_REC", "LEGACY_PKG")],
        ..Default::default()
    }
}

#[test]
fn test_package_unit_layout() {
    let ctx = create_context(Config::default());
    let schema = create_schema();
    let unit = PackageAssembler::new(&ctx, &schema).assemble(&schema.packages[0], &schema.records);

    assert_eq!(unit.name, "HrPackage.EmpPkg.cs");
    assert_eq!(unit.kind, UnitKind::CompilationUnit);
    assert!(unit.text.starts_with("//------"));
    assert!(!unit.text.contains("using Schema.Hr.Type.Object;"));
    assert!(unit.text.contains(
        "namespace Schema.Hr.Package {\n    \
         public sealed class EmpPkg : Schema.Hr.HrAdapter {\n        \
         private EmpPkg() { }\n        \
         private static readonly EmpPkg _instance = new EmpPkg();\n        \
         public static EmpPkg Instance { get { return _instance; } }\n\n        \
         public interface IEmpRec {\n"
    ));
    assert!(unit.text.ends_with("        } // GetEmployees\n    } // EmpPkg\n} // Schema.Hr.Package\n"));

    let interface = unit.text.find("public interface IEmpRec").expect("interface emitted");
    let class = unit.text.find("public class EmpRec").expect("class emitted");
    let materializer = unit.text.find("public IList<T_EmpRec> ReadResultIEmpRec").expect("materializer emitted");
    let method = unit.text.find("public void GetEmployees").expect("method emitted");
    assert!(interface < class && class < materializer && materializer < method);
}

#[test]
fn test_partial_package_class() {
    let mut config = Config::default();
    config.codegen.style.package_records.partial = true;
    let ctx = create_context(config);
    let schema = create_schema();
    let unit = PackageAssembler::new(&ctx, &schema).assemble(&schema.packages[0], &schema.records);

    assert!(unit.text.contains("public sealed partial class EmpPkg : Schema.Hr.HrAdapter {\n"));
    assert!(unit.text.contains("public partial class EmpRec : Schema.Hr.HrPackageRecord, IEmpRec {\n"));
}

#[test]
fn test_record_is_generated_by_its_origin_package_only() {
    let ctx = create_context(Config::default());
    let schema = create_schema();
    let assembler = PackageAssembler::new(&ctx, &schema);
    let emp = assembler.assemble(&schema.packages[0], &schema.records);
    let report = assembler.assemble(&schema.packages[1], &schema.records);

    assert_eq!(emp.text.matches("public class EmpRec").count(), 1);
    assert_eq!(report.text.matches("public class EmpRec").count(), 0);
    assert!(report.text.contains("where T_EmpRec : class, EmpPkg.IEmpRec, new()"));
    assert!(report.text.contains(
        "cur = EmpPkg.Instance.ReadResultIEmpRec<T_EmpRec>(__rdr, optionalMaxNumberRowsToReadFromAnyCursor);"
    ));
}

#[test]
fn test_record_outside_scope_is_not_duplicated_by_default() {
    let ctx = create_context(Config::default());
    let schema = create_schema();
    let owned = owned_records(&ctx, &schema, &schema.packages[1], &schema.records);
    assert!(owned.is_empty());

    let report = PackageAssembler::new(&ctx, &schema).assemble(&schema.packages[1], &schema.records);
    assert!(report.text.contains("// **PROC IGNORED** - inconsistent metadata: cursor row record OLD_REC"));
}

#[test]
fn test_duplication_override() {
    let mut config = Config::default();
    config.codegen.duplicate_records_outside_scope = true;
    let ctx = create_context(config);
    let schema = create_schema();

    let owned: Vec<&str> = owned_records(&ctx, &schema, &schema.packages[1], &schema.records)
        .into_iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(owned, vec!["OLD_REC"]);

    let report = PackageAssembler::new(&ctx, &schema).assemble(&schema.packages[1], &schema.records);
    assert!(report.text.contains("public class OldRec"));
    assert!(report.text.contains("cur = ReadResultIOldRec<T_OldRec>(__rdr, optionalMaxNumberRowsToReadFromAnyCursor);"));
    assert!(!report.text.contains("public class EmpRec"));
}

#[test]
fn test_candidates_are_deduplicated() {
    let ctx = create_context(Config::default());
    let schema = create_schema();
    let owned = owned_records(&ctx, &schema, &schema.packages[0], &schema.records);
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].name, "EMP_REC");
}

#[test]
fn test_catalog_prefers_local_copy() {
    let mut config = Config::default();
    config.codegen.duplicate_records_outside_scope = true;
    let ctx = create_context(config);
    let mut schema = create_schema();
    schema.packages[0].procedures.push(cursor_procedure("GET_LEGACY", "EMP_PKG", "OLD_REC", "LEGACY_PKG"));

    let assembler = PackageAssembler::new(&ctx, &schema);
    let entry = assembler.catalog().lookup("REPORT_PKG", Some("LEGACY_PKG"), "OLD_REC").expect("record cataloged");
    assert_eq!(entry.generating_package, "REPORT_PKG");
    assert_eq!(entry.qualified_interface("REPORT_PKG"), "IOldRec");
    assert_eq!(entry.qualified_interface("EMP_PKG"), "ReportPkg.IOldRec");
}

#[test]
fn test_object_type_namespace_is_imported() {
    let ctx = create_context(Config::default());
    let mut schema = create_schema();
    schema.object_types.push(ObjectType {
        name: "POINT_T".to_string(),
        owner: "HR".to_string(),
        attributes: vec![],
        instantiable: true,
        supertype: None,
    });
    let unit = PackageAssembler::new(&ctx, &schema).assemble(&schema.packages[0], &schema.records);
    assert!(unit.text.contains("using Odbind;\nusing Schema.Hr.Type.Object;\n"));
}
