//! Procedure wrapper synthesis

use metadata::{Argument, ArgumentMode, Package, Procedure, RecordType, SchemaMetadata, TypeDescriptor};
use odbind_codegen::{GenerationContext, ProcedureSynthesizer, RecordCatalog, UnitKind};
use pretty_assertions::assert_eq;

fn create_context() -> GenerationContext {
    GenerationContext::builder().schema("HR").build().expect("context builds")
}

fn create_package(procedures: Vec<Procedure>) -> Package {
    Package { name: "EMP_PKG".to_string(), owner: "HR".to_string(), procedures }
}

fn synthesize(procedure: Procedure) -> Vec<odbind_codegen::GeneratedUnit> {
    let ctx = create_context();
    let package = create_package(vec![]);
    let catalog = RecordCatalog::default();
    ProcedureSynthesizer::new(&ctx, &package, "EmpPkg", &catalog).synthesize(&procedure)
}

fn get_employee(cursor: TypeDescriptor) -> Procedure {
    Procedure::new(
        "GET_EMPLOYEE",
        Some("EMP_PKG".to_string()),
        vec![
            Argument::new("ID", TypeDescriptor::scalar("NUMBER"), ArgumentMode::In, 1),
            Argument::new("NAME", TypeDescriptor::scalar("VARCHAR2").with_length(100), ArgumentMode::Out, 2),
            Argument::new("CUR", cursor, ArgumentMode::Out, 3),
        ],
    )
}

fn position(text: &str, needle: &str) -> usize {
    text.find(needle).unwrap_or_else(|| panic!("missing `{}` in:\n{}", needle, text))
}

#[test]
fn test_plain_function() {
    let procedure = Procedure::new(
        "GET_COUNT",
        Some("EMP_PKG".to_string()),
        vec![
            Argument::returning(TypeDescriptor::scalar("NUMBER")),
            Argument::new("DEPT_ID", TypeDescriptor::scalar("NUMBER").with_precision(4, 0), ArgumentMode::In, 1)
                .defaulted(),
        ],
    );
    let units = synthesize(procedure);
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].kind, UnitKind::Method);
    assert_eq!(units[0].name, "GetCount");

    let expected = r#"public Decimal? GetCount(Int32? deptId = null, OracleConnection optionalPreexistingOpenConnection = null) {
    Decimal? __ret = (Decimal?)null;
    OracleConnection __conn = optionalPreexistingOpenConnection ?? GetConnection();
    try {
        using (OracleCommand __cmd = new OracleCommand("HR.EMP_PKG.GET_COUNT", __conn)) {
            __cmd.CommandType = CommandType.StoredProcedure;
            __cmd.BindByName = true;
            __cmd.Parameters.Add(new OracleParameter("!RETURN", OracleDbType.Decimal, null, ParameterDirection.ReturnValue));
            if (deptId != null) {
                __cmd.Parameters.Add(new OracleParameter("DEPT_ID", OracleDbType.Int32, deptId, ParameterDirection.Input));
            }
            OracleCommandTrace __cmdTrace = IsTracing(__cmd) ? new OracleCommandTrace(__cmd) : null;
            __cmd.ExecuteNonQuery();
            __ret = __cmd.Parameters["!RETURN"].Status == OracleParameterStatus.NullFetched ? (Decimal?)null : (Decimal?)OracleDecimal.SetPrecision(((OracleDecimal)__cmd.Parameters["!RETURN"].Value), 29);
            if (__cmdTrace != null) TraceCompletion(__cmdTrace);
        } // using OracleCommand
    } finally {
        if (optionalPreexistingOpenConnection == null) {
            __conn.Close();
            __conn.Dispose();
        }
    }
    return __ret;
} // GetCount
"#;
    assert_eq!(units[0].text, expected);
}

#[test]
fn test_get_employee_end_to_end() {
    let units = synthesize(get_employee(TypeDescriptor::cursor(None)));
    assert_eq!(units.len(), 2);

    let dynamic = &units[0].text;
    assert!(dynamic.starts_with(
        "public void GetEmployee<T_Cur>(Decimal? id, out String name, out IList<T_Cur> cur, \
         bool mapColumnToObjectPropertyByPosition = false, bool allowUnmappedColumnsToBeExcluded = false, \
         UInt32? optionalMaxNumberRowsToReadFromAnyCursor = null, \
         OracleConnection optionalPreexistingOpenConnection = null)\n        where T_Cur : class, new() {\n"
    ));
    assert!(!dynamic.contains("id = null"));

    let bind_id = position(dynamic, "new OracleParameter(\"ID\", OracleDbType.Decimal, id, ParameterDirection.Input)");
    let bind_name = position(
        dynamic,
        "new OracleParameter(\"NAME\", OracleDbType.Varchar2, 100, null, ParameterDirection.Output)",
    );
    let bind_cur = position(dynamic, "new OracleParameter(\"CUR\", OracleDbType.RefCursor, ParameterDirection.Output)");
    let execute = position(dynamic, "__cmd.ExecuteNonQuery();");
    let read_name = position(dynamic, "name = __cmd.Parameters[\"NAME\"].Status == OracleParameterStatus.NullFetched");
    let read_cur = position(
        dynamic,
        "cur = Hydrator.ReadResult<T_Cur>(__rdr, mapColumnToObjectPropertyByPosition, \
         allowUnmappedColumnsToBeExcluded, optionalMaxNumberRowsToReadFromAnyCursor);",
    );
    let trace = position(dynamic, "if (__cmdTrace != null) TraceCompletion(__cmdTrace, cur.Count);");
    assert!(bind_id < bind_name && bind_name < bind_cur && bind_cur < execute);
    assert!(execute < read_name && read_name < read_cur && read_cur < trace);

    let table = &units[1].text;
    assert!(table.starts_with(
        "public void GetEmployee(Decimal? id, out String name, out DataTable cur, \
         bool convertColumnNameToTitleCaseInCaption = false, \
         UInt32? optionalMaxNumberRowsToReadFromAnyCursor = null, \
         OracleConnection optionalPreexistingOpenConnection = null) {\n"
    ));
    assert!(table.contains(
        "cur = Hydrator.ReadResult(__rdr, convertColumnNameToTitleCaseInCaption, \
         optionalMaxNumberRowsToReadFromAnyCursor);"
    ));
    assert!(table.contains("if (__cmdTrace != null) TraceCompletion(__cmdTrace, (cur == null ? 0 : cur.Rows.Count));"));
}

#[test]
fn test_in_out_scalars() {
    let procedure = Procedure::new(
        "ADJUST_SALARY",
        Some("EMP_PKG".to_string()),
        vec![
            Argument::new("AMOUNT", TypeDescriptor::scalar("NUMBER"), ArgumentMode::InOut, 1),
            Argument::new("NOTE", TypeDescriptor::scalar("VARCHAR2").with_length(200), ArgumentMode::InOut, 2),
        ],
    );
    let units = synthesize(procedure);
    assert_eq!(units.len(), 1);

    let expected = r#"public void AdjustSalary(ref Decimal? amount, ref String note, OracleConnection optionalPreexistingOpenConnection = null) {
    OracleConnection __conn = optionalPreexistingOpenConnection ?? GetConnection();
    try {
        using (OracleCommand __cmd = new OracleCommand("HR.EMP_PKG.ADJUST_SALARY", __conn)) {
            __cmd.CommandType = CommandType.StoredProcedure;
            __cmd.BindByName = true;
            __cmd.Parameters.Add(new OracleParameter("AMOUNT", OracleDbType.Decimal, amount, ParameterDirection.InputOutput));
            __cmd.Parameters.Add(new OracleParameter("NOTE", OracleDbType.Varchar2, 200, note, ParameterDirection.InputOutput));
            OracleCommandTrace __cmdTrace = IsTracing(__cmd) ? new OracleCommandTrace(__cmd) : null;
            __cmd.ExecuteNonQuery();
            amount = __cmd.Parameters["AMOUNT"].Status == OracleParameterStatus.NullFetched ? (Decimal?)null : (Decimal?)OracleDecimal.SetPrecision(((OracleDecimal)__cmd.Parameters["AMOUNT"].Value), 29);
            note = __cmd.Parameters["NOTE"].Status == OracleParameterStatus.NullFetched ? (String)null : __cmd.Parameters["NOTE"].Value.ToString();
            if (__cmdTrace != null) TraceCompletion(__cmdTrace);
        } // using OracleCommand
    } finally {
        if (optionalPreexistingOpenConnection == null) {
            __conn.Close();
            __conn.Dispose();
        }
    }
} // AdjustSalary
"#;
    assert_eq!(units[0].text, expected);
}

#[test]
fn test_strong_cursor_has_one_overload() {
    let record = RecordType {
        name: "EMP_REC".to_string(),
        owner: "HR".to_string(),
        package_name: "EMP_PKG".to_string(),
        fields: vec![metadata::Field::new("EMPLOYEE_ID", TypeDescriptor::scalar("NUMBER").with_precision(6, 0), 1)],
        mapped_type: None,
    };
    let procedure = get_employee(TypeDescriptor::cursor(Some(TypeDescriptor::record("EMP_REC", "HR", "EMP_PKG"))));
    let schema = SchemaMetadata {
        name: "HR".to_string(),
        packages: vec![create_package(vec![procedure.clone()])],
        records: vec![record],
        ..Default::default()
    };
    let ctx = create_context();
    let catalog = RecordCatalog::build(&ctx, &schema);
    let units = ProcedureSynthesizer::new(&ctx, &schema.packages[0], "EmpPkg", &catalog).synthesize(&procedure);

    assert_eq!(units.len(), 1);
    let text = &units[0].text;
    assert!(text.contains("out IList<T_EmpRec> cur"));
    assert!(text.contains("        where T_EmpRec : class, IEmpRec, new() {\n"));
    assert!(text.contains("cur = ReadResultIEmpRec<T_EmpRec>(__rdr, optionalMaxNumberRowsToReadFromAnyCursor);"));
    assert!(!text.contains("mapColumnToObjectPropertyByPosition"));
}

#[test]
fn test_strong_cursor_without_generated_record_is_ignored() {
    let units =
        synthesize(get_employee(TypeDescriptor::cursor(Some(TypeDescriptor::record("EMP_REC", "HR", "EMP_PKG")))));
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].kind, UnitKind::IgnoredMethod);
    assert!(units[0].text.starts_with("// **PROC IGNORED** - inconsistent metadata: cursor row record EMP_REC"));
}

#[test]
fn test_input_cursor_leaves_one_weak_overload() {
    let procedure = Procedure::new(
        "REFILTER",
        Some("EMP_PKG".to_string()),
        vec![
            Argument::new("SRC", TypeDescriptor::cursor(None), ArgumentMode::In, 1),
            Argument::new("DST", TypeDescriptor::cursor(None), ArgumentMode::Out, 2),
        ],
    );
    let units = synthesize(procedure);
    assert_eq!(units.len(), 1);
    assert!(units[0].text.contains("OracleRefCursor src, out IList<T_Dst> dst"));
    assert!(units[0].text.contains("new OracleParameter(\"SRC\", OracleDbType.RefCursor, src, ParameterDirection.Input)"));
}

#[test]
fn test_unsupported_argument_comments_out_procedure() {
    let procedure = Procedure::new(
        "LOAD_FILE",
        Some("EMP_PKG".to_string()),
        vec![
            Argument::new("PATH", TypeDescriptor::scalar("VARCHAR2"), ArgumentMode::In, 1),
            Argument::new("CONTENT", TypeDescriptor::scalar("BFILE"), ArgumentMode::In, 2),
        ],
    );
    let units = synthesize(procedure);
    assert_eq!(units.len(), 1);
    assert!(units[0].is_ignored());
    assert_eq!(
        units[0].text,
        "// **PROC IGNORED** - unsupported type BFILE\n// public void LoadFile(String path, BFILE content);\n"
    );
}

#[test]
fn test_associative_array_binding() {
    let procedure = Procedure::new(
        "LOOKUP_NAMES",
        Some("EMP_PKG".to_string()),
        vec![
            Argument::new("IDS", TypeDescriptor::associative_array(TypeDescriptor::scalar("NUMBER")), ArgumentMode::In, 1),
            Argument::new(
                "NAMES",
                TypeDescriptor::associative_array(TypeDescriptor::scalar("VARCHAR2").with_length(50)),
                ArgumentMode::Out,
                2,
            ),
        ],
    );
    let units = synthesize(procedure);
    let text = &units[0].text;

    assert!(text.contains("public void LookupNames(IList<Decimal?> ids, out IList<String> names, "));
    assert!(text.contains("__pIds.Size = (ids == null ? 0 : ids.Count);"));
    assert!(text.contains(
        "__pIds.Value = (ids == null || ids.Count == 0 ? new Decimal?[]{} : new List<Decimal?>(ids).ToArray());"
    ));
    assert!(text.contains("__pNames.CollectionType = OracleCollectionType.PLSQLAssociativeArray;"));
    assert!(text.contains("__pNames.Size = 1000;"));
    assert!(text.contains("__pNames.ArrayBindSize = new int[1000];"));
    assert!(text.contains("__pNames.ArrayBindSize[__i] = 50;"));
    assert!(!text.contains("__pIds.ArrayBindSize"));
    assert!(text.contains(
        "foreach (OracleString __v in (__cmd.Parameters[\"NAMES\"].Value as OracleString[]) ?? new OracleString[0]) {"
    ));
    assert!(text.contains("names.Add(__v.IsNull ? (String)null : __v.ToString());"));
}

#[test]
fn test_names_are_escaped() {
    let procedure = Procedure::new(
        "EMP_PKG",
        Some("EMP_PKG".to_string()),
        vec![Argument::new("CLASS", TypeDescriptor::scalar("VARCHAR2"), ArgumentMode::In, 1)],
    );
    let units = synthesize(procedure);
    assert_eq!(units[0].name, "EmpPkg_");
    assert!(units[0].text.starts_with("public void EmpPkg_(String @class, "));
    assert!(units[0].text.contains("\"CLASS\", OracleDbType.Varchar2, 32767, @class, ParameterDirection.Input"));
}

#[test]
fn test_caller_connection_is_not_closed() {
    let units = synthesize(get_employee(TypeDescriptor::cursor(None)));
    for unit in &units {
        assert!(unit.text.contains("    } finally {\n        if (optionalPreexistingOpenConnection == null) {\n"));
    }
}
