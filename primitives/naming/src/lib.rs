#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Identifier case conversion.
//!
//! Database identifiers are underscore delimited and usually upper case
//! (`EMPLOYEE_ID`); generated identifiers are PascalCase or camelCase. Captions
//! shown to humans use the label form (`Employee Id`).

/// Word delimiter used by database identifiers.
pub const DELIMITER: char = '_';

/// Token injected for a leading or trailing delimiter when edges are not preserved.
pub const EDGE_PLACEHOLDER: &str = "Underscorechar";

/// Inserts a delimiter before every uppercase character except the first.
///
/// Letter case is unchanged, and consecutive capitals each start a new word.
///
/// # Examples
/// ```
/// use naming::delimit_words;
/// assert_eq!(delimit_words("fooBarBAZ"), "foo_Bar_B_A_Z");
/// assert_eq!(delimit_words("EmployeeId"), "Employee_Id");
/// ```
pub fn delimit_words(input: &str) -> String {
    let mut chars = input.trim().chars();
    let mut result = String::with_capacity(input.len() * 2);

    if let Some(first) = chars.next() {
        result.push(first);
    }
    for c in chars {
        if c.is_uppercase() {
            result.push(DELIMITER);
        }
        result.push(c);
    }

    result
}

/// Converts a delimited identifier to PascalCase.
///
/// Any run of characters outside `[0-9A-Za-z]` acts as a delimiter. An identifier
/// without lowercase letters is treated as case-insensitive and every word is
/// title-cased; otherwise each word keeps its inner case and only its first letter
/// is raised, so already converted names pass through unchanged. A result without
/// lowercase letters (`A_B`) is lowered after its first character (`Ab`), keeping
/// the conversion idempotent.
///
/// A leading or trailing `_` is kept literally when `preserve_edges` is set, and is
/// otherwise replaced with [`EDGE_PLACEHOLDER`] so that `_foo` and `foo` never
/// produce the same identifier.
///
/// # Examples
/// ```
/// use naming::to_pascal;
/// assert_eq!(to_pascal("EMPLOYEE_ID", false), "EmployeeId");
/// assert_eq!(to_pascal("_foo_", false), "UnderscorecharFooUnderscorechar");
/// assert_eq!(to_pascal("_foo_", true), "_Foo_");
/// ```
pub fn to_pascal(id: &str, preserve_edges: bool) -> String {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let keep_inner_case = trimmed.chars().any(|c| c.is_ascii_lowercase());
    let mut body = String::with_capacity(trimmed.len() + 2 * EDGE_PLACEHOLDER.len());
    for word in trimmed.split(|c: char| !c.is_ascii_alphanumeric()).filter(|w| !w.is_empty()) {
        if keep_inner_case {
            body.push_str(&upper_first(word));
        } else {
            body.push_str(&capitalize(word));
        }
    }
    // Single-letter words join into an all-caps run that would read as a
    // case-insensitive identifier on the next pass.
    if !body.chars().any(|c| c.is_ascii_lowercase()) {
        body = capitalize(&body);
    }

    let edge = if preserve_edges { "_" } else { EDGE_PLACEHOLDER };
    let mut result = String::with_capacity(body.len() + 2 * edge.len());
    if trimmed.starts_with(DELIMITER) {
        result.push_str(edge);
    }
    result.push_str(&body);
    if trimmed.ends_with(DELIMITER) {
        result.push_str(edge);
    }
    result
}

/// Converts a delimited identifier to camelCase: [`to_pascal`] with the first character lowered.
pub fn to_camel(id: &str, preserve_edges: bool) -> String { lower_first(&to_pascal(id, preserve_edges)) }

/// Converts a delimited identifier to a human-readable caption (`FIRST_NAME` becomes `First Name`).
pub fn to_label(id: &str) -> String {
    id.trim()
        .to_lowercase()
        .replace(DELIMITER, " ")
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercases the first character and lowercases the rest.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Uppercases the first character only.
pub fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercases the first character only.
pub fn lower_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Reserved words of the generated language.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked", "class",
    "const", "continue", "decimal", "default", "delegate", "do", "double", "else", "enum", "event",
    "explicit", "extern", "false", "finally", "fixed", "float", "for", "foreach", "goto", "if",
    "implicit", "in", "int", "interface", "internal", "is", "lock", "long", "namespace", "new",
    "null", "object", "operator", "out", "override", "params", "private", "protected", "public",
    "readonly", "ref", "return", "sbyte", "sealed", "short", "sizeof", "stackalloc", "static",
    "string", "struct", "switch", "this", "throw", "true", "try", "typeof", "uint", "ulong",
    "unchecked", "unsafe", "ushort", "using", "virtual", "void", "volatile", "while",
];

/// True if `ident` is a reserved word of the generated language.
pub fn is_keyword(ident: &str) -> bool { KEYWORDS.contains(&ident) }

/// Prefixes reserved words with `@` so they can be used as identifiers.
pub fn escape_keyword(ident: &str) -> String {
    if is_keyword(ident) {
        format!("@{}", ident)
    } else {
        ident.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimit_words() {
        assert_eq!(delimit_words("fooBarBAZ"), "foo_Bar_B_A_Z");
        assert_eq!(delimit_words("FooBar"), "Foo_Bar");
        assert_eq!(delimit_words("  lower  "), "lower");
        assert_eq!(delimit_words("X"), "X");
        assert_eq!(delimit_words(""), "");
    }

    #[test]
    fn test_to_pascal_upper_case_input() {
        assert_eq!(to_pascal("EMPLOYEE_ID", false), "EmployeeId");
        assert_eq!(to_pascal("GET_EMPLOYEE", false), "GetEmployee");
        assert_eq!(to_pascal("HR", false), "Hr");
        assert_eq!(to_pascal("P$NAME#2", false), "PName2");
    }

    #[test]
    fn test_to_pascal_mixed_case_input() {
        assert_eq!(to_pascal("employee_id", false), "EmployeeId");
        assert_eq!(to_pascal("fooBar", false), "FooBar");
        assert_eq!(to_pascal("EmployeeId", false), "EmployeeId");
    }

    #[test]
    fn test_to_pascal_single_letter_words() {
        assert_eq!(to_pascal("A_B", false), "Ab");
        assert_eq!(to_pascal("a_b", false), "Ab");
        assert_eq!(to_pascal("X", false), "X");
        assert_eq!(to_pascal("X_1", false), "X1");
        assert_eq!(to_pascal("A_B_CD", false), "ABCd");
        assert_eq!(to_pascal("_A_B", false), "UnderscorecharAb");
        for id in ["A_B", "a_b", "A_B_CD", "_A_B"] {
            let once = to_pascal(id, false);
            assert_eq!(to_pascal(&once, false), once);
        }
    }

    #[test]
    fn test_to_pascal_edges() {
        assert_eq!(to_pascal("_foo_", false), "UnderscorecharFooUnderscorechar");
        assert_eq!(to_pascal("_foo_", true), "_Foo_");
        assert_eq!(to_pascal("_FOO", false), "UnderscorecharFoo");
        assert_eq!(to_pascal("FOO_", true), "Foo_");
        assert_ne!(to_pascal("_foo", false), to_pascal("foo", false));
    }

    #[test]
    fn test_to_pascal_empty() {
        assert_eq!(to_pascal("", false), "");
        assert_eq!(to_pascal("   ", true), "");
    }

    #[test]
    fn test_to_camel() {
        assert_eq!(to_camel("EMPLOYEE_ID", false), "employeeId");
        assert_eq!(to_camel("_foo_", false), "underscorecharFooUnderscorechar");
        assert_eq!(to_camel("", false), "");
        assert_eq!(to_camel("X", false), "x");
    }

    #[test]
    fn test_to_label() {
        assert_eq!(to_label("FIRST_NAME"), "First Name");
        assert_eq!(to_label("employee_id"), "Employee Id");
        assert_eq!(to_label("SALARY"), "Salary");
    }

    #[test]
    fn test_case_helpers() {
        assert_eq!(capitalize("hELLO"), "Hello");
        assert_eq!(upper_first("hELLO"), "HELLO");
        assert_eq!(lower_first("Hello"), "hello");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_escape_keyword() {
        assert_eq!(escape_keyword("class"), "@class");
        assert_eq!(escape_keyword("params"), "@params");
        assert_eq!(escape_keyword("employeeId"), "employeeId");
        assert!(is_keyword("out"));
        assert!(!is_keyword("Out"));
    }
}
