//! Indentation-aware text assembly for generated sources.

/// One level of indentation.
pub const INDENT: &str = "    ";

/// Banner at the top of every generated file. It carries no timestamp so that
/// regenerating an unchanged schema produces identical files.
pub const FILE_HEADER: &str = "\
//------------------------------------------------------------------------------
// <auto-generated>
//     This code was generated by odbind.
//     Direct edits will be lost if the code is regenerated.
// </auto-generated>
//------------------------------------------------------------------------------
";

/// Namespaces imported by every generated file.
pub const STANDARD_USINGS: &[&str] = &[
    "System",
    "System.Collections.Generic",
    "System.Data",
    "System.Runtime.Serialization",
    "System.Xml.Serialization",
    "Oracle.ManagedDataAccess.Client",
    "Oracle.ManagedDataAccess.Types",
];

/// Namespace of the runtime helpers (row hydration, command tracing) the bindings call into.
pub const HELPER_NAMESPACE: &str = "Odbind";

/// Accumulates lines of source at a current indentation level.
#[derive(Debug, Default)]
pub struct SourceWriter {
    buf: String,
    level: usize,
}

impl SourceWriter {
    /// An empty writer at indentation level 0.
    pub fn new() -> Self { Self::default() }

    /// Writes one line at the current indentation; empty lines carry no indentation.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.level {
                self.buf.push_str(INDENT);
            }
            self.buf.push_str(text);
        }
        self.buf.push('\n');
    }

    /// Writes an empty line.
    pub fn blank(&mut self) { self.buf.push('\n'); }

    /// Writes `text {` and indents.
    pub fn open(&mut self, text: impl AsRef<str>) {
        self.line(format!("{} {{", text.as_ref()));
        self.level += 1;
    }

    /// Dedents and writes `}`.
    pub fn close(&mut self) {
        self.level = self.level.saturating_sub(1);
        self.line("}");
    }

    /// Dedents and writes `} // label`.
    pub fn close_labeled(&mut self, label: impl AsRef<str>) {
        self.level = self.level.saturating_sub(1);
        self.line(format!("}} // {}", label.as_ref()));
    }

    /// Increases indentation.
    pub fn indent(&mut self) { self.level += 1; }

    /// Decreases indentation.
    pub fn dedent(&mut self) { self.level = self.level.saturating_sub(1); }

    /// Appends multi-line text, indenting every non-empty line by the current level.
    pub fn block(&mut self, text: &str) {
        for line in text.lines() {
            self.line(line);
        }
    }

    /// Writes a sequence of blocks separated by blank lines.
    pub fn blocks<'a>(&mut self, texts: impl IntoIterator<Item = &'a str>) {
        for (i, text) in texts.into_iter().enumerate() {
            if i > 0 {
                self.blank();
            }
            self.block(text);
        }
    }

    /// Returns the accumulated text.
    pub fn finish(self) -> String { self.buf }
}

/// Writes the file banner followed by `using` directives for the standard and `extra` namespaces.
pub fn write_preamble(writer: &mut SourceWriter, extra: &[String]) {
    writer.block(FILE_HEADER);
    writer.blank();
    for namespace in STANDARD_USINGS {
        writer.line(format!("using {};", namespace));
    }
    writer.line(format!("using {};", HELPER_NAMESPACE));
    for namespace in extra {
        writer.line(format!("using {};", namespace));
    }
    writer.blank();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_blocks() {
        let mut w = SourceWriter::new();
        w.open("namespace A");
        w.open("public class B");
        w.line("int x;");
        w.blank();
        w.close_labeled("B");
        w.close();
        assert_eq!(w.finish(), "namespace A {\n    public class B {\n        int x;\n\n    } // B\n}\n");
    }

    #[test]
    fn test_block_reindents() {
        let mut w = SourceWriter::new();
        w.indent();
        w.blocks(["a {\n    b;\n}", "c;"]);
        assert_eq!(w.finish(), "    a {\n        b;\n    }\n\n    c;\n");
    }

    #[test]
    fn test_preamble() {
        let mut w = SourceWriter::new();
        write_preamble(&mut w, &["Schema.Hr.Type.Object".to_string()]);
        let text = w.finish();
        assert!(text.starts_with("//----"));
        assert!(text.contains("using Oracle.ManagedDataAccess.Client;\n"));
        assert!(text.contains("using Odbind;\nusing Schema.Hr.Type.Object;\n"));
        assert!(!text.contains("GMT"));
    }
}
