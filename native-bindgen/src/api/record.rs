use serde::{Deserialize, Serialize};

/// Source location information for tracking where a declaration originated
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SourceLocation {
    /// The compilation unit name (usually a file path)
    pub file: String,
    /// The line number where the item starts (1-based)
    pub line: usize,
    /// The column number where the item starts (1-based)
    pub column: usize,
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

/// One `@NativeMethods` interface as found by the scanner.
///
/// Types are kept as raw text here; they are resolved when the declaration is
/// turned into a [`BindingInterface`](crate::BindingInterface).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawDeclaration {
    /// Package of the compilation unit, empty for the default package
    pub package: String,
    /// Simple name of the type enclosing the interface
    pub holder: String,
    /// Simple name of the annotated interface
    pub name: String,
    /// Dotted name: package, enclosing types and the interface itself
    pub qualified_name: String,
    /// The string value passed to the annotation, empty when omitted
    pub tag: String,
    /// Single-type imports of the compilation unit, fully qualified
    #[serde(default)]
    pub imports: Vec<String>,
    /// Methods in declaration order
    pub methods: Vec<RawMethod>,
    pub source_location: SourceLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawMethod {
    pub name: String,
    /// Return type as written, e.g. `boolean` or `java.util.List<String>`
    pub return_type: String,
    pub params: Vec<RawParam>,
    pub source_location: SourceLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawParam {
    pub name: String,
    /// Parameter type as written, modifiers and annotations removed
    pub type_text: String,
    pub source_location: SourceLocation,
}

/// An `<Accessor>.get().<method>(...)` expression found in the input
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CallSite {
    pub accessor: String,
    pub method: String,
    pub source_location: SourceLocation,
}

impl RawDeclaration {
    /// Serialize this declaration to a JSON-lines compatible string.
    pub fn to_jsonl_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl std::fmt::Display for CallSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.get().{}() at {}",
            self.accessor, self.method, self.source_location
        )
    }
}
