//! JSON-lines encoding of scanned declarations.
//!
//! Lets a caller keep scan results around (e.g. in a build cache) and feed
//! them back through [`Generator::generate_declarations`](crate::Generator::generate_declarations).

use crate::{api::record::RawDeclaration, Error, Result};

/// Encode declarations, one JSON object per line
pub fn to_jsonl<'a>(declarations: impl IntoIterator<Item = &'a RawDeclaration>) -> Result<String> {
    let mut out = String::new();
    for (index, declaration) in declarations.into_iter().enumerate() {
        let line = declaration.to_jsonl_string().map_err(|e| Error::Jsonl {
            line: index + 1,
            message: e.to_string(),
        })?;
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

/// Decode declarations written by [`to_jsonl`]. Blank lines are skipped.
pub fn from_jsonl(text: &str) -> Result<Vec<RawDeclaration>> {
    let mut declarations = Vec::new();
    for (line_num, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let declaration = serde_json::from_str(line).map_err(|e| Error::Jsonl {
            line: line_num + 1,
            message: e.to_string(),
        })?;
        declarations.push(declaration);
    }
    Ok(declarations)
}
