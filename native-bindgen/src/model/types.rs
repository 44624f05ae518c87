//! Opaque type names.
//!
//! A [`TypeName`] is a dotted Java name with generic arguments erased and the
//! array dimensions counted. No type universe is consulted: a simple name is
//! qualified through the unit's imports, the well-known `java.lang` types or
//! the declaring package, and that is all.

use std::sync::OnceLock;

use regex::Regex;

/// Java primitive types, `void` excluded
pub const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double",
];

/// `java.lang` types that need no import
const JAVA_LANG: &[&str] = &[
    "Boolean",
    "Byte",
    "Character",
    "Class",
    "Double",
    "Enum",
    "Exception",
    "Float",
    "Integer",
    "Iterable",
    "Long",
    "Number",
    "Object",
    "Runnable",
    "RuntimeException",
    "Short",
    "String",
    "StringBuilder",
    "Throwable",
    "Void",
];

pub(crate) fn identifier_regex() -> &'static Regex {
    static IDENTIFIER: OnceLock<Regex> = OnceLock::new();
    IDENTIFIER.get_or_init(|| {
        Regex::new(r"^[\p{Alphabetic}_$][\p{Alphabetic}\p{Nd}_$]*$")
            .expect("valid identifier regex")
    })
}

/// Resolved, erased type name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeName {
    /// Dotted name, e.g. `int` or `java.lang.String`
    pub name: String,
    /// Number of `[]` (varargs count as one)
    pub array_dims: usize,
}

impl TypeName {
    pub fn is_primitive(&self) -> bool {
        self.array_dims == 0 && PRIMITIVES.contains(&self.name.as_str())
    }

    /// Parse a raw type text into a name and its dimensions.
    ///
    /// Returns a human readable reason on failure. Generic arguments are
    /// checked for balance and erased; their content is not validated beyond
    /// that.
    pub(crate) fn parse(text: &str) -> Result<(String, usize), String> {
        let text = text.trim();
        if text.is_empty() {
            return Err("type is missing".to_string());
        }
        if text.starts_with('<') {
            return Err("generic methods are not supported".to_string());
        }

        let (mut rest, varargs) = match text.strip_suffix("...") {
            Some(rest) => (rest.trim_end(), 1),
            None => (text, 0),
        };
        if rest.contains("...") {
            return Err("`...` may only end a parameter type".to_string());
        }

        let mut array_dims = varargs;
        while let Some(stripped) = rest.strip_suffix("[]") {
            array_dims += 1;
            rest = stripped.trim_end();
        }
        if rest.contains('[') || rest.contains(']') {
            return Err("malformed array brackets".to_string());
        }

        let base = erase_generics(rest)?;
        for segment in base.split('.') {
            if !identifier_regex().is_match(segment) {
                return Err(format!("`{segment}` is not a valid identifier"));
            }
        }
        Ok((base, array_dims))
    }

    /// Parse and qualify `text` using the unit's imports and package.
    pub(crate) fn resolve(text: &str, imports: &[String], package: &str) -> Result<Self, String> {
        let (name, array_dims) = Self::parse(text)?;
        if name == "void" {
            return Err("`void` is not a value type".to_string());
        }
        let name = if name.contains('.') || PRIMITIVES.contains(&name.as_str()) {
            name
        } else if let Some(import) = imports
            .iter()
            .find(|i| i.rsplit('.').next() == Some(name.as_str()))
        {
            import.clone()
        } else if JAVA_LANG.contains(&name.as_str()) {
            format!("java.lang.{name}")
        } else if package.is_empty() {
            name
        } else {
            format!("{package}.{name}")
        };
        Ok(Self { name, array_dims })
    }

    /// Last segment of the dotted name
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        for _ in 0..self.array_dims {
            write!(f, "[]")?;
        }
        Ok(())
    }
}

/// Drop `<...>` groups, failing on unbalanced brackets or trailing text
fn erase_generics(text: &str) -> Result<String, String> {
    let mut base = String::new();
    let mut level = 0usize;
    let mut closed_group = false;
    for c in text.chars() {
        match c {
            '<' => level += 1,
            '>' => {
                level = level
                    .checked_sub(1)
                    .ok_or_else(|| "unbalanced `>`".to_string())?;
                if level == 0 {
                    closed_group = true;
                }
            }
            _ if level > 0 => {}
            c if closed_group && c != '.' => {
                return Err("unexpected text after generic arguments".to_string())
            }
            c => {
                closed_group = false;
                base.push(c);
            }
        }
    }
    if level != 0 {
        return Err("unbalanced `<`".to_string());
    }
    if closed_group && base.is_empty() {
        return Err("generic arguments without a type".to_string());
    }
    Ok(base)
}
