//! Naming rules for generated items.
//!
//! Java identifiers may contain `$` and arbitrary letters, Rust identifiers may
//! not, and native symbols must stay within `[A-Za-z0-9_]`. Everything that
//! ends up in generated text passes through one of the functions below.

use proc_macro2::Span;

/// Strict and reserved keywords of every edition up to 2024
const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be written as raw identifiers
const NON_RAW_KEYWORDS: &[&str] = &["self", "Self", "super", "crate", "_"];

/// Encode characters outside `[A-Za-z0-9_]` as `_u<hex>_`.
pub(crate) fn escape_identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
        } else {
            out.push_str(&format!("_u{:x}_", c as u32));
        }
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Rust identifier for a Java name: escaped, keywords made raw.
pub(crate) fn rust_ident(name: &str) -> syn::Ident {
    let escaped = escape_identifier(name);
    if NON_RAW_KEYWORDS.contains(&escaped.as_str()) {
        syn::Ident::new(&format!("{escaped}_"), Span::call_site())
    } else if RUST_KEYWORDS.contains(&escaped.as_str()) {
        syn::Ident::new_raw(&escaped, Span::call_site())
    } else {
        syn::Ident::new(&escaped, Span::call_site())
    }
}

/// `FooBarJni` -> `FOO_BAR_JNI`
pub(crate) fn screaming_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let chars: Vec<char> = name.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        let starts_word = i > 0
            && c.is_ascii_uppercase()
            && (chars[i - 1].is_ascii_lowercase()
                || chars[i - 1].is_ascii_digit()
                || (chars[i - 1].is_ascii_uppercase()
                    && chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase())));
        if starts_word && !out.ends_with('_') {
            out.push('_');
        }
        out.push(c.to_ascii_uppercase());
    }
    out
}

/// JNI short-name mangling of one name component.
///
/// `_` becomes `_1`, `;` `_2`, `[` `_3`, any other character outside
/// `[A-Za-z0-9]` `_0xxxx` (UTF-16 code units). With `dots_as_separators` a
/// `.` or `/` becomes a plain `_`.
pub(crate) fn jni_mangle(name: &str, dots_as_separators: bool) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' => out.push(c),
            '.' | '/' if dots_as_separators => out.push('_'),
            '_' => out.push_str("_1"),
            ';' => out.push_str("_2"),
            '[' => out.push_str("_3"),
            c => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("_0{unit:04x}"));
                }
            }
        }
    }
    out
}

/// Name of the native function bound to `method`.
///
/// `Java_<tag>_<qualified interface>_<method>`, the tag component left out when
/// the annotation carried none.
pub(crate) fn native_symbol(tag: &str, qualified_interface: &str, method: &str) -> String {
    let mut symbol = String::from("Java_");
    if !tag.is_empty() {
        symbol.push_str(&jni_mangle(tag, false));
        symbol.push('_');
    }
    symbol.push_str(&jni_mangle(qualified_interface, true));
    symbol.push('_');
    symbol.push_str(&jni_mangle(method, false));
    symbol
}
