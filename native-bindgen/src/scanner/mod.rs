//! Structural scan of Java-syntax sources.
//!
//! The scanner walks the token stream once, keeping track of the package, the
//! imports and the stack of enclosing type declarations. Every occurrence of the
//! configured annotation produces either a [`RawDeclaration`] or a
//! `MalformedDeclaration` error; accessor call sites are collected on the way.
//! Nothing is validated beyond what is needed to cut the text into pieces.

pub(crate) mod lexer;

use crate::{
    api::record::{CallSite, RawDeclaration, RawMethod, RawParam},
    error::Result,
    Error, SourceLocation,
};
use lexer::{join_tokens, tokenize, Token, TokenKind};

/// Modifiers that may precede the annotated interface or its methods
const MODIFIERS: &[&str] = &[
    "public",
    "protected",
    "private",
    "static",
    "abstract",
    "final",
    "strictfp",
    "sealed",
    "default",
];

/// Scanner output for one compilation unit
#[derive(Debug, Clone)]
pub struct ScannedUnit {
    pub file: String,
    pub package: String,
    /// Single-type imports, fully qualified
    pub imports: Vec<String>,
    /// One entry per annotation occurrence, in source order
    pub declarations: Vec<Result<RawDeclaration>>,
    pub call_sites: Vec<CallSite>,
}

/// What the scanner looks for
#[derive(Debug, Clone, Copy)]
pub(crate) struct ScanConfig<'a> {
    /// Simple name of the marker annotation, e.g. `NativeMethods`
    pub annotation: &'a str,
    /// Suffix identifying accessor types in call sites, e.g. `Jni`
    pub accessor_suffix: &'a str,
}

/// Scan one compilation unit.
///
/// A lexical error (unterminated literal or comment) leaves nothing to scan, so
/// it becomes the single declaration result of the unit.
#[tracing::instrument(skip_all, fields(file = file, len = text.len()))]
pub(crate) fn scan_unit(file: &str, text: &str, config: ScanConfig<'_>) -> ScannedUnit {
    let tokens = match tokenize(file, text) {
        Ok(tokens) => tokens,
        Err(e) => {
            return ScannedUnit {
                file: file.to_string(),
                package: String::new(),
                imports: Vec::new(),
                declarations: vec![Err(e)],
                call_sites: Vec::new(),
            }
        }
    };
    let mut scanner = Scanner {
        file,
        config,
        tokens: &tokens,
        pos: 0,
        depth: 0,
        type_stack: Vec::new(),
        pending_type: None,
        package: String::new(),
        imports: Vec::new(),
        declarations: Vec::new(),
        call_sites: Vec::new(),
    };
    scanner.run();
    tracing::debug!(
        declarations = scanner.declarations.len(),
        call_sites = scanner.call_sites.len(),
        "scanned"
    );
    ScannedUnit {
        file: file.to_string(),
        package: scanner.package,
        imports: scanner.imports,
        declarations: scanner.declarations,
        call_sites: scanner.call_sites,
    }
}

struct Scanner<'a> {
    file: &'a str,
    config: ScanConfig<'a>,
    tokens: &'a [Token],
    pos: usize,
    /// Current brace nesting depth
    depth: usize,
    /// Enclosing type declarations with the depth of their body
    type_stack: Vec<(String, usize)>,
    /// Type declared by the last `class`/`interface`/... keyword, waiting for its `{`
    pending_type: Option<String>,
    package: String,
    imports: Vec<String>,
    declarations: Vec<Result<RawDeclaration>>,
    call_sites: Vec<CallSite>,
}

impl<'a> Scanner<'a> {
    fn token(&self, index: usize) -> Option<&'a Token> {
        self.tokens.get(index)
    }

    fn location(&self, index: usize) -> SourceLocation {
        match self.tokens.get(index).or_else(|| self.tokens.last()) {
            Some(token) => token.location(self.file),
            None => SourceLocation::new(self.file, 1, 1),
        }
    }

    fn is_punct(&self, index: usize, c: char) -> bool {
        self.token(index).is_some_and(|t| t.is_punct(c))
    }

    fn ident(&self, index: usize) -> Option<&'a str> {
        self.token(index).and_then(Token::ident)
    }

    fn run(&mut self) {
        while let Some(token) = self.token(self.pos) {
            match &token.kind {
                TokenKind::Ident(word) if self.type_stack.is_empty() && self.depth == 0 => {
                    match word.as_str() {
                        "package" => self.package = self.statement_text(),
                        "import" => self.import(),
                        _ => self.word(),
                    }
                }
                TokenKind::Ident(_) => self.word(),
                TokenKind::Punct('@') => self.annotation(),
                TokenKind::Punct('{') => {
                    self.depth += 1;
                    if let Some(name) = self.pending_type.take() {
                        self.type_stack.push((name, self.depth));
                    }
                    self.pos += 1;
                }
                TokenKind::Punct('}') => {
                    if self.type_stack.last().is_some_and(|(_, d)| *d == self.depth) {
                        self.type_stack.pop();
                    }
                    self.depth = self.depth.saturating_sub(1);
                    self.pos += 1;
                }
                _ => self.pos += 1,
            }
        }
    }

    /// Text of `<keyword> ... ;` without the keyword, advancing past `;`
    fn statement_text(&mut self) -> String {
        let start = self.pos + 1;
        let end = self.find_punct(start, ';');
        self.pos = end + 1;
        join_tokens(&self.tokens[start..end.min(self.tokens.len())])
    }

    fn import(&mut self) {
        let text = self.statement_text();
        if !text.starts_with("static ") && !text.ends_with(".*") {
            self.imports.push(text);
        }
    }

    /// Index of the next `c` at or after `from`, or the end of the stream
    fn find_punct(&self, from: usize, c: char) -> usize {
        (from..self.tokens.len())
            .find(|&i| self.is_punct(i, c))
            .unwrap_or(self.tokens.len())
    }

    /// Index just past the bracket closing the one at `open`
    fn skip_balanced(&self, open: usize) -> usize {
        let (open_c, close_c) = match self.token(open).map(|t| &t.kind) {
            Some(TokenKind::Punct('(')) => ('(', ')'),
            Some(TokenKind::Punct('{')) => ('{', '}'),
            Some(TokenKind::Punct('<')) => ('<', '>'),
            _ => return open + 1,
        };
        let mut level = 0usize;
        for i in open..self.tokens.len() {
            if self.is_punct(i, open_c) {
                level += 1;
            } else if self.is_punct(i, close_c) {
                level -= 1;
                if level == 0 {
                    return i + 1;
                }
            }
        }
        self.tokens.len()
    }

    fn word(&mut self) {
        let index = self.pos;
        let after_dot = index > 0 && self.is_punct(index - 1, '.');
        match self.ident(index) {
            Some("class" | "interface" | "enum") if !after_dot => {
                if let Some(name) = self.ident(index + 1) {
                    self.pending_type = Some(name.to_string());
                }
            }
            Some("record")
                if !after_dot && self.ident(index + 1).is_some()
                    && (self.is_punct(index + 2, '(') || self.is_punct(index + 2, '<')) =>
            {
                self.pending_type = self.ident(index + 1).map(str::to_string);
            }
            Some(name) if name.ends_with(self.config.accessor_suffix) => self.call_site(index),
            _ => {}
        }
        self.pos += 1;
    }

    /// `<Accessor> . get ( ) . <method> (`
    fn call_site(&mut self, index: usize) {
        let matches = self.is_punct(index + 1, '.')
            && self.ident(index + 2) == Some("get")
            && self.is_punct(index + 3, '(')
            && self.is_punct(index + 4, ')')
            && self.is_punct(index + 5, '.')
            && self.ident(index + 6).is_some()
            && self.is_punct(index + 7, '(');
        if let (true, Some(accessor), Some(method)) =
            (matches, self.ident(index), self.ident(index + 6))
        {
            self.call_sites.push(CallSite {
                accessor: accessor.to_string(),
                method: method.to_string(),
                source_location: self.location(index),
            });
        }
    }

    /// Dotted name starting at `from`; returns the name and the index after it
    fn dotted_name(&self, from: usize) -> (Vec<&'a str>, usize) {
        let mut segments = Vec::new();
        let mut i = from;
        while let Some(segment) = self.ident(i) {
            segments.push(segment);
            if self.is_punct(i + 1, '.') && self.ident(i + 2).is_some() {
                i += 2;
            } else {
                i += 1;
                break;
            }
        }
        (segments, i)
    }

    fn annotation(&mut self) {
        let at = self.pos;
        if self.ident(at + 1) == Some("interface") {
            // `@interface Foo` declares an annotation type
            self.pending_type = self.ident(at + 2).map(str::to_string);
            self.pos = at + 2;
            return;
        }
        let (segments, after_name) = self.dotted_name(at + 1);
        let after_args = if self.is_punct(after_name, '(') {
            self.skip_balanced(after_name)
        } else {
            after_name
        };
        if segments.last() != Some(&self.config.annotation) {
            self.pos = after_args.max(at + 1);
            return;
        }

        let location = self.location(at);
        let result = self.native_interface(&location, after_name, after_args);
        if let Err(e) = result {
            tracing::debug!(%location, error = %e, "rejected annotated declaration");
            self.declarations.push(Err(e));
        }
    }

    /// Parse the annotation arguments (tokens between `open` and `end`)
    fn tag(&self, location: &SourceLocation, open: usize, end: usize) -> Result<String> {
        if !self.is_punct(open, '(') {
            return Ok(String::new());
        }
        let mut inner = &self.tokens[open + 1..end.saturating_sub(1).max(open + 1)];
        if inner.len() >= 2 && inner[0].is_ident("value") && inner[1].is_punct('=') {
            inner = &inner[2..];
        }
        let mut tag = String::new();
        let mut expect_literal = true;
        for token in inner {
            match (&token.kind, expect_literal) {
                (TokenKind::Str(value), true) => tag.push_str(value),
                (TokenKind::Punct('+'), false) => {}
                _ => {
                    return Err(Error::malformed(
                        location,
                        format!(
                            "@{} value must be a string literal",
                            self.config.annotation
                        ),
                    ))
                }
            }
            expect_literal = !expect_literal;
        }
        if !inner.is_empty() && expect_literal {
            return Err(Error::malformed(
                location,
                format!("@{} value must be a string literal", self.config.annotation),
            ));
        }
        Ok(tag)
    }

    /// Skip modifiers and unrelated annotations in `tokens[from..end]`
    fn skip_modifiers(&self, from: usize, end: usize) -> usize {
        let mut i = from;
        while i < end {
            match self.token(i) {
                Some(token) if token.ident().is_some_and(|w| MODIFIERS.contains(&w)) => i += 1,
                Some(token) if token.is_punct('@') && self.ident(i + 1) != Some("interface") => {
                    let (_, after_name) = self.dotted_name(i + 1);
                    i = if self.is_punct(after_name, '(') {
                        self.skip_balanced(after_name)
                    } else {
                        after_name
                    };
                }
                _ => return i,
            }
        }
        end
    }

    /// Handle one occurrence of the marker annotation.
    ///
    /// On error `self.pos` is left where ordinary scanning can resume: right
    /// after the annotation when the target is something else, after the
    /// interface body when the interface itself is defective.
    fn native_interface(
        &mut self,
        location: &SourceLocation,
        after_name: usize,
        after_args: usize,
    ) -> Result<()> {
        self.pos = after_args;
        let tag = self.tag(location, after_name, after_args)?;

        let keyword = self.skip_modifiers(after_args, self.tokens.len());
        if self.ident(keyword) != Some("interface") {
            let found = self
                .token(keyword)
                .map(|t| if t.is_punct('@') { "@interface".to_string() } else { t.text() })
                .unwrap_or_else(|| "end of input".to_string());
            return Err(Error::malformed(
                location,
                format!(
                    "@{} must annotate an interface, found `{found}`",
                    self.config.annotation
                ),
            ));
        }
        let Some(name) = self.ident(keyword + 1) else {
            return Err(Error::malformed(location, "interface name missing"));
        };

        // Anything between the name and the body (`<T>`, `extends ...`) is ignored
        let open = (keyword + 2..self.tokens.len())
            .find(|&i| self.is_punct(i, '{') || self.is_punct(i, ';'))
            .filter(|&i| self.is_punct(i, '{'));
        let Some(open) = open else {
            self.pos = keyword + 2;
            return Err(Error::malformed(
                location,
                format!("interface `{name}` has no body"),
            ));
        };
        let body_end = self.skip_balanced(open);
        self.pos = body_end;

        let Some((holder, _)) = self.type_stack.last() else {
            return Err(Error::malformed(
                location,
                format!(
                    "@{} interface `{name}` must be nested inside a class",
                    self.config.annotation
                ),
            ));
        };
        let holder = holder.clone();

        let methods = self.members(open + 1, body_end.saturating_sub(1))?;

        let qualified_name = std::iter::once(self.package.as_str())
            .filter(|p| !p.is_empty())
            .chain(self.type_stack.iter().map(|(n, _)| n.as_str()))
            .chain(std::iter::once(name))
            .collect::<Vec<_>>()
            .join(".");
        tracing::debug!(
            interface = %qualified_name,
            tag = %tag,
            methods = methods.len(),
            "scanned interface"
        );
        self.declarations.push(Ok(RawDeclaration {
            package: self.package.clone(),
            holder,
            name: name.to_string(),
            qualified_name,
            tag,
            imports: self.imports.clone(),
            methods,
            source_location: location.clone(),
        }));
        Ok(())
    }

    /// Split the interface body `tokens[start..end]` into method declarations
    fn members(&self, start: usize, end: usize) -> Result<Vec<RawMethod>> {
        let mut methods = Vec::new();
        let mut i = start;
        while i < end {
            let member_start = self.skip_modifiers(i, end);
            if member_start >= end {
                break;
            }
            let Some(semi) = self.member_end(member_start, end) else {
                return Err(Error::malformed(
                    &self.location(member_start),
                    "expected `;` after method declaration",
                ));
            };
            if self.is_punct(semi, '{') {
                return Err(Error::malformed(
                    &self.location(member_start),
                    format!(
                        "only abstract method declarations are allowed in a @{} interface",
                        self.config.annotation
                    ),
                ));
            }
            methods.push(self.method(member_start, semi)?);
            i = semi + 1;
        }
        Ok(methods)
    }

    /// First `;` or `{` in `tokens[start..end]` outside of parentheses
    fn member_end(&self, start: usize, end: usize) -> Option<usize> {
        let mut i = start;
        while i < end {
            if self.is_punct(i, '(') {
                i = self.skip_balanced(i);
                continue;
            }
            if self.is_punct(i, ';') || self.is_punct(i, '{') {
                return Some(i);
            }
            i += 1;
        }
        None
    }

    /// Parse `tokens[start..end]` (modifiers already skipped, `;` excluded)
    fn method(&self, start: usize, end: usize) -> Result<RawMethod> {
        let not_a_method = || {
            Error::malformed(
                &self.location(start),
                "expected a method declaration of the form `Type name(Type arg, ...);`",
            )
        };
        let open = (start..end)
            .find(|&i| self.is_punct(i, '('))
            .ok_or_else(not_a_method)?;
        if open == start {
            return Err(not_a_method());
        }
        let name_index = open - 1;
        let name = self.ident(name_index).ok_or_else(not_a_method)?;
        let mut level = 0usize;
        let close = (open..end).find(|&i| {
            if self.is_punct(i, '(') {
                level += 1;
            } else if self.is_punct(i, ')') {
                level -= 1;
            }
            level == 0
        });
        let Some(close) = close else {
            return Err(Error::malformed(
                &self.location(open),
                format!("unclosed parameter list of `{name}`"),
            ));
        };
        let trailing = &self.tokens[close + 1..end];
        if !trailing.is_empty() && !trailing[0].is_ident("throws") {
            return Err(Error::malformed(
                &trailing[0].location(self.file),
                format!("unexpected `{}` after parameters of `{name}`", trailing[0].text()),
            ));
        }

        Ok(RawMethod {
            name: name.to_string(),
            return_type: join_tokens(&self.tokens[start..name_index]),
            params: self.params(name, open + 1, close)?,
            source_location: self.location(name_index),
        })
    }

    fn params(&self, method: &str, start: usize, end: usize) -> Result<Vec<RawParam>> {
        if start == end {
            return Ok(Vec::new());
        }
        // Split on commas outside of generic arguments and annotation values
        let mut pieces = Vec::new();
        let mut nesting = 0i32;
        let mut generics = 0i32;
        let mut piece_start = start;
        for i in start..end {
            match &self.tokens[i].kind {
                TokenKind::Punct('(' | '{') => nesting += 1,
                TokenKind::Punct(')' | '}') => nesting -= 1,
                TokenKind::Punct('<') if nesting == 0 => generics += 1,
                TokenKind::Punct('>') if nesting == 0 => generics -= 1,
                TokenKind::Punct(',') if nesting == 0 && generics == 0 => {
                    pieces.push((piece_start, i));
                    piece_start = i + 1;
                }
                _ => {}
            }
        }
        pieces.push((piece_start, end));

        pieces
            .into_iter()
            .map(|(from, to)| {
                let from = self.skip_modifiers(from, to);
                // `int x[]` declares the same parameter as `int[] x`
                let mut name_end = to;
                let mut dims = 0;
                while name_end >= from + 2
                    && self.is_punct(name_end - 1, ']')
                    && self.is_punct(name_end - 2, '[')
                {
                    name_end -= 2;
                    dims += 1;
                }
                let name = (name_end > from + 1)
                    .then(|| self.ident(name_end - 1))
                    .flatten();
                let Some(name) = name else {
                    return Err(Error::malformed(
                        &self.location(from.min(to)),
                        format!("parameter of `{method}` needs a type and a name"),
                    ));
                };
                let mut type_text = join_tokens(&self.tokens[from..name_end - 1]);
                type_text.push_str(&"[]".repeat(dims));
                Ok(RawParam {
                    name: name.to_string(),
                    type_text,
                    source_location: self.location(from),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: ScanConfig<'static> = ScanConfig {
        annotation: "NativeMethods",
        accessor_suffix: "Jni",
    };

    const SAMPLE: &str = r#"
// Copyright notice
package org.chromium.example;

import java.util.List;
import static java.lang.Math.max;
import java.io.*;

class SampleForAnnotationProcessor {
    @NativeMethods("module")
    interface Natives {
        void foo();
        boolean bar(int x);
        List<String> names(@Nullable final Map<String, Integer> counts, long[] ids)
            throws Exception;
    }

    void test() {
        SampleForAnnotationProcessorJni.get().foo();
    }
}
"#;

    fn declarations(unit: &ScannedUnit) -> Vec<&RawDeclaration> {
        unit.declarations
            .iter()
            .map(|d| d.as_ref().unwrap())
            .collect()
    }

    #[test]
    fn test_scan_sample() {
        let unit = scan_unit("Sample.java", SAMPLE, CONFIG);
        assert_eq!(unit.package, "org.chromium.example");
        assert_eq!(unit.imports, vec!["java.util.List".to_string()]);

        let decls = declarations(&unit);
        assert_eq!(decls.len(), 1);
        let decl = decls[0];
        assert_eq!(decl.holder, "SampleForAnnotationProcessor");
        assert_eq!(
            decl.qualified_name,
            "org.chromium.example.SampleForAnnotationProcessor.Natives"
        );
        assert_eq!(decl.tag, "module");
        assert_eq!(decl.source_location, SourceLocation::new("Sample.java", 10, 5));

        let names: Vec<_> = decl.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["foo", "bar", "names"]);
        assert_eq!(decl.methods[0].return_type, "void");
        assert!(decl.methods[0].params.is_empty());
        assert_eq!(decl.methods[1].params[0].type_text, "int");
        assert_eq!(decl.methods[1].params[0].name, "x");

        let names_method = &decl.methods[2];
        assert_eq!(names_method.return_type, "List<String>");
        assert_eq!(names_method.params.len(), 2);
        assert_eq!(names_method.params[0].type_text, "Map<String,Integer>");
        assert_eq!(names_method.params[1].type_text, "long[]");

        assert_eq!(unit.call_sites.len(), 1);
        assert_eq!(unit.call_sites[0].accessor, "SampleForAnnotationProcessorJni");
        assert_eq!(unit.call_sites[0].method, "foo");
    }

    #[test]
    fn test_annotation_forms() {
        let text = r#"
class A {
    @NativeMethods interface One { void a(); }
    @org.jni_zero.NativeMethods(value = "mo" + "dule") interface Two { void b(); }
    @NativeMethods() public static interface Three { void c(); }
}
"#;
        let unit = scan_unit("A.java", text, CONFIG);
        let tags: Vec<_> = declarations(&unit)
            .into_iter()
            .map(|d| (d.name.as_str(), d.tag.as_str()))
            .collect();
        assert_eq!(tags, vec![("One", ""), ("Two", "module"), ("Three", "")]);
    }

    #[test]
    fn test_annotation_on_class_is_malformed() {
        let text = r#"
class A {
    @NativeMethods("module")
    static class Natives { void foo() {} }
}
"#;
        let unit = scan_unit("A.java", text, CONFIG);
        assert_eq!(unit.declarations.len(), 1);
        let err = unit.declarations[0].as_ref().unwrap_err();
        assert!(
            matches!(
                err,
                Error::MalformedDeclaration { reason, .. } if reason.contains("found `class`")
            ),
            "{err}"
        );
    }

    #[test]
    fn test_top_level_interface_is_malformed() {
        let unit = scan_unit("A.java", "@NativeMethods interface Natives { void a(); }", CONFIG);
        let err = unit.declarations[0].as_ref().unwrap_err();
        assert!(err.to_string().contains("must be nested"), "{err}");
    }

    #[test]
    fn test_errors_are_isolated_per_interface() {
        let text = r#"
class A {
    @NativeMethods interface Bad { void a(; }
    @NativeMethods interface WithBody { default void a() {} }
    @NativeMethods("x") interface Good { int b(String s); }
    @NativeMethods(42) interface BadTag { void c(); }
}
"#;
        let unit = scan_unit("A.java", text, CONFIG);
        assert_eq!(unit.declarations.len(), 4);
        assert!(unit.declarations[0].is_err());
        assert!(unit.declarations[1].is_err());
        assert_eq!(unit.declarations[2].as_ref().unwrap().name, "Good");
        assert!(unit.declarations[3]
            .as_ref()
            .unwrap_err()
            .to_string()
            .contains("string literal"));
    }

    #[test]
    fn test_parameter_without_name_is_malformed() {
        let text = "class A { @NativeMethods interface N { void a(int); } }";
        let unit = scan_unit("A.java", text, CONFIG);
        let err = unit.declarations[0].as_ref().unwrap_err();
        assert!(err.to_string().contains("needs a type and a name"), "{err}");
    }

    #[test]
    fn test_annotation_values_inside_parameters() {
        let text = r#"
class A {
    @NativeMethods interface N {
        void a(@IntRange(from = 0, to = 10) int x, @Size(max = 2) long y);
        void b(@SuppressWarnings({"a", "b"}) int x);
        @SuppressWarnings({"unused"}) void c(@Foo.Bar int z);
    }
}
"#;
        let unit = scan_unit("A.java", text, CONFIG);
        let decls = declarations(&unit);
        assert_eq!(decls.len(), 1);
        let params: Vec<Vec<_>> = decls[0]
            .methods
            .iter()
            .map(|m| {
                m.params
                    .iter()
                    .map(|p| (p.name.as_str(), p.type_text.as_str()))
                    .collect()
            })
            .collect();
        assert_eq!(
            params,
            vec![
                vec![("x", "int"), ("y", "long")],
                vec![("x", "int")],
                vec![("z", "int")],
            ]
        );
    }

    #[test]
    fn test_array_dimensions_after_parameter_name() {
        let text = r#"
class A {
    @NativeMethods interface N { void a(int x[], String[] names[][]); }
}
"#;
        let unit = scan_unit("A.java", text, CONFIG);
        let params = &declarations(&unit)[0].methods[0].params;
        assert_eq!(params[0].name, "x");
        assert_eq!(params[0].type_text, "int[]");
        assert_eq!(params[1].name, "names");
        assert_eq!(params[1].type_text, "String[][][]");
    }

    #[test]
    fn test_array_brackets_without_name_are_malformed() {
        let text = "class A { @NativeMethods interface N { void a(int[]); } }";
        let unit = scan_unit("A.java", text, CONFIG);
        let err = unit.declarations[0].as_ref().unwrap_err();
        assert!(err.to_string().contains("needs a type and a name"), "{err}");
    }

    #[test]
    fn test_nested_holders_and_class_literals() {
        let text = r#"
package p;
class Outer {
    Object k = Outer.class;
    Runnable r = new Runnable() { public void run() {} };
    static class Inner {
        @NativeMethods interface Natives { void a(); }
    }
    @interface Marker {}
}
"#;
        let unit = scan_unit("Outer.java", text, CONFIG);
        let decl = declarations(&unit)[0];
        assert_eq!(decl.holder, "Inner");
        assert_eq!(decl.qualified_name, "p.Outer.Inner.Natives");
    }

    #[test]
    fn test_lexer_error_reports_unit() {
        let unit = scan_unit("A.java", "class A { String s = \"oops; }", CONFIG);
        assert_eq!(unit.declarations.len(), 1);
        assert!(unit.declarations[0].is_err());
    }
}
