//! Tokenizer for Java-syntax compilation units.
//!
//! Only what the scanner needs survives: identifiers, string literals and
//! punctuation. Comments and whitespace are dropped, numbers and character
//! literals are kept as opaque tokens so they cannot be mistaken for anything
//! else.

use crate::{error::Result, Error, SourceLocation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Ident(String),
    Str(String),
    Char,
    Number,
    Punct(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn ident(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Ident(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_ident(&self, name: &str) -> bool {
        self.ident() == Some(name)
    }

    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct(c)
    }

    pub fn location(&self, file: &str) -> SourceLocation {
        SourceLocation::new(file, self.line, self.column)
    }

    /// Text used when raw type and signature fragments are reassembled
    pub fn text(&self) -> String {
        match &self.kind {
            TokenKind::Ident(name) => name.clone(),
            TokenKind::Str(value) => format!("{value:?}"),
            TokenKind::Char => "'?'".to_string(),
            TokenKind::Number => "0".to_string(),
            TokenKind::Punct(c) => c.to_string(),
        }
    }
}

/// Join token texts, separating only adjacent words.
pub(crate) fn join_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut previous_was_word = false;
    for token in tokens {
        let is_word = token.ident().is_some();
        if is_word && previous_was_word {
            out.push(' ');
        }
        out.push_str(&token.text());
        // `? extends Foo` keeps its spaces
        previous_was_word = is_word || token.is_punct('?');
    }
    out
}

pub(crate) fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

pub(crate) fn is_ident_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

struct Lexer<'a> {
    file: &'a str,
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn location(&self, line: usize, column: usize) -> SourceLocation {
        SourceLocation::new(self.file, line, column)
    }

    fn skip_block_comment(&mut self, line: usize, column: usize) -> Result<()> {
        self.bump();
        self.bump();
        loop {
            match (self.peek(0), self.peek(1)) {
                (Some('*'), Some('/')) => {
                    self.bump();
                    self.bump();
                    return Ok(());
                }
                (Some(_), _) => {
                    self.bump();
                }
                (None, _) => {
                    return Err(Error::malformed(
                        &self.location(line, column),
                        "unterminated block comment",
                    ))
                }
            }
        }
    }

    fn escape(&mut self, line: usize, column: usize) -> Result<char> {
        let unterminated = |lexer: &Self| {
            Error::malformed(&lexer.location(line, column), "unterminated escape sequence")
        };
        let c = self.bump().ok_or_else(|| unterminated(self))?;
        Ok(match c {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'b' => '\u{8}',
            'f' => '\u{c}',
            's' => ' ',
            '0' => '\0',
            'u' => {
                while self.peek(0) == Some('u') {
                    self.bump();
                }
                let mut code = 0u32;
                for _ in 0..4 {
                    let digit = self
                        .bump()
                        .and_then(|d| d.to_digit(16))
                        .ok_or_else(|| {
                            Error::malformed(
                                &self.location(line, column),
                                "invalid unicode escape in literal",
                            )
                        })?;
                    code = code * 16 + digit;
                }
                char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
            }
            other => other,
        })
    }

    fn string(&mut self, line: usize, column: usize) -> Result<String> {
        let text_block = self.peek(1) == Some('"') && self.peek(2) == Some('"');
        let quotes = if text_block { 3 } else { 1 };
        for _ in 0..quotes {
            self.bump();
        }
        let mut value = String::new();
        loop {
            match self.peek(0) {
                None => {
                    return Err(Error::malformed(
                        &self.location(line, column),
                        "unterminated string literal",
                    ))
                }
                Some('\n') if !text_block => {
                    return Err(Error::malformed(
                        &self.location(line, column),
                        "unterminated string literal",
                    ))
                }
                Some('\\') => {
                    self.bump();
                    value.push(self.escape(line, column)?);
                }
                Some('"')
                    if !text_block || (self.peek(1) == Some('"') && self.peek(2) == Some('"')) =>
                {
                    for _ in 0..quotes {
                        self.bump();
                    }
                    return Ok(value);
                }
                Some(c) => {
                    self.bump();
                    value.push(c);
                }
            }
        }
    }

    fn char_literal(&mut self, line: usize, column: usize) -> Result<()> {
        self.bump();
        loop {
            match self.bump() {
                Some('\\') => {
                    self.escape(line, column)?;
                }
                Some('\'') => return Ok(()),
                Some('\n') | None => {
                    return Err(Error::malformed(
                        &self.location(line, column),
                        "unterminated character literal",
                    ))
                }
                Some(_) => {}
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        loop {
            match (self.peek(0), self.peek(1)) {
                (Some(c), _) if c.is_whitespace() => {
                    self.bump();
                }
                (Some('/'), Some('/')) => {
                    while self.peek(0).is_some_and(|c| c != '\n') {
                        self.bump();
                    }
                }
                (Some('/'), Some('*')) => {
                    let (line, column) = (self.line, self.column);
                    self.skip_block_comment(line, column)?;
                }
                _ => break,
            }
        }

        let (line, column) = (self.line, self.column);
        let Some(c) = self.peek(0) else {
            return Ok(None);
        };
        let kind = if is_ident_start(c) {
            let mut name = String::new();
            while let Some(c) = self.peek(0).filter(|c| is_ident_part(*c)) {
                name.push(c);
                self.bump();
            }
            TokenKind::Ident(name)
        } else if c.is_ascii_digit() {
            while self
                .peek(0)
                .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
            {
                self.bump();
            }
            TokenKind::Number
        } else if c == '"' {
            TokenKind::Str(self.string(line, column)?)
        } else if c == '\'' {
            self.char_literal(line, column)?;
            TokenKind::Char
        } else {
            self.bump();
            TokenKind::Punct(c)
        };
        Ok(Some(Token { kind, line, column }))
    }
}

/// Split `text` into tokens, locations relative to `file`.
pub(crate) fn tokenize(file: &str, text: &str) -> Result<Vec<Token>> {
    let mut lexer = Lexer {
        file,
        chars: text.chars().collect(),
        pos: 0,
        line: 1,
        column: 1,
    };
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}
