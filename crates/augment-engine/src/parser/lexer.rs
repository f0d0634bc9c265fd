//! Lexer for the augmentation source language.
//!
//! Regular tokens are produced by logos. Whitespace, comments and template
//! literals are scanned by hand so that template interpolations can be lexed
//! recursively and line/column information stays exact.

use crate::parser::token::{Span, TemplatePart, Token};
use logos::Logos;

/// Logos-based token enum for lexing.
///
/// Converted to [`Token`] after lexing.
#[derive(Logos, Debug, Clone, PartialEq)]
enum LogosToken {
    #[regex(r"[ \t\r\n]+", logos::skip)]
    Whitespace,

    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    #[regex(r"/\*", lex_block_comment)]
    BlockComment,

    // Keywords (must come before identifiers)
    #[token("class")]
    Class,
    #[token("let")]
    Let,
    #[token("const")]
    Const,
    #[token("extends")]
    Extends,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("return")]
    Return,
    #[token("throw")]
    Throw,
    #[token("import")]
    Import,
    #[token("export")]
    Export,
    #[token("from")]
    From,
    #[token("default")]
    Default,
    #[token("new")]
    New,
    #[token("this")]
    This,
    #[token("static")]
    Static,
    #[token("readonly")]
    Readonly,
    #[token("private")]
    Private,
    #[token("protected")]
    Protected,
    #[token("public")]
    Public,
    #[token("typeof")]
    Typeof,
    #[token("instanceof")]
    Instanceof,
    #[token("void")]
    Void,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*", |lex| lex.slice().to_string())]
    Identifier(String),

    #[regex(r"0x[0-9a-fA-F]+(_[0-9a-fA-F]+)*", parse_hex)]
    #[regex(r"[0-9]+(_[0-9]+)*", parse_number)]
    #[regex(r"[0-9]+(_[0-9]+)*\.[0-9]+(_[0-9]+)*([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"[0-9]+(_[0-9]+)*[eE][+-]?[0-9]+", parse_number)]
    #[regex(r"\.[0-9]+(_[0-9]+)*([eE][+-]?[0-9]+)?", parse_number)]
    NumberLiteral(f64),

    #[regex(r#""([^"\\\n]|\\.)*""#, parse_string)]
    #[regex(r"'([^'\\\n]|\\.)*'", parse_string)]
    StringLiteral(String),

    #[token("`")]
    Backtick,

    #[token("===")]
    EqualEqualEqual,
    #[token("!==")]
    BangEqualEqual,
    #[token("==")]
    EqualEqual,
    #[token("!=")]
    BangEqual,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("??")]
    QuestionQuestion,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("=")]
    Equal,
    #[token("?")]
    Question,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token("@")]
    At,
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
}

fn lex_block_comment(lex: &mut logos::Lexer<'_, LogosToken>) -> logos::Skip {
    // "/*" already consumed
    let remainder = lex.remainder();
    if let Some(end) = remainder.find("*/") {
        lex.bump(end + 2);
    } else {
        lex.bump(remainder.len());
    }
    logos::Skip
}

fn parse_hex(lex: &mut logos::Lexer<'_, LogosToken>) -> Option<f64> {
    let s = lex.slice()[2..].replace('_', "");
    i64::from_str_radix(&s, 16).ok().map(|n| n as f64)
}

fn parse_number(lex: &mut logos::Lexer<'_, LogosToken>) -> Option<f64> {
    lex.slice().replace('_', "").parse().ok()
}

fn parse_string(lex: &mut logos::Lexer<'_, LogosToken>) -> Option<String> {
    let s = lex.slice();
    let inner = &s[1..s.len() - 1];
    Some(unescape_string(inner))
}

fn unescape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some('0') => result.push('\0'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }

    result
}

/// Lexer producing `(Token, Span)` pairs terminated by [`Token::Eof`].
pub struct Lexer<'a> {
    source: &'a str,
    /// Absolute offset of `source` inside the enclosing file.
    base: usize,
    tokens: Vec<(Token, Span)>,
    errors: Vec<LexError>,
}

/// Lexical error.
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    UnexpectedCharacter { char: char, span: Span },
    UnterminatedString { span: Span },
    UnterminatedTemplate { span: Span },
    InvalidNumber { text: String, span: Span },
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            base: 0,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Lexer for a template interpolation starting at `base` in the parent.
    fn nested(source: &'a str, base: usize) -> Self {
        Self {
            source,
            base,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<(Token, Span)>, Vec<LexError>> {
        let mut pos = 0;
        let mut line = 1u32;
        let mut column = 1u32;
        let source = self.source;
        let bytes = source.as_bytes();

        while pos < bytes.len() {
            // Skip whitespace and comments here so backticks are seen before logos.
            while pos < bytes.len() {
                match bytes[pos] {
                    b' ' | b'\t' | b'\r' => {
                        column += 1;
                        pos += 1;
                    }
                    b'\n' => {
                        line += 1;
                        column = 1;
                        pos += 1;
                    }
                    b'/' if pos + 1 < bytes.len() && bytes[pos + 1] == b'/' => {
                        while pos < bytes.len() && bytes[pos] != b'\n' {
                            pos += 1;
                            column += 1;
                        }
                    }
                    b'/' if pos + 1 < bytes.len() && bytes[pos + 1] == b'*' => {
                        pos += 2;
                        column += 2;
                        while pos < bytes.len() {
                            if bytes[pos] == b'*' && pos + 1 < bytes.len() && bytes[pos + 1] == b'/' {
                                pos += 2;
                                column += 2;
                                break;
                            }
                            if bytes[pos] == b'\n' {
                                line += 1;
                                column = 1;
                            } else {
                                column += 1;
                            }
                            pos += 1;
                        }
                    }
                    _ => break,
                }
            }

            if pos >= bytes.len() {
                break;
            }

            if bytes[pos] == b'`' {
                let start_span = self.span(pos, pos + 1, line, column);
                match self.lex_template(pos + 1, line, column) {
                    Ok((parts, end_pos)) => {
                        self.tokens.push((Token::TemplateLiteral(parts), start_span));
                        advance_position(&self.source[pos..end_pos], &mut line, &mut column);
                        pos = end_pos;
                    }
                    Err(err) => {
                        self.errors.push(err);
                        // Give up on the rest of the input; nothing after an
                        // unterminated template can be trusted.
                        pos = bytes.len();
                    }
                }
                continue;
            }

            let mut logos_lexer = LogosToken::lexer(&self.source[pos..]);
            let Some(token_result) = logos_lexer.next() else {
                break;
            };
            let range = logos_lexer.span();
            let abs_start = pos + range.start;
            let abs_end = pos + range.end;
            let span = self.span(abs_start, abs_end, line, column);

            match token_result {
                Ok(logos_token) => {
                    let token = convert_token(logos_token);
                    self.tokens.push((token, span));
                }
                Err(_) => {
                    let char = self.source[abs_start..].chars().next().unwrap_or('\0');
                    let err = match char {
                        '"' | '\'' => LexError::UnterminatedString { span },
                        '0'..='9' => LexError::InvalidNumber {
                            text: self.source[abs_start..abs_end].to_string(),
                            span,
                        },
                        _ => LexError::UnexpectedCharacter { char, span },
                    };
                    self.errors.push(err);
                }
            }

            // Always make progress, even on a zero-width error.
            let end = abs_end.max(abs_start + self.source[abs_start..].chars().next().map_or(1, char::len_utf8));
            advance_position(&self.source[pos..end], &mut line, &mut column);
            pos = end;
        }

        let eof_span = self.span(self.source.len(), self.source.len(), line, column);
        self.tokens.push((Token::Eof, eof_span));

        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }

    fn span(&self, start: usize, end: usize, line: u32, column: u32) -> Span {
        Span::new(self.base + start, self.base + end, line, column)
    }

    /// Scan a template literal body starting just after the opening backtick.
    ///
    /// Returns the parts and the position just after the closing backtick.
    fn lex_template(
        &mut self,
        start: usize,
        line: u32,
        column: u32,
    ) -> Result<(Vec<TemplatePart>, usize), LexError> {
        let mut parts = Vec::new();
        let mut text = String::new();
        let source = self.source;
        let bytes = source.as_bytes();
        let mut pos = start;

        while pos < bytes.len() {
            match bytes[pos] {
                b'`' => {
                    if !text.is_empty() {
                        parts.push(TemplatePart::String(text));
                    }
                    return Ok((parts, pos + 1));
                }
                b'\\' if pos + 1 < bytes.len() => {
                    let next = source[pos + 1..].chars().next().unwrap_or('\\');
                    let escaped = match next {
                        'n' => '\n',
                        'r' => '\r',
                        't' => '\t',
                        '0' => '\0',
                        other => other,
                    };
                    text.push(escaped);
                    pos += 1 + next.len_utf8();
                }
                b'$' if pos + 1 < bytes.len() && bytes[pos + 1] == b'{' => {
                    if !text.is_empty() {
                        parts.push(TemplatePart::String(std::mem::take(&mut text)));
                    }
                    let expr_start = pos + 2;
                    pos = match closing_brace(bytes, expr_start) {
                        Some(end) => end,
                        None => {
                            return Err(LexError::UnterminatedTemplate {
                                span: self.span(start - 1, bytes.len(), line, column),
                            });
                        }
                    };

                    let nested = Lexer::nested(&self.source[expr_start..pos], self.base + expr_start);
                    match nested.tokenize() {
                        Ok(tokens) => {
                            let tokens = tokens
                                .into_iter()
                                .filter(|(t, _)| !matches!(t, Token::Eof))
                                .collect();
                            parts.push(TemplatePart::Expression(tokens));
                        }
                        Err(errors) => {
                            let fallback = LexError::UnterminatedTemplate {
                                span: self.span(start - 1, pos, line, column),
                            };
                            return Err(errors.into_iter().next().unwrap_or(fallback));
                        }
                    }
                    pos += 1;
                }
                _ => {
                    // Copy a whole UTF-8 character.
                    let ch = self.source[pos..].chars().next().unwrap_or('\0');
                    text.push(ch);
                    pos += ch.len_utf8().max(1);
                }
            }
        }

        Err(LexError::UnterminatedTemplate {
            span: self.span(start - 1, self.source.len(), line, column),
        })
    }
}

/// Find the `}` closing a `${` substitution whose body starts at `pos`.
///
/// Braces inside string and nested template literals are not counted.
fn closing_brace(bytes: &[u8], mut pos: usize) -> Option<usize> {
    let mut depth = 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(pos);
                }
            }
            quote @ (b'"' | b'\'' | b'`') => {
                pos = skip_quoted(bytes, pos, quote)?;
                continue;
            }
            _ => {}
        }
        pos += 1;
    }
    None
}

/// Skip a quoted literal starting at its opening quote; returns the position after the closing one.
fn skip_quoted(bytes: &[u8], mut pos: usize, quote: u8) -> Option<usize> {
    pos += 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b if b == quote => return Some(pos + 1),
            b'$' if quote == b'`' && bytes.get(pos + 1) == Some(&b'{') => {
                pos = closing_brace(bytes, pos + 2)? + 1;
            }
            _ => pos += 1,
        }
    }
    None
}

fn advance_position(consumed: &str, line: &mut u32, column: &mut u32) {
    for c in consumed.chars() {
        if c == '\n' {
            *line += 1;
            *column = 1;
        } else {
            *column += 1;
        }
    }
}

fn convert_token(logos_token: LogosToken) -> Token {
    match logos_token {
        LogosToken::Class => Token::Class,
        LogosToken::Let => Token::Let,
        LogosToken::Const => Token::Const,
        LogosToken::Extends => Token::Extends,
        LogosToken::If => Token::If,
        LogosToken::Else => Token::Else,
        LogosToken::Return => Token::Return,
        LogosToken::Throw => Token::Throw,
        LogosToken::Import => Token::Import,
        LogosToken::Export => Token::Export,
        LogosToken::From => Token::From,
        LogosToken::Default => Token::Default,
        LogosToken::New => Token::New,
        LogosToken::This => Token::This,
        LogosToken::Static => Token::Static,
        LogosToken::Readonly => Token::Readonly,
        LogosToken::Private => Token::Private,
        LogosToken::Protected => Token::Protected,
        LogosToken::Public => Token::Public,
        LogosToken::Typeof => Token::Typeof,
        LogosToken::Instanceof => Token::Instanceof,
        LogosToken::Void => Token::Void,
        LogosToken::True => Token::True,
        LogosToken::False => Token::False,
        LogosToken::Null => Token::Null,
        LogosToken::Identifier(s) => Token::Identifier(s),
        LogosToken::NumberLiteral(n) => Token::NumberLiteral(n),
        LogosToken::StringLiteral(s) => Token::StringLiteral(s),
        LogosToken::EqualEqualEqual => Token::EqualEqualEqual,
        LogosToken::BangEqualEqual => Token::BangEqualEqual,
        LogosToken::EqualEqual => Token::EqualEqual,
        LogosToken::BangEqual => Token::BangEqual,
        LogosToken::LessEqual => Token::LessEqual,
        LogosToken::GreaterEqual => Token::GreaterEqual,
        LogosToken::AmpAmp => Token::AmpAmp,
        LogosToken::PipePipe => Token::PipePipe,
        LogosToken::QuestionQuestion => Token::QuestionQuestion,
        LogosToken::Plus => Token::Plus,
        LogosToken::Minus => Token::Minus,
        LogosToken::Star => Token::Star,
        LogosToken::Slash => Token::Slash,
        LogosToken::Percent => Token::Percent,
        LogosToken::Bang => Token::Bang,
        LogosToken::Less => Token::Less,
        LogosToken::Greater => Token::Greater,
        LogosToken::Amp => Token::Amp,
        LogosToken::Pipe => Token::Pipe,
        LogosToken::Equal => Token::Equal,
        LogosToken::Question => Token::Question,
        LogosToken::Dot => Token::Dot,
        LogosToken::Colon => Token::Colon,
        LogosToken::At => Token::At,
        LogosToken::LeftParen => Token::LeftParen,
        LogosToken::RightParen => Token::RightParen,
        LogosToken::LeftBrace => Token::LeftBrace,
        LogosToken::RightBrace => Token::RightBrace,
        LogosToken::LeftBracket => Token::LeftBracket,
        LogosToken::RightBracket => Token::RightBracket,
        LogosToken::Semicolon => Token::Semicolon,
        LogosToken::Comma => Token::Comma,
        LogosToken::Whitespace | LogosToken::LineComment | LogosToken::BlockComment => {
            unreachable!("Whitespace and comments should be skipped")
        }
        LogosToken::Backtick => unreachable!("Backtick handled separately"),
    }
}

impl LexError {
    /// Get the span of this error
    pub fn span(&self) -> &Span {
        match self {
            LexError::UnexpectedCharacter { span, .. }
            | LexError::UnterminatedString { span }
            | LexError::UnterminatedTemplate { span }
            | LexError::InvalidNumber { span, .. } => span,
        }
    }

    /// Get a description of this error
    pub fn description(&self) -> String {
        match self {
            LexError::UnexpectedCharacter { char, .. } => {
                format!("Unexpected character '{}'", char)
            }
            LexError::UnterminatedString { .. } => "Unterminated string literal".to_string(),
            LexError::UnterminatedTemplate { .. } => "Unterminated template literal".to_string(),
            LexError::InvalidNumber { text, .. } => format!("Invalid number '{}'", text),
        }
    }

    /// Get a hint for fixing this error
    pub fn hint(&self) -> Option<String> {
        match self {
            LexError::UnterminatedString { .. } => {
                Some("Add a closing quote to terminate the string".to_string())
            }
            LexError::UnterminatedTemplate { .. } => {
                Some("Add a closing backtick (`) to terminate the template literal".to_string())
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}:{}",
            self.description(),
            self.span().line,
            self.span().column
        )
    }
}

impl std::error::Error for LexError {}
