//! Token definitions for the augmentation source language.
//!
//! The language is the class-oriented TypeScript subset the engine rewrites:
//! imports, class declarations with decorators, and the statements and
//! expressions that appear in method bodies.

use std::fmt;

/// A token in the source language.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Declarations
    Class,
    Let,
    Const,
    Extends,

    // Control flow
    If,
    Else,
    Return,
    Throw,

    // Modules
    Import,
    Export,
    From,
    Default,

    // OOP keywords
    New,
    This,
    Static,
    Readonly,
    Private,
    Protected,
    Public,

    // Type operators
    Typeof,
    Instanceof,
    Void,

    // Literals
    NumberLiteral(f64),
    StringLiteral(String),
    TemplateLiteral(Vec<TemplatePart>),
    True,
    False,
    Null,

    Identifier(String),

    // Operators
    EqualEqualEqual,
    BangEqualEqual,
    EqualEqual,
    BangEqual,
    LessEqual,
    GreaterEqual,
    AmpAmp,
    PipePipe,
    QuestionQuestion,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    Less,
    Greater,
    Amp,
    Pipe,
    Equal,
    Question,

    // Punctuation
    Dot,
    Colon,
    At,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Semicolon,
    Comma,

    Eof,
}

/// Part of a template literal: raw text or the tokens of an interpolation.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    String(String),
    Expression(Vec<(Token, Span)>),
}

impl Token {
    /// Source text of a keyword token, if this token is a keyword.
    ///
    /// Keywords are valid property names after `.` and as member names.
    pub fn keyword_text(&self) -> Option<&'static str> {
        let text = match self {
            Token::Class => "class",
            Token::Let => "let",
            Token::Const => "const",
            Token::Extends => "extends",
            Token::If => "if",
            Token::Else => "else",
            Token::Return => "return",
            Token::Throw => "throw",
            Token::Import => "import",
            Token::Export => "export",
            Token::From => "from",
            Token::Default => "default",
            Token::New => "new",
            Token::This => "this",
            Token::Static => "static",
            Token::Readonly => "readonly",
            Token::Private => "private",
            Token::Protected => "protected",
            Token::Public => "public",
            Token::Typeof => "typeof",
            Token::Instanceof => "instanceof",
            Token::Void => "void",
            Token::True => "true",
            Token::False => "false",
            Token::Null => "null",
            _ => return None,
        };
        Some(text)
    }

    /// Returns the name this token spells when used in a property position.
    pub fn property_name(&self) -> Option<String> {
        match self {
            Token::Identifier(name) => Some(name.clone()),
            other => other.keyword_text().map(str::to_string),
        }
    }
}

/// Source location of a token or node.
///
/// Nodes produced by the transformation carry `Span::default()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            line: self.line.min(other.line),
            column: self.column.min(other.column),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = self.keyword_text() {
            return write!(f, "{}", text);
        }
        match self {
            Token::NumberLiteral(n) => write!(f, "{}", n),
            Token::StringLiteral(s) => write!(f, "\"{}\"", s),
            Token::TemplateLiteral(_) => write!(f, "template literal"),
            Token::Identifier(name) => write!(f, "{}", name),
            Token::EqualEqualEqual => write!(f, "==="),
            Token::BangEqualEqual => write!(f, "!=="),
            Token::EqualEqual => write!(f, "=="),
            Token::BangEqual => write!(f, "!="),
            Token::LessEqual => write!(f, "<="),
            Token::GreaterEqual => write!(f, ">="),
            Token::AmpAmp => write!(f, "&&"),
            Token::PipePipe => write!(f, "||"),
            Token::QuestionQuestion => write!(f, "??"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Percent => write!(f, "%"),
            Token::Bang => write!(f, "!"),
            Token::Less => write!(f, "<"),
            Token::Greater => write!(f, ">"),
            Token::Amp => write!(f, "&"),
            Token::Pipe => write!(f, "|"),
            Token::Equal => write!(f, "="),
            Token::Question => write!(f, "?"),
            Token::Dot => write!(f, "."),
            Token::Colon => write!(f, ":"),
            Token::At => write!(f, "@"),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::LeftBrace => write!(f, "{{"),
            Token::RightBrace => write!(f, "}}"),
            Token::LeftBracket => write!(f, "["),
            Token::RightBracket => write!(f, "]"),
            Token::Semicolon => write!(f, ";"),
            Token::Comma => write!(f, ","),
            Token::Eof => write!(f, "end of file"),
            _ => write!(f, "{:?}", self),
        }
    }
}
