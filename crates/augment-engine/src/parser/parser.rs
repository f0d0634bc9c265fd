//! Recursive descent parser.
//!
//! Transforms the token stream from the lexer into an AST [`Module`].
//! Errors are accumulated: after a failed statement the parser resynchronizes
//! at the next statement boundary and keeps going.

pub mod error;
pub mod expr;
pub mod guards;
pub mod precedence;
pub mod recovery;
pub mod stmt;
pub mod types;

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer};
use crate::parser::token::{Span, Token};

pub use error::{ParseError, ParseErrorKind};

/// Parser state.
pub struct Parser {
    /// Pre-tokenized input, always terminated by `Token::Eof`
    tokens: Vec<(Token, Span)>,

    /// Current position in token stream
    pos: usize,

    /// Accumulated parse errors (allows continuing after errors)
    errors: Vec<ParseError>,

    /// Current recursion depth (see `guards::MAX_PARSE_DEPTH`)
    pub(crate) depth: usize,
}

impl Parser {
    /// Create a new parser from source code.
    pub fn new(source: &str) -> Result<Self, Vec<LexError>> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Self::from_tokens(tokens))
    }

    /// Create a parser over already-lexed tokens (e.g. a template interpolation).
    pub fn from_tokens(mut tokens: Vec<(Token, Span)>) -> Self {
        if !matches!(tokens.last(), Some((Token::Eof, _))) {
            let eof_span = match tokens.last() {
                Some((_, last)) => Span::new(last.end, last.end, last.line, last.column),
                None => Span::new(0, 0, 1, 1),
            };
            tokens.push((Token::Eof, eof_span));
        }

        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
            depth: 0,
        }
    }

    /// Parse the entire source file into a Module AST.
    ///
    /// Returns the Module on success, or all accumulated errors on failure.
    pub fn parse(mut self) -> Result<Module, Vec<ParseError>> {
        let start_span = self.current_span();
        let mut statements = Vec::new();
        let mut guard = guards::LoopGuard::new("module_statements");

        while !self.at_eof() {
            if let Err(err) = guard.check() {
                self.errors.push(err);
                break;
            }
            let before = self.pos;
            match stmt::parse_statement(&mut self) {
                Ok(stmt) => statements.push(stmt),
                Err(err) => {
                    self.errors.push(err);
                    recovery::sync_to_statement_boundary(&mut self);
                    // A stray `}` at top level stops the sync without consuming anything.
                    if self.pos == before {
                        self.advance();
                    }
                }
            }
        }

        let span = match statements.last() {
            Some(last) => self.combine_spans(&start_span, last.span()),
            None => start_span,
        };

        if !self.errors.is_empty() {
            return Err(self.errors);
        }

        Ok(Module { statements, span })
    }

    /// Parse a single expression spanning all tokens.
    pub fn parse_standalone_expression(mut self) -> Result<Expression, ParseError> {
        let expression = expr::parse_expression(&mut self)?;
        if !self.at_eof() {
            return Err(self.unexpected_token(&[Token::Eof]));
        }
        Ok(expression)
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// Get the current token.
    #[inline]
    pub fn current(&self) -> &Token {
        &self.tokens[self.pos].0
    }

    /// Get the current token's span.
    #[inline]
    pub fn current_span(&self) -> Span {
        self.tokens[self.pos].1
    }

    /// Peek at the next token (lookahead).
    #[inline]
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos + 1).map(|(tok, _)| tok)
    }

    /// Span of the most recently consumed token.
    pub fn previous_span(&self) -> Span {
        if self.pos == 0 {
            self.current_span()
        } else {
            self.tokens[self.pos - 1].1
        }
    }

    /// Advance to the next token, returning the previous current token.
    pub fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].0.clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    /// Check if the current token matches the given kind.
    #[inline]
    pub fn check(&self, expected: &Token) -> bool {
        std::mem::discriminant(self.current()) == std::mem::discriminant(expected)
    }

    /// Check if the current token matches any of the given kinds.
    pub fn check_any(&self, expected: &[Token]) -> bool {
        expected.iter().any(|tok| self.check(tok))
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, expected: &Token) -> bool {
        if self.check(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Check if we've reached EOF.
    #[inline]
    pub fn at_eof(&self) -> bool {
        matches!(self.current(), Token::Eof)
    }

    /// Consume the current token if it matches the expected kind.
    pub fn expect(&mut self, expected: Token) -> Result<Token, ParseError> {
        if self.check(&expected) {
            Ok(self.advance())
        } else {
            Err(self.unexpected_token(&[expected]))
        }
    }

    /// Consume an identifier and return it.
    pub fn expect_identifier(&mut self) -> Result<Identifier, ParseError> {
        if let Token::Identifier(name) = self.current() {
            let ident = Identifier::new(name.clone(), self.current_span());
            self.advance();
            Ok(ident)
        } else {
            Err(self.unexpected_token(&[Token::Identifier(String::new())]))
        }
    }

    /// Consume an identifier or keyword used as a property/member name.
    pub fn expect_property_name(&mut self) -> Result<Identifier, ParseError> {
        match self.current().property_name() {
            Some(name) => {
                let ident = Identifier::new(name, self.current_span());
                self.advance();
                Ok(ident)
            }
            None => Err(self.unexpected_token(&[Token::Identifier(String::new())])),
        }
    }

    // ========================================================================
    // Error Handling
    // ========================================================================

    /// Create an "unexpected token" error at the current position.
    pub(crate) fn unexpected_token(&self, expected: &[Token]) -> ParseError {
        let span = self.current_span();
        if self.at_eof() {
            ParseError::unexpected_eof(expected.to_vec(), span)
        } else {
            ParseError::unexpected_token(expected.to_vec(), self.current().clone(), span)
        }
    }

    // ========================================================================
    // Utilities
    // ========================================================================

    /// Combine two spans into a single span.
    pub fn combine_spans(&self, start: &Span, end: &Span) -> Span {
        Span {
            start: start.start,
            end: end.end,
            line: start.line,
            column: start.column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_new() {
        let parser = Parser::new("let x = 42;").unwrap();
        assert!(matches!(parser.current(), Token::Let));
    }

    #[test]
    fn test_parser_advance() {
        let mut parser = Parser::new("let x").unwrap();
        let tok = parser.advance();
        assert!(matches!(tok, Token::Let));
        assert!(matches!(parser.current(), Token::Identifier(_)));
    }

    #[test]
    fn test_parser_at_eof() {
        let parser = Parser::new("").unwrap();
        assert!(parser.at_eof());
    }

    #[test]
    fn test_parser_peek() {
        let parser = Parser::new("let x").unwrap();
        assert!(matches!(parser.peek(), Some(Token::Identifier(_))));
    }

    #[test]
    fn test_errors_are_accumulated() {
        let errors = Parser::new("let = 1;\nlet y = ;\nlet ok = 2;")
            .unwrap()
            .parse()
            .unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_stray_closing_brace_does_not_hang() {
        let errors = Parser::new("}}").unwrap().parse().unwrap_err();
        assert!(!errors.is_empty());
    }
}
