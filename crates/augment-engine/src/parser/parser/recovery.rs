//! Error recovery for the parser.
//!
//! After a parse error the parser skips tokens until a point where statement
//! parsing can resume, so one run reports every independent error.

use super::Parser;
use crate::parser::token::Token;

/// Synchronize to the next statement boundary.
pub fn sync_to_statement_boundary(parser: &mut Parser) {
    while !parser.at_eof() {
        match parser.current() {
            Token::Class
            | Token::Let
            | Token::Const
            | Token::If
            | Token::Return
            | Token::Throw
            | Token::Import
            | Token::Export
            | Token::At => return,

            // Semicolon marks end of previous statement
            Token::Semicolon => {
                parser.advance();
                return;
            }

            // Closing brace might end a block
            Token::RightBrace => return,

            _ => {
                parser.advance();
            }
        }
    }
}
