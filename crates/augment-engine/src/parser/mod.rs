//! Lexer, parser, AST and printer for the augmentation source language.
//!
//! # Example
//!
//! ```ignore
//! use augment_engine::parser::{Parser, Printer};
//!
//! let module = Parser::new("@ToString class Point { x: number; }")
//!     .unwrap()
//!     .parse()
//!     .unwrap();
//! println!("{}", Printer::print_module(&module));
//! ```

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod token;

// Re-exports for convenience
pub use lexer::{LexError, Lexer};
pub use parser::{ParseError, ParseErrorKind, Parser};
pub use printer::Printer;
pub use token::{Span, TemplatePart, Token};
