//! Augment Engine
//!
//! Compile-time class augmentation for a TypeScript-like source language:
//! - **Parser**: Lexer, parser, AST and printer (`parser` module)
//! - **Transform**: marker classification, transformation plans, handlers and
//!   member synthesis (`transform` module)
//! - **Interp**: a small tree-walking evaluator used to execute rewritten
//!   modules (`interp` module)
//!
//! # Example
//!
//! ```rust,ignore
//! use augment_engine::Augmenter;
//!
//! let source = r#"
//!     @Value
//!     class Point {
//!         x: number;
//!         y: number;
//!     }
//! "#;
//!
//! let augmenter = Augmenter::new();
//! let expanded = augmenter.expand_source(source).unwrap();
//! println!("{}", expanded);
//! ```

#![warn(rust_2018_idioms)]

pub mod interp;
pub mod parser;
pub mod transform;

pub use interp::{EvalError, Interpreter, Value};
pub use parser::{Lexer, LexError, ParseError, Parser, Printer, Span, Token};
pub use transform::{
    AugmentConfig, AugmentError, AugmentResult, Augmenter, ClassReport, HandlerRegistry,
};
