//! Abstract Syntax Tree (AST) for the augmentation source language.
//!
//! This module defines:
//! - Module structure
//! - Statements (imports, class declarations, control flow)
//! - Expressions (literals, operators, calls, member access)
//! - Type annotations
//!
//! Every AST node includes a `Span`. Nodes built by [`build`] carry
//! `Span::default()`.

use crate::parser::token::Span;

pub mod build;
pub mod expression;
pub mod statement;
pub mod types;
pub mod visitor;

pub use expression::*;
pub use statement::*;
pub use types::*;
pub use visitor::*;

/// Root node: one source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    /// Top-level statements
    pub statements: Vec<Statement>,

    /// Span covering the entire module
    pub span: Span,
}

impl Module {
    /// Create a new module
    pub fn new(statements: Vec<Statement>, span: Span) -> Self {
        Self { statements, span }
    }

    /// Check if the module is empty
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Get the number of top-level statements
    pub fn len(&self) -> usize {
        self.statements.len()
    }
}

/// Identifier: a name for a variable, class, member, or parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

impl Identifier {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}
