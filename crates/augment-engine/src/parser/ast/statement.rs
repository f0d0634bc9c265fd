//! Statement AST nodes
//!
//! - Import declarations
//! - Class declarations, members and decorators
//! - Variable declarations and control flow

use super::*;
use crate::parser::token::Span;

/// Top-level or block-level statement
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Import statement: `import { a, b } from "m";`
    ImportDecl(ImportDecl),

    /// Class declaration (optionally exported)
    ClassDecl(ClassDecl),

    /// Variable declaration: let/const
    VariableDecl(VariableDecl),

    /// Expression statement (e.g., function call)
    Expression(ExpressionStatement),

    /// If statement
    If(IfStatement),

    /// Return statement
    Return(ReturnStatement),

    /// Throw statement
    Throw(ThrowStatement),

    /// Block statement
    Block(BlockStatement),

    /// Empty statement (;)
    Empty(Span),
}

impl Statement {
    /// Get the span of this statement
    pub fn span(&self) -> &Span {
        match self {
            Statement::ImportDecl(s) => &s.span,
            Statement::ClassDecl(s) => &s.span,
            Statement::VariableDecl(s) => &s.span,
            Statement::Expression(s) => &s.span,
            Statement::If(s) => &s.span,
            Statement::Return(s) => &s.span,
            Statement::Throw(s) => &s.span,
            Statement::Block(s) => &s.span,
            Statement::Empty(span) => span,
        }
    }
}

// ============================================================================
// Imports
// ============================================================================

/// Named import: `import { Value, ToString } from "augment";`
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    pub specifiers: Vec<Identifier>,
    pub source: String,
    pub span: Span,
}

// ============================================================================
// Variable Declaration
// ============================================================================

/// Variable declaration: `let x = 42;` or `const y: number = 10;`
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    pub kind: VariableKind,
    pub name: Identifier,
    pub type_annotation: Option<TypeAnnotation>,
    pub initializer: Option<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Let,
    Const,
}

impl VariableKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            VariableKind::Let => "let",
            VariableKind::Const => "const",
        }
    }
}

// ============================================================================
// Classes
// ============================================================================

/// How a class declaration is exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportKind {
    #[default]
    None,
    /// `export class Foo {}`
    Named,
    /// `export default class {}`
    Default,
}

/// Class declaration
///
/// ```text
/// @Value
/// export class Point {
///     x: number;
///     y: number;
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    /// Decorators (@Value, @sealed, etc.)
    pub decorators: Vec<Decorator>,

    pub export: ExportKind,

    /// `None` only for `export default class { }`
    pub name: Option<Identifier>,
    pub extends: Option<Identifier>,
    pub members: Vec<ClassMember>,
    pub span: Span,
}

impl ClassDecl {
    /// Class name, if the class is named.
    pub fn name_str(&self) -> Option<&str> {
        self.name.as_ref().map(|n| n.as_str())
    }

    /// Whether the class declares a constructor.
    pub fn has_constructor(&self) -> bool {
        self.members
            .iter()
            .any(|m| matches!(m, ClassMember::Constructor(_)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassMember {
    Field(FieldDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
}

impl ClassMember {
    /// Member name; constructors are named `constructor`.
    pub fn name(&self) -> &str {
        match self {
            ClassMember::Field(f) => f.name.as_str(),
            ClassMember::Method(m) => m.name.as_str(),
            ClassMember::Constructor(_) => "constructor",
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            ClassMember::Field(f) => &f.span,
            ClassMember::Method(m) => &m.span,
            ClassMember::Constructor(c) => &c.span,
        }
    }

    pub fn is_static(&self) -> bool {
        match self {
            ClassMember::Field(f) => f.is_static,
            ClassMember::Method(m) => m.is_static,
            ClassMember::Constructor(_) => false,
        }
    }
}

/// Visibility modifier for class members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    Private,
    Protected,
    #[default]
    Public,
}

impl Visibility {
    pub fn keyword(&self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Protected => "protected",
            Visibility::Public => "public",
        }
    }
}

/// Field declaration: `@NonNull private readonly id?: number = 0;`
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub decorators: Vec<Decorator>,

    /// Explicit visibility modifier, `None` when omitted
    pub visibility: Option<Visibility>,

    pub name: Identifier,

    /// `name?: T`
    pub optional: bool,
    pub type_annotation: Option<TypeAnnotation>,
    pub initializer: Option<Expression>,
    pub is_static: bool,
    pub is_readonly: bool,
    pub span: Span,
}

impl FieldDecl {
    pub fn is_private(&self) -> bool {
        self.visibility == Some(Visibility::Private)
    }
}

/// Method declaration
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub decorators: Vec<Decorator>,
    pub visibility: Option<Visibility>,
    pub name: Identifier,
    pub params: Vec<Parameter>,
    pub return_type: Option<TypeAnnotation>,
    pub body: BlockStatement,
    pub is_static: bool,
    pub span: Span,
}

/// Constructor declaration
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDecl {
    pub params: Vec<Parameter>,
    pub body: BlockStatement,
    pub span: Span,
}

/// Function or constructor parameter: `name?: T = default`
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: Identifier,
    pub optional: bool,
    pub type_annotation: Option<TypeAnnotation>,
    pub default_value: Option<Expression>,
    pub span: Span,
}

/// Decorator: `@decorator` or `@decorator(arg1, arg2)`
#[derive(Debug, Clone, PartialEq)]
pub struct Decorator {
    pub expression: Expression,
    pub span: Span,
}

impl Decorator {
    /// Name of a bare `@name` or `@name(...)` decorator.
    ///
    /// Member-access decorators such as `@lib.name` have no simple name.
    pub fn simple_name(&self) -> Option<&str> {
        match &self.expression {
            Expression::Identifier(id) => Some(id.as_str()),
            Expression::Call(call) => match call.callee.as_ref() {
                Expression::Identifier(id) => Some(id.as_str()),
                _ => None,
            },
            _ => None,
        }
    }
}

// ============================================================================
// Control Flow
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_branch: Box<Statement>,
    pub else_branch: Option<Box<Statement>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub value: Option<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThrowStatement {
    pub value: Expression,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub span: Span,
}
