//! Node factory for synthesized code.
//!
//! Every node created here carries `Span::default()`; printers and the
//! evaluator never rely on spans of generated nodes.

use super::*;
use crate::parser::token::Span;

fn span() -> Span {
    Span::default()
}

pub fn ident(name: &str) -> Identifier {
    Identifier::new(name, span())
}

// ============================================================================
// Expressions
// ============================================================================

pub fn id_expr(name: &str) -> Expression {
    Expression::Identifier(ident(name))
}

pub fn this() -> Expression {
    Expression::This(span())
}

pub fn number(value: f64) -> Expression {
    Expression::NumberLiteral(NumberLiteral {
        value,
        span: span(),
    })
}

pub fn string(value: &str) -> Expression {
    Expression::StringLiteral(StringLiteral {
        value: value.to_string(),
        span: span(),
    })
}

pub fn boolean(value: bool) -> Expression {
    Expression::BooleanLiteral(BooleanLiteral {
        value,
        span: span(),
    })
}

pub fn null() -> Expression {
    Expression::NullLiteral(span())
}

pub fn template(parts: Vec<TemplateElement>) -> Expression {
    Expression::TemplateLiteral(TemplateLiteral {
        parts,
        span: span(),
    })
}

pub fn member(object: Expression, property: &str) -> Expression {
    Expression::Member(MemberExpression {
        object: Box::new(object),
        property: ident(property),
        span: span(),
    })
}

/// `this.<property>`
pub fn this_member(property: &str) -> Expression {
    member(this(), property)
}

pub fn unary(operator: UnaryOperator, operand: Expression) -> Expression {
    Expression::Unary(UnaryExpression {
        operator,
        operand: Box::new(operand),
        span: span(),
    })
}

pub fn binary(operator: BinaryOperator, left: Expression, right: Expression) -> Expression {
    Expression::Binary(BinaryExpression {
        operator,
        left: Box::new(left),
        right: Box::new(right),
        span: span(),
    })
}

pub fn logical(operator: LogicalOperator, left: Expression, right: Expression) -> Expression {
    Expression::Logical(LogicalExpression {
        operator,
        left: Box::new(left),
        right: Box::new(right),
        span: span(),
    })
}

pub fn conditional(test: Expression, consequent: Expression, alternate: Expression) -> Expression {
    Expression::Conditional(ConditionalExpression {
        test: Box::new(test),
        consequent: Box::new(consequent),
        alternate: Box::new(alternate),
        span: span(),
    })
}

pub fn paren(expression: Expression) -> Expression {
    Expression::Parenthesized(ParenthesizedExpression {
        expression: Box::new(expression),
        span: span(),
    })
}

pub fn assign(target: Expression, value: Expression) -> Expression {
    Expression::Assignment(AssignmentExpression {
        target: Box::new(target),
        value: Box::new(value),
        span: span(),
    })
}

pub fn call(callee: Expression, arguments: Vec<Expression>) -> Expression {
    Expression::Call(CallExpression {
        callee: Box::new(callee),
        arguments,
        span: span(),
    })
}

/// `new <class_name>(args)`
pub fn new_instance(class_name: &str, arguments: Vec<Expression>) -> Expression {
    Expression::New(NewExpression {
        callee: Box::new(id_expr(class_name)),
        arguments,
        span: span(),
    })
}

// ============================================================================
// Statements
// ============================================================================

pub fn expr_stmt(expression: Expression) -> Statement {
    Statement::Expression(ExpressionStatement {
        expression,
        span: span(),
    })
}

pub fn return_stmt(value: Expression) -> Statement {
    Statement::Return(ReturnStatement {
        value: Some(value),
        span: span(),
    })
}

pub fn throw_stmt(value: Expression) -> Statement {
    Statement::Throw(ThrowStatement {
        value,
        span: span(),
    })
}

pub fn block(statements: Vec<Statement>) -> BlockStatement {
    BlockStatement {
        statements,
        span: span(),
    }
}

/// `if (condition) { ...then }`
pub fn if_block(condition: Expression, then: Vec<Statement>) -> Statement {
    Statement::If(IfStatement {
        condition,
        then_branch: Box::new(Statement::Block(block(then))),
        else_branch: None,
        span: span(),
    })
}

/// `if (condition) <then>` without braces.
pub fn if_single(condition: Expression, then: Statement) -> Statement {
    Statement::If(IfStatement {
        condition,
        then_branch: Box::new(then),
        else_branch: None,
        span: span(),
    })
}

pub fn let_decl(name: &str, initializer: Expression) -> Statement {
    Statement::VariableDecl(VariableDecl {
        kind: VariableKind::Let,
        name: ident(name),
        type_annotation: None,
        initializer: Some(initializer),
        span: span(),
    })
}

// ============================================================================
// Types
// ============================================================================

pub fn named_type(name: &str) -> TypeAnnotation {
    let ty = match PrimitiveType::from_name(name) {
        Some(primitive) => Type::Primitive(primitive),
        None => Type::Reference(TypeReference::simple(ident(name))),
    };
    TypeAnnotation::new(ty, span())
}

pub fn primitive_type(primitive: PrimitiveType) -> TypeAnnotation {
    TypeAnnotation::new(Type::Primitive(primitive), span())
}

pub fn union_type(types: Vec<TypeAnnotation>) -> TypeAnnotation {
    TypeAnnotation::new(Type::Union(UnionType { types }), span())
}

// ============================================================================
// Class members
// ============================================================================

pub fn param(name: &str, type_annotation: Option<TypeAnnotation>) -> Parameter {
    Parameter {
        name: ident(name),
        optional: false,
        type_annotation,
        default_value: None,
        span: span(),
    }
}

pub fn constructor(params: Vec<Parameter>, statements: Vec<Statement>) -> ClassMember {
    ClassMember::Constructor(ConstructorDecl {
        params,
        body: block(statements),
        span: span(),
    })
}

/// Public instance method without decorators.
pub fn method(
    name: &str,
    params: Vec<Parameter>,
    return_type: Option<TypeAnnotation>,
    statements: Vec<Statement>,
) -> MethodDecl {
    MethodDecl {
        decorators: Vec::new(),
        visibility: None,
        name: ident(name),
        params,
        return_type,
        body: block(statements),
        is_static: false,
        span: span(),
    }
}

/// Field without decorators or modifiers.
pub fn field(
    name: &str,
    type_annotation: Option<TypeAnnotation>,
    initializer: Option<Expression>,
) -> FieldDecl {
    FieldDecl {
        decorators: Vec::new(),
        visibility: None,
        name: ident(name),
        optional: false,
        type_annotation,
        initializer,
        is_static: false,
        is_readonly: false,
        span: span(),
    }
}
