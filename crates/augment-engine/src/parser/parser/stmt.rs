//! Statement parsing

use super::guards::{with_depth, LoopGuard};
use super::{expr, types, ParseError, Parser};
use crate::parser::ast::*;
use crate::parser::token::{Span, Token};

/// Parse a statement.
pub fn parse_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    with_depth(parser, "statement", parse_statement_inner)
}

fn parse_statement_inner(parser: &mut Parser) -> Result<Statement, ParseError> {
    match parser.current() {
        Token::Let | Token::Const => parse_variable_declaration(parser),
        Token::Class | Token::At | Token::Export => parse_class_declaration(parser),
        Token::Import => parse_import_declaration(parser),
        Token::If => parse_if_statement(parser),
        Token::Return => parse_return_statement(parser),
        Token::Throw => parse_throw_statement(parser),
        Token::LeftBrace => {
            parser.advance();
            Ok(Statement::Block(parse_block_statement(parser)?))
        }
        Token::Semicolon => {
            let span = parser.current_span();
            parser.advance();
            Ok(Statement::Empty(span))
        }
        _ => {
            let start_span = parser.current_span();
            let expression = expr::parse_expression(parser)?;
            parser.eat(&Token::Semicolon);
            let span = parser.combine_spans(&start_span, &parser.previous_span());
            Ok(Statement::Expression(ExpressionStatement { expression, span }))
        }
    }
}

// ============================================================================
// Variable Declarations
// ============================================================================

/// Parse variable declaration: `let x = 1;` or `const y: number = 2;`
fn parse_variable_declaration(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();
    let kind = match parser.advance() {
        Token::Const => VariableKind::Const,
        _ => VariableKind::Let,
    };

    let name = parser.expect_identifier()?;

    let type_annotation = if parser.eat(&Token::Colon) {
        Some(types::parse_type_annotation(parser)?)
    } else {
        None
    };

    let initializer = if parser.eat(&Token::Equal) {
        Some(expr::parse_expression(parser)?)
    } else {
        None
    };

    if kind == VariableKind::Const && initializer.is_none() {
        return Err(ParseError::invalid_syntax(
            format!("const declaration '{}' must be initialized", name.name),
            name.span,
        ));
    }

    parser.eat(&Token::Semicolon);
    let span = parser.combine_spans(&start_span, &parser.previous_span());

    Ok(Statement::VariableDecl(VariableDecl {
        kind,
        name,
        type_annotation,
        initializer,
        span,
    }))
}

// ============================================================================
// Blocks and Control Flow
// ============================================================================

/// Parse the statements of a block whose `{` has been consumed.
pub(super) fn parse_block_statement(parser: &mut Parser) -> Result<BlockStatement, ParseError> {
    let start_span = parser.previous_span();
    let mut statements = Vec::new();
    let mut guard = LoopGuard::new("block_statements");

    while !parser.check(&Token::RightBrace) && !parser.at_eof() {
        guard.check()?;
        statements.push(parse_statement(parser)?);
    }

    let end_span = parser.current_span();
    parser.expect(Token::RightBrace)?;
    let span = parser.combine_spans(&start_span, &end_span);

    Ok(BlockStatement { statements, span })
}

/// Parse `{ ... }` including the opening brace.
fn parse_braced_block(parser: &mut Parser) -> Result<BlockStatement, ParseError> {
    parser.expect(Token::LeftBrace)?;
    parse_block_statement(parser)
}

/// Parse a block or a single statement for use as a control flow body.
fn parse_block_or_statement(parser: &mut Parser) -> Result<Box<Statement>, ParseError> {
    if parser.eat(&Token::LeftBrace) {
        Ok(Box::new(Statement::Block(parse_block_statement(parser)?)))
    } else {
        Ok(Box::new(parse_statement(parser)?))
    }
}

fn parse_if_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::If)?;

    parser.expect(Token::LeftParen)?;
    let condition = expr::parse_expression(parser)?;
    parser.expect(Token::RightParen)?;

    let then_branch = parse_block_or_statement(parser)?;

    let else_branch = if parser.eat(&Token::Else) {
        if parser.check(&Token::If) {
            Some(Box::new(parse_if_statement(parser)?))
        } else {
            Some(parse_block_or_statement(parser)?)
        }
    } else {
        None
    };

    let end = match &else_branch {
        Some(else_b) => *else_b.span(),
        None => *then_branch.span(),
    };
    let span = parser.combine_spans(&start_span, &end);

    Ok(Statement::If(IfStatement {
        condition,
        then_branch,
        else_branch,
        span,
    }))
}

fn parse_return_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::Return)?;

    let value = if parser.check_any(&[Token::Semicolon, Token::RightBrace, Token::Eof]) {
        None
    } else {
        Some(expr::parse_expression(parser)?)
    };

    parser.eat(&Token::Semicolon);
    let span = parser.combine_spans(&start_span, &parser.previous_span());
    Ok(Statement::Return(ReturnStatement { value, span }))
}

fn parse_throw_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::Throw)?;
    let value = expr::parse_expression(parser)?;
    parser.eat(&Token::Semicolon);
    let span = parser.combine_spans(&start_span, &parser.previous_span());
    Ok(Statement::Throw(ThrowStatement { value, span }))
}

// ============================================================================
// Imports
// ============================================================================

/// Parse `import { a, b } from "m";` or `import "m";`
fn parse_import_declaration(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::Import)?;

    let mut specifiers = Vec::new();
    if parser.eat(&Token::LeftBrace) {
        let mut guard = LoopGuard::new("import_specifiers");
        while !parser.check(&Token::RightBrace) {
            guard.check()?;
            specifiers.push(parser.expect_identifier()?);
            if !parser.eat(&Token::Comma) {
                break;
            }
        }
        parser.expect(Token::RightBrace)?;
        parser.expect(Token::From)?;
    }

    let source = match parser.current() {
        Token::StringLiteral(s) => s.clone(),
        _ => return Err(parser.unexpected_token(&[Token::StringLiteral(String::new())])),
    };
    parser.advance();
    parser.eat(&Token::Semicolon);

    let span = parser.combine_spans(&start_span, &parser.previous_span());
    Ok(Statement::ImportDecl(ImportDecl {
        specifiers,
        source,
        span,
    }))
}

// ============================================================================
// Classes
// ============================================================================

/// Parse a class declaration with its decorators and export modifiers.
///
/// Decorators may appear before or after `export`.
fn parse_class_declaration(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();

    let mut decorators = parse_decorators(parser)?;

    let export = if parser.eat(&Token::Export) {
        if parser.eat(&Token::Default) {
            ExportKind::Default
        } else {
            ExportKind::Named
        }
    } else {
        ExportKind::None
    };

    decorators.extend(parse_decorators(parser)?);

    let class_span = parser.current_span();
    parser.expect(Token::Class)?;

    let name = if matches!(parser.current(), Token::Identifier(_)) {
        Some(parser.expect_identifier()?)
    } else if export == ExportKind::Default {
        None
    } else {
        return Err(
            ParseError::invalid_syntax("class declaration requires a name", class_span)
                .with_suggestion("Name the class or declare it with `export default`"),
        );
    };

    let extends = if parser.eat(&Token::Extends) {
        Some(parser.expect_identifier()?)
    } else {
        None
    };

    parser.expect(Token::LeftBrace)?;
    let members = parse_class_members(parser)?;
    let end_span = parser.current_span();
    parser.expect(Token::RightBrace)?;

    let span = parser.combine_spans(&start_span, &end_span);

    Ok(Statement::ClassDecl(ClassDecl {
        decorators,
        export,
        name,
        extends,
        members,
        span,
    }))
}

/// Parse class members (fields, methods, constructor)
fn parse_class_members(parser: &mut Parser) -> Result<Vec<ClassMember>, ParseError> {
    let mut members = Vec::new();
    let mut guard = LoopGuard::new("class_members");

    while !parser.check(&Token::RightBrace) && !parser.at_eof() {
        guard.check()?;
        // Stray semicolons between members are allowed.
        if parser.eat(&Token::Semicolon) {
            continue;
        }
        members.push(parse_class_member(parser)?);
    }

    Ok(members)
}

/// Whether the token after a modifier keyword makes that keyword a member name.
fn modifier_used_as_name(parser: &Parser) -> bool {
    matches!(
        parser.peek(),
        Some(Token::LeftParen | Token::Colon | Token::Equal | Token::Semicolon | Token::Question)
    )
}

/// Parse a single class member
fn parse_class_member(parser: &mut Parser) -> Result<ClassMember, ParseError> {
    let start_span = parser.current_span();

    let decorators = parse_decorators(parser)?;

    let visibility = match parser.current() {
        Token::Private if !modifier_used_as_name(parser) => Some(Visibility::Private),
        Token::Protected if !modifier_used_as_name(parser) => Some(Visibility::Protected),
        Token::Public if !modifier_used_as_name(parser) => Some(Visibility::Public),
        _ => None,
    };
    if visibility.is_some() {
        parser.advance();
    }

    let is_static = parser.check(&Token::Static) && !modifier_used_as_name(parser);
    if is_static {
        parser.advance();
    }

    let is_readonly = parser.check(&Token::Readonly) && !modifier_used_as_name(parser);
    if is_readonly {
        parser.advance();
    }

    let name = parser.expect_property_name()?;

    if name.name == "constructor" && parser.check(&Token::LeftParen) {
        if !decorators.is_empty() || is_static || is_readonly {
            return Err(ParseError::invalid_syntax(
                "constructors cannot be decorated, static or readonly",
                name.span,
            ));
        }
        return parse_constructor(parser, start_span);
    }

    if parser.check(&Token::LeftParen) {
        if is_readonly {
            return Err(ParseError::invalid_syntax(
                "methods cannot be readonly",
                name.span,
            ));
        }

        let params = parse_parameters(parser)?;
        let return_type = if parser.eat(&Token::Colon) {
            Some(types::parse_type_annotation(parser)?)
        } else {
            None
        };
        let body = parse_braced_block(parser)?;
        let span = parser.combine_spans(&start_span, &body.span);

        return Ok(ClassMember::Method(MethodDecl {
            decorators,
            visibility,
            name,
            params,
            return_type,
            body,
            is_static,
            span,
        }));
    }

    let optional = parser.eat(&Token::Question);

    let type_annotation = if parser.eat(&Token::Colon) {
        Some(types::parse_type_annotation(parser)?)
    } else {
        None
    };

    let initializer = if parser.eat(&Token::Equal) {
        Some(expr::parse_expression(parser)?)
    } else {
        None
    };

    parser.eat(&Token::Semicolon);
    let span = parser.combine_spans(&start_span, &parser.previous_span());

    Ok(ClassMember::Field(FieldDecl {
        decorators,
        visibility,
        name,
        optional,
        type_annotation,
        initializer,
        is_static,
        is_readonly,
        span,
    }))
}

fn parse_constructor(parser: &mut Parser, start_span: Span) -> Result<ClassMember, ParseError> {
    let params = parse_parameters(parser)?;
    let body = parse_braced_block(parser)?;
    let span = parser.combine_spans(&start_span, &body.span);

    Ok(ClassMember::Constructor(ConstructorDecl { params, body, span }))
}

/// Parse a parenthesized parameter list: `(a: number, b?: string, c = 1)`
fn parse_parameters(parser: &mut Parser) -> Result<Vec<Parameter>, ParseError> {
    parser.expect(Token::LeftParen)?;
    let mut params = Vec::new();
    let mut guard = LoopGuard::new("parameters");

    while !parser.check(&Token::RightParen) {
        guard.check()?;
        let name = parser.expect_identifier()?;
        let optional = parser.eat(&Token::Question);
        let type_annotation = if parser.eat(&Token::Colon) {
            Some(types::parse_type_annotation(parser)?)
        } else {
            None
        };
        let default_value = if parser.eat(&Token::Equal) {
            Some(expr::parse_expression(parser)?)
        } else {
            None
        };
        let span = parser.combine_spans(&name.span, &parser.previous_span());
        params.push(Parameter {
            name,
            optional,
            type_annotation,
            default_value,
            span,
        });

        if !parser.eat(&Token::Comma) {
            break;
        }
    }

    parser.expect(Token::RightParen)?;
    Ok(params)
}

// ============================================================================
// Decorator Parsing
// ============================================================================

/// Parse decorators: `@name`, `@name(args)`, `@module.name`
fn parse_decorators(parser: &mut Parser) -> Result<Vec<Decorator>, ParseError> {
    let mut decorators = Vec::new();
    let mut guard = LoopGuard::new("decorators");

    while parser.check(&Token::At) {
        guard.check()?;
        decorators.push(parse_decorator(parser)?);
    }

    Ok(decorators)
}

fn parse_decorator(parser: &mut Parser) -> Result<Decorator, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::At)?;

    let ident = parser.expect_identifier()?;
    let mut expression = Expression::Identifier(ident);

    // Member access: @module.decorator
    while parser.eat(&Token::Dot) {
        let property = parser.expect_property_name()?;
        let span = parser.combine_spans(expression.span(), &property.span);
        expression = Expression::Member(MemberExpression {
            object: Box::new(expression),
            property,
            span,
        });
    }

    // Call: @decorator(args)
    if parser.check(&Token::LeftParen) {
        let arguments = expr::parse_arguments(parser)?;
        let span = parser.combine_spans(expression.span(), &parser.previous_span());
        expression = Expression::Call(CallExpression {
            callee: Box::new(expression),
            arguments,
            span,
        });
    }

    let span = parser.combine_spans(&start_span, expression.span());
    Ok(Decorator { expression, span })
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::Parser;

    fn parse(source: &str) -> Module {
        Parser::new(source).unwrap().parse().unwrap()
    }

    fn first_class(module: &Module) -> &ClassDecl {
        match &module.statements[0] {
            Statement::ClassDecl(c) => c,
            other => panic!("Expected class declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_decorated_class_with_fields() {
        let module = parse(
            r#"
            @Value
            @ToString()
            class User {
                @NonNull id: number;
                private readonly name?: string = "x";
                static count = 0;
            }
            "#,
        );
        let class = first_class(&module);
        assert_eq!(class.name_str(), Some("User"));
        assert_eq!(class.decorators.len(), 2);
        assert_eq!(class.decorators[0].simple_name(), Some("Value"));
        assert_eq!(class.decorators[1].simple_name(), Some("ToString"));
        assert_eq!(class.members.len(), 3);

        match &class.members[1] {
            ClassMember::Field(f) => {
                assert!(f.is_private());
                assert!(f.is_readonly);
                assert!(f.optional);
                assert!(f.initializer.is_some());
            }
            other => panic!("Expected field, got {:?}", other),
        }
        assert!(class.members[2].is_static());
    }

    #[test]
    fn test_export_forms() {
        let module = parse("export class A {}\n@Data export default class {}");
        match &module.statements[0] {
            Statement::ClassDecl(c) => assert_eq!(c.export, ExportKind::Named),
            other => panic!("Expected class, got {:?}", other),
        }
        match &module.statements[1] {
            Statement::ClassDecl(c) => {
                assert_eq!(c.export, ExportKind::Default);
                assert!(c.name.is_none());
                assert_eq!(c.decorators.len(), 1);
            }
            other => panic!("Expected class, got {:?}", other),
        }
    }

    #[test]
    fn test_anonymous_class_requires_default_export() {
        let errors = Parser::new("class {}").unwrap().parse().unwrap_err();
        assert!(errors[0].message.contains("requires a name"));
    }

    #[test]
    fn test_methods_and_constructor() {
        let module = parse(
            r#"
            class Counter extends Base {
                constructor(start: number = 0) { this.value = start; }
                @Memoize
                increment(by?: number): number { return this.value; }
                static create(): Counter { return new Counter(); }
            }
            "#,
        );
        let class = first_class(&module);
        assert_eq!(class.extends.as_ref().map(|e| e.as_str()), Some("Base"));
        match &class.members[0] {
            ClassMember::Constructor(c) => {
                assert_eq!(c.params.len(), 1);
                assert!(c.params[0].default_value.is_some());
            }
            other => panic!("Expected constructor, got {:?}", other),
        }
        match &class.members[1] {
            ClassMember::Method(m) => {
                assert_eq!(m.decorators[0].simple_name(), Some("Memoize"));
                assert!(m.params[0].optional);
                assert!(m.return_type.is_some());
            }
            other => panic!("Expected method, got {:?}", other),
        }
        assert!(class.members[2].is_static());
    }

    #[test]
    fn test_member_access_decorator_has_no_simple_name() {
        let module = parse("@lib.Value class A {}");
        assert_eq!(first_class(&module).decorators[0].simple_name(), None);
    }

    #[test]
    fn test_keyword_named_field() {
        let module = parse("class A { default: number; static: boolean; }");
        let class = first_class(&module);
        assert_eq!(class.members[0].name(), "default");
        assert_eq!(class.members[1].name(), "static");
        assert!(!class.members[1].is_static());
    }

    #[test]
    fn test_import_and_control_flow() {
        let module = parse(
            r#"
            import { Value, ToString } from "augment";
            let x = 1;
            if (x > 0) { x = 2; } else x = 3;
            "#,
        );
        match &module.statements[0] {
            Statement::ImportDecl(i) => {
                assert_eq!(i.specifiers.len(), 2);
                assert_eq!(i.source, "augment");
            }
            other => panic!("Expected import, got {:?}", other),
        }
        assert!(matches!(module.statements[2], Statement::If(_)));
    }

    #[test]
    fn test_const_requires_initializer() {
        let errors = Parser::new("const x;").unwrap().parse().unwrap_err();
        assert!(errors[0].message.contains("must be initialized"));
    }
}
