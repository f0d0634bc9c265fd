//! Expression parsing (precedence climbing)

use super::guards::{with_depth, LoopGuard};
use super::precedence::{get_precedence, infix_operator, InfixOperator, Precedence};
use super::{ParseError, Parser};
use crate::parser::ast::*;
use crate::parser::token::{TemplatePart, Token};

/// Parse an expression.
pub fn parse_expression(parser: &mut Parser) -> Result<Expression, ParseError> {
    with_depth(parser, "expression", parse_assignment)
}

/// Assignment is right-associative and binds loosest.
fn parse_assignment(parser: &mut Parser) -> Result<Expression, ParseError> {
    let target = parse_conditional(parser)?;

    if !parser.check(&Token::Equal) {
        return Ok(target);
    }

    if !matches!(target, Expression::Identifier(_) | Expression::Member(_)) {
        return Err(ParseError::invalid_syntax(
            "invalid assignment target",
            *target.span(),
        ));
    }

    parser.advance();
    let value = parse_expression(parser)?;
    let span = parser.combine_spans(target.span(), value.span());

    Ok(Expression::Assignment(AssignmentExpression {
        target: Box::new(target),
        value: Box::new(value),
        span,
    }))
}

fn parse_conditional(parser: &mut Parser) -> Result<Expression, ParseError> {
    let test = parse_binary(parser, Precedence::NullCoalescing)?;

    if !parser.eat(&Token::Question) {
        return Ok(test);
    }

    let consequent = parse_expression(parser)?;
    parser.expect(Token::Colon)?;
    let alternate = parse_expression(parser)?;
    let span = parser.combine_spans(test.span(), alternate.span());

    Ok(Expression::Conditional(ConditionalExpression {
        test: Box::new(test),
        consequent: Box::new(consequent),
        alternate: Box::new(alternate),
        span,
    }))
}

/// Parse binary and logical operators binding at least as tight as `min`.
fn parse_binary(parser: &mut Parser, min: Precedence) -> Result<Expression, ParseError> {
    let mut left = parse_unary(parser)?;
    let mut guard = LoopGuard::new("binary_expression");

    loop {
        guard.check()?;
        let Some(op) = infix_operator(parser.current()) else {
            break;
        };
        let precedence = get_precedence(parser.current());
        if precedence < min {
            break;
        }
        parser.advance();

        let right = parse_binary(parser, precedence.next())?;
        let span = parser.combine_spans(left.span(), right.span());

        left = match op {
            InfixOperator::Binary(operator) => Expression::Binary(BinaryExpression {
                operator,
                left: Box::new(left),
                right: Box::new(right),
                span,
            }),
            InfixOperator::Logical(operator) => Expression::Logical(LogicalExpression {
                operator,
                left: Box::new(left),
                right: Box::new(right),
                span,
            }),
        };
    }

    Ok(left)
}

fn parse_unary(parser: &mut Parser) -> Result<Expression, ParseError> {
    let operator = match parser.current() {
        Token::Bang => UnaryOperator::Not,
        Token::Minus => UnaryOperator::Minus,
        Token::Plus => UnaryOperator::Plus,
        Token::Typeof => UnaryOperator::Typeof,
        _ => return parse_call_member(parser),
    };

    let start_span = parser.current_span();
    parser.advance();
    let operand = with_depth(parser, "unary", parse_unary)?;
    let span = parser.combine_spans(&start_span, operand.span());

    Ok(Expression::Unary(UnaryExpression {
        operator,
        operand: Box::new(operand),
        span,
    }))
}

/// Parse a primary expression followed by `.name` and `(args)` suffixes.
fn parse_call_member(parser: &mut Parser) -> Result<Expression, ParseError> {
    let mut expression = parse_primary(parser)?;
    let mut guard = LoopGuard::new("call_member_chain");

    loop {
        guard.check()?;
        if parser.eat(&Token::Dot) {
            let property = parser.expect_property_name()?;
            let span = parser.combine_spans(expression.span(), &property.span);
            expression = Expression::Member(MemberExpression {
                object: Box::new(expression),
                property,
                span,
            });
        } else if parser.check(&Token::LeftParen) {
            let arguments = parse_arguments(parser)?;
            let span = parser.combine_spans(expression.span(), &parser.previous_span());
            expression = Expression::Call(CallExpression {
                callee: Box::new(expression),
                arguments,
                span,
            });
        } else {
            break;
        }
    }

    Ok(expression)
}

/// Parse `(a, b, c)`.
pub(super) fn parse_arguments(parser: &mut Parser) -> Result<Vec<Expression>, ParseError> {
    parser.expect(Token::LeftParen)?;
    let mut arguments = Vec::new();
    let mut guard = LoopGuard::new("arguments");

    while !parser.check(&Token::RightParen) {
        guard.check()?;
        arguments.push(parse_expression(parser)?);
        if !parser.eat(&Token::Comma) {
            break;
        }
    }

    parser.expect(Token::RightParen)?;
    Ok(arguments)
}

/// Parse a primary expression.
pub fn parse_primary(parser: &mut Parser) -> Result<Expression, ParseError> {
    let span = parser.current_span();

    let expression = match parser.current() {
        Token::NumberLiteral(value) => {
            let value = *value;
            parser.advance();
            Expression::NumberLiteral(NumberLiteral { value, span })
        }
        Token::StringLiteral(value) => {
            let value = value.clone();
            parser.advance();
            Expression::StringLiteral(StringLiteral { value, span })
        }
        Token::TemplateLiteral(parts) => {
            let parts = parts.clone();
            parser.advance();
            parse_template(parts, span)?
        }
        Token::True | Token::False => {
            let value = matches!(parser.advance(), Token::True);
            Expression::BooleanLiteral(BooleanLiteral { value, span })
        }
        Token::Null => {
            parser.advance();
            Expression::NullLiteral(span)
        }
        Token::This => {
            parser.advance();
            Expression::This(span)
        }
        Token::Identifier(_) => Expression::Identifier(parser.expect_identifier()?),
        Token::LeftParen => {
            parser.advance();
            let inner = parse_expression(parser)?;
            let end_span = parser.current_span();
            parser.expect(Token::RightParen)?;
            Expression::Parenthesized(ParenthesizedExpression {
                expression: Box::new(inner),
                span: parser.combine_spans(&span, &end_span),
            })
        }
        Token::New => parse_new(parser)?,
        _ => {
            return Err(ParseError::invalid_syntax(
                format!("expected expression, found '{}'", parser.current()),
                span,
            ))
        }
    };

    Ok(expression)
}

/// Parse `new Callee.path(args)`; arguments are optional.
fn parse_new(parser: &mut Parser) -> Result<Expression, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::New)?;

    let mut callee = Expression::Identifier(parser.expect_identifier()?);
    while parser.eat(&Token::Dot) {
        let property = parser.expect_property_name()?;
        let span = parser.combine_spans(callee.span(), &property.span);
        callee = Expression::Member(MemberExpression {
            object: Box::new(callee),
            property,
            span,
        });
    }

    let arguments = if parser.check(&Token::LeftParen) {
        parse_arguments(parser)?
    } else {
        Vec::new()
    };

    let span = parser.combine_spans(&start_span, &parser.previous_span());
    Ok(Expression::New(NewExpression {
        callee: Box::new(callee),
        arguments,
        span,
    }))
}

/// Convert lexed template parts into an expression, parsing each interpolation.
fn parse_template(
    parts: Vec<TemplatePart>,
    span: crate::parser::token::Span,
) -> Result<Expression, ParseError> {
    let mut elements = Vec::with_capacity(parts.len());

    for part in parts {
        match part {
            TemplatePart::String(text) => elements.push(TemplateElement::String(text)),
            TemplatePart::Expression(tokens) => {
                if tokens.is_empty() {
                    return Err(ParseError::invalid_syntax(
                        "empty template interpolation",
                        span,
                    ));
                }
                let expression = Parser::from_tokens(tokens).parse_standalone_expression()?;
                elements.push(TemplateElement::Expression(Box::new(expression)));
            }
        }
    }

    Ok(Expression::TemplateLiteral(TemplateLiteral {
        parts: elements,
        span,
    }))
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::Parser;

    fn parse_expr(source: &str) -> Expression {
        Parser::new(source)
            .unwrap()
            .parse_standalone_expression()
            .unwrap()
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        match parse_expr("hash * 31 + 1") {
            Expression::Binary(bin) => {
                assert_eq!(bin.operator, BinaryOperator::Add);
                assert!(matches!(
                    *bin.left,
                    Expression::Binary(BinaryExpression {
                        operator: BinaryOperator::Multiply,
                        ..
                    })
                ));
            }
            other => panic!("Expected binary, got {:?}", other),
        }
    }

    #[test]
    fn test_left_associative_subtraction() {
        match parse_expr("a - b - c") {
            Expression::Binary(bin) => {
                assert!(matches!(*bin.right, Expression::Identifier(_)));
                assert!(matches!(*bin.left, Expression::Binary(_)));
            }
            other => panic!("Expected binary, got {:?}", other),
        }
    }

    #[test]
    fn test_logical_and_equality() {
        match parse_expr("this.a === other.a && this.b === other.b") {
            Expression::Logical(log) => {
                assert_eq!(log.operator, LogicalOperator::And);
                assert!(matches!(*log.left, Expression::Binary(_)));
            }
            other => panic!("Expected logical, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_conditional() {
        match parse_expr(r#"x == null ? 0 : typeof x === "number" ? x : String(x).length"#) {
            Expression::Conditional(cond) => {
                assert!(matches!(*cond.alternate, Expression::Conditional(_)));
                assert!(matches!(*cond.test, Expression::Binary(_)));
            }
            other => panic!("Expected conditional, got {:?}", other),
        }
    }

    #[test]
    fn test_unary_instanceof() {
        match parse_expr("!(other instanceof Point)") {
            Expression::Unary(u) => {
                assert_eq!(u.operator, UnaryOperator::Not);
                assert!(matches!(*u.operand, Expression::Parenthesized(_)));
            }
            other => panic!("Expected unary, got {:?}", other),
        }
    }

    #[test]
    fn test_assignment_is_right_associative() {
        match parse_expr("a = b = 1") {
            Expression::Assignment(a) => {
                assert!(matches!(*a.value, Expression::Assignment(_)));
            }
            other => panic!("Expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_assignment_target() {
        let err = Parser::new("1 = 2")
            .unwrap()
            .parse_standalone_expression()
            .unwrap_err();
        assert!(err.message.contains("invalid assignment target"));
    }

    #[test]
    fn test_new_and_calls() {
        match parse_expr("new Point(1, 2).equals(p)") {
            Expression::Call(call) => match *call.callee {
                Expression::Member(ref m) => {
                    assert_eq!(m.property.name, "equals");
                    assert!(matches!(*m.object, Expression::New(_)));
                }
                ref other => panic!("Expected member callee, got {:?}", other),
            },
            other => panic!("Expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_template_interpolation() {
        match parse_expr("`User(id=${this.id}, name=${this.name})`") {
            Expression::TemplateLiteral(t) => {
                assert_eq!(t.parts.len(), 5);
                assert!(matches!(&t.parts[1], TemplateElement::Expression(e) if matches!(**e, Expression::Member(_))));
            }
            other => panic!("Expected template, got {:?}", other),
        }
    }

    #[test]
    fn test_bitwise_or_coercion() {
        match parse_expr("hash | 0") {
            Expression::Binary(bin) => assert_eq!(bin.operator, BinaryOperator::BitwiseOr),
            other => panic!("Expected binary, got {:?}", other),
        }
    }
}
