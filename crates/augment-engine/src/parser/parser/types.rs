//! Type annotation parsing

use super::guards::LoopGuard;
use super::{ParseError, Parser};
use crate::parser::ast::*;
use crate::parser::token::Token;

/// Parse a type annotation: `number`, `Point | null`, `string[]`, `Map<K, V>`.
pub fn parse_type_annotation(parser: &mut Parser) -> Result<TypeAnnotation, ParseError> {
    let start_span = parser.current_span();

    // Leading `|` is allowed: `| A | B`
    parser.eat(&Token::Pipe);

    let first = parse_array_type(parser)?;
    if !parser.check(&Token::Pipe) {
        return Ok(first);
    }

    let mut types = vec![first];
    let mut guard = LoopGuard::new("union_type");
    while parser.eat(&Token::Pipe) {
        guard.check()?;
        types.push(parse_array_type(parser)?);
    }

    let span = parser.combine_spans(&start_span, &parser.previous_span());
    Ok(TypeAnnotation::new(Type::Union(UnionType { types }), span))
}

/// Parse a primary type followed by any number of `[]` suffixes.
fn parse_array_type(parser: &mut Parser) -> Result<TypeAnnotation, ParseError> {
    let start_span = parser.current_span();
    let mut ty = parse_primary_type(parser)?;

    while parser.check(&Token::LeftBracket) && matches!(parser.peek(), Some(Token::RightBracket)) {
        parser.advance();
        parser.advance();
        let span = parser.combine_spans(&start_span, &parser.previous_span());
        ty = TypeAnnotation::new(
            Type::Array(ArrayType {
                element_type: Box::new(ty),
            }),
            span,
        );
    }

    Ok(ty)
}

fn parse_primary_type(parser: &mut Parser) -> Result<TypeAnnotation, ParseError> {
    let span = parser.current_span();

    match parser.current() {
        Token::Null => {
            parser.advance();
            Ok(TypeAnnotation::new(Type::Primitive(PrimitiveType::Null), span))
        }
        Token::Void => {
            parser.advance();
            Ok(TypeAnnotation::new(Type::Primitive(PrimitiveType::Void), span))
        }
        Token::LeftParen => {
            parser.advance();
            let inner = parse_type_annotation(parser)?;
            parser.expect(Token::RightParen)?;
            Ok(inner)
        }
        Token::Identifier(_) => {
            let name = parser.expect_identifier()?;
            if let Some(primitive) = PrimitiveType::from_name(name.as_str()) {
                return Ok(TypeAnnotation::new(Type::Primitive(primitive), span));
            }

            let type_args = if parser.eat(&Token::Less) {
                let mut args = Vec::new();
                let mut guard = LoopGuard::new("type_arguments");
                loop {
                    guard.check()?;
                    args.push(parse_type_annotation(parser)?);
                    if !parser.eat(&Token::Comma) {
                        break;
                    }
                }
                parser.expect(Token::Greater)?;
                Some(args)
            } else {
                None
            };

            let span = parser.combine_spans(&span, &parser.previous_span());
            Ok(TypeAnnotation::new(
                Type::Reference(TypeReference { name, type_args }),
                span,
            ))
        }
        _ => Err(ParseError::invalid_syntax(
            format!("expected type, found '{}'", parser.current()),
            span,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_type(source: &str) -> Type {
        let mut parser = Parser::new(source).unwrap();
        parse_type_annotation(&mut parser).unwrap().ty
    }

    #[test]
    fn test_primitive() {
        assert_eq!(parse_type("number"), Type::Primitive(PrimitiveType::Number));
        assert_eq!(parse_type("undefined"), Type::Primitive(PrimitiveType::Undefined));
    }

    #[test]
    fn test_nullable_reference_union() {
        match parse_type("Point | null") {
            Type::Union(u) => {
                assert_eq!(u.types.len(), 2);
                assert!(matches!(u.types[0].ty, Type::Reference(_)));
                assert_eq!(u.types[1].ty, Type::Primitive(PrimitiveType::Null));
            }
            other => panic!("Expected union, got {:?}", other),
        }
    }

    #[test]
    fn test_generic_array() {
        match parse_type("Map<string, number[]>[]") {
            Type::Array(arr) => match &arr.element_type.ty {
                Type::Reference(r) => {
                    assert_eq!(r.name.as_str(), "Map");
                    let args = r.type_args.as_ref().unwrap();
                    assert!(matches!(args[1].ty, Type::Array(_)));
                }
                other => panic!("Expected reference, got {:?}", other),
            },
            other => panic!("Expected array, got {:?}", other),
        }
    }
}
