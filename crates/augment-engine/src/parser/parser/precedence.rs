//! Operator precedence table for expression parsing and printing.
//!
//! Follows JavaScript/TypeScript precedence rules for the supported operators.

use crate::parser::ast::{BinaryOperator, LogicalOperator};
use crate::parser::token::Token;

/// Operator precedence level (higher = tighter binding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    None = 0,
    Assignment = 1,      // =
    Conditional = 2,     // ?:
    NullCoalescing = 3,  // ??
    LogicalOr = 4,       // ||
    LogicalAnd = 5,      // &&
    BitwiseOr = 6,       // |
    BitwiseAnd = 8,      // &
    Equality = 9,        // ==, !=, ===, !==
    Relational = 10,     // <, >, <=, >=, instanceof
    Additive = 12,       // +, -
    Multiplicative = 13, // *, /, %
    Unary = 15,          // !, +, -, typeof
    Call = 17,           // (), .
    Primary = 19,        // Literals, identifiers, ()
}

impl Precedence {
    /// The next-tighter level, used for left-associative operands.
    pub fn next(self) -> Precedence {
        match self {
            Precedence::None => Precedence::Assignment,
            Precedence::Assignment => Precedence::Conditional,
            Precedence::Conditional => Precedence::NullCoalescing,
            Precedence::NullCoalescing => Precedence::LogicalOr,
            Precedence::LogicalOr => Precedence::LogicalAnd,
            Precedence::LogicalAnd => Precedence::BitwiseOr,
            Precedence::BitwiseOr => Precedence::BitwiseAnd,
            Precedence::BitwiseAnd => Precedence::Equality,
            Precedence::Equality => Precedence::Relational,
            Precedence::Relational => Precedence::Additive,
            Precedence::Additive => Precedence::Multiplicative,
            Precedence::Multiplicative => Precedence::Unary,
            Precedence::Unary => Precedence::Call,
            Precedence::Call | Precedence::Primary => Precedence::Primary,
        }
    }
}

/// Operator produced by a binary-position token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOperator {
    Binary(BinaryOperator),
    Logical(LogicalOperator),
}

/// Get the precedence of a binary operator token.
pub fn get_precedence(token: &Token) -> Precedence {
    match token {
        Token::Equal => Precedence::Assignment,
        Token::Question => Precedence::Conditional,
        Token::QuestionQuestion => Precedence::NullCoalescing,
        Token::PipePipe => Precedence::LogicalOr,
        Token::AmpAmp => Precedence::LogicalAnd,
        Token::Pipe => Precedence::BitwiseOr,
        Token::Amp => Precedence::BitwiseAnd,
        Token::EqualEqual | Token::BangEqual | Token::EqualEqualEqual | Token::BangEqualEqual => {
            Precedence::Equality
        }
        Token::Less
        | Token::LessEqual
        | Token::Greater
        | Token::GreaterEqual
        | Token::Instanceof => Precedence::Relational,
        Token::Plus | Token::Minus => Precedence::Additive,
        Token::Star | Token::Slash | Token::Percent => Precedence::Multiplicative,
        Token::LeftParen | Token::Dot => Precedence::Call,
        _ => Precedence::None,
    }
}

/// Map a token to the infix operator it denotes, if any.
pub fn infix_operator(token: &Token) -> Option<InfixOperator> {
    use BinaryOperator as B;
    let op = match token {
        Token::QuestionQuestion => InfixOperator::Logical(LogicalOperator::NullishCoalescing),
        Token::PipePipe => InfixOperator::Logical(LogicalOperator::Or),
        Token::AmpAmp => InfixOperator::Logical(LogicalOperator::And),
        Token::Pipe => InfixOperator::Binary(B::BitwiseOr),
        Token::Amp => InfixOperator::Binary(B::BitwiseAnd),
        Token::EqualEqual => InfixOperator::Binary(B::Equal),
        Token::BangEqual => InfixOperator::Binary(B::NotEqual),
        Token::EqualEqualEqual => InfixOperator::Binary(B::StrictEqual),
        Token::BangEqualEqual => InfixOperator::Binary(B::StrictNotEqual),
        Token::Less => InfixOperator::Binary(B::LessThan),
        Token::LessEqual => InfixOperator::Binary(B::LessEqual),
        Token::Greater => InfixOperator::Binary(B::GreaterThan),
        Token::GreaterEqual => InfixOperator::Binary(B::GreaterEqual),
        Token::Instanceof => InfixOperator::Binary(B::Instanceof),
        Token::Plus => InfixOperator::Binary(B::Add),
        Token::Minus => InfixOperator::Binary(B::Subtract),
        Token::Star => InfixOperator::Binary(B::Multiply),
        Token::Slash => InfixOperator::Binary(B::Divide),
        Token::Percent => InfixOperator::Binary(B::Modulo),
        _ => return None,
    };
    Some(op)
}

/// Precedence of a binary operator node.
pub fn binary_precedence(op: BinaryOperator) -> Precedence {
    use BinaryOperator as B;
    match op {
        B::BitwiseOr => Precedence::BitwiseOr,
        B::BitwiseAnd => Precedence::BitwiseAnd,
        B::Equal | B::NotEqual | B::StrictEqual | B::StrictNotEqual => Precedence::Equality,
        B::LessThan | B::GreaterThan | B::LessEqual | B::GreaterEqual | B::Instanceof => {
            Precedence::Relational
        }
        B::Add | B::Subtract => Precedence::Additive,
        B::Multiply | B::Divide | B::Modulo => Precedence::Multiplicative,
    }
}

/// Precedence of a logical operator node.
pub fn logical_precedence(op: LogicalOperator) -> Precedence {
    match op {
        LogicalOperator::NullishCoalescing => Precedence::NullCoalescing,
        LogicalOperator::Or => Precedence::LogicalOr,
        LogicalOperator::And => Precedence::LogicalAnd,
    }
}
