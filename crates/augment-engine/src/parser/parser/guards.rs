//! Parser guards to prevent infinite loops and stack overflow

use super::ParseError;
use crate::parser::token::Span;

/// Maximum iterations for any parser loop
const MAX_LOOP_ITERATIONS: usize = 10_000;

/// Maximum nesting depth before rejecting parse
pub const MAX_PARSE_DEPTH: usize = 64;

/// Guard against infinite loops in parser
///
/// Tracks iteration count and returns error if exceeded.
///
/// ```ignore
/// let mut guard = LoopGuard::new("class_members");
/// while !done {
///     guard.check()?;
///     // ... parse something ...
/// }
/// ```
pub struct LoopGuard {
    name: &'static str,
    count: usize,
    max: usize,
}

impl LoopGuard {
    /// Create a new loop guard with default limit
    #[inline]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            count: 0,
            max: MAX_LOOP_ITERATIONS,
        }
    }

    /// Create a loop guard with custom limit
    #[inline]
    pub fn with_limit(name: &'static str, max: usize) -> Self {
        Self { name, count: 0, max }
    }

    /// Check iteration count, return error if exceeded
    #[inline]
    pub fn check(&mut self) -> Result<(), ParseError> {
        self.count += 1;
        if self.count > self.max {
            return Err(ParseError::parser_limit_exceeded(
                format!("Loop '{}' exceeded {} iterations", self.name, self.max),
                Span::default(),
            ));
        }
        Ok(())
    }
}

/// Run `f` one nesting level deeper, rejecting input nested past `MAX_PARSE_DEPTH`.
pub fn with_depth<T>(
    parser: &mut super::Parser,
    name: &'static str,
    f: impl FnOnce(&mut super::Parser) -> Result<T, ParseError>,
) -> Result<T, ParseError> {
    if parser.depth >= MAX_PARSE_DEPTH {
        return Err(ParseError::parser_limit_exceeded(
            format!("Maximum nesting depth ({}) exceeded in {}", MAX_PARSE_DEPTH, name),
            parser.current_span(),
        ));
    }
    parser.depth += 1;
    let result = f(parser);
    parser.depth -= 1;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    #[test]
    fn test_loop_guard_under_limit() {
        let mut guard = LoopGuard::with_limit("test", 10);
        for _ in 0..10 {
            assert!(guard.check().is_ok());
        }
    }

    #[test]
    fn test_loop_guard_exceeds_limit() {
        let mut guard = LoopGuard::with_limit("test", 10);
        for _ in 0..10 {
            let _ = guard.check();
        }
        assert!(guard.check().is_err());
    }

    #[test]
    fn test_depth_restored_after_call() {
        let mut parser = Parser::new("x").unwrap();
        let result = with_depth(&mut parser, "test", |p| Ok(p.depth));
        assert_eq!(result.unwrap(), 1);
        assert_eq!(parser.depth, 0);
    }

    #[test]
    fn test_depth_limit() {
        let mut parser = Parser::new("x").unwrap();
        parser.depth = MAX_PARSE_DEPTH;
        let result = with_depth(&mut parser, "test", |_| Ok(()));
        assert!(result.is_err());
        assert_eq!(parser.depth, MAX_PARSE_DEPTH);
    }

    #[test]
    fn test_deeply_nested_expression_is_rejected() {
        let source = format!("let x = {}1{};", "(".repeat(200), ")".repeat(200));
        let errors = Parser::new(&source).unwrap().parse().unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e.kind, super::super::ParseErrorKind::ParserLimitExceeded { .. })));
    }
}
