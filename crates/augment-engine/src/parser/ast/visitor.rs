//! Mutable AST visitor for rewriting the syntax tree in place.
//!
//! Each `visit_*` method has a default implementation that calls the matching
//! `walk_*` function, so implementors only override the nodes they care about
//! and call `walk_*` themselves to continue into children.
//!
//! # Example
//!
//! ```rust,ignore
//! use augment_engine::parser::ast::*;
//!
//! struct RenameClasses;
//!
//! impl VisitorMut for RenameClasses {
//!     fn visit_class_decl(&mut self, decl: &mut ClassDecl) {
//!         if let Some(name) = decl.name.as_mut() {
//!             name.name.push_str("Impl");
//!         }
//!         walk_class_decl(self, decl);
//!     }
//! }
//! ```

use super::*;

/// Mutable AST visitor trait
pub trait VisitorMut: Sized {
    fn visit_module(&mut self, module: &mut Module) {
        walk_module(self, module);
    }

    fn visit_statement(&mut self, stmt: &mut Statement) {
        walk_statement(self, stmt);
    }

    fn visit_class_decl(&mut self, decl: &mut ClassDecl) {
        walk_class_decl(self, decl);
    }

    fn visit_class_member(&mut self, member: &mut ClassMember) {
        walk_class_member(self, member);
    }

    fn visit_block_statement(&mut self, block: &mut BlockStatement) {
        walk_block_statement(self, block);
    }

    fn visit_expression(&mut self, expr: &mut Expression) {
        walk_expression(self, expr);
    }
}

pub fn walk_module<V: VisitorMut>(visitor: &mut V, module: &mut Module) {
    for stmt in &mut module.statements {
        visitor.visit_statement(stmt);
    }
}

pub fn walk_statement<V: VisitorMut>(visitor: &mut V, stmt: &mut Statement) {
    match stmt {
        Statement::ImportDecl(_) | Statement::Empty(_) => {}
        Statement::ClassDecl(decl) => visitor.visit_class_decl(decl),
        Statement::VariableDecl(decl) => {
            if let Some(init) = &mut decl.initializer {
                visitor.visit_expression(init);
            }
        }
        Statement::Expression(s) => visitor.visit_expression(&mut s.expression),
        Statement::If(s) => {
            visitor.visit_expression(&mut s.condition);
            visitor.visit_statement(&mut s.then_branch);
            if let Some(else_branch) = &mut s.else_branch {
                visitor.visit_statement(else_branch);
            }
        }
        Statement::Return(s) => {
            if let Some(value) = &mut s.value {
                visitor.visit_expression(value);
            }
        }
        Statement::Throw(s) => visitor.visit_expression(&mut s.value),
        Statement::Block(block) => visitor.visit_block_statement(block),
    }
}

pub fn walk_class_decl<V: VisitorMut>(visitor: &mut V, decl: &mut ClassDecl) {
    for member in &mut decl.members {
        visitor.visit_class_member(member);
    }
}

pub fn walk_class_member<V: VisitorMut>(visitor: &mut V, member: &mut ClassMember) {
    match member {
        ClassMember::Field(field) => {
            if let Some(init) = &mut field.initializer {
                visitor.visit_expression(init);
            }
        }
        ClassMember::Method(method) => {
            walk_parameters(visitor, &mut method.params);
            visitor.visit_block_statement(&mut method.body);
        }
        ClassMember::Constructor(ctor) => {
            walk_parameters(visitor, &mut ctor.params);
            visitor.visit_block_statement(&mut ctor.body);
        }
    }
}

fn walk_parameters<V: VisitorMut>(visitor: &mut V, params: &mut [Parameter]) {
    for param in params {
        if let Some(default) = &mut param.default_value {
            visitor.visit_expression(default);
        }
    }
}

pub fn walk_block_statement<V: VisitorMut>(visitor: &mut V, block: &mut BlockStatement) {
    for stmt in &mut block.statements {
        visitor.visit_statement(stmt);
    }
}

pub fn walk_expression<V: VisitorMut>(visitor: &mut V, expr: &mut Expression) {
    match expr {
        Expression::NumberLiteral(_)
        | Expression::StringLiteral(_)
        | Expression::BooleanLiteral(_)
        | Expression::NullLiteral(_)
        | Expression::Identifier(_)
        | Expression::This(_) => {}
        Expression::TemplateLiteral(template) => {
            for part in &mut template.parts {
                if let TemplateElement::Expression(e) = part {
                    visitor.visit_expression(e);
                }
            }
        }
        Expression::Unary(e) => visitor.visit_expression(&mut e.operand),
        Expression::Binary(e) => {
            visitor.visit_expression(&mut e.left);
            visitor.visit_expression(&mut e.right);
        }
        Expression::Logical(e) => {
            visitor.visit_expression(&mut e.left);
            visitor.visit_expression(&mut e.right);
        }
        Expression::Conditional(e) => {
            visitor.visit_expression(&mut e.test);
            visitor.visit_expression(&mut e.consequent);
            visitor.visit_expression(&mut e.alternate);
        }
        Expression::Assignment(e) => {
            visitor.visit_expression(&mut e.target);
            visitor.visit_expression(&mut e.value);
        }
        Expression::Call(e) => {
            visitor.visit_expression(&mut e.callee);
            for arg in &mut e.arguments {
                visitor.visit_expression(arg);
            }
        }
        Expression::Member(e) => visitor.visit_expression(&mut e.object),
        Expression::New(e) => {
            visitor.visit_expression(&mut e.callee);
            for arg in &mut e.arguments {
                visitor.visit_expression(arg);
            }
        }
        Expression::Parenthesized(e) => visitor.visit_expression(&mut e.expression),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    struct CountClasses {
        count: usize,
    }

    impl VisitorMut for CountClasses {
        fn visit_class_decl(&mut self, decl: &mut ClassDecl) {
            self.count += 1;
            walk_class_decl(self, decl);
        }
    }

    struct DoubleNumbers;

    impl VisitorMut for DoubleNumbers {
        fn visit_expression(&mut self, expr: &mut Expression) {
            if let Expression::NumberLiteral(n) = expr {
                n.value *= 2.0;
            }
            walk_expression(self, expr);
        }
    }

    #[test]
    fn test_visits_nested_classes() {
        let source = r#"
            class Outer {
                make() {
                    class Inner {}
                    if (true) {
                        class Deeper {}
                    }
                }
            }
        "#;
        let mut module = Parser::new(source).unwrap().parse().unwrap();
        let mut counter = CountClasses { count: 0 };
        counter.visit_module(&mut module);
        assert_eq!(counter.count, 3);
    }

    #[test]
    fn test_mutates_expressions() {
        let mut module = Parser::new("let x = 1 + 2;").unwrap().parse().unwrap();
        DoubleNumbers.visit_module(&mut module);
        match &module.statements[0] {
            Statement::VariableDecl(decl) => match decl.initializer.as_ref() {
                Some(Expression::Binary(bin)) => {
                    assert_eq!(*bin.left, Expression::NumberLiteral(NumberLiteral {
                        value: 2.0,
                        span: *bin.left.span(),
                    }));
                }
                other => panic!("Expected binary initializer, got {:?}", other),
            },
            other => panic!("Expected variable declaration, got {:?}", other),
        }
    }
}
