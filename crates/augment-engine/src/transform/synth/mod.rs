//! Member synthesizers.
//!
//! Every function here builds fresh AST nodes through
//! [`build`](crate::parser::ast::build) from a configured plan. None of them
//! look at existing members; conflicts are resolved by the rewriter.

pub mod accessors;
pub mod builder;
pub mod constructor;
pub mod equality;
pub mod log_field;
pub mod singleton;
pub mod to_string;
pub mod with;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::parser::ast::{ClassDecl, ClassMember, Statement};
    use crate::parser::{Parser, Printer};
    use crate::transform::config::AugmentConfig;
    use crate::transform::plan::{GenerationFlags, TransformationPlan};
    use crate::transform::property::extract_properties;

    pub fn parse_class(source: &str) -> ClassDecl {
        let module = Parser::new(source).unwrap().parse().unwrap();
        match module.statements.into_iter().next() {
            Some(Statement::ClassDecl(class)) => class,
            other => panic!("Expected class, got {:?}", other),
        }
    }

    pub fn plan<'a>(class: &'a ClassDecl, flags: GenerationFlags) -> TransformationPlan<'a> {
        let mut plan = TransformationPlan::new(
            class,
            extract_properties(class),
            vec![],
            &AugmentConfig::default(),
        );
        plan.apply(&flags);
        plan
    }

    /// Print members as the body of a class named `T`.
    pub fn print_members(members: Vec<ClassMember>) -> String {
        let class = ClassDecl {
            decorators: vec![],
            export: Default::default(),
            name: Some(crate::parser::ast::build::ident("T")),
            extends: None,
            members,
            span: Default::default(),
        };
        Printer::print_class(&class)
    }
}
