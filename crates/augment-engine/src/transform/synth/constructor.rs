//! Constructor synthesis.
//!
//! Body order is fixed: null checks, field assignments, then the freeze.

use crate::parser::ast::{build, BinaryOperator, ClassMember, Statement};
use crate::transform::plan::TransformationPlan;
use crate::transform::property::PropertyDescriptor;

/// `if (x == null) { throw new Error("x cannot be null or undefined"); }`
pub fn null_check(name: &str) -> Statement {
    build::if_block(
        build::binary(BinaryOperator::Equal, build::id_expr(name), build::null()),
        vec![build::throw_stmt(build::new_instance(
            "Error",
            vec![build::string(&format!("{} cannot be null or undefined", name))],
        ))],
    )
}

/// Build the constructor the plan asks for, or `None` when no constructor is wanted.
pub fn constructor(plan: &TransformationPlan<'_>) -> Option<ClassMember> {
    let flags = plan.flags();
    if !flags.constructor {
        return None;
    }

    let properties = plan.constructor_properties();
    let params = properties
        .iter()
        .map(|p| build::param(&p.name, p.type_annotation.clone()))
        .collect();

    let mut body: Vec<Statement> = Vec::new();
    if flags.null_validation {
        body.extend(
            properties
                .iter()
                .filter(|p| p.non_null)
                .map(|p| null_check(&p.name)),
        );
    }
    body.extend(properties.iter().map(|p| assignment(p)));
    if flags.immutable {
        body.push(build::expr_stmt(build::call(
            build::member(build::id_expr("Object"), "freeze"),
            vec![build::this()],
        )));
    }

    Some(build::constructor(params, body))
}

/// `this.x = x;`
fn assignment(property: &PropertyDescriptor) -> Statement {
    build::expr_stmt(build::assign(
        build::this_member(&property.name),
        build::id_expr(&property.name),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::plan::{ConstructorMode, GenerationFlags};
    use crate::transform::synth::test_support::*;

    fn print(source: &str, flags: GenerationFlags) -> Option<String> {
        let class = parse_class(source);
        let plan = plan(&class, flags);
        constructor(&plan).map(|ctor| print_members(vec![ctor]))
    }

    #[test]
    fn test_no_constructor_without_flag() {
        assert!(print("class A { @NonNull x: number; }", GenerationFlags::new()).is_none());
    }

    #[test]
    fn test_all_fields_immutable() {
        let flags = GenerationFlags {
            immutable: true,
            ..GenerationFlags::new()
        }
        .with_constructor(ConstructorMode::AllFields);
        let printed = print("class A { @NonNull x: number; y: string = \"a\"; }", flags).unwrap();
        assert_eq!(
            printed,
            "class T {\n  constructor(x: number, y: string) {\n    if (x == null) {\n      throw new Error(\"x cannot be null or undefined\");\n    }\n    this.x = x;\n    this.y = y;\n    Object.freeze(this);\n  }\n}\n"
        );
    }

    #[test]
    fn test_required_fields_only() {
        let flags = GenerationFlags::new().with_constructor(ConstructorMode::RequiredFieldsOnly);
        let printed = print(
            "class A { id: number; nick?: string; count: number = 0; name: string; }",
            flags,
        )
        .unwrap();
        assert!(printed.contains("constructor(id: number, name: string) {"));
        assert!(!printed.contains("nick"));
        assert!(!printed.contains("count"));
    }

    #[test]
    fn test_no_args() {
        let flags = GenerationFlags::new().with_constructor(ConstructorMode::None);
        let printed = print("class A { @NonNull x: number; }", flags).unwrap();
        assert_eq!(printed, "class T {\n  constructor() {}\n}\n");
    }
}
