//! `withX(x)` synthesis.

use crate::parser::ast::{build, ClassMember};
use crate::transform::plan::TransformationPlan;

/// One `withX(x: T): Name { return new Name(this.a, x, this.c); }` per property.
pub fn with_methods(plan: &TransformationPlan<'_>) -> Vec<ClassMember> {
    plan.properties
        .iter()
        .map(|target| {
            let arguments = plan
                .properties
                .iter()
                .map(|p| {
                    if p.name == target.name {
                        build::id_expr(&p.name)
                    } else {
                        build::this_member(&p.name)
                    }
                })
                .collect();

            ClassMember::Method(build::method(
                &format!("with{}", target.capitalized()),
                vec![build::param(&target.name, target.type_annotation.clone())],
                Some(build::named_type(&plan.class_name)),
                vec![build::return_stmt(build::new_instance(&plan.class_name, arguments))],
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::plan::GenerationFlags;
    use crate::transform::synth::test_support::*;

    #[test]
    fn test_with_methods() {
        let class = parse_class("class Product { id: number; price: number; }");
        let plan = plan(&class, GenerationFlags::new());
        let members = with_methods(&plan);
        assert_eq!(members.len(), 2);
        assert_eq!(
            print_members(members),
            "class T {\n  withId(id: number): Product {\n    return new Product(id, this.price);\n  }\n\n  withPrice(price: number): Product {\n    return new Product(this.id, price);\n  }\n}\n"
        );
    }
}
