//! Getter and setter synthesis.

use crate::parser::ast::{build, ClassMember, PrimitiveType};
use crate::transform::plan::TransformationPlan;

/// `getX(): T { return this.x; }` per property.
pub fn getters(plan: &TransformationPlan<'_>) -> Vec<ClassMember> {
    plan.properties
        .iter()
        .map(|p| {
            ClassMember::Method(build::method(
                &format!("get{}", p.capitalized()),
                vec![],
                p.type_annotation.clone(),
                vec![build::return_stmt(build::this_member(&p.name))],
            ))
        })
        .collect()
}

/// `setX(x: T): void { this.x = x; }` per writable property.
///
/// Nothing is generated for an immutable plan; readonly properties are skipped.
pub fn setters(plan: &TransformationPlan<'_>) -> Vec<ClassMember> {
    if plan.flags().immutable {
        return Vec::new();
    }

    plan.properties
        .iter()
        .filter(|p| !p.readonly)
        .map(|p| {
            ClassMember::Method(build::method(
                &format!("set{}", p.capitalized()),
                vec![build::param(&p.name, p.type_annotation.clone())],
                Some(build::primitive_type(PrimitiveType::Void)),
                vec![build::expr_stmt(build::assign(
                    build::this_member(&p.name),
                    build::id_expr(&p.name),
                ))],
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
    fn test_getters() {
        let class = parse_class("class A { firstName: string; }");
        let plan = plan(&class, GenerationFlags::new());
        assert_eq!(
            print_members(getters(&plan)),
            "class T {\n  getFirstName(): string {\n    return this.firstName;\n  }\n}\n"
        );
    }

    #[test]
    fn test_setters_skip_readonly() {
        let class = parse_class("class A { readonly id: number; name: string; }");
        let plan = plan(&class, GenerationFlags::new());
        let members = setters(&plan);
        assert_eq!(members.len(), 1);
        assert_eq!(
            print_members(members),
            "class T {\n  setName(name: string): void {\n    this.name = name;\n  }\n}\n"
        );
    }

    #[test]
    fn test_no_setters_when_immutable() {
        let class = parse_class("class A { name: string; }");
        let plan = plan(
            &class,
            GenerationFlags {
                immutable: true,
                ..GenerationFlags::new()
            },
        );
        assert!(setters(&plan).is_empty());
    }
}
