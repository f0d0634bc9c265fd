//! Singleton synthesis.

use crate::parser::ast::{build, BinaryOperator, ClassMember, PrimitiveType, Visibility};
use crate::transform::plan::TransformationPlan;

pub const INSTANCE_FIELD: &str = "instance";

/// `private static instance: Name | null = null;` followed by `static getInstance()`.
pub fn singleton_members(plan: &TransformationPlan<'_>) -> Vec<ClassMember> {
    let name = plan.class_name.as_str();

    let mut field = build::field(
        INSTANCE_FIELD,
        Some(build::union_type(vec![
            build::named_type(name),
            build::primitive_type(PrimitiveType::Null),
        ])),
        Some(build::null()),
    );
    field.visibility = Some(Visibility::Private);
    field.is_static = true;

    let instance = || build::member(build::id_expr(name), INSTANCE_FIELD);
    let mut accessor = build::method(
        "getInstance",
        vec![],
        Some(build::named_type(name)),
        vec![
            build::if_block(
                build::binary(BinaryOperator::StrictEqual, instance(), build::null()),
                vec![build::expr_stmt(build::assign(
                    instance(),
                    build::new_instance(name, vec![]),
                ))],
            ),
            build::return_stmt(instance()),
        ],
    );
    accessor.is_static = true;

    vec![ClassMember::Field(field), ClassMember::Method(accessor)]
}
