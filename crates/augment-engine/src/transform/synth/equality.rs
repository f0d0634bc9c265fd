//! `equals(other)` and `hashCode()` synthesis.

use crate::parser::ast::{
    build, BinaryOperator, ClassMember, Expression, LogicalOperator, Statement, UnaryOperator,
};
use crate::transform::plan::TransformationPlan;

/// Multiplier applied to the running hash before each field is added.
const HASH_MULTIPLIER: f64 = 31.0;

pub fn equals_method(plan: &TransformationPlan<'_>) -> ClassMember {
    let other = || build::id_expr("other");

    let mut body: Vec<Statement> = vec![
        build::if_single(
            build::binary(BinaryOperator::Equal, other(), build::null()),
            build::return_stmt(build::boolean(false)),
        ),
        build::if_single(
            build::binary(BinaryOperator::StrictEqual, build::this(), other()),
            build::return_stmt(build::boolean(true)),
        ),
        build::if_single(
            build::unary(
                UnaryOperator::Not,
                build::paren(build::binary(
                    BinaryOperator::Instanceof,
                    other(),
                    build::id_expr(&plan.class_name),
                )),
            ),
            build::return_stmt(build::boolean(false)),
        ),
    ];

    let comparison = plan
        .properties
        .iter()
        .map(|p| {
            build::binary(
                BinaryOperator::StrictEqual,
                build::this_member(&p.name),
                build::member(other(), &p.name),
            )
        })
        .reduce(|acc, next| build::logical(LogicalOperator::And, acc, next))
        .unwrap_or_else(|| build::boolean(true));
    body.push(build::return_stmt(comparison));

    ClassMember::Method(build::method(
        "equals",
        vec![build::param("other", Some(build::named_type("any")))],
        Some(build::named_type("boolean")),
        body,
    ))
}

/// Hash contribution of one field:
/// `this.f == null ? 0 : typeof this.f === "number" ? this.f : String(this.f).length`
fn field_hash(name: &str) -> Expression {
    build::conditional(
        build::binary(BinaryOperator::Equal, build::this_member(name), build::null()),
        build::number(0.0),
        build::conditional(
            build::binary(
                BinaryOperator::StrictEqual,
                build::unary(UnaryOperator::Typeof, build::this_member(name)),
                build::string("number"),
            ),
            build::this_member(name),
            build::member(
                build::call(build::id_expr("String"), vec![build::this_member(name)]),
                "length",
            ),
        ),
    )
}

pub fn hash_code_method(plan: &TransformationPlan<'_>) -> ClassMember {
    let body = if plan.properties.is_empty() {
        vec![build::return_stmt(build::number(0.0))]
    } else {
        let mut body = vec![build::let_decl("hash", build::number(0.0))];
        for property in &plan.properties {
            // hash = hash * 31 + (<field hash>);
            body.push(build::expr_stmt(build::assign(
                build::id_expr("hash"),
                build::binary(
                    BinaryOperator::Add,
                    build::binary(
                        BinaryOperator::Multiply,
                        build::id_expr("hash"),
                        build::number(HASH_MULTIPLIER),
                    ),
                    build::paren(field_hash(&property.name)),
                ),
            )));
        }
        body.push(build::return_stmt(build::binary(
            BinaryOperator::BitwiseOr,
            build::id_expr("hash"),
            build::number(0.0),
        )));
        body
    };

    ClassMember::Method(build::method(
        "hashCode",
        vec![],
        Some(build::named_type("number")),
        body,
    ))
}
