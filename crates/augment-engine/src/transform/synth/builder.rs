//! Builder factory synthesis.

use crate::parser::ast::{build, ClassMember};
use crate::transform::plan::TransformationPlan;

/// `static builder(): NameBuilder { return new NameBuilder(); }`
///
/// Only the factory is generated; `NameBuilder` must be declared elsewhere.
pub fn builder_factory(plan: &TransformationPlan<'_>) -> ClassMember {
    let builder_name = format!("{}Builder", plan.class_name);
    let mut method = build::method(
        "builder",
        vec![],
        Some(build::named_type(&builder_name)),
        vec![build::return_stmt(build::new_instance(&builder_name, vec![]))],
    );
    method.is_static = true;
    ClassMember::Method(method)
}
