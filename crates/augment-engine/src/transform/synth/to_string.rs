//! `toString()` synthesis.

use crate::parser::ast::{build, ClassMember, TemplateElement};
use crate::transform::plan::TransformationPlan;

/// ``toString(): string { return `Name(a=${this.a}, b=${this.b})`; }``
pub fn to_string_method(plan: &TransformationPlan<'_>) -> ClassMember {
    let value = if plan.properties.is_empty() {
        build::string(&format!("{}()", plan.class_name))
    } else {
        let mut parts = Vec::with_capacity(plan.properties.len() * 2 + 1);
        for (i, property) in plan.properties.iter().enumerate() {
            let prefix = if i == 0 {
                format!("{}({}=", plan.class_name, property.name)
            } else {
                format!(", {}=", property.name)
            };
            parts.push(TemplateElement::String(prefix));
            parts.push(TemplateElement::Expression(Box::new(build::this_member(
                &property.name,
            ))));
        }
        parts.push(TemplateElement::String(")".to_string()));
        build::template(parts)
    };

    ClassMember::Method(build::method(
        "toString",
        vec![],
        Some(build::named_type("string")),
        vec![build::return_stmt(value)],
    ))
}
