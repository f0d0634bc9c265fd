//! Class rewriting: merges synthesized members into the declaration.
//!
//! Conflict rules:
//! - a member the class already declares is never replaced (hand-written wins);
//! - a name produced by an earlier handler is not produced again;
//! - an existing constructor is kept as written.

use rustc_hash::FxHashSet;
use serde::Serialize;
use tracing::trace;

use crate::parser::ast::{ClassDecl, ClassMember, Decorator};

use super::handler::{MarkerHandler, SynthContext};
use super::marker::is_field_marker;
use super::plan::TransformationPlan;
use super::synth;

/// What happened to one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassReport {
    pub name: String,
    /// Class markers processed, in source order.
    pub markers: Vec<String>,
    /// Members added, in output order.
    pub generated: Vec<String>,
    /// Members not generated because the class already declares them.
    pub suppressed: Vec<String>,
}

/// Produce the rewritten declaration for a configured plan.
///
/// `handlers` must be the plan's handlers in priority order.
pub fn rewrite(
    plan: &TransformationPlan<'_>,
    handlers: &[&dyn MarkerHandler],
    ctx: &SynthContext<'_>,
) -> (ClassDecl, ClassReport) {
    let original = plan.class;
    let immutable = plan.flags().immutable;

    let mut members: Vec<ClassMember> = original
        .members
        .iter()
        .map(|member| copy_member(member, immutable))
        .collect();

    let existing: FxHashSet<&str> = original.members.iter().map(ClassMember::name).collect();
    let mut generated: Vec<String> = Vec::new();
    let mut suppressed: Vec<String> = Vec::new();

    if let Some(ctor) = synth::constructor::constructor(plan) {
        if original.has_constructor() {
            trace!(class = %plan.class_name, "keeping hand-written constructor");
            suppressed.push("constructor".to_string());
        } else {
            members.insert(0, ctor);
            generated.push("constructor".to_string());
        }
    }

    for handler in handlers {
        for member in handler.synthesize(plan, ctx) {
            let name = member.name();
            if existing.contains(name) {
                trace!(
                    class = %plan.class_name,
                    marker = handler.meta().marker,
                    member = name,
                    "suppressed by hand-written member"
                );
                if !suppressed.iter().any(|s| s == name) {
                    suppressed.push(name.to_string());
                }
            } else if !generated.iter().any(|g| g == name) {
                generated.push(name.to_string());
                members.push(member);
            }
        }
    }

    let decorators: Vec<Decorator> = original
        .decorators
        .iter()
        .filter(|d| {
            d.simple_name()
                .map_or(true, |name| !plan.markers.iter().any(|m| m == name))
        })
        .cloned()
        .collect();

    let class = ClassDecl {
        decorators,
        members,
        ..original.clone()
    };
    let report = ClassReport {
        name: plan.class_name.clone(),
        markers: plan.markers.clone(),
        generated,
        suppressed,
    };

    (class, report)
}

/// Copy an original member: field markers are stripped from instance fields,
/// which also become readonly when the class is immutable.
fn copy_member(member: &ClassMember, immutable: bool) -> ClassMember {
    match member {
        ClassMember::Field(field) if !field.is_static => {
            let mut field = field.clone();
            field.decorators.retain(|d| !is_field_marker(d));
            if immutable {
                field.is_readonly = true;
            }
            ClassMember::Field(field)
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Printer;
    use crate::transform::config::AugmentConfig;
    use crate::transform::marker::classify;
    use crate::transform::property::extract_properties;
    use crate::transform::registry::HandlerRegistry;
    use crate::transform::synth::test_support::parse_class;

    fn run(source: &str) -> (String, ClassReport) {
        let class = parse_class(source);
        let registry = HandlerRegistry::new();
        let config = AugmentConfig::default();
        let classification = classify(&class, &registry);
        let mut plan = TransformationPlan::new(
            &class,
            extract_properties(&class),
            classification.class_markers,
            &config,
        );
        let handlers = registry.select(&plan.markers);
        for handler in &handlers {
            let update = handler.configure(&plan);
            plan.apply(&update);
        }
        let (rewritten, report) = rewrite(&plan, &handlers, &SynthContext::new(&config));
        (Printer::print_class(&rewritten), report)
    }

    #[test]
    fn test_hand_written_member_wins() {
        let (printed, report) = run(
            "@ToString class A { x: number; toString(): string { return \"custom\"; } }",
        );
        assert!(printed.contains("return \"custom\";"));
        assert_eq!(printed.matches("toString()").count(), 1);
        assert!(report.generated.is_empty());
        assert_eq!(report.suppressed, vec!["toString"]);
    }

    #[test]
    fn test_existing_constructor_kept() {
        let (printed, report) = run(
            "@AllArgsConstructor class A { x: number; constructor() { this.x = 1; } }",
        );
        assert!(printed.contains("constructor() {\n    this.x = 1;\n  }"));
        assert_eq!(report.suppressed, vec!["constructor"]);
    }

    #[test]
    fn test_generated_once_across_handlers() {
        let (printed, report) = run("@Value @ToString @EqualsAndHashCode class A { x: number; }");
        assert_eq!(printed.matches("toString(): string").count(), 1);
        assert_eq!(printed.matches("equals(other: any)").count(), 1);
        assert_eq!(report.generated, vec!["constructor", "toString", "equals", "hashCode"]);
    }

    #[test]
    fn test_marker_stripping_keeps_unrelated_order() {
        let (printed, report) = run(
            "@sealed @Value @lib.tracked @Getter() @frozen class A { @NonNull @column x: number; static n: number = 0; }",
        );
        assert!(printed.starts_with("@sealed\n@lib.tracked\n@frozen\nclass A {"));
        assert!(printed.contains("@column readonly x: number;"));
        assert!(printed.contains("static n: number = 0;"));
        assert!(!printed.contains("NonNull"));
        assert_eq!(report.markers, vec!["Value", "Getter"]);
    }

    #[test]
    fn test_constructor_is_first_member() {
        let (printed, _) = run("@Data class A { x: number; }");
        let ctor = printed.find("constructor(x: number)").unwrap();
        let field = printed.find("x: number;").unwrap();
        assert!(ctor < field);
    }
}
