//! Augment runner: single-pass mutable traversal that rewrites every marked class.

use tracing::{debug, trace};

use crate::parser::ast::{self, visitor::{self, VisitorMut}};

use super::config::AugmentConfig;
use super::handler::SynthContext;
use super::marker::{classify, is_method_marker};
use super::plan::TransformationPlan;
use super::property::extract_properties;
use super::registry::HandlerRegistry;
use super::rewriter::{self, ClassReport};

/// Walks a module depth-first and rewrites each class carrying markers.
///
/// A class is processed before its members are walked, so classes nested in
/// method or constructor bodies are each seen exactly once.
pub struct AugmentRunner<'a> {
    registry: &'a HandlerRegistry,
    config: &'a AugmentConfig,
    reports: Vec<ClassReport>,
}

impl<'a> AugmentRunner<'a> {
    pub fn new(registry: &'a HandlerRegistry, config: &'a AugmentConfig) -> Self {
        Self {
            registry,
            config,
            reports: Vec::new(),
        }
    }

    /// Rewrite the module in place and return one report per processed class.
    pub fn run(mut self, module: &mut ast::Module) -> Vec<ClassReport> {
        self.visit_module(module);
        self.reports
    }

    fn process(&mut self, decl: &mut ast::ClassDecl) {
        for member in &decl.members {
            if let ast::ClassMember::Method(method) = member {
                for marker in method.decorators.iter().filter(|d| is_method_marker(d)) {
                    trace!(
                        method = method.name.as_str(),
                        marker = marker.simple_name().unwrap_or_default(),
                        "method marker has no handler"
                    );
                }
            }
        }

        let classification = classify(decl, self.registry);
        if classification.is_empty() {
            debug!(class = decl.name_str().unwrap_or("<anonymous>"), "no markers, untouched");
            return;
        }

        let (rewritten, report) = {
            let mut plan = TransformationPlan::new(
                decl,
                extract_properties(decl),
                classification.class_markers,
                self.config,
            );
            let handlers = self.registry.select(&plan.markers);
            for handler in &handlers {
                let update = handler.configure(&plan);
                trace!(
                    class = %plan.class_name,
                    marker = handler.meta().marker,
                    priority = handler.meta().priority,
                    flags = ?update.enabled(),
                    "applied handler"
                );
                plan.apply(&update);
            }
            rewriter::rewrite(&plan, &handlers, &SynthContext::new(self.config))
        };

        debug!(
            class = %report.name,
            markers = ?report.markers,
            generated = report.generated.len(),
            suppressed = report.suppressed.len(),
            "rewrote class"
        );
        *decl = rewritten;
        self.reports.push(report);
    }
}

impl<'a> VisitorMut for AugmentRunner<'a> {
    fn visit_class_decl(&mut self, decl: &mut ast::ClassDecl) {
        self.process(decl);
        visitor::walk_class_decl(self, decl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn run(source: &str) -> (ast::Module, Vec<ClassReport>) {
        let mut module = Parser::new(source).unwrap().parse().unwrap();
        let registry = HandlerRegistry::new();
        let config = AugmentConfig::default();
        let reports = AugmentRunner::new(&registry, &config).run(&mut module);
        (module, reports)
    }

    #[test]
    fn test_untouched_class_is_identical() {
        let source = "@sealed class A { x: number; f(): number { return 1; } }";
        let original = Parser::new(source).unwrap().parse().unwrap();
        let (module, reports) = run(source);
        assert!(reports.is_empty());
        assert_eq!(module, original);
    }

    #[test]
    fn test_nested_classes_processed_once() {
        let (_, reports) = run(
            r#"
            @ToString class Outer {
                x: number;
                make(): number {
                    @ToString class Inner { y: number; }
                    if (true) { @Getter class Deeper { z: number; } }
                    return 1;
                }
            }
            "#,
        );
        let names: Vec<&str> = reports.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Outer", "Inner", "Deeper"]);
    }
}
