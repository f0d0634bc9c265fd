//! Marker handler trait and supporting types.
//!
//! Each class marker is implemented by one `MarkerHandler`. A handler
//! describes itself through a static [`HandlerMeta`], contributes generation
//! flags to the plan in [`configure`](MarkerHandler::configure), and produces
//! the members it owns in [`synthesize`](MarkerHandler::synthesize).

use crate::parser::ast::ClassMember;

use super::config::AugmentConfig;
use super::plan::{GenerationFlags, TransformationPlan};

/// Static metadata describing a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerMeta {
    /// Marker name, e.g. `"Value"`.
    pub marker: &'static str,
    /// Higher runs first.
    pub priority: u32,
    /// One-line description shown by `augment markers`.
    pub description: &'static str,
}

/// Context shared by synthesizers for one class.
#[derive(Debug, Clone, Copy)]
pub struct SynthContext<'a> {
    pub config: &'a AugmentConfig,
}

impl<'a> SynthContext<'a> {
    pub fn new(config: &'a AugmentConfig) -> Self {
        Self { config }
    }
}

/// Trait implemented by every class marker handler.
pub trait MarkerHandler: Send + Sync {
    /// Metadata for this handler.
    fn meta(&self) -> &HandlerMeta;

    /// Flags this marker adds to the plan.
    fn configure(&self, plan: &TransformationPlan<'_>) -> GenerationFlags;

    /// Members this marker generates, given the fully configured plan.
    ///
    /// Name collisions are resolved by the rewriter, not here.
    fn synthesize(&self, plan: &TransformationPlan<'_>, ctx: &SynthContext<'_>) -> Vec<ClassMember> {
        let _ = (plan, ctx);
        Vec::new()
    }
}
