//! `@Singleton`

use crate::parser::ast::ClassMember;
use crate::transform::handler::*;
use crate::transform::marker;
use crate::transform::plan::{GenerationFlags, TransformationPlan};
use crate::transform::synth;

pub struct Singleton;

static META: HandlerMeta = HandlerMeta {
    marker: marker::SINGLETON,
    priority: 65,
    description: "Lazily created shared instance behind static getInstance()",
};

impl MarkerHandler for Singleton {
    fn meta(&self) -> &HandlerMeta {
        &META
    }

    fn configure(&self, _plan: &TransformationPlan<'_>) -> GenerationFlags {
        GenerationFlags {
            singleton: true,
            ..GenerationFlags::new()
        }
    }

    fn synthesize(&self, plan: &TransformationPlan<'_>, _ctx: &SynthContext<'_>) -> Vec<ClassMember> {
        synth::singleton::singleton_members(plan)
    }
}
