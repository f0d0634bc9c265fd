//! `@Getter`

use crate::parser::ast::ClassMember;
use crate::transform::handler::*;
use crate::transform::marker;
use crate::transform::plan::{GenerationFlags, TransformationPlan};
use crate::transform::synth;

pub struct Getter;

static META: HandlerMeta = HandlerMeta {
    marker: marker::GETTER,
    priority: 70,
    description: "getX() for every field",
};

impl MarkerHandler for Getter {
    fn meta(&self) -> &HandlerMeta {
        &META
    }

    fn configure(&self, _plan: &TransformationPlan<'_>) -> GenerationFlags {
        GenerationFlags {
            getters: true,
            ..GenerationFlags::new()
        }
    }

    fn synthesize(&self, plan: &TransformationPlan<'_>, _ctx: &SynthContext<'_>) -> Vec<ClassMember> {
        synth::accessors::getters(plan)
    }
}
