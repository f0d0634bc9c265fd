//! `@Setter`

use crate::parser::ast::ClassMember;
use crate::transform::handler::*;
use crate::transform::marker;
use crate::transform::plan::{GenerationFlags, TransformationPlan};
use crate::transform::synth;

pub struct Setter;

static META: HandlerMeta = HandlerMeta {
    marker: marker::SETTER,
    priority: 70,
    description: "setX(value) for every field that is not readonly",
};

impl MarkerHandler for Setter {
    fn meta(&self) -> &HandlerMeta {
        &META
    }

    fn configure(&self, _plan: &TransformationPlan<'_>) -> GenerationFlags {
        GenerationFlags {
            setters: true,
            ..GenerationFlags::new()
        }
    }

    fn synthesize(&self, plan: &TransformationPlan<'_>, _ctx: &SynthContext<'_>) -> Vec<ClassMember> {
        synth::accessors::setters(plan)
    }
}
