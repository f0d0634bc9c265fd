//! `@Builder`

use crate::parser::ast::ClassMember;
use crate::transform::handler::*;
use crate::transform::marker;
use crate::transform::plan::{GenerationFlags, TransformationPlan};
use crate::transform::synth;

pub struct Builder;

static META: HandlerMeta = HandlerMeta {
    marker: marker::BUILDER,
    priority: 65,
    description: "static builder() returning a new <Name>Builder",
};

impl MarkerHandler for Builder {
    fn meta(&self) -> &HandlerMeta {
        &META
    }

    fn configure(&self, _plan: &TransformationPlan<'_>) -> GenerationFlags {
        GenerationFlags {
            builder: true,
            ..GenerationFlags::new()
        }
    }

    fn synthesize(&self, plan: &TransformationPlan<'_>, _ctx: &SynthContext<'_>) -> Vec<ClassMember> {
        vec![synth::builder::builder_factory(plan)]
    }
}
