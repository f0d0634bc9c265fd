//! `@ToString`

use crate::parser::ast::ClassMember;
use crate::transform::handler::*;
use crate::transform::marker;
use crate::transform::plan::{GenerationFlags, TransformationPlan};
use crate::transform::synth;

pub struct ToString;

static META: HandlerMeta = HandlerMeta {
    marker: marker::TO_STRING,
    priority: 80,
    description: "toString() listing every field as name=value",
};

impl MarkerHandler for ToString {
    fn meta(&self) -> &HandlerMeta {
        &META
    }

    fn configure(&self, _plan: &TransformationPlan<'_>) -> GenerationFlags {
        GenerationFlags {
            to_string: true,
            ..GenerationFlags::new()
        }
    }

    fn synthesize(&self, plan: &TransformationPlan<'_>, _ctx: &SynthContext<'_>) -> Vec<ClassMember> {
        vec![synth::to_string::to_string_method(plan)]
    }
}
