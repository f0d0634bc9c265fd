//! `@EqualsAndHashCode`

use crate::parser::ast::ClassMember;
use crate::transform::handler::*;
use crate::transform::marker;
use crate::transform::plan::{GenerationFlags, TransformationPlan};
use crate::transform::synth;

pub struct EqualsAndHashCode;

static META: HandlerMeta = HandlerMeta {
    marker: marker::EQUALS_AND_HASH_CODE,
    priority: 80,
    description: "Structural equals(other) and hashCode()",
};

impl MarkerHandler for EqualsAndHashCode {
    fn meta(&self) -> &HandlerMeta {
        &META
    }

    fn configure(&self, _plan: &TransformationPlan<'_>) -> GenerationFlags {
        GenerationFlags {
            equals: true,
            hash_code: true,
            ..GenerationFlags::new()
        }
    }

    fn synthesize(&self, plan: &TransformationPlan<'_>, _ctx: &SynthContext<'_>) -> Vec<ClassMember> {
        vec![
            synth::equality::equals_method(plan),
            synth::equality::hash_code_method(plan),
        ]
    }
}
