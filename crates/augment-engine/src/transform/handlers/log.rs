//! `@Log`

use crate::parser::ast::ClassMember;
use crate::transform::handler::*;
use crate::transform::marker;
use crate::transform::plan::{GenerationFlags, TransformationPlan};
use crate::transform::synth;

pub struct Log;

static META: HandlerMeta = HandlerMeta {
    marker: marker::LOG,
    priority: 60,
    description: "protected readonly logger field",
};

impl MarkerHandler for Log {
    fn meta(&self) -> &HandlerMeta {
        &META
    }

    fn configure(&self, _plan: &TransformationPlan<'_>) -> GenerationFlags {
        GenerationFlags {
            log_field: true,
            ..GenerationFlags::new()
        }
    }

    fn synthesize(&self, _plan: &TransformationPlan<'_>, ctx: &SynthContext<'_>) -> Vec<ClassMember> {
        vec![synth::log_field::log_field(ctx.config)]
    }
}
