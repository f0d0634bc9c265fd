//! `@With`: copy-on-write updaters.
//!
//! `withX(x)` rebuilds the instance through the all-args constructor. The
//! marker requests one only when no other constructor marker is present.

use crate::parser::ast::ClassMember;
use crate::transform::handler::*;
use crate::transform::marker;
use crate::transform::plan::{ConstructorMode, GenerationFlags, TransformationPlan};
use crate::transform::synth;

pub struct With;

static META: HandlerMeta = HandlerMeta {
    marker: marker::WITH,
    priority: 75,
    description: "withX(value) returning a copy with one field replaced",
};

impl MarkerHandler for With {
    fn meta(&self) -> &HandlerMeta {
        &META
    }

    fn configure(&self, plan: &TransformationPlan<'_>) -> GenerationFlags {
        let flags = GenerationFlags {
            with_methods: true,
            ..GenerationFlags::new()
        };
        let explicit = plan
            .markers
            .iter()
            .any(|m| marker::CONSTRUCTOR_MARKERS.contains(&m.as_str()));
        if explicit {
            flags
        } else {
            flags.with_constructor(ConstructorMode::AllFields)
        }
    }

    fn synthesize(&self, plan: &TransformationPlan<'_>, _ctx: &SynthContext<'_>) -> Vec<ClassMember> {
        synth::with::with_methods(plan)
    }
}
