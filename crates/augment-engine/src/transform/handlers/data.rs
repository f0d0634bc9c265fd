//! `@Data`: mutable data holder.

use crate::parser::ast::ClassMember;
use crate::transform::handler::*;
use crate::transform::marker;
use crate::transform::plan::{ConstructorMode, GenerationFlags, TransformationPlan};
use crate::transform::synth;

pub struct Data;

static META: HandlerMeta = HandlerMeta {
    marker: marker::DATA,
    priority: 95,
    description: "Getters, setters, toString, equals, hashCode and an all-args constructor",
};

impl MarkerHandler for Data {
    fn meta(&self) -> &HandlerMeta {
        &META
    }

    fn configure(&self, _plan: &TransformationPlan<'_>) -> GenerationFlags {
        GenerationFlags {
            getters: true,
            setters: true,
            to_string: true,
            equals: true,
            hash_code: true,
            ..GenerationFlags::new()
        }
        .with_constructor(ConstructorMode::AllFields)
    }

    fn synthesize(&self, plan: &TransformationPlan<'_>, _ctx: &SynthContext<'_>) -> Vec<ClassMember> {
        let mut members = synth::accessors::getters(plan);
        members.extend(synth::accessors::setters(plan));
        members.push(synth::to_string::to_string_method(plan));
        members.push(synth::equality::equals_method(plan));
        members.push(synth::equality::hash_code_method(plan));
        members
    }
}
