//! `@Value` and its alias `@Record`: immutable value objects.
//!
//! Both set the same flags: an all-fields constructor that freezes the
//! instance, `toString`, `equals` and `hashCode`.

use crate::parser::ast::ClassMember;
use crate::transform::handler::*;
use crate::transform::marker;
use crate::transform::plan::{ConstructorMode, GenerationFlags, TransformationPlan};
use crate::transform::synth;

pub struct Value;
pub struct Record;

static VALUE_META: HandlerMeta = HandlerMeta {
    marker: marker::VALUE,
    priority: 100,
    description: "Immutable value object: frozen all-args constructor, toString, equals, hashCode",
};

static RECORD_META: HandlerMeta = HandlerMeta {
    marker: marker::RECORD,
    priority: 100,
    description: "Alias of @Value",
};

fn value_flags() -> GenerationFlags {
    GenerationFlags {
        immutable: true,
        to_string: true,
        equals: true,
        hash_code: true,
        ..GenerationFlags::new()
    }
    .with_constructor(ConstructorMode::AllFields)
}

fn value_members(plan: &TransformationPlan<'_>) -> Vec<ClassMember> {
    vec![
        synth::to_string::to_string_method(plan),
        synth::equality::equals_method(plan),
        synth::equality::hash_code_method(plan),
    ]
}

impl MarkerHandler for Value {
    fn meta(&self) -> &HandlerMeta {
        &VALUE_META
    }

    fn configure(&self, _plan: &TransformationPlan<'_>) -> GenerationFlags {
        value_flags()
    }

    fn synthesize(&self, plan: &TransformationPlan<'_>, _ctx: &SynthContext<'_>) -> Vec<ClassMember> {
        value_members(plan)
    }
}

impl MarkerHandler for Record {
    fn meta(&self) -> &HandlerMeta {
        &RECORD_META
    }

    fn configure(&self, _plan: &TransformationPlan<'_>) -> GenerationFlags {
        value_flags()
    }

    fn synthesize(&self, plan: &TransformationPlan<'_>, _ctx: &SynthContext<'_>) -> Vec<ClassMember> {
        value_members(plan)
    }
}
