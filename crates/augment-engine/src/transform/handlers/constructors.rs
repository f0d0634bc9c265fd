//! Constructor markers.
//!
//! These only select a constructor mode; the constructor itself is built by
//! the rewriter from the merged plan so that one constructor reflects every
//! marker on the class.

use crate::transform::handler::*;
use crate::transform::marker;
use crate::transform::plan::{ConstructorMode, GenerationFlags, TransformationPlan};

pub struct NoArgsConstructor;
pub struct AllArgsConstructor;
pub struct RequiredArgsConstructor;

static NO_ARGS_META: HandlerMeta = HandlerMeta {
    marker: marker::NO_ARGS_CONSTRUCTOR,
    priority: 90,
    description: "Constructor without parameters",
};

static ALL_ARGS_META: HandlerMeta = HandlerMeta {
    marker: marker::ALL_ARGS_CONSTRUCTOR,
    priority: 90,
    description: "Constructor taking every field in declaration order",
};

static REQUIRED_ARGS_META: HandlerMeta = HandlerMeta {
    marker: marker::REQUIRED_ARGS_CONSTRUCTOR,
    priority: 90,
    description: "Constructor taking fields without a default value or `?`",
};

impl MarkerHandler for NoArgsConstructor {
    fn meta(&self) -> &HandlerMeta {
        &NO_ARGS_META
    }

    fn configure(&self, _plan: &TransformationPlan<'_>) -> GenerationFlags {
        GenerationFlags::new().with_constructor(ConstructorMode::None)
    }
}

impl MarkerHandler for AllArgsConstructor {
    fn meta(&self) -> &HandlerMeta {
        &ALL_ARGS_META
    }

    fn configure(&self, _plan: &TransformationPlan<'_>) -> GenerationFlags {
        GenerationFlags::new().with_constructor(ConstructorMode::AllFields)
    }
}

impl MarkerHandler for RequiredArgsConstructor {
    fn meta(&self) -> &HandlerMeta {
        &REQUIRED_ARGS_META
    }

    fn configure(&self, _plan: &TransformationPlan<'_>) -> GenerationFlags {
        GenerationFlags::new().with_constructor(ConstructorMode::RequiredFieldsOnly)
    }
}
