//! `augment markers`: List recognized markers in the order they apply.

use augment_engine::transform::marker::{FIELD_MARKERS, METHOD_MARKERS};
use augment_engine::Augmenter;

use crate::output::StyledOutput;

pub fn execute(augmenter: &Augmenter, out: &mut StyledOutput) -> anyhow::Result<()> {
    let mut handlers = augmenter.registry().handlers();
    handlers.sort_by_key(|handler| std::cmp::Reverse(handler.meta().priority));

    out.heading("Class markers");
    for handler in handlers {
        let meta = handler.meta();
        out.marker_row(Some(meta.priority), meta.marker, meta.description);
    }

    out.blank();
    out.heading("Member markers");
    for marker in FIELD_MARKERS {
        out.marker_row(None, marker, "field: null-check the constructor argument");
    }
    for marker in METHOD_MARKERS {
        out.marker_row(None, marker, "method: recognized, no effect");
    }
    out.flush();
    Ok(())
}
