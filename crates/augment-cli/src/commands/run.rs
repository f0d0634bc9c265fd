//! `augment run`: Expand a file and evaluate it.

use std::path::Path;

use anyhow::Context;
use augment_engine::{Augmenter, Interpreter};
use tracing::debug;

use crate::diagnostics;
use crate::output::StyledOutput;

/// Returns the process exit code.
pub fn execute(augmenter: &Augmenter, file: &Path, out: &mut StyledOutput) -> anyhow::Result<i32> {
    let source = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let result = match augmenter.augment_source(&source) {
        Ok(result) => result,
        Err(err) => {
            diagnostics::emit(out.stderr(), file, &source, &err)?;
            return Ok(1);
        }
    };
    debug!(classes = result.classes.len(), "running expanded module");

    let mut interpreter = Interpreter::new();
    let outcome = interpreter.run_module(&result.module);

    // Output printed before an uncaught error is still shown.
    for line in interpreter.take_output() {
        out.line(&line);
    }
    out.flush();

    match outcome {
        Ok(()) => Ok(0),
        Err(err) => {
            out.error_line(&err.to_string());
            Ok(1)
        }
    }
}
