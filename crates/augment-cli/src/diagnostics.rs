//! Rendering of lex and parse errors with source context.

use std::ops::Range;
use std::path::Path;

use augment_engine::{AugmentError, Span};
use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use termcolor::WriteColor;

/// Convert an engine error into one diagnostic per underlying error.
pub fn to_diagnostics(file_id: usize, source: &str, error: &AugmentError) -> Vec<Diagnostic<usize>> {
    match error {
        AugmentError::Lex(errors) => errors
            .iter()
            .map(|e| build(file_id, source, e.description(), e.span(), e.hint()))
            .collect(),
        AugmentError::Parse(errors) => errors
            .iter()
            .map(|e| build(file_id, source, e.message.clone(), &e.span, e.suggestion.clone()))
            .collect(),
    }
}

/// Write every diagnostic for `error` to `writer`.
pub fn emit(
    writer: &mut dyn WriteColor,
    path: &Path,
    source: &str,
    error: &AugmentError,
) -> anyhow::Result<()> {
    let mut files = SimpleFiles::new();
    let file_id = files.add(path.display().to_string(), source.to_string());
    let config = term::Config::default();

    for diagnostic in to_diagnostics(file_id, source, error) {
        term::emit(writer, &config, &files, &diagnostic)?;
    }
    Ok(())
}

fn build(
    file_id: usize,
    source: &str,
    message: String,
    span: &Span,
    help: Option<String>,
) -> Diagnostic<usize> {
    let mut diagnostic = Diagnostic::error()
        .with_message(message)
        .with_labels(vec![Label::primary(file_id, clamp(span, source))]);
    if let Some(help) = help {
        diagnostic = diagnostic.with_notes(vec![format!("help: {}", help)]);
    }
    diagnostic
}

/// Keep label ranges inside the source; end-of-file errors point past it.
fn clamp(span: &Span, source: &str) -> Range<usize> {
    let end = span.end.min(source.len());
    let start = span.start.min(end);
    start..end
}

#[cfg(test)]
mod tests {
    use super::*;
    use augment_engine::Augmenter;
    use termcolor::NoColor;

    fn render(source: &str) -> String {
        let error = Augmenter::new().augment_source(source).unwrap_err();
        let mut out = NoColor::new(Vec::new());
        emit(&mut out, Path::new("input.ts"), source, &error).unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn test_lex_error_rendering() {
        let rendered = render("let s = \"open;");
        assert!(rendered.contains("error: Unterminated string literal"));
        assert!(rendered.contains("input.ts:1:9"));
        assert!(rendered.contains("help:"));
    }

    #[test]
    fn test_parse_error_rendering() {
        let rendered = render("class { }");
        assert!(rendered.contains("class declaration requires a name"));
        assert!(rendered.contains("input.ts:1:"));
    }

    #[test]
    fn test_span_past_end_is_clamped() {
        let span = Span::new(10, 20, 1, 11);
        assert_eq!(clamp(&span, "short"), 5..5);
    }
}
