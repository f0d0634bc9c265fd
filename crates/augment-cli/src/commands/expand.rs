//! `augment expand`: Rewrite marked classes and print or write the result.

use std::path::PathBuf;

use anyhow::Context;
use augment_engine::{Augmenter, ClassReport};
use clap::ValueEnum;
use serde::Serialize;
use tracing::debug;

use super::files::{collect_ts_files, SourceFile};
use crate::diagnostics;
use crate::output::{StyledOutput, Tone};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Expanded source text
    Pretty,
    /// Per-file class reports
    Json,
}

pub struct ExpandOptions {
    pub files: Vec<String>,
    pub out_dir: Option<PathBuf>,
    pub check: bool,
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct FileReport<'a> {
    file: String,
    changed: bool,
    classes: &'a [ClassReport],
}

/// Returns the process exit code.
pub fn execute(
    augmenter: &Augmenter,
    options: ExpandOptions,
    out: &mut StyledOutput,
) -> anyhow::Result<i32> {
    let files = collect_ts_files(&options.files)?;
    let multiple = files.len() > 1;

    let mut failed = 0usize;
    let mut changed = Vec::new();
    let mut reports = Vec::new();

    for file in &files {
        let source = std::fs::read_to_string(&file.path)
            .with_context(|| format!("failed to read {}", file.path.display()))?;

        let result = match augmenter.augment_source(&source) {
            Ok(result) => result,
            Err(err) => {
                diagnostics::emit(out.stderr(), &file.path, &source, &err)?;
                failed += 1;
                continue;
            }
        };
        debug!(
            file = %file.path.display(),
            classes = result.classes.len(),
            "expanded"
        );

        if result.is_changed() {
            changed.push(file.path.display().to_string());
        }

        if options.check {
            continue;
        }

        match options.format {
            OutputFormat::Json => {
                reports.push((file.path.display().to_string(), result.is_changed(), result.classes))
            }
            OutputFormat::Pretty => {
                // Files without markers keep their comments and layout.
                let expanded = if result.is_changed() {
                    result.to_source()
                } else {
                    source
                };
                match &options.out_dir {
                    Some(out_dir) => write_output(out_dir, file, &expanded)?,
                    None => {
                        if multiple {
                            out.file_banner(&file.path);
                        }
                        out.text(&expanded);
                    }
                }
            }
        }
    }

    if options.format == OutputFormat::Json && !options.check {
        let entries: Vec<FileReport<'_>> = reports
            .iter()
            .map(|(file, is_changed, classes)| FileReport {
                file: file.clone(),
                changed: *is_changed,
                classes,
            })
            .collect();
        out.line(&serde_json::to_string_pretty(&entries)?);
    }

    if options.check {
        for path in &changed {
            out.status(Tone::Attention, "would rewrite", path);
        }
        if changed.is_empty() && failed == 0 {
            out.status(
                Tone::Done,
                "ok",
                &format!("{} file(s) have no markers to expand", files.len()),
            );
        }
    } else if let Some(out_dir) = &options.out_dir {
        out.status(
            Tone::Done,
            "expanded",
            &format!("{} file(s) into {}", files.len() - failed, out_dir.display()),
        );
    }
    out.flush();

    if failed > 0 {
        out.error_line(&format!("{} file(s) failed to parse", failed));
        return Ok(1);
    }
    if options.check && !changed.is_empty() {
        return Ok(1);
    }
    Ok(0)
}

fn write_output(out_dir: &std::path::Path, file: &SourceFile, expanded: &str) -> anyhow::Result<()> {
    let target = out_dir.join(&file.relative);
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(&target, expanded)
        .with_context(|| format!("failed to write {}", target.display()))?;
    debug!(target = %target.display(), "wrote");
    Ok(())
}
