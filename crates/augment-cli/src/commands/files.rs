//! Shared file collection utilities for CLI commands.

use std::path::{Path, PathBuf};

use anyhow::bail;

/// A source file plus the path it should have under an output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub relative: PathBuf,
}

/// Collect all .ts source files from the given paths (files or directories).
///
/// Explicitly named files are taken regardless of extension; directories are
/// walked for `.ts` files, skipping declaration files.
pub fn collect_ts_files(paths: &[String]) -> anyhow::Result<Vec<SourceFile>> {
    let mut files = Vec::new();

    for path_str in paths {
        let path = Path::new(path_str);
        if path.is_file() {
            let relative = path
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| path.to_path_buf());
            files.push(SourceFile {
                path: path.to_path_buf(),
                relative,
            });
        } else if path.is_dir() {
            collect_ts_in_dir(path, path, &mut files)?;
        } else {
            bail!("no such file or directory: {}", path_str);
        }
    }

    Ok(files)
}

/// Recursively collect .ts files in a directory.
fn collect_ts_in_dir(root: &Path, dir: &Path, files: &mut Vec<SourceFile>) -> anyhow::Result<()> {
    let mut entries = std::fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let name = entry.file_name();
        let name_str = name.to_string_lossy();

        // Skip hidden dirs, dist, node_modules
        if path.is_dir() {
            if name_str.starts_with('.') || name_str == "dist" || name_str == "node_modules" {
                continue;
            }
            collect_ts_in_dir(root, &path, files)?;
        } else if is_ts_source(&name_str) {
            let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
            files.push(SourceFile { path, relative });
        }
    }
    Ok(())
}

fn is_ts_source(name: &str) -> bool {
    name.ends_with(".ts") && !name.ends_with(".d.ts")
}
