//! Locating and loading `augment.toml`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use augment_engine::transform::config::CONFIG_FILE_NAME;
use augment_engine::AugmentConfig;
use tracing::debug;

/// Load the explicit config file, or the nearest `augment.toml` above the
/// working directory, or the defaults.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<AugmentConfig> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => discover(&std::env::current_dir()?),
    };

    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration");
            AugmentConfig::from_file(&path)
                .with_context(|| format!("failed to load {}", path.display()))
        }
        None => Ok(AugmentConfig::default()),
    }
}

/// Walk up from `start` looking for `augment.toml`.
pub fn discover(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "log-field = \"logger\"\n").unwrap();

        assert_eq!(discover(&nested), Some(dir.path().join(CONFIG_FILE_NAME)));
    }

    #[test]
    fn test_load_explicit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "disabled = [\"Builder\"]\n").unwrap();

        let config = load(Some(&path)).unwrap();
        assert!(config.is_disabled("Builder"));
    }

    #[test]
    fn test_load_reports_path() {
        let err = load(Some(Path::new("missing/augment.toml"))).unwrap_err();
        assert!(err.to_string().contains("missing/augment.toml"));
    }
}
