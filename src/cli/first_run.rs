//! `--first-run` handler: write the default configuration and exit.

use crate::config::{write_default_config, DEFAULT_CONFIG_FILE};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Write the built-in defaults to `target` (or `./config.json`).
///
/// Returns the path written. No monitoring is performed.
pub fn run_first_run(target: Option<&Path>) -> Result<PathBuf> {
    let path = target.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf);

    if path.exists() {
        tracing::warn!("Overwriting existing configuration at {}", path.display());
    }

    write_default_config(&path)
        .with_context(|| format!("failed to write default config to {}", path.display()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_config_file, MonitorConfig};

    #[test]
    fn test_first_run_writes_loadable_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("config.json");

        let written = run_first_run(Some(&target)).unwrap();
        assert_eq!(written, target);
        assert_eq!(load_config_file(&target).unwrap(), MonitorConfig::default());
    }
}
