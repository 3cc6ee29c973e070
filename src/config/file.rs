//! Configuration file loading, discovery and bootstrap.

use super::defaults::DEFAULT_CONFIG_FILE;
use super::types::MonitorConfig;
use serde::Serialize;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Discover the configuration document.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. `config.json` in the current directory
/// 3. User config directory (~/.config/bucketwatch/config.json)
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    // An explicit path is authoritative even when it does not exist yet
    if let Some(path) = explicit_path {
        return path.exists().then(|| path.to_path_buf());
    }

    if let Ok(cwd) = std::env::current_dir() {
        let path = cwd.join(DEFAULT_CONFIG_FILE);
        if path.exists() {
            return Some(path);
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let path = config_dir.join("bucketwatch").join(DEFAULT_CONFIG_FILE);
        if path.exists() {
            return Some(path);
        }
    }

    None
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading or writing the file
    Io(std::io::Error),
    /// JSON parsing error
    Parse(serde_json::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to access config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ConfigFileError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load a `MonitorConfig` from a JSON file.
pub fn load_config_file(path: &Path) -> Result<MonitorConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: MonitorConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Load config from the discovered file, or return the built-in defaults.
///
/// Never fails: a missing or malformed document is reported on the console
/// and replaced by [`MonitorConfig::default`].
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (MonitorConfig, Option<PathBuf>) {
    match discover_config_file(explicit_path) {
        None => {
            let shown = explicit_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
            tracing::warn!(
                "Configuration file {} not found. Using default configuration.",
                shown.display()
            );
            (MonitorConfig::default(), None)
        }
        Some(path) => match load_config_file(&path) {
            Ok(config) => {
                tracing::debug!("Loaded configuration from {}", path.display());
                (config, Some(path))
            }
            Err(e) => {
                tracing::warn!("Error loading configuration file {}: {e}", path.display());
                tracing::warn!("Using default configuration.");
                (MonitorConfig::default(), None)
            }
        },
    }
}

// ============================================================================
// Bootstrap
// ============================================================================

/// Render the built-in defaults as the bootstrap document.
#[must_use]
pub fn generate_default_config() -> String {
    to_pretty_json(&MonitorConfig::default())
}

/// Write the built-in defaults to `path`, overwriting any existing file.
pub fn write_default_config(path: &Path) -> Result<(), ConfigFileError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, generate_default_config())?;
    Ok(())
}

/// Pretty JSON with the 4-space indent the bootstrap document has always used.
fn to_pretty_json<T: Serialize>(value: &T) -> String {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    if value.serialize(&mut serializer).is_err() {
        return String::new();
    }
    buf.push(b'\n');
    String::from_utf8(buf).unwrap_or_default()
}

// ============================================================================
// Tests
// ============================================================================
