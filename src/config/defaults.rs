//! Built-in default configuration.
//!
//! These values are used when no configuration document exists, when the
//! document is malformed, and by `--first-run` to seed a new `config.json`.

use super::types::{EmailConfig, MonitorConfig};
use std::path::PathBuf;
use std::time::Duration;

/// Name of the configuration document in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Sleep between successful cycles.
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(300);

/// Fixed sleep after a failed listing or cycle error.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(60);

/// SMTP submission port (STARTTLS).
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Recursive listing of a Backblaze B2 bucket.
pub const DEFAULT_LIST_COMMAND: &[&str] = &["b2", "ls", "--recursive", "b2://{bucket}"];

pub const DEFAULT_SUBJECT: &str = "Changes in Backblaze Storage";

/// Bucket name shipped in the bootstrap document.
pub const PLACEHOLDER_BUCKET: &str = "BUCKET";

/// Address shipped in the bootstrap document.
pub const PLACEHOLDER_ADDRESS: &str = "example@example.com";

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            bucket_name: PLACEHOLDER_BUCKET.to_string(),
            check_interval: DEFAULT_CHECK_INTERVAL,
            current_file: PathBuf::from("current_files.txt"),
            previous_file: PathBuf::from("previous_files.txt"),
            email: EmailConfig::default(),
            list_command: DEFAULT_LIST_COMMAND.iter().map(|s| (*s).to_string()).collect(),
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_server: "smtp".to_string(),
            smtp_port: DEFAULT_SMTP_PORT,
            sender: PLACEHOLDER_ADDRESS.to_string(),
            password: String::new(),
            recipients: vec![PLACEHOLDER_ADDRESS.to_string(), PLACEHOLDER_ADDRESS.to_string()],
            subject: DEFAULT_SUBJECT.to_string(),
        }
    }
}
