//! Configuration module for bucketwatch.
//!
//! - JSON config document with discovery and built-in defaults
//! - `--first-run` bootstrap that writes the defaults
//! - Lenient interval/port coercion
//! - Non-fatal validation of placeholder values
//!
//! # Configuration File
//!
//! ```json
//! {
//!     "bucket_name": "backups",
//!     "check_interval": 300,
//!     "current_file": "current_files.txt",
//!     "previous_file": "previous_files.txt",
//!     "email": {
//!         "smtp_server": "smtp.example.com",
//!         "smtp_port": 587,
//!         "sender": "bot@example.com",
//!         "password": "...",
//!         "recipients": ["ops@example.com"],
//!         "subject": "Changes in Backblaze Storage"
//!     }
//! }
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    DEFAULT_CHECK_INTERVAL, DEFAULT_CONFIG_FILE, DEFAULT_LIST_COMMAND, DEFAULT_RETRY_DELAY,
    DEFAULT_SMTP_PORT,
};
pub use file::{
    discover_config_file, generate_default_config, load_config_file, load_or_default,
    write_default_config, ConfigFileError,
};
pub use types::{parse_duration, EmailConfig, MonitorConfig};
pub use validation::{ConfigError, Validatable};
