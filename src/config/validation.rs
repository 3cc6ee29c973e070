//! Configuration validation.
//!
//! Validation only reports problems; the monitor still starts with whatever
//! was loaded and the affected stage fails at the point of use.

use super::defaults::{PLACEHOLDER_ADDRESS, PLACEHOLDER_BUCKET};
use super::types::{EmailConfig, MonitorConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// A single configuration problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

fn error(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError {
        field: field.to_string(),
        message: message.into(),
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for MonitorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.bucket_name.trim().is_empty() {
            errors.push(error("bucket_name", "Bucket name is empty"));
        } else if self.bucket_name == PLACEHOLDER_BUCKET {
            errors.push(error("bucket_name", "Bucket name is still the placeholder 'BUCKET'"));
        }

        if self.check_interval.is_zero() {
            errors.push(error("check_interval", "Interval must be greater than zero"));
        }

        if self.current_file == self.previous_file {
            errors.push(error(
                "previous_file",
                "Current and previous snapshot paths must differ",
            ));
        }

        if self.list_command.is_empty() {
            errors.push(error("list_command", "Listing command is empty"));
        }

        errors.extend(self.email.validate());
        errors
    }
}

impl Validatable for EmailConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.smtp_server.trim().is_empty() {
            errors.push(error("email.smtp_server", "SMTP server is empty"));
        }

        if self.password.is_empty() {
            errors.push(error("email.password", "Password is empty"));
        }

        if self.recipients.is_empty() {
            errors.push(error("email.recipients", "No recipients configured"));
        }

        let placeholders = std::iter::once(&self.sender)
            .chain(&self.recipients)
            .filter(|addr| addr.as_str() == PLACEHOLDER_ADDRESS)
            .count();
        if placeholders > 0 {
            errors.push(error(
                "email",
                format!("{placeholders} address(es) still set to {PLACEHOLDER_ADDRESS}"),
            ));
        }

        errors
    }
}
