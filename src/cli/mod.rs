//! CLI command handlers.
//!
//! Testable handlers invoked by main.rs, one per mode of the binary.

mod first_run;
mod monitor;

pub use first_run::run_first_run;
pub use monitor::run_monitor;
