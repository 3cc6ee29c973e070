//! Default mode handler: load configuration and run the monitor loop.

use crate::config::{load_or_default, Validatable};
use crate::monitor::{run_monitor_loop, MonitorState};
use std::path::Path;

/// Load the configuration (falling back to defaults) and monitor until
/// interrupted, or for a single cycle when `once` is set.
pub fn run_monitor(config_path: Option<&Path>, once: bool) -> MonitorState {
    let (config, loaded_from) = load_or_default(config_path);
    if let Some(path) = &loaded_from {
        tracing::info!("Using configuration from {}", path.display());
    }

    for problem in config.validate() {
        tracing::warn!("Config: {problem}");
    }

    tracing::info!(
        "Checking every {:?} (retry after failures: {:?})",
        config.check_interval,
        config.retry_delay
    );

    run_monitor_loop(&config, once)
}
