//! Continuous bucket monitoring.
//!
//! Lists the bucket on a fixed interval, diffs the listing against the
//! previous snapshot, emails a summary when objects were added or removed,
//! and rotates the listing into place as the next baseline.

pub(crate) mod clock;
pub(crate) mod loop_impl;
pub(crate) mod state;

pub use clock::{Clock, SystemClock};
pub use loop_impl::{next_delay, run_monitor_loop, Monitor};
pub use state::{CycleOutcome, MonitorState};
