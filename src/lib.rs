//! **Watch an object-storage bucket and get emailed when its contents change.**
//!
//! `bucketwatch` periodically lists a bucket with an external CLI (by default
//! `b2 ls --recursive`), compares the listing with the one from the previous
//! cycle, and sends a plain-text summary of added and removed objects over
//! SMTP. The listing is then rotated into place as the next baseline.
//!
//! ## Core Concepts & Modules
//!
//! - **[`config`]**: the JSON configuration document, its defaults, and the
//!   `--first-run` bootstrap.
//! - **[`lister`]**: the [`BucketLister`] capability and the command-backed
//!   implementation.
//! - **[`snapshot`]**: the `current` and `previous` snapshot slots and rotation.
//! - **[`diff`]**: [`ChangeSet`] computation between two snapshots.
//! - **[`notify`]**: message rendering and the SMTP [`EmailNotifier`].
//! - **[`monitor`]**: the loop that ties the stages together.
//!
//! ## Comparing Two Listings
//!
//! ```
//! use bucketwatch::{ChangeSet, Snapshot};
//!
//! let previous = Snapshot::parse("a.txt\nb.txt\n");
//! let current = Snapshot::parse("b.txt\nc.txt\n");
//!
//! let changes = ChangeSet::between(&current, &previous);
//! assert_eq!(changes.added, vec!["c.txt"]);
//! assert_eq!(changes.removed, vec!["a.txt"]);
//! ```
//!
//! ## Running the Monitor
//!
//! ```no_run
//! use bucketwatch::config::load_or_default;
//! use bucketwatch::monitor::run_monitor_loop;
//!
//! let (config, _loaded_from) = load_or_default(None);
//! let state = run_monitor_loop(&config, false);
//! println!("{}", state.summary());
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod lister;
pub mod monitor;
pub mod notify;
pub mod snapshot;

pub use config::{EmailConfig, MonitorConfig};
pub use diff::{compare_slots, ChangeSet};
pub use error::{ListError, MonitorError, NotifyError, Result, SnapshotError};
pub use lister::{BucketLister, CommandLister};
pub use monitor::{CycleOutcome, Monitor, MonitorState};
pub use notify::{Delivery, EmailNotifier, Notifier};
pub use snapshot::{Slot, Snapshot, SnapshotStore};
