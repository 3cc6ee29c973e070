//! Main monitor loop.
//!
//! BOOTSTRAP (once, only without a baseline): list, rotate, no notification.
//! CYCLE (forever): list, diff, notify on changes, rotate, sleep.
//!
//! Every stage returns a typed result and [`next_delay`] maps the cycle
//! result to the sleep before the next cycle.

use super::clock::{Clock, SystemClock};
use super::state::{CycleOutcome, MonitorState};
use crate::config::MonitorConfig;
use crate::diff::compare_slots;
use crate::error::{MonitorError, Result};
use crate::lister::{BucketLister, CommandLister};
use crate::notify::{Delivery, EmailNotifier, Notifier};
use crate::snapshot::{Slot, SnapshotStore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Delay before the next cycle, given how this one ended.
///
/// | cycle result          | next sleep       |
/// |-----------------------|------------------|
/// | `ListingFailed`       | `retry_delay`    |
/// | stage error           | `retry_delay`    |
/// | anything else         | `check_interval` |
#[must_use]
pub fn next_delay(result: &Result<CycleOutcome>, config: &MonitorConfig) -> Duration {
    match result {
        Ok(outcome) if !outcome.is_failure() => config.check_interval,
        _ => config.retry_delay,
    }
}

/// The snapshot-diff-notify loop for one bucket.
pub struct Monitor<L, N, C> {
    config: MonitorConfig,
    store: SnapshotStore,
    lister: L,
    notifier: N,
    clock: C,
    state: MonitorState,
    stop: Arc<AtomicBool>,
    once: bool,
}

impl<L: BucketLister, N: Notifier, C: Clock> Monitor<L, N, C> {
    pub fn new(config: MonitorConfig, lister: L, notifier: N, clock: C) -> Self {
        let store = SnapshotStore::new(config.current_file.clone(), config.previous_file.clone());
        Self {
            config,
            store,
            lister,
            notifier,
            clock,
            state: MonitorState::default(),
            stop: Arc::new(AtomicBool::new(false)),
            once: false,
        }
    }

    /// Share a stop flag, typically set from a signal handler.
    #[must_use]
    pub fn with_stop_flag(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = stop;
        self
    }

    /// Run a single cycle after bootstrap, then return.
    #[must_use]
    pub fn once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    #[must_use]
    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    #[must_use]
    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn lister(&self) -> &L {
        &self.lister
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// Run until the stop flag is set (or after one cycle in `once` mode).
    pub fn run(&mut self) {
        tracing::info!("Monitoring started for bucket {}", self.config.bucket_name);

        if !self.stopped() {
            self.bootstrap();
        }

        while !self.stopped() {
            let started = self.clock.now();
            let result = self.run_cycle();
            let delay = next_delay(&result, &self.config);

            match &result {
                Ok(outcome) => tracing::info!("Cycle {}: {outcome}", self.state.cycles + 1),
                Err(e) => tracing::error!("Cycle {} aborted: {e}", self.state.cycles + 1),
            }
            self.state.record(result.ok(), started);

            if self.once || self.stopped() {
                break;
            }

            tracing::debug!("Next check in {delay:?}");
            self.clock.sleep(delay, &self.stop);
        }

        if self.stopped() {
            tracing::info!("Shutting down gracefully...");
        }
        tracing::info!("{}", self.state.summary());
    }

    /// Establish an initial baseline when none exists. No notification is
    /// sent for its contents. Returns whether a baseline was created.
    pub fn bootstrap(&mut self) -> bool {
        if self.store.exists(Slot::Previous) {
            return false;
        }

        tracing::info!("No previous snapshot found, establishing baseline");
        if let Err(e) = self
            .lister
            .list(&self.config.bucket_name, self.store.path(Slot::Current))
        {
            tracing::warn!("Initial listing failed: {e}");
            return false;
        }

        match self.store.rotate() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to store initial baseline: {e}");
                false
            }
        }
    }

    /// One list, diff, notify, rotate pass.
    ///
    /// A failed listing skips the remaining stages so the baseline is left
    /// untouched. Delivery failures are logged and swallowed; the baseline
    /// still advances. Rotation failures surface as `Err`.
    pub fn run_cycle(&mut self) -> Result<CycleOutcome> {
        if let Err(e) = self
            .lister
            .list(&self.config.bucket_name, self.store.path(Slot::Current))
        {
            tracing::warn!("{}", MonitorError::from(e));
            return Ok(CycleOutcome::ListingFailed);
        }

        let outcome = match compare_slots(&self.store) {
            None => CycleOutcome::NoBaseline,
            Some(changes) if changes.is_empty() => CycleOutcome::Unchanged,
            Some(changes) => {
                let (added, removed) = (changes.added.len(), changes.removed.len());
                match self.notifier.notify(&changes) {
                    Ok(Delivery::Sent { .. }) => CycleOutcome::Notified { added, removed },
                    Ok(Delivery::Skipped) => CycleOutcome::Unchanged,
                    Err(e) => {
                        tracing::warn!("{}", MonitorError::from(e));
                        CycleOutcome::NotifyFailed { added, removed }
                    }
                }
            }
        };

        self.store.rotate()?;
        Ok(outcome)
    }
}

/// Run the monitor with the production lister, notifier and clock.
///
/// Installs a Ctrl-C handler that stops the loop between blocking calls.
/// Returns the session statistics once the loop ends.
pub fn run_monitor_loop(config: &MonitorConfig, once: bool) -> MonitorState {
    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop_flag = Arc::clone(&stop);
        if let Err(e) = ctrlc::set_handler(move || {
            stop_flag.store(true, Ordering::Relaxed);
        }) {
            tracing::warn!("Could not install interrupt handler: {e}");
        }
    }

    let lister = CommandLister::new(config.list_command.clone());
    let notifier = EmailNotifier::new(config.email.clone());
    let mut monitor = Monitor::new(config.clone(), lister, notifier, SystemClock)
        .with_stop_flag(stop)
        .once(once);
    monitor.run();
    monitor.state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::ChangeSet;
    use crate::error::{ListError, NotifyError, SnapshotError};
    use chrono::{DateTime, Utc};
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    struct StaticLister(Option<&'static str>);

    impl BucketLister for StaticLister {
        fn list(&mut self, _bucket: &str, output: &Path) -> std::result::Result<usize, ListError> {
            match self.0 {
                Some(text) => {
                    std::fs::write(output, text).map_err(|e| ListError::io(output, e))?;
                    Ok(text.lines().count())
                }
                None => Err(ListError::ExitStatus {
                    program: "b2".to_string(),
                    status: "exit status: 1".to_string(),
                }),
            }
        }
    }

    #[derive(Default)]
    struct CountingNotifier {
        calls: usize,
        fail: bool,
    }

    impl Notifier for CountingNotifier {
        fn notify(&mut self, _changes: &ChangeSet) -> std::result::Result<Delivery, NotifyError> {
            self.calls += 1;
            if self.fail {
                Err(NotifyError::Transport("connection refused".to_string()))
            } else {
                Ok(Delivery::Sent { recipients: 1 })
            }
        }
    }

    struct NoSleep;

    impl Clock for NoSleep {
        fn sleep(&mut self, _duration: Duration, _stop: &AtomicBool) {}
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    fn config(dir: &TempDir) -> MonitorConfig {
        MonitorConfig {
            current_file: dir.path().join("current.txt"),
            previous_file: dir.path().join("previous.txt"),
            ..MonitorConfig::default()
        }
    }

    #[test]
    fn test_next_delay_table() {
        let config = MonitorConfig::default();
        assert_eq!(next_delay(&Ok(CycleOutcome::Unchanged), &config), config.check_interval);
        assert_eq!(
            next_delay(&Ok(CycleOutcome::NotifyFailed { added: 1, removed: 0 }), &config),
            config.check_interval
        );
        assert_eq!(next_delay(&Ok(CycleOutcome::ListingFailed), &config), config.retry_delay);

        let err: Result<CycleOutcome> =
            Err(SnapshotError::Missing(PathBuf::from("current.txt")).into());
        assert_eq!(next_delay(&err, &config), config.retry_delay);
    }

    #[test]
    fn test_cycle_without_baseline_rotates() {
        let dir = TempDir::new().unwrap();
        let mut monitor = Monitor::new(
            config(&dir),
            StaticLister(Some("a.txt\n")),
            CountingNotifier::default(),
            NoSleep,
        );

        assert_eq!(monitor.run_cycle().unwrap(), CycleOutcome::NoBaseline);
        assert!(monitor.store().exists(Slot::Previous));
        assert_eq!(monitor.notifier().calls, 0);
    }

    #[test]
    fn test_delivery_failure_still_rotates() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir);
        std::fs::write(&cfg.previous_file, "a.txt\n").unwrap();
        let mut monitor = Monitor::new(
            cfg.clone(),
            StaticLister(Some("b.txt\n")),
            CountingNotifier { calls: 0, fail: true },
            NoSleep,
        );

        let outcome = monitor.run_cycle().unwrap();
        assert_eq!(outcome, CycleOutcome::NotifyFailed { added: 1, removed: 1 });
        assert_eq!(std::fs::read_to_string(&cfg.previous_file).unwrap(), "b.txt\n");
    }

    #[test]
    fn test_once_runs_bootstrap_and_one_cycle() {
        let dir = TempDir::new().unwrap();
        let mut monitor = Monitor::new(
            config(&dir),
            StaticLister(Some("a.txt\n")),
            CountingNotifier::default(),
            NoSleep,
        )
        .once(true);

        monitor.run();
        assert_eq!(monitor.state().cycles, 1);
        assert_eq!(monitor.state().last_outcome, Some(CycleOutcome::Unchanged));
        assert_eq!(monitor.notifier().calls, 0);
    }

    #[test]
    fn test_preset_stop_flag_skips_everything() {
        let dir = TempDir::new().unwrap();
        let mut monitor = Monitor::new(
            config(&dir),
            StaticLister(Some("a.txt\n")),
            CountingNotifier::default(),
            NoSleep,
        )
        .with_stop_flag(Arc::new(AtomicBool::new(true)));

        monitor.run();
        assert_eq!(monitor.state().cycles, 0);
        assert!(!monitor.store().exists(Slot::Current));
    }
}
