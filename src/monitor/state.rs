//! Cycle outcomes and session statistics.

use chrono::{DateTime, Utc};
use std::time::Instant;

/// How one monitor cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The listing command failed; diff, notify and rotate were skipped
    ListingFailed,
    /// No baseline to compare against; current was rotated into place
    NoBaseline,
    /// Compared, nothing changed, rotated
    Unchanged,
    /// Changes found and delivered, rotated
    Notified { added: usize, removed: usize },
    /// Changes found but delivery failed; rotated anyway
    NotifyFailed { added: usize, removed: usize },
}

impl CycleOutcome {
    /// Whether the cycle should be retried after the short failure delay.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::ListingFailed)
    }
}

impl std::fmt::Display for CycleOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ListingFailed => write!(f, "listing failed"),
            Self::NoBaseline => write!(f, "no baseline, snapshot stored"),
            Self::Unchanged => write!(f, "no changes"),
            Self::Notified { added, removed } => {
                write!(f, "+{added} -{removed}, notification sent")
            }
            Self::NotifyFailed { added, removed } => {
                write!(f, "+{added} -{removed}, notification failed")
            }
        }
    }
}

/// Counters for the running monitor session.
#[derive(Debug, Clone)]
pub struct MonitorState {
    /// When the session started.
    pub started_at: Instant,
    /// Completed cycles, failed ones included.
    pub cycles: u64,
    pub listing_failures: u64,
    /// Cycles aborted by a stage error (e.g. rotation).
    pub stage_errors: u64,
    pub notifications_sent: u64,
    pub notify_failures: u64,
    pub last_outcome: Option<CycleOutcome>,
    /// Wall-clock start of the most recent cycle.
    pub last_cycle_at: Option<DateTime<Utc>>,
}

impl Default for MonitorState {
    fn default() -> Self {
        Self {
            started_at: Instant::now(),
            cycles: 0,
            listing_failures: 0,
            stage_errors: 0,
            notifications_sent: 0,
            notify_failures: 0,
            last_outcome: None,
            last_cycle_at: None,
        }
    }
}

impl MonitorState {
    pub(crate) fn record(&mut self, outcome: Option<CycleOutcome>, at: DateTime<Utc>) {
        self.cycles += 1;
        self.last_cycle_at = Some(at);
        self.last_outcome = outcome;

        match outcome {
            None => self.stage_errors += 1,
            Some(CycleOutcome::ListingFailed) => self.listing_failures += 1,
            Some(CycleOutcome::Notified { .. }) => self.notifications_sent += 1,
            Some(CycleOutcome::NotifyFailed { .. }) => self.notify_failures += 1,
            Some(CycleOutcome::NoBaseline | CycleOutcome::Unchanged) => {}
        }
    }

    /// Whether the most recent cycle ended in a failure of any kind.
    #[must_use]
    pub fn last_cycle_failed(&self) -> bool {
        match self.last_outcome {
            None => self.cycles > 0,
            Some(outcome) => {
                outcome.is_failure() || matches!(outcome, CycleOutcome::NotifyFailed { .. })
            }
        }
    }

    /// One-line session summary for the console.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} cycle(s) | {} notification(s) sent | {} listing failure(s) | {} delivery failure(s) | {} stage error(s) | uptime {}s",
            self.cycles,
            self.notifications_sent,
            self.listing_failures,
            self.notify_failures,
            self.stage_errors,
            self.started_at.elapsed().as_secs(),
        )
    }
}
