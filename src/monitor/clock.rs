//! Time source for the monitor loop.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Longest uninterrupted sleep; bounds how long a stop request can go unseen.
const TICK: Duration = Duration::from_millis(250);

/// Sleeping and wall-clock time, injectable so tests never block.
pub trait Clock {
    /// Block for `duration`, returning early once `stop` is set.
    fn sleep(&mut self, duration: Duration, stop: &AtomicBool);

    /// Current wall-clock time.
    fn now(&self) -> DateTime<Utc>;
}

/// Real time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&mut self, duration: Duration, stop: &AtomicBool) {
        // Unrepresentable deadline: sleep until stopped
        let deadline = Instant::now().checked_add(duration);
        while !stop.load(Ordering::Relaxed) {
            let remaining = match deadline {
                Some(deadline) => deadline.saturating_duration_since(Instant::now()),
                None => TICK,
            };
            if remaining.is_zero() {
                break;
            }
            std::thread::sleep(remaining.min(TICK));
        }
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
