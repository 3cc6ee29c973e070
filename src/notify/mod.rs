//! Change notifications.
//!
//! The monitor loop hands every non-empty [`ChangeSet`] to a [`Notifier`].
//! [`EmailNotifier`] is the production implementation; tests substitute a
//! recording notifier.

mod email;
pub mod report;

pub use email::EmailNotifier;
pub use report::{render_body, MAX_LISTED};

use crate::diff::ChangeSet;
use crate::error::NotifyError;

/// Outcome of a successful notify call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// A message went out to this many recipients
    Sent { recipients: usize },
    /// Nothing changed, nothing sent
    Skipped,
}

/// Receives change sets from the monitor loop.
pub trait Notifier {
    /// Deliver a summary of `changes`. Empty change sets must be skipped.
    fn notify(&mut self, changes: &ChangeSet) -> Result<Delivery, NotifyError>;
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&mut self, changes: &ChangeSet) -> Result<Delivery, NotifyError> {
        (**self).notify(changes)
    }
}
