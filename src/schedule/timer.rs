//! Single-slot, cancelable resolution timer.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Handle for one scheduled resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolutionTicket {
    epoch: u64,
    due: Duration,
}

impl ResolutionTicket {
    /// Clock reading at which the resolution becomes due.
    #[must_use]
    pub fn due(&self) -> Duration {
        self.due
    }

    /// Scheduling generation; unique per timer.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// Holds at most one pending resolution.
#[derive(Clone, Debug, Default)]
pub struct ResolutionTimer {
    pending: Option<ResolutionTicket>,
    next_epoch: u64,
}

impl ResolutionTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer, replacing anything pending.
    pub fn schedule(&mut self, now: Duration, delay: Duration) -> ResolutionTicket {
        let ticket = ResolutionTicket {
            epoch: self.next_epoch,
            due: now + delay,
        };
        self.next_epoch += 1;
        self.pending = Some(ticket);
        ticket
    }

    /// Disarm, returning what was pending.
    pub fn cancel(&mut self) -> Option<ResolutionTicket> {
        self.pending.take()
    }

    #[must_use]
    pub fn pending(&self) -> Option<ResolutionTicket> {
        self.pending
    }

    /// Is `ticket` the one currently armed?
    #[must_use]
    pub fn is_current(&self, ticket: ResolutionTicket) -> bool {
        self.pending == Some(ticket)
    }

    /// Pending and due at `now`.
    #[must_use]
    pub fn is_due(&self, now: Duration) -> bool {
        self.pending.is_some_and(|t| now >= t.due)
    }

    /// Time left until the pending ticket is due. Zero once overdue.
    #[must_use]
    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        self.pending.map(|t| t.due.saturating_sub(now))
    }
}
