//! Lifecycle entities.

use std::fmt;
use std::time::Duration;

/// Identity of a scheduled action. Ids increase in scheduling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

/// When a scheduled action becomes runnable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Due {
    /// Once virtual time reaches this instant.
    At(Duration),
    /// Once the frame counter reaches this frame.
    Frame(u64),
}

impl Due {
    pub fn is_due(&self, now: Duration, frame: u64) -> bool {
        match *self {
            Due::At(at) => at <= now,
            Due::Frame(f) => f <= frame,
        }
    }
}

/// Result of one scheduler tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Actions that ran to completion.
    pub ran: usize,
    /// Actions that panicked.
    pub faulted: usize,
}

/// What a host teardown released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeardownReport {
    /// Subscriptions removed from the bus.
    pub unsubscribed: usize,
    /// Subscriptions the bus no longer knew about.
    pub missing: usize,
    /// Pending actions cancelled.
    pub cancelled: usize,
}
