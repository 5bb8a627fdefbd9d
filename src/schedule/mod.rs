//! Time source and the delayed-resolution timer.
//!
//! After the second flip the engine schedules a resolution `resolve_delay`
//! in the future. Nothing runs in the background: the host either calls
//! `MatchEngine::tick` from its event loop, or arms its own timer and hands
//! the returned [`ResolutionTicket`] back to `MatchEngine::resolve_due`.
//!
//! Tickets carry an epoch. Cancelling (replay, shutdown) or resolving bumps
//! past it, so a late callback with an old ticket is a no-op.

mod clock;
mod timer;

pub use clock::{ManualClock, SystemClock};
pub use timer::{ResolutionTicket, ResolutionTimer};

use std::time::Duration;

/// Monotonic time source.
///
/// `now` is measured from an arbitrary, fixed origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }
}
