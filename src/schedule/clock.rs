//! Clock implementations.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use super::Clock;

/// Wall-clock time since construction.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock advanced by hand.
///
/// Clones share the same time, so a test (or a browser host feeding
/// animation-frame timestamps) can keep a handle after moving one into
/// the engine.
///
/// ```
/// use std::time::Duration;
/// use sound_memory::schedule::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let engine_side = clock.clone();
/// clock.advance(Duration::from_millis(500));
/// assert_eq!(engine_side.now(), Duration::from_millis(500));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Jump to an absolute time. Earlier values are ignored to stay monotonic.
    pub fn set(&self, to: Duration) {
        if to > self.now.get() {
            self.now.set(to);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}
