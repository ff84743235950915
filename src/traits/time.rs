use std::cell::Cell;
use std::time::Instant;

/// Where a session reads "now" from, in seconds.
///
/// The timing core never reads a clock itself; the driver samples one of
/// these once per tick and passes the value in.
pub trait TimeProvider {
    fn now(&self) -> f64;
}

/// Seconds since construction on the monotonic wall clock.
/// The driver uses it to pace simulated ticks in realtime mode.
#[derive(Debug)]
pub struct SystemTimeProvider {
    origin: Instant,
}

impl SystemTimeProvider {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for SystemTimeProvider {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Session clock stepped explicitly by the tick loop.
///
/// Shared by reference between the loop and anything sampling time, so the
/// current value sits in a `Cell`.
#[derive(Debug, Default)]
pub struct MockTimeProvider {
    seconds: Cell<f64>,
}

impl MockTimeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock whose first reading is `seconds`, e.g. a session start.
    pub fn starting_at(seconds: f64) -> Self {
        Self {
            seconds: Cell::new(seconds),
        }
    }

    pub fn set_time(&self, seconds: f64) {
        self.seconds.set(seconds);
    }

    /// Step forward by one tick of `delta` seconds.
    pub fn advance(&self, delta: f64) {
        self.seconds.set(self.seconds.get() + delta);
    }
}

impl TimeProvider for MockTimeProvider {
    fn now(&self) -> f64 {
        self.seconds.get()
    }
}
