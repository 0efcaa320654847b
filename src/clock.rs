//! Monotonic millisecond clock
//!
//! The engine only needs a free-running `u32` counter. Elapsed time is always
//! computed with wrapping subtraction, so a rollover of the counter yields the
//! correct small interval instead of a huge one.

use embassy_time::Instant;

/// Free-running millisecond counter
pub trait Clock {
    /// Current counter value, allowed to wrap
    fn now_ms(&self) -> u32;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Milliseconds from `earlier` to `now`, correct across one counter rollover
#[inline]
pub const fn ticks_diff(now: u32, earlier: u32) -> u32 {
    now.wrapping_sub(earlier)
}

/// Clock backed by the embassy time driver
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[allow(clippy::cast_possible_truncation)]
    fn now_ms(&self) -> u32 {
        // Truncation is the intended 32-bit wrap
        Instant::now().as_millis() as u32
    }
}
