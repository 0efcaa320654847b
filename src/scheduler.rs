//! Dual-rate tick scheduling
//!
//! Two independent gates decide when the buffer is recomputed (fill) and when
//! it is flushed to the hardware (write). The gates only compare timestamps;
//! the engine performs the actual work when a gate reports it is due.

use embassy_time::Duration;

use crate::clock::ticks_diff;

/// Fastest supported interval
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

#[allow(clippy::cast_lossless)]
const MAX_INTERVAL_MS: u64 = u32::MAX as u64;

/// Slowest supported interval, one full turn of the millisecond clock
pub const MAX_INTERVAL: Duration = Duration::from_millis(MAX_INTERVAL_MS);

/// Sleep between two checks of the run loop
pub const LOOP_QUANTUM: Duration = Duration::from_millis(1);

/// Convert a rate to an interval: `max(1, round(1000 / hz))` milliseconds
///
/// Zero, negative and NaN rates clamp to [`MIN_INTERVAL`]. Rates so slow that
/// the interval would not fit the `u32` millisecond clock clamp to
/// [`MAX_INTERVAL`].
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn interval_from_hz(hz: f32) -> Duration {
    if hz.is_nan() || hz <= 0.0 {
        return MIN_INTERVAL;
    }
    let ms = libm::roundf(1000.0 / hz);
    if ms < 1.0 {
        return MIN_INTERVAL;
    }
    if !ms.is_finite() || ms >= MAX_INTERVAL_MS as f32 {
        return MAX_INTERVAL;
    }
    Duration::from_millis(ms as u64)
}

/// State of a single gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Waiting,
    Due,
}

/// One `(interval, last fire)` pair
#[derive(Debug, Clone, Copy)]
pub struct TickGate {
    interval: Duration,
    last_fire: u32,
}

impl TickGate {
    pub fn new(interval: Duration, now: u32) -> Self {
        Self {
            interval: clamp_interval(interval),
            last_fire: now,
        }
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    pub const fn last_fire(&self) -> u32 {
        self.last_fire
    }

    /// Change the interval; takes effect on the next due check
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = clamp_interval(interval);
    }

    pub fn state(&self, now: u32) -> GateState {
        if u64::from(ticks_diff(now, self.last_fire)) >= self.interval.as_millis() {
            GateState::Due
        } else {
            GateState::Waiting
        }
    }

    pub fn is_due(&self, now: u32) -> bool {
        self.state(now) == GateState::Due
    }

    /// Record that the gate fired at `now`
    pub fn fire(&mut self, now: u32) {
        self.last_fire = now;
    }

    /// Milliseconds left until the gate becomes due
    #[allow(clippy::cast_possible_truncation)]
    pub fn remaining(&self, now: u32) -> u32 {
        let interval = self.interval.as_millis().min(u64::from(u32::MAX)) as u32;
        interval.saturating_sub(ticks_diff(now, self.last_fire))
    }
}

fn clamp_interval(interval: Duration) -> Duration {
    if interval < MIN_INTERVAL {
        MIN_INTERVAL
    } else {
        interval
    }
}

/// Fill and write gates plus the pending-write flag
#[derive(Debug, Clone, Copy)]
pub struct DualRateScheduler {
    fill: TickGate,
    write: TickGate,
    write_pending: bool,
}

impl DualRateScheduler {
    pub fn new(fill_interval: Duration, write_interval: Duration, now: u32) -> Self {
        Self {
            fill: TickGate::new(fill_interval, now),
            write: TickGate::new(write_interval, now),
            write_pending: false,
        }
    }

    /// Restart both gates from `now`
    pub fn restart(&mut self, now: u32) {
        self.fill.fire(now);
        self.write.fire(now);
        self.write_pending = false;
    }

    pub fn fill_due(&self, now: u32) -> bool {
        self.fill.is_due(now)
    }

    pub fn write_due(&self, now: u32) -> bool {
        self.write.is_due(now)
    }

    pub fn complete_fill(&mut self, now: u32) {
        self.fill.fire(now);
    }

    /// Mark the frame as pending before it is handed to the driver
    pub fn begin_write(&mut self) {
        self.write_pending = true;
    }

    pub fn complete_write(&mut self, now: u32) {
        self.write_pending = false;
        self.write.fire(now);
    }

    pub const fn is_write_pending(&self) -> bool {
        self.write_pending
    }

    pub fn set_fill_interval(&mut self, interval: Duration) {
        self.fill.set_interval(interval);
    }

    pub fn set_write_interval(&mut self, interval: Duration) {
        self.write.set_interval(interval);
    }

    pub const fn fill_interval(&self) -> Duration {
        self.fill.interval()
    }

    pub const fn write_interval(&self) -> Duration {
        self.write.interval()
    }

    pub const fn fill_gate(&self) -> &TickGate {
        &self.fill
    }

    pub const fn write_gate(&self) -> &TickGate {
        &self.write
    }

    /// Milliseconds until either gate becomes due
    pub fn next_due_in(&self, now: u32) -> u32 {
        self.fill.remaining(now).min(self.write.remaining(now))
    }
}
