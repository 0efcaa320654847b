//! Timed rotation through a list of modes
//!
//! Shows each mode for a fixed dwell time, then moves on to the next one and
//! wraps around at the end of the list.

use embassy_time::Duration;
use heapless::Vec;
use log::info;
use rand::RngCore;

use crate::OutputDriver;
use crate::clock::{Clock, ticks_diff};
use crate::engine::AnimationEngine;
use crate::mode::ModeId;

/// Default time spent on each mode
pub const DEFAULT_DWELL: Duration = Duration::from_secs(10);

/// Capacity large enough for every built-in mode
pub const PLAYLIST_CAPACITY: usize = ModeId::ALL.len();

#[derive(Debug, Clone)]
pub struct ModePlaylist {
    modes: Vec<ModeId, PLAYLIST_CAPACITY>,
    index: usize,
    dwell: Duration,
    started_at: Option<u32>,
}

impl ModePlaylist {
    /// Playlist over every built-in mode
    pub fn all(dwell: Duration) -> Self {
        Self::from_modes(&ModeId::ALL, dwell)
    }

    /// Playlist over `modes`; entries beyond the capacity are ignored
    pub fn from_modes(modes: &[ModeId], dwell: Duration) -> Self {
        let mut list = Vec::new();
        for &id in modes.iter().take(PLAYLIST_CAPACITY) {
            let _ = list.push(id);
        }
        Self {
            modes: list,
            index: 0,
            dwell,
            started_at: None,
        }
    }

    pub fn current(&self) -> Option<ModeId> {
        self.modes.get(self.index).copied()
    }

    pub const fn dwell(&self) -> Duration {
        self.dwell
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// Mode to switch to at `now`, if any
    ///
    /// The first call always returns the first entry.
    pub fn update(&mut self, now: u32) -> Option<ModeId> {
        if self.modes.is_empty() {
            return None;
        }
        let Some(started_at) = self.started_at else {
            self.started_at = Some(now);
            return self.current();
        };
        if u64::from(ticks_diff(now, started_at)) < self.dwell.as_millis() {
            return None;
        }
        self.index = (self.index + 1) % self.modes.len();
        self.started_at = Some(now);
        self.current()
    }

    /// Switch the engine when the dwell time of the current mode is over
    pub fn drive<D, C, R, const MAX_LEDS: usize>(
        &mut self,
        engine: &mut AnimationEngine<D, C, R, MAX_LEDS>,
    ) -> Option<ModeId>
    where
        D: OutputDriver,
        C: Clock,
        R: RngCore,
    {
        let next = self.update(engine.now_ms())?;
        info!("playlist: {}", next.as_str());
        engine.set_mode_id(next);
        Some(next)
    }
}
