#![no_std]

pub mod channel;
pub mod clock;
pub mod color;
pub mod command;
pub mod engine;
#[cfg(feature = "esp32-log")]
pub mod logger;
pub mod mode;
pub mod palette;
pub mod playlist;
pub mod registry;
pub mod runner;
pub mod scheduler;

pub use clock::{Clock, SystemClock, ticks_diff};
pub use command::{CommandChannel, CommandReceiver, CommandSender, EngineCommand, ModeName};
pub use engine::{AnimationEngine, ConfigError, EngineConfig, EngineStats, PollResult};
pub use mode::{Mode, ModeFault, ModeId, RenderContext};
pub use palette::{Palette, wheel};
pub use playlist::ModePlaylist;
pub use registry::{CustomMode, ModeHandle, ModeRegistry, RegistryError};
pub use runner::EngineRunner;
pub use scheduler::{DualRateScheduler, TickGate, interval_from_hz};

pub use color::Rgb;
pub use embassy_time::Duration;

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms. Writes are
/// best effort: the engine logs and drops a failed write, it never retries.
/// Implementations should not block for long, since the fill cadence waits on
/// them.
pub trait OutputDriver {
    type Error: core::fmt::Debug;

    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]) -> Result<(), Self::Error>;

    /// Forward the configured brightness (0-100) to the hardware
    fn set_brightness(&mut self, _brightness: u8) {}
}
