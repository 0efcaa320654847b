//! Control commands accepted by the run loop
//!
//! Control code on other threads never touches the engine directly: it sends
//! commands that the loop applies between ticks.

use heapless::String;

use crate::channel::{Channel, Receiver, Sender};
use crate::color::Rgb;
use crate::mode::ModeId;

/// Longest mode name that can travel through the queue
pub const MODE_NAME_CAPACITY: usize = 24;

/// Owned mode name
pub type ModeName = String<MODE_NAME_CAPACITY>;

/// Changes requested from outside the run loop
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Select a mode by registered name, unknown names fall back to rainbow
    SetMode(ModeName),
    /// Select a built-in mode directly
    SetModeId(ModeId),
    /// Set the phase step per fill tick
    SetSpeed(i16),
    /// Set the fill rate in Hz
    SetFillRate(f32),
    /// Set the write rate in Hz
    SetWriteRate(f32),
    /// Set brightness (0-100), forwarded to the driver
    SetBrightness(u8),
    /// Fixed color for the solid mode, `None` follows the phase
    SetSolidColor(Option<Rgb>),
    /// Reset the private state of the active mode
    ResetModeState,
    /// Halt the run loop
    Stop,
}

impl EngineCommand {
    /// Command selecting `name`
    ///
    /// Names longer than [`MODE_NAME_CAPACITY`] are never truncated; they
    /// select rainbow, like any other unknown name.
    pub fn set_mode(name: &str) -> Self {
        match ModeName::try_from(name) {
            Ok(owned) => Self::SetMode(owned),
            Err(()) => Self::SetModeId(ModeId::Rainbow),
        }
    }
}

/// Type alias for command sender
pub type CommandSender<'a, const SIZE: usize> = Sender<'a, EngineCommand, SIZE>;

/// Type alias for command receiver
pub type CommandReceiver<'a, const SIZE: usize> = Receiver<'a, EngineCommand, SIZE>;

/// Type alias for the command channel
pub type CommandChannel<const SIZE: usize> = Channel<EngineCommand, SIZE>;
