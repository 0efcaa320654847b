//! Rainbow gradients
//!
//! Provides two variants:
//! - `RainbowMode`: static spatial gradient scrolled by the global phase
//! - `RainbowCycleMode`: full-wheel gradient scrolled by its own offset

use super::{Mode, ModeFault, RenderContext};

/// Spatial rainbow scrolled by the global phase
///
/// Pixel `i` shows `palette[(i * 255 / n + phase) mod 256]`. Stateless, also
/// used for the `gradient` and `gradient_shift` names.
#[derive(Debug, Clone, Copy, Default)]
pub struct RainbowMode;

impl Mode for RainbowMode {
    fn render(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ModeFault> {
        let n = ctx.len().max(1);
        let phase = usize::from(ctx.phase);
        let palette = ctx.palette;
        for (i, led) in ctx.leds.iter_mut().enumerate() {
            *led = palette.wrapped(i * 255 / n + phase);
        }
        Ok(())
    }
}

/// Rainbow spanning the full wheel, moved by a private offset
///
/// The offset advances by the engine speed every tick, independently of the
/// global phase.
#[derive(Debug, Clone, Copy, Default)]
pub struct RainbowCycleMode {
    offset: u8,
}

impl RainbowCycleMode {
    pub const fn offset(&self) -> u8 {
        self.offset
    }
}

impl Mode for RainbowCycleMode {
    fn render(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ModeFault> {
        let n = ctx.len().max(1);
        let offset = usize::from(self.offset);
        let palette = ctx.palette;
        for (i, led) in ctx.leds.iter_mut().enumerate() {
            *led = palette.wrapped(i * 256 / n + offset);
        }
        self.offset = self.offset.wrapping_add(ctx.speed);
        Ok(())
    }

    fn reset(&mut self) {
        self.offset = 0;
    }
}
