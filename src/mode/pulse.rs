//! Uniform intensity envelopes over the phase color

use super::{Mode, ModeFault, RenderContext};
use crate::color::{scale_color, triangle_envelope};

/// Lowest intensity reached by the pulse mode
const PULSE_FLOOR: f32 = 0.5;

/// Triangle-wave breathing: dark at phase 0 and 255, brightest around 128
#[derive(Debug, Clone, Copy, Default)]
pub struct BreathingMode;

impl Mode for BreathingMode {
    fn render(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ModeFault> {
        let color = scale_color(ctx.phase_color(), triangle_envelope(ctx.phase));
        ctx.fill(color);
        Ok(())
    }
}

/// Like breathing, but never drops below half intensity
#[derive(Debug, Clone, Copy, Default)]
pub struct PulseMode;

impl Mode for PulseMode {
    fn render(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ModeFault> {
        let intensity = PULSE_FLOOR + (1.0 - PULSE_FLOOR) * triangle_envelope(ctx.phase);
        let color = scale_color(ctx.phase_color(), intensity);
        ctx.fill(color);
        Ok(())
    }
}
