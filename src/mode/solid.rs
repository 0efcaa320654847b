//! Whole-strip single color modes

use super::{Mode, ModeFault, RenderContext};
use crate::color::{BLACK, Rgb};

const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };

/// Width of one primary band on the phase circle
const PRIMARY_BAND: u8 = 85;

/// Strobe toggles with a 1 in `STROBE_TOGGLE_CHANCE` draw per tick
const STROBE_TOGGLE_CHANCE: u32 = 10;

/// Solid fill with the phase color, or a fixed override
#[derive(Debug, Clone, Copy, Default)]
pub struct SolidMode {
    color: Option<Rgb>,
}

impl SolidMode {
    pub const fn new(color: Option<Rgb>) -> Self {
        Self { color }
    }

    /// Set a fixed color, `None` returns to the phase color
    pub fn set_color(&mut self, color: Option<Rgb>) {
        self.color = color;
    }

    pub const fn color(&self) -> Option<Rgb> {
        self.color
    }
}

impl Mode for SolidMode {
    fn render(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ModeFault> {
        let color = self.color.unwrap_or_else(|| ctx.phase_color());
        ctx.fill(color);
        Ok(())
    }
}

/// Pure red, green and blue selected by 85-wide phase bands
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimaryCycleMode;

impl PrimaryCycleMode {
    /// Primary for a phase value; phase 255 wraps back to red
    pub const fn color_for(phase: u8) -> Rgb {
        match (phase / PRIMARY_BAND) % 3 {
            0 => RED,
            1 => GREEN,
            _ => BLUE,
        }
    }
}

impl Mode for PrimaryCycleMode {
    fn render(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ModeFault> {
        ctx.fill(Self::color_for(ctx.phase));
        Ok(())
    }
}

/// One random color for the whole strip, drawn fresh every tick
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomFlashMode;

impl Mode for RandomFlashMode {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ModeFault> {
        let color = Rgb {
            r: ctx.random(8) as u8,
            g: ctx.random(8) as u8,
            b: ctx.random(8) as u8,
        };
        ctx.fill(color);
        Ok(())
    }
}

/// Whole strip randomly flipping between the phase color and black
#[derive(Debug, Clone, Copy, Default)]
pub struct StrobeMode {
    on: bool,
}

impl StrobeMode {
    pub const fn is_on(&self) -> bool {
        self.on
    }
}

impl Mode for StrobeMode {
    fn render(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ModeFault> {
        if ctx.random(8) % STROBE_TOGGLE_CHANCE == 0 {
            self.on = !self.on;
        }
        let color = if self.on { ctx.phase_color() } else { BLACK };
        ctx.fill(color);
        Ok(())
    }

    fn reset(&mut self) {
        self.on = false;
    }
}
