//! Positional modes: moving dots, periodic patterns and fill boundaries

use super::{Mode, ModeFault, RenderContext};
use crate::color::{BLACK, dim_all, scale_color};

/// Shortest meteor tail
const MIN_METEOR_SIZE: usize = 3;

/// Multiplicative dimming applied to the whole frame before each meteor head
const METEOR_DIM: f32 = 0.3;

/// Theater chase lights every `THEATER_SPACING`-th pixel
const THEATER_SPACING: usize = 3;

/// Color chase splits the strip into this many segments
const COLOR_CHASE_SEGMENTS: usize = 8;

/// Single lit pixel advancing by one position per tick
#[derive(Debug, Clone, Copy, Default)]
pub struct ChaseMode {
    pos: usize,
}

impl ChaseMode {
    pub const fn position(&self) -> usize {
        self.pos
    }
}

impl Mode for ChaseMode {
    fn render(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ModeFault> {
        let n = ctx.len().max(1);
        ctx.fill(BLACK);
        let pos = self.pos % n;
        let color = ctx.phase_color();
        ctx.set(pos, color)?;
        self.pos = (pos + 1) % n;
        Ok(())
    }

    fn reset(&mut self) {
        self.pos = 0;
    }
}

/// Every third pixel lit, shifting with the phase
#[derive(Debug, Clone, Copy, Default)]
pub struct TheaterChaseMode;

impl Mode for TheaterChaseMode {
    fn render(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ModeFault> {
        let phase = usize::from(ctx.phase);
        let color = ctx.phase_color();
        for (i, led) in ctx.leds.iter_mut().enumerate() {
            *led = if (i + phase) % THEATER_SPACING == 0 {
                color
            } else {
                BLACK
            };
        }
        Ok(())
    }
}

/// Alternating lit and dark blocks drifting along the strip
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorChaseMode {
    offset: u8,
}

impl Mode for ColorChaseMode {
    fn render(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ModeFault> {
        let segment = (ctx.len() / COLOR_CHASE_SEGMENTS).max(1);
        let offset = usize::from(self.offset);
        let color = ctx.phase_color();
        for (i, led) in ctx.leds.iter_mut().enumerate() {
            *led = if ((i + offset) / segment) % 2 == 0 {
                color
            } else {
                BLACK
            };
        }
        self.offset = self.offset.wrapping_add(1);
        Ok(())
    }

    fn reset(&mut self) {
        self.offset = 0;
    }
}

/// Fill boundary that advances with the phase
///
/// Pixels with index `<= phase * n / 256` are lit, the rest are black.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorWipeMode;

impl Mode for ColorWipeMode {
    fn render(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ModeFault> {
        let boundary = usize::from(ctx.phase) * ctx.len() / 256;
        let color = ctx.phase_color();
        for (i, led) in ctx.leds.iter_mut().enumerate() {
            *led = if i <= boundary { color } else { BLACK };
        }
        Ok(())
    }
}

/// Single pixel bouncing between both ends of the strip
///
/// A step past either end flips the direction and clamps back onto the end
/// pixel, so each end stays lit for two consecutive ticks.
#[derive(Debug, Clone, Copy)]
pub struct ScannerMode {
    pos: usize,
    forward: bool,
}

impl Default for ScannerMode {
    fn default() -> Self {
        Self {
            pos: 0,
            forward: true,
        }
    }
}

impl ScannerMode {
    pub const fn position(&self) -> usize {
        self.pos
    }

    pub const fn is_forward(&self) -> bool {
        self.forward
    }
}

impl Mode for ScannerMode {
    fn render(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ModeFault> {
        let last = ctx.len().saturating_sub(1);
        let color = ctx.phase_color();
        ctx.fill(BLACK);
        ctx.set(self.pos, color)?;

        if self.forward {
            if self.pos >= last {
                self.forward = false;
                self.pos = last;
            } else {
                self.pos += 1;
            }
        } else if self.pos == 0 {
            self.forward = true;
        } else {
            self.pos -= 1;
        }
        Ok(())
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Bright head with a linearly fading tail over a dimmed background
#[derive(Debug, Clone, Copy)]
pub struct MeteorMode {
    pos: usize,
    size: usize,
}

impl MeteorMode {
    /// Tail length is an eighth of the strip, but never shorter than three
    pub fn new(num_leds: usize) -> Self {
        Self {
            pos: 0,
            size: (num_leds / 8).max(MIN_METEOR_SIZE),
        }
    }

    pub const fn size(&self) -> usize {
        self.size
    }

    pub const fn position(&self) -> usize {
        self.pos
    }
}

impl Mode for MeteorMode {
    #[allow(clippy::cast_precision_loss)]
    fn render(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ModeFault> {
        let n = ctx.len().max(1);
        dim_all(ctx.leds, METEOR_DIM);

        let head = self.pos % n;
        let color = ctx.phase_color();
        for t in 0..self.size {
            let index = (head + n - t % n) % n;
            let intensity = 1.0 - t as f32 / self.size as f32;
            ctx.set(index, scale_color(color, intensity))?;
        }
        self.pos = (head + 1) % n;
        Ok(())
    }

    fn reset(&mut self) {
        self.pos = 0;
    }
}
