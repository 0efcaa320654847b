//! Decay-counter sparkles
//!
//! Each pixel owns a countdown. While it runs the pixel keeps its stored color;
//! once it reaches zero the pixel is black unless a new random draw starts
//! another sparkle. Twinkle, sparkle and confetti only differ in their
//! [`SparkleStyle`], and each keeps its own counters.

use super::{Mode, ModeFault, RenderContext};
use crate::color::{BLACK, Rgb};

/// How long a freshly started sparkle stays lit, in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    /// `random_bits(5) % modulo + base`
    Random { modulo: u32, base: u8 },
    /// Always the same number of ticks
    Fixed(u8),
}

/// Tuning for a sparkle mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SparkleStyle {
    /// A pixel starts with probability `1 / chance` per tick
    pub chance: u32,
    pub lifetime: Lifetime,
}

impl SparkleStyle {
    pub const TWINKLE: Self = Self {
        chance: 50,
        lifetime: Lifetime::Random { modulo: 20, base: 5 },
    };

    pub const SPARKLE: Self = Self {
        chance: 60,
        lifetime: Lifetime::Random { modulo: 10, base: 3 },
    };

    pub const CONFETTI: Self = Self {
        chance: 30,
        lifetime: Lifetime::Fixed(20),
    };
}

/// Independent per-pixel sparkles with decay counters
#[derive(Debug, Clone)]
pub struct SparkleMode<const N: usize> {
    style: SparkleStyle,
    counters: [u8; N],
    colors: [Rgb; N],
}

impl<const N: usize> SparkleMode<N> {
    pub const fn new(style: SparkleStyle) -> Self {
        Self {
            style,
            counters: [0; N],
            colors: [BLACK; N],
        }
    }

    pub const fn style(&self) -> SparkleStyle {
        self.style
    }

    /// Remaining lifetime of each pixel
    pub fn counters(&self) -> &[u8] {
        &self.counters
    }

    #[allow(clippy::cast_possible_truncation)]
    fn draw_lifetime(&self, ctx: &mut RenderContext<'_>) -> u8 {
        match self.style.lifetime {
            Lifetime::Random { modulo, base } => {
                let spread = ctx.random(5) % modulo.max(1);
                base.saturating_add(spread as u8)
            }
            Lifetime::Fixed(ticks) => ticks,
        }
    }
}

impl<const N: usize> Mode for SparkleMode<N> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ModeFault> {
        let n = ctx.len();
        if n > N {
            return Err(ModeFault::IndexOutOfRange { index: N, len: n });
        }

        for i in 0..n {
            let color = if self.counters[i] > 0 {
                self.counters[i] -= 1;
                self.colors[i]
            } else if ctx.random(8) % self.style.chance.max(1) == 0 {
                let position = ctx.random(8) as u8;
                let color = ctx.palette.get(position);
                self.colors[i] = color;
                self.counters[i] = self.draw_lifetime(ctx);
                color
            } else {
                BLACK
            };
            ctx.set(i, color)?;
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.counters = [0; N];
        self.colors = [BLACK; N];
    }
}
