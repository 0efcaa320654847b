//! Heat simulation mapped onto a red, yellow and white ramp

use super::{Mode, ModeFault, RenderContext};
use crate::color::Rgb;

/// Per-pixel cooling is `random_bits(5) % COOLING_SPREAD`
const COOLING_SPREAD: u32 = 3;

/// One pixel is reheated with a 1 in `SPARK_CHANCE` draw per tick
const SPARK_CHANCE: u32 = 2;

#[derive(Debug, Clone)]
pub struct FireMode<const N: usize> {
    heat: [u8; N],
}

impl<const N: usize> Default for FireMode<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> FireMode<N> {
    pub const fn new() -> Self {
        Self { heat: [0; N] }
    }

    pub fn heat(&self) -> &[u8] {
        &self.heat
    }

    /// Map a heat value to its color
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_possible_wrap
    )]
    pub fn heat_color(heat: u8) -> Rgb {
        let h = f32::from(heat);
        let blue = (h * 0.2) as i32 - 10;
        Rgb {
            r: heat,
            g: (h * 0.6) as u8,
            b: blue.max(0) as u8,
        }
    }
}

impl<const N: usize> Mode for FireMode<N> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ModeFault> {
        let n = ctx.len();
        if n > N {
            return Err(ModeFault::IndexOutOfRange { index: N, len: n });
        }
        if n == 0 {
            return Ok(());
        }

        for cell in &mut self.heat[..n] {
            let cooling = (ctx.random(5) % COOLING_SPREAD) as u8;
            *cell = cell.saturating_sub(cooling);
        }

        if ctx.random(8) % SPARK_CHANCE == 0 {
            let index = ctx.random(32) as usize % n;
            let boost = ctx.random(6) as u8;
            self.heat[index] = self.heat[index].saturating_add(boost);
        }

        for (led, &heat) in ctx.leds.iter_mut().zip(self.heat.iter()) {
            *led = Self::heat_color(heat);
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.heat = [0; N];
    }
}
