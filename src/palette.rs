//! Precomputed color wheel
//!
//! A 256-step cyclic ramp through red, green and blue built from three 85-wide
//! bands. Modes index the table instead of recomputing the wheel every tick.

use core::ops::Index;

use crate::color::{BLACK, Rgb};

/// Number of entries in the palette
pub const PALETTE_SIZE: usize = 256;

const BAND: i32 = 85;

/// Minimal RGB color wheel
///
/// Positions outside `0..=255` return black.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn wheel(position: i32) -> Rgb {
    if position < 0 || position > 255 {
        return BLACK;
    }
    if position < BAND {
        let p = position * 3;
        Rgb {
            r: p as u8,
            g: (255 - p) as u8,
            b: 0,
        }
    } else if position < 2 * BAND {
        let p = (position - BAND) * 3;
        Rgb {
            r: (255 - p) as u8,
            g: 0,
            b: p as u8,
        }
    } else {
        let p = (position - 2 * BAND) * 3;
        Rgb {
            r: 0,
            g: p as u8,
            b: (255 - p) as u8,
        }
    }
}

/// Fixed 256-entry palette, built once and never mutated
#[derive(Debug, Clone)]
pub struct Palette {
    entries: [Rgb; PALETTE_SIZE],
}

impl Palette {
    /// Build the palette from [`wheel`]
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub const fn new() -> Self {
        let mut entries = [BLACK; PALETTE_SIZE];
        let mut i = 0;
        while i < PALETTE_SIZE {
            entries[i] = wheel(i as i32);
            i += 1;
        }
        Self { entries }
    }

    /// Color at an 8-bit position
    #[inline]
    pub const fn get(&self, position: u8) -> Rgb {
        self.entries[position as usize]
    }

    /// Color at an arbitrary position, wrapped modulo 256
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn wrapped(&self, position: usize) -> Rgb {
        self.entries[position & 0xFF]
    }

    pub fn as_slice(&self) -> &[Rgb] {
        &self.entries
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<u8> for Palette {
    type Output = Rgb;

    fn index(&self, position: u8) -> &Rgb {
        &self.entries[usize::from(position)]
    }
}
