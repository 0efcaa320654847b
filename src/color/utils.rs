use crate::color::Rgb;

/// All channels off
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Fill every LED with the same color
#[inline]
pub fn fill(leds: &mut [Rgb], color: Rgb) {
    for led in leds {
        *led = color;
    }
}

/// Scale a color by a fractional intensity
///
/// Intensity is clamped to `0.0..=1.0`, channels are truncated toward zero.
#[inline]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_lossless
)]
pub fn scale_color(color: Rgb, intensity: f32) -> Rgb {
    let k = intensity.clamp(0.0, 1.0);
    Rgb {
        r: (color.r as f32 * k) as u8,
        g: (color.g as f32 * k) as u8,
        b: (color.b as f32 * k) as u8,
    }
}

/// Dim the whole frame in place by a multiplicative factor
pub fn dim_all(leds: &mut [Rgb], factor: f32) {
    for led in leds {
        *led = scale_color(*led, factor);
    }
}

/// Triangle wave over the 8-bit phase circle
///
/// Rises from 0.0 at phase 0 to ~1.0 around phase 128 and falls back to 0.0 at 255.
#[inline]
pub fn triangle_envelope(phase: u8) -> f32 {
    let t = f32::from(phase) / 255.0;
    1.0 - libm::fabsf(2.0 * t - 1.0)
}
