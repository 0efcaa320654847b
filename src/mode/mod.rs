//! Mode library with compile-time known mode variants
//!
//! Every mode owns its private state and rewrites the whole frame on each fill
//! tick. All mode instances live in a [`ModeBank`] for the lifetime of the
//! engine, so switching away from a mode and back resumes its stale state.

mod chase;
mod fire;
mod pulse;
mod rainbow;
mod solid;
mod sparkle;

use core::fmt;

use rand::RngCore;

pub use chase::{ChaseMode, ColorChaseMode, ColorWipeMode, MeteorMode, ScannerMode, TheaterChaseMode};
pub use fire::FireMode;
pub use pulse::{BreathingMode, PulseMode};
pub use rainbow::{RainbowCycleMode, RainbowMode};
pub use solid::{PrimaryCycleMode, RandomFlashMode, SolidMode, StrobeMode};
pub use sparkle::{Lifetime, SparkleMode, SparkleStyle};

use crate::color::Rgb;
use crate::palette::Palette;

const MODE_NAME_RAINBOW: &str = "rainbow";
const MODE_NAME_SOLID: &str = "solid";
const MODE_NAME_PRIMARY_CYCLE: &str = "primary_cycle";
const MODE_NAME_RANDOM_FLASH: &str = "random_flash";
const MODE_NAME_CHASE: &str = "chase";
const MODE_NAME_BREATHING: &str = "breathing";
const MODE_NAME_COLOR_WIPE: &str = "color_wipe";
const MODE_NAME_GRADIENT: &str = "gradient";
const MODE_NAME_THEATER_CHASE: &str = "theater_chase";
const MODE_NAME_TWINKLE: &str = "twinkle";
const MODE_NAME_SPARKLE: &str = "sparkle";
const MODE_NAME_METEOR: &str = "meteor";
const MODE_NAME_STROBE: &str = "strobe";
const MODE_NAME_SCANNER: &str = "scanner";
const MODE_NAME_CONFETTI: &str = "confetti";
const MODE_NAME_FIRE: &str = "fire";
const MODE_NAME_RAINBOW_CYCLE: &str = "rainbow_cycle";
const MODE_NAME_COLOR_CHASE: &str = "color_chase";
const MODE_NAME_PULSE: &str = "pulse";
const MODE_NAME_GRADIENT_SHIFT: &str = "gradient_shift";

/// Failure raised by a mode while rendering a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeFault {
    /// The mode addressed a pixel outside of the frame
    IndexOutOfRange { index: usize, len: usize },
    /// Failure reported by a user supplied mode
    Custom(&'static str),
}

impl fmt::Display for ModeFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "pixel index {index} out of range for {len} leds")
            }
            Self::Custom(reason) => write!(f, "mode failed: {reason}"),
        }
    }
}

/// Everything a mode may touch during one fill tick
///
/// The phase is read-only here: the scheduler owns its advancement.
pub struct RenderContext<'a> {
    /// Frame to rewrite, exactly `num_leds` long
    pub leds: &'a mut [Rgb],
    /// Shared color wheel
    pub palette: &'a Palette,
    /// Global animation phase
    pub phase: u8,
    /// Phase step per fill tick
    pub speed: u8,
    /// Random source
    pub rng: &'a mut dyn RngCore,
}

impl RenderContext<'_> {
    /// Number of LEDs in the frame
    #[inline]
    pub fn len(&self) -> usize {
        self.leds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.leds.is_empty()
    }

    /// Palette color selected by the current phase
    #[inline]
    pub fn phase_color(&self) -> Rgb {
        self.palette.get(self.phase)
    }

    /// Draw the low `bits` bits of a fresh random word
    #[inline]
    pub fn random(&mut self, bits: u32) -> u32 {
        random_bits(self.rng, bits)
    }

    /// Write a single pixel
    #[inline]
    pub fn set(&mut self, index: usize, color: Rgb) -> Result<(), ModeFault> {
        let len = self.leds.len();
        let led = self
            .leds
            .get_mut(index)
            .ok_or(ModeFault::IndexOutOfRange { index, len })?;
        *led = color;
        Ok(())
    }

    /// Read a single pixel
    #[inline]
    pub fn get(&self, index: usize) -> Result<Rgb, ModeFault> {
        self.leds.get(index).copied().ok_or(ModeFault::IndexOutOfRange {
            index,
            len: self.leds.len(),
        })
    }

    /// Paint every pixel with one color
    #[inline]
    pub fn fill(&mut self, color: Rgb) {
        crate::color::fill(self.leds, color);
    }
}

/// Low `bits` bits (at most 32) of one `next_u32` draw
#[inline]
pub fn random_bits(rng: &mut dyn RngCore, bits: u32) -> u32 {
    let word = rng.next_u32();
    if bits >= 32 {
        word
    } else {
        word & ((1 << bits) - 1)
    }
}

pub trait Mode {
    /// Rewrite every pixel of the frame
    fn render(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ModeFault>;

    /// Reset private state to its initial value
    fn reset(&mut self) {}
}

/// Known built-in modes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ModeId {
    Rainbow = 0,
    Solid = 1,
    PrimaryCycle = 2,
    RandomFlash = 3,
    Chase = 4,
    Breathing = 5,
    ColorWipe = 6,
    Gradient = 7,
    TheaterChase = 8,
    Twinkle = 9,
    Sparkle = 10,
    Meteor = 11,
    Strobe = 12,
    Scanner = 13,
    Confetti = 14,
    Fire = 15,
    RainbowCycle = 16,
    ColorChase = 17,
    Pulse = 18,
    GradientShift = 19,
}

impl ModeId {
    /// Every built-in mode in registration order
    pub const ALL: [ModeId; 20] = [
        Self::Rainbow,
        Self::Solid,
        Self::PrimaryCycle,
        Self::RandomFlash,
        Self::Chase,
        Self::Breathing,
        Self::ColorWipe,
        Self::Gradient,
        Self::TheaterChase,
        Self::Twinkle,
        Self::Sparkle,
        Self::Meteor,
        Self::Strobe,
        Self::Scanner,
        Self::Confetti,
        Self::Fire,
        Self::RainbowCycle,
        Self::ColorChase,
        Self::Pulse,
        Self::GradientShift,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rainbow => MODE_NAME_RAINBOW,
            Self::Solid => MODE_NAME_SOLID,
            Self::PrimaryCycle => MODE_NAME_PRIMARY_CYCLE,
            Self::RandomFlash => MODE_NAME_RANDOM_FLASH,
            Self::Chase => MODE_NAME_CHASE,
            Self::Breathing => MODE_NAME_BREATHING,
            Self::ColorWipe => MODE_NAME_COLOR_WIPE,
            Self::Gradient => MODE_NAME_GRADIENT,
            Self::TheaterChase => MODE_NAME_THEATER_CHASE,
            Self::Twinkle => MODE_NAME_TWINKLE,
            Self::Sparkle => MODE_NAME_SPARKLE,
            Self::Meteor => MODE_NAME_METEOR,
            Self::Strobe => MODE_NAME_STROBE,
            Self::Scanner => MODE_NAME_SCANNER,
            Self::Confetti => MODE_NAME_CONFETTI,
            Self::Fire => MODE_NAME_FIRE,
            Self::RainbowCycle => MODE_NAME_RAINBOW_CYCLE,
            Self::ColorChase => MODE_NAME_COLOR_CHASE,
            Self::Pulse => MODE_NAME_PULSE,
            Self::GradientShift => MODE_NAME_GRADIENT_SHIFT,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|id| id.as_str() == s)
    }
}

/// Storage for the private state of every built-in mode
///
/// `N` is the LED capacity of the engine.
#[derive(Debug, Clone)]
pub struct ModeBank<const N: usize> {
    rainbow: RainbowMode,
    solid: SolidMode,
    primary_cycle: PrimaryCycleMode,
    random_flash: RandomFlashMode,
    chase: ChaseMode,
    breathing: BreathingMode,
    color_wipe: ColorWipeMode,
    gradient: RainbowMode,
    theater_chase: TheaterChaseMode,
    twinkle: SparkleMode<N>,
    sparkle: SparkleMode<N>,
    meteor: MeteorMode,
    strobe: StrobeMode,
    scanner: ScannerMode,
    confetti: SparkleMode<N>,
    fire: FireMode<N>,
    rainbow_cycle: RainbowCycleMode,
    color_chase: ColorChaseMode,
    pulse: PulseMode,
    gradient_shift: RainbowMode,
}

impl<const N: usize> ModeBank<N> {
    /// Create fresh state for a strip of `num_leds` pixels
    pub fn new(num_leds: usize) -> Self {
        Self {
            rainbow: RainbowMode,
            solid: SolidMode::default(),
            primary_cycle: PrimaryCycleMode,
            random_flash: RandomFlashMode,
            chase: ChaseMode::default(),
            breathing: BreathingMode,
            color_wipe: ColorWipeMode,
            gradient: RainbowMode,
            theater_chase: TheaterChaseMode,
            twinkle: SparkleMode::new(SparkleStyle::TWINKLE),
            sparkle: SparkleMode::new(SparkleStyle::SPARKLE),
            meteor: MeteorMode::new(num_leds),
            strobe: StrobeMode::default(),
            scanner: ScannerMode::default(),
            confetti: SparkleMode::new(SparkleStyle::CONFETTI),
            fire: FireMode::new(),
            rainbow_cycle: RainbowCycleMode::default(),
            color_chase: ColorChaseMode::default(),
            pulse: PulseMode,
            gradient_shift: RainbowMode,
        }
    }

    /// Borrow the state of one mode
    pub fn get_mut(&mut self, id: ModeId) -> &mut dyn Mode {
        match id {
            ModeId::Rainbow => &mut self.rainbow,
            ModeId::Solid => &mut self.solid,
            ModeId::PrimaryCycle => &mut self.primary_cycle,
            ModeId::RandomFlash => &mut self.random_flash,
            ModeId::Chase => &mut self.chase,
            ModeId::Breathing => &mut self.breathing,
            ModeId::ColorWipe => &mut self.color_wipe,
            ModeId::Gradient => &mut self.gradient,
            ModeId::TheaterChase => &mut self.theater_chase,
            ModeId::Twinkle => &mut self.twinkle,
            ModeId::Sparkle => &mut self.sparkle,
            ModeId::Meteor => &mut self.meteor,
            ModeId::Strobe => &mut self.strobe,
            ModeId::Scanner => &mut self.scanner,
            ModeId::Confetti => &mut self.confetti,
            ModeId::Fire => &mut self.fire,
            ModeId::RainbowCycle => &mut self.rainbow_cycle,
            ModeId::ColorChase => &mut self.color_chase,
            ModeId::Pulse => &mut self.pulse,
            ModeId::GradientShift => &mut self.gradient_shift,
        }
    }

    /// Render one frame with the given mode
    pub fn render(&mut self, id: ModeId, ctx: &mut RenderContext<'_>) -> Result<(), ModeFault> {
        self.get_mut(id).render(ctx)
    }

    /// Reset the private state of one mode
    pub fn reset(&mut self, id: ModeId) {
        self.get_mut(id).reset();
    }

    /// Fixed color override for the solid mode
    pub fn set_solid_color(&mut self, color: Option<Rgb>) {
        self.solid.set_color(color);
    }

    pub fn solid_color(&self) -> Option<Rgb> {
        self.solid.color()
    }
}
