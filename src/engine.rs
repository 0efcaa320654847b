use core::fmt;

use embassy_time::Duration;
use log::{debug, error, info, warn};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use crate::OutputDriver;
use crate::clock::Clock;
use crate::color::{BLACK, Rgb};
use crate::command::EngineCommand;
use crate::mode::{ModeBank, ModeId, RenderContext};
use crate::palette::Palette;
use crate::registry::{ModeHandle, ModeRegistry, RegistryError};
use crate::scheduler::{DualRateScheduler, interval_from_hz};

pub const DEFAULT_NUM_LEDS: usize = 64;
pub const DEFAULT_BRIGHTNESS: u8 = 50;
pub const MAX_BRIGHTNESS: u8 = 100;
pub const DEFAULT_FILL_RATE_HZ: f32 = 30.0;
pub const DEFAULT_WRITE_RATE_HZ: f32 = 30.0;
pub const DEFAULT_SPEED: i16 = 8;
pub const DEFAULT_SEED: u64 = 0x0005_EED0;

/// Configuration for the animation engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Number of LEDs, fixed for the lifetime of the engine
    pub num_leds: usize,
    /// Brightness 0-100, forwarded to the driver untouched
    pub brightness: u8,
    /// How often the frame is recomputed
    pub fill_rate_hz: f32,
    /// How often the frame is sent to the driver
    pub write_rate_hz: f32,
    /// Phase step per fill tick, 0 freezes the phase
    pub speed: i16,
    /// Mode active after construction
    pub mode: ModeId,
    /// Fixed color for the solid mode
    pub solid_color: Option<Rgb>,
    /// Seed for the default random source
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            num_leds: DEFAULT_NUM_LEDS,
            brightness: DEFAULT_BRIGHTNESS,
            fill_rate_hz: DEFAULT_FILL_RATE_HZ,
            write_rate_hz: DEFAULT_WRITE_RATE_HZ,
            speed: DEFAULT_SPEED,
            mode: ModeId::Rainbow,
            solid_color: None,
            seed: DEFAULT_SEED,
        }
    }
}

/// Invalid engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `num_leds` was zero
    ZeroLeds,
    /// `num_leds` exceeds the buffer capacity
    TooManyLeds { requested: usize, capacity: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroLeds => write!(f, "num_leds must be at least 1"),
            Self::TooManyLeds {
                requested,
                capacity,
            } => write!(f, "num_leds {requested} exceeds capacity {capacity}"),
        }
    }
}

/// Counters for external observation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    pub fills: u32,
    pub writes: u32,
    pub failed_writes: u32,
    pub mode_faults: u32,
}

/// What happened during one poll
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollResult {
    pub filled: bool,
    pub wrote: bool,
}

/// Reduce an integer step to the 8-bit phase circle
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const fn speed_step(step: i16) -> u8 {
    step.rem_euclid(256) as u8
}

/// Animation engine - owns the frame, the phase, every mode and the schedule
///
/// `MAX_LEDS` is the buffer capacity; the strip length is chosen at
/// construction and never changes.
pub struct AnimationEngine<D, C, R, const MAX_LEDS: usize>
where
    D: OutputDriver,
    C: Clock,
    R: RngCore,
{
    // External collaborators
    driver: D,
    clock: C,
    rng: R,

    // Configuration
    num_leds: usize,
    brightness: u8,
    speed: u8,

    // Frame state
    buffer: [Rgb; MAX_LEDS],
    palette: Palette,
    phase: u8,

    // Modes
    modes: ModeBank<MAX_LEDS>,
    registry: ModeRegistry,
    active: ModeHandle,

    scheduler: DualRateScheduler,
    running: bool,
    stats: EngineStats,
}

impl<D, C, const MAX_LEDS: usize> AnimationEngine<D, C, SmallRng, MAX_LEDS>
where
    D: OutputDriver,
    C: Clock,
{
    /// Create an engine using a `SmallRng` seeded from `config.seed`
    pub fn with_seed(config: &EngineConfig, driver: D, clock: C) -> Result<Self, ConfigError> {
        Self::new(config, driver, clock, SmallRng::seed_from_u64(config.seed))
    }
}

impl<D, C, R, const MAX_LEDS: usize> AnimationEngine<D, C, R, MAX_LEDS>
where
    D: OutputDriver,
    C: Clock,
    R: RngCore,
{
    /// Create a stopped engine
    pub fn new(config: &EngineConfig, driver: D, clock: C, rng: R) -> Result<Self, ConfigError> {
        if config.num_leds == 0 {
            return Err(ConfigError::ZeroLeds);
        }
        if config.num_leds > MAX_LEDS {
            return Err(ConfigError::TooManyLeds {
                requested: config.num_leds,
                capacity: MAX_LEDS,
            });
        }

        let now = clock.now_ms();
        let mut modes = ModeBank::new(config.num_leds);
        modes.set_solid_color(config.solid_color);

        Ok(Self {
            driver,
            clock,
            rng,
            num_leds: config.num_leds,
            brightness: config.brightness.min(MAX_BRIGHTNESS),
            speed: speed_step(config.speed),
            buffer: [BLACK; MAX_LEDS],
            palette: Palette::new(),
            phase: 0,
            modes,
            registry: ModeRegistry::new(),
            active: ModeHandle::Builtin(config.mode),
            scheduler: DualRateScheduler::new(
                interval_from_hz(config.fill_rate_hz),
                interval_from_hz(config.write_rate_hz),
                now,
            ),
            running: false,
            stats: EngineStats::default(),
        })
    }

    /// Start ticking from the current clock value
    pub fn start(&mut self) {
        let now = self.clock.now_ms();
        self.scheduler.restart(now);
        self.driver.set_brightness(self.brightness);
        self.running = true;
        info!(
            "engine started: {} leds, fill every {} ms, write every {} ms",
            self.num_leds,
            self.scheduler.fill_interval().as_millis(),
            self.scheduler.write_interval().as_millis()
        );
    }

    /// Stop ticking; no further fills or writes happen until `start`
    pub fn stop(&mut self) {
        if self.running {
            info!("engine stopped");
        }
        self.running = false;
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Check both gates against the clock, in fill then write order
    pub fn poll(&mut self) -> PollResult {
        let now = self.clock.now_ms();
        self.poll_at(now)
    }

    /// Check both gates against an explicit timestamp
    pub fn poll_at(&mut self, now: u32) -> PollResult {
        let mut result = PollResult::default();
        if !self.running {
            return result;
        }

        if self.scheduler.fill_due(now) {
            self.fill();
            self.scheduler.complete_fill(now);
            result.filled = true;
        }

        if self.scheduler.write_due(now) {
            self.scheduler.begin_write();
            self.flush();
            self.scheduler.complete_write(now);
            result.wrote = true;
        }

        result
    }

    /// Run the active mode once and advance the phase, ignoring the fill gate
    ///
    /// A faulting mode is replaced by rainbow for this tick only.
    pub fn fill(&mut self) {
        let mut ctx = RenderContext {
            leds: &mut self.buffer[..self.num_leds],
            palette: &self.palette,
            phase: self.phase,
            speed: self.speed,
            rng: &mut self.rng,
        };

        let result = match self.active {
            ModeHandle::Builtin(id) => self.modes.render(id, &mut ctx),
            ModeHandle::Custom(render) => render(&mut ctx),
        };

        if let Err(fault) = result {
            self.stats.mode_faults = self.stats.mode_faults.wrapping_add(1);
            warn!("mode fault: {fault}; rendering rainbow for this tick");
            if let Err(fault) = self.modes.render(ModeId::Rainbow, &mut ctx) {
                error!("rainbow fallback failed: {fault}");
            }
        }

        self.phase = self.phase.wrapping_add(self.speed);
        self.stats.fills = self.stats.fills.wrapping_add(1);
    }

    /// Send the current frame to the driver, ignoring the write gate
    ///
    /// Failures are logged and dropped; the next write proceeds normally.
    pub fn flush(&mut self) {
        let frame = &self.buffer[..self.num_leds];
        match self.driver.write(frame) {
            Ok(()) => {
                self.stats.writes = self.stats.writes.wrapping_add(1);
            }
            Err(err) => {
                self.stats.failed_writes = self.stats.failed_writes.wrapping_add(1);
                warn!("led write failed: {err:?}");
            }
        }
    }

    /// Write an all-black frame straight to the driver
    ///
    /// The engine frame is left untouched.
    pub fn blank(&mut self) {
        let frame = [BLACK; MAX_LEDS];
        if let Err(err) = self.driver.write(&frame[..self.num_leds]) {
            warn!("blanking write failed: {err:?}");
        }
    }

    /// Select a mode by name; unknown names select rainbow
    pub fn set_mode(&mut self, name: &str) -> ModeHandle {
        let handle = self.registry.select(name);
        if self.registry.contains(name) {
            debug!("mode -> {name}");
        } else {
            debug!("unknown mode {name:?}, using rainbow");
        }
        self.active = handle;
        handle
    }

    /// Select a built-in mode
    pub fn set_mode_id(&mut self, id: ModeId) {
        debug!("mode -> {}", id.as_str());
        self.active = ModeHandle::Builtin(id);
    }

    /// Register a name; it becomes selectable through [`Self::set_mode`]
    pub fn register(&mut self, name: &'static str, handle: ModeHandle) -> Result<(), RegistryError> {
        self.registry.register(name, handle)
    }

    pub const fn active_mode(&self) -> ModeHandle {
        self.active
    }

    /// Reset the private state of the active built-in mode
    ///
    /// Switching modes never does this on its own.
    pub fn reset_mode_state(&mut self) {
        if let ModeHandle::Builtin(id) = self.active {
            self.modes.reset(id);
        }
    }

    /// Set the phase step per fill tick
    pub fn set_speed(&mut self, step: i16) {
        self.speed = speed_step(step);
        debug!("speed -> {}", self.speed);
    }

    pub const fn speed(&self) -> u8 {
        self.speed
    }

    /// Set the fill rate; non-positive rates clamp to a 1 ms interval
    pub fn set_fill_rate(&mut self, hz: f32) {
        let interval = interval_from_hz(hz);
        self.scheduler.set_fill_interval(interval);
        debug!("fill interval -> {} ms", interval.as_millis());
    }

    /// Set the write rate; non-positive rates clamp to a 1 ms interval
    pub fn set_write_rate(&mut self, hz: f32) {
        let interval = interval_from_hz(hz);
        self.scheduler.set_write_interval(interval);
        debug!("write interval -> {} ms", interval.as_millis());
    }

    pub const fn fill_interval(&self) -> Duration {
        self.scheduler.fill_interval()
    }

    pub const fn write_interval(&self) -> Duration {
        self.scheduler.write_interval()
    }

    /// Set brightness (clamped to 0-100) and forward it to the driver
    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness.min(MAX_BRIGHTNESS);
        self.driver.set_brightness(self.brightness);
    }

    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Fixed color for the solid mode, `None` follows the phase
    pub fn set_solid_color(&mut self, color: Option<Rgb>) {
        self.modes.set_solid_color(color);
    }

    /// Apply a queued control command
    pub fn apply(&mut self, command: EngineCommand) {
        match command {
            EngineCommand::SetMode(name) => {
                self.set_mode(&name);
            }
            EngineCommand::SetModeId(id) => self.set_mode_id(id),
            EngineCommand::SetSpeed(step) => self.set_speed(step),
            EngineCommand::SetFillRate(hz) => self.set_fill_rate(hz),
            EngineCommand::SetWriteRate(hz) => self.set_write_rate(hz),
            EngineCommand::SetBrightness(brightness) => self.set_brightness(brightness),
            EngineCommand::SetSolidColor(color) => self.set_solid_color(color),
            EngineCommand::ResetModeState => self.reset_mode_state(),
            EngineCommand::Stop => self.stop(),
        }
    }

    /// Current frame, `num_leds` long
    pub fn frame(&self) -> &[Rgb] {
        &self.buffer[..self.num_leds]
    }

    pub const fn phase(&self) -> u8 {
        self.phase
    }

    /// Move the phase, e.g. to resume a known animation position
    pub fn set_phase(&mut self, phase: u8) {
        self.phase = phase;
    }

    pub const fn num_leds(&self) -> usize {
        self.num_leds
    }

    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    pub const fn registry(&self) -> &ModeRegistry {
        &self.registry
    }

    pub const fn modes(&self) -> &ModeBank<MAX_LEDS> {
        &self.modes
    }

    pub const fn scheduler(&self) -> &DualRateScheduler {
        &self.scheduler
    }

    pub const fn stats(&self) -> EngineStats {
        self.stats
    }

    pub fn now_ms(&self) -> u32 {
        self.clock.now_ms()
    }

    pub const fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}
