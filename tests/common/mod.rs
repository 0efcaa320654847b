#![allow(dead_code)]

use std::cell::Cell;

use rand::RngCore;
use rgb_mode_engine::{
    AnimationEngine, Clock, EngineConfig, OutputDriver, Rgb, color::BLACK,
};

/// Clock advanced by hand
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u32>,
}

impl ManualClock {
    pub fn at(now: u32) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteError;

/// Driver remembering every frame it received
#[derive(Debug, Default)]
pub struct RecordingDriver {
    pub frames: Vec<Vec<Rgb>>,
    pub brightness: Option<u8>,
    pub attempts: usize,
    pub fail: bool,
}

impl OutputDriver for RecordingDriver {
    type Error = WriteError;

    fn write(&mut self, colors: &[Rgb]) -> Result<(), WriteError> {
        self.attempts += 1;
        if self.fail {
            return Err(WriteError);
        }
        self.frames.push(colors.to_vec());
        Ok(())
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = Some(brightness);
    }
}

/// Random source replaying a fixed script, then repeating a fallback value
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    script: Vec<u32>,
    index: usize,
    fallback: u32,
}

impl ScriptedRng {
    pub fn new(script: &[u32], fallback: u32) -> Self {
        Self {
            script: script.to_vec(),
            index: 0,
            fallback,
        }
    }

    pub fn constant(value: u32) -> Self {
        Self::new(&[], value)
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        let value = self.script.get(self.index).copied().unwrap_or(self.fallback);
        self.index += 1;
        value
    }

    fn next_u64(&mut self) -> u64 {
        (u64::from(self.next_u32()) << 32) | u64::from(self.next_u32())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for byte in dest {
            *byte = self.next_u32() as u8;
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

pub type TestEngine<'a, const N: usize> =
    AnimationEngine<RecordingDriver, &'a ManualClock, ScriptedRng, N>;

pub fn config(num_leds: usize) -> EngineConfig {
    EngineConfig {
        num_leds,
        ..EngineConfig::default()
    }
}

/// Started engine with a constant random source
pub fn engine<'a, const N: usize>(
    clock: &'a ManualClock,
    config: &EngineConfig,
    rng: ScriptedRng,
) -> TestEngine<'a, N> {
    let mut engine = AnimationEngine::new(config, RecordingDriver::default(), clock, rng)
        .expect("valid config");
    engine.start();
    engine
}

pub fn lit_indices(frame: &[Rgb]) -> Vec<usize> {
    frame
        .iter()
        .enumerate()
        .filter(|(_, led)| **led != BLACK)
        .map(|(i, _)| i)
        .collect()
}
