//! Run loop driving an engine from its command queue
//!
//! The loop checks both gates, then sleeps for [`LOOP_QUANTUM`]. Commands are
//! drained at the start of every iteration, so a `Stop` is honored within one
//! quantum.
//!
//! # Usage
//!
//! ```ignore
//! static COMMANDS: CommandChannel<8> = CommandChannel::new();
//!
//! let engine = AnimationEngine::<_, _, _, 64>::with_seed(&config, driver, SystemClock)?;
//! let mut runner = EngineRunner::new(engine, COMMANDS.receiver());
//! runner.run().await;
//! ```

use embassy_time::{Duration, Timer};
use log::info;
use rand::RngCore;

use crate::OutputDriver;
use crate::clock::Clock;
use crate::command::CommandReceiver;
use crate::engine::{AnimationEngine, PollResult};
use crate::scheduler::LOOP_QUANTUM;

pub struct EngineRunner<'a, D, C, R, const MAX_LEDS: usize, const COMMANDS: usize>
where
    D: OutputDriver,
    C: Clock,
    R: RngCore,
{
    engine: AnimationEngine<D, C, R, MAX_LEDS>,
    commands: CommandReceiver<'a, COMMANDS>,
}

impl<'a, D, C, R, const MAX_LEDS: usize, const COMMANDS: usize>
    EngineRunner<'a, D, C, R, MAX_LEDS, COMMANDS>
where
    D: OutputDriver,
    C: Clock,
    R: RngCore,
{
    pub const fn new(
        engine: AnimationEngine<D, C, R, MAX_LEDS>,
        commands: CommandReceiver<'a, COMMANDS>,
    ) -> Self {
        Self { engine, commands }
    }

    /// Apply every queued command, returns how many were applied
    pub fn process_commands(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(command) = self.commands.try_receive() {
            self.engine.apply(command);
            applied += 1;
        }
        applied
    }

    /// One loop iteration without the sleep
    pub fn step(&mut self) -> PollResult {
        self.process_commands();
        self.engine.poll()
    }

    /// Run until stopped, sleeping with the embassy timer
    pub async fn run(&mut self) {
        self.engine.start();
        while self.engine.is_running() {
            self.step();
            if !self.engine.is_running() {
                break;
            }
            Timer::after(LOOP_QUANTUM).await;
        }
        info!("run loop exited after {} fills", self.engine.stats().fills);
    }

    /// Run until stopped, sleeping with a caller supplied function
    pub fn run_blocking<S>(&mut self, mut sleep: S)
    where
        S: FnMut(Duration),
    {
        self.engine.start();
        while self.engine.is_running() {
            self.step();
            if !self.engine.is_running() {
                break;
            }
            sleep(LOOP_QUANTUM);
        }
        info!("run loop exited after {} fills", self.engine.stats().fills);
    }

    pub const fn engine(&self) -> &AnimationEngine<D, C, R, MAX_LEDS> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut AnimationEngine<D, C, R, MAX_LEDS> {
        &mut self.engine
    }

    pub fn into_engine(self) -> AnimationEngine<D, C, R, MAX_LEDS> {
        self.engine
    }
}
