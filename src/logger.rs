//! Log backend for ESP32 targets
//!
//! The crate logs through the `log` facade. On ESP32 the `esp32-log` feature
//! routes those records to the serial console via `esp-println`; other targets
//! install their own backend.

use log::LevelFilter;

/// Install the `esp-println` logger with the given level
pub fn init(level: LevelFilter) {
    esp_println::logger::init_logger(level);
}
