//! Gesture recognition and dispatch core for single-button keyboards.
//!
//! This crate contains the platform-agnostic pipeline shared between the
//! RP2350 firmware and the desktop simulator:
//!
//! - [`debounce`]: raw pin level to stable level
//! - [`mode`]: mode switch pins to [`Mode`]
//! - [`gesture`]: press / long-press state machine
//! - [`clicks`]: multi-click window
//! - [`dispatch`]: action table, long-press jobs and auto-send timer
//! - [`device`]: the owned [`Device`] that ties the stages together
//! - [`presets`]: the shipped variants
//! - [`board`]: board pin profiles
//! - [`debug`]: debug observations and the event log
//!
//! # no_std Compatibility
//!
//! The crate is `no_std` outside of tests and never reads a clock: the host
//! passes the current time into [`Device::tick`].

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]

pub mod action;
pub mod board;
pub mod clicks;
pub mod config;
pub mod debounce;
pub mod debug;
pub mod device;
pub mod dispatch;
pub mod error;
pub mod gesture;
pub mod mode;
pub mod presets;
pub mod timing;

// Re-export commonly used items
pub use action::{Action, ConsumerCode, HidCommand, HidSink, KeyCode, KeyCombo, Output};
pub use board::BoardProfile;
pub use config::Settings;
pub use debug::{DebugEvent, DebugObserver, EventLog, NoDebug};
pub use device::{Device, InputPins, TickReport};
pub use dispatch::{ActionTable, Gesture, GestureKind};
pub use error::ConfigError;
pub use mode::{Mode, ModeLevels};
pub use presets::Variant;
pub use timing::Millis;
