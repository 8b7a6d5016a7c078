//! Firmware library - host-testable pieces of the RP2350 firmware.
//!
//! The binary (`main.rs`) uses this library and adds the embassy tasks, GPIO
//! and USB code.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test -p cuskey-pico2 --lib --target x86_64-unknown-linux-gnu  # Linux/macOS
//! cargo test -p cuskey-pico2 --lib --target x86_64-pc-windows-msvc    # Windows
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the actual firmware runs as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]

pub mod keyboard;
pub mod selection;
