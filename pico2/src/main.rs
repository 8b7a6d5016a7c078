//! Single-button USB keyboard firmware for Raspberry Pi Pico 2 (RP2350)
//!
//! Turns one push button and a mode switch into USB HID keyboard, consumer
//! control and mouse wheel input. Board wiring and behaviour preset are
//! selected with cargo features:
//!
//! ```bash
//! cargo run -p cuskey-pico2 --release --no-default-features --features board-pinpat23,variant-media
//! ```
//!
//! # Architecture
//!
//! - Main task: samples the pins every loop delay and runs the gesture pipeline
//! - HID task: drains queued commands into USB reports
//! - USB task: runs the USB device stack

#![no_std]
#![no_main]
// Crate-level lints (match lib.rs for consistency)
#![allow(clippy::cast_possible_truncation)]

// Modules only used in the binary (not testable on host)
mod board_io;
mod usb_hid;

use cuskey_common::{DebugEvent, DebugObserver, Device, Millis};
use cuskey_pico2::selection::{self, Selection};
use defmt::{Display2Format, debug, info};
use embassy_executor::Spawner;
use embassy_time::{Instant, Timer};
use {defmt_rtt as _, panic_probe as _};

use crate::board_io::BoardIo;
use crate::usb_hid::{ChannelSink, hid_task, usb_task};

/// Forwards pipeline observations to the defmt log.
struct DefmtObserver;

impl DebugObserver for DefmtObserver {
    fn on_debug(
        &mut self,
        now: Millis,
        event: &DebugEvent,
    ) {
        debug!("[{}] {}", now, Display2Format(event));
    }
}

fn log_banner(selection: &Selection) {
    info!("{} ({} wiring)", selection.variant.title(), selection.board.label);
    info!(
        "debug={} dual_mode={} loop={}ms",
        selection.settings.debug_enabled, selection.settings.dual_mode, selection.settings.loop_delay
    );
    for (mode, gesture, action) in selection.table.iter() {
        info!("  {} {}: {}", mode.label(), gesture.label(), Display2Format(action));
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("cuskey starting...");

    let selection = match selection::resolve_build() {
        Ok(selection) => selection,
        Err(e) => defmt::panic!("Invalid build selection: {}", e),
    };
    log_banner(&selection);

    let p = embassy_rp::init(Default::default());
    let (mut pins, usb) = BoardIo::claim(p, &selection.board.pins);

    let (usb_device, writers) = usb_hid::build(usb, selection.variant.title());
    spawner.spawn(usb_task(usb_device)).unwrap();
    spawner.spawn(hid_task(writers)).unwrap();

    let debug_enabled = selection.settings.debug_enabled;
    let mut device = match Device::new(selection.settings, selection.table) {
        Ok(device) => device,
        Err(e) => defmt::panic!("Invalid configuration: {}", e),
    };

    let mut sink = ChannelSink;
    let mut observer = DefmtObserver;
    info!("Ready (debug output {})", if debug_enabled { "on" } else { "off" });

    loop {
        let now = Instant::now().as_millis();
        let report = device.tick(now, &mut pins, &mut sink, &mut observer);
        Timer::after_millis(report.sleep_ms).await;
    }
}
