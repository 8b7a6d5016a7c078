//! Single-button keyboard simulator for Windows/Desktop.
//!
//! Runs the same gesture pipeline as the firmware against keyboard input and
//! prints the HID commands it would send.
//!
//! ```bash
//! cargo run -p cuskey-simulator -- [media|ptt|autosend] [PinPat4|PinPat23]
//! ```
//!
//! # Controls
//!
//! - **Space**: the button (hold for long press)
//! - **M**: flip the mode A/B switch
//! - **N**: flip the second mode pin (PinPat23 only)
//! - **Escape**: quit

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]

mod colors;
mod console;
mod pins;
mod screens;
mod timing;

use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use cuskey_common::{BoardProfile, ConfigError, Device, Millis, Variant};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};

use crate::colors::BLACK;
use crate::console::{ConsoleObserver, PrintSink};
use crate::pins::SimPins;
use crate::screens::{SCREEN_HEIGHT, SCREEN_WIDTH, StatusView, draw_status_page};
use crate::timing::REDRAW_INTERVAL;

const DEFAULT_VARIANT: &str = "ptt";
const DEFAULT_BOARD: &str = "PinPat4";

/// Variant and board picked on the command line.
struct Selection {
    variant: Variant,
    board: &'static BoardProfile,
}

fn parse_args(args: &[&str]) -> Result<Selection, ConfigError> {
    let variant = args.first().copied().unwrap_or(DEFAULT_VARIANT);
    let board = args.get(1).copied().unwrap_or(DEFAULT_BOARD);
    Ok(Selection {
        variant: Variant::from_name(variant)?,
        board: BoardProfile::lookup(board)?,
    })
}

fn build_device(selection: &Selection) -> Result<Device, ConfigError> {
    let mut settings = selection.variant.settings();
    selection.board.apply_to(&mut settings);
    let table = selection.variant.table(&settings)?;
    Device::new(settings, table)
}

fn print_banner(
    selection: &Selection,
    device: &Device,
) {
    println!("{} on {} ({})", selection.variant.title(), selection.board.id, selection.board.label);
    println!(
        "debug={} dual_mode={} loop={}ms",
        device.settings().debug_enabled,
        device.settings().dual_mode,
        device.settings().loop_delay
    );
    for (mode, gesture, action) in device.table().iter() {
        println!("  {} {}: {action}", mode.label(), gesture.label());
    }
    println!("Space = button, M = mode switch, N = second mode pin, Esc = quit");
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let selection = match parse_args(&args) {
        Ok(selection) => selection,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("usage: simulator [media|ptt|autosend] [PinPat4|PinPat23]");
            return ExitCode::FAILURE;
        }
    };
    let mut device = match build_device(&selection) {
        Ok(device) => device,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    print_banner(&selection, &device);

    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("cuskey simulator", &output_settings);

    display.clear(BLACK).ok();
    window.update(&display);

    let mut pins = SimPins::new(selection.board.pins.mode_b.is_some());
    let mut sink = PrintSink::new();
    let mut observer = ConsoleObserver::new();

    let start = Instant::now();
    let mut last_draw: Option<Instant> = None;

    loop {
        let now = start.elapsed().as_millis() as Millis;

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => {
                    device.release_all(now, &mut sink);
                    return ExitCode::SUCCESS;
                }
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::Space => pins.set_button(true),
                        Keycode::M => pins.toggle_mode_a(),
                        Keycode::N => {
                            if !pins.toggle_mode_b() {
                                println!("{} has no second mode pin", selection.board.id);
                            }
                        }
                        Keycode::Escape => {
                            device.release_all(now, &mut sink);
                            return ExitCode::SUCCESS;
                        }
                        _ => {}
                    }
                }
                SimulatorEvent::KeyUp { keycode: Keycode::Space, .. } => pins.set_button(false),
                _ => {}
            }
        }

        sink.set_now(now);
        let report = device.tick(now, &mut pins, &mut sink, &mut observer);

        if last_draw.is_none_or(|at| at.elapsed() >= REDRAW_INTERVAL) {
            let view = StatusView {
                title: selection.variant.title(),
                button_down: pins.button_down(),
                sent: sink.sent(),
                sent_total: sink.total(),
                log: observer.log(),
            };
            draw_status_page(&mut display, &device, &view);
            window.update(&display);
            last_draw = Some(Instant::now());
        }

        thread::sleep(Duration::from_millis(report.sleep_ms));
    }
}
