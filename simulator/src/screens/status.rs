//! Status page: live pipeline state, recent HID output and the debug log.

use core::fmt::Write;

use cuskey_common::{Device, EventLog};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use embedded_graphics_simulator::SimulatorDisplay;
use heapless::String;
use profont::PROFONT_12_POINT;

use crate::colors::{BLACK, GRAY, GREEN, ORANGE, RED, TERMINAL_BG, WHITE, YELLOW};

pub const SCREEN_WIDTH: u32 = 320;
pub const SCREEN_HEIGHT: u32 = 240;

const HEADER_Y: i32 = 14;
const HEADER_DIVIDER_Y: i32 = 20;
const SECTION_HEADER_Y: i32 = 32;
const STATS_Y: i32 = 46;
const LOG_DIVIDER_Y: i32 = 130;
const LOG_Y: i32 = 142;
const LOG_LINE_HEIGHT: i32 = 11;
const COL1_X: i32 = 4;
const COL2_X: i32 = 176;
const STAT_LINE_HEIGHT: i32 = 13;
/// HID lines that fit in the output column.
const OUTPUT_LINES: usize = 6;

const HEADER_COLOR: Rgb565 = GREEN;
const SECTION_COLOR: Rgb565 = GRAY;
const VALUE_COLOR: Rgb565 = WHITE;
const HIGHLIGHT_COLOR: Rgb565 = YELLOW;
const ACTIVE_COLOR: Rgb565 = RED;
const LOG_PROMPT_COLOR: Rgb565 = GREEN;
const LOG_TEXT_COLOR: Rgb565 = ORANGE;
const DIVIDER_COLOR: Rgb565 = GRAY;

/// Everything the status page shows besides the device itself.
pub struct StatusView<'a> {
    pub title: &'a str,
    pub button_down: bool,
    pub sent: &'a EventLog,
    pub sent_total: u32,
    pub log: &'a EventLog,
}

pub fn draw_status_page(
    display: &mut SimulatorDisplay<Rgb565>,
    device: &Device,
    view: &StatusView<'_>,
) {
    display.clear(BLACK).ok();
    draw_header(display, device, view.title);
    draw_horizontal_line(display, HEADER_DIVIDER_Y);
    draw_section_headers(display);
    draw_state_column(display, device, view.button_down);
    draw_output_column(display, view);
    draw_horizontal_line(display, LOG_DIVIDER_Y);
    draw_log_terminal(display, view.log);
}

fn draw_header(
    display: &mut SimulatorDisplay<Rgb565>,
    device: &Device,
    title: &str,
) {
    let header_style = MonoTextStyle::new(&PROFONT_12_POINT, HEADER_COLOR);
    let info_style = MonoTextStyle::new(&FONT_6X10, VALUE_COLOR);

    Text::new(title, Point::new(COL1_X, HEADER_Y), header_style)
        .draw(display)
        .ok();
    Text::new(device.mode().label(), Point::new(260, HEADER_Y), info_style)
        .draw(display)
        .ok();
}

fn draw_section_headers(display: &mut SimulatorDisplay<Rgb565>) {
    let style = MonoTextStyle::new(&FONT_6X10, SECTION_COLOR);
    Text::new("STATE", Point::new(COL1_X, SECTION_HEADER_Y), style)
        .draw(display)
        .ok();
    Text::new("HID OUT", Point::new(COL2_X, SECTION_HEADER_Y), style)
        .draw(display)
        .ok();
}

fn draw_state_column(
    display: &mut SimulatorDisplay<Rgb565>,
    device: &Device,
    button_down: bool,
) {
    let value_style = MonoTextStyle::new(&FONT_6X10, VALUE_COLOR);
    let highlight_style = MonoTextStyle::new(&FONT_6X10, HIGHLIGHT_COLOR);
    let active_style = MonoTextStyle::new(&FONT_6X10, ACTIVE_COLOR);

    let x = COL1_X;
    let mut y = STATS_Y;

    let button_style = if button_down { active_style } else { value_style };
    Text::new(
        if button_down { "Button: DOWN" } else { "Button: up" },
        Point::new(x, y),
        button_style,
    )
    .draw(display)
    .ok();
    y += STAT_LINE_HEIGHT;

    let mut s: String<28> = String::new();
    let _ = write!(s, "Gesture: {}", device.gesture_state().label());
    Text::new(&s, Point::new(x, y), value_style).draw(display).ok();
    y += STAT_LINE_HEIGHT;

    let mut s: String<28> = String::new();
    match device.pending_clicks() {
        Some(window) => {
            let _ = write!(s, "Clicks: {} ({})", window.count, window.mode.label());
            Text::new(&s, Point::new(x, y), highlight_style).draw(display).ok();
        }
        None => {
            Text::new("Clicks: -", Point::new(x, y), value_style).draw(display).ok();
        }
    }
    y += STAT_LINE_HEIGHT;

    let auto_style = if device.auto_send_enabled() { highlight_style } else { value_style };
    Text::new(
        if device.auto_send_enabled() { "Auto-send: on" } else { "Auto-send: off" },
        Point::new(x, y),
        auto_style,
    )
    .draw(display)
    .ok();
    y += STAT_LINE_HEIGHT;

    let mut s: String<28> = String::new();
    let _ = write!(s, "Held: ");
    if device.held_keys().is_empty() {
        let _ = write!(s, "-");
    }
    for (i, key) in device.held_keys().iter().enumerate() {
        if i > 0 {
            let _ = write!(s, "+");
        }
        let _ = write!(s, "{}", key.name());
    }
    Text::new(&s, Point::new(x, y), active_style).draw(display).ok();
    y += STAT_LINE_HEIGHT;

    let settings = device.settings();
    let mut s: String<28> = String::new();
    let _ = write!(s, "Long: {}ms Dbl: {}ms", settings.long_press_threshold, settings.double_click_time);
    Text::new(&s, Point::new(x, y), value_style).draw(display).ok();
}

fn draw_output_column(
    display: &mut SimulatorDisplay<Rgb565>,
    view: &StatusView<'_>,
) {
    let value_style = MonoTextStyle::new(&FONT_6X10, VALUE_COLOR);
    let highlight_style = MonoTextStyle::new(&FONT_6X10, HIGHLIGHT_COLOR);

    let x = COL2_X;
    let mut y = STATS_Y;

    let mut s: String<20> = String::new();
    let _ = write!(s, "Sent: {}", view.sent_total);
    Text::new(&s, Point::new(x, y), highlight_style).draw(display).ok();
    y += STAT_LINE_HEIGHT;

    let skip = view.sent.len().saturating_sub(OUTPUT_LINES);
    for line in view.sent.iter().skip(skip) {
        Text::new(line, Point::new(x, y), value_style).draw(display).ok();
        y += STAT_LINE_HEIGHT;
    }
}

fn draw_log_terminal(
    display: &mut SimulatorDisplay<Rgb565>,
    log: &EventLog,
) {
    let prompt_style = MonoTextStyle::new(&FONT_6X10, LOG_PROMPT_COLOR);
    let text_style = MonoTextStyle::new(&FONT_6X10, LOG_TEXT_COLOR);

    Rectangle::new(
        Point::new(0, LOG_DIVIDER_Y + 2),
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT - LOG_DIVIDER_Y as u32 - 2),
    )
    .into_styled(PrimitiveStyle::with_fill(TERMINAL_BG))
    .draw(display)
    .ok();

    let mut y = LOG_Y;

    if log.is_empty() {
        Text::new("> (no events)", Point::new(COL1_X, y), prompt_style)
            .draw(display)
            .ok();
        return;
    }

    for line in log.iter() {
        Text::new(">", Point::new(COL1_X, y), prompt_style).draw(display).ok();
        Text::new(line, Point::new(COL1_X + 8, y), text_style)
            .draw(display)
            .ok();
        y += LOG_LINE_HEIGHT;
    }
}

fn draw_horizontal_line(
    display: &mut SimulatorDisplay<Rgb565>,
    y: i32,
) {
    Line::new(Point::new(2, y), Point::new(SCREEN_WIDTH as i32 - 2, y))
        .into_styled(PrimitiveStyle::with_stroke(DIVIDER_COLOR, 1))
        .draw(display)
        .ok();
}
