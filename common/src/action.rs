//! Output vocabulary: HID usage codes, sink commands and table actions.
//!
//! Three layers, from the wire outward:
//! - [`HidCommand`]: what the HID sink receives (send / press / release a key,
//!   send a consumer code, move the wheel). At-most-once, no acknowledgment.
//! - [`Output`]: a self-contained one-shot output that expands to one sink
//!   command.
//! - [`Action`]: what an action table binds to a gesture. Some actions live
//!   for the duration of a long press (hold, repeat), some are one-shot.

use core::fmt;

use heapless::Vec;

use crate::timing::Millis;

// =============================================================================
// Usage Codes
// =============================================================================

/// Keyboard usage ID (HID usage page 0x07).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyCode(pub u8);

impl KeyCode {
    pub const A: Self = Self(0x04);
    pub const ONE: Self = Self(0x1E);
    pub const ENTER: Self = Self(0x28);
    pub const ESCAPE: Self = Self(0x29);
    pub const TAB: Self = Self(0x2B);
    pub const F12: Self = Self(0x45);
    pub const HOME: Self = Self(0x4A);
    pub const PAGE_UP: Self = Self(0x4B);
    pub const END: Self = Self(0x4D);
    pub const PAGE_DOWN: Self = Self(0x4E);
    pub const RIGHT_ARROW: Self = Self(0x4F);
    pub const LEFT_ARROW: Self = Self(0x50);
    pub const CONTROL: Self = Self(0xE0);
    pub const SHIFT: Self = Self(0xE1);
    pub const ALT: Self = Self(0xE2);
    pub const GUI: Self = Self(0xE3);

    /// Modifier keys live in the report's modifier byte, not in the key array.
    #[inline]
    pub const fn is_modifier(self) -> bool { self.0 >= 0xE0 && self.0 <= 0xE7 }

    /// Bit in the modifier byte for a modifier key, 0 for ordinary keys.
    #[inline]
    pub const fn modifier_bit(self) -> u8 {
        if self.is_modifier() { 1 << (self.0 - 0xE0) } else { 0 }
    }

    /// Short human-readable name for logs and banners.
    pub const fn name(self) -> &'static str {
        match self.0 {
            0x04 => "A",
            0x1E => "1",
            0x28 => "ENTER",
            0x29 => "ESC",
            0x2A => "BACKSPACE",
            0x2B => "TAB",
            0x2C => "SPACE",
            0x45 => "F12",
            0x4A => "HOME",
            0x4B => "PAGE_UP",
            0x4D => "END",
            0x4E => "PAGE_DOWN",
            0x4F => "RIGHT",
            0x50 => "LEFT",
            0x51 => "DOWN",
            0x52 => "UP",
            0xE0 => "CTRL",
            0xE1 => "SHIFT",
            0xE2 => "ALT",
            0xE3 => "GUI",
            _ => "KEY",
        }
    }
}

/// Consumer-control usage ID (HID usage page 0x0C).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConsumerCode(pub u16);

impl ConsumerCode {
    pub const PLAY_PAUSE: Self = Self(0xCD);

    pub const fn name(self) -> &'static str {
        match self.0 {
            0xB5 => "NEXT_TRACK",
            0xB6 => "PREV_TRACK",
            0xB7 => "STOP",
            0xCD => "PLAY_PAUSE",
            0xE2 => "MUTE",
            0xE9 => "VOL_UP",
            0xEA => "VOL_DOWN",
            _ => "CONSUMER",
        }
    }
}

// =============================================================================
// Sink Commands
// =============================================================================

/// One command for the external HID sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidCommand {
    /// Press and immediately release a key.
    SendKey(KeyCode),
    /// Press a key and keep it down until a matching release.
    PressKey(KeyCode),
    /// Release a key previously pressed.
    ReleaseKey(KeyCode),
    /// Send a consumer-control code (press and release).
    SendConsumer(ConsumerCode),
    /// Move the mouse wheel by `delta` detents (negative scrolls down).
    Wheel(i8),
}

/// External HID output.
///
/// Delivery is fire-and-forget: the core never waits for, retries or observes
/// the result of an emitted command.
pub trait HidSink {
    fn emit(
        &mut self,
        command: HidCommand,
    );
}

impl<S: HidSink + ?Sized> HidSink for &mut S {
    fn emit(
        &mut self,
        command: HidCommand,
    ) {
        (**self).emit(command);
    }
}

// =============================================================================
// Outputs and Actions
// =============================================================================

/// Maximum number of keys held together by a push-to-talk binding.
pub const MAX_COMBO_KEYS: usize = 3;

/// Ordered key combination, pressed first-to-last and released last-to-first.
pub type KeyCombo = Vec<KeyCode, MAX_COMBO_KEYS>;

/// One-shot output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Output {
    Key(KeyCode),
    Consumer(ConsumerCode),
    Wheel(i8),
}

impl Output {
    /// The sink command this output expands to.
    #[inline]
    pub const fn command(self) -> HidCommand {
        match self {
            Self::Key(key) => HidCommand::SendKey(key),
            Self::Consumer(code) => HidCommand::SendConsumer(code),
            Self::Wheel(delta) => HidCommand::Wheel(delta),
        }
    }
}

impl fmt::Display for Output {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key.name()),
            Self::Consumer(code) => f.write_str(code.name()),
            Self::Wheel(delta) => write!(f, "WHEEL {delta:+}"),
        }
    }
}

/// Behaviour bound to a `(Mode, GestureKind)` pair in an action table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Emit one output.
    Emit(Output),
    /// Emit `count` copies of an output, `gap` apart.
    Burst { output: Output, count: u8, gap: Millis },
    /// Press all keys on long-press start, release them in reverse on end.
    ///
    /// Bound to a click it degrades to press-all then release-all.
    Hold(KeyCombo),
    /// Emit immediately on long-press start, then every `interval` until end.
    ///
    /// Bound to a click it degrades to a single emission.
    Repeat { output: Output, interval: Millis },
    /// Flip the persistent auto-send flag.
    ToggleAutoSend,
}

impl Action {
    /// Whether the action occupies the dispatcher for a whole long press.
    #[inline]
    pub const fn is_lifetime_bound(&self) -> bool { matches!(self, Self::Hold(_) | Self::Repeat { .. }) }
}

impl fmt::Display for Action {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Emit(output) => write!(f, "{output}"),
            Self::Burst { output, count, gap } => write!(f, "{output} x{count} ({gap} ms apart)"),
            Self::Hold(keys) => {
                f.write_str("hold ")?;
                for (i, key) in keys.iter().enumerate() {
                    if i > 0 {
                        f.write_str("+")?;
                    }
                    f.write_str(key.name())?;
                }
                Ok(())
            }
            Self::Repeat { output, interval } => write!(f, "{output} every {interval} ms"),
            Self::ToggleAutoSend => f.write_str("toggle auto-send"),
        }
    }
}
