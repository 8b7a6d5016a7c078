//! Gesture timing and feature settings.
//!
//! Defaults are compile-time constants with `const` assertions, so an
//! inconsistent default fails the build. Runtime values (variant presets,
//! board features) are checked once by [`Settings::validate`] before the
//! tick loop starts.

use crate::action::{KeyCode, KeyCombo, MAX_COMBO_KEYS};
use crate::error::ConfigError;
use crate::timing::Millis;

// =============================================================================
// Defaults
// =============================================================================

/// Time a raw level must hold steady before it becomes the stable level.
pub const DEBOUNCE_TIME: Millis = 50;

/// Hold time that turns a press into a long press.
pub const LONG_PRESS_THRESHOLD: Millis = 1000;

/// Window after a click during which the next press joins the same sequence.
pub const DOUBLE_CLICK_TIME: Millis = 300;

/// Presses shorter than this are contact noise (0 disables the filter).
pub const MIN_PRESS_TIME: Millis = 0;

/// Interval of manual key repeats while a long press is held.
pub const MANUAL_SEND_INTERVAL: Millis = 100;

/// Interval of wheel detents while a long press is held.
pub const WHEEL_SCROLL_INTERVAL: Millis = 50;

/// Interval of the periodic auto-send timer.
pub const SEND_INTERVAL: Millis = 8000;

/// Sleep at the end of every tick.
pub const LOOP_DELAY: Millis = 10;

/// Extra sleep after a resolved release to ride out contact chatter.
pub const RELEASE_GUARD: Millis = DEBOUNCE_TIME;

const _: () = assert!(DEBOUNCE_TIME < LONG_PRESS_THRESHOLD);
const _: () = assert!(MIN_PRESS_TIME < LONG_PRESS_THRESHOLD);
const _: () = assert!(MANUAL_SEND_INTERVAL > 0);
const _: () = assert!(WHEEL_SCROLL_INTERVAL > 0);
const _: () = assert!(SEND_INTERVAL > 0);
const _: () = assert!(LOOP_DELAY > 0);
// Chatter guard must stay a bounded, short wait
const _: () = assert!(RELEASE_GUARD <= 100);

/// Default push-to-talk combination: CTRL + TAB + 1.
pub fn default_ptt_keys() -> KeyCombo { KeyCombo::from_iter([KeyCode::CONTROL, KeyCode::TAB, KeyCode::ONE]) }

// =============================================================================
// Settings
// =============================================================================

/// Every tunable consumed by the gesture core.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub debounce_time: Millis,
    pub long_press_threshold: Millis,
    pub double_click_time: Millis,
    pub min_press_time: Millis,
    /// Interval of `LongPressTick` events, `None` disables them.
    pub long_press_tick: Option<Millis>,
    pub manual_send_interval: Millis,
    pub wheel_scroll_interval: Millis,
    pub send_interval: Millis,
    /// Initial state of the auto-send flag.
    pub auto_send_enabled: bool,
    pub release_guard: Millis,
    pub loop_delay: Millis,
    pub ptt_keys: KeyCombo,
    pub dual_mode: bool,
    pub debug_enabled: bool,
}

impl Settings {
    /// Check internal consistency. Called by `Device::new`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.long_press_threshold <= self.min_press_time {
            return Err(ConfigError::LongPressNotAboveMinPress);
        }
        if self.debounce_time >= self.long_press_threshold {
            return Err(ConfigError::DebounceNotBelowLongPress);
        }
        if self.manual_send_interval == 0
            || self.wheel_scroll_interval == 0
            || self.send_interval == 0
            || self.loop_delay == 0
            || self.long_press_tick == Some(0)
        {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }

    /// Replace the push-to-talk keys, rejecting combinations that do not fit.
    pub fn set_ptt_keys(
        &mut self,
        keys: &[KeyCode],
    ) -> Result<(), ConfigError> {
        if keys.len() > MAX_COMBO_KEYS {
            return Err(ConfigError::TooManyPttKeys);
        }
        self.ptt_keys = KeyCombo::from_slice(keys).map_err(|_| ConfigError::TooManyPttKeys)?;
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debounce_time: DEBOUNCE_TIME,
            long_press_threshold: LONG_PRESS_THRESHOLD,
            double_click_time: DOUBLE_CLICK_TIME,
            min_press_time: MIN_PRESS_TIME,
            long_press_tick: None,
            manual_send_interval: MANUAL_SEND_INTERVAL,
            wheel_scroll_interval: WHEEL_SCROLL_INTERVAL,
            send_interval: SEND_INTERVAL,
            auto_send_enabled: false,
            release_guard: RELEASE_GUARD,
            loop_delay: LOOP_DELAY,
            ptt_keys: default_ptt_keys(),
            dual_mode: false,
            debug_enabled: false,
        }
    }
}
