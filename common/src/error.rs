//! Configuration errors.
//!
//! The gesture pipeline itself never fails at runtime: bounce and ambiguous
//! timing are resolved by policy. The only failures are invalid settings or
//! unknown identifiers, and those are reported once, before the tick loop
//! starts.

use core::fmt;

/// Reason a board, variant or settings value was rejected at initialization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// No board profile with the requested name.
    UnknownBoard,
    /// No firmware variant with the requested name.
    UnknownVariant,
    /// More push-to-talk keys than the HID report can hold at once.
    TooManyPttKeys,
    /// A hold binding was requested but no push-to-talk keys are configured.
    EmptyPttKeys,
    /// A repeat or periodic interval is zero.
    ZeroInterval,
    /// `long_press_threshold` must be strictly above `min_press_time`.
    LongPressNotAboveMinPress,
    /// `debounce_time` must be strictly below `long_press_threshold`.
    DebounceNotBelowLongPress,
}

impl fmt::Display for ConfigError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let msg = match self {
            Self::UnknownBoard => "unknown board type",
            Self::UnknownVariant => "unknown firmware variant",
            Self::TooManyPttKeys => "at most 3 push-to-talk keys are supported",
            Self::EmptyPttKeys => "push-to-talk hold needs at least one key",
            Self::ZeroInterval => "repeat and send intervals must be non-zero",
            Self::LongPressNotAboveMinPress => "long press threshold must exceed the minimum press time",
            Self::DebounceNotBelowLongPress => "debounce time must be shorter than the long press threshold",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for ConfigError {}
