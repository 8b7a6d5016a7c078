//! Debounced input sampling for the button pin.
//!
//! Uses hold-steady debouncing: a raw level only becomes the stable level
//! after it has stayed unchanged for the whole debounce window. Anything
//! shorter is contact bounce and never reaches the gesture recognizer.

use crate::timing::{Millis, elapsed};

/// Stable level of a released button (pull-up wiring reads high).
pub const RELEASED: bool = true;

/// Stable level of a pressed button.
pub const PRESSED: bool = false;

/// Debounced view of one raw digital input.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebouncedInput {
    debounce_time: Millis,
    stable: bool,
    candidate: bool,
    candidate_since: Millis,
}

impl DebouncedInput {
    /// Create a sampler that starts in the released state.
    pub const fn new(debounce_time: Millis) -> Self {
        Self {
            debounce_time,
            stable: RELEASED,
            candidate: RELEASED,
            candidate_since: 0,
        }
    }

    /// Feed one raw sample and return the best-known stable level.
    pub fn sample(
        &mut self,
        raw: bool,
        now: Millis,
    ) -> bool {
        if raw != self.candidate {
            self.candidate = raw;
            self.candidate_since = now;
        }

        if self.candidate != self.stable && elapsed(self.candidate_since, now) >= self.debounce_time {
            self.stable = self.candidate;
        }

        self.stable
    }

    /// Current stable level without sampling.
    #[inline]
    pub const fn level(&self) -> bool { self.stable }

    /// Whether the stable level is "pressed".
    #[inline]
    pub const fn is_pressed(&self) -> bool { self.stable == PRESSED }
}
