//! Keyboard-driven stand-in for the button and mode switch pins.
//!
//! Levels follow the pull-up wiring of the real boards: a pressed button reads
//! low, a closed mode switch reads low.

use cuskey_common::{InputPins, ModeLevels};

#[derive(Clone, Copy, Debug)]
pub struct SimPins {
    button_down: bool,
    mode_a_high: bool,
    /// `None` when the simulated board has no second mode pin.
    mode_b_high: Option<bool>,
}

impl SimPins {
    pub const fn new(has_mode_b: bool) -> Self {
        Self {
            button_down: false,
            // Switch closed: mode A
            mode_a_high: false,
            mode_b_high: if has_mode_b { Some(true) } else { None },
        }
    }

    #[inline]
    pub fn set_button(
        &mut self,
        down: bool,
    ) {
        self.button_down = down;
    }

    #[inline]
    pub const fn button_down(&self) -> bool { self.button_down }

    pub fn toggle_mode_a(&mut self) { self.mode_a_high = !self.mode_a_high; }

    /// Flip the second mode pin. Returns `false` if the board has none.
    pub fn toggle_mode_b(&mut self) -> bool {
        match self.mode_b_high.as_mut() {
            Some(level) => {
                *level = !*level;
                true
            }
            None => false,
        }
    }
}

impl InputPins for SimPins {
    fn button_level(&mut self) -> bool { !self.button_down }

    fn mode_levels(&mut self) -> ModeLevels {
        ModeLevels {
            a: Some(self.mode_a_high),
            b: self.mode_b_high,
        }
    }
}
