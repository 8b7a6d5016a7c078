//! GPIO setup for the compiled-in board wiring.
//!
//! Ground pins are driven low and kept alive for the lifetime of the
//! firmware; button and mode pins are inputs with pull-ups. The USB
//! peripheral is handed back to the caller.

use cuskey_common::board::BoardPins;
use cuskey_common::{InputPins, ModeLevels};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::USB;
use embassy_rp::{Peri, Peripherals};

/// Live pins for one board wiring.
pub struct BoardIo {
    button: Input<'static>,
    mode_a: Input<'static>,
    mode_b: Option<Input<'static>>,
    _grounds: [Output<'static>; 2],
}

impl BoardIo {
    /// Claim the PinPat4 pins: GP5 ground, GP6 button, GP7 ground, GP8 mode.
    #[cfg(not(feature = "board-pinpat23"))]
    pub fn claim(
        p: Peripherals,
        pins: &BoardPins,
    ) -> (Self, Peri<'static, USB>) {
        defmt::assert!(
            pins.button_gnd == Some(5) && pins.button == 6 && pins.mode_gnd == Some(7) && pins.mode_a == 8,
            "board profile does not match PinPat4 wiring"
        );
        defmt::assert!(pins.mode_b.is_none());

        let io = Self {
            button: Input::new(p.PIN_6, Pull::Up),
            mode_a: Input::new(p.PIN_8, Pull::Up),
            mode_b: None,
            _grounds: [Output::new(p.PIN_5, Level::Low), Output::new(p.PIN_7, Level::Low)],
        };
        (io, p.USB)
    }

    /// Claim the PinPat23 pins: GP7 ground, GP8 button, GP11 ground, GP10/GP12 mode.
    #[cfg(feature = "board-pinpat23")]
    pub fn claim(
        p: Peripherals,
        pins: &BoardPins,
    ) -> (Self, Peri<'static, USB>) {
        defmt::assert!(
            pins.button_gnd == Some(7) && pins.button == 8 && pins.mode_gnd == Some(11) && pins.mode_a == 10,
            "board profile does not match PinPat23 wiring"
        );
        defmt::assert!(pins.mode_b == Some(12));

        let io = Self {
            button: Input::new(p.PIN_8, Pull::Up),
            mode_a: Input::new(p.PIN_10, Pull::Up),
            mode_b: Some(Input::new(p.PIN_12, Pull::Up)),
            _grounds: [Output::new(p.PIN_7, Level::Low), Output::new(p.PIN_11, Level::Low)],
        };
        (io, p.USB)
    }
}

impl InputPins for BoardIo {
    #[inline]
    fn button_level(&mut self) -> bool { self.button.is_high() }

    fn mode_levels(&mut self) -> ModeLevels {
        ModeLevels {
            a: Some(self.mode_a.is_high()),
            b: self.mode_b.as_ref().map(Input::is_high),
        }
    }
}
