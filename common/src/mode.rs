//! Mode switch decoding.
//!
//! The mode switch is sampled every tick without debouncing; it is assumed to
//! move slowly compared with the poll rate.

/// Logical operating mode selected by the hardware switch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// `mode_a` pulled low (switch closed).
    #[default]
    A,
    /// `mode_a` floating high (switch open).
    B,
    /// `mode_b` pulled low on a dual-mode wiring.
    C,
}

impl Mode {
    /// Number of modes, for table sizing.
    pub const COUNT: usize = 3;

    pub const ALL: [Self; Self::COUNT] = [Self::A, Self::B, Self::C];

    /// Dense index for table lookups.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "Mode A",
            Self::B => "Mode B",
            Self::C => "Mode C",
        }
    }
}

/// Raw mode pin levels for one tick. `None` means the pin is not wired.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeLevels {
    pub a: Option<bool>,
    pub b: Option<bool>,
}

/// Stateless resolver from pin levels to [`Mode`].
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeReader {
    dual_mode: bool,
}

impl ModeReader {
    pub const fn new(dual_mode: bool) -> Self { Self { dual_mode } }

    /// Resolve the current mode. Missing pins resolve to [`Mode::A`].
    pub const fn read(
        &self,
        levels: ModeLevels,
    ) -> Mode {
        if self.dual_mode && matches!(levels.b, Some(false)) {
            return Mode::C;
        }
        match levels.a {
            Some(true) => Mode::B,
            Some(false) | None => Mode::A,
        }
    }
}
