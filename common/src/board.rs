//! Board profiles: pin assignments and feature flags per supported wiring.
//!
//! Pins are GPIO numbers. The `*_gnd` pins are driven low at boot so that a
//! button or switch can be wired between two adjacent header pins without a
//! separate ground run.

use crate::config::Settings;
use crate::error::ConfigError;

/// GPIO assignment for one board wiring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardPins {
    pub button_gnd: Option<u8>,
    pub button: u8,
    pub mode_gnd: Option<u8>,
    pub mode_a: u8,
    pub mode_b: Option<u8>,
}

/// Feature switches that travel with a board profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardFeatures {
    pub debug_enabled: bool,
    pub dual_mode: bool,
}

/// A named board wiring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardProfile {
    /// Identifier used to select the profile.
    pub id: &'static str,
    /// Label shown in the boot banner.
    pub label: &'static str,
    pub pins: BoardPins,
    pub features: BoardFeatures,
}

/// Global override for every profile's debug flag, `None` keeps the profile value.
pub const DEBUG_OVERRIDE: Option<bool> = Some(true);

/// Every supported wiring.
pub const BOARD_PROFILES: [BoardProfile; 2] = [
    BoardProfile {
        id: "PinPat4",
        label: "4pin",
        pins: BoardPins {
            button_gnd: Some(5),
            button: 6,
            mode_gnd: Some(7),
            mode_a: 8,
            mode_b: None,
        },
        features: BoardFeatures {
            debug_enabled: true,
            dual_mode: false,
        },
    },
    BoardProfile {
        id: "PinPat23",
        label: "2pin_3pin",
        pins: BoardPins {
            button_gnd: Some(7),
            button: 8,
            mode_gnd: Some(11),
            mode_a: 10,
            mode_b: Some(12),
        },
        features: BoardFeatures {
            debug_enabled: false,
            dual_mode: false,
        },
    },
];

impl BoardProfile {
    /// Find a profile by its identifier.
    pub fn lookup(id: &str) -> Result<&'static Self, ConfigError> {
        BOARD_PROFILES
            .iter()
            .find(|profile| profile.id == id)
            .ok_or(ConfigError::UnknownBoard)
    }

    /// Feature flags after applying [`DEBUG_OVERRIDE`].
    pub const fn effective_features(&self) -> BoardFeatures {
        let debug_enabled = match DEBUG_OVERRIDE {
            Some(forced) => forced,
            None => self.features.debug_enabled,
        };
        BoardFeatures {
            debug_enabled,
            dual_mode: self.features.dual_mode,
        }
    }

    /// Copy the board's feature flags into a settings value.
    pub fn apply_to(
        &self,
        settings: &mut Settings,
    ) {
        let features = self.effective_features();
        settings.debug_enabled = features.debug_enabled;
        settings.dual_mode = features.dual_mode && self.pins.mode_b.is_some();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_boards() {
        let four = BoardProfile::lookup("PinPat4").unwrap();
        assert_eq!(four.pins.button, 6);
        assert_eq!(four.pins.mode_a, 8);
        assert_eq!(four.pins.mode_b, None);

        let two_three = BoardProfile::lookup("PinPat23").unwrap();
        assert_eq!(two_three.pins.mode_gnd, Some(11));
        assert_eq!(two_three.pins.mode_b, Some(12));
    }

    #[test]
    fn test_lookup_unknown_board_fails() {
        assert_eq!(BoardProfile::lookup("ProMiroPico"), Err(ConfigError::UnknownBoard));
        assert_eq!(BoardProfile::lookup(""), Err(ConfigError::UnknownBoard));
    }

    #[test]
    fn test_profile_ids_unique() {
        for (i, a) in BOARD_PROFILES.iter().enumerate() {
            for b in &BOARD_PROFILES[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_debug_override_applies() {
        let profile = BoardProfile::lookup("PinPat23").unwrap();
        let features = profile.effective_features();
        match DEBUG_OVERRIDE {
            Some(forced) => assert_eq!(features.debug_enabled, forced),
            None => assert!(!features.debug_enabled),
        }
    }

    #[test]
    fn test_apply_to_settings() {
        let profile = BoardProfile::lookup("PinPat4").unwrap();
        let mut settings = Settings::default();
        profile.apply_to(&mut settings);
        assert!(!settings.dual_mode);
        assert_eq!(settings.debug_enabled, profile.effective_features().debug_enabled);
    }
}
