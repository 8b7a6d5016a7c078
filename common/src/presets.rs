//! Shipped firmware variants.
//!
//! Each variant is a [`Settings`] preset plus an [`ActionTable`]. Switching a
//! board to another behaviour means picking another variant; the gesture core
//! is the same for all of them.

use crate::action::{Action, ConsumerCode, KeyCode, Output};
use crate::config::{MANUAL_SEND_INTERVAL, SEND_INTERVAL, Settings, WHEEL_SCROLL_INTERVAL};
use crate::dispatch::{ActionTable, GestureKind};
use crate::error::ConfigError;
use crate::mode::Mode;
use crate::timing::{Millis, secs_to_millis};

/// Gap between the two rewind presses of the media controller.
pub const REWIND_GAP: Millis = 50;

/// Selectable behaviour preset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Variant {
    /// Play/pause, rewind and scroll for video players.
    MediaController,
    /// Push-to-talk hold plus slide navigation.
    PttKey,
    /// Periodic arrow key with manual repeat.
    AutoKeySend,
}

impl Variant {
    pub const ALL: [Self; 3] = [Self::MediaController, Self::PttKey, Self::AutoKeySend];

    /// Identifier used on the command line and in cargo features.
    pub const fn name(self) -> &'static str {
        match self {
            Self::MediaController => "media",
            Self::PttKey => "ptt",
            Self::AutoKeySend => "autosend",
        }
    }

    /// Title printed at the top of the boot banner.
    pub const fn title(self) -> &'static str {
        match self {
            Self::MediaController => "media keyboard",
            Self::PttKey => "PTT keyboard",
            Self::AutoKeySend => "auto arrow-key sender",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.name() == name)
            .ok_or(ConfigError::UnknownVariant)
    }

    /// Timing preset for this variant.
    pub fn settings(self) -> Settings {
        let base = Settings::default();
        match self {
            // Clicks fire on release, long press acts on release as well
            Self::MediaController => Settings {
                long_press_threshold: secs_to_millis(1, 0),
                double_click_time: 0,
                ..base
            },
            Self::PttKey => Settings {
                min_press_time: 50,
                long_press_threshold: 300,
                double_click_time: 300,
                wheel_scroll_interval: WHEEL_SCROLL_INTERVAL,
                ..base
            },
            Self::AutoKeySend => Settings {
                long_press_threshold: 500,
                double_click_time: 0,
                manual_send_interval: MANUAL_SEND_INTERVAL,
                send_interval: SEND_INTERVAL,
                auto_send_enabled: false,
                ..base
            },
        }
    }

    /// Bindings for this variant, using the intervals and keys in `settings`.
    pub fn table(
        self,
        settings: &Settings,
    ) -> Result<ActionTable, ConfigError> {
        let mut table = match self {
            Self::MediaController => ActionTable::new()
                .with(
                    Mode::A,
                    GestureKind::SingleClick,
                    Action::Emit(Output::Consumer(ConsumerCode::PLAY_PAUSE)),
                )
                .with(
                    Mode::A,
                    GestureKind::LongPressEnd,
                    Action::Burst {
                        output: Output::Key(KeyCode::LEFT_ARROW),
                        count: 2,
                        gap: REWIND_GAP,
                    },
                )
                .with(Mode::B, GestureKind::SingleClick, Action::Emit(Output::Wheel(-1)))
                .with(
                    Mode::B,
                    GestureKind::LongPressEnd,
                    Action::Emit(Output::Consumer(ConsumerCode::PLAY_PAUSE)),
                ),
            Self::PttKey => {
                if settings.ptt_keys.is_empty() {
                    return Err(ConfigError::EmptyPttKeys);
                }
                ActionTable::new()
                    .with(Mode::A, GestureKind::SingleClick, Action::Emit(Output::Key(KeyCode::ENTER)))
                    .with(Mode::A, GestureKind::DoubleClick, Action::Emit(Output::Key(KeyCode::ESCAPE)))
                    .with(Mode::A, GestureKind::LongPress, Action::Hold(settings.ptt_keys.clone()))
                    .with(
                        Mode::B,
                        GestureKind::SingleClick,
                        Action::Emit(Output::Key(KeyCode::PAGE_DOWN)),
                    )
                    .with(Mode::B, GestureKind::DoubleClick, Action::Emit(Output::Key(KeyCode::PAGE_UP)))
                    .with(Mode::B, GestureKind::TripleClick, Action::Emit(Output::Key(KeyCode::HOME)))
                    .with(
                        Mode::B,
                        GestureKind::LongPress,
                        Action::Repeat {
                            output: Output::Wheel(-1),
                            interval: settings.wheel_scroll_interval,
                        },
                    )
            }
            Self::AutoKeySend => {
                let mut table = ActionTable::new();
                for (mode, key) in [(Mode::A, KeyCode::LEFT_ARROW), (Mode::B, KeyCode::RIGHT_ARROW)] {
                    table.bind(mode, GestureKind::SingleClick, Action::ToggleAutoSend);
                    table.bind(
                        mode,
                        GestureKind::LongPress,
                        Action::Repeat {
                            output: Output::Key(key),
                            interval: settings.manual_send_interval,
                        },
                    );
                    table.bind(mode, GestureKind::AutoSend, Action::Emit(Output::Key(key)));
                }
                table
            }
        };

        // The third mode is only reachable with dual-mode wiring; give it B's bindings
        if settings.dual_mode {
            table.mirror(Mode::B, Mode::C);
        }
        Ok(table)
    }
}
