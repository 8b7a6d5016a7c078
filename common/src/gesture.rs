//! Gesture recognition state machine.
//!
//! Consumes debounced button levels with timestamps and classifies each press
//! as contact noise, a short click, or a long press:
//!
//! ```text
//!           press                  held >= long_press_threshold
//!   Idle ──────────────> Pressed ──────────────────────────────> LongPressActive
//!    ^                     │                                          │
//!    └──── release ────────┴────────────── release ───────────────────┘
//! ```
//!
//! # Guarantees
//!
//! - Presses shorter than `min_press_time` emit nothing at all. `Pressed` is
//!   held back until the press has lasted `min_press_time`.
//! - Every confirmed press that reaches the threshold emits exactly one
//!   `LongPressStart` and one `LongPressEnd`, even if the threshold was crossed
//!   between two coarse ticks and only noticed at release.
//! - `LongPressTick` never restarts the long-press timer.

use heapless::Vec;

use crate::timing::{Millis, elapsed};

/// Maximum events produced by one update (coarse release of a long press).
pub const MAX_EVENTS_PER_UPDATE: usize = 4;

/// Events produced by a single [`GestureRecognizer::update`] call, in order.
pub type GestureEvents = Vec<GestureEvent, MAX_EVENTS_PER_UPDATE>;

/// Low-level gesture event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GestureEvent {
    /// The press outlasted `min_press_time` and is a real gesture.
    Pressed,
    /// The press reached `long_press_threshold`.
    LongPressStart,
    /// Periodic tick while a long press is held.
    LongPressTick,
    /// A long press ended. Always follows exactly one `LongPressStart`.
    LongPressEnd { duration: Millis },
    /// A real press ended. `long` releases are terminal and never count as clicks.
    Released { duration: Millis, long: bool },
}

impl GestureEvent {
    /// Whether this event is a short click that belongs to the click aggregator.
    #[inline]
    pub const fn is_short_click(&self) -> bool { matches!(self, Self::Released { long: false, .. }) }
}

/// Recognizer state. One instance per button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GestureState {
    #[default]
    Idle,
    /// Button down; `confirmed` once `Pressed` has been emitted.
    Pressed { since: Millis, confirmed: bool },
    /// Button down past the long-press threshold.
    LongPressActive { since: Millis, last_tick: Millis },
}

impl GestureState {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Pressed { .. } => "Pressed",
            Self::LongPressActive { .. } => "LongPress",
        }
    }

    /// Kind-only comparison, ignoring timestamps.
    #[inline]
    pub const fn same_kind(
        &self,
        other: &Self,
    ) -> bool {
        matches!(
            (self, other),
            (Self::Idle, Self::Idle)
                | (Self::Pressed { .. }, Self::Pressed { .. })
                | (Self::LongPressActive { .. }, Self::LongPressActive { .. })
        )
    }
}

/// Timing-driven classifier for one button.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GestureRecognizer {
    state: GestureState,
    long_press_threshold: Millis,
    min_press_time: Millis,
    tick_interval: Option<Millis>,
}

impl GestureRecognizer {
    /// Create an idle recognizer.
    ///
    /// `long_press_threshold` must be above `min_press_time`; `Settings::validate`
    /// enforces this before a recognizer is built from settings.
    pub const fn new(
        long_press_threshold: Millis,
        min_press_time: Millis,
        tick_interval: Option<Millis>,
    ) -> Self {
        Self {
            state: GestureState::Idle,
            long_press_threshold,
            min_press_time,
            tick_interval,
        }
    }

    #[inline]
    pub const fn state(&self) -> GestureState { self.state }

    /// Whether the button is currently held (any non-idle state).
    #[inline]
    pub const fn is_pressed(&self) -> bool { !matches!(self.state, GestureState::Idle) }

    /// Start time of the press in flight.
    #[inline]
    pub const fn press_started(&self) -> Option<Millis> {
        match self.state {
            GestureState::Idle => None,
            GestureState::Pressed { since, .. } | GestureState::LongPressActive { since, .. } => Some(since),
        }
    }

    #[inline]
    pub const fn long_press_threshold(&self) -> Millis { self.long_press_threshold }

    /// Advance with one stable level sample (`pressed == true` means held down).
    pub fn update(
        &mut self,
        pressed: bool,
        now: Millis,
    ) -> GestureEvents {
        let mut events = GestureEvents::new();

        match (self.state, pressed) {
            (GestureState::Idle, false) => {}
            (GestureState::Idle, true) => {
                self.state = GestureState::Pressed {
                    since: now,
                    confirmed: false,
                };
                self.advance_held(now, &mut events);
            }
            (_, true) => self.advance_held(now, &mut events),
            (state, false) => {
                self.state = GestureState::Idle;
                self.finish(state, now, &mut events);
            }
        }

        events
    }

    fn advance_held(
        &mut self,
        now: Millis,
        events: &mut GestureEvents,
    ) {
        match self.state {
            GestureState::Idle => {}
            GestureState::Pressed { since, mut confirmed } => {
                let held = elapsed(since, now);
                if !confirmed && held >= self.min_press_time {
                    confirmed = true;
                    events.push(GestureEvent::Pressed).ok();
                }

                self.state = if held >= self.long_press_threshold {
                    events.push(GestureEvent::LongPressStart).ok();
                    GestureState::LongPressActive { since, last_tick: now }
                } else {
                    GestureState::Pressed { since, confirmed }
                };
            }
            GestureState::LongPressActive { since, last_tick } => {
                if let Some(interval) = self.tick_interval
                    && elapsed(last_tick, now) >= interval
                {
                    events.push(GestureEvent::LongPressTick).ok();
                    self.state = GestureState::LongPressActive { since, last_tick: now };
                }
            }
        }
    }

    fn finish(
        &self,
        state: GestureState,
        now: Millis,
        events: &mut GestureEvents,
    ) {
        match state {
            GestureState::Idle => {}
            GestureState::Pressed { since, confirmed } => {
                let duration = elapsed(since, now);
                if duration < self.min_press_time {
                    // Contact noise
                    return;
                }
                if !confirmed {
                    events.push(GestureEvent::Pressed).ok();
                }
                if duration >= self.long_press_threshold {
                    // Threshold crossed between ticks
                    events.push(GestureEvent::LongPressStart).ok();
                    events.push(GestureEvent::LongPressEnd { duration }).ok();
                    events.push(GestureEvent::Released { duration, long: true }).ok();
                } else {
                    events.push(GestureEvent::Released { duration, long: false }).ok();
                }
            }
            GestureState::LongPressActive { since, .. } => {
                let duration = elapsed(since, now);
                events.push(GestureEvent::LongPressEnd { duration }).ok();
                events.push(GestureEvent::Released { duration, long: true }).ok();
            }
        }
    }
}
