//! Action table and dispatcher.
//!
//! The table maps `(Mode, GestureKind)` to an [`Action`]. The dispatcher looks
//! up bindings for resolved gestures and owns everything that outlives a
//! single tick:
//!
//! - the long-press job (held key combination or timed repeat), started on
//!   `LongPressStart` and stopped on `LongPressEnd`;
//! - a burst job for multi-shot outputs with a gap between shots;
//! - the periodic auto-send timer, paused while a long-press job runs and
//!   resumed (not restarted) afterwards.
//!
//! [`Dispatcher::service`] runs once per tick and emits at most one output per
//! job.

use crate::action::{Action, HidCommand, HidSink, KeyCode, KeyCombo, Output};
use crate::error::ConfigError;
use crate::mode::Mode;
use crate::timing::{Millis, elapsed};

// =============================================================================
// Gesture Kinds
// =============================================================================

/// Binding slot in an action table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GestureKind {
    SingleClick,
    DoubleClick,
    TripleClick,
    /// Fires on `LongPressStart`; hold and repeat actions live until the press ends.
    LongPress,
    LongPressTick,
    /// Fires once when a long press is released.
    LongPressEnd,
    /// Default action of the periodic auto-send timer.
    AutoSend,
}

impl GestureKind {
    pub const COUNT: usize = 7;

    pub const ALL: [Self; Self::COUNT] = [
        Self::SingleClick,
        Self::DoubleClick,
        Self::TripleClick,
        Self::LongPress,
        Self::LongPressTick,
        Self::LongPressEnd,
        Self::AutoSend,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::SingleClick => 0,
            Self::DoubleClick => 1,
            Self::TripleClick => 2,
            Self::LongPress => 3,
            Self::LongPressTick => 4,
            Self::LongPressEnd => 5,
            Self::AutoSend => 6,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SingleClick => "click",
            Self::DoubleClick => "double click",
            Self::TripleClick => "triple click",
            Self::LongPress => "long press",
            Self::LongPressTick => "long press tick",
            Self::LongPressEnd => "long press end",
            Self::AutoSend => "auto send",
        }
    }
}

/// Fully resolved gesture handed to the dispatcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    /// A resolved click sequence with its final count.
    Click(u8),
    LongPressStart,
    LongPressTick,
    LongPressEnd,
}

// =============================================================================
// Action Table
// =============================================================================

/// Capability-indexed dispatch table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionTable {
    bindings: [[Option<Action>; GestureKind::COUNT]; Mode::COUNT],
}

impl ActionTable {
    /// Empty table: every gesture is ignored in every mode.
    pub const fn new() -> Self {
        Self {
            bindings: [const { [const { None }; GestureKind::COUNT] }; Mode::COUNT],
        }
    }

    /// Builder-style binding.
    #[must_use]
    pub fn with(
        mut self,
        mode: Mode,
        kind: GestureKind,
        action: Action,
    ) -> Self {
        self.bind(mode, kind, action);
        self
    }

    pub fn bind(
        &mut self,
        mode: Mode,
        kind: GestureKind,
        action: Action,
    ) {
        self.bindings[mode.index()][kind.index()] = Some(action);
    }

    /// Copy every binding of `from` onto `to`, replacing what was there.
    pub fn mirror(
        &mut self,
        from: Mode,
        to: Mode,
    ) {
        self.bindings[to.index()] = self.bindings[from.index()].clone();
    }

    #[inline]
    pub fn get(
        &self,
        mode: Mode,
        kind: GestureKind,
    ) -> Option<&Action> {
        self.bindings[mode.index()][kind.index()].as_ref()
    }

    /// Binding slot for a resolved click count.
    ///
    /// Counts above three use the triple-click binding. Any count of two or
    /// more falls back to the double-click binding when nothing more specific
    /// is bound.
    pub fn click_kind(
        &self,
        mode: Mode,
        count: u8,
    ) -> Option<GestureKind> {
        match count {
            0 => None,
            1 => Some(GestureKind::SingleClick),
            2 => Some(GestureKind::DoubleClick),
            _ if self.get(mode, GestureKind::TripleClick).is_some() => Some(GestureKind::TripleClick),
            _ => Some(GestureKind::DoubleClick),
        }
    }

    /// Whether any mode binds a hold action.
    pub fn has_hold(&self) -> bool {
        self.bindings
            .iter()
            .flatten()
            .any(|binding| matches!(binding, Some(Action::Hold(_))))
    }

    /// Every bound slot, mode-major, in [`GestureKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Mode, GestureKind, &Action)> {
        Mode::ALL.into_iter().flat_map(move |mode| {
            GestureKind::ALL
                .into_iter()
                .filter_map(move |kind| self.get(mode, kind).map(|action| (mode, kind, action)))
        })
    }

    /// Reject bindings that could never do anything useful.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (_, _, action) in self.iter() {
            match action {
                Action::Hold(keys) if keys.is_empty() => return Err(ConfigError::EmptyPttKeys),
                Action::Repeat { interval: 0, .. } => return Err(ConfigError::ZeroInterval),
                Action::Burst { count, gap: 0, .. } if *count > 1 => return Err(ConfigError::ZeroInterval),
                _ => {}
            }
        }
        Ok(())
    }
}

impl Default for ActionTable {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Jobs
// =============================================================================

/// Job bound to one long-press lifetime.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LongPressJob {
    /// Keys pressed in order, released in reverse on end.
    Held(KeyCombo),
    /// Output re-emitted every `interval`.
    Repeating { output: Output, interval: Millis, last: Millis },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct BurstJob {
    output: Output,
    remaining: u8,
    gap: Millis,
    last: Millis,
}

/// Periodic auto-send clock with pause-and-resume semantics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct AutoSendTimer {
    enabled: bool,
    interval: Millis,
    last_fire: Millis,
    paused_at: Option<Millis>,
}

impl AutoSendTimer {
    fn toggle(
        &mut self,
        now: Millis,
    ) -> bool {
        self.enabled = !self.enabled;
        if self.enabled {
            self.last_fire = now;
            if self.paused_at.is_some() {
                self.paused_at = Some(now);
            }
        }
        self.enabled
    }

    fn pause(
        &mut self,
        now: Millis,
    ) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    fn resume(
        &mut self,
        now: Millis,
    ) {
        if let Some(at) = self.paused_at.take() {
            // Shift the clock by the paused span so progress is kept
            self.last_fire = self.last_fire.saturating_add(elapsed(at, now));
        }
    }

    fn due(
        &self,
        now: Millis,
    ) -> bool {
        self.enabled && self.paused_at.is_none() && elapsed(self.last_fire, now) >= self.interval
    }
}

// =============================================================================
// Dispatcher
// =============================================================================

/// Executes table bindings and owns repeat jobs.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    table: ActionTable,
    job: Option<LongPressJob>,
    burst: Option<BurstJob>,
    auto_send: AutoSendTimer,
}

impl Dispatcher {
    pub fn new(
        table: ActionTable,
        send_interval: Millis,
        auto_send_enabled: bool,
    ) -> Self {
        Self {
            table,
            job: None,
            burst: None,
            auto_send: AutoSendTimer {
                enabled: auto_send_enabled,
                interval: send_interval,
                last_fire: 0,
                paused_at: None,
            },
        }
    }

    /// Anchor the auto-send clock at the first tick.
    pub fn start(
        &mut self,
        now: Millis,
    ) {
        self.auto_send.last_fire = now;
    }

    #[inline]
    pub const fn table(&self) -> &ActionTable { &self.table }

    #[inline]
    pub const fn auto_send_enabled(&self) -> bool { self.auto_send.enabled }

    #[inline]
    pub const fn active_job(&self) -> Option<&LongPressJob> { self.job.as_ref() }

    /// Keys currently held down by a long-press job, in press order.
    pub fn held_keys(&self) -> &[KeyCode] {
        match &self.job {
            Some(LongPressJob::Held(keys)) => keys.as_slice(),
            _ => &[],
        }
    }

    /// Execute the binding for one resolved gesture.
    ///
    /// Returns the binding slot that was executed, `None` if nothing is bound.
    pub fn dispatch<S: HidSink>(
        &mut self,
        mode: Mode,
        gesture: Gesture,
        now: Millis,
        sink: &mut S,
    ) -> Option<GestureKind> {
        match gesture {
            Gesture::Click(count) => {
                let kind = self.table.click_kind(mode, count)?;
                let action = self.table.get(mode, kind)?.clone();
                self.run_once(&action, now, sink);
                Some(kind)
            }
            Gesture::LongPressStart => {
                self.stop_job(now, sink);
                let action = self.table.get(mode, GestureKind::LongPress)?.clone();
                self.start_job(action, now, sink);
                Some(GestureKind::LongPress)
            }
            Gesture::LongPressTick => {
                let action = self.table.get(mode, GestureKind::LongPressTick)?.clone();
                self.run_once(&action, now, sink);
                Some(GestureKind::LongPressTick)
            }
            Gesture::LongPressEnd => {
                self.stop_job(now, sink);
                let action = self.table.get(mode, GestureKind::LongPressEnd)?.clone();
                self.run_once(&action, now, sink);
                Some(GestureKind::LongPressEnd)
            }
        }
    }

    /// Advance repeat, burst and auto-send timers. Call once per tick.
    ///
    /// Returns `true` when the auto-send timer fired and sent its binding.
    pub fn service<S: HidSink>(
        &mut self,
        mode: Mode,
        now: Millis,
        sink: &mut S,
    ) -> bool {
        if let Some(LongPressJob::Repeating { output, interval, last }) = self.job.as_mut()
            && elapsed(*last, now) >= *interval
        {
            sink.emit(output.command());
            *last = now;
        }

        if let Some(burst) = self.burst.as_mut()
            && elapsed(burst.last, now) >= burst.gap
        {
            sink.emit(burst.output.command());
            burst.last = now;
            burst.remaining = burst.remaining.saturating_sub(1);
            if burst.remaining == 0 {
                self.burst = None;
            }
        }

        if !self.auto_send.due(now) {
            return false;
        }
        self.auto_send.last_fire = now;
        match self.table.get(mode, GestureKind::AutoSend).cloned() {
            // A toggle bound here would switch the timer off from inside itself
            Some(Action::ToggleAutoSend) | None => false,
            Some(action) => {
                self.run_once(&action, now, sink);
                true
            }
        }
    }

    /// Release everything a running job holds. Used on shutdown or reconfiguration.
    pub fn cancel<S: HidSink>(
        &mut self,
        now: Millis,
        sink: &mut S,
    ) {
        self.stop_job(now, sink);
        self.burst = None;
    }

    fn start_job<S: HidSink>(
        &mut self,
        action: Action,
        now: Millis,
        sink: &mut S,
    ) {
        match action {
            Action::Hold(keys) => {
                for key in &keys {
                    sink.emit(HidCommand::PressKey(*key));
                }
                self.job = Some(LongPressJob::Held(keys));
                self.auto_send.pause(now);
            }
            Action::Repeat { output, interval } => {
                sink.emit(output.command());
                self.job = Some(LongPressJob::Repeating {
                    output,
                    interval,
                    last: now,
                });
                self.auto_send.pause(now);
            }
            other => self.run_once(&other, now, sink),
        }
    }

    fn stop_job<S: HidSink>(
        &mut self,
        now: Millis,
        sink: &mut S,
    ) {
        match self.job.take() {
            Some(LongPressJob::Held(keys)) => {
                for key in keys.iter().rev() {
                    sink.emit(HidCommand::ReleaseKey(*key));
                }
                self.auto_send.resume(now);
            }
            Some(LongPressJob::Repeating { .. }) => self.auto_send.resume(now),
            None => {}
        }
    }

    fn run_once<S: HidSink>(
        &mut self,
        action: &Action,
        now: Millis,
        sink: &mut S,
    ) {
        match action {
            Action::Emit(output) | Action::Repeat { output, .. } => sink.emit(output.command()),
            Action::Burst { output, count, gap } => {
                if *count == 0 {
                    return;
                }
                sink.emit(output.command());
                if *count > 1 {
                    self.burst = Some(BurstJob {
                        output: *output,
                        remaining: count - 1,
                        gap: *gap,
                        last: now,
                    });
                }
            }
            Action::Hold(keys) => {
                for key in keys {
                    sink.emit(HidCommand::PressKey(*key));
                }
                for key in keys.iter().rev() {
                    sink.emit(HidCommand::ReleaseKey(*key));
                }
            }
            Action::ToggleAutoSend => {
                self.auto_send.toggle(now);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::vec::Vec;

    use super::*;
    use crate::action::ConsumerCode;

    #[derive(Default)]
    struct Recorder(Vec<HidCommand>);

    impl HidSink for Recorder {
        fn emit(
            &mut self,
            command: HidCommand,
        ) {
            self.0.push(command);
        }
    }

    fn ptt() -> KeyCombo { KeyCombo::from_iter([KeyCode::CONTROL, KeyCode::SHIFT, KeyCode::F12]) }

    fn table() -> ActionTable {
        ActionTable::new()
            .with(Mode::A, GestureKind::SingleClick, Action::Emit(Output::Key(KeyCode::ENTER)))
            .with(Mode::A, GestureKind::DoubleClick, Action::Emit(Output::Key(KeyCode::ESCAPE)))
            .with(Mode::A, GestureKind::LongPress, Action::Hold(ptt()))
            .with(
                Mode::B,
                GestureKind::LongPress,
                Action::Repeat {
                    output: Output::Wheel(-1),
                    interval: 50,
                },
            )
            .with(Mode::B, GestureKind::TripleClick, Action::Emit(Output::Key(KeyCode::HOME)))
            .with(Mode::B, GestureKind::DoubleClick, Action::Emit(Output::Key(KeyCode::PAGE_UP)))
    }

    #[test]
    fn test_click_counts_resolve_to_kinds() {
        let table = table();
        assert_eq!(table.click_kind(Mode::A, 0), None);
        assert_eq!(table.click_kind(Mode::A, 1), Some(GestureKind::SingleClick));
        assert_eq!(table.click_kind(Mode::A, 2), Some(GestureKind::DoubleClick));
        // No triple binding in A: collapses to double
        assert_eq!(table.click_kind(Mode::A, 3), Some(GestureKind::DoubleClick));
        assert_eq!(table.click_kind(Mode::A, 7), Some(GestureKind::DoubleClick));
        assert_eq!(table.click_kind(Mode::B, 3), Some(GestureKind::TripleClick));
        assert_eq!(table.click_kind(Mode::B, 5), Some(GestureKind::TripleClick));
    }

    #[test]
    fn test_click_dispatch() {
        let mut dispatcher = Dispatcher::new(table(), 8000, false);
        let mut sink = Recorder::default();
        assert_eq!(
            dispatcher.dispatch(Mode::A, Gesture::Click(1), 0, &mut sink),
            Some(GestureKind::SingleClick)
        );
        assert_eq!(
            dispatcher.dispatch(Mode::A, Gesture::Click(4), 0, &mut sink),
            Some(GestureKind::DoubleClick)
        );
        assert_eq!(
            sink.0,
            [HidCommand::SendKey(KeyCode::ENTER), HidCommand::SendKey(KeyCode::ESCAPE)]
        );
    }

    #[test]
    fn test_unbound_gesture_is_ignored() {
        let mut dispatcher = Dispatcher::new(table(), 8000, false);
        let mut sink = Recorder::default();
        assert_eq!(dispatcher.dispatch(Mode::C, Gesture::Click(1), 0, &mut sink), None);
        assert_eq!(dispatcher.dispatch(Mode::B, Gesture::Click(1), 0, &mut sink), None);
        assert!(sink.0.is_empty());
    }

    #[test]
    fn test_hold_releases_in_reverse_order() {
        let mut dispatcher = Dispatcher::new(table(), 8000, false);
        let mut sink = Recorder::default();
        dispatcher.dispatch(Mode::A, Gesture::LongPressStart, 300, &mut sink);
        assert_eq!(dispatcher.held_keys(), ptt().as_slice());
        for t in (310..900).step_by(10) {
            dispatcher.service(Mode::A, t, &mut sink);
        }
        dispatcher.dispatch(Mode::A, Gesture::LongPressEnd, 900, &mut sink);

        assert_eq!(
            sink.0,
            [
                HidCommand::PressKey(KeyCode::CONTROL),
                HidCommand::PressKey(KeyCode::SHIFT),
                HidCommand::PressKey(KeyCode::F12),
                HidCommand::ReleaseKey(KeyCode::F12),
                HidCommand::ReleaseKey(KeyCode::SHIFT),
                HidCommand::ReleaseKey(KeyCode::CONTROL),
            ]
        );
        assert!(dispatcher.active_job().is_none());
        assert!(dispatcher.held_keys().is_empty());
    }

    #[test]
    fn test_repeat_starts_immediately_and_stops_on_end() {
        let mut dispatcher = Dispatcher::new(table(), 8000, false);
        let mut sink = Recorder::default();
        dispatcher.dispatch(Mode::B, Gesture::LongPressStart, 300, &mut sink);
        assert_eq!(sink.0, [HidCommand::Wheel(-1)]);

        for t in (310..=500).step_by(10) {
            dispatcher.service(Mode::B, t, &mut sink);
        }
        // 300 (start), 350, 400, 450, 500
        assert_eq!(sink.0.len(), 5);

        dispatcher.dispatch(Mode::B, Gesture::LongPressEnd, 505, &mut sink);
        for t in (510..1000).step_by(10) {
            dispatcher.service(Mode::B, t, &mut sink);
        }
        assert_eq!(sink.0.len(), 5);
    }

    #[test]
    fn test_burst_spaced_by_gap() {
        let table = ActionTable::new().with(
            Mode::A,
            GestureKind::LongPressEnd,
            Action::Burst {
                output: Output::Key(KeyCode::LEFT_ARROW),
                count: 2,
                gap: 50,
            },
        );
        let mut dispatcher = Dispatcher::new(table, 8000, false);
        let mut sink = Recorder::default();
        dispatcher.dispatch(Mode::A, Gesture::LongPressStart, 1000, &mut sink);
        dispatcher.dispatch(Mode::A, Gesture::LongPressEnd, 1200, &mut sink);
        assert_eq!(sink.0.len(), 1);
        dispatcher.service(Mode::A, 1240, &mut sink);
        assert_eq!(sink.0.len(), 1);
        dispatcher.service(Mode::A, 1250, &mut sink);
        dispatcher.service(Mode::A, 1400, &mut sink);
        assert_eq!(sink.0, [HidCommand::SendKey(KeyCode::LEFT_ARROW); 2]);
    }

    #[test]
    fn test_hold_on_click_presses_and_releases() {
        let table = ActionTable::new().with(Mode::A, GestureKind::SingleClick, Action::Hold(ptt()));
        let mut dispatcher = Dispatcher::new(table, 8000, false);
        let mut sink = Recorder::default();
        dispatcher.dispatch(Mode::A, Gesture::Click(1), 0, &mut sink);
        assert_eq!(sink.0.len(), 6);
        assert_eq!(sink.0[2], HidCommand::PressKey(KeyCode::F12));
        assert_eq!(sink.0[3], HidCommand::ReleaseKey(KeyCode::F12));
        assert!(dispatcher.active_job().is_none());
    }

    fn auto_table() -> ActionTable {
        ActionTable::new()
            .with(Mode::A, GestureKind::SingleClick, Action::ToggleAutoSend)
            .with(Mode::B, GestureKind::SingleClick, Action::ToggleAutoSend)
            .with(
                Mode::A,
                GestureKind::LongPress,
                Action::Repeat {
                    output: Output::Key(KeyCode::LEFT_ARROW),
                    interval: 100,
                },
            )
            .with(Mode::A, GestureKind::AutoSend, Action::Emit(Output::Key(KeyCode::LEFT_ARROW)))
            .with(Mode::B, GestureKind::AutoSend, Action::Emit(Output::Key(KeyCode::RIGHT_ARROW)))
    }

    #[test]
    fn test_auto_send_toggle_and_interval() {
        let mut dispatcher = Dispatcher::new(auto_table(), 1000, false);
        let mut sink = Recorder::default();
        dispatcher.start(0);
        assert!(!dispatcher.service(Mode::A, 5000, &mut sink));

        dispatcher.dispatch(Mode::A, Gesture::Click(1), 5000, &mut sink);
        assert!(dispatcher.auto_send_enabled());
        assert!(!dispatcher.service(Mode::A, 5999, &mut sink));
        assert!(dispatcher.service(Mode::A, 6000, &mut sink));
        // Mode is read at fire time
        assert!(dispatcher.service(Mode::B, 7000, &mut sink));
        assert_eq!(
            sink.0,
            [
                HidCommand::SendKey(KeyCode::LEFT_ARROW),
                HidCommand::SendKey(KeyCode::RIGHT_ARROW)
            ]
        );

        dispatcher.dispatch(Mode::B, Gesture::Click(1), 7100, &mut sink);
        assert!(!dispatcher.auto_send_enabled());
        assert!(!dispatcher.service(Mode::B, 20_000, &mut sink));
    }

    #[test]
    fn test_auto_send_without_binding_reports_nothing_sent() {
        let table = ActionTable::new()
            .with(Mode::A, GestureKind::SingleClick, Action::ToggleAutoSend)
            .with(Mode::A, GestureKind::AutoSend, Action::Emit(Output::Key(KeyCode::LEFT_ARROW)))
            .with(Mode::B, GestureKind::AutoSend, Action::ToggleAutoSend);
        let mut dispatcher = Dispatcher::new(table, 1000, false);
        let mut sink = Recorder::default();
        dispatcher.start(0);
        dispatcher.dispatch(Mode::A, Gesture::Click(1), 0, &mut sink);

        // Mode C has no binding, mode B only binds the toggle
        assert!(!dispatcher.service(Mode::C, 1000, &mut sink));
        assert!(!dispatcher.service(Mode::B, 2000, &mut sink));
        assert!(sink.0.is_empty());
        assert!(dispatcher.auto_send_enabled());

        // The timer kept its period while idle
        assert!(!dispatcher.service(Mode::A, 2999, &mut sink));
        assert!(dispatcher.service(Mode::A, 3000, &mut sink));
        assert_eq!(sink.0, [HidCommand::SendKey(KeyCode::LEFT_ARROW)]);
    }

    #[test]
    fn test_auto_send_paused_during_repeat_and_resumed() {
        let mut dispatcher = Dispatcher::new(auto_table(), 1000, true);
        let mut sink = Recorder::default();
        dispatcher.start(0);

        // 600 ms of the interval elapse, then a long press runs for 2 s
        dispatcher.dispatch(Mode::A, Gesture::LongPressStart, 600, &mut sink);
        let mut fired = 0;
        let mut t = 610;
        while t < 2600 {
            fired += u32::from(dispatcher.service(Mode::A, t, &mut sink));
            t += 10;
        }
        assert_eq!(fired, 0);
        dispatcher.dispatch(Mode::A, Gesture::LongPressEnd, 2600, &mut sink);

        // Remaining 400 ms of the interval, not a fresh 1000 ms
        assert!(!dispatcher.service(Mode::A, 2990, &mut sink));
        assert!(dispatcher.service(Mode::A, 3000, &mut sink));
    }

    #[test]
    fn test_table_helpers() {
        let mut table = table();
        assert!(table.has_hold());
        table.mirror(Mode::B, Mode::C);
        assert_eq!(
            table.get(Mode::C, GestureKind::TripleClick),
            Some(&Action::Emit(Output::Key(KeyCode::HOME)))
        );
        assert!(!ActionTable::new().has_hold());

        let consumer = ActionTable::new().with(
            Mode::A,
            GestureKind::SingleClick,
            Action::Emit(Output::Consumer(ConsumerCode::PLAY_PAUSE)),
        );
        assert!(consumer.get(Mode::A, GestureKind::DoubleClick).is_none());
    }

    #[test]
    fn test_iter_and_validate() {
        let table = table();
        let bound: Vec<_> = table.iter().map(|(mode, kind, _)| (mode, kind)).collect();
        assert_eq!(bound[0], (Mode::A, GestureKind::SingleClick));
        assert_eq!(bound.len(), 6);
        assert_eq!(table.validate(), Ok(()));

        let empty_hold = ActionTable::new().with(Mode::B, GestureKind::LongPress, Action::Hold(KeyCombo::new()));
        assert_eq!(empty_hold.validate(), Err(ConfigError::EmptyPttKeys));

        let stuck_repeat = ActionTable::new().with(
            Mode::A,
            GestureKind::LongPress,
            Action::Repeat {
                output: Output::Wheel(1),
                interval: 0,
            },
        );
        assert_eq!(stuck_repeat.validate(), Err(ConfigError::ZeroInterval));
    }

    #[test]
    fn test_cancel_releases_held_keys() {
        let mut dispatcher = Dispatcher::new(table(), 8000, false);
        let mut sink = Recorder::default();
        dispatcher.dispatch(Mode::A, Gesture::LongPressStart, 0, &mut sink);
        dispatcher.cancel(10, &mut sink);
        assert_eq!(sink.0.last(), Some(&HidCommand::ReleaseKey(KeyCode::CONTROL)));
        assert!(dispatcher.active_job().is_none());
    }
}
