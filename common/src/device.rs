//! The owned device value and its tick.
//!
//! [`Device`] aggregates the whole pipeline for one button:
//!
//! ```text
//!  pins ──> DebouncedInput ──> GestureRecognizer ──┬──> ClickAggregator ──┐
//!       └─> ModeReader ───────────────────────────┐│                      │
//!                                                 vv                      v
//!                                               Dispatcher <──────────────┘
//!                                                   │
//!                                                   └──> HidSink
//! ```
//!
//! The host calls [`Device::tick`] at a fixed cadence with a fresh timestamp
//! and sleeps for the returned [`TickReport::sleep_ms`].

use crate::action::{HidSink, KeyCode};
use crate::clicks::{ClickAggregator, ClickResolution, ClickWindow};
use crate::config::Settings;
use crate::debounce::{DebouncedInput, PRESSED};
use crate::debug::{DebugEvent, DebugObserver};
use crate::dispatch::{ActionTable, Dispatcher, Gesture};
use crate::error::ConfigError;
use crate::gesture::{GestureEvent, GestureRecognizer, GestureState};
use crate::mode::{Mode, ModeLevels, ModeReader};
use crate::timing::Millis;

/// Ticks between two debug heartbeats (about one second at the default loop delay).
pub const DEBUG_HEARTBEAT_TICKS: u32 = 100;

/// Raw inputs sampled once per tick.
pub trait InputPins {
    /// Raw button level (`true` = high = released with pull-up wiring).
    fn button_level(&mut self) -> bool;

    /// Raw mode switch levels; unwired pins report `None`.
    fn mode_levels(&mut self) -> ModeLevels;
}

/// Outcome of one tick, for the host loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Mode read during this tick.
    pub mode: Mode,
    /// How long the host should sleep before the next tick.
    pub sleep_ms: Millis,
    /// A press ended during this tick; `sleep_ms` includes the release guard.
    pub released: bool,
}

/// One button, one mode switch, one action table.
#[derive(Clone, Debug)]
pub struct Device {
    settings: Settings,
    input: DebouncedInput,
    mode_reader: ModeReader,
    recognizer: GestureRecognizer,
    clicks: ClickAggregator,
    dispatcher: Dispatcher,
    /// Mode latched when the press in flight began.
    press_mode: Mode,
    mode: Mode,
    started: bool,
    // Debug-only bookkeeping, never read by the pipeline
    last_mode: Option<Mode>,
    heartbeat: u32,
    auto_send_count: u32,
}

impl Device {
    /// Validate `settings` and `table` and build an idle device.
    pub fn new(
        settings: Settings,
        table: ActionTable,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        table.validate()?;

        Ok(Self {
            input: DebouncedInput::new(settings.debounce_time),
            mode_reader: ModeReader::new(settings.dual_mode),
            recognizer: GestureRecognizer::new(
                settings.long_press_threshold,
                settings.min_press_time,
                settings.long_press_tick,
            ),
            clicks: ClickAggregator::new(settings.double_click_time),
            dispatcher: Dispatcher::new(table, settings.send_interval, settings.auto_send_enabled),
            press_mode: Mode::default(),
            mode: Mode::default(),
            started: false,
            last_mode: None,
            heartbeat: 0,
            auto_send_count: 0,
            settings,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub const fn settings(&self) -> &Settings { &self.settings }

    #[inline]
    pub const fn table(&self) -> &ActionTable { self.dispatcher.table() }

    /// Mode read by the most recent tick.
    #[inline]
    pub const fn mode(&self) -> Mode { self.mode }

    #[inline]
    pub const fn gesture_state(&self) -> GestureState { self.recognizer.state() }

    #[inline]
    pub const fn pending_clicks(&self) -> Option<&ClickWindow> { self.clicks.pending() }

    #[inline]
    pub const fn auto_send_enabled(&self) -> bool { self.dispatcher.auto_send_enabled() }

    /// Keys currently held by a push-to-talk binding.
    pub fn held_keys(&self) -> &[KeyCode] { self.dispatcher.held_keys() }

    // =========================================================================
    // Tick
    // =========================================================================

    /// Run one poll cycle at time `now`.
    pub fn tick<P, S, O>(
        &mut self,
        now: Millis,
        pins: &mut P,
        sink: &mut S,
        debug: &mut O,
    ) -> TickReport
    where
        P: InputPins,
        S: HidSink,
        O: DebugObserver,
    {
        if !self.started {
            self.dispatcher.start(now);
            self.started = true;
        }

        let stable = self.input.sample(pins.button_level(), now);
        let levels = pins.mode_levels();
        self.mode = self.mode_reader.read(levels);
        if self.settings.debug_enabled {
            self.observe_mode(now, levels, debug);
        }

        let before = self.recognizer.state();
        let events = self.recognizer.update(stable == PRESSED, now);
        let after = self.recognizer.state();
        if matches!(before, GestureState::Idle) && !matches!(after, GestureState::Idle) {
            self.press_mode = self.mode;
        }
        if !before.same_kind(&after) {
            self.observe(now, &DebugEvent::StateChanged { from: before, to: after }, debug);
        }

        // Timeouts first, so a click released this tick cannot join an expired window
        if let Some(resolution) = self.clicks.poll(now) {
            self.resolve(resolution, now, &mut *sink, &mut *debug);
        }

        let mut released = false;
        for event in events {
            match event {
                GestureEvent::Pressed => {}
                GestureEvent::LongPressStart => {
                    if let Some(window) = self.clicks.discard() {
                        self.observe(
                            now,
                            &DebugEvent::WindowDiscarded {
                                mode: window.mode,
                                count: window.count,
                            },
                            debug,
                        );
                    }
                    self.dispatch(self.press_mode, Gesture::LongPressStart, now, &mut *sink, &mut *debug);
                }
                GestureEvent::LongPressTick => {
                    self.dispatch(self.press_mode, Gesture::LongPressTick, now, &mut *sink, &mut *debug);
                }
                GestureEvent::LongPressEnd { .. } => {
                    self.dispatch(self.press_mode, Gesture::LongPressEnd, now, &mut *sink, &mut *debug);
                }
                GestureEvent::Released { long, .. } => {
                    released = true;
                    if !long {
                        let closed = self.clicks.click(self.press_mode, now);
                        if let Some(window) = self.clicks.pending() {
                            self.observe(
                                now,
                                &DebugEvent::ClickQueued {
                                    mode: window.mode,
                                    count: window.count,
                                },
                                debug,
                            );
                        }
                        if let Some(resolution) = closed {
                            self.resolve(resolution, now, &mut *sink, &mut *debug);
                        }
                    }
                }
            }
        }

        if self.dispatcher.service(self.mode, now, sink) {
            self.auto_send_count = self.auto_send_count.wrapping_add(1);
            self.observe(
                now,
                &DebugEvent::AutoSendFired {
                    mode: self.mode,
                    count: self.auto_send_count,
                },
                debug,
            );
        }

        let sleep_ms = if released {
            self.settings.loop_delay + self.settings.release_guard
        } else {
            self.settings.loop_delay
        };

        TickReport {
            mode: self.mode,
            sleep_ms,
            released,
        }
    }

    /// Release anything a running long-press job holds down.
    pub fn release_all<S: HidSink>(
        &mut self,
        now: Millis,
        sink: &mut S,
    ) {
        self.dispatcher.cancel(now, sink);
    }

    fn resolve<S, O>(
        &mut self,
        resolution: ClickResolution,
        now: Millis,
        sink: &mut S,
        debug: &mut O,
    ) where
        S: HidSink,
        O: DebugObserver,
    {
        self.dispatch(resolution.mode, Gesture::Click(resolution.count), now, sink, debug);
    }

    fn dispatch<S, O>(
        &mut self,
        mode: Mode,
        gesture: Gesture,
        now: Millis,
        sink: &mut S,
        debug: &mut O,
    ) where
        S: HidSink,
        O: DebugObserver,
    {
        let auto_send_before = self.dispatcher.auto_send_enabled();
        let kind = self.dispatcher.dispatch(mode, gesture, now, sink);
        self.observe(now, &DebugEvent::Dispatched { mode, gesture, kind }, debug);

        let enabled = self.dispatcher.auto_send_enabled();
        if enabled != auto_send_before {
            self.observe(now, &DebugEvent::AutoSendToggled { enabled }, debug);
        }
    }

    fn observe_mode<O: DebugObserver>(
        &mut self,
        now: Millis,
        levels: ModeLevels,
        debug: &mut O,
    ) {
        if let Some(previous) = self.last_mode
            && previous != self.mode
        {
            debug.on_debug(
                now,
                &DebugEvent::ModeChanged {
                    from: previous,
                    to: self.mode,
                },
            );
        }
        self.last_mode = Some(self.mode);

        self.heartbeat += 1;
        if self.heartbeat >= DEBUG_HEARTBEAT_TICKS {
            self.heartbeat = 0;
            debug.on_debug(now, &DebugEvent::Heartbeat { mode: self.mode, levels });
        }
    }

    #[inline]
    fn observe<O: DebugObserver>(
        &self,
        now: Millis,
        event: &DebugEvent,
        debug: &mut O,
    ) {
        if self.settings.debug_enabled {
            debug.on_debug(now, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::vec::Vec;

    use super::*;
    use crate::action::{Action, HidCommand, Output};
    use crate::debounce::{PRESSED, RELEASED};
    use crate::debug::{EventLog, NoDebug};
    use crate::dispatch::GestureKind;
    use crate::presets::Variant;

    /// Scripted pins: the button is down during each `[start, end)` span.
    #[derive(Default)]
    struct ButtonScript {
        now: Millis,
        presses: Vec<(Millis, Millis)>,
        /// `(from, mode_a level)` switch positions, last matching entry wins.
        mode_a: Vec<(Millis, bool)>,
        mode_b: Option<bool>,
    }

    impl ButtonScript {
        fn press(
            mut self,
            start: Millis,
            end: Millis,
        ) -> Self {
            self.presses.push((start, end));
            self
        }

        fn mode_b_from(
            mut self,
            from: Millis,
        ) -> Self {
            self.mode_a.push((from, true));
            self
        }
    }

    impl InputPins for ButtonScript {
        fn button_level(&mut self) -> bool {
            let down = self
                .presses
                .iter()
                .any(|&(start, end)| start <= self.now && self.now < end);
            if down { PRESSED } else { RELEASED }
        }

        fn mode_levels(&mut self) -> ModeLevels {
            let a = self
                .mode_a
                .iter()
                .rev()
                .find(|&&(from, _)| from <= self.now)
                .is_some_and(|&(_, level)| level);
            ModeLevels {
                a: Some(a),
                b: self.mode_b,
            }
        }
    }

    /// Records every command with the tick time it was emitted at.
    #[derive(Default)]
    struct Recorder {
        now: Millis,
        commands: Vec<(Millis, HidCommand)>,
    }

    impl HidSink for Recorder {
        fn emit(
            &mut self,
            command: HidCommand,
        ) {
            self.commands.push((self.now, command));
        }
    }

    impl Recorder {
        fn only(&self) -> Vec<HidCommand> { self.commands.iter().map(|&(_, c)| c).collect() }
    }

    fn run<O: DebugObserver>(
        device: &mut Device,
        script: &mut ButtonScript,
        until: Millis,
        step: Millis,
        debug: &mut O,
    ) -> Recorder {
        let mut recorder = Recorder::default();
        let mut t = 0;
        while t <= until {
            script.now = t;
            recorder.now = t;
            device.tick(t, script, &mut recorder, debug);
            t += step;
        }
        recorder
    }

    /// debounce 50, long 300, double 300 with one binding per slot.
    fn scenario_device() -> Device {
        scenario_device_with(Settings {
            debounce_time: 50,
            long_press_threshold: 300,
            double_click_time: 300,
            ..Settings::default()
        })
    }

    fn scenario_device_with(settings: Settings) -> Device {
        let table = ActionTable::new()
            .with(Mode::A, GestureKind::SingleClick, Action::Emit(Output::Key(KeyCode::ENTER)))
            .with(Mode::A, GestureKind::DoubleClick, Action::Emit(Output::Key(KeyCode::ESCAPE)))
            .with(Mode::A, GestureKind::LongPress, Action::Emit(Output::Key(KeyCode::F12)))
            .with(Mode::A, GestureKind::LongPressEnd, Action::Emit(Output::Key(KeyCode::END)))
            .with(Mode::B, GestureKind::SingleClick, Action::Emit(Output::Key(KeyCode::PAGE_DOWN)));
        Device::new(settings, table).unwrap()
    }

    fn key(code: KeyCode) -> HidCommand { HidCommand::SendKey(code) }

    #[test]
    fn test_single_click_fires_after_window() {
        let mut device = scenario_device();
        let mut script = ButtonScript::default().press(1000, 1100);
        let rec = run(&mut device, &mut script, 3000, 10, &mut NoDebug);

        assert_eq!(rec.only(), [key(KeyCode::ENTER)]);
        // Stable release at 1150, window closes strictly after 1450
        let (at, _) = rec.commands[0];
        assert!(at > 1450 && at <= 1470, "fired at {at}");
    }

    #[test]
    fn test_double_click_suppresses_single() {
        let mut device = scenario_device();
        let mut script = ButtonScript::default().press(1000, 1080).press(1200, 1280);
        let rec = run(&mut device, &mut script, 3000, 10, &mut NoDebug);
        assert_eq!(rec.only(), [key(KeyCode::ESCAPE)]);
    }

    #[test]
    fn test_long_hold_emits_start_then_end_without_click() {
        let mut device = scenario_device();
        let mut script = ButtonScript::default().press(1000, 1400);
        let rec = run(&mut device, &mut script, 3000, 10, &mut NoDebug);
        assert_eq!(rec.only(), [key(KeyCode::F12), key(KeyCode::END)]);
    }

    #[test]
    fn test_bounce_never_reaches_dispatch() {
        let mut device = scenario_device();
        let mut script = ButtonScript::default();
        // 20 ms contacts, 20 ms apart
        for start in (1000..1400).step_by(40) {
            script = script.press(start, start + 20);
        }
        let rec = run(&mut device, &mut script, 3000, 10, &mut NoDebug);
        assert!(rec.commands.is_empty());
    }

    #[test]
    fn test_presses_below_min_press_time_are_noise() {
        let settings = Settings {
            debounce_time: 10,
            min_press_time: 50,
            long_press_threshold: 300,
            ..Settings::default()
        };
        let table = ActionTable::new().with(Mode::A, GestureKind::SingleClick, Action::Emit(Output::Key(KeyCode::A)));
        let mut device = Device::new(settings, table).unwrap();
        let mut script = ButtonScript::default().press(1000, 1040);
        let rec = run(&mut device, &mut script, 2000, 10, &mut NoDebug);
        assert!(rec.commands.is_empty());
        assert!(device.pending_clicks().is_none());
    }

    #[test]
    fn test_long_press_discards_pending_window() {
        // Long press must be reachable before the window times out
        let mut device = scenario_device_with(Settings {
            debounce_time: 50,
            long_press_threshold: 200,
            double_click_time: 400,
            debug_enabled: true,
            ..Settings::default()
        });
        let mut log = EventLog::new();
        // Window opens at 1130 and would close after 1530; long press starts at 1450
        let mut script = ButtonScript::default().press(1000, 1080).press(1200, 1700);
        let rec = run(&mut device, &mut script, 3000, 10, &mut log);

        assert_eq!(rec.only(), [key(KeyCode::F12), key(KeyCode::END)]);
        assert!(log.iter().any(|line| line.ends_with("[Mode A] dropped 1 click(s)")));
    }

    #[test]
    fn test_window_times_out_while_next_press_held() {
        let mut device = scenario_device();
        let mut script = ButtonScript::default().press(1000, 1100).press(1300, 2000);
        let rec = run(&mut device, &mut script, 3000, 10, &mut NoDebug);

        assert_eq!(rec.only(), [key(KeyCode::ENTER), key(KeyCode::F12), key(KeyCode::END)]);
        // Resolved while the second press was still down
        assert_eq!(rec.commands[0].0, 1460);
    }

    #[test]
    fn test_click_released_after_window_is_new_single() {
        let mut device = scenario_device();
        // Second release lands 520 ms after the first
        let mut script = ButtonScript::default().press(1000, 1100).press(1400, 1620);
        let rec = run(&mut device, &mut script, 3000, 10, &mut NoDebug);

        assert_eq!(rec.only(), [key(KeyCode::ENTER), key(KeyCode::ENTER)]);
        assert_eq!(rec.commands[0].0, 1460);
        assert_eq!(rec.commands[1].0, 1980);
    }

    #[test]
    fn test_coarse_ticks_keep_one_start_and_end() {
        for step in [10, 40, 150, 350] {
            let mut device = scenario_device();
            let mut script = ButtonScript::default().press(1000, 2000);
            let rec = run(&mut device, &mut script, 4000, step, &mut NoDebug);
            assert_eq!(rec.only(), [key(KeyCode::F12), key(KeyCode::END)], "step {step}");
        }
    }

    #[test]
    fn test_mode_switch_while_idle_changes_table() {
        let mut device = scenario_device();
        let mut script = ButtonScript::default().press(1000, 1100).mode_b_from(1800).press(2000, 2100);
        let rec = run(&mut device, &mut script, 3000, 10, &mut NoDebug);
        assert_eq!(rec.only(), [key(KeyCode::ENTER), key(KeyCode::PAGE_DOWN)]);
        assert_eq!(device.mode(), Mode::B);
    }

    #[test]
    fn test_mode_latched_at_press_start() {
        let mut device = scenario_device();
        // Switch flips half-way through the press
        let mut script = ButtonScript::default().press(1000, 1100).mode_b_from(1080);
        let rec = run(&mut device, &mut script, 2000, 10, &mut NoDebug);
        assert_eq!(rec.only(), [key(KeyCode::ENTER)]);
    }

    #[test]
    fn test_mode_change_closes_click_window() {
        let mut device = scenario_device();
        let mut script = ButtonScript::default().press(1000, 1080).mode_b_from(1150).press(1200, 1280);
        let rec = run(&mut device, &mut script, 3000, 10, &mut NoDebug);
        assert_eq!(rec.only(), [key(KeyCode::ENTER), key(KeyCode::PAGE_DOWN)]);
    }

    #[test]
    fn test_release_requests_guard_sleep() {
        let mut device = scenario_device();
        let mut script = ButtonScript::default().press(0, 100);
        let mut recorder = Recorder::default();
        let mut guarded = 0;
        for t in (0..500).step_by(10) {
            script.now = t;
            let report = device.tick(t, &mut script, &mut recorder, &mut NoDebug);
            if report.released {
                guarded += 1;
                assert_eq!(report.sleep_ms, 10 + 50);
            } else {
                assert_eq!(report.sleep_ms, 10);
            }
        }
        assert_eq!(guarded, 1);
    }

    #[test]
    fn test_ptt_hold_and_reverse_release() {
        let settings = Variant::PttKey.settings();
        let table = Variant::PttKey.table(&settings).unwrap();
        let mut device = Device::new(settings, table).unwrap();
        let mut script = ButtonScript::default().press(1000, 2000);

        let mut recorder = Recorder::default();
        let mut t = 0;
        while t <= 3000 {
            script.now = t;
            device.tick(t, &mut script, &mut recorder, &mut NoDebug);
            if t == 1500 {
                assert_eq!(device.held_keys(), &[KeyCode::CONTROL, KeyCode::TAB, KeyCode::ONE]);
            }
            t += 10;
        }

        assert_eq!(
            recorder.only(),
            [
                HidCommand::PressKey(KeyCode::CONTROL),
                HidCommand::PressKey(KeyCode::TAB),
                HidCommand::PressKey(KeyCode::ONE),
                HidCommand::ReleaseKey(KeyCode::ONE),
                HidCommand::ReleaseKey(KeyCode::TAB),
                HidCommand::ReleaseKey(KeyCode::CONTROL),
            ]
        );
        assert!(device.held_keys().is_empty());
    }

    #[test]
    fn test_ptt_triple_click_in_mode_b() {
        let settings = Variant::PttKey.settings();
        let table = Variant::PttKey.table(&settings).unwrap();
        let mut device = Device::new(settings, table).unwrap();
        let mut script = ButtonScript::default()
            .mode_b_from(0)
            .press(1000, 1100)
            .press(1250, 1350)
            .press(1500, 1600);
        let rec = run(&mut device, &mut script, 3000, 10, &mut NoDebug);
        assert_eq!(rec.only(), [key(KeyCode::HOME)]);
    }

    #[test]
    fn test_media_click_is_immediate() {
        let settings = Variant::MediaController.settings();
        let table = Variant::MediaController.table(&settings).unwrap();
        let mut device = Device::new(settings, table).unwrap();
        let mut script = ButtonScript::default().press(1000, 1100);
        let rec = run(&mut device, &mut script, 2000, 10, &mut NoDebug);

        assert_eq!(rec.commands.len(), 1);
        let (at, command) = rec.commands[0];
        assert_eq!(
            command,
            HidCommand::SendConsumer(crate::action::ConsumerCode::PLAY_PAUSE)
        );
        // Stable release at 1150, resolved on the next tick
        assert_eq!(at, 1160);
    }

    #[test]
    fn test_media_rewind_on_long_release() {
        let settings = Variant::MediaController.settings();
        let table = Variant::MediaController.table(&settings).unwrap();
        let mut device = Device::new(settings, table).unwrap();
        let mut script = ButtonScript::default().press(1000, 2500);
        let rec = run(&mut device, &mut script, 4000, 10, &mut NoDebug);

        assert_eq!(rec.only(), [key(KeyCode::LEFT_ARROW), key(KeyCode::LEFT_ARROW)]);
        let gap = rec.commands[1].0 - rec.commands[0].0;
        assert_eq!(gap, 50);
        // Nothing before the button came up
        assert!(rec.commands[0].0 >= 2550);
    }

    #[test]
    fn test_auto_send_toggle_and_pause() {
        let settings = Variant::AutoKeySend.settings();
        let table = Variant::AutoKeySend.table(&settings).unwrap();
        let mut device = Device::new(settings, table).unwrap();
        // Click enables at 1160; the long press runs from 5550 to 7050 and pauses the clock
        let mut script = ButtonScript::default().press(1000, 1100).press(5000, 7000);
        let rec = run(&mut device, &mut script, 12_000, 10, &mut NoDebug);

        assert!(device.auto_send_enabled());
        let auto: Vec<_> = rec
            .commands
            .iter()
            .filter(|&&(at, _)| !(5000..7100).contains(&at))
            .collect();
        // Repeats only happen during the hold
        assert!(auto.iter().all(|&&(_, c)| c == key(KeyCode::LEFT_ARROW)));
        // 8 s after enabling plus the 1.5 s pause
        assert_eq!(auto.len(), 1);
        let (fired_at, _) = *auto[0];
        assert_eq!(fired_at, 1160 + 8000 + 1500);

        let manual = rec.commands.len() - auto.len();
        // Immediate repeat at 5550, then every 100 ms until the release at 7050
        assert_eq!(manual, 15);
    }

    #[test]
    fn test_debug_observer_silent_when_disabled() {
        let mut device = scenario_device();
        let mut log = EventLog::new();
        let mut script = ButtonScript::default().press(1000, 1100).mode_b_from(1500);
        run(&mut device, &mut script, 3000, 10, &mut log);
        assert!(log.is_empty());
    }

    #[test]
    fn test_debug_reports_mode_changes_and_dispatch() {
        let mut device = scenario_device();
        device.settings.debug_enabled = true;
        let mut log = EventLog::new();
        let mut script = ButtonScript::default().mode_b_from(500).press(1000, 1100);
        run(&mut device, &mut script, 1990, 10, &mut log);

        let lines: Vec<_> = log.iter().collect();
        assert!(lines.iter().any(|l| l.ends_with("mode Mode A -> Mode B")));
        assert!(lines.iter().any(|l| l.ends_with("[Mode B] 1 click(s) -> click")));
        assert!(lines.iter().any(|l| l.contains("Idle -> Pressed")));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let settings = Settings {
            long_press_threshold: 40,
            ..Settings::default()
        };
        assert_eq!(
            Device::new(settings, ActionTable::new()).err(),
            Some(ConfigError::DebounceNotBelowLongPress)
        );

        let table = ActionTable::new().with(Mode::A, GestureKind::LongPress, Action::Hold(Default::default()));
        assert_eq!(
            Device::new(Settings::default(), table).err(),
            Some(ConfigError::EmptyPttKeys)
        );
    }

    #[test]
    fn test_release_all_frees_held_keys() {
        let settings = Variant::PttKey.settings();
        let table = Variant::PttKey.table(&settings).unwrap();
        let mut device = Device::new(settings, table).unwrap();
        let mut script = ButtonScript::default().press(0, 10_000);
        let mut rec = run(&mut device, &mut script, 1000, 10, &mut NoDebug);
        assert_eq!(device.held_keys().len(), 3);

        device.release_all(1000, &mut rec);
        assert!(device.held_keys().is_empty());
        assert_eq!(rec.commands.last().map(|&(_, c)| c), Some(HidCommand::ReleaseKey(KeyCode::CONTROL)));
    }
}
