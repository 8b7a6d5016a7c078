//! Stdout sink and debug observer.
//!
//! Both keep an [`EventLog`] so the screen can show recent output next to the
//! pipeline's debug trace.

use std::fmt::Write;

use cuskey_common::debug::LogLine;
use cuskey_common::{DebugEvent, DebugObserver, EventLog, HidCommand, HidSink, Millis};

/// Short human-readable form of a command, as printed and shown on screen.
pub fn describe(command: HidCommand) -> LogLine {
    let mut line = LogLine::new();
    let _ = match command {
        HidCommand::SendKey(key) => write!(line, "tap {}", key.name()),
        HidCommand::PressKey(key) => write!(line, "press {}", key.name()),
        HidCommand::ReleaseKey(key) => write!(line, "release {}", key.name()),
        HidCommand::SendConsumer(code) => write!(line, "consumer {}", code.name()),
        HidCommand::Wheel(delta) => write!(line, "wheel {delta:+}"),
    };
    line
}

/// [`HidSink`] that prints every command and remembers the latest ones.
#[derive(Debug, Default)]
pub struct PrintSink {
    now: Millis,
    sent: EventLog,
    total: u32,
}

impl PrintSink {
    pub const fn new() -> Self {
        Self {
            now: 0,
            sent: EventLog::new(),
            total: 0,
        }
    }

    /// Timestamp used for commands emitted during the next tick.
    #[inline]
    pub fn set_now(
        &mut self,
        now: Millis,
    ) {
        self.now = now;
    }

    pub const fn sent(&self) -> &EventLog { &self.sent }

    pub const fn total(&self) -> u32 { self.total }
}

impl HidSink for PrintSink {
    fn emit(
        &mut self,
        command: HidCommand,
    ) {
        let text = describe(command);
        println!("[{:>8} ms] HID {text}", self.now);
        self.sent.push(&text);
        self.total = self.total.wrapping_add(1);
    }
}

/// [`DebugObserver`] that prints events and records them for the screen.
#[derive(Debug, Default)]
pub struct ConsoleObserver {
    log: EventLog,
}

impl ConsoleObserver {
    pub const fn new() -> Self { Self { log: EventLog::new() } }

    pub const fn log(&self) -> &EventLog { &self.log }
}

impl DebugObserver for ConsoleObserver {
    fn on_debug(
        &mut self,
        now: Millis,
        event: &DebugEvent,
    ) {
        println!("[{now:>8} ms] {event}");
        self.log.record(now, event);
    }
}
