//! Debug observations and the event log.
//!
//! The core never logs by itself. When `debug_enabled` is set, [`Device`]
//! reports what it sees to a [`DebugObserver`]; the firmware forwards these to
//! `defmt`, the simulator keeps them in an [`EventLog`] for the screen.
//!
//! Observers are output-only: nothing they do can feed back into timing or
//! dispatch.
//!
//! [`Device`]: crate::device::Device

use core::fmt::{self, Write};

use heapless::{Deque, String};

use crate::dispatch::{Gesture, GestureKind};
use crate::gesture::GestureState;
use crate::mode::{Mode, ModeLevels};
use crate::timing::Millis;

// =============================================================================
// Events
// =============================================================================

/// One debug observation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebugEvent {
    /// The mode switch moved.
    ModeChanged { from: Mode, to: Mode },
    /// Periodic report of the raw mode pin levels.
    Heartbeat { mode: Mode, levels: ModeLevels },
    /// The recognizer changed state.
    StateChanged { from: GestureState, to: GestureState },
    /// A short click joined or opened the pending window.
    ClickQueued { mode: Mode, count: u8 },
    /// A long press dropped the pending window unresolved.
    WindowDiscarded { mode: Mode, count: u8 },
    /// A gesture reached the dispatcher. `kind` is `None` when nothing is bound.
    Dispatched {
        mode: Mode,
        gesture: Gesture,
        kind: Option<GestureKind>,
    },
    AutoSendToggled { enabled: bool },
    /// The periodic timer fired; `count` is the running total since boot.
    AutoSendFired { mode: Mode, count: u32 },
}

impl fmt::Display for DebugEvent {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::ModeChanged { from, to } => write!(f, "mode {} -> {}", from.label(), to.label()),
            Self::Heartbeat { mode, levels } => {
                write!(f, "{} a={}", mode.label(), level_char(levels.a))?;
                if levels.b.is_some() {
                    write!(f, " b={}", level_char(levels.b))?;
                }
                Ok(())
            }
            Self::StateChanged { from, to } => write!(f, "{} -> {}", from.label(), to.label()),
            Self::ClickQueued { mode, count } => write!(f, "[{}] click #{count} queued", mode.label()),
            Self::WindowDiscarded { mode, count } => {
                write!(f, "[{}] dropped {count} click(s)", mode.label())
            }
            Self::Dispatched { mode, gesture, kind } => {
                write!(f, "[{}] ", mode.label())?;
                match gesture {
                    Gesture::Click(count) => write!(f, "{count} click(s)")?,
                    Gesture::LongPressStart => f.write_str("long press start")?,
                    Gesture::LongPressTick => f.write_str("long press tick")?,
                    Gesture::LongPressEnd => f.write_str("long press end")?,
                }
                match kind {
                    Some(kind) => write!(f, " -> {}", kind.label()),
                    None => f.write_str(" (unbound)"),
                }
            }
            Self::AutoSendToggled { enabled } => {
                f.write_str(if *enabled { "auto-send on" } else { "auto-send off" })
            }
            Self::AutoSendFired { mode, count } => write!(f, "[{}] auto-send #{count}", mode.label()),
        }
    }
}

fn level_char(level: Option<bool>) -> char {
    match level {
        Some(true) => '1',
        Some(false) => '0',
        None => '-',
    }
}

// =============================================================================
// Observer
// =============================================================================

/// Receiver of debug observations.
pub trait DebugObserver {
    fn on_debug(
        &mut self,
        now: Millis,
        event: &DebugEvent,
    );
}

impl<O: DebugObserver + ?Sized> DebugObserver for &mut O {
    fn on_debug(
        &mut self,
        now: Millis,
        event: &DebugEvent,
    ) {
        (**self).on_debug(now, event);
    }
}

/// Observer that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDebug;

impl DebugObserver for NoDebug {
    fn on_debug(
        &mut self,
        _now: Millis,
        _event: &DebugEvent,
    ) {
    }
}

// =============================================================================
// Event Log Ring Buffer
// =============================================================================

/// Lines kept by an [`EventLog`].
pub const LOG_CAPACITY: usize = 8;

/// Maximum characters per log line, longer lines are truncated.
pub const LOG_LINE_LENGTH: usize = 48;

pub type LogLine = String<LOG_LINE_LENGTH>;

/// Fixed-capacity log of recent debug lines, oldest dropped first.
#[derive(Clone, Debug)]
pub struct EventLog {
    lines: Deque<LogLine, LOG_CAPACITY>,
}

impl EventLog {
    pub const fn new() -> Self { Self { lines: Deque::new() } }

    /// Append a preformatted message.
    pub fn push(
        &mut self,
        msg: &str,
    ) {
        let mut line = LogLine::new();
        Truncate(&mut line).write_str(msg).ok();
        self.push_line(line);
    }

    /// Append `[seconds.millis] event`.
    pub fn record(
        &mut self,
        now: Millis,
        event: &DebugEvent,
    ) {
        let mut line = LogLine::new();
        write!(Truncate(&mut line), "[{}.{:03}] {event}", now / 1000, now % 1000).ok();
        self.push_line(line);
    }

    fn push_line(
        &mut self,
        line: LogLine,
    ) {
        if self.lines.is_full() {
            self.lines.pop_front();
        }
        self.lines.push_back(line).ok();
    }

    /// Iterate over log lines (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &str> { self.lines.iter().map(|line| line.as_str()) }

    #[inline]
    pub fn len(&self) -> usize { self.lines.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.lines.is_empty() }
}

impl Default for EventLog {
    fn default() -> Self { Self::new() }
}

impl DebugObserver for EventLog {
    fn on_debug(
        &mut self,
        now: Millis,
        event: &DebugEvent,
    ) {
        self.record(now, event);
    }
}

/// Writer that silently stops at the line capacity instead of failing.
struct Truncate<'a, const N: usize>(&'a mut String<N>);

impl<const N: usize> Write for Truncate<'_, N> {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::vec::Vec;

    use super::*;

    #[test]
    fn test_event_log_push() {
        let mut log = EventLog::new();
        assert!(log.is_empty());

        log.push("boot");
        log.push("usb ready");
        assert_eq!(log.len(), 2);
        assert_eq!(log.iter().collect::<Vec<_>>(), ["boot", "usb ready"]);
    }

    #[test]
    fn test_event_log_drops_oldest() {
        let mut log = EventLog::new();
        for i in 0..LOG_CAPACITY + 2 {
            log.push(&i.to_string());
        }
        assert_eq!(log.len(), LOG_CAPACITY);
        assert_eq!(log.iter().next(), Some("2"));
        assert_eq!(log.iter().last(), Some("9"));
    }

    #[test]
    fn test_long_lines_truncated() {
        let mut log = EventLog::new();
        let long = "x".repeat(LOG_LINE_LENGTH * 2);
        log.push(&long);
        assert_eq!(log.iter().next().map(str::len), Some(LOG_LINE_LENGTH));
    }

    #[test]
    fn test_record_formats_timestamp() {
        let mut log = EventLog::new();
        log.record(12_345, &DebugEvent::ModeChanged {
            from: Mode::A,
            to: Mode::B,
        });
        assert_eq!(log.iter().next(), Some("[12.345] mode Mode A -> Mode B"));
    }

    #[test]
    fn test_event_descriptions() {
        let dispatched = DebugEvent::Dispatched {
            mode: Mode::B,
            gesture: Gesture::Click(3),
            kind: Some(GestureKind::TripleClick),
        };
        assert_eq!(dispatched.to_string(), "[Mode B] 3 click(s) -> triple click");

        let unbound = DebugEvent::Dispatched {
            mode: Mode::C,
            gesture: Gesture::LongPressStart,
            kind: None,
        };
        assert_eq!(unbound.to_string(), "[Mode C] long press start (unbound)");

        let heartbeat = DebugEvent::Heartbeat {
            mode: Mode::A,
            levels: ModeLevels {
                a: Some(false),
                b: None,
            },
        };
        assert_eq!(heartbeat.to_string(), "Mode A a=0");
    }

    #[test]
    fn test_observer_through_reference() {
        fn feed<O: DebugObserver>(mut observer: O) { observer.on_debug(0, &DebugEvent::AutoSendToggled { enabled: true }); }

        let mut log = EventLog::new();
        feed(&mut log);
        feed(NoDebug);
        assert_eq!(log.iter().next(), Some("[0.000] auto-send on"));
    }
}
