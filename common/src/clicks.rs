//! Multi-click aggregation.
//!
//! A click's meaning is unknown when it happens: it may be the first of a
//! double click. Short clicks are therefore parked in a single-slot window and
//! only resolved to a click count once no further press can join them.
//!
//! # Window rules
//!
//! - A short click released within `double_click_time` of the window's last
//!   click, in the same mode, joins the window.
//! - A click that cannot join closes the current window (resolving it) and
//!   opens a new one.
//! - The timeout is checked on every tick, including while the button is down.
//! - A long press discards the window without resolving it.

use crate::mode::Mode;
use crate::timing::{Millis, elapsed};

/// Pending click sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClickWindow {
    /// Mode recorded when the window opened.
    pub mode: Mode,
    pub count: u8,
    pub first_click: Millis,
    pub last_click: Millis,
}

impl ClickWindow {
    const fn open(
        mode: Mode,
        now: Millis,
    ) -> Self {
        Self {
            mode,
            count: 1,
            first_click: now,
            last_click: now,
        }
    }

    #[inline]
    const fn resolve(self) -> ClickResolution {
        ClickResolution {
            mode: self.mode,
            count: self.count,
        }
    }
}

/// Final click count of a closed window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClickResolution {
    pub mode: Mode,
    pub count: u8,
}

/// Timer-backed single-slot click buffer for one button.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClickAggregator {
    window: Option<ClickWindow>,
    double_click_time: Millis,
}

impl ClickAggregator {
    pub const fn new(double_click_time: Millis) -> Self {
        Self {
            window: None,
            double_click_time,
        }
    }

    /// The pending window, if any.
    #[inline]
    pub const fn pending(&self) -> Option<&ClickWindow> { self.window.as_ref() }

    /// Record a short click released at `now`.
    ///
    /// Returns the resolution of a previous window that this click closed out.
    pub fn click(
        &mut self,
        mode: Mode,
        now: Millis,
    ) -> Option<ClickResolution> {
        if let Some(window) = self.window.as_mut()
            && window.mode == mode
            && elapsed(window.last_click, now) <= self.double_click_time
        {
            window.count = window.count.saturating_add(1);
            window.last_click = now;
            return None;
        }

        let closed = self.window.take().map(ClickWindow::resolve);
        self.window = Some(ClickWindow::open(mode, now));
        closed
    }

    /// Resolve the window if it has timed out.
    pub fn poll(
        &mut self,
        now: Millis,
    ) -> Option<ClickResolution> {
        match self.window {
            Some(window) if elapsed(window.last_click, now) > self.double_click_time => {
                self.window = None;
                Some(window.resolve())
            }
            _ => None,
        }
    }

    /// Drop the pending window unresolved (a long press preempted it).
    pub fn discard(&mut self) -> Option<ClickWindow> { self.window.take() }
}
