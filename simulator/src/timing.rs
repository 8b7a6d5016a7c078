//! Timing constants for the simulator.
//!
//! These constants use `std::time::Duration` which is not available in `no_std`
//! environments, so they are defined here rather than in the common crate.

use std::time::Duration;

/// Minimum time between two window redraws. The device keeps ticking at its
/// own loop delay in between.
pub const REDRAW_INTERVAL: Duration = Duration::from_millis(20);
