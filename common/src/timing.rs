//! Time representation shared by every stage of the pipeline.
//!
//! The core never reads a clock. The host reads its monotonic clock once per
//! tick and passes the value in, so all comparisons inside a tick agree.

/// Milliseconds from an arbitrary monotonic origin.
pub type Millis = u64;

/// Elapsed time from `since` to `now`, clamped at zero if the clock is behind.
#[inline]
pub const fn elapsed(
    since: Millis,
    now: Millis,
) -> Millis {
    now.saturating_sub(since)
}

/// Convert fractional seconds (as written in board settings) to milliseconds.
#[inline]
pub const fn secs_to_millis(
    whole: u64,
    millis: u64,
) -> Millis {
    whole * 1000 + millis
}
