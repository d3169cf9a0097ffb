//! Minute arithmetic over profile timestamps.
//!
//! The thermal model works in minutes; timestamps are naive (zone-free) so a
//! profile never has to reason about daylight saving jumps.

use chrono::NaiveDateTime;

use crate::{Real, TtmError, TtmResult};

const MILLIS_PER_MINUTE: Real = 60_000.0;

/// Minutes elapsed from `from` to `to`, negative if `to` is earlier.
pub fn elapsed_minutes(from: NaiveDateTime, to: NaiveDateTime) -> Real {
    to.signed_duration_since(from).num_milliseconds() as Real / MILLIS_PER_MINUTE
}

/// Minutes between consecutive timestamps; one entry per step, so `len - 1` values.
///
/// Equal neighbours yield a zero-length step. A timestamp earlier than its
/// predecessor is rejected.
pub fn step_minutes(timestamps: &[NaiveDateTime]) -> TtmResult<Vec<Real>> {
    timestamps
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let dt = elapsed_minutes(pair[0], pair[1]);
            if dt < 0.0 {
                Err(TtmError::Unsorted { index: i + 1 })
            } else {
                Ok(dt)
            }
        })
        .collect()
}
