//! Wall-clock time to needle rotation.
//!
//! The needle rests on the full stop until 08:00 and on the empty stop from
//! 17:00 on; in between it drains hour by hour across the dial.

use crate::foundation::core::TimeSample;

/// Degrees of needle travel per elapsed hour.
pub const DEGREES_PER_HOUR: f64 = 26.0;
/// Degrees of needle travel per elapsed minute within an hour.
pub const DEGREES_PER_MINUTE: f64 = 0.45;
/// Needle angle before the day has started.
pub const FULL_STOP_DEG: f64 = 135.0;
/// Needle angle once the day is over.
pub const EMPTY_STOP_DEG: f64 = -135.0;

/// Map a time sample to the needle rotation in degrees, in `[-135, 135]`.
///
/// Zero points at the 12/13 "half tank" position; positive is clockwise on the
/// full side.
pub fn needle_angle(time: TimeSample) -> f64 {
    // One-based elapsed units: hour 1..=24, minute 1..=60.
    let hour = i32::from(time.hour()) + 1;
    let minute = i32::from(time.minute()) + 1;
    let minutes_left = f64::from(60 - minute);

    let angle = if hour > 13 {
        if hour >= 18 {
            EMPTY_STOP_DEG
        } else {
            f64::from(hour - 13) * -DEGREES_PER_HOUR + minutes_left * -DEGREES_PER_MINUTE
        }
    } else if hour < 9 {
        FULL_STOP_DEG
    } else {
        f64::from(13 - hour) * DEGREES_PER_HOUR + minutes_left * DEGREES_PER_MINUTE
    };

    tracing::debug!(%time, hour, minute, angle, "computed needle angle");
    angle
}

#[cfg(test)]
#[path = "../../tests/unit/gauge/angle.rs"]
mod tests;
