//! Time sources a host can hand to [`FaceHost`](crate::FaceHost).

use chrono::{FixedOffset, Local, Timelike, Utc};

use crate::foundation::{
    core::TimeSample,
    error::{GaugeError, GaugeResult},
};

/// Supplies the current local wall-clock time, already adjusted for the active zone.
pub trait TimeSource {
    fn now(&self) -> GaugeResult<TimeSample>;

    /// The system reported a new UTC offset.
    fn on_time_zone_changed(&mut self, _utc_offset_minutes: i32) -> GaugeResult<()> {
        Ok(())
    }

    /// Re-read the zone from the system, e.g. after the face was hidden for a while.
    fn resync_time_zone(&mut self) {}
}

/// Follows the operating system's local zone on every sample.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalClock;

impl TimeSource for LocalClock {
    fn now(&self) -> GaugeResult<TimeSample> {
        sample(&Local::now())
    }
}

/// UTC shifted by an offset that the host updates on zone changes.
///
/// A clock built with [`ZonedClock::system`] re-reads the system offset on
/// [`TimeSource::resync_time_zone`]; one built with an explicit offset keeps it
/// until the host reports a change.
#[derive(Clone, Copy, Debug)]
pub struct ZonedClock {
    offset: FixedOffset,
    follows_system: bool,
}

impl ZonedClock {
    pub fn new(utc_offset_minutes: i32) -> GaugeResult<Self> {
        Ok(Self {
            offset: offset_from_minutes(utc_offset_minutes)?,
            follows_system: false,
        })
    }

    /// Start from the system's current offset and track it on resync.
    pub fn system() -> Self {
        Self {
            offset: *Local::now().offset(),
            follows_system: true,
        }
    }

    pub fn utc_offset_minutes(&self) -> i32 {
        self.offset.local_minus_utc() / 60
    }

    pub fn follows_system(&self) -> bool {
        self.follows_system
    }
}

impl TimeSource for ZonedClock {
    fn now(&self) -> GaugeResult<TimeSample> {
        sample(&Utc::now().with_timezone(&self.offset))
    }

    fn on_time_zone_changed(&mut self, utc_offset_minutes: i32) -> GaugeResult<()> {
        self.offset = offset_from_minutes(utc_offset_minutes)?;
        tracing::debug!(utc_offset_minutes, "time zone changed");
        Ok(())
    }

    fn resync_time_zone(&mut self) {
        if self.follows_system {
            self.offset = *Local::now().offset();
        }
    }
}

/// Always reports the same time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub TimeSample);

impl TimeSource for FixedClock {
    fn now(&self) -> GaugeResult<TimeSample> {
        Ok(self.0)
    }
}

fn offset_from_minutes(minutes: i32) -> GaugeResult<FixedOffset> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| GaugeError::validation(format!("UTC offset {minutes} min is out of range")))
}

fn sample<T: Timelike>(t: &T) -> GaugeResult<TimeSample> {
    let hour = u8::try_from(t.hour()).map_err(|_| GaugeError::validation("hour overflow"))?;
    let minute = u8::try_from(t.minute()).map_err(|_| GaugeError::validation("minute overflow"))?;
    TimeSample::new(hour, minute)
}

#[cfg(test)]
#[path = "../../tests/unit/host/clock.rs"]
mod tests;
