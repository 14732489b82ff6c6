use std::time::Duration;

use crate::{
    foundation::{core::TimeSample, error::GaugeResult},
    host::{clock::TimeSource, tick::TickPolicy},
    render::{
        compositor::FuelGaugeFace,
        surface::{DrawSurface, surface_viewport},
    },
};

/// Display capabilities reported by the device.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeviceProperties {
    pub low_bit_ambient: bool,
    pub burn_in_protection: bool,
}

/// Bridges host lifecycle callbacks to a [`FuelGaugeFace`].
///
/// The host forwards visibility, ambient-mode and time-zone events and asks
/// [`FaceHost::next_tick_delay`] when to call [`FaceHost::redraw`] next.
#[derive(Debug)]
pub struct FaceHost<C: TimeSource> {
    face: FuelGaugeFace,
    clock: C,
    ticks: TickPolicy,
    visible: bool,
    ambient: bool,
    zone_subscribed: bool,
    properties: DeviceProperties,
}

impl<C: TimeSource> FaceHost<C> {
    pub fn new(face: FuelGaugeFace, clock: C) -> Self {
        Self::with_tick_policy(face, clock, TickPolicy::default())
    }

    pub fn with_tick_policy(face: FuelGaugeFace, clock: C, ticks: TickPolicy) -> Self {
        Self {
            face,
            clock,
            ticks,
            visible: false,
            ambient: false,
            zone_subscribed: false,
            properties: DeviceProperties::default(),
        }
    }

    pub fn face(&self) -> &FuelGaugeFace {
        &self.face
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_ambient(&self) -> bool {
        self.ambient
    }

    pub fn is_time_zone_subscribed(&self) -> bool {
        self.zone_subscribed
    }

    pub fn properties(&self) -> DeviceProperties {
        self.properties
    }

    pub fn on_properties_changed(&mut self, properties: DeviceProperties) {
        tracing::debug!(?properties, "device properties changed");
        self.properties = properties;
    }

    /// Becoming visible subscribes to zone changes and re-reads the zone, since it may
    /// have changed while hidden. Hiding drops the subscription.
    pub fn on_visibility_changed(&mut self, visible: bool) {
        self.visible = visible;
        self.zone_subscribed = visible;
        if visible {
            self.clock.resync_time_zone();
        }
        tracing::debug!(visible, timer = self.timer_should_run(), "visibility changed");
    }

    pub fn on_ambient_mode_changed(&mut self, ambient: bool) {
        self.ambient = ambient;
        tracing::debug!(ambient, timer = self.timer_should_run(), "ambient mode changed");
    }

    /// Zone changes only reach the clock while subscribed.
    pub fn on_time_zone_changed(&mut self, utc_offset_minutes: i32) -> GaugeResult<()> {
        if !self.zone_subscribed {
            tracing::debug!(utc_offset_minutes, "ignoring zone change while unsubscribed");
            return Ok(());
        }
        self.clock.on_time_zone_changed(utc_offset_minutes)
    }

    /// The once-per-second timer only runs while visible and interactive.
    pub fn timer_should_run(&self) -> bool {
        self.visible && !self.ambient
    }

    /// Delay until the next interactive redraw, or `None` when the timer is stopped.
    pub fn next_tick_delay(&self, since_epoch: Duration) -> Option<Duration> {
        self.timer_should_run()
            .then(|| self.ticks.delay_until_next_tick(since_epoch))
    }

    /// [`FaceHost::next_tick_delay`] measured against the system clock.
    pub fn next_tick_delay_from_now(&self) -> Option<Duration> {
        self.timer_should_run().then(|| self.ticks.delay_from_now())
    }

    /// Sample the clock and draw a full frame sized to `surface`.
    pub fn redraw(&mut self, surface: &mut dyn DrawSurface) -> GaugeResult<TimeSample> {
        if !self.visible {
            tracing::warn!("redraw requested while the face is hidden");
        }
        let time = self.clock.now()?;
        let viewport = surface_viewport(surface)?;
        self.face.render(surface, viewport, time)?;
        Ok(time)
    }

    /// Minute tick delivered by the host in ambient mode.
    pub fn on_time_tick(&mut self, surface: &mut dyn DrawSurface) -> GaugeResult<TimeSample> {
        tracing::debug!("time tick");
        self.redraw(surface)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/lifecycle.rs"]
mod tests;
