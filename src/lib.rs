//! Fuel-gauge watch face.
//!
//! Wall-clock time is shown two ways at once: a needle that drains across a
//! fuel-gauge dial over the working day, and four digit wheels showing the
//! hour and minute through a window in the face.
//!
//! # Pipeline overview
//!
//! 1. **Sample**: a [`TimeSource`] yields a [`TimeSample`] at the start of each redraw.
//! 2. **Map**: [`needle_angle`] turns it into a rotation; [`time_digits`] into two
//!    [`DigitPair`]s.
//! 3. **Composite**: [`FuelGaugeFace::render`] issues backdrop, digit wheels, the
//!    viewport-scaled background and the rotated needle to a [`DrawSurface`].
//!
//! Assets are decoded once up front ([`FaceAssets::load`]); a missing image is a
//! startup error, never a per-frame one. [`FaceHost`] adapts host lifecycle events
//! (visibility, ambient mode, zone changes, ticks) to the face.
#![forbid(unsafe_code)]

mod assets;
mod foundation;
mod gauge;
mod host;
mod render;

pub use assets::decode::decode_image;
pub use assets::store::{FaceAssets, FaceManifest, normalize_rel_path};
pub use foundation::core::{Affine, Point, RasterImage, Rgba8Premul, TimeSample, Viewport};
pub use foundation::error::{GaugeError, GaugeResult};
pub use gauge::angle::{
    DEGREES_PER_HOUR, DEGREES_PER_MINUTE, EMPTY_STOP_DEG, FULL_STOP_DEG, needle_angle,
};
pub use gauge::digits::{DigitPair, hour_digits, minute_digits, split_digits, time_digits};
pub use host::clock::{FixedClock, LocalClock, TimeSource, ZonedClock};
pub use host::lifecycle::{DeviceProperties, FaceHost};
pub use host::tick::{INTERACTIVE_UPDATE_RATE, TickPolicy};
pub use render::cache::ScaledBackgroundCache;
pub use render::compositor::{DigitPlacement, FuelGaugeFace};
pub use render::cpu::{CpuSurface, FrameRGBA};
pub use render::layout::{DigitSlot, DigitVariant, FaceLayout};
pub use render::surface::{DrawSurface, RecordingSurface, SurfaceOp, surface_viewport};

/// Re-exported geometry type used by [`DrawSurface::fill_rect`].
pub use kurbo::Rect;
