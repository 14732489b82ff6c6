//! Frame compositing for the fuel-gauge face.
//!
//! Layers, back to front:
//!
//! 1. flat backdrop over the whole viewport,
//! 2. four digit wheels (hour tens/units, minute tens/units),
//! 3. the background face scaled to the viewport; its transparent window lets
//!    the wheels show through,
//! 4. the needle, rotated about the viewport centre.
//!
//! Later layers occlude earlier ones, so the order is fixed.

use kurbo::Rect;

use crate::{
    assets::store::FaceAssets,
    foundation::{
        core::{Point, RasterImage, TimeSample, Viewport},
        error::GaugeResult,
    },
    gauge::{angle::needle_angle, digits::time_digits},
    render::{
        cache::ScaledBackgroundCache,
        layout::{DigitVariant, FaceLayout},
        surface::DrawSurface,
    },
};

/// Where one digit wheel lands for a given time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DigitPlacement {
    /// 0 = hour tens, 1 = hour units, 2 = minute tens, 3 = minute units.
    pub slot: usize,
    pub variant: DigitVariant,
    pub digit: u8,
    /// Top-left corner of the strip image.
    pub at: Point,
}

/// The watch face: immutable assets and layout plus the scaled-background cache.
#[derive(Debug)]
pub struct FuelGaugeFace {
    assets: FaceAssets,
    layout: FaceLayout,
    background: ScaledBackgroundCache,
}

impl FuelGaugeFace {
    /// Initialise a face. Assets must already be loaded; a bad layout is rejected here
    /// rather than on the first frame.
    pub fn new(assets: FaceAssets, layout: FaceLayout) -> GaugeResult<Self> {
        layout.validate()?;
        Ok(Self {
            assets,
            layout,
            background: ScaledBackgroundCache::new(),
        })
    }

    pub fn layout(&self) -> &FaceLayout {
        &self.layout
    }

    pub fn assets(&self) -> &FaceAssets {
        &self.assets
    }

    pub fn background_cache(&self) -> &ScaledBackgroundCache {
        &self.background
    }

    /// Digit wheel positions for `time`. Numeral `d` of a strip is scrolled into the
    /// window by moving the strip up `d` pitches from the zero position.
    pub fn digit_placements(&self, viewport: Viewport, time: TimeSample) -> [DigitPlacement; 4] {
        let (hours, minutes) = time_digits(time);
        let digits = [hours.first(), hours.second(), minutes.first(), minutes.second()];
        let center = viewport.center();
        let zero_y = center.y + f64::from(self.layout.digit_zero_offset_px);
        let pitch = f64::from(self.layout.digit_pitch_px);

        std::array::from_fn(|slot| {
            let slot_layout = self.layout.digit_slots[slot];
            let digit = digits[slot];
            DigitPlacement {
                slot,
                variant: slot_layout.variant,
                digit,
                at: Point::new(
                    center.x + f64::from(slot_layout.dx),
                    zero_y - pitch * f64::from(digit),
                ),
            }
        })
    }

    /// Composite one frame for `time` onto `surface`.
    ///
    /// The needle rotation is pushed and popped inside this call, so every frame
    /// starts from the surface's unrotated coordinate system.
    #[tracing::instrument(level = "debug", skip(self, surface))]
    pub fn render(
        &mut self,
        surface: &mut dyn DrawSurface,
        viewport: Viewport,
        time: TimeSample,
    ) -> GaugeResult<()> {
        tracing::debug!(
            width = viewport.width(),
            height = viewport.height(),
            "drawing frame"
        );
        let full = Rect::new(
            0.0,
            0.0,
            f64::from(viewport.width()),
            f64::from(viewport.height()),
        );

        surface.fill_rect(full, self.layout.backdrop())?;

        for placement in self.digit_placements(viewport, time) {
            surface.draw_image(self.strip(placement.variant), placement.at)?;
        }

        let background = self
            .background
            .get_scaled(&self.assets.background, viewport)?;
        surface.draw_image(background, Point::ZERO)?;

        let angle = needle_angle(time);
        let [nx, ny] = self.layout.needle_offset_px;
        surface.save();
        surface.rotate_about(angle, viewport.center());
        let drawn = surface.draw_image(&self.assets.needle, Point::new(f64::from(nx), f64::from(ny)));
        let restored = surface.restore();
        drawn?;
        restored
    }

    fn strip(&self, variant: DigitVariant) -> &RasterImage {
        match variant {
            DigitVariant::Light => &self.assets.digits_light,
            DigitVariant::Dark => &self.assets.digits_dark,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
