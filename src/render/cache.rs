use image::imageops::FilterType;

use crate::foundation::{
    core::{RasterImage, Viewport},
    error::{GaugeError, GaugeResult},
};

/// Holds the background resampled to the last viewport it was asked for.
///
/// At most one entry is kept; asking for a different size replaces it. The
/// cache is not synchronised, so concurrent renderers need their own lock.
#[derive(Debug, Default)]
pub struct ScaledBackgroundCache {
    entry: Option<CachedScaledImage>,
    rebuilds: u64,
}

#[derive(Debug)]
struct CachedScaledImage {
    key: Viewport,
    image: RasterImage,
}

impl ScaledBackgroundCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `source` scaled to exactly `viewport`, resampling only when the
    /// cached entry is missing or sized differently.
    pub fn get_scaled(
        &mut self,
        source: &RasterImage,
        viewport: Viewport,
    ) -> GaugeResult<&RasterImage> {
        let stale = match &self.entry {
            Some(e) => e.image.width != viewport.width() || e.image.height != viewport.height(),
            None => true,
        };

        if stale {
            let image = scale_to(source, viewport)?;
            self.rebuilds += 1;
            tracing::info!(
                width = viewport.width(),
                height = viewport.height(),
                rebuilds = self.rebuilds,
                "rebuilt scaled background"
            );
            self.entry = Some(CachedScaledImage {
                key: viewport,
                image,
            });
        }

        self.entry
            .as_ref()
            .map(|e| &e.image)
            .ok_or_else(|| GaugeError::render("scaled background cache is empty"))
    }

    pub fn cached_viewport(&self) -> Option<Viewport> {
        self.entry.as_ref().map(|e| e.key)
    }

    /// How many times a scaled image has been produced.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

fn scale_to(source: &RasterImage, viewport: Viewport) -> GaugeResult<RasterImage> {
    let (width, height) = (viewport.width(), viewport.height());
    if source.width == width && source.height == height {
        return Ok(source.clone());
    }

    let buf = image::RgbaImage::from_raw(
        source.width,
        source.height,
        source.rgba8_premul.to_vec(),
    )
    .ok_or_else(|| GaugeError::render("background buffer does not match its dimensions"))?;
    // Premultiplied data filters without colour fringes at transparent edges.
    let scaled = image::imageops::resize(&buf, width, height, FilterType::Triangle);
    RasterImage::new(width, height, scaled.into_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/render/cache.rs"]
mod tests;
