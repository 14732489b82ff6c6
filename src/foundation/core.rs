use std::sync::Arc;

use crate::foundation::error::{GaugeError, GaugeResult};
use crate::foundation::math::mul_div255_u8;

pub use kurbo::{Affine, Point};

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        let a16 = u16::from(a);
        Self {
            r: mul_div255_u8(u16::from(r), a16),
            g: mul_div255_u8(u16::from(g), a16),
            b: mul_div255_u8(u16::from(b), a16),
            a,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Straight-alpha bytes; fully transparent stays all zero.
    pub fn to_straight_array(self) -> [u8; 4] {
        let mut px = self.to_array();
        demultiply_rgba8_in_place(&mut px);
        px
    }
}

/// Immutable raster in row-major premultiplied RGBA8.
///
/// Pixel data sits behind an `Arc` so cloning a raster never copies pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl RasterImage {
    pub fn new(width: u32, height: u32, rgba8_premul: Vec<u8>) -> GaugeResult<Self> {
        if width == 0 || height == 0 {
            return Err(GaugeError::validation("raster dimensions must be > 0"));
        }
        let expected = (width as usize) * (height as usize) * 4;
        if rgba8_premul.len() != expected {
            return Err(GaugeError::validation(format!(
                "raster {width}x{height} expects {expected} bytes, got {}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Build from straight (non-premultiplied) RGBA8 bytes.
    pub fn from_straight_rgba8(width: u32, height: u32, mut rgba: Vec<u8>) -> GaugeResult<Self> {
        premultiply_rgba8_in_place(&mut rgba);
        Self::new(width, height, rgba)
    }

    pub fn solid(width: u32, height: u32, color: Rgba8Premul) -> GaugeResult<Self> {
        let px = color.to_array();
        let count = (width as usize) * (height as usize);
        let mut data = Vec::with_capacity(count * 4);
        for _ in 0..count {
            data.extend_from_slice(&px);
        }
        Self::new(width, height, data)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let p = &self.rgba8_premul[i..i + 4];
        Some([p[0], p[1], p[2], p[3]])
    }

    /// True when both rasters share the same pixel allocation.
    pub fn shares_pixels_with(&self, other: &RasterImage) -> bool {
        Arc::ptr_eq(&self.rgba8_premul, &other.rgba8_premul)
    }
}

impl std::fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixels_ptr", &Arc::as_ptr(&self.rgba8_premul))
            .finish()
    }
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = mul_div255_u8(u16::from(px[0]), a);
        px[1] = mul_div255_u8(u16::from(px[1]), a);
        px[2] = mul_div255_u8(u16::from(px[2]), a);
    }
}

pub(crate) fn demultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

/// Current drawing-surface dimensions as reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> GaugeResult<Self> {
        if width == 0 || height == 0 {
            return Err(GaugeError::validation(format!(
                "viewport must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn width(self) -> u32 {
        self.width
    }

    pub fn height(self) -> u32 {
        self.height
    }

    /// Geometric centre, halved with integer division like the face artwork expects.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width / 2), f64::from(self.height / 2))
    }
}

/// One wall-clock snapshot taken at the start of a redraw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TimeSample {
    hour: u8,
    minute: u8,
}

impl TimeSample {
    pub fn new(hour: u8, minute: u8) -> GaugeResult<Self> {
        if hour > 23 {
            return Err(GaugeError::validation(format!(
                "hour must be in 0..=23, got {hour}"
            )));
        }
        if minute > 59 {
            return Err(GaugeError::validation(format!(
                "minute must be in 0..=59, got {minute}"
            )));
        }
        Ok(Self { hour, minute })
    }

    /// Parse `HH:MM` (24-hour clock).
    pub fn parse(s: &str) -> GaugeResult<Self> {
        let (h, m) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| GaugeError::validation(format!("expected HH:MM, got '{s}'")))?;
        let hour = h
            .parse::<u8>()
            .map_err(|e| GaugeError::validation(format!("invalid hour '{h}': {e}")))?;
        let minute = m
            .parse::<u8>()
            .map_err(|e| GaugeError::validation(format!("invalid minute '{m}': {e}")))?;
        Self::new(hour, minute)
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }
}

impl std::fmt::Display for TimeSample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
