use kurbo::Rect;

use crate::foundation::{
    core::{Point, RasterImage, Rgba8Premul, Viewport},
    error::{GaugeError, GaugeResult},
};

/// Drawing target the face composites into.
///
/// Operations apply in the current coordinate system; `save`/`restore` bracket
/// transform changes so they never outlive the drawing that needs them.
pub trait DrawSurface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Fill `rect` with a flat colour.
    fn fill_rect(&mut self, rect: Rect, color: Rgba8Premul) -> GaugeResult<()>;

    /// Blit `image` with its top-left corner at `at`, filtering when transformed.
    fn draw_image(&mut self, image: &RasterImage, at: Point) -> GaugeResult<()>;

    /// Push the current transform.
    fn save(&mut self);

    /// Rotate the coordinate system clockwise by `degrees` about `pivot`.
    fn rotate_about(&mut self, degrees: f64, pivot: Point);

    /// Pop the transform pushed by the matching `save`.
    fn restore(&mut self) -> GaugeResult<()>;
}

/// Viewport covering the whole of `surface`.
pub fn surface_viewport(surface: &dyn DrawSurface) -> GaugeResult<Viewport> {
    Viewport::new(surface.width(), surface.height())
}

/// A single operation captured by [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceOp {
    Fill { rect: Rect, color: Rgba8Premul },
    DrawImage { image: RasterImage, at: Point },
    Save,
    Rotate { degrees: f64, pivot: Point },
    Restore,
}

/// Surface that draws nothing and remembers every call, in order.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    depth: usize,
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            depth: 0,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<SurfaceOp> {
        std::mem::take(&mut self.ops)
    }

    /// Number of `save` calls not yet matched by `restore`.
    pub fn save_depth(&self) -> usize {
        self.depth
    }
}

impl DrawSurface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8Premul) -> GaugeResult<()> {
        self.ops.push(SurfaceOp::Fill { rect, color });
        Ok(())
    }

    fn draw_image(&mut self, image: &RasterImage, at: Point) -> GaugeResult<()> {
        self.ops.push(SurfaceOp::DrawImage {
            image: image.clone(),
            at,
        });
        Ok(())
    }

    fn save(&mut self) {
        self.depth += 1;
        self.ops.push(SurfaceOp::Save);
    }

    fn rotate_about(&mut self, degrees: f64, pivot: Point) {
        self.ops.push(SurfaceOp::Rotate { degrees, pivot });
    }

    fn restore(&mut self) -> GaugeResult<()> {
        if self.depth == 0 {
            return Err(GaugeError::render("restore without matching save"));
        }
        self.depth -= 1;
        self.ops.push(SurfaceOp::Restore);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
