use std::sync::Arc;

use kurbo::Rect;

use crate::{
    foundation::{
        core::{Affine, Point, RasterImage, Rgba8Premul, demultiply_rgba8_in_place},
        error::{GaugeError, GaugeResult},
        math::degrees_to_radians,
    },
    render::surface::DrawSurface,
};

/// Pixels produced by a [`CpuSurface`].
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Convert to straight alpha, as image encoders expect.
    pub fn into_straight(mut self) -> Self {
        if !self.premultiplied {
            return self;
        }
        demultiply_rgba8_in_place(&mut self.data);
        self.premultiplied = false;
        self
    }
}

/// `vello_cpu` raster target with a save/restore transform stack.
///
/// Draw calls are recorded into a [`vello_cpu::RenderContext`]; pixels are
/// rasterized into the pixmap lazily on the first readback after a draw.
pub struct CpuSurface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    dirty: bool,
    transform: Affine,
    saved: Vec<Affine>,
}

impl CpuSurface {
    pub fn new(width: u32, height: u32) -> GaugeResult<Self> {
        if width == 0 || height == 0 {
            return Err(GaugeError::validation(format!(
                "surface must be non-empty, got {width}x{height}"
            )));
        }
        let width: u16 = width
            .try_into()
            .map_err(|_| GaugeError::validation("surface width exceeds u16"))?;
        let height: u16 = height
            .try_into()
            .map_err(|_| GaugeError::validation("surface height exceeds u16"))?;
        Ok(Self {
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
            dirty: false,
            transform: Affine::IDENTITY,
            saved: Vec::new(),
        })
    }

    /// Premultiplied pixel at `(x, y)`, rasterizing pending draws first.
    pub fn pixel(&mut self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= u32::from(self.width) || y >= u32::from(self.height) {
            return None;
        }
        let i = ((y as usize) * usize::from(self.width) + (x as usize)) * 4;
        let data = self.present().data_as_u8_slice();
        Some([data[i], data[i + 1], data[i + 2], data[i + 3]])
    }

    pub fn transform(&self) -> Affine {
        self.transform
    }

    pub fn into_frame(mut self) -> FrameRGBA {
        let data = self.present().data_as_u8_slice().to_vec();
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data,
            premultiplied: true,
        }
    }

    fn present(&mut self) -> &vello_cpu::Pixmap {
        if self.dirty {
            // Every recorded command is replayed, so start from a clear target.
            let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
            self.ctx.flush();
            self.ctx.render_to_pixmap(&mut pixmap);
            self.pixmap = pixmap;
            self.dirty = false;
        }
        &self.pixmap
    }

    fn begin_draw(&mut self, transform: Affine) {
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(transform));
        self.dirty = true;
    }
}

impl DrawSurface for CpuSurface {
    fn width(&self) -> u32 {
        u32::from(self.width)
    }

    fn height(&self) -> u32 {
        u32::from(self.height)
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8Premul) -> GaugeResult<()> {
        if color.a == 0 || rect.is_zero_area() {
            return Ok(());
        }
        let [r, g, b, a] = color.to_straight_array();
        self.begin_draw(self.transform);
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        self.ctx.fill_rect(&rect_to_cpu(rect));
        Ok(())
    }

    fn draw_image(&mut self, image: &RasterImage, at: Point) -> GaugeResult<()> {
        let paint = raster_to_image(image)?;
        self.begin_draw(self.transform * Affine::translate(at.to_vec2()));
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(image.width),
            f64::from(image.height),
        ));
        Ok(())
    }

    fn save(&mut self) {
        self.saved.push(self.transform);
    }

    fn rotate_about(&mut self, degrees: f64, pivot: Point) {
        let rotation = Affine::translate(pivot.to_vec2())
            * Affine::rotate(degrees_to_radians(degrees))
            * Affine::translate(-pivot.to_vec2());
        self.transform = self.transform * rotation;
    }

    fn restore(&mut self) -> GaugeResult<()> {
        self.transform = self
            .saved
            .pop()
            .ok_or_else(|| GaugeError::render("restore without matching save"))?;
        Ok(())
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

/// Wrap a premultiplied raster as an image paint. The default sampler
/// filters bilinearly, so rotated blits come out smooth.
fn raster_to_image(image: &RasterImage) -> GaugeResult<vello_cpu::Image> {
    let pixmap = premul_bytes_to_pixmap(&image.rgba8_premul, image.width, image.height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> GaugeResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| GaugeError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| GaugeError::render("image height exceeds u16"))?;
    let expected = (width as usize) * (height as usize) * 4;
    if rgba8_premul.len() != expected {
        return Err(GaugeError::render(format!(
            "image buffer holds {} bytes, expected {expected}",
            rgba8_premul.len()
        )));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity((width as usize) * (height as usize));
    for px in rgba8_premul.chunks_exact(4) {
        may_have_opacities |= px[3] != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
