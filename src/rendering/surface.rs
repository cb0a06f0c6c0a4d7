//! Raster drawing surface with a fixed logical coordinate space
//!
//! Callers draw in logical units (400x200 for a card); the surface maps them
//! onto its pixel buffer through a uniform scale factor. Drawing state lives
//! on a save/restore stack like a 2D canvas context, so a caller can change
//! stroke paint or glow for one operation without leaking it into the next.

use image::{GrayImage, Luma, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::filter::gaussian_blur_f32;
use imageproc::rect::Rect;

use super::paint::Paint;
use crate::engine::{Result, Rgb, TextcardError};

/// Soft halo drawn beneath a stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Rgb,
    /// Blur radius in logical units (Gaussian sigma is half of it)
    pub radius: f32,
}

/// Mutable drawing parameters, scoped by [`Surface::save`] / [`Surface::restore`]
#[derive(Debug, Clone, PartialEq)]
pub struct DrawState {
    pub stroke: Paint,
    pub line_width: f32,
    pub glow: Option<Glow>,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            stroke: Paint::default(),
            line_width: 1.0,
            glow: None,
        }
    }
}

/// Logical-space rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogicalRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LogicalRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    fn right(&self) -> f32 {
        self.x + self.width
    }

    fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Grow (or shrink, for negative `by`) on every side
    fn outset(&self, by: f32) -> Self {
        Self::new(self.x - by, self.y - by, self.width + by * 2.0, self.height + by * 2.0)
    }
}

pub struct Surface {
    width: f32,
    height: f32,
    scale: f32,
    pixels: RgbaImage,
    state: DrawState,
    saved: Vec<DrawState>,
}

impl Surface {
    /// Create a transparent surface of `width` x `height` logical units
    pub fn new(width: f32, height: f32, scale: f32) -> Result<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(TextcardError::InvalidScale(scale));
        }
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(TextcardError::InvalidArgument(format!(
                "surface size must be positive, got {}x{}",
                width, height
            )));
        }

        let pixel_width = ((width * scale).round() as u32).max(1);
        let pixel_height = ((height * scale).round() as u32).max(1);

        Ok(Self {
            width,
            height,
            scale,
            pixels: RgbaImage::new(pixel_width, pixel_height),
            state: DrawState::default(),
            saved: Vec::new(),
        })
    }

    pub fn logical_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    pub fn state(&self) -> &DrawState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut DrawState {
        &mut self.state
    }

    pub fn save(&mut self) {
        self.saved.push(self.state.clone());
    }

    /// Pop the last saved state; a restore without a matching save is a no-op
    pub fn restore(&mut self) {
        if let Some(previous) = self.saved.pop() {
            self.state = previous;
        }
    }

    /// Run `draw` between a save and a restore
    pub fn with_saved_state<R>(&mut self, draw: impl FnOnce(&mut Self) -> R) -> R {
        self.save();
        let result = draw(self);
        self.restore();
        result
    }

    /// Reset every pixel to transparent black
    pub fn clear(&mut self) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    /// Opaque fill of a logical rectangle, snapped outward to whole pixels
    pub fn fill_rect(&mut self, rect: LogicalRect, color: Rgb) {
        let (pixel_width, pixel_height) = self.pixel_size();
        let x0 = (rect.x * self.scale).floor().max(0.0);
        let y0 = (rect.y * self.scale).floor().max(0.0);
        let x1 = (rect.right() * self.scale).ceil().min(pixel_width as f32);
        let y1 = (rect.bottom() * self.scale).ceil().min(pixel_height as f32);

        if x1 <= x0 || y1 <= y0 {
            return;
        }

        let area = Rect::at(x0 as i32, y0 as i32).of_size((x1 - x0) as u32, (y1 - y0) as u32);
        draw_filled_rect_mut(&mut self.pixels, area, color.to_rgba(255));
    }

    /// Anti-aliased source-over fill of a logical rectangle
    pub fn blend_rect(&mut self, rect: LogicalRect, color: Rgb, alpha: f32) {
        let mask = self.rect_mask(rect, None);
        self.composite_mask(&mask, |_, _| color, alpha);
    }

    /// Stroke `rect` with the current paint and line width, centered on the
    /// rectangle edges. A glow in the current state is painted underneath.
    pub fn stroke_rect(&mut self, rect: LogicalRect) {
        let half = self.state.line_width / 2.0;
        if half <= 0.0 {
            return;
        }

        let mask = self.rect_mask(rect.outset(half), Some(rect.outset(-half)));

        if let Some(glow) = self.state.glow {
            let sigma = glow.radius * self.scale / 2.0;
            if sigma > 0.0 {
                let halo = gaussian_blur_f32(&mask, sigma);
                self.composite_mask(&halo, |_, _| glow.color, 1.0);
            }
        }

        let paint = self.state.stroke.clone();
        self.composite_mask(&mask, |x, y| paint.color_at(x, y), 1.0);
    }

    /// Source-over blend of one pixel; `coverage` is 0.0..=1.0
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgb, coverage: f32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.pixels.width() || y >= self.pixels.height() {
            return;
        }

        let src_a = coverage.clamp(0.0, 1.0);
        if src_a <= 0.0 {
            return;
        }

        let dst = *self.pixels.get_pixel(x, y);
        let dst_a = dst[3] as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        let channel = |src: u8, dst: u8| {
            let value = (src as f32 * src_a + dst as f32 * dst_a * (1.0 - src_a)) / out_a;
            value.round().clamp(0.0, 255.0) as u8
        };

        self.pixels.put_pixel(
            x,
            y,
            Rgba([
                channel(color.r, dst[0]),
                channel(color.g, dst[1]),
                channel(color.b, dst[2]),
                (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
            ]),
        );
    }

    /// Per-pixel area coverage of `outer` minus `hole`
    fn rect_mask(&self, outer: LogicalRect, hole: Option<LogicalRect>) -> GrayImage {
        let (pixel_width, pixel_height) = self.pixel_size();
        let scale = self.scale;

        let span = |lo: f32, hi: f32, pixel: u32| -> f32 {
            let (lo, hi) = (lo * scale, hi * scale);
            let p = pixel as f32;
            ((hi.min(p + 1.0)) - lo.max(p)).clamp(0.0, 1.0)
        };
        let coverage = |rect: &LogicalRect, x: u32, y: u32| -> f32 {
            if rect.width <= 0.0 || rect.height <= 0.0 {
                return 0.0;
            }
            span(rect.x, rect.right(), x) * span(rect.y, rect.bottom(), y)
        };

        GrayImage::from_fn(pixel_width, pixel_height, |x, y| {
            let outer_cov = coverage(&outer, x, y);
            let hole_cov = hole.as_ref().map_or(0.0, |h| coverage(h, x, y));
            let value = ((outer_cov - hole_cov).max(0.0) * 255.0).round();
            Luma([value as u8])
        })
    }

    /// Blend `color_at` (sampled at the logical pixel center) through `mask`
    fn composite_mask(&mut self, mask: &GrayImage, color_at: impl Fn(f32, f32) -> Rgb, alpha: f32) {
        let scale = self.scale;
        for (x, y, value) in mask.enumerate_pixels() {
            let coverage = value[0] as f32 / 255.0 * alpha;
            if coverage <= 0.0 {
                continue;
            }
            let logical_x = (x as f32 + 0.5) / scale;
            let logical_y = (y as f32 + 0.5) / scale;
            let color = color_at(logical_x, logical_y);
            self.blend_pixel(x as i32, y as i32, color, coverage);
        }
    }
}
