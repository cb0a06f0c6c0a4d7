//! Glyph rasterization for one centered line of text

use ab_glyph::{point, Font};

use super::font::FontChain;
use super::surface::{LogicalRect, Surface};
use crate::engine::Rgb;

/// Stroke thickness of placeholder boxes, as a fraction of the font size
const PLACEHOLDER_STROKE: f32 = 0.06;

/// Draw `line` horizontally centered on `center_x` with the middle of the em
/// box on `middle_y`. Coordinates and `size` are logical; returns the
/// logical width of the line.
pub fn draw_line_centered(
    surface: &mut Surface,
    fonts: &FontChain,
    line: &str,
    size: f32,
    center_x: f32,
    middle_y: f32,
    ink: Rgb,
) -> f32 {
    let run = fonts.layout_run(line, size);
    let start_x = center_x - run.width / 2.0;
    let baseline = middle_y + fonts.metrics(size).middle_to_baseline();
    let scale = surface.scale();

    for glyph in &run.glyphs {
        if glyph.ch.is_whitespace() {
            continue;
        }

        let x = start_x + glyph.x;
        let drawn = match glyph.face {
            Some(index) => draw_outline(surface, fonts, index, glyph.id, size, x, baseline, ink, scale),
            None => false,
        };

        // Bitmap-only glyphs (color emoji) have no outline either
        if !drawn {
            draw_placeholder(surface, x, baseline, glyph.advance, size, ink);
        }
    }

    run.width
}

#[allow(clippy::too_many_arguments)]
fn draw_outline(
    surface: &mut Surface,
    fonts: &FontChain,
    index: usize,
    id: ab_glyph::GlyphId,
    size: f32,
    x: f32,
    baseline: f32,
    ink: Rgb,
    scale: f32,
) -> bool {
    let (Some(font), Some(px_scale)) = (fonts.font(index), fonts.px_scale(index, size * scale)) else {
        return false;
    };

    let glyph = id.with_scale_and_position(px_scale, point(x * scale, baseline * scale));
    let Some(outlined) = font.outline_glyph(glyph) else {
        return false;
    };

    let bounds = outlined.px_bounds();
    let (origin_x, origin_y) = (bounds.min.x as i32, bounds.min.y as i32);
    outlined.draw(|gx, gy, coverage| {
        surface.blend_pixel(origin_x + gx as i32, origin_y + gy as i32, ink, coverage);
    });
    true
}

/// Hollow box standing on the baseline, the classic missing-glyph "tofu"
fn draw_placeholder(surface: &mut Surface, x: f32, baseline: f32, advance: f32, size: f32, ink: Rgb) {
    let stroke = (size * PLACEHOLDER_STROKE).max(0.5);
    let inset = advance * 0.12;
    let left = x + inset;
    let width = (advance - inset * 2.0).max(stroke * 2.0);
    let height = size * 0.7;
    let top = baseline - height;

    let sides = [
        LogicalRect::new(left, top, width, stroke),
        LogicalRect::new(left, baseline - stroke, width, stroke),
        LogicalRect::new(left, top + stroke, stroke, height - stroke * 2.0),
        LogicalRect::new(left + width - stroke, top + stroke, stroke, height - stroke * 2.0),
    ];
    for side in sides {
        surface.blend_rect(side, ink, 1.0);
    }
}
