//! Composer: background, frame and text onto one surface
//!
//! Preview and export both go through [`render`]; they differ only in the
//! scale of the surface they pass in. Layout is computed in logical units,
//! so wrap points and frame geometry cannot drift between the two.

use image::RgbaImage;

use super::font::FontChain;
use super::frame::draw_frame;
use super::surface::{LogicalRect, Surface};
use super::text::draw_line_centered;
use crate::engine::config::CanvasConfig;
use crate::engine::layout::{content_width, display_text, wrap, LineBlock, VerticalLayout};
use crate::engine::{contrast_color, RenderRequest, Result, Rgb};

/// What a render pass laid out, for callers that want to inspect it
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutcome {
    pub lines: LineBlock,
    pub ink: Rgb,
    pub max_width: f32,
    pub vertical: VerticalLayout,
    /// Measured logical width of each line
    pub line_widths: Vec<f32>,
}

impl RenderOutcome {
    /// Middle y of every line, top to bottom
    pub fn line_positions(&self) -> Vec<f32> {
        (0..self.lines.len()).map(|i| self.vertical.line_y(i)).collect()
    }
}

/// Ink for the request: the fixed default on transparent output, otherwise
/// whatever contrasts with the painted background
pub fn ink_color(request: &RenderRequest, canvas: &CanvasConfig) -> Result<Rgb> {
    if request.format.needs_background() {
        Ok(contrast_color(request.background))
    } else {
        Rgb::parse_hex(&canvas.default_ink)
    }
}

/// Render `request` onto `surface`, replacing whatever it held
pub fn render(
    surface: &mut Surface,
    request: &RenderRequest,
    fonts: &FontChain,
    canvas: &CanvasConfig,
) -> Result<RenderOutcome> {
    let (width, height) = surface.logical_size();

    surface.clear();

    if request.format.needs_background() {
        surface.fill_rect(LogicalRect::new(0.0, 0.0, width, height), request.background);
    }

    if let Some(frame) = &request.frame {
        draw_frame(surface, frame.color, frame.width_px, frame.style);
    }

    let ink = ink_color(request, canvas)?;
    let frame_width = request.frame.as_ref().map(|frame| frame.width_px);
    let max_width = content_width(width, frame_width);
    let size = request.font_size_px;

    let text = display_text(&request.text, &canvas.placeholder, canvas.max_text_len);
    let lines = wrap(&text, |candidate| fonts.measure(candidate, size), max_width);
    let vertical = VerticalLayout::new(lines.len(), size, canvas.line_height_factor, height);

    let line_widths = lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            draw_line_centered(surface, fonts, line, size, width / 2.0, vertical.line_y(index), ink)
        })
        .collect();

    log::debug!(
        "rendered {} line(s) at {}x, max width {:.1}, ink {}",
        lines.len(),
        surface.scale(),
        max_width,
        ink
    );

    Ok(RenderOutcome {
        lines,
        ink,
        max_width,
        vertical,
        line_widths,
    })
}

/// Render onto a fresh canvas-sized surface at `scale`
pub fn render_image(
    request: &RenderRequest,
    fonts: &FontChain,
    canvas: &CanvasConfig,
    scale: f32,
) -> Result<(RgbaImage, RenderOutcome)> {
    let mut surface = Surface::new(canvas.width, canvas.height, scale)?;
    let outcome = render(&mut surface, request, fonts, canvas)?;
    Ok((surface.into_image(), outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{FrameSpec, FrameStyle, OutputFormat};

    fn canvas() -> CanvasConfig {
        CanvasConfig::default()
    }

    #[test]
    fn test_png_ink_is_default_gray() {
        let request = RenderRequest::new("hi", 32.0).with_background(Rgb::BLACK);
        assert_eq!(ink_color(&request, &canvas()).unwrap(), Rgb::new(0x33, 0x33, 0x33));
    }

    #[test]
    fn test_jpeg_ink_contrasts_background() {
        let dark = RenderRequest::new("hi", 32.0)
            .with_format(OutputFormat::Jpeg)
            .with_background(Rgb::new(10, 10, 40));
        assert_eq!(ink_color(&dark, &canvas()).unwrap(), Rgb::WHITE);

        let light = dark.clone().with_background(Rgb::new(250, 240, 200));
        assert_eq!(ink_color(&light, &canvas()).unwrap(), Rgb::BLACK);
    }

    #[test]
    fn test_malformed_default_ink_fails_fast() {
        let mut config = canvas();
        config.default_ink = "ink".to_string();
        assert!(ink_color(&RenderRequest::new("hi", 32.0), &config).is_err());
    }

    #[test]
    fn test_hello_world_single_centered_line() {
        let fonts = FontChain::placeholder();
        let request = RenderRequest::new("Hello World", 32.0);
        let (_, outcome) = render_image(&request, &fonts, &canvas(), 1.0).unwrap();

        assert_eq!(outcome.max_width, 360.0);
        assert_eq!(outcome.ink, Rgb::new(0x33, 0x33, 0x33));
        assert_eq!(outcome.lines.lines(), ["Hello World"]);
        assert!((outcome.line_positions()[0] - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_frame_narrows_content_width() {
        let fonts = FontChain::placeholder();
        let request = RenderRequest::new("x", 20.0).with_frame(FrameSpec::new(FrameStyle::Neon, Rgb::BLACK, 15.0));
        let (_, outcome) = render_image(&request, &fonts, &canvas(), 1.0).unwrap();
        assert_eq!(outcome.max_width, 350.0);
    }

    #[test]
    fn test_blank_text_renders_placeholder() {
        let fonts = FontChain::placeholder();
        let (_, outcome) = render_image(&RenderRequest::new("  ", 32.0), &fonts, &canvas(), 1.0).unwrap();
        assert_eq!(outcome.lines.joined(), "👋 Digite algo!");
    }

    #[test]
    fn test_jpeg_background_fills_canvas() {
        let fonts = FontChain::placeholder();
        let request = RenderRequest::new("a", 12.0)
            .with_format(OutputFormat::Jpeg)
            .with_background(Rgb::new(0, 128, 255));
        let (image, _) = render_image(&request, &fonts, &canvas(), 1.0).unwrap();
        assert_eq!(image.get_pixel(0, 0).0, [0, 128, 255, 255]);
        assert_eq!(image.get_pixel(399, 199).0, [0, 128, 255, 255]);
    }

    #[test]
    fn test_png_corners_stay_transparent() {
        let fonts = FontChain::placeholder();
        let (image, _) = render_image(&RenderRequest::new("a", 12.0), &fonts, &canvas(), 1.0).unwrap();
        assert_eq!(image.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn test_rerender_clears_previous_frame() {
        let fonts = FontChain::placeholder();
        let mut surface = Surface::new(400.0, 200.0, 1.0).unwrap();
        let framed = RenderRequest::new("a", 12.0).with_frame(FrameSpec::new(FrameStyle::Solid, Rgb::BLACK, 6.0));
        render(&mut surface, &framed, &fonts, &canvas()).unwrap();
        assert_eq!(surface.image().get_pixel(1, 100)[3], 255);

        render(&mut surface, &RenderRequest::new("a", 12.0), &fonts, &canvas()).unwrap();
        assert_eq!(surface.image().get_pixel(1, 100)[3], 0);
    }
}
