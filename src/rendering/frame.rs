//! Decorative frame styles and the frame stroke
//!
//! Every style is one row of [`frame_look`]: a stroke paint plus an optional
//! glow. Gradients are anchored to the surface, not to the stroke, so the
//! same style looks identical at every frame width.

use super::paint::{ColorStop, Paint};
use super::surface::{Glow, LogicalRect, Surface};
use crate::engine::{FrameStyle, Rgb};

const fn hex(value: u32) -> Rgb {
    Rgb::new((value >> 16) as u8, (value >> 8) as u8, value as u8)
}

const fn stops(start: u32, middle: u32, end: u32) -> [ColorStop; 3] {
    [
        ColorStop::new(0.0, hex(start)),
        ColorStop::new(0.5, hex(middle)),
        ColorStop::new(1.0, hex(end)),
    ]
}

/// Stroke paint and optional glow for one style
#[derive(Debug, Clone, PartialEq)]
pub struct FrameLook {
    pub paint: Paint,
    pub glow: Option<Glow>,
}

impl FrameLook {
    fn flat(color: Rgb) -> Self {
        Self {
            paint: Paint::Solid(color),
            glow: None,
        }
    }

    fn glowing(mut self, color: u32, radius: f32) -> Self {
        self.glow = Some(Glow {
            color: hex(color),
            radius,
        });
        self
    }
}

/// The style table. `color` is only used by `Solid`; `width` scales glows.
pub fn frame_look(style: FrameStyle, color: Rgb, width: f32, surface_width: f32, surface_height: f32) -> FrameLook {
    let (w, h) = (surface_width, surface_height);

    let linear = |from: (f32, f32), to: (f32, f32), colors: [ColorStop; 3]| FrameLook {
        paint: Paint::linear(from, to, &colors),
        glow: None,
    };

    match style {
        FrameStyle::Solid => FrameLook::flat(color),
        FrameStyle::Gradient => linear((0.0, 0.0), (w, h), stops(0x667eea, 0x764ba2, 0xf093fb)),
        FrameStyle::Neon => FrameLook::flat(hex(0x00ffff)).glowing(0x00ffff, width),
        FrameStyle::Vintage => FrameLook::flat(hex(0x8b4513)).glowing(0x654321, width / 2.0),
        FrameStyle::Royal => linear((0.0, 0.0), (w, 0.0), stops(0xffd700, 0xffb347, 0xffd700))
            .glowing(0xb8860b, width / 3.0),
        FrameStyle::Nature => linear((0.0, 0.0), (0.0, h), stops(0x228b22, 0x32cd32, 0x90ee90)),
        FrameStyle::Ocean => linear((0.0, 0.0), (0.0, h), stops(0x191970, 0x4169e1, 0x87ceeb)),
        FrameStyle::Sunset => linear((0.0, 0.0), (w, 0.0), stops(0xff6b6b, 0xfeca57, 0xff9ff3)),
        FrameStyle::Galaxy => FrameLook {
            paint: Paint::radial((w / 2.0, h / 2.0), w.max(h) / 2.0, &stops(0x9b59b6, 0x3742fa, 0x2f3542)),
            glow: None,
        }
        .glowing(0x9b59b6, width),
        FrameStyle::Fire => linear((0.0, h), (0.0, 0.0), stops(0xff0000, 0xff4500, 0xffd700))
            .glowing(0xff4500, width / 2.0),
    }
}

/// Stroke rectangle inset by half the width so the stroke stays on the surface
pub fn frame_rect(width: f32, surface_width: f32, surface_height: f32) -> LogicalRect {
    let half = width / 2.0;
    LogicalRect::new(half, half, surface_width - width, surface_height - width)
}

/// Paint the frame; drawing state is restored afterwards
pub fn draw_frame(surface: &mut Surface, color: Rgb, width: f32, style: FrameStyle) {
    if width <= 0.0 {
        return;
    }

    let (surface_width, surface_height) = surface.logical_size();
    let look = frame_look(style, color, width, surface_width, surface_height);
    let rect = frame_rect(width, surface_width, surface_height);

    surface.with_saved_state(|s| {
        let state = s.state_mut();
        state.stroke = look.paint;
        state.glow = look.glow;
        state.line_width = width;
        s.stroke_rect(rect);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f32 = 400.0;
    const H: f32 = 200.0;

    fn look(style: FrameStyle, width: f32) -> FrameLook {
        frame_look(style, hex(0x123456), width, W, H)
    }

    #[test]
    fn test_hex_const() {
        assert_eq!(hex(0x8b4513), Rgb::new(0x8b, 0x45, 0x13));
    }

    #[test]
    fn test_solid_uses_request_color_without_glow() {
        let solid = look(FrameStyle::Solid, 10.0);
        assert_eq!(solid.paint, Paint::Solid(hex(0x123456)));
        assert!(solid.glow.is_none());
    }

    #[test]
    fn test_glow_radii_follow_width() {
        let radius = |style| look(style, 12.0).glow.map(|g| g.radius);
        assert_eq!(radius(FrameStyle::Neon), Some(12.0));
        assert_eq!(radius(FrameStyle::Vintage), Some(6.0));
        assert_eq!(radius(FrameStyle::Royal), Some(4.0));
        assert_eq!(radius(FrameStyle::Galaxy), Some(12.0));
        assert_eq!(radius(FrameStyle::Fire), Some(6.0));
        for style in [
            FrameStyle::Gradient,
            FrameStyle::Nature,
            FrameStyle::Ocean,
            FrameStyle::Sunset,
        ] {
            assert_eq!(radius(style), None, "{} should not glow", style);
        }
    }

    #[test]
    fn test_glow_colors() {
        let color = |style| look(style, 4.0).glow.map(|g| g.color);
        assert_eq!(color(FrameStyle::Neon), Some(hex(0x00ffff)));
        assert_eq!(color(FrameStyle::Vintage), Some(hex(0x654321)));
        assert_eq!(color(FrameStyle::Royal), Some(hex(0xb8860b)));
        assert_eq!(color(FrameStyle::Galaxy), Some(hex(0x9b59b6)));
        assert_eq!(color(FrameStyle::Fire), Some(hex(0xff4500)));
    }

    #[test]
    fn test_gradient_directions() {
        let gradient = look(FrameStyle::Gradient, 4.0).paint;
        assert_eq!(gradient.color_at(0.0, 0.0), hex(0x667eea));
        assert_eq!(gradient.color_at(W, H), hex(0xf093fb));

        let nature = look(FrameStyle::Nature, 4.0).paint;
        assert_eq!(nature.color_at(200.0, 0.0), hex(0x228b22));
        assert_eq!(nature.color_at(200.0, H), hex(0x90ee90));

        let sunset = look(FrameStyle::Sunset, 4.0).paint;
        assert_eq!(sunset.color_at(W / 2.0, 10.0), hex(0xfeca57));

        let fire = look(FrameStyle::Fire, 4.0).paint;
        assert_eq!(fire.color_at(0.0, H), hex(0xff0000));
        assert_eq!(fire.color_at(0.0, 0.0), hex(0xffd700));
    }

    #[test]
    fn test_galaxy_is_radial_from_center() {
        let galaxy = look(FrameStyle::Galaxy, 4.0).paint;
        assert_eq!(galaxy.color_at(W / 2.0, H / 2.0), hex(0x9b59b6));
        assert_eq!(galaxy.color_at(W / 2.0 + 100.0, H / 2.0), hex(0x3742fa));
        assert_eq!(galaxy.color_at(0.0, 0.0), hex(0x2f3542));
    }

    #[test]
    fn test_frame_rect_inset_for_every_style() {
        for width in [1.0, 5.0, 20.0] {
            let rect = frame_rect(width, W, H);
            assert_eq!(rect, LogicalRect::new(width / 2.0, width / 2.0, W - width, H - width));
        }
    }

    #[test]
    fn test_draw_frame_restores_state() {
        let mut surface = Surface::new(W, H, 1.0).unwrap();
        let before = surface.state().clone();
        for style in FrameStyle::ALL {
            draw_frame(&mut surface, Rgb::BLACK, 8.0, style);
            assert_eq!(surface.state(), &before, "{} leaked drawing state", style);
        }
    }

    #[test]
    fn test_draw_frame_stays_in_band() {
        for style in FrameStyle::ALL {
            let mut surface = Surface::new(W, H, 1.0).unwrap();
            draw_frame(&mut surface, Rgb::BLACK, 10.0, style);

            let edge = surface.image().get_pixel(0, 100);
            assert_eq!(edge[3], 255, "{} should cover the outer edge", style);

            let center = surface.image().get_pixel(200, 100);
            assert_eq!(center[3], 0, "{} should leave the center empty", style);
        }
    }
}
