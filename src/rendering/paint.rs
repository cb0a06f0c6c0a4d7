//! Stroke paints: flat colors plus linear and radial multi-stop gradients
//!
//! Gradient geometry is expressed in logical canvas units, matching the way
//! a 2D canvas gradient is anchored to the canvas rather than the shape.

use crate::engine::Rgb;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// Position along the gradient, 0.0..=1.0
    pub offset: f32,
    pub color: Rgb,
}

impl ColorStop {
    pub const fn new(offset: f32, color: Rgb) -> Self {
        Self { offset, color }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub from: (f32, f32),
    pub to: (f32, f32),
    pub stops: Vec<ColorStop>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: (f32, f32),
    pub radius: f32,
    pub stops: Vec<ColorStop>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgb),
    Linear(LinearGradient),
    Radial(RadialGradient),
}

impl Default for Paint {
    fn default() -> Self {
        Paint::Solid(Rgb::BLACK)
    }
}

impl Paint {
    pub fn linear(from: (f32, f32), to: (f32, f32), stops: &[ColorStop]) -> Self {
        Paint::Linear(LinearGradient {
            from,
            to,
            stops: stops.to_vec(),
        })
    }

    pub fn radial(center: (f32, f32), radius: f32, stops: &[ColorStop]) -> Self {
        Paint::Radial(RadialGradient {
            center,
            radius,
            stops: stops.to_vec(),
        })
    }

    /// Color of the paint at logical point (x, y)
    pub fn color_at(&self, x: f32, y: f32) -> Rgb {
        match self {
            Paint::Solid(color) => *color,
            Paint::Linear(gradient) => {
                let (dx, dy) = (gradient.to.0 - gradient.from.0, gradient.to.1 - gradient.from.1);
                let length_sq = dx * dx + dy * dy;
                if length_sq <= f32::EPSILON {
                    return sample_stops(&gradient.stops, 0.0);
                }
                let t = ((x - gradient.from.0) * dx + (y - gradient.from.1) * dy) / length_sq;
                sample_stops(&gradient.stops, t)
            }
            Paint::Radial(gradient) => {
                if gradient.radius <= f32::EPSILON {
                    return sample_stops(&gradient.stops, 1.0);
                }
                let distance = (x - gradient.center.0).hypot(y - gradient.center.1);
                sample_stops(&gradient.stops, distance / gradient.radius)
            }
        }
    }
}

/// Interpolate between stops; `t` outside 0..=1 pads with the end colors
fn sample_stops(stops: &[ColorStop], t: f32) -> Rgb {
    let (first, last) = match (stops.first(), stops.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Rgb::BLACK,
    };

    let t = t.clamp(0.0, 1.0);
    if t <= first.offset {
        return first.color;
    }
    if t >= last.offset {
        return last.color;
    }

    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t >= a.offset && t <= b.offset {
            let span = b.offset - a.offset;
            let local = if span <= f32::EPSILON {
                1.0
            } else {
                (t - a.offset) / span
            };
            return lerp_rgb(a.color, b.color, local);
        }
    }

    last.color
}

fn lerp_rgb(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round().clamp(0.0, 255.0) as u8;
    Rgb::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
}
