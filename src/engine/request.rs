//! Immutable render inputs: one snapshot per preview frame or export

use std::fmt;
use std::str::FromStr;

use super::color::Rgb;
use super::error::TextcardError;

/// Encoded output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
}

impl OutputFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
        }
    }

    /// JPEG carries no alpha channel, so the canvas needs a solid background
    pub fn needs_background(&self) -> bool {
        matches!(self, OutputFormat::Jpeg)
    }
}

impl FromStr for OutputFormat {
    type Err = TextcardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            other => Err(TextcardError::InvalidArgument(format!(
                "unknown output format '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Decorative frame styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrameStyle {
    #[default]
    Solid,
    Gradient,
    Neon,
    Vintage,
    Royal,
    Nature,
    Ocean,
    Sunset,
    Galaxy,
    Fire,
}

impl FrameStyle {
    pub const ALL: [FrameStyle; 10] = [
        FrameStyle::Solid,
        FrameStyle::Gradient,
        FrameStyle::Neon,
        FrameStyle::Vintage,
        FrameStyle::Royal,
        FrameStyle::Nature,
        FrameStyle::Ocean,
        FrameStyle::Sunset,
        FrameStyle::Galaxy,
        FrameStyle::Fire,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FrameStyle::Solid => "solid",
            FrameStyle::Gradient => "gradient",
            FrameStyle::Neon => "neon",
            FrameStyle::Vintage => "vintage",
            FrameStyle::Royal => "royal",
            FrameStyle::Nature => "nature",
            FrameStyle::Ocean => "ocean",
            FrameStyle::Sunset => "sunset",
            FrameStyle::Galaxy => "galaxy",
            FrameStyle::Fire => "fire",
        }
    }

    /// Lenient lookup used for raw control values: unknown names draw as solid
    pub fn from_name_or_solid(name: &str) -> Self {
        name.parse().unwrap_or(FrameStyle::Solid)
    }
}

impl FromStr for FrameStyle {
    type Err = TextcardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        FrameStyle::ALL
            .iter()
            .copied()
            .find(|style| style.name() == wanted)
            .ok_or_else(|| TextcardError::InvalidArgument(format!("unknown frame style '{}'", s)))
    }
}

impl fmt::Display for FrameStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An enabled frame; a disabled frame is `None` on the request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSpec {
    pub style: FrameStyle,
    /// Only consulted by `FrameStyle::Solid`
    pub color: Rgb,
    pub width_px: f32,
}

impl FrameSpec {
    pub fn new(style: FrameStyle, color: Rgb, width_px: f32) -> Self {
        Self {
            style,
            color,
            width_px,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub text: String,
    pub font_family: String,
    pub font_size_px: f32,
    pub format: OutputFormat,
    pub background: Rgb,
    pub frame: Option<FrameSpec>,
}

impl RenderRequest {
    pub fn new(text: impl Into<String>, font_size_px: f32) -> Self {
        Self {
            text: text.into(),
            font_family: String::new(),
            font_size_px,
            format: OutputFormat::Png,
            background: Rgb::WHITE,
            frame: None,
        }
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_background(mut self, background: Rgb) -> Self {
        self.background = background;
        self
    }

    pub fn with_frame(mut self, frame: FrameSpec) -> Self {
        self.frame = Some(frame);
        self
    }

    /// Export is offered only when the trimmed text is non-empty
    pub fn is_exportable(&self) -> bool {
        !self.text.trim().is_empty()
    }
}
