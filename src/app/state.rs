use crate::engine::config::ControlsConfig;
use crate::engine::{FrameSpec, FrameStyle, OutputFormat, RenderRequest, Result, Rgb};

/// Current values of every control, as the interactive layer sees them
#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    pub text: String,
    pub font_family: String,
    pub font_size: u32,
    pub format: OutputFormat,
    pub background_color: String,
    pub frame_enabled: bool,
    pub frame_style: FrameStyle,
    pub frame_color: String,
    pub frame_width: u32,
}

impl Controls {
    pub fn from_config(config: &ControlsConfig) -> Self {
        Self {
            text: String::new(),
            font_family: String::new(),
            font_size: config.font_size,
            format: config.format,
            background_color: config.background_color.clone(),
            frame_enabled: config.frame_enabled,
            frame_style: config.frame_style,
            frame_color: config.frame_color.clone(),
            frame_width: config.frame_width,
        }
    }

    /// Immutable request for one render pass
    pub fn snapshot(&self) -> Result<RenderRequest> {
        let background = Rgb::parse_hex(&self.background_color)?;
        let frame = if self.frame_enabled {
            let color = Rgb::parse_hex(&self.frame_color)?;
            Some(FrameSpec::new(self.frame_style, color, self.frame_width as f32))
        } else {
            None
        };

        Ok(RenderRequest {
            text: self.text.clone(),
            font_family: self.font_family.clone(),
            font_size_px: self.font_size as f32,
            format: self.format,
            background,
            frame,
        })
    }

    /// Export is enabled iff the trimmed text is non-empty
    pub fn export_enabled(&self) -> bool {
        !self.text.trim().is_empty()
    }
}
