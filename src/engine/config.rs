// Configuration for the textcard canvas, fonts and control defaults

use std::env;
use std::ops::RangeInclusive;
use std::path::PathBuf;

use super::request::{FrameStyle, OutputFormat};

/// Canvas geometry and render constants
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    /// Logical canvas width in units (default 400)
    pub width: f32,

    /// Logical canvas height in units (default 200)
    pub height: f32,

    /// Supersampling factor used for export (default 3x)
    pub export_scale: f32,

    /// JPEG encoder quality, 1-100 (default 95)
    pub jpeg_quality: u8,

    /// Line height as a multiple of font size (default 1.2)
    pub line_height_factor: f32,

    /// Maximum number of graphemes rendered from user text
    pub max_text_len: usize,

    /// Shown when the text field is empty
    pub placeholder: String,

    /// Ink used when no background is painted (png path)
    pub default_ink: String,

    /// Filename stem used when sanitized text is empty
    pub fallback_file_stem: String,

    /// Sanitized text is cut to this many characters in filenames
    pub file_stem_len: usize,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 200.0,
            export_scale: 3.0,
            jpeg_quality: 95,
            line_height_factor: 1.2,
            max_text_len: 100,
            placeholder: "👋 Digite algo!".to_string(),
            default_ink: "#333333".to_string(),
            fallback_file_stem: "imagem".to_string(),
            file_stem_len: 20,
        }
    }
}

/// Font lookup configuration
#[derive(Debug, Clone, PartialEq)]
pub struct FontConfig {
    /// Family used when the request names none
    pub default_family: String,

    /// Tried after the requested family, in order
    pub emoji_families: Vec<String>,

    /// Generic sans-serif candidates, tried last
    pub generic_families: Vec<String>,

    /// Extra directories searched before the platform font service
    pub search_dirs: Vec<PathBuf>,

    /// Font file tried before anything else
    pub custom_font_path: Option<PathBuf>,

    /// Query the platform font service (disable for hermetic rendering)
    pub use_system_fonts: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            default_family: "Inter".to_string(),
            emoji_families: vec![
                "Apple Color Emoji".to_string(),
                "Segoe UI Emoji".to_string(),
                "Noto Color Emoji".to_string(),
            ],
            generic_families: vec![
                "DejaVu Sans".to_string(),
                "Liberation Sans".to_string(),
                "Noto Sans".to_string(),
                "Arial".to_string(),
                "Helvetica".to_string(),
                "FreeSans".to_string(),
            ],
            search_dirs: Vec::new(),
            custom_font_path: None,
            use_system_fonts: true,
        }
    }
}

impl FontConfig {
    /// Default config with `TEXTCARD_FONT_PATH` and `TEXTCARD_FONT_DIRS` applied
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = env::var("TEXTCARD_FONT_PATH") {
            if !path.trim().is_empty() {
                config.custom_font_path = Some(PathBuf::from(path));
            }
        }

        if let Some(dirs) = env::var_os("TEXTCARD_FONT_DIRS") {
            config.search_dirs.extend(env::split_paths(&dirs));
        }

        config
    }

    /// No font files at all: every glyph renders as a placeholder box
    pub fn placeholder_only() -> Self {
        Self {
            search_dirs: Vec::new(),
            custom_font_path: None,
            use_system_fonts: false,
            ..Self::default()
        }
    }
}

/// Initial values and accepted ranges for the interactive controls
#[derive(Debug, Clone, PartialEq)]
pub struct ControlsConfig {
    pub font_size: u32,
    pub font_size_range: RangeInclusive<u32>,
    pub format: OutputFormat,
    pub background_color: String,
    pub frame_enabled: bool,
    pub frame_style: FrameStyle,
    pub frame_color: String,
    pub frame_width: u32,
    pub frame_width_range: RangeInclusive<u32>,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            font_size: 32,
            font_size_range: 12..=72,
            format: OutputFormat::Png,
            background_color: "#ffffff".to_string(),
            frame_enabled: false,
            frame_style: FrameStyle::Solid,
            frame_color: "#667eea".to_string(),
            frame_width: 5,
            frame_width_range: 1..=20,
        }
    }
}

/// Master configuration combining all textcard settings
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub canvas: CanvasConfig,
    pub fonts: FontConfig,
    pub controls: ControlsConfig,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            fonts: FontConfig::from_env(),
            ..Self::default()
        }
    }
}
