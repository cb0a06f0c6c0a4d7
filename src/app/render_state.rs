use crate::app::mode::AppMode;
use crate::app::state::Controls;
use crate::engine::{FrameStyle, OutputFormat, Rgb};
use crate::rendering::RenderOutcome;

/// Everything a front end needs to mirror the session: display labels,
/// which control groups are visible, and what the preview laid out
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewState {
    pub mode: AppMode,
    pub lines: Vec<String>,
    pub ink: Option<Rgb>,
    pub pixel_size: (u32, u32),
    pub export_enabled: bool,
    pub font_size_label: String,
    pub frame_width_label: String,
    pub background_label: String,
    pub frame_color_label: String,
    /// Background only matters for JPEG
    pub show_background_picker: bool,
    pub show_frame_options: bool,
    /// Custom color only applies to the solid style
    pub show_frame_color_picker: bool,
}

impl PreviewState {
    pub fn new(mode: AppMode, controls: &Controls, outcome: Option<&RenderOutcome>, pixel_size: (u32, u32)) -> Self {
        Self {
            mode,
            lines: outcome
                .map(|o| o.lines.iter().map(str::to_string).collect())
                .unwrap_or_default(),
            ink: outcome.map(|o| o.ink),
            pixel_size,
            export_enabled: controls.export_enabled(),
            font_size_label: format!("{}px", controls.font_size),
            frame_width_label: format!("{}px", controls.frame_width),
            background_label: controls.background_color.to_uppercase(),
            frame_color_label: controls.frame_color.to_uppercase(),
            show_background_picker: controls.format == OutputFormat::Jpeg,
            show_frame_options: controls.frame_enabled,
            show_frame_color_picker: controls.frame_style == FrameStyle::Solid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::ControlsConfig;

    #[test]
    fn test_labels_follow_controls() {
        let mut controls = Controls::from_config(&ControlsConfig::default());
        controls.font_size = 48;
        controls.frame_width = 7;
        controls.background_color = "#a1b2c3".to_string();
        let state = PreviewState::new(AppMode::Editing, &controls, None, (400, 200));

        assert_eq!(state.font_size_label, "48px");
        assert_eq!(state.frame_width_label, "7px");
        assert_eq!(state.background_label, "#A1B2C3");
        assert!(state.lines.is_empty());
        assert!(state.ink.is_none());
    }

    #[test]
    fn test_visibility_flags() {
        let mut controls = Controls::from_config(&ControlsConfig::default());
        let state = PreviewState::new(AppMode::Editing, &controls, None, (400, 200));
        assert!(!state.show_background_picker);
        assert!(!state.show_frame_options);
        assert!(state.show_frame_color_picker);

        controls.format = OutputFormat::Jpeg;
        controls.frame_enabled = true;
        controls.frame_style = FrameStyle::Ocean;
        let state = PreviewState::new(AppMode::Editing, &controls, None, (400, 200));
        assert!(state.show_background_picker);
        assert!(state.show_frame_options);
        assert!(!state.show_frame_color_picker);
    }
}
