use std::path::PathBuf;

use crate::app::AppEvent;
use crate::engine::{FrameStyle, OutputFormat};

/// Commands that can be parsed from REPL input
///
/// These commands map to AppEvent for handling in App core.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    /// Replace the card text
    SetText(String),

    /// Font family; empty selects the default
    Font(String),

    Size(u32),
    Format(OutputFormat),
    Background(String),

    /// `:frame on` / `:frame off`
    FrameToggle(bool),

    /// `:frame <style>`, which also turns the frame on
    FrameStyle(FrameStyle),

    FrameColor(String),
    FrameWidth(u32),

    /// Export, optionally into a specific directory
    Export(Option<PathBuf>),

    /// `:export --data-url`
    ExportDataUrl,

    /// Save the 1x preview as PNG
    Preview(PathBuf),

    Quit,
    Help,

    /// Blank line: nothing to do
    Empty,

    /// Unknown/invalid command
    Unknown(String),
}

/// Convert a parsed REPL command into an AppEvent
///
/// This is the translation layer between REPL input and App core.
pub fn command_to_app_event(command: ReplCommand) -> AppEvent {
    match command {
        ReplCommand::SetText(text) => AppEvent::SetText(text),
        ReplCommand::Font(family) => AppEvent::SetFontFamily(family),
        ReplCommand::Size(size) => AppEvent::SetFontSize(size),
        ReplCommand::Format(format) => AppEvent::SetFormat(format),
        ReplCommand::Background(color) => AppEvent::SetBackground(color),
        ReplCommand::FrameToggle(enabled) => AppEvent::SetFrameEnabled(enabled),
        ReplCommand::FrameStyle(style) => AppEvent::SetFrameStyle(style),
        ReplCommand::FrameColor(color) => AppEvent::SetFrameColor(color),
        ReplCommand::FrameWidth(width) => AppEvent::SetFrameWidth(width),
        ReplCommand::Export(dir) => AppEvent::Export(dir),
        ReplCommand::ExportDataUrl => AppEvent::ExportDataUrl,
        ReplCommand::Preview(path) => AppEvent::SavePreview(path),
        ReplCommand::Quit => AppEvent::Quit,
        ReplCommand::Help => AppEvent::Help,
        ReplCommand::Empty => AppEvent::None,
        ReplCommand::Unknown(input) => AppEvent::InvalidCommand(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_to_app_event_quit() {
        assert_eq!(command_to_app_event(ReplCommand::Quit), AppEvent::Quit);
    }

    #[test]
    fn test_command_to_app_event_text() {
        let event = command_to_app_event(ReplCommand::SetText("Olá".to_string()));
        assert_eq!(event, AppEvent::SetText("Olá".to_string()));
    }

    #[test]
    fn test_command_to_app_event_frame() {
        assert_eq!(
            command_to_app_event(ReplCommand::FrameStyle(FrameStyle::Neon)),
            AppEvent::SetFrameStyle(FrameStyle::Neon)
        );
        assert_eq!(
            command_to_app_event(ReplCommand::FrameToggle(false)),
            AppEvent::SetFrameEnabled(false)
        );
    }

    #[test]
    fn test_command_to_app_event_export_default_dir() {
        assert_eq!(command_to_app_event(ReplCommand::Export(None)), AppEvent::Export(None));
    }

    #[test]
    fn test_command_to_app_event_data_url() {
        assert_eq!(command_to_app_event(ReplCommand::ExportDataUrl), AppEvent::ExportDataUrl);
    }

    #[test]
    fn test_command_to_app_event_empty_is_noop() {
        assert_eq!(command_to_app_event(ReplCommand::Empty), AppEvent::None);
    }

    #[test]
    fn test_command_to_app_event_unknown() {
        let event = command_to_app_event(ReplCommand::Unknown(":nope".to_string()));
        assert!(matches!(event, AppEvent::InvalidCommand(_)));
    }
}
