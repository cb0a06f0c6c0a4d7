use std::path::PathBuf;

use crate::engine::{FrameStyle, OutputFormat};

/// Application events: one control change or action each
#[derive(Debug, PartialEq, Clone)]
pub enum AppEvent {
    SetText(String),
    SetFontFamily(String),
    SetFontSize(u32),
    SetFormat(OutputFormat),
    SetBackground(String),
    SetFrameEnabled(bool),
    SetFrameStyle(FrameStyle),
    SetFrameColor(String),
    SetFrameWidth(u32),
    /// Export into the given directory, or the session default
    Export(Option<PathBuf>),
    /// Export in memory and report it as a `data:` URL
    ExportDataUrl,
    SavePreview(PathBuf),
    Quit,
    Help,
    InvalidCommand(String),
    None,
}

/// Transient user-facing messages raised by the session
#[derive(Debug, PartialEq, Clone)]
pub enum Notification {
    Success(String),
    Info(String),
    Error(String),
}

impl Notification {
    pub fn message(&self) -> &str {
        match self {
            Notification::Success(msg) | Notification::Info(msg) | Notification::Error(msg) => msg,
        }
    }
}
