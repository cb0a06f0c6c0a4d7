use std::path::{Path, PathBuf};

use super::event::{AppEvent, Notification};
use super::mode::AppMode;
use super::render_state::PreviewState;
use super::state::Controls;
use crate::engine::{Config, OutputFormat, Result, Rgb, TextcardError};
use crate::rendering::export::{encode, export_image, timestamp_millis};
use crate::rendering::{
    render, DirectorySink, ExportedImage, FontLibrary, ImageSink, MemorySink, RenderOutcome, Surface,
};

pub const HELP: &str = "\
Commands:
  <text>                 set the card text
  :text <text>           set the card text (may start with ':')
  :font <family>         font family (empty for default)
  :size <px>             font size
  :format png|jpeg       output format
  :bg <#hex>             background color (jpeg only)
  :frame on|off|<style>  toggle the frame or pick a style
  :frame-color <#hex>    color for the solid frame
  :frame-width <px>      frame width
  :export [dir]          render at full resolution and save
  :export --data-url     render at full resolution and print a data: URL
  :preview <file.png>    save the 1x preview
  :h, :help              this help
  :q, :quit              quit";

/// Interactive session: owns the control state and keeps the preview in sync
pub struct App {
    config: Config,
    mode: AppMode,
    controls: Controls,
    fonts: FontLibrary,
    preview: Surface,
    outcome: Option<RenderOutcome>,
    export_dir: PathBuf,
    export_pending: bool,
    notifications: Vec<Notification>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let preview = Surface::new(config.canvas.width, config.canvas.height, 1.0)?;
        let mut app = Self {
            controls: Controls::from_config(&config.controls),
            fonts: FontLibrary::new(config.fonts.clone()),
            preview,
            outcome: None,
            export_dir: PathBuf::from("."),
            export_pending: false,
            notifications: Vec::new(),
            mode: AppMode::Editing,
            config,
        };
        app.refresh_preview()?;
        Ok(app)
    }

    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn preview(&self) -> &Surface {
        &self.preview
    }

    pub fn outcome(&self) -> Option<&RenderOutcome> {
        self.outcome.as_ref()
    }

    pub fn export_enabled(&self) -> bool {
        self.controls.export_enabled() && !self.export_pending
    }

    pub fn preview_state(&self) -> PreviewState {
        PreviewState::new(self.mode, &self.controls, self.outcome.as_ref(), self.preview.pixel_size())
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Apply one event. Control changes re-render the preview immediately;
    /// failures become error notifications and leave the controls unchanged.
    pub fn handle_event(&mut self, event: AppEvent) {
        if let Err(err) = self.apply(event) {
            log::warn!("{}", err);
            self.notifications.push(Notification::Error(err.to_string()));
        }
    }

    fn apply(&mut self, event: AppEvent) -> Result<()> {
        let ranges = &self.config.controls;
        match event {
            AppEvent::SetText(text) => self.controls.text = text,
            AppEvent::SetFontFamily(family) => self.controls.font_family = family.trim().to_string(),
            AppEvent::SetFontSize(size) => {
                self.controls.font_size = size.clamp(*ranges.font_size_range.start(), *ranges.font_size_range.end());
            }
            AppEvent::SetFormat(format) => self.controls.format = format,
            AppEvent::SetBackground(color) => {
                Rgb::parse_hex(&color)?;
                self.controls.background_color = color.trim().to_string();
            }
            AppEvent::SetFrameEnabled(enabled) => self.controls.frame_enabled = enabled,
            AppEvent::SetFrameStyle(style) => {
                self.controls.frame_style = style;
                self.controls.frame_enabled = true;
            }
            AppEvent::SetFrameColor(color) => {
                Rgb::parse_hex(&color)?;
                self.controls.frame_color = color.trim().to_string();
            }
            AppEvent::SetFrameWidth(width) => {
                self.controls.frame_width =
                    width.clamp(*ranges.frame_width_range.start(), *ranges.frame_width_range.end());
            }
            AppEvent::Export(dir) => {
                let dir = dir.unwrap_or_else(|| self.export_dir.clone());
                let mut sink = DirectorySink::new(dir);
                self.export_to(&mut sink)?;
                return Ok(());
            }
            AppEvent::ExportDataUrl => {
                let mut sink = MemorySink::default();
                let image = self.export_to(&mut sink)?;
                self.notifications.push(Notification::Info(image.to_data_url()));
                return Ok(());
            }
            AppEvent::SavePreview(path) => {
                self.save_preview(&path)?;
                return Ok(());
            }
            AppEvent::Quit => {
                self.mode = AppMode::Quit;
                return Ok(());
            }
            AppEvent::Help => {
                self.notifications.push(Notification::Info(HELP.to_string()));
                return Ok(());
            }
            AppEvent::InvalidCommand(input) => {
                return Err(TextcardError::InvalidArgument(format!(
                    "unknown command '{}' (try :help)",
                    input
                )));
            }
            AppEvent::None => return Ok(()),
        }

        self.refresh_preview().map(|_| ())
    }

    /// Re-render the 1x preview from the current controls
    pub fn refresh_preview(&mut self) -> Result<&RenderOutcome> {
        let request = self.controls.snapshot()?;
        let fonts = self.fonts.chain_for(&request.font_family);
        let outcome = render(&mut self.preview, &request, fonts, &self.config.canvas)?;
        Ok(self.outcome.insert(outcome))
    }

    /// Render at export scale, encode and deliver to `sink`. Blank text is
    /// refused before anything is rendered.
    ///
    /// `export_pending` is held for the whole call and released on every
    /// path. Delivery is synchronous today, so the flag only turns away
    /// triggers that arrive while a sink is still running; a front end that
    /// hands delivery to another thread reads it through
    /// [`App::export_enabled`].
    pub fn export_to(&mut self, sink: &mut dyn ImageSink) -> Result<ExportedImage> {
        if !self.controls.export_enabled() {
            return Err(TextcardError::EmptyText);
        }
        if self.export_pending {
            return Err(TextcardError::ExportInProgress);
        }

        self.export_pending = true;
        let result = self.run_export(sink);
        self.export_pending = false;

        let (image, location) = result?;
        self.notifications.push(Notification::Success(format!(
            "Image downloaded successfully! 🎉 ({})",
            location.display()
        )));
        Ok(image)
    }

    fn run_export(&mut self, sink: &mut dyn ImageSink) -> Result<(ExportedImage, PathBuf)> {
        let request = self.controls.snapshot()?;
        let fonts = self.fonts.chain_for(&request.font_family);
        let canvas = &self.config.canvas;
        let (image, _) = export_image(&request, fonts, canvas, canvas.export_scale, timestamp_millis())?;
        let location = sink.deliver(&image)?;
        Ok((image, location))
    }

    /// Write the current preview as PNG
    pub fn save_preview(&mut self, path: &Path) -> Result<()> {
        let bytes = encode(self.preview.image(), OutputFormat::Png, self.config.canvas.jpeg_quality)?;
        std::fs::write(path, bytes)?;
        self.notifications
            .push(Notification::Info(format!("Preview saved to {}", path.display())));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::FontConfig;
    use crate::rendering::MemorySink;

    fn test_app() -> App {
        let config = Config {
            fonts: FontConfig::placeholder_only(),
            ..Config::default()
        };
        App::new(config).unwrap()
    }

    #[test]
    fn test_pending_export_blocks_second_trigger() {
        let mut app = test_app();
        app.handle_event(AppEvent::SetText("hello".to_string()));
        app.export_pending = true;

        assert!(!app.export_enabled());
        let mut sink = MemorySink::default();
        match app.export_to(&mut sink) {
            Err(TextcardError::ExportInProgress) => (),
            other => panic!("Expected ExportInProgress, got {:?}", other.map(|i| i.filename)),
        }
        assert!(sink.delivered.is_empty());
    }

    #[test]
    fn test_pending_flag_released_after_failure() {
        struct FailingSink;
        impl ImageSink for FailingSink {
            fn deliver(&mut self, _image: &ExportedImage) -> Result<PathBuf> {
                Err(TextcardError::Encode("disk full".to_string()))
            }
        }

        let mut app = test_app();
        app.handle_event(AppEvent::SetText("hello".to_string()));
        assert!(app.export_to(&mut FailingSink).is_err());
        assert!(!app.export_pending);
        assert!(app.export_enabled());
    }
}
