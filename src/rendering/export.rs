//! Export: supersampled render, encoding, file naming and delivery
//!
//! Delivery goes through an [`ImageSink`]. The file sink writes into a
//! temporary sibling first and renames it into place, and the temporary file
//! is removed on every path that does not complete.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};

use super::composer::{render_image, RenderOutcome};
use super::font::FontChain;
use crate::engine::config::CanvasConfig;
use crate::engine::{OutputFormat, RenderRequest, Result, TextcardError};

/// An encoded image ready to hand to the user
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedImage {
    pub bytes: Vec<u8>,
    pub format: OutputFormat,
    pub filename: String,
    pub width: u32,
    pub height: u32,
}

impl ExportedImage {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// `data:` URL carrying the encoded bytes
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type(), STANDARD.encode(&self.bytes))
    }
}

/// Encode `image` in `format`; JPEG drops alpha and uses `jpeg_quality`
pub fn encode(image: &RgbaImage, format: OutputFormat, jpeg_quality: u8) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let (width, height) = image.dimensions();

    match format {
        OutputFormat::Png => {
            PngEncoder::new(&mut bytes).write_image(image.as_raw(), width, height, ExtendedColorType::Rgba8)?;
        }
        OutputFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            JpegEncoder::new_with_quality(&mut bytes, jpeg_quality.clamp(1, 100)).write_image(
                rgb.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )?;
        }
    }

    Ok(bytes)
}

/// Keep ASCII word characters, whitespace and hyphens; cut to `max_len`
/// characters; fall back to `fallback` when nothing survives
pub fn sanitize_file_stem(text: &str, max_len: usize, fallback: &str) -> String {
    let stem: String = text
        .chars()
        .filter(|&c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c.is_whitespace())
        .take(max_len)
        .collect();

    if stem.is_empty() {
        fallback.to_string()
    } else {
        stem
    }
}

pub fn export_filename(text: &str, format: OutputFormat, timestamp_ms: u128, canvas: &CanvasConfig) -> String {
    let stem = sanitize_file_stem(text, canvas.file_stem_len, &canvas.fallback_file_stem);
    format!("{}_{}.{}", stem, timestamp_ms, format.extension())
}

/// Milliseconds since the Unix epoch, used as the filename time token
pub fn timestamp_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or(0)
}

/// Render `request` at `scale` and encode it. Blank text is refused before
/// anything is rendered.
pub fn export_image(
    request: &RenderRequest,
    fonts: &FontChain,
    canvas: &CanvasConfig,
    scale: f32,
    timestamp_ms: u128,
) -> Result<(ExportedImage, RenderOutcome)> {
    if !request.is_exportable() {
        return Err(TextcardError::EmptyText);
    }

    let (image, outcome) = render_image(request, fonts, canvas, scale)?;
    let (width, height) = image.dimensions();
    let bytes = encode(&image, request.format, canvas.jpeg_quality)?;

    let exported = ExportedImage {
        bytes,
        format: request.format,
        filename: export_filename(&request.text, request.format, timestamp_ms, canvas),
        width,
        height,
    };

    log::info!(
        "exported {} ({}x{}, {} bytes)",
        exported.filename,
        width,
        height,
        exported.bytes.len()
    );

    Ok((exported, outcome))
}

/// Destination for exported images
pub trait ImageSink {
    /// Hand over `image`; returns where it ended up
    fn deliver(&mut self, image: &ExportedImage) -> Result<PathBuf>;
}

/// Writes exports into a directory
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ImageSink for DirectorySink {
    fn deliver(&mut self, image: &ExportedImage) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let target = self.dir.join(&image.filename);

        let mut temp = TempFile::create(self.dir.join(format!(".{}.part", image.filename)))?;
        temp.write_all(&image.bytes)?;
        temp.persist(&target)?;

        Ok(target)
    }
}

/// Keeps exports in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pub delivered: Vec<ExportedImage>,
}

impl ImageSink for MemorySink {
    fn deliver(&mut self, image: &ExportedImage) -> Result<PathBuf> {
        self.delivered.push(image.clone());
        Ok(PathBuf::from(&image.filename))
    }
}

/// Temporary file removed on drop unless persisted
struct TempFile {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    persisted: bool,
}

impl TempFile {
    fn create(path: PathBuf) -> Result<Self> {
        let writer = BufWriter::new(File::create(&path)?);
        Ok(Self {
            path,
            writer: Some(writer),
            persisted: false,
        })
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer.write_all(bytes)?;
        }
        Ok(())
    }

    /// Flush, close and move into place
    fn persist(mut self, target: &Path) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&self.path, target)?;
        self.persisted = true;
        Ok(())
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        // Close before removing
        self.writer.take();
        if !self.persisted {
            if let Err(err) = fs::remove_file(&self.path) {
                log::warn!("could not remove {}: {}", self.path.display(), err);
            }
        }
    }
}
