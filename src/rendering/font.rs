//! Font discovery, fallback chains and string metrics
//!
//! A [`FontChain`] is the ordered list of faces tried for each character:
//! the requested family, then the emoji families, then generic sans-serif
//! faces. The first face that maps a character to a real glyph draws it.
//! When no face can be loaded at all the chain still measures and draws,
//! using fixed-advance placeholder boxes, so text always shows up.
//!
//! Families are looked up by the name stored inside the font through
//! `font-kit`: configured directories first, then the platform font service.
//!
//! All sizes are CSS-style pixel sizes (the em square), not ab_glyph's
//! ascent-to-descent `PxScale`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use ab_glyph::{Font, FontVec, GlyphId, PxScale};
use font_kit::family_name::FamilyName;
use font_kit::handle::Handle;
use font_kit::properties::Properties;
use font_kit::source::{Source, SystemSource};
use font_kit::sources::fs::FsSource;
use font_kit::sources::multi::MultiSource;

use crate::engine::config::FontConfig;

/// Placeholder glyph advance, as a fraction of the font size
pub const PLACEHOLDER_ADVANCE: f32 = 0.6;
const PLACEHOLDER_ASCENT: f32 = 0.8;
const PLACEHOLDER_DESCENT: f32 = -0.2;

/// Lowercase alphanumerics only: "DejaVu Sans" and "DejaVuSans" compare equal
pub fn normalize_family(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Where families are looked up: each configured directory, then the
/// platform font service. `None` when both are switched off.
pub fn font_source(config: &FontConfig) -> Option<MultiSource> {
    let mut sources: Vec<Box<dyn Source>> = config
        .search_dirs
        .iter()
        .map(|dir| Box::new(FsSource::in_path(dir)) as Box<dyn Source>)
        .collect();

    if config.use_system_fonts {
        sources.push(Box::new(SystemSource::new()));
    }

    if sources.is_empty() {
        None
    } else {
        Some(MultiSource::from_sources(sources))
    }
}

pub fn load_font_from_path<P: AsRef<Path>>(path: P) -> Option<FontVec> {
    fs::read(path.as_ref())
        .ok()
        .and_then(|bytes| FontVec::try_from_vec(bytes).ok())
}

/// Bytes behind a font-kit handle, as an ab_glyph face
pub fn load_font_from_handle(handle: &Handle) -> Option<FontVec> {
    match handle {
        Handle::Path { path, font_index } => fs::read(path)
            .ok()
            .and_then(|bytes| FontVec::try_from_vec_and_index(bytes, *font_index).ok()),
        Handle::Memory { bytes, font_index } => {
            FontVec::try_from_vec_and_index(bytes.to_vec(), *font_index).ok()
        }
    }
}

/// Best regular face for `family`. Named families must match the family
/// name stored in the font; matchers that substitute a different family
/// for an unknown name are not accepted.
fn select_face(source: &dyn Source, family: FamilyName) -> Option<LoadedFace> {
    let handle = source
        .select_best_match(std::slice::from_ref(&family), &Properties::new())
        .ok()?;
    let name = handle.load().ok()?.family_name();

    if let FamilyName::Title(wanted) = &family {
        if normalize_family(&name) != normalize_family(wanted) {
            log::debug!("'{}' matched '{}' instead, skipping", wanted, name);
            return None;
        }
    }

    match load_font_from_handle(&handle) {
        Some(font) => Some(LoadedFace { name, font }),
        None => {
            log::warn!("could not load font data for '{}'", name);
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub ascent: f32,
    /// Negative: distance below the baseline
    pub descent: f32,
    pub font_size: f32,
}

impl FontMetrics {
    /// Baseline offset that puts the middle of the em box at `y`
    pub fn middle_to_baseline(&self) -> f32 {
        (self.ascent + self.descent) / 2.0
    }
}

/// One character placed along a line, in logical units from the line start
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPlacement {
    pub ch: char,
    /// Index into the chain's faces; `None` means placeholder glyph
    pub face: Option<usize>,
    pub id: GlyphId,
    pub x: f32,
    pub advance: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlyphRun {
    pub glyphs: Vec<GlyphPlacement>,
    pub width: f32,
}

struct LoadedFace {
    name: String,
    font: FontVec,
}

impl LoadedFace {
    /// Unscaled font units to CSS pixels at `size`
    fn units_to_px(&self, size: f32) -> f32 {
        let units_per_em = self.font.units_per_em().unwrap_or_else(|| self.font.height_unscaled());
        size / units_per_em
    }
}

/// Same family twice (custom file and lookup, or a generic resolving to the
/// requested family) keeps the first
fn push_unique(faces: &mut Vec<LoadedFace>, face: LoadedFace) {
    let key = normalize_family(&face.name);
    if !faces.iter().any(|known| normalize_family(&known.name) == key) {
        faces.push(face);
    }
}

/// Ordered fallback faces for one requested family
pub struct FontChain {
    faces: Vec<LoadedFace>,
}

impl FontChain {
    /// A chain with no faces: placeholder glyphs only
    pub fn placeholder() -> Self {
        Self { faces: Vec::new() }
    }

    /// Resolve `family` and the configured fallbacks against `source`
    pub fn resolve(family: &str, config: &FontConfig, source: Option<&dyn Source>) -> Self {
        let requested = if family.trim().is_empty() {
            config.default_family.as_str()
        } else {
            family
        };

        let mut faces: Vec<LoadedFace> = Vec::new();

        if let Some(custom) = &config.custom_font_path {
            match load_font_from_path(custom) {
                Some(font) => push_unique(
                    &mut faces,
                    LoadedFace {
                        name: custom.display().to_string(),
                        font,
                    },
                ),
                None => log::warn!("could not load font file {}", custom.display()),
            }
        }

        if let Some(source) = source {
            let named = std::iter::once(requested)
                .chain(config.emoji_families.iter().map(String::as_str))
                .chain(config.generic_families.iter().map(String::as_str));

            for name in named {
                match select_face(source, FamilyName::Title(name.to_string())) {
                    Some(face) => push_unique(&mut faces, face),
                    None if name == requested => {
                        log::warn!("font family '{}' not found, using fallbacks", requested);
                    }
                    None => {}
                }
            }

            if let Some(face) = select_face(source, FamilyName::SansSerif) {
                push_unique(&mut faces, face);
            }
        }

        if faces.is_empty() {
            log::warn!("no usable fonts for '{}', drawing placeholder glyphs", requested);
        }

        Self { faces }
    }

    pub fn is_placeholder_only(&self) -> bool {
        self.faces.is_empty()
    }

    pub(crate) fn font(&self, index: usize) -> Option<&FontVec> {
        self.faces.get(index).map(|face| &face.font)
    }

    /// ab_glyph scale that renders face `index` with an em of `size` pixels
    pub(crate) fn px_scale(&self, index: usize, size: f32) -> Option<PxScale> {
        self.faces
            .get(index)
            .map(|face| PxScale::from(face.font.height_unscaled() * face.units_to_px(size)))
    }

    fn face_for(&self, ch: char) -> Option<usize> {
        self.faces.iter().position(|face| face.font.glyph_id(ch).0 != 0)
    }

    /// Place every character of `text` at `size`
    pub fn layout_run(&self, text: &str, size: f32) -> GlyphRun {
        let mut glyphs = Vec::with_capacity(text.len());
        let mut x = 0.0;
        let mut previous: Option<(usize, GlyphId)> = None;

        for ch in text.chars() {
            let placement = match self.face_for(ch) {
                Some(index) => {
                    let face = &self.faces[index];
                    let id = face.font.glyph_id(ch);
                    let factor = face.units_to_px(size);
                    if let Some((prev_index, prev_id)) = previous {
                        if prev_index == index {
                            x += face.font.kern_unscaled(prev_id, id) * factor;
                        }
                    }
                    previous = Some((index, id));
                    GlyphPlacement {
                        ch,
                        face: Some(index),
                        id,
                        x,
                        advance: face.font.h_advance_unscaled(id) * factor,
                    }
                }
                None => {
                    previous = None;
                    GlyphPlacement {
                        ch,
                        face: None,
                        id: GlyphId(0),
                        x,
                        advance: size * PLACEHOLDER_ADVANCE,
                    }
                }
            };
            x += placement.advance;
            glyphs.push(placement);
        }

        GlyphRun { glyphs, width: x }
    }

    /// Advance width of `text` in logical units
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        self.layout_run(text, size).width
    }

    /// Vertical metrics of the primary face
    pub fn metrics(&self, size: f32) -> FontMetrics {
        match self.faces.first() {
            Some(face) => {
                let factor = face.units_to_px(size);
                FontMetrics {
                    ascent: face.font.ascent_unscaled() * factor,
                    descent: face.font.descent_unscaled() * factor,
                    font_size: size,
                }
            }
            None => FontMetrics {
                ascent: size * PLACEHOLDER_ASCENT,
                descent: size * PLACEHOLDER_DESCENT,
                font_size: size,
            },
        }
    }
}

/// Font chains cached by normalized family name
pub struct FontLibrary {
    config: FontConfig,
    source: Option<MultiSource>,
    chains: HashMap<String, FontChain>,
}

impl FontLibrary {
    pub fn new(config: FontConfig) -> Self {
        Self {
            source: font_source(&config),
            config,
            chains: HashMap::new(),
        }
    }

    pub fn chain_for(&mut self, family: &str) -> &FontChain {
        let key = normalize_family(family);
        let config = &self.config;
        let source = self.source.as_ref().map(|source| source as &dyn Source);
        self.chains
            .entry(key)
            .or_insert_with(|| FontChain::resolve(family, config, source))
    }
}
