//! Greedy word-wrap and vertical placement of the wrapped block
//!
//! Widths come from a caller-supplied measure function so the same code
//! serves real font metrics and the fixed-advance metrics used in tests.

use std::borrow::Cow;

use unicode_segmentation::UnicodeSegmentation;

/// Padding around the text block when no frame is drawn
pub const UNFRAMED_PADDING: f32 = 40.0;

/// Extra padding added on top of both frame strokes
pub const FRAMED_EXTRA_PADDING: f32 = 20.0;

/// Ordered lines produced by [`wrap`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineBlock {
    lines: Vec<String>,
}

impl LineBlock {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Lines re-joined with single spaces
    pub fn joined(&self) -> String {
        self.lines.join(" ")
    }
}

/// Greedy single-pass wrap.
///
/// A token is appended while `measure(current + " " + token) < max_width`.
/// The first token of a line is always kept whole, so a single token wider
/// than `max_width` overflows instead of being split.
pub fn wrap<F>(text: &str, measure: F, max_width: f32) -> LineBlock
where
    F: Fn(&str) -> f32,
{
    let mut tokens = text.split_whitespace();
    let mut lines = Vec::new();

    let Some(first) = tokens.next() else {
        return LineBlock::default();
    };
    let mut current = first.to_string();

    for token in tokens {
        let candidate = format!("{} {}", current, token);
        if measure(&candidate) < max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, token.to_string()));
        }
    }
    lines.push(current);

    LineBlock { lines }
}

/// Horizontal padding reserved around the text block
pub fn frame_padding(frame_width: Option<f32>) -> f32 {
    match frame_width {
        Some(width) => width * 2.0 + FRAMED_EXTRA_PADDING,
        None => UNFRAMED_PADDING,
    }
}

/// Width available to each wrapped line
pub fn content_width(surface_width: f32, frame_width: Option<f32>) -> f32 {
    surface_width - frame_padding(frame_width)
}

/// Cut `text` to at most `max_graphemes` grapheme clusters
pub fn truncate_graphemes(text: &str, max_graphemes: usize) -> &str {
    match text.grapheme_indices(true).nth(max_graphemes) {
        Some((byte_offset, _)) => &text[..byte_offset],
        None => text,
    }
}

/// Text actually laid out: the placeholder when blank, otherwise the
/// length-capped input
pub fn display_text<'a>(text: &'a str, placeholder: &'a str, max_graphemes: usize) -> Cow<'a, str> {
    if text.trim().is_empty() {
        Cow::Borrowed(placeholder)
    } else {
        let capped = truncate_graphemes(text, max_graphemes);
        if capped.len() < text.len() {
            log::debug!(
                "text truncated to {} graphemes ({} bytes dropped)",
                max_graphemes,
                text.len() - capped.len()
            );
        }
        Cow::Borrowed(capped)
    }
}

/// Vertical metrics of a centered block of lines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalLayout {
    pub line_height: f32,
    pub total_height: f32,
    /// Middle of the first line
    pub start_y: f32,
}

impl VerticalLayout {
    pub fn new(line_count: usize, font_size: f32, line_height_factor: f32, surface_height: f32) -> Self {
        let line_height = font_size * line_height_factor;
        let total_height = line_count as f32 * line_height;
        let start_y = (surface_height - total_height) / 2.0 + line_height / 2.0;
        Self {
            line_height,
            total_height,
            start_y,
        }
    }

    /// Middle of line `index`
    pub fn line_y(&self, index: usize) -> f32 {
        self.start_y + index as f32 * self.line_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 10 units per char, spaces included
    fn fixed(s: &str) -> f32 {
        s.chars().count() as f32 * 10.0
    }

    #[test]
    fn test_single_token_always_one_line() {
        let block = wrap("Supercalifragilistic", fixed, 50.0);
        assert_eq!(block.lines(), ["Supercalifragilistic"]);
    }

    #[test]
    fn test_wrap_breaks_when_not_strictly_less() {
        // "ab cd" measures 50: not < 50, so it breaks
        let block = wrap("ab cd", fixed, 50.0);
        assert_eq!(block.lines(), ["ab", "cd"]);

        let block = wrap("ab cd", fixed, 50.1);
        assert_eq!(block.lines(), ["ab cd"]);
    }

    #[test]
    fn test_wrap_greedy_fill() {
        let block = wrap("one two three four five", fixed, 110.0);
        assert_eq!(block.lines(), ["one two", "three four", "five"]);
    }

    #[test]
    fn test_overlong_token_in_the_middle() {
        let block = wrap("a enormousword b", fixed, 60.0);
        assert_eq!(block.lines(), ["a", "enormousword", "b"]);
    }

    #[test]
    fn test_consecutive_spaces_do_not_create_empty_tokens() {
        let block = wrap("  hello    world  ", fixed, 1000.0);
        assert_eq!(block.lines(), ["hello world"]);
    }

    #[test]
    fn test_blank_input_yields_no_lines() {
        assert!(wrap("", fixed, 100.0).is_empty());
        assert!(wrap("    ", fixed, 100.0).is_empty());
    }

    #[test]
    fn test_frame_padding() {
        assert_eq!(frame_padding(None), 40.0);
        assert_eq!(frame_padding(Some(5.0)), 30.0);
        assert_eq!(content_width(400.0, None), 360.0);
        assert_eq!(content_width(400.0, Some(10.0)), 360.0);
        assert_eq!(content_width(400.0, Some(20.0)), 340.0);
    }

    #[test]
    fn test_truncate_counts_graphemes() {
        assert_eq!(truncate_graphemes("abcdef", 3), "abc");
        assert_eq!(truncate_graphemes("abc", 10), "abc");
        // Family emoji is a single grapheme built from several scalars
        let text = "👨‍👩‍👧x";
        assert_eq!(truncate_graphemes(text, 1), "👨‍👩‍👧");
    }

    #[test]
    fn test_display_text_placeholder() {
        assert_eq!(display_text("", "hint", 100), "hint");
        assert_eq!(display_text("   ", "hint", 100), "hint");
        assert_eq!(display_text("hey", "hint", 100), "hey");
        assert_eq!(display_text("abcdef", "hint", 4), "abcd");
    }

    #[test]
    fn test_single_line_is_vertically_centered() {
        let layout = VerticalLayout::new(1, 32.0, 1.2, 200.0);
        assert!((layout.line_height - 38.4).abs() < 1e-4);
        assert!((layout.start_y - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_block_is_symmetric_about_center() {
        for count in 1..6 {
            let layout = VerticalLayout::new(count, 24.0, 1.2, 200.0);
            let first = layout.line_y(0);
            let last = layout.line_y(count - 1);
            assert!(((first + last) / 2.0 - 100.0).abs() < 1e-3);
        }
    }
}
