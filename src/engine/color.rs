//! Hex color parsing and the contrast-ink heuristic

use std::fmt;
use std::str::FromStr;

use super::error::{Result, TextcardError};

/// Opaque 8-bit sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or the `#RGB` shorthand (leading `#` optional)
    pub fn parse_hex(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TextcardError::InvalidColor(input.to_string()));
        }

        let channel = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| TextcardError::InvalidColor(input.to_string()))
        };

        match digits.len() {
            6 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                let expand = |i: usize| {
                    let c = &digits[i..i + 1];
                    channel(&format!("{c}{c}"))
                };
                Ok(Self::new(expand(0)?, expand(1)?, expand(2)?))
            }
            _ => Err(TextcardError::InvalidColor(input.to_string())),
        }
    }

    /// Perceived brightness on a 0-255 scale (ITU-R 601 weights)
    pub fn brightness(&self) -> f32 {
        (self.r as f32 * 299.0 + self.g as f32 * 587.0 + self.b as f32 * 114.0) / 1000.0
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn to_rgba(&self, alpha: u8) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, alpha])
    }
}

impl FromStr for Rgb {
    type Err = TextcardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Black on light backgrounds, white on dark ones. Threshold is fixed at 128.
pub fn contrast_color(background: Rgb) -> Rgb {
    if background.brightness() > 128.0 {
        Rgb::BLACK
    } else {
        Rgb::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_six_digit_hex() {
        assert_eq!(Rgb::parse_hex("#667eea").unwrap(), Rgb::new(0x66, 0x7e, 0xea));
        assert_eq!(Rgb::parse_hex("FFD700").unwrap(), Rgb::new(255, 215, 0));
    }

    #[test]
    fn test_parse_shorthand_expands() {
        assert_eq!(Rgb::parse_hex("#0af").unwrap(), Rgb::new(0x00, 0xaa, 0xff));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "#", "#12", "#12345", "#1234567", "#gggggg", "red", "#12 456"] {
            match Rgb::parse_hex(bad) {
                Err(TextcardError::InvalidColor(_)) => (),
                other => panic!("Expected InvalidColor for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_parse_rejects_multibyte_without_panicking() {
        assert!(Rgb::parse_hex("#ééé").is_err());
    }

    #[test]
    fn test_contrast_extremes() {
        assert_eq!(contrast_color(Rgb::BLACK), Rgb::WHITE);
        assert_eq!(contrast_color(Rgb::WHITE), Rgb::BLACK);
    }

    #[test]
    fn test_contrast_boundary_is_strict() {
        // #808080 has brightness exactly 128, which is not > 128
        let gray = Rgb::parse_hex("#808080").unwrap();
        assert_eq!(gray.brightness(), 128.0);
        assert_eq!(contrast_color(gray), Rgb::WHITE);

        let lighter = Rgb::parse_hex("#818181").unwrap();
        assert_eq!(contrast_color(lighter), Rgb::BLACK);
    }

    #[test]
    fn test_to_hex_uppercase() {
        assert_eq!(Rgb::new(0x8b, 0x45, 0x13).to_hex(), "#8B4513");
    }
}
