//! RGBA color with hex parsing for theme definition files.

use serde::Deserialize;
use thiserror::Error;

/// Failure to parse a `#RRGGBB` / `#RRGGBBAA` color string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid color literal {literal:?}: expected #RRGGBB or #RRGGBBAA")]
pub struct ColorParseError {
    /// The rejected input.
    pub literal: String,
}

/// RGBA color, components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
    /// Alpha component.
    pub a: f32,
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Solid black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Creates a color from components in [0, 1].
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from components in [0, 1].
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Creates an opaque color from 8-bit channels.
    #[must_use]
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            1.0,
        )
    }

    /// Returns this color with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Linearly interpolates toward another color.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::rgba(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Returns a uniformly darkened copy, `amount` in [0, 1].
    #[must_use]
    pub fn darken(self, amount: f32) -> Self {
        self.lerp(Self::BLACK.with_alpha(self.a), amount)
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA`.
    pub fn parse(literal: &str) -> Result<Self, ColorParseError> {
        let err = || ColorParseError {
            literal: literal.to_owned(),
        };

        let hex = literal.strip_prefix('#').ok_or_else(err)?;
        // ASCII guard keeps the fixed-offset slices below on char
        // boundaries for any input.
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return Err(err());
        }

        let channel = |i: usize| -> Result<f32, ColorParseError> {
            let byte = u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err())?;
            Ok(f32::from(byte) / 255.0)
        };

        let r = channel(0)?;
        let g = channel(2)?;
        let b = channel(4)?;
        let a = if hex.len() == 8 { channel(6)? } else { 1.0 };

        Ok(Self::rgba(r, g, b, a))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rgb() {
        let c = Color::parse("#ff0000").unwrap();
        assert!((c.r - 1.0).abs() < 0.01);
        assert!((c.g - 0.0).abs() < 0.01);
        assert!((c.b - 0.0).abs() < 0.01);
        assert!((c.a - 1.0).abs() < 0.01);
    }

    #[test]
    fn parse_rgba() {
        let c = Color::parse("#00ff0080").unwrap();
        assert!((c.g - 1.0).abs() < 0.01);
        assert!((c.a - 128.0 / 255.0).abs() < 0.01);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Color::parse("ff0000").is_err());
        assert!(Color::parse("#ff00").is_err());
        assert!(Color::parse("#zzzzzz").is_err());
    }

    #[test]
    fn parse_rejects_multibyte_literal() {
        // Six bytes but not six ASCII digits; must reject, not panic.
        assert!(Color::parse("#aéaaa").is_err());
        assert!(Color::parse("#ααββγγ").is_err());

        let err = Color::try_from("#aéaaa".to_owned()).unwrap_err();
        assert_eq!(err.literal, "#aéaaa");
    }

    #[test]
    fn lerp_midpoint() {
        let mid = Color::BLACK.lerp(Color::WHITE, 0.5);
        assert!((mid.r - 0.5).abs() < 0.01);
        assert!((mid.g - 0.5).abs() < 0.01);
        assert!((mid.b - 0.5).abs() < 0.01);
    }
}
