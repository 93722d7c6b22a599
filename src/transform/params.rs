//! Parameter types for the transform operations.
//!
//! These structs describe *what* to do; the pixel work lives in
//! [`ops`](super::ops). They are plain data so the CLI, tests, and any
//! future host can construct them directly.

use std::str::FromStr;
use thiserror::Error;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub [u8; 3]);

#[derive(Error, Debug, PartialEq, Eq)]
#[error("expected a hex color like #rrggbb, got {0:?}")]
pub struct ParseColorError(pub String);

impl Rgb {
    pub const BLACK: Rgb = Rgb([0, 0, 0]);
    pub const WHITE: Rgb = Rgb([255, 255, 255]);

    pub fn channels(self) -> [u8; 3] {
        self.0
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse `#rrggbb` (leading `#` optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseColorError(s.to_string()));
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        Ok(Rgb([channel(0), channel(2), channel(4)]))
    }
}

/// Where the vignette gradient is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Centered gradient covering the full canvas.
    #[default]
    Radial,
    Left,
    Right,
    Top,
    Bottom,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("expected radial, left, right, top or bottom, got {0:?}")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "radial" => Ok(Self::Radial),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// Vignette settings.
///
/// `intensity` is conventionally 0–100 but values above 100 are accepted and
/// deepen the effect via extra compositing passes (see
/// [`vignette_passes`](super::vignette_passes)). `spread` (0–100) controls
/// how far the gradient reaches inward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VignetteParams {
    pub direction: Direction,
    pub color: Rgb,
    pub intensity: u32,
    pub spread: u32,
}

impl Default for VignetteParams {
    fn default() -> Self {
        Self { direction: Direction::Radial, color: Rgb::BLACK, intensity: 60, spread: 50 }
    }
}

/// Border expansion, in pixels per edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Padding {
    /// The same padding on all four edges.
    pub fn uniform(px: u32) -> Self {
        Self { top: px, right: px, bottom: px, left: px }
    }
}

/// Crop rectangle in source coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}
