//! Output format support: descriptors, encoders, and the format registry.
//!
//! Each output format is an [`Encoder`] paired with a static
//! [`FormatDescriptor`]. Native formats (PNG, JPEG, WebP, AVIF) delegate to
//! the `image` crate's codecs; BMP and ICO have hand-rolled serializers
//! because their exact byte layout matters to downstream readers.
//!
//! | Format | Encoder | Quality |
//! |---|---|---|
//! | PNG  | `image` crate | ignored (lossless) |
//! | JPEG | `image` crate | 0–100 |
//! | WebP | `image` crate (lossless) | ignored |
//! | AVIF | `image` crate (rav1e, speed 6) | 0–100 |
//! | BMP  | [`bmp`] (24-bit uncompressed) | ignored |
//! | ICO  | [`ico`] (embedded PNG frame) | ignored |
//!
//! Consumers never pick an encoder directly; they ask the
//! [`registry::FormatRegistry`] by media type.

pub mod bmp;
pub mod ico;
pub mod native;
pub mod registry;

pub use registry::FormatRegistry;

use crate::buffer::PixelBuffer;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncodeError {
    /// The underlying codec produced no data or rejected the input.
    #[error("{format} encoding failed: {reason}")]
    EncodingFailed { format: &'static str, reason: String },
}

/// What a format can do, consulted before encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    /// Whether the quality parameter changes the output. When false, quality
    /// is silently ignored.
    pub supports_quality: bool,
    /// Hard cap on dimensions, if the container has one (ICO: 256×256).
    /// Exceeding it triggers an advisory warning + automatic downscale,
    /// not a failure.
    pub max_dimensions: Option<(u32, u32)>,
    /// True when encoding delegates to the `image` crate's codec rather
    /// than a hand-rolled serializer.
    pub native: bool,
}

/// Static metadata for one output format. Immutable once registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormatDescriptor {
    /// Display label ("PNG", "JPEG").
    pub label: &'static str,
    /// Canonical file extension, without the dot.
    pub extension: &'static str,
    /// Media-type identifier used as the registry key ("image/png").
    pub media_type: &'static str,
    /// Display/preference order: lower sorts first.
    pub priority: u32,
    pub capabilities: Capabilities,
}

/// Quality setting for lossy encoding (0–100). Clamped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.min(100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    /// The editor's default export quality.
    fn default() -> Self {
        Self(92)
    }
}

/// One output format's raster-to-bytes conversion.
///
/// Encoders are stateless, read-only consumers of the pixel buffer. Expected
/// failures come back as [`EncodeError`], never as panics — the caller
/// decides whether to surface them to the user.
pub trait Encoder: Send + Sync {
    fn descriptor(&self) -> &FormatDescriptor;

    /// Encode the buffer. `quality` is only meaningful when the descriptor's
    /// `supports_quality` flag is set; implementations ignore it otherwise.
    fn encode(&self, buffer: &PixelBuffer, quality: Quality) -> Result<Vec<u8>, EncodeError>;

    /// Advisory pre-flight check. A `Some` message is a non-fatal warning
    /// (e.g. "will be downscaled"); encoding proceeds regardless.
    fn validate(&self, _buffer: &PixelBuffer) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 0);
        assert_eq!(Quality::new(100).value(), 100);
        assert_eq!(Quality::new(250).value(), 100);
    }

    #[test]
    fn quality_default_is_92() {
        assert_eq!(Quality::default().value(), 92);
    }
}
