//! Native encoders — formats the `image` crate can serialize itself.
//!
//! These are thin adapters: descriptor + one codec invocation. The codec
//! choices match the rest of the crate (rav1e at speed 6 for AVIF, lossless
//! WebP — the only mode the pure-Rust encoder offers).

use super::{Capabilities, EncodeError, Encoder, FormatDescriptor, Quality};
use crate::buffer::PixelBuffer;
use image::codecs::avif::AvifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder};

fn codec_error(format: &'static str, e: impl std::fmt::Display) -> EncodeError {
    EncodeError::EncodingFailed { format, reason: e.to_string() }
}

/// PNG — lossless, the default export format.
pub struct PngFormat;

pub(crate) const PNG: FormatDescriptor = FormatDescriptor {
    label: "PNG",
    extension: "png",
    media_type: "image/png",
    priority: 1,
    capabilities: Capabilities { supports_quality: false, max_dimensions: None, native: true },
};

impl Encoder for PngFormat {
    fn descriptor(&self) -> &FormatDescriptor {
        &PNG
    }

    fn encode(&self, buffer: &PixelBuffer, _quality: Quality) -> Result<Vec<u8>, EncodeError> {
        let mut out = Vec::new();
        PngEncoder::new(&mut out)
            .write_image(
                buffer.as_bytes(),
                buffer.width(),
                buffer.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(|e| codec_error("PNG", e))?;
        Ok(out)
    }
}

/// JPEG — lossy. Alpha is dropped before encoding (JPEG has no alpha plane).
pub struct JpegFormat;

pub(crate) const JPEG: FormatDescriptor = FormatDescriptor {
    label: "JPEG",
    extension: "jpg",
    media_type: "image/jpeg",
    priority: 2,
    capabilities: Capabilities { supports_quality: true, max_dimensions: None, native: true },
};

impl Encoder for JpegFormat {
    fn descriptor(&self) -> &FormatDescriptor {
        &JPEG
    }

    fn encode(&self, buffer: &PixelBuffer, quality: Quality) -> Result<Vec<u8>, EncodeError> {
        let rgb: Vec<u8> = buffer
            .as_bytes()
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();

        let mut out = Vec::new();
        // JpegEncoder rejects quality 0; floor at 1.
        JpegEncoder::new_with_quality(&mut out, quality.value().max(1) as u8)
            .write_image(&rgb, buffer.width(), buffer.height(), ExtendedColorType::Rgb8)
            .map_err(|e| codec_error("JPEG", e))?;
        Ok(out)
    }
}

/// WebP — the `image` crate's pure-Rust encoder is lossless-only, so quality
/// is not meaningful here and the descriptor says so.
pub struct WebpFormat;

pub(crate) const WEBP: FormatDescriptor = FormatDescriptor {
    label: "WebP",
    extension: "webp",
    media_type: "image/webp",
    priority: 3,
    capabilities: Capabilities { supports_quality: false, max_dimensions: None, native: true },
};

impl Encoder for WebpFormat {
    fn descriptor(&self) -> &FormatDescriptor {
        &WEBP
    }

    fn encode(&self, buffer: &PixelBuffer, _quality: Quality) -> Result<Vec<u8>, EncodeError> {
        let mut out = Vec::new();
        WebPEncoder::new_lossless(&mut out)
            .write_image(
                buffer.as_bytes(),
                buffer.width(),
                buffer.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(|e| codec_error("WebP", e))?;
        Ok(out)
    }
}

/// AVIF — rav1e at speed 6, the tradeoff between encode time and size that
/// works for interactive export.
pub struct AvifFormat;

pub(crate) const AVIF: FormatDescriptor = FormatDescriptor {
    label: "AVIF",
    extension: "avif",
    media_type: "image/avif",
    priority: 4,
    capabilities: Capabilities { supports_quality: true, max_dimensions: None, native: true },
};

impl Encoder for AvifFormat {
    fn descriptor(&self) -> &FormatDescriptor {
        &AVIF
    }

    fn encode(&self, buffer: &PixelBuffer, quality: Quality) -> Result<Vec<u8>, EncodeError> {
        let mut out = Vec::new();
        AvifEncoder::new_with_speed_quality(&mut out, 6, quality.value().max(1) as u8)
            .write_image(
                buffer.as_bytes(),
                buffer.width(),
                buffer.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(|e| codec_error("AVIF", e))?;
        Ok(out)
    }
}
