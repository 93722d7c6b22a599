//! Hand-rolled ICO serializer: one embedded 32-bit PNG frame.
//!
//! Modern ICO readers accept PNG-compressed frames, which keeps this
//! serializer small: downscale to the container's 256×256 cap if needed,
//! PNG-encode, and prepend the 6-byte ICONDIR + 16-byte ICONDIRENTRY.
//! A dimension of exactly 256 is stored as 0 per the ICO convention.

use super::native::PngFormat;
use super::{Capabilities, EncodeError, Encoder, FormatDescriptor, Quality};
use crate::buffer::PixelBuffer;
use crate::transform::fit_within;
use image::imageops::FilterType;

pub(crate) const ICO: FormatDescriptor = FormatDescriptor {
    label: "ICO",
    extension: "ico",
    media_type: "image/x-icon",
    priority: 6,
    capabilities: Capabilities {
        supports_quality: false,
        max_dimensions: Some((256, 256)),
        native: false,
    },
};

/// Largest dimension an ICO directory entry can describe.
const MAX_DIMENSION: u32 = 256;

/// ICONDIR (6 bytes) + one ICONDIRENTRY (16 bytes).
const HEADER_LEN: usize = 22;

/// Icon container with a single embedded PNG image.
pub struct IcoFormat;

impl Encoder for IcoFormat {
    fn descriptor(&self) -> &FormatDescriptor {
        &ICO
    }

    fn encode(&self, buffer: &PixelBuffer, quality: Quality) -> Result<Vec<u8>, EncodeError> {
        let (width, height) = buffer.dimensions();

        let frame;
        let source = if width > MAX_DIMENSION || height > MAX_DIMENSION {
            let (w, h) = fit_within((width, height), MAX_DIMENSION);
            let scaled =
                image::imageops::resize(&buffer.to_image(), w, h, FilterType::Lanczos3);
            frame = PixelBuffer::from_image(scaled);
            &frame
        } else {
            buffer
        };

        let png = PngFormat.encode(source, quality)?;
        Ok(wrap_png(source.width(), source.height(), &png))
    }

    fn validate(&self, buffer: &PixelBuffer) -> Option<String> {
        let (w, h) = buffer.dimensions();
        (w > MAX_DIMENSION || h > MAX_DIMENSION).then(|| {
            format!("{w}×{h} exceeds the ICO maximum; output will be downscaled to fit 256×256")
        })
    }
}

/// A dimension of exactly 256 is encoded as 0 in the single-byte entry field.
fn dimension_byte(dim: u32) -> u8 {
    debug_assert!(dim <= MAX_DIMENSION);
    if dim == MAX_DIMENSION { 0 } else { dim as u8 }
}

fn wrap_png(width: u32, height: u32, png: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + png.len());

    // ICONDIR: reserved, type 1 (icon), image count 1.
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());

    // ICONDIRENTRY.
    out.push(dimension_byte(width));
    out.push(dimension_byte(height));
    out.push(0); // palette size
    out.push(0); // reserved
    out.extend_from_slice(&1u16.to_le_bytes()); // color planes
    out.extend_from_slice(&32u16.to_le_bytes()); // bits per pixel
    out.extend_from_slice(&(png.len() as u32).to_le_bytes());
    out.extend_from_slice(&(HEADER_LEN as u32).to_le_bytes()); // data offset

    out.extend_from_slice(png);
    out
}
