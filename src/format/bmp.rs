//! Hand-rolled BMP serializer: 24-bit, uncompressed, BITMAPINFOHEADER.
//!
//! The `image` crate has a BMP encoder, but this layout is pinned byte for
//! byte: bottom-up rows, BGR channel order, rows padded to 4-byte boundaries,
//! 2835 px/m (72 DPI) resolution fields. BMP readers rely on exactly this
//! shape, so the serializer is written out longhand and tested against the
//! computed offsets.

use super::{Capabilities, EncodeError, Encoder, FormatDescriptor, Quality};
use crate::buffer::PixelBuffer;

pub(crate) const BMP: FormatDescriptor = FormatDescriptor {
    label: "BMP",
    extension: "bmp",
    media_type: "image/bmp",
    priority: 5,
    capabilities: Capabilities { supports_quality: false, max_dimensions: None, native: false },
};

const FILE_HEADER_LEN: usize = 14;
const INFO_HEADER_LEN: usize = 40;
const PIXEL_DATA_OFFSET: usize = FILE_HEADER_LEN + INFO_HEADER_LEN;

/// Bytes one padded pixel row occupies: 3 bytes per pixel, rounded up to a
/// 4-byte boundary.
pub fn row_size(width: u32) -> usize {
    (width as usize * 3).div_ceil(4) * 4
}

/// 24-bit uncompressed Windows Bitmap. Deterministic; alpha is dropped.
pub struct BmpFormat;

impl Encoder for BmpFormat {
    fn descriptor(&self) -> &FormatDescriptor {
        &BMP
    }

    fn encode(&self, buffer: &PixelBuffer, _quality: Quality) -> Result<Vec<u8>, EncodeError> {
        Ok(encode(buffer))
    }
}

fn encode(buffer: &PixelBuffer) -> Vec<u8> {
    let width = buffer.width();
    let height = buffer.height();
    let row_size = row_size(width);
    let pixel_array_size = row_size * height as usize;
    let file_size = PIXEL_DATA_OFFSET + pixel_array_size;

    let mut out = vec![0u8; file_size];

    // File header (14 bytes).
    out[0] = b'B';
    out[1] = b'M';
    out[2..6].copy_from_slice(&(file_size as u32).to_le_bytes());
    // Offset 6: reserved, stays zero.
    out[10..14].copy_from_slice(&(PIXEL_DATA_OFFSET as u32).to_le_bytes());

    // BITMAPINFOHEADER (40 bytes at offset 14). Positive height = bottom-up
    // row order per BMP convention.
    out[14..18].copy_from_slice(&(INFO_HEADER_LEN as u32).to_le_bytes());
    out[18..22].copy_from_slice(&(width as i32).to_le_bytes());
    out[22..26].copy_from_slice(&(height as i32).to_le_bytes());
    out[26..28].copy_from_slice(&1u16.to_le_bytes()); // color planes
    out[28..30].copy_from_slice(&24u16.to_le_bytes()); // bits per pixel
    // Offset 30: compression = 0 (none), stays zero.
    out[34..38].copy_from_slice(&(pixel_array_size as u32).to_le_bytes());
    out[38..42].copy_from_slice(&2835u32.to_le_bytes()); // ~72 DPI horizontal
    out[42..46].copy_from_slice(&2835u32.to_le_bytes()); // ~72 DPI vertical
    // Offsets 46, 50: palette fields, stay zero.

    // Pixel data: bottom-to-top rows, B,G,R per pixel, zero padding to
    // row_size (the vec is zero-initialized).
    let rgba = buffer.as_bytes();
    for y in 0..height as usize {
        let src_row = height as usize - 1 - y;
        let src_base = src_row * width as usize * 4;
        let dst_base = PIXEL_DATA_OFFSET + y * row_size;
        for x in 0..width as usize {
            let src = src_base + x * 4;
            let dst = dst_base + x * 3;
            out[dst] = rgba[src + 2]; // B
            out[dst + 1] = rgba[src + 1]; // G
            out[dst + 2] = rgba[src]; // R
        }
    }

    out
}
