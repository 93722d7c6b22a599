//! In-memory pixel buffer shared between transforms and encoders.
//!
//! A [`PixelBuffer`] is a row-major RGBA grid, 8 bits per channel, with the
//! invariant that the byte length is always exactly `width * height * 4` —
//! no partial rows, no stride padding. Transforms produce new buffers;
//! encoders only ever borrow them.

use image::RgbaImage;

/// Row-major RGBA8 raster, the unit of exchange for the whole edit pipeline.
///
/// Channel order is R, G, B, A. Buffers are short-lived: created per
/// edit-and-export cycle and dropped after encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer filled with a single RGBA color.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero — a zero-sized canvas is a caller
    /// bug, not a runtime condition.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        assert!(width > 0 && height > 0, "pixel buffer dimensions must be nonzero");
        let data = rgba.repeat((width * height) as usize);
        Self { width, height, data }
    }

    /// Wrap raw RGBA bytes.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != width * height * 4` or either dimension is
    /// zero. Encoders and transforms rely on the length invariant, so a
    /// malformed buffer fails fast at the construction site.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Self {
        assert!(width > 0 && height > 0, "pixel buffer dimensions must be nonzero");
        assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * 4,
            "pixel data length must be width * height * 4"
        );
        Self { width, height, data }
    }

    pub fn from_image(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self::from_raw(width, height, image.into_raw())
    }

    /// Convert into an [`RgbaImage`] for operations that go through the
    /// `image` crate (resampling, native codecs).
    pub fn into_image(self) -> RgbaImage {
        // Cannot fail: the length invariant is exactly what from_raw checks.
        RgbaImage::from_raw(self.width, self.height, self.data)
            .unwrap_or_else(|| unreachable!("length invariant violated"))
    }

    /// Borrowing variant of [`into_image`](Self::into_image).
    pub fn to_image(&self) -> RgbaImage {
        self.clone().into_image()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw RGBA bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// RGBA channels of the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let i = ((y as usize * self.width as usize) + x as usize) * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    pub(crate) fn pixel_mut(&mut self, x: u32, y: u32) -> &mut [u8] {
        let i = ((y as usize * self.width as usize) + x as usize) * 4;
        &mut self.data[i..i + 4]
    }
}
