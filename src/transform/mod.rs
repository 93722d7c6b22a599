//! Transform engine — pure functions from pixel buffer to pixel buffer.
//!
//! The module is split the same way as the rest of the crate's numeric code:
//! - **Calculations**: pure dimension/gradient math, unit testable without
//!   any pixels
//! - **Parameters**: data structures describing each operation
//! - **Operations**: the pixel work itself ([`ops`])
//!
//! Resize, crop, and expand are single drawing operations; vignette is the
//! interesting one (gradient geometry plus multi-pass alpha compositing).

mod calculations;
pub mod ops;
mod params;

pub use calculations::{PassSchedule, band_length, fit_within, radial_radii, vignette_passes};
pub use ops::{crop, expand, resize, vignette};
pub use params::{CropRect, Direction, Padding, ParseColorError, ParseDirectionError, Rgb, VignetteParams};

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TransformError {
    #[error("crop rectangle {x},{y} {width}×{height} is not a valid region of the {image_width}×{image_height} image")]
    OutOfBounds { x: u32, y: u32, width: u32, height: u32, image_width: u32, image_height: u32 },
}
