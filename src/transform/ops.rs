//! The transform operations themselves.
//!
//! Resize, crop, and expand are single drawing operations. Vignette carries
//! the real logic: a gradient-filled layer composited over the image with
//! standard over-alpha blending, repeated for intensities above 100.

use super::calculations::{band_length, radial_radii, vignette_passes};
use super::params::{CropRect, Direction, Padding, Rgb, VignetteParams};
use super::TransformError;
use crate::buffer::PixelBuffer;
use image::imageops::{self, FilterType};

/// Resample to exactly `width`×`height` (Lanczos3).
///
/// # Panics
///
/// Panics if either target dimension is zero.
pub fn resize(buffer: &PixelBuffer, width: u32, height: u32) -> PixelBuffer {
    assert!(width > 0 && height > 0, "resize target must be nonzero");
    let resized = imageops::resize(&buffer.to_image(), width, height, FilterType::Lanczos3);
    PixelBuffer::from_image(resized)
}

/// Extract a rectangle. The rectangle must be at least 1×1 and lie fully
/// within the source.
pub fn crop(buffer: &PixelBuffer, rect: CropRect) -> Result<PixelBuffer, TransformError> {
    let (iw, ih) = buffer.dimensions();
    let CropRect { x, y, width, height } = rect;

    let in_bounds = x.checked_add(width).is_some_and(|r| r <= iw)
        && y.checked_add(height).is_some_and(|b| b <= ih);
    if width == 0 || height == 0 || !in_bounds {
        return Err(TransformError::OutOfBounds {
            x,
            y,
            width,
            height,
            image_width: iw,
            image_height: ih,
        });
    }

    let src = buffer.as_bytes();
    let mut data = Vec::with_capacity(width as usize * height as usize * 4);
    for row in y..y + height {
        let start = (row as usize * iw as usize + x as usize) * 4;
        data.extend_from_slice(&src[start..start + width as usize * 4]);
    }
    Ok(PixelBuffer::from_raw(width, height, data))
}

/// Grow the canvas by `padding` on each edge, filling new area with `fill`
/// and drawing the source at its offset position.
pub fn expand(buffer: &PixelBuffer, padding: Padding, fill: Rgb) -> PixelBuffer {
    let [r, g, b] = fill.channels();
    let width = buffer.width() + padding.left + padding.right;
    let height = buffer.height() + padding.top + padding.bottom;

    let mut canvas = PixelBuffer::filled(width, height, [r, g, b, 255]).into_image();
    imageops::overlay(&mut canvas, &buffer.to_image(), padding.left as i64, padding.top as i64);
    PixelBuffer::from_image(canvas)
}

/// Composite a gradient vignette over the image. Output dimensions equal the
/// input's; content is preserved except where the gradient tints it.
pub fn vignette(buffer: &PixelBuffer, params: &VignetteParams) -> PixelBuffer {
    let mut out = buffer.clone();
    let schedule = vignette_passes(params.intensity);

    for pass in 0..schedule.passes {
        let pass_alpha = if pass == schedule.passes - 1 { schedule.final_alpha } else { 1.0 };
        match params.direction {
            Direction::Radial => radial_pass(&mut out, params, pass_alpha),
            _ => linear_pass(&mut out, params, pass_alpha),
        }
    }
    out
}

/// Full-canvas radial gradient: transparent inside the inner radius, full
/// pass alpha at the outer radius (the half-diagonal).
fn radial_pass(buffer: &mut PixelBuffer, params: &VignetteParams, pass_alpha: f32) {
    let (width, height) = buffer.dimensions();
    let (inner, outer) = radial_radii(width, height, params.spread);
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let color = params.color.channels();

    for y in 0..height {
        let dy = y as f32 + 0.5 - cy;
        for x in 0..width {
            let dx = x as f32 + 0.5 - cx;
            let dist = (dx * dx + dy * dy).sqrt();
            let coverage = if outer > inner {
                ((dist - inner) / (outer - inner)).clamp(0.0, 1.0)
            } else if dist >= outer {
                1.0
            } else {
                0.0
            };
            blend_over(buffer.pixel_mut(x, y), color, coverage * pass_alpha);
        }
    }
}

/// Edge-anchored gradient band: full pass alpha at the edge, fading to
/// transparent at the band's inner boundary. Pixels outside the band are
/// untouched.
fn linear_pass(buffer: &mut PixelBuffer, params: &VignetteParams, pass_alpha: f32) {
    let (width, height) = buffer.dimensions();
    let horizontal = matches!(params.direction, Direction::Left | Direction::Right);
    let relevant = if horizontal { width } else { height };
    let band = band_length(width, height, params.spread, relevant);
    if band <= 0.0 {
        return;
    }
    let color = params.color.channels();

    // Distance of a pixel center from the anchored edge, along the band axis.
    let edge_distance = |coord: u32| -> f32 {
        let center = coord as f32 + 0.5;
        match params.direction {
            Direction::Left | Direction::Top => center,
            Direction::Right => width as f32 - center,
            Direction::Bottom => height as f32 - center,
            Direction::Radial => unreachable!(),
        }
    };

    for y in 0..height {
        for x in 0..width {
            let dist = edge_distance(if horizontal { x } else { y });
            if dist >= band {
                continue;
            }
            let coverage = 1.0 - dist / band;
            blend_over(buffer.pixel_mut(x, y), color, coverage * pass_alpha);
        }
    }
}

/// Standard over-alpha compositing of a straight-alpha source color onto a
/// straight-alpha destination pixel.
fn blend_over(dst: &mut [u8], color: [u8; 3], alpha: f32) {
    if alpha <= 0.0 {
        return;
    }
    let a = alpha.min(1.0);
    let da = dst[3] as f32 / 255.0;
    let out_a = a + da * (1.0 - a);

    for c in 0..3 {
        let s = color[c] as f32;
        let d = dst[c] as f32;
        dst[c] = ((s * a + d * da * (1.0 - a)) / out_a).round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round() as u8;
}
