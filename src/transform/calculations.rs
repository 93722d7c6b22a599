//! Pure calculation functions for dimension and gradient math.
//!
//! All functions here are pure and testable without any pixels or I/O.

/// Scale dimensions so the larger edge becomes exactly `max`, preserving
/// aspect ratio (smaller edge rounded to nearest). Dimensions already within
/// the cap are returned unchanged.
///
/// # Examples
/// ```
/// # use pixedit::transform::fit_within;
/// assert_eq!(fit_within((512, 300), 256), (256, 150));
/// assert_eq!(fit_within((300, 900), 256), (85, 256));
/// assert_eq!(fit_within((100, 80), 256), (100, 80));
/// ```
pub fn fit_within(source: (u32, u32), max: u32) -> (u32, u32) {
    let (w, h) = source;
    if w <= max && h <= max {
        return (w, h);
    }
    if w >= h {
        let scaled = (h as f64 * max as f64 / w as f64).round() as u32;
        (max, scaled.max(1))
    } else {
        let scaled = (w as f64 * max as f64 / h as f64).round() as u32;
        (scaled.max(1), max)
    }
}

/// How many gradient passes a vignette intensity needs, and the alpha of the
/// final pass.
///
/// Intensity is percentage-like but deliberately tolerates values above 100:
/// the overshoot is simulated with repeated full-alpha passes plus one
/// fractional pass. All passes before the last run at alpha 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassSchedule {
    pub passes: u32,
    pub final_alpha: f32,
}

pub fn vignette_passes(intensity: u32) -> PassSchedule {
    if intensity > 100 {
        let passes = intensity.div_ceil(100);
        let remainder = intensity % 100;
        let final_alpha = if remainder == 0 { 1.0 } else { remainder as f32 / 100.0 };
        PassSchedule { passes, final_alpha }
    } else {
        PassSchedule { passes: 1, final_alpha: intensity as f32 / 100.0 }
    }
}

/// Inner (fully transparent) and outer (full pass alpha) radii of the radial
/// vignette gradient, in pixels from the image center.
///
/// The outer radius is the half-diagonal; spread shrinks the inner radius
/// from the half-diagonal (spread 0) down to the center (spread 100).
pub fn radial_radii(width: u32, height: u32, spread: u32) -> (f32, f32) {
    let half_w = width as f32 / 2.0;
    let half_h = height as f32 / 2.0;
    let half_diag = (half_w * half_w + half_h * half_h).sqrt();
    let factor = (1.0 - spread.min(100) as f32 / 100.0).max(0.0);
    (half_diag * factor, half_diag)
}

/// Length in pixels of a linear vignette's gradient band, measured inward
/// from the anchored edge. Capped at the dimension the band runs along.
pub fn band_length(width: u32, height: u32, spread: u32, relevant_dim: u32) -> f32 {
    let raw = width.max(height) as f32 * spread.min(100) as f32 / 100.0;
    raw.min(relevant_dim as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // fit_within tests
    // =========================================================================

    #[test]
    fn fit_landscape_larger_edge_becomes_max() {
        assert_eq!(fit_within((512, 300), 256), (256, 150));
    }

    #[test]
    fn fit_portrait_larger_edge_becomes_max() {
        assert_eq!(fit_within((300, 900), 256), (85, 256));
    }

    #[test]
    fn fit_within_cap_is_identity() {
        assert_eq!(fit_within((256, 256), 256), (256, 256));
        assert_eq!(fit_within((10, 20), 256), (10, 20));
    }

    #[test]
    fn fit_extreme_aspect_never_collapses_to_zero() {
        assert_eq!(fit_within((10000, 1), 256), (256, 1));
    }

    // =========================================================================
    // vignette_passes tests
    // =========================================================================

    #[test]
    fn passes_at_or_below_100_are_single() {
        assert_eq!(vignette_passes(0), PassSchedule { passes: 1, final_alpha: 0.0 });
        assert_eq!(vignette_passes(42), PassSchedule { passes: 1, final_alpha: 0.42 });
        assert_eq!(vignette_passes(100), PassSchedule { passes: 1, final_alpha: 1.0 });
    }

    #[test]
    fn passes_above_100_add_fractional_final_pass() {
        assert_eq!(vignette_passes(150), PassSchedule { passes: 2, final_alpha: 0.5 });
        assert_eq!(vignette_passes(101), PassSchedule { passes: 2, final_alpha: 0.01 });
    }

    #[test]
    fn exact_multiples_of_100_use_full_final_alpha() {
        assert_eq!(vignette_passes(200), PassSchedule { passes: 2, final_alpha: 1.0 });
        assert_eq!(vignette_passes(300), PassSchedule { passes: 3, final_alpha: 1.0 });
    }

    // =========================================================================
    // gradient geometry tests
    // =========================================================================

    #[test]
    fn radial_outer_is_half_diagonal() {
        let (_, outer) = radial_radii(256, 256, 50);
        let expected = (128.0f32 * 128.0 * 2.0).sqrt();
        assert!((outer - expected).abs() < 1e-3);
    }

    #[test]
    fn radial_spread_scales_inner_radius() {
        let (inner, outer) = radial_radii(256, 256, 50);
        assert!((inner - outer / 2.0).abs() < 1e-3);

        let (inner_0, outer_0) = radial_radii(256, 256, 0);
        assert_eq!(inner_0, outer_0);

        let (inner_100, _) = radial_radii(256, 256, 100);
        assert_eq!(inner_100, 0.0);
    }

    #[test]
    fn band_scales_with_longer_edge_and_is_capped() {
        // 100×50: longer edge 100, spread 50 → 50px band.
        assert_eq!(band_length(100, 50, 50, 100), 50.0);
        // Band along the short dimension is capped at that dimension.
        assert_eq!(band_length(100, 50, 80, 50), 50.0);
        assert_eq!(band_length(100, 50, 0, 100), 0.0);
    }
}
