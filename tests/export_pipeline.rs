//! End-to-end pipeline tests: decode → transform → encode → file on disk.

use pixedit::format::registry;
use pixedit::session::{EditOp, EditorSession};
use pixedit::transform::{Direction, Rgb, VignetteParams};
use pixedit::{PixelBuffer, Quality};

/// BMP row stride for a 24-bit image: 3 bytes per pixel, 4-byte aligned.
fn bmp_row_size(width: u32) -> usize {
    (width as usize * 3).div_ceil(4) * 4
}

fn bmp_pixel(bmp: &[u8], width: u32, height: u32, x: u32, y: u32) -> [u8; 3] {
    let base = 54 + (height - 1 - y) as usize * bmp_row_size(width) + x as usize * 3;
    [bmp[base + 2], bmp[base + 1], bmp[base]] // stored B,G,R
}

#[test]
fn red_square_vignette_to_bmp() {
    // 256×256 opaque red, radial black vignette at intensity 100 / spread 50.
    let tmp = tempfile::TempDir::new().unwrap();
    let source = tmp.path().join("square.png");
    image::RgbaImage::from_pixel(256, 256, image::Rgba([255, 0, 0, 255]))
        .save(&source)
        .unwrap();

    let mut session = EditorSession::load(&source).unwrap();
    session
        .apply(&EditOp::Vignette(VignetteParams {
            direction: Direction::Radial,
            color: Rgb::BLACK,
            intensity: 100,
            spread: 50,
        }))
        .unwrap();

    let result = session
        .export(registry::builtin(), "image/bmp", Quality::default(), tmp.path())
        .unwrap();
    assert_eq!(result.path, tmp.path().join("square-edited.bmp"));

    let bmp = std::fs::read(&result.path).unwrap();
    // 768 bytes per row is already 4-byte aligned: 54 + 256*3*256.
    assert_eq!(bmp.len(), 196_662);
    assert_eq!(result.bytes, 196_662);
    assert_eq!(&bmp[0..2], b"BM");

    let center = bmp_pixel(&bmp, 256, 256, 128, 128);
    assert_eq!(center, [255, 0, 0], "center must keep the original red");

    for (x, y) in [(0, 0), (255, 0), (0, 255), (255, 255)] {
        let [r, g, b] = bmp_pixel(&bmp, 256, 256, x, y);
        assert!(r < 10 && g < 10 && b < 10, "corner ({x},{y}) should be near black, got {r},{g},{b}");
    }
}

#[test]
fn ico_downscale_invariant_across_oversized_sources() {
    // Any source over 256 on either edge embeds a frame whose larger edge is
    // exactly 256, aspect preserved within rounding.
    for (w, h) in [(512, 300), (300, 512), (1000, 257), (257, 257)] {
        let buf = PixelBuffer::filled(w, h, [120, 130, 140, 255]);
        let session = EditorSession::from_buffer(buf, "big");

        let tmp = tempfile::TempDir::new().unwrap();
        let result = session
            .export(registry::builtin(), "image/x-icon", Quality::default(), tmp.path())
            .unwrap();
        assert!(result.warning.is_some(), "{w}×{h} should warn about downscaling");

        let ico = std::fs::read(&result.path).unwrap();
        let frame = image::load_from_memory_with_format(&ico[22..], image::ImageFormat::Png)
            .unwrap();
        assert_eq!(frame.width().max(frame.height()), 256, "source {w}×{h}");

        let expected_smaller =
            (w.min(h) as f64 * 256.0 / w.max(h) as f64).round() as u32;
        let smaller = frame.width().min(frame.height());
        assert!(
            smaller.abs_diff(expected_smaller) <= 1,
            "source {w}×{h}: smaller edge {smaller}, expected ~{expected_smaller}"
        );
    }
}

#[test]
fn every_registered_format_exports_a_nonempty_file() {
    let buf = PixelBuffer::filled(20, 14, [80, 90, 100, 255]);

    for encoder in registry::builtin().get_all() {
        let descriptor = encoder.descriptor();
        let tmp = tempfile::TempDir::new().unwrap();
        let session = EditorSession::from_buffer(buf.clone(), "swatch");

        let result = session
            .export(registry::builtin(), descriptor.media_type, Quality::default(), tmp.path())
            .unwrap();

        assert!(result.bytes > 0, "{} produced an empty file", descriptor.label);
        let expected = format!("swatch-edited.{}", descriptor.extension);
        assert_eq!(result.path.file_name().unwrap().to_str().unwrap(), expected);
        assert_eq!(std::fs::metadata(&result.path).unwrap().len() as usize, result.bytes);
    }
}

#[test]
fn edit_chain_survives_reload_of_exported_png() {
    let tmp = tempfile::TempDir::new().unwrap();
    let source = tmp.path().join("input.png");
    image::RgbaImage::from_pixel(120, 90, image::Rgba([0, 0, 255, 255]))
        .save(&source)
        .unwrap();

    let mut session = EditorSession::load(&source).unwrap();
    session
        .apply_all(&[
            EditOp::Resize { width: 60, height: 45 },
            EditOp::Expand {
                padding: pixedit::transform::Padding::uniform(10),
                fill: Rgb::WHITE,
            },
        ])
        .unwrap();
    let result = session
        .export(registry::builtin(), "image/png", Quality::default(), tmp.path())
        .unwrap();

    let reloaded = EditorSession::load(&result.path).unwrap();
    assert_eq!(reloaded.buffer().dimensions(), (80, 65));
    assert_eq!(reloaded.buffer().pixel(0, 0), [255, 255, 255, 255]);
    assert_eq!(reloaded.buffer().pixel(40, 32), [0, 0, 255, 255]);
}
