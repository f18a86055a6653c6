// Encode primitive, quality mode, and resize tests

use toolpresso_image::encode::primitive::{CanvasEncoder, EncodePrimitive, EncodeRequest};
use toolpresso_image::encode::quality::Quality;
use toolpresso_image::encode::resize::{height_for_width, resize, resize_with_quality};
use toolpresso_image::encode::size::SizeMode;
use toolpresso_image::encode::compress;
use toolpresso_image::error::ImageToolError;
use toolpresso_image::raster::format::OutputFormat;
use toolpresso_image::raster::source::SourceImage;

/// Smooth gradient with a high-frequency XOR texture so that JPEG size
/// reacts clearly to quality.
fn gradient(width: u32, height: u32) -> SourceImage {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&[
                (x * 255 / width.max(1)) as u8,
                (y * 255 / height.max(1)) as u8,
                ((x ^ y) & 0xff) as u8,
                255,
            ]);
        }
    }
    SourceImage::from_rgba(width, height, data).expect("gradient buffer should be valid")
}

fn q(value: f64) -> Quality {
    Quality::new(value).expect("quality should be in range")
}

// ============================================================
// 1. Determinism
// ============================================================

#[test]
fn test_encode_at_is_deterministic() {
    let image = gradient(96, 64);
    let mut encoder = CanvasEncoder::default();
    let request = EncodeRequest::full_size(&image, q(0.7), OutputFormat::Jpeg);

    let first = encoder.encode_at(&image, &request).expect("encode should succeed");
    let second = encoder.encode_at(&image, &request).expect("encode should succeed");

    assert_eq!(first.data, second.data, "identical requests must give identical bytes");
    assert_eq!(first.size, second.size);
}

#[test]
fn test_fresh_encoders_agree() {
    let image = gradient(64, 48);
    let request = EncodeRequest::full_size(&image, q(0.4), OutputFormat::Jpeg);

    let a = CanvasEncoder::default().encode_at(&image, &request).unwrap();
    let b = CanvasEncoder::default().encode_at(&image, &request).unwrap();

    assert_eq!(a.data, b.data);
}

#[test]
fn test_surface_reuse_does_not_leak_between_sizes() {
    let image = gradient(64, 64);
    let mut encoder = CanvasEncoder::default();
    let full = EncodeRequest::full_size(&image, q(0.8), OutputFormat::Jpeg);
    let small = EncodeRequest {
        width: 32,
        height: 16,
        ..full
    };

    let before = encoder.encode_at(&image, &full).unwrap();
    encoder.encode_at(&image, &small).unwrap();
    let after = encoder.encode_at(&image, &full).unwrap();

    assert_eq!(before.data, after.data);
}

// ============================================================
// 2. Monotonicity
// ============================================================

#[test]
fn test_size_non_decreasing_with_quality() {
    let image = gradient(256, 192);
    let mut encoder = CanvasEncoder::default();

    let sizes: Vec<usize> = [0.1, 0.3, 0.5, 0.7, 0.9, 1.0]
        .iter()
        .map(|&value| compress(&mut encoder, &image, q(value)).unwrap().size)
        .collect();

    for pair in sizes.windows(2) {
        assert!(
            pair[0] <= pair[1],
            "size should not shrink as quality rises: {sizes:?}"
        );
    }
    assert!(sizes[0] < sizes[5], "floor and ceiling should differ: {sizes:?}");
}

// ============================================================
// 3. Quality mode
// ============================================================

#[test]
fn test_compress_full_hd_is_idempotent() {
    let image = gradient(1920, 1080);
    let mut encoder = CanvasEncoder::default();

    let first = compress(&mut encoder, &image, q(0.7)).expect("compress should succeed");
    let second = compress(&mut encoder, &image, q(0.7)).expect("compress should succeed");

    assert!(first.size > 0);
    assert_eq!(first.size, second.size);
    assert_eq!((first.width, first.height), (1920, 1080));
    assert_eq!(first.format, OutputFormat::Jpeg);
    assert_eq!(first.quality, q(0.7));
}

#[test]
fn test_compress_output_decodes_as_jpeg() {
    let image = gradient(40, 30);
    let result = compress(&mut CanvasEncoder::default(), &image, q(0.5)).unwrap();

    let format = image::guess_format(&result.data).expect("output should be a known format");
    assert_eq!(format, image::ImageFormat::Jpeg);

    let decoded = SourceImage::decode(&result.data).expect("output should decode");
    assert_eq!(decoded.dimensions(), (40, 30));
}

#[test]
fn test_encode_at_rejects_zero_dimensions() {
    let image = gradient(8, 8);
    let request = EncodeRequest {
        width: 0,
        height: 8,
        quality: Quality::DEFAULT,
        format: OutputFormat::Jpeg,
    };

    let result = CanvasEncoder::default().encode_at(&image, &request);
    assert!(matches!(result, Err(ImageToolError::InvalidParameter(_))));
}

#[test]
fn test_transparent_pixels_compress_to_black() {
    let image = SourceImage::from_rgba(16, 16, [255, 255, 255, 0].repeat(16 * 16)).unwrap();

    let result = compress(&mut CanvasEncoder::default(), &image, Quality::CEILING).unwrap();

    let decoded = image::load_from_memory(&result.data).unwrap().to_rgb8();
    for pixel in decoded.pixels() {
        assert!(pixel.0.iter().all(|&c| c <= 2), "expected black, got {pixel:?}");
    }
}

// ============================================================
// 4. Size measurement
// ============================================================

#[test]
fn test_base64_estimate_is_close_to_exact() {
    let image = gradient(80, 60);
    let exact = compress(&mut CanvasEncoder::new(SizeMode::Exact), &image, q(0.6)).unwrap();
    let estimated = compress(&mut CanvasEncoder::new(SizeMode::Base64), &image, q(0.6)).unwrap();

    assert_eq!(exact.data, estimated.data, "size mode must not change the payload");
    assert_eq!(exact.size, exact.data.len());
    assert!(estimated.size >= exact.size);
    assert!(estimated.size - exact.size <= 2);
}

// ============================================================
// 5. Resize
// ============================================================

#[test]
fn test_resize_to_each_format() {
    let image = gradient(120, 80);
    let mut encoder = CanvasEncoder::default();
    let width = 60;
    let height = height_for_width(image.dimensions(), width);

    for format in OutputFormat::ALL {
        let result = resize(&mut encoder, &image, width, height, format)
            .unwrap_or_else(|e| panic!("resize to {format} failed: {e}"));
        assert_eq!((result.width, result.height), (60, 40));
        assert_eq!(result.format, format);

        let decoded = SourceImage::decode(&result.data).expect("resized output should decode");
        assert_eq!(decoded.dimensions(), (60, 40), "{format} output has wrong size");
    }
}

#[test]
fn test_resize_jpeg_uses_fixed_quality() {
    let image = gradient(50, 50);
    let result = resize(&mut CanvasEncoder::default(), &image, 25, 25, OutputFormat::Jpeg).unwrap();
    assert_eq!(result.quality, Quality::RESIZE);
}

#[test]
fn test_resize_upscale() {
    let image = gradient(10, 10);
    let result = resize(&mut CanvasEncoder::default(), &image, 30, 20, OutputFormat::Png).unwrap();
    let decoded = SourceImage::decode(&result.data).unwrap();
    assert_eq!(decoded.dimensions(), (30, 20));
}

#[test]
fn test_resize_rejects_zero_dimensions() {
    let image = gradient(10, 10);
    let result = resize(&mut CanvasEncoder::default(), &image, 10, 0, OutputFormat::Png);
    assert!(matches!(result, Err(ImageToolError::InvalidParameter(_))));
}

#[test]
fn test_resize_webp_is_lossy() {
    let image = gradient(64, 64);
    let mut encoder = CanvasEncoder::default();

    let low = resize_with_quality(&mut encoder, &image, 64, 64, OutputFormat::Webp, q(0.2)).unwrap();
    let high = resize(&mut encoder, &image, 64, 64, OutputFormat::Webp).unwrap();

    assert_eq!(high.quality, Quality::RESIZE);
    assert!(low.size < high.size, "low={} high={}", low.size, high.size);

    let decoded = image::load_from_memory(&low.data).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (64, 64));
    assert_ne!(decoded.as_raw(), image.pixels().as_raw());
}

#[test]
fn test_png_ignores_resize_quality() {
    let image = gradient(32, 32);
    let mut encoder = CanvasEncoder::default();
    let low = resize_with_quality(&mut encoder, &image, 32, 32, OutputFormat::Png, q(0.1)).unwrap();
    let high = resize_with_quality(&mut encoder, &image, 32, 32, OutputFormat::Png, q(1.0)).unwrap();
    assert_eq!(low.data, high.data);
}

#[test]
fn test_resize_rejects_oversized_dimensions() {
    let image = gradient(10, 10);
    let mut encoder = CanvasEncoder::default();

    for format in OutputFormat::ALL {
        let result = resize(&mut encoder, &image, 4_000_000_000, 4_000_000_000, format);
        assert!(
            matches!(result, Err(ImageToolError::InvalidParameter(_))),
            "{format} should reject oversized output"
        );
    }

    let webp = resize(&mut encoder, &image, 16_384, 1, OutputFormat::Webp);
    assert!(matches!(webp, Err(ImageToolError::InvalidParameter(_))));

    // the encoder stays usable after a rejected request
    assert!(resize(&mut encoder, &image, 5, 5, OutputFormat::Png).is_ok());
}
