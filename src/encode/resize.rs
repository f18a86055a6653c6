// Resize: SourceImage -> (w, h, format) at the fixed resize quality

use crate::encode::primitive::{EncodePrimitive, EncodeRequest, EncodedResult};
use crate::encode::quality::Quality;
use crate::error::ImageToolError;
use crate::raster::format::OutputFormat;
use crate::raster::source::SourceImage;

/// Re-encode `image` at `width` x `height` in `format` at [`Quality::RESIZE`].
pub fn resize<E: EncodePrimitive + ?Sized>(
    encoder: &mut E,
    image: &SourceImage,
    width: u32,
    height: u32,
    format: OutputFormat,
) -> crate::error::Result<EncodedResult> {
    resize_with_quality(encoder, image, width, height, format, Quality::RESIZE)
}

/// [`resize`] with a configured quality. PNG output ignores `quality`.
pub fn resize_with_quality<E: EncodePrimitive + ?Sized>(
    encoder: &mut E,
    image: &SourceImage,
    width: u32,
    height: u32,
    format: OutputFormat,
    quality: Quality,
) -> crate::error::Result<EncodedResult> {
    if width == 0 || height == 0 {
        return Err(ImageToolError::invalid_parameter(format!(
            "Please enter valid positive numbers for both width and height (got {width}x{height})"
        )));
    }

    let request = EncodeRequest {
        width,
        height,
        quality,
        format,
    };
    encoder.encode_at(image, &request)
}

/// Height that keeps the original aspect ratio at `new_width`.
pub fn height_for_width(original: (u32, u32), new_width: u32) -> u32 {
    scale_dimension(new_width, original.0, original.1)
}

/// Width that keeps the original aspect ratio at `new_height`.
pub fn width_for_height(original: (u32, u32), new_height: u32) -> u32 {
    scale_dimension(new_height, original.1, original.0)
}

fn scale_dimension(new_value: u32, original_same_axis: u32, original_other_axis: u32) -> u32 {
    if original_same_axis == 0 {
        return 0;
    }
    (new_value as f64 / original_same_axis as f64 * original_other_axis as f64).round() as u32
}

/// Work out the output size from whichever dimensions were requested.
///
/// With `keep_aspect`, a requested width wins over a requested height and the
/// other side is derived from the original ratio. Without it, a missing side
/// keeps its original value.
pub fn resolve_dimensions(
    original: (u32, u32),
    width: Option<u32>,
    height: Option<u32>,
    keep_aspect: bool,
) -> crate::error::Result<(u32, u32)> {
    let (w, h) = match (width, height, keep_aspect) {
        (None, None, _) => {
            return Err(ImageToolError::invalid_parameter(
                "resize needs a width or a height",
            ));
        }
        (Some(w), _, true) => (w, height_for_width(original, w)),
        (None, Some(h), true) => (width_for_height(original, h), h),
        (w, h, false) => (w.unwrap_or(original.0), h.unwrap_or(original.1)),
    };

    if w == 0 || h == 0 {
        return Err(ImageToolError::invalid_parameter(format!(
            "resolved dimensions must be positive, got {w}x{h}"
        )));
    }
    Ok((w, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_helpers_round() {
        assert_eq!(height_for_width((1920, 1080), 1280), 720);
        assert_eq!(width_for_height((1920, 1080), 100), 178);
        assert_eq!(height_for_width((0, 1080), 100), 0);
    }

    #[test]
    fn test_resolve_width_wins_with_aspect() {
        let dims = resolve_dimensions((400, 200), Some(100), Some(999), true).unwrap();
        assert_eq!(dims, (100, 50));
    }

    #[test]
    fn test_resolve_free_aspect_keeps_missing_side() {
        let dims = resolve_dimensions((400, 200), None, Some(80), false).unwrap();
        assert_eq!(dims, (400, 80));
    }

    #[test]
    fn test_resolve_rejects_collapsed_side() {
        // 1px wide from a very wide image rounds the height to zero
        assert!(resolve_dimensions((4000, 10), Some(1), None, true).is_err());
        assert!(resolve_dimensions((400, 200), None, None, true).is_err());
    }
}
