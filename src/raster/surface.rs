// Drawing surface: draw SourceImage at target size -> serialize to bytes

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage, RgbaImage};

use crate::encode::quality::Quality;
use crate::error::ImageToolError;
use crate::raster::format::OutputFormat;
use crate::raster::source::SourceImage;

/// Largest side the surface will allocate. JPEG stores dimensions as u16.
pub const MAX_SIDE: u32 = 65_535;

/// Largest canvas area in pixels (16384 x 16384).
pub const MAX_PIXELS: usize = 16_384 * 16_384;

/// Reusable RGBA canvas.
///
/// The backing buffer is kept between draws of the same size. Every draw
/// clears it first, so nothing from an earlier (possibly differently sized)
/// draw can leak into the next serialization.
#[derive(Debug)]
pub struct Surface {
    canvas: RgbaImage,
    filter: FilterType,
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface {
    pub fn new() -> Self {
        Self {
            canvas: RgbaImage::new(0, 0),
            filter: FilterType::Triangle,
        }
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    /// Render `image` scaled to exactly `width` x `height`.
    ///
    /// Sizes beyond [`MAX_SIDE`] or [`MAX_PIXELS`] are rejected before
    /// anything is allocated.
    pub fn draw(&mut self, image: &SourceImage, width: u32, height: u32) -> crate::error::Result<()> {
        check_canvas_size(width, height)?;

        if self.canvas.dimensions() == (width, height) {
            self.canvas.fill(0);
        } else {
            self.canvas = RgbaImage::new(width, height);
        }

        if image.dimensions() == (width, height) {
            self.canvas.copy_from_slice(image.pixels().as_raw());
        } else {
            let scaled = imageops::resize(image.pixels(), width, height, self.filter);
            imageops::overlay(&mut self.canvas, &scaled, 0, 0);
        }
        Ok(())
    }

    /// Encode the current canvas contents.
    ///
    /// JPEG has no alpha channel; the canvas is composited onto opaque black
    /// first. WebP is lossy at `quality`, PNG ignores it.
    pub fn serialize(&self, format: OutputFormat, quality: Quality) -> crate::error::Result<Vec<u8>> {
        let (width, height) = self.canvas.dimensions();
        if width == 0 || height == 0 {
            return Err(ImageToolError::encode("surface has not been drawn"));
        }
        check_format_size(format, width, height)?;

        let mut buf = Cursor::new(Vec::new());
        match format {
            OutputFormat::Jpeg => {
                let rgb = flatten_onto_black(&self.canvas);
                let encoder = JpegEncoder::new_with_quality(&mut buf, quality.to_codec_scale());
                rgb.write_with_encoder(encoder)?;
            }
            OutputFormat::Png => {
                self.canvas.write_with_encoder(PngEncoder::new(&mut buf))?;
            }
            OutputFormat::Webp => {
                let encoded = webp::Encoder::from_rgba(self.canvas.as_raw(), width, height)
                    .encode_simple(false, f32::from(quality.to_codec_scale()))
                    .map_err(|e| ImageToolError::encode(format!("WebP encode failed: {e:?}")))?;
                return Ok(encoded.to_vec());
            }
        }

        Ok(buf.into_inner())
    }
}

/// Reject a canvas size that cannot be allocated.
fn check_canvas_size(width: u32, height: u32) -> crate::error::Result<()> {
    if width > MAX_SIDE || height > MAX_SIDE {
        return Err(ImageToolError::invalid_parameter(format!(
            "{width}x{height} exceeds the maximum side of {MAX_SIDE} pixels"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .filter(|&pixels| pixels <= MAX_PIXELS)
        .and_then(|pixels| pixels.checked_mul(4))
        .ok_or_else(|| {
            ImageToolError::invalid_parameter(format!(
                "{width}x{height} exceeds the maximum canvas area of {MAX_PIXELS} pixels"
            ))
        })?;
    Ok(())
}

/// Reject a size the codec for `format` cannot store.
pub fn check_format_size(format: OutputFormat, width: u32, height: u32) -> crate::error::Result<()> {
    let max = format.max_side();
    if width > max || height > max {
        return Err(ImageToolError::invalid_parameter(format!(
            "{width}x{height} exceeds the {format} limit of {max} pixels per side"
        )));
    }
    Ok(())
}

/// Drop alpha the way an opaque black backdrop would: RGB scaled by a/255.
fn flatten_onto_black(canvas: &RgbaImage) -> RgbImage {
    let mut rgb = RgbImage::new(canvas.width(), canvas.height());
    for (dst, src) in rgb.pixels_mut().zip(canvas.pixels()) {
        let [r, g, b, a] = src.0;
        let scale = |c: u8| ((u16::from(c) * u16::from(a) + 127) / 255) as u8;
        *dst = Rgb([scale(r), scale(g), scale(b)]);
    }
    rgb
}
