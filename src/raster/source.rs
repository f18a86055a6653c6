// Decode collaborator: file bytes -> SourceImage

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageReader, RgbaImage};

use crate::error::ImageToolError;

/// A decoded raster image, held as RGBA.
///
/// Once constructed the pixels never change; every encode reads from the same
/// buffer, so one `SourceImage` can be shared across threads freely.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pixels: RgbaImage,
    original_size: usize,
}

impl SourceImage {
    /// Decode an in-memory image file. The format is sniffed from the bytes.
    pub fn decode(bytes: &[u8]) -> crate::error::Result<Self> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| ImageToolError::decode(e.to_string()))?;

        if reader.format().is_none() {
            return Err(ImageToolError::decode("unrecognized image format"));
        }

        let decoded = reader
            .decode()
            .map_err(|e| ImageToolError::decode(e.to_string()))?;

        Self::from_dynamic(decoded, bytes.len())
    }

    /// Read and decode an image file from disk.
    pub fn open(path: &Path) -> crate::error::Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::decode(&bytes).map_err(|e| match e {
            ImageToolError::DecodeError(msg) => {
                ImageToolError::decode(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Wrap raw RGBA pixels (4 bytes per pixel).
    pub fn from_rgba(width: u32, height: u32, rgba_data: Vec<u8>) -> crate::error::Result<Self> {
        let expected_len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|wh| wh.checked_mul(4))
            .ok_or_else(|| {
                ImageToolError::invalid_parameter(format!(
                    "Overflow computing buffer size for {}x{} RGBA image",
                    width, height
                ))
            })?;

        if rgba_data.len() != expected_len {
            return Err(ImageToolError::invalid_parameter(format!(
                "RGBA data size mismatch: expected {} bytes, got {}",
                expected_len,
                rgba_data.len()
            )));
        }

        let pixels = RgbaImage::from_raw(width, height, rgba_data)
            .ok_or_else(|| ImageToolError::invalid_parameter("Failed to create image from RGBA data"))?;

        Self::from_pixels(pixels, expected_len)
    }

    pub fn from_dynamic(image: DynamicImage, original_size: usize) -> crate::error::Result<Self> {
        Self::from_pixels(image.to_rgba8(), original_size)
    }

    fn from_pixels(pixels: RgbaImage, original_size: usize) -> crate::error::Result<Self> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(ImageToolError::decode(format!(
                "image has no pixels ({}x{})",
                pixels.width(),
                pixels.height()
            )));
        }
        Ok(Self {
            pixels,
            original_size,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Byte length of the file this image was decoded from.
    pub fn original_size(&self) -> usize {
        self.original_size
    }
}
