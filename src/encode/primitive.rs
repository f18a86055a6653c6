// Encode primitive: SourceImage + (w, h, quality, format) -> EncodedResult

use tracing::debug;

use crate::encode::quality::Quality;
use crate::encode::size::SizeMode;
use crate::error::ImageToolError;
use crate::raster::format::OutputFormat;
use crate::raster::source::SourceImage;
use crate::raster::surface::{Surface, check_format_size};

/// Parameters of a single encode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodeRequest {
    pub width: u32,
    pub height: u32,
    pub quality: Quality,
    pub format: OutputFormat,
}

impl EncodeRequest {
    /// Encode at the image's own dimensions.
    pub fn full_size(image: &SourceImage, quality: Quality, format: OutputFormat) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            quality,
            format,
        }
    }
}

/// Output of one encode attempt. The payload belongs to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedResult {
    /// Reported size in bytes; exact or estimated depending on [`SizeMode`].
    pub size: usize,
    pub quality: Quality,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// The one operation every encoder mode is built on.
///
/// Implementations must be deterministic: the same image and request always
/// produce the same bytes.
pub trait EncodePrimitive {
    fn encode_at(
        &mut self,
        image: &SourceImage,
        request: &EncodeRequest,
    ) -> crate::error::Result<EncodedResult>;
}

impl<E: EncodePrimitive + ?Sized> EncodePrimitive for &mut E {
    fn encode_at(
        &mut self,
        image: &SourceImage,
        request: &EncodeRequest,
    ) -> crate::error::Result<EncodedResult> {
        (**self).encode_at(image, request)
    }
}

/// Draws onto an owned [`Surface`] and serializes it with the `image` codecs.
#[derive(Debug, Default)]
pub struct CanvasEncoder {
    surface: Surface,
    size_mode: SizeMode,
}

impl CanvasEncoder {
    pub fn new(size_mode: SizeMode) -> Self {
        Self {
            surface: Surface::new(),
            size_mode,
        }
    }
}

impl EncodePrimitive for CanvasEncoder {
    fn encode_at(
        &mut self,
        image: &SourceImage,
        request: &EncodeRequest,
    ) -> crate::error::Result<EncodedResult> {
        if request.width == 0 || request.height == 0 {
            return Err(ImageToolError::invalid_parameter(format!(
                "dimensions must be positive, got {}x{}",
                request.width, request.height
            )));
        }

        check_format_size(request.format, request.width, request.height)?;
        self.surface.draw(image, request.width, request.height)?;
        let data = self.surface.serialize(request.format, request.quality)?;
        let size = self.size_mode.measure(request.format, &data);

        debug!(
            width = request.width,
            height = request.height,
            quality = request.quality.get(),
            format = request.format.label(),
            size,
            "encoded"
        );

        Ok(EncodedResult {
            size,
            quality: request.quality,
            format: request.format,
            width: request.width,
            height: request.height,
            data,
        })
    }
}
