use crate::encode::primitive::{EncodePrimitive, EncodeRequest, EncodedResult};
use crate::encode::quality::Quality;
use crate::raster::format::OutputFormat;
use crate::raster::source::SourceImage;

/// Re-encode `image` as JPEG at its own size and the given quality.
///
/// A single encode; errors from the primitive are returned unchanged.
pub fn compress<E: EncodePrimitive + ?Sized>(
    encoder: &mut E,
    image: &SourceImage,
    quality: Quality,
) -> crate::error::Result<EncodedResult> {
    let request = EncodeRequest::full_size(image, quality, OutputFormat::Jpeg);
    encoder.encode_at(image, &request)
}
