//! Caller-held compressor state.
//!
//! The encoders are pure functions of (image, parameters). Whatever an
//! interactive front end needs to remember between calls (slider position,
//! last target, last output, last message) lives in a [`CompressionSession`]
//! value that each operation consumes and hands back updated.

use crate::encode::primitive::{EncodePrimitive, EncodedResult};
use crate::encode::quality::Quality;
use crate::encode::target::{self, TargetOutcome};
use crate::encode::{compress, compress_to_target};
use crate::raster::source::SourceImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionMode {
    #[default]
    Quality,
    TargetSize,
}

#[derive(Debug, Clone, Default)]
pub struct CompressionSession {
    pub mode: CompressionMode,
    pub quality: Quality,
    pub target_kb: Option<f64>,
    pub result: Option<EncodedResult>,
    /// Message for the user, e.g. when a target size could not be met.
    pub message: Option<String>,
}

impl CompressionSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-encode at `quality` (a slider change).
    pub fn apply_quality<E: EncodePrimitive + ?Sized>(
        mut self,
        encoder: &mut E,
        image: &SourceImage,
        quality: Quality,
    ) -> crate::error::Result<Self> {
        let result = compress(encoder, image, quality)?;
        self.mode = CompressionMode::Quality;
        self.quality = quality;
        self.result = Some(result);
        self.message = None;
        Ok(self)
    }

    /// Search for a quality that fits `target_kb` (an explicit apply).
    ///
    /// The slider follows the chosen quality, rounded to two decimals. An
    /// unmet target still stores the floor-quality result, with a message.
    pub fn apply_target<E: EncodePrimitive + ?Sized>(
        mut self,
        encoder: &mut E,
        image: &SourceImage,
        target_kb: f64,
    ) -> crate::error::Result<Self> {
        let outcome: TargetOutcome =
            compress_to_target(encoder, image, target::kb_to_bytes(target_kb))?;
        self.mode = CompressionMode::TargetSize;
        self.target_kb = Some(target_kb);
        self.quality = outcome.result.quality.rounded();
        self.message = outcome.shortfall_message();
        self.result = Some(outcome.result);
        Ok(self)
    }

    /// Back to defaults, as when the input image is cleared.
    pub fn clear(self) -> Self {
        Self::default()
    }

    pub fn output_size(&self) -> Option<usize> {
        self.result.as_ref().map(|r| r.size)
    }
}
