// Target-size search: bisect quality until the JPEG fits a byte budget

use serde::Serialize;
use tracing::{debug, warn};

use crate::encode::primitive::{EncodePrimitive, EncodeRequest, EncodedResult};
use crate::encode::quality::Quality;
use crate::encode::size::readable_size;
use crate::error::ImageToolError;
use crate::raster::format::OutputFormat;
use crate::raster::source::SourceImage;

/// Number of bisection steps. Fixed; the search never stops early.
pub const SEARCH_ITERATIONS: usize = 15;

/// Terminal state of a target-size search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStatus {
    /// A quality within budget was found and re-encoded.
    Converged,
    /// Even the floor quality was over budget; the floor encode is returned.
    Exhausted,
}

/// Result of [`compress_to_target`].
#[derive(Debug, Clone)]
pub struct TargetOutcome {
    pub result: EncodedResult,
    pub achieved: bool,
    pub target_bytes: usize,
    pub status: SearchStatus,
}

impl TargetOutcome {
    /// User-facing explanation when the budget could not be met.
    pub fn shortfall_message(&self) -> Option<String> {
        if self.achieved {
            return None;
        }
        Some(format!(
            "Unable to compress to {}. Smallest possible size at {} quality is {}.",
            readable_size(self.target_bytes),
            self.result.quality,
            readable_size(self.result.size)
        ))
    }
}

/// Mutable state of one search. Lives only for the duration of the call.
#[derive(Debug)]
struct SearchState {
    min_quality: Quality,
    max_quality: Quality,
    best: Option<EncodedResult>,
    iterations: usize,
}

impl SearchState {
    fn new() -> Self {
        Self {
            min_quality: Quality::FLOOR,
            max_quality: Quality::CEILING,
            best: None,
            iterations: 0,
        }
    }

    fn next_quality(&self) -> Quality {
        self.min_quality.midpoint(self.max_quality)
    }

    /// Narrow the range around `quality` depending on whether `result` fit.
    fn record(&mut self, quality: Quality, result: EncodedResult, target_bytes: usize) {
        if result.size > target_bytes {
            self.max_quality = quality;
        } else {
            self.min_quality = quality;
            self.best = Some(result);
        }
        self.iterations += 1;
        debug_assert!(self.min_quality <= self.max_quality);
    }
}

/// Convert a kilobyte figure (1 KB = 1024 bytes) to a byte budget.
pub fn kb_to_bytes(kb: f64) -> i64 {
    (kb * 1024.0).floor() as i64
}

/// Find the highest JPEG quality whose output is at most `target_bytes`.
///
/// Runs exactly [`SEARCH_ITERATIONS`] encodes, then one more: either the
/// best in-budget quality again (achieved), or [`Quality::FLOOR`] when
/// nothing fit (not achieved). Any encode error aborts the search.
pub fn compress_to_target<E: EncodePrimitive + ?Sized>(
    encoder: &mut E,
    image: &SourceImage,
    target_bytes: i64,
) -> crate::error::Result<TargetOutcome> {
    if target_bytes <= 0 {
        return Err(ImageToolError::invalid_parameter(format!(
            "Target size must be a positive number, got {target_bytes} bytes"
        )));
    }
    let target = usize::try_from(target_bytes).map_err(|_| {
        ImageToolError::invalid_parameter(format!("target size {target_bytes} is too large"))
    })?;

    let mut state = SearchState::new();
    while state.iterations < SEARCH_ITERATIONS {
        let quality = state.next_quality();
        let request = EncodeRequest::full_size(image, quality, OutputFormat::Jpeg);
        let result = encoder.encode_at(image, &request)?;
        debug!(
            step = state.iterations,
            quality = quality.get(),
            size = result.size,
            target,
            "bisection step"
        );
        state.record(quality, result, target);
    }

    let (quality, achieved, status) = match state.best.as_ref() {
        Some(best) => (best.quality, true, SearchStatus::Converged),
        None => (Quality::FLOOR, false, SearchStatus::Exhausted),
    };

    let request = EncodeRequest::full_size(image, quality, OutputFormat::Jpeg);
    let result = encoder.encode_at(image, &request)?;

    let outcome = TargetOutcome {
        result,
        achieved,
        target_bytes: target,
        status,
    };
    if let Some(message) = outcome.shortfall_message() {
        warn!("{message}");
    }
    Ok(outcome)
}
