// Output size measurement and human-readable sizes

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::raster::format::OutputFormat;

const SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// How the encoded size of a result is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeMode {
    /// Length of the encoded byte payload.
    #[default]
    Exact,
    /// Estimate from the base64 text of a data URL: `text_len * 3 / 4`.
    ///
    /// Padding characters are counted as data, so this overshoots the exact
    /// length by up to two bytes.
    Base64,
}

impl SizeMode {
    pub fn measure(self, format: OutputFormat, bytes: &[u8]) -> usize {
        match self {
            Self::Exact => bytes.len(),
            Self::Base64 => size_from_data_url(&data_url(format, bytes)),
        }
    }
}

/// `data:<mime>;base64,<payload>`
pub fn data_url(format: OutputFormat, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", format.mime(), STANDARD.encode(bytes))
}

/// Approximate payload size of a base64 data URL. Returns 0 when there is
/// no comma-separated payload.
pub fn size_from_data_url(url: &str) -> usize {
    url.split_once(',')
        .map(|(_, payload)| estimate_from_base64_len(payload.len()))
        .unwrap_or(0)
}

pub fn estimate_from_base64_len(text_len: usize) -> usize {
    text_len * 3 / 4
}

/// Format a byte count with binary units, at most two decimals and no
/// trailing zeros: `1536` -> `"1.5 KB"`, `2048` -> `"2 KB"`.
pub fn readable_size(bytes: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", SIZE_UNITS[unit])
}
