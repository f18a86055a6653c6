use std::fmt;

use serde::Serialize;

use crate::error::ImageToolError;

/// Lossy-encoding quality factor in `[0.1, 1.0]`.
///
/// Higher is larger and more faithful. Construction through [`Quality::new`]
/// is the only way to get one from outside the crate, so every `Quality` in
/// circulation is in range.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Quality(f64);

impl Quality {
    /// Lowest quality the target-size search will go; also its fallback.
    pub const FLOOR: Self = Self(0.1);
    pub const CEILING: Self = Self(1.0);
    /// Initial compressor setting.
    pub const DEFAULT: Self = Self(0.7);
    /// Fixed quality used when resizing.
    pub const RESIZE: Self = Self(0.9);

    pub fn new(value: f64) -> crate::error::Result<Self> {
        if !value.is_finite() || value < Self::FLOOR.0 || value > Self::CEILING.0 {
            return Err(ImageToolError::invalid_parameter(format!(
                "quality must be between {} and {}, got {value}",
                Self::FLOOR.0,
                Self::CEILING.0
            )));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// Halfway point between two qualities. Both ends are in range, so the
    /// result is too.
    pub fn midpoint(self, other: Self) -> Self {
        Self((self.0 + other.0) / 2.0)
    }

    /// Rounded to two decimal places, as shown on a slider.
    pub fn rounded(self) -> Self {
        let value = (self.0 * 100.0).round() / 100.0;
        Self(value.clamp(Self::FLOOR.0, Self::CEILING.0))
    }

    /// The codec's integer quality scale (1-100).
    pub fn to_codec_scale(self) -> u8 {
        (self.0 * 100.0).round().clamp(1.0, 100.0) as u8
    }

    pub fn percent(self) -> u32 {
        (self.0 * 100.0).round() as u32
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(Quality::new(0.1).is_ok());
        assert!(Quality::new(1.0).is_ok());
    }

    #[test]
    fn test_out_of_range_is_invalid_parameter() {
        for value in [0.0, 0.09, 1.01, -0.5, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(Quality::new(value), Err(ImageToolError::InvalidParameter(_))),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn test_codec_scale() {
        assert_eq!(Quality::FLOOR.to_codec_scale(), 10);
        assert_eq!(Quality::DEFAULT.to_codec_scale(), 70);
        assert_eq!(Quality::CEILING.to_codec_scale(), 100);
    }

    #[test]
    fn test_rounded_keeps_two_decimals() {
        let q = Quality::new(0.557).unwrap();
        assert_eq!(q.rounded().get(), 0.56);
        let near_top = Quality::new(0.99997).unwrap();
        assert_eq!(near_top.rounded().get(), 1.0);
    }
}
