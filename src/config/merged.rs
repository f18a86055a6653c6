use std::path::PathBuf;

use crate::encode::size::SizeMode;
use crate::raster::format::OutputFormat;

use super::job::Job;
use super::settings::Settings;

#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub quality: f64,
    pub resize_quality: f64,
    pub size_mode: SizeMode,
    pub keep_aspect: bool,
    pub format: OutputFormat,
    pub output_dir: PathBuf,
}

impl MergedConfig {
    /// JobのOption値がSomeならJobの値を、NoneならSettingsの値を使用する。
    pub fn new(settings: &Settings, job: &Job) -> Self {
        MergedConfig {
            quality: job.quality.unwrap_or(settings.quality),
            resize_quality: settings.resize_quality,
            size_mode: settings.size_mode,
            keep_aspect: job.keep_aspect.unwrap_or(settings.keep_aspect),
            format: job.format.unwrap_or_default(),
            output_dir: settings.output_dir.clone(),
        }
    }
}
