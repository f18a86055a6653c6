// ジョブ単位: 画像読込 -> 再エンコード -> 出力書込

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::config::job::{Job, JobMode};
use crate::config::merged::MergedConfig;
use crate::encode::primitive::{CanvasEncoder, EncodedResult};
use crate::encode::quality::Quality;
use crate::encode::resize::resolve_dimensions;
use crate::encode::size::SizeMode;
use crate::encode::target::kb_to_bytes;
use crate::encode::{compress, compress_to_target, resize_with_quality};
use crate::output::{compressed_file_name, resized_file_name, write_output};
use crate::raster::format::OutputFormat;
use crate::raster::source::SourceImage;

/// What to do with the decoded image.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Compress {
        quality: Quality,
    },
    Target {
        target_bytes: i64,
    },
    Resize {
        width: Option<u32>,
        height: Option<u32>,
        keep_aspect: bool,
        format: OutputFormat,
        quality: Quality,
    },
}

impl Operation {
    pub fn mode(&self) -> JobMode {
        match self {
            Self::Compress { .. } => JobMode::Quality,
            Self::Target { .. } => JobMode::Target,
            Self::Resize { .. } => JobMode::Resize,
        }
    }
}

/// Configuration for a single job.
#[derive(Debug, Clone)]
pub struct JobConfig {
    pub input_path: PathBuf,
    /// Explicit output path. When absent, a name is derived from the input
    /// and placed in `output_dir`.
    pub output_path: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub operation: Operation,
    pub size_mode: SizeMode,
}

impl JobConfig {
    /// Build a runnable job from its YAML entry. Relative paths resolve
    /// against `job_dir`.
    pub fn from_job(job_dir: &Path, job: &Job, merged: &MergedConfig) -> crate::error::Result<Self> {
        job.validate()?;

        let operation = match job.mode {
            JobMode::Quality => Operation::Compress {
                quality: Quality::new(merged.quality)?,
            },
            JobMode::Target => Operation::Target {
                // validate() guarantees target_kb is present and positive
                target_bytes: kb_to_bytes(job.target_kb.unwrap_or_default()),
            },
            JobMode::Resize => Operation::Resize {
                width: job.width,
                height: job.height,
                keep_aspect: merged.keep_aspect,
                format: merged.format,
                quality: Quality::new(merged.resize_quality)?,
            },
        };

        Ok(JobConfig {
            input_path: resolve_path(job_dir, Path::new(&job.input)),
            output_path: job
                .output
                .as_ref()
                .map(|o| resolve_path(job_dir, Path::new(o))),
            output_dir: resolve_path(job_dir, &merged.output_dir),
            operation,
            size_mode: merged.size_mode,
        })
    }
}

/// Result of processing a single job.
#[derive(Debug, Clone, Serialize)]
pub struct JobResult {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub mode: JobMode,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
    pub quality: Quality,
    pub original_size: usize,
    pub output_size: usize,
    /// False only when a target size could not be reached.
    pub achieved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_bytes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Decode the input, run the operation, and write the encoded output.
pub fn run_job(config: &JobConfig) -> crate::error::Result<JobResult> {
    let image = SourceImage::open(&config.input_path)?;
    let mut encoder = CanvasEncoder::new(config.size_mode);

    let mut achieved = true;
    let mut target_bytes = None;
    let mut message = None;

    let encoded: EncodedResult = match &config.operation {
        Operation::Compress { quality } => compress(&mut encoder, &image, *quality)?,
        Operation::Target { target_bytes: target } => {
            let outcome = compress_to_target(&mut encoder, &image, *target)?;
            achieved = outcome.achieved;
            target_bytes = Some(outcome.target_bytes);
            message = outcome.shortfall_message();
            outcome.result
        }
        Operation::Resize {
            width,
            height,
            keep_aspect,
            format,
            quality,
        } => {
            let (w, h) = resolve_dimensions(image.dimensions(), *width, *height, *keep_aspect)?;
            resize_with_quality(&mut encoder, &image, w, h, *format, *quality)?
        }
    };

    let output_path = config.output_path.clone().unwrap_or_else(|| {
        let name = match config.operation {
            Operation::Resize { format, .. } => {
                resized_file_name(&config.input_path, encoded.width, encoded.height, format)
            }
            _ => compressed_file_name(&config.input_path),
        };
        config.output_dir.join(name)
    });

    write_output(&output_path, &encoded.data)?;

    info!(
        input = %config.input_path.display(),
        output = %output_path.display(),
        original_size = image.original_size(),
        output_size = encoded.size,
        quality = encoded.quality.get(),
        "job finished"
    );

    Ok(JobResult {
        input_path: config.input_path.clone(),
        output_path,
        mode: config.operation.mode(),
        format: encoded.format,
        width: encoded.width,
        height: encoded.height,
        quality: encoded.quality,
        original_size: image.original_size(),
        output_size: encoded.size,
        achieved,
        target_bytes,
        message,
    })
}

/// Resolve a potentially relative path against a base directory.
/// If the path is already absolute, return it as-is.
pub fn resolve_path(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
