use serde::{Deserialize, Serialize};

use crate::encode::target::kb_to_bytes;
use crate::error::ImageToolError;
use crate::raster::format::OutputFormat;

#[derive(Debug, Clone, Deserialize)]
pub struct JobFile {
    pub jobs: Vec<Job>,
}

/// ジョブの処理モード。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobMode {
    /// 指定品質でJPEG再エンコード
    #[default]
    Quality,
    /// 目標サイズに収まる最高品質を探索
    Target,
    /// 指定寸法・形式へリサイズ
    Resize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    pub input: String,
    pub output: Option<String>,
    #[serde(default)]
    pub mode: JobMode,
    pub quality: Option<f64>,
    pub target_kb: Option<f64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub keep_aspect: Option<bool>,
    pub format: Option<OutputFormat>,
}

impl Job {
    /// モードに必要なパラメータが揃っているか検証する。
    ///
    /// - `target`: `target_kb` が必須かつ1バイト以上
    /// - `resize`: `width` か `height` の少なくとも一方が必須
    /// - `quality` / `target` では `format` はJPEG以外指定不可
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.input.trim().is_empty() {
            return Err(ImageToolError::config("Job input path cannot be empty"));
        }

        match self.mode {
            JobMode::Target => match self.target_kb {
                None => {
                    return Err(ImageToolError::config(format!(
                        "Job '{}': mode 'target' requires target_kb",
                        self.input
                    )));
                }
                Some(kb) if kb.is_nan() || kb_to_bytes(kb) <= 0 => {
                    return Err(ImageToolError::config(format!(
                        "Job '{}': target_kb must be a positive number, got {kb}",
                        self.input
                    )));
                }
                Some(_) => {}
            },
            JobMode::Resize => {
                if self.width.is_none() && self.height.is_none() {
                    return Err(ImageToolError::config(format!(
                        "Job '{}': mode 'resize' requires width or height",
                        self.input
                    )));
                }
            }
            JobMode::Quality => {}
        }

        if self.mode != JobMode::Resize {
            if let Some(format) = self.format.filter(|f| *f != OutputFormat::Jpeg) {
                return Err(ImageToolError::config(format!(
                    "Job '{}': format '{}' is only available in resize mode",
                    self.input,
                    format.subtype()
                )));
            }
        }

        Ok(())
    }
}
