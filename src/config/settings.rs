use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::encode::size::SizeMode;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub quality: f64,
    pub resize_quality: f64,
    pub size_mode: SizeMode,
    pub keep_aspect: bool,
    pub parallel_workers: usize,
    pub output_dir: PathBuf,
    pub report_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            quality: 0.7,
            resize_quality: 0.9,
            size_mode: SizeMode::Exact,
            keep_aspect: true,
            parallel_workers: 0,
            output_dir: PathBuf::from("."),
            report_path: None,
        }
    }
}

impl Settings {
    pub fn from_yaml(yaml: &str) -> crate::error::Result<Self> {
        serde_yml::from_str(yaml).map_err(|e| {
            crate::error::ImageToolError::config(format!("Failed to parse settings YAML: {e}"))
        })
    }

    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}
