// Download collaborator: output file naming and writing

use std::path::Path;

use crate::raster::format::OutputFormat;

const COMPRESSED_FALLBACK_STEM: &str = "compressed-image";
const RESIZED_FALLBACK_STEM: &str = "resized-image";

fn stem_or(original: &Path, fallback: &str) -> String {
    original
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

/// `photo.png` -> `photo_compressed.jpg`. Compressed output is always JPEG.
pub fn compressed_file_name(original: &Path) -> String {
    format!(
        "{}_compressed.{}",
        stem_or(original, COMPRESSED_FALLBACK_STEM),
        OutputFormat::Jpeg.extension()
    )
}

/// `photo.png` -> `photo_800x600.webp`, using the MIME subtype as extension.
pub fn resized_file_name(original: &Path, width: u32, height: u32, format: OutputFormat) -> String {
    format!(
        "{}_{width}x{height}.{}",
        stem_or(original, RESIZED_FALLBACK_STEM),
        format.subtype()
    )
}

/// Write `data` to `path`, creating missing parent directories.
///
/// The bytes go to a sibling temporary file first and are renamed into
/// place, so a failed write never leaves a truncated image behind.
pub fn write_output(path: &Path, data: &[u8]) -> crate::error::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);
    std::fs::write(&tmp_path, data)?;
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}
